/// Data ingestion from the USGS Water Services.
///
/// Each upstream service gets its own file here.

pub mod usgs;

#[cfg(test)]
pub(crate) mod fixtures;
