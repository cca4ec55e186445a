/// Data shaping for the hydrograph service.
///
/// Submodules:
/// - `hydrograph` - turns ingest output into flat, gap-filled chart records.

pub mod hydrograph;
