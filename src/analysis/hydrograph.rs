/// Hydrograph normalization: per-site IV series → flat, gap-filled chart records.
///
/// `normalize` takes the series produced by the ingest layer and emits one
/// `NormalizedRecord` per observation, in site order and, within a site, in
/// the order the observations were received. Whenever two consecutive
/// observations of a site are more than 30 minutes apart, placeholder
/// records carrying the `"NA"` sentinel are inserted every 15 minutes
/// between them so the charting layer draws a visible gap instead of
/// interpolating across the outage.
///
/// Observations are neither sorted nor deduplicated; a reordered or
/// repeated timestamp simply produces a zero or negative gap, which never
/// yields placeholders.

use crate::model::{
    NormalizedRecord, RecordValue, SourceSeries, FILL_INCREMENT_MS, GAP_THRESHOLD_MS,
};
use crate::time_policy::{format_date_time, parse_wall_clock, TimePolicy};
use chrono::NaiveDateTime;

/// Placeholder count above which a single gap is logged as suspicious:
/// one year of 15-minute slots.
const LARGE_GAP_FILLERS: i64 = 365 * 96;

// ---------------------------------------------------------------------------
// Gap-fill cadence
// ---------------------------------------------------------------------------

/// Threshold and spacing used to synthesize placeholder records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapFill {
    threshold_ms: i64,
    increment_ms: i64,
}

impl GapFill {
    /// Returns `None` unless `increment_ms` is positive and `threshold_ms`
    /// is non-negative.
    pub fn new(threshold_ms: i64, increment_ms: i64) -> Option<Self> {
        if increment_ms <= 0 || threshold_ms < 0 {
            return None;
        }
        Some(Self { threshold_ms, increment_ms })
    }

    /// Number of placeholders for a gap between two consecutive observations.
    ///
    /// `floor(gap / increment) - 1`, clamped at zero, and only when the gap
    /// exceeds the threshold.
    pub fn filler_count(&self, gap_ms: i64) -> i64 {
        if gap_ms <= self.threshold_ms {
            return 0;
        }
        (gap_ms / self.increment_ms - 1).max(0)
    }

    /// Instants of the placeholders between `prev_ms` and `next_ms`, ascending.
    pub fn filler_instants(&self, prev_ms: i64, next_ms: i64) -> impl Iterator<Item = i64> {
        let increment = self.increment_ms;
        (1..=self.filler_count(next_ms - prev_ms)).map(move |step| prev_ms + increment * step)
    }
}

impl Default for GapFill {
    fn default() -> Self {
        Self {
            threshold_ms: GAP_THRESHOLD_MS,
            increment_ms: FILL_INCREMENT_MS,
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Flattens and gap-fills every series with the default 30/15 minute cadence.
///
/// An absent or empty input yields an empty list; this function never fails.
pub fn normalize(source: Option<&[SourceSeries]>, policy: &TimePolicy) -> Vec<NormalizedRecord> {
    normalize_with(source, policy, &GapFill::default())
}

/// Same as `normalize` with an explicit gap-fill cadence.
pub fn normalize_with(
    source: Option<&[SourceSeries]>,
    policy: &TimePolicy,
    gap_fill: &GapFill,
) -> Vec<NormalizedRecord> {
    let mut records = Vec::new();

    for series in source.unwrap_or_default() {
        normalize_series(series, policy, gap_fill, &mut records);
    }

    records
}

fn normalize_series(
    series: &SourceSeries,
    policy: &TimePolicy,
    gap_fill: &GapFill,
    out: &mut Vec<NormalizedRecord>,
) {
    let start_len = out.len();
    let mut synthetic = 0usize;
    let mut prev_ms: Option<i64> = None;

    for observation in &series.observations {
        let parsed = parse_wall_clock(&observation.date_time)
            .and_then(|wall| policy.to_epoch_millis(wall).map(|ms| (wall, ms)));

        let Some((wall, ms)) = parsed else {
            tracing::warn!(
                site = %series.site_id,
                date_time = %observation.date_time,
                "Skipping observation with unreadable timestamp"
            );
            continue;
        };

        if let Some(prev) = prev_ms {
            let fillers = gap_fill.filler_count(ms - prev);
            if fillers > LARGE_GAP_FILLERS {
                tracing::warn!(
                    site = %series.site_id,
                    date_time = %observation.date_time,
                    placeholders = fillers,
                    "Filling unusually long gap; upstream timestamps may be corrupt"
                );
            }
            for filler_ms in gap_fill.filler_instants(prev, ms) {
                // Out-of-range instants are dropped.
                if let Some(filler_wall) = policy.to_wall_clock(filler_ms) {
                    out.push(make_record(series, &filler_wall, filler_ms, RecordValue::Missing));
                    synthetic += 1;
                }
            }
        }

        out.push(make_record(
            series,
            &wall,
            ms,
            RecordValue::Observed(observation.value.clone()),
        ));
        prev_ms = Some(ms);
    }

    tracing::debug!(
        site = %series.site_id,
        records = out.len() - start_len,
        synthetic,
        "Normalized series"
    );
}

fn make_record(
    series: &SourceSeries,
    wall: &NaiveDateTime,
    epoch_millis: i64,
    value: RecordValue,
) -> NormalizedRecord {
    let (date, time) = format_date_time(wall);
    NormalizedRecord {
        key: series.site_id.clone(),
        name: series.site_name.clone(),
        date,
        time,
        timezone: series.timezone_abbreviation.clone(),
        time_epoch_millis: epoch_millis,
        value,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
