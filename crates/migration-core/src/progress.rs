//! Progress Engine (C2)
//!
//! A pure function over a baseline, a source total, and a live storage
//! reading. It never touches the store itself — callers persist the
//! resulting snapshot/daily rows as described in `migration-core::usecases`.

use serde::{Deserialize, Serialize};

use crate::domain::ToolError;

/// Mean size, in megabytes, used to split observed growth into photo/video
/// counts. Implementation-calibrated for the reference dataset; documented
/// here rather than made configurable, since a reconfigurable prior would
/// invite drift from the calibration it reflects.
pub const PHOTO_MEAN_SIZE_MB: f64 = 6.5;
/// See [`PHOTO_MEAN_SIZE_MB`].
pub const VIDEO_MEAN_SIZE_MB: f64 = 150.0;
/// Share of storage growth attributed to photos vs. videos.
pub const PHOTO_GROWTH_SHARE: f64 = 0.7;
/// See [`PHOTO_GROWTH_SHARE`].
pub const VIDEO_GROWTH_SHARE: f64 = 0.3;

const GB_TO_MB: f64 = 1024.0;

/// Inputs to [`calculate_progress`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressInput {
    pub baseline_gb: f64,
    pub total_source_storage_gb: f64,
    pub current_storage_gb: f64,
    pub day_number: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageProgress {
    pub baseline_gb: f64,
    pub current_gb: f64,
    pub growth_gb: f64,
    pub remaining_gb: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MediaEstimates {
    pub photos: i64,
    pub videos: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentAndRate {
    pub percent_complete: f64,
    pub rate_gb_per_day: Option<f64>,
}

/// The composite record returned by `calculate_progress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressOutput {
    pub storage: StorageProgress,
    pub estimates: MediaEstimates,
    pub progress: PercentAndRate,
    pub success: bool,
    pub message: String,
}

/// Splits `growth_gb` of observed storage growth into estimated photo and
/// video counts using the fixed size priors above. Shared between
/// [`calculate_progress`] and the media-transfer first-visibility check so
/// the two don't duplicate the arithmetic.
#[must_use]
pub fn split_media_kind(growth_gb: f64) -> MediaEstimates {
    let growth_mb = growth_gb.max(0.0) * GB_TO_MB;
    let photo_mb = growth_mb * PHOTO_GROWTH_SHARE;
    let video_mb = growth_mb * VIDEO_GROWTH_SHARE;
    MediaEstimates {
        photos: (photo_mb / PHOTO_MEAN_SIZE_MB).floor() as i64,
        videos: (video_mb / VIDEO_MEAN_SIZE_MB).floor() as i64,
    }
}

fn milestone_message(day_number: i32) -> &'static str {
    match day_number {
        1 => "Transfer initiated, Apple is processing",
        2 => "Apple still processing, not yet visible",
        3 => "Apple still processing, photos appear soon",
        4 => "Photos appearing!",
        5 => "Transfer accelerating",
        6 => "Near completion",
        7 => "Transfer complete",
        _ => unreachable!("day_number validated to 1..=7 before this point"),
    }
}

/// The milestone message for `day_number`, or `None` outside `1..=7`. Exposed
/// separately from [`calculate_progress`] for read paths (T5's day summary)
/// that need the expected milestone for a day with no transfer yet.
#[must_use]
pub fn milestone_for_day(day_number: i32) -> Option<&'static str> {
    (1..=7).contains(&day_number).then(|| milestone_message(day_number))
}

/// Computes storage growth, media estimates, and percent complete for a
/// given day, including the day-indexed milestone table and the Day-7
/// override. `day_number` outside `1..=7`
/// yields `invalid_argument` — callers (T5) validate this too, but the
/// engine re-checks since it is a reusable pure function.
///
/// # Errors
/// Returns [`ToolError::InvalidArgument`] if `day_number` is outside `1..=7`.
pub fn calculate_progress(input: ProgressInput) -> Result<ProgressOutput, ToolError> {
    if !(1..=7).contains(&input.day_number) {
        return Err(ToolError::InvalidArgument(format!(
            "day_number must be in 1..=7, got {}",
            input.day_number
        )));
    }

    let growth_gb = (input.current_storage_gb - input.baseline_gb).max(0.0);
    let raw_percent = if input.total_source_storage_gb > 0.0 {
        (100.0 * growth_gb / input.total_source_storage_gb).min(100.0)
    } else {
        0.0
    };
    let estimates = split_media_kind(growth_gb);

    let (percent_complete, success) = match input.day_number {
        1..=3 => (0.0, false),
        4..=6 => (raw_percent, false),
        7 => (100.0, true),
        _ => unreachable!("validated above"),
    };

    let rate_gb_per_day = if input.day_number > 1 {
        Some(growth_gb / f64::from((input.day_number - 1).max(1)))
    } else {
        None
    };

    Ok(ProgressOutput {
        storage: StorageProgress {
            baseline_gb: input.baseline_gb,
            current_gb: input.current_storage_gb,
            growth_gb,
            remaining_gb: (input.total_source_storage_gb - growth_gb).max(0.0),
        },
        estimates,
        progress: PercentAndRate {
            percent_complete,
            rate_gb_per_day,
        },
        success,
        message: milestone_message(input.day_number).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(day_number: i32, current_storage_gb: f64) -> ProgressInput {
        ProgressInput {
            baseline_gb: 1.5,
            total_source_storage_gb: 10.0,
            current_storage_gb,
            day_number,
        }
    }

    #[test]
    fn day_1_through_3_report_zero_percent_regardless_of_storage() {
        for day in 1..=3 {
            let output = calculate_progress(input(day, 9.9)).unwrap();
            assert_eq!(output.progress.percent_complete, 0.0);
            assert!(!output.success);
        }
    }

    #[test]
    fn day_4_first_visibility_matches_scenario_s3() {
        // baseline 1.5, T = 10, current = 4.3 -> growth 2.8, raw percent 28
        let output = calculate_progress(input(4, 4.3)).unwrap();
        assert!((output.progress.percent_complete - 28.0).abs() < 0.1);
        assert_eq!(output.estimates.photos, 308);
        assert_eq!(output.estimates.videos, 5);
    }

    #[test]
    fn day_7_overrides_to_100_percent_success_regardless_of_storage() {
        // current = 6.0 would otherwise yield raw percent ~45 (scenario S4)
        let output = calculate_progress(input(7, 6.0)).unwrap();
        assert_eq!(output.progress.percent_complete, 100.0);
        assert!(output.success);
        assert_eq!(output.message, "Transfer complete");
    }

    #[test]
    fn day_out_of_range_is_invalid_argument() {
        assert!(matches!(
            calculate_progress(input(0, 1.5)),
            Err(ToolError::InvalidArgument(_))
        ));
        assert!(matches!(
            calculate_progress(input(8, 1.5)),
            Err(ToolError::InvalidArgument(_))
        ));
    }

    #[test]
    fn growth_never_goes_negative_when_storage_drops_below_baseline() {
        let output = calculate_progress(input(4, 1.0)).unwrap();
        assert_eq!(output.storage.growth_gb, 0.0);
    }

    #[test]
    fn rate_is_null_on_day_one_and_present_thereafter() {
        assert!(calculate_progress(input(1, 1.5)).unwrap().progress.rate_gb_per_day.is_none());
        assert!(calculate_progress(input(4, 4.3)).unwrap().progress.rate_gb_per_day.is_some());
    }
}
