use std::time::Duration;

use crate::audio::domain::model_size::ModelSize;

/// Never fewer steps than this, so short clips still animate.
const MIN_STEPS: usize = 10;
/// One step per this many seconds of estimated work.
const SECONDS_PER_STEP: f64 = 5.0;

/// Fabricated progress curve for a blocking call whose true progress is
/// not observable.
///
/// Estimated total time is audio duration times a per-model multiplier;
/// the estimate is partitioned into evenly spaced steps and each step
/// maps to an ease-out fraction, so perceived progress is faster early
/// and slower near completion. Purely cosmetic.
#[derive(Clone, Debug)]
pub struct ProgressSchedule {
    steps: usize,
    step_interval: Duration,
    estimated_seconds: f64,
}

impl ProgressSchedule {
    pub fn new(audio_duration: f64, model: ModelSize) -> Self {
        let estimated_seconds = audio_duration.max(0.0) * model.time_multiplier();
        let steps = ((estimated_seconds / SECONDS_PER_STEP) as usize).max(MIN_STEPS);
        let step_interval = Duration::from_secs_f64(estimated_seconds / steps as f64);
        Self {
            steps,
            step_interval,
            estimated_seconds,
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    pub fn estimated_seconds(&self) -> f64 {
        self.estimated_seconds
    }

    /// Eased completion fraction in [0, 1] at the given step.
    pub fn fraction_at(&self, step: usize) -> f64 {
        let p = (step as f64 / self.steps as f64).clamp(0.0, 1.0);
        ease_out(p)
    }
}

/// Ease-out curve `p * (2 - p)`: fast start, slow finish.
pub fn ease_out(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    p * (2.0 - p)
}

/// Human-friendly duration for status lines: "42s", "3m 10s", "1h 2m 5s".
pub fn humanize_duration(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    if seconds < 60.0 {
        format!("{seconds:.0}s")
    } else if seconds < 3600.0 {
        let minutes = (seconds / 60.0).floor();
        let secs = seconds % 60.0;
        format!("{minutes:.0}m {secs:.0}s")
    } else {
        let hours = (seconds / 3600.0).floor();
        let minutes = ((seconds % 3600.0) / 60.0).floor();
        let secs = seconds % 60.0;
        format!("{hours:.0}h {minutes:.0}m {secs:.0}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_minimum_step_count_for_short_audio() {
        let schedule = ProgressSchedule::new(10.0, ModelSize::Tiny); // ~1s of work
        assert_eq!(schedule.steps(), MIN_STEPS);
    }

    #[test]
    fn test_one_step_per_five_seconds_for_long_audio() {
        // 1000s of audio on large = 1500s estimated = 300 steps
        let schedule = ProgressSchedule::new(1000.0, ModelSize::Large);
        assert_eq!(schedule.steps(), 300);
        assert_relative_eq!(schedule.step_interval().as_secs_f64(), 5.0, epsilon = 0.01);
    }

    #[test]
    fn test_estimate_scales_with_model_multiplier() {
        let tiny = ProgressSchedule::new(100.0, ModelSize::Tiny);
        let large = ProgressSchedule::new(100.0, ModelSize::Large);
        assert_relative_eq!(tiny.estimated_seconds(), 10.0);
        assert_relative_eq!(large.estimated_seconds(), 150.0);
    }

    #[test]
    fn test_fractions_are_monotonic_and_bounded() {
        let schedule = ProgressSchedule::new(3600.0, ModelSize::Medium);
        let mut previous = -1.0;
        for step in 0..=schedule.steps() {
            let fraction = schedule.fraction_at(step);
            assert!((0.0..=1.0).contains(&fraction));
            assert!(fraction >= previous, "progress went backwards at {step}");
            previous = fraction;
        }
    }

    #[test]
    fn test_fraction_saturates_past_final_step() {
        let schedule = ProgressSchedule::new(10.0, ModelSize::Base);
        assert_relative_eq!(schedule.fraction_at(schedule.steps() * 2), 1.0);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(0.5, 0.75)]
    #[case(1.0, 1.0)]
    fn test_ease_out_curve(#[case] p: f64, #[case] expected: f64) {
        assert_relative_eq!(ease_out(p), expected);
    }

    #[test]
    fn test_ease_out_is_faster_than_linear_midway() {
        assert!(ease_out(0.3) > 0.3);
    }

    #[test]
    fn test_zero_duration_audio_is_harmless() {
        let schedule = ProgressSchedule::new(0.0, ModelSize::Base);
        assert_eq!(schedule.steps(), MIN_STEPS);
        assert_eq!(schedule.step_interval(), Duration::ZERO);
        assert_relative_eq!(schedule.fraction_at(schedule.steps()), 1.0);
    }

    #[rstest]
    #[case(0.0, "0s")]
    #[case(42.4, "42s")]
    #[case(190.0, "3m 10s")]
    #[case(3725.0, "1h 2m 5s")]
    fn test_humanize_duration(#[case] seconds: f64, #[case] expected: &str) {
        assert_eq!(humanize_duration(seconds), expected);
    }
}
