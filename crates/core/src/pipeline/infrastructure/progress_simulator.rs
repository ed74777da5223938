use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::pipeline::progress_schedule::ProgressSchedule;

/// How often the simulator re-checks the completion flag while waiting
/// out a step interval.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Background thread that walks a `ProgressSchedule` while the blocking
/// model call runs, invoking `on_step` with the eased fraction at each
/// step.
///
/// The thread shares only a completion flag with its owner and is
/// detached rather than joined: stopping is best-effort, and a step
/// that was already underway when the flag flipped still fires once,
/// which is harmless for a cosmetic signal. Steps left when the host
/// call finishes early are never emitted.
pub struct ProgressSimulator {
    done: Arc<AtomicBool>,
}

impl ProgressSimulator {
    pub fn start<F>(schedule: ProgressSchedule, on_step: F) -> Self
    where
        F: Fn(f64) + Send + 'static,
    {
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();

        thread::spawn(move || {
            for step in 0..schedule.steps() {
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                on_step(schedule.fraction_at(step));

                // Wait out the interval in short slices so the thread
                // winds down promptly once the flag is set.
                let mut remaining = schedule.step_interval();
                while !remaining.is_zero() && !flag.load(Ordering::Relaxed) {
                    let slice = remaining.min(POLL_INTERVAL);
                    thread::sleep(slice);
                    remaining = remaining.saturating_sub(slice);
                }
            }
        });

        Self { done }
    }

    /// Signal the thread to stop after its current step.
    pub fn finish(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Drop for ProgressSimulator {
    fn drop(&mut self) {
        self.finish();
    }
}
