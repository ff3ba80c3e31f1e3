// wfh-tracker - app/timer.rs
//
// Per-project start/stop/reset timer state machine.
//
// At most one project's timer runs at any instant. That invariant is
// enforced in exactly one place: the controller owns the single
// `ActiveTimer` handle, and every start/stop call goes through it — there
// is no per-record running flag to drift out of sync.
//
// Elapsed time is derived from wall-clock deltas (`now - start_reference`),
// not by counting ticks, so a late or missed tick never loses time.

use crate::core::model::Project;
use std::time::{Duration, Instant};

/// Timer state of one project, as observed through the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
}

/// The single process-wide running-timer handle.
///
/// `start_reference` is back-dated by the project's already-accumulated
/// elapsed seconds, so `now - start_reference` always yields the total.
#[derive(Debug)]
struct ActiveTimer {
    index: usize,
    start_reference: Instant,
}

/// Enforces the exclusive-timer invariant over a project collection.
///
/// The controller holds only the running-timer handle; the project records
/// themselves live in the store, which passes them in by mutable slice.
/// Indices into that slice are the controller's project identity, so the
/// store must call [`TimerController::project_removed`] and
/// [`TimerController::project_moved`] when it mutates the collection shape.
#[derive(Debug, Default)]
pub struct TimerController {
    active: Option<ActiveTimer>,
}

impl TimerController {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Index of the project whose timer is running, if any.
    pub fn running_index(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.index)
    }

    /// Observed state of the project at `index`.
    pub fn state(&self, index: usize) -> TimerState {
        if self.running_index() == Some(index) {
            TimerState::Running
        } else {
            TimerState::Idle
        }
    }

    /// Start the timer for the project at `index`.
    ///
    /// Whichever timer was running first is stopped completely (its final
    /// elapsed value written) before the new one begins — including when it
    /// is this same project, so a repeated start replaces the tick reference
    /// instead of double-registering it.
    ///
    /// The start reference is back-dated by the already-accumulated count,
    /// so restarting after a stop continues from the prior total.
    pub fn start(&mut self, projects: &mut [Project], index: usize, now: Instant) {
        self.stop(projects, now);

        let accumulated = Duration::from_secs(projects[index].elapsed_seconds);
        self.active = Some(ActiveTimer {
            index,
            start_reference: now - accumulated,
        });
        tracing::debug!(project = %projects[index].name, "Timer started");
    }

    /// Recompute the running project's elapsed seconds from the wall clock.
    /// No-op when idle. Returns the index that was updated, if any.
    pub fn tick(&mut self, projects: &mut [Project], now: Instant) -> Option<usize> {
        let active = self.active.as_ref()?;
        projects[active.index].elapsed_seconds = elapsed_at(active.start_reference, now);
        Some(active.index)
    }

    /// Stop the running timer, writing its final elapsed value.
    /// Idempotent: stopping while idle is a no-op. Returns the index that
    /// was stopped, if any.
    pub fn stop(&mut self, projects: &mut [Project], now: Instant) -> Option<usize> {
        let active = self.active.take()?;
        projects[active.index].elapsed_seconds = elapsed_at(active.start_reference, now);
        tracing::debug!(project = %projects[active.index].name, "Timer stopped");
        Some(active.index)
    }

    /// Stop (if this project is running) and zero the counter.
    /// Valid from either state.
    pub fn reset(&mut self, projects: &mut [Project], index: usize, now: Instant) {
        if self.running_index() == Some(index) {
            self.stop(projects, now);
        }
        projects[index].set_elapsed(0);
    }

    /// Adjust the handle after the project at `removed_index` was removed.
    /// The store stops the timer before deleting the running project; this
    /// clears the handle anyway if that was skipped, rather than letting it
    /// point at the wrong record.
    pub fn project_removed(&mut self, removed_index: usize) {
        if let Some(active) = &mut self.active {
            if active.index == removed_index {
                self.active = None;
            } else if active.index > removed_index {
                active.index -= 1;
            }
        }
    }

    /// Adjust the handle after a remove-and-reinsert move of one project
    /// from `from` to `to`.
    pub fn project_moved(&mut self, from: usize, to: usize) {
        if let Some(active) = &mut self.active {
            if active.index == from {
                active.index = to;
            } else if from < active.index && active.index <= to {
                active.index -= 1;
            } else if to <= active.index && active.index < from {
                active.index += 1;
            }
        }
    }
}

/// Total elapsed seconds at `now` for a timer back-dated to `start_reference`,
/// rounded to the nearest second.
fn elapsed_at(start_reference: Instant, now: Instant) -> u64 {
    let millis = now.saturating_duration_since(start_reference).as_millis() as u64;
    (millis + 500) / 1000
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn projects(names: &[&str]) -> Vec<Project> {
        names.iter().map(|n| Project::new(*n)).collect()
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    /// Start, run 3 s, stop: elapsed is 3. Restart and run 2 more:
    /// elapsed accumulates to 5 across the stop/start cycle.
    #[test]
    fn test_accumulation_across_cycles() {
        let mut ps = projects(&["A"]);
        let mut timer = TimerController::new();
        let t0 = Instant::now();

        timer.start(&mut ps, 0, t0);
        timer.tick(&mut ps, t0 + secs(1));
        timer.tick(&mut ps, t0 + secs(2));
        timer.stop(&mut ps, t0 + secs(3));
        assert_eq!(ps[0].elapsed_seconds, 3);
        assert_eq!(timer.state(0), TimerState::Idle);

        let t1 = t0 + secs(60);
        timer.start(&mut ps, 0, t1);
        timer.stop(&mut ps, t1 + secs(2));
        assert_eq!(ps[0].elapsed_seconds, 5);
    }

    /// Elapsed is wall-clock derived: one late tick reports the full delta,
    /// not the number of ticks observed.
    #[test]
    fn test_tick_self_corrects_for_jitter() {
        let mut ps = projects(&["A"]);
        let mut timer = TimerController::new();
        let t0 = Instant::now();

        timer.start(&mut ps, 0, t0);
        // A single tick arriving 7.4 s late still records 7 s.
        timer.tick(&mut ps, t0 + Duration::from_millis(7400));
        assert_eq!(ps[0].elapsed_seconds, 7);
        // 7.6 s rounds up.
        timer.tick(&mut ps, t0 + Duration::from_millis(7600));
        assert_eq!(ps[0].elapsed_seconds, 8);
    }

    /// Starting B while A runs leaves exactly one running timer, and A's
    /// count is frozen at the value held at the moment of the switch.
    #[test]
    fn test_exclusive_timer_invariant() {
        let mut ps = projects(&["A", "B"]);
        let mut timer = TimerController::new();
        let t0 = Instant::now();

        timer.start(&mut ps, 0, t0);
        timer.start(&mut ps, 1, t0 + secs(3));

        assert_eq!(timer.state(0), TimerState::Idle);
        assert_eq!(timer.state(1), TimerState::Running);
        assert_eq!(ps[0].elapsed_seconds, 3);

        timer.tick(&mut ps, t0 + secs(10));
        assert_eq!(ps[0].elapsed_seconds, 3, "A must stay frozen");
        assert_eq!(ps[1].elapsed_seconds, 7);
    }

    /// A repeated start on the running project replaces the tick reference;
    /// time does not advance faster than the wall clock.
    #[test]
    fn test_restart_does_not_double_count() {
        let mut ps = projects(&["A"]);
        let mut timer = TimerController::new();
        let t0 = Instant::now();

        timer.start(&mut ps, 0, t0);
        timer.start(&mut ps, 0, t0 + secs(2));
        timer.stop(&mut ps, t0 + secs(5));
        assert_eq!(ps[0].elapsed_seconds, 5);
    }

    /// stop() while idle is a no-op and reports nothing stopped.
    #[test]
    fn test_stop_is_idempotent() {
        let mut ps = projects(&["A"]);
        let mut timer = TimerController::new();
        let t0 = Instant::now();

        assert_eq!(timer.stop(&mut ps, t0), None);

        timer.start(&mut ps, 0, t0);
        assert_eq!(timer.stop(&mut ps, t0 + secs(1)), Some(0));
        assert_eq!(timer.stop(&mut ps, t0 + secs(2)), None);
        assert_eq!(ps[0].elapsed_seconds, 1);
    }

    /// reset() yields a zero counter and Idle state from either prior state.
    #[test]
    fn test_reset_from_both_states() {
        let mut ps = projects(&["A"]);
        let mut timer = TimerController::new();
        let t0 = Instant::now();

        timer.start(&mut ps, 0, t0);
        timer.tick(&mut ps, t0 + secs(4));
        timer.reset(&mut ps, 0, t0 + secs(4));
        assert_eq!(ps[0].elapsed_seconds, 0);
        assert_eq!(timer.state(0), TimerState::Idle);

        ps[0].set_elapsed(99);
        timer.reset(&mut ps, 0, t0 + secs(5));
        assert_eq!(ps[0].elapsed_seconds, 0);
    }

    /// Resetting an idle project does not disturb a different running timer.
    #[test]
    fn test_reset_other_project_keeps_timer_running() {
        let mut ps = projects(&["A", "B"]);
        let mut timer = TimerController::new();
        let t0 = Instant::now();

        timer.start(&mut ps, 1, t0);
        ps[0].set_elapsed(50);
        timer.reset(&mut ps, 0, t0 + secs(2));

        assert_eq!(ps[0].elapsed_seconds, 0);
        assert_eq!(timer.state(1), TimerState::Running);
        timer.stop(&mut ps, t0 + secs(3));
        assert_eq!(ps[1].elapsed_seconds, 3);
    }

    /// The handle follows its project across removals and moves.
    #[test]
    fn test_index_maintenance() {
        let mut ps = projects(&["A", "B", "C"]);
        let mut timer = TimerController::new();
        let t0 = Instant::now();

        timer.start(&mut ps, 2, t0);

        // Removing an earlier project shifts the handle down.
        timer.project_removed(0);
        assert_eq!(timer.running_index(), Some(1));

        // Moving the running project tracks its new position.
        timer.project_moved(1, 0);
        assert_eq!(timer.running_index(), Some(0));

        // Moving another project over it shifts it accordingly.
        timer.project_moved(1, 0);
        assert_eq!(timer.running_index(), Some(1));

        // Removing the running project clears the handle.
        timer.project_removed(1);
        assert_eq!(timer.running_index(), None);
    }
}
