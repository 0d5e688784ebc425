use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Self-re-arming deadline: the next run is due `delay` after the previous
/// run completed, not on a fixed grid.
#[derive(Debug, Clone)]
pub struct RefreshSchedule {
    delay: Duration,
    next_due: Option<Instant>,
    token: CancellationToken,
}

impl RefreshSchedule {
    pub fn new(delay: Duration, token: CancellationToken) -> Self {
        Self {
            delay,
            next_due: None,
            token,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.next_due {
            Some(due) if due > now => Some(due - now),
            _ => None,
        }
    }

    pub fn rearm(&mut self, completed_at: Instant) {
        self.next_due = Some(completed_at + self.delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_is_due_immediately() {
        let schedule = RefreshSchedule::new(Duration::from_millis(100), CancellationToken::new());
        assert_eq!(schedule.remaining(Instant::now()), None);
    }

    #[test]
    fn rearm_counts_from_completion() {
        let mut schedule =
            RefreshSchedule::new(Duration::from_millis(100), CancellationToken::new());
        let start = Instant::now();
        schedule.rearm(start);
        assert_eq!(
            schedule.remaining(start + Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );
        assert_eq!(schedule.remaining(start + Duration::from_millis(100)), None);
    }

    #[test]
    fn clones_share_the_cancel_flag() {
        let token = CancellationToken::new();
        let schedule = RefreshSchedule::new(Duration::from_millis(10), token.clone());
        assert!(!schedule.is_cancelled());
        token.cancel();
        assert!(schedule.is_cancelled());
    }
}
