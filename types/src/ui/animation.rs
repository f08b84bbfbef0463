use std::time::Duration;

pub(crate) fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }

    let elapsed = elapsed.as_secs_f32();
    let total = duration.as_secs_f32();
    (elapsed / total).clamp(0.0, 1.0)
}

/// A cancellable, delta-driven recurring schedule.
///
/// The owner advances it with frame deltas; each call reports the instants
/// (measured from the start of the schedule) at which it fired. Once cancelled
/// it never fires again.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
    fired: u32,
    cancelled: bool,
}

impl Interval {
    /// A zero period never fires.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            fired: 0,
            cancelled: false,
        }
    }

    pub fn advance(&mut self, delta: Duration) -> Firings {
        if self.cancelled || self.period.is_zero() {
            return Firings::empty(self.period);
        }

        self.elapsed = self.elapsed.saturating_add(delta);
        let due = self.elapsed.as_nanos() / self.period.as_nanos();
        let due = u32::try_from(due).unwrap_or(u32::MAX);
        let start = self.fired;
        self.fired = due.max(start);

        Firings {
            next: start.saturating_add(1),
            end: self.fired,
            period: self.period,
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of firings so far.
    #[must_use]
    pub fn fired(&self) -> u32 {
        self.fired
    }
}

/// Scheduled instants produced by one [`Interval::advance`] step.
#[derive(Debug, Clone)]
pub struct Firings {
    next: u32,
    end: u32,
    period: Duration,
}

impl Firings {
    fn empty(period: Duration) -> Self {
        Self {
            next: 1,
            end: 0,
            period,
        }
    }
}

impl Iterator for Firings {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.next > self.end {
            return None;
        }
        let at = self.period.saturating_mul(self.next);
        match self.next.checked_add(1) {
            Some(next) => self.next = next,
            None => self.end = 0,
        }
        Some(at)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (u64::from(self.end) + 1).saturating_sub(u64::from(self.next));
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}
