use std::time::Duration;

/// Rolling window of step durations.
#[derive(Debug)]
pub struct StepTimer {
    history: Vec<Duration>,
    capacity: usize,
    index: usize,
    filled: bool,
}

impl StepTimer {
    /// Create a timer that remembers the last `capacity` steps (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: vec![Duration::ZERO; capacity],
            capacity,
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.capacity;
        if self.index == 0 {
            self.filled = true;
        }
    }

    fn window(&self) -> &[Duration] {
        &self.history[..self.count()]
    }

    pub fn average(&self) -> Duration {
        let window = self.window();
        if window.is_empty() {
            return Duration::ZERO;
        }
        window.iter().sum::<Duration>() / window.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.window().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.window().iter().copied().min().unwrap_or(Duration::ZERO)
    }

    /// Number of samples currently held.
    pub fn count(&self) -> usize {
        if self.filled {
            self.capacity
        } else {
            self.index
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_timer_reports_zero() {
        let timer = StepTimer::new(4);
        assert_eq!(timer.count(), 0);
        assert_eq!(timer.average(), Duration::ZERO);
        assert_eq!(timer.max(), Duration::ZERO);
    }

    #[test]
    fn timer_tracks_history() {
        let mut timer = StepTimer::new(3);
        timer.record(Duration::from_micros(10));
        timer.record(Duration::from_micros(20));
        timer.record(Duration::from_micros(30));

        assert_eq!(timer.count(), 3);
        assert_eq!(timer.average(), Duration::from_micros(20));
        assert_eq!(timer.max(), Duration::from_micros(30));
        assert_eq!(timer.min(), Duration::from_micros(10));
    }

    #[test]
    fn timer_wraps_around() {
        let mut timer = StepTimer::new(2);
        timer.record(Duration::from_micros(10));
        timer.record(Duration::from_micros(20));
        timer.record(Duration::from_micros(30));

        assert_eq!(timer.count(), 2);
        assert_eq!(timer.average(), Duration::from_micros(25));
        assert_eq!(timer.min(), Duration::from_micros(20));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut timer = StepTimer::new(0);
        timer.record(Duration::from_micros(5));
        timer.record(Duration::from_micros(7));
        assert_eq!(timer.count(), 1);
        assert_eq!(timer.average(), Duration::from_micros(7));
    }
}
