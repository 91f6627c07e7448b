use std::time::Duration;

/// Pre-shot countdown: announces `from`, `from - 1`, ... `1`, one tick apart,
/// and returns one tick after the last announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub from: u32,
    pub tick: Duration,
}

impl Countdown {
    pub fn new(from: u32, tick: Duration) -> Self {
        Self { from, tick }
    }

    /// Run the countdown, calling `on_tick` with each number as it is shown.
    pub async fn run<F>(&self, mut on_tick: F)
    where
        F: FnMut(u32),
    {
        for n in (1..=self.from).rev() {
            on_tick(n);
            tokio::time::sleep(self.tick).await;
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn announces_numbers_in_descending_order() {
        let mut seen = Vec::new();
        Countdown::new(3, Duration::ZERO)
            .run(|n| seen.push(n))
            .await;
        assert_eq!(seen, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn zero_countdown_returns_immediately() {
        let mut seen = Vec::new();
        Countdown::new(0, Duration::from_secs(60))
            .run(|n| seen.push(n))
            .await;
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn waits_one_tick_per_number() {
        let start = Instant::now();
        Countdown::new(2, Duration::from_millis(20)).run(|_| {}).await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn default_is_three_seconds() {
        let countdown = Countdown::default();
        assert_eq!(countdown.from, 3);
        assert_eq!(countdown.tick, Duration::from_secs(1));
    }
}
