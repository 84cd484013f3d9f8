/// End-of-round figures derived from raw counters. Never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundStats {
    pub profit_or_loss: i64,
    /// Seconds actually played, bonuses included.
    pub actual_play_time: u32,
    pub avg_keys_per_second: f64,
}

impl RoundStats {
    pub fn derive(
        score: u64,
        cost: u32,
        total_time: u32,
        remaining_time: u32,
        correct_keys: u64,
    ) -> Self {
        let actual_play_time = total_time.saturating_sub(remaining_time);
        Self {
            profit_or_loss: profit_or_loss(score, cost),
            actual_play_time,
            avg_keys_per_second: keys_per_second(correct_keys, actual_play_time),
        }
    }

    /// Keys per second to one decimal place, as shown on the result screen.
    pub fn avg_keys_display(&self) -> String {
        format!("{:.1}", self.avg_keys_per_second)
    }

    pub fn is_profit(&self) -> bool {
        self.profit_or_loss >= 0
    }
}

pub fn profit_or_loss(score: u64, cost: u32) -> i64 {
    score as i64 - cost as i64
}

pub fn keys_per_second(correct_keys: u64, seconds: u32) -> f64 {
    if seconds == 0 {
        return 0.0;
    }
    correct_keys as f64 / seconds as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_play_time_has_zero_rate() {
        let stats = RoundStats::derive(0, 5000, 90, 90, 12);
        assert_eq!(stats.actual_play_time, 0);
        assert_eq!(stats.avg_keys_per_second, 0.0);
        assert_eq!(stats.avg_keys_display(), "0.0");
    }

    #[test]
    fn bonus_time_counts_as_played() {
        // 90s course, +4s of bonuses, ended at zero.
        let stats = RoundStats::derive(9000, 5000, 94, 0, 188);
        assert_eq!(stats.actual_play_time, 94);
        assert!((stats.avg_keys_per_second - 2.0).abs() < 1e-9);
        assert_eq!(stats.profit_or_loss, 4000);
        assert!(stats.is_profit());
    }

    #[test]
    fn loss_is_negative() {
        let stats = RoundStats::derive(1800, 5000, 90, 0, 10);
        assert_eq!(stats.profit_or_loss, -3200);
        assert!(!stats.is_profit());
        assert_eq!(stats.avg_keys_display(), "0.1");
    }
}
