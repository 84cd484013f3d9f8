/// Completed words per time bonus.
pub const COMBO_REQUIREMENT: u32 = 5;
/// Combo span of one full meter: four bonus cycles.
pub const COMBO_METER_SPAN: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BonusEvent {
    /// Combo count that earned the bonus.
    pub combo: u32,
    pub seconds: u32,
}

/// Seconds granted for the `level`-th bonus of an unbroken combo.
pub fn bonus_seconds(level: u32) -> u32 {
    match level {
        0..=2 => 1,
        3 => 2,
        _ => 3,
    }
}

/// Consecutive completions since the last miss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Combo {
    count: u32,
}

impl Combo {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn on_word_completed(&mut self) -> Option<BonusEvent> {
        self.count += 1;
        if self.count % COMBO_REQUIREMENT != 0 {
            return None;
        }
        let level = self.count / COMBO_REQUIREMENT;
        Some(BonusEvent {
            combo: self.count,
            seconds: bonus_seconds(level),
        })
    }

    pub fn on_miss(&mut self) {
        self.count = 0;
    }

    /// Meter fill in percent, `0.0..100.0`.
    pub fn meter_percent(&self) -> f64 {
        (self.count % COMBO_METER_SPAN) as f64 / COMBO_METER_SPAN as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(combo: &mut Combo, n: u32) -> Vec<Option<u32>> {
        (0..n)
            .map(|_| combo.on_word_completed().map(|b| b.seconds))
            .collect()
    }

    #[test]
    fn bonus_schedule_first_four_cycles() {
        let mut combo = Combo::default();
        let grants: Vec<(u32, u32)> = complete(&mut combo, 20)
            .into_iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|s| (i as u32 + 1, s)))
            .collect();
        assert_eq!(grants, vec![(5, 1), (10, 1), (15, 2), (20, 3)]);
    }

    #[test]
    fn bonus_stays_at_three_seconds_after_fourth_cycle() {
        let mut combo = Combo::default();
        complete(&mut combo, 20);
        let grants = complete(&mut combo, 10);
        assert_eq!(grants[4], Some(3));
        assert_eq!(grants[9], Some(3));
    }

    #[test]
    fn miss_restarts_the_cycle() {
        let mut combo = Combo::default();
        complete(&mut combo, 4);
        combo.on_miss();
        assert_eq!(combo.count(), 0);
        let grants = complete(&mut combo, 5);
        assert_eq!(grants, vec![None, None, None, None, Some(1)]);
    }

    #[test]
    fn miss_on_zero_stays_zero() {
        let mut combo = Combo::default();
        combo.on_miss();
        combo.on_miss();
        assert_eq!(combo.count(), 0);
    }

    #[test]
    fn meter_wraps_every_twenty() {
        let mut combo = Combo::default();
        assert_eq!(combo.meter_percent(), 0.0);
        complete(&mut combo, 5);
        assert_eq!(combo.meter_percent(), 25.0);
        complete(&mut combo, 14);
        assert_eq!(combo.meter_percent(), 95.0);
        complete(&mut combo, 1);
        assert_eq!(combo.meter_percent(), 0.0);
    }
}
