use std::collections::BTreeMap;

use crate::content::Course;
use crate::engine::combo::Combo;
use crate::engine::stats::RoundStats;
use crate::generator::spawner::Item;
use crate::session::input::InputBuffer;
use crate::session::schedule::RoundId;

/// A visible "+N seconds" notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BonusFlash {
    pub id: u64,
    pub seconds: u32,
}

/// Everything that belongs to one played round.
#[derive(Clone, Debug)]
pub struct Round {
    pub id: RoundId,
    pub course: Course,
    pub score: u64,
    pub remaining_time: u32,
    /// Course time limit plus every bonus granted so far.
    pub total_time: u32,
    pub item: Option<Item>,
    pub input: InputBuffer,
    pub combo: Combo,
    pub plate_counts: BTreeMap<u32, u32>,
    pub correct_keys: u64,
    pub mistypes: u64,
    pub misses: u32,
    pub bonus: Option<BonusFlash>,
}

impl Round {
    /// A fresh round with every counter at zero and a count slot per tier.
    pub fn new(id: RoundId, course: Course, tiers: &[u32]) -> Self {
        let time = course.time_limit;
        Self {
            id,
            course,
            score: 0,
            remaining_time: time,
            total_time: time,
            item: None,
            input: InputBuffer::default(),
            combo: Combo::default(),
            plate_counts: tiers.iter().map(|&price| (price, 0)).collect(),
            correct_keys: 0,
            mistypes: 0,
            misses: 0,
            bonus: None,
        }
    }

    pub fn target(&self) -> Option<&str> {
        self.item.as_ref().map(|item| item.word.as_str())
    }

    pub fn plates_eaten(&self) -> u32 {
        self.plate_counts.values().sum()
    }

    pub fn stats(&self) -> RoundStats {
        RoundStats::derive(
            self.score,
            self.course.cost,
            self.total_time,
            self.remaining_time,
            self.correct_keys,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRegistry;

    #[test]
    fn new_round_starts_clean() {
        let content = ContentRegistry::load().unwrap();
        let course = content.course("NORMAL").unwrap().clone();
        let round = Round::new(RoundId(4), course, &content.prices());
        assert_eq!(round.remaining_time, 90);
        assert_eq!(round.total_time, 90);
        assert_eq!(round.plate_counts.len(), 5);
        assert!(round.plate_counts.values().all(|&n| n == 0));
        assert_eq!(round.plates_eaten(), 0);
        assert!(round.target().is_none());
    }

    #[test]
    fn stats_use_course_cost() {
        let content = ContentRegistry::load().unwrap();
        let course = content.course("EASY").unwrap().clone();
        let mut round = Round::new(RoundId(0), course, &content.prices());
        round.score = 2800;
        round.remaining_time = 40;
        round.correct_keys = 30;
        let stats = round.stats();
        assert_eq!(stats.profit_or_loss, -200);
        assert_eq!(stats.actual_play_time, 20);
        assert!((stats.avg_keys_per_second - 1.5).abs() < 1e-9);
    }
}
