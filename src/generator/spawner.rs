use std::fmt;
use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::content::{ContentRegistry, Course};
use crate::generator::weighted::pick_with;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A plate on the conveyor carrying one target word.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub word: String,
    pub price: u32,
    /// Seconds the plate takes to cross the belt.
    pub travel_secs: f64,
    pub emoji: String,
    /// Game-clock instant the plate appeared.
    pub spawned_at: Duration,
}

impl Item {
    pub fn travel(&self) -> Duration {
        Duration::from_secs_f64(self.travel_secs.max(0.0))
    }

    /// Fraction of the belt covered at game-clock `now`, clamped to `[0, 1]`.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.travel_secs <= 0.0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.spawned_at).as_secs_f64();
        (elapsed / self.travel_secs).clamp(0.0, 1.0)
    }
}

/// Draws items for a course. Ids are sequential until the next `reset`.
#[derive(Clone, Debug, Default)]
pub struct ItemSpawner {
    next_id: u64,
}

impl ItemSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.next_id = 0;
    }

    /// Returns `None` only when the course references an empty word or price
    /// pool, which `ContentRegistry::validate_course` rules out.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        course: &Course,
        content: &ContentRegistry,
        rng: &mut R,
        now: Duration,
    ) -> Option<Item> {
        let outcomes = course.length_outcomes();
        let class = *pick_with(&outcomes, rng)?;
        let word = content.words().pool(class).choose(rng)?.clone();
        let price = *course.price_mix.choose(rng)?;
        let emoji = content.emojis().choose(rng).cloned().unwrap_or_default();
        let travel_secs = course.speed_base + rng.r#gen::<f64>() * course.speed_variance;

        let id = ItemId(self.next_id);
        self.next_id += 1;

        Some(Item {
            id,
            word,
            price,
            travel_secs,
            emoji,
            spawned_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn ids_are_sequential_and_reset() {
        let content = ContentRegistry::load().unwrap();
        let course = content.course("EASY").unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut spawner = ItemSpawner::new();

        let ids: Vec<u64> = (0..5)
            .map(|_| spawner.spawn(course, &content, &mut rng, Duration::ZERO).unwrap().id.0)
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);

        spawner.reset();
        let first = spawner.spawn(course, &content, &mut rng, Duration::ZERO).unwrap();
        assert_eq!(first.id, ItemId(0));
    }

    #[test]
    fn draws_stay_inside_course_mix() {
        let content = ContentRegistry::load().unwrap();
        let mut rng = SmallRng::seed_from_u64(99);
        let mut spawner = ItemSpawner::new();

        for course in content.courses() {
            let allowed: Vec<&String> = course
                .classes()
                .flat_map(|c| content.words().pool(c))
                .collect();
            for _ in 0..200 {
                let item = spawner.spawn(course, &content, &mut rng, Duration::ZERO).unwrap();
                assert!(course.price_mix.contains(&item.price));
                assert!(allowed.contains(&&item.word), "{} not in {}", item.word, course.id);
                assert!(item.travel_secs >= course.speed_base);
                assert!(item.travel_secs < course.speed_base + course.speed_variance);
                assert!(content.emojis().contains(&item.emoji));
            }
        }
    }

    #[test]
    fn empty_price_mix_spawns_nothing() {
        let content = ContentRegistry::load().unwrap();
        let mut course = content.course("EASY").unwrap().clone();
        course.price_mix.clear();
        let mut rng = SmallRng::seed_from_u64(3);
        assert!(ItemSpawner::new()
            .spawn(&course, &content, &mut rng, Duration::ZERO)
            .is_none());
    }

    #[test]
    fn progress_tracks_travel_time() {
        let item = Item {
            id: ItemId(0),
            word: "학교".to_string(),
            price: 1000,
            travel_secs: 10.0,
            emoji: "🍣".to_string(),
            spawned_at: Duration::from_secs(5),
        };
        assert_eq!(item.progress(Duration::from_secs(5)), 0.0);
        assert!((item.progress(Duration::from_secs(10)) - 0.5).abs() < 1e-9);
        assert_eq!(item.progress(Duration::from_secs(60)), 1.0);
        assert_eq!(item.progress(Duration::ZERO), 0.0);
    }
}
