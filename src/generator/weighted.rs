use rand::Rng;

/// Cumulative-probability draw over ordered `(value, weight)` outcomes.
///
/// Walks the outcomes summing weights and returns the first whose running
/// total reaches `r`. If rounding leaves `r` above the final total the first
/// outcome is returned. `None` only for an empty slice.
pub fn weighted_pick<T>(outcomes: &[(T, f64)], r: f64) -> Option<&T> {
    let mut cumulative = 0.0;
    for (value, weight) in outcomes {
        cumulative += weight;
        if r <= cumulative {
            return Some(value);
        }
    }
    outcomes.first().map(|(value, _)| value)
}

/// [`weighted_pick`] with `r` drawn uniformly from `[0, 1)`.
pub fn pick_with<'a, T, R: Rng + ?Sized>(outcomes: &'a [(T, f64)], rng: &mut R) -> Option<&'a T> {
    let r: f64 = rng.r#gen();
    weighted_pick(outcomes, r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn boundaries_are_inclusive() {
        let outcomes = [('a', 0.2), ('b', 0.8)];
        assert_eq!(weighted_pick(&outcomes, 0.0), Some(&'a'));
        assert_eq!(weighted_pick(&outcomes, 0.2), Some(&'a'));
        assert_eq!(weighted_pick(&outcomes, 0.2000001), Some(&'b'));
        assert_eq!(weighted_pick(&outcomes, 0.999), Some(&'b'));
    }

    #[test]
    fn unmatched_draw_falls_back_to_first() {
        // Weights that sum just short of one.
        let outcomes = [('a', 0.3), ('b', 0.6999999)];
        assert_eq!(weighted_pick(&outcomes, 0.99999999), Some(&'a'));
    }

    #[test]
    fn empty_outcomes_pick_nothing() {
        let outcomes: [(char, f64); 0] = [];
        assert_eq!(weighted_pick(&outcomes, 0.5), None);
    }

    #[test]
    fn zero_weight_outcome_is_never_drawn() {
        let outcomes = [('a', 0.0), ('b', 1.0)];
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..500 {
            assert_eq!(pick_with(&outcomes, &mut rng), Some(&'b'));
        }
    }

    #[test]
    fn seeded_draws_follow_the_mix() {
        let outcomes = [("short", 0.2), ("medium", 0.8)];
        let mut rng = SmallRng::seed_from_u64(42);
        let draws = 5000;
        let short = (0..draws)
            .filter(|_| pick_with(&outcomes, &mut rng) == Some(&"short"))
            .count();
        let ratio = short as f64 / draws as f64;
        assert!((0.15..0.25).contains(&ratio), "short ratio {ratio}");
    }
}
