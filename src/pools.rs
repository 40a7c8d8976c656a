//! Random value helpers shared by the templates.

use std::ops::RangeInclusive;

use chrono::{Duration, NaiveDateTime};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::money::round2;

/// Uniform choice from a non-empty pool.
///
/// # Panics
///
/// Panics when `pool` is empty. Pools are compile-time constants in this crate.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, pool: &'a [T]) -> &'a T {
    &pool[rng.gen_range(0..pool.len())]
}

/// Uniform amount in `lo..=hi`, rounded to cents.
pub fn money_between<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    round2(rng.gen_range(lo..=hi))
}

/// `count` random decimal digits.
pub fn digits<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// A moment between `days.start()` and `days.end()` whole days before `now`.
pub fn days_before<R: Rng + ?Sized>(
    now: NaiveDateTime,
    rng: &mut R,
    days: RangeInclusive<i64>,
) -> NaiveDateTime {
    now - Duration::days(rng.gen_range(days))
}

/// A moment between `days.start()` and `days.end()` whole days after `now`.
pub fn days_after<R: Rng + ?Sized>(
    now: NaiveDateTime,
    rng: &mut R,
    days: RangeInclusive<i64>,
) -> NaiveDateTime {
    now + Duration::days(rng.gen_range(days))
}

/// Bernoulli trial with success probability `probability`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen_bool(probability.clamp(0.0, 1.0))
}

/// Picks `count` distinct entries of `pool`, keeping at most `pool.len()`.
pub fn sample<'a, T, R: Rng + ?Sized>(rng: &mut R, pool: &'a [T], count: usize) -> Vec<&'a T> {
    pool.choose_multiple(rng, count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 26)
            .and_then(|date| date.and_hms_opt(10, 30, 0))
            .expect("valid clock")
    }

    #[test]
    fn picks_from_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = ["a", "b", "c"];
        for _ in 0..20 {
            assert!(pool.contains(pick(&mut rng, &pool)));
        }
    }

    #[test]
    fn money_is_rounded_and_bounded() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let value = money_between(&mut rng, 10.0, 500.0);
            assert!((10.0..=500.0).contains(&value));
            assert_eq!(value, round2(value));
        }
    }

    #[test]
    fn digits_have_requested_length() {
        let mut rng = StdRng::seed_from_u64(3);
        let value = digits(&mut rng, 17);
        assert_eq!(value.len(), 17);
        assert!(value.chars().all(|ch| ch.is_ascii_digit()));
    }

    #[test]
    fn relative_days_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let before = days_before(clock(), &mut rng, 1..=30);
            let after = days_after(clock(), &mut rng, 3..=7);
            let back = (clock() - before).num_days();
            let ahead = (after - clock()).num_days();
            assert!((1..=30).contains(&back));
            assert!((3..=7).contains(&ahead));
        }
    }

    #[test]
    fn sample_is_distinct() {
        let mut rng = StdRng::seed_from_u64(9);
        let pool = [1, 2, 3, 4, 5];
        let chosen = sample(&mut rng, &pool, 3);
        assert_eq!(chosen.len(), 3);
        let mut sorted: Vec<_> = chosen.iter().map(|value| **value).collect();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
        assert_eq!(sample(&mut rng, &pool, 10).len(), 5);
    }

    #[test]
    fn chance_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(chance(&mut rng, 1.0));
        assert!(!chance(&mut rng, 0.0));
    }
}
