//! Derived generators for numbers, text, dates, collections and weighted choice.
//!
//! Everything here is composed from [`int`] through the combinators in
//! [`crate::generator`]; nothing touches a [`RandomState`] directly except the
//! raw integer source and [`from_distribution`].

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use num_traits::PrimInt;
use rand::distributions::Distribution;

use crate::error::GeneratorError;
use crate::generator::{Generator, map2, pure, sequence};
use crate::rng::{LcgRng, RandomState, next_int};

/// Characters drawn by [`string`]
pub const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Raw values of the random source
pub fn int() -> Generator<i32> {
    Generator::new(next_int)
}

/// Integers in `0..=i32::MAX`; a negative draw `i` becomes `-(i + 1)`
pub fn non_negative_int() -> Generator<i32> {
    int().map(|i| if i < 0 { -(i + 1) } else { i })
}

/// Widths up to this are served by a single draw
const SINGLE_DRAW_WIDTH: u128 = 1 << 31;
/// Bits contributed by each [`non_negative_int`] draw
const DRAW_BITS: u32 = 31;

/// Offsets in `0..width` for any `width >= 1`.
///
/// A single draw covers widths up to 2^31; wider ranges concatenate enough
/// draws to cover every bit of `width - 1` before reducing.
fn offset_below(width: u128) -> Generator<u128> {
    let width = width.max(1);
    if width <= SINGLE_DRAW_WIDTH {
        return non_negative_int().map(move |n| u128::from(n.unsigned_abs()) % width);
    }
    let bits = u128::BITS - (width - 1).leading_zeros();
    let draws = bits.div_ceil(DRAW_BITS) as usize;
    sequence(vec![non_negative_int(); draws]).map(move |parts| {
        let wide = parts.into_iter().fold(0u128, |acc, part| {
            (acc << DRAW_BITS) | u128::from(part.unsigned_abs())
        });
        wide % width
    })
}

/// Integers in `low..high_exclusive`.
///
/// An empty or inverted range always yields `low`.
pub fn choose_int(low: i64, high_exclusive: i64) -> Generator<i64> {
    let width = i128::from(high_exclusive) - i128::from(low);
    let width = u128::try_from(width).unwrap_or(0);
    offset_below(width).map(move |offset| {
        let value = i128::from(low) + offset as i128;
        i64::try_from(value).unwrap_or(low)
    })
}

/// [`choose_int`] for any primitive integer type
pub fn choose_integer<T>(low: T, high_exclusive: T) -> Generator<T>
where
    T: PrimInt + Send + Sync + 'static,
{
    let (Some(lo), Some(hi)) = (low.to_i128(), high_exclusive.to_i128()) else {
        return pure(low);
    };
    let width = hi
        .checked_sub(lo)
        .and_then(|width| u128::try_from(width).ok())
        .unwrap_or(0);
    offset_below(width).map(move |offset| {
        let value = i128::try_from(offset).ok().and_then(|offset| lo.checked_add(offset));
        value.and_then(num_traits::cast::<i128, T>).unwrap_or(low)
    })
}

pub fn boolean() -> Generator<bool> {
    non_negative_int().map(|n| n % 2 == 0)
}

pub fn choose_boolean() -> Generator<bool> {
    boolean()
}

/// Fractions `1 / n` for a non-negative draw `n`; a zero draw stays `0.0`
pub fn float() -> Generator<f64> {
    non_negative_int().map(|n| if n > 0 { 1.0 / f64::from(n) } else { 0.0 })
}

pub fn choose_float() -> Generator<f64> {
    float()
}

pub fn empty_string() -> Generator<String> {
    pure(String::new())
}

/// Strings of `0..=max_codepoints` characters from [`ALPHABET`]
pub fn string(max_codepoints: usize) -> Generator<String> {
    let characters =
        choose_int(0, ALPHABET.len() as i64).map(|i| char::from(ALPHABET[i as usize]));
    let max_length = i64::try_from(max_codepoints).unwrap_or(i64::MAX);
    choose_int(0, max_length.saturating_add(1)).flat_map(move |length| {
        array_of(characters.clone(), length as usize).map(|chars| chars.into_iter().collect())
    })
}

/// Day that [`choose_date`] offsets are measured from
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1999, 12, 31).unwrap_or(NaiveDate::MIN)
}

/// Dates `start..stop_exclusive` days before or after [`reference_date`]
pub fn choose_date(start: i64, stop_exclusive: i64) -> Generator<NaiveDate> {
    map2(choose_int(start, stop_exclusive), boolean(), offset_from_reference)
}

fn offset_from_reference(days: i64, past: bool) -> NaiveDate {
    let reference = reference_date();
    let offset = if past { days.saturating_neg() } else { days };
    let shifted = if offset >= 0 {
        reference.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        reference.checked_sub_days(Days::new(offset.unsigned_abs()))
    };
    shifted.unwrap_or(reference)
}

/// Exactly `length` independent draws of `generator`
pub fn array_of<A: 'static>(generator: Generator<A>, length: usize) -> Generator<Vec<A>> {
    sequence(vec![generator; length])
}

/// Collections whose length is drawn from `min..=max_inclusive`.
///
/// A `max_inclusive` below `min` is raised to `min`.
pub fn choose_array<A: 'static>(
    min: usize,
    max_inclusive: usize,
    generator: Generator<A>,
) -> Generator<Vec<A>> {
    let low = i64::try_from(min).unwrap_or(i64::MAX);
    let high = i64::try_from(max_inclusive.max(min)).unwrap_or(i64::MAX);
    choose_int(low, high.saturating_add(1))
        .flat_map(move |length| array_of(generator.clone(), length as usize))
}

/// [`choose_array`] de-duplicated into a set; the set can end up smaller than
/// `min` when draws collide
pub fn choose_set<A: Ord + 'static>(
    min: usize,
    max_inclusive: usize,
    generator: Generator<A>,
) -> Generator<BTreeSet<A>> {
    choose_array(min, max_inclusive, generator).map(|values| values.into_iter().collect())
}

/// A generator together with its relative selection weight
#[derive(Debug, Clone)]
pub struct WeightedGenerator<A> {
    pub generator: Generator<A>,
    pub weight: i64,
}

impl<A> WeightedGenerator<A> {
    pub fn new(generator: Generator<A>, weight: i64) -> Self {
        Self { generator, weight }
    }
}

/// Pick one candidate per draw, with probability proportional to its weight.
///
/// Candidates with a weight of zero or less are never picked. A list with no
/// positive weight is rejected.
pub fn weighted<A: 'static>(
    candidates: Vec<WeightedGenerator<A>>,
) -> Result<Generator<A>, GeneratorError> {
    let count = candidates.len();
    let mut total: u128 = 0;
    let mut table = Vec::with_capacity(count);
    for candidate in candidates.into_iter().filter(|c| c.weight > 0) {
        total += u128::from(candidate.weight.unsigned_abs());
        table.push((total, candidate.generator));
    }
    if table.is_empty() {
        return Err(GeneratorError::EmptyDistribution { candidates: count });
    }

    Ok(offset_below(total).flat_map(move |slot| {
        let index = table.partition_point(|(bound, _)| *bound <= slot);
        table[index.min(table.len() - 1)].1.clone()
    }))
}

/// Draw from a `rand` distribution using the deterministic source
pub fn from_distribution<T, D>(distribution: D) -> Generator<T>
where
    T: 'static,
    D: Distribution<T> + Send + Sync + 'static,
{
    Generator::new(move |state: RandomState| {
        let mut rng = LcgRng::from_state(state);
        let value = distribution.sample(&mut rng);
        (value, rng.state())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::distributions::Uniform;

    fn samples<A: 'static>(generator: &Generator<A>, n: usize, seed: i64) -> Vec<A> {
        generator.sample_n(n, RandomState::new(seed)).0
    }

    #[test]
    fn test_non_negative_int() {
        assert!(samples(&non_negative_int(), 1000, 4).iter().all(|n| *n >= 0));
    }

    #[test]
    fn test_choose_int_range() {
        let values = samples(&choose_int(12, 130_100), 1000, 21);
        assert!(values.iter().all(|v| (12..130_100).contains(v)));

        let negative = samples(&choose_int(-50, -40), 500, 22);
        assert!(negative.iter().all(|v| (-50..-40).contains(v)));
    }

    #[test]
    fn test_choose_int_degenerate_range() {
        assert!(samples(&choose_int(10, 10), 50, 1).iter().all(|v| *v == 10));
        assert!(samples(&choose_int(10, 3), 50, 1).iter().all(|v| *v == 10));
    }

    #[test]
    fn test_choose_int_extreme_bounds() {
        let values = samples(&choose_int(i64::MIN, i64::MAX), 200, 6);
        assert!(values.iter().all(|v| *v < i64::MAX));
    }

    #[test]
    fn test_choose_int_reaches_upper_half_of_wide_range() {
        let values = samples(&choose_int(0, 1 << 40), 10_000, 26);
        assert!(values.iter().all(|v| (0..1 << 40).contains(v)));
        let upper = values.iter().filter(|v| **v >= 1 << 39).count();
        assert!((4000..6000).contains(&upper), "upper half hits {}", upper);

        let full = samples(&choose_int(i64::MIN, i64::MAX), 1000, 27);
        assert!(full.iter().any(|v| *v > 0));
        assert!(full.iter().any(|v| *v < 0));
    }

    #[test]
    fn test_narrow_ranges_use_one_draw() {
        let state = RandomState::new(28);
        let (_, end) = choose_int(0, 1 << 31).sample(state);
        assert_eq!(end, state.next().1);
        let (_, end) = choose_int(0, (1 << 31) + 1).sample(state);
        assert_eq!(end, state.next().1.next().1);
    }

    #[test]
    fn test_choose_integer_generic() {
        let bytes = samples(&choose_integer(3u8, 9u8), 300, 7);
        assert!(bytes.iter().all(|b| (3..9).contains(b)));

        let wide = samples(&choose_integer(-5i16, 5i16), 300, 8);
        assert!(wide.iter().all(|w| (-5..5).contains(w)));

        assert!(samples(&choose_integer(4u32, 1u32), 10, 9).iter().all(|v| *v == 4));

        let huge = samples(&choose_integer(0u64, u64::MAX), 1000, 29);
        assert!(huge.iter().any(|v| *v > u64::MAX / 2));
        assert!(huge.iter().any(|v| *v < u64::MAX / 2));
    }

    #[test]
    fn test_boolean_produces_both() {
        let values = samples(&choose_boolean(), 100, 10);
        assert!(values.contains(&true));
        assert!(values.contains(&false));
    }

    #[test]
    fn test_float_is_fractional() {
        let values = samples(&choose_float(), 200, 11);
        assert!(values.iter().all(|f| (0.0..=1.0).contains(f)));
        assert!(values.iter().any(|f| f.fract() > 0.0));
    }

    #[test]
    fn test_empty_string() {
        let state = RandomState::new(0);
        assert_eq!(empty_string().sample(state), (String::new(), state));
    }

    #[test]
    fn test_string_alphabet_and_length() {
        let values = samples(&string(20), 500, 12);
        assert!(values.iter().all(|s| s.chars().count() <= 20));
        assert!(values.iter().all(|s| s.bytes().all(|b| ALPHABET.contains(&b))));
        assert!(values.iter().any(|s| s.is_empty()));
        assert!(values.iter().any(|s| s.chars().count() == 20));
    }

    #[test]
    fn test_string_zero_max_is_empty() {
        assert!(samples(&string(0), 20, 13).iter().all(String::is_empty));
    }

    #[test]
    fn test_choose_date_range() {
        let reference = reference_date();
        let values = samples(&choose_date(0, 100), 300, 14);
        for date in &values {
            let distance = (*date - reference).num_days().abs();
            assert!(distance < 100, "{} is {} days away", date, distance);
        }
        assert!(values.iter().any(|d| *d < reference));
        assert!(values.iter().any(|d| *d > reference));
    }

    #[test]
    fn test_choose_date_out_of_calendar() {
        let reference = reference_date();
        let values = samples(&choose_date(i64::MAX - 1, i64::MAX), 10, 15);
        assert!(values.iter().all(|d| *d == reference));
    }

    #[test]
    fn test_array_of_lengths() {
        let state = RandomState::new(16);
        assert_eq!(array_of(int(), 0).sample(state), (Vec::new(), state));
        assert_eq!(array_of(int(), 50).sample(state).0.len(), 50);
    }

    #[test]
    fn test_choose_array_bounds() {
        let lengths: Vec<_> = samples(&choose_array(2, 6, int()), 500, 17)
            .iter()
            .map(Vec::len)
            .collect();
        assert!(lengths.iter().all(|n| (2..=6).contains(n)));
        assert!(lengths.contains(&2));
        assert!(lengths.contains(&6));

        assert!(samples(&choose_array(0, 0, int()), 50, 18).iter().all(Vec::is_empty));
        assert!(samples(&choose_array(4, 1, int()), 50, 19).iter().all(|v| v.len() == 4));
    }

    #[test]
    fn test_choose_set_deduplicates() {
        let sets = samples(&choose_set(0, 30, choose_int(0, 5)), 200, 20);
        assert!(sets.iter().all(|s| s.len() <= 5));
        assert!(sets.iter().any(|s| s.len() == 5));
    }

    #[test]
    fn test_weighted_skew() {
        let generator = weighted(vec![
            WeightedGenerator::new(choose_int(0, 10), 90),
            WeightedGenerator::new(choose_int(100, 110), 10),
        ])
        .expect("distribution has positive weights");

        let values = samples(&generator, 10_000, 23);
        let low = values.iter().filter(|v| **v < 10).count();
        let high = values.iter().filter(|v| **v >= 100).count();
        assert_eq!(low + high, values.len());
        assert!(low > high * 5, "low={} high={}", low, high);
        assert!(high > 0);
    }

    #[test]
    fn test_weighted_with_totals_beyond_single_draw() {
        let generator = weighted(vec![
            WeightedGenerator::new(pure("first"), 3_000_000_000),
            WeightedGenerator::new(pure("second"), 3_000_000_000),
        ])
        .expect("distribution has positive weights");

        let values = samples(&generator, 10_000, 1);
        let second = values.iter().filter(|v| **v == "second").count();
        assert!((4000..6000).contains(&second), "second picked {}", second);

        let extreme = weighted(vec![
            WeightedGenerator::new(pure(0), i64::MAX),
            WeightedGenerator::new(pure(1), i64::MAX),
        ])
        .expect("distribution has positive weights");
        assert!(samples(&extreme, 2000, 2).contains(&1));
    }

    #[test]
    fn test_weighted_ignores_non_positive_weights() {
        let generator = weighted(vec![
            WeightedGenerator::new(pure("never"), 0),
            WeightedGenerator::new(pure("always"), 3),
            WeightedGenerator::new(pure("negative"), -4),
        ])
        .expect("one positive weight");
        assert!(samples(&generator, 200, 24).iter().all(|v| *v == "always"));
    }

    #[test]
    fn test_weighted_rejects_empty_distribution() {
        let result = weighted(vec![WeightedGenerator::new(int(), 0)]);
        assert_eq!(
            result.err(),
            Some(GeneratorError::EmptyDistribution { candidates: 1 })
        );
        assert!(weighted(Vec::<WeightedGenerator<i32>>::new()).is_err());
    }

    #[test]
    fn test_from_distribution() {
        let generator = from_distribution(Uniform::new(10u32, 20u32));
        let state = RandomState::new(25);
        let (values, end) = generator.sample_n(100, state);
        assert!(values.iter().all(|v| (10..20).contains(v)));
        assert_ne!(end, state);
        assert_eq!(generator.sample_n(100, state).0, values);
    }
}
