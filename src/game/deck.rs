use rand::Rng;
use thiserror::Error;

/// The fixed pool of candidate symbols. Each game samples a subset of these;
/// not every symbol necessarily appears on a given board.
pub const SYMBOL_POOL: [&str; 10] = ["🥔", "🍒", "🥑", "🌽", "🥕", "🍇", "🍉", "🍌", "🥭", "🍍"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("board dimension must be at least 2, got {0}")]
    TooSmall(u32),
    #[error("board dimension must be an even number, got {0}")]
    OddDimension(u32),
    #[error(
        "a {dimension}x{dimension} board needs {needed} symbol pairs but only {available} symbols exist"
    )]
    PoolExhausted {
        dimension: u32,
        needed: usize,
        available: usize,
    },
}

/// Checks that `dimension` can produce a fully paired board.
pub fn validate_dimension(dimension: u32) -> Result<(), DeckError> {
    if dimension < 2 {
        return Err(DeckError::TooSmall(dimension));
    }
    if dimension % 2 != 0 {
        return Err(DeckError::OddDimension(dimension));
    }
    let needed = (dimension * dimension / 2) as usize;
    if needed > SYMBOL_POOL.len() {
        return Err(DeckError::PoolExhausted {
            dimension,
            needed,
            available: SYMBOL_POOL.len(),
        });
    }
    Ok(())
}

/// Returns a uniformly random permutation of `items`, leaving the input
/// untouched. Fisher–Yates over a copy.
pub fn shuffled<T: Clone>(items: &[T], rng: &mut impl Rng) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Draws `count` distinct elements from `source` without replacement.
/// The emission order carries no guarantee. `count` must not exceed
/// `source.len()`; `deal` is the only production caller and checks the
/// pool bound first.
pub fn sample<T: Clone>(source: &[T], count: usize, rng: &mut impl Rng) -> Vec<T> {
    let mut working = source.to_vec();
    let mut picks = Vec::with_capacity(count);
    for _ in 0..count {
        let index = rng.random_range(0..working.len());
        picks.push(working.swap_remove(index));
    }
    picks
}

/// Deals the placement sequence for a `dimension` x `dimension` board:
/// `dimension²/2` sampled symbols, each duplicated, shuffled into final
/// position order.
pub fn deal(dimension: u32, rng: &mut impl Rng) -> Result<Vec<String>, DeckError> {
    validate_dimension(dimension)?;

    let pairs = (dimension * dimension / 2) as usize;
    let picks = sample(&SYMBOL_POOL, pairs, rng);

    let mut doubled = Vec::with_capacity(pairs * 2);
    for symbol in picks {
        doubled.push(symbol.to_string());
        doubled.push(symbol.to_string());
    }
    Ok(shuffled(&doubled, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn counts(items: &[String]) -> HashMap<&str, usize> {
        let mut map = HashMap::new();
        for item in items {
            *map.entry(item.as_str()).or_insert(0) += 1;
        }
        map
    }

    #[test]
    fn shuffled_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let input: Vec<u32> = (0..20).collect();
        let output = shuffled(&input, &mut rng);

        assert_eq!(output.len(), input.len());
        let mut sorted = output.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, input);
        // Input stays in its original order.
        assert_eq!(input, (0..20).collect::<Vec<u32>>());
    }

    #[test]
    fn shuffled_handles_empty_and_singleton() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(shuffled::<u32>(&[], &mut rng).is_empty());
        assert_eq!(shuffled(&[42], &mut rng), vec![42]);
    }

    #[test]
    fn sample_draws_distinct_elements_without_mutating_source() {
        let mut rng = StdRng::seed_from_u64(11);
        let source: Vec<u32> = (0..10).collect();
        let picks = sample(&source, 6, &mut rng);

        assert_eq!(picks.len(), 6);
        let mut deduped = picks.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), 6);
        assert!(picks.iter().all(|value| source.contains(value)));
        assert_eq!(source, (0..10).collect::<Vec<u32>>());
    }

    #[test]
    fn sample_can_drain_the_whole_source() {
        let mut rng = StdRng::seed_from_u64(3);
        let source = vec!["a", "b", "c"];
        let mut picks = sample(&source, 3, &mut rng);
        picks.sort_unstable();
        assert_eq!(picks, vec!["a", "b", "c"]);
    }

    #[test]
    fn deal_produces_paired_cards() {
        let mut rng = StdRng::seed_from_u64(19);
        let cards = deal(4, &mut rng).unwrap();

        assert_eq!(cards.len(), 16);
        let by_symbol = counts(&cards);
        assert_eq!(by_symbol.len(), 8);
        assert!(by_symbol.values().all(|&count| count == 2));
        assert!(
            by_symbol
                .keys()
                .all(|symbol| SYMBOL_POOL.contains(symbol))
        );
    }

    #[test]
    fn deal_smallest_board() {
        let mut rng = StdRng::seed_from_u64(23);
        let cards = deal(2, &mut rng).unwrap();
        assert_eq!(cards.len(), 4);
        assert_eq!(counts(&cards).len(), 2);
    }

    #[test]
    fn deal_rejects_dimension_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(deal(0, &mut rng), Err(DeckError::TooSmall(0)));
    }

    #[test]
    fn deal_rejects_odd_dimension() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(deal(5, &mut rng), Err(DeckError::OddDimension(5)));
    }

    #[test]
    fn deal_rejects_dimension_beyond_the_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            deal(6, &mut rng),
            Err(DeckError::PoolExhausted {
                dimension: 6,
                needed: 18,
                available: 10,
            })
        );
    }
}
