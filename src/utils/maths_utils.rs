use crate::config::HTF;

/// Convert a price to its canonical integer key (fixed 1e-8 precision).
///
/// Two prices that print identically to eight decimals map to the same key,
/// so grid prices produced with different tick sizes merge cleanly.
#[inline]
pub fn price_to_key(price: f64) -> i64 {
    (price * HTF.price_key_scale).round() as i64
}

/// Convert a canonical key back to a price.
#[inline]
pub fn key_to_price(key: i64) -> f64 {
    key as f64 / HTF.price_key_scale
}

/// Snap a price onto the canonical key grid.
#[inline]
pub fn canonical_price(price: f64) -> f64 {
    key_to_price(price_to_key(price))
}

/// Index of the first maximum element, or `None` for an empty input.
///
/// Ties resolve to the earliest position, which for price-ascending
/// sequences means the lowest price.
pub fn first_max_index<T, I>(values: I) -> Option<usize>
where
    T: PartialOrd,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<(usize, T)> = None;
    for (idx, value) in values.into_iter().enumerate() {
        let replace = match &best {
            Some((_, current)) => value > *current,
            None => true,
        };
        if replace {
            best = Some((idx, value));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Normalizes a vector using the L1 norm (Manhattan norm),
/// so that the sum of the absolute values of its components is 1.0.
pub fn normalize_manhattan(vec: &[f64]) -> Vec<f64> {
    let sum_of_absolute_values: f64 = vec.iter().map(|x| x.abs()).sum();

    // All-zero input: nothing to scale, hand back the zeros.
    if sum_of_absolute_values == 0.0 {
        return vec.to_vec();
    }

    vec.iter().map(|&x| x / sum_of_absolute_values).collect()
}
