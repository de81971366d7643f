//! Exact binomial coefficients and Pascal's triangle.
//!
//! Row `i` of the triangle has `i + 1` entries, starts and ends with `1`, and every inner entry is
//! the sum of the two entries above it. Rows are built one at a time from the previous row and
//! memoized in a process-wide [`TriangleCache`], so growing a triangle by one row only computes
//! that row.

use crate::{error::DomainError, primitive::int};
use log::debug;
use once_cell::sync::Lazy;
use rug::Integer;
use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// One row of Pascal's triangle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PascalRow {
    entries: Vec<Integer>,
}

impl PascalRow {
    /// Row zero, `[1]`.
    pub fn first() -> Self {
        Self { entries: vec![int(1)] }
    }

    /// Builds the row after this one.
    pub fn next(&self) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(int(1));
        entries.extend(self.entries.windows(2).map(|pair| int(&pair[0] + &pair[1])));
        entries.push(int(1));
        Self { entries }
    }

    /// The index of this row, which is also `n` in `C(n, k)` for its entries.
    pub fn index(&self) -> usize {
        self.entries.len() - 1
    }

    /// The entries of this row, `C(n, 0)` through `C(n, n)`.
    pub fn entries(&self) -> &[Integer] {
        &self.entries
    }

    /// The entry at column `k`, if there is one.
    pub fn get(&self, k: usize) -> Option<&Integer> {
        self.entries.get(k)
    }

    /// The sum of the entries, which is always `2^index`.
    pub fn sum(&self) -> Integer {
        self.entries.iter().sum()
    }
}

impl fmt::Display for PascalRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.entries.iter();
        if let Some(entry) = iter.next() {
            write!(f, "{}", entry)?;
            for entry in iter {
                write!(f, " {}", entry)?;
            }
        }
        Ok(())
    }
}

/// An endless iterator over the rows of Pascal's triangle, starting from row zero.
#[derive(Debug, Clone)]
pub struct PascalRows {
    next: PascalRow,
}

impl Default for PascalRows {
    fn default() -> Self {
        Self { next: PascalRow::first() }
    }
}

impl Iterator for PascalRows {
    type Item = PascalRow;

    fn next(&mut self) -> Option<Self::Item> {
        let following = self.next.next();
        Some(std::mem::replace(&mut self.next, following))
    }
}

/// The first rows of Pascal's triangle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PascalTriangle {
    rows: Vec<Arc<PascalRow>>,
}

impl PascalTriangle {
    /// The number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; a triangle has at least one row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row at the given index.
    pub fn row(&self, index: usize) -> Option<&PascalRow> {
        self.rows.get(index).map(|row| &**row)
    }

    /// The rows of the triangle, from row zero.
    pub fn rows(&self) -> impl Iterator<Item = &PascalRow> {
        self.rows.iter().map(|row| &**row)
    }

    /// The entries of the triangle as nested lists.
    pub fn to_nested(&self) -> Vec<Vec<Integer>> {
        self.rows().map(|row| row.entries().to_vec()).collect()
    }
}

/// Writes one row per line, centered on the widest (last) row.
impl fmt::Display for PascalTriangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self.rows().map(ToString::to_string).collect::<Vec<_>>();
        let width = lines.last().map_or(0, String::len);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let padding = (width - line.len()) / 2;
            write!(f, "{:padding$}{}", "", line, padding = padding)?;
        }
        Ok(())
    }
}

/// Memoized rows of Pascal's triangle, shared between callers.
#[derive(Debug, Default)]
pub struct TriangleCache {
    rows: Mutex<Vec<Arc<PascalRow>>>,
}

impl TriangleCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of rows currently memoized.
    pub fn cached_rows(&self) -> usize {
        self.lock().len()
    }

    /// Returns the first `rows` rows, computing only the ones not already memoized.
    pub fn triangle(&self, rows: usize) -> PascalTriangle {
        let mut cached = self.lock();

        if cached.len() < rows {
            debug!("growing Pascal triangle cache from {} to {} rows", cached.len(), rows);
            while cached.len() < rows {
                let row = match cached.last() {
                    Some(last) => last.next(),
                    None => PascalRow::first(),
                };
                cached.push(Arc::new(row));
            }
        }

        PascalTriangle { rows: cached[..rows].to_vec() }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<PascalRow>>> {
        // a poisoned lock still only holds complete rows
        self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// The cache used by [`build_triangle`].
static TRIANGLE_CACHE: Lazy<TriangleCache> = Lazy::new(TriangleCache::new);

/// Builds the first `rows` rows of Pascal's triangle.
///
/// Fails if `rows` is less than one.
pub fn build_triangle(rows: i64) -> Result<PascalTriangle, DomainError> {
    if rows < 1 {
        return Err(DomainError::new("rows", rows, "must be at least 1"));
    }
    let rows = usize::try_from(rows)
        .map_err(|_| DomainError::new("rows", rows, "is too large"))?;

    Ok(TRIANGLE_CACHE.triangle(rows))
}

/// Computes the binomial coefficient `C(n, k)`, the number of ways to choose `k` items from `n`.
///
/// Fails if `n` or `k` is negative, or if `k > n`.
///
/// ```
/// use binom_compute::{pascal::choose, primitive::int};
///
/// assert_eq!(choose(5, 3).unwrap(), int(10));
/// assert!(choose(5, 6).is_err());
/// ```
pub fn choose(n: i64, k: i64) -> Result<Integer, DomainError> {
    if n < 0 {
        return Err(DomainError::new("n", n, "must not be negative"));
    }
    if k < 0 || k > n {
        return Err(DomainError::new("k", k, format!("must be between 0 and n = {}", n)));
    }

    // C(n, k) = C(n, n - k); the smaller one needs fewer steps
    let k = k.min(n - k);
    let mut result = int(1);
    for i in 1..=k {
        result *= n - i + 1;
        let (quotient, remainder) = result.div_rem(int(i));
        assert_eq!(remainder, 0, "C({}, {}) is not an integer", n, i);
        result = quotient;
    }
    Ok(result)
}

/// Streams the coefficients `C(n, 0)`, `C(n, 1)`, ..., `C(n, n)`.
pub fn binomial_coefficients(n: u32) -> BinomialCoefficients {
    BinomialCoefficients {
        n,
        k: 0,
        current: int(1),
    }
}

/// The iterator returned by [`binomial_coefficients`].
#[derive(Debug, Clone)]
pub struct BinomialCoefficients {
    n: u32,
    k: u32,
    current: Integer,
}

impl Iterator for BinomialCoefficients {
    type Item = Integer;

    fn next(&mut self) -> Option<Self::Item> {
        if self.k > self.n {
            return None;
        }

        let value = self.current.clone();
        self.k += 1;
        if self.k <= self.n {
            // C(n, k) = C(n, k - 1) * (n - k + 1) / k
            self.current *= self.n - self.k + 1;
            let (quotient, remainder) = std::mem::take(&mut self.current).div_rem(int(self.k));
            assert_eq!(remainder, 0, "C({}, {}) is not an integer", self.n, self.k);
            self.current = quotient;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn small_coefficients() {
        assert_eq!(choose(5, 3).unwrap(), 10);
        assert_eq!(choose(0, 0).unwrap(), 1);
        assert_eq!(choose(10, 0).unwrap(), 1);
        assert_eq!(choose(10, 10).unwrap(), 1);
        assert_eq!(choose(52, 5).unwrap(), 2598960);
    }

    #[test]
    fn large_coefficient_is_exact() {
        let expected = Integer::from_str_radix("100891344545564193334812497256", 10).unwrap();
        assert_eq!(choose(100, 50).unwrap(), expected);
    }

    #[test]
    fn recurrence_matches_factorials() {
        for n in 0..60u32 {
            for k in 0..=n {
                let expected = Integer::from(Integer::factorial(n))
                    / Integer::from(Integer::factorial(k))
                    / Integer::from(Integer::factorial(n - k));
                assert_eq!(choose(i64::from(n), i64::from(k)).unwrap(), expected);
            }
        }
    }

    #[test]
    fn out_of_range_arguments() {
        let err = choose(5, -1).unwrap_err();
        assert_eq!(err.argument, "k");
        assert_eq!(err.value, "-1");

        let err = choose(-1, 0).unwrap_err();
        assert_eq!(err.argument, "n");

        assert!(choose(3, 4).is_err());
    }

    #[test]
    fn streamed_row_matches_choose() {
        let row = binomial_coefficients(6).collect::<Vec<_>>();
        assert_eq!(row, vec![1, 6, 15, 20, 15, 6, 1]);
        for (k, value) in row.iter().enumerate() {
            assert_eq!(*value, choose(6, k as i64).unwrap());
        }
        assert_eq!(binomial_coefficients(0).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn triangle_rows() {
        let triangle = build_triangle(5).unwrap();
        assert_eq!(triangle.len(), 5);
        assert_eq!(triangle.to_nested(), vec![
            vec![int(1)],
            vec![int(1), int(1)],
            vec![int(1), int(2), int(1)],
            vec![int(1), int(3), int(3), int(1)],
            vec![int(1), int(4), int(6), int(4), int(1)],
        ]);
        assert_eq!(triangle.row(4).map(PascalRow::index), Some(4));
    }

    #[test]
    fn triangle_needs_a_row() {
        assert!(build_triangle(0).is_err());
        assert!(build_triangle(-3).is_err());
    }

    #[test]
    fn cache_only_grows() {
        let cache = TriangleCache::new();
        assert_eq!(cache.triangle(4).len(), 4);
        assert_eq!(cache.cached_rows(), 4);

        // a smaller request is served from the cache
        assert_eq!(cache.triangle(3).len(), 3);
        assert_eq!(cache.cached_rows(), 4);

        assert_eq!(cache.triangle(5).row(4), Some(&PascalRow::first().next().next().next().next()));
        assert_eq!(cache.cached_rows(), 5);
    }

    #[test]
    fn cache_shared_between_threads() {
        let cache = TriangleCache::new();
        std::thread::scope(|scope| {
            let handles = (1..=8)
                .map(|i| {
                    let cache = &cache;
                    scope.spawn(move || cache.triangle(i * 3))
                })
                .collect::<Vec<_>>();
            for (i, handle) in (1..=8).zip(handles) {
                let triangle = handle.join().unwrap();
                assert_eq!(triangle.len(), i * 3);
                let last = triangle.row(i * 3 - 1).unwrap();
                assert_eq!(last.sum(), Integer::from(1) << (i * 3 - 1) as u32);
            }
        });
        assert_eq!(cache.cached_rows(), 24);

        let handles = (1..=4i64)
            .map(|rows| std::thread::spawn(move || build_triangle(rows * 5).unwrap()))
            .collect::<Vec<_>>();
        for (rows, handle) in (1..=4usize).zip(handles) {
            assert_eq!(handle.join().unwrap().len(), rows * 5);
        }
    }

    #[test]
    fn rows_iterator() {
        let rows = PascalRows::default().take(4).map(|row| row.to_string()).collect::<Vec<_>>();
        assert_eq!(rows, vec!["1", "1 1", "1 2 1", "1 3 3 1"]);
    }

    #[test]
    fn centered_display() {
        let triangle = build_triangle(3).unwrap();
        assert_eq!(triangle.to_string(), "  1\n 1 1\n1 2 1");
    }
}
