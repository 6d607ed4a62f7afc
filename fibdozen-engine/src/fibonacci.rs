//! Memoized Fibonacci multipliers for the betting progression.
//!
//! The progression asks for overlapping indices every spin and losing streaks
//! push the index upward one step at a time, so terms are computed
//! iteratively into a growable cache and served from it afterwards.

/// Growable cache of Fibonacci terms using the `F(1) = F(2) = 1` convention.
///
/// Terms that no longer fit in a `u128` saturate at `u128::MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FibonacciTable {
    // terms[i] holds F(i + 1)
    terms: Vec<u128>,
}

impl FibonacciTable {
    /// Create a table holding only the two seed terms.
    #[must_use]
    pub fn new() -> Self {
        Self { terms: vec![1, 1] }
    }

    /// Return `F(n)`, extending the cache on a miss.
    ///
    /// `n = 0` yields 0; the progression never asks for it. Indices past the
    /// first saturated term return `u128::MAX` without growing the cache.
    pub fn get(&mut self, n: u32) -> u128 {
        let Ok(wanted) = usize::try_from(n) else {
            return u128::MAX;
        };
        if wanted == 0 {
            return 0;
        }
        self.extend_to(wanted);
        self.terms.get(wanted - 1).copied().unwrap_or(u128::MAX)
    }

    /// Number of memoized terms.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.terms.len()
    }

    fn extend_to(&mut self, len: usize) {
        if self.terms.len() >= len {
            return;
        }
        while self.terms.len() < len {
            let last = self.terms[self.terms.len() - 1];
            // every later term is saturated too; `get` answers those directly
            if last == u128::MAX {
                break;
            }
            let prev = self.terms[self.terms.len() - 2];
            self.terms.push(last.saturating_add(prev));
        }
    }
}

impl Default for FibonacciTable {
    fn default() -> Self {
        Self::new()
    }
}
