// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Binomial coefficients and lexicographic enumeration of combinations and
//! permutations.

/// Binomial coefficient C(n, k); zero when `k > n`.
pub fn ncombs(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        result = result * (n - i) as u64 / (i + 1) as u64;
    }
    result
}

/// Advance `comb` (a strictly increasing k-subset of `0..n`) to the next
/// combination in lexicographic order.
///
/// Returns false, leaving `comb` unspecified, when `comb` was the last one.
pub fn next_combination(comb: &mut [usize], n: usize) -> bool {
    let k = comb.len();
    if k == 0 || k > n {
        return false;
    }
    let mut i = k;
    while i > 0 {
        i -= 1;
        if comb[i] < n - k + i {
            comb[i] += 1;
            for j in i + 1..k {
                comb[j] = comb[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

/// Iterator over all k-subsets of `0..n` in lexicographic order.
///
/// ```
/// use conference_search::combinatorics::Combinations;
///
/// let all: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], vec![0, 1]);
/// assert_eq!(all[5], vec![2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    current: Option<Vec<usize>>,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            current: (k <= n).then(|| (0..k).collect()),
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let mut next = current.clone();
        if next_combination(&mut next, self.n) {
            self.current = Some(next);
        }
        Some(current)
    }
}

/// Rearrange `values` into the next lexicographically greater permutation.
///
/// Returns false (and leaves `values` sorted ascending) when `values` was the
/// last permutation, mirroring the usual library primitive.
pub fn next_permutation<T: Ord>(values: &mut [T]) -> bool {
    if values.len() < 2 {
        return false;
    }
    let mut i = values.len() - 1;
    while i > 0 && values[i - 1] >= values[i] {
        i -= 1;
    }
    if i == 0 {
        values.reverse();
        return false;
    }
    let mut j = values.len() - 1;
    while values[j] <= values[i - 1] {
        j -= 1;
    }
    values.swap(i - 1, j);
    values[i..].reverse();
    true
}

/// Column of length `n` with `one` at `positions` and `zero` elsewhere.
pub fn indicator(positions: &[usize], n: usize, zero: i8, one: i8) -> Vec<i8> {
    let mut out = vec![zero; n];
    for &p in positions {
        out[p] = one;
    }
    out
}
