// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use conference_search::Matrix;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic generator for randomized tests.
pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Quadratic character of `a` modulo the prime `q`.
fn chi(a: i64, q: i64) -> i8 {
    let a = a.rem_euclid(q);
    if a == 0 {
        return 0;
    }
    if (1..q).any(|x| (x * x) % q == a) {
        1
    } else {
        -1
    }
}

/// Paley conference matrix of order `q + 1` for a prime `q`.
///
/// Row and column 0 are the border; the core is the Jacobsthal matrix of
/// `q`. The matrix is symmetric for `q = 1 mod 4` and antisymmetric for
/// `q = 3 mod 4`.
pub fn paley(q: usize) -> Matrix {
    let n = q + 1;
    let border: i8 = if q % 4 == 1 { 1 } else { -1 };
    let mut m = Matrix::zeros(n, n);
    for j in 1..n {
        m.set(0, j, 1);
        m.set(j, 0, border);
    }
    for i in 0..q {
        for j in 0..q {
            m.set(i + 1, j + 1, chi(j as i64 - i as i64, q as i64));
        }
    }
    m
}

/// Assert every column has a single zero and the columns are orthogonal.
pub fn assert_conference(m: &Matrix) {
    for c in 0..m.columns() {
        assert_eq!(m.count_in_column(c, 0), 1, "column {} zero count", c);
    }
    assert!(m.has_orthogonal_columns(), "columns are not orthogonal:\n{}", m);
}
