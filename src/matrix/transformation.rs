// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Row/column permutations combined with sign switches.
//!
//! Two conference matrices are isomorphic when one can be obtained from the
//! other by permuting rows, permuting columns and negating rows or columns.
//! [`ConferenceTransformation`] represents one such map.
//!
//! Convention: row `r` of the input moves to row `rperm[r]` of the output and
//! the output row is then multiplied by `rswitch[rperm[r]]`, i.e. signs are
//! indexed by the *target* position. Columns behave the same way.

use crate::matrix::Matrix;
use rand::seq::SliceRandom;
use rand::Rng;

/// Permutation and sign switch of rows and columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceTransformation {
    /// Target position of each input row.
    pub rperm: Vec<usize>,
    /// Sign applied to each output row.
    pub rswitch: Vec<i8>,
    /// Target position of each input column.
    pub cperm: Vec<usize>,
    /// Sign applied to each output column.
    pub cswitch: Vec<i8>,
}

/// Inverse of a permutation given as a target-position vector.
pub fn invert_permutation(perm: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inverse[p] = i;
    }
    inverse
}

/// True if `perm` is a permutation of `0..perm.len()`.
pub fn is_permutation(perm: &[usize]) -> bool {
    let mut seen = vec![false; perm.len()];
    for &p in perm {
        if p >= perm.len() || seen[p] {
            return false;
        }
        seen[p] = true;
    }
    true
}

impl ConferenceTransformation {
    /// The identity transformation for an `rows × columns` matrix.
    pub fn identity(rows: usize, columns: usize) -> Self {
        Self {
            rperm: (0..rows).collect(),
            rswitch: vec![1; rows],
            cperm: (0..columns).collect(),
            cswitch: vec![1; columns],
        }
    }

    /// Uniformly random permutations and signs.
    pub fn random<R: Rng + ?Sized>(rows: usize, columns: usize, rng: &mut R) -> Self {
        let mut t = Self::identity(rows, columns);
        t.rperm.shuffle(rng);
        t.cperm.shuffle(rng);
        for s in t.rswitch.iter_mut().chain(t.cswitch.iter_mut()) {
            *s = if rng.gen_bool(0.5) { 1 } else { -1 };
        }
        t
    }

    /// Number of rows this transformation acts on.
    pub fn rows(&self) -> usize {
        self.rperm.len()
    }

    /// Number of columns this transformation acts on.
    pub fn columns(&self) -> usize {
        self.cperm.len()
    }

    /// True if this is the identity map.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity(self.rows(), self.columns())
    }

    /// Apply the transformation to a matrix.
    ///
    /// # Panics
    ///
    /// Panics if the matrix shape does not match the transformation.
    pub fn apply(&self, matrix: &Matrix) -> Matrix {
        assert_eq!(matrix.rows(), self.rows(), "row count mismatch");
        assert_eq!(matrix.columns(), self.columns(), "column count mismatch");
        let mut out = Matrix::zeros(matrix.rows(), matrix.columns());
        for c in 0..matrix.columns() {
            let tc = self.cperm[c];
            let cs = self.cswitch[tc];
            for r in 0..matrix.rows() {
                let tr = self.rperm[r];
                out.set(tr, tc, self.rswitch[tr] * cs * matrix.at(r, c));
            }
        }
        out
    }

    /// The transformation that first applies `self` and then `next`.
    pub fn then(&self, next: &ConferenceTransformation) -> ConferenceTransformation {
        let rperm: Vec<usize> = self.rperm.iter().map(|&p| next.rperm[p]).collect();
        let cperm: Vec<usize> = self.cperm.iter().map(|&p| next.cperm[p]).collect();
        let mut rswitch = vec![1; self.rows()];
        for (r, &target) in rperm.iter().enumerate() {
            rswitch[target] = next.rswitch[target] * self.rswitch[self.rperm[r]];
        }
        let mut cswitch = vec![1; self.columns()];
        for (c, &target) in cperm.iter().enumerate() {
            cswitch[target] = next.cswitch[target] * self.cswitch[self.cperm[c]];
        }
        ConferenceTransformation {
            rperm,
            rswitch,
            cperm,
            cswitch,
        }
    }

    /// The inverse transformation.
    pub fn inverse(&self) -> ConferenceTransformation {
        ConferenceTransformation {
            rperm: invert_permutation(&self.rperm),
            rswitch: self.rperm.iter().map(|&p| self.rswitch[p]).collect(),
            cperm: invert_permutation(&self.cperm),
            cswitch: self.cperm.iter().map(|&p| self.cswitch[p]).collect(),
        }
    }

    /// True if the permutations are valid and every sign is `±1`.
    pub fn is_consistent(&self) -> bool {
        is_permutation(&self.rperm)
            && is_permutation(&self.cperm)
            && self.rswitch.len() == self.rperm.len()
            && self.cswitch.len() == self.cperm.len()
            && self
                .rswitch
                .iter()
                .chain(&self.cswitch)
                .all(|&s| s == 1 || s == -1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample() -> Matrix {
        Matrix::from_rows(&[
            vec![0, 1, 1],
            vec![1, 0, 1],
            vec![1, 1, 0],
            vec![1, -1, -1],
        ])
        .unwrap()
    }

    #[test]
    fn test_identity_is_noop() {
        let m = sample();
        let t = ConferenceTransformation::identity(4, 3);
        assert!(t.is_identity());
        assert_eq!(t.apply(&m), m);
    }

    #[test]
    fn test_row_permutation_and_sign() {
        let m = sample();
        let mut t = ConferenceTransformation::identity(4, 3);
        t.rperm = vec![1, 0, 2, 3];
        t.rswitch = vec![-1, 1, 1, 1];
        let out = t.apply(&m);
        // Old row 1 lands in position 0 and is negated there.
        assert_eq!(out.row(0), vec![-1, 0, -1]);
        assert_eq!(out.row(1), vec![0, 1, 1]);
    }

    #[test]
    fn test_then_matches_sequential_application() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let m = sample();
        for _ in 0..20 {
            let a = ConferenceTransformation::random(4, 3, &mut rng);
            let b = ConferenceTransformation::random(4, 3, &mut rng);
            assert_eq!(a.then(&b).apply(&m), b.apply(&a.apply(&m)));
        }
    }

    #[test]
    fn test_inverse_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let m = sample();
        for _ in 0..20 {
            let t = ConferenceTransformation::random(4, 3, &mut rng);
            assert!(t.is_consistent());
            assert_eq!(t.inverse().apply(&t.apply(&m)), m);
            assert!(t.then(&t.inverse()).is_identity());
        }
    }

    #[test]
    fn test_permutation_helpers() {
        assert!(is_permutation(&[2, 0, 1]));
        assert!(!is_permutation(&[0, 0, 1]));
        assert!(!is_permutation(&[0, 3, 1]));
        assert_eq!(invert_permutation(&[2, 0, 1]), vec![1, 2, 0]);
    }
}
