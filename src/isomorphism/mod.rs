// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Isomorphism class selection.
//!
//! Every input matrix is reduced to a canonical form, the forms are sorted in
//! the LMC-0 order, and runs of equal forms collapse into one class. The
//! representative of a class is the member with the smallest input index.
//!
//! Two notions of isomorphism are supported:
//!
//! - **full**: row and column permutations with row and column sign
//!   switches, via the conference graph and a [`CanonicalLabelOracle`]
//! - **restricted**: the matrix shifted to `{0, 1, 2}` is reduced as an
//!   orthogonal array by an [`OrthogonalArrayCanonicalizer`]
//!
//! ## Module Structure
//!
//! - `mod`: [`IsomorphismClassSelector`] and [`IsomorphismClass`]
//! - `lmc0`: the LMC-0 order
//! - `array`: array canonicalization for restricted isomorphism

pub mod array;
pub mod lmc0;

pub use array::{ArrayTransformation, GraphArrayCanonicalizer, OrthogonalArrayCanonicalizer};
pub use lmc0::{compare_lmc0, lmc0_less, sort_lmc0};

use crate::design::IsomorphismType;
use crate::error::{ConferenceError, Result};
use crate::graph::{reduce_conference, CanonicalLabelOracle, NautyOracle};
use crate::matrix::Matrix;
use rayon::prelude::*;
use std::sync::Arc;

/// Number of levels of a conference matrix viewed as an array.
const CONFERENCE_LEVELS: usize = 3;

/// One isomorphism class of an input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsomorphismClass {
    /// Canonical form shared by all members.
    pub canonical: Matrix,
    /// Input index of the representative (the smallest member index).
    pub representative: usize,
    /// Input indices of all members, ascending.
    pub members: Vec<usize>,
}

/// Reduces lists of matrices to isomorphism class representatives.
#[derive(Clone)]
pub struct IsomorphismClassSelector {
    oracle: Arc<dyn CanonicalLabelOracle>,
    canonicalizer: Arc<dyn OrthogonalArrayCanonicalizer>,
}

impl Default for IsomorphismClassSelector {
    fn default() -> Self {
        Self {
            oracle: Arc::new(NautyOracle),
            canonicalizer: Arc::new(GraphArrayCanonicalizer::<NautyOracle>::default()),
        }
    }
}

impl std::fmt::Debug for IsomorphismClassSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IsomorphismClassSelector").finish_non_exhaustive()
    }
}

fn validate(matrices: &[Matrix]) -> Result<()> {
    let Some(first) = matrices.first() else {
        return Ok(());
    };
    for (i, m) in matrices.iter().enumerate() {
        if m.rows() != first.rows() || m.columns() != first.columns() {
            return Err(ConferenceError::InvalidInput(format!(
                "matrix {} is {}x{}, expected {}x{}",
                i,
                m.rows(),
                m.columns(),
                first.rows(),
                first.columns()
            )));
        }
        if !m.is_ternary() {
            return Err(ConferenceError::InvalidInput(format!(
                "matrix {} has entries outside {{-1, 0, 1}}",
                i
            )));
        }
    }
    Ok(())
}

impl IsomorphismClassSelector {
    pub fn new(
        oracle: Arc<dyn CanonicalLabelOracle>,
        canonicalizer: Arc<dyn OrthogonalArrayCanonicalizer>,
    ) -> Self {
        Self {
            oracle,
            canonicalizer,
        }
    }

    /// Canonical representative of the class of `matrix`.
    pub fn canonical_form(&self, matrix: &Matrix, itype: IsomorphismType) -> Result<Matrix> {
        match itype {
            IsomorphismType::Full => reduce_conference(matrix, self.oracle.as_ref()),
            IsomorphismType::Restricted => {
                let shifted = matrix.map(|x| x + 1);
                let t = self.canonicalizer.reduce(&shifted, CONFERENCE_LEVELS)?;
                Ok(t.apply(&shifted).map(|x| x - 1))
            }
        }
    }

    /// Group `matrices` into isomorphism classes, in LMC-0 order of the
    /// canonical forms.
    pub fn classes(
        &self,
        matrices: &[Matrix],
        itype: IsomorphismType,
    ) -> Result<Vec<IsomorphismClass>> {
        validate(matrices)?;
        let forms: Vec<Matrix> = matrices
            .par_iter()
            .map(|m| self.canonical_form(m, itype))
            .collect::<Result<_>>()?;

        let mut order: Vec<usize> = (0..forms.len()).collect();
        order.sort_by(|&a, &b| lmc0::lmc0_cmp(&forms[a], &forms[b]));

        let mut classes: Vec<IsomorphismClass> = Vec::new();
        for index in order {
            match classes.last_mut() {
                Some(class) if class.canonical == forms[index] => class.members.push(index),
                _ => classes.push(IsomorphismClass {
                    canonical: forms[index].clone(),
                    representative: index,
                    members: vec![index],
                }),
            }
        }
        tracing::debug!(
            input = matrices.len(),
            classes = classes.len(),
            %itype,
            "selected isomorphism classes"
        );
        Ok(classes)
    }

    /// Representatives of the isomorphism classes, and the class id of every
    /// input matrix (in input order).
    ///
    /// Classes are numbered in LMC-0 order of their canonical forms. Input
    /// with entries outside `{-1, 0, 1}` or with mixed shapes is rejected.
    pub fn select_classes(
        &self,
        matrices: &[Matrix],
        itype: IsomorphismType,
    ) -> Result<(Vec<Matrix>, Vec<usize>)> {
        let classes = self.classes(matrices, itype)?;
        let mut class_of = vec![0; matrices.len()];
        let mut representatives = Vec::with_capacity(classes.len());
        for (id, class) in classes.iter().enumerate() {
            for &member in &class.members {
                class_of[member] = id;
            }
            representatives.push(matrices[class.representative].clone());
        }
        Ok((representatives, class_of))
    }
}

/// [`IsomorphismClassSelector::select_classes`] with the built-in oracles.
pub fn select_classes(
    matrices: &[Matrix],
    itype: IsomorphismType,
) -> Result<(Vec<Matrix>, Vec<usize>)> {
    IsomorphismClassSelector::default().select_classes(matrices, itype)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{create_root, create_root_three};
    use crate::matrix::ConferenceTransformation;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_transformed_copies_collapse() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let base = create_root_three(8);
        let mut list = vec![base.clone()];
        for _ in 0..4 {
            list.push(ConferenceTransformation::random(8, 3, &mut rng).apply(&base));
        }
        list.push(create_root(8).with_column(&[1, 1, 1, 0, 1, -1, -1, -1]));
        let (representatives, class_of) = select_classes(&list, IsomorphismType::Full).unwrap();
        assert!(class_of[..5].iter().all(|&c| c == class_of[0]));
        assert_eq!(representatives[class_of[0]], base);
        assert!(representatives.len() <= 2);
    }

    #[test]
    fn test_restricted_row_permutations_collapse() {
        let base = create_root_three(6);
        let mut swapped = base.clone();
        for c in 0..3 {
            let (a, b) = (swapped.at(3, c), swapped.at(5, c));
            swapped.set(3, c, b);
            swapped.set(5, c, a);
        }
        let (representatives, class_of) =
            select_classes(&[base.clone(), swapped], IsomorphismType::Restricted).unwrap();
        assert_eq!(representatives, vec![base]);
        assert_eq!(class_of, vec![0, 0]);
    }

    #[test]
    fn test_invalid_input() {
        let bad = Matrix::from_columns(4, &[vec![0, 1, -2, 1]]).unwrap();
        assert!(matches!(
            select_classes(&[bad], IsomorphismType::Full),
            Err(ConferenceError::InvalidInput(_))
        ));
        let mixed = [create_root(6), create_root(8)];
        assert!(select_classes(&mixed, IsomorphismType::Full).is_err());
        let (r, c) = select_classes(&[], IsomorphismType::Full).unwrap();
        assert!(r.is_empty() && c.is_empty());
    }
}
