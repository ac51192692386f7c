// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Decoding canonical labelings into matrix transformations.

use super::encode::{column_vertex, row_vertex, to_graph};
use super::CanonicalLabelOracle;
use crate::error::{ConferenceError, Result};
use crate::matrix::transformation::{invert_permutation, is_permutation};
use crate::matrix::{ConferenceTransformation, Matrix};

/// Check that `labeling` is a permutation that keeps color classes together
/// in increasing color order.
pub fn check_labeling(labeling: &[usize], colors: &[usize]) -> Result<()> {
    if labeling.len() != colors.len() || !is_permutation(labeling) {
        return Err(ConferenceError::OracleContractViolation(format!(
            "labeling of {} vertices is not a permutation of 0..{}",
            labeling.len(),
            colors.len()
        )));
    }
    let lab = invert_permutation(labeling);
    if let Some(w) = lab.windows(2).find(|w| colors[w[0]] > colors[w[1]]) {
        return Err(ConferenceError::OracleContractViolation(format!(
            "vertex {} (color {}) placed before vertex {} (color {})",
            w[0], colors[w[0]], w[1], colors[w[1]]
        )));
    }
    Ok(())
}

/// Order and signs of `count` vertex pairs: position of each pair in the
/// stable order of the smaller label, and `+1` when the plain vertex carries
/// the smaller label. Signs are indexed by target position.
fn decode_pairs(
    labeling: &[usize],
    count: usize,
    vertex: impl Fn(usize, bool) -> usize,
) -> (Vec<usize>, Vec<i8>) {
    let keys: Vec<usize> = (0..count)
        .map(|i| labeling[vertex(i, false)].min(labeling[vertex(i, true)]))
        .collect();
    let mut order: Vec<usize> = (0..count).collect();
    order.sort_by_key(|&i| keys[i]);
    let perm = invert_permutation(&order);
    let mut switch = vec![1i8; count];
    for i in 0..count {
        if labeling[vertex(i, false)] > labeling[vertex(i, true)] {
            switch[perm[i]] = -1;
        }
    }
    (perm, switch)
}

/// Decode a canonical labeling of the graph of an `rows × columns` matrix.
pub fn extract_transformation(
    labeling: &[usize],
    rows: usize,
    columns: usize,
) -> Result<ConferenceTransformation> {
    let expected = 2 * (rows + columns);
    if labeling.len() != expected || !is_permutation(labeling) {
        return Err(ConferenceError::OracleContractViolation(format!(
            "expected a permutation of {} vertices, got {} labels",
            expected,
            labeling.len()
        )));
    }
    let (rperm, rswitch) = decode_pairs(labeling, rows, |r, neg| row_vertex(rows, r, neg));
    let (cperm, cswitch) = decode_pairs(labeling, columns, |c, neg| {
        column_vertex(rows, columns, c, neg)
    });
    Ok(ConferenceTransformation {
        rperm,
        rswitch,
        cperm,
        cswitch,
    })
}

/// The transformation taking `matrix` to the canonical representative of its
/// isomorphism class.
pub fn reduce_conference_transformation(
    matrix: &Matrix,
    oracle: &dyn CanonicalLabelOracle,
) -> Result<ConferenceTransformation> {
    let (graph, colors) = to_graph(matrix)?;
    let labeling = oracle.canonical_labeling(&graph, &colors);
    check_labeling(&labeling, &colors)?;
    let transformation = extract_transformation(&labeling, matrix.rows(), matrix.columns())?;
    if !transformation.is_consistent() {
        return Err(ConferenceError::OracleContractViolation(
            "decoded transformation is inconsistent".to_string(),
        ));
    }
    Ok(transformation)
}

/// The canonical representative of the isomorphism class of `matrix`.
pub fn reduce_conference(matrix: &Matrix, oracle: &dyn CanonicalLabelOracle) -> Result<Matrix> {
    let transformation = reduce_conference_transformation(matrix, oracle)?;
    tracing::trace!(
        rows = matrix.rows(),
        columns = matrix.columns(),
        "reduced to canonical form"
    );
    Ok(transformation.apply(matrix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::create_root_three;
    use crate::graph::{ColoredGraph, NautyOracle};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct IdentityOracle;

    impl CanonicalLabelOracle for IdentityOracle {
        fn canonical_labeling(&self, graph: &ColoredGraph, _colors: &[usize]) -> Vec<usize> {
            (0..graph.len()).collect()
        }
    }

    struct BrokenOracle;

    impl CanonicalLabelOracle for BrokenOracle {
        fn canonical_labeling(&self, graph: &ColoredGraph, _colors: &[usize]) -> Vec<usize> {
            vec![0; graph.len()]
        }
    }

    struct ColorMixingOracle;

    impl CanonicalLabelOracle for ColorMixingOracle {
        fn canonical_labeling(&self, graph: &ColoredGraph, _colors: &[usize]) -> Vec<usize> {
            (0..graph.len()).rev().collect()
        }
    }

    #[test]
    fn test_identity_labeling_decodes_to_identity() {
        let m = create_root_three(6);
        let t = reduce_conference_transformation(&m, &IdentityOracle).unwrap();
        assert!(t.is_identity());
    }

    #[test]
    fn test_sign_from_pair_order() {
        // one row, one column: swap the labels of r and r′
        let labeling = vec![1, 0, 2, 3];
        let t = extract_transformation(&labeling, 1, 1).unwrap();
        assert_eq!(t.rswitch, vec![-1]);
        assert_eq!(t.cswitch, vec![1]);
    }

    #[test]
    fn test_contract_violations() {
        let m = create_root_three(6);
        assert!(matches!(
            reduce_conference_transformation(&m, &BrokenOracle),
            Err(ConferenceError::OracleContractViolation(_))
        ));
        assert!(matches!(
            reduce_conference_transformation(&m, &ColorMixingOracle),
            Err(ConferenceError::OracleContractViolation(_))
        ));
        assert!(extract_transformation(&[0, 1, 2], 1, 1).is_err());
    }

    #[test]
    fn test_canonical_form_is_invariant() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let m = create_root_three(8);
        let canonical = reduce_conference(&m, &NautyOracle).unwrap();
        for _ in 0..10 {
            let t = ConferenceTransformation::random(8, 3, &mut rng);
            let image = t.apply(&m);
            assert_eq!(reduce_conference(&image, &NautyOracle).unwrap(), canonical);
        }
    }
}
