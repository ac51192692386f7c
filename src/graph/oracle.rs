// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Canonical labeling of colored graphs.
//!
//! [`NautyOracle`] hands the graph to nauty's `densenauty` with the color
//! classes as the initial partition. nauty only ever splits cells, so the
//! canonical order keeps the color classes together and in color order.

use super::ColoredGraph;
use nauty_Traces_sys::{
    densenauty, empty_graph, optionblk, statsblk, ADDONEEDGE, FALSE, SETWORDSNEEDED, TRUE,
};
use std::os::raw::c_int;
use std::sync::{Mutex, PoisonError};

/// A deterministic canonical labeling procedure.
///
/// `canonical_labeling` returns, for every vertex `v`, its canonical position
/// `labeling[v]`. Implementations must:
///
/// - return a permutation of `0..graph.len()`
/// - keep color classes together, in increasing color order
/// - give isomorphic inputs (under a color-preserving isomorphism) the same
///   relabeled graph
pub trait CanonicalLabelOracle: Send + Sync {
    fn canonical_labeling(&self, graph: &ColoredGraph, colors: &[usize]) -> Vec<usize>;
}

/// Canonical labeling by nauty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NautyOracle;

/// nauty keeps its work areas in globals; calls are serialized.
static NAUTY: Mutex<()> = Mutex::new(());

/// nauty's `lab`/`ptn` pair for the partition of the vertices by color.
///
/// `lab` lists the vertices ordered by color (stable within a color) and
/// `ptn[i]` is 0 exactly where a cell ends.
fn color_partition(colors: &[usize]) -> (Vec<c_int>, Vec<c_int>) {
    let mut order: Vec<usize> = (0..colors.len()).collect();
    order.sort_by_key(|&v| colors[v]);
    let ptn = order
        .iter()
        .enumerate()
        .map(|(i, &v)| match order.get(i + 1) {
            Some(&next) if colors[next] == colors[v] => 1,
            _ => 0,
        })
        .collect();
    let lab = order.into_iter().map(|v| v as c_int).collect();
    (lab, ptn)
}

impl CanonicalLabelOracle for NautyOracle {
    fn canonical_labeling(&self, graph: &ColoredGraph, colors: &[usize]) -> Vec<usize> {
        let n = graph.len();
        if n == 0 {
            return Vec::new();
        }
        let m = SETWORDSNEEDED(n);
        let mut g = empty_graph(m, n);
        for (a, b) in graph.edges() {
            ADDONEEDGE(&mut g, a, b, m);
        }
        let mut canonical = empty_graph(m, n);
        let (mut lab, mut ptn) = color_partition(colors);
        let mut orbits: Vec<c_int> = vec![0; n];

        let mut options = optionblk::default();
        options.getcanon = TRUE;
        options.defaultptn = FALSE;
        let mut stats = statsblk::default();

        {
            let _guard = NAUTY.lock().unwrap_or_else(PoisonError::into_inner);
            // SAFETY: lab, ptn and orbits hold n entries; g and canonical
            // hold m words per vertex, as densenauty expects.
            unsafe {
                densenauty(
                    g.as_mut_ptr(),
                    lab.as_mut_ptr(),
                    ptn.as_mut_ptr(),
                    orbits.as_mut_ptr(),
                    &mut options,
                    &mut stats,
                    m as c_int,
                    n as c_int,
                    canonical.as_mut_ptr(),
                );
            }
        }
        tracing::trace!(
            vertices = n,
            generators = stats.numgenerators,
            nodes = stats.numnodes,
            "nauty canonical labeling"
        );

        // lab[i] is the vertex at canonical position i
        let mut labeling = vec![0; n];
        for (position, &v) in lab.iter().enumerate() {
            labeling[v as usize] = position;
        }
        labeling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::transformation::invert_permutation;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn cycle(n: usize) -> ColoredGraph {
        let mut g = ColoredGraph::new(n);
        for v in 0..n {
            g.add_edge(v, (v + 1) % n);
        }
        g
    }

    fn petersen() -> ColoredGraph {
        let mut g = ColoredGraph::new(10);
        for i in 0..5 {
            g.add_edge(i, (i + 1) % 5);
            g.add_edge(i, i + 5);
            g.add_edge(5 + i, 5 + (i + 2) % 5);
        }
        g
    }

    fn canonical_graph(g: &ColoredGraph, colors: &[usize]) -> ColoredGraph {
        let labeling = NautyOracle.canonical_labeling(g, colors);
        g.relabeled(&labeling)
    }

    #[test]
    fn test_color_partition() {
        let (lab, ptn) = color_partition(&[1, 0, 1, 2, 0]);
        assert_eq!(lab, vec![1, 4, 0, 2, 3]);
        assert_eq!(ptn, vec![1, 0, 1, 0, 0]);
    }

    #[test]
    fn test_labeling_is_permutation_respecting_colors() {
        let g = petersen();
        let colors = vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1];
        let labeling = NautyOracle.canonical_labeling(&g, &colors);
        let lab = invert_permutation(&labeling);
        let mut sorted = labeling.clone();
        sorted.sort();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
        assert!(lab.windows(2).all(|w| colors[w[0]] <= colors[w[1]]));
    }

    #[test]
    fn test_isomorphic_graphs_get_equal_canonical_form() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for g in [cycle(7), petersen()] {
            let colors = vec![0; g.len()];
            let reference = canonical_graph(&g, &colors);
            for _ in 0..10 {
                let mut perm: Vec<usize> = (0..g.len()).collect();
                perm.shuffle(&mut rng);
                let h = g.relabeled(&perm);
                assert_eq!(canonical_graph(&h, &colors), reference);
            }
        }
    }

    #[test]
    fn test_non_isomorphic_graphs_differ() {
        // two triangles versus a hexagon: both 2-regular on 6 vertices
        let mut two_triangles = ColoredGraph::new(6);
        for &(a, b) in &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
            two_triangles.add_edge(a, b);
        }
        let colors = vec![0; 6];
        assert_ne!(
            canonical_graph(&two_triangles, &colors),
            canonical_graph(&cycle(6), &colors)
        );
    }

    #[test]
    fn test_colors_are_respected() {
        // the same path with a different endpoint colored
        let mut g = ColoredGraph::new(3);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let a = canonical_graph(&g, &[1, 0, 0]);
        let b = canonical_graph(&g, &[0, 0, 1]);
        assert_eq!(a, b);
        let c = canonical_graph(&g, &[0, 1, 0]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_twin_blocks_canonicalize_from_many_threads() {
        use rayon::prelude::*;
        // complete bipartite graph: every vertex has a large block of twins
        let mut g = ColoredGraph::new(40);
        for a in 0..20 {
            for b in 20..40 {
                g.add_edge(a, b);
            }
        }
        let colors: Vec<usize> = (0..40).map(|v| v / 20).collect();
        let reference = canonical_graph(&g, &colors);
        let forms: Vec<ColoredGraph> = (0..16u64)
            .into_par_iter()
            .map(|seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let mut perm: Vec<usize> = (0..20).collect();
                perm.shuffle(&mut rng);
                perm.extend(20..40);
                canonical_graph(&g.relabeled(&perm), &colors)
            })
            .collect();
        assert!(forms.iter().all(|f| *f == reference));
    }
}
