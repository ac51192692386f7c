// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Graph encodings of matrices.

use super::ColoredGraph;
use crate::error::{ConferenceError, Result};
use crate::matrix::Matrix;

/// Vertex of row `r` (or its negation when `negated`) in a conference graph.
#[inline]
pub fn row_vertex(rows: usize, r: usize, negated: bool) -> usize {
    if negated {
        rows + r
    } else {
        r
    }
}

/// Vertex of column `c` (or its negation when `negated`) in a conference graph.
#[inline]
pub fn column_vertex(rows: usize, columns: usize, c: usize, negated: bool) -> usize {
    let base = 2 * rows + c;
    if negated {
        base + columns
    } else {
        base
    }
}

/// Encode a conference matrix as a colored graph.
///
/// Each row contributes a vertex pair `r`, `r′` (color 0) and each column a
/// pair `c`, `c′` (color 1), joined by an edge. An entry `+1` joins `r–c`
/// and `r′–c′`, an entry `-1` joins `r–c′` and `r′–c`, and a zero adds
/// nothing. Negating a row swaps `r` and `r′`, so sign switches become
/// graph automorphisms.
///
/// Returns the graph and the color of every vertex.
pub fn to_graph(matrix: &Matrix) -> Result<(ColoredGraph, Vec<usize>)> {
    if !matrix.is_ternary() {
        return Err(ConferenceError::InvalidInput(
            "conference graph encoding needs entries in {-1, 0, 1}".to_string(),
        ));
    }
    let rows = matrix.rows();
    let columns = matrix.columns();
    let mut graph = ColoredGraph::new(2 * (rows + columns));
    let mut colors = vec![0; 2 * rows];
    colors.resize(2 * (rows + columns), 1);

    for r in 0..rows {
        graph.add_edge(row_vertex(rows, r, false), row_vertex(rows, r, true));
    }
    for c in 0..columns {
        graph.add_edge(
            column_vertex(rows, columns, c, false),
            column_vertex(rows, columns, c, true),
        );
    }
    for c in 0..columns {
        for r in 0..rows {
            let flip = match matrix.at(r, c) {
                1 => false,
                -1 => true,
                _ => continue,
            };
            graph.add_edge(
                row_vertex(rows, r, false),
                column_vertex(rows, columns, c, flip),
            );
            graph.add_edge(
                row_vertex(rows, r, true),
                column_vertex(rows, columns, c, !flip),
            );
        }
    }
    Ok((graph, colors))
}

/// Encode an array with entries in `0..levels` as a colored graph whose
/// automorphisms permute rows, columns and the levels of each column.
///
/// Vertices: one per row (color 0), one per column (color 1) and `levels`
/// per column (color 2, column `c` level `l` at `rows + columns + c * levels
/// + l`). Each level vertex is joined to its column, and each row to the
/// level vertex of its entry in every column.
pub fn to_array_graph(array: &Matrix, levels: usize) -> Result<(ColoredGraph, Vec<usize>)> {
    let rows = array.rows();
    let columns = array.columns();
    if array.iter_columns().flatten().any(|&x| x < 0 || x as usize >= levels) {
        return Err(ConferenceError::InvalidInput(format!(
            "array entries must lie in 0..{}",
            levels
        )));
    }
    let level_base = rows + columns;
    let mut graph = ColoredGraph::new(level_base + columns * levels);
    let mut colors = vec![0; rows];
    colors.resize(level_base, 1);
    colors.resize(level_base + columns * levels, 2);

    for c in 0..columns {
        for l in 0..levels {
            graph.add_edge(rows + c, level_base + c * levels + l);
        }
        for r in 0..rows {
            graph.add_edge(r, level_base + c * levels + array.at(r, c) as usize);
        }
    }
    Ok((graph, colors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conference_graph_shape() {
        let m = Matrix::from_rows(&[vec![0, 1], vec![1, 0], vec![1, -1]]).unwrap();
        let (g, colors) = to_graph(&m).unwrap();
        assert_eq!(g.len(), 10);
        assert_eq!(colors, vec![0, 0, 0, 0, 0, 0, 1, 1, 1, 1]);
        // 3 row pairs, 2 column pairs, 4 nonzero entries with 2 edges each
        assert_eq!(g.edge_count(), 3 + 2 + 8);
        // entry (2, 1) = -1 joins r_2 with c_1′
        assert!(g.has_edge(2, column_vertex(3, 2, 1, true)));
        assert!(g.has_edge(row_vertex(3, 2, true), column_vertex(3, 2, 1, false)));
        // entry (0, 0) = 0 adds nothing
        assert!(!g.has_edge(0, column_vertex(3, 2, 0, false)));
    }

    #[test]
    fn test_rejects_non_ternary() {
        let m = Matrix::from_rows(&[vec![2, 0]]).unwrap();
        assert!(matches!(to_graph(&m), Err(ConferenceError::InvalidInput(_))));
    }

    #[test]
    fn test_array_graph() {
        let a = Matrix::from_rows(&[vec![0, 2], vec![1, 0]]).unwrap();
        let (g, colors) = to_array_graph(&a, 3).unwrap();
        assert_eq!(g.len(), 2 + 2 + 6);
        assert_eq!(colors.iter().filter(|&&c| c == 2).count(), 6);
        // row 0 is at level 2 in column 1
        assert!(g.has_edge(0, 4 + 3 + 2));
        assert!(to_array_graph(&a, 2).is_err());
    }
}
