//! Shortest-distance matrix over toll edges, and its long-form unrolling.

use petgraph::algo::dijkstra;
use petgraph::graph::{DiGraph, NodeIndex};

use super::matrix::Matrix;
use crate::error::{TransformError, TransformResult};
use crate::models::{DistanceEdge, DistanceRow, Id};

/// All-pairs shortest distances, symmetrized.
///
/// Edges are directed; a repeated `(id_start, id_end)` edge keeps the last
/// distance. Dijkstra runs from every id. The directed result `D` is then
/// combined with its transpose cell by cell: `D[i][j] + D[j][i]` where a
/// missing side counts as 0, and a pair missing both ways stays `None`.
pub fn calculate_distance_matrix(edges: &[DistanceEdge]) -> TransformResult<Matrix> {
    if let Some(edge) = edges.iter().find(|e| e.distance < 0.0) {
        return Err(TransformError::NegativeDistance {
            start: edge.id_start,
            end: edge.id_end,
            distance: edge.distance,
        });
    }

    let ids: Vec<Id> = edges.iter().flat_map(|e| [e.id_start, e.id_end]).collect();
    let directed = directed_distances(Matrix::with_zero_diagonal(ids), edges);
    Ok(symmetrize(&directed))
}

/// Fill `matrix` (zero diagonal, ids already set) with directed shortest distances.
fn directed_distances(mut matrix: Matrix, edges: &[DistanceEdge]) -> Matrix {
    let mut graph: DiGraph<Id, f64> = DiGraph::with_capacity(matrix.size(), edges.len());
    let nodes: Vec<NodeIndex> = matrix.ids().iter().map(|&id| graph.add_node(id)).collect();

    for edge in edges {
        if let (Some(i), Some(j)) = (matrix.index_of(edge.id_start), matrix.index_of(edge.id_end)) {
            graph.update_edge(nodes[i], nodes[j], edge.distance);
        }
    }

    // Nodes were added in id order, so a node's index is its matrix position.
    for (i, &source) in nodes.iter().enumerate() {
        let reached = dijkstra(&graph, source, None, |e| *e.weight());
        for (node, cost) in reached {
            let j = node.index();
            if i != j {
                matrix.set_at(i, j, Some(cost));
            }
        }
    }

    matrix
}

fn symmetrize(directed: &Matrix) -> Matrix {
    let n = directed.size();
    let reversed = directed.transpose();
    let mut out = Matrix::new(directed.ids().to_vec());

    for i in 0..n {
        for j in 0..n {
            let value = match (directed.at(i, j), reversed.at(i, j)) {
                (None, None) => None,
                (a, b) => Some(a.unwrap_or(0.0) + b.unwrap_or(0.0)),
            };
            out.set_at(i, j, value);
        }
    }

    out
}

/// Long-form rows of every off-diagonal cell, in row-major id order.
///
/// Cells with no value are kept as rows with `distance: None`.
pub fn unroll_distance_matrix(matrix: &Matrix) -> Vec<DistanceRow> {
    let ids = matrix.ids();
    let mut rows = Vec::with_capacity(ids.len() * ids.len().saturating_sub(1));

    for (i, &id_start) in ids.iter().enumerate() {
        for (j, &id_end) in ids.iter().enumerate() {
            if i != j {
                rows.push(DistanceRow::new(id_start, id_end, matrix.at(i, j)));
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: Id, b: Id, d: f64) -> DistanceEdge {
        DistanceEdge::new(a, b, d)
    }

    fn chain() -> Vec<DistanceEdge> {
        vec![
            edge(1001400, 1001402, 9.7),
            edge(1001402, 1001404, 20.2),
            edge(1001404, 1001406, 16.0),
            edge(1001406, 1001408, 21.7),
        ]
    }

    #[test]
    fn test_two_hop_distance() {
        let matrix = calculate_distance_matrix(&[edge(1, 2, 10.0), edge(2, 3, 10.0)]).unwrap();
        assert_eq!(matrix.get(1, 3), Some(20.0));
        assert_eq!(matrix.get(3, 1), Some(20.0));
    }

    #[test]
    fn test_symmetric_with_zero_diagonal() {
        let matrix = calculate_distance_matrix(&chain()).unwrap();

        assert!(matrix.is_symmetric());
        for &id in matrix.ids() {
            assert_eq!(matrix.get(id, id), Some(0.0));
        }
    }

    #[test]
    fn test_triangle_inequality() {
        let matrix = calculate_distance_matrix(&chain()).unwrap();
        let n = matrix.size();

        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    if let (Some(ij), Some(ik), Some(kj)) = (matrix.at(i, j), matrix.at(i, k), matrix.at(k, j)) {
                        assert!(ij <= ik + kj + 1e-9, "d({i},{j}) > d({i},{k}) + d({k},{j})");
                    }
                }
            }
        }
    }

    #[test]
    fn test_shortest_path_preferred() {
        let matrix = calculate_distance_matrix(&[
            edge(1, 2, 5.0),
            edge(2, 3, 5.0),
            edge(1, 3, 50.0),
        ])
        .unwrap();
        assert_eq!(matrix.get(1, 3), Some(10.0));
    }

    #[test]
    fn test_unreachable_pair_is_none() {
        let matrix = calculate_distance_matrix(&[edge(1, 2, 3.0), edge(5, 6, 4.0)]).unwrap();
        assert_eq!(matrix.get(1, 6), None);
        assert_eq!(matrix.get(6, 1), None);
        assert_eq!(matrix.get(5, 6), Some(4.0));
    }

    #[test]
    fn test_both_directions_are_added() {
        let matrix = calculate_distance_matrix(&[edge(1, 2, 3.0), edge(2, 1, 4.0)]).unwrap();
        assert_eq!(matrix.get(1, 2), Some(7.0));
        assert_eq!(matrix.get(2, 1), Some(7.0));
    }

    #[test]
    fn test_repeated_edge_keeps_last_distance() {
        let matrix = calculate_distance_matrix(&[edge(1, 2, 3.0), edge(1, 2, 8.0)]).unwrap();
        assert_eq!(matrix.get(1, 2), Some(8.0));
    }

    #[test]
    fn test_negative_distance_rejected() {
        let err = calculate_distance_matrix(&[edge(1, 2, -1.0)]).unwrap_err();
        assert!(matches!(err, TransformError::NegativeDistance { start: 1, end: 2, .. }));
    }

    #[test]
    fn test_unroll_excludes_diagonal() {
        let matrix = calculate_distance_matrix(&chain()).unwrap();
        let rows = unroll_distance_matrix(&matrix);

        let n = matrix.size();
        assert_eq!(rows.len(), n * (n - 1));
        assert!(rows.iter().all(|r| r.id_start != r.id_end));
        assert_eq!(rows[0], DistanceRow::new(1001400, 1001402, Some(9.7)));
    }

    #[test]
    fn test_unroll_round_trip_reproduces_direct_edges() {
        let edges = chain();
        let rows = unroll_distance_matrix(&calculate_distance_matrix(&edges).unwrap());

        for e in &edges {
            let row = rows
                .iter()
                .find(|r| r.id_start == e.id_start && r.id_end == e.id_end)
                .unwrap();
            assert_eq!(row.distance, Some(e.distance));
        }
    }

    #[test]
    fn test_unroll_keeps_missing_cells() {
        let matrix = calculate_distance_matrix(&[edge(1, 2, 3.0), edge(5, 6, 4.0)]).unwrap();
        let rows = unroll_distance_matrix(&matrix);
        assert!(rows.contains(&DistanceRow::new(1, 5, None)));
    }

    #[test]
    fn test_empty_edges() {
        let matrix = calculate_distance_matrix(&[]).unwrap();
        assert!(matrix.is_empty());
        assert!(unroll_distance_matrix(&matrix).is_empty());
    }
}
