use crate::Payoff;
use crate::Player;
use crate::game::PayoffMatrix;
use std::collections::BTreeSet;

/// A `(row, col)` cell of the payoff matrix.
///
/// Ordered so that sets of coordinates enumerate in a stable row-major
/// order, which keeps analysis output reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate(pub usize, pub usize);

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Pure-strategy Nash equilibrium detection over a payoff matrix.
pub struct Detector;

impl Detector {
    /// Every cell that is a best response for both players.
    ///
    /// Comparison is non-strict, so weakly tied equilibria are all
    /// reported. An empty set is a valid result, not an error. Cost is
    /// `O(rows * columns)` via precomputed per-line maxima.
    pub fn equilibria(matrix: &PayoffMatrix) -> BTreeSet<Coordinate> {
        let p1 = Self::best_responses(matrix, Player::One);
        let p2 = Self::best_responses(matrix, Player::Two);
        p1.intersection(&p2).copied().collect()
    }

    /// Cells where the player's pure strategy is a best response to the
    /// opponent's pure strategy at that cell.
    pub fn best_responses(matrix: &PayoffMatrix, player: Player) -> BTreeSet<Coordinate> {
        let mut cells = BTreeSet::new();
        match player {
            // player 1 picks the row, so compare down each column
            Player::One => {
                for c in 0..matrix.columns() {
                    let best = (0..matrix.rows())
                        .map(|r| matrix.row(r)[c].0)
                        .fold(Payoff::NEG_INFINITY, Payoff::max);
                    for r in 0..matrix.rows() {
                        if matrix.row(r)[c].0 >= best {
                            cells.insert(Coordinate(r, c));
                        }
                    }
                }
            }
            // player 2 picks the column, so compare along each row
            Player::Two => {
                for r in 0..matrix.rows() {
                    let best = matrix
                        .row(r)
                        .iter()
                        .map(|cell| cell.1)
                        .fold(Payoff::NEG_INFINITY, Payoff::max);
                    for (c, cell) in matrix.row(r).iter().enumerate() {
                        if cell.1 >= best {
                            cells.insert(Coordinate(r, c));
                        }
                    }
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(grid: Vec<Vec<(Payoff, Payoff)>>) -> PayoffMatrix {
        PayoffMatrix::new(grid).unwrap()
    }

    #[test]
    fn prisoners_dilemma_has_single_equilibrium() {
        let matrix = matrix(vec![
            vec![(3.0, 3.0), (0.0, 5.0)],
            vec![(5.0, 0.0), (1.0, 1.0)],
        ]);
        let equilibria = Detector::equilibria(&matrix);
        assert!(equilibria.len() == 1);
        assert!(equilibria.contains(&Coordinate(1, 1)));
    }

    #[test]
    fn matching_pennies_has_none() {
        let matrix = matrix(vec![
            vec![(1.0, -1.0), (-1.0, 1.0)],
            vec![(-1.0, 1.0), (1.0, -1.0)],
        ]);
        assert!(Detector::equilibria(&matrix).is_empty());
    }

    #[test]
    fn coordination_has_both_diagonal_equilibria() {
        let matrix = matrix(vec![
            vec![(5.0, 5.0), (0.0, 0.0)],
            vec![(0.0, 0.0), (3.0, 3.0)],
        ]);
        let equilibria = Detector::equilibria(&matrix);
        assert!(equilibria.len() == 2);
        assert!(equilibria.contains(&Coordinate(0, 0)));
        assert!(equilibria.contains(&Coordinate(1, 1)));
    }

    #[test]
    fn weak_ties_are_all_reported() {
        // both rows tie as player 1 best responses in both columns
        let matrix = matrix(vec![
            vec![(1.0, 2.0), (1.0, 1.0)],
            vec![(1.0, 2.0), (1.0, 1.0)],
        ]);
        let equilibria = Detector::equilibria(&matrix);
        assert!(equilibria.contains(&Coordinate(0, 0)));
        assert!(equilibria.contains(&Coordinate(1, 0)));
        assert!(equilibria.len() == 2);
    }

    #[test]
    fn best_responses_by_player() {
        let matrix = matrix(vec![
            vec![(3.0, 3.0), (0.0, 5.0)],
            vec![(5.0, 0.0), (1.0, 1.0)],
        ]);
        let p1 = Detector::best_responses(&matrix, Player::One);
        assert!(p1 == BTreeSet::from([Coordinate(1, 0), Coordinate(1, 1)]));
        let p2 = Detector::best_responses(&matrix, Player::Two);
        assert!(p2 == BTreeSet::from([Coordinate(0, 1), Coordinate(1, 1)]));
    }

    #[test]
    fn non_square_matrices_are_handled() {
        let matrix = matrix(vec![
            vec![(2.0, 1.0), (0.0, 0.0), (1.0, 2.0)],
            vec![(1.0, 2.0), (3.0, 3.0), (0.0, 1.0)],
        ]);
        let equilibria = Detector::equilibria(&matrix);
        assert!(equilibria == BTreeSet::from([Coordinate(0, 2), Coordinate(1, 1)]));
    }
}
