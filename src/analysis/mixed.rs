use crate::Player;
use crate::Probability;
use crate::game::PayoffMatrix;

/// A mixed-strategy Nash equilibrium of a 2x2 game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixedNash {
    pub p1: [Probability; 2],
    pub p2: [Probability; 2],
}

/// Why a mixed equilibrium could not be produced for a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixedError {
    NotTwoByTwo,
    PureExists,
    Degenerate(Player),
    Dominated(Player),
}

impl std::fmt::Display for MixedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotTwoByTwo => {
                write!(f, "mixed strategy calculation is only supported for 2x2 games")
            }
            Self::PureExists => {
                write!(f, "pure Nash equilibria exist, no need for mixed strategy")
            }
            Self::Degenerate(player) => write!(
                f,
                "division by zero when calculating {}'s strategy: one or more strategies may be dominated",
                player
            ),
            Self::Dominated(player) => write!(
                f,
                "negative probabilities for {}: one or more strategies may be dominated",
                player
            ),
        }
    }
}

impl std::error::Error for MixedError {}

/// Indifference solver for 2x2 games.
///
/// Each player mixes so the opponent is indifferent between their two pure
/// strategies. This runs on the analysis service side only; the session
/// core never computes mixed equilibria itself.
pub struct Indifference;

impl Indifference {
    pub fn solve(matrix: &PayoffMatrix) -> Result<MixedNash, MixedError> {
        if matrix.rows() != 2 || matrix.columns() != 2 {
            return Err(MixedError::NotTwoByTwo);
        }
        // player 1 mixes rows to leave player 2 indifferent between columns
        let x = matrix.row(0)[0].1;
        let y = matrix.row(1)[0].1;
        let z = matrix.row(0)[1].1;
        let w = matrix.row(1)[1].1;
        let denominator = x - y + w - z;
        if denominator == 0.0 {
            return Err(MixedError::Degenerate(Player::One));
        }
        let p = (w - y) / denominator;
        if !(0.0..=1.0).contains(&p) {
            return Err(MixedError::Dominated(Player::One));
        }
        // player 2 mixes columns to leave player 1 indifferent between rows
        let x = matrix.row(0)[0].0;
        let y = matrix.row(1)[0].0;
        let z = matrix.row(0)[1].0;
        let w = matrix.row(1)[1].0;
        let denominator = x - y + w - z;
        if denominator == 0.0 {
            return Err(MixedError::Degenerate(Player::Two));
        }
        let q = (w - z) / denominator;
        if !(0.0..=1.0).contains(&q) {
            return Err(MixedError::Dominated(Player::Two));
        }
        Ok(MixedNash {
            p1: [p, 1.0 - p],
            p2: [q, 1.0 - q],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(grid: Vec<Vec<(f64, f64)>>) -> PayoffMatrix {
        PayoffMatrix::new(grid).unwrap()
    }

    #[test]
    fn matching_pennies_mixes_evenly() {
        let matrix = matrix(vec![
            vec![(1.0, -1.0), (-1.0, 1.0)],
            vec![(-1.0, 1.0), (1.0, -1.0)],
        ]);
        let nash = Indifference::solve(&matrix).unwrap();
        assert!(nash.p1 == [0.5, 0.5]);
        assert!(nash.p2 == [0.5, 0.5]);
    }

    #[test]
    fn asymmetric_game_mixes_unevenly() {
        // battle of the sexes: p1 = [a, b] / (a + b) with a = 3, b = 2
        let matrix = matrix(vec![
            vec![(3.0, 2.0), (0.0, 0.0)],
            vec![(0.0, 0.0), (2.0, 3.0)],
        ]);
        let nash = Indifference::solve(&matrix).unwrap();
        assert!((nash.p1[0] - 0.6).abs() < 1e-12);
        assert!((nash.p1[1] - 0.4).abs() < 1e-12);
        assert!((nash.p2[0] - 0.4).abs() < 1e-12);
        assert!((nash.p2[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn flat_opponent_payoffs_are_degenerate() {
        let matrix = matrix(vec![
            vec![(1.0, 2.0), (0.0, 2.0)],
            vec![(0.0, 2.0), (1.0, 2.0)],
        ]);
        assert!(Indifference::solve(&matrix).unwrap_err() == MixedError::Degenerate(Player::One));
    }

    #[test]
    fn dominated_strategy_is_reported() {
        let matrix = matrix(vec![
            vec![(1.0, 1.0), (0.0, 0.0)],
            vec![(0.0, 2.0), (1.0, 0.0)],
        ]);
        assert!(Indifference::solve(&matrix).unwrap_err() == MixedError::Dominated(Player::One));
    }

    #[test]
    fn non_square_games_are_rejected() {
        let matrix = matrix(vec![vec![(1.0, 1.0), (0.0, 0.0), (2.0, 2.0)]]);
        assert!(Indifference::solve(&matrix).unwrap_err() == MixedError::NotTwoByTwo);
    }
}
