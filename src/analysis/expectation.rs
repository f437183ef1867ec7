use crate::Payoff;
use crate::Player;
use crate::game::GameError;
use crate::game::PayoffMatrix;
use crate::strategy::Strategy;

/// Expected payoff pair for a strategy profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedPayoffs(pub Payoff, pub Payoff);

impl std::fmt::Display for ExpectedPayoffs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.0, self.1)
    }
}

/// Expected payoff calculation over mixed-strategy profiles.
pub struct Calculator;

impl Calculator {
    /// Bilinear form `E_k = sum_r sum_c p1[r] * p2[c] * matrix[r][c].k`.
    ///
    /// Vector lengths must match the matrix dimensions. The inputs are not
    /// required to sum to 1; the result is a true expectation only when
    /// both vectors are normalized, which is the caller's responsibility.
    pub fn expected(
        matrix: &PayoffMatrix,
        p1: &Strategy,
        p2: &Strategy,
    ) -> Result<ExpectedPayoffs, GameError> {
        if p1.len() != matrix.rows() {
            return Err(GameError::DimensionMismatch {
                player: Player::One,
                expected: matrix.rows(),
                actual: p1.len(),
            });
        }
        if p2.len() != matrix.columns() {
            return Err(GameError::DimensionMismatch {
                player: Player::Two,
                expected: matrix.columns(),
                actual: p2.len(),
            });
        }
        let mut e1 = 0.0;
        let mut e2 = 0.0;
        for r in 0..matrix.rows() {
            for (c, &(u1, u2)) in matrix.row(r).iter().enumerate() {
                let weight = p1[r] * p2[c];
                e1 += weight * u1;
                e2 += weight * u2;
            }
        }
        Ok(ExpectedPayoffs(e1, e2))
    }

    /// Expected payoff of each of `player`'s pure strategies against the
    /// opponent's beliefs. Useful for spotting best responses to a mixed
    /// strategy.
    pub fn against(
        matrix: &PayoffMatrix,
        player: Player,
        beliefs: &Strategy,
    ) -> Result<Vec<Payoff>, GameError> {
        match player {
            Player::One => {
                if beliefs.len() != matrix.columns() {
                    return Err(GameError::DimensionMismatch {
                        player: Player::Two,
                        expected: matrix.columns(),
                        actual: beliefs.len(),
                    });
                }
                Ok((0..matrix.rows())
                    .map(|r| {
                        matrix
                            .row(r)
                            .iter()
                            .enumerate()
                            .map(|(c, cell)| beliefs[c] * cell.0)
                            .sum()
                    })
                    .collect())
            }
            Player::Two => {
                if beliefs.len() != matrix.rows() {
                    return Err(GameError::DimensionMismatch {
                        player: Player::One,
                        expected: matrix.rows(),
                        actual: beliefs.len(),
                    });
                }
                Ok((0..matrix.columns())
                    .map(|c| {
                        (0..matrix.rows())
                            .map(|r| beliefs[r] * matrix.row(r)[c].1)
                            .sum()
                    })
                    .collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dilemma() -> PayoffMatrix {
        PayoffMatrix::new(vec![
            vec![(3.0, 3.0), (0.0, 5.0)],
            vec![(5.0, 0.0), (1.0, 1.0)],
        ])
        .unwrap()
    }

    #[test]
    fn degenerate_profile_reads_the_cell() {
        let matrix = dilemma();
        let p1 = Strategy::from(vec![1.0, 0.0]);
        let p2 = Strategy::from(vec![1.0, 0.0]);
        let payoffs = Calculator::expected(&matrix, &p1, &p2).unwrap();
        assert!(payoffs == ExpectedPayoffs(3.0, 3.0));
    }

    #[test]
    fn uniform_profile_averages_all_cells() {
        let matrix = dilemma();
        let p1 = Strategy::uniform(2);
        let p2 = Strategy::uniform(2);
        let ExpectedPayoffs(e1, e2) = Calculator::expected(&matrix, &p1, &p2).unwrap();
        assert!((e1 - 2.25).abs() < 1e-12);
        assert!((e2 - 2.25).abs() < 1e-12);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let matrix = dilemma();
        let short = Strategy::from(vec![1.0]);
        let ok = Strategy::uniform(2);
        assert!(matches!(
            Calculator::expected(&matrix, &short, &ok),
            Err(GameError::DimensionMismatch {
                player: Player::One,
                ..
            })
        ));
        assert!(matches!(
            Calculator::expected(&matrix, &ok, &short),
            Err(GameError::DimensionMismatch {
                player: Player::Two,
                ..
            })
        ));
    }

    #[test]
    fn per_strategy_payoffs_against_beliefs() {
        let matrix = dilemma();
        let beliefs = Strategy::uniform(2);
        let rows = Calculator::against(&matrix, Player::One, &beliefs).unwrap();
        assert!((rows[0] - 1.5).abs() < 1e-12);
        assert!((rows[1] - 3.0).abs() < 1e-12);
        let cols = Calculator::against(&matrix, Player::Two, &beliefs).unwrap();
        assert!((cols[0] - 1.5).abs() < 1e-12);
        assert!((cols[1] - 3.0).abs() < 1e-12);
    }
}
