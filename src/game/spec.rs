use super::matrix::GameError;
use super::matrix::PayoffMatrix;
use super::template::Template;
use crate::Payoff;
use crate::PayoffPair;
use rand::Rng;

/// What kind of game to create, as accepted by the game service.
#[derive(Debug, Clone, PartialEq)]
pub enum GameSpec {
    /// A named 2x2 game with validated parameters.
    Template(Template),
    /// Integer payoffs drawn uniformly from `[lower_limit, upper_limit]`.
    Random {
        rows: usize,
        columns: usize,
        lower_limit: i64,
        upper_limit: i64,
    },
    /// Caller-supplied grid, validated like any other matrix.
    Direct { matrix: Vec<Vec<PayoffPair>> },
}

impl GameSpec {
    pub fn build(&self) -> Result<PayoffMatrix, GameError> {
        match self {
            Self::Template(template) => template.build(),
            Self::Random {
                rows,
                columns,
                lower_limit,
                upper_limit,
            } => {
                if *rows == 0 || *columns == 0 {
                    return Err(GameError::InvalidParameter(
                        "random game needs at least one row and one column".to_string(),
                    ));
                }
                if lower_limit > upper_limit {
                    return Err(GameError::InvalidParameter(format!(
                        "lower limit {} exceeds upper limit {}",
                        lower_limit, upper_limit
                    )));
                }
                let mut rng = rand::rng();
                let grid = (0..*rows)
                    .map(|_| {
                        (0..*columns)
                            .map(|_| {
                                (
                                    rng.random_range(*lower_limit..=*upper_limit) as Payoff,
                                    rng.random_range(*lower_limit..=*upper_limit) as Payoff,
                                )
                            })
                            .collect()
                    })
                    .collect();
                PayoffMatrix::new(grid)
            }
            Self::Direct { matrix } => PayoffMatrix::new(matrix.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RANDOM_LOWER;
    use crate::RANDOM_UPPER;

    #[test]
    fn random_spec_respects_bounds() {
        let spec = GameSpec::Random {
            rows: 3,
            columns: 4,
            lower_limit: RANDOM_LOWER,
            upper_limit: RANDOM_UPPER,
        };
        let matrix = spec.build().unwrap();
        assert!(matrix.rows() == 3);
        assert!(matrix.columns() == 4);
        for r in 0..matrix.rows() {
            for &(u1, u2) in matrix.row(r) {
                assert!((RANDOM_LOWER as Payoff..=RANDOM_UPPER as Payoff).contains(&u1));
                assert!((RANDOM_LOWER as Payoff..=RANDOM_UPPER as Payoff).contains(&u2));
            }
        }
    }

    #[test]
    fn random_spec_rejects_inverted_bounds() {
        let spec = GameSpec::Random {
            rows: 2,
            columns: 2,
            lower_limit: 5,
            upper_limit: -5,
        };
        assert!(matches!(
            spec.build(),
            Err(GameError::InvalidParameter(_))
        ));
    }

    #[test]
    fn random_spec_rejects_degenerate_dimensions() {
        let spec = GameSpec::Random {
            rows: 0,
            columns: 2,
            lower_limit: 0,
            upper_limit: 1,
        };
        assert!(matches!(
            spec.build(),
            Err(GameError::InvalidParameter(_))
        ));
    }

    #[test]
    fn direct_spec_validates_shape() {
        let spec = GameSpec::Direct {
            matrix: vec![vec![(1.0, 2.0)], vec![(3.0, 4.0), (5.0, 6.0)]],
        };
        assert!(matches!(spec.build(), Err(GameError::InvalidShape(_))));
    }
}
