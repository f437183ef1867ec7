use super::matrix::GameError;
use super::matrix::PayoffMatrix;
use crate::Payoff;
use crate::ZERO_SUM_LOWER;
use crate::ZERO_SUM_UPPER;
use rand::Rng;

/// Factory for the common 2x2 games offered by the game creator.
///
/// Parameter constraints follow the textbook definitions: a Prisoner's
/// Dilemma needs T > R > P > S and 2R > T + S, a Battle of the Sexes needs
/// a > b > 0, and so on. Violations fail construction with
/// [`GameError::InvalidParameter`] and leave nothing behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Template {
    PrisonersDilemma {
        t: Payoff,
        r: Payoff,
        p: Payoff,
        s: Payoff,
    },
    Coordination {
        a: Payoff,
        b: Payoff,
    },
    BattleOfSexes {
        a: Payoff,
        b: Payoff,
    },
    /// Player 1 payoffs in row-major order; player 2 gets their negation.
    /// `None` draws four values uniformly from the zero-sum range.
    ZeroSum {
        values: Option<[Payoff; 4]>,
    },
}

impl Template {
    pub fn build(&self) -> Result<PayoffMatrix, GameError> {
        match *self {
            Self::PrisonersDilemma { t, r, p, s } => {
                if !(t > r && r > p && p > s && 2.0 * r > t + s) {
                    return Err(GameError::InvalidParameter(
                        "prisoner's dilemma must satisfy T > R > P > S and 2R > T + S"
                            .to_string(),
                    ));
                }
                PayoffMatrix::new(vec![vec![(r, r), (s, t)], vec![(t, s), (p, p)]])
            }
            Self::Coordination { a, b } => {
                if a <= 0.0 || b <= 0.0 {
                    return Err(GameError::InvalidParameter(
                        "coordination parameters a and b must be positive".to_string(),
                    ));
                }
                PayoffMatrix::new(vec![
                    vec![(a, a), (0.0, 0.0)],
                    vec![(0.0, 0.0), (b, b)],
                ])
            }
            Self::BattleOfSexes { a, b } => {
                if !(a > b && b > 0.0) {
                    return Err(GameError::InvalidParameter(
                        "battle of the sexes must satisfy a > b > 0".to_string(),
                    ));
                }
                PayoffMatrix::new(vec![
                    vec![(a, b), (0.0, 0.0)],
                    vec![(0.0, 0.0), (b, a)],
                ])
            }
            Self::ZeroSum { values } => {
                let values = values.unwrap_or_else(|| {
                    let mut rng = rand::rng();
                    std::array::from_fn(|_| {
                        rng.random_range(ZERO_SUM_LOWER..=ZERO_SUM_UPPER) as Payoff
                    })
                });
                PayoffMatrix::new(vec![
                    vec![(values[0], -values[0]), (values[1], -values[1])],
                    vec![(values[2], -values[2]), (values[3], -values[3])],
                ])
            }
        }
    }

    /// Textbook defaults, as offered by the game creation form.
    pub fn prisoners_dilemma() -> Self {
        Self::PrisonersDilemma {
            t: 5.0,
            r: 3.0,
            p: 1.0,
            s: 0.0,
        }
    }
    pub fn coordination() -> Self {
        Self::Coordination { a: 5.0, b: 3.0 }
    }
    pub fn battle_of_sexes() -> Self {
        Self::BattleOfSexes { a: 3.0, b: 2.0 }
    }
}
