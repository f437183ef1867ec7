use crate::GameId;
use crate::Payoff;
use crate::PayoffPair;
use crate::Probability;
use crate::analysis::Coordinate;
use crate::analysis::Indifference;
use crate::analysis::MixedError;
use crate::analysis::MixedNash;
use crate::game::PayoffMatrix;
use crate::service::AnalysisReport;
use serde::{Deserialize, Serialize};

/// Full JSON projection of a stored game.
#[derive(Debug, Serialize, Deserialize)]
pub struct GameView {
    pub rows: usize,
    pub columns: usize,
    pub payoff_matrix: Vec<Vec<PayoffPair>>,
    pub p1_strategies: Vec<String>,
    pub p2_strategies: Vec<String>,
    pub nash_equilibria: Vec<(usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixed_strategy: Option<MixedView>,
}

impl GameView {
    pub fn project(matrix: &PayoffMatrix) -> Self {
        let equilibria = crate::analysis::Detector::equilibria(matrix);
        let mixed_strategy = (matrix.rows() == 2 && matrix.columns() == 2).then(|| {
            let solved = if equilibria.is_empty() {
                Indifference::solve(matrix)
            } else {
                Err(MixedError::PureExists)
            };
            MixedView::from(solved)
        });
        Self {
            rows: matrix.rows(),
            columns: matrix.columns(),
            payoff_matrix: matrix.cells().to_vec(),
            p1_strategies: (1..=matrix.rows()).map(|i| format!("A{}", i)).collect(),
            p2_strategies: (1..=matrix.columns()).map(|i| format!("B{}", i)).collect(),
            nash_equilibria: equilibria.iter().map(|&Coordinate(r, c)| (r, c)).collect(),
            mixed_strategy,
        }
    }
}

/// Outcome of the 2x2 indifference solver: strategies on success, a
/// displayable message otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixedView {
    pub p1_strategy: Option<Vec<Probability>>,
    pub p2_strategy: Option<Vec<Probability>>,
    pub error: Option<String>,
}

impl From<Result<MixedNash, MixedError>> for MixedView {
    fn from(result: Result<MixedNash, MixedError>) -> Self {
        match result {
            Ok(nash) => Self {
                p1_strategy: Some(nash.p1.to_vec()),
                p2_strategy: Some(nash.p2.to_vec()),
                error: None,
            },
            Err(e) => Self {
                p1_strategy: None,
                p2_strategy: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedGame {
    pub game_id: GameId,
    pub game: GameView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pure_nash: Option<Vec<(usize, usize)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixed_nash: Option<MixedView>,
}

impl From<AnalysisReport> for AnalysisView {
    fn from(report: AnalysisReport) -> Self {
        Self {
            pure_nash: report
                .pure
                .map(|set| set.iter().map(|&Coordinate(r, c)| (r, c)).collect()),
            mixed_nash: report.mixed.map(MixedView::from),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpectedPayoffsView {
    pub expected_payoffs: [Payoff; 2],
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BeliefsView {
    pub beliefs: [Vec<Probability>; 2],
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorView {
    pub error: String,
}

impl ErrorView {
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_includes_equilibria_and_names() {
        let matrix = PayoffMatrix::new(vec![
            vec![(3.0, 3.0), (0.0, 5.0)],
            vec![(5.0, 0.0), (1.0, 1.0)],
        ])
        .unwrap();
        let view = GameView::project(&matrix);
        assert!(view.rows == 2 && view.columns == 2);
        assert!(view.p1_strategies == vec!["A1", "A2"]);
        assert!(view.p2_strategies == vec!["B1", "B2"]);
        assert!(view.nash_equilibria == vec![(1, 1)]);
        let mixed = view.mixed_strategy.unwrap();
        assert!(mixed.p1_strategy.is_none());
        assert!(mixed.error.is_some());
    }

    #[test]
    fn projection_solves_mixed_without_pure() {
        let matrix = PayoffMatrix::new(vec![
            vec![(1.0, -1.0), (-1.0, 1.0)],
            vec![(-1.0, 1.0), (1.0, -1.0)],
        ])
        .unwrap();
        let view = GameView::project(&matrix);
        assert!(view.nash_equilibria.is_empty());
        let mixed = view.mixed_strategy.unwrap();
        assert!(mixed.p1_strategy == Some(vec![0.5, 0.5]));
        assert!(mixed.error.is_none());
    }

    #[test]
    fn large_games_skip_mixed_analysis() {
        let matrix = PayoffMatrix::new(vec![vec![(1.0, 1.0); 3]; 3]).unwrap();
        let view = GameView::project(&matrix);
        assert!(view.mixed_strategy.is_none());
    }
}
