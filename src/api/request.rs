use crate::Payoff;
use crate::PayoffPair;
use crate::Probability;
use crate::game::GameError;
use crate::game::GameSpec;
use crate::game::Template;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Game creation payload, tagged by creation mode.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CreateGame {
    Template {
        game_type: String,
        #[serde(default)]
        params: BTreeMap<String, Payoff>,
    },
    Random {
        rows: usize,
        columns: usize,
        #[serde(default = "default_lower")]
        lower_limit: i64,
        #[serde(default = "default_upper")]
        upper_limit: i64,
    },
    Direct {
        payoff_matrix: Vec<Vec<PayoffPair>>,
    },
}

fn default_lower() -> i64 {
    crate::RANDOM_LOWER
}
fn default_upper() -> i64 {
    crate::RANDOM_UPPER
}

fn param(params: &BTreeMap<String, Payoff>, key: &str, default: Payoff) -> Payoff {
    params.get(key).copied().unwrap_or(default)
}

impl TryFrom<CreateGame> for GameSpec {
    type Error = GameError;
    fn try_from(request: CreateGame) -> Result<Self, Self::Error> {
        match request {
            CreateGame::Template { game_type, params } => {
                let template = match game_type.as_str() {
                    "prisoners_dilemma" => Template::PrisonersDilemma {
                        t: param(&params, "t", 5.0),
                        r: param(&params, "r", 3.0),
                        p: param(&params, "p", 1.0),
                        s: param(&params, "s", 0.0),
                    },
                    "coordination" => Template::Coordination {
                        a: param(&params, "a", 5.0),
                        b: param(&params, "b", 3.0),
                    },
                    "battle_of_sexes" => Template::BattleOfSexes {
                        a: param(&params, "a", 3.0),
                        b: param(&params, "b", 2.0),
                    },
                    "zero_sum" => Template::ZeroSum { values: None },
                    unknown => {
                        return Err(GameError::InvalidParameter(format!(
                            "unknown game type: {}",
                            unknown
                        )));
                    }
                };
                Ok(GameSpec::Template(template))
            }
            CreateGame::Random {
                rows,
                columns,
                lower_limit,
                upper_limit,
            } => Ok(GameSpec::Random {
                rows,
                columns,
                lower_limit,
                upper_limit,
            }),
            CreateGame::Direct { payoff_matrix } => Ok(GameSpec::Direct {
                matrix: payoff_matrix,
            }),
        }
    }
}

/// Strategy profile for expected payoff calculation. Probabilities are
/// `[0, 1]` fractions, never percentages.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpectedPayoffsRequest {
    pub p1_strategy: Vec<Probability>,
    pub p2_strategy: Vec<Probability>,
}

/// Query flags for the analyze endpoint; both default to true.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeQuery {
    pub find_pure: Option<bool>,
    pub find_mixed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_request_parses_with_defaults() {
        let json = serde_json::json!({
            "mode": "template",
            "game_type": "prisoners_dilemma",
        });
        let request: CreateGame = serde_json::from_value(json).unwrap();
        let spec = GameSpec::try_from(request).unwrap();
        assert!(spec == GameSpec::Template(Template::prisoners_dilemma()));
    }

    #[test]
    fn template_request_overrides_params() {
        let json = serde_json::json!({
            "mode": "template",
            "game_type": "battle_of_sexes",
            "params": { "a": 7.0, "b": 1.0 },
        });
        let request: CreateGame = serde_json::from_value(json).unwrap();
        let spec = GameSpec::try_from(request).unwrap();
        assert!(spec == GameSpec::Template(Template::BattleOfSexes { a: 7.0, b: 1.0 }));
    }

    #[test]
    fn unknown_game_type_is_rejected() {
        let json = serde_json::json!({
            "mode": "template",
            "game_type": "rock_paper_scissors",
        });
        let request: CreateGame = serde_json::from_value(json).unwrap();
        assert!(matches!(
            GameSpec::try_from(request),
            Err(GameError::InvalidParameter(_))
        ));
    }

    #[test]
    fn random_request_fills_default_bounds() {
        let json = serde_json::json!({
            "mode": "random",
            "rows": 3,
            "columns": 2,
        });
        let request: CreateGame = serde_json::from_value(json).unwrap();
        let spec = GameSpec::try_from(request).unwrap();
        assert!(
            spec == GameSpec::Random {
                rows: 3,
                columns: 2,
                lower_limit: crate::RANDOM_LOWER,
                upper_limit: crate::RANDOM_UPPER,
            }
        );
    }

    #[test]
    fn direct_request_carries_the_grid() {
        let json = serde_json::json!({
            "mode": "direct",
            "payoff_matrix": [[[1.0, 2.0]], [[3.0, 4.0]]],
        });
        let request: CreateGame = serde_json::from_value(json).unwrap();
        let spec = GameSpec::try_from(request).unwrap();
        assert!(
            spec == GameSpec::Direct {
                matrix: vec![vec![(1.0, 2.0)], vec![(3.0, 4.0)]],
            }
        );
    }
}
