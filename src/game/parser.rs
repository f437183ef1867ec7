use super::matrix::PayoffMatrix;
use super::spec::GameSpec;
use super::template::Template;
use crate::Payoff;
use crate::PayoffPair;
use crate::Player;
use crate::RANDOM_LOWER;
use crate::RANDOM_UPPER;
use std::collections::BTreeMap;

/// Errors from reading a game definition file.
///
/// Line numbers are 1-based and refer to the source text, not to the
/// logical section, so a message can be matched against the file directly.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    MissingGameType,
    UnknownGameType(String),
    MissingPayoffs,
    MissingStrategies,
    InvalidStrategies { line: usize },
    UnknownKey { line: usize, key: String },
    InvalidParam { line: usize },
    MalformedPair { line: usize, arity: usize },
    InvalidPair { line: usize },
    UnexpectedContent { line: usize },
    ZeroSumValues { actual: usize },
    StrategyNames { player: Player, expected: usize, actual: usize },
    Game(super::matrix::GameError),
    Io(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingGameType => write!(f, "game_type is required"),
            Self::UnknownGameType(s) => write!(f, "unknown game type: {}", s),
            Self::MissingPayoffs => {
                write!(f, "payoffs section is required for custom games")
            }
            Self::MissingStrategies => {
                write!(f, "strategies is required for random games")
            }
            Self::InvalidStrategies { line } => write!(
                f,
                "line {}: invalid strategies format, expected 'rows columns'",
                line
            ),
            Self::UnknownKey { line, key } => {
                write!(f, "line {}: unknown key '{}'", line, key)
            }
            Self::InvalidParam { line } => {
                write!(f, "line {}: parameter values must be numeric", line)
            }
            Self::MalformedPair { line, arity } => write!(
                f,
                "line {}: payoff pairs must have exactly 2 elements, found {}",
                line, arity
            ),
            Self::InvalidPair { line } => write!(
                f,
                "line {}: no valid payoff pairs found, expected (p1, p2)",
                line
            ),
            Self::UnexpectedContent { line } => {
                write!(f, "line {}: unexpected content outside of a section", line)
            }
            Self::ZeroSumValues { actual } => write!(
                f,
                "zero-sum values must list exactly 4 payoffs, found {}",
                actual
            ),
            Self::StrategyNames {
                player,
                expected,
                actual,
            } => write!(
                f,
                "{} has {} strategy names, expected {}",
                player, actual, expected
            ),
            Self::Game(e) => write!(f, "{}", e),
            Self::Io(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<super::matrix::GameError> for ParseError {
    fn from(e: super::matrix::GameError) -> Self {
        Self::Game(e)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Param {
    Number(Payoff),
    List(Vec<Payoff>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Params,
    Payoffs,
}

/// A parsed game definition file: the creation spec plus the optional
/// presentation metadata the format carries.
///
/// The format is line-oriented. `#` starts a comment, top-level keys sit
/// at column zero as `KEY: value`, and the `PARAMS` and `PAYOFFS` sections
/// hold indented content. Keys are case-insensitive. Payoff rows list
/// `(p1, p2)` pairs with integer payoffs, one matrix row per line.
///
/// ```text
/// # Prisoner's Dilemma
/// GAME_TYPE: prisoners_dilemma
/// PARAMS:
///   t: 5
///   r: 3
/// NAME: Classic dilemma
/// PLAYER1_STRATEGIES: Cooperate, Defect
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameFile {
    pub spec: GameSpec,
    pub name: Option<String>,
    pub description: Option<String>,
    pub p1_strategies: Option<Vec<String>>,
    pub p2_strategies: Option<Vec<String>>,
}

impl GameFile {
    pub fn load(path: &std::path::Path) -> Result<Self, ParseError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ParseError::Io(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut game_type = None;
        let mut strategies = None;
        let mut params = BTreeMap::new();
        let mut payoffs: Vec<Vec<PayoffPair>> = Vec::new();
        let mut p1_strategies = None;
        let mut p2_strategies = None;
        let mut name = None;
        let mut description = None;
        let mut section = Section::None;

        for (number, raw) in content.lines().enumerate().map(|(i, l)| (i + 1, l)) {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let indented = raw.starts_with(' ') || raw.starts_with('\t');
            if !indented && line.contains(':') {
                let (key, value) = line.split_once(':').unwrap_or((line, ""));
                let key = key.trim().to_lowercase();
                let value = Self::uncommented(value);
                match key.as_str() {
                    "game_type" => {
                        game_type = Some(value.to_string());
                        section = Section::None;
                    }
                    "strategies" => {
                        let mut dims = value.split_whitespace().map(str::parse::<usize>);
                        strategies = match (dims.next(), dims.next(), dims.next()) {
                            (Some(Ok(rows)), Some(Ok(columns)), None) => Some((rows, columns)),
                            _ => return Err(ParseError::InvalidStrategies { line: number }),
                        };
                        section = Section::None;
                    }
                    "params" => section = Section::Params,
                    "payoffs" => section = Section::Payoffs,
                    "player1_strategies" => {
                        p1_strategies = Some(Self::names(value));
                        section = Section::None;
                    }
                    "player2_strategies" => {
                        p2_strategies = Some(Self::names(value));
                        section = Section::None;
                    }
                    "name" => {
                        name = Some(value.to_string());
                        section = Section::None;
                    }
                    "description" => {
                        description = Some(value.to_string());
                        section = Section::None;
                    }
                    _ => return Err(ParseError::UnknownKey { line: number, key }),
                }
            } else if section == Section::Params && line.contains(':') {
                let (key, value) = line.split_once(':').unwrap_or((line, ""));
                let key = key.trim().to_lowercase();
                let value = Self::uncommented(value);
                params.insert(key, Self::parameter(value, number)?);
            } else if section == Section::Payoffs {
                payoffs.push(Self::pairs(line, number)?);
            } else {
                return Err(ParseError::UnexpectedContent { line: number });
            }
        }

        let spec = Self::spec(game_type, strategies, &params, payoffs)?;
        let (rows, columns) = Self::dimensions(&spec);
        if let Some(names) = &p1_strategies {
            if names.len() != rows {
                return Err(ParseError::StrategyNames {
                    player: Player::One,
                    expected: rows,
                    actual: names.len(),
                });
            }
        }
        if let Some(names) = &p2_strategies {
            if names.len() != columns {
                return Err(ParseError::StrategyNames {
                    player: Player::Two,
                    expected: columns,
                    actual: names.len(),
                });
            }
        }
        Ok(Self {
            spec,
            name,
            description,
            p1_strategies,
            p2_strategies,
        })
    }

    /// Build the matrix described by the file.
    pub fn build(&self) -> Result<PayoffMatrix, super::matrix::GameError> {
        self.spec.build()
    }

    fn uncommented(value: &str) -> &str {
        match value.find('#') {
            Some(i) => value[..i].trim(),
            None => value.trim(),
        }
    }

    fn names(value: &str) -> Vec<String> {
        value.split(',').map(|s| s.trim().to_string()).collect()
    }

    fn parameter(value: &str, number: usize) -> Result<Param, ParseError> {
        if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
            let inner = inner.trim();
            if inner.is_empty() {
                return Ok(Param::List(Vec::new()));
            }
            inner
                .split(',')
                .map(|item| {
                    item.trim()
                        .parse::<Payoff>()
                        .map_err(|_| ParseError::InvalidParam { line: number })
                })
                .collect::<Result<Vec<Payoff>, ParseError>>()
                .map(Param::List)
        } else {
            value
                .parse::<Payoff>()
                .map(Param::Number)
                .map_err(|_| ParseError::InvalidParam { line: number })
        }
    }

    /// One matrix row: every `(p1, p2)` pair on the line, integer payoffs.
    fn pairs(line: &str, number: usize) -> Result<Vec<PayoffPair>, ParseError> {
        let mut pairs = Vec::new();
        let mut rest = line;
        while let Some(open) = rest.find('(') {
            let close = match rest[open..].find(')') {
                Some(i) => open + i,
                None => return Err(ParseError::InvalidPair { line: number }),
            };
            let entries: Vec<&str> = rest[open + 1..close].split(',').map(str::trim).collect();
            if entries.len() != 2 {
                return Err(ParseError::MalformedPair {
                    line: number,
                    arity: entries.len(),
                });
            }
            let u1 = entries[0]
                .parse::<i64>()
                .map_err(|_| ParseError::InvalidPair { line: number })?;
            let u2 = entries[1]
                .parse::<i64>()
                .map_err(|_| ParseError::InvalidPair { line: number })?;
            pairs.push((u1 as Payoff, u2 as Payoff));
            rest = &rest[close + 1..];
        }
        if pairs.is_empty() {
            return Err(ParseError::InvalidPair { line: number });
        }
        Ok(pairs)
    }

    fn number(params: &BTreeMap<String, Param>, key: &str, default: Payoff) -> Payoff {
        match params.get(key) {
            Some(Param::Number(v)) => *v,
            _ => default,
        }
    }

    fn spec(
        game_type: Option<String>,
        strategies: Option<(usize, usize)>,
        params: &BTreeMap<String, Param>,
        payoffs: Vec<Vec<PayoffPair>>,
    ) -> Result<GameSpec, ParseError> {
        let game_type = game_type.ok_or(ParseError::MissingGameType)?;
        match game_type.to_lowercase().replace(' ', "_").as_str() {
            "prisoners_dilemma" => Ok(GameSpec::Template(Template::PrisonersDilemma {
                t: Self::number(params, "t", 5.0),
                r: Self::number(params, "r", 3.0),
                p: Self::number(params, "p", 1.0),
                s: Self::number(params, "s", 0.0),
            })),
            "coordination" => Ok(GameSpec::Template(Template::Coordination {
                a: Self::number(params, "a", 5.0),
                b: Self::number(params, "b", 3.0),
            })),
            "battle_of_sexes" => Ok(GameSpec::Template(Template::BattleOfSexes {
                a: Self::number(params, "a", 3.0),
                b: Self::number(params, "b", 2.0),
            })),
            "zero_sum" => {
                let values = match params.get("values") {
                    Some(Param::List(list)) if list.len() == 4 => {
                        Some([list[0], list[1], list[2], list[3]])
                    }
                    Some(Param::List(list)) => {
                        return Err(ParseError::ZeroSumValues { actual: list.len() });
                    }
                    _ => None,
                };
                Ok(GameSpec::Template(Template::ZeroSum { values }))
            }
            "custom" => {
                if payoffs.is_empty() {
                    return Err(ParseError::MissingPayoffs);
                }
                Ok(GameSpec::Direct { matrix: payoffs })
            }
            "random" => {
                let (rows, columns) = strategies.ok_or(ParseError::MissingStrategies)?;
                Ok(GameSpec::Random {
                    rows,
                    columns,
                    lower_limit: Self::number(params, "min_value", RANDOM_LOWER as Payoff) as i64,
                    upper_limit: Self::number(params, "max_value", RANDOM_UPPER as Payoff) as i64,
                })
            }
            _ => Err(ParseError::UnknownGameType(game_type)),
        }
    }

    fn dimensions(spec: &GameSpec) -> (usize, usize) {
        match spec {
            GameSpec::Template(_) => (2, 2),
            GameSpec::Random { rows, columns, .. } => (*rows, *columns),
            GameSpec::Direct { matrix } => {
                (matrix.len(), matrix.first().map_or(0, Vec::len))
            }
        }
    }
}
