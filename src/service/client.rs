use crate::GameId;
use crate::analysis::Coordinate;
use crate::analysis::MixedError;
use crate::analysis::MixedNash;
use crate::game::GameSpec;
use crate::game::PayoffMatrix;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Errors crossing the collaborator boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    NotFound(GameId),
    Transport(String),
    Rejected(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "game {} not found", id),
            Self::Transport(s) => write!(f, "transport failure: {}", s),
            Self::Rejected(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for ClientError {}

/// Which analyses to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    pub find_pure: bool,
    pub find_mixed: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            find_pure: true,
            find_mixed: true,
        }
    }
}

/// What the analysis service found.
///
/// `pure` is informational for sessions, which compute their own set.
/// `mixed` is `None` when mixed analysis was not requested or does not
/// apply (non-2x2 games).
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub pure: Option<BTreeSet<Coordinate>>,
    pub mixed: Option<Result<MixedNash, MixedError>>,
}

/// The external game service as seen by a session: retrieval, analysis,
/// and creation. Implementations may sit in-process or behind a wire.
#[async_trait]
pub trait GameClient: Send + Sync {
    async fn fetch_game(&self, id: &GameId) -> Result<PayoffMatrix, ClientError>;
    async fn analyze(
        &self,
        id: &GameId,
        options: AnalyzeOptions,
    ) -> Result<AnalysisReport, ClientError>;
    async fn create_game(&self, spec: &GameSpec) -> Result<GameId, ClientError>;
}
