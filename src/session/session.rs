use super::status::Status;
use crate::Epoch;
use crate::GameId;
use crate::Player;
use crate::Probability;
use crate::analysis::Calculator;
use crate::analysis::Coordinate;
use crate::analysis::Detector;
use crate::analysis::ExpectedPayoffs;
use crate::analysis::MixedError;
use crate::analysis::MixedNash;
use crate::game::GameError;
use crate::game::PayoffMatrix;
use crate::service::AnalysisReport;
use crate::service::AnalyzeOptions;
use crate::service::ClientError;
use crate::service::GameClient;
use crate::strategy::Strategy;
use crate::strategy::StrategyError;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::sync::Arc;

/// Errors surfaced by session operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    NotReady,
    Game(GameError),
    Strategy(StrategyError),
    Client(ClientError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReady => write!(f, "no game loaded"),
            Self::Game(e) => write!(f, "{}", e),
            Self::Strategy(e) => write!(f, "{}", e),
            Self::Client(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<GameError> for SessionError {
    fn from(e: GameError) -> Self {
        Self::Game(e)
    }
}
impl From<StrategyError> for SessionError {
    fn from(e: StrategyError) -> Self {
        Self::Strategy(e)
    }
}
impl From<ClientError> for SessionError {
    fn from(e: ClientError) -> Self {
        Self::Client(e)
    }
}

/// A loaded matrix and its pure-equilibrium set.
///
/// Cache entries are never mutated after insertion, so shared `Arc` reads
/// are safe without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedGame {
    pub matrix: PayoffMatrix,
    pub equilibria: BTreeSet<Coordinate>,
}

/// The game currently under exploration.
#[derive(Debug)]
struct Active {
    id: GameId,
    game: Arc<CachedGame>,
    p1: Strategy,
    p2: Strategy,
    payoffs: Option<ExpectedPayoffs>,
    mixed: Option<Result<MixedNash, MixedError>>,
}

/// Stateful orchestrator for one user's exploration of a game.
///
/// Owns the append-only per-game cache, the two live strategy vectors, and
/// the last computed expected payoffs. All mutation flows through the
/// operations here; the presentation layer only reads projections.
///
/// A session has a single logical owner; the hosting environment is
/// expected to serialize calls. External fetches are the only suspending
/// operations, and their responses are matched against the session epoch:
/// every `load` bumps the epoch, and a response tagged with an older epoch
/// is discarded silently. That is the whole cancellation story, and it is
/// enough to keep a slow response for game A from clobbering game B.
pub struct GameSession {
    client: Arc<dyn GameClient>,
    cache: HashMap<GameId, Arc<CachedGame>>,
    active: Option<Active>,
    epoch: Epoch,
    status: Status,
    error: Option<String>,
}

impl GameSession {
    pub fn new(client: Arc<dyn GameClient>) -> Self {
        Self {
            client,
            cache: HashMap::new(),
            active: None,
            epoch: 0,
            status: Status::Empty,
            error: None,
        }
    }

    /// Make `id` the active game.
    ///
    /// A cached game is reinstalled without refetching or recomputing its
    /// equilibria; only the strategy vectors are reset. A cache miss goes
    /// through the client, and a fetch failure leaves the previous state
    /// usable and retryable.
    pub async fn load(&mut self, id: GameId) -> Result<(), SessionError> {
        if let Some(game) = self.cache.get(&id).cloned() {
            // still supersedes any in-flight fetch
            self.epoch += 1;
            log::debug!("cache hit for game {}", id);
            self.install(id, game);
            return Ok(());
        }
        let epoch = self.begin_load();
        let client = Arc::clone(&self.client);
        let fetched = client.fetch_game(&id).await;
        self.finish_load(epoch, id, fetched)
    }

    /// Start a load: bump the epoch and return the tag the eventual
    /// response must carry.
    pub fn begin_load(&mut self) -> Epoch {
        self.epoch += 1;
        self.status = Status::Loading;
        self.error = None;
        self.epoch
    }

    /// Apply a fetch response, unless a newer load superseded it.
    pub fn finish_load(
        &mut self,
        epoch: Epoch,
        id: GameId,
        fetched: Result<PayoffMatrix, ClientError>,
    ) -> Result<(), SessionError> {
        if epoch != self.epoch {
            log::debug!("discarding stale load of game {}", id);
            return Ok(());
        }
        match fetched {
            Ok(matrix) => {
                let equilibria = Detector::equilibria(&matrix);
                let game = Arc::new(CachedGame { matrix, equilibria });
                self.cache.insert(id.clone(), Arc::clone(&game));
                self.install(id, game);
                Ok(())
            }
            Err(e) => {
                self.status = match self.active {
                    Some(_) => Status::Ready,
                    None => Status::Empty,
                };
                self.error = Some(e.to_string());
                log::warn!("load of game {} failed: {}", id, e);
                Err(SessionError::Client(e))
            }
        }
    }

    fn install(&mut self, id: GameId, game: Arc<CachedGame>) {
        let p1 = Strategy::uniform(game.matrix.rows());
        let p2 = Strategy::uniform(game.matrix.columns());
        log::info!(
            "game {} ready: {}x{}, {} pure equilibria",
            id,
            game.matrix.rows(),
            game.matrix.columns(),
            game.equilibria.len()
        );
        self.active = Some(Active {
            id,
            game,
            p1,
            p2,
            payoffs: None,
            mixed: None,
        });
        self.status = Status::Ready;
        self.error = None;
    }

    /// The active game, but only while the session is `Ready`. During a
    /// load window the active game is already superseded, so edits are
    /// rejected rather than landing on it.
    fn ready(&mut self) -> Result<&mut Active, SessionError> {
        if self.status != Status::Ready {
            return Err(SessionError::NotReady);
        }
        self.active.as_mut().ok_or(SessionError::NotReady)
    }

    /// Move one slider. Does not recompute payoffs; recalculation stays an
    /// explicit step so the expensive path is decoupled from every tick.
    pub fn update_strategy(
        &mut self,
        player: Player,
        index: usize,
        value: Probability,
    ) -> Result<(), SessionError> {
        let active = self.ready()?;
        let vector = match player {
            Player::One => &mut active.p1,
            Player::Two => &mut active.p2,
        };
        vector.set(index, value)?;
        Ok(())
    }

    /// Compute and store expected payoffs for the current profile.
    ///
    /// A dimension mismatch is structurally impossible given the install
    /// invariants, but it is checked and reported rather than corrupting
    /// strategy state.
    pub fn recompute_expected_payoffs(&mut self) -> Result<ExpectedPayoffs, SessionError> {
        let active = self.ready()?;
        let payoffs = Calculator::expected(&active.game.matrix, &active.p1, &active.p2)?;
        active.payoffs = Some(payoffs);
        Ok(payoffs)
    }

    /// Both vectors back to uniform; the stored payoffs no longer describe
    /// the profile, so they are cleared.
    pub fn reset_strategies(&mut self) -> Result<(), SessionError> {
        let active = self.ready()?;
        active.p1 = Strategy::uniform(active.game.matrix.rows());
        active.p2 = Strategy::uniform(active.game.matrix.columns());
        active.payoffs = None;
        Ok(())
    }

    /// Ask the analysis service for the mixed equilibrium of the active
    /// game. Epoch-guarded like `load`.
    pub async fn request_analysis(&mut self) -> Result<(), SessionError> {
        let id = self.ready()?.id.clone();
        let epoch = self.epoch;
        let client = Arc::clone(&self.client);
        let report = client.analyze(&id, AnalyzeOptions::default()).await;
        self.finish_analysis(epoch, id, report)
    }

    /// Apply an analysis response, unless a newer load superseded it.
    pub fn finish_analysis(
        &mut self,
        epoch: Epoch,
        id: GameId,
        report: Result<AnalysisReport, ClientError>,
    ) -> Result<(), SessionError> {
        if epoch != self.epoch {
            log::debug!("discarding stale analysis of game {}", id);
            return Ok(());
        }
        match report {
            Ok(report) => {
                let active = self.active.as_mut().ok_or(SessionError::NotReady)?;
                // the service's pure set is informational; ours is authoritative
                if let Some(pure) = &report.pure {
                    if *pure != active.game.equilibria {
                        log::warn!("analysis service disagrees on pure equilibria for game {}", id);
                    }
                }
                active.mixed = report.mixed;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(SessionError::Client(e))
            }
        }
    }

    // read-only projections for the presentation layer

    pub fn status(&self) -> Status {
        self.status
    }
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
    pub fn game_id(&self) -> Option<&GameId> {
        self.active.as_ref().map(|active| &active.id)
    }
    pub fn matrix(&self) -> Option<&PayoffMatrix> {
        self.active.as_ref().map(|active| &active.game.matrix)
    }
    pub fn equilibria(&self) -> Option<&BTreeSet<Coordinate>> {
        self.active.as_ref().map(|active| &active.game.equilibria)
    }
    pub fn strategy(&self, player: Player) -> Option<&Strategy> {
        self.active.as_ref().map(|active| match player {
            Player::One => &active.p1,
            Player::Two => &active.p2,
        })
    }
    pub fn expected_payoffs(&self) -> Option<ExpectedPayoffs> {
        self.active.as_ref().and_then(|active| active.payoffs)
    }
    pub fn mixed(&self) -> Option<&Result<MixedNash, MixedError>> {
        self.active.as_ref().and_then(|active| active.mixed.as_ref())
    }
}
