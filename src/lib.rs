//! Interactive exploration of two-player normal-form games.
//!
//! The core is a mixed-strategy session engine: validated payoff matrices,
//! self-normalizing strategy vectors, pure Nash equilibrium detection, and
//! expected payoff calculation, orchestrated by an epoch-guarded
//! [`session::GameSession`]. Game storage and mixed-equilibrium analysis sit
//! behind the [`service::GameClient`] seam and are served over HTTP by
//! [`api::Server`].

pub mod analysis;
pub mod api;
pub mod game;
pub mod service;
pub mod session;
pub mod strategy;

/// Payoff values in the game grid.
pub type Payoff = f64;
/// Strategy weights and belief probabilities.
pub type Probability = f64;
/// A (player 1, player 2) payoff pair for one cell.
pub type PayoffPair = (Payoff, Payoff);
/// Monotonic load counter used to discard stale async responses.
pub type Epoch = u64;
/// Opaque game identifier issued by the game service.
pub type GameId = String;

/// Tolerance for sum-to-one checks on probability vectors.
pub const TOLERANCE: f64 = 1e-9;
/// Default payoff bounds for randomly generated games.
pub const RANDOM_LOWER: i64 = -99;
pub const RANDOM_UPPER: i64 = 99;
/// Payoff bounds for randomized zero-sum templates.
pub const ZERO_SUM_LOWER: i64 = -5;
pub const ZERO_SUM_UPPER: i64 = 5;

/// One of the two players. Player 1 picks rows, player 2 picks columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Player {
    One,
    Two,
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "player 1"),
            Self::Two => write!(f, "player 2"),
        }
    }
}

/// Initialize logging: INFO to the terminal, DEBUG to a timestamped file
/// under `logs/`.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves forward")
        .as_secs();
    let file = std::fs::File::create(format!("logs/{}.log", stamp)).expect("create log file");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::CombinedLogger::init(vec![
        simplelog::TermLogger::new(
            log::LevelFilter::Info,
            config.clone(),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        ),
        simplelog::WriteLogger::new(log::LevelFilter::Debug, config, file),
    ])
    .expect("initialize logger");
}
