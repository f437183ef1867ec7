use super::client::AnalysisReport;
use super::client::AnalyzeOptions;
use super::client::ClientError;
use super::client::GameClient;
use crate::GameId;
use crate::analysis::Detector;
use crate::analysis::Indifference;
use crate::analysis::MixedError;
use crate::game::GameError;
use crate::game::GameFile;
use crate::game::GameSpec;
use crate::game::ParseError;
use crate::game::PayoffMatrix;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use tokio::sync::RwLock;

/// In-process game service: stores created games and answers analysis
/// queries. Backs both the HTTP API and in-process sessions.
pub struct GameManager {
    games: RwLock<HashMap<GameId, Arc<PayoffMatrix>>>,
    count: AtomicU64,
}

impl Default for GameManager {
    fn default() -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            count: AtomicU64::new(1),
        }
    }
}

impl GameManager {
    /// Build and store a game, returning its id. Ids are sequential
    /// decimal strings.
    pub async fn create(&self, spec: &GameSpec) -> Result<GameId, GameError> {
        let matrix = spec.build()?;
        let id = self.count.fetch_add(1, Ordering::Relaxed).to_string();
        self.games.write().await.insert(id.clone(), Arc::new(matrix));
        Ok(id).inspect(|id| log::info!("created game {}", id))
    }

    /// Parse a game definition file body and store the resulting game.
    pub async fn create_from_definition(&self, content: &str) -> Result<GameId, ParseError> {
        let file = GameFile::parse(content)?;
        Ok(self.create(&file.spec).await?)
    }

    pub async fn get(&self, id: &GameId) -> Result<Arc<PayoffMatrix>, ClientError> {
        self.games
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(id.clone()))
    }

    /// Pure equilibria, and for 2x2 games the mixed equilibrium. When pure
    /// equilibria exist the mixed solver is skipped and reported as
    /// unnecessary.
    pub async fn analyze(
        &self,
        id: &GameId,
        options: AnalyzeOptions,
    ) -> Result<AnalysisReport, ClientError> {
        let matrix = self.get(id).await?;
        let equilibria = Detector::equilibria(&matrix);
        let mixed = if options.find_mixed && matrix.rows() == 2 && matrix.columns() == 2 {
            if equilibria.is_empty() {
                Some(Indifference::solve(&matrix))
            } else {
                Some(Err(MixedError::PureExists))
            }
        } else {
            None
        };
        let pure = options.find_pure.then_some(equilibria);
        Ok(AnalysisReport { pure, mixed })
    }
}

#[async_trait]
impl GameClient for GameManager {
    async fn fetch_game(&self, id: &GameId) -> Result<PayoffMatrix, ClientError> {
        self.get(id).await.map(|matrix| (*matrix).clone())
    }
    async fn analyze(
        &self,
        id: &GameId,
        options: AnalyzeOptions,
    ) -> Result<AnalysisReport, ClientError> {
        GameManager::analyze(self, id, options).await
    }
    async fn create_game(&self, spec: &GameSpec) -> Result<GameId, ClientError> {
        self.create(spec)
            .await
            .map_err(|e| ClientError::Rejected(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Coordinate;
    use crate::game::Template;
    use std::collections::BTreeSet;

    #[tokio::test]
    async fn ids_are_sequential() {
        let manager = GameManager::default();
        let spec = GameSpec::Template(Template::prisoners_dilemma());
        assert!(manager.create(&spec).await.unwrap() == "1");
        assert!(manager.create(&spec).await.unwrap() == "2");
    }

    #[tokio::test]
    async fn invalid_spec_stores_nothing() {
        let manager = GameManager::default();
        let spec = GameSpec::Direct { matrix: vec![] };
        assert!(manager.create(&spec).await.is_err());
        assert!(manager.get(&"1".to_string()).await.is_err());
    }

    #[tokio::test]
    async fn analyze_reports_pure_over_mixed() {
        let manager = GameManager::default();
        let spec = GameSpec::Template(Template::prisoners_dilemma());
        let id = manager.create(&spec).await.unwrap();
        let report = manager.analyze(&id, AnalyzeOptions::default()).await.unwrap();
        assert!(report.pure == Some(BTreeSet::from([Coordinate(1, 1)])));
        assert!(report.mixed == Some(Err(MixedError::PureExists)));
    }

    #[tokio::test]
    async fn analyze_solves_mixed_when_no_pure_exists() {
        let manager = GameManager::default();
        let spec = GameSpec::Direct {
            matrix: vec![
                vec![(1.0, -1.0), (-1.0, 1.0)],
                vec![(-1.0, 1.0), (1.0, -1.0)],
            ],
        };
        let id = manager.create(&spec).await.unwrap();
        let report = manager.analyze(&id, AnalyzeOptions::default()).await.unwrap();
        assert!(report.pure.as_ref().unwrap().is_empty());
        let nash = report.mixed.unwrap().unwrap();
        assert!(nash.p1 == [0.5, 0.5]);
        assert!(nash.p2 == [0.5, 0.5]);
    }

    #[tokio::test]
    async fn analyze_options_are_honored() {
        let manager = GameManager::default();
        let spec = GameSpec::Template(Template::prisoners_dilemma());
        let id = manager.create(&spec).await.unwrap();
        let options = AnalyzeOptions {
            find_pure: false,
            find_mixed: false,
        };
        let report = manager.analyze(&id, options).await.unwrap();
        assert!(report.pure.is_none());
        assert!(report.mixed.is_none());
    }

    #[tokio::test]
    async fn definition_files_create_games() {
        let manager = GameManager::default();
        let id = manager
            .create_from_definition(
                "GAME_TYPE: custom\n\
                 PAYOFFS:\n\
                 \x20 (3, 3) (0, 5)\n\
                 \x20 (5, 0) (1, 1)\n",
            )
            .await
            .unwrap();
        let matrix = manager.get(&id).await.unwrap();
        assert!(matrix.cell(0, 1).unwrap() == (0.0, 5.0));
        // a valid parse with an invalid matrix still stores nothing
        let bad = manager
            .create_from_definition("GAME_TYPE: prisoners_dilemma\nPARAMS:\n\x20 t: 0\n")
            .await;
        assert!(matches!(bad, Err(ParseError::Game(_))));
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let manager = GameManager::default();
        assert!(matches!(
            manager.get(&"7".to_string()).await,
            Err(ClientError::NotFound(_))
        ));
    }
}
