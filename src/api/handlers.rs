use super::request::AnalyzeQuery;
use super::request::CreateGame;
use super::request::ExpectedPayoffsRequest;
use super::response::AnalysisView;
use super::response::BeliefsView;
use super::response::CreatedGame;
use super::response::ErrorView;
use super::response::ExpectedPayoffsView;
use super::response::GameView;
use crate::GameId;
use crate::analysis::Calculator;
use crate::analysis::ExpectedPayoffs;
use crate::game::GameSpec;
use crate::service::AnalyzeOptions;
use crate::service::ClientError;
use crate::service::GameManager;
use crate::strategy::Strategy;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

pub async fn create_game(
    manager: web::Data<GameManager>,
    req: web::Json<CreateGame>,
) -> impl Responder {
    match GameSpec::try_from(req.into_inner()) {
        Err(e) => HttpResponse::BadRequest().json(ErrorView::new(e)),
        Ok(spec) => match manager.create(&spec).await {
            Err(e) => HttpResponse::BadRequest().json(ErrorView::new(e)),
            Ok(id) => match manager.get(&id).await {
                Err(e) => HttpResponse::InternalServerError().json(ErrorView::new(e)),
                Ok(matrix) => HttpResponse::Ok().json(CreatedGame {
                    game_id: id,
                    game: GameView::project(&matrix),
                }),
            },
        },
    }
}

pub async fn get_game(
    manager: web::Data<GameManager>,
    path: web::Path<GameId>,
) -> impl Responder {
    match manager.get(&path.into_inner()).await {
        Err(e) => HttpResponse::NotFound().json(ErrorView::new(e)),
        Ok(matrix) => HttpResponse::Ok().json(GameView::project(&matrix)),
    }
}

pub async fn analyze_game(
    manager: web::Data<GameManager>,
    path: web::Path<GameId>,
    query: web::Query<AnalyzeQuery>,
) -> impl Responder {
    let options = AnalyzeOptions {
        find_pure: query.find_pure.unwrap_or(true),
        find_mixed: query.find_mixed.unwrap_or(true),
    };
    match manager.analyze(&path.into_inner(), options).await {
        Err(e @ ClientError::NotFound(_)) => HttpResponse::NotFound().json(ErrorView::new(e)),
        Err(e) => HttpResponse::InternalServerError().json(ErrorView::new(e)),
        Ok(report) => HttpResponse::Ok().json(AnalysisView::from(report)),
    }
}

pub async fn expected_payoffs(
    manager: web::Data<GameManager>,
    path: web::Path<GameId>,
    req: web::Json<ExpectedPayoffsRequest>,
) -> impl Responder {
    match manager.get(&path.into_inner()).await {
        Err(e) => HttpResponse::NotFound().json(ErrorView::new(e)),
        Ok(matrix) => {
            let req = req.into_inner();
            let p1 = Strategy::from(req.p1_strategy);
            let p2 = Strategy::from(req.p2_strategy);
            match Calculator::expected(&matrix, &p1, &p2) {
                Err(e) => HttpResponse::BadRequest().json(ErrorView::new(e)),
                Ok(ExpectedPayoffs(e1, e2)) => HttpResponse::Ok().json(ExpectedPayoffsView {
                    expected_payoffs: [e1, e2],
                }),
            }
        }
    }
}

pub async fn random_beliefs(
    manager: web::Data<GameManager>,
    path: web::Path<GameId>,
) -> impl Responder {
    match manager.get(&path.into_inner()).await {
        Err(e) => HttpResponse::NotFound().json(ErrorView::new(e)),
        Ok(matrix) => {
            let mut rng = rand::rng();
            let p1 = Strategy::random(matrix.rows(), &mut rng);
            let p2 = Strategy::random(matrix.columns(), &mut rng);
            HttpResponse::Ok().json(BeliefsView {
                beliefs: [
                    p1.probabilities().to_vec(),
                    p2.probabilities().to_vec(),
                ],
            })
        }
    }
}
