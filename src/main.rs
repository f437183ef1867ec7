//! Normal-Form Game Server Binary
//!
//! Runs the HTTP API for creating, retrieving, and analyzing
//! two-player normal-form games.

use normalform::*;

#[tokio::main]
async fn main() {
    log();
    api::Server::run().await.unwrap();
}
