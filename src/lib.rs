use std::sync::Arc;

use checker::FactChecker;
use config::Config;

pub mod cache;
pub mod checker;
pub mod clients;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod router;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub checker: Arc<FactChecker>,
}

impl AppState {
    pub fn new(config: Config, checker: FactChecker) -> Self {
        Self {
            config,
            checker: Arc::new(checker),
        }
    }
}
