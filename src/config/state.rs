// Application state shared by every handler

use std::sync::Arc;

use crate::config::environment::EnvironmentVariables;
use crate::config::lookup::{EnvLookup, ProcessEnv};

#[derive(Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    /// Where request-time variables (NAME_SERVICE, /var keys, ...) come from
    pub lookup: Arc<dyn EnvLookup>,
    /// Pooled client for calls to the internal microservice
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Creates state backed by an arbitrary lookup
    pub fn new(environment: EnvironmentVariables, lookup: Arc<dyn EnvLookup>) -> Self {
        Self {
            environment: Arc::new(environment),
            lookup,
            http_client: reqwest::Client::new(),
        }
    }

    /// Creates state that reads the real process environment
    pub fn from_process_env(environment: EnvironmentVariables) -> Self {
        Self::new(environment, Arc::new(ProcessEnv))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}
