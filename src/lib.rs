// Library root for the cluster example service

pub mod api;
pub mod config;
pub mod core;
pub mod utils;

pub use crate::config::environment::EnvironmentVariables;
pub use crate::config::lookup::{EnvLookup, MapEnv, ProcessEnv};
pub use crate::config::state::AppState;
pub use crate::core::memory::MemoryReservation;
