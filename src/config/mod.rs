// Start of file: /src/config/mod.rs

/*
* Re-export submodules related to configuration, environment lookup, and app state.
*/

pub mod environment;
pub mod lookup;
pub mod state;

// End of file: /src/config/mod.rs
