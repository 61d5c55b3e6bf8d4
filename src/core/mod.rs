// Process-level plumbing: logging, memory reservation, server setup

pub mod logging;
pub mod memory;
pub mod server;
