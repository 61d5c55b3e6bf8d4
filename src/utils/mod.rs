// Start of file: /src/utils/mod.rs

/*
    * Shared response bodies and the request logging middleware.
*/

pub mod response_handler;

// End of file: /src/utils/mod.rs
