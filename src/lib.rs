//! Nonogrammer
//!
//! Turns photographs into black/white nonogram puzzles over HTTP and from
//! the command line. The image pipeline itself lives in `nonogram-core`;
//! this library exposes the service layers for the binary and for
//! integration testing.

pub mod api;
pub mod codec;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
