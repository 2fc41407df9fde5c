//! Static file sidecar.
//!
//! Serves a directory of frontend assets over HTTP on a background thread.
//! It shares no state with the game.
//!
//! ## Usage
//!
//! Enabled by default through the `web` feature:
//! ```sh
//! ./target/debug/flappy                 # serves ./public on port 8080
//! ./target/debug/flappy --port 3000 --public-dir site
//! ./target/debug/flappy --no-serve
//! ```

#[cfg(feature = "web")]
mod server;

#[cfg(feature = "web")]
pub use server::{router, spawn_static_server, ServerError, StaticServer};
