pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

#[cfg(test)]
pub mod testing;

pub use router::app;
pub use state::AppState;
