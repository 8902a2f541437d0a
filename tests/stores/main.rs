//! Live store tests.
//!
//! Each test loads the fixtures into a real store and reads the result back.
//! They are ignored by default; start the stores and run
//! `cargo test --test stores -- --ignored`. Connection strings come from the
//! same environment variables as the CLI.

mod mongodb;
mod mysql;
mod postgresql;

/// Read an environment variable, falling back to the CLI default.
pub fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("fixture_seed=debug,seed_load=debug")
        .try_init()
        .ok();
}
