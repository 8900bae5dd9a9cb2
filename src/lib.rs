#![doc(test(attr(deny(warnings))))]

//! Ledger Core offers foundational double-entry ledger primitives: books that
//! own accounts, categories, and transactions, validation that keeps every
//! recorded transaction balanced, and the balance and view computations that
//! power reporting screens.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::from_default_env().add_directive("ledger_core=info".parse().unwrap());

    fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
