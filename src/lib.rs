#![doc(test(attr(deny(warnings))))]

//! Gated video landing page toolkit: re-exports the form schema model,
//! the validation engine and the lead sinks, and hosts the `vsl_cli` shell.

pub mod cli;
pub mod utils;

pub use vsl_config as config;
pub use vsl_core as engine;
pub use vsl_domain as domain;
pub use vsl_storage_json as storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("vsl tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
