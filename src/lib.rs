#![doc(test(attr(deny(warnings))))]

//! Fintrack Core is the projection and filtering engine of a personal finance
//! tracker: it parses date filter expressions, expands recurring records into
//! projected occurrences and filters, aggregates and sums the result for
//! dashboards, widgets and record lists.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default directive and emits a startup
/// info log.
pub fn init() {
    init_with(utils::DEFAULT_LOG_DIRECTIVE);
}

/// Same as [`init`] with a custom directive, usually
/// [`config::Config::log_directive`].
pub fn init_with(directive: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        tracing::info!("Fintrack Core tracing initialized.");
    });
}
