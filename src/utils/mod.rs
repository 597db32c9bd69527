use std::sync::Once;

use tracing::warn;

static TRACING_INIT: Once = Once::new();

/// Default filter directive when none is configured.
pub const DEFAULT_LOG_DIRECTIVE: &str = "fintrack_core=info";

/// Initializes the global tracing subscriber: `RUST_LOG` plus `directive`.
/// Later calls are no-ops.
pub fn init_tracing(directive: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        let mut rejected = None;
        match directive.parse::<Directive>() {
            Ok(parsed) => filter = filter.add_directive(parsed),
            Err(err) => {
                rejected = Some(err);
                if let Ok(fallback) = DEFAULT_LOG_DIRECTIVE.parse::<Directive>() {
                    filter = filter.add_directive(fallback);
                }
            }
        }

        let _ = fmt().with_env_filter(filter).try_init();
        if let Some(err) = rejected {
            warn!(directive, error = %err, "invalid log directive, using default");
        }
    });
}
