//! Optional tracing subscriber.

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_tree::HierarchicalLayer;

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical subscriber writing to stderr.
///
/// Does nothing unless `WPP_LOG` (or, failing that, `RUST_LOG`) is set, e.g.
/// `WPP_LOG=wpp_eval=debug` or `WPP_LOG=trace`. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let directives = std::env::var("WPP_LOG").or_else(|_| std::env::var("RUST_LOG"));
        let Ok(directives) = directives else {
            return;
        };

        tracing_subscriber::registry()
            .with(EnvFilter::new(directives))
            .with(
                HierarchicalLayer::new(2)
                    .with_writer(std::io::stderr)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .init();
    });
}
