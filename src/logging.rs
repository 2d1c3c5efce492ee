//! Log output for the command handlers.
//!
//! Stage results are drawn by [`crate::ui`]; everything else (which
//! directory is being deleted, which credential is being registered) goes
//! through `tracing` so `RUST_LOG` can turn it up or down.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for the given verbosity.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "rotki_devtool=debug,info"
    } else {
        "rotki_devtool=info,warn"
    }
}

/// Install the global subscriber.  `RUST_LOG` wins over `--verbose`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
