use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Install the global subscriber, writing to stderr so command output on stdout stays clean.
/// `RUST_LOG` wins when set; otherwise `verbose` enables debug events for this crate.
pub fn init_logging(verbose: bool) {
    let directives = if verbose {
        "payables=debug,sqlx=warn"
    } else {
        "off"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(filter)
        .init();
}
