use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. An explicit `filter` wins over `RUST_LOG`,
/// which wins over `default_filter`. Calling this twice is harmless.
pub fn init_tracing(filter: Option<&str>, default_filter: &str) {
    let env_filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(env_filter)
        .try_init();
}
