use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const LOG_ENV: &str = "MISHU_LOG";
const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. The filter comes from `MISHU_LOG`, e.g. `mishu=debug`.
pub fn init_tracing() {
    let filter = std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    let env_filter = EnvFilter::try_new(&filter).unwrap_or_else(|_| {
        eprintln!("Invalid {LOG_ENV} filter {filter:?}, falling back to {DEFAULT_FILTER}");
        EnvFilter::new(DEFAULT_FILTER)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
