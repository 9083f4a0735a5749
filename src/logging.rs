use crate::config::LoggingConfig;

/// Initializes the global logger.
///
/// The configured filter wins over `RUST_LOG`; without either the level is
/// `info`. Calling this more than once only logs a warning.
pub fn init_logging(config: &LoggingConfig) {
    let mut builder = env_logger::Builder::new();

    if let Some(filter) = &config.filter {
        builder.parse_filters(filter);
    } else if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }

    if let Err(e) = builder.try_init() {
        log::warn!("Could not initialize logger: {}", e);
        return;
    }
    log::debug!("logging initialized");
}
