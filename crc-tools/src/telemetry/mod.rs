pub mod config;
pub use self::config::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::filter::{Directive, EnvFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Registry;

/// Environment variable holding extra `EnvFilter` directives.
pub const LOG_ENV: &str = "CRC_LOG";

/// `max_level`, then the configured directives, then the environment ones. Later directives
/// for the same target win.
fn build_filter(max_level: &LoggingLevel, level_filter: &str, env: Option<&str>) -> EnvFilter {
    let max_level: Directive = max_level.clone().into();
    let directives = [max_level.to_string().as_str(), level_filter, env.unwrap_or_default()]
        .into_iter()
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join(",");
    EnvFilter::builder().parse_lossy(directives)
}

/// Install the global subscriber.
pub fn initialize_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    if !config.enable {
        return Ok(());
    }
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(&config.max_level, &config.level_filter, env.as_deref());
    let console = config
        .console
        .enable
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    let file = config.file.enable.then(|| {
        let config = &config.file;
        let file_appender =
            RollingFileAppender::new(config.rolling_time.clone().into(), &config.path, &config.prefix);
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender)
    });
    Registry::default()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()?;
    Ok(())
}
