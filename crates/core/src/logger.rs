use tracing::{level_filters::LevelFilter, Subscriber};
use tracing_subscriber::{
    fmt::{format::Writer, time::FormatTime},
    EnvFilter,
};

/// Local time as "DD Month - HH:MM:SS.micros".
struct CustomTimer;

impl FormatTime for CustomTimer {
    fn format_time(&self, writer: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Local::now();
        write!(writer, "{} - {}", now.format("%d %B"), now.format("%H:%M:%S%.6f"))
    }
}

fn build_subscriber(log_level: LevelFilter) -> impl Subscriber + Send + Sync {
    let filter = EnvFilter::from_default_env().add_directive(log_level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(CustomTimer)
        .with_level(true)
        .with_target(false)
        .finish()
}

/// Sets up the global logger with the specified log level.
///
/// `RUST_LOG` directives are honoured on top of `log_level`, so
/// `RUST_LOG=basicguard_core=debug` shows every authorization decision.
///
/// If a global logger is already set, this function silently does nothing.
pub fn setup_logger(log_level: LevelFilter) {
    // already installed, keep the existing one
    let _ = tracing::subscriber::set_global_default(build_subscriber(log_level));
}

pub fn setup_info_logger() {
    setup_logger(LevelFilter::INFO);
}
