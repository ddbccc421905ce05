use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AppConfig, LogFormat};

/// Default filter when `RUST_LOG` is unset
pub fn default_filter(log_level: &str) -> String {
    format!("stockroom={},actix_web=info,sqlx=warn", log_level)
}

/// Install the global subscriber. `RUST_LOG` overrides `LOG_LEVEL`.
pub fn init(app: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&app.log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    match app.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
