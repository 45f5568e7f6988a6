use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` filter syntax (e.g. "debug",
/// "figures_studio=debug,wgpu_core=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Filter used when neither the config nor `RUST_LOG` specify one.
///
/// wgpu and naga are chatty at info level; keep them at warn.
pub fn default_filter() -> &'static str {
    "info,wgpu_core=warn,wgpu_hal=warn,naga=warn"
}

static INIT: Once = Once::new();

/// Initializes the global logger. Later calls are ignored.
///
/// Filter precedence: `config.env_filter`, then `RUST_LOG`, then
/// [`default_filter`].
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config
            .env_filter
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| default_filter().to_string());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);

        // Another logger may already be installed (e.g. by a test harness).
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized (filter: {filter})");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig {
            env_filter: Some("debug".into()),
            ..Default::default()
        });
        init_logging(LoggingConfig::default());
        log::info!("still logging");
    }

    #[test]
    fn default_filter_quiets_gpu_crates() {
        let f = default_filter();
        assert!(f.starts_with("info"));
        assert!(f.contains("wgpu_core=warn"));
        assert!(f.contains("naga=warn"));
    }
}
