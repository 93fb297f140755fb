use anyhow::{bail, Context};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_SERVICE_NAME: &str = "bigmac-index";
pub const DEFAULT_LOG_LEVEL: &str = "info,tower_http=info";

/// Where log lines go and how verbose they are; part of [`crate::config::AppConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub log_level: String,
    pub service_name: String,
    pub environment: String,
    /// Loki push URL; only honoured when `LOKI_ENABLED=true`.
    pub loki_url: Option<String>,
    pub loki_enabled: bool,
}

impl LoggingConfig {
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_level: var("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            service_name: var("SERVICE_NAME").unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            loki_url: var("LOKI_URL").filter(|u| !u.trim().is_empty()),
            loki_enabled: var("LOKI_ENABLED")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(false),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.loki_enabled && self.loki_url.is_none() {
            bail!("LOKI_ENABLED is true but LOKI_URL is not set");
        }
        EnvFilter::try_new(&self.log_level)
            .with_context(|| format!("Invalid RUST_LOG directive: {}", self.log_level))?;
        Ok(())
    }
}

/// Installs the global subscriber: env filter, fmt output and, with the `loki`
/// feature, an optional Loki layer.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    config.validate()?;

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level)?)
        .with(fmt::layer());

    #[cfg(feature = "loki")]
    let registry = registry.with(loki_layer(config)?);

    registry.try_init().context("Global tracing subscriber already set")?;

    if config.loki_enabled && !cfg!(feature = "loki") {
        tracing::warn!("LOKI_ENABLED is set but the binary was built without the loki feature");
    }

    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        "Logging initialized at level {}",
        config.log_level
    );
    Ok(())
}

#[cfg(feature = "loki")]
fn loki_layer(config: &LoggingConfig) -> anyhow::Result<Option<tracing_loki::Layer>> {
    let Some(loki_url) = config.loki_url.as_deref().filter(|_| config.loki_enabled) else {
        return Ok(None);
    };

    let url = url::Url::parse(loki_url).with_context(|| format!("Invalid LOKI_URL: {}", loki_url))?;
    let (layer, task) = tracing_loki::builder()
        .label("service", &config.service_name)
        .and_then(|builder| builder.label("environment", &config.environment))
        .and_then(|builder| builder.build_url(url))
        .map_err(|e| anyhow::anyhow!("Failed to configure Loki layer: {}", e))?;

    // Ships buffered log lines to Loki; must run on the tokio runtime.
    tokio::spawn(task);
    Ok(Some(layer))
}
