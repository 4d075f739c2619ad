use anyhow::{Context, anyhow};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;

/// Installs the global fmt subscriber. `RUST_LOG` takes precedence over
/// `default_level`.
pub fn init(default_level: &str) -> anyhow::Result<()> {
  let level: LevelFilter =
    default_level.parse().with_context(|| format!("invalid log level {default_level:?}"))?;

  let filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env()
    .context("invalid RUST_LOG")?
    .add_directive("rustls=off".parse()?)
    .add_directive("hyper_util=info".parse()?);

  tracing_subscriber::fmt()
    .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
    .with_env_filter(filter)
    .try_init()
    .map_err(|e| anyhow!("installing log subscriber: {e}"))
}
