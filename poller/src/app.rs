use anyhow::Context;
use growboard_common::{config::DEFAULT_CONFIG_PATH, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    api::ApiClient,
    clock::{SystemClock, TokioSleeper},
    poller::Poller,
    sink::FileSink,
};

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("starting");

    let config = Config::load(DEFAULT_CONFIG_PATH)
        .with_context(|| format!("failed to load config from {DEFAULT_CONFIG_PATH}"))?;
    info!(
        "config loaded: tz={} start_date={} update_interval={}s output_dir={} token={}",
        config.timezone.name(),
        config.start_date,
        config.update_interval.as_secs(),
        config.output_dir.display(),
        config.masked_token()
    );

    let source = ApiClient::new(&config).context("failed to set up API client")?;
    info!("polling {}", source.url().path());

    let sink = FileSink::new(&config.output_dir);
    sink.prepare()
        .await
        .with_context(|| format!("failed to create {}", config.output_dir.display()))?;

    let poller = Poller::new(config, source, sink, SystemClock, TokioSleeper);
    poller.run().await;

    Ok(())
}
