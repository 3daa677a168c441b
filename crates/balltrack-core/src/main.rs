use balltrack_core::config::Config;
use balltrack_core::streaming::{run_dashboard_server, Hubs};
use balltrack_core::{processor, sensor};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default().unwrap_or_else(|e| {
        eprintln!("Could not find configuration file: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.system.log_level.clone())),
        )
        .init();
    tracing::info!("balltrack waking up...");

    let sensor_cfg = config.sensor.clone();
    let run_cfg = config.run.clone();
    let state = run_dashboard_server(Hubs::default(), config).await?;

    let pipeline_state = state.clone();
    tokio::task::spawn_blocking(move || {
        let sensor = sensor::open(&sensor_cfg)?;
        processor::run(sensor, pipeline_state, run_cfg)
    })
    .await??;
    Ok(())
}
