use anyhow::{Context, Result};
use inescraper::{pipeline, Config};
use std::{env, path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // ─── 2) config: optional YAML path as the only argument ──────────
    let config_path = env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref()).context("loading configuration")?;
    info!(
        source = %config.source_url,
        output = %config.output_path.display(),
        timeout_secs = config.timeout_secs,
        "configured"
    );

    // ─── 3) fetch → normalize → derive → report → write ──────────────
    let report = pipeline::run(&config).await.context("pipeline failed")?;

    if let Some(check) = &report.distribution {
        println!("{}", check);
    }
    println!(
        "Datos guardados en '{}' ({} filas)",
        report.output_path.display(),
        report.rows_written
    );
    info!("all done");
    Ok(())
}
