// src/pipeline.rs

use reqwest::Client;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::error::PipelineError;
use crate::fetch::{build_client, fetch_tables};
use crate::process::{derive, normalize};
use crate::report::{check_distribution, write_csv, DistributionCheck, Summary};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub tables: usize,
    pub rows_written: usize,
    pub output_path: PathBuf,
    pub summary: Summary,
    pub distribution: Option<DistributionCheck>,
}

/// fetch → normalize → derive → (summary, validate) → write.
pub async fn run(config: &Config) -> Result<RunReport, PipelineError> {
    let client = build_client(config.timeout())?;
    run_with_client(&client, config).await
}

#[instrument(level = "info", skip_all, fields(source = %config.source_url))]
pub async fn run_with_client(client: &Client, config: &Config) -> Result<RunReport, PipelineError> {
    let fetched = fetch_tables(client, &config.source_url).await?;
    info!(
        fetched_at = %fetched.fetched_at.to_rfc3339(),
        "fetched {} tables from {}",
        fetched.tables.len(),
        fetched.source_url
    );

    let rows = normalize(&fetched.tables)?;
    info!("normalized {} rows", rows.len());

    let records = derive(&rows)?;
    info!("derived {} records", records.len());

    let summary = Summary::from_records(&records);
    if config.print_summary {
        println!("{}", summary);
    }

    let distribution = config.validate_year.map(|year| {
        let check = check_distribution(&records, year);
        if check.matches {
            info!("{}", check);
        } else {
            warn!("{}", check);
        }
        check
    });

    write_csv(&config.output_path, &records)?;

    Ok(RunReport {
        tables: fetched.tables.len(),
        rows_written: records.len(),
        output_path: config.output_path.clone(),
        summary,
        distribution,
    })
}
