//! The full job: extract, transform, load.

use crate::config::EtlConfig;
use crate::db::Store;
use crate::error::EtlResult;
use crate::extract::extract;
use crate::load::{LoadReport, load};
use crate::log::RunLog;
use crate::transform::{Transformed, transform};
use serde::Serialize;

/// Summary of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Source tables found by the extraction phase
    pub source_tables: Vec<String>,
    /// Rows produced per destination table, in load order
    pub extracted: Vec<(String, usize)>,
    pub load: LoadReport,
}

impl RunReport {
    fn new(source_tables: Vec<String>, tables: &Transformed, load: LoadReport) -> Self {
        let extracted = tables
            .in_load_order()
            .iter()
            .map(|t| (t.name.clone(), t.len()))
            .collect();
        Self {
            source_tables,
            extracted,
            load,
        }
    }
}

/// Run every phase once with the given configuration.
///
/// Extraction and transformation errors abort the run. Load errors do not:
/// they are logged and show up in the returned report.
pub async fn run(config: &EtlConfig) -> EtlResult<RunReport> {
    let log = RunLog::new(&config.log.file);
    run_with_log(config, &log).await
}

/// Same as [`run`], writing to an existing log.
pub async fn run_with_log(config: &EtlConfig, log: &RunLog) -> EtlResult<RunReport> {
    log.log("ETL iniciado.")?;

    let source = Store::connect(&config.source.url, config.load.max_connections).await?;
    let source_tables = extract(&source, log).await?;
    let tables = transform(&source, log).await?;
    source.close().await;

    let destination_url = config.destination.connection_url()?;
    let destination = Store::connect(&destination_url, config.load.max_connections).await?;
    let loaded = load(&destination, &tables, log, config.load.batch_size).await;
    destination.close().await;
    log.log("Conexion de la base de datos cerrada.")?;
    let loaded = loaded?;

    log.log("ETL  finalizado.")?;
    Ok(RunReport::new(source_tables, &tables, loaded))
}
