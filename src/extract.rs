//! Extraction phase: make sure the source schema is there.

use crate::db::Store;
use crate::error::EtlResult;
use crate::log::RunLog;
use crate::projections::SOURCE_TABLES;

/// Verify every source table the projections read is queryable.
///
/// Creates nothing and reads no rows, so running it again is harmless.
/// Any failure is fatal for the run.
pub async fn extract(source: &Store, log: &RunLog) -> EtlResult<Vec<String>> {
    log.rule()?;
    log.log("Inicia Extraccion")?;

    let mut verified = Vec::with_capacity(SOURCE_TABLES.len());
    for table in SOURCE_TABLES {
        source.check_table(table).await?;
        tracing::debug!(table, "source table present");
        verified.push(table.to_string());
    }

    log.log("Finaliza Extraccion")?;
    log.rule()?;
    Ok(verified)
}
