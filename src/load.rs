//! Load phase: append the star schema to the warehouse.
//!
//! Appends run one table at a time, dimensions first and the fact table
//! last. Each append is its own transaction. The first failed append is
//! logged and stops the phase; tables already appended stay appended and
//! the rest are reported as skipped. Nothing is raised to the caller.

use crate::db::{Store, Table};
use crate::error::EtlResult;
use crate::log::RunLog;
use crate::projections::{TableKind, get_projection};
use crate::transform::Transformed;
use serde::Serialize;

/// Where the load phase stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadState {
    NotStarted,
    DimensionsLoading,
    FactLoading,
    Done,
    /// Stopped after an error; earlier appends were kept.
    Failed,
}

impl LoadState {
    /// State entered before appending a table of `kind`.
    fn entering(self, kind: TableKind) -> Self {
        match (self, kind) {
            (LoadState::Failed, _) => LoadState::Failed,
            (_, TableKind::Dimension) => LoadState::DimensionsLoading,
            (_, TableKind::Fact) => LoadState::FactLoading,
        }
    }
}

/// What happened to one destination table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableOutcome {
    Appended { rows: u64 },
    Failed { error: String },
    Skipped,
}

/// Per-table outcome of a load, in load order.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub state: LoadState,
    pub tables: Vec<(String, TableOutcome)>,
}

impl LoadReport {
    fn new() -> Self {
        Self {
            state: LoadState::NotStarted,
            tables: Vec::new(),
        }
    }

    /// Every table was appended.
    pub fn is_complete(&self) -> bool {
        self.state == LoadState::Done
    }

    pub fn total_rows(&self) -> u64 {
        self.tables
            .iter()
            .map(|(_, outcome)| match outcome {
                TableOutcome::Appended { rows } => *rows,
                _ => 0,
            })
            .sum()
    }

    /// The failed table and its error, if any.
    pub fn failed(&self) -> Option<(&str, &str)> {
        self.tables.iter().find_map(|(name, outcome)| match outcome {
            TableOutcome::Failed { error } => Some((name.as_str(), error.as_str())),
            _ => None,
        })
    }

    pub fn outcome(&self, table: &str) -> Option<&TableOutcome> {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, outcome)| outcome)
    }
}

/// Append every table, in order.
///
/// Only a failure to write the run log itself is returned as an error.
pub async fn load(
    destination: &Store,
    tables: &Transformed,
    log: &RunLog,
    batch_size: usize,
) -> EtlResult<LoadReport> {
    log.rule()?;
    log.log("Inicia  Carga")?;

    let report = append_all(destination, &tables.in_load_order(), log, batch_size).await?;

    if report.is_complete() {
        log.log("Finaliza Carga")?;
        log.rule()?;
    }
    Ok(report)
}

/// Append `tables` in the given order, stopping at the first failure.
pub async fn append_all(
    destination: &Store,
    tables: &[&Table],
    log: &RunLog,
    batch_size: usize,
) -> EtlResult<LoadReport> {
    let mut report = LoadReport::new();

    for table in tables {
        if report.state == LoadState::Failed {
            tracing::warn!(table = %table.name, "skipped after earlier failure");
            report.tables.push((table.name.clone(), TableOutcome::Skipped));
            continue;
        }

        let kind = get_projection(&table.name)
            .map(|p| p.kind)
            .unwrap_or(TableKind::Dimension);
        report.state = report.state.entering(kind);

        match destination.append(table, batch_size).await {
            Ok(rows) => {
                tracing::info!(table = %table.name, rows, "appended");
                report
                    .tables
                    .push((table.name.clone(), TableOutcome::Appended { rows }));
            }
            Err(e) => {
                log.log(&format!("Error en la carga de {}: {}", table.name, e))?;
                report.state = LoadState::Failed;
                report.tables.push((
                    table.name.clone(),
                    TableOutcome::Failed {
                        error: e.to_string(),
                    },
                ));
            }
        }
    }

    if report.state != LoadState::Failed {
        report.state = LoadState::Done;
    }
    Ok(report)
}
