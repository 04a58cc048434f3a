//! Transformation phase: run the eight projections.

use crate::db::{Store, Table};
use crate::error::EtlResult;
use crate::log::RunLog;
use crate::projections::{LOAD_ORDER, Projection};

/// The eight in-memory tables, one per warehouse table.
#[derive(Debug, Clone, Default)]
pub struct Transformed {
    pub orders_fact: Table,
    pub customers: Table,
    pub employees: Table,
    pub locations: Table,
    pub products: Table,
    pub shippers: Table,
    pub categories: Table,
    pub suppliers: Table,
}

impl Transformed {
    /// Tables in the order they must be appended.
    pub fn in_load_order(&self) -> [&Table; 8] {
        [
            &self.customers,
            &self.employees,
            &self.locations,
            &self.products,
            &self.categories,
            &self.suppliers,
            &self.shippers,
            &self.orders_fact,
        ]
    }

    fn slot(&mut self, target: &str) -> Option<&mut Table> {
        match target {
            "orders_fact" => Some(&mut self.orders_fact),
            "dim_customer" => Some(&mut self.customers),
            "dim_employee" => Some(&mut self.employees),
            "dim_location" => Some(&mut self.locations),
            "dim_product" => Some(&mut self.products),
            "dim_shipper" => Some(&mut self.shippers),
            "dim_category" => Some(&mut self.categories),
            "dim_supplier" => Some(&mut self.suppliers),
            _ => None,
        }
    }
}

/// Run one projection against the source.
pub async fn project(source: &Store, projection: &Projection) -> EtlResult<Table> {
    let table = source
        .fetch_table(projection.target, projection.columns, projection.sql)
        .await?;
    tracing::debug!(table = projection.target, rows = table.len(), "projected");
    Ok(table)
}

/// Run every projection. The first failure aborts the run.
pub async fn transform(source: &Store, log: &RunLog) -> EtlResult<Transformed> {
    log.rule()?;
    log.log("Inicia Fase De Transformacion")?;

    let mut out = Transformed::default();
    for projection in LOAD_ORDER {
        let table = project(source, projection).await?;
        if let Some(slot) = out.slot(projection.target) {
            *slot = table;
        }
    }

    log.log("Finaliza Fase De Transformacion")?;
    log.rule()?;
    Ok(out)
}
