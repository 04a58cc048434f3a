//! Error types for the ETL job.

use thiserror::Error;

/// The main error type for ETL operations.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Could not open a connection to a store.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A read against the source failed.
    #[error("Query error on {table}: {message}")]
    Query { table: String, message: String },

    /// An append into the warehouse failed.
    #[error("Append error on {table}: {message}")]
    Append { table: String, message: String },

    /// A value could not be read out of a result row.
    #[error("Decode error in column {column}: {message}")]
    Decode { column: String, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed config file.
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EtlError {
    /// Create a query error for the given table.
    pub fn query(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Query {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create an append error for the given table.
    pub fn append(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Append {
            table: table.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for ETL operations.
pub type EtlResult<T> = Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EtlError::append("dim_supplier", "no such column: HomePage");
        assert_eq!(
            err.to_string(),
            "Append error on dim_supplier: no such column: HomePage"
        );
    }

    #[test]
    fn test_query_error_display() {
        let err = EtlError::query("orders_fact", "no such table: OrderDetail");
        assert_eq!(
            err.to_string(),
            "Query error on orders_fact: no such table: OrderDetail"
        );
    }
}
