use thiserror::Error;

use crate::domain::{AggregationError, ProjectionError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Installment not found: {0}")]
    InstallmentNotFound(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid start month: {0}")]
    InvalidStartMonth(String),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}
