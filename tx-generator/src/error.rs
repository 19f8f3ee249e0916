use std::io;

use rand::distributions::WeightedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("CSV Error")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Spending amounts must not be negative")]
    InvalidAmount,
    #[error("Category sampling failed")]
    Sampling(#[from] WeightedError),
}
