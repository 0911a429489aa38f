use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read file")]
    FileError(#[from] std::io::Error),
    #[error("could not read or write CSV rows")]
    CsvError(#[from] csv::Error),
    #[error("could not parse configuration")]
    ConfigError(#[from] serde_yaml::Error),
    #[error(transparent)]
    BusinessError(#[from] crate::domain::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
