use thiserror::Error;

use crate::ConnectorId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown connector: {0}")]
    UnknownConnector(ConnectorId),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Search limit of {limit} node expansions exceeded")]
    SearchLimitExceeded { limit: usize },
}
