use thiserror::Error as ThisError;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Error type used throughout the crate.
///
/// The `InvalidAddress`, `FieldCount`, and `InvertedRange` variants are fatal when raised while
/// building a range table: they indicate a corrupt feed and no table is returned.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The text is not a valid dotted-quad IPv4 address.
    #[error("invalid IPv4 address: {0:?}")]
    InvalidAddress(String),

    /// A feed row does not have the expected number of fields.
    #[error("incorrect row in range table; expected {expected} fields, found {found}: {row}")]
    FieldCount {
        expected: usize,
        found: usize,
        row: String,
    },

    /// A feed row has a start address greater than its end address.
    #[error("inverted range in range table: {row}")]
    InvertedRange { row: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}
