//! The errors that can occur while configuring, building or querying an index

use featcloud::errors::ParsingError;
use featcloud::FeatCloudError;
use kdir::KdirError;
use log::SetLoggerError;
use std::error::Error;
use std::fmt;
use std::io;

/// Helper type for a call that could go wrong.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error type for the query front end
#[derive(Debug)]
pub enum QueryError {
    /// The index failed to build or answer
    KdirError(KdirError),
    /// Loading features went wrong
    FeatCloudError(FeatCloudError),
    /// IO error when opening files or talking to the terminal
    IoError(io::Error),
    /// The configuration file is missing a field or has one of the wrong type
    ParsingError(ParsingError),
    /// A configuration value is out of its allowed range
    ConstraintViolation {
        /// The offending key
        field: &'static str,
        /// What was wrong with it
        message: String,
    },
    /// Fewer images had features than the number of similar images asked for
    NotEnoughImages {
        /// Images whose features were loaded
        found: usize,
        /// The number of similar images to present
        required: usize,
    },
    /// A query image had no features
    EmptyQuery(String),
    /// A logger was already set
    LoggerError(SetLoggerError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::KdirError(e) => fmt::Display::fmt(e, f),
            QueryError::FeatCloudError(e) => fmt::Display::fmt(e, f),
            QueryError::IoError(e) => fmt::Display::fmt(e, f),
            QueryError::ParsingError(e) => fmt::Display::fmt(e, f),
            QueryError::ConstraintViolation { field, message } => {
                write!(f, "invalid value for {}: {}", field, message)
            }
            QueryError::NotEnoughImages { found, required } => write!(
                f,
                "only {} images have features, but {} similar images were asked for",
                found, required
            ),
            QueryError::EmptyQuery(path) => write!(f, "no features found for {}", path),
            QueryError::LoggerError(e) => write!(f, "can't initialize the logger: {}", e),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QueryError::KdirError(e) => Some(e),
            QueryError::FeatCloudError(e) => Some(e),
            QueryError::IoError(e) => Some(e),
            QueryError::ParsingError(e) => Some(e),
            QueryError::LoggerError(e) => Some(e),
            QueryError::ConstraintViolation { .. } => None,
            QueryError::NotEnoughImages { .. } => None,
            QueryError::EmptyQuery(..) => None,
        }
    }
}

impl From<KdirError> for QueryError {
    fn from(err: KdirError) -> Self {
        match err {
            KdirError::FeatCloudError(e) => QueryError::FeatCloudError(e),
            KdirError::IoError(e) => QueryError::IoError(e),
            KdirError::ParsingError(e) => QueryError::ParsingError(e),
            e => QueryError::KdirError(e),
        }
    }
}

impl From<FeatCloudError> for QueryError {
    fn from(err: FeatCloudError) -> Self {
        match err {
            FeatCloudError::IoError(e) => QueryError::IoError(e),
            FeatCloudError::ParsingError(e) => QueryError::ParsingError(e),
            e => QueryError::FeatCloudError(e),
        }
    }
}

impl From<io::Error> for QueryError {
    fn from(err: io::Error) -> Self {
        QueryError::IoError(err)
    }
}

impl From<ParsingError> for QueryError {
    fn from(err: ParsingError) -> Self {
        QueryError::ParsingError(err)
    }
}

impl From<SetLoggerError> for QueryError {
    fn from(err: SetLoggerError) -> Self {
        QueryError::LoggerError(err)
    }
}

impl QueryError {
    pub(crate) fn constraint(field: &'static str, message: String) -> QueryError {
        QueryError::ConstraintViolation { field, message }
    }
}
