#![warn(missing_docs)]

//! # query_kdir
//! The front end of a kdir index: reads a yaml configuration, sets up logging, indexes the
//! features of a numbered image set and answers "which images look like this one" from a prompt.

pub mod config;
pub mod errors;
pub mod logging;
pub mod session;

pub use config::QueryConfig;
pub use errors::{QueryError, QueryResult};
pub use logging::init_logger;
pub use session::QuerySession;
