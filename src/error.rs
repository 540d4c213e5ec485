use thiserror::Error;

/// Errors raised while loading an instance, solving the relaxations or exporting results.
///
/// An infeasible relaxation is not an error: it is reported as
/// [`LpOutcome::Infeasible`](crate::search::lp_solver::LpOutcome).
#[derive(Debug, Error)]
pub enum CliqueError {
    /// unable to read or write a file
    #[error("io error on {path}: {source}")]
    Io {
        /// file being accessed
        path: String,
        /// underlying error
        source: std::io::Error,
    },

    /// malformed DIMACS instance
    #[error("parse error: {0}")]
    Parse(String),

    /// LP solver failure other than infeasibility
    #[error("solver error: {0}")]
    Solver(String),

    /// invalid command line value
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// result type used throughout the crate
pub type Result<T> = std::result::Result<T, CliqueError>;
