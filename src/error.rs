use thiserror::Error;

/** errors surfaced to the orchestration layer.
No error is silently swallowed: a malformed instance aborts the run before
any solver executes, and an invalid configuration is rejected before the
search loop starts. */
#[derive(Debug, Error)]
pub enum Error {
    /// the instance file does not match the expected header/edge grammar
    #[error("malformed instance: {0}")]
    MalformedInput(String),
    /// a solver parameter makes the search undefined (e.g. taomin ≤ 0)
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// the time budget expired before the search completed
    #[error("search interrupted by the time limit")]
    SearchTimeout,
    /// underlying I/O failure while reading or writing a file
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
