use thiserror::Error;

/// Failure of a synchronous environment query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("system boot time unavailable: {0}")]
    BootTime(String),
    #[error("os version unavailable: {0}")]
    OsVersion(String),
    #[error("debugger status unavailable: {0}")]
    DebugStatus(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("probe failed: {0}")]
    Probe(#[from] ProbeError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}
