use ballot_election::ElectionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("config error: {0}")]
    Config(String),

    #[error("script error: {0}")]
    Script(String),

    #[error("step {index} ({action}) rejected: {source}")]
    StepRejected {
        index: usize,
        action: &'static str,
        #[source]
        source: ElectionError,
    },

    #[error("election error: {0}")]
    Election(#[from] ElectionError),
}
