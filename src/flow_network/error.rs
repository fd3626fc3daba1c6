use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowNetworkError {
    #[error("line {line}: {reason} (`{content}`)")]
    Parse { line: usize, content: String, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("unknown edge {from} -> {to}")]
    UnknownEdge { from: String, to: String },
    #[error("cannot generate network: {0}")]
    GenerationInfeasible(String),
}

impl FlowNetworkError {
    pub(crate) fn parse(line: usize, content: &str, reason: impl Into<String>) -> Self {
        FlowNetworkError::Parse { line, content: content.to_string(), reason: reason.into() }
    }
}
