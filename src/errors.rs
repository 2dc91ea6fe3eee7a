// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PyorityError {
    #[error("a node cannot depend on itself")]
    SelfDependency,

    #[error("node is already registered at index {0}")]
    DuplicateNode(usize),

    #[error("node is not registered in this graph")]
    NodeNotFound,

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("cannot associate '{0} node' twice")]
    AlreadyAssociated(&'static str),

    #[error("no '{0} node' associated yet")]
    NotAssociated(&'static str),

    #[error("associated '{0} node' has been released")]
    Released(&'static str),

    #[error("start and end nodes do not wrap the same task")]
    MismatchedPair,

    #[error("pyority must be a non-negative number (got {0})")]
    NegativePyority(f64),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of a [`PyorityError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Self-dependency, duplicate registration, double association or a
    /// mismatched start/end pair.
    InvalidArgument,
    /// An operation referenced a node or task that is not registered.
    NotFound,
    /// A start/end cross-link was read before it was set (or after its
    /// referent was dropped).
    NotAssociated,
    /// A weight accessor returned a negative value.
    Precondition,
    Config,
    Io,
}

impl PyorityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PyorityError::SelfDependency
            | PyorityError::DuplicateNode(_)
            | PyorityError::AlreadyAssociated(_)
            | PyorityError::MismatchedPair => ErrorKind::InvalidArgument,
            PyorityError::NodeNotFound | PyorityError::TaskNotFound(_) => ErrorKind::NotFound,
            PyorityError::NotAssociated(_) | PyorityError::Released(_) => {
                ErrorKind::NotAssociated
            }
            PyorityError::NegativePyority(_) => ErrorKind::Precondition,
            PyorityError::ConfigError(_) | PyorityError::TomlError(_) | PyorityError::Other(_) => {
                ErrorKind::Config
            }
            PyorityError::IoError(_) => ErrorKind::Io,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PyorityError>;
