//! Error types for the tablebase server.
//!
//! This crate uses `thiserror` to enumerate what can go wrong at each
//! boundary: a client query ([`QueryError`]), a single tablebase probe
//! ([`ProbeError`]) and process start-up ([`ConfigError`],
//! [`StartupError`]). Only query errors are ever shown to a client.

use std::{io, net::SocketAddr, path::PathBuf};

use thiserror::Error;

/// Rejection of an incoming position. The display strings are the
/// plain-text reasons sent back with a `400 Bad Request`.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The `fen` parameter was absent or empty.
    #[error("missing position")]
    MissingPosition,

    /// The position text failed the pre-parse validation scan.
    #[error("invalid position encoding")]
    InvalidEncoding,

    /// The text passed validation but `shakmaty` still refused to parse it.
    #[error("invalid position encoding")]
    InvalidFen(#[from] shakmaty::fen::ParseFenError),

    /// The position parsed but is not a legal configuration. Holds the
    /// reason reported by `shakmaty` for logging.
    #[error("illegal position")]
    IllegalPosition(String),
}

/// Failure of a single DTZ or DTM probe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// No answer for this position: missing table, too many pieces,
    /// castling rights, or the backend reported unknown/forbidden.
    #[error("probe failed: {0}")]
    Unavailable(String),

    /// The backend answered something that cannot happen. The tables
    /// or the integration are broken.
    #[error("inconsistent tablebase data: {0}")]
    Corrupted(String),
}

/// Invalid process configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("at least some syzygy tables are required (--syzygy)")]
    NoTables,

    #[error("at least some syzygy tables are required (--syzygy {paths}), found cardinality {cardinality}")]
    TooFewPieces { paths: String, cardinality: usize },

    #[error("could not read tablebase directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Anything that stops the server from coming up or keeps it from serving.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not bind socket to http://{addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

impl StartupError {
    /// Process exit status. Configuration problems use `EX_CONFIG`.
    pub fn exit_code(&self) -> u8 {
        match self {
            StartupError::Config(_) => crate::config::EX_CONFIG,
            StartupError::Bind { .. } | StartupError::Serve(_) => 1,
        }
    }
}
