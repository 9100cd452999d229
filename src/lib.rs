//! A Syzygy endgame tablebase server.
//!
//! Given a chess position, the server ranks every legal move by its
//! endgame-theoretic value. Each move is played on a scratch copy of the
//! position, the result is classified (checkmate, stalemate,
//! insufficient material) and probed against the tablebases, and the
//! records are sorted best first for the side to move.
//!
//! The principal type is [`Resolver`], which turns a FEN string into a
//! [`QueryResult`]. The [`server`] module exposes it over HTTP.
//!
//! Variant specific rules live behind the [`Rules`] trait, implemented
//! for `shakmaty::Chess` and, with the `variant` feature,
//! `shakmaty::variant::Atomic`.
//!
//! The library re-exports `shakmaty` to make position construction easy.

pub mod config;
mod error;
mod evaluate;
pub mod fen;
mod probe;
mod rank;
mod resolver;
pub mod response;
pub mod server;
mod types;
mod variant;

/// Query resolution.
pub use resolver::Resolver;

/// Single move classification.
pub use evaluate::{Evaluator, terminal_state};

/// Move ordering.
pub use rank::{compare, rank};

/// Tablebase backends.
pub use probe::{Dtm, DtmProber, DtzProber, SyzygyProber};

/// Error types produced by library operations.
pub use error::{ConfigError, ProbeError, QueryError, StartupError};

/// Output data structures returned by queries.
pub use types::{MoveRecord, QueryResult, Wdl};

/// Per-variant rules.
pub use variant::Rules;

/// Re-export of `shakmaty` for convenience when building positions.
pub use shakmaty;
