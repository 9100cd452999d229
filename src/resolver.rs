use shakmaty::{CastlingMode, fen::Fen};
use tracing::debug;

use crate::{
    error::QueryError,
    evaluate::{Evaluator, terminal_state},
    fen::{normalize, validate},
    probe::{DtmProber, DtzProber},
    rank::rank,
    types::QueryResult,
    variant::Rules,
};

/// Answers position queries against a set of tablebase backends.
///
/// A resolver holds no per-request state and can be shared between
/// threads; every query works on its own position.
pub struct Resolver<P: Rules> {
    dtz: Box<dyn DtzProber<P>>,
    dtm: Option<Box<dyn DtmProber<P>>>,
}

impl<P: Rules> Resolver<P> {
    pub fn new(dtz: impl DtzProber<P> + 'static) -> Self {
        Self {
            dtz: Box::new(dtz),
            dtm: None,
        }
    }

    /// Add a mate-distance backend. Responses then carry a `dtm` field.
    pub fn with_dtm(mut self, dtm: impl DtmProber<P> + 'static) -> Self {
        self.dtm = Some(Box::new(dtm));
        self
    }

    pub fn has_dtm(&self) -> bool {
        self.dtm.is_some()
    }

    /// Largest piece count the DTZ backend answers for.
    pub fn max_pieces(&self) -> usize {
        self.dtz.max_pieces()
    }

    /// Rank every legal move of the position in `fen`.
    ///
    /// `_` may be used instead of spaces. The text is validated before it
    /// reaches the FEN parser.
    pub fn resolve(&self, fen: &str) -> Result<QueryResult, QueryError> {
        let fen = normalize(fen);
        if fen.is_empty() {
            return Err(QueryError::MissingPosition);
        }
        if !validate::<P>(&fen) {
            return Err(QueryError::InvalidEncoding);
        }

        debug!(%fen, variant = P::NAME, "probing");

        let pos: P = fen
            .parse::<Fen>()?
            .into_position(CastlingMode::Chess960)
            .map_err(|err| QueryError::IllegalPosition(err.to_string()))?;

        let legals = pos.legal_moves();
        let (checkmate, stalemate) = terminal_state(&pos, legals.len());

        let evaluator = Evaluator::new(self.dtz.as_ref(), self.dtm.as_deref());
        let moves = legals.iter().map(|m| evaluator.evaluate(&pos, m)).collect();

        Ok(QueryResult {
            checkmate,
            stalemate,
            moves: rank(moves),
        })
    }
}
