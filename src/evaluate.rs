use shakmaty::{CastlingMode, Move, san::San};
use tracing::{debug, error, warn};

use crate::{
    error::ProbeError,
    probe::{DtmProber, DtzProber, within_bounds},
    types::{MoveRecord, Wdl},
    variant::Rules,
};

/// Checkmate and stalemate flags of a position with `replies` legal moves.
pub fn terminal_state<P: Rules>(pos: &P, replies: usize) -> (bool, bool) {
    let checkmate = pos.mated(replies);
    (checkmate, replies == 0 && !checkmate)
}

/// Classifies single moves against the configured backends.
pub struct Evaluator<'a, P> {
    dtz: &'a dyn DtzProber<P>,
    dtm: Option<&'a dyn DtmProber<P>>,
}

impl<'a, P: Rules> Evaluator<'a, P> {
    pub fn new(dtz: &'a dyn DtzProber<P>, dtm: Option<&'a dyn DtmProber<P>>) -> Self {
        Self { dtz, dtm }
    }

    /// Play `m` on a scratch copy of `pos` and describe the result.
    ///
    /// Probe failures leave the probe fields empty. Corrupted tables abort
    /// the process.
    pub fn evaluate(&self, pos: &P, m: &Move) -> MoveRecord {
        let uci = m.to_uci(CastlingMode::Chess960).to_string();
        let mut san = San::from_move(pos, m).to_string();

        let mut after = pos.clone();
        after.play_unchecked(m);

        let (checkmate, stalemate) = terminal_state(&after, after.legal_moves().len());
        let insufficient_material = after.insufficient_material();
        let zeroing = after.halfmoves() == 0;

        if checkmate {
            san.push('#');
        } else if after.is_check() {
            san.push('+');
        }

        let mut record = MoveRecord {
            uci,
            san,
            checkmate,
            stalemate,
            insufficient_material,
            zeroing,
            wdl: None,
            dtz: None,
            dtm: None,
        };

        if checkmate {
            record.wdl = Some(Wdl::Loss);
            if self.dtm.is_some() {
                record.dtm = Some(0);
            }
        } else if stalemate || insufficient_material {
            record.wdl = Some(Wdl::Draw);
        } else if within_bounds(&after, self.dtz.max_pieces()) {
            match self.dtz.probe_dtz(&after) {
                Ok(dtz) => {
                    record.dtz = Some(dtz);
                    record.wdl = Some(Wdl::from_dtz(dtz, after.halfmoves()));
                    record.dtm = self.probe_dtm(&after, &record.uci);
                }
                Err(ProbeError::Unavailable(reason)) => {
                    warn!(uci = %record.uci, %reason, "dtz probe failed");
                }
                Err(ProbeError::Corrupted(reason)) => corrupted(&record.uci, &reason),
            }
        }

        record
    }

    fn probe_dtm(&self, after: &P, uci: &str) -> Option<i32> {
        let dtm = self.dtm?;
        if !within_bounds(after, dtm.max_pieces()) {
            return None;
        }

        match dtm.probe_dtm(after) {
            Ok(dtm) => dtm.relative_to(after.turn()),
            Err(ProbeError::Unavailable(reason)) => {
                debug!(%uci, %reason, "dtm probe failed");
                None
            }
            Err(ProbeError::Corrupted(reason)) => corrupted(uci, &reason),
        }
    }
}

fn corrupted(uci: &str, reason: &str) -> ! {
    error!(%uci, %reason, "inconsistent tablebase data, aborting");
    std::process::abort()
}
