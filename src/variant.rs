//! Rules that differ between the supported chess variants.
//!
//! The server is generic over the position type. Each position type
//! implements [`Rules`], which is the only place where variant
//! behaviour diverges: how many kings a position needs, when material
//! is insufficient, and whether a missing king counts as mate.

use shakmaty::{Bitboard, Chess, FromSetup, Position};
use shakmaty_syzygy::Syzygy;

pub trait Rules: Position + FromSetup + Syzygy + Clone + Send + Sync + 'static {
    /// Human readable variant name, used in logs.
    const NAME: &'static str;

    /// King counts accepted by the position validator.
    fn kings_valid(white: usize, black: usize) -> bool;

    /// Neither side can ever deliver mate.
    fn insufficient_material(&self) -> bool;

    /// A king has already been captured.
    fn king_lost(&self) -> bool {
        false
    }

    /// The side to move has been mated, given the number of legal replies.
    fn mated(&self, replies: usize) -> bool {
        replies == 0 && (self.is_check() || self.king_lost())
    }
}

impl Rules for Chess {
    const NAME: &'static str = "chess";

    fn kings_valid(white: usize, black: usize) -> bool {
        white == 1 && black == 1
    }

    fn insufficient_material(&self) -> bool {
        let board = self.board();

        // Easy mating material
        if (board.pawns() | board.rooks() | board.queens()).any() {
            return false;
        }

        // A single knight or a single bishop
        if (board.knights() | board.bishops()).count() == 1 {
            return true;
        }

        // More than a single knight
        if board.knights().any() {
            return false;
        }

        // All bishops on the same color
        let bishops = board.bishops();
        (bishops & Bitboard::DARK_SQUARES).is_empty() || (bishops & Bitboard::LIGHT_SQUARES).is_empty()
    }
}

#[cfg(feature = "variant")]
impl Rules for shakmaty::variant::Atomic {
    const NAME: &'static str = "atomic";

    fn kings_valid(white: usize, black: usize) -> bool {
        white + black >= 1
    }

    fn insufficient_material(&self) -> bool {
        self.board().occupied().count() <= 2
    }

    fn king_lost(&self) -> bool {
        self.is_variant_end()
    }
}
