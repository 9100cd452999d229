use serde::{Serialize, Serializer};

/// Win/draw/loss category from the point of view of the side to move.
///
/// The discriminants are the syzygy codes: 2=win, 1=win (cursed), 0=draw,
/// -1=loss (blessed), -2=loss. Ordering follows the codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Wdl {
    Loss = -2,
    BlessedLoss = -1,
    Draw = 0,
    CursedWin = 1,
    Win = 2,
}

impl Wdl {
    pub const ALL: [Wdl; 5] = [
        Wdl::Loss,
        Wdl::BlessedLoss,
        Wdl::Draw,
        Wdl::CursedWin,
        Wdl::Win,
    ];

    pub fn from_i8(v: i8) -> Option<Self> {
        match v {
            -2 => Some(Wdl::Loss),
            -1 => Some(Wdl::BlessedLoss),
            0 => Some(Wdl::Draw),
            1 => Some(Wdl::CursedWin),
            2 => Some(Wdl::Win),
            _ => None,
        }
    }

    /// Classify a signed DTZ value, taking the halfmove clock of the
    /// probed position into account.
    pub fn from_dtz(dtz: i32, halfmoves: u32) -> Self {
        let (dtz, clock) = (i64::from(dtz), i64::from(halfmoves));
        if dtz < -100 && dtz - clock <= -100 {
            Wdl::BlessedLoss
        } else if dtz > 100 && dtz + clock >= -100 {
            Wdl::CursedWin
        } else if dtz < 0 {
            Wdl::Loss
        } else if dtz > 0 {
            Wdl::Win
        } else {
            Wdl::Draw
        }
    }

    pub fn is_decisive(self) -> bool {
        matches!(self, Wdl::Win | Wdl::Loss)
    }
}

impl Serialize for Wdl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(*self as i8)
    }
}

/// Outcome of one legal move of the queried position.
///
/// Every flag and number describes the position *after* the move, seen
/// from the side to move there (the opponent of whoever played it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub uci: String,
    pub san: String,
    pub checkmate: bool,
    pub stalemate: bool,
    pub insufficient_material: bool,
    /// The move reset the halfmove clock (capture or pawn move).
    pub zeroing: bool,
    pub wdl: Option<Wdl>,
    /// Signed distance to zeroing in plies, positive when the side to
    /// move is winning.
    pub dtz: Option<i32>,
    /// Signed distance to mate in plies, same orientation as `dtz`. Not
    /// flipped to the mover: ranking relies on the opponent's view.
    pub dtm: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// The queried position itself is checkmate.
    pub checkmate: bool,
    /// The queried position itself is stalemate.
    pub stalemate: bool,
    /// Legal moves, best first for the side to move.
    pub moves: Vec<MoveRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wdl_codes_roundtrip() {
        for wdl in Wdl::ALL {
            assert_eq!(Wdl::from_i8(wdl as i8), Some(wdl));
        }
        assert_eq!(Wdl::from_i8(3), None);
        assert_eq!(Wdl::from_i8(-3), None);
    }

    #[test]
    fn test_wdl_from_dtz_thresholds() {
        assert_eq!(Wdl::from_dtz(0, 0), Wdl::Draw);
        assert_eq!(Wdl::from_dtz(0, 42), Wdl::Draw);
        assert_eq!(Wdl::from_dtz(1, 0), Wdl::Win);
        assert_eq!(Wdl::from_dtz(100, 0), Wdl::Win);
        assert_eq!(Wdl::from_dtz(-1, 0), Wdl::Loss);
        assert_eq!(Wdl::from_dtz(-100, 0), Wdl::Loss);
        assert_eq!(Wdl::from_dtz(-100, 30), Wdl::Loss);
        assert_eq!(Wdl::from_dtz(-101, 0), Wdl::BlessedLoss);
        assert_eq!(Wdl::from_dtz(-150, 10), Wdl::BlessedLoss);
        assert_eq!(Wdl::from_dtz(101, 0), Wdl::CursedWin);
        assert_eq!(Wdl::from_dtz(150, 99), Wdl::CursedWin);
    }

    #[test]
    fn test_wdl_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Wdl::BlessedLoss).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&Some(Wdl::Win)).unwrap(), "2");
    }
}
