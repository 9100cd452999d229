//! Tablebase backends.
//!
//! The evaluator only sees two narrow traits: [`DtzProber`] for
//! distance-to-zero and the optional [`DtmProber`] for distance-to-mate.
//! [`SyzygyProber`] implements DTZ on top of `shakmaty-syzygy`.
//!
//! Backends are shared read-only between concurrent requests, so both
//! traits require `Send + Sync`.

use std::path::{Path, PathBuf};

use shakmaty::Color;
use shakmaty_syzygy::{SyzygyError, Tablebase};
use tracing::info;

use crate::{
    error::{ConfigError, ProbeError},
    variant::Rules,
};

pub trait DtzProber<P>: Send + Sync {
    /// Largest number of pieces (kings included) the backend can answer for.
    fn max_pieces(&self) -> usize;

    /// Signed DTZ of `pos`, positive when the side to move is winning.
    fn probe_dtz(&self, pos: &P) -> Result<i32, ProbeError>;
}

pub trait DtmProber<P>: Send + Sync {
    fn max_pieces(&self) -> usize;

    fn probe_dtm(&self, pos: &P) -> Result<Dtm, ProbeError>;
}

/// Distance-to-mate as reported by a backend: the winning colour and the
/// number of plies to mate, or a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtm {
    Draw,
    Mate { winner: Color, plies: u32 },
}

impl Dtm {
    /// Signed plies from the point of view of `turn`: positive when
    /// `turn` delivers the mate. `None` for a draw.
    pub fn relative_to(self, turn: Color) -> Option<i32> {
        match self {
            Dtm::Draw => None,
            Dtm::Mate { winner, plies } => {
                let plies = i32::try_from(plies).unwrap_or(i32::MAX);
                Some(if winner == turn { plies } else { -plies })
            }
        }
    }

    /// Inverse of [`Dtm::relative_to`].
    pub fn from_relative(dtm: i32, turn: Color) -> Self {
        Dtm::Mate {
            winner: if dtm > 0 { turn } else { !turn },
            plies: dtm.unsigned_abs(),
        }
    }
}

/// A backend answering for up to `max_pieces` pieces can probe `pos`.
pub(crate) fn within_bounds<P: Rules>(pos: &P, max_pieces: usize) -> bool {
    pos.board().occupied().count() <= max_pieces && pos.castles().castling_rights().is_empty()
}

/// Syzygy DTZ tables.
pub struct SyzygyProber<P: Rules> {
    tables: Tablebase<P>,
}

impl<P: Rules> SyzygyProber<P> {
    /// Create a prober without any tables.
    pub fn new() -> Self {
        Self {
            tables: Tablebase::new(),
        }
    }

    /// Register the tables found in a directory. Files are opened lazily
    /// on first probe.
    pub fn add_directory(&mut self, path: impl AsRef<Path>) -> Result<usize, ConfigError> {
        let path = path.as_ref();
        self.tables
            .add_directory(path)
            .map_err(|source| ConfigError::Directory {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Load every directory and make sure enough tables are present to be
    /// useful.
    pub fn open(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        if paths.is_empty() {
            return Err(ConfigError::NoTables);
        }

        let mut prober = Self::new();
        for path in paths {
            let count = prober.add_directory(path)?;
            info!(path = %path.display(), count, "added syzygy tables");
        }

        let cardinality = prober.tables.max_pieces();
        if cardinality < 3 {
            let paths = paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(":");
            return Err(ConfigError::TooFewPieces { paths, cardinality });
        }

        Ok(prober)
    }
}

impl<P: Rules> Default for SyzygyProber<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Rules> DtzProber<P> for SyzygyProber<P> {
    fn max_pieces(&self) -> usize {
        self.tables.max_pieces()
    }

    fn probe_dtz(&self, pos: &P) -> Result<i32, ProbeError> {
        self.tables
            .probe_dtz(pos)
            .map(|dtz| dtz.ignore_rounding().0)
            .map_err(classify)
    }
}

fn classify(err: SyzygyError) -> ProbeError {
    match err {
        SyzygyError::Castling | SyzygyError::TooManyPieces | SyzygyError::MissingTable { .. } => {
            ProbeError::Unavailable(err.to_string())
        }
        SyzygyError::ProbeFailed { .. } => ProbeError::Corrupted(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{CastlingMode, Chess, fen::Fen};

    #[test]
    fn test_dtm_orientation() {
        let mate = Dtm::Mate {
            winner: Color::White,
            plies: 7,
        };
        assert_eq!(mate.relative_to(Color::White), Some(7));
        assert_eq!(mate.relative_to(Color::Black), Some(-7));
        assert_eq!(Dtm::Draw.relative_to(Color::White), None);
    }

    #[test]
    fn test_dtm_reorientation_roundtrip() {
        for winner in [Color::White, Color::Black] {
            for turn in [Color::White, Color::Black] {
                for plies in [1, 2, 15, 254] {
                    let dtm = Dtm::Mate { winner, plies };
                    let relative = dtm.relative_to(turn).unwrap();
                    assert_eq!(Dtm::from_relative(relative, turn), dtm);
                    // seen from the other side the sign flips, and flipping
                    // back restores the backend value
                    let flipped = Dtm::from_relative(-relative, !turn);
                    assert_eq!(flipped, dtm);
                }
            }
        }
    }

    #[test]
    fn test_mated_side_has_zero_dtm() {
        let dtm = Dtm::from_relative(0, Color::Black);
        assert_eq!(
            dtm,
            Dtm::Mate {
                winner: Color::White,
                plies: 0
            }
        );
        assert_eq!(dtm.relative_to(Color::Black), Some(0));
    }

    #[test]
    fn test_bounds_need_few_pieces_and_no_castling() {
        let kqk: Chess = "8/8/8/4k3/8/8/8/3QK3 w - - 0 1"
            .parse::<Fen>()
            .unwrap()
            .into_position(CastlingMode::Chess960)
            .unwrap();
        assert!(within_bounds(&kqk, 3));
        assert!(!within_bounds(&kqk, 2));

        let castling: Chess = "r3k3/8/8/8/8/8/8/4K3 w q - 0 1"
            .parse::<Fen>()
            .unwrap()
            .into_position(CastlingMode::Chess960)
            .unwrap();
        assert!(!within_bounds(&castling, 7));
    }

    #[test]
    fn test_open_requires_a_directory() {
        assert!(matches!(
            SyzygyProber::<Chess>::open(&[]),
            Err(ConfigError::NoTables)
        ));
    }

    #[test]
    fn test_empty_prober_reports_missing_tables() {
        let prober = SyzygyProber::<Chess>::new();
        let pos: Chess = "8/8/8/4k3/8/8/8/3QK3 w - - 0 1"
            .parse::<Fen>()
            .unwrap()
            .into_position(CastlingMode::Chess960)
            .unwrap();
        assert!(matches!(
            prober.probe_dtz(&pos),
            Err(ProbeError::Unavailable(_))
        ));
    }

    #[test]
    fn test_unreadable_table_is_corrupted() {
        let dir = std::env::temp_dir().join(format!("tbserve-garbage-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        for name in ["KQvK.rtbw", "KQvK.rtbz"] {
            std::fs::write(dir.join(name), [0xff; 64]).unwrap();
        }

        let mut prober = SyzygyProber::<Chess>::new();
        prober.add_directory(&dir).unwrap();
        let pos: Chess = "8/8/8/4k3/8/8/8/3QK3 w - - 0 1"
            .parse::<Fen>()
            .unwrap()
            .into_position(CastlingMode::Chess960)
            .unwrap();
        let probed = prober.probe_dtz(&pos);
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(probed, Err(ProbeError::Corrupted(_))), "{probed:?}");
    }
}
