#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use tbserve::{Dtm, DtmProber, DtzProber, ProbeError};

/// DTZ backend answering from a closure.
pub struct FnDtz<F> {
    pub max_pieces: usize,
    pub probe: F,
    /// Shared so it can be read after the backend is boxed.
    pub calls: Arc<AtomicUsize>,
}

impl<F> FnDtz<F> {
    pub fn new<P>(max_pieces: usize, probe: F) -> Self
    where
        F: Fn(&P) -> Result<i32, ProbeError>,
    {
        Self {
            max_pieces,
            probe,
            calls: Arc::default(),
        }
    }
}

impl<P, F> DtzProber<P> for FnDtz<F>
where
    F: Fn(&P) -> Result<i32, ProbeError> + Send + Sync,
{
    fn max_pieces(&self) -> usize {
        self.max_pieces
    }

    fn probe_dtz(&self, pos: &P) -> Result<i32, ProbeError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        (self.probe)(pos)
    }
}

/// Behaves like an empty tables directory.
pub fn missing_tables<P>() -> FnDtz<fn(&P) -> Result<i32, ProbeError>> {
    let probe: fn(&P) -> Result<i32, ProbeError> =
        |_| Err(ProbeError::Unavailable("missing table".to_owned()));
    FnDtz::new::<P>(7, probe)
}

/// DTM backend with one fixed answer.
pub struct FixedDtm(pub Result<Dtm, ProbeError>);

impl<P> DtmProber<P> for FixedDtm {
    fn max_pieces(&self) -> usize {
        5
    }

    fn probe_dtm(&self, _pos: &P) -> Result<Dtm, ProbeError> {
        self.0.clone()
    }
}

pub const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const PROMOTION_MATE: &str = "7k/4P3/6K1/8/8/8/8/8 w - - 0 1";
pub const BARE_KINGS: &str = "8/8/8/4k3/8/8/8/4K3 w - - 0 1";
pub const CHECKMATED: &str = "7k/6Q1/6K1/8/8/8/8/8 b - - 0 1";
pub const STALEMATED: &str = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";
pub const KQK: &str = "8/8/8/4k3/8/8/8/3QK3 w - - 0 1";
