//! Best-first ordering of evaluated moves.
//!
//! Records describe the position after each move from the opponent's
//! point of view, so a *lower* `wdl` is better for the side choosing the
//! move. Keys are compared in order and the first difference decides.
//! The final key is the UCI string, which makes the order total over any
//! set of distinct legal moves.

use std::cmp::Ordering;

use crate::types::{MoveRecord, Wdl};

pub fn compare(a: &MoveRecord, b: &MoveRecord) -> Ordering {
    // Known results first
    b.dtz
        .is_some()
        .cmp(&a.dtz.is_some())
        .then_with(|| b.wdl.is_some().cmp(&a.wdl.is_some()))
        .then_with(|| match (a.wdl, b.wdl) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => Ordering::Equal,
        })
        // Game-ending moves
        .then_with(|| b.checkmate.cmp(&a.checkmate))
        .then_with(|| b.stalemate.cmp(&a.stalemate))
        .then_with(|| b.insufficient_material.cmp(&a.insufficient_material))
        // Longest opponent mate first. A known distance beats an unknown
        // one so the key stays transitive.
        .then_with(|| match (a.dtm, b.dtm) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        // Both records share the same wdl here.
        .then_with(|| match a.wdl {
            Some(wdl) if wdl < Wdl::Draw => b.zeroing.cmp(&a.zeroing),
            Some(wdl) if wdl > Wdl::Draw => a.zeroing.cmp(&b.zeroing),
            _ => Ordering::Equal,
        })
        .then_with(|| match (a.dtz, b.dtz) {
            (Some(a), Some(b)) => b.cmp(&a),
            _ => Ordering::Equal,
        })
        .then_with(|| a.uci.cmp(&b.uci))
}

/// Sort records best first.
pub fn rank(mut records: Vec<MoveRecord>) -> Vec<MoveRecord> {
    records.sort_by(compare);
    records
}
