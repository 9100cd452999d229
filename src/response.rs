//! Wire format of a resolved query.
//!
//! The body is a pretty-printed JSON object followed by a newline, or
//! `callback(<json>)\n` when the client asked for JSONP. The `dtm` key
//! only exists when a mate-distance backend is configured; `wdl`, `dtz`
//! and `dtm` are `null` when unknown.

use serde::Serialize;

use crate::types::{MoveRecord, QueryResult, Wdl};

pub const JSON: &str = "application/json";
pub const JAVASCRIPT: &str = "application/javascript";

#[derive(Serialize)]
struct ResultJson<'a> {
    checkmate: bool,
    stalemate: bool,
    moves: Vec<MoveJson<'a>>,
}

#[derive(Serialize)]
struct MoveJson<'a> {
    uci: &'a str,
    san: &'a str,
    checkmate: bool,
    stalemate: bool,
    insufficient_material: bool,
    zeroing: bool,
    wdl: Option<Wdl>,
    dtz: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dtm: Option<Option<i32>>,
}

impl<'a> MoveJson<'a> {
    fn new(record: &'a MoveRecord, with_dtm: bool) -> Self {
        Self {
            uci: &record.uci,
            san: &record.san,
            checkmate: record.checkmate,
            stalemate: record.stalemate,
            insufficient_material: record.insufficient_material,
            zeroing: record.zeroing,
            wdl: record.wdl,
            dtz: record.dtz,
            dtm: with_dtm.then_some(record.dtm),
        }
    }
}

/// A rendered response body with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub content_type: &'static str,
    pub text: String,
}

pub fn to_json(result: &QueryResult, with_dtm: bool) -> Result<String, serde_json::Error> {
    let json = ResultJson {
        checkmate: result.checkmate,
        stalemate: result.stalemate,
        moves: result
            .moves
            .iter()
            .map(|record| MoveJson::new(record, with_dtm))
            .collect(),
    };
    serde_json::to_string_pretty(&json)
}

pub fn render(
    result: &QueryResult,
    with_dtm: bool,
    callback: Option<&str>,
) -> Result<Body, serde_json::Error> {
    let json = to_json(result, with_dtm)?;
    Ok(match callback {
        Some(callback) => Body {
            content_type: JAVASCRIPT,
            text: format!("{callback}({json})\n"),
        },
        None => Body {
            content_type: JSON,
            text: format!("{json}\n"),
        },
    })
}
