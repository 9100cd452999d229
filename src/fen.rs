//! Strict pre-parse validation of position strings.
//!
//! Queries arrive as untrusted text. Before anything is handed to the
//! FEN parser the text is scanned once, left to right, and rejected on
//! the first byte that does not fit the six-field layout:
//!
//! ```text
//! <board> <turn> <castling> <en passant> <halfmoves> <fullmoves>
//! ```

use std::str::Bytes;

use crate::variant::Rules;

/// Replace the URL-friendly `_` separator with spaces.
pub fn normalize(fen: &str) -> String {
    fen.replace('_', " ")
}

/// Check a normalized position string. The king count is judged by the
/// variant rules `R`.
pub fn validate<R: Rules>(fen: &str) -> bool {
    scan(fen).is_some_and(|kings| R::kings_valid(kings.white, kings.black))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Kings {
    white: usize,
    black: usize,
}

fn scan(fen: &str) -> Option<Kings> {
    let mut bytes = fen.bytes();
    let kings = board(&mut bytes)?;

    // 2. Turn
    if !matches!(bytes.next()?, b'w' | b'b') {
        return None;
    }
    separator(&mut bytes)?;

    // 3. Castling
    let mut c = bytes.next()?;
    if c == b'-' {
        separator(&mut bytes)?;
    } else {
        loop {
            if !matches!(c, b'a'..=b'h' | b'A'..=b'H' | b'k' | b'K' | b'q' | b'Q') {
                return None;
            }
            c = bytes.next()?;
            if c == b' ' {
                break;
            }
        }
    }

    // 4. En passant
    let c = bytes.next()?;
    if c != b'-' {
        if !matches!(c, b'a'..=b'h') || !matches!(bytes.next()?, b'3' | b'6') {
            return None;
        }
    }
    separator(&mut bytes)?;

    // 5. Halfmove clock
    let mut c = bytes.next()?;
    loop {
        if !c.is_ascii_digit() {
            return None;
        }
        c = bytes.next()?;
        if c == b' ' {
            break;
        }
    }

    // 6. Fullmove number, which ends the string
    let mut c = bytes.next()?;
    loop {
        if !c.is_ascii_digit() {
            return None;
        }
        match bytes.next() {
            Some(next) => c = next,
            None => return Some(kings),
        }
    }
}

fn board(bytes: &mut Bytes<'_>) -> Option<Kings> {
    let mut kings = Kings::default();

    for rank in (0..8).rev() {
        let mut file = 0;
        let mut last_was_digit = false;

        while file < 8 {
            let c = bytes.next()?;
            match c {
                b'1'..=b'8' => {
                    if last_was_digit {
                        return None;
                    }
                    file += usize::from(c - b'0');
                    last_was_digit = true;
                    continue;
                }
                b'K' => kings.white += 1,
                b'k' => kings.black += 1,
                b'P' | b'N' | b'B' | b'R' | b'Q' | b'p' | b'n' | b'b' | b'r' | b'q' => {}
                _ => return None,
            }
            last_was_digit = false;
            file += 1;
        }

        if file != 8 {
            return None;
        }

        let expected = if rank > 0 { b'/' } else { b' ' };
        if bytes.next()? != expected {
            return None;
        }
    }

    Some(kings)
}

fn separator(bytes: &mut Bytes<'_>) -> Option<()> {
    (bytes.next()? == b' ').then_some(())
}
