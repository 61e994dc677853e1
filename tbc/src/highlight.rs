//! Token classification for editor coloring.

use tbvm::{is_boolean, is_float, is_integer, Opcode};

use crate::codegen::is_function_name;
use crate::parser::{is_id, is_string_lit};
use crate::token::next_token;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TokenKind {
    Comment,
    Keyword,
    StringLit,
    NumericalLit,
    Variable,
    Function,
}

/// A classified range of source text.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HighlightToken {
    pub start: usize,
    pub length: usize,
    pub kind: TokenKind,
}

/// Scans the whole source and classifies every colorable token. Separators
/// and stray bytes produce no entry.
pub fn highlight(source: &str) -> Vec<HighlightToken> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos].is_ascii_whitespace() {
            pos += 1;
            continue;
        }
        // Comments are invisible to the tokenizer, so spot them here.
        if bytes[pos] == b'/' && bytes.get(pos + 1) == Some(&b'/') {
            let start = pos;
            while pos < bytes.len() && bytes[pos] != b'\n' {
                pos += 1;
            }
            tokens.push(HighlightToken {
                start,
                length: pos - start,
                kind: TokenKind::Comment,
            });
            continue;
        }

        let span = match next_token(source, pos) {
            Some(span) => span,
            None => break,
        };
        let text = span.text(source);

        let kind = if is_function_name(text) {
            Some(TokenKind::Function)
        } else if text.parse::<Opcode>().is_ok() {
            Some(TokenKind::Keyword)
        } else if is_string_lit(text) {
            Some(TokenKind::StringLit)
        } else if is_boolean(text) || is_float(text) || is_integer(text) {
            Some(TokenKind::NumericalLit)
        } else if is_id(text) {
            Some(TokenKind::Variable)
        } else {
            None
        };

        if let Some(kind) = kind {
            tokens.push(HighlightToken {
                start: span.start,
                length: span.len,
                kind,
            });
        }
        pos = span.start + span.len;
    }

    tokens
}
