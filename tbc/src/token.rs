//! Cursor tokenizer over ASCII source text.
//!
//! Tokens are byte ranges into the source, produced one at a time by
//! [`next_token`]. Whitespace is skipped except for newlines, which come back
//! as explicit one-character tokens so the parser can see line ends; `//`
//! comments are skipped to the end of their line.

/// Byte range of one token in the source text.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.start + self.len]
    }
}

const TWO_CHAR_OPS: [&str; 5] = ["==", "!=", ">=", "<=", "or"];
const ONE_CHAR_OPS: [u8; 9] = [b'+', b'-', b'*', b'/', b'%', b'=', b'<', b'>', b'!'];
const SEPARATORS: [u8; 5] = [b',', b':', b'\n', b'(', b')'];

/// Scans the next token at or after `pos`, or `None` at the end of input.
///
/// Match order: string literals, multi-character operators (longest first,
/// with `and`/`or` only at word boundaries), single-character operators and
/// separators, then a run of alphanumerics. A decimal point glues two digit
/// runs into one numeric token. A byte that fits none of these comes back as
/// a one-byte token for the parser to reject.
pub fn next_token(source: &str, pos: usize) -> Option<Span> {
    let bytes = source.as_bytes();
    let mut start = pos;

    loop {
        while start < bytes.len() && bytes[start] != b'\n' && bytes[start].is_ascii_whitespace()
        {
            start += 1;
        }
        if start + 1 < bytes.len() && bytes[start] == b'/' && bytes[start + 1] == b'/' {
            while start < bytes.len() && bytes[start] != b'\n' {
                start += 1;
            }
            continue;
        }
        break;
    }
    if start >= bytes.len() {
        return None;
    }

    let b = bytes[start];

    // String literals run through the closing quote; they never span lines.
    if b == b'"' {
        let mut end = start + 1;
        while end < bytes.len() && bytes[end] != b'"' && bytes[end] != b'\n' {
            end += 1;
        }
        if end < bytes.len() && bytes[end] == b'"' {
            end += 1;
        }
        return Some(Span {
            start,
            len: end - start,
        });
    }

    if source[start..].starts_with("and") && !alnum_at(bytes, start + 3) {
        return Some(Span { start, len: 3 });
    }
    for op in TWO_CHAR_OPS.iter() {
        if source[start..].starts_with(op) {
            if *op == "or" && alnum_at(bytes, start + 2) {
                continue;
            }
            return Some(Span { start, len: 2 });
        }
    }
    if ONE_CHAR_OPS.contains(&b) || SEPARATORS.contains(&b) {
        return Some(Span { start, len: 1 });
    }

    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_alphanumeric() {
        end += 1;
    }
    if end > start
        && end + 1 < bytes.len()
        && bytes[end] == b'.'
        && bytes[end + 1].is_ascii_digit()
        && source[start..end].bytes().all(|b| b.is_ascii_digit())
    {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end == start {
        end = start + 1;
    }
    Some(Span {
        start,
        len: end - start,
    })
}

fn alnum_at(bytes: &[u8], index: usize) -> bool {
    bytes.get(index).map_or(false, |b| b.is_ascii_alphanumeric())
}

/// Iterator form of [`next_token`].
pub struct Tokens<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(source: &'a str) -> Tokens<'a> {
        Tokens { source, pos: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let span = next_token(self.source, self.pos)?;
        self.pos = span.start + span.len;
        Some(span)
    }
}
