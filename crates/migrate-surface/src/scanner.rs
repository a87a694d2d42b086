//! Bracket-aware scanning over TypeScript-like text.
//!
//! The declaration parser works on a *masked* copy of the input in which
//! comment bodies and string-literal contents are blanked with spaces. The
//! mask has the same byte length as the input, so every offset found in the
//! mask can be used to slice the original text verbatim.
//!
//! All delimiters are ASCII, which keeps every offset on a UTF-8 boundary.

/// Blanks comments and string-literal contents, keeping quotes and newlines.
///
/// Regex literals are not recognized; a quote inside one can mask the rest
/// of its line.
///
/// # Examples
///
/// ```
/// use glide_migrate_surface::scanner::mask_trivia;
///
/// let masked = mask_trivia("get(key: \"a(b\"): T; // x()");
/// assert!(masked.starts_with("get(key: \"   \"): T;"));
/// assert_eq!(masked.trim_end(), "get(key: \"   \"): T;");
/// ```
#[must_use]
pub fn mask_trivia(text: &str) -> String {
    #[derive(Clone, Copy)]
    enum State {
        Code,
        LineComment,
        BlockComment,
        Str(u8),
    }

    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut state = State::Code;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match state {
            State::Code => match (b, next) {
                (b'/', Some(b'/')) => {
                    state = State::LineComment;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                (b'/', Some(b'*')) => {
                    state = State::BlockComment;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                (b'"' | b'\'' | b'`', _) => {
                    state = State::Str(b);
                    out.push(b);
                }
                _ => out.push(b),
            },
            State::LineComment => {
                if b == b'\n' {
                    state = State::Code;
                    out.push(b'\n');
                } else {
                    out.push(blank(b));
                }
            }
            State::BlockComment => {
                if b == b'*' && next == Some(b'/') {
                    state = State::Code;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                out.push(blank(b));
            }
            State::Str(quote) => {
                if b == b'\\' && next.is_some() {
                    out.push(b' ');
                    out.push(blank(bytes[i + 1]));
                    i += 2;
                    continue;
                }
                if b == quote {
                    state = State::Code;
                    out.push(b);
                } else if b == b'\n' && quote != b'`' {
                    // Unterminated literal: recover at the line break.
                    state = State::Code;
                    out.push(b'\n');
                } else {
                    out.push(blank(b));
                }
            }
        }
        i += 1;
    }

    // Only ASCII bytes were written in place of input bytes, and untouched
    // bytes were copied whole, so the buffer is valid UTF-8. Multi-byte
    // characters inside code are copied byte-for-byte.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

const fn blank(b: u8) -> u8 {
    if b == b'\n' { b'\n' } else { b' ' }
}

/// Returns `true` if the `>` at `i` is the tail of an `=>` arrow.
fn is_arrow_tail(bytes: &[u8], i: usize) -> bool {
    i > 0 && bytes[i - 1] == b'='
}

/// Returns `true` if the `=` at `i` starts an `=>` arrow or a comparison.
fn is_non_assignment_eq(bytes: &[u8], i: usize) -> bool {
    matches!(bytes.get(i + 1), Some(b'>' | b'='))
        || (i > 0 && matches!(bytes[i - 1], b'=' | b'!' | b'<' | b'>'))
}

/// Finds the bracket matching the opener at `open`.
///
/// When `angle` is set, `<`/`>` count as brackets (type context). In code
/// context they are ignored so comparisons do not unbalance the scan.
/// Returns `None` if the text ends first.
#[must_use]
pub fn find_close(masked: &str, open: usize, angle: bool) -> Option<usize> {
    let bytes = masked.as_bytes();
    let mut depth = 0usize;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b'<' if angle => depth += 1,
            b'>' if angle && !is_arrow_tail(bytes, i) => depth = depth.saturating_sub(1),
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            _ => continue,
        }
        if depth == 0 {
            return Some(i);
        }
    }
    None
}

/// Finds the first byte in `targets` at bracket depth zero within
/// `masked[start..end]`. A `=` target never matches `=>` or comparisons.
#[must_use]
pub fn find_top_level(masked: &str, start: usize, end: usize, targets: &[u8]) -> Option<usize> {
    let bytes = masked.as_bytes();
    let end = end.min(bytes.len());
    let mut depth = 0usize;

    for i in start..end {
        let b = bytes[i];
        if depth == 0 && targets.contains(&b) {
            if b == b'=' && is_non_assignment_eq(bytes, i) {
                continue;
            }
            return Some(i);
        }
        match b {
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b'>' if !is_arrow_tail(bytes, i) => depth = depth.saturating_sub(1),
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// Splits `masked[start..end]` at top-level `sep` bytes, returning byte
/// ranges into the same text.
#[must_use]
pub fn split_top_level(masked: &str, start: usize, end: usize, sep: u8) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut cursor = start;
    while let Some(at) = find_top_level(masked, cursor, end, &[sep]) {
        ranges.push((cursor, at));
        cursor = at + 1;
    }
    ranges.push((cursor, end));
    ranges
}

/// Narrows `(start, end)` so it excludes surrounding ASCII whitespace.
#[must_use]
pub fn trim_range(masked: &str, start: usize, end: usize) -> (usize, usize) {
    let bytes = masked.as_bytes();
    let mut s = start;
    let mut e = end.min(bytes.len());
    while s < e && bytes[s].is_ascii_whitespace() {
        s += 1;
    }
    while e > s && bytes[e - 1].is_ascii_whitespace() {
        e -= 1;
    }
    (s, e)
}

/// Advances past ASCII whitespace.
#[must_use]
pub fn skip_whitespace(masked: &str, mut pos: usize, end: usize) -> usize {
    let bytes = masked.as_bytes();
    while pos < end && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

/// Finds where a type annotation starting at `start` ends.
///
/// The annotation ends at a top-level `;` or `,`, at `limit`, at a
/// top-level `{` once some type text has been seen (that brace opens a
/// body), or at a top-level line break that does not leave the type
/// dangling (after `|`, `&`, `:` or an arrow the type continues).
#[must_use]
pub fn scan_type_end(masked: &str, start: usize, limit: usize) -> usize {
    let bytes = masked.as_bytes();
    let limit = limit.min(bytes.len());
    let mut depth = 0usize;
    let mut last_significant: Option<usize> = None;

    let mut i = start;
    while i < limit {
        let b = bytes[i];
        if depth == 0 {
            match b {
                b';' | b',' => return i,
                b'{' if last_significant.is_some() => return i,
                b'}' | b')' | b']' => return i,
                b'\n' => {
                    if let Some(last) = last_significant
                        && !continues_type(bytes, last)
                        && !next_line_continues(bytes, i, limit)
                    {
                        return i;
                    }
                }
                _ => {}
            }
        }
        match b {
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b'>' if !is_arrow_tail(bytes, i) => depth = depth.saturating_sub(1),
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if !b.is_ascii_whitespace() {
            last_significant = Some(i);
        }
        i += 1;
    }
    limit
}

/// Returns `true` if the next line opens with a union, intersection or
/// arrow operator that extends the current type.
fn next_line_continues(bytes: &[u8], newline: usize, limit: usize) -> bool {
    let next = bytes[newline + 1..limit]
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .map(|offset| newline + 1 + offset);
    match next {
        Some(i) => match bytes[i] {
            b'|' | b'&' => true,
            b'=' => bytes.get(i + 1) == Some(&b'>'),
            _ => false,
        },
        None => false,
    }
}

fn continues_type(bytes: &[u8], last: usize) -> bool {
    match bytes[last] {
        b'|' | b'&' | b':' | b'?' => true,
        b'>' => is_arrow_tail(bytes, last),
        _ => false,
    }
}

/// Skips a non-method class member starting at `pos`.
///
/// Consumes up to and including a top-level `;`, or stops at a top-level
/// line break once the member is complete, or at `limit`.
#[must_use]
pub fn skip_member(masked: &str, pos: usize, limit: usize) -> usize {
    let bytes = masked.as_bytes();
    let limit = limit.min(bytes.len());
    let mut depth = 0usize;
    let mut last_significant: Option<usize> = None;

    let mut i = pos;
    while i < limit {
        let b = bytes[i];
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b';' if depth == 0 => return i + 1,
            b'\n' if depth == 0 => {
                if let Some(last) = last_significant
                    && !continues_expression(bytes, last)
                    && !next_line_continues(bytes, i, limit)
                {
                    return i + 1;
                }
            }
            _ => {}
        }
        if !b.is_ascii_whitespace() {
            last_significant = Some(i);
        }
        i += 1;
    }
    limit
}

fn continues_expression(bytes: &[u8], last: usize) -> bool {
    matches!(
        bytes[last],
        b'|' | b'&' | b':' | b'=' | b',' | b'?' | b'+' | b'-' | b'*' | b'.'
    ) || (bytes[last] == b'>' && is_arrow_tail(bytes, last))
}
