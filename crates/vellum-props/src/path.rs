//! Property path parsing.
//!
//! Path syntax: dot-separated keys, `[0]`-style array indices, and bracketed
//! dynamic segments whose content is itself a path resolved against the same
//! bag before being used as a key (e.g. `skills.[selected.skill].value`).

use std::fmt;

/// One segment of a parsed property path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Plain object key.
    Key(String),

    /// Numeric array index.
    Index(usize),

    /// Bracketed sub-path, resolved against the bag at lookup time.
    Dynamic(PropertyPath),
}

/// A parsed property path.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyPath {
    pub segments: Vec<PathSegment>,
}

/// Errors that can occur while parsing a path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("empty property path")]
    Empty,

    #[error("empty path segment at byte {0}")]
    EmptySegment(usize),

    #[error("unbalanced bracket at byte {0}")]
    UnbalancedBracket(usize),
}

impl PropertyPath {
    /// Parse a path string into segments.
    ///
    /// `attacks[0].damage` parses to `Key("attacks"), Index(0), Key("damage")`.
    /// Bracket content that is not all digits is parsed recursively as a
    /// dynamic sub-path.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(PathError::Empty);
        }

        let bytes = input.as_bytes();
        let len = bytes.len();
        let mut segments = Vec::new();
        let mut i = 0;
        // Start of the key chunk currently being scanned.
        let mut start = 0;
        // Whether the current position may legally start a new segment.
        let mut expect_segment = true;

        while i < len {
            match bytes[i] {
                b'.' => {
                    if i > start {
                        segments.push(PathSegment::Key(input[start..i].to_string()));
                    } else if expect_segment {
                        return Err(PathError::EmptySegment(i));
                    }
                    i += 1;
                    start = i;
                    expect_segment = true;
                }
                b'[' => {
                    if i > start {
                        segments.push(PathSegment::Key(input[start..i].to_string()));
                    }
                    let close = find_closing_bracket(bytes, i)
                        .ok_or(PathError::UnbalancedBracket(i))?;
                    let inner = input[i + 1..close].trim();
                    if inner.is_empty() {
                        return Err(PathError::EmptySegment(i + 1));
                    }
                    if inner.bytes().all(|b| b.is_ascii_digit()) {
                        // Digits only: a literal array index.
                        let idx = inner.parse::<usize>().map_err(|_| {
                            PathError::EmptySegment(i + 1)
                        })?;
                        segments.push(PathSegment::Index(idx));
                    } else {
                        segments.push(PathSegment::Dynamic(PropertyPath::parse(inner)?));
                    }
                    i = close + 1;
                    start = i;
                    expect_segment = false;
                }
                b']' => return Err(PathError::UnbalancedBracket(i)),
                _ => {
                    i += 1;
                }
            }
        }

        if start < len {
            segments.push(PathSegment::Key(input[start..].to_string()));
        } else if expect_segment && !segments.is_empty() {
            // Path ended on a '.' with nothing after it.
            return Err(PathError::EmptySegment(len));
        }

        if segments.is_empty() {
            return Err(PathError::Empty);
        }

        Ok(Self { segments })
    }
}

/// Find the matching `]` for the `[` at `open`, honoring nesting.
fn find_closing_bracket(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                PathSegment::Key(k) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", k)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
                PathSegment::Dynamic(sub) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "[{}]", sub)?;
                }
            }
        }
        Ok(())
    }
}
