//! Dice notation parsing.
//!
//! Grammar: `<count>d<sides>` followed by zero or more modifier suffixes:
//! `kh<n>` / `kl<n>` keep highest/lowest, `dh<n>` / `dl<n>` drop
//! highest/lowest, `r<t>` reroll faces below `t`. A missing count means one
//! die (`d20` is `1d20`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest accepted dice pool. Guards degenerate designer input.
pub const MAX_DICE: u32 = 1000;

/// Largest accepted die size.
pub const MAX_SIDES: u32 = 10_000;

/// Errors when parsing dice notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceParseError {
    #[error("empty dice expression")]
    Empty,

    #[error("invalid dice format: {0}")]
    InvalidFormat(String),

    #[error("dice count must be between 1 and {MAX_DICE}")]
    InvalidDiceCount,

    #[error("die size must be between 2 and {MAX_SIDES}")]
    InvalidDieSize,
}

/// A keep/drop/reroll suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "n")]
pub enum DiceModifier {
    KeepHighest(u32),
    KeepLowest(u32),
    DropHighest(u32),
    DropLowest(u32),
    /// Reroll any die showing less than this face, up to the reroll cap.
    RerollBelow(i64),
}

/// A parsed dice expression like `4d6kh3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceSpec {
    pub count: u32,
    pub sides: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<DiceModifier>,
}

impl DiceSpec {
    /// Create a spec, validating count and size bounds.
    pub fn new(count: u32, sides: u32, modifiers: Vec<DiceModifier>) -> Result<Self, DiceParseError> {
        if count == 0 || count > MAX_DICE {
            return Err(DiceParseError::InvalidDiceCount);
        }
        if sides < 2 || sides > MAX_SIDES {
            return Err(DiceParseError::InvalidDieSize);
        }
        Ok(Self { count, sides, modifiers })
    }

    /// Parse notation like `2d6`, `d20`, `4d6kh3`, `3d6r2kl2`.
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }
        let bytes = input.as_bytes();

        let d_pos = input.find('d').ok_or_else(|| {
            DiceParseError::InvalidFormat(format!("missing 'd' in '{}'", input))
        })?;

        let count = if d_pos == 0 {
            1
        } else {
            input[..d_pos].parse::<u32>().map_err(|_| {
                DiceParseError::InvalidFormat(format!("invalid dice count in '{}'", input))
            })?
        };

        // Sides: digits directly after 'd'.
        let mut i = d_pos + 1;
        let sides_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == sides_start {
            return Err(DiceParseError::InvalidFormat(format!(
                "missing die size in '{}'",
                input
            )));
        }
        let sides = input[sides_start..i].parse::<u32>().map_err(|_| {
            DiceParseError::InvalidFormat(format!("invalid die size in '{}'", input))
        })?;

        // Modifier suffixes until end of input.
        let mut modifiers = Vec::new();
        while i < bytes.len() {
            let (modifier, next) = parse_modifier(&input, i)?;
            modifiers.push(modifier);
            i = next;
        }

        Self::new(count, sides, modifiers)
    }
}

/// Parse one modifier starting at byte `i`; returns it and the next offset.
fn parse_modifier(input: &str, i: usize) -> Result<(DiceModifier, usize), DiceParseError> {
    let bytes = input.as_bytes();
    let bad = || DiceParseError::InvalidFormat(format!("invalid modifier in '{}'", input));

    let (kind_len, make): (usize, fn(u32) -> DiceModifier) = match &input[i..] {
        s if s.starts_with("kh") => (2, DiceModifier::KeepHighest),
        s if s.starts_with("kl") => (2, DiceModifier::KeepLowest),
        s if s.starts_with("dh") => (2, DiceModifier::DropHighest),
        s if s.starts_with("dl") => (2, DiceModifier::DropLowest),
        s if s.starts_with('r') => (1, |n| DiceModifier::RerollBelow(n as i64)),
        _ => return Err(bad()),
    };

    let num_start = i + kind_len;
    let mut end = num_start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == num_start {
        return Err(bad());
    }
    let n = input[num_start..end].parse::<u32>().map_err(|_| bad())?;
    Ok((make(n), end))
}

impl fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        for m in &self.modifiers {
            match m {
                DiceModifier::KeepHighest(n) => write!(f, "kh{}", n)?,
                DiceModifier::KeepLowest(n) => write!(f, "kl{}", n)?,
                DiceModifier::DropHighest(n) => write!(f, "dh{}", n)?,
                DiceModifier::DropLowest(n) => write!(f, "dl{}", n)?,
                DiceModifier::RerollBelow(t) => write!(f, "r{}", t)?,
            }
        }
        Ok(())
    }
}
