//! Length and validity checks for literal names.
//!
//! Library installers register primitives under literal names; these are
//! checked here before they are interned so that a malformed name fails the
//! installer instead of producing an unreachable binding.

use std::fmt;

/// Why a piece of text was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextError {
    /// The bytes are not valid UTF-8.
    InvalidUtf8 { valid_up_to: usize },
    /// A name must have at least one character.
    Empty,
    /// A NUL byte appears before the end of the name.
    InteriorNul { index: usize },
    /// Whitespace would split the name when read back.
    Whitespace { index: usize },
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextError::InvalidUtf8 { valid_up_to } => {
                write!(f, "invalid UTF-8 after byte {valid_up_to}")
            }
            TextError::Empty => write!(f, "name is empty"),
            TextError::InteriorNul { index } => write!(f, "NUL byte at offset {index}"),
            TextError::Whitespace { index } => write!(f, "whitespace at offset {index}"),
        }
    }
}

impl std::error::Error for TextError {}

/// Number of characters in `text`, stopping at the first NUL terminator.
///
/// Text handed over by a host may still carry its terminator, so the NUL
/// and anything after it is not counted. Bytes before the terminator must be
/// valid UTF-8.
pub fn text_length(text: &[u8]) -> Result<usize, TextError> {
    let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
    let body = std::str::from_utf8(&text[..end]).map_err(|e| TextError::InvalidUtf8 {
        valid_up_to: e.valid_up_to(),
    })?;
    Ok(body.chars().count())
}

/// Check a literal primitive name and return its length in characters.
pub fn check_literal_name(name: &str) -> Result<usize, TextError> {
    let len = text_length(name.as_bytes())?;
    if len == 0 {
        return match name.find('\0') {
            Some(index) => Err(TextError::InteriorNul { index }),
            None => Err(TextError::Empty),
        };
    }
    if let Some(index) = name.find('\0') {
        return Err(TextError::InteriorNul { index });
    }
    if let Some((index, _)) = name.char_indices().find(|(_, c)| c.is_whitespace()) {
        return Err(TextError::Whitespace { index });
    }
    Ok(len)
}
