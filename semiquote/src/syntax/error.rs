//! Syntax errors raised while tokenizing or parsing.

/// A file that cannot be tokenized or parsed.
///
/// Offsets are byte offsets into the source; callers map them to
/// line/column with [`crate::utils::LineIndex`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// A quote was opened and never closed on the same line.
    #[error("unterminated string literal at byte {0}")]
    UnterminatedString(usize),
    /// A backtick was opened and never closed.
    #[error("unterminated template literal at byte {0}")]
    UnterminatedTemplate(usize),
    /// `/*` without a matching `*/`.
    #[error("unterminated comment at byte {0}")]
    UnterminatedComment(usize),
    /// A regular expression ran into a line break or the end of input.
    #[error("unterminated regular expression at byte {0}")]
    UnterminatedRegex(usize),
    /// A character that cannot start any token.
    #[error("unexpected character {ch:?} at byte {offset}")]
    UnexpectedCharacter {
        /// The offending character.
        ch: char,
        /// Byte offset of the character.
        offset: usize,
    },
    /// A token the grammar does not allow here.
    #[error("unexpected token `{found}` at byte {offset}, expected {expected}")]
    UnexpectedToken {
        /// Raw text of the token.
        found: String,
        /// Byte offset of the token.
        offset: usize,
        /// What the parser was looking for.
        expected: &'static str,
    },
    /// The input stopped in the middle of a construct.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd {
        /// What the parser was looking for.
        expected: &'static str,
        /// Length of the source.
        offset: usize,
    },
    /// Brackets, blocks or operators nested past what the parser follows.
    #[error("nesting too deep at byte {offset}")]
    NestingTooDeep {
        /// Byte offset of the token that went one level too deep.
        offset: usize,
    },
    /// Offsets are 32-bit.
    #[error("source text is larger than 4 GiB")]
    SourceTooLarge,
}

impl SyntaxError {
    /// Byte offset the error points at, when it has one.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::UnterminatedString(offset)
            | Self::UnterminatedTemplate(offset)
            | Self::UnterminatedComment(offset)
            | Self::UnterminatedRegex(offset)
            | Self::UnexpectedCharacter { offset, .. }
            | Self::UnexpectedToken { offset, .. }
            | Self::UnexpectedEnd { offset, .. }
            | Self::NestingTooDeep { offset } => Some(*offset),
            Self::SourceTooLarge => None,
        }
    }
}
