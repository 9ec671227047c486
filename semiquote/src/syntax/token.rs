//! Token types produced by the lexer.

use text_size::TextRange;

/// Lexical class of a token.
///
/// Keywords are not split out from identifiers: whether `get`, `static` or
/// `of` is a keyword depends on where it appears, so the parser decides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier name, including keywords and reserved words.
    Identifier,
    /// `#name` in a class body or before `in`.
    PrivateName,
    /// Numeric literal, including bigint literals.
    Number,
    /// Single- or double-quoted string literal.
    String,
    /// Template literal without substitutions.
    NoSubstitutionTemplate,
    /// Template text up to and including the first `${`.
    TemplateHead,
    /// Template text between `}` and the next `${`.
    TemplateMiddle,
    /// Template text from the last `}` to the closing backtick.
    TemplateTail,
    /// Regular expression literal including its flags.
    Regex,
    /// Operator or delimiter.
    Punctuator,
    /// `// ...` comment or a hashbang line.
    LineComment,
    /// `/* ... */` comment.
    BlockComment,
}

impl TokenKind {
    /// Comments carry no syntax; lookups for the "next token" skip them.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }
}

/// A classified slice of the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// Lexical class.
    pub kind: TokenKind,
    /// Half-open byte range in the source.
    pub range: TextRange,
    /// Raw source text of the token.
    pub text: &'a str,
    /// A line terminator separates this token from the previous significant token.
    pub newline_before: bool,
}

impl Token<'_> {
    /// Returns true for the punctuator `punct`.
    #[must_use]
    pub fn is_punct(&self, punct: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.text == punct
    }

    /// Returns true for the identifier name `word` (keywords included).
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == word
    }

    /// A regex or a `/`/`/=` punctuator: the tokens whose reading depends
    /// on the grammar.
    #[must_use]
    pub fn starts_with_slash(&self) -> bool {
        match self.kind {
            TokenKind::Regex => true,
            TokenKind::Punctuator => self.text.starts_with('/'),
            _ => false,
        }
    }

    /// Byte offset of the first character.
    #[must_use]
    pub fn start(&self) -> usize {
        usize::from(self.range.start())
    }

    /// Byte offset one past the last character.
    #[must_use]
    pub fn end(&self) -> usize {
        usize::from(self.range.end())
    }
}
