//! Hand-written ECMAScript tokenizer.
//!
//! The file is tokenized up front. Two places need context the lexer does
//! not have from the grammar:
//! - `/` starts a regular expression or a division. In
//!   [`LexMode::Standard`] the lexer guesses from the previous significant
//!   token; the parser knows better and re-lexes from a [`LexerCheckpoint`]
//!   in [`LexMode::SlashIsRegex`] or [`LexMode::SlashIsDivision`] when the
//!   guess disagrees with the grammar.
//! - `}` either closes a brace or resumes a template after `${ ... }`; a
//!   brace stack tells the two apart.

use super::error::SyntaxError;
use super::token::{Token, TokenKind};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use text_size::{TextRange, TextSize};

/// Punctuators ordered longest first so the first prefix match wins.
/// `/` and `/=` are handled by the regex/division decision.
const PUNCTUATORS: &[&str] = &[
    ">>>=", "...", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==", "!=",
    "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "%=", "&=", "|=", "^=", "<<",
    ">>", "**", "{", "}", "(", ")", "[", "]", ";", ",", "<", ">", "+", "-", "*", "%", "&", "|", "^",
    "!", "~", "?", ":", "=", ".", "@",
];

/// Identifier names after which `/` begins a regular expression.
const REGEX_AFTER_WORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "throw",
    "case",
    "do",
    "else",
    "yield",
    "await",
    "extends",
];

/// How a `/` at the start of the next token is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexMode {
    /// Guess from the previous significant token.
    Standard,
    /// The grammar expects an operand.
    SlashIsRegex,
    /// The grammar expects an operator.
    SlashIsDivision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Brace {
    Block,
    Substitution,
}

/// Returns true for the ECMAScript line terminators.
#[must_use]
pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_id_start(ch: char) -> bool {
    ch == '$' || ch == '_' || unicode_ident::is_xid_start(ch)
}

fn is_id_continue(ch: char) -> bool {
    ch == '$' || ch == '\u{200c}' || ch == '\u{200d}' || unicode_ident::is_xid_continue(ch)
}

pub(crate) fn to_size(offset: usize) -> TextSize {
    // Sources above u32::MAX are rejected before lexing starts.
    TextSize::try_from(offset).unwrap_or(TextSize::new(u32::MAX))
}

/// Tokenizes `source`, keeping comments as trivia tokens.
///
/// # Errors
///
/// Returns a [`SyntaxError`] for unterminated literals or comments and for
/// characters that cannot start a token.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, SyntaxError> {
    let buffer = TokenBuffer::lex(source)?;
    match buffer.error {
        Some(error) => Err(error),
        None => Ok(buffer.tokens),
    }
}

/// Lexer state right before a token.
#[derive(Clone, Debug)]
pub struct LexerCheckpoint<'a> {
    pos: usize,
    braces: SmallVec<[Brace; 8]>,
    newline_before: bool,
    prev: Option<(TokenKind, &'a str)>,
}

/// Tokens of a whole file, re-lexable from any token that starts with `/`.
#[derive(Debug)]
pub struct TokenBuffer<'a> {
    source: &'a str,
    /// All tokens, comments included.
    pub tokens: Vec<Token<'a>>,
    /// The lexer error that stopped tokenization, if any. Tokens before it
    /// are kept: re-lexing an earlier `/` may make it go away.
    pub error: Option<SyntaxError>,
    checkpoints: FxHashMap<usize, LexerCheckpoint<'a>>,
}

impl<'a> TokenBuffer<'a> {
    /// Tokenizes `source` in [`LexMode::Standard`].
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::SourceTooLarge`] for sources whose offsets do
    /// not fit in 32 bits; other lexer errors are stored in `error`.
    pub fn lex(source: &'a str) -> Result<Self, SyntaxError> {
        if u32::try_from(source.len()).is_err() {
            return Err(SyntaxError::SourceTooLarge);
        }
        let mut buffer = Self {
            source,
            tokens: Vec::new(),
            error: None,
            checkpoints: FxHashMap::default(),
        };
        buffer.fill(Lexer::new(source), LexMode::Standard);
        Ok(buffer)
    }

    /// Lexes the token at `index` again in `mode`, along with everything
    /// after it. Returns false when that token does not start with `/`.
    pub fn relex(&mut self, index: usize, mode: LexMode) -> bool {
        let Some(checkpoint) = self.checkpoints.get(&index).cloned() else {
            return false;
        };
        self.tokens.truncate(index);
        self.checkpoints.retain(|&i, _| i < index);
        self.error = None;
        self.fill(Lexer::restore(self.source, checkpoint), mode);
        true
    }

    fn fill(&mut self, mut lexer: Lexer<'a>, mut mode: LexMode) {
        loop {
            let checkpoint = lexer.checkpoint();
            match lexer.next_token(mode) {
                Ok(Some(token)) => {
                    if token.starts_with_slash() {
                        self.checkpoints.insert(self.tokens.len(), checkpoint);
                    }
                    self.tokens.push(token);
                }
                Ok(None) => return,
                Err(error) => {
                    self.error = Some(error);
                    return;
                }
            }
            mode = LexMode::Standard;
        }
    }
}

/// Cursor over the source text.
#[derive(Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    braces: SmallVec<[Brace; 8]>,
    newline_before: bool,
    prev: Option<(TokenKind, &'a str)>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            braces: SmallVec::new(),
            newline_before: false,
            prev: None,
        }
    }

    /// Saves the state needed to lex again from the current position.
    #[must_use]
    pub fn checkpoint(&self) -> LexerCheckpoint<'a> {
        LexerCheckpoint {
            pos: self.pos,
            braces: self.braces.clone(),
            newline_before: self.newline_before,
            prev: self.prev,
        }
    }

    /// Resumes lexing `source` from `checkpoint`.
    #[must_use]
    pub fn restore(source: &'a str, checkpoint: LexerCheckpoint<'a>) -> Self {
        Self {
            source,
            pos: checkpoint.pos,
            braces: checkpoint.braces,
            newline_before: checkpoint.newline_before,
            prev: checkpoint.prev,
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Produces the next token, or `None` at the end of input. `mode` only
    /// matters when the token starts with `/`.
    ///
    /// # Errors
    ///
    /// See [`tokenize`].
    pub fn next_token(&mut self, mode: LexMode) -> Result<Option<Token<'a>>, SyntaxError> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(ch) = self.peek() else {
            return Ok(None);
        };
        let next = self.peek_nth(1);

        let kind = match ch {
            '/' if next == Some('/') => {
                self.skip_line();
                TokenKind::LineComment
            }
            '/' if next == Some('*') => {
                self.block_comment(start)?;
                TokenKind::BlockComment
            }
            '#' if start == 0 && next == Some('!') => {
                self.skip_line();
                TokenKind::LineComment
            }
            '\'' | '"' => {
                self.string(ch, start)?;
                TokenKind::String
            }
            '`' => {
                self.pos += 1;
                self.template(start, true)?
            }
            '}' if self.braces.last() == Some(&Brace::Substitution) => {
                self.braces.pop();
                self.pos += 1;
                self.template(start, false)?
            }
            '0'..='9' => {
                self.number();
                TokenKind::Number
            }
            '.' if next.is_some_and(|c| c.is_ascii_digit()) => {
                self.number();
                TokenKind::Number
            }
            '#' if next.is_some_and(|c| is_id_start(c) || c == '\\') => {
                self.pos += 1;
                self.identifier();
                TokenKind::PrivateName
            }
            '/' if self.slash_is_regex(mode) => match self.regex(start) {
                Ok(()) => TokenKind::Regex,
                Err(error) if mode == LexMode::SlashIsRegex => return Err(error),
                // A guess that cannot be a regex is a division.
                Err(_) => {
                    self.pos = start;
                    self.division(next)
                }
            },
            '/' => self.division(next),
            c if is_id_start(c) || c == '\\' => {
                self.identifier();
                TokenKind::Identifier
            }
            _ => {
                self.punctuator(ch, start)?;
                TokenKind::Punctuator
            }
        };

        let text = &self.source[start..self.pos];
        let token = Token {
            kind,
            range: TextRange::new(to_size(start), to_size(self.pos)),
            text,
            newline_before: self.newline_before,
        };

        if kind == TokenKind::BlockComment && text.chars().any(is_line_terminator) {
            self.newline_before = true;
        }
        if !kind.is_trivia() {
            self.newline_before = false;
            self.prev = Some((kind, text));
            match kind {
                TokenKind::Punctuator if text == "{" => self.braces.push(Brace::Block),
                TokenKind::Punctuator if text == "}" => {
                    self.braces.pop();
                }
                _ => {}
            }
        }
        Ok(Some(token))
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if is_line_terminator(ch) {
                self.newline_before = true;
            } else if !(ch.is_whitespace() || ch == '\u{feff}') {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn skip_line(&mut self) {
        let len = self
            .rest()
            .find(is_line_terminator)
            .unwrap_or(self.rest().len());
        self.pos += len;
    }

    fn block_comment(&mut self, start: usize) -> Result<(), SyntaxError> {
        match self.source[start + 2..].find("*/") {
            Some(end) => {
                self.pos = start + 2 + end + 2;
                Ok(())
            }
            None => Err(SyntaxError::UnterminatedComment(start)),
        }
    }

    fn string(&mut self, quote: char, start: usize) -> Result<(), SyntaxError> {
        self.pos += 1;
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(()),
                Some('\\') => {
                    if self.bump() == Some('\r') && self.peek() == Some('\n') {
                        self.pos += 1;
                    }
                }
                Some('\n' | '\r') | None => return Err(SyntaxError::UnterminatedString(start)),
                Some(_) => {}
            }
        }
    }

    /// Scans template characters after an opening backtick or a `}` that
    /// closes a substitution.
    fn template(&mut self, start: usize, opening: bool) -> Result<TokenKind, SyntaxError> {
        loop {
            match self.bump() {
                Some('`') => {
                    return Ok(if opening {
                        TokenKind::NoSubstitutionTemplate
                    } else {
                        TokenKind::TemplateTail
                    });
                }
                Some('$') if self.peek() == Some('{') => {
                    self.pos += 1;
                    self.braces.push(Brace::Substitution);
                    return Ok(if opening {
                        TokenKind::TemplateHead
                    } else {
                        TokenKind::TemplateMiddle
                    });
                }
                Some('\\') => {
                    self.bump();
                }
                Some(_) => {}
                None => return Err(SyntaxError::UnterminatedTemplate(start)),
            }
        }
    }

    fn number(&mut self) {
        let bytes = self.source.as_bytes();
        let radix_prefix = bytes[self.pos] == b'0'
            && matches!(
                bytes.get(self.pos + 1),
                Some(b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
            );
        if radix_prefix {
            self.pos += 2;
            self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
            return;
        }
        self.eat_while(|c| c.is_ascii_digit() || c == '_');
        if self.peek() == Some('.') {
            self.pos += 1;
            self.eat_while(|c| c.is_ascii_digit() || c == '_');
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            self.eat_while(|c| c.is_ascii_digit() || c == '_');
        }
        if self.peek() == Some('n') {
            self.pos += 1;
        }
    }

    fn identifier(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\\' {
                // \uXXXX or \u{...}
                self.pos += 1;
                if self.peek() == Some('u') {
                    self.pos += 1;
                    if self.peek() == Some('{') {
                        self.eat_while(|c| c != '}');
                        self.bump();
                    } else {
                        self.eat_while(|c| c.is_ascii_hexdigit());
                    }
                }
            } else if is_id_continue(ch) {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    fn regex(&mut self, start: usize) -> Result<(), SyntaxError> {
        self.pos += 1;
        let mut in_class = false;
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some(c) if !is_line_terminator(c) => {}
                    _ => return Err(SyntaxError::UnterminatedRegex(start)),
                },
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                Some(c) if is_line_terminator(c) => {
                    return Err(SyntaxError::UnterminatedRegex(start));
                }
                Some(_) => {}
                None => return Err(SyntaxError::UnterminatedRegex(start)),
            }
        }
        self.eat_while(is_id_continue);
        Ok(())
    }

    fn punctuator(&mut self, ch: char, start: usize) -> Result<(), SyntaxError> {
        let rest = self.rest();
        // `a?.5:b` is a conditional, not optional chaining.
        if rest.starts_with("?.") && rest[2..].starts_with(|c: char| c.is_ascii_digit()) {
            self.pos += 1;
            return Ok(());
        }
        match PUNCTUATORS.iter().find(|p| rest.starts_with(**p)) {
            Some(punct) => {
                self.pos += punct.len();
                Ok(())
            }
            None => Err(SyntaxError::UnexpectedCharacter { ch, offset: start }),
        }
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn division(&mut self, next: Option<char>) -> TokenKind {
        self.pos += if next == Some('=') { 2 } else { 1 };
        TokenKind::Punctuator
    }

    fn slash_is_regex(&self, mode: LexMode) -> bool {
        match mode {
            LexMode::SlashIsRegex => true,
            LexMode::SlashIsDivision => false,
            LexMode::Standard => self.regex_allowed(),
        }
    }

    fn regex_allowed(&self) -> bool {
        match self.prev {
            None => true,
            Some((TokenKind::Punctuator, text)) => !matches!(text, ")" | "]" | "++" | "--"),
            Some((TokenKind::Identifier, text)) => REGEX_AFTER_WORDS.contains(&text),
            Some((TokenKind::TemplateHead | TokenKind::TemplateMiddle, _)) => true,
            Some(_) => false,
        }
    }
}
