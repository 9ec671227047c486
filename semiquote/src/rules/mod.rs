use crate::config::StyleConfig;
use crate::fix::Edit;
use crate::syntax::ast::{ClassMember, Stmt, StringLit, TemplateLit};
use crate::syntax::Token;
use crate::utils::LineIndex;
use rustc_hash::FxHashSet;
use serde::Serialize;
use text_size::TextRange;

#[derive(Debug, Clone, Copy)]
/// Context passed to rules during analysis.
pub struct Context<'a> {
    /// Original text of the file.
    pub source: &'a str,
    /// All tokens, comments included.
    pub tokens: &'a [Token<'a>],
    /// Line index for accurate line/column mapping.
    pub line_index: &'a LineIndex,
    /// Token indices of the `}` closing an arrow function's block body.
    pub arrow_body_ends: &'a FxHashSet<usize>,
}

impl Context<'_> {
    /// Raw source text of `range`.
    #[must_use]
    pub fn text(&self, range: TextRange) -> &str {
        &self.source[range]
    }

    /// Builds a diagnostic positioned at the start of `range`.
    #[must_use]
    pub fn diagnostic(
        &self,
        metadata: RuleMetadata,
        message_id: MessageId,
        range: TextRange,
        fix: Option<Edit>,
    ) -> Diagnostic {
        let (line, col) = self.line_index.line_col(self.source, range.start());
        Diagnostic {
            rule_id: metadata.id,
            message_id,
            description: None,
            message: message_id.message().to_owned(),
            start_byte: usize::from(range.start()),
            end_byte: usize::from(range.end()),
            line,
            col,
            fix,
        }
    }
}

/// Kind of violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageId {
    /// A literal uses the wrong quote character.
    WrongQuotes,
    /// A statement lacks its terminating semicolon.
    MissingSemi,
    /// A statement has a semicolon it should not have.
    ExtraSemi,
}

impl MessageId {
    /// Identifier as used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WrongQuotes => "wrongQuotes",
            Self::MissingSemi => "missingSemi",
            Self::ExtraSemi => "extraSemi",
        }
    }

    /// Message template; `{description}` is filled in by the quotes rule.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::WrongQuotes => "Strings must use {description}.",
            Self::MissingSemi => "Missing semicolon.",
            Self::ExtraSemi => "Extra semicolon.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single violation found by a rule, with its fix when one is safe.
pub struct Diagnostic {
    /// ID of the rule that triggered the diagnostic.
    pub rule_id: &'static str,
    /// Kind of violation.
    pub message_id: MessageId,
    /// Expected style name for `wrongQuotes`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    /// Human-readable message.
    pub message: String,
    /// Start byte of the reported range.
    pub start_byte: usize,
    /// End byte of the reported range.
    pub end_byte: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in characters.
    pub col: usize,
    /// Replacement that repairs the violation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Edit>,
}

impl Diagnostic {
    /// Fills the `{description}` placeholder.
    #[must_use]
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.message = self.message.replace("{description}", description);
        self.description = Some(description);
        self
    }

    /// True when a fix is attached.
    #[must_use]
    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
/// Metadata associated with a rule.
pub struct RuleMetadata {
    /// Unique code/ID of the rule.
    pub id: &'static str,
    /// Category of the rule.
    pub category: &'static str,
}

/// Syntactic container of a statement or class member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enclosing {
    /// Top level of the file.
    Program,
    /// `{ ... }` of a block, function body or static block, braces included.
    Block {
        /// From `{` to `}`.
        range: TextRange,
    },
    /// `{ ... }` of a class.
    ClassBody {
        /// From `{` to `}`.
        range: TextRange,
    },
    /// Statement list of a `case` or `default` clause.
    SwitchCase,
    /// Sole body of `if`, a loop, a label or `with`.
    Statement,
}

/// Where a literal appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralSite {
    /// Any expression position not listed below.
    Expression,
    /// The whole, unparenthesised expression of a statement.
    Statement {
        /// The statement belongs to a directive prologue.
        directive: bool,
        /// The statement is a direct child of a program or function body.
        body_level: bool,
    },
    /// Non-computed key of a property, method or class member.
    PropertyKey,
    /// Module specifier of an import or re-export, or an import attribute value.
    ModuleSource,
    /// Name in an import/export specifier or an import attribute key.
    ModuleExportName,
}

/// What the walker hands to each rule.
#[derive(Debug, Clone, Copy)]
pub enum Node<'n> {
    /// A statement, visited before its children.
    Statement {
        /// The statement.
        stmt: &'n Stmt,
        /// Its container.
        enclosing: Enclosing,
    },
    /// A class element.
    ClassMember {
        /// The member.
        member: &'n ClassMember,
        /// Its class body.
        enclosing: Enclosing,
    },
    /// A quoted string.
    StringLiteral {
        /// The literal.
        literal: StringLit,
        /// Its position.
        site: LiteralSite,
    },
    /// A template literal, tagged or not.
    TemplateLiteral {
        /// The literal.
        literal: &'n TemplateLit,
        /// Its position.
        site: LiteralSite,
    },
}

/// Trait defining a style rule.
pub trait Rule: Send + Sync {
    /// Returns the descriptive name of the rule.
    fn name(&self) -> &'static str;
    /// Returns the unique code/ID of the rule.
    fn code(&self) -> &'static str {
        self.metadata().id
    }
    /// Returns the category/functional group of the rule.
    fn category(&self) -> &'static str {
        self.metadata().category
    }
    /// Returns the full metadata for the rule.
    fn metadata(&self) -> RuleMetadata;
    /// Called for every node the walker reaches.
    fn visit_node(&mut self, _node: &Node<'_>, _context: &Context<'_>) -> Option<Vec<Diagnostic>> {
        None
    }
}

/// Instantiates the enabled rules in registration order.
#[must_use]
pub fn get_rules(config: &StyleConfig) -> Vec<Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = Vec::new();
    if let Some(options) = config.quotes {
        rules.push(Box::new(quotes::QuotesRule::new(options)));
    }
    if let Some(options) = config.semi {
        rules.push(Box::new(semi::SemiRule::new(options)));
    }
    rules
}

/// ASI lookups shared by the rules.
pub mod asi;
/// Module containing rule ID constants.
pub mod ids;
/// Quote style rule.
pub mod quotes;
/// Literal re-quoting.
pub mod requote;
/// Semicolon rule.
pub mod semi;
