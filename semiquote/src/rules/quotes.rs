//! `quotes`: string and template literals use one configured quote style.

use std::borrow::Cow;

use crate::config::{AllowTemplateLiterals, QuoteOptions, QuoteStyle};
use crate::constants::UNESCAPED_LINE_BREAK_RE;
use crate::fix::Edit;
use crate::rules::ids::RULE_ID_QUOTES;
use crate::rules::requote::{requote, Requote};
use crate::rules::{Context, Diagnostic, LiteralSite, MessageId, Node, Rule, RuleMetadata};
use crate::syntax::ast::{StringLit, TemplateLit};

const CAT_STYLE: &str = "Style";

const META_QUOTES: RuleMetadata = RuleMetadata {
    id: RULE_ID_QUOTES,
    category: CAT_STYLE,
};

/// Checks the delimiters of every string and template literal.
pub struct QuotesRule {
    options: QuoteOptions,
}

impl QuotesRule {
    /// Creates the rule for `options`.
    #[must_use]
    pub fn new(options: QuoteOptions) -> Self {
        Self { options }
    }

    fn target(&self) -> QuoteStyle {
        self.options.style
    }

    fn report(&self, context: &Context<'_>, range: text_size::TextRange, fix: Option<Edit>) -> Diagnostic {
        context
            .diagnostic(META_QUOTES, MessageId::WrongQuotes, range, fix)
            .with_description(self.target().description())
    }

    fn check_string(
        &self,
        literal: StringLit,
        site: LiteralSite,
        context: &Context<'_>,
    ) -> Option<Diagnostic> {
        let target = self.target();
        if target == QuoteStyle::Backtick && requires_plain_string(site) {
            return None;
        }
        if target != QuoteStyle::Backtick && self.options.ignore_string_literals {
            return None;
        }

        let raw = context.text(literal.range);
        let current = QuoteStyle::from_raw(raw)?;
        match requote(raw, current, target, self.options.avoid_escape) {
            Requote::Keep => None,
            Requote::Unfixable => Some(self.report(context, literal.range, None)),
            Requote::Rewrite(text) => Some(self.report(
                context,
                literal.range,
                Some(Edit::replace(literal.range, text).described("requote string")),
            )),
        }
    }

    fn check_template(
        &self,
        literal: &TemplateLit,
        site: LiteralSite,
        context: &Context<'_>,
    ) -> Option<Diagnostic> {
        let target = self.target();
        let allow = self.options.allow_template_literals;
        if target == QuoteStyle::Backtick
            || allow == AllowTemplateLiterals::Always
            || literal.tagged
            || literal.has_substitutions()
        {
            return None;
        }
        if literal
            .quasis
            .iter()
            .any(|quasi| has_unescaped_line_break(context.text(*quasi)))
        {
            return None;
        }

        let raw = context.text(literal.range);
        let avoid_escape = allow == AllowTemplateLiterals::AvoidEscape;
        match requote(raw, QuoteStyle::Backtick, target, avoid_escape) {
            Requote::Keep => None,
            Requote::Unfixable => Some(self.report(context, literal.range, None)),
            Requote::Rewrite(text) => {
                // A string here could turn into a directive.
                let fix = (!matches!(site, LiteralSite::Statement { body_level: true, .. }))
                    .then(|| Edit::replace(literal.range, text).described("template to string"));
                Some(self.report(context, literal.range, fix))
            }
        }
    }
}

/// Template raw text reads `\r\n` as one line terminator, so a backslash
/// before it is a line continuation.
fn has_unescaped_line_break(raw: &str) -> bool {
    let raw: Cow<'_, str> = if raw.contains("\r\n") {
        Cow::Owned(raw.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(raw)
    };
    UNESCAPED_LINE_BREAK_RE().is_match(&raw)
}

/// Positions where the grammar accepts a string literal but not a template.
fn requires_plain_string(site: LiteralSite) -> bool {
    match site {
        LiteralSite::Statement { directive, .. } => directive,
        LiteralSite::PropertyKey | LiteralSite::ModuleSource | LiteralSite::ModuleExportName => {
            true
        }
        LiteralSite::Expression => false,
    }
}

impl Rule for QuotesRule {
    fn name(&self) -> &'static str {
        "QuotesRule"
    }
    fn metadata(&self) -> RuleMetadata {
        META_QUOTES
    }
    fn visit_node(&mut self, node: &Node<'_>, context: &Context<'_>) -> Option<Vec<Diagnostic>> {
        let diagnostic = match *node {
            Node::StringLiteral { literal, site } => self.check_string(literal, site, context),
            Node::TemplateLiteral { literal, site } => self.check_template(literal, site, context),
            Node::Statement { .. } | Node::ClassMember { .. } => None,
        }?;
        Some(vec![diagnostic])
    }
}
