//! `semi`: require or disallow semicolons at statement and class-field ends.

use crate::config::{ContinuationChars, SemiMode, SemiOptions};
use crate::fix::Edit;
use crate::rules::asi::{is_hazardous_follower, next_significant, prev_significant};
use crate::rules::ids::RULE_ID_SEMI;
use crate::rules::{Context, Diagnostic, Enclosing, MessageId, Node, Rule, RuleMetadata};
use crate::syntax::ast::{
    ClassMember, ClassMemberKind, ExportDefault, PropertyKey, Stmt, StmtKind, TokenSpan,
};
use crate::syntax::Token;
use text_size::TextRange;

const CAT_STYLE: &str = "Style";

const META_SEMI: RuleMetadata = RuleMetadata {
    id: RULE_ID_SEMI,
    category: CAT_STYLE,
};

/// Class field names that would swallow the next member if the `;` went away.
const UNSAFE_FIELD_NAMES: &[&str] = &["get", "set", "static"];

/// A construct that may end with a semicolon.
enum Terminated<'n> {
    Statement(&'n StmtKind),
    Field {
        member: &'n ClassMember,
        key: &'n PropertyKey,
        has_value: bool,
    },
}

impl Terminated<'_> {
    fn is_field(&self) -> bool {
        matches!(self, Self::Field { .. })
    }
}

/// Checks the optional `;` of every terminated statement and class field.
pub struct SemiRule {
    options: SemiOptions,
}

impl SemiRule {
    /// Creates the rule for `options`.
    #[must_use]
    pub fn new(options: SemiOptions) -> Self {
        Self { options }
    }

    fn check(
        &self,
        construct: &Terminated<'_>,
        span: TokenSpan,
        enclosing: Enclosing,
        context: &Context<'_>,
    ) -> Option<Diagnostic> {
        let last = context.tokens[span.last];
        let is_semi = last.is_punct(";");
        let next = next_significant(context.tokens, span.last).map(|(_, token)| token);

        match self.options.mode {
            SemiMode::Never => {
                if is_semi && self.can_remove(construct, span.last, next.as_ref(), context) {
                    Some(extra(context, last))
                } else if !is_semi
                    && self.options.before_statement_continuation_chars == ContinuationChars::Always
                    && !construct.is_field()
                    && is_hazardous_follower(next.as_ref())
                {
                    Some(missing(context, last))
                } else {
                    None
                }
            }
            SemiMode::Always => {
                let one_liner = (self.options.omit_last_in_one_line_block
                    && last_in_one_line(next.as_ref(), block_range(enclosing), context))
                    || (self.options.omit_last_in_one_line_class_body
                        && last_in_one_line(next.as_ref(), class_body_range(enclosing), context));
                if is_semi && one_liner {
                    Some(extra(context, last))
                } else if !is_semi && !one_liner {
                    Some(missing(context, last))
                } else {
                    None
                }
            }
        }
    }

    fn can_remove(
        &self,
        construct: &Terminated<'_>,
        semi_index: usize,
        next: Option<&Token<'_>>,
        context: &Context<'_>,
    ) -> bool {
        // `;;`, `;}` and a trailing `;` carry nothing.
        let Some(next) = next else {
            return true;
        };
        if next.is_punct("}") || next.is_punct(";") {
            return true;
        }
        if let Terminated::Field {
            member,
            key,
            has_value,
        } = construct
        {
            if is_field_asi_hazard(member, key, *has_value, next, context) {
                return false;
            }
        }
        let before = prev_significant(context.tokens, semi_index);
        if let Some((_, before)) = before {
            if context.line_index.same_line(before.range.end(), next.range.start()) {
                return false;
            }
        }
        if !construct.is_field()
            && self.options.before_statement_continuation_chars == ContinuationChars::Never
            && !may_continue(construct, before.map(|(index, _)| index), context)
        {
            return true;
        }
        !is_hazardous_follower(Some(next))
    }
}

fn extra(context: &Context<'_>, semi: Token<'_>) -> Diagnostic {
    context.diagnostic(
        META_SEMI,
        MessageId::ExtraSemi,
        semi.range,
        Some(Edit::delete(semi.start(), semi.end()).described("remove semicolon")),
    )
}

fn missing(context: &Context<'_>, last: Token<'_>) -> Diagnostic {
    let at = TextRange::empty(last.range.end());
    context.diagnostic(
        META_SEMI,
        MessageId::MissingSemi,
        at,
        Some(Edit::insert(last.end(), ";").described("insert semicolon")),
    )
}

fn block_range(enclosing: Enclosing) -> Option<TextRange> {
    match enclosing {
        Enclosing::Block { range } => Some(range),
        _ => None,
    }
}

fn class_body_range(enclosing: Enclosing) -> Option<TextRange> {
    match enclosing {
        Enclosing::ClassBody { range } => Some(range),
        _ => None,
    }
}

/// Last member of a body whose braces sit on one line.
fn last_in_one_line(
    next: Option<&Token<'_>>,
    body: Option<TextRange>,
    context: &Context<'_>,
) -> bool {
    let closes = next.is_some_and(|t| t.is_punct("}"));
    closes
        && body.is_some_and(|range| context.line_index.same_line(range.start(), range.end()))
}

/// Whether the next line could extend the construct if it started with a
/// hazardous character.
fn may_continue(
    construct: &Terminated<'_>,
    before_semi: Option<usize>,
    context: &Context<'_>,
) -> bool {
    if let Terminated::Statement(kind) = construct {
        match kind {
            StmtKind::DoWhile { .. }
            | StmtKind::Break
            | StmtKind::Continue
            | StmtKind::Debugger
            | StmtKind::Import(_)
            | StmtKind::ExportAll(_) => return false,
            StmtKind::ExportNamed(export) => return export.declaration.is_some(),
            StmtKind::Return(argument) => return argument.is_some(),
            _ => {}
        }
    }
    !before_semi.is_some_and(|index| context.arrow_body_ends.contains(&index))
}

fn is_field_asi_hazard(
    member: &ClassMember,
    key: &PropertyKey,
    has_value: bool,
    next: &Token<'_>,
    context: &Context<'_>,
) -> bool {
    if let PropertyKey::Identifier(range) = key {
        let name = context.text(*range);
        let static_static = member.is_static && name == "static";
        if !has_value && UNSAFE_FIELD_NAMES.contains(&name) && !static_static {
            return true;
        }
    }
    next.is_punct("*") || next.is_word("in") || next.is_word("instanceof")
}

/// Statement kinds whose end may carry a `;`.
fn is_terminated(stmt: &Stmt) -> bool {
    match &stmt.kind {
        StmtKind::Expression(_)
        | StmtKind::Var(_)
        | StmtKind::Return(_)
        | StmtKind::Throw(_)
        | StmtKind::DoWhile { .. }
        | StmtKind::Debugger
        | StmtKind::Break
        | StmtKind::Continue
        | StmtKind::Import(_)
        | StmtKind::ExportAll(_)
        | StmtKind::ExportDefault(ExportDefault::Expression(_)) => true,
        StmtKind::ExportNamed(export) => export.declaration.is_none(),
        _ => false,
    }
}

impl Rule for SemiRule {
    fn name(&self) -> &'static str {
        "SemiRule"
    }
    fn metadata(&self) -> RuleMetadata {
        META_SEMI
    }
    fn visit_node(&mut self, node: &Node<'_>, context: &Context<'_>) -> Option<Vec<Diagnostic>> {
        let diagnostic = match *node {
            Node::Statement { stmt, enclosing } if is_terminated(stmt) => self.check(
                &Terminated::Statement(&stmt.kind),
                stmt.tokens,
                enclosing,
                context,
            ),
            Node::ClassMember { member, enclosing } => match &member.kind {
                ClassMemberKind::Field { key, value } => self.check(
                    &Terminated::Field {
                        member,
                        key,
                        has_value: value.is_some(),
                    },
                    member.tokens,
                    enclosing,
                    context,
                ),
                _ => None,
            },
            _ => None,
        }?;
        Some(vec![diagnostic])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StyleConfig;
    use crate::test_utils::lint_with;

    fn semi(options: SemiOptions) -> StyleConfig {
        StyleConfig {
            quotes: None,
            semi: Some(options),
        }
    }

    fn never(before_statement_continuation_chars: ContinuationChars) -> StyleConfig {
        semi(SemiOptions {
            mode: SemiMode::Never,
            before_statement_continuation_chars,
            ..SemiOptions::default()
        })
    }

    #[test]
    fn test_missing_semicolon_position() {
        let diagnostics = lint_with("var x = 5\nfoo()", &semi(SemiOptions::default()));
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message, "Missing semicolon.");
        assert_eq!((diagnostics[0].line, diagnostics[0].col), (1, 10));
        assert_eq!(diagnostics[0].fix, Some(Edit::insert(9, ";").described("insert semicolon")));
        assert_eq!((diagnostics[1].line, diagnostics[1].col), (2, 6));
    }

    #[test]
    fn test_extra_semicolon_fix_deletes_it() {
        let diagnostics = lint_with("a();\nb()", &never(ContinuationChars::Any));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Extra semicolon.");
        assert_eq!(diagnostics[0].fix, Some(Edit::delete(3, 4).described("remove semicolon")));
    }

    #[test]
    fn test_division_on_next_line_is_not_a_new_statement() {
        let diagnostics = lint_with("x = {}\n/foo/g", &semi(SemiOptions::default()));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].fix, Some(Edit::insert(13, ";").described("insert semicolon")));
    }

    #[test]
    fn test_never_keeps_semicolon_before_hazard() {
        assert!(lint_with("a();\n[1].forEach(f)", &never(ContinuationChars::Any)).is_empty());
        assert_eq!(lint_with("a();\nb()", &never(ContinuationChars::Any)).len(), 1);
        assert!(lint_with("a(); b()", &never(ContinuationChars::Any)).is_empty());
    }

    #[test]
    fn test_never_with_continuation_chars_never() {
        let config = never(ContinuationChars::Never);
        assert_eq!(lint_with("function f() { return;\n(a) }", &config).len(), 1);
        assert_eq!(lint_with("function f() { return b;\n(a) }", &config).len(), 0);
        assert_eq!(lint_with("import a from 'a';\n(a)", &config).len(), 1);
        assert_eq!(lint_with("foo();\n(a)", &config).len(), 0);
        assert_eq!(lint_with("var f = () => {};\n[a]", &config).len(), 1);
    }

    #[test]
    fn test_class_field_hazards() {
        let config = never(ContinuationChars::Any);
        assert!(lint_with("class A { get;\n foo() {} }", &config).is_empty());
        assert!(lint_with("class A { static;\n foo() {} }", &config).is_empty());
        assert_eq!(lint_with("class A { static static;\n foo() {} }", &config).len(), 1);
        assert!(lint_with("class A { a = b;\n *gen() {} }", &config).is_empty());
        assert!(lint_with("class A { a = b;\n in\n c }", &config).is_empty());
    }

    #[test]
    fn test_field_never_requires_semicolon_before_hazard() {
        let config = never(ContinuationChars::Always);
        assert!(lint_with("class A { a\n ['b'] = 2 }", &config).is_empty());
    }

    #[test]
    fn test_omit_last_in_one_line_class_body() {
        let config = semi(SemiOptions {
            omit_last_in_one_line_class_body: true,
            ..SemiOptions::default()
        });
        assert_eq!(lint_with("class A { a = 1; }", &config).len(), 1);
        assert!(lint_with("class A { a = 1 }", &config).is_empty());
        assert!(lint_with("class A {\n a = 1;\n}", &config).is_empty());
        assert!(lint_with("{ foo; }", &config).is_empty());
    }
}
