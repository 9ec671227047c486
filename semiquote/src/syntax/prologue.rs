//! Directive prologue marking.
//!
//! Runs once per program or function body as the parser closes it, so the
//! quote rule can read `Stmt::directive`/`Stmt::body_level` directly
//! instead of climbing parent links.

use super::ast::{Expr, ExprKind, Stmt, StmtKind};

/// Stamps the statements of a program or function body.
///
/// Every statement becomes `body_level`. The leading run of unparenthesised
/// string-literal expression statements becomes `directive`; the run ends at
/// the first statement of any other shape.
pub fn mark_body(body: &mut [Stmt]) {
    let mut in_prologue = true;
    for stmt in body {
        stmt.body_level = true;
        in_prologue = in_prologue && is_directive_shaped(stmt);
        stmt.directive = in_prologue;
    }
}

/// `"..."` or `'...'` used as a whole expression statement.
#[must_use]
pub fn is_directive_shaped(stmt: &Stmt) -> bool {
    matches!(
        stmt.kind,
        StmtKind::Expression(Expr {
            kind: ExprKind::String(_),
            ..
        })
    )
}
