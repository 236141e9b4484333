//! Platform expression evaluation for conditional-compile directives.
//!
//! An expression is one or more platform tokens combined with `||` or `&&`.
//! The compound dispatch checks `||` before `&&`: a mixed expression is an OR
//! of terms, and a term that still contains `&&` is evaluated as one atom.
//! Atoms match case-insensitively on equality or substring in either
//! direction, which is what lets `WEIXIN` select the whole `MP-WEIXIN`
//! platform family.

use crate::directive::DirectiveKind;

/// Block-level decision: is the body of a directive kept for `platform`?
///
/// In test mode a directive whose raw expression names a test-runner token is
/// kept unconditionally; the override is checked once per directive, before
/// the compound dispatch, and never recurses into term evaluation.
pub fn keeps_body(kind: DirectiveKind, expression: &str, platform: &str, test_mode: bool) -> bool {
    if test_mode && is_test_expression(expression) {
        return true;
    }
    let matched = evaluate_expression(expression, platform);
    match kind {
        DirectiveKind::Ifdef => matched,
        DirectiveKind::Ifndef => !matched,
    }
}

fn is_test_expression(expression: &str) -> bool {
    let upper = expression.to_uppercase();
    upper.contains("TEST") || upper.contains("VITEST")
}

/// Evaluate a full platform expression against a single target platform.
pub fn evaluate_expression(expression: &str, platform: &str) -> bool {
    if expression.contains("||") {
        expression
            .split("||")
            .any(|term| evaluate_condition(term, platform))
    } else if expression.contains("&&") {
        expression
            .split("&&")
            .all(|term| evaluate_condition(term, platform))
    } else {
        evaluate_condition(expression, platform)
    }
}

/// Evaluate one atomic term. A leading `!` negates; both sides are
/// upper-cased; a hit is equality or containment in either direction.
pub fn evaluate_condition(term: &str, platform: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return false;
    }
    let (negate, target) = match term.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, term),
    };
    let target = target.to_uppercase();
    let platform = platform.to_uppercase();
    let hit = target == platform || target.contains(&platform) || platform.contains(&target);
    if negate {
        !hit
    } else {
        hit
    }
}
