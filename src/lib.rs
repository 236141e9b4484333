//! # Conditional-Compile Preprocessor (Native)
//!
//! Build-time conditional compilation for cross-platform component sources:
//! directive blocks (`#ifdef PLATFORM` / `#ifndef PLATFORM` ... `#endif`) are
//! kept or deleted per target platform before the bundler continues.
//!
//! ## Rewrite Invariants
//!
//! 1. **Pass order**: html-comment → marker-call → line-comment →
//!    block-comment; each pass rewrites the previous pass's output, and a
//!    marker uncovered by a replacement is never rescanned.
//! 2. **Idempotence**: text without directive markers comes back
//!    byte-identical, and bytes outside matched blocks are never altered.
//! 3. **Keep rule**: a body is kept iff (`#ifdef` AND expression true) or
//!    (`#ifndef` AND expression false); deleted bodies become empty strings.
//! 4. **Family matching**: platform tokens compare case-insensitively on
//!    equality or substring in either direction (`WEIXIN` ↔ `MP-WEIXIN`).
//! 5. **OR before AND**: the compound dispatch checks `||` first; a term
//!    containing `&&` inside an `||` expression is evaluated as one atom.
//! 6. **Isolation**: a failure rewriting one file logs a diagnostic naming
//!    the file and returns it unchanged; the build continues.

#[cfg(feature = "napi")]
use napi_derive::napi;

mod directive;
mod discovery;
mod evaluate;
mod filter;
mod transform;

#[cfg(test)]
mod expression_tests;

pub use directive::{Directive, DirectiveKind, DirectiveSyntax, MARKER_RESIDUE, SYNTAXES};
pub use discovery::{preprocess_directory, PreprocessedFile};
pub use evaluate::{evaluate_condition, evaluate_expression, keeps_body};
pub use filter::{SourceFilter, DEFAULT_EXCLUDE, DEFAULT_INCLUDE};
pub use transform::{test_env_detected, PreprocessOptions, Preprocessor, TransformOutput};

#[cfg(feature = "napi")]
pub use discovery::preprocess_directory_native;
#[cfg(feature = "napi")]
pub use transform::transform_conditional_native;

#[cfg(feature = "napi")]
#[napi]
pub fn preprocess_bridge() -> String {
    "Preprocess Native Bridge Connected".to_string()
}
