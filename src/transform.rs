//! Conditional-compile rewriter and the per-file bundler hook.
//!
//! The rewriter applies the `SYNTAXES` passes in table order; each pass is a
//! whole-string global replace over the previous pass's output, so a marker
//! uncovered by an earlier replacement is never rescanned. Every match is
//! replaced by its captured body when the platform expression selects the
//! target, or by the empty string when it does not. Text outside matched
//! blocks is never altered.

#[cfg(feature = "napi")]
use napi_derive::napi;
use regex::Captures;
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};

use crate::directive::{DirectiveKind, MARKER_RESIDUE, SYNTAXES};
use crate::evaluate::keeps_body;
use crate::filter::{SourceFilter, DEFAULT_EXCLUDE, DEFAULT_INCLUDE};

/// Fixed configuration supplied once at plugin setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreprocessOptions {
    /// Target platform token, compared case-insensitively.
    pub platform: String,
    /// Extension suffixes handed to the rewriter.
    pub include: Vec<String>,
    /// Path fragments never handed to the rewriter.
    pub exclude: Vec<String>,
    /// Keeps directives naming test-runner tokens and accepts test files.
    pub is_test: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        PreprocessOptions {
            platform: "h5".to_string(),
            include: DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            is_test: test_env_detected(),
        }
    }
}

/// NODE_ENV=test or a live test-runner variable marks the run as test mode.
pub fn test_env_detected() -> bool {
    std::env::var("NODE_ENV").map(|v| v == "test").unwrap_or(false)
        || std::env::var_os("VITEST").is_some()
}

/// Result handed back to the bundler. `map` is always `None`; the rewrite is
/// line-preserving enough that the host keeps its own source maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub code: String,
    pub map: Option<String>,
}

/// The per-file transform hook. One instance is built at setup and reused for
/// every file in the build; it holds no per-file state, so parallel build
/// workers may share it freely.
pub struct Preprocessor {
    options: PreprocessOptions,
    filter: SourceFilter,
}

impl Preprocessor {
    pub fn new(options: PreprocessOptions) -> Self {
        let filter = SourceFilter::new(&options.include, &options.exclude, options.is_test);
        Preprocessor { options, filter }
    }

    pub fn filter(&self) -> &SourceFilter {
        &self.filter
    }

    /// Transform one file. Returns `None` when the id is filtered out or the
    /// text comes back unchanged; the caller keeps its original.
    pub fn transform(&self, code: &str, id: &str) -> Option<TransformOutput> {
        if !self.filter.accepts(id) {
            return None;
        }
        let platform = self.options.platform.clone();
        let test_mode = self.options.is_test;
        let rewritten = rewrite_guarded(code, id, &|kind, expression| {
            keeps_body(kind, expression, &platform, test_mode)
        });
        if rewritten == code {
            None
        } else {
            Some(TransformOutput {
                code: rewritten,
                map: None,
            })
        }
    }
}

/// Run the rewrite passes with panic isolation: a failure rewriting one file
/// logs a diagnostic and returns that file's original text, so a single bad
/// file never fails the whole build.
pub(crate) fn rewrite_guarded(
    code: &str,
    id: &str,
    keep: &dyn Fn(DirectiveKind, &str) -> bool,
) -> String {
    match panic::catch_unwind(AssertUnwindSafe(|| rewrite_passes(code, id, keep))) {
        Ok(text) => text,
        Err(_) => {
            eprintln!(
                "[PreprocessNative] Conditional-compile pass failed for {}; file left untouched",
                id
            );
            code.to_string()
        }
    }
}

fn rewrite_passes(code: &str, id: &str, keep: &dyn Fn(DirectiveKind, &str) -> bool) -> String {
    let mut text = code.to_string();

    for syntax in SYNTAXES.iter() {
        if !syntax.block.is_match(&text) {
            continue;
        }
        let rewritten = syntax.block.replace_all(&text, |caps: &Captures| {
            let kind = match DirectiveKind::from_keyword(&caps[1]) {
                Some(kind) => kind,
                None => return caps[0].to_string(),
            };
            let expression = caps[2].trim();
            let body = &caps[3];
            if syntax.open.is_match(body) {
                eprintln!(
                    "[PreprocessNative] Nested {} directive in {} closes at the first #endif; nesting is not supported",
                    syntax.name, id
                );
            }
            if keep(kind, expression) {
                body.to_string()
            } else {
                String::new()
            }
        });
        text = rewritten.into_owned();
    }

    if MARKER_RESIDUE.is_match(&text) {
        eprintln!(
            "[PreprocessNative] Unterminated or unmatched conditional-compile marker left in {}",
            id
        );
    }

    text
}

#[cfg(feature = "napi")]
#[napi]
pub fn transform_conditional_native(
    code: String,
    id: String,
    options_json: String,
) -> napi::Result<String> {
    let options: PreprocessOptions = serde_json::from_str(&options_json)
        .map_err(|e| napi::Error::from_reason(format!("Options parse error: {}", e)))?;
    let preprocessor = Preprocessor::new(options);
    let value = match preprocessor.transform(&code, &id) {
        Some(output) => serde_json::json!(output),
        None => serde_json::Value::Null,
    };
    serde_json::to_string(&value)
        .map_err(|e| napi::Error::from_reason(format!("Serialize error: {}", e)))
}
