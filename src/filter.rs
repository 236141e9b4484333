//! File filter deciding which module ids reach the rewriting passes.

use lazy_static::lazy_static;
use regex::Regex;

/// Source and style extensions rewritten by default.
pub const DEFAULT_INCLUDE: &[&str] = &[
    ".vue", ".nvue", ".js", ".ts", ".jsx", ".tsx", ".css", ".scss", ".less",
];

/// Path fragments excluded by default.
pub const DEFAULT_EXCLUDE: &[&str] = &["node_modules"];

lazy_static! {
    static ref TEST_FILE: Regex = Regex::new(r"\.(?:test|spec)\.|__tests__").unwrap();
}

/// Include/exclude decision for one module id.
///
/// Bundler ids carry query suffixes (`button.vue?type=script`); the query is
/// stripped before the extension check. In test mode, test files are always
/// accepted regardless of the include and exclude sets, so directive blocks
/// inside them are still exercised.
pub struct SourceFilter {
    include: Vec<String>,
    exclude: Vec<String>,
    is_test: bool,
}

impl SourceFilter {
    pub fn new(include: &[String], exclude: &[String], is_test: bool) -> Self {
        SourceFilter {
            include: include.to_vec(),
            exclude: exclude.to_vec(),
            is_test,
        }
    }

    pub fn accepts(&self, id: &str) -> bool {
        let path = match id.find('?') {
            Some(idx) => &id[..idx],
            None => id,
        };

        if self.is_test && TEST_FILE.is_match(path) {
            return true;
        }
        if self.exclude.iter().any(|pattern| path.contains(pattern.as_str())) {
            return false;
        }
        self.include.iter().any(|ext| path.ends_with(ext.as_str()))
    }
}
