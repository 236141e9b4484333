//! Directive model and the physical encodings of conditional-compile markers.
//!
//! One logical directive (`#ifdef EXPR` ... `#endif`) reaches this crate in four
//! encodings depending on where in the build it appears: raw template comments,
//! comment-marker calls emitted by the upstream template compiler, script line
//! comments, and script/stylesheet block comments. Each encoding is one
//! `DirectiveSyntax` entry in the `SYNTAXES` table; markers never pair across
//! encodings, so an HTML open only closes with an HTML `#endif`.

use lazy_static::lazy_static;
use regex::Regex;

/// Keyword of a directive block, case-sensitive at scan time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Ifdef,
    Ifndef,
}

impl DirectiveKind {
    pub fn from_keyword(keyword: &str) -> Option<DirectiveKind> {
        match keyword {
            "ifdef" => Some(DirectiveKind::Ifdef),
            "ifndef" => Some(DirectiveKind::Ifndef),
            _ => None,
        }
    }
}

/// One matched directive block. Alive only during a single pass over a file.
#[derive(Debug, Clone)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub expression: String,
    pub body: String,
}

/// One physical encoding of the directive markers.
///
/// Every `block` pattern shares the same capture layout: group 1 is the
/// keyword (`ifdef`/`ifndef`), group 2 the platform expression, group 3 the
/// non-greedy body up to the nearest same-encoding `#endif`. Because the body
/// is non-greedy, a nested block of the same encoding closes at the first
/// inner `#endif`; the rewriter warns when it sees that instead of silently
/// truncating.
pub struct DirectiveSyntax {
    pub name: &'static str,
    /// Full-block pattern, open marker through close marker.
    pub block: Regex,
    /// Open-marker-only pattern, used to flag nested blocks inside a body.
    pub open: Regex,
}

impl DirectiveSyntax {
    /// Pure scan: every directive block of this encoding in `text`, in order.
    pub fn find_directives(&self, text: &str) -> Vec<Directive> {
        self.block
            .captures_iter(text)
            .filter_map(|caps| {
                let kind = DirectiveKind::from_keyword(&caps[1])?;
                Some(Directive {
                    kind,
                    expression: caps[2].trim().to_string(),
                    body: caps[3].to_string(),
                })
            })
            .collect()
    }
}

// Platform expressions admit tokens plus the `||` / `&&` / `!` combinators.
const EXPR: &str = r"[\w\t |&!-]+?";

lazy_static! {
    /// The four encodings, in the order the rewriter applies them.
    pub static ref SYNTAXES: [DirectiveSyntax; 4] = [
        // <!-- #ifdef H5 --> ... <!-- #endif -->
        DirectiveSyntax {
            name: "html-comment",
            block: Regex::new(&format!(
                r"<!--\s*#(ifdef|ifndef)\s+({EXPR})\s*-->([\s\S]*?)<!--\s*#endif\s*-->"
            ))
            .unwrap(),
            open: Regex::new(r"<!--\s*#(?:ifdef|ifndef)").unwrap(),
        },
        // createCommentVNode(" #ifdef H5 ", true) ... createCommentVNode(" #endif ", true)
        // The template compiler turns template comments into marker calls, so
        // this pass runs on already-compiled render code.
        DirectiveSyntax {
            name: "marker-call",
            block: Regex::new(&format!(
                r#"[\w$]+\(\s*["']\s*#(ifdef|ifndef)\s+({EXPR})\s*["']\s*(?:,\s*true\s*)?\)([\s\S]*?)[\w$]+\(\s*["']\s*#endif\s*["']\s*(?:,\s*true\s*)?\)"#
            ))
            .unwrap(),
            open: Regex::new(r#"[\w$]+\(\s*["']\s*#(?:ifdef|ifndef)"#).unwrap(),
        },
        // // #ifdef H5 ... // #endif, each marker alone on its line. The marker
        // lines are consumed with their newlines; the body survives verbatim.
        DirectiveSyntax {
            name: "line-comment",
            block: Regex::new(&format!(
                r"(?m)^[ \t]*//[ \t]*#(ifdef|ifndef)[ \t]+({EXPR})[ \t]*\r?\n([\s\S]*?)^[ \t]*//[ \t]*#endif[ \t]*(?:\r?\n|$)"
            ))
            .unwrap(),
            open: Regex::new(r"(?m)^[ \t]*//[ \t]*#(?:ifdef|ifndef)").unwrap(),
        },
        // /* #ifdef H5 */ ... /* #endif */ serves script and stylesheet text;
        // stylesheets support only this encoding.
        DirectiveSyntax {
            name: "block-comment",
            block: Regex::new(&format!(
                r"/\*\s*#(ifdef|ifndef)\s+({EXPR})\s*\*/([\s\S]*?)/\*\s*#endif\s*\*/"
            ))
            .unwrap(),
            open: Regex::new(r"/\*\s*#(?:ifdef|ifndef)").unwrap(),
        },
    ];

    /// Any directive marker, in any encoding, including `#endif`. A marker
    /// still present after all passes is unterminated or unmatched.
    pub static ref MARKER_RESIDUE: Regex = Regex::new(
        r#"(?m)(?:<!--\s*#(?:ifdef|ifndef|endif)|/\*\s*#(?:ifdef|ifndef|endif)|^[ \t]*//[ \t]*#(?:ifdef|ifndef|endif)|[\w$]+\(\s*["']\s*#(?:ifdef|ifndef|endif))"#
    )
    .unwrap();
}
