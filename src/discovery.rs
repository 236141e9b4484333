//! Batch preprocessing over a source tree.
//!
//! Mirrors the per-file bundler hook for dev-server warm-up and integration
//! testing: walk a directory, keep the files the filter accepts, and rewrite
//! each one. Invocations are independent, so the files are rewritten in
//! parallel.

#[cfg(feature = "napi")]
use napi_derive::napi;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::filter::SourceFilter;
use crate::transform::{PreprocessOptions, Preprocessor};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreprocessedFile {
    pub path: String,
    pub code: String,
    pub changed: bool,
}

/// Rewrite every eligible file under `base_dir`. A file that cannot be read
/// is logged and skipped; the rest of the batch continues.
pub fn preprocess_directory(base_dir: &Path, options: PreprocessOptions) -> Vec<PreprocessedFile> {
    let preprocessor = Preprocessor::new(options);
    let files = find_source_files(base_dir, preprocessor.filter());

    files
        .par_iter()
        .filter_map(|path| {
            let id = path.to_string_lossy().to_string();
            let source = match fs::read_to_string(path) {
                Ok(source) => source,
                Err(e) => {
                    eprintln!("[PreprocessNative] Failed to read {}: {}", id, e);
                    return None;
                }
            };
            match preprocessor.transform(&source, &id) {
                Some(output) => Some(PreprocessedFile {
                    path: id,
                    code: output.code,
                    changed: true,
                }),
                None => Some(PreprocessedFile {
                    path: id,
                    code: source,
                    changed: false,
                }),
            }
        })
        .collect()
}

/// Recursively find the files the filter accepts.
fn find_source_files(dir: &Path, filter: &SourceFilter) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        if let Ok(entry) = entry {
            let path = entry.path();
            if path.is_file() && filter.accepts(&path.to_string_lossy()) {
                files.push(path.to_path_buf());
            }
        }
    }

    files
}

#[cfg(feature = "napi")]
#[napi]
pub fn preprocess_directory_native(base_dir: String, options_json: String) -> serde_json::Value {
    let options: PreprocessOptions = match serde_json::from_str(&options_json) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("[PreprocessNative] Options parse error: {}", e);
            return serde_json::Value::Null;
        }
    };

    let path = Path::new(&base_dir);
    if !path.exists() {
        return serde_json::Value::Null;
    }

    let files = preprocess_directory(path, options);
    serde_json::to_value(files).unwrap_or(serde_json::Value::Null)
}
