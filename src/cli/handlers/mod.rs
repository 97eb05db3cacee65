pub mod analyze;
pub mod plan;
pub mod review;
pub mod utility;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::services::analyzer::DEFAULT_LANGUAGE;

/// Read a file, or stdin when the path is "-".
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Language name for a source file, from its extension.
pub(crate) fn guess_language(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let language = match ext.as_deref() {
        Some("py") => "python",
        Some("js") => "javascript",
        Some("ts") => "typescript",
        Some("java") => "java",
        Some("cpp") => "cpp",
        Some("c") | Some("h") => "c",
        Some("cs") => "csharp",
        Some("go") => "go",
        Some("rs") => "rust",
        Some("php") => "php",
        Some("rb") => "ruby",
        Some("swift") => "swift",
        Some("kt") => "kotlin",
        _ => DEFAULT_LANGUAGE,
    };
    language.to_string()
}
