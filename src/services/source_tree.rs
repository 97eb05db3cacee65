//! Filesystem reading for `file://` resources and directory reviews.
//!
//! A directory is rendered as a depth-first structure listing (entries sorted
//! by name, files before subdirectories) followed by the text of every
//! recognized source file, each headed by its path relative to the root.
//! Hidden entries and common tooling directories are skipped.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::PlanMcpError;

/// File extensions whose content is included in a directory dump.
pub const CODE_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "java", "cpp", "c", "h", "cs", "go", "rs", "php", "rb", "swift", "kt",
];

/// Directory names never descended into.
pub const IGNORED_DIRS: &[&str] = &["node_modules", "__pycache__", "venv", "env"];

/// Placeholder for files that are not valid UTF-8 or cannot be read.
pub const UNREADABLE_PLACEHOLDER: &str = "(Binary file or permission denied)";

const SECTION_RULE_WIDTH: usize = 50;
const LARGE_DUMP_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ListingLine {
    depth: usize,
    name: String,
    is_dir: bool,
}

/// Snapshot of a directory's visible structure.
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
    listing: Vec<ListingLine>,
    /// Files in walk order, relative to `root`.
    files: Vec<PathBuf>,
}

impl SourceTree {
    /// Walk `root`. Fails if `root` is not an existing directory.
    pub fn scan(root: &Path) -> Result<Self, PlanMcpError> {
        if !root.is_dir() {
            return Err(PlanMcpError::ResourceNotFound {
                path: root.display().to_string(),
            });
        }
        // Surface an unreadable root instead of an empty tree.
        std::fs::read_dir(root).map_err(|source| PlanMcpError::Io {
            path: root.display().to_string(),
            source,
        })?;

        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        let mut tree = Self {
            root: root.to_path_buf(),
            listing: Vec::new(),
            files: Vec::new(),
        };

        // Files before subdirectories, each group by name. Symlinked
        // directories are not followed.
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || is_visible(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            if entry.depth() == 0 {
                tree.listing.push(ListingLine {
                    depth: 0,
                    name: root_name.clone(),
                    is_dir: true,
                });
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type().is_dir() {
                tree.listing.push(ListingLine {
                    depth: entry.depth(),
                    name,
                    is_dir: true,
                });
            } else if entry.file_type().is_file() || entry.path().is_file() {
                // Symlinks to files count as files.
                let Ok(relative) = entry.path().strip_prefix(root) else {
                    continue;
                };
                tree.files.push(relative.to_path_buf());
                tree.listing.push(ListingLine {
                    depth: entry.depth(),
                    name,
                    is_dir: false,
                });
            }
        }
        Ok(tree)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All visible files, relative to the root, in walk order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Files whose extension is in [`CODE_EXTENSIONS`].
    pub fn code_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter().filter(|p| is_code_file(p))
    }

    /// Render the listing and the concatenated code file contents.
    pub fn render(&self, display_path: &str) -> String {
        let mut out = format!("Directory: {}\n\nDirectory Structure:\n", display_path);
        for line in &self.listing {
            out.push_str(&"  ".repeat(line.depth));
            out.push_str(&line.name);
            if line.is_dir {
                out.push('/');
            }
            out.push('\n');
        }

        out.push('\n');
        out.push_str(&"=".repeat(SECTION_RULE_WIDTH));
        out.push_str("\n\nCode Files Content:\n\n");

        for relative in self.code_files() {
            out.push_str(&format!("--- {} ---\n", relative.display()));
            match std::fs::read(self.root.join(relative)).map(String::from_utf8) {
                Ok(Ok(text)) => out.push_str(&text),
                _ => out.push_str(UNREADABLE_PLACEHOLDER),
            }
            out.push_str("\n\n");
        }

        debug!(
            "Aggregated {} ({} files, {} bytes)",
            display_path,
            self.files.len(),
            out.len()
        );
        if out.len() > LARGE_DUMP_BYTES {
            warn!(
                "Directory dump for {} is {} bytes; the backend may reject it",
                display_path,
                out.len()
            );
        }
        out
    }
}

/// Hidden entries and [`IGNORED_DIRS`] are pruned from the walk.
fn is_visible(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return false;
    }
    !(entry.file_type().is_dir() && IGNORED_DIRS.contains(&&*name))
}

fn is_code_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| CODE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Aggregate a directory into review text.
pub fn aggregate_directory(path: &str) -> Result<String, PlanMcpError> {
    let tree = SourceTree::scan(Path::new(path))?;
    Ok(tree.render(path))
}

/// Read a single text file, prefixed with its path.
pub fn read_file(path: &str) -> Result<String, PlanMcpError> {
    let content = std::fs::read_to_string(path).map_err(|source| PlanMcpError::Io {
        path: path.to_string(),
        source,
    })?;
    Ok(format!("File: {}\n\n{}", path, content))
}

/// Read a file or aggregate a directory.
pub fn read_path(path: &str) -> Result<String, PlanMcpError> {
    let target = Path::new(path);
    if target.is_file() {
        read_file(path)
    } else if target.is_dir() {
        aggregate_directory(path)
    } else {
        Err(PlanMcpError::ResourceNotFound {
            path: path.to_string(),
        })
    }
}
