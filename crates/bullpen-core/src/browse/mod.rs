//! Sandboxed read-only browser over the workspace directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use time::OffsetDateTime;

use bullpen_model::{FileContent, FileKind, FileNode};

use crate::error::CoreError;

/// Byte cap for single-file reads.
pub const DEFAULT_MAX_READ: u64 = 256 * 1024;

/// Levels of nesting the tree endpoint will descend.
const MAX_DEPTH: usize = 6;

/// Lists and reads files under one root, and nothing outside it.
#[derive(Debug, Clone)]
pub struct WorkspaceBrowser {
    root: PathBuf,
    max_read: u64,
}

impl WorkspaceBrowser {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_read: DEFAULT_MAX_READ,
        }
    }

    pub fn with_max_read(mut self, bytes: u64) -> Self {
        self.max_read = bytes;
        self
    }

    /// Top-level nodes of the workspace tree. Dot-entries are skipped and
    /// directories sort ahead of files at every level.
    pub fn tree(&self) -> Result<Vec<FileNode>, CoreError> {
        self.list(&self.root, Path::new(""), 0)
    }

    fn list(&self, dir: &Path, rel: &Path, depth: usize) -> Result<Vec<FileNode>, CoreError> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(CoreError::Io {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        };

        let mut nodes = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            let rel_path = rel.join(&name);
            let path = rel_path.to_string_lossy().replace('\\', "/");

            if meta.is_dir() {
                let children = if depth + 1 < MAX_DEPTH {
                    self.list(&entry.path(), &rel_path, depth + 1)?
                } else {
                    Vec::new()
                };
                nodes.push(FileNode {
                    name,
                    path,
                    kind: FileKind::Dir,
                    size: None,
                    mtime: None,
                    children: Some(children),
                });
            } else if meta.is_file() {
                nodes.push(FileNode {
                    name,
                    path,
                    kind: FileKind::File,
                    size: Some(meta.len()),
                    mtime: meta.modified().ok().map(OffsetDateTime::from),
                    children: None,
                });
            }
        }
        nodes.sort_by(|a, b| {
            (a.kind != FileKind::Dir)
                .cmp(&(b.kind != FileKind::Dir))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(nodes)
    }

    /// Read one file, bounded by the byte cap and jailed to the root.
    pub fn content(&self, rel: &str) -> Result<FileContent, CoreError> {
        let path = self.jail(rel)?;
        let meta = fs::metadata(&path).map_err(|source| CoreError::Io {
            path: path.clone(),
            source,
        })?;
        if !meta.is_file() {
            return Err(CoreError::NotFound(rel.to_string()));
        }

        let bytes = fs::read(&path).map_err(|source| CoreError::Io {
            path: path.clone(),
            source,
        })?;
        let truncated = bytes.len() as u64 > self.max_read;
        let slice = if truncated {
            &bytes[..self.max_read as usize]
        } else {
            &bytes[..]
        };
        Ok(FileContent {
            content: String::from_utf8_lossy(slice).into_owned(),
            truncated,
            size: meta.len(),
            mtime: meta.modified().ok().map(OffsetDateTime::from),
        })
    }

    /// Reject absolute paths and any non-plain component, then verify the
    /// canonical form still sits under the root (symlinks can point out).
    fn jail(&self, rel: &str) -> Result<PathBuf, CoreError> {
        let rel_path = Path::new(rel);
        if rel_path.is_absolute() {
            return Err(CoreError::Denied(rel.to_string()));
        }
        for comp in rel_path.components() {
            match comp {
                Component::Normal(_) | Component::CurDir => {}
                _ => return Err(CoreError::Denied(rel.to_string())),
            }
        }

        let root = self.root.canonicalize().map_err(|source| CoreError::Io {
            path: self.root.clone(),
            source,
        })?;
        let joined = root.join(rel_path);
        match joined.canonicalize() {
            Ok(canon) if canon.starts_with(&root) => Ok(canon),
            Ok(_) => Err(CoreError::Denied(rel.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CoreError::NotFound(rel.to_string())),
            Err(source) => Err(CoreError::Io {
                path: joined,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("notes")).unwrap();
        fs::write(dir.path().join("notes/today.md"), "# today").unwrap();
        fs::write(dir.path().join("plan.md"), "the plan").unwrap();
        fs::write(dir.path().join(".secret"), "hidden").unwrap();
        dir
    }

    #[test]
    fn tree_lists_dirs_first_and_skips_dotfiles() {
        let dir = workspace();
        let tree = WorkspaceBrowser::new(dir.path()).tree().unwrap();

        let names: Vec<_> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["notes", "plan.md"]);
        assert_eq!(tree[0].kind, FileKind::Dir);

        let children = tree[0].children.as_ref().unwrap();
        assert_eq!(children[0].path, "notes/today.md");
        assert!(children[0].size.is_some());
    }

    #[test]
    fn missing_root_is_empty_tree() {
        let tree = WorkspaceBrowser::new("/definitely/not/here").tree().unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn content_reads_within_the_root() {
        let dir = workspace();
        let content = WorkspaceBrowser::new(dir.path())
            .content("notes/today.md")
            .unwrap();
        assert_eq!(content.content, "# today");
        assert!(!content.truncated);
        assert_eq!(content.size, 7);
    }

    #[test]
    fn content_caps_large_files() {
        let dir = workspace();
        fs::write(dir.path().join("big.log"), "x".repeat(64)).unwrap();
        let content = WorkspaceBrowser::new(dir.path())
            .with_max_read(16)
            .content("big.log")
            .unwrap();
        assert!(content.truncated);
        assert_eq!(content.content.len(), 16);
        assert_eq!(content.size, 64);
    }

    #[test]
    fn traversal_is_denied() {
        let dir = workspace();
        let browser = WorkspaceBrowser::new(dir.path());
        assert!(matches!(
            browser.content("../outside.txt").unwrap_err(),
            CoreError::Denied(_)
        ));
        assert!(matches!(
            browser.content("notes/../../outside.txt").unwrap_err(),
            CoreError::Denied(_)
        ));
        assert!(matches!(
            browser.content("/etc/hostname").unwrap_err(),
            CoreError::Denied(_)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn escaping_symlink_is_denied() {
        let dir = workspace();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("target.txt"), "out").unwrap();
        std::os::unix::fs::symlink(outside.path().join("target.txt"), dir.path().join("link.txt"))
            .unwrap();

        let err = WorkspaceBrowser::new(dir.path()).content("link.txt").unwrap_err();
        assert!(matches!(err, CoreError::Denied(_)));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = workspace();
        let err = WorkspaceBrowser::new(dir.path()).content("nope.md").unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }
}
