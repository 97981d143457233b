//! Virtual filesystem
//!
//! An in-memory tree of directories, text files and images. The whole tree is
//! persisted after every mutation as a nested JSON object keyed by name and
//! tagged by `type` (`dir` / `text` / `image`), under [`FS_KEY`]:
//!
//! ```json
//! { "/": { "type": "dir", "children": { "home": { "type": "dir", "children": { } } } } }
//! ```
//!
//! Paths are plain `/`-separated strings. `.` segments are dropped, `..` pops one
//! segment and never climbs above the root.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::storage::{StorageError, StorageHandle, FS_KEY};

/// Error from a filesystem operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VfsError {
    /// Path does not resolve to a node
    #[error("{0}: No such file or directory")]
    NotFound(String),

    /// Expected a directory
    #[error("{0}: Not a directory")]
    NotADirectory(String),

    /// Expected a file but found a directory
    #[error("{0}: Is a directory")]
    IsADirectory(String),

    /// Expected a text file but found another kind of file
    #[error("{0}: Not a text file")]
    NotAText(String),

    /// The parent of a path to create is missing or not a directory
    #[error("Invalid directory: {0}")]
    InvalidDirectory(String),
}

pub type VfsResult<T> = Result<T, VfsError>;

/// A node of the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    #[serde(rename = "dir")]
    Directory { children: BTreeMap<String, Node> },

    #[serde(rename = "text")]
    TextFile { content: String },

    #[serde(rename = "image")]
    Image {
        #[serde(rename = "src")]
        source: String,
        #[serde(rename = "mime")]
        mime_type: String,
    },
}

/// Kind of a node, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    TextFile,
    Image,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Directory { .. } => NodeKind::Directory,
            Node::TextFile { .. } => NodeKind::TextFile,
            Node::Image { .. } => NodeKind::Image,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory { .. })
    }

    fn empty_dir() -> Self {
        Node::Directory {
            children: BTreeMap::new(),
        }
    }
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: NodeKind,
}

/// On-disk shape: the root directory lives under the `/` key
#[derive(Debug, Serialize, Deserialize)]
struct PersistedTree {
    #[serde(rename = "/")]
    root: Node,
}

/// Normalize a path into absolute form
///
/// The input is treated as rooted whether or not it starts with `/`.
pub fn normalize(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            segment => stack.push(segment),
        }
    }
    if stack.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", stack.join("/"))
    }
}

/// Join `rel` onto `base`; an absolute `rel` replaces `base`
pub fn join(base: &str, rel: &str) -> String {
    if rel.starts_with('/') {
        normalize(rel)
    } else {
        normalize(&format!("{base}/{rel}"))
    }
}

/// Split an absolute path into (parent, name). The root has no name.
fn split_parent(path: &str) -> (String, Option<String>) {
    let normalized = normalize(path);
    match normalized.rsplit_once('/') {
        Some((parent, name)) if !name.is_empty() => {
            let parent = if parent.is_empty() { "/" } else { parent };
            (parent.to_string(), Some(name.to_string()))
        }
        _ => ("/".to_string(), None),
    }
}

/// The in-memory filesystem with its persistence handle
pub struct Vfs {
    root: Node,
    home: String,
    storage: StorageHandle,
}

impl Vfs {
    /// Load the tree from storage, falling back to the default tree when the
    /// stored form is absent or unusable
    pub fn load(storage: StorageHandle, home: impl Into<String>) -> Self {
        let persisted = storage.borrow().get(FS_KEY);
        let root = match persisted {
            Ok(Some(raw)) => match serde_json::from_str::<PersistedTree>(&raw) {
                Ok(tree) if tree.root.is_dir() => tree.root,
                Ok(_) => {
                    tracing::warn!("Persisted filesystem root is not a directory, using defaults");
                    default_tree()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse persisted filesystem: {}", e);
                    default_tree()
                }
            },
            Ok(None) => default_tree(),
            Err(e) => {
                tracing::warn!("Failed to read persisted filesystem: {}", e);
                default_tree()
            }
        };

        Self {
            root,
            home: normalize(&home.into()),
            storage,
        }
    }

    /// The fixed home directory that `~` maps to
    pub fn home(&self) -> &str {
        &self.home
    }

    /// The root directory node
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Resolve a user-supplied path against `cwd` into an absolute path
    ///
    /// Empty input means `cwd`, `~` is the home directory and `~/x` is relative to it.
    pub fn resolve(&self, raw: &str, cwd: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return normalize(cwd);
        }
        if raw == "~" {
            return self.home.clone();
        }
        if let Some(rest) = raw.strip_prefix("~/") {
            return join(&self.home, rest);
        }
        join(cwd, raw)
    }

    /// Find the node at an absolute path
    pub fn get_node(&self, path: &str) -> Option<&Node> {
        let normalized = normalize(path);
        let mut current = &self.root;
        for part in normalized.split('/').filter(|p| !p.is_empty()) {
            match current {
                Node::Directory { children } => current = children.get(part)?,
                _ => return None,
            }
        }
        Some(current)
    }

    fn get_node_mut(&mut self, path: &str) -> Option<&mut Node> {
        let normalized = normalize(path);
        let mut current = &mut self.root;
        for part in normalized.split('/').filter(|p| !p.is_empty()) {
            match current {
                Node::Directory { children } => current = children.get_mut(part)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// List a directory in ascending name order, `None` if `path` is not a directory
    pub fn list(&self, path: &str) -> Option<Vec<DirEntry>> {
        match self.get_node(path)? {
            Node::Directory { children } => Some(
                children
                    .iter()
                    .map(|(name, child)| DirEntry {
                        name: name.clone(),
                        kind: child.kind(),
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Create or overwrite the text file at `path`
    pub fn write_text_file(&mut self, path: &str, content: &str) -> VfsResult<()> {
        let (parent_path, name) = split_parent(path);
        let Some(name) = name else {
            return Err(VfsError::IsADirectory("/".to_string()));
        };

        let Some(Node::Directory { children }) = self.get_node_mut(&parent_path) else {
            return Err(VfsError::InvalidDirectory(parent_path));
        };

        match children.get(&name) {
            Some(Node::Directory { .. }) => return Err(VfsError::IsADirectory(name)),
            Some(Node::Image { .. }) => return Err(VfsError::NotAText(name)),
            Some(Node::TextFile { .. }) | None => {}
        }

        children.insert(
            name,
            Node::TextFile {
                content: content.to_string(),
            },
        );
        self.persist();
        Ok(())
    }

    /// Restore the default tree, overwriting persisted state
    pub fn reset(&mut self) {
        self.root = default_tree();
        self.persist();
        tracing::info!("Virtual filesystem reset to defaults");
    }

    /// Write the full tree to storage. Failures are logged and swallowed.
    pub fn persist(&self) {
        let tree = PersistedTree {
            root: self.root.clone(),
        };
        let result = serde_json::to_string(&tree)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.borrow_mut().set(FS_KEY, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to persist filesystem: {}", e);
        }
    }
}

fn dir<const N: usize>(entries: [(&str, Node); N]) -> Node {
    let mut node = Node::empty_dir();
    if let Node::Directory { children } = &mut node {
        children.extend(entries.into_iter().map(|(name, n)| (name.to_string(), n)));
    }
    node
}

fn text(lines: &[&str]) -> Node {
    Node::TextFile {
        content: lines.join("\n"),
    }
}

fn svg(source: &str) -> Node {
    Node::Image {
        source: source.to_string(),
        mime_type: "image/svg+xml".to_string(),
    }
}

/// The tree every fresh terminal starts with
pub fn default_tree() -> Node {
    dir([
        (
            "home",
            dir([(
                "guest",
                dir([
                    (
                        "README.txt",
                        text(&[
                            "# Welcome to Ravon.Dev",
                            "",
                            "This is a simulated filesystem.",
                            "Try commands:",
                            "  - ls, cd, pwd",
                            "  - cat README.txt",
                            "  - nano notes.txt",
                            "  - open pictures/ravon-dev.svg",
                        ]),
                    ),
                    (
                        "notes.txt",
                        text(&[
                            "Ravon ideas:",
                            "- Homelab improvements",
                            "- Docker Compose templates",
                            "- Tailscale routes",
                        ]),
                    ),
                    (
                        "socrates.txt",
                        text(&[
                            "Socrates, selected quotes:",
                            "",
                            "1) The only true wisdom is in knowing you know nothing.",
                            "2) The unexamined life is not worth living.",
                            "3) To find yourself, think for yourself.",
                        ]),
                    ),
                    (
                        "documents",
                        dir([(
                            "about-me.txt",
                            text(&[
                                "Hi, I'm Ravon. I like:",
                                "- Ben & Jerry's Chocolate Fudge Brownie",
                                "- Docker, Proxmox, and Tailscale",
                                "",
                                "Find me at: ravon.dev",
                            ]),
                        )]),
                    ),
                    (
                        "pictures",
                        dir([
                            ("ravon-dev.svg", svg("img/ravon-dev.svg")),
                            ("matrix.svg", svg("img/matrix.svg")),
                        ]),
                    ),
                ]),
            )]),
        ),
        (
            "docs",
            dir([(
                "credits.txt",
                text(&[
                    "Credits:",
                    " - davislcruz (site)",
                    " - Ravon (inspiration)",
                    " - Open CRT effects community",
                ]),
            )]),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::storage::{shared, FailingStorage, MemoryStorage, Storage};

    fn vfs() -> Vfs {
        Vfs::load(shared(MemoryStorage::new()), "/home/guest")
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/a/./b/../c/"), "/a/c");
        assert_eq!(normalize("/../../x"), "/x");
        assert_eq!(normalize("a//b"), "/a/b");
    }

    #[test]
    fn test_resolve() {
        let fs = vfs();
        let cwd = "/home/guest";
        assert_eq!(fs.resolve("", cwd), "/home/guest");
        assert_eq!(fs.resolve(".", cwd), "/home/guest");
        assert_eq!(fs.resolve("~", "/docs"), "/home/guest");
        assert_eq!(fs.resolve("~/pictures", "/docs"), "/home/guest/pictures");
        assert_eq!(fs.resolve("..", cwd), "/home");
        assert_eq!(fs.resolve("../../../..", cwd), "/");
        assert_eq!(fs.resolve("/docs/./credits.txt", cwd), "/docs/credits.txt");
        assert_eq!(fs.resolve("documents/about-me.txt", cwd), "/home/guest/documents/about-me.txt");
    }

    #[test]
    fn test_get_node_through_file_is_not_found() {
        let fs = vfs();
        assert!(fs.get_node("/home/guest/notes.txt").is_some());
        assert!(fs.get_node("/home/guest/notes.txt/inner").is_none());
        assert!(fs.get_node("/nope").is_none());
        assert!(fs.get_node("/").unwrap().is_dir());
    }

    #[test]
    fn test_list_is_sorted_and_typed() {
        let fs = vfs();
        let entries = fs.list("/home/guest").unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["README.txt", "documents", "notes.txt", "pictures", "socrates.txt"]
        );
        assert_eq!(entries[1].kind, NodeKind::Directory);
        assert!(fs.list("/home/guest/notes.txt").is_none());
        assert!(fs.list("/missing").is_none());
    }

    #[test]
    fn test_unavailable_storage_keeps_working_in_memory() {
        let mut fs = Vfs::load(shared(FailingStorage), "/home/guest");
        assert_eq!(fs.root(), &default_tree());

        fs.write_text_file("/home/guest/offline.txt", "still here").unwrap();
        assert_eq!(
            fs.get_node("/home/guest/offline.txt"),
            Some(&Node::TextFile {
                content: "still here".to_string()
            })
        );

        fs.reset();
        assert_eq!(fs.root(), &default_tree());
    }

    #[test]
    fn test_write_text_file() {
        let mut fs = vfs();
        fs.write_text_file("/home/guest/new.txt", "hello").unwrap();
        assert_eq!(
            fs.get_node("/home/guest/new.txt"),
            Some(&Node::TextFile {
                content: "hello".to_string()
            })
        );

        // Overwrite
        fs.write_text_file("/home/guest/new.txt", "again").unwrap();
        assert_eq!(
            fs.get_node("/home/guest/new.txt"),
            Some(&Node::TextFile {
                content: "again".to_string()
            })
        );
    }

    #[test]
    fn test_write_text_file_wrong_kinds() {
        let mut fs = vfs();
        assert_eq!(
            fs.write_text_file("/home/guest/documents", "x"),
            Err(VfsError::IsADirectory("documents".to_string()))
        );
        assert_eq!(
            fs.write_text_file("/home/guest/pictures/matrix.svg", "x"),
            Err(VfsError::NotAText("matrix.svg".to_string()))
        );
        assert_eq!(
            fs.write_text_file("/nowhere/file.txt", "x"),
            Err(VfsError::InvalidDirectory("/nowhere".to_string()))
        );
        assert_eq!(
            fs.write_text_file("/", "x"),
            Err(VfsError::IsADirectory("/".to_string()))
        );
        assert_eq!(
            VfsError::NotAText("matrix.svg".to_string()).to_string(),
            "matrix.svg: Not a text file"
        );
    }

    #[test]
    fn test_writes_persist_across_loads() {
        let storage = shared(MemoryStorage::new());
        let mut fs = Vfs::load(storage.clone(), "/home/guest");
        fs.write_text_file("/docs/todo.txt", "a\nb").unwrap();

        let reloaded = Vfs::load(storage, "/home/guest");
        assert_eq!(
            reloaded.get_node("/docs/todo.txt"),
            Some(&Node::TextFile {
                content: "a\nb".to_string()
            })
        );
    }

    #[test]
    fn test_persisted_layout() {
        let storage = shared(MemoryStorage::new());
        let fs = Vfs::load(storage.clone(), "/home/guest");
        fs.persist();

        let raw = storage.borrow().get(FS_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["/"]["type"], "dir");
        let picture = &json["/"]["children"]["home"]["children"]["guest"]["children"]["pictures"]
            ["children"]["matrix.svg"];
        assert_eq!(picture["type"], "image");
        assert_eq!(picture["src"], "img/matrix.svg");
        assert_eq!(picture["mime"], "image/svg+xml");
    }

    #[test]
    fn test_unusable_persisted_tree_falls_back_to_default() {
        let storage = shared(MemoryStorage::new());
        storage.borrow_mut().set(FS_KEY, "{not json").unwrap();
        assert_eq!(Vfs::load(storage.clone(), "/home/guest").root(), &default_tree());

        storage
            .borrow_mut()
            .set(FS_KEY, r#"{"/":{"type":"text","content":"x"}}"#)
            .unwrap();
        assert_eq!(Vfs::load(storage, "/home/guest").root(), &default_tree());
    }

    #[test]
    fn test_reset_restores_default_tree() {
        let storage = shared(MemoryStorage::new());
        let mut fs = Vfs::load(storage.clone(), "/home/guest");
        fs.write_text_file("/home/guest/README.txt", "changed").unwrap();
        fs.write_text_file("/extra.txt", "more").unwrap();
        assert_ne!(fs.root(), &default_tree());

        fs.reset();
        assert_eq!(fs.root(), &default_tree());
        assert_eq!(Vfs::load(storage, "/home/guest").root(), &default_tree());
    }
}
