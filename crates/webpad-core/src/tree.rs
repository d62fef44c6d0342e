//! Tree builder.
//!
//! Derives the hierarchical explorer view from the flat key set. The tree is
//! a throwaway value: rebuilt in full on every refresh, never mutated in
//! place and never persisted.

use std::collections::BTreeMap;

use crate::path::{self, EntryKind, SEPARATOR};

/// A node in the derived project tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    /// Last path segment (no trailing separator)
    pub name: String,
    /// Full path; folders keep their trailing separator
    pub full_path: String,
    pub kind: EntryKind,
    /// Children keyed by name, folders suffixed with `/`. `None` for files.
    ///
    /// The suffix keeps a file `a` and a folder `a/` apart when a store
    /// carries both forms.
    pub children: Option<BTreeMap<String, TreeNode>>,
}

/// One visible line of the explorer, produced by [`TreeNode::visible_rows`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub name: String,
    pub full_path: String,
    pub kind: EntryKind,
}

impl TreeNode {
    fn file(name: &str, full_path: &str) -> Self {
        Self {
            name: name.to_string(),
            full_path: full_path.to_string(),
            kind: EntryKind::File,
            children: None,
        }
    }

    fn folder(name: &str, full_path: &str) -> Self {
        Self {
            name: name.to_string(),
            full_path: full_path.to_string(),
            kind: EntryKind::Folder,
            children: Some(BTreeMap::new()),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    /// Direct children in name order (empty for files).
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &TreeNode> {
        self.children.iter().flat_map(|c| c.values())
    }

    /// Look up a node by full path. `""` is the node itself.
    pub fn find(&self, target: &str) -> Option<&TreeNode> {
        let parts = path::segments(target);
        let target_is_folder = path::is_folder(target);
        let mut current = self;

        for (i, part) in parts.iter().enumerate() {
            let is_folder = i + 1 < parts.len() || target_is_folder;
            current = current.children.as_ref()?.get(&slot_key(part, is_folder))?;
        }

        Some(current)
    }

    /// Number of file leaves underneath this node.
    pub fn count_files(&self) -> usize {
        match &self.children {
            None => 1,
            Some(children) => children.values().map(TreeNode::count_files).sum(),
        }
    }

    /// Depth-first listing of the rows an explorer would show.
    ///
    /// Children of a folder are only descended into when `is_open` returns
    /// true for its full path. The node itself is not listed.
    pub fn visible_rows(&self, is_open: impl Fn(&str) -> bool) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        let mut stack: Vec<(usize, &TreeNode)> = self.children().rev().map(|c| (0, c)).collect();

        while let Some((depth, node)) = stack.pop() {
            rows.push(TreeRow {
                depth,
                name: node.name.clone(),
                full_path: node.full_path.clone(),
                kind: node.kind,
            });
            if node.is_folder() && is_open(&node.full_path) {
                stack.extend(node.children().rev().map(|c| (depth + 1, c)));
            }
        }

        rows
    }
}

fn slot_key(name: &str, is_folder: bool) -> String {
    if is_folder {
        format!("{}{}", name, SEPARATOR)
    } else {
        name.to_string()
    }
}

/// Build the project tree from a key set.
///
/// Returns a root folder node (empty name and path) whose children are the
/// top-level entries. Every folder implied by any key's ancestry appears
/// exactly once; every explicit key appears as exactly one node. The result
/// depends only on the set of keys, not their order.
pub fn build_tree<'a, I>(keys: I) -> TreeNode
where
    I: IntoIterator<Item = &'a str>,
{
    let mut root = TreeNode::folder("", "");
    for key in keys {
        insert_path(&mut root, key);
    }
    root
}

/// Insert one key, creating intermediate folders on the way down.
fn insert_path(root: &mut TreeNode, key: &str) {
    let parts = path::segments(key);
    let key_is_folder = path::is_folder(key);
    let mut current = root;
    let mut full_path = String::with_capacity(key.len());

    for (i, part) in parts.iter().enumerate() {
        let is_folder = i + 1 < parts.len() || key_is_folder;
        full_path.push_str(part);
        if is_folder {
            full_path.push(SEPARATOR);
        }

        let Some(children) = current.children.as_mut() else {
            // Only folders are descended into, so this cannot happen.
            return;
        };
        current = children
            .entry(slot_key(part, is_folder))
            .or_insert_with(|| {
                if is_folder {
                    TreeNode::folder(part, &full_path)
                } else {
                    TreeNode::file(part, &full_path)
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(node: &TreeNode) -> Vec<&str> {
        node.children().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_implied_folders_created_once() {
        let tree = build_tree(["src/a.js", "src/b.js", "src/lib/c.js"]);

        assert_eq!(names(&tree), vec!["src"]);
        let src = tree.find("src/").expect("src should exist");
        assert!(src.is_folder());
        assert_eq!(src.full_path, "src/");
        assert_eq!(names(src), vec!["a.js", "b.js", "lib"]);
        assert_eq!(tree.find("src/lib/c.js").unwrap().full_path, "src/lib/c.js");
    }

    #[test]
    fn test_explicit_folder_marker_and_implied_folder_merge() {
        let tree = build_tree(["src/", "src/a.js"]);
        assert_eq!(tree.children().count(), 1);
        assert_eq!(tree.find("src/").unwrap().children().count(), 1);
    }

    #[test]
    fn test_empty_folder_marker() {
        let tree = build_tree(["docs/"]);
        let docs = tree.find("docs/").unwrap();
        assert!(docs.is_folder());
        assert_eq!(docs.children().count(), 0);
    }

    #[test]
    fn test_siblings_sorted_by_name() {
        let tree = build_tree(["z.js", "b/", "a.py", "m/x.md"]);
        assert_eq!(names(&tree), vec!["a.py", "b", "m", "z.js"]);
    }

    #[test]
    fn test_build_is_order_independent() {
        let a = build_tree(["src/a.js", "lib/", "main.js", "src/sub/b.py"]);
        let b = build_tree(["src/sub/b.py", "main.js", "lib/", "src/a.js"]);
        assert_eq!(a, b);
        assert_eq!(a, build_tree(["src/a.js", "lib/", "main.js", "src/sub/b.py"]));
    }

    #[test]
    fn test_dual_entry_yields_two_nodes() {
        let tree = build_tree(["a", "a/"]);
        assert_eq!(tree.children().count(), 2);
        assert_eq!(tree.find("a").unwrap().kind, EntryKind::File);
        assert_eq!(tree.find("a/").unwrap().kind, EntryKind::Folder);
    }

    #[test]
    fn test_deep_nesting() {
        let deep: String = (0..200).map(|i| format!("d{}/", i)).collect::<String>() + "leaf.txt";
        let tree = build_tree([deep.as_str()]);
        assert_eq!(tree.find(&deep).unwrap().name, "leaf.txt");
        assert_eq!(tree.count_files(), 1);
    }

    #[test]
    fn test_visible_rows_respects_open_folders() {
        let tree = build_tree(["src/a.js", "src/lib/b.js", "main.js"]);

        let collapsed = tree.visible_rows(|_| false);
        let paths: Vec<_> = collapsed.iter().map(|r| r.full_path.as_str()).collect();
        assert_eq!(paths, vec!["main.js", "src/"]);

        let expanded = tree.visible_rows(|_| true);
        let rows: Vec<_> = expanded
            .iter()
            .map(|r| (r.depth, r.full_path.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (0, "main.js"),
                (0, "src/"),
                (1, "src/a.js"),
                (1, "src/lib/"),
                (2, "src/lib/b.js"),
            ]
        );
    }
}
