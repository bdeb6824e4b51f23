//! Hierarchical printing of rendered entries.
//!
//! [`TreeWalk`] arranges a [`PathMap`] into an implicit directory tree: each
//! display path is split on `/`, every segment but the last is a directory
//! and the last one is a leaf holding the entry text. The tree is traversed
//! depth first with the children of each directory in name order, and every
//! step is reported to a [`Layout`] visitor that does the actual printing.
//!
//! Two layouts are provided:
//!
//! - [`TreeLayout`] - directory listing with `├── ` / `└── ` connectors
//! - [`ModuleLayout`] - nested `export module` blocks

mod module;
mod tree;

pub use module::ModuleLayout;
pub use tree::TreeLayout;

use std::{collections::BTreeMap, io};

use log::{debug, trace};

use crate::render::PathMap;

/// Visitor driven by [`TreeWalk`].
///
/// `path` is the `/`-joined path of a directory, `last` tells whether the
/// visited node is the last child of its parent, and `first` whether a line
/// is the first line of its entry.
pub trait Layout {
    fn enter(&mut self, path: &str, last: bool) -> io::Result<()>;

    fn print(&mut self, line: &str, first: bool, last: bool) -> io::Result<()>;

    fn leave(&mut self, path: &str, last: bool) -> io::Result<()>;
}

/// Returns the last `/`-separated segment of `path`.
fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// A directory of the implicit tree.
#[derive(Debug, Default)]
struct Dir<'a> {
    children: BTreeMap<&'a str, Node<'a>>,
}

/// Everything stored under one segment name: an entry, a directory, or both.
#[derive(Debug, Default)]
struct Node<'a> {
    leaf: Option<&'a str>,
    dir: Option<Dir<'a>>,
}

/// A child in traversal order.
enum Child<'d, 'a> {
    Leaf(&'a str),
    Dir(&'a str, &'d Dir<'a>),
}

impl<'a> Dir<'a> {
    fn build(paths: &'a PathMap) -> Self {
        let mut root = Dir::default();
        for (path, text) in paths {
            let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
            let Some((leaf, dirs)) = segments.split_last() else {
                debug!(path; "Skipping entry without path segments");
                continue;
            };
            let mut dir = &mut root;
            for segment in dirs {
                dir = dir
                    .children
                    .entry(*segment)
                    .or_default()
                    .dir
                    .get_or_insert_with(Dir::default);
            }
            dir.children.entry(*leaf).or_default().leaf = Some(text.as_str());
        }
        root
    }

    /// Children by name; an entry precedes a directory of the same name.
    fn children(&self) -> Vec<Child<'_, 'a>> {
        let mut children = Vec::with_capacity(self.children.len());
        for (name, node) in &self.children {
            if let Some(text) = node.leaf {
                children.push(Child::Leaf(text));
            }
            if let Some(dir) = &node.dir {
                children.push(Child::Dir(*name, dir));
            }
        }
        children
    }
}

/// Drives a [`Layout`] over the implicit tree of a [`PathMap`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeWalk;

impl TreeWalk {
    /// Walks `paths` and reports every directory and entry line to `layout`.
    ///
    /// Entry text is split into lines on `\n`. Identical input produces an
    /// identical sequence of visits.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by `layout`.
    pub fn walk<L>(paths: &PathMap, layout: &mut L) -> io::Result<()>
    where
        L: Layout + ?Sized,
    {
        let root = Dir::build(paths);
        Self::walk_dir(&root, "", layout)
    }

    fn walk_dir<L>(dir: &Dir<'_>, prefix: &str, layout: &mut L) -> io::Result<()>
    where
        L: Layout + ?Sized,
    {
        let children = dir.children();
        let count = children.len();
        for (index, child) in children.into_iter().enumerate() {
            let last = index + 1 == count;
            match child {
                Child::Leaf(text) => {
                    for (number, line) in text.split('\n').enumerate() {
                        layout.print(line, number == 0, last)?;
                    }
                }
                Child::Dir(name, sub) => {
                    let path = if prefix.is_empty() {
                        name.to_string()
                    } else {
                        format!("{prefix}/{name}")
                    };
                    trace!(path; "Entering directory");
                    layout.enter(&path, last)?;
                    Self::walk_dir(sub, &path, layout)?;
                    layout.leave(&path, last)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records visits as text.
    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Layout for Recorder {
        fn enter(&mut self, path: &str, last: bool) -> io::Result<()> {
            self.0.push(format!("enter {path} {last}"));
            Ok(())
        }

        fn print(&mut self, line: &str, first: bool, last: bool) -> io::Result<()> {
            self.0.push(format!("print {line} {first} {last}"));
            Ok(())
        }

        fn leave(&mut self, path: &str, last: bool) -> io::Result<()> {
            self.0.push(format!("leave {path} {last}"));
            Ok(())
        }
    }

    fn paths(entries: &[(&str, &str)]) -> PathMap {
        entries
            .iter()
            .map(|(path, text)| (path.to_string(), text.to_string()))
            .collect()
    }

    fn visits(map: &PathMap) -> Vec<String> {
        let mut recorder = Recorder::default();
        TreeWalk::walk(map, &mut recorder).unwrap();
        recorder.0
    }

    #[test]
    fn test_empty_map_visits_nothing() {
        assert!(visits(&PathMap::new()).is_empty());
    }

    #[test]
    fn test_walk_order_and_flags() {
        let map = paths(&[("b/Y", "y1\ny2"), ("a/X", "x"), ("b/c/Z", "z"), ("W", "w")]);
        assert_eq!(
            visits(&map),
            [
                "print w true false",
                "enter a false",
                "print x true true",
                "leave a false",
                "enter b true",
                "print y1 true false",
                "print y2 false false",
                "enter b/c true",
                "print z true true",
                "leave b/c true",
                "leave b true",
            ]
        );
    }

    #[test]
    fn test_leaf_precedes_directory_of_same_name() {
        let map = paths(&[("p/T", "t"), ("p/T/U", "u")]);
        assert_eq!(
            visits(&map),
            [
                "enter p true",
                "print t true false",
                "enter p/T true",
                "print u true true",
                "leave p/T true",
                "leave p true",
            ]
        );
    }

    #[test]
    fn test_empty_segments_are_ignored() {
        let map = paths(&[("/a//X/", "x"), ("", "dropped"), ("//", "dropped")]);
        assert_eq!(
            visits(&map),
            ["enter a true", "print x true true", "leave a true"]
        );
    }

    #[test]
    fn test_layout_error_stops_walk() {
        struct Failing;

        impl Layout for Failing {
            fn enter(&mut self, _: &str, _: bool) -> io::Result<()> {
                Err(io::Error::other("closed"))
            }

            fn print(&mut self, _: &str, _: bool, _: bool) -> io::Result<()> {
                Ok(())
            }

            fn leave(&mut self, _: &str, _: bool) -> io::Result<()> {
                panic!("left a directory that was never entered")
            }
        }

        let map = paths(&[("a/X", "x")]);
        let err = TreeWalk::walk(&map, &mut Failing).unwrap_err();
        assert_eq!(err.to_string(), "closed");
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("a/b/c"), "c");
        assert_eq!(last_segment("a"), "a");
    }
}
