use std::io::Write;

use super::{Layout, last_segment};

const BRANCH: &str = "├── ";
const CORNER: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Prints a directory listing with connector glyphs.
///
/// ```text
/// └── p1
///     ├── S struct {
///     │       T
///     │   }
///     └── T struct {}
/// ```
///
/// Continuation lines of an entry keep the column of their connector: a
/// vertical bar if more siblings follow, blanks otherwise.
#[derive(Debug)]
pub struct TreeLayout<W> {
    writer: W,
    /// Per depth, whether the node last visited there has later siblings.
    more: Vec<bool>,
    depth: usize,
}

impl<W: Write> TreeLayout<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            more: Vec::new(),
            depth: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Columns of all ancestors of the current node.
    fn ancestors(&self) -> String {
        (0..self.depth)
            .map(|depth| {
                if self.more.get(depth).copied().unwrap_or(false) {
                    PIPE
                } else {
                    BLANK
                }
            })
            .collect()
    }

    /// Records whether siblings follow the node at the current depth.
    fn mark(&mut self, last: bool) {
        if self.more.len() <= self.depth {
            self.more.resize(self.depth + 1, false);
        }
        self.more[self.depth] = !last;
    }
}

impl<W: Write> Layout for TreeLayout<W> {
    fn enter(&mut self, path: &str, last: bool) -> std::io::Result<()> {
        let prefix = self.ancestors();
        self.mark(last);
        let glyph = if last { CORNER } else { BRANCH };
        writeln!(self.writer, "{prefix}{glyph}{}", last_segment(path))?;
        self.depth += 1;
        Ok(())
    }

    fn print(&mut self, line: &str, first: bool, last: bool) -> std::io::Result<()> {
        let prefix = self.ancestors();
        self.mark(last);
        let glyph = match (first, last) {
            (true, true) => CORNER,
            (true, false) => BRANCH,
            (false, true) => BLANK,
            (false, false) => PIPE,
        };
        writeln!(self.writer, "{prefix}{glyph}{line}")
    }

    fn leave(&mut self, _path: &str, _last: bool) -> std::io::Result<()> {
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }
}
