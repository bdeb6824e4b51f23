use std::io::Write;

use super::{Layout, last_segment};

/// Prints directories as nested `export module` blocks.
///
/// Every line is indented four spaces per enclosing block.
#[derive(Debug)]
pub struct ModuleLayout<W> {
    writer: W,
    depth: usize,
}

impl<W: Write> ModuleLayout<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, depth: 0 }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn pad(&self) -> String {
        " ".repeat(self.depth * 4)
    }
}

impl<W: Write> Layout for ModuleLayout<W> {
    fn enter(&mut self, path: &str, _last: bool) -> std::io::Result<()> {
        writeln!(
            self.writer,
            "{}export module {} {{",
            self.pad(),
            last_segment(path)
        )?;
        self.depth += 1;
        Ok(())
    }

    fn print(&mut self, line: &str, _first: bool, _last: bool) -> std::io::Result<()> {
        writeln!(self.writer, "{}{line}", self.pad())
    }

    fn leave(&mut self, _path: &str, _last: bool) -> std::io::Result<()> {
        self.depth = self.depth.saturating_sub(1);
        writeln!(self.writer, "{}}}", self.pad())
    }
}
