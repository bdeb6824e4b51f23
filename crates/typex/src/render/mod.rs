//! Dialect rendering.
//!
//! A [`Renderer`] turns every entry of a [`TypeGraph`] into declaration text
//! in one [`Dialect`], keyed by the entry's display path. Rendering cannot
//! fail; members hidden by visibility rules are left out.
//!
//! Each entry is rendered with a fresh [`Context`] that owns the output
//! buffer, the indentation depth and the stack of named types currently
//! being rendered. Named references are always written by name, never
//! expanded, so rendering terminates on cyclic graphs.

mod go;
mod ts;

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::Deserialize;

use typex_core::{
    name::{QualifiedName, is_exported_path},
    types::{Field, Type},
};

use crate::{filter::PathReplace, graph::TypeGraph};

/// Display path to rendered declaration text.
///
/// Ordered by path so that iteration is deterministic.
pub type PathMap = BTreeMap<String, String>;

/// Available output dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Native declaration dump.
    #[default]
    Go,
    /// TypeScript type aliases.
    TsType,
    /// TypeScript classes for struct types, type aliases otherwise.
    TsClass,
}

/// Writes the declaration text of one named type.
trait EntryWriter {
    /// Renders the declaration of `name`, displayed as `entry_name`.
    fn entry(&self, name: &QualifiedName, entry_name: &str, underlying: &Type) -> String;
}

/// Renders type graphs in a dialect.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    dialect: Dialect,
    replace: &'a PathReplace,
    include_unexported: bool,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: Dialect, replace: &'a PathReplace, include_unexported: bool) -> Self {
        Self {
            dialect,
            replace,
            include_unexported,
        }
    }

    /// Renders every entry of `graph`.
    ///
    /// When two entries relocate to the same display path the later one
    /// replaces the earlier one.
    pub fn render(&self, graph: &TypeGraph) -> PathMap {
        info!(dialect:? = self.dialect, types_count = graph.len(); "Rendering type graph");

        let visibility = Visibility::new(self.include_unexported);
        let writer: Box<dyn EntryWriter + '_> = match self.dialect {
            Dialect::Go => Box::new(go::GoWriter::new(self.replace, visibility)),
            Dialect::TsType => Box::new(ts::TsWriter::new(self.replace, visibility, graph, false)),
            Dialect::TsClass => Box::new(ts::TsWriter::new(self.replace, visibility, graph, true)),
        };

        let mut paths = PathMap::new();
        for (name, underlying) in graph.iter() {
            let (path, entry_name) = display_path(self.replace, name);
            let text = writer.entry(name, &entry_name, underlying);
            debug!(name:%, path; "Rendered entry");
            if paths.insert(path.clone(), text).is_some() {
                warn!(name:%, path; "Display path collision, replacing earlier entry");
            }
        }
        paths
    }
}

/// Splits a relocated qualified name into its display path and entry name.
///
/// The text after the last `.` becomes the entry name and is appended to
/// the prefix as a path segment, so `p1.T` is positioned at `p1/T`.
pub fn display_path(replace: &PathReplace, name: &QualifiedName) -> (String, String) {
    let path = replace.apply(&name.to_string());
    match path.rfind('.') {
        Some(index) if index < path.len() - 1 => {
            let entry_name = path[index + 1..].to_string();
            (format!("{}/{}", &path[..index], entry_name), entry_name)
        }
        _ => (path.clone(), path),
    }
}

/// Short reference form of a named type: its relocated name after the last `/`.
fn short_name(replace: &PathReplace, name: &QualifiedName) -> String {
    let path = replace.apply(&name.to_string());
    match path.rsplit_once('/') {
        Some((_, short)) => short.to_string(),
        None => path,
    }
}

/// Visibility rules shared by the dialects.
#[derive(Debug, Clone, Copy)]
struct Visibility {
    include_unexported: bool,
}

impl Visibility {
    fn new(include_unexported: bool) -> Self {
        Self { include_unexported }
    }

    fn exportable(self, path: &str) -> bool {
        self.include_unexported || is_exported_path(path)
    }

    /// Whether `ty` is anything but a named type that may not be shown.
    fn exportable_type(self, ty: &Type) -> bool {
        ty.as_named()
            .is_none_or(|name| self.exportable(&name.to_string()))
    }

    fn shows_field(self, field: &Field) -> bool {
        self.exportable(field.name()) && self.exportable_type(field.ty())
    }
}

/// Indentation unit of nested bodies.
const INDENT: &str = "    ";

/// Output state of a single entry.
struct Context<'a> {
    out: String,
    depth: usize,
    rendering: Vec<&'a QualifiedName>,
}

impl<'a> Context<'a> {
    /// Starts rendering the entry `name`.
    fn new(name: &'a QualifiedName) -> Self {
        Self {
            out: String::new(),
            depth: 0,
            rendering: vec![name],
        }
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn pad(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    /// Starts a new line at the current depth.
    fn newline(&mut self) {
        self.out.push('\n');
        self.pad();
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Reports whether `name` is currently being rendered.
    fn is_rendering(&self, name: &QualifiedName) -> bool {
        self.rendering.iter().any(|entry| *entry == name)
    }

    fn finish(mut self) -> String {
        debug_assert_eq!(self.depth, 0, "unbalanced indentation");
        self.rendering.pop();
        self.out
    }
}

#[cfg(test)]
mod tests {
    use typex_core::types::{BasicKind, Struct};

    use super::*;

    fn graph_of(entries: &[(&str, Type)]) -> TypeGraph {
        let mut graph = TypeGraph::new();
        for (name, ty) in entries {
            graph.register(QualifiedName::from(*name), ty.clone());
        }
        graph
    }

    #[test]
    fn test_display_path() {
        let replace = PathReplace::new([".*/testdata:"]);
        let name = QualifiedName::from("github.com/x/testdata/p1.T");
        assert_eq!(
            display_path(&replace, &name),
            ("p1/T".to_string(), "T".to_string())
        );

        let none = PathReplace::default();
        assert_eq!(
            display_path(&none, &QualifiedName::from("error")),
            ("error".to_string(), "error".to_string())
        );
        assert_eq!(
            display_path(&none, &QualifiedName::from("net/url.URL")),
            ("net/url/URL".to_string(), "URL".to_string())
        );
    }

    #[test]
    fn test_short_name() {
        let none = PathReplace::default();
        assert_eq!(short_name(&none, &QualifiedName::from("net/url.URL")), "url.URL");
        assert_eq!(short_name(&none, &QualifiedName::from("time.Duration")), "time.Duration");
    }

    #[test]
    fn test_render_keys_by_display_path() {
        let graph = graph_of(&[
            ("p.T", BasicKind::Int.into()),
            ("p/q.U", Struct::default().into()),
        ]);
        let replace = PathReplace::default();

        let paths = Renderer::new(Dialect::Go, &replace, false).render(&graph);
        let keys: Vec<&str> = paths.keys().map(String::as_str).collect();
        assert_eq!(keys, ["p/T", "p/q/U"]);
        assert_eq!(paths["p/T"], "T int");
        assert_eq!(paths["p/q/U"], "U struct {}");
    }

    #[test]
    fn test_render_collision_keeps_later_entry() {
        let graph = graph_of(&[
            ("a/p.T", BasicKind::Int.into()),
            ("b/p.T", BasicKind::String.into()),
        ]);
        let replace = PathReplace::new(["^[ab]/:"]);

        let paths = Renderer::new(Dialect::Go, &replace, false).render(&graph);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths["p/T"], "T string");
    }

    #[test]
    fn test_render_is_deterministic() {
        let graph = graph_of(&[
            ("p.B", BasicKind::Int.into()),
            ("p.A", Type::slice(Type::named("p.B"))),
        ]);
        let replace = PathReplace::default();
        for dialect in [Dialect::Go, Dialect::TsType, Dialect::TsClass] {
            let renderer = Renderer::new(dialect, &replace, false);
            assert_eq!(renderer.render(&graph), renderer.render(&graph));
        }
    }

    #[test]
    fn test_context_balances_depth() {
        let name = QualifiedName::from("p.T");
        let mut ctx = Context::new(&name);
        ctx.indent();
        ctx.write("{");
        ctx.newline();
        ctx.dedent();
        ctx.newline();
        ctx.write("}");
        assert!(ctx.is_rendering(&name));
        assert_eq!(ctx.finish(), "{\n    \n}");
    }
}
