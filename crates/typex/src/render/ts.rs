//! TypeScript declarations.
//!
//! Channels, interfaces and signatures have no structural counterpart and
//! are written as `any`; so is every reference to a named type whose
//! underlying type is one of them. Pointers are erased and arrays keep
//! only their element type.
//!
//! Struct field tags are honoured under the `json` key: `-` drops the
//! field, a primary value renames it and `omitempty` makes it optional.

use typex_core::{
    name::QualifiedName,
    tag::{ELIDE, JSON_KEY, OMIT_EMPTY, StructTag},
    types::{BasicClass, Struct, Type},
};

use super::{Context, EntryWriter, Visibility, display_path};
use crate::{filter::PathReplace, graph::TypeGraph};

const ANY: &str = "any";

/// Substitute key type for maps whose key is not a number or a string.
const SYMBOL: &str = "symbol";

/// Writes `export type` aliases, or `export class` declarations for struct
/// types in class mode.
pub(super) struct TsWriter<'a> {
    replace: &'a PathReplace,
    visibility: Visibility,
    graph: &'a TypeGraph,
    class: bool,
}

impl<'a> TsWriter<'a> {
    pub(super) fn new(
        replace: &'a PathReplace,
        visibility: Visibility,
        graph: &'a TypeGraph,
        class: bool,
    ) -> Self {
        Self {
            replace,
            visibility,
            graph,
            class,
        }
    }

    /// Follows named references down to a structural type.
    ///
    /// Returns `None` for names missing from the graph and for named types
    /// defined in terms of each other.
    fn resolve<'t>(&'t self, ty: &'t Type) -> Option<&'t Type> {
        let mut current = ty;
        for _ in 0..=self.graph.len() {
            match current {
                Type::Named(name) => current = self.graph.get(name)?,
                other => return Some(other),
            }
        }
        None
    }

    fn is_translatable(&self, ty: &Type) -> bool {
        !matches!(
            self.resolve(ty),
            Some(Type::Chan(_) | Type::Interface(_) | Type::Signature(_))
        )
    }

    fn is_valid_map_key(&self, ty: &Type) -> bool {
        match self.resolve(ty) {
            Some(Type::Basic(kind)) => {
                matches!(kind.class(), BasicClass::Numeric | BasicClass::String)
            }
            Some(Type::Map(map)) => self.is_valid_map_key(&map.key),
            _ => false,
        }
    }

    /// Writes `ty`; `readonly` marks struct members as in a class body.
    fn write_type(&self, ctx: &mut Context<'_>, ty: &Type, readonly: bool) {
        match ty {
            Type::Basic(kind) => ctx.write(match kind.class() {
                BasicClass::Boolean => "boolean",
                BasicClass::Numeric => "number",
                BasicClass::String => "string",
                BasicClass::Other => ANY,
            }),
            Type::Named(name) => self.write_named(ctx, name),
            Type::Struct(value) => self.write_struct(ctx, value, readonly, false),
            Type::Pointer(elem) => self.write_type(ctx, elem, readonly),
            Type::Slice(elem) => {
                self.write_type(ctx, elem, readonly);
                ctx.write("[]");
            }
            Type::Array(array) => {
                self.write_type(ctx, &array.elem, readonly);
                ctx.write("[]");
            }
            Type::Map(map) => {
                ctx.write("Record<");
                if self.is_valid_map_key(&map.key) {
                    self.write_type(ctx, &map.key, readonly);
                } else {
                    ctx.write(SYMBOL);
                }
                ctx.write(", ");
                self.write_type(ctx, &map.elem, readonly);
                ctx.write(">");
            }
            Type::Interface(_) | Type::Chan(_) | Type::Signature(_) | Type::Tuple(_) => {
                ctx.write(ANY)
            }
        }
    }

    fn write_named(&self, ctx: &mut Context<'_>, name: &QualifiedName) {
        let reference = Type::Named(name.clone());
        if !self.is_translatable(&reference) {
            ctx.write(ANY);
        } else if ctx.is_rendering(name) {
            ctx.write(&display_path(self.replace, name).1);
        } else {
            ctx.write(&self.replace.apply(&name.to_string()).replace('/', "."));
        }
    }

    /// Writes a struct literal; with `constructor` the members become the
    /// parameter properties of a class constructor.
    fn write_struct(
        &self,
        ctx: &mut Context<'_>,
        value: &Struct,
        readonly: bool,
        constructor: bool,
    ) {
        ctx.indent();
        ctx.write("{");
        if constructor {
            ctx.newline();
            ctx.write("constructor(");
            ctx.indent();
        }

        let mut void = true;
        for field in value.fields() {
            let (tag_name, options) = StructTag::new(field.tag()).get(JSON_KEY);
            if tag_name == ELIDE || !self.visibility.shows_field(field) {
                continue;
            }
            ctx.newline();
            if readonly {
                ctx.write("readonly ");
            }
            ctx.write(if tag_name.is_empty() { field.name() } else { tag_name.as_str() });
            if options.contains(OMIT_EMPTY) {
                ctx.write("?");
            }
            ctx.write(": ");
            self.write_type(ctx, field.ty(), readonly);
            ctx.write(",");
            void = false;
        }

        ctx.dedent();
        if !void {
            ctx.newline();
        }
        if constructor {
            ctx.dedent();
            ctx.write(") {}");
            ctx.newline();
        }
        ctx.write("}");
    }
}

impl EntryWriter for TsWriter<'_> {
    fn entry(&self, name: &QualifiedName, entry_name: &str, underlying: &Type) -> String {
        let mut ctx = Context::new(name);
        match underlying {
            Type::Struct(value) if self.class => {
                self.write_struct(&mut ctx, value, true, true);
                format!("export class {entry_name} {}", ctx.finish())
            }
            _ => {
                self.write_type(&mut ctx, underlying, false);
                format!("export type {entry_name} = {}", ctx.finish())
            }
        }
    }
}
