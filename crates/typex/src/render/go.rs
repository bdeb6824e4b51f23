//! Native declaration dump.

use typex_core::{
    name::QualifiedName,
    types::{Chan, ChanDir, Interface, Signature, Struct, Tuple, Type},
};

use super::{Context, EntryWriter, Visibility, short_name};
use crate::filter::PathReplace;

/// Writes entries as `<name> <type>` in native syntax.
pub(super) struct GoWriter<'a> {
    replace: &'a PathReplace,
    visibility: Visibility,
}

impl<'a> GoWriter<'a> {
    pub(super) fn new(replace: &'a PathReplace, visibility: Visibility) -> Self {
        Self {
            replace,
            visibility,
        }
    }

    fn write_type(&self, ctx: &mut Context<'_>, ty: &Type) {
        match ty {
            Type::Basic(kind) => ctx.write(kind.name()),
            Type::Named(name) => self.write_named(ctx, name),
            Type::Struct(value) => self.write_struct(ctx, value),
            Type::Interface(value) => self.write_interface(ctx, value),
            Type::Pointer(elem) => {
                ctx.write("*");
                self.write_type(ctx, elem);
            }
            Type::Slice(elem) => {
                ctx.write("[]");
                self.write_type(ctx, elem);
            }
            Type::Array(array) => {
                ctx.write(&format!("[{}]", array.len));
                self.write_type(ctx, &array.elem);
            }
            Type::Map(map) => {
                ctx.write("map[");
                self.write_type(ctx, &map.key);
                ctx.write("]");
                self.write_type(ctx, &map.elem);
            }
            Type::Chan(chan) => self.write_chan(ctx, chan),
            Type::Signature(signature) => {
                ctx.write("func");
                self.write_signature(ctx, signature);
            }
            Type::Tuple(tuple) => self.write_tuple(ctx, tuple, false),
        }
    }

    fn write_named(&self, ctx: &mut Context<'_>, name: &QualifiedName) {
        ctx.write(&short_name(self.replace, name));
    }

    fn write_chan(&self, ctx: &mut Context<'_>, chan: &Chan) {
        ctx.write(match chan.dir {
            ChanDir::SendRecv => "chan ",
            ChanDir::SendOnly => "chan<- ",
            ChanDir::RecvOnly => "<-chan ",
        });
        // `chan <-chan T` would read as `chan<- chan T`
        let parenthesize = chan.dir == ChanDir::SendRecv
            && matches!(&*chan.elem, Type::Chan(inner) if inner.dir == ChanDir::RecvOnly);
        if parenthesize {
            ctx.write("(");
        }
        self.write_type(ctx, &chan.elem);
        if parenthesize {
            ctx.write(")");
        }
    }

    fn write_struct(&self, ctx: &mut Context<'_>, value: &Struct) {
        ctx.indent();
        ctx.write("struct {");

        let mut void = true;
        for field in value.fields() {
            if !self.visibility.shows_field(field) {
                continue;
            }
            ctx.newline();
            if !field.is_embedded() {
                ctx.write(field.name());
                ctx.write(" ");
            }
            self.write_type(ctx, field.ty());
            if !field.tag().is_empty() {
                ctx.write(&format!("\t\t`{}`", field.tag()));
            }
            void = false;
        }

        ctx.dedent();
        if !void {
            ctx.newline();
        }
        ctx.write("}");
    }

    fn write_interface(&self, ctx: &mut Context<'_>, value: &Interface) {
        ctx.indent();
        ctx.write("interface {");

        let mut void = true;
        for embedded in value.embeddeds() {
            if !self.visibility.exportable_type(embedded) {
                continue;
            }
            ctx.newline();
            self.write_type(ctx, embedded);
            void = false;
        }
        for method in value.methods() {
            if !self.visibility.exportable(method.name()) {
                continue;
            }
            ctx.newline();
            ctx.write(method.name());
            self.write_signature(ctx, method.signature());
            void = false;
        }

        ctx.dedent();
        if !void {
            ctx.newline();
        }
        ctx.write("}");
    }

    /// Writes parameters and results; a single unnamed result is written bare.
    fn write_signature(&self, ctx: &mut Context<'_>, signature: &Signature) {
        self.write_tuple(ctx, signature.params(), signature.is_variadic());

        let results = signature.results();
        match results.vars() {
            [] => {}
            [only] if only.name().is_empty() => {
                ctx.write(" ");
                self.write_type(ctx, only.ty());
            }
            _ => {
                ctx.write(" ");
                self.write_tuple(ctx, results, false);
            }
        }
    }

    fn write_tuple(&self, ctx: &mut Context<'_>, tuple: &Tuple, variadic: bool) {
        ctx.write("(");
        let count = tuple.len();
        for (index, var) in tuple.vars().iter().enumerate() {
            if index > 0 {
                ctx.write(", ");
            }
            if !var.name().is_empty() {
                ctx.write(var.name());
                ctx.write(" ");
            }
            match var.ty() {
                Type::Slice(elem) if variadic && index == count - 1 => {
                    ctx.write("...");
                    self.write_type(ctx, elem);
                }
                ty => self.write_type(ctx, ty),
            }
        }
        ctx.write(")");
    }
}

impl EntryWriter for GoWriter<'_> {
    fn entry(&self, name: &QualifiedName, entry_name: &str, underlying: &Type) -> String {
        let mut ctx = Context::new(name);
        self.write_type(&mut ctx, underlying);
        format!("{entry_name} {}", ctx.finish())
    }
}
