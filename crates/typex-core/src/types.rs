//! The structural type model.
//!
//! [`Type`] is a closed sum over the structural categories of the source
//! type system. Named types are referenced by [`QualifiedName`] only; their
//! underlying types live in a definition table (see
//! [`Universe`](crate::universe::Universe)), which is what allows cyclic
//! type graphs without shared ownership.
//!
//! All types deserialize from an externally tagged JSON shape:
//!
//! ```
//! # use typex_core::types::{BasicKind, Type};
//! let json = r#"{"slice": {"pointer": {"named": "example.com/p1.T"}}}"#;
//! let ty: Type = serde_json::from_str(json).unwrap();
//! assert_eq!(ty, Type::slice(Type::pointer(Type::named("example.com/p1.T"))));
//!
//! let basic: Type = serde_json::from_str(r#"{"basic": "uint8"}"#).unwrap();
//! assert_eq!(basic, Type::Basic(BasicKind::Uint8));
//! ```

use serde::Deserialize;

use crate::name::{self, QualifiedName};

/// A structural type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    Basic(BasicKind),
    Named(QualifiedName),
    Struct(Struct),
    Interface(Interface),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Array(Array),
    Map(Map),
    Chan(Chan),
    Signature(Signature),
    Tuple(Tuple),
}

impl Type {
    /// Creates a reference to a named type from its `"<package>.<ident>"` spelling.
    pub fn named(qualified: &str) -> Self {
        Type::Named(QualifiedName::from(qualified))
    }

    pub fn pointer(elem: Type) -> Self {
        Type::Pointer(Box::new(elem))
    }

    pub fn slice(elem: Type) -> Self {
        Type::Slice(Box::new(elem))
    }

    pub fn array(len: u64, elem: Type) -> Self {
        Type::Array(Array {
            len,
            elem: Box::new(elem),
        })
    }

    pub fn map(key: Type, elem: Type) -> Self {
        Type::Map(Map {
            key: Box::new(key),
            elem: Box::new(elem),
        })
    }

    pub fn chan(dir: ChanDir, elem: Type) -> Self {
        Type::Chan(Chan {
            dir,
            elem: Box::new(elem),
        })
    }

    /// Returns the qualified name if this is a named type reference.
    pub fn as_named(&self) -> Option<&QualifiedName> {
        match self {
            Type::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl From<BasicKind> for Type {
    fn from(kind: BasicKind) -> Self {
        Type::Basic(kind)
    }
}

impl From<Struct> for Type {
    fn from(value: Struct) -> Self {
        Type::Struct(value)
    }
}

impl From<Interface> for Type {
    fn from(value: Interface) -> Self {
        Type::Interface(value)
    }
}

impl From<Signature> for Type {
    fn from(value: Signature) -> Self {
        Type::Signature(value)
    }
}

/// Primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    Byte,
    Rune,
    #[serde(rename = "unsafe.Pointer")]
    UnsafePointer,
}

/// Coarse classification of a [`BasicKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicClass {
    Boolean,
    Numeric,
    String,
    Other,
}

impl BasicKind {
    /// Returns the exact primitive spelling.
    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
            BasicKind::Byte => "byte",
            BasicKind::Rune => "rune",
            BasicKind::UnsafePointer => "unsafe.Pointer",
        }
    }

    pub fn class(self) -> BasicClass {
        match self {
            BasicKind::Bool => BasicClass::Boolean,
            BasicKind::String => BasicClass::String,
            BasicKind::UnsafePointer => BasicClass::Other,
            BasicKind::Int
            | BasicKind::Int8
            | BasicKind::Int16
            | BasicKind::Int32
            | BasicKind::Int64
            | BasicKind::Uint
            | BasicKind::Uint8
            | BasicKind::Uint16
            | BasicKind::Uint32
            | BasicKind::Uint64
            | BasicKind::Uintptr
            | BasicKind::Float32
            | BasicKind::Float64
            | BasicKind::Complex64
            | BasicKind::Complex128
            | BasicKind::Byte
            | BasicKind::Rune => BasicClass::Numeric,
        }
    }
}

/// A struct field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Field {
    name: String,
    #[serde(rename = "type")]
    ty: Type,
    #[serde(default)]
    tag: String,
    #[serde(default)]
    embedded: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            tag: String::new(),
            embedded: false,
        }
    }

    /// Creates an embedded field; its name is the embedded type's identifier.
    pub fn embedded(ty: Type) -> Self {
        let name = embedded_name(&ty);
        Self {
            name,
            ty,
            tag: String::new(),
            embedded: true,
        }
    }

    /// Sets the raw tag string (builder style).
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the raw tag string, empty if the field has none.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    pub fn is_exported(&self) -> bool {
        name::is_exported(&self.name)
    }
}

fn embedded_name(ty: &Type) -> String {
    match ty {
        Type::Pointer(elem) => embedded_name(elem),
        Type::Named(name) => name.name().to_string(),
        Type::Basic(kind) => kind.name().to_string(),
        _ => String::new(),
    }
}

/// An ordered list of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Struct {
    #[serde(default)]
    fields: Vec<Field>,
}

impl Struct {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// A method set with embedded interfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Interface {
    #[serde(default)]
    embeddeds: Vec<Type>,
    #[serde(default)]
    methods: Vec<Method>,
}

impl Interface {
    pub fn new(embeddeds: Vec<Type>, methods: Vec<Method>) -> Self {
        Self { embeddeds, methods }
    }

    pub fn embeddeds(&self) -> &[Type] {
        &self.embeddeds
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }
}

/// An interface method.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Method {
    name: String,
    #[serde(default)]
    signature: Signature,
}

impl Method {
    pub fn new(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            signature,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn is_exported(&self) -> bool {
        name::is_exported(&self.name)
    }
}

/// A fixed-length array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Array {
    pub len: u64,
    pub elem: Box<Type>,
}

/// An associative type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Map {
    pub key: Box<Type>,
    pub elem: Box<Type>,
}

/// Channel direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    #[default]
    SendRecv,
    SendOnly,
    RecvOnly,
}

/// A channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chan {
    #[serde(default)]
    pub dir: ChanDir,
    pub elem: Box<Type>,
}

/// A function signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Signature {
    #[serde(default)]
    params: Tuple,
    #[serde(default)]
    results: Tuple,
    #[serde(default)]
    variadic: bool,
}

impl Signature {
    pub fn new(params: Tuple, results: Tuple) -> Self {
        Self {
            params,
            results,
            variadic: false,
        }
    }

    /// Marks the last parameter as variadic (builder style).
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn params(&self) -> &Tuple {
        &self.params
    }

    pub fn results(&self) -> &Tuple {
        &self.results
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }
}

/// An ordered list of optionally named values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Tuple {
    vars: Vec<Var>,
}

impl Tuple {
    pub fn new(vars: Vec<Var>) -> Self {
        Self { vars }
    }

    /// Creates a tuple of unnamed values.
    pub fn unnamed(types: impl IntoIterator<Item = Type>) -> Self {
        Self::new(types.into_iter().map(Var::unnamed).collect())
    }

    pub fn vars(&self) -> &[Var] {
        &self.vars
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// A tuple element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Var {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: Type,
}

impl Var {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn unnamed(ty: Type) -> Self {
        Self::new("", ty)
    }

    /// Returns the name, empty for unnamed values.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }
}
