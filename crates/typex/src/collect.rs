//! Type graph collection.
//!
//! The [`Collector`] walks every type reachable from the filtered top-level
//! declarations and records each named type exactly once. A named type is
//! registered before its underlying type is visited, so self-referential and
//! mutually referential types terminate.

use log::{debug, info, trace};

use typex_core::{
    name::{QualifiedName, is_exported_path},
    types::{Field, Interface, Signature, Tuple, Type},
    universe::Universe,
};

use crate::{error::TypexError, filter::NameFilter, graph::TypeGraph, provider::TypeProvider};

/// Collects the closure of named types selected by a root filter.
#[derive(Debug, Clone)]
pub struct Collector<F> {
    filter: F,
    include_unexported: bool,
}

impl<F> Collector<F>
where
    F: NameFilter,
{
    /// Creates a collector.
    ///
    /// # Arguments
    ///
    /// * `filter` - Selects top-level declarations by `"<package path>.<identifier>"`
    /// * `include_unexported` - Whether unexported declarations, fields and methods are followed
    pub fn new(filter: F, include_unexported: bool) -> Self {
        Self {
            filter,
            include_unexported,
        }
    }

    /// Loads `patterns` through `provider` and collects the result.
    ///
    /// Without patterns the provider is not consulted and the graph is empty.
    ///
    /// # Errors
    ///
    /// Returns [`TypexError::Provider`] if loading fails, and otherwise any
    /// error of [`Collector::collect`].
    pub fn inspect<P>(&self, provider: &P, patterns: &[String]) -> Result<TypeGraph, TypexError>
    where
        P: TypeProvider + ?Sized,
    {
        if patterns.is_empty() {
            debug!("No search patterns, nothing to load");
            return Ok(TypeGraph::new());
        }

        info!(patterns:?; "Loading packages");
        let universe = provider.load(patterns).map_err(TypexError::Provider)?;
        debug!(packages_count = universe.packages().len(); "Packages loaded");

        self.collect(&universe)
    }

    /// Collects the named types reachable from the filtered declarations of
    /// `universe`.
    ///
    /// # Errors
    ///
    /// Returns [`TypexError::Compile`] with the first diagnostic if any package
    /// reported one, and [`TypexError::UnresolvedType`] if a reachable named
    /// type has no definition. No partial graph is returned.
    pub fn collect(&self, universe: &Universe) -> Result<TypeGraph, TypexError> {
        if let Some(message) = universe
            .packages()
            .iter()
            .find_map(|package| package.diagnostics().first())
        {
            return Err(TypexError::Compile(message.clone()));
        }

        let mut visitor = Visitor {
            universe,
            graph: TypeGraph::new(),
            include_unexported: self.include_unexported,
        };

        for package in universe.packages() {
            debug!(package = package.path(); "Collecting package");
            for (name, ty) in package.declarations() {
                if !visitor.exportable(name) {
                    continue;
                }
                let qualified = package.qualify(name).to_string();
                if self.filter.matches(&qualified) {
                    trace!(name = qualified; "Declaration selected");
                    visitor.visit(ty)?;
                }
            }
        }

        info!(types_count = visitor.graph.len(); "Type graph collected");
        Ok(visitor.graph)
    }
}

/// State of a single collection run.
struct Visitor<'a> {
    universe: &'a Universe,
    graph: TypeGraph,
    include_unexported: bool,
}

impl<'a> Visitor<'a> {
    fn exportable(&self, path: &str) -> bool {
        self.include_unexported || is_exported_path(path)
    }

    fn exportable_named(&self, ty: &Type) -> bool {
        ty.as_named().is_none_or(|name| self.exportable(&name.to_string()))
    }

    fn visit(&mut self, ty: &Type) -> Result<(), TypexError> {
        match ty {
            Type::Basic(_) => Ok(()),
            Type::Named(name) => self.visit_named(name),
            Type::Struct(value) => {
                for field in value.fields() {
                    if self.follows_field(field) {
                        self.visit(field.ty())?;
                    }
                }
                Ok(())
            }
            Type::Interface(value) => self.visit_interface(value),
            Type::Pointer(elem) | Type::Slice(elem) => self.visit(elem),
            Type::Array(array) => self.visit(&array.elem),
            Type::Chan(chan) => self.visit(&chan.elem),
            Type::Map(map) => {
                self.visit(&map.key)?;
                self.visit(&map.elem)
            }
            Type::Signature(signature) => self.visit_signature(signature),
            Type::Tuple(tuple) => self.visit_tuple(tuple),
        }
    }

    fn visit_named(&mut self, name: &QualifiedName) -> Result<(), TypexError> {
        if self.graph.contains(name) {
            return Ok(());
        }
        let underlying = self.lookup(name)?;
        let structural = self.structural(name, underlying)?;

        self.graph.register(name.clone(), structural.clone());
        debug!(name:%; "Registered named type");

        self.visit(underlying)
    }

    fn lookup(&self, name: &QualifiedName) -> Result<&'a Type, TypexError> {
        self.universe
            .underlying(name)
            .ok_or_else(|| TypexError::UnresolvedType(name.clone()))
    }

    /// Follows definitions that name another named type down to a structural
    /// type. A chain that returns to an earlier name has no structure.
    fn structural(
        &self,
        name: &QualifiedName,
        underlying: &'a Type,
    ) -> Result<&'a Type, TypexError> {
        let mut seen = vec![name];
        let mut current = underlying;
        while let Type::Named(next) = current {
            if seen.contains(&next) {
                return Err(TypexError::UnresolvedType(name.clone()));
            }
            seen.push(next);
            current = self.lookup(next)?;
        }
        Ok(current)
    }

    fn follows_field(&self, field: &Field) -> bool {
        self.exportable(field.name()) && self.exportable_named(field.ty())
    }

    fn visit_interface(&mut self, value: &Interface) -> Result<(), TypexError> {
        for embedded in value.embeddeds() {
            if self.exportable_named(embedded) {
                self.visit(embedded)?;
            }
        }
        for method in value.methods() {
            if self.exportable(method.name()) {
                self.visit_signature(method.signature())?;
            }
        }
        Ok(())
    }

    fn visit_signature(&mut self, signature: &Signature) -> Result<(), TypexError> {
        self.visit_tuple(signature.params())?;
        self.visit_tuple(signature.results())
    }

    fn visit_tuple(&mut self, tuple: &Tuple) -> Result<(), TypexError> {
        tuple.vars().iter().try_for_each(|var| self.visit(var.ty()))
    }
}
