//! The collected type graph.
//!
//! A [`TypeGraph`] maps each reachable named type to its underlying type.
//! Keys are unique and kept in registration order, which is the order in
//! which collection first reached each type.

use indexmap::IndexMap;

use typex_core::{name::QualifiedName, types::Type};

/// Named types reachable from the filtered roots, keyed by qualified name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeGraph {
    types: IndexMap<QualifiedName, Type>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named type. A name that is already present keeps its
    /// first definition.
    pub(crate) fn register(&mut self, name: QualifiedName, underlying: Type) {
        self.types.entry(name).or_insert(underlying);
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the underlying type of a registered named type.
    pub fn get(&self, name: &QualifiedName) -> Option<&Type> {
        self.types.get(name)
    }

    /// Iterates over the entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedName, &Type)> {
        self.types.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &QualifiedName> {
        self.types.keys()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use typex_core::types::BasicKind;

    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut graph = TypeGraph::new();
        let name = QualifiedName::from("p.T");

        graph.register(name.clone(), BasicKind::Int.into());
        graph.register(name.clone(), BasicKind::String.into());

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get(&name), Some(&Type::Basic(BasicKind::Int)));
    }

    #[test]
    fn test_registration_order() {
        let mut graph = TypeGraph::new();
        for name in ["p.B", "p.A", "q.C"] {
            graph.register(QualifiedName::from(name), BasicKind::Bool.into());
        }
        let names: Vec<String> = graph.names().map(ToString::to_string).collect();
        assert_eq!(names, ["p.B", "p.A", "q.C"]);
    }
}
