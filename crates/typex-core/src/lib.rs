//! Typex Core Types and Definitions
//!
//! This crate provides the foundational types shared by the typex pipeline.
//! It includes:
//!
//! - **Names**: Package-qualified type names ([`name::QualifiedName`]) and
//!   identifier visibility rules
//! - **Types**: The closed structural type model ([`types::Type`])
//! - **Universe**: What a type provider hands over ([`universe::Universe`])
//! - **Tags**: Struct field tag decoding ([`tag::StructTag`])

pub mod name;
pub mod tag;
pub mod types;
pub mod universe;
