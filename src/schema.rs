//! A minimal, read-only EDM metadata descriptor.
//!
//! Parsing never requires metadata; when a [`Document`] is supplied the
//! combinators validate entity-set, singleton and qualified type names
//! against it and refuse paths that do not resolve. The parser only reads
//! the document, it never writes to it.

use std::collections::BTreeSet;

/// The names of an EDM schema, as they appear in URIs. Type names are
/// namespace-qualified (`Sales.Order`); entity set and singleton names are
/// bare.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    entity_sets: BTreeSet<String>,
    singletons: BTreeSet<String>,
    entity_types: BTreeSet<String>,
    complex_types: BTreeSet<String>,
    enum_types: BTreeSet<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity_set(mut self, name: impl Into<String>) -> Self {
        self.entity_sets.insert(name.into());
        self
    }

    pub fn with_singleton(mut self, name: impl Into<String>) -> Self {
        self.singletons.insert(name.into());
        self
    }

    pub fn with_entity_type(mut self, name: impl Into<String>) -> Self {
        self.entity_types.insert(name.into());
        self
    }

    pub fn with_complex_type(mut self, name: impl Into<String>) -> Self {
        self.complex_types.insert(name.into());
        self
    }

    pub fn with_enum_type(mut self, name: impl Into<String>) -> Self {
        self.enum_types.insert(name.into());
        self
    }

    pub fn has_entity_set(&self, name: &str) -> bool {
        self.entity_sets.contains(name)
    }

    pub fn has_singleton(&self, name: &str) -> bool {
        self.singletons.contains(name)
    }

    pub fn is_entity_type(&self, name: &str) -> bool {
        self.entity_types.contains(name)
    }

    pub fn is_complex_type(&self, name: &str) -> bool {
        self.complex_types.contains(name)
    }

    pub fn is_enum_type(&self, name: &str) -> bool {
        self.enum_types.contains(name)
    }
}
