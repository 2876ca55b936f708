//! Read-only index over all discovered declarations.
//!
//! The index is built once from every parsed unit before generation starts
//! and is then shared between generation runs. It answers three questions:
//! does a type have a generated counterpart (and in which package), is a type
//! non-public, and is a type an enum.

use crate::types::{DeclarationKind, SourceUnit};
use std::collections::{HashMap, HashSet};

/// Index of declarations known to discovery.
#[derive(Debug, Clone, Default)]
pub struct DeclarationIndex {
    /// Simple name to source package of declarations with a generated
    /// counterpart.
    generated: HashMap<String, String>,
    /// Qualified names of generated declarations.
    generated_qualified: HashSet<String>,
    /// Qualified names of non-public types.
    non_public: HashSet<String>,
    /// Qualified names of enum types, nested ones included.
    enums: HashSet<String>,
}

impl DeclarationIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from all parsed units.
    #[must_use]
    pub fn from_units<'a>(units: impl IntoIterator<Item = &'a SourceUnit>) -> Self {
        let mut index = Self::new();
        for unit in units {
            index.add_unit(unit);
        }
        index
    }

    /// Records every declaration of one unit.
    ///
    /// Only the single top-level declaration of a unit can have a generated
    /// counterpart; units with several declarations contribute accessibility
    /// and enum facts only.
    pub fn add_unit(&mut self, unit: &SourceUnit) {
        let package = unit.package.clone().unwrap_or_default();
        let single = unit.primary().is_some();
        for declaration in &unit.declarations {
            let qualified = unit.qualified_name(declaration);

            if !declaration.visibility.is_public() {
                self.non_public.insert(qualified.clone());
            } else if single && declaration.kind.is_class_or_interface() {
                self.add_generated(&declaration.name, &package);
            }

            if declaration.kind == DeclarationKind::Enum {
                self.enums.insert(qualified.clone());
            }
            for nested in &declaration.nested_types {
                if nested.kind == DeclarationKind::Enum {
                    self.enums.insert(format!("{}.{}", qualified, nested.name));
                }
            }
        }
    }

    /// Records a declaration with a generated counterpart.
    ///
    /// The first package recorded for a simple name wins.
    pub fn add_generated(&mut self, simple_name: &str, package: &str) {
        self.generated
            .entry(simple_name.to_string())
            .or_insert_with(|| package.to_string());
        self.generated_qualified
            .insert(qualify(package, simple_name));
    }

    /// Records a non-public type by qualified name.
    pub fn add_non_public(&mut self, qualified_name: impl Into<String>) {
        self.non_public.insert(qualified_name.into());
    }

    /// Records an enum type by qualified name.
    pub fn add_enum(&mut self, qualified_name: impl Into<String>) {
        self.enums.insert(qualified_name.into());
    }

    /// Returns the source package of the generated counterpart of `name`.
    ///
    /// `name` may be simple or qualified.
    #[must_use]
    pub fn package_of<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        match name.rsplit_once('.') {
            Some((package, _)) if self.generated_qualified.contains(name) => Some(package),
            Some(_) => None,
            None => self.generated.get(name).map(String::as_str),
        }
    }

    /// Returns true if `name` has a generated counterpart.
    #[must_use]
    pub fn has_generated(&self, name: &str) -> bool {
        self.package_of(name).is_some()
    }

    /// Returns true if the qualified name is a known non-public type.
    #[must_use]
    pub fn is_non_public(&self, qualified_name: &str) -> bool {
        self.non_public.contains(qualified_name)
    }

    /// Returns true if the qualified name is a known enum.
    #[must_use]
    pub fn is_enum(&self, qualified_name: &str) -> bool {
        self.enums.contains(qualified_name)
    }

    /// Returns the number of declarations with a generated counterpart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.generated_qualified.len()
    }

    /// Returns true if no declaration has a generated counterpart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generated_qualified.is_empty()
    }
}

fn qualify(package: &str, simple_name: &str) -> String {
    if package.is_empty() {
        simple_name.to_string()
    } else {
        format!("{}.{}", package, simple_name)
    }
}
