//! Resource schemas: per-variant field declarations resolved by URL path.

use std::collections::HashMap;

use crate::validate::Rule;

/// Value kind of a declared field. Documents hold JSON, so this only needs
/// to distinguish what filter coercion and sorting care about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Int,
}

/// How a filterable field matches its query parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    /// Case-insensitive containment; the raw value is matched literally
    /// (pattern metacharacters escaped).
    Substring,
    /// Typed equality: string as-is, integer parsed from the parameter.
    Exact,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub filter: Option<FilterKind>,
}

impl FieldDef {
    pub const fn str(name: &'static str) -> Self {
        FieldDef { name, kind: FieldKind::Str, filter: None }
    }

    pub const fn int(name: &'static str) -> Self {
        FieldDef { name, kind: FieldKind::Int, filter: None }
    }

    pub const fn filtered(mut self, filter: FilterKind) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// One resource variant: where it lives, what fields it declares, how a
/// candidate document is validated. The identity field is implicit and never
/// part of the filter/sort vocabulary.
pub struct ResourceSchema {
    /// URL segment the variant is mounted at, e.g. "products".
    pub path_segment: &'static str,
    /// Backing collection name in the store.
    pub collection: &'static str,
    /// `sortby` default: the variant's canonical name field.
    pub default_sort_field: &'static str,
    pub fields: Vec<FieldDef>,
    /// Evaluated in declaration order; first failure wins.
    pub rules: Vec<Rule>,
}

impl ResourceSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Registry of all resource variants, looked up by path segment per request.
pub struct Model {
    schemas: Vec<ResourceSchema>,
    by_path: HashMap<&'static str, usize>,
}

impl Model {
    pub fn new(schemas: Vec<ResourceSchema>) -> Self {
        let by_path = schemas
            .iter()
            .enumerate()
            .map(|(i, s)| (s.path_segment, i))
            .collect();
        Model { schemas, by_path }
    }

    pub fn schema_by_path(&self, path: &str) -> Option<&ResourceSchema> {
        self.by_path.get(path).map(|&i| &self.schemas[i])
    }

    pub fn schemas(&self) -> impl Iterator<Item = &ResourceSchema> {
        self.schemas.iter()
    }
}
