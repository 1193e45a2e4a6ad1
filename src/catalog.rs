//! The five inventory resource variants, declared as data.
//!
//! Several rule messages are duplicated or odd ("validating for error?",
//! prodID rules reusing the name message, lifespan reusing the threshold
//! message). These reproduce the deployed system's exact texts; callers
//! match on them, so they are kept rather than tidied.

use std::sync::OnceLock;

use crate::schema::{FieldDef, FilterKind, Model, ResourceSchema};
use crate::validate::{
    int_at_least, int_greater_than, non_empty, one_of, optional_non_empty, well_formed_email, Rule,
};

const STORES: &[&str] = &["willies", "coop"];
const ROLES: &[&str] = &["admin", "editor", "viewer"];

fn pantry() -> ResourceSchema {
    ResourceSchema {
        path_segment: "pantry",
        collection: "pantry",
        default_sort_field: "name",
        fields: vec![
            FieldDef::str("name").filtered(FilterKind::Substring),
            FieldDef::str("prodID").filtered(FilterKind::Exact),
            FieldDef::str("date"),
            FieldDef::str("notes"),
        ],
        rules: vec![
            Rule {
                message: "Pantry must have a non-empty pantry name",
                check: |d| non_empty(d, "name"),
            },
            Rule {
                message: "Pantry must have a non-empty pantry name",
                check: |d| non_empty(d, "prodID"),
            },
        ],
    }
}

fn products() -> ResourceSchema {
    ResourceSchema {
        path_segment: "products",
        collection: "products",
        default_sort_field: "productName",
        fields: vec![
            FieldDef::str("productName").filtered(FilterKind::Substring),
            FieldDef::str("store").filtered(FilterKind::Exact),
            FieldDef::int("threshold").filtered(FilterKind::Exact),
            FieldDef::str("description"),
            FieldDef::str("brand"),
            FieldDef::str("category"),
            FieldDef::str("location"),
            FieldDef::str("notes"),
            FieldDef::int("lifespan"),
        ],
        rules: vec![
            Rule {
                message: "Product must have a non-empty product name",
                check: |d| non_empty(d, "productName"),
            },
            Rule {
                message: "Product's threshold must be greater than or equal to zero",
                check: |d| int_at_least(d, "threshold", 0),
            },
            Rule {
                message: "Product must have a legal store",
                check: |d| one_of(d, "store", STORES),
            },
            Rule {
                message: "validating for error?",
                check: |d| optional_non_empty(d, "description"),
            },
            Rule {
                message: "validating for error?",
                check: |d| optional_non_empty(d, "brand"),
            },
            Rule {
                message: "validating for error?",
                check: |d| optional_non_empty(d, "category"),
            },
            Rule {
                message: "validating for error?",
                check: |d| optional_non_empty(d, "notes"),
            },
            Rule {
                message: "Product's threshold must be greater than or equal to zero",
                check: |d| int_at_least(d, "lifespan", 0),
            },
            Rule {
                message: "validating for error?",
                check: |d| optional_non_empty(d, "location"),
            },
        ],
    }
}

fn shoppinglist() -> ResourceSchema {
    ResourceSchema {
        path_segment: "shoppinglist",
        collection: "shoppingList",
        default_sort_field: "productName",
        fields: vec![
            FieldDef::str("productName").filtered(FilterKind::Substring),
            FieldDef::str("store").filtered(FilterKind::Exact),
            FieldDef::int("quantity").filtered(FilterKind::Exact),
        ],
        rules: vec![
            Rule {
                message: "ShoppingList must have a non-empty shoppingList name",
                check: |d| non_empty(d, "productName"),
            },
            Rule {
                message: "Item must have a legal store",
                check: |d| one_of(d, "store", STORES),
            },
            Rule {
                message: "ShoppingList Quantity must be greater than zero",
                check: |d| int_greater_than(d, "quantity", 0),
            },
        ],
    }
}

fn templates() -> ResourceSchema {
    ResourceSchema {
        path_segment: "templates",
        collection: "templates",
        default_sort_field: "name",
        fields: vec![
            FieldDef::str("name").filtered(FilterKind::Substring),
            FieldDef::str("prodID").filtered(FilterKind::Exact),
            FieldDef::int("quantity").filtered(FilterKind::Exact),
        ],
        rules: vec![
            Rule {
                message: "Template must have a non-empty template name",
                check: |d| non_empty(d, "name"),
            },
            Rule {
                message: "Template must have a non-empty template name",
                check: |d| non_empty(d, "prodID"),
            },
            Rule {
                message: "Template Quantity must be greater than zero",
                check: |d| int_greater_than(d, "quantity", 0),
            },
        ],
    }
}

fn users() -> ResourceSchema {
    ResourceSchema {
        path_segment: "users",
        collection: "users",
        default_sort_field: "name",
        fields: vec![
            FieldDef::str("name").filtered(FilterKind::Substring),
            FieldDef::int("age").filtered(FilterKind::Exact),
            FieldDef::str("company").filtered(FilterKind::Substring),
            FieldDef::str("email"),
            FieldDef::str("role").filtered(FilterKind::Exact),
            FieldDef::str("avatar"),
        ],
        rules: vec![
            Rule {
                message: "User must have a non-empty user name",
                check: |d| non_empty(d, "name"),
            },
            Rule {
                message: "User's age must be greater than zero",
                check: |d| int_greater_than(d, "age", 0),
            },
            Rule {
                message: "User must have a legal user role",
                check: |d| one_of(d, "role", ROLES),
            },
            Rule {
                message: "User must have a non-empty company name",
                check: |d| non_empty(d, "company"),
            },
            Rule {
                message: "User must have a legal email address",
                check: |d| well_formed_email(d, "email"),
            },
        ],
    }
}

/// The process-wide model: all five variants, built once.
pub fn model() -> &'static Model {
    static MODEL: OnceLock<Model> = OnceLock::new();
    MODEL.get_or_init(|| {
        Model::new(vec![pantry(), products(), shoppinglist(), templates(), users()])
    })
}
