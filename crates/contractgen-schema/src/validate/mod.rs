//! Schema validation orchestration.
//!
//! Structural checks only: identifiers, duplicates, self-extension, and
//! property annotations that shadow a typed marker.
//! Entity semantics (markers, key order, capabilities) are checked when a
//! contract model is built, so that each failure is scoped to one contract.

pub mod naming;
mod reserved;

use crate::{err, error::ErrorTree, node::Contract, prelude::*};
use naming::{validate_ident, validate_namespace};
use std::collections::{BTreeMap, BTreeSet};

/// Annotations that have a typed marker on properties instead.
const PROPERTY_MARKER_ANNOTATIONS: [(&str, &str); 2] =
    [("PrimaryKey", "primary_key"), ("EntityReference", "reference")];

/// Run full schema validation in a staged, deterministic order.
pub(crate) fn validate_schema(schema: &Schema) -> Result<(), ErrorTree> {
    let mut errs = ErrorTree::new();

    // Phase 1: per-contract structural checks.
    for contract in schema.contracts() {
        errs.merge_for(contract.path(), validate_contract(contract));
    }

    // Phase 2: schema-wide invariants.
    validate_unique_paths(schema, &mut errs);

    errs.result()
}

fn validate_contract(contract: &Contract) -> ErrorTree {
    let mut errs = ErrorTree::new();

    if let Some(ns) = &contract.namespace
        && let Err(e) = validate_namespace(ns)
    {
        errs.add(e);
    }
    if let Err(e) = validate_ident(&contract.name) {
        errs.add(e);
    }

    if let Some(marker) = &contract.entity {
        if let Some(ns) = &marker.namespace
            && let Err(e) = validate_namespace(ns)
        {
            errs.add_for("entity", e);
        }
        if let Some(name) = &marker.name
            && let Err(e) = validate_ident(name)
        {
            errs.add_for("entity", e);
        }
    }

    let path = contract.path();
    for extended in &contract.extends {
        if *extended == path {
            err!(errs, "contract '{path}' extends itself");
        }
    }

    let mut seen = BTreeSet::new();
    for property in &contract.properties {
        if let Err(e) = validate_ident(&property.name) {
            errs.add_for(property.name.clone(), e);
        }
        if !seen.insert(property.name.as_str()) {
            err!(errs, "duplicate property '{}'", property.name);
        }
        for annotation in &property.annotations {
            if let Some((name, marker)) =
                PROPERTY_MARKER_ANNOTATIONS.iter().find(|(name, _)| annotation.is(name))
            {
                errs.add_for(
                    property.name.clone(),
                    format!("annotation '{name}' must be declared with the '{marker}' marker"),
                );
            }
        }
    }

    errs
}

fn validate_unique_paths(schema: &Schema, errs: &mut ErrorTree) {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for contract in schema.contracts() {
        *counts.entry(contract.path()).or_default() += 1;
    }

    for (path, count) in counts {
        if count > 1 {
            err!(errs, "contract '{path}' is declared {count} times");
        }
    }
}

///
/// TESTS
///
