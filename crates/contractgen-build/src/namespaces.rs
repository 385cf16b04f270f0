use crate::{ArtifactKind, GeneratorConfig};
use contractgen_core::model::ContractDeclaration;
use contractgen_schema::prelude::*;
use std::collections::BTreeSet;

/// Namespaces a generated artifact imports, in ordinal order.
///
/// The union of the configured baseline, the namespaces of extended
/// contracts, of property types (the contract's own override stands in for
/// them when present) and of annotation types and their argument values.
/// The target namespace itself is never imported.
#[must_use]
pub fn collect_namespaces(
    model: &ContractDeclaration,
    config: &GeneratorConfig,
    kind: ArtifactKind,
    target: &str,
) -> Vec<String> {
    let mut set: BTreeSet<&str> = config.baseline_namespaces.iter().map(String::as_str).collect();

    if kind == ArtifactKind::Class {
        set.extend(config.class_namespaces.iter().map(String::as_str));
    }

    for ext in model.extends() {
        if let Some(ns) = ext.namespace.as_deref() {
            set.insert(ns);
        }
    }

    for property in model.properties() {
        if let Some(ns) = model.target_namespace().or_else(|| property.ty().namespace()) {
            set.insert(ns);
        }
    }

    for annotation in model.annotations() {
        annotation_namespaces(annotation, &mut set);
    }

    set.remove(target);
    set.remove("");

    set.into_iter().map(ToString::to_string).collect()
}

fn annotation_namespaces<'a>(annotation: &'a Annotation, set: &mut BTreeSet<&'a str>) {
    if let Some(ns) = annotation.ty.namespace() {
        set.insert(ns);
    }

    for arg in &annotation.args {
        match &arg.value {
            ArgValue::Enum { ty, .. } => {
                if let Some(ns) = ty.namespace() {
                    set.insert(ns);
                }
            }
            ArgValue::Type(ty) => {
                set.insert(contractgen_schema::types::SCALAR_NAMESPACE);
                if let Some(ns) = ty.namespace() {
                    set.insert(ns);
                }
            }
            _ => {
                // remaining values are scalars, which all live in System
                set.insert(contractgen_schema::types::SCALAR_NAMESPACE);
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use contractgen_schema::types::Scalar;

    fn model(contracts: Vec<Contract>, path: &str) -> ContractDeclaration {
        let schema = Schema::new(contracts).unwrap();
        ContractDeclaration::build(&schema, path).unwrap()
    }

    fn audit() -> Contract {
        Contract::new(Some("MyProduct.Common"), "IAuditableEntity")
            .property(Property::new("CreatedBy", TypeRef::scalar(Scalar::Text)))
    }

    #[test]
    fn baseline_is_sorted_ordinally() {
        let company = Contract::new(Some("Shop"), "ICompany").entity(EntityMarker::default());
        let config = GeneratorConfig::default();

        let ns = collect_namespaces(&model(vec![company], "Shop.ICompany"), &config, ArtifactKind::Interface, "X");

        assert_eq!(
            ns,
            [
                "MyCompany",
                "MyCompany.Attributes",
                "MyCompany.Enums",
                "System",
                "System.Collections.Generic",
                "System.ComponentModel.DataAnnotations",
            ]
        );
    }

    #[test]
    fn extends_property_and_annotation_namespaces_are_added() {
        let converter = Annotation::new(TypeRef::named(Some("Acme.Annotations"), "ConvertAttribute"))
            .arg(ArgValue::Type(TypeRef::named(Some("Acme.Converters"), "MoneyConverter")));
        let order = Contract::new(Some("Shop"), "IOrder")
            .entity(EntityMarker::default())
            .extend("MyProduct.Common.IAuditableEntity")
            .property(Property::new("Total", TypeRef::named(Some("Acme.Money"), "Amount")).annotate(converter));
        let config = GeneratorConfig::default();

        let ns = collect_namespaces(
            &model(vec![order, audit()], "Shop.IOrder"),
            &config,
            ArtifactKind::Class,
            "Shop",
        );

        for expected in [
            "Acme.Annotations",
            "Acme.Converters",
            "Acme.Money",
            "MyProduct.Common",
            "System.ComponentModel.DataAnnotations.Schema",
        ] {
            assert!(ns.iter().any(|n| n == expected), "missing {expected}");
        }
        assert!(!ns.iter().any(|n| n == "Shop"));

        let mut sorted = ns.clone();
        sorted.sort();
        assert_eq!(ns, sorted);
    }

    #[test]
    fn override_namespace_stands_in_for_property_types() {
        let marker = EntityMarker {
            namespace: Some("MyProduct.Data.Entities".to_string()),
            name: None,
        };
        let company = Contract::new(Some("Shop"), "ICompany")
            .entity(marker)
            .property(Property::new("Total", TypeRef::named(Some("Acme.Money"), "Amount")));
        let config = GeneratorConfig::default();

        let ns = collect_namespaces(
            &model(vec![company], "Shop.ICompany"),
            &config,
            ArtifactKind::Interface,
            "MyProduct.Data.Entities",
        );

        assert!(!ns.iter().any(|n| n == "Acme.Money"));
        assert!(!ns.iter().any(|n| n == "MyProduct.Data.Entities"));
    }
}
