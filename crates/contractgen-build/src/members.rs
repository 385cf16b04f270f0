use crate::{ArtifactKind, ContractGenerator, attribute::render_annotation, writer::CodeWriter};
use contractgen_core::{
    Error,
    model::{PropertyCategory, PropertyDeclaration},
};

/// Emission group of a property, or `None` if it is never emitted.
///
/// Keys first, then reference keys, plain values, single references and
/// finally collection references.
const fn emission_group(property: &PropertyDeclaration) -> Option<u8> {
    let many = matches!(
        property.multiplicity(),
        Some(contractgen_schema::types::Multiplicity::Many)
    );

    match (property.category(), many) {
        (PropertyCategory::PrimaryKey, _) => Some(0),
        (PropertyCategory::EntityRefAsPrimaryKey, false) => Some(1),
        (PropertyCategory::EntityRefAsPrimaryKey, true) => None,
        (PropertyCategory::NonPk, _) => Some(2),
        (PropertyCategory::EntityRef, false) => Some(3),
        (PropertyCategory::EntityRef, true) => Some(4),
    }
}

/// Order `properties` for emission; the sort is stable, so model order
/// holds within each group.
pub(crate) fn emission_order<'a>(
    properties: impl IntoIterator<Item = &'a PropertyDeclaration>,
) -> Vec<&'a PropertyDeclaration> {
    let mut grouped: Vec<_> = properties
        .into_iter()
        .filter_map(|p| emission_group(p).map(|g| (g, p)))
        .collect();
    grouped.sort_by_key(|(group, _)| *group);

    grouped.into_iter().map(|(_, p)| p).collect()
}

/// `Gets or sets`, `Gets` or `Sets`.
fn access_prefix(property: &PropertyDeclaration) -> &'static str {
    match (property.can_read(), property.can_write()) {
        (true, true) => "Gets or sets",
        (true, false) => "Gets",
        _ => "Sets",
    }
}

fn accessors(property: &PropertyDeclaration) -> &'static str {
    match (property.can_read(), property.can_write()) {
        (true, true) => "{ get; set; }",
        (true, false) => "{ get; }",
        _ => "{ set; }",
    }
}

fn summary(property: &PropertyDeclaration, inherited: bool) -> String {
    let prefix = access_prefix(property);
    let name = property.name();

    if inherited {
        return format!("{prefix} the '{name}' property value.");
    }

    match property.category() {
        PropertyCategory::PrimaryKey => format!("{prefix} the '{name}' primary key property value."),
        PropertyCategory::EntityRefAsPrimaryKey => format!(
            "{prefix} the foreign key of the '{name}' entity reference that is part of the primary key."
        ),
        PropertyCategory::NonPk => format!("{prefix} the '{name}' simple property value."),
        PropertyCategory::EntityRef => format!("{prefix} the '{name}' navigation property value."),
    }
}

/// Write one property declaration: summary, attributes and signature.
pub(crate) fn write_member(
    w: &mut CodeWriter<'_>,
    generator: &ContractGenerator<'_>,
    property: &PropertyDeclaration,
    kind: ArtifactKind,
    inherited: bool,
) -> Result<(), Error> {
    let config = generator.config;

    let mut attributes = Vec::new();
    if property.category() == PropertyCategory::PrimaryKey {
        attributes.push("[Key]".to_string());
    }
    for annotation in property.annotations() {
        attributes.push(render_annotation(annotation, generator.model.path(), property.name())?);
    }
    // reference keys are not annotated as references
    if kind == ArtifactKind::Interface
        && property.category() == PropertyCategory::EntityRef
        && let Some(multiplicity) = property.multiplicity()
    {
        attributes.push(format!(
            "[{}({}.{multiplicity})]",
            config.reference_annotation, config.multiplicity_type
        ));
    }

    let modifiers = match kind {
        ArtifactKind::Interface => "",
        ArtifactKind::Class if property.is_reference() => "public virtual ",
        ArtifactKind::Class => "public ",
    };

    w.line("/// <summary>");
    w.line(format!("/// {}", summary(property, inherited)));
    w.line("/// </summary>");
    for attribute in attributes {
        w.line(attribute);
    }
    w.line(format!(
        "{modifiers}{} {} {}",
        property.type_name(),
        property.name(),
        accessors(property)
    ));

    Ok(())
}

/// Write `properties` in emission order, separated by blank lines.
pub(crate) fn write_members<'a>(
    w: &mut CodeWriter<'_>,
    generator: &ContractGenerator<'_>,
    properties: impl IntoIterator<Item = &'a PropertyDeclaration>,
    kind: ArtifactKind,
    inherited: bool,
) -> Result<usize, Error> {
    let ordered = emission_order(properties);

    for (i, property) in ordered.iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        write_member(w, generator, property, kind, inherited)?;
    }

    Ok(ordered.len())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use contractgen_core::model::ContractDeclaration;
    use contractgen_schema::{prelude::*, types::Scalar};

    fn model() -> ContractDeclaration {
        let company = TypeRef::named(Some("Shop"), "ICompany");
        let contract = Contract::new(Some("Shop"), "IEmployee")
            .entity(EntityMarker::default())
            .property(
                Property::new("Reports", TypeRef::generic(None, "List", vec![TypeRef::named(Some("Shop"), "IEmployee")]))
                    .reference(ReferenceMarker::new(Multiplicity::Many)),
            )
            .property(Property::new("Employer", company.clone()).reference(ReferenceMarker::new(Multiplicity::One)))
            .property(Property::new("Name", TypeRef::scalar(Scalar::Text)).access(true, false))
            .property(
                Property::new("Branch", company)
                    .reference(ReferenceMarker::new(Multiplicity::One))
                    .primary_key(PrimaryKeyMarker::ordered(1)),
            )
            .property(Property::new("Number", TypeRef::scalar(Scalar::Int32)).primary_key(PrimaryKeyMarker::ordered(0)));

        let schema = Schema::new(vec![contract]).unwrap();
        ContractDeclaration::build(&schema, "Shop.IEmployee").unwrap()
    }

    #[test]
    fn emission_follows_the_fixed_group_order() {
        let model = model();
        let names: Vec<_> = emission_order(model.properties()).iter().map(|p| p.name()).collect();

        assert_eq!(names, ["Number", "Branch", "Name", "Employer", "Reports"]);
    }

    #[test]
    fn interface_member_carries_reference_annotation() {
        let model = model();
        let config = crate::GeneratorConfig::default();
        let generator = ContractGenerator::new(&model, &config).unwrap();
        let employer = model.get_property("Employer").unwrap();

        let mut w = CodeWriter::new("    ");
        write_member(&mut w, &generator, employer, ArtifactKind::Interface, false).unwrap();

        assert_eq!(
            w.finish(),
            "/// <summary>\n\
             /// Gets or sets the 'Employer' navigation property value.\n\
             /// </summary>\n\
             [Required]\n\
             [EntityReference(EntityReferenceMultiplicityEnum.One)]\n\
             ICompany Employer { get; set; }\n"
        );
    }

    #[test]
    fn reference_key_member_has_no_reference_annotation() {
        let model = model();
        let config = crate::GeneratorConfig::default();
        let generator = ContractGenerator::new(&model, &config).unwrap();

        let mut w = CodeWriter::new("    ");
        write_member(&mut w, &generator, model.get_property("Branch").unwrap(), ArtifactKind::Interface, false).unwrap();
        let out = w.finish();

        assert!(out.contains("[Required]\nICompany Branch { get; set; }\n"));
        assert!(!out.contains("EntityReference("));
    }

    #[test]
    fn class_member_is_public_and_references_are_virtual() {
        let model = model();
        let config = crate::GeneratorConfig::default();
        let generator = ContractGenerator::new(&model, &config).unwrap();

        let mut w = CodeWriter::new("    ");
        write_member(&mut w, &generator, model.get_property("Name").unwrap(), ArtifactKind::Class, false).unwrap();
        write_member(&mut w, &generator, model.get_property("Branch").unwrap(), ArtifactKind::Class, false).unwrap();
        let out = w.finish();

        assert!(out.contains("/// Gets the 'Name' simple property value.\n"));
        assert!(out.contains("public string Name { get; }\n"));
        assert!(out.contains("entity reference that is part of the primary key."));
        assert!(out.contains("public virtual ICompany Branch { get; set; }\n"));
        assert!(!out.contains("EntityReference("));
    }
}
