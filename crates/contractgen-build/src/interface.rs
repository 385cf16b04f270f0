use crate::{
    ArtifactKind, ContractGenerator, attribute::render_annotation, members::write_members,
    namespaces::collect_namespaces, writer::CodeWriter,
};
use contractgen_core::Error;

/// Render the interface form: imports, then the interface declaration with
/// the contract's own members.
pub(crate) fn generate(generator: &ContractGenerator<'_>) -> Result<String, Error> {
    let model = generator.model;
    let config = generator.config;
    let target = generator.target_namespace();

    let mut w = CodeWriter::new(&config.indent);
    for ns in collect_namespaces(model, config, ArtifactKind::Interface, target) {
        w.line(format!("using {ns};"));
    }
    w.blank();

    w.line(format!("namespace {target}"));
    w.block(|w| {
        for annotation in model.contract_annotations() {
            w.line(render_annotation(annotation, model.path(), model.name())?);
        }
        w.line(format!(
            "public interface {}{}",
            generator.interface_name(),
            base_list(generator)
        ));
        w.block(|w| write_members(w, generator, model.own_properties(), ArtifactKind::Interface, false))?;

        Ok::<_, Error>(())
    })?;

    Ok(w.finish())
}

// base_list
// key capability first, then every extended contract
fn base_list(generator: &ContractGenerator<'_>) -> String {
    let bases: Vec<String> = generator
        .key_capability()
        .into_iter()
        .chain(generator.model.extends().iter().map(|ext| ext.name.clone()))
        .collect();

    if bases.is_empty() {
        String::new()
    } else {
        format!(" : {}", bases.join(", "))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use crate::{GeneratorConfig, render_interface};
    use contractgen_core::model::ContractDeclaration;
    use contractgen_schema::{prelude::*, types::Scalar};

    fn render(contracts: Vec<Contract>, path: &str) -> String {
        let schema = Schema::new(contracts).unwrap();
        let model = ContractDeclaration::build(&schema, path).unwrap();

        render_interface(&model, &GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn keyless_contract_has_no_base_list() {
        let log = Contract::new(Some("Shop"), "ILogEntry")
            .entity(EntityMarker::default())
            .property(Property::new("Message", TypeRef::scalar(Scalar::Text)));

        let out = render(vec![log], "Shop.ILogEntry");

        assert!(out.contains("    public interface ILogEntry\n    {\n"));
        assert!(out.contains("        string Message { get; set; }\n    }\n}\n"));
        assert!(out.contains("namespace MyProduct.Entities\n{\n"));
    }

    #[test]
    fn inherited_members_are_left_to_the_extended_contract() {
        let audit = Contract::new(Some("Shop.Common"), "IAuditable")
            .property(Property::new("CreatedBy", TypeRef::scalar(Scalar::Text)));
        let company = Contract::new(Some("Shop"), "ICompany")
            .entity(EntityMarker::default())
            .extend("Shop.Common.IAuditable")
            .property(Property::new("Id", TypeRef::scalar(Scalar::Int32)).primary_key(PrimaryKeyMarker::unordered()));

        let out = render(vec![audit, company], "Shop.ICompany");

        assert!(out.contains("public interface ICompany : IHasPk<int>, IAuditable\n"));
        assert!(out.contains("using Shop.Common;\n"));
        assert!(!out.contains("CreatedBy"));
    }

    #[test]
    fn contract_annotations_precede_the_declaration() {
        let table = Annotation::new(TypeRef::named(Some("Acme.Mapping"), "TableAttribute"))
            .arg(ArgValue::Text("orders".to_string()));
        let order = Contract::new(Some("Shop"), "IOrder")
            .entity(EntityMarker::default())
            .annotate(table);

        let out = render(vec![order], "Shop.IOrder");

        assert!(out.contains("    [Table(\"orders\")]\n    public interface IOrder\n"));
        assert!(out.contains("using Acme.Mapping;\n"));
    }
}
