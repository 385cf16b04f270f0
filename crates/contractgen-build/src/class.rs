use crate::{
    ArtifactKind, ContractGenerator,
    attribute::render_annotation,
    members::{emission_order, write_members},
    namespaces::collect_namespaces,
    primary_key::PrimaryKey,
    writer::CodeWriter,
};
use contractgen_core::Error;

/// Render the class form: imports, the composite key record (if any) and
/// the class with its static key helpers, own members, instance key
/// accessors and one region per extended contract.
pub(crate) fn generate(generator: &ContractGenerator<'_>) -> Result<String, Error> {
    let model = generator.model;
    let config = generator.config;
    let target = generator.target_namespace();

    let mut w = CodeWriter::new(&config.indent);
    for ns in collect_namespaces(model, config, ArtifactKind::Class, target) {
        w.line(format!("using {ns};"));
    }
    w.blank();

    w.line(format!("namespace {target}"));
    w.block(|w| {
        if let Some(key @ PrimaryKey::Composite { .. }) = &generator.key {
            write_key_record(w, generator, key);
            w.blank();
        }

        for annotation in model.contract_annotations() {
            w.line(render_annotation(annotation, model.path(), model.name())?);
        }
        w.line(format!(
            "public class {}{}",
            generator.class_name(),
            base_list(generator)
        ));
        w.block(|w| write_body(w, generator))
    })?;

    Ok(w.finish())
}

fn base_list(generator: &ContractGenerator<'_>) -> String {
    let bases: Vec<String> = std::iter::once(generator.interface_name())
        .chain(generator.key_capability())
        .chain(generator.model.extends().iter().map(|ext| ext.name.clone()))
        .collect();

    format!(" : {}", bases.join(", "))
}

fn write_body(w: &mut CodeWriter<'_>, generator: &ContractGenerator<'_>) -> Result<(), Error> {
    let model = generator.model;
    let mut sections = Sections::default();

    if let Some(key) = &generator.key {
        sections.next(w);
        write_static_region(w, generator, key);
    }

    let own = emission_order(model.own_properties());
    if !own.is_empty() {
        sections.next(w);
        write_members(w, generator, own, ArtifactKind::Class, false)?;
    }

    if let Some(key) = &generator.key {
        sections.next(w);
        write_instance_region(w, generator, key);
    }

    for ext in model.extends() {
        if emission_order(&ext.properties).is_empty() {
            continue;
        }

        sections.next(w);
        w.line(format!("#region {} implementation", ext.name));
        write_members(w, generator, &ext.properties, ArtifactKind::Class, true)?;
        w.line(format!("#endregion {} implementation", ext.name));
    }

    Ok(())
}

///
/// Sections
///
/// Separates consecutive class body sections with a single blank line.
///

#[derive(Default)]
struct Sections {
    started: bool,
}

impl Sections {
    fn next(&mut self, w: &mut CodeWriter<'_>) {
        if self.started {
            w.blank();
        }
        self.started = true;
    }
}

fn write_static_region(w: &mut CodeWriter<'_>, generator: &ContractGenerator<'_>, key: &PrimaryKey<'_>) {
    let config = generator.config;
    let class = generator.class_name();
    let interface = generator.interface_name();
    let key_type = key.type_name();

    w.line("#region STATIC");
    w.line("/// <summary>");
    w.line(format!(
        "/// Read-only field for the primary key equality comparer of the '{class}' entity."
    ));
    w.line("/// </summary>");
    w.line(format!(
        "public static readonly IEqualityComparer<{class}> PkEqualityComparer = new {eq}<{class}>(GetPk, {eq}<{key_type}>.Default);",
        eq = config.equality_comparer,
    ));
    w.blank();

    w.line("/// <summary>");
    w.line(format!(
        "/// Read-only field for the primary key comparer of the '{class}' entity."
    ));
    w.line("/// </summary>");
    w.line(format!(
        "public static readonly IComparer<{class}> PkComparer = new {cmp}<{class}>(GetPk, {cmp}<{key_type}>.Default);",
        cmp = config.comparer,
    ));
    w.blank();

    w.line("/// <summary>");
    w.line(format!("/// Gets the primary key of the given '{class}' instance."));
    w.line("/// </summary>");
    w.line(format!(
        "/// <param name=\"entity\">The '{class}' instance to get primary key of.</param>"
    ));
    w.line(format!(
        "/// <returns>The primary key value of the given '{class}' instance.</returns>"
    ));
    w.line("/// <exception cref=\"ArgumentNullException\">Thrown if <paramref name=\"entity\"/> is null.</exception>");
    w.line(format!("public static {key_type} GetPk({interface} entity)"));
    w.block(|w| {
        write_null_guard(w);
        match key {
            PrimaryKey::Simple(property) => w.line(format!("return entity.{};", property.name())),
            PrimaryKey::Composite { type_name, components } => {
                let args: Vec<String> = components
                    .iter()
                    .map(|p| format!("entity.{}", p.name()))
                    .collect();
                w.line(format!("return new {type_name}({});", args.join(", ")));
            }
        }
    });
    w.blank();

    w.line("/// <summary>");
    w.line(format!(
        "/// Sets the primary key of the given '{class}' instance to the given value."
    ));
    w.line("/// </summary>");
    w.line(format!(
        "/// <param name=\"entity\">The '{class}' instance to set primary key of.</param>"
    ));
    w.line("/// <param name=\"pk\">The primary key to set.</param>");
    w.line("/// <exception cref=\"ArgumentNullException\">Thrown if <paramref name=\"entity\"/> is null.</exception>");
    w.line(format!("public static void SetPk({interface} entity, {key_type} pk)"));
    w.block(|w| {
        write_null_guard(w);
        match key {
            PrimaryKey::Simple(property) => w.line(format!("entity.{} = pk;", property.name())),
            PrimaryKey::Composite { components, .. } => {
                for property in components {
                    w.line(format!("entity.{0} = pk.{0};", property.name()));
                }
            }
        }
    });
    w.line("#endregion STATIC");
}

fn write_null_guard(w: &mut CodeWriter<'_>) {
    w.line("if (entity == null)");
    w.line("    throw new ArgumentNullException(nameof(entity));");
    w.blank();
}

fn write_instance_region(w: &mut CodeWriter<'_>, generator: &ContractGenerator<'_>, key: &PrimaryKey<'_>) {
    let class = generator.class_name();
    let key_type = key.type_name();
    let capability = generator.key_capability().unwrap_or_default();

    w.line(format!("#region {capability} implementation"));
    w.line("/// <summary>");
    w.line(format!("/// Gets the primary key of this '{class}' instance."));
    w.line("/// </summary>");
    w.line(format!(
        "/// <returns>The primary key value of this '{class}' instance.</returns>"
    ));
    w.line(format!("public {key_type} GetPk()"));
    w.block(|w| w.line("return GetPk(this);"));
    w.blank();

    w.line("/// <summary>");
    w.line(format!(
        "/// Sets the primary key of this '{class}' instance to the given value."
    ));
    w.line("/// </summary>");
    w.line("/// <param name=\"pk\">The primary key to set.</param>");
    w.line(format!("public void SetPk({key_type} pk)"));
    w.block(|w| w.line("SetPk(this, pk);"));
    w.line(format!("#endregion {capability} implementation"));
}

// write_key_record
// the aggregate key type, compared component by component in key order
fn write_key_record(w: &mut CodeWriter<'_>, generator: &ContractGenerator<'_>, key: &PrimaryKey<'_>) {
    let class = generator.class_name();
    let comparer = &generator.config.comparer;
    let type_name = key.type_name();
    let components = key.components();

    let params: Vec<String> = components
        .iter()
        .map(|p| format!("{} {}", p.type_name(), p.name()))
        .collect();

    w.line("/// <summary>");
    w.line(format!("/// Composite primary key of the '{class}' entity."));
    w.line("/// </summary>");
    w.line(format!(
        "public sealed record {type_name}({}) : IComparable<{type_name}>",
        params.join(", ")
    ));
    w.block(|w| {
        w.line("/// <summary>");
        w.line("/// Compares this key to another one, component by component in key order.");
        w.line("/// </summary>");
        w.line("/// <param name=\"other\">The key to compare with.</param>");
        w.line("/// <returns>A negative value, zero or a positive value.</returns>");
        w.line(format!("public int CompareTo({type_name} other)"));
        w.block(|w| {
            w.line("if (other is null)");
            w.line("    return 1;");
            w.blank();

            let last = components.len().saturating_sub(1);
            for (i, property) in components.iter().enumerate() {
                let compare = format!(
                    "{comparer}<{}>.Default.Compare(this.{name}, other.{name})",
                    property.type_name(),
                    name = property.name(),
                );

                if i == last {
                    w.line(format!("return {compare};"));
                } else {
                    let binding = if i == 0 { "var result" } else { "result" };
                    w.line(format!("{binding} = {compare};"));
                    w.line("if (result != 0)");
                    w.line("    return result;");
                    w.blank();
                }
            }
        });
    });
}

///
/// TESTS
///
