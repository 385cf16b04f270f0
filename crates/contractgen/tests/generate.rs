use contractgen::prelude::*;
use proptest::prelude::*;

const SHOP: &str = include_str!("fixtures/shop.toml");

fn shop() -> Schema {
    Schema::from_toml(SHOP).expect("shop schema should load")
}

fn generated(path: &str) -> GeneratedContract {
    generate(&shop(), path, GeneratorConfig::shared()).expect("contract should generate")
}

const USINGS: &str = "\
using MyCompany;
using MyCompany.Attributes;
using MyCompany.Enums;
using System;
using System.Collections.Generic;
using System.ComponentModel.DataAnnotations;
";

const COMPANY_INTERFACE: &str = "
namespace MyProduct.Data.Entities
{
    public interface ICompany : IHasPk<int>, IAuditableEntity
    {
        /// <summary>
        /// Gets or sets the 'Id' primary key property value.
        /// </summary>
        [Key]
        int Id { get; set; }

        /// <summary>
        /// Gets or sets the 'Name' simple property value.
        /// </summary>
        [Required]
        [StringLength(50, MinimumLength = 1)]
        string Name { get; set; }

        /// <summary>
        /// Gets or sets the 'ExternalId' simple property value.
        /// </summary>
        [StringLength(40, MinimumLength = 0)]
        string ExternalId { get; set; }
    }
}
";

const COMPANY_CLASS: &str = "using System.ComponentModel.DataAnnotations.Schema;

namespace MyProduct.Data.Entities
{
    public class Company : ICompany, IHasPk<int>, IAuditableEntity
    {
        #region STATIC
        /// <summary>
        /// Read-only field for the primary key equality comparer of the 'Company' entity.
        /// </summary>
        public static readonly IEqualityComparer<Company> PkEqualityComparer = new EqualityComparer<Company>(GetPk, EqualityComparer<int>.Default);

        /// <summary>
        /// Read-only field for the primary key comparer of the 'Company' entity.
        /// </summary>
        public static readonly IComparer<Company> PkComparer = new Comparer<Company>(GetPk, Comparer<int>.Default);

        /// <summary>
        /// Gets the primary key of the given 'Company' instance.
        /// </summary>
        /// <param name=\"entity\">The 'Company' instance to get primary key of.</param>
        /// <returns>The primary key value of the given 'Company' instance.</returns>
        /// <exception cref=\"ArgumentNullException\">Thrown if <paramref name=\"entity\"/> is null.</exception>
        public static int GetPk(ICompany entity)
        {
            if (entity == null)
                throw new ArgumentNullException(nameof(entity));

            return entity.Id;
        }

        /// <summary>
        /// Sets the primary key of the given 'Company' instance to the given value.
        /// </summary>
        /// <param name=\"entity\">The 'Company' instance to set primary key of.</param>
        /// <param name=\"pk\">The primary key to set.</param>
        /// <exception cref=\"ArgumentNullException\">Thrown if <paramref name=\"entity\"/> is null.</exception>
        public static void SetPk(ICompany entity, int pk)
        {
            if (entity == null)
                throw new ArgumentNullException(nameof(entity));

            entity.Id = pk;
        }
        #endregion STATIC

        /// <summary>
        /// Gets or sets the 'Id' primary key property value.
        /// </summary>
        [Key]
        public int Id { get; set; }

        /// <summary>
        /// Gets or sets the 'Name' simple property value.
        /// </summary>
        [Required]
        [StringLength(50, MinimumLength = 1)]
        public string Name { get; set; }

        /// <summary>
        /// Gets or sets the 'ExternalId' simple property value.
        /// </summary>
        [StringLength(40, MinimumLength = 0)]
        public string ExternalId { get; set; }

        #region IHasPk<int> implementation
        /// <summary>
        /// Gets the primary key of this 'Company' instance.
        /// </summary>
        /// <returns>The primary key value of this 'Company' instance.</returns>
        public int GetPk()
        {
            return GetPk(this);
        }

        /// <summary>
        /// Sets the primary key of this 'Company' instance to the given value.
        /// </summary>
        /// <param name=\"pk\">The primary key to set.</param>
        public void SetPk(int pk)
        {
            SetPk(this, pk);
        }
        #endregion IHasPk<int> implementation

        #region IAuditableEntity implementation
        /// <summary>
        /// Gets or sets the 'CreatedAtTimeUtc' property value.
        /// </summary>
        [Required]
        public DateTime CreatedAtTimeUtc { get; set; }

        /// <summary>
        /// Gets or sets the 'CreatedBy' property value.
        /// </summary>
        public string CreatedBy { get; set; }

        /// <summary>
        /// Gets or sets the 'DeletedAtTimeUtc' property value.
        /// </summary>
        public DateTime? DeletedAtTimeUtc { get; set; }
        #endregion IAuditableEntity implementation
    }
}
";

#[test]
fn company_interface_matches_expected_text() {
    let company = generated("Shop.Data.ICompany");

    assert_eq!(company.interface, format!("{USINGS}{COMPANY_INTERFACE}"));
}

#[test]
fn company_class_matches_expected_text() {
    let company = generated("Shop.Data.ICompany");

    assert_eq!(company.class, format!("{USINGS}{COMPANY_CLASS}"));
    assert!(!company.class.contains("CompanyPk"));
}

#[test]
fn product_reference_is_emitted_last_with_synthesized_required() {
    let product = generated("Shop.Domain.IProduct");

    assert_eq!(product.namespace, "MyProduct.Domain.Entities");
    assert!(product.interface.contains(
        "        /// <summary>\n\
         \x20       /// Gets or sets the 'Owner' navigation property value.\n\
         \x20       /// </summary>\n\
         \x20       [Required]\n\
         \x20       [EntityReference(EntityReferenceMultiplicityEnum.One)]\n\
         \x20       ICompany Owner { get; set; }\n"
    ));
    assert!(product.class.contains("        [Required]\n        public virtual ICompany Owner { get; set; }\n"));

    let order: Vec<usize> = ["int Id", "string Name", "int? WeightGramm", "ICompany Owner"]
        .iter()
        .map(|decl| product.interface.find(decl).expect("member should be emitted"))
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn product_does_not_import_the_referenced_contract_namespace() {
    let product = generated("Shop.Domain.IProduct");

    assert!(product.interface.starts_with(USINGS));
    assert!(!product.interface.contains("using Shop.Data;"));
    assert!(!product.class.contains("EntityReference("));
}

#[test]
fn generate_all_visits_entity_contracts_in_document_order() {
    let results = generate_all(&shop(), GeneratorConfig::shared());
    let paths: Vec<&str> = results.iter().map(|(path, _)| path.as_str()).collect();

    assert_eq!(paths, ["Shop.Data.ICompany", "Shop.Domain.IProduct"]);
    assert!(results.iter().all(|(_, result)| result.is_ok()));
}

#[test]
fn friendly_names_strip_a_single_interface_prefix() {
    let cases = [("ICompany", "Company"), ("Iid", "Iid"), ("I", "I"), ("Ledger", "Ledger")];

    for (name, friendly) in cases {
        let contract = Contract::new(Some("Shop"), name)
            .entity(EntityMarker::default())
            .property(Property::new("Id", TypeRef::scalar(Scalar::Int32)).primary_key(PrimaryKeyMarker::unordered()));
        let path = contract.path();
        let schema = Schema::new(vec![contract]).unwrap();

        let out = generate(&schema, &path, GeneratorConfig::shared()).unwrap();

        assert_eq!(out.class_name, friendly, "class name of {name}");
        assert_eq!(out.interface_name, format!("I{friendly}"), "interface name of {name}");
    }
}

#[test]
fn composite_key_renders_record_and_key_capability() {
    let contract = Contract::new(Some("Shop"), "IOrderLine")
        .entity(EntityMarker::default())
        .property(
            Property::new("Order", TypeRef::named(Some("Shop"), "IOrder"))
                .reference(ReferenceMarker::new(Multiplicity::One))
                .primary_key(PrimaryKeyMarker::ordered(1)),
        )
        .property(Property::new("LineNo", TypeRef::scalar(Scalar::Int32)).primary_key(PrimaryKeyMarker::ordered(0)));
    let schema = Schema::new(vec![contract]).unwrap();

    let out = generate(&schema, "Shop.IOrderLine", GeneratorConfig::shared()).unwrap();

    assert!(out.interface.contains("public interface IOrderLine : IHasPk<OrderLinePk>\n"));
    assert!(out.class.contains("public sealed record OrderLinePk(int LineNo, IOrder Order)"));
    assert!(out.class.contains("return new OrderLinePk(entity.LineNo, entity.Order);\n"));
    assert!(out.class.contains("foreign key of the 'Order' entity reference that is part of the primary key."));
}

#[test]
fn composite_key_with_a_gap_is_rejected() {
    let contract = Contract::new(Some("Shop"), "IOrderLine")
        .entity(EntityMarker::default())
        .property(Property::new("OrderId", TypeRef::scalar(Scalar::Int64)).primary_key(PrimaryKeyMarker::ordered(0)))
        .property(Property::new("LineNo", TypeRef::scalar(Scalar::Int32)).primary_key(PrimaryKeyMarker::ordered(2)));
    let schema = Schema::new(vec![contract]).unwrap();

    let err = generate(&schema, "Shop.IOrderLine", GeneratorConfig::shared()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidPrimaryKeyOrder);
    assert_eq!(err.property(), Some("LineNo"));
}

#[test]
fn custom_config_changes_namespace_and_indent() {
    let config = GeneratorConfig::from_toml(
        r#"
default_namespace = "Acme.Model"
indent = "\t"
"#,
    )
    .unwrap();
    let contract = Contract::new(Some("Shop"), "ILog")
        .entity(EntityMarker::default())
        .property(Property::new("Message", TypeRef::scalar(Scalar::Text)));
    let schema = Schema::new(vec![contract]).unwrap();

    let out = generate(&schema, "Shop.ILog", &config).unwrap();

    assert_eq!(out.namespace, "Acme.Model");
    assert!(out.interface.contains("namespace Acme.Model\n{\n\tpublic interface ILog\n"));
    assert!(out.interface.contains("\t\tstring Message { get; set; }\n"));
}

#[test]
fn version_is_the_workspace_version() {
    assert_eq!(contractgen::VERSION, env!("CARGO_PKG_VERSION"));
    assert!(!contractgen::VERSION.is_empty());
}

fn keyed(orders: &[u32]) -> Schema {
    let mut contract = Contract::new(Some("Shop"), "IShipment").entity(EntityMarker::default());
    for (i, order) in orders.iter().enumerate() {
        contract = contract.property(
            Property::new(&format!("Part{i}"), TypeRef::scalar(Scalar::Int32))
                .primary_key(PrimaryKeyMarker::ordered(*order)),
        );
    }

    Schema::new(vec![contract]).unwrap()
}

proptest! {
    #[test]
    fn contiguous_key_orders_generate_in_any_declaration_order(
        orders in (2u32..6).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle()),
    ) {
        let out = generate(&keyed(&orders), "Shop.IShipment", GeneratorConfig::shared()).unwrap();

        let params: Vec<String> = (0..orders.len() as u32)
            .map(|k| {
                let i = orders.iter().position(|o| *o == k).unwrap();
                format!("int Part{i}")
            })
            .collect();
        let record = format!("public sealed record ShipmentPk({})", params.join(", "));
        prop_assert!(out.class.contains(&record));
    }
}
