#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]

use super::*;
use fakt_ir::{
    DeclarationId, DeclarationKind, GenericPattern, MemberModality, ParameterInfo, Primitive,
    QualifiedName,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const VERSION: &str = "1.0.0";
const OPTIONS: &str = "banner=true";

fn string() -> TypeExpr {
    TypeExpr::Primitive(Primitive::String)
}

fn base() -> DeclarationAnalysis {
    DeclarationAnalysis {
        id: DeclarationId::new("com.example.Repository"),
        kind: DeclarationKind::Interface,
        package: "com.example".to_string(),
        name: "Repository".to_string(),
        type_parameters: vec![
            TypeParameterInfo::new("T").with_bound(TypeExpr::named("com.example.Entity"))
        ],
        functions: vec![
            FunctionInfo::new("find", TypeExpr::result(TypeExpr::param("T").nullable()))
                .with_param(ParameterInfo::new("id", string()))
                .suspending(),
            FunctionInfo::new("save", TypeExpr::unit())
                .with_param(ParameterInfo::new("items", TypeExpr::param("T")).vararg()),
            FunctionInfo::new("map", TypeExpr::param("R"))
                .with_type_param(TypeParameterInfo::new("R"))
                .with_param(ParameterInfo::new(
                    "f",
                    TypeExpr::function(vec![TypeExpr::param("T")], TypeExpr::param("R"), false),
                )),
        ],
        properties: vec![
            PropertyInfo::new("name", string()),
            PropertyInfo::new("count", TypeExpr::Primitive(Primitive::Int)).mutable(),
        ],
        pattern: GenericPattern::MixedGenerics,
    }
}

#[test]
fn descriptor_text_is_canonical() {
    let mut analysis = base();
    analysis.functions.truncate(1);
    analysis.properties.truncate(1);
    let signature = StructuralSignature::compute(&analysis, VERSION, OPTIONS);
    assert_eq!(
        signature.text(),
        "fakt 1.0.0\n\
         options banner=true\n\
         interface com.example.Repository\n\
         tp 0 T : com.example.Entity\n\
         prop name : kotlin.String val abstract nonnull\n\
         fun find(id: kotlin.String): kotlin.Result<($T)?> suspend abstract\n"
    );
}

#[test]
fn digest_is_lowercase_sha256_hex() {
    let signature = StructuralSignature::compute(&base(), VERSION, OPTIONS);
    assert_eq!(signature.digest().len(), 64);
    assert!(signature
        .digest()
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

#[test]
fn member_order_matters() {
    let mut functions = base();
    functions.functions.swap(0, 1);
    let mut properties = base();
    properties.properties.swap(0, 1);
    let original = StructuralSignature::compute(&base(), VERSION, OPTIONS);
    assert_ne!(
        original.digest(),
        StructuralSignature::compute(&functions, VERSION, OPTIONS).digest()
    );
    assert_ne!(
        original.digest(),
        StructuralSignature::compute(&properties, VERSION, OPTIONS).digest()
    );
}

#[test]
fn swapping_colliding_overloads_changes_the_digest() {
    // `fetch(String)` and `fetch(String?)` both derive `fetchString`, so their
    // order decides which one gets the numeric suffix.
    let mut analysis = base();
    analysis.functions = vec![
        FunctionInfo::new("fetch", TypeExpr::unit())
            .with_param(ParameterInfo::new("id", string())),
        FunctionInfo::new("fetch", TypeExpr::unit())
            .with_param(ParameterInfo::new("id", string().nullable())),
    ];
    let mut swapped = analysis.clone();
    swapped.functions.reverse();
    assert_ne!(
        StructuralSignature::compute(&analysis, VERSION, OPTIONS).digest(),
        StructuralSignature::compute(&swapped, VERSION, OPTIONS).digest()
    );
}

#[test]
fn rendering_options_are_part_of_the_signature() {
    assert_ne!(
        StructuralSignature::compute(&base(), VERSION, "banner=true").digest(),
        StructuralSignature::compute(&base(), VERSION, "banner=false").digest()
    );
}

#[test]
fn type_parameter_order_matters() {
    let mut analysis = base();
    analysis.type_parameters = vec![TypeParameterInfo::new("K"), TypeParameterInfo::new("V")];
    let mut swapped = analysis.clone();
    swapped.type_parameters.reverse();
    assert_ne!(
        StructuralSignature::compute(&analysis, VERSION, OPTIONS).digest(),
        StructuralSignature::compute(&swapped, VERSION, OPTIONS).digest()
    );
}

#[test]
fn generator_version_is_part_of_the_signature() {
    assert_ne!(
        StructuralSignature::compute(&base(), "1.0.0", OPTIONS).digest(),
        StructuralSignature::compute(&base(), "1.0.1", OPTIONS).digest()
    );
}

/// Every structural edit the signature must notice.
fn mutate(analysis: &mut DeclarationAnalysis, kind: usize, name: &str) {
    match kind {
        0 => analysis.functions[0].name = format!("find{name}"),
        1 => analysis.functions[0].parameters[0].ty = TypeExpr::Primitive(Primitive::Long),
        2 => analysis
            .functions
            .push(FunctionInfo::new(format!("extra{name}"), TypeExpr::unit())),
        3 => analysis.properties[0].is_mutable = true,
        4 => {
            analysis.type_parameters[0].bounds =
                vec![TypeExpr::named(&format!("com.example.Other{name}"))];
        }
        5 => analysis.functions[1].parameters[0].is_vararg = false,
        6 => analysis.functions[0].is_suspend = false,
        7 => analysis.properties[1].modality = MemberModality::Open,
        8 => {
            analysis.functions.remove(2);
        }
        9 => analysis.properties[0].name = format!("label{name}"),
        10 => analysis.functions[2].type_parameters[0]
            .bounds
            .push(TypeExpr::generic(
                QualifiedName::kotlin("Comparable"),
                vec![TypeExpr::param("R")],
            )),
        11 => analysis.functions[0].parameters[0].has_default_value = true,
        12 => analysis.properties[0].ty = string().nullable(),
        13 => analysis.kind = DeclarationKind::Class,
        _ => analysis.package = format!("com.other{name}"),
    }
}

proptest! {
    #[test]
    fn structural_changes_change_the_digest(kind in 0usize..15, name in "[A-Z][a-z]{0,6}") {
        let original = base();
        let mut changed = original.clone();
        mutate(&mut changed, kind, &name);
        let before = StructuralSignature::compute(&original, VERSION, OPTIONS);
        let after = StructuralSignature::compute(&changed, VERSION, OPTIONS);
        prop_assert_ne!(before.digest(), after.digest());
    }

    #[test]
    fn recomputation_is_deterministic(kind in 0usize..15, name in "[A-Z][a-z]{0,6}") {
        let mut analysis = base();
        mutate(&mut analysis, kind, &name);
        let again = analysis.clone();
        prop_assert_eq!(
            StructuralSignature::compute(&analysis, VERSION, OPTIONS),
            StructuralSignature::compute(&again, VERSION, OPTIONS)
        );
    }
}
