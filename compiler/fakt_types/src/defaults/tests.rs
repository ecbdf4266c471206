#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]

use super::*;
use fakt_ir::{FunctionInfo, ParameterInfo, TypeParameterInfo};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const UNCONFIGURED: &str = "UserService.getUser is not configured";
const FAILURE: &str = "error(\"UserService.getUser is not configured\")";

fn default_of(ty: &TypeExpr) -> DefaultValue {
    let renderer = TypeRenderer::new();
    let erasure = Erasure::none();
    DefaultSynthesizer::new(&renderer, &erasure, UNCONFIGURED).value(ty)
}

fn default_erasing(ty: &TypeExpr, erased: &[&str]) -> DefaultValue {
    let mut function = FunctionInfo::new("f", TypeExpr::unit());
    for name in erased {
        function = function.with_type_param(TypeParameterInfo::new(*name));
    }
    let renderer = TypeRenderer::new();
    let erasure = Erasure::for_function(&function);
    DefaultSynthesizer::new(&renderer, &erasure, UNCONFIGURED).value(ty)
}

fn prim(p: Primitive) -> TypeExpr {
    TypeExpr::Primitive(p)
}

fn user() -> TypeExpr {
    TypeExpr::named("com.example.User")
}

#[test]
fn primitive_defaults() {
    let expected = [
        (Primitive::String, "\"\""),
        (Primitive::Int, "0"),
        (Primitive::Long, "0L"),
        (Primitive::Short, "0.toShort()"),
        (Primitive::Byte, "0.toByte()"),
        (Primitive::Float, "0.0f"),
        (Primitive::Double, "0.0"),
        (Primitive::Boolean, "false"),
        (Primitive::Char, "'\\u0000'"),
        (Primitive::Unit, "Unit"),
        (Primitive::Any, "Any()"),
    ];
    for (primitive, expr) in expected {
        let value = default_of(&prim(primitive));
        assert_eq!(value.expression, expr, "{primitive:?}");
        assert!(value.is_safe);
    }
}

#[test]
fn nothing_fails_loudly() {
    let value = default_of(&prim(Primitive::Nothing));
    assert_eq!(value.expression, FAILURE);
    assert!(!value.is_safe);
}

#[test]
fn nullable_always_defaults_to_null() {
    for ty in [
        TypeExpr::list(prim(Primitive::String)).nullable(),
        prim(Primitive::Int).nullable(),
        TypeExpr::function(vec![], TypeExpr::unit(), false).nullable(),
        user().nullable(),
        TypeExpr::param("T").nullable(),
    ] {
        let value = default_of(&ty);
        assert_eq!(value.expression, "null");
        assert!(value.is_safe);
    }
}

#[test]
fn container_defaults() {
    let cases = [
        ("kotlin.collections.List", "emptyList()"),
        ("kotlin.collections.Collection", "emptyList()"),
        ("kotlin.collections.Iterable", "emptyList()"),
        ("kotlin.collections.MutableList", "mutableListOf()"),
        ("kotlin.collections.Set", "emptySet()"),
        ("kotlin.collections.MutableSet", "mutableSetOf()"),
        ("kotlin.sequences.Sequence", "emptySequence()"),
        ("kotlin.Array", "emptyArray()"),
    ];
    for (fq, expr) in cases {
        let ty = TypeExpr::generic(QualifiedName::parse(fq), vec![user()]);
        assert_eq!(default_of(&ty).expression, expr, "{fq}");
    }
    let map = TypeExpr::generic(
        QualifiedName::collections("MutableMap"),
        vec![prim(Primitive::String), user()],
    );
    assert_eq!(default_of(&map).expression, "mutableMapOf()");
}

#[test]
fn primitive_arrays() {
    assert_eq!(
        default_of(&TypeExpr::vararg_array(&prim(Primitive::Int))).expression,
        "IntArray(0)"
    );
    assert_eq!(
        default_of(&TypeExpr::vararg_array(&prim(Primitive::String))).expression,
        "emptyArray()"
    );
}

#[test]
fn erased_arguments_are_written_explicitly() {
    let ty = TypeExpr::generic(
        QualifiedName::collections("Map"),
        vec![prim(Primitive::String), TypeExpr::list(TypeExpr::param("T"))],
    );
    assert_eq!(
        default_erasing(&ty, &["T"]).expression,
        "emptyMap<String, List<Any?>>()"
    );
    assert_eq!(default_of(&ty).expression, "emptyMap()");
}

#[test]
fn array_of_class_level_parameter_is_unsafe() {
    let ty = TypeExpr::generic(QualifiedName::kotlin("Array"), vec![TypeExpr::param("T")]);
    assert!(!default_of(&ty).is_safe);
    assert_eq!(default_erasing(&ty, &["T"]).expression, "emptyArray<Any?>()");
}

#[test]
fn flow_needs_an_import() {
    let ty = TypeExpr::generic(
        QualifiedName::new("kotlinx.coroutines.flow", "Flow"),
        vec![user()],
    );
    let value = default_of(&ty);
    assert_eq!(value.expression, "emptyFlow()");
    assert_eq!(
        value.imports,
        vec![QualifiedName::new("kotlinx.coroutines.flow", "emptyFlow")]
    );
}

#[test]
fn result_defaults_its_payload() {
    let ok = default_of(&TypeExpr::result(TypeExpr::list(user())));
    assert_eq!(ok.expression, "Result.success(emptyList())");
    assert!(ok.is_safe);

    let unsafe_payload = default_of(&TypeExpr::result(user()));
    assert_eq!(unsafe_payload.expression, FAILURE);
    assert!(!unsafe_payload.is_safe);

    let nullable_payload = default_of(&TypeExpr::result(user().nullable()));
    assert_eq!(nullable_payload.expression, "Result.success(null)");
}

#[test]
fn pair_defaults_both_sides() {
    let pair = TypeExpr::generic(
        QualifiedName::kotlin("Pair"),
        vec![prim(Primitive::String), prim(Primitive::Int)],
    );
    assert_eq!(default_of(&pair).expression, "Pair(\"\", 0)");

    let half_unsafe = TypeExpr::generic(
        QualifiedName::kotlin("Pair"),
        vec![prim(Primitive::String), user()],
    );
    assert!(!default_of(&half_unsafe).is_safe);
}

#[test]
fn shadowed_constructors_are_written_qualified() {
    let renderer = TypeRenderer::with_qualified([
        "kotlin.Result".to_string(),
        "kotlin.Pair".to_string(),
        "kotlin.Triple".to_string(),
    ]);
    let erasure = Erasure::none();
    let synth = DefaultSynthesizer::new(&renderer, &erasure, UNCONFIGURED);

    assert_eq!(
        synth.value(&TypeExpr::result(prim(Primitive::Int))).expression,
        "kotlin.Result.success(0)"
    );
    let pair = TypeExpr::generic(
        QualifiedName::kotlin("Pair"),
        vec![prim(Primitive::Int), prim(Primitive::Boolean)],
    );
    assert_eq!(synth.value(&pair).expression, "kotlin.Pair(0, false)");
    let triple = TypeExpr::generic(
        QualifiedName::kotlin("Triple"),
        vec![prim(Primitive::Int), prim(Primitive::Int), prim(Primitive::Int)],
    );
    assert_eq!(synth.value(&triple).expression, "kotlin.Triple(0, 0, 0)");
}

#[test]
fn user_types_and_type_parameters_fail_loudly() {
    assert_eq!(default_of(&user()).expression, FAILURE);
    assert!(!default_of(&TypeExpr::param("T")).is_safe);
}

#[test]
fn closures_return_the_default_of_their_return_type() {
    let getter = TypeExpr::function(vec![], prim(Primitive::Int), false);
    assert_eq!(default_of(&getter).expression, "{ 0 }");

    let two_args = TypeExpr::function(
        vec![prim(Primitive::String), prim(Primitive::Int)],
        prim(Primitive::Boolean),
        true,
    );
    assert_eq!(default_of(&two_args).expression, "{ _, _ -> false }");
}

#[test]
fn unit_closures_have_empty_bodies() {
    assert_eq!(
        default_of(&TypeExpr::function(vec![], TypeExpr::unit(), false)).expression,
        "{}"
    );
    assert_eq!(
        default_of(&TypeExpr::function(vec![user()], TypeExpr::unit(), false)).expression,
        "{ _ -> }"
    );
}

#[test]
fn closure_with_unsafe_return_is_a_value_that_fails_when_invoked() {
    let ty = TypeExpr::function(vec![prim(Primitive::String)], user(), false);
    let value = default_of(&ty);
    assert_eq!(value.expression, format!("{{ _ -> {FAILURE} }}"));
    assert!(!value.is_safe);
}

#[test]
fn identity_shape_defaults_to_it() {
    let ty = TypeExpr::function(vec![TypeExpr::param("T")], TypeExpr::param("T"), false);
    assert_eq!(default_erasing(&ty, &["T"]).expression, "{ it }");
    assert_eq!(default_of(&ty).expression, "{ it }");

    let concrete = TypeExpr::function(vec![user()], user(), true);
    assert_eq!(default_of(&concrete).expression, "{ it }");
}

#[test]
fn executable_identity_runs_the_block() {
    let block = TypeExpr::function(vec![], TypeExpr::param("T"), true);
    let ty = TypeExpr::function(vec![block.clone()], TypeExpr::param("T"), true);
    assert_eq!(
        default_erasing(&ty, &["T"]).expression,
        "{ block -> block() }"
    );

    // Declaration-level `T` is not erased.
    assert_eq!(default_of(&ty).expression, format!("{{ _ -> {FAILURE} }}"));

    // A suspend block cannot run inside a non-suspend closure.
    let blocking = TypeExpr::function(vec![block], TypeExpr::param("T"), false);
    assert!(!default_erasing(&blocking, &["T"]).is_safe);
}

#[test]
fn member_signature_with_vararg() {
    let function = FunctionInfo::new("log", TypeExpr::unit())
        .with_param(ParameterInfo::new("items", prim(Primitive::String)).vararg());
    assert_eq!(default_of(&function.signature_type()).expression, "{ _ -> }");
}

#[test]
fn failure_message_is_escaped() {
    let renderer = TypeRenderer::new();
    let erasure = Erasure::none();
    let synth = DefaultSynthesizer::new(&renderer, &erasure, "say \"$hi\"");
    assert_eq!(synth.failure(), "error(\"say \\\"\\$hi\\\"\")");
}

fn arb_type() -> impl Strategy<Value = TypeExpr> {
    let leaf = prop_oneof![
        proptest::sample::select(Primitive::ALL.to_vec()).prop_map(TypeExpr::Primitive),
        Just(user()),
        Just(TypeExpr::param("T")),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(TypeExpr::list),
            inner.clone().prop_map(TypeExpr::result),
            (proptest::collection::vec(inner.clone(), 0..3), inner.clone(), any::<bool>())
                .prop_map(|(params, ret, suspend)| TypeExpr::function(params, ret, suspend)),
            inner.prop_map(TypeExpr::nullable),
        ]
    })
}

proptest! {
    #[test]
    fn nullable_priority(ty in arb_type()) {
        let value = default_of(&ty.nullable());
        prop_assert_eq!(value.expression, "null");
        prop_assert!(value.is_safe);
    }

    #[test]
    fn unsafe_defaults_are_exactly_the_failure(ty in arb_type()) {
        let value = default_of(&ty);
        if !value.is_safe && !ty.is_function() {
            prop_assert_eq!(value.expression, FAILURE);
        }
    }
}
