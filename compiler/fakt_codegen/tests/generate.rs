//! End-to-end rendering of complete fake files.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]

use fakt_codegen::{generate, CodegenError, CodegenOptions};
use fakt_ir::{
    DeclarationAnalysis, DeclarationId, DeclarationKind, FunctionInfo, GenericPattern,
    ParameterInfo, Primitive, PropertyInfo, QualifiedName, TypeExpr, TypeParameterInfo,
};
use pretty_assertions::assert_eq;

fn interface(name: &str, functions: Vec<FunctionInfo>) -> DeclarationAnalysis {
    DeclarationAnalysis {
        id: DeclarationId::new(format!("com.example.{name}")),
        kind: DeclarationKind::Interface,
        package: "com.example".to_string(),
        name: name.to_string(),
        type_parameters: Vec::new(),
        pattern: GenericPattern::from_levels(
            false,
            functions.iter().any(|f| !f.type_parameters.is_empty()),
        ),
        functions,
        properties: Vec::new(),
    }
}

#[test]
fn complete_file_for_simple_interface() {
    let analysis = interface(
        "Clock",
        vec![FunctionInfo::new("now", TypeExpr::Primitive(Primitive::Long))],
    );
    let artifact = generate(&analysis, &CodegenOptions::default()).unwrap();

    let expected = r"// Generated by Fakt from com.example.Clock. Do not edit.
package com.example

import kotlinx.coroutines.flow.MutableStateFlow
import kotlinx.coroutines.flow.StateFlow
import kotlinx.coroutines.flow.update

class FakeClockImpl : Clock {
    private val _nowCallCount = MutableStateFlow(0)
    val nowCallCount: StateFlow<Int> get() = _nowCallCount
    private var nowBehavior: () -> Long = { 0L }

    override fun now(): Long {
        _nowCallCount.update { it + 1 }
        return nowBehavior()
    }

    internal fun configureNow(behavior: () -> Long) {
        nowBehavior = behavior
    }
}

fun fakeClock(configure: FakeClockConfig.() -> Unit = {}): FakeClockImpl {
    return FakeClockImpl().apply { FakeClockConfig(this).configure() }
}

class FakeClockConfig(private val fake: FakeClockImpl) {
    fun now(behavior: () -> Long) {
        fake.configureNow(behavior)
    }
}
";
    assert_eq!(artifact.assemble(), expected);
    assert_eq!(
        artifact.relative_path(),
        std::path::PathBuf::from("com/example/FakeClockImpl.kt")
    );
}

#[test]
fn banner_can_be_disabled() {
    let analysis = interface("Clock", vec![]);
    let artifact = generate(&analysis, &CodegenOptions { banner: false }).unwrap();
    assert!(artifact.assemble().starts_with("package com.example\n"));
}

#[test]
fn generation_is_deterministic() {
    let analysis = interface(
        "Store",
        vec![
            FunctionInfo::new("load", TypeExpr::named("java.util.UUID"))
                .with_param(ParameterInfo::new("key", TypeExpr::named("com.alpha.Key"))),
            FunctionInfo::new("keys", TypeExpr::list(TypeExpr::named("com.beta.Key"))),
        ],
    );
    let first = generate(&analysis, &CodegenOptions::default()).unwrap();
    let second = generate(&analysis, &CodegenOptions::default()).unwrap();
    assert_eq!(first.assemble(), second.assemble());
    assert!(first.imports.contains(&"com.alpha.Key".to_string()));
    assert!(first.assemble().contains("List<com.beta.Key>"));
}

#[test]
fn flow_default_imports_empty_flow() {
    let analysis = interface(
        "Events",
        vec![FunctionInfo::new(
            "stream",
            TypeExpr::generic(
                QualifiedName::new("kotlinx.coroutines.flow", "Flow"),
                vec![TypeExpr::Primitive(Primitive::String)],
            ),
        )],
    );
    let artifact = generate(&analysis, &CodegenOptions::default()).unwrap();
    assert!(artifact
        .imports
        .contains(&"kotlinx.coroutines.flow.emptyFlow".to_string()));
    assert!(artifact
        .imports
        .contains(&"kotlinx.coroutines.flow.Flow".to_string()));
    assert!(artifact
        .implementation
        .contains("private var streamBehavior: () -> Flow<String> = { emptyFlow() }\n"));
}

#[test]
fn class_fake_imports_nothing_for_defaults_it_never_emits() {
    let flow = TypeExpr::generic(
        QualifiedName::new("kotlinx.coroutines.flow", "Flow"),
        vec![TypeExpr::Primitive(Primitive::String)],
    );
    let mut analysis = interface(
        "Feed",
        vec![
            FunctionInfo::new("stream", flow.clone()),
            FunctionInfo::new("replay", flow.clone()).open(),
        ],
    );
    analysis.kind = DeclarationKind::Class;
    analysis.properties = vec![PropertyInfo::new("updates", flow).open()];

    let artifact = generate(&analysis, &CodegenOptions::default()).unwrap();
    assert!(!artifact
        .imports
        .contains(&"kotlinx.coroutines.flow.emptyFlow".to_string()));
    assert!(!artifact.assemble().contains("emptyFlow"));
}

#[test]
fn shadowed_result_default_uses_the_qualified_constructor() {
    let analysis = interface(
        "Outcomes",
        vec![
            FunctionInfo::new("a", TypeExpr::result(TypeExpr::Primitive(Primitive::Int))),
            FunctionInfo::new("b", TypeExpr::named("com.example.Result")),
        ],
    );
    let artifact = generate(&analysis, &CodegenOptions::default()).unwrap();
    assert!(artifact.implementation.contains(
        "private var aBehavior: () -> kotlin.Result<Int> = { kotlin.Result.success(0) }\n"
    ));
    assert!(artifact.implementation.contains("override fun b(): Result {\n"));
}

#[test]
fn overloads_get_distinct_configuration_methods() {
    let analysis = interface(
        "Logger",
        vec![
            FunctionInfo::new("log", TypeExpr::unit())
                .with_param(ParameterInfo::new("message", TypeExpr::Primitive(Primitive::String))),
            FunctionInfo::new("log", TypeExpr::unit())
                .with_param(ParameterInfo::new("code", TypeExpr::Primitive(Primitive::Int))),
        ],
    );
    let artifact = generate(&analysis, &CodegenOptions::default()).unwrap();
    assert!(artifact
        .configuration
        .contains("    fun logString(behavior: (String) -> Unit) {\n"));
    assert!(artifact
        .configuration
        .contains("    fun logInt(behavior: (Int) -> Unit) {\n"));
    assert!(artifact
        .implementation
        .contains("    override fun log(message: String) {\n"));
}

#[test]
fn generic_interface_configuration_is_generic() {
    let mut analysis = interface(
        "Repository",
        vec![FunctionInfo::new("save", TypeExpr::param("T"))
            .with_param(ParameterInfo::new("item", TypeExpr::param("T")))],
    );
    analysis.type_parameters = vec![TypeParameterInfo::new("T")];
    analysis.pattern = GenericPattern::ClassLevelGenerics;

    let artifact = generate(&analysis, &CodegenOptions::default()).unwrap();
    assert_eq!(
        artifact.configuration,
        "class FakeRepositoryConfig<T>(private val fake: FakeRepositoryImpl<T>) {\n    fun save(behavior: (T) -> T) {\n        fake.configureSave(behavior)\n    }\n}\n"
    );
    assert!(artifact
        .factory
        .starts_with("inline fun <reified T> fakeRepository("));
}

#[test]
fn method_level_configuration_keeps_original_types() {
    let analysis = interface(
        "Mapper",
        vec![FunctionInfo::new("map", TypeExpr::param("R"))
            .with_type_param(TypeParameterInfo::new("R"))
            .with_param(ParameterInfo::new(
                "raw",
                TypeExpr::Primitive(Primitive::String),
            ))],
    );
    let artifact = generate(&analysis, &CodegenOptions::default()).unwrap();
    assert!(artifact
        .configuration
        .contains("    fun <R> map(behavior: (String) -> R) {\n"));
}

#[test]
fn property_configuration_includes_setter() {
    let mut analysis = interface("Prefs", vec![]);
    analysis.properties = vec![
        PropertyInfo::new("enabled", TypeExpr::Primitive(Primitive::Boolean)).mutable(),
    ];
    let artifact = generate(&analysis, &CodegenOptions::default()).unwrap();
    assert_eq!(
        artifact.configuration,
        "class FakePrefsConfig(private val fake: FakePrefsImpl) {\n    fun enabled(behavior: () -> Boolean) {\n        fake.configureEnabled(behavior)\n    }\n\n    fun setEnabled(behavior: (Boolean) -> Unit) {\n        fake.configureSetEnabled(behavior)\n    }\n}\n"
    );
}

#[test]
fn invalid_identifiers_are_rejected() {
    let analysis = interface(
        "Broken",
        vec![FunctionInfo::new("not-a-name", TypeExpr::unit())],
    );
    assert_eq!(
        generate(&analysis, &CodegenOptions::default()),
        Err(CodegenError::InvalidIdentifier {
            declaration: "com.example.Broken".to_string(),
            name: "not-a-name".to_string(),
        })
    );
}

#[test]
fn duplicate_signatures_are_rejected() {
    let analysis = interface(
        "Twice",
        vec![
            FunctionInfo::new("run", TypeExpr::unit()),
            FunctionInfo::new("run", TypeExpr::unit()),
        ],
    );
    assert!(matches!(
        generate(&analysis, &CodegenOptions::default()),
        Err(CodegenError::DuplicateFunction { function, .. }) if function == "run"
    ));
}
