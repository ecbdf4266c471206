//! Factory function generator.

use fakt_ir::DeclarationAnalysis;
use fakt_types::TypeRenderer;

use crate::context::CodegenContext;
use crate::naming;

/// Render `fake<Name>(configure: ...)`.
///
/// With class-level generics the factory is `inline` and the parameters are
/// `reified`.
///
/// ```kotlin
/// inline fun <reified T> fakeRepository(configure: FakeRepositoryConfig<T>.() -> Unit = {}): FakeRepositoryImpl<T> {
///     return FakeRepositoryImpl<T>().apply { FakeRepositoryConfig<T>(this).configure() }
/// }
/// ```
pub fn render_factory(ctx: &mut CodegenContext<'_>, analysis: &DeclarationAnalysis) {
    let renderer = ctx.renderer;
    let params = analysis.class_type_parameters();
    let args = TypeRenderer::type_arguments(params);
    let impl_type = format!("{}{args}", naming::impl_class(&analysis.name));
    let config_type = format!("{}{args}", naming::config_class(&analysis.name));

    let prefix = if !analysis.pattern.has_class_level() {
        "fun ".to_string()
    } else {
        format!("inline fun {} ", renderer.type_parameters(params, true))
    };
    ctx.open(&format!(
        "{prefix}{}(configure: {config_type}.() -> Unit = {{}}): {impl_type}{}",
        naming::factory_function(&analysis.name),
        renderer.where_clause(params),
    ));
    ctx.writeln(&format!(
        "return {impl_type}().apply {{ {config_type}(this).configure() }}"
    ));
    ctx.close();
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakt_ir::{
        DeclarationId, DeclarationKind, GenericPattern, TypeExpr, TypeParameterInfo,
    };
    use pretty_assertions::assert_eq;

    fn analysis(type_parameters: Vec<TypeParameterInfo>) -> DeclarationAnalysis {
        DeclarationAnalysis {
            id: DeclarationId::new("com.example.Repository"),
            kind: DeclarationKind::Interface,
            package: "com.example".to_string(),
            name: "Repository".to_string(),
            pattern: GenericPattern::from_levels(!type_parameters.is_empty(), false),
            type_parameters,
            functions: Vec::new(),
            properties: Vec::new(),
        }
    }

    fn render(analysis: &DeclarationAnalysis) -> String {
        let renderer = TypeRenderer::new();
        let mut ctx = CodegenContext::new(&renderer, 256);
        render_factory(&mut ctx, analysis);
        ctx.take_output()
    }

    #[test]
    fn plain_factory() {
        assert_eq!(
            render(&analysis(vec![])),
            "fun fakeRepository(configure: FakeRepositoryConfig.() -> Unit = {}): FakeRepositoryImpl {\n    return FakeRepositoryImpl().apply { FakeRepositoryConfig(this).configure() }\n}\n"
        );
    }

    #[test]
    fn generic_factory_is_reified() {
        let out = render(&analysis(vec![TypeParameterInfo::new("T")
            .with_bound(TypeExpr::named("com.example.Entity"))]));
        assert_eq!(
            out,
            "inline fun <reified T : Entity> fakeRepository(configure: FakeRepositoryConfig<T>.() -> Unit = {}): FakeRepositoryImpl<T> {\n    return FakeRepositoryImpl<T>().apply { FakeRepositoryConfig<T>(this).configure() }\n}\n"
        );
    }

    #[test]
    fn multiple_bounds_use_where_clause() {
        let out = render(&analysis(vec![TypeParameterInfo::new("T")
            .with_bound(TypeExpr::named("com.example.Entity"))
            .with_bound(TypeExpr::named("java.io.Serializable"))]));
        assert!(out.starts_with(
            "inline fun <reified T> fakeRepository(configure: FakeRepositoryConfig<T>.() -> Unit = {}): FakeRepositoryImpl<T> where T : Entity, T : Serializable {\n"
        ));
    }
}
