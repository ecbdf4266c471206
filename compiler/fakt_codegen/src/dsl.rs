//! Configuration DSL generator.
//!
//! The DSL methods take the original, non-erased member types. They are the
//! only public way to install a behavior, which is what keeps the casts in
//! the implementation class sound.

use fakt_ir::{DeclarationAnalysis, TypeExpr};
use fakt_types::TypeRenderer;

use crate::context::CodegenContext;
use crate::naming::{self, Slot, SlotTable};

struct DslMethod<'a> {
    slot: &'a Slot,
    type_parameters: String,
    behavior: String,
    where_clause: String,
}

/// Render `class Fake<Name>Config(private val fake: Fake<Name>Impl)`.
pub fn render_configuration(
    ctx: &mut CodegenContext<'_>,
    analysis: &DeclarationAnalysis,
    slots: &SlotTable,
) {
    let renderer = ctx.renderer;
    let params = analysis.class_type_parameters();
    ctx.open(&format!(
        "class {}{}(private val fake: {}{}){}",
        naming::config_class(&analysis.name),
        renderer.type_parameters(params, false),
        naming::impl_class(&analysis.name),
        TypeRenderer::type_arguments(params),
        renderer.where_clause(params),
    ));

    let mut methods = Vec::new();
    for (index, property) in analysis.properties.iter().enumerate() {
        let getter = TypeExpr::function(Vec::new(), property.ty.clone(), false);
        methods.push(DslMethod {
            slot: slots.getter(index),
            type_parameters: String::new(),
            behavior: renderer.render(&getter),
            where_clause: String::new(),
        });
        if let Some(setter) = slots.setter(index) {
            let setter_type =
                TypeExpr::function(vec![property.ty.clone()], TypeExpr::unit(), false);
            methods.push(DslMethod {
                slot: setter,
                type_parameters: String::new(),
                behavior: renderer.render(&setter_type),
                where_clause: String::new(),
            });
        }
    }
    for (index, function) in analysis.functions.iter().enumerate() {
        let list = renderer.type_parameters(&function.type_parameters, false);
        methods.push(DslMethod {
            slot: slots.function(index),
            type_parameters: if list.is_empty() { list } else { format!("{list} ") },
            behavior: renderer.render(&function.signature_type()),
            where_clause: renderer.where_clause(&function.type_parameters),
        });
    }

    for (i, method) in methods.iter().enumerate() {
        if i > 0 {
            ctx.newline();
        }
        ctx.open(&format!(
            "fun {}{}(behavior: {}){}",
            method.type_parameters,
            method.slot.dsl(),
            method.behavior,
            method.where_clause
        ));
        ctx.writeln(&format!("fake.{}(behavior)", method.slot.configure()));
        ctx.close();
    }

    ctx.close();
}
