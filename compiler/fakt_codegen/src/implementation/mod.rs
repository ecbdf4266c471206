//! Implementation class generator.
//!
//! Per member:
//!
//! ```kotlin
//! private val _getUserCallCount = MutableStateFlow(0)
//! val getUserCallCount: StateFlow<Int> get() = _getUserCallCount
//!
//! private var getUserBehavior: suspend (String) -> User = { _ -> error("...") }
//!
//! override suspend fun getUser(id: String): User {
//!     _getUserCallCount.update { it + 1 }
//!     return getUserBehavior(id)
//! }
//!
//! internal fun configureGetUser(behavior: suspend (String) -> User) {
//!     getUserBehavior = behavior
//! }
//! ```
//!
//! Method-level type parameters are stored erased. The override widens
//! arguments and narrows the result; `configure` widens the installed
//! behavior. Both carry `@Suppress("UNCHECKED_CAST")`.

use fakt_ir::{
    DeclarationAnalysis, DeclarationKind, FunctionInfo, MemberModality, PropertyInfo,
    QualifiedName, TypeExpr,
};
use fakt_types::{DefaultSynthesizer, Erasure, TypeRenderer};

use crate::context::CodegenContext;
use crate::naming::{self, escape, Slot, SlotTable};

const UNCHECKED_CAST: &str = "@Suppress(\"UNCHECKED_CAST\")";

/// Render the implementation class.
pub fn render_implementation(
    ctx: &mut CodegenContext<'_>,
    analysis: &DeclarationAnalysis,
    slots: &SlotTable,
) {
    let renderer = ctx.renderer;
    let subject = QualifiedName::new(analysis.package.as_str(), analysis.name.as_str());
    let constructor_call = match analysis.kind {
        DeclarationKind::Interface => "",
        DeclarationKind::Class => "()",
    };
    let class_params = analysis.class_type_parameters();
    ctx.open(&format!(
        "class {}{} : {}{}{}{}",
        naming::impl_class(&analysis.name),
        renderer.type_parameters(class_params, false),
        renderer.name(&subject),
        TypeRenderer::type_arguments(class_params),
        constructor_call,
        renderer.where_clause(class_params),
    ));

    let mut first = true;
    for (index, property) in analysis.properties.iter().enumerate() {
        if !first {
            ctx.newline();
        }
        first = false;
        render_property(ctx, analysis, property, slots.getter(index), slots.setter(index));
    }
    for (index, function) in analysis.functions.iter().enumerate() {
        if !first {
            ctx.newline();
        }
        first = false;
        render_function(ctx, analysis, function, slots.function(index));
    }

    ctx.close();
}

/// Imports that synthesized defaults need, computed with a plain renderer
/// before the file's import set exists. Members that start out delegating to
/// `super` or failing loudly contribute nothing.
pub fn default_value_imports(analysis: &DeclarationAnalysis) -> Vec<QualifiedName> {
    let renderer = TypeRenderer::new();
    let mut imports = Vec::new();
    for function in &analysis.functions {
        if function_initial(analysis, function) != Initial::Synthesized {
            continue;
        }
        let erasure = member_erasure(analysis, function);
        let synth = DefaultSynthesizer::new(&renderer, &erasure, "");
        imports.extend(synth.value(&function.signature_type()).imports);
    }
    let erasure = Erasure::none();
    let synth = DefaultSynthesizer::new(&renderer, &erasure, "");
    for property in &analysis.properties {
        if property_initial(analysis, property) == Initial::Synthesized {
            imports.extend(synth.value(&getter_type(property)).imports);
        }
    }
    imports
}

/// Where a member's behavior comes from before anything is configured.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Initial {
    /// Forward to the supertype implementation.
    Super,
    /// Throw until configured.
    Unconfigured,
    /// A synthesized safe default, or the fail-loudly expression when the
    /// type has none.
    Synthesized,
}

/// Open functions delegate unless a bounded type parameter would have to be
/// pinned to `Any?` at the `super` call.
fn function_initial(analysis: &DeclarationAnalysis, function: &FunctionInfo) -> Initial {
    if function.modality == MemberModality::Open && !function.has_bounded_type_parameters() {
        Initial::Super
    } else if analysis.kind == DeclarationKind::Class {
        Initial::Unconfigured
    } else {
        Initial::Synthesized
    }
}

fn property_initial(analysis: &DeclarationAnalysis, property: &PropertyInfo) -> Initial {
    match (property.modality, analysis.kind) {
        (MemberModality::Open, _) => Initial::Super,
        (MemberModality::Abstract, DeclarationKind::Class) => Initial::Unconfigured,
        (MemberModality::Abstract, DeclarationKind::Interface) => Initial::Synthesized,
    }
}

/// Storage erasure for one function. Only patterns with method-level
/// generics erase anything.
fn member_erasure(analysis: &DeclarationAnalysis, function: &FunctionInfo) -> Erasure {
    if analysis.pattern.needs_erasure() {
        Erasure::for_function(function)
    } else {
        Erasure::none()
    }
}

fn getter_type(property: &PropertyInfo) -> TypeExpr {
    TypeExpr::function(Vec::new(), property.ty.clone(), false)
}

fn setter_type(property: &PropertyInfo) -> TypeExpr {
    TypeExpr::function(vec![property.ty.clone()], TypeExpr::unit(), false)
}

fn unconfigured_message(analysis: &DeclarationAnalysis, member: &str, slot: &Slot) -> String {
    format!(
        "{decl}.{member} is not configured. Set it with {factory} {{ {dsl} {{ ... }} }}",
        decl = analysis.name,
        factory = naming::factory_function(&analysis.name),
        dsl = slot.dsl(),
    )
}

/// `{ _, _ -> <failure> }` with the given arity.
fn failing_closure(arity: usize, failure: &str) -> String {
    if arity == 0 {
        format!("{{ {failure} }}")
    } else {
        format!("{{ {} -> {failure} }}", vec!["_"; arity].join(", "))
    }
}

fn render_counter(ctx: &mut CodegenContext<'_>, slot: &Slot) {
    ctx.writeln(&format!(
        "private val {} = MutableStateFlow(0)",
        slot.counter_state()
    ));
    ctx.writeln(&format!(
        "val {}: StateFlow<Int> get() = {}",
        slot.counter(),
        slot.counter_state()
    ));
}

fn render_configure(
    ctx: &mut CodegenContext<'_>,
    slot: &Slot,
    type_parameters: &str,
    where_clause: &str,
    original: &str,
    storage: Option<&str>,
) {
    if storage.is_some() {
        ctx.writeln(UNCHECKED_CAST);
    }
    ctx.open(&format!(
        "internal fun {type_parameters}{}(behavior: {original}){where_clause}",
        slot.configure()
    ));
    match storage {
        Some(storage) => ctx.writeln(&format!("{} = behavior as {storage}", slot.behavior())),
        None => ctx.writeln(&format!("{} = behavior", slot.behavior())),
    }
    ctx.close();
}

fn render_property(
    ctx: &mut CodegenContext<'_>,
    analysis: &DeclarationAnalysis,
    property: &PropertyInfo,
    getter: &Slot,
    setter: Option<&Slot>,
) {
    let renderer = ctx.renderer;
    let name = escape(&property.name);
    let value_type = renderer.render(&property.ty);
    let getter_fn = renderer.render(&getter_type(property));

    let erasure = Erasure::none();
    let synth = DefaultSynthesizer::new(
        renderer,
        &erasure,
        &unconfigured_message(analysis, &property.name, getter),
    );
    let getter_default = match property_initial(analysis, property) {
        Initial::Super => format!("{{ super.{name} }}"),
        Initial::Unconfigured => failing_closure(0, synth.failure()),
        Initial::Synthesized => synth.value(&getter_type(property)).expression,
    };

    render_counter(ctx, getter);
    if let Some(setter) = setter {
        render_counter(ctx, setter);
    }
    ctx.writeln(&format!(
        "private var {}: {getter_fn} = {getter_default}",
        getter.behavior()
    ));
    if let Some(setter) = setter {
        let setter_default = match property.modality {
            MemberModality::Open => format!("{{ value -> super.{name} = value }}"),
            MemberModality::Abstract => {
                format!("{{ value -> {} = {{ value }} }}", getter.behavior())
            }
        };
        ctx.writeln(&format!(
            "private var {}: {} = {setter_default}",
            setter.behavior(),
            renderer.render(&setter_type(property))
        ));
    }
    ctx.newline();

    let keyword = if property.is_mutable { "var" } else { "val" };
    ctx.writeln(&format!("override {keyword} {name}: {value_type}"));
    ctx.indent();
    ctx.open("get()");
    ctx.writeln(&format!("{}.update {{ it + 1 }}", getter.counter_state()));
    ctx.writeln(&format!("return {}()", getter.behavior()));
    ctx.close();
    if let Some(setter) = setter {
        ctx.open("set(value)");
        ctx.writeln(&format!("{}.update {{ it + 1 }}", setter.counter_state()));
        ctx.writeln(&format!("{}(value)", setter.behavior()));
        ctx.close();
    }
    ctx.dedent();
    ctx.newline();

    render_configure(ctx, getter, "", "", &getter_fn, None);
    if let Some(setter) = setter {
        ctx.newline();
        let setter_fn = renderer.render(&setter_type(property));
        render_configure(ctx, setter, "", "", &setter_fn, None);
    }
}

fn render_function(
    ctx: &mut CodegenContext<'_>,
    analysis: &DeclarationAnalysis,
    function: &FunctionInfo,
    slot: &Slot,
) {
    let renderer = ctx.renderer;
    let erasure = member_erasure(analysis, function);
    let original = function.signature_type();
    let storage = erasure.storage(&original);
    let original_text = renderer.render(&original);
    let storage_text = renderer.render(&storage);
    let erased_storage = storage != original;

    let synth = DefaultSynthesizer::new(
        renderer,
        &erasure,
        &unconfigured_message(analysis, &function.name, slot),
    );
    let default = match function_initial(analysis, function) {
        Initial::Super => super_delegation(function),
        Initial::Unconfigured => failing_closure(function.parameters.len(), synth.failure()),
        Initial::Synthesized => synth.value(&original).expression,
    };

    let type_parameters = {
        let list = renderer.type_parameters(&function.type_parameters, false);
        if list.is_empty() {
            list
        } else {
            format!("{list} ")
        }
    };
    let where_clause = renderer.where_clause(&function.type_parameters);

    render_counter(ctx, slot);
    ctx.writeln(&format!(
        "private var {}: {storage_text} = {default}",
        slot.behavior()
    ));
    ctx.newline();

    // Override
    let mut any_cast = false;
    let params: Vec<String> = function
        .parameters
        .iter()
        .map(|p| {
            let vararg = if p.is_vararg { "vararg " } else { "" };
            format!("{vararg}{}: {}", escape(&p.name), renderer.render(&p.ty))
        })
        .collect();
    let args: Vec<String> = function
        .parameters
        .iter()
        .map(|p| {
            let value_type = p.value_type();
            if erasure.touches(&value_type) {
                any_cast = true;
                format!(
                    "{} as {}",
                    escape(&p.name),
                    renderer.render(&erasure.storage(&value_type))
                )
            } else {
                escape(&p.name).into_owned()
            }
        })
        .collect();
    let returns_unit = function.return_type.is_unit();
    let narrow_result = !returns_unit && erasure.touches(&function.return_type);
    any_cast |= narrow_result;

    let suspend = if function.is_suspend { "suspend " } else { "" };
    let return_clause = if returns_unit {
        String::new()
    } else {
        format!(": {}", renderer.render(&function.return_type))
    };
    if any_cast {
        ctx.writeln(UNCHECKED_CAST);
    }
    ctx.open(&format!(
        "override {suspend}fun {type_parameters}{}({}){return_clause}{where_clause}",
        escape(&function.name),
        params.join(", "),
    ));
    ctx.writeln(&format!("{}.update {{ it + 1 }}", slot.counter_state()));
    let call = format!("{}({})", slot.behavior(), args.join(", "));
    if returns_unit {
        ctx.writeln(&call);
    } else if narrow_result {
        ctx.writeln(&format!(
            "return {call} as {}",
            renderer.render(&function.return_type)
        ));
    } else {
        ctx.writeln(&format!("return {call}"));
    }
    ctx.close();
    ctx.newline();

    render_configure(
        ctx,
        slot,
        &type_parameters,
        &where_clause,
        &original_text,
        erased_storage.then_some(storage_text.as_str()),
    );
}

/// Default behavior of an open function: forward to the supertype.
///
/// Erased type parameters are pinned to `Any?` at the call.
fn super_delegation(function: &FunctionInfo) -> String {
    let names: Vec<String> = function
        .parameters
        .iter()
        .map(|p| escape(&p.name).into_owned())
        .collect();
    let args: Vec<String> = function
        .parameters
        .iter()
        .zip(&names)
        .map(|(p, name)| {
            if p.is_vararg {
                format!("*{name}")
            } else {
                name.clone()
            }
        })
        .collect();
    let type_args = if function.type_parameters.is_empty() {
        String::new()
    } else {
        format!("<{}>", vec!["Any?"; function.type_parameters.len()].join(", "))
    };
    let call = format!(
        "super.{}{type_args}({})",
        escape(&function.name),
        args.join(", ")
    );
    if names.is_empty() {
        format!("{{ {call} }}")
    } else {
        format!("{{ {} -> {call} }}", names.join(", "))
    }
}
