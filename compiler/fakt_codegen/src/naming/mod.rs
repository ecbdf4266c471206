//! Identifier naming for generated members.
//!
//! Every faked member gets a *slot*: a base name from which the behavior
//! field, the call counter and the configure method are derived. Slot bases
//! are unique within a file, and derived names never collide with a member
//! of the subject.

use std::borrow::Cow;

use fakt_ir::{DeclarationAnalysis, FunctionInfo, TypeExpr};
use rustc_hash::{FxHashMap, FxHashSet};

/// Kotlin hard keywords; these must be back-quoted when used as names.
const HARD_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Back-quote `name` if it is a hard keyword.
pub fn escape(name: &str) -> Cow<'_, str> {
    if HARD_KEYWORDS.contains(&name) {
        Cow::Owned(format!("`{name}`"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Whether `name` can be written as a Kotlin identifier (possibly back-quoted).
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Upper-case the first character.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Implementation class name: `Fake<Name>Impl`.
pub fn impl_class(declaration: &str) -> String {
    format!("Fake{declaration}Impl")
}

/// Configuration DSL class name: `Fake<Name>Config`.
pub fn config_class(declaration: &str) -> String {
    format!("Fake{declaration}Config")
}

/// Factory function name: `fake<Name>`.
pub fn factory_function(declaration: &str) -> String {
    format!("fake{declaration}")
}

/// Names derived from one member's slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    base: String,
}

impl Slot {
    fn new(base: String) -> Self {
        Slot { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Private behavior field.
    pub fn behavior(&self) -> String {
        format!("{}Behavior", self.base)
    }

    /// Public read-only call counter.
    pub fn counter(&self) -> String {
        format!("{}CallCount", self.base)
    }

    /// Private mutable counter state.
    pub fn counter_state(&self) -> String {
        format!("_{}CallCount", self.base)
    }

    /// Internal configure method.
    pub fn configure(&self) -> String {
        format!("configure{}", capitalize(&self.base))
    }

    /// Configuration DSL method.
    pub fn dsl(&self) -> Cow<'_, str> {
        escape(&self.base)
    }
}

/// Slots for every member of one declaration.
#[derive(Clone, Debug)]
pub struct SlotTable {
    functions: Vec<Slot>,
    getters: Vec<Slot>,
    setters: Vec<Option<Slot>>,
}

impl SlotTable {
    /// Assign slots: properties first (getter, then setter), then functions,
    /// each in declaration order. A clash gets a numeric suffix.
    pub fn build(analysis: &DeclarationAnalysis) -> Self {
        let mut allocator = Allocator::new(analysis);

        let mut getters = Vec::with_capacity(analysis.properties.len());
        let mut setters = Vec::with_capacity(analysis.properties.len());
        for property in &analysis.properties {
            getters.push(allocator.claim(property.name.clone()));
            setters.push(
                property
                    .is_mutable
                    .then(|| allocator.claim(format!("set{}", capitalize(&property.name)))),
            );
        }

        let mut overloads: FxHashMap<&str, usize> = FxHashMap::default();
        for function in &analysis.functions {
            *overloads.entry(function.name.as_str()).or_default() += 1;
        }
        let functions = analysis
            .functions
            .iter()
            .map(|function| {
                let base = if overloads[function.name.as_str()] > 1 {
                    overload_base(function)
                } else {
                    function.name.clone()
                };
                allocator.claim(base)
            })
            .collect();

        SlotTable {
            functions,
            getters,
            setters,
        }
    }

    /// Slot of the function at `index` in `analysis.functions`.
    pub fn function(&self, index: usize) -> &Slot {
        &self.functions[index]
    }

    /// Getter slot of the property at `index` in `analysis.properties`.
    pub fn getter(&self, index: usize) -> &Slot {
        &self.getters[index]
    }

    /// Setter slot, for mutable properties only.
    pub fn setter(&self, index: usize) -> Option<&Slot> {
        self.setters[index].as_ref()
    }
}

struct Allocator {
    claimed: FxHashSet<String>,
    member_properties: FxHashSet<String>,
    member_functions: FxHashSet<String>,
}

impl Allocator {
    fn new(analysis: &DeclarationAnalysis) -> Self {
        Allocator {
            claimed: FxHashSet::default(),
            member_properties: analysis.properties.iter().map(|p| p.name.clone()).collect(),
            member_functions: analysis.functions.iter().map(|f| f.name.clone()).collect(),
        }
    }

    fn is_free(&self, slot: &Slot) -> bool {
        !self.claimed.contains(&slot.base)
            && !self.member_properties.contains(&slot.behavior())
            && !self.member_properties.contains(&slot.counter())
            && !self.member_properties.contains(&slot.counter_state())
            && !self.member_functions.contains(&slot.configure())
    }

    fn claim(&mut self, base: String) -> Slot {
        let mut slot = Slot::new(base.clone());
        let mut suffix = 2;
        while !self.is_free(&slot) {
            slot = Slot::new(format!("{base}{suffix}"));
            suffix += 1;
        }
        self.claimed.insert(slot.base.clone());
        slot
    }
}

/// `<name><ParamSimpleNames>` for an overloaded function.
fn overload_base(function: &FunctionInfo) -> String {
    let mut base = function.name.clone();
    for param in &function.parameters {
        base.push_str(&capitalize(&type_token(&param.value_type())));
    }
    base
}

fn type_token(ty: &TypeExpr) -> String {
    if let Some(projected) = ty.out_projected() {
        return type_token(projected);
    }
    match ty {
        TypeExpr::Primitive(p) => p.name().to_string(),
        TypeExpr::Nullable(inner) => type_token(inner),
        TypeExpr::Generic { name, .. } => name.short().to_string(),
        TypeExpr::Function { .. } => "Function".to_string(),
        TypeExpr::TypeParam(name) => name.clone(),
        TypeExpr::Named(name) if name.simple() == "*" => "Star".to_string(),
        TypeExpr::Named(name) => name.short().to_string(),
    }
}
