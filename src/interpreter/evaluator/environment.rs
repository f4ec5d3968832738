use std::{collections::HashMap, rc::Rc};

use tracing::trace;

use crate::{
    ast::{FuncDeclaration, ValueType},
    error::Fault,
    interpreter::value::core::Object,
};

/// What construct opened a scope.
///
/// `break` looks for the nearest `Loop`, `remit` for the nearest
/// `Conditional`, and neither may look past a `Function` boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// The global scope or a bare `{ }` block.
    None,
    /// The body of an `if`, `elif` or `else`.
    Conditional,
    /// A `while` or `for` loop.
    Loop,
    /// A function call.
    Function,
}

/// A named slot in a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The current value.
    pub object:  Object,
    /// The declared type every assigned value must match.
    pub ty:      ValueType,
    /// `false` for `constant` declarations.
    pub mutable: bool,
}

#[derive(Debug)]
struct Frame {
    kind:      ScopeKind,
    values:    HashMap<String, Binding>,
    functions: HashMap<String, Rc<FuncDeclaration>>,
}

impl Frame {
    fn new(kind: ScopeKind) -> Self {
        Self { kind,
               values: HashMap::new(),
               functions: HashMap::new() }
    }
}

/// The runtime scope chain.
///
/// Scopes form a stack: the bottom entry is the global scope and is never
/// removed, the top entry is the current scope. Lookups walk from the top
/// down, so inner declarations shadow outer ones.
#[derive(Debug)]
pub struct Environment {
    scope_stack: Vec<Frame>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only the global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scope_stack: vec![Frame::new(ScopeKind::None)] }
    }

    /// Enters a new innermost scope.
    pub fn push(&mut self, kind: ScopeKind) {
        self.scope_stack.push(Frame::new(kind));
        trace!(?kind, depth = self.depth(), "push scope");
    }

    /// Leaves the innermost scope, discarding its bindings.
    ///
    /// The global scope is never popped.
    pub fn pop(&mut self) {
        if self.scope_stack.len() > 1
           && let Some(frame) = self.scope_stack.pop()
        {
            trace!(kind = ?frame.kind, depth = self.depth(), "pop scope");
        }
    }

    /// Number of scopes on the chain, global included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scope_stack.len()
    }

    /// Whether a scope of `kind` is active without crossing a function
    /// boundary.
    #[must_use]
    pub fn within(&self, kind: ScopeKind) -> bool {
        for frame in self.scope_stack.iter().rev() {
            if frame.kind == kind {
                return true;
            }
            if frame.kind == ScopeKind::Function {
                return false;
            }
        }
        false
    }

    /// Binds `name` in the current scope, replacing a binding of the same
    /// name in that scope only.
    pub fn define(&mut self, name: &str, binding: Binding) {
        if let Some(frame) = self.scope_stack.last_mut() {
            frame.values.insert(name.to_string(), binding);
        }
    }

    /// Looks `name` up along the chain.
    ///
    /// Returns `Error(UndefinedVar)` when no scope binds it.
    #[must_use]
    pub fn get(&self, name: &str) -> Object {
        self.binding(name)
            .map_or(Object::Error(Fault::UndefinedVar), |binding| binding.object.clone())
    }

    /// The nearest binding of `name`.
    #[must_use]
    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.scope_stack.iter().rev().find_map(|frame| frame.values.get(name))
    }

    /// Overwrites the value of `name` in the nearest scope that binds it.
    ///
    /// # Errors
    /// `UndefinedVar` if no scope binds `name`.
    pub fn update(&mut self, name: &str, object: Object) -> Result<(), Fault> {
        let binding = self.scope_stack
                          .iter_mut()
                          .rev()
                          .find_map(|frame| frame.values.get_mut(name))
                          .ok_or(Fault::UndefinedVar)?;
        binding.object = object;
        Ok(())
    }

    /// Whether any scope on the chain binds `name`.
    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.binding(name).is_some()
    }

    /// Whether the current scope itself binds `name`.
    #[must_use]
    pub fn found(&self, name: &str) -> bool {
        self.scope_stack.last().is_some_and(|frame| frame.values.contains_key(name))
    }

    /// Registers a function in the current scope.
    pub fn define_function(&mut self, function: Rc<FuncDeclaration>) {
        if let Some(frame) = self.scope_stack.last_mut() {
            frame.functions.insert(function.name.clone(), function);
        }
    }

    /// Resolves a function along the chain.
    ///
    /// # Errors
    /// `UndefinedFunc` if no scope declares `name`.
    pub fn get_function(&self, name: &str) -> Result<Rc<FuncDeclaration>, Fault> {
        self.scope_stack
            .iter()
            .rev()
            .find_map(|frame| frame.functions.get(name))
            .cloned()
            .ok_or(Fault::UndefinedFunc)
    }

    /// Whether any scope on the chain declares a function called `name`.
    #[must_use]
    pub fn is_function_defined(&self, name: &str) -> bool {
        self.get_function(name).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn int_binding(v: i64) -> Binding {
        Binding { object:  Object::Int(v),
                  ty:      ValueType::Int,
                  mutable: true, }
    }

    #[test]
    fn inner_scope_shadows_and_pops() {
        let mut env = Environment::new();
        env.define("x", int_binding(1));
        env.push(ScopeKind::None);
        env.define("x", int_binding(2));
        assert_eq!(env.get("x"), Object::Int(2));
        env.pop();
        assert_eq!(env.get("x"), Object::Int(1));
    }

    #[test]
    fn update_writes_the_owning_scope() {
        let mut env = Environment::new();
        env.define("x", int_binding(1));
        env.push(ScopeKind::Loop);
        assert!(!env.found("x"));
        assert!(env.is_defined("x"));
        env.update("x", Object::Int(5)).unwrap();
        env.pop();
        assert_eq!(env.get("x"), Object::Int(5));
    }

    #[test]
    fn missing_names_fault() {
        let mut env = Environment::new();
        assert_eq!(env.get("nope"), Object::Error(Fault::UndefinedVar));
        assert_eq!(env.update("nope", Object::Void), Err(Fault::UndefinedVar));
        assert_eq!(env.get_function("f").unwrap_err(), Fault::UndefinedFunc);
    }

    #[test]
    fn global_scope_is_never_popped() {
        let mut env = Environment::new();
        env.define("x", int_binding(1));
        env.pop();
        assert_eq!(env.depth(), 1);
        assert!(env.is_defined("x"));
    }

    #[test]
    fn within_stops_at_function_boundary() {
        let mut env = Environment::new();
        env.push(ScopeKind::Loop);
        env.push(ScopeKind::Conditional);
        assert!(env.within(ScopeKind::Loop));
        env.push(ScopeKind::Function);
        assert!(!env.within(ScopeKind::Loop));
        assert!(env.within(ScopeKind::Function));
    }
}
