//! Analysis context: scope chain, value bindings and the incident log
//!
//! One context belongs to one compilation unit. Scopes follow strict stack
//! discipline: a scope only lives while the callback that opened it runs.

use std::collections::{HashMap, HashSet};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use log::{debug, trace};

use crate::frontend::node::NodeRef;
use crate::frontend::symbols::{DocumentSymbols, FunctionDeclaration};
use crate::types::{AddressSpace, ConstantValue, FixedState, Type};
use crate::utils::{Error, Result};

// ==================== Scopes ====================

/// Kind of a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Function,
    Loop,
    Switch,
    /// New symbol level without any control flow boundary, e.g. a bare block
    Inherit,
}

/// The node that opened a scope
#[derive(Debug, Clone)]
pub enum ScopeOwner {
    Document(NodeRef),
    Function {
        node: NodeRef,
        declaration: Rc<FunctionDeclaration>,
    },
    Node(NodeRef),
}

impl ScopeOwner {
    pub fn node(&self) -> NodeRef {
        match self {
            Self::Document(node) | Self::Node(node) => *node,
            Self::Function { node, .. } => *node,
        }
    }
}

/// A named value visible in a scope
#[derive(Debug, Clone, PartialEq)]
pub struct ValueBinding {
    pub name: String,
    pub ty: Type,
    pub fixed_state: FixedState,
    pub address_space: AddressSpace,
    pub constant_value: Option<ConstantValue>,
}

/// A scope containing value bindings
#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    owner: ScopeOwner,
    symbols: HashMap<String, ValueBinding>,
}

// ==================== Incidents ====================

/// A non-fatal diagnostic
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    pub message: String,
    pub node: Option<NodeRef>,
}

// ==================== Context ====================

/// Per compilation unit analysis state
#[derive(Debug, Default)]
pub struct Context {
    document: Option<NodeRef>,
    /// Active scope chain, innermost last. Each entry's parent is the one before it.
    scopes: Vec<Scope>,
    incidents: Vec<Incident>,
    symbols: DocumentSymbols,
    used_symbols: HashSet<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document. Opens the global scope it owns.
    pub fn set_document(&mut self, document: NodeRef) -> Result<()> {
        if self.document.is_some() {
            return Err(Error::DocumentAlreadySet);
        }

        self.document = Some(document);
        self.scopes.push(Scope {
            kind: ScopeKind::Global,
            owner: ScopeOwner::Document(document),
            symbols: HashMap::new(),
        });
        Ok(())
    }

    pub fn document(&self) -> Option<NodeRef> {
        self.document
    }

    /// Open a scope for the duration of `body`.
    ///
    /// The previous scope is restored when `body` returns, including on error
    /// or unwinding.
    pub fn push_scope<T>(
        &mut self,
        kind: ScopeKind,
        owner: ScopeOwner,
        body: impl FnOnce(&mut Context) -> Result<T>,
    ) -> Result<T> {
        let mut guard = self.enter_scope(kind, owner)?;
        body(&mut *guard)
    }

    /// Open a scope that is closed when the returned guard is dropped.
    pub fn enter_scope(&mut self, kind: ScopeKind, owner: ScopeOwner) -> Result<ScopeGuard<'_>> {
        if self.document.is_none() {
            return Err(Error::DocumentNotSet);
        }

        trace!("enter {:?} scope of {}", kind, owner.node().kind);
        self.scopes.push(Scope {
            kind,
            owner,
            symbols: HashMap::new(),
        });
        Ok(ScopeGuard { context: self })
    }

    /// Add a value to the innermost scope.
    pub fn add_value(&mut self, binding: ValueBinding) -> Result<()> {
        let scope = self.scopes.last_mut().ok_or(Error::DocumentNotSet)?;
        if scope.symbols.contains_key(&binding.name) {
            return Err(Error::DuplicateInScope { name: binding.name });
        }

        scope.symbols.insert(binding.name.clone(), binding);
        Ok(())
    }

    /// Look up a value, searching from the innermost scope outward.
    pub fn get_value(&self, name: &str) -> Option<&ValueBinding> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.symbols.get(name))
    }

    /// Look up a value only in the innermost scope
    pub fn get_local_value(&self, name: &str) -> Option<&ValueBinding> {
        self.scopes.last().and_then(|scope| scope.symbols.get(name))
    }

    /// Owner of the nearest enclosing scope of the given kind.
    pub fn has_scope(&self, kind: ScopeKind) -> Option<&ScopeOwner> {
        self.scopes
            .iter()
            .rev()
            .find(|scope| scope.kind == kind)
            .map(|scope| &scope.owner)
    }

    /// Number of open scopes, the global scope included
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Record a non-fatal diagnostic
    pub fn push_incident(&mut self, message: impl Into<String>, node: Option<NodeRef>) {
        let message = message.into();
        match node {
            Some(node) => debug!("incident at {} ({}): {}", node.range, node.kind, message),
            None => debug!("incident: {}", message),
        }
        self.incidents.push(Incident { message, node });
    }

    /// Incidents in order of discovery
    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn symbols(&self) -> &DocumentSymbols {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut DocumentSymbols {
        &mut self.symbols
    }

    /// Mark a symbol as used
    pub fn register_symbol_usage(&mut self, name: &str) {
        if !self.used_symbols.contains(name) {
            self.used_symbols.insert(name.to_string());
        }
    }

    pub fn used_symbols(&self) -> &HashSet<String> {
        &self.used_symbols
    }
}

/// Keeps a scope open. Dropping it restores the previous scope.
pub struct ScopeGuard<'c> {
    context: &'c mut Context,
}

impl Deref for ScopeGuard<'_> {
    type Target = Context;

    fn deref(&self) -> &Context {
        self.context
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Context {
        self.context
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        if let Some(scope) = self.context.scopes.pop() {
            trace!("leave {:?} scope of {}", scope.kind, scope.owner.node().kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::SourceRange;
    use pretty_assertions::assert_eq;

    fn node(kind: &'static str) -> NodeRef {
        NodeRef { kind, range: SourceRange::dummy() }
    }

    fn binding(name: &str, ty: Type) -> ValueBinding {
        ValueBinding {
            name: name.to_string(),
            ty,
            fixed_state: FixedState::Variable,
            address_space: AddressSpace::Function,
            constant_value: None,
        }
    }

    fn document_context() -> Context {
        let mut context = Context::new();
        context.set_document(node("document")).unwrap();
        context
    }

    #[test]
    fn test_document_set_once() {
        let mut context = document_context();
        assert_eq!(context.set_document(node("document")), Err(Error::DocumentAlreadySet));
    }

    #[test]
    fn test_scope_requires_document() {
        let mut context = Context::new();
        let result = context.push_scope(ScopeKind::Inherit, ScopeOwner::Node(node("block")), |_| Ok(()));
        assert_eq!(result, Err(Error::DocumentNotSet));
        assert_eq!(context.add_value(binding("x", Type::I32)), Err(Error::DocumentNotSet));
    }

    #[test]
    fn test_shadowing() {
        let mut context = document_context();
        context.add_value(binding("x", Type::I32)).unwrap();

        for kind in [ScopeKind::Inherit, ScopeKind::Loop, ScopeKind::Function] {
            context
                .push_scope(kind, ScopeOwner::Node(node("block")), |inner| {
                    inner.add_value(binding("x", Type::F32))?;
                    assert_eq!(inner.get_value("x").unwrap().ty, Type::F32);
                    Ok(())
                })
                .unwrap();
            assert_eq!(context.get_value("x").unwrap().ty, Type::I32);
        }
    }

    #[test]
    fn test_duplicate_in_same_scope() {
        let mut context = document_context();
        context.add_value(binding("x", Type::I32)).unwrap();
        assert_eq!(
            context.add_value(binding("x", Type::I32)),
            Err(Error::DuplicateInScope { name: "x".to_string() })
        );

        let nested = context.push_scope(ScopeKind::Inherit, ScopeOwner::Node(node("block")), |inner| {
            inner.add_value(binding("x", Type::U32))
        });
        assert!(nested.is_ok());
    }

    #[test]
    fn test_scope_restored_after_error() {
        let mut context = document_context();
        let depth = context.scope_depth();
        let result: Result<()> = context.push_scope(ScopeKind::Loop, ScopeOwner::Node(node("while")), |inner| {
            inner.add_value(binding("i", Type::I32))?;
            inner.add_value(binding("i", Type::I32))
        });

        assert!(result.is_err());
        assert_eq!(context.scope_depth(), depth);
        assert!(context.get_value("i").is_none());
    }

    #[test]
    fn test_has_scope_skips_inherit_levels() {
        let mut context = document_context();
        context
            .push_scope(ScopeKind::Loop, ScopeOwner::Node(node("while")), |outer| {
                outer.push_scope(ScopeKind::Inherit, ScopeOwner::Node(node("block")), |inner| {
                    assert_eq!(inner.has_scope(ScopeKind::Loop).unwrap().node().kind, "while");
                    assert!(inner.has_scope(ScopeKind::Switch).is_none());
                    Ok(())
                })
            })
            .unwrap();
        assert!(context.has_scope(ScopeKind::Loop).is_none());
    }

    #[test]
    fn test_incidents_are_ordered() {
        let mut context = Context::new();
        context.push_incident("first", None);
        context.push_incident("second", Some(node("literal")));
        let messages: Vec<&str> = context.incidents().iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
