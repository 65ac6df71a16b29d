//! Resolver-time scopes.

use rustc_hash::FxHashMap;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(super) enum BindingState {
    /// Slot reserved, initializer not yet resolved.
    Declared,
    Defined,
}

#[derive(Copy, Clone, Debug)]
pub(super) struct Binding {
    pub state: BindingState,
    pub slot: usize,
}

/// Names declared directly in one block, function body or synthetic
/// class scope. Slots follow first-declaration order and are never reused.
#[derive(Default, Debug)]
pub(super) struct Scope {
    bindings: FxHashMap<String, Binding>,
}

impl Scope {
    /// Reserve the next slot for `name`. Returns `false`, leaving the
    /// existing binding alone, when the name is already in this scope.
    pub fn declare(&mut self, name: &str) -> bool {
        if self.bindings.contains_key(name) {
            return false;
        }
        let slot = self.bindings.len();
        self.bindings.insert(
            name.to_string(),
            Binding {
                state: BindingState::Declared,
                slot,
            },
        );
        true
    }

    /// Mark `name` usable. Declares it first if needed.
    pub fn define(&mut self, name: &str) {
        if !self.bindings.contains_key(name) {
            self.declare(name);
        }
        if let Some(binding) = self.bindings.get_mut(name) {
            binding.state = BindingState::Defined;
        }
    }

    pub fn get(&self, name: &str) -> Option<Binding> {
        self.bindings.get(name).copied()
    }
}
