//! Runtime environments.
//!
//! An environment is one scope's slots plus a link to its enclosing scope.
//! Slots are appended in declaration order and addressed by the resolver's
//! `(depth, slot)` pairs, so no name lookup happens at run time. Closures
//! and call frames share environments, so a scope lives as long as anything
//! still refers to it.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::errors::{internal_error, EvalError};
use crate::Value;

/// Single-threaded shared, mutable cell.
///
/// Used for environments, arrays, instances and module globals: every
/// value that aliases and mutates through any of its handles.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Whether both handles refer to the same cell.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

struct Scope {
    values: Vec<Value>,
    enclosing: Option<Environment>,
}

/// Handle to one scope in the environment chain.
#[derive(Clone)]
pub struct Environment(LocalScope<Scope>);

impl Environment {
    /// A scope nested in `enclosing`, or an outermost scope for `None`.
    pub fn new(enclosing: Option<Environment>) -> Self {
        Environment(LocalScope::new(Scope {
            values: Vec::new(),
            enclosing,
        }))
    }

    /// Append a value and return its slot.
    pub fn define(&self, value: Value) -> usize {
        let mut scope = self.0.borrow_mut();
        scope.values.push(value);
        scope.values.len() - 1
    }

    /// The scope `depth` links out from this one.
    pub fn ancestor(&self, depth: usize) -> Result<Environment, EvalError> {
        let mut env = self.clone();
        for hop in 0..depth {
            let next = env.0.borrow().enclosing.clone();
            env = next.ok_or_else(|| {
                internal_error(
                    0,
                    format!("environment chain ended after {hop} of {depth} hops"),
                )
            })?;
        }
        Ok(env)
    }

    pub fn get_at(&self, depth: usize, slot: usize) -> Result<Value, EvalError> {
        let env = self.ancestor(depth)?;
        let scope = env.0.borrow();
        scope.values.get(slot).cloned().ok_or_else(|| {
            internal_error(0, format!("no slot {slot} at depth {depth}"))
        })
    }

    pub fn assign_at(&self, depth: usize, slot: usize, value: Value) -> Result<(), EvalError> {
        let env = self.ancestor(depth)?;
        let mut scope = env.0.borrow_mut();
        match scope.values.get_mut(slot) {
            Some(target) => {
                *target = value;
                Ok(())
            }
            None => Err(internal_error(
                0,
                format!("no slot {slot} at depth {depth}"),
            )),
        }
    }

    /// Number of slots defined directly in this scope.
    fn slot_count(&self) -> usize {
        self.0.borrow().values.len()
    }

    /// Number of scopes in the chain, this one included.
    pub(crate) fn chain_len(&self) -> usize {
        let mut count = 1;
        let mut current = self.0.borrow().enclosing.clone();
        while let Some(env) = current {
            count += 1;
            current = env.0.borrow().enclosing.clone();
        }
        count
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        LocalScope::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("slots", &self.slot_count())
            .field("depth", &self.chain_len())
            .finish()
    }
}
