//! Runtime values.
//!
//! Immutable objects sit behind `Heap`; objects that mutate in place
//! (arrays, instances) sit behind `LocalScope`, so every copy of the value
//! observes the same state.

mod heap;

use std::fmt;

use lox_ir::Literal;

pub use heap::Heap;

use crate::{Class, Function, InstanceData, LocalScope, Module, NativeCallable};

/// Most cells a single `[n]{}` may allocate.
pub const MAX_ARRAY_LEN: usize = 1 << 24;

/// A dynamically-typed Lox value.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Heap<String>),
    /// Fixed-length block of cells, `nil` until assigned.
    Array(LocalScope<Vec<Value>>),
    Function(Heap<Function>),
    Class(Heap<Class>),
    Instance(LocalScope<InstanceData>),
    Module(Heap<Module>),
    Native(Heap<dyn NativeCallable>),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// A new array of `len` nils, or `None` when `len` is over
    /// [`MAX_ARRAY_LEN`] or the cells cannot be allocated.
    pub fn array(len: usize) -> Option<Self> {
        if len > MAX_ARRAY_LEN {
            return None;
        }
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).ok()?;
        cells.resize(len, Value::Nil);
        Some(Value::Array(LocalScope::new(cells)))
    }

    /// A new instance of `class` with no fields.
    pub fn instance(class: Heap<Class>) -> Self {
        Value::Instance(LocalScope::new(InstanceData::new(class)))
    }

    pub fn from_literal(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => Value::Nil,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::Str(s) => Value::string(s.as_str()),
        }
    }

    /// `nil` and `false` are falsy; everything else is truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Function(_) => "function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
            Value::Module(_) => "module",
            Value::Native(_) => "native function",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn fmt_with(&self, f: &mut fmt::Formatter<'_>, open_arrays: &mut Vec<*const ()>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => fmt_number(*n, f),
            Value::Str(s) => f.write_str(s),
            Value::Array(cells) => {
                let ptr = cells.as_ptr().cast::<()>().cast_const();
                if open_arrays.contains(&ptr) {
                    return f.write_str("[...]");
                }
                open_arrays.push(ptr);
                f.write_str("[")?;
                for (i, cell) in cells.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    cell.fmt_with(f, open_arrays)?;
                }
                open_arrays.pop();
                f.write_str("]")
            }
            Value::Function(function) => write!(f, "{function}"),
            Value::Class(class) => write!(f, "<cls {}>", class.name),
            Value::Instance(instance) => write!(f, "{} instance", instance.borrow().class.name),
            Value::Module(module) => write!(f, "<module {}>", module.name),
            Value::Native(native) => write!(f, "<native fn {}>", native.name()),
        }
    }
}

/// Integral numbers print without a fractional part.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{n}")
    }
}

/// Lox's `stringify`: the text `print` writes.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            other => write!(f, "{other}"),
        }
    }
}

/// Lox equality: numbers by IEEE `==`, strings by content, booleans and
/// nil by value, everything else by identity. No coercion between types.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a.as_str() == b.as_str(),
            (Value::Array(a), Value::Array(b)) => LocalScope::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Heap::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Heap::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => LocalScope::ptr_eq(a, b),
            (Value::Module(a), Value::Module(b)) => Heap::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}
