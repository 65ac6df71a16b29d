//! Runtime object model: functions, classes, instances and modules.

use std::fmt;
use std::rc::Rc;

use lox_ir::{FunctionDecl, NodeId};
use lox_resolve::{CompilationUnit, VariableLocation};
use rustc_hash::FxHashMap;

use crate::errors::{internal_error, EvalError};
use crate::{Environment, Heap, LocalScope, Value};

/// A closure: a function body plus the environment it was created in.
pub struct Function {
    pub decl: Rc<FunctionDecl>,
    /// `None` when created at top level, where names are module globals.
    pub closure: Option<Environment>,
    /// Module whose globals the body sees.
    pub module: Heap<Module>,
    /// Set for a class's `init`, whose calls always yield the instance.
    pub is_initializer: bool,
}

impl Function {
    pub fn new(
        decl: Rc<FunctionDecl>,
        closure: Option<Environment>,
        module: Heap<Module>,
        is_initializer: bool,
    ) -> Self {
        Function {
            decl,
            closure,
            module,
            is_initializer,
        }
    }

    pub fn arity(&self) -> usize {
        self.decl.arity()
    }

    pub fn name(&self) -> &str {
        self.decl.name_str()
    }

    /// This method with `this` bound to `instance`, in a new scope between
    /// the method's closure and its body.
    pub fn bind(&self, instance: Value) -> Function {
        let env = Environment::new(self.closure.clone());
        env.define(instance);
        Function {
            decl: Rc::clone(&self.decl),
            closure: Some(env),
            module: self.module.clone(),
            is_initializer: self.is_initializer,
        }
    }

    /// The receiver of a bound method.
    pub fn bound_this(&self) -> Result<Value, EvalError> {
        match &self.closure {
            Some(env) => env.get_at(0, 0),
            None => Err(internal_error(0, format!("method '{}' is not bound", self.name()))),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            "" => f.write_str("<fn>"),
            name => write!(f, "<fn {name}>"),
        }
    }
}

/// A class. Immutable once built.
pub struct Class {
    pub name: String,
    pub superclass: Option<Heap<Class>>,
    methods: FxHashMap<String, Heap<Function>>,
}

impl Class {
    pub fn new(
        name: impl Into<String>,
        superclass: Option<Heap<Class>>,
        methods: FxHashMap<String, Heap<Function>>,
    ) -> Self {
        Class {
            name: name.into(),
            superclass,
            methods,
        }
    }

    /// Look `name` up on this class, then up the superclass chain.
    pub fn find_method(&self, name: &str) -> Option<Heap<Function>> {
        let mut class = self;
        loop {
            if let Some(method) = class.methods.get(name) {
                return Some(method.clone());
            }
            class = class.superclass.as_deref()?;
        }
    }

    pub fn initializer(&self) -> Option<Heap<Function>> {
        self.find_method("init")
    }

    /// Arguments a call of the class takes: those of `init`, if any.
    pub fn arity(&self) -> usize {
        self.initializer().map_or(0, |init| init.arity())
    }
}

/// State of one instance. Fields appear on first assignment.
pub struct InstanceData {
    pub class: Heap<Class>,
    fields: FxHashMap<String, Value>,
}

impl InstanceData {
    pub fn new(class: Heap<Class>) -> Self {
        InstanceData {
            class,
            fields: FxHashMap::default(),
        }
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Property read: a field, else a method bound to `instance`.
    pub fn get(instance: &LocalScope<InstanceData>, name: &str) -> Option<Value> {
        let method = {
            let data = instance.borrow();
            if let Some(value) = data.field(name) {
                return Some(value);
            }
            data.class.find_method(name)?
        };
        let bound = method.bind(Value::Instance(instance.clone()));
        Some(Value::Function(Heap::new(bound)))
    }
}

/// Runtime state of one compilation unit: its globals and its addresses.
pub struct Module {
    pub name: String,
    pub unit: Rc<CompilationUnit>,
    globals: LocalScope<FxHashMap<String, Value>>,
}

impl Module {
    pub fn new(unit: Rc<CompilationUnit>) -> Self {
        Module {
            name: unit.name.clone(),
            unit,
            globals: LocalScope::default(),
        }
    }

    #[inline]
    pub fn location(&self, id: NodeId) -> Option<VariableLocation> {
        self.unit.location(id)
    }

    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get(name).cloned()
    }

    /// Bind or rebind a global.
    pub fn define_global(&self, name: impl Into<String>, value: Value) {
        self.globals.borrow_mut().insert(name.into(), value);
    }

    /// Overwrite an existing global. Returns `false` if it was never defined.
    pub fn assign_global(&self, name: &str, value: Value) -> bool {
        match self.globals.borrow_mut().get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Global names in sorted order.
    pub fn global_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.globals.borrow().keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("globals", &self.global_names())
            .finish_non_exhaustive()
    }
}
