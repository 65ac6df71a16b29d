//! Resolver output: compilation units and the program that holds them.

use std::fmt;
use std::rc::Rc;

use lox_ir::{NodeId, Stmt};
use rustc_hash::FxHashMap;

/// Name of the entry unit of every program.
pub const MAIN_UNIT: &str = "__main__";

/// Lexical address of a local: `depth` environment hops outward, then
/// index `slot` in that environment.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct VariableLocation {
    pub depth: usize,
    pub slot: usize,
}

impl VariableLocation {
    pub const fn new(depth: usize, slot: usize) -> Self {
        VariableLocation { depth, slot }
    }
}

impl fmt::Debug for VariableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.depth, self.slot)
    }
}

/// Everything the interpreter needs to run one source file.
///
/// Immutable once built.
#[derive(Debug)]
pub struct CompilationUnit {
    /// Fully-qualified module name, or [`MAIN_UNIT`].
    pub name: String,
    pub statements: Vec<Stmt>,
    /// Addresses of resolved locals, keyed by expression node.
    pub locals: FxHashMap<NodeId, VariableLocation>,
    /// Fully-qualified names this unit imports, in first-seen order.
    pub imports: Vec<String>,
    /// Whether lexing, parsing or resolving this unit reported an error.
    pub has_errors: bool,
}

impl CompilationUnit {
    /// Placeholder for a unit whose source could not be loaded or compiled.
    pub fn failed(name: impl Into<String>) -> Self {
        CompilationUnit {
            name: name.into(),
            statements: Vec::new(),
            locals: FxHashMap::default(),
            imports: Vec::new(),
            has_errors: true,
        }
    }

    /// Resolved address of `id`, or `None` for a global.
    #[inline]
    pub fn location(&self, id: NodeId) -> Option<VariableLocation> {
        self.locals.get(&id).copied()
    }
}

/// All units reachable from the entry unit, keyed by fully-qualified name.
#[derive(Debug, Default)]
pub struct Program {
    units: FxHashMap<String, Rc<CompilationUnit>>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, unit: CompilationUnit) {
        self.units.insert(unit.name.clone(), Rc::new(unit));
    }

    pub fn get(&self, name: &str) -> Option<&Rc<CompilationUnit>> {
        self.units.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// The entry unit, if one was compiled.
    pub fn entry(&self) -> Option<&Rc<CompilationUnit>> {
        self.get(MAIN_UNIT)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Whether any unit failed to compile.
    pub fn has_errors(&self) -> bool {
        self.units.values().any(|unit| unit.has_errors)
    }

    /// Unit names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.units.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
