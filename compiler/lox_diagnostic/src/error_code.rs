use std::fmt;

/// Error codes for all Lox diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Resolver (scope) errors
/// - E3xxx: Runtime errors
/// - E4xxx: Module loading errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Unexpected character in source
    E0002,

    // Parser Errors (E1xxx)
    /// Expected a specific token
    E1001,
    /// Expected expression
    E1002,
    /// Invalid assignment target
    E1003,
    /// Too many arguments or parameters
    E1004,

    // Resolver Errors (E2xxx)
    /// Name declared twice in one scope
    E2001,
    /// Local read inside its own initializer
    E2002,
    /// `return` outside a function
    E2003,
    /// `return <value>` inside an initializer
    E2004,
    /// `this` outside a class
    E2005,
    /// `super` outside a class
    E2006,
    /// `super` in a class without superclass
    E2007,
    /// Class inherits from itself
    E2008,
    /// `break` outside a loop
    E2009,

    // Runtime Errors (E3xxx)
    /// Operand type mismatch
    E3001,
    /// Callee is not callable
    E3002,
    /// Wrong number of arguments
    E3003,
    /// Undefined variable
    E3004,
    /// Undefined property
    E3005,
    /// Property access on a value without properties
    E3006,
    /// Superclass is not a class
    E3007,
    /// Non-numeric array size or index
    E3008,
    /// Array index out of bounds
    E3009,
    /// Indexing a value that is not an array
    E3010,
    /// Invalid assignment target
    E3011,
    /// Failed `assert`
    E3012,
    /// Call depth limit exceeded
    E3013,
    /// Import of a module that failed to compile
    E3014,
    /// Interpreter invariant violated
    E3999,

    // Module Errors (E4xxx)
    /// Module source not found
    E4001,
    /// Imported module failed to compile
    E4002,
}

/// Compilation phase an error code belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    Lexer,
    Parser,
    Resolver,
    Runtime,
    Module,
}

impl ErrorCode {
    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",
            ErrorCode::E3009 => "E3009",
            ErrorCode::E3010 => "E3010",
            ErrorCode::E3011 => "E3011",
            ErrorCode::E3012 => "E3012",
            ErrorCode::E3013 => "E3013",
            ErrorCode::E3014 => "E3014",
            ErrorCode::E3999 => "E3999",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            ErrorCode::E0001 | ErrorCode::E0002 => Phase::Lexer,
            ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003 | ErrorCode::E1004 => {
                Phase::Parser
            }
            ErrorCode::E2001
            | ErrorCode::E2002
            | ErrorCode::E2003
            | ErrorCode::E2004
            | ErrorCode::E2005
            | ErrorCode::E2006
            | ErrorCode::E2007
            | ErrorCode::E2008
            | ErrorCode::E2009 => Phase::Resolver,
            ErrorCode::E4001 | ErrorCode::E4002 => Phase::Module,
            _ => Phase::Runtime,
        }
    }

    /// Whether this code is raised while a program runs rather than while it compiles.
    pub fn is_runtime(&self) -> bool {
        self.phase() == Phase::Runtime
    }

    /// One-line description, shown by `lox explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "unexpected character",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "invalid assignment target",
            ErrorCode::E1004 => "too many arguments or parameters",
            ErrorCode::E2001 => "name already declared in this scope",
            ErrorCode::E2002 => "local variable read in its own initializer",
            ErrorCode::E2003 => "return outside of a function",
            ErrorCode::E2004 => "return with a value inside an initializer",
            ErrorCode::E2005 => "'this' outside of a class",
            ErrorCode::E2006 => "'super' outside of a class",
            ErrorCode::E2007 => "'super' in a class with no superclass",
            ErrorCode::E2008 => "class inherits from itself",
            ErrorCode::E2009 => "break outside of a loop",
            ErrorCode::E3001 => "operand type mismatch",
            ErrorCode::E3002 => "value is not callable",
            ErrorCode::E3003 => "wrong number of arguments",
            ErrorCode::E3004 => "undefined variable",
            ErrorCode::E3005 => "undefined property",
            ErrorCode::E3006 => "value has no properties",
            ErrorCode::E3007 => "superclass is not a class",
            ErrorCode::E3008 => "array size or index is not a number",
            ErrorCode::E3009 => "array index out of bounds",
            ErrorCode::E3010 => "value is not an array",
            ErrorCode::E3011 => "invalid assignment target",
            ErrorCode::E3012 => "assertion failed",
            ErrorCode::E3013 => "call depth limit exceeded",
            ErrorCode::E3014 => "imported module failed to compile",
            ErrorCode::E3999 => "internal interpreter error",
            ErrorCode::E4001 => "module source not found",
            ErrorCode::E4002 => "module failed to compile",
        }
    }

    /// Parse an error code from its string form (`"E2001"`).
    pub fn from_str_code(code: &str) -> Option<ErrorCode> {
        ALL_CODES.iter().copied().find(|c| c.as_str() == code)
    }
}

const ALL_CODES: [ErrorCode; 32] = [
    ErrorCode::E0001,
    ErrorCode::E0002,
    ErrorCode::E1001,
    ErrorCode::E1002,
    ErrorCode::E1003,
    ErrorCode::E1004,
    ErrorCode::E2001,
    ErrorCode::E2002,
    ErrorCode::E2003,
    ErrorCode::E2004,
    ErrorCode::E2005,
    ErrorCode::E2006,
    ErrorCode::E2007,
    ErrorCode::E2008,
    ErrorCode::E2009,
    ErrorCode::E3001,
    ErrorCode::E3002,
    ErrorCode::E3003,
    ErrorCode::E3004,
    ErrorCode::E3005,
    ErrorCode::E3006,
    ErrorCode::E3007,
    ErrorCode::E3008,
    ErrorCode::E3009,
    ErrorCode::E3010,
    ErrorCode::E3011,
    ErrorCode::E3012,
    ErrorCode::E3013,
    ErrorCode::E3014,
    ErrorCode::E3999,
    ErrorCode::E4001,
    ErrorCode::E4002,
];

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
