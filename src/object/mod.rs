use crate::ast;
use crate::builtins::Builtin;
use crate::environment::Environment;
use std::fmt::{self, Display, Formatter};

mod eval_error;
pub use eval_error::EvalError;

pub type Result<T> = std::result::Result<T, EvalError>;

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    ReturnValue(Box<Object>),
    Error(EvalError),
    Function(FunctionObject),
    Builtin(Builtin),
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::String(s) => write!(f, "{}", s),
            Self::Null => write!(f, "null"),
            Self::ReturnValue(obj) => write!(f, "{}", obj),
            Self::Error(err) => write!(f, "ERROR:{}", err),
            Self::Function(func) => write!(f, "{}", func),
            Self::Builtin(_) => write!(f, "builtin function"),
        }
    }
}

impl From<i64> for Object {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        if b {
            TRUE
        } else {
            FALSE
        }
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        s.to_owned().into()
    }
}

impl From<EvalError> for Object {
    fn from(err: EvalError) -> Self {
        Self::Error(err)
    }
}

impl Object {
    pub fn is_return_value(&self) -> bool {
        matches!(self, Self::ReturnValue(_))
    }

    pub fn unwrap_return(self) -> Self {
        match self {
            Self::ReturnValue(o) => *o,
            obj => obj,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::Boolean(_) => "BOOLEAN",
            Self::String(_) => "STRING",
            Self::Null => "NULL",
            Self::ReturnValue(_) => "RETURN_VALUE",
            Self::Error(_) => "ERROR",
            Self::Function(_) => "FUNCTION",
            Self::Builtin(_) => "BUILTIN",
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn truth_value(&self) -> bool {
        !matches!(self, Self::Boolean(false) | Self::Null)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionObject {
    pub parameters: Vec<ast::Identifier>,
    pub body: ast::BlockStatement,
    pub env: Environment,
}

impl Display for FunctionObject {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let identifier_names: Vec<String> = self
            .parameters
            .iter()
            .map(ast::Identifier::to_string)
            .collect();

        write!(f, "fn({}) {}", identifier_names.join(", "), self.body)
    }
}
