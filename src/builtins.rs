use crate::object::*;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

type BuiltinFn = fn(Vec<Object>) -> Result<Object>;

/// A native function, identified by the name it is bound to.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    func: BuiltinFn,
}

impl Builtin {
    pub fn call(&self, args: Vec<Object>) -> Result<Object> {
        (self.func)(args)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("Builtin").field(&self.name).finish()
    }
}

fn len(args: Vec<Object>) -> Result<Object> {
    match args.as_slice() {
        [Object::String(s)] => Ok(Object::Integer(s.chars().count() as i64)),
        [obj] => Err(EvalError::UnsupportedArgType {
            fn_name: "len",
            type_name: obj.type_name(),
        }),
        _ => Err(EvalError::IncorrectArity {
            got: args.len(),
            want: 1,
        }),
    }
}

fn puts(args: Vec<Object>) -> Result<Object> {
    for arg in args.iter() {
        println!("{}", arg);
    }
    Ok(NULL)
}

lazy_static! {
    static ref BUILTINS: HashMap<&'static str, Builtin> = vec![
        Builtin { name: "len", func: len },
        Builtin { name: "puts", func: puts },
    ]
    .into_iter()
    .map(|builtin| (builtin.name, builtin))
    .collect();
}

/// Resolves a name against the fixed builtin table.
pub fn lookup(name: &str) -> Option<Object> {
    BUILTINS.get(name).copied().map(Object::Builtin)
}
