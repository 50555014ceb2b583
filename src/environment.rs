use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

#[derive(Default)]
struct Scope {
    store: HashMap<String, Object>,
    outer: Option<Environment>,
}

/// A shared handle to one lexical scope. Cloning the handle shares the scope,
/// which is how function values capture the environment they were defined in.
#[derive(Clone, Default)]
pub struct Environment(Rc<RefCell<Scope>>);

impl Environment {
    pub fn new() -> Self {
        Default::default()
    }

    /// A fresh scope whose unresolved lookups fall through to `outer`.
    pub fn new_enclosed(outer: &Environment) -> Self {
        Self(Rc::new(RefCell::new(Scope {
            store: HashMap::new(),
            outer: Some(outer.clone()),
        })))
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        let scope = self.0.borrow();
        match scope.store.get(name) {
            Some(obj) => Some(obj.clone()),
            None => scope.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    /// Binds `name` in this scope only; outer scopes are never written.
    pub fn set(&self, name: &str, val: Object) {
        self.0.borrow_mut().store.insert(name.to_owned(), val);
    }
}

// Scopes are compared by identity: two handles are equal when they share a scope.
impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// A function stored in the scope it captured would make a derived Debug recurse
// forever, so only the bound names are shown.
impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let scope = self.0.borrow();
        let mut names: Vec<&String> = scope.store.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("enclosed", &scope.outer.is_some())
            .finish()
    }
}
