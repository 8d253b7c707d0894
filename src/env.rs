//! Persistent association chains for scoping
//!
//! An environment is an immutable, prepend-only chain of binding cells.
//! `define` never mutates the receiver: it returns a new environment whose
//! head cell points at the old head, so every snapshot taken earlier keeps
//! seeing exactly the bindings it saw before. `assign` mutates a cell's
//! payload in place, and the cell is shared by every snapshot that includes
//! it — definition is functional, assignment is destructive.
//!
//! Capturing a closure is capturing a chain head; no copying, no teardown.
//! Lookup walks from the head toward the root and the first name match wins,
//! which is what gives innermost-scope shadowing.
//!
//! The same structure serves both evaluators: the interpreter binds names to
//! values, the type checker binds the same names to types.

use std::cell::RefCell;
use std::rc::Rc;

/// One name-to-payload entry in a chain. Immutable position, mutable payload.
#[derive(Debug)]
struct Binding<T> {
    name: String,
    payload: RefCell<T>,
    next: Option<Rc<Binding<T>>>,
}

/// A persistent environment: a view onto a chain of binding cells.
///
/// Cloning an environment is cheap (one `Rc` clone) and yields a snapshot
/// that shares every cell with the original.
#[derive(Debug, Clone)]
pub struct Env<T> {
    head: Option<Rc<Binding<T>>>,
}

impl<T: Clone> Env<T> {
    /// A fresh, empty environment
    pub fn new() -> Self {
        Env { head: None }
    }

    /// Return a new environment extending this one with a binding for
    /// `name`. The receiver is untouched; the new chain shares every
    /// existing cell.
    #[must_use]
    pub fn define(&self, name: &str, payload: T) -> Env<T> {
        Env {
            head: Some(Rc::new(Binding {
                name: name.to_string(),
                payload: RefCell::new(payload),
                next: self.head.clone(),
            })),
        }
    }

    /// Read the payload of the nearest binding for `name`, or `None` if the
    /// name is unbound. Later assignments through any snapshot sharing the
    /// cell are visible to subsequent reads.
    pub fn get(&self, name: &str) -> Option<T> {
        self.cell(name).map(|c| c.payload.borrow().clone())
    }

    /// Overwrite the payload of the nearest binding for `name` in place.
    /// Returns `false` if the name is unbound; callers raise their own
    /// undefined-symbol error.
    pub fn assign(&self, name: &str, payload: T) -> bool {
        match self.cell(name) {
            Some(cell) => {
                *cell.payload.borrow_mut() = payload;
                true
            }
            None => false,
        }
    }

    /// Walk the chain from the head; first name match wins.
    fn cell(&self, name: &str) -> Option<&Rc<Binding<T>>> {
        let mut cur = self.head.as_ref();
        while let Some(cell) = cur {
            if cell.name == name {
                return Some(cell);
            }
            cur = cell.next.as_ref();
        }
        None
    }
}

impl<T: Clone> Default for Env<T> {
    fn default() -> Self {
        Self::new()
    }
}
