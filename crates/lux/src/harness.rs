//! Harnessed values: a value paired with an ordered chain of modifier functions.
//!
//! Every function in a chain has the canonical signature of its value kind,
//! `T (T, &mut ElementContext)`. Evaluating a [`Harness`] folds the chain left to right,
//! starting from the harness's current value, and stores the result back. Functions are
//! never skipped or reordered; conditional behavior lives inside the functions themselves.
//! [`Harness::reset`] returns the current value to the one the harness was built with.
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use glam::{IVec2, Vec2};

use crate::generation::element::ElementContext;

/// Canonical callable for a value kind `T`.
pub type ValueFn<T> = Rc<dyn Fn(T, &mut ElementContext<'_>) -> T>;
pub type FloatFn = ValueFn<f32>;
pub type IntFn = ValueFn<i32>;
pub type Vec2Fn = ValueFn<Vec2>;
pub type IVec2Fn = ValueFn<IVec2>;

/// Canonical generator callable: mutates the context's element, returns `false` to stop.
pub type GenFn = Rc<dyn Fn(&mut ElementContext<'_>) -> bool>;

/// Wrap a closure as a [`ValueFn`].
pub fn value_fn<T, F>(f: F) -> ValueFn<T>
where
    F: Fn(T, &mut ElementContext<'_>) -> T + 'static,
{
    Rc::new(f)
}

/// Wrap a closure as a [`GenFn`].
pub fn gen_fn<F>(f: F) -> GenFn
where
    F: Fn(&mut ElementContext<'_>) -> bool + 'static,
{
    Rc::new(f)
}

/// A value of type `T` plus an ordered chain of functions applied on every evaluation.
pub struct Harness<T> {
    initial: T,
    value: RefCell<T>,
    functions: Vec<ValueFn<T>>,
}

impl<T: Clone> Harness<T> {
    /// Create a harness with an empty chain.
    pub fn new(value: T) -> Self {
        Self {
            initial: value.clone(),
            value: RefCell::new(value),
            functions: Vec::new(),
        }
    }

    /// Append a function to the chain.
    pub fn with_function(mut self, function: ValueFn<T>) -> Self {
        self.functions.push(function);
        self
    }

    /// Append several functions to the chain, in order.
    pub fn with_functions(mut self, functions: impl IntoIterator<Item = ValueFn<T>>) -> Self {
        self.functions.extend(functions);
        self
    }

    pub fn push(&mut self, function: ValueFn<T>) {
        self.functions.push(function);
    }

    pub fn functions(&self) -> &[ValueFn<T>] {
        &self.functions
    }

    /// Current value, without evaluating the chain.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Overwrite the current value.
    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
    }

    /// The value the harness was created with.
    pub fn initial(&self) -> &T {
        &self.initial
    }

    /// Discard accumulated state; the chain is left untouched.
    pub fn reset(&self) {
        self.set(self.initial.clone());
    }

    /// Fold the chain over the current value, store and return the result.
    ///
    /// No borrow is held while the chain runs, so functions may evaluate other
    /// harnesses, or re-enter generation through branching, freely.
    pub fn evaluate(&self, ctx: &mut ElementContext<'_>) -> T {
        if self.functions.is_empty() {
            return self.get();
        }
        let mut value = self.get();
        for function in &self.functions {
            value = function(value, ctx);
        }
        self.set(value.clone());
        value
    }
}

impl<T: Clone + Default> Default for Harness<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> From<T> for Harness<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Harness<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("initial", &self.initial)
            .field("value", &self.value.borrow())
            .field("functions", &self.functions.len())
            .finish()
    }
}
