//! Destinations for fatal generation errors.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::GenError;

/// Receives fatal errors raised while building or advancing a generator.
///
/// Reporting is terminal for the generator: once an error is delivered, the
/// generator yields no further combinations.
pub trait FailureSink {
    fn fatal(&mut self, error: GenError);
}

/// Panics with the error message, failing the enclosing `#[test]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicSink;

impl FailureSink for PanicSink {
    fn fatal(&mut self, error: GenError) {
        panic!("test case generation failed: {error}");
    }
}

/// Records errors instead of panicking.
///
/// Clones share the same storage, so a clone kept by the caller observes
/// what the generator reported.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    errors: Rc<RefCell<Vec<GenError>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }

    /// Drain and return the reported errors.
    pub fn take(&self) -> Vec<GenError> {
        std::mem::take(&mut *self.errors.borrow_mut())
    }
}

impl FailureSink for CollectingSink {
    fn fatal(&mut self, error: GenError) {
        self.errors.borrow_mut().push(error);
    }
}

impl<S: FailureSink + ?Sized> FailureSink for &mut S {
    fn fatal(&mut self, error: GenError) {
        (**self).fatal(error);
    }
}

impl<S: FailureSink + ?Sized> FailureSink for Box<S> {
    fn fatal(&mut self, error: GenError) {
        (**self).fatal(error);
    }
}
