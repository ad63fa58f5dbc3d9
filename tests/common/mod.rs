#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::spi::{ErrorKind, ErrorType, Operation, SpiDevice};

#[derive(Default)]
struct Inner {
    writes: Vec<Vec<u8>>,
    fail_requests: usize,
}

/// SPI test double that records written bytes and fails on demand.
///
/// Clones share state, so a test can keep one handle while the driver owns
/// the other, inject failures, and inspect traffic afterwards.
#[derive(Clone, Default)]
pub(crate) struct ScriptedSpi {
    inner: Rc<RefCell<Inner>>,
}

impl ScriptedSpi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` transactions fail with a bus error.
    pub(crate) fn fail_next(&self, n: usize) {
        self.inner.borrow_mut().fail_requests = n;
    }

    /// Number of successful write transactions so far.
    pub(crate) fn write_count(&self) -> usize {
        self.inner.borrow().writes.len()
    }

    /// All successfully written transactions, oldest first.
    pub(crate) fn writes(&self) -> Vec<Vec<u8>> {
        self.inner.borrow().writes.clone()
    }
}

impl ErrorType for ScriptedSpi {
    type Error = ErrorKind;
}

impl SpiDevice for ScriptedSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), ErrorKind> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_requests > 0 {
            inner.fail_requests -= 1;
            return Err(ErrorKind::Other);
        }
        for op in operations {
            if let Operation::Write(bytes) = op {
                inner.writes.push(bytes.to_vec());
            }
        }
        Ok(())
    }
}
