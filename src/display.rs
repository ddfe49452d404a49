use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("cannot create display handle for {name}: image payload is empty")]
    EmptyPayload { name: String },
}

/// Opaque reference to displayable image bytes. Values may be copied
/// freely (patch records carry the same handle as their image); release
/// goes through the provider exactly once per acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayHandle(u64);

impl DisplayHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Capability that turns raw image bytes into a displayable handle and
/// takes the handle back when the owning batch result is discarded.
pub trait DisplayProvider: std::fmt::Debug {
    fn acquire(&self, name: &str, bytes: &[u8]) -> Result<DisplayHandle, DisplayError>;
    fn release(&self, handle: &DisplayHandle);
}

/// Single-threaded in-memory provider. Tracks live handles so tests can
/// assert the acquire/release balance.
#[derive(Debug, Default)]
pub struct InMemoryDisplay {
    next_id: Cell<u64>,
    active: RefCell<HashSet<u64>>,
}

impl InMemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_handles(&self) -> usize {
        self.active.borrow().len()
    }
}

impl DisplayProvider for InMemoryDisplay {
    fn acquire(&self, name: &str, bytes: &[u8]) -> Result<DisplayHandle, DisplayError> {
        if bytes.is_empty() {
            return Err(DisplayError::EmptyPayload {
                name: name.to_string(),
            });
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.active.borrow_mut().insert(id);
        Ok(DisplayHandle::new(id))
    }

    fn release(&self, handle: &DisplayHandle) {
        if !self.active.borrow_mut().remove(&handle.id()) {
            warn!("release of unknown or already released display handle {}", handle.id());
        }
    }
}
