use parking_lot::RwLock;
use std::sync::Arc;

/// Instrument name shared between the render thread (writer) and the poll pump (reader).
///
/// The name is held as an `Arc<str>` so a swap is a single pointer store and
/// readers clone the handle without copying the string.
#[derive(Debug, Clone)]
pub struct SharedInstrument {
    inner: Arc<RwLock<Arc<str>>>,
}

impl SharedInstrument {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::from(name.as_ref()))),
        }
    }

    pub fn load(&self) -> Arc<str> {
        Arc::clone(&self.inner.read())
    }

    /// Replace the name, returning the previous one
    pub fn store(&self, name: impl AsRef<str>) -> Arc<str> {
        std::mem::replace(&mut *self.inner.write(), Arc::from(name.as_ref()))
    }
}
