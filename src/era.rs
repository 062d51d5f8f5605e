//! Numbering-system identities used as cache-key tags.
//!
//! An [`EraId`] is a small opaque handle handed out by an [`EraRegistry`]
//! when a numbering system (an era such as `"CE"` or `"BE"`) is registered.
//! Handles are assigned monotonically and never reused while the registry
//! lives, so [`ConversionCache`](crate::cache::ConversionCache) can key on
//! them without ever looking at the era itself.
//!
//! ## Example Usage
//!
//! ```
//! use erakit::era::EraRegistry;
//!
//! let eras = EraRegistry::with_builtin_eras();
//! assert_eq!(eras.get("BE"), Some(EraRegistry::BE));
//!
//! let jp = eras.register("JP-Reiwa");
//! assert_eq!(eras.register("JP-Reiwa"), jp);
//! assert_eq!(eras.name(jp).as_deref(), Some("JP-Reiwa"));
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Opaque numbering-system handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EraId(u32);

impl EraId {
    /// Raw handle value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "era#{}", self.0)
    }
}

#[derive(Debug, Default)]
struct Interned {
    by_name: FxHashMap<Arc<str>, EraId>,
    names: Vec<Arc<str>>,
}

/// Thread-safe name → [`EraId`] interner.
#[derive(Debug, Default)]
pub struct EraRegistry {
    inner: RwLock<Interned>,
}

impl EraRegistry {
    /// Handle of the Common Era in a registry built by
    /// [`with_builtin_eras`](Self::with_builtin_eras).
    pub const CE: EraId = EraId(0);
    /// Handle of the Buddhist Era in a registry built by
    /// [`with_builtin_eras`](Self::with_builtin_eras).
    pub const BE: EraId = EraId(1);

    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with `"CE"` and `"BE"` registered as
    /// [`CE`](Self::CE) and [`BE`](Self::BE).
    pub fn with_builtin_eras() -> Self {
        let registry = Self::new();
        registry.register("CE");
        registry.register("BE");
        registry
    }

    /// Returns the handle for `name`, registering it if needed.
    pub fn register(&self, name: &str) -> EraId {
        if let Some(id) = self.get(name) {
            return id;
        }

        let mut inner = self.inner.write();
        if let Some(&id) = inner.by_name.get(name) {
            return id;
        }
        let id = EraId(inner.names.len() as u32);
        let name: Arc<str> = Arc::from(name);
        inner.names.push(Arc::clone(&name));
        inner.by_name.insert(name, id);
        debug!(era = %id, name = &*inner.names[id.0 as usize], "registered era");
        id
    }

    /// Returns the handle for a registered name.
    pub fn get(&self, name: &str) -> Option<EraId> {
        self.inner.read().by_name.get(name).copied()
    }

    /// Returns the name a handle was registered under.
    pub fn name(&self, id: EraId) -> Option<Arc<str>> {
        self.inner.read().names.get(id.0 as usize).cloned()
    }

    /// Number of registered eras.
    pub fn len(&self) -> usize {
        self.inner.read().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
