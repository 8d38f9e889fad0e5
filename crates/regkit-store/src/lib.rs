//! regkit store adapters
//!
//! The reconciliation core never touches the registry directly. It reads
//! through a [`StoreReader`], and every read answers with one of four
//! distinct [`ReadOutcome`]s.
//!
//! # Adapters
//!
//! - [`MemoryStore`]: in-memory values, for tests and offline comparison
//! - [`UnavailableStore`]: answers `Unsupported` for every query
//! - `WindowsRegistry` (Windows only): read-only access to the live registry
//!
//! # Example
//!
//! ```
//! use regkit_store::{MemoryStore, ReadOutcome, StoreReader};
//! use regkit_value::{KeyPath, RegistryValue};
//!
//! let store = MemoryStore::new()
//!     .with_value(r"HKEY_CURRENT_USER\Software\Example", "Flag", RegistryValue::Dword(1));
//! let path = KeyPath::for_entry(r"HKEY_CURRENT_USER\Software\Example", "Flag").unwrap();
//! assert_eq!(store.read(&path), ReadOutcome::Found(RegistryValue::Dword(1)));
//! ```

#![warn(unreachable_pub)]

mod memory;
mod unavailable;
#[cfg(windows)]
mod win32;

use std::fmt::{self, Display, Formatter};

use regkit_value::{KeyPath, RegistryValue};

pub use memory::MemoryStore;
pub use unavailable::UnavailableStore;
#[cfg(windows)]
pub use win32::WindowsRegistry;

/// Result of reading one value from a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Value exists
    Found(RegistryValue),
    /// Path is well-formed but the key or value is absent
    NotFound,
    /// The store cannot service queries at all on this host
    Unsupported(String),
    /// This query failed (permission, malformed subpath, unknown root)
    Error(String),
}

impl ReadOutcome {
    /// Whether a value was found
    #[inline]
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Found value, if any
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&RegistryValue> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }
}

impl Display for ReadOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(value) => write!(f, "found: {value}"),
            Self::NotFound => f.write_str("not found"),
            Self::Unsupported(reason) => write!(f, "unsupported: {reason}"),
            Self::Error(reason) => write!(f, "error: {reason}"),
        }
    }
}

/// Read-only access to a configuration store
pub trait StoreReader {
    /// Read one value
    fn read(&self, path: &KeyPath) -> ReadOutcome;
}

impl<T: StoreReader + ?Sized> StoreReader for &T {
    fn read(&self, path: &KeyPath) -> ReadOutcome {
        (**self).read(path)
    }
}

impl<T: StoreReader + ?Sized> StoreReader for Box<T> {
    fn read(&self, path: &KeyPath) -> ReadOutcome {
        (**self).read(path)
    }
}

/// The live registry on Windows, [`UnavailableStore`] everywhere else
#[must_use]
pub fn default_reader() -> Box<dyn StoreReader> {
    #[cfg(windows)]
    {
        Box::new(WindowsRegistry::new())
    }
    #[cfg(not(windows))]
    {
        Box::new(UnavailableStore::default())
    }
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_accessors() {
        let found = ReadOutcome::Found(RegistryValue::Dword(7));
        assert!(found.is_found());
        assert_eq!(found.value(), Some(&RegistryValue::Dword(7)));
        assert!(!ReadOutcome::NotFound.is_found());
        assert_eq!(ReadOutcome::Error("x".into()).value(), None);
    }

    #[test]
    fn outcome_display() {
        assert_eq!(
            ReadOutcome::Found(RegistryValue::Dword(1)).to_string(),
            "found: dword:00000001"
        );
        assert_eq!(ReadOutcome::NotFound.to_string(), "not found");
        assert_eq!(
            ReadOutcome::Unsupported("no registry".into()).to_string(),
            "unsupported: no registry"
        );
    }

    #[test]
    fn boxed_and_borrowed_readers_delegate() {
        let store = MemoryStore::new().with_value("HKEY_USERS\\X", "a", RegistryValue::Dword(2));
        let path = KeyPath::for_entry("HKEY_USERS\\X", "a").unwrap();

        let borrowed: &dyn StoreReader = &store;
        assert!(borrowed.read(&path).is_found());

        let boxed: Box<dyn StoreReader> = Box::new(store);
        assert!(boxed.read(&path).is_found());
    }

    #[cfg(not(windows))]
    #[test]
    fn default_reader_is_unsupported_off_windows() {
        let path = KeyPath::for_entry("HKEY_USERS\\X", "a").unwrap();
        assert!(matches!(
            default_reader().read(&path),
            ReadOutcome::Unsupported(_)
        ));
    }
}
