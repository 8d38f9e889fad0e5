//! regkit value model
//!
//! Typed registry values and the `.reg` literal grammar they encode to.
//!
//! # Core Concepts
//!
//! - [`RegistryValue`]: decoded value read from a live store
//! - [`encode`]: value → literal text, bit-exact with the on-disk grammar
//! - [`KeyPath`]: root / subpath / value-name address of one value
//! - [`RootKey`]: closed set of recognized registry roots
//! - [`Diagnostic`]: structured message returned by operations instead of logging
//!
//! # Example
//!
//! ```
//! use regkit_value::{KeyPath, RegistryValue};
//!
//! let path = KeyPath::parse(r"HKEY_CURRENT_USER\Software\Example\Flag").unwrap();
//! assert_eq!(path.value_name(), "Flag");
//! assert_eq!(RegistryValue::Dword(1).to_literal(), "dword:00000001");
//! ```

#![warn(unreachable_pub)]

// Core modules
mod diagnostic;
mod path;
mod value;

// Re-exports
pub use diagnostic::{Diagnostic, Location, Severity};
pub use path::{KeyPath, KeyPathError, RootKey, DEFAULT_VALUE_NAME, PATH_SEPARATOR};
pub use value::{encode, hex_list, type_tag, RegistryValue};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn path_and_value_together() {
        let path = KeyPath::parse(r"HKEY_LOCAL_MACHINE\Software\Vendor\Timeout").unwrap();
        let value = RegistryValue::from_raw(type_tag::REG_DWORD, &[0x10, 0, 0, 0]);

        assert_eq!(path.root_key(), Ok(RootKey::LocalMachine));
        assert_eq!(encode(&value), "dword:00000010");
    }
}
