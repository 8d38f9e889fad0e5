//! Key paths for addressing single registry values
//!
//! A full path such as `HKEY_CURRENT_USER\Software\Example\Flag` splits into
//! a root (`HKEY_CURRENT_USER`), a subpath (`Software\Example`) and a value
//! name (`Flag`).

use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Separator between path segments
pub const PATH_SEPARATOR: char = '\\';

/// Bare, unquoted name the format uses for a key's default value
///
/// Parsed snapshots and key paths carry the default value as the empty
/// name; a quoted `"@"` is an ordinary value called `@`.
pub const DEFAULT_VALUE_NAME: &str = "@";

/// Errors while building a [`KeyPath`] or resolving its root
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyPathError {
    /// Fewer than two segments, so there is no value name
    #[error("key path has no value name: '{0}'")]
    TooFewSegments(String),

    /// First segment is empty
    #[error("key path has an empty root: '{0}'")]
    EmptyRoot(String),

    /// First segment is not a recognized root key
    #[error("unknown root key: {0}")]
    UnknownRoot(String),
}

/// Recognized registry root keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RootKey {
    /// `HKEY_LOCAL_MACHINE`
    LocalMachine,
    /// `HKEY_CURRENT_USER`
    CurrentUser,
    /// `HKEY_CLASSES_ROOT`
    ClassesRoot,
    /// `HKEY_USERS`
    Users,
    /// `HKEY_CURRENT_CONFIG`
    CurrentConfig,
}

impl RootKey {
    /// Every recognized root
    pub const ALL: [RootKey; 5] = [
        Self::LocalMachine,
        Self::CurrentUser,
        Self::ClassesRoot,
        Self::Users,
        Self::CurrentConfig,
    ];

    /// Canonical name as written in `.reg` section headers
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::LocalMachine => "HKEY_LOCAL_MACHINE",
            Self::CurrentUser => "HKEY_CURRENT_USER",
            Self::ClassesRoot => "HKEY_CLASSES_ROOT",
            Self::Users => "HKEY_USERS",
            Self::CurrentConfig => "HKEY_CURRENT_CONFIG",
        }
    }

    /// Resolve a root name
    ///
    /// # Errors
    /// Returns [`KeyPathError::UnknownRoot`] for any name outside [`RootKey::ALL`]
    pub fn from_name(name: &str) -> Result<Self, KeyPathError> {
        Self::ALL
            .into_iter()
            .find(|root| root.name() == name)
            .ok_or_else(|| KeyPathError::UnknownRoot(name.to_string()))
    }
}

impl Display for RootKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RootKey {
    type Err = KeyPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Address of a single value: root, subpath and value name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    root_name: String,
    sub_path: String,
    value_name: String,
}

impl KeyPath {
    /// Create from parts
    #[inline]
    #[must_use]
    pub fn new(
        root_name: impl Into<String>,
        sub_path: impl Into<String>,
        value_name: impl Into<String>,
    ) -> Self {
        Self {
            root_name: root_name.into(),
            sub_path: sub_path.into(),
            value_name: value_name.into(),
        }
    }

    /// Split a full path: first segment is the root, last is the value name
    ///
    /// # Errors
    /// - [`KeyPathError::TooFewSegments`] if there is no separator
    /// - [`KeyPathError::EmptyRoot`] if the first segment is empty
    pub fn parse(full: &str) -> Result<Self, KeyPathError> {
        let segments: Vec<&str> = full.split(PATH_SEPARATOR).collect();
        let (root, rest) = match segments.as_slice() {
            [root, rest @ ..] if !rest.is_empty() => (*root, rest),
            _ => return Err(KeyPathError::TooFewSegments(full.to_string())),
        };
        if root.is_empty() {
            return Err(KeyPathError::EmptyRoot(full.to_string()));
        }
        let (value_name, middle) = match rest.split_last() {
            Some((last, middle)) => (*last, middle),
            None => return Err(KeyPathError::TooFewSegments(full.to_string())),
        };
        Ok(Self::new(root, middle.join("\\"), value_name))
    }

    /// Address `value_name` inside the key named by a section header
    ///
    /// Only the section is split, so value names may contain the separator.
    ///
    /// # Errors
    /// Returns [`KeyPathError::EmptyRoot`] if the section starts with a separator
    /// or is empty
    pub fn for_entry(section: &str, value_name: &str) -> Result<Self, KeyPathError> {
        let (root, sub_path) = section.split_once(PATH_SEPARATOR).unwrap_or((section, ""));
        if root.is_empty() {
            return Err(KeyPathError::EmptyRoot(section.to_string()));
        }
        Ok(Self::new(root, sub_path, value_name))
    }

    /// Root segment as written
    #[inline]
    #[must_use]
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Segments between root and value name, joined by the separator
    #[inline]
    #[must_use]
    pub fn sub_path(&self) -> &str {
        &self.sub_path
    }

    /// Value name as written
    #[inline]
    #[must_use]
    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    /// Resolve the root segment
    ///
    /// # Errors
    /// Returns [`KeyPathError::UnknownRoot`] if the root is not recognized
    #[inline]
    pub fn root_key(&self) -> Result<RootKey, KeyPathError> {
        RootKey::from_name(&self.root_name)
    }

    /// Whether this addresses the key's default (unnamed) value
    #[inline]
    #[must_use]
    pub fn is_default_value(&self) -> bool {
        self.value_name.is_empty()
    }

    /// Section path (root plus subpath) this value lives under
    #[must_use]
    pub fn section(&self) -> String {
        if self.sub_path.is_empty() {
            self.root_name.clone()
        } else {
            format!("{}{PATH_SEPARATOR}{}", self.root_name, self.sub_path)
        }
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PATH_SEPARATOR}{}", self.section(), self.value_name)
    }
}

impl FromStr for KeyPath {
    type Err = KeyPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
