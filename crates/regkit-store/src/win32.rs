//! Read-only adapter over the live Windows registry

#![allow(unsafe_code)]

use regkit_value::{KeyPath, RegistryValue, RootKey};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{
    ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_MORE_DATA, ERROR_PATH_NOT_FOUND,
    ERROR_SUCCESS, WIN32_ERROR,
};
use windows::Win32::System::Registry::{
    RegCloseKey, RegGetValueW, RegOpenKeyExW, HKEY, HKEY_CLASSES_ROOT, HKEY_CURRENT_CONFIG,
    HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, HKEY_USERS, KEY_QUERY_VALUE, REG_VALUE_TYPE,
    RRF_NOEXPAND, RRF_RT_ANY,
};

use crate::{ReadOutcome, StoreReader};

const MAX_ATTEMPTS: usize = 4;

/// The live registry, opened with query access only
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsRegistry;

impl WindowsRegistry {
    /// Create adapter
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn hkey(root: RootKey) -> HKEY {
    match root {
        RootKey::LocalMachine => HKEY_LOCAL_MACHINE,
        RootKey::CurrentUser => HKEY_CURRENT_USER,
        RootKey::ClassesRoot => HKEY_CLASSES_ROOT,
        RootKey::Users => HKEY_USERS,
        RootKey::CurrentConfig => HKEY_CURRENT_CONFIG,
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn failure(status: WIN32_ERROR, path: &KeyPath) -> ReadOutcome {
    if status == ERROR_FILE_NOT_FOUND || status == ERROR_PATH_NOT_FOUND {
        ReadOutcome::NotFound
    } else if status == ERROR_ACCESS_DENIED {
        ReadOutcome::Error(format!("access denied reading {path}"))
    } else {
        ReadOutcome::Error(format!("failed to read {path}: status={}", status.0))
    }
}

/// Open key, closed on drop
struct OpenKey(HKEY);

impl Drop for OpenKey {
    fn drop(&mut self) {
        let _ = unsafe { RegCloseKey(self.0) };
    }
}

impl OpenKey {
    fn open(root: HKEY, sub_path: &str) -> Result<Self, WIN32_ERROR> {
        let wide = to_wide(sub_path);
        let mut key = HKEY::default();
        let status = unsafe {
            RegOpenKeyExW(
                root,
                PCWSTR(wide.as_ptr()),
                Some(0),
                KEY_QUERY_VALUE,
                &mut key,
            )
        };
        if status == ERROR_SUCCESS {
            Ok(Self(key))
        } else {
            Err(status)
        }
    }

    fn query(&self, name: &str) -> Result<(u32, Vec<u8>), WIN32_ERROR> {
        let wide = to_wide(name);
        let mut value_type = REG_VALUE_TYPE(0);
        let mut size: u32 = 0;
        let status = unsafe {
            RegGetValueW(
                self.0,
                PCWSTR::null(),
                PCWSTR(wide.as_ptr()),
                RRF_RT_ANY | RRF_NOEXPAND,
                Some(&mut value_type),
                None,
                Some(&mut size),
            )
        };
        if status != ERROR_SUCCESS {
            return Err(status);
        }

        // The value can grow between the size query and the read.
        let mut last = ERROR_MORE_DATA;
        for _ in 0..MAX_ATTEMPTS {
            let mut data = vec![0u8; size as usize];
            if data.is_empty() {
                return Ok((value_type.0, data));
            }
            let status = unsafe {
                RegGetValueW(
                    self.0,
                    PCWSTR::null(),
                    PCWSTR(wide.as_ptr()),
                    RRF_RT_ANY | RRF_NOEXPAND,
                    Some(&mut value_type),
                    Some(data.as_mut_ptr().cast()),
                    Some(&mut size),
                )
            };
            if status == ERROR_SUCCESS {
                data.truncate(size as usize);
                return Ok((value_type.0, data));
            }
            if status != ERROR_MORE_DATA {
                return Err(status);
            }
            last = status;
        }
        Err(last)
    }
}

impl StoreReader for WindowsRegistry {
    fn read(&self, path: &KeyPath) -> ReadOutcome {
        let root = match path.root_key() {
            Ok(root) => root,
            Err(e) => return ReadOutcome::Error(e.to_string()),
        };
        let key = match OpenKey::open(hkey(root), path.sub_path()) {
            Ok(key) => key,
            Err(status) => return failure(status, path),
        };
        match key.query(path.value_name()) {
            Ok((tag, data)) => {
                tracing::trace!(%path, tag, bytes = data.len(), "registry value read");
                ReadOutcome::Found(RegistryValue::from_raw(tag, &data))
            }
            Err(status) => failure(status, path),
        }
    }
}
