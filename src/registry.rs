//! [`BlobStore`] backed by the Windows registry.

use crate::config::NightLightConfig;
use crate::error::StoreError;
use crate::store::{BlobKey, BlobStore};

use log::trace;
use windows_sys::Win32::{
    Foundation::{ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_PATH_NOT_FOUND, ERROR_SUCCESS},
    System::Registry::{
        HKEY, HKEY_CURRENT_USER, KEY_READ, KEY_WRITE, REG_BINARY, REG_SAM_FLAGS, RegCloseKey,
        RegOpenKeyExW, RegQueryValueExW, RegSetValueExW,
    },
};

/// Night light blobs stored in the current user's CloudStore keys.
///
/// Each call opens the key, does one read or write and closes it again.
#[derive(Debug, Clone, Default)]
pub struct RegistryStore {
    config: NightLightConfig,
}

impl RegistryStore {
    /// Create a store using the stock key locations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store using custom key locations.
    pub fn with_config(config: NightLightConfig) -> Self {
        Self { config }
    }

    fn key_path(&self, key: BlobKey) -> &str {
        match key {
            BlobKey::State => &self.config.state_key_path,
            BlobKey::Settings => &self.config.settings_key_path,
        }
    }
}

impl BlobStore for RegistryStore {
    fn read(&self, key: BlobKey) -> Result<Vec<u8>, StoreError> {
        let handle = OpenKey::open(self.key_path(key), KEY_READ, key)?;
        let value_name = wide(&self.config.value_name);

        let mut len = 0u32;
        let status = unsafe {
            RegQueryValueExW(
                handle.0,
                value_name.as_ptr(),
                std::ptr::null(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                &mut len,
            )
        };
        check(status, key)?;

        let mut data = vec![0u8; len as usize];
        let status = unsafe {
            RegQueryValueExW(
                handle.0,
                value_name.as_ptr(),
                std::ptr::null(),
                std::ptr::null_mut(),
                data.as_mut_ptr(),
                &mut len,
            )
        };
        check(status, key)?;
        data.truncate(len as usize);

        trace!("read {} bytes from {} key", data.len(), key);
        Ok(data)
    }

    fn write(&self, key: BlobKey, data: &[u8]) -> Result<(), StoreError> {
        let handle = OpenKey::open(self.key_path(key), KEY_WRITE, key)?;
        let value_name = wide(&self.config.value_name);

        let status = unsafe {
            RegSetValueExW(
                handle.0,
                value_name.as_ptr(),
                0,
                REG_BINARY,
                data.as_ptr(),
                data.len() as u32,
            )
        };
        check(status, key)?;

        trace!("wrote {} bytes to {} key", data.len(), key);
        Ok(())
    }
}

/// An open registry key, closed on drop.
struct OpenKey(HKEY);

impl OpenKey {
    fn open(path: &str, access: REG_SAM_FLAGS, key: BlobKey) -> Result<Self, StoreError> {
        let path = wide(path);
        let mut handle: HKEY = std::ptr::null_mut();
        let status =
            unsafe { RegOpenKeyExW(HKEY_CURRENT_USER, path.as_ptr(), 0, access, &mut handle) };
        check(status, key)?;
        Ok(Self(handle))
    }
}

impl Drop for OpenKey {
    fn drop(&mut self) {
        unsafe {
            RegCloseKey(self.0);
        }
    }
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn check(status: u32, key: BlobKey) -> Result<(), StoreError> {
    match status {
        ERROR_SUCCESS => Ok(()),
        ERROR_FILE_NOT_FOUND | ERROR_PATH_NOT_FOUND => Err(StoreError::NotFound(key)),
        ERROR_ACCESS_DENIED => Err(StoreError::AccessDenied(key)),
        code => Err(StoreError::Io {
            key,
            source: std::io::Error::from_raw_os_error(code as i32),
        }),
    }
}
