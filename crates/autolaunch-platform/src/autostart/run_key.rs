//! Windows autostart store backed by the HKCU Run registry key.
//!
//! Values live under
//! `HKEY_CURRENT_USER\Software\Microsoft\Windows\CurrentVersion\Run`.
//! No elevation is required since HKCU is per-user; the machine-wide
//! HKLM key is never touched.

use autolaunch_core::{AutostartStore, RegistrationError};
use windows::Win32::Foundation::{ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, WIN32_ERROR};
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, KEY_QUERY_VALUE, KEY_SET_VALUE, REG_OPTION_NON_VOLATILE,
    REG_SAM_FLAGS, REG_SZ, RegCloseKey, RegCreateKeyExW, RegDeleteValueW, RegOpenKeyExW,
    RegQueryValueExW, RegSetValueExW,
};
use windows::core::PCWSTR;

const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

/// Autostart store over the HKCU Run key. Opens the key per operation.
///
/// A profile without a Run key has nothing registered; the key is
/// created on the first write.
#[derive(Debug, Clone)]
pub struct RunKeyStore {
    subkey: String,
}

impl Default for RunKeyStore {
    fn default() -> Self {
        Self::at(RUN_KEY)
    }
}

impl RunKeyStore {
    /// Uses another HKCU subkey instead of the Run key.
    pub fn at(subkey: impl Into<String>) -> Self {
        Self {
            subkey: subkey.into(),
        }
    }
}

impl AutostartStore for RunKeyStore {
    fn get(&self, key: &str) -> Result<Option<String>, RegistrationError> {
        match RunKey::open(&self.subkey, KEY_QUERY_VALUE)? {
            Some(run) => run.query_string(key),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), RegistrationError> {
        let run = RunKey::create(&self.subkey, KEY_SET_VALUE)?;
        run.set_string(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<bool, RegistrationError> {
        match RunKey::open(&self.subkey, KEY_SET_VALUE)? {
            Some(run) => run.delete_value(key),
            None => Ok(false),
        }
    }
}

/// An open registry key handle, closed on drop.
struct RunKey(HKEY);

impl RunKey {
    /// Opens an HKCU subkey with the given access rights, or `None` if
    /// the key doesn't exist.
    fn open(subkey: &str, access: REG_SAM_FLAGS) -> Result<Option<Self>, RegistrationError> {
        let wide_key = wide(subkey);
        let mut key = HKEY::default();
        // SAFETY: RegOpenKeyExW is a standard Win32 registry API. We pass valid
        // pointers and close the key in Drop.
        let status = unsafe {
            RegOpenKeyExW(
                HKEY_CURRENT_USER,
                PCWSTR(wide_key.as_ptr()),
                None,
                access,
                &mut key,
            )
        };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        if status.is_err() {
            return Err(map_status(status, "could not open registry key"));
        }
        Ok(Some(Self(key)))
    }

    /// Opens an HKCU subkey, creating it first if it is missing.
    fn create(subkey: &str, access: REG_SAM_FLAGS) -> Result<Self, RegistrationError> {
        let wide_key = wide(subkey);
        let mut key = HKEY::default();
        // SAFETY: RegCreateKeyExW is a standard Win32 registry API. The class
        // and security attributes are optional; the key is closed in Drop.
        let status = unsafe {
            RegCreateKeyExW(
                HKEY_CURRENT_USER,
                PCWSTR(wide_key.as_ptr()),
                None,
                PCWSTR::null(),
                REG_OPTION_NON_VOLATILE,
                access,
                None,
                &mut key,
                None,
            )
        };
        if status.is_err() {
            return Err(map_status(status, "could not create registry key"));
        }
        Ok(Self(key))
    }

    /// Reads a REG_SZ value, or `None` if it doesn't exist.
    fn query_string(&self, name: &str) -> Result<Option<String>, RegistrationError> {
        let wide_name = wide(name);
        let mut size: u32 = 0;
        // SAFETY: with a null data buffer RegQueryValueExW only reports the
        // value's size in bytes.
        let status = unsafe {
            RegQueryValueExW(
                self.0,
                PCWSTR(wide_name.as_ptr()),
                None,
                None,
                None,
                Some(&raw mut size),
            )
        };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        if status.is_err() {
            return Err(map_status(status, "could not read registry value"));
        }

        let mut buf = vec![0u16; (size as usize).div_ceil(2)];
        let mut len_bytes = (buf.len() * 2) as u32;
        // SAFETY: buf holds at least `len_bytes` bytes and outlives the call.
        let status = unsafe {
            RegQueryValueExW(
                self.0,
                PCWSTR(wide_name.as_ptr()),
                None,
                None,
                Some(buf.as_mut_ptr().cast()),
                Some(&raw mut len_bytes),
            )
        };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        if status.is_err() {
            return Err(map_status(status, "could not read registry value"));
        }

        let chars = &buf[..(len_bytes as usize / 2).min(buf.len())];
        let end = chars.iter().position(|&c| c == 0).unwrap_or(chars.len());
        Ok(Some(String::from_utf16_lossy(&chars[..end])))
    }

    /// Writes a REG_SZ value, replacing any existing one.
    fn set_string(&self, name: &str, value: &str) -> Result<(), RegistrationError> {
        let wide_name = wide(name);
        let wide_value = wide(value);
        // SAFETY: reinterpreting a &[u16] as &[u8] is safe; the layout is
        // contiguous and we compute the correct byte length.
        let bytes: &[u8] =
            unsafe { std::slice::from_raw_parts(wide_value.as_ptr().cast(), wide_value.len() * 2) };
        // SAFETY: RegSetValueExW is a standard Win32 registry API. We pass the
        // correct byte length for the wide-string value.
        let status =
            unsafe { RegSetValueExW(self.0, PCWSTR(wide_name.as_ptr()), None, REG_SZ, Some(bytes)) };
        if status.is_err() {
            return Err(map_status(status, "could not write registry value"));
        }
        Ok(())
    }

    /// Deletes a value. Returns `Ok(false)` if it didn't exist.
    fn delete_value(&self, name: &str) -> Result<bool, RegistrationError> {
        let wide_name = wide(name);
        // SAFETY: RegDeleteValueW is a standard Win32 registry API.
        let status = unsafe { RegDeleteValueW(self.0, PCWSTR(wide_name.as_ptr())) };
        if status == ERROR_FILE_NOT_FOUND {
            return Ok(false);
        }
        if status.is_err() {
            return Err(map_status(status, "could not delete registry value"));
        }
        Ok(true)
    }
}

impl Drop for RunKey {
    fn drop(&mut self) {
        // SAFETY: the handle was opened by RegOpenKeyExW or RegCreateKeyExW and
        // is closed once.
        let _ = unsafe { RegCloseKey(self.0) };
    }
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn map_status(status: WIN32_ERROR, context: &str) -> RegistrationError {
    if status == ERROR_ACCESS_DENIED {
        RegistrationError::AccessDenied(format!("{context}: {status:?}"))
    } else {
        RegistrationError::StoreUnavailable(format!("{context}: {status:?}"))
    }
}
