//! Cookie service
//!
//! The public operation surface. Every operation is best-effort: a missing
//! store logs a warning and the call becomes a no-op returning an empty result.

use crate::codec::{self, CookieEntry};
use crate::error::{CookieError, Result};
use crate::options::CookieOptions;
use crate::store::CookieStore;

/// Result of [`CookieService::get_all_cookies`]
#[derive(Debug, Clone, PartialEq)]
pub enum AllCookies {
    /// The store's read-string, unmodified
    Raw(String),
    Entries(Vec<CookieEntry>),
}

impl AllCookies {
    /// Entries, parsing the raw form if needed.
    pub fn into_entries(self) -> Vec<CookieEntry> {
        match self {
            AllCookies::Raw(raw) => codec::deserialize(&raw, false),
            AllCookies::Entries(entries) => entries,
        }
    }
}

/// Reads and writes cookies through a [`CookieStore`]
#[derive(Debug)]
pub struct CookieService<S> {
    store: Option<S>,
}

impl<S: CookieStore> CookieService<S> {
    pub fn new(store: S) -> Self {
        Self { store: Some(store) }
    }

    /// A service with no cookie store behind it.
    pub fn unavailable() -> Self {
        Self { store: None }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Result<&S> {
        self.store.as_ref().ok_or(CookieError::Unavailable)
    }

    pub fn into_store(self) -> Result<S> {
        self.store.ok_or(CookieError::Unavailable)
    }

    /// Write a cookie and return the string handed to the store.
    ///
    /// Returns an empty string when there is no store to write to.
    pub fn set_cookie(
        &mut self,
        name: &str,
        value: &str,
        options: Option<&CookieOptions>,
    ) -> String {
        let Some(store) = self.store_mut() else {
            return String::new();
        };
        let cookie = codec::serialize(name, value, options);
        log::debug!("Writing cookie {}", name);
        store.write(&cookie);
        cookie
    }

    /// First cookie called `name`.
    pub fn get_cookie_by_name(&self, name: &str, parse_cookies: bool) -> Option<CookieEntry> {
        let raw = self.read()?;
        codec::find_by_name(&raw, name, parse_cookies)
    }

    /// All cookies, either as the raw read-string or as entries.
    ///
    /// `parse_cookies` is ignored when `raw` is set.
    pub fn get_all_cookies(&self, raw: bool, parse_cookies: bool) -> AllCookies {
        let current = self.read().unwrap_or_default();
        if raw {
            AllCookies::Raw(current)
        } else {
            AllCookies::Entries(codec::deserialize(&current, parse_cookies))
        }
    }

    /// Overwrite the value of `name` in the default scope.
    ///
    /// A cookie originally written with its own domain or path is left alone
    /// and a second, default-scope cookie appears next to it. Use
    /// [`CookieService::patch_cookie_value_scoped`] to target the original.
    pub fn patch_cookie_value(&mut self, name: &str, value: &str) {
        self.set_cookie(name, value, None);
    }

    /// Overwrite the value of `name` in the domain/path scope of `scope`.
    pub fn patch_cookie_value_scoped(&mut self, name: &str, value: &str, scope: &CookieOptions) {
        let options = CookieOptions::scoped(scope.domain.clone(), scope.path.clone());
        self.set_cookie(name, value, Some(&options));
    }

    /// Evict `name` from the default scope.
    pub fn delete_cookie_by_name(&mut self, name: &str) {
        self.write(&codec::deletion_string(name));
    }

    /// Evict `name` from the domain/path scope of `scope`.
    pub fn delete_cookie_by_name_scoped(&mut self, name: &str, scope: &CookieOptions) {
        self.write(&codec::deletion_string_scoped(name, Some(scope)));
    }

    /// Evict every cookie currently visible, in whatever scope it was set.
    pub fn delete_all_cookies(&mut self) {
        // Snapshot first: deleting mutates the store being listed.
        let snapshot = match &self.store {
            Some(store) => store.scopes(),
            None => {
                log::warn!("cookie store is unavailable");
                return;
            }
        };
        for scope in snapshot {
            let options = CookieOptions::scoped(scope.domain, scope.path);
            self.delete_cookie_by_name_scoped(&scope.name, &options);
        }
    }

    fn read(&self) -> Option<String> {
        match &self.store {
            Some(store) => Some(store.read()),
            None => {
                log::warn!("cookie store is unavailable");
                None
            }
        }
    }

    fn write(&mut self, cookie: &str) {
        if let Some(store) = self.store_mut() {
            store.write(cookie);
        }
    }

    fn store_mut(&mut self) -> Option<&mut S> {
        if self.store.is_none() {
            log::warn!("cookie store is unavailable");
        }
        self.store.as_mut()
    }
}

#[cfg(test)]
mod tests;
