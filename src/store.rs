//! Cookie stores
//!
//! A cookie store is the host-side jar the codec reads from and writes to. It
//! has two operations: `read` returns every visible cookie concatenated as
//! `a=1; b=2`, and `write` takes one `name=value; attr...` string and merges it
//! into the jar by key, never touching other cookies.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use cookie::Cookie;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::codec;
use crate::error::{CookieError, Result};

/// Name and domain/path scope of a visible cookie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieScope {
    pub name: String,
    pub domain: Option<String>,
    pub path: Option<String>,
}

/// Host cookie store
pub trait CookieStore {
    /// Every visible cookie as `name=value` pairs joined by `"; "`.
    fn read(&self) -> String;

    /// Merge one cookie write-string into the jar.
    fn write(&mut self, cookie: &str);

    /// Every visible cookie with the scope a write needs to reach it.
    ///
    /// Stores that cannot tell scopes apart report every cookie in the
    /// default scope.
    fn scopes(&self) -> Vec<CookieScope> {
        codec::segments(&self.read())
            .map(|(name, _)| CookieScope {
                name: name.to_string(),
                ..Default::default()
            })
            .collect()
    }
}

impl<T: CookieStore + ?Sized> CookieStore for &mut T {
    fn read(&self) -> String {
        (**self).read()
    }

    fn write(&mut self, cookie: &str) {
        (**self).write(cookie)
    }

    fn scopes(&self) -> Vec<CookieScope> {
        (**self).scopes()
    }
}

impl<T: CookieStore + ?Sized> CookieStore for Box<T> {
    fn read(&self) -> String {
        (**self).read()
    }

    fn write(&mut self, cookie: &str) {
        (**self).write(cookie)
    }

    fn scopes(&self) -> Vec<CookieScope> {
        (**self).scopes()
    }
}

/// A cookie as held by [`MemoryCookieStore`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub expires: Option<OffsetDateTime>,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
}

impl StoredCookie {
    fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires.map_or(false, |expires| expires <= now)
    }

    fn same_key(&self, other: &StoredCookie) -> bool {
        self.name == other.name && self.domain == other.domain && self.path == other.path
    }
}

/// In-memory jar with browser-like merge semantics.
///
/// Cookies are keyed by `(name, domain, path)`; a missing domain or path is the
/// default scope. Writing an existing key replaces it in place, writing an
/// already-expired cookie removes the key.
///
/// Unlike a browser's `document.cookie`, writes are not made from a script
/// context: `HttpOnly` writes are accepted, and a nameless write such as
/// `=x` is dropped because it does not parse as a cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCookieStore {
    cookies: Vec<StoredCookie>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a jar from an existing read-string such as `a=1; b=2`.
    pub fn from_raw(raw: &str) -> Self {
        let mut store = Self::new();
        for (name, value) in codec::segments(raw) {
            store.write(&codec::serialize(name.trim_end(), value, None));
        }
        store
    }

    /// Stored cookies, including any that have expired but were not yet evicted.
    pub fn cookies(&self) -> &[StoredCookie] {
        &self.cookies
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Drop every cookie whose expiry has passed.
    pub fn purge_expired(&mut self) {
        let now = OffsetDateTime::now_utc();
        self.cookies.retain(|cookie| !cookie.is_expired(now));
    }

    fn parse_write(input: &str, now: OffsetDateTime) -> Option<StoredCookie> {
        let parsed = match Cookie::parse(input) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::debug!("Ignoring malformed cookie write: {}", err);
                return None;
            }
        };

        // Max-Age takes precedence over Expires.
        let expires = match parsed.max_age() {
            Some(max_age) if max_age <= Duration::ZERO => Some(OffsetDateTime::UNIX_EPOCH),
            Some(max_age) => now.checked_add(max_age),
            None => parsed.expires_datetime(),
        };

        Some(StoredCookie {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain: parsed
                .domain()
                .filter(|d| !d.is_empty())
                .map(str::to_lowercase),
            path: parsed.path().filter(|p| !p.is_empty()).map(str::to_string),
            expires,
            secure: parsed.secure().unwrap_or(false),
            http_only: parsed.http_only().unwrap_or(false),
            same_site: parsed.same_site().map(|s| s.to_string()),
        })
    }
}

impl CookieStore for MemoryCookieStore {
    fn read(&self) -> String {
        let now = OffsetDateTime::now_utc();
        self.cookies
            .iter()
            .filter(|cookie| !cookie.is_expired(now))
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn scopes(&self) -> Vec<CookieScope> {
        let now = OffsetDateTime::now_utc();
        self.cookies
            .iter()
            .filter(|cookie| !cookie.is_expired(now))
            .map(|cookie| CookieScope {
                name: cookie.name.clone(),
                domain: cookie.domain.clone(),
                path: cookie.path.clone(),
            })
            .collect()
    }

    fn write(&mut self, input: &str) {
        let now = OffsetDateTime::now_utc();
        let Some(cookie) = Self::parse_write(input, now) else {
            return;
        };

        self.cookies.retain(|existing| !existing.is_expired(now));

        let position = self.cookies.iter().position(|c| c.same_key(&cookie));
        match (position, cookie.is_expired(now)) {
            (Some(index), true) => {
                log::debug!("Evicting cookie {}", cookie.name);
                self.cookies.remove(index);
            }
            (Some(index), false) => self.cookies[index] = cookie,
            (None, true) => {}
            (None, false) => self.cookies.push(cookie),
        }
    }
}

/// A [`MemoryCookieStore`] persisted as JSON on disk.
///
/// Writes only touch memory until [`FileCookieStore::save`] is called.
#[derive(Debug)]
pub struct FileCookieStore {
    path: PathBuf,
    jar: MemoryCookieStore,
}

impl FileCookieStore {
    /// Load the jar at `path`. A missing or empty file is an empty jar.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let jar = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => MemoryCookieStore::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No cookie jar at {:?}, starting empty", path);
                MemoryCookieStore::new()
            }
            Err(err) => return Err(CookieError::Io(err)),
        };
        Ok(Self { path, jar })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn jar(&self) -> &MemoryCookieStore {
        &self.jar
    }

    /// Write the jar back to disk, replacing the file atomically.
    pub fn save(&mut self) -> Result<()> {
        self.jar.purge_expired();

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut temp, &self.jar)?;
        temp.write_all(b"\n")?;
        temp.persist(&self.path)
            .map_err(|err| CookieError::Io(err.error))?;

        log::debug!("Saved {} cookies to {:?}", self.jar.len(), self.path);
        Ok(())
    }
}

impl CookieStore for FileCookieStore {
    fn read(&self) -> String {
        self.jar.read()
    }

    fn write(&mut self, cookie: &str) {
        self.jar.write(cookie)
    }

    fn scopes(&self) -> Vec<CookieScope> {
        self.jar.scopes()
    }
}
