//! crumbs - document-style cookie reading and writing
//!
//! This crate builds `name=value; attr...` cookie write-strings, parses the
//! concatenated `a=1; b=2` read-string of a cookie store back into entries,
//! and exposes the usual set/get/patch/delete operations over any
//! [`store::CookieStore`].

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod logging;
pub mod options;
pub mod output;
pub mod service;
pub mod store;
pub mod utils;

pub use codec::{CookieEntry, CookieValue};
pub use error::{CookieError, Result};
pub use options::{CookieOptions, Expires, SameSite};
pub use service::{AllCookies, CookieService};
pub use store::{CookieScope, CookieStore, FileCookieStore, MemoryCookieStore};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
