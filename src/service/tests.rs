use super::{AllCookies, CookieService};
use crate::codec::{CookieEntry, CookieValue};
use crate::error::CookieError;
use crate::options::{CookieOptions, Expires, SameSite};
use crate::store::{CookieStore, MemoryCookieStore};
use serde_json::json;

fn service_with(raw: &str) -> CookieService<MemoryCookieStore> {
    CookieService::new(MemoryCookieStore::from_raw(raw))
}

/// Records every write and serves a fixed read-string.
#[derive(Default)]
struct RecordingStore {
    raw: String,
    writes: Vec<String>,
}

impl CookieStore for RecordingStore {
    fn read(&self) -> String {
        self.raw.clone()
    }

    fn write(&mut self, cookie: &str) {
        self.writes.push(cookie.to_string());
    }
}

#[test]
fn set_cookie_returns_written_string() {
    let mut service = CookieService::new(RecordingStore::default());
    let options = CookieOptions {
        expires: Some(Expires::from("2030-01-01T00:00:00Z")),
        path: Some("/".to_string()),
        same_site: Some(SameSite::Lax),
        ..Default::default()
    };

    let written = service.set_cookie("theme", "dark", Some(&options));

    assert_eq!(
        written,
        "theme=dark; expires=Tue, 01 Jan 2030 00:00:00 GMT; path=/; SameSite=Lax"
    );
    assert_eq!(service.store().expect("store").writes, vec![written]);
}

#[test]
fn set_then_get_round_trips() {
    let mut service = service_with("");
    service.set_cookie("session", "abc123", None);

    let entry = service.get_cookie_by_name("session", false).expect("cookie");
    assert_eq!(entry.value, CookieValue::Text("abc123".to_string()));
    assert!(service.get_cookie_by_name("other", false).is_none());
}

#[test]
fn set_cookie_overwrites_existing_value() {
    let mut service = service_with("a=1; b=2");
    service.set_cookie("a", "3", None);
    assert_eq!(service.get_all_cookies(true, false), AllCookies::Raw("a=3; b=2".into()));
}

#[test]
fn raw_listing_is_the_store_string_unmodified() {
    let store = RecordingStore {
        raw: "a=1;b=%20x".to_string(),
        writes: Vec::new(),
    };
    let service = CookieService::new(store);
    assert_eq!(
        service.get_all_cookies(true, true),
        AllCookies::Raw("a=1;b=%20x".to_string())
    );
}

#[test]
fn listing_parses_json_values_on_request() {
    let service = service_with("a=1; b=%7B%22x%22%3A1%7D");

    let parsed = service.get_all_cookies(false, true).into_entries();
    assert_eq!(parsed[1].value, CookieValue::Json(json!({ "x": 1 })));

    let plain = service.get_all_cookies(false, false).into_entries();
    assert_eq!(
        plain[1],
        CookieEntry {
            name: "b".to_string(),
            value: CookieValue::Text("{\"x\":1}".to_string()),
        }
    );
}

#[test]
fn empty_store_lists_nothing() {
    let service = service_with("");
    assert!(service.get_all_cookies(false, false).into_entries().is_empty());
}

#[test]
fn patch_updates_default_scope_value() {
    let mut service = service_with("a=1; b=2");
    service.patch_cookie_value("b", "patched");
    assert_eq!(
        service.get_cookie_by_name("b", false).map(|e| e.value),
        Some(CookieValue::Text("patched".to_string()))
    );
}

#[test]
fn patch_without_scope_leaves_scoped_original() {
    let mut service = service_with("");
    let scope = CookieOptions::scoped(None, Some("/app".to_string()));
    service.set_cookie("id", "1", Some(&scope));

    service.patch_cookie_value("id", "2");
    assert_eq!(service.get_all_cookies(true, false), AllCookies::Raw("id=1; id=2".into()));

    service.delete_cookie_by_name("id");
    service.patch_cookie_value_scoped("id", "3", &scope);
    assert_eq!(service.get_all_cookies(true, false), AllCookies::Raw("id=3".into()));
}

#[test]
fn delete_is_idempotent() {
    let mut service = service_with("a=1; b=2");
    service.delete_cookie_by_name("a");
    let once = service.get_all_cookies(true, false);
    service.delete_cookie_by_name("a");
    let twice = service.get_all_cookies(true, false);

    assert_eq!(once, AllCookies::Raw("b=2".into()));
    assert_eq!(once, twice);
}

#[test]
fn scoped_delete_reaches_scoped_cookie() {
    let mut service = service_with("");
    let scope = CookieOptions::scoped(Some("example.com".to_string()), Some("/app".to_string()));
    service.set_cookie("id", "1", Some(&scope));

    service.delete_cookie_by_name("id");
    assert!(service.get_cookie_by_name("id", false).is_some());

    service.delete_cookie_by_name_scoped("id", &scope);
    assert!(service.get_cookie_by_name("id", false).is_none());
}

#[test]
fn delete_all_clears_every_cookie() {
    let mut service = service_with("a=1; b=2; c=3");
    service.delete_all_cookies();
    assert!(service.get_all_cookies(false, false).into_entries().is_empty());
}

#[test]
fn delete_all_reaches_scoped_cookies() {
    let mut service = service_with("");
    service.set_cookie("id", "1", Some(&CookieOptions::scoped(None, Some("/app".into()))));
    service.set_cookie("d", "2", Some(&CookieOptions::scoped(Some("example.com".into()), None)));
    service.set_cookie(
        "both",
        "3",
        Some(&CookieOptions::scoped(Some(".Example.com".into()), Some("/".into()))),
    );
    service.set_cookie("plain", "4", None);

    service.delete_all_cookies();

    assert_eq!(service.get_all_cookies(true, false), AllCookies::Raw(String::new()));
    assert!(service.store().expect("store").is_empty());
}

#[test]
fn delete_all_writes_one_eviction_per_snapshot_entry() {
    let store = RecordingStore {
        raw: "a=1;b=2".to_string(),
        writes: Vec::new(),
    };
    let mut service = CookieService::new(store);
    service.delete_all_cookies();

    let writes = &service.store().expect("store").writes;
    assert_eq!(
        writes,
        &vec![
            "a=0; expires=Thu, 01 Jan 1970 00:00:00 GMT".to_string(),
            "b=0; expires=Thu, 01 Jan 1970 00:00:00 GMT".to_string(),
        ]
    );
}

#[test]
fn unavailable_store_turns_operations_into_no_ops() {
    let mut service: CookieService<MemoryCookieStore> = CookieService::unavailable();
    assert!(!service.is_available());

    assert_eq!(service.set_cookie("a", "1", None), "");
    assert!(service.get_cookie_by_name("a", false).is_none());
    assert_eq!(service.get_all_cookies(true, false), AllCookies::Raw(String::new()));
    assert!(service.get_all_cookies(false, false).into_entries().is_empty());
    service.patch_cookie_value("a", "2");
    service.delete_cookie_by_name("a");
    service.delete_all_cookies();

    assert!(matches!(service.store(), Err(CookieError::Unavailable)));
    assert!(matches!(service.into_store(), Err(CookieError::Unavailable)));
}
