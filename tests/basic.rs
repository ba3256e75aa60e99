use crumbs::{AllCookies, CookieService, CookieValue, MemoryCookieStore};

#[test]
fn test_version() {
    assert!(!crumbs::VERSION.is_empty());
}

#[test]
fn test_service_round_trip() {
    let mut service = CookieService::new(MemoryCookieStore::new());
    service.set_cookie("greeting", "hello", None);

    let entry = service
        .get_cookie_by_name("greeting", false)
        .expect("cookie should exist");
    assert_eq!(entry.value.as_text(), Some("hello"));
}

#[test]
fn test_service_parses_json_cookie() {
    let mut service = CookieService::new(MemoryCookieStore::new());
    service.set_cookie("prefs", "%7B%22theme%22%3A%22dark%22%7D", None);

    let entry = service.get_cookie_by_name("prefs", true).expect("cookie");
    match entry.value {
        CookieValue::Json(value) => assert_eq!(value["theme"], "dark"),
        other => panic!("expected JSON value, got {:?}", other),
    }
}

#[test]
fn test_delete_all_on_three_cookies() {
    let mut service = CookieService::new(MemoryCookieStore::from_raw("c=3; a=1; b=2"));
    service.delete_all_cookies();
    assert_eq!(service.get_all_cookies(true, false), AllCookies::Raw(String::new()));
}
