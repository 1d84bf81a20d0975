//! End-to-end round trips through `respond` using `http` requests.

use cookieguard_core::{GuardConfig, GuardError};
use cookieguard_guard::CookieSupportGuard;
use cookieguard_http::{respond, Outcome};
use http::header::{COOKIE, LOCATION, SET_COOKIE};
use http::request::Parts;
use http::{Request, StatusCode};

fn guard() -> CookieSupportGuard {
    CookieSupportGuard::new(GuardConfig::new("hof_cookie", "hof_param")).unwrap()
}

fn parts(uri: &str, cookie: Option<&str>) -> Parts {
    let mut builder = Request::builder().uri(uri);
    if let Some(c) = cookie {
        builder = builder.header(COOKIE, c);
    }
    builder.body(()).unwrap().into_parts().0
}

fn expect_redirect(outcome: Outcome) -> (String, String) {
    match outcome {
        Outcome::Respond(response) => {
            assert_eq!(response.status(), StatusCode::FOUND);
            let location = response.headers()[LOCATION].to_str().unwrap().to_string();
            let cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
            (location, cookie)
        }
        Outcome::Continue => panic!("expected a redirect"),
    }
}

#[test]
fn browser_with_cookies_completes_round_trip() {
    let guard = guard();

    let (location, set_cookie) =
        expect_redirect(respond(&guard, &parts("/my-hof-journey?step=2", None)).unwrap());
    assert_eq!(location, "/my-hof-journey?step=2&hof_param");
    assert_eq!(set_cookie, "hof_cookie=1; Path=/");

    // Browser follows the redirect and sends the cookie back.
    let outcome = respond(&guard, &parts(&location, Some("hof_cookie=1"))).unwrap();
    assert!(matches!(outcome, Outcome::Continue));
}

#[test]
fn browser_without_cookies_fails_after_round_trip() {
    let guard = guard();

    let (location, _) = expect_redirect(respond(&guard, &parts("/my-hof-journey", None)).unwrap());
    let err = respond(&guard, &parts(&location, None)).unwrap_err();
    assert_eq!(err, GuardError::NoCookies);
    assert_eq!(err.code().unwrap().as_str(), "NO_COOKIES");
}

#[test]
fn healthcheck_without_cookies_continues_after_round_trip() {
    let guard = guard();

    let (location, _) = expect_redirect(respond(&guard, &parts("/readyz", None)).unwrap());
    assert_eq!(location, "/readyz?hof_param");
    let outcome = respond(&guard, &parts(&location, None)).unwrap();
    assert!(matches!(outcome, Outcome::Continue));
}

#[test]
fn protocol_relative_request_redirects_home() {
    let (location, _) = expect_redirect(respond(&guard(), &parts("//bbc.co.uk", None)).unwrap());
    assert_eq!(location, "/");
}
