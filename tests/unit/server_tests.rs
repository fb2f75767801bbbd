// Server module unit tests
// Routing and response conversion for the Pingora application

use http::header::{ALLOW, CONTENT_LENGTH, CONTENT_TYPE};
use http::{Method, StatusCode};
use rstest::rstest;
use watermark_preview::config::Config;
use watermark_preview::server::{build_service, route, GalleryApp, Route};

use super::fixtures::*;

fn app() -> GalleryApp {
    GalleryApp::new(default_gallery(&default_assets()))
}

// Test: Only GET / reaches the gallery
#[rstest]
#[case(Method::GET, "/", Route::Gallery)]
#[case(Method::POST, "/", Route::MethodNotAllowed)]
#[case(Method::PUT, "/", Route::MethodNotAllowed)]
#[case(Method::HEAD, "/", Route::MethodNotAllowed)]
#[case(Method::GET, "/favicon.ico", Route::NotFound)]
#[case(Method::GET, "/images/", Route::NotFound)]
#[case(Method::DELETE, "/admin", Route::NotFound)]
fn test_route_table(#[case] method: Method, #[case] path: &str, #[case] expected: Route) {
    assert_eq!(route(&method, path), expected);
}

// Test: GET / renders the page through the blocking pool
#[tokio::test]
async fn test_get_root_renders_page() {
    let response = app().handle(&Method::GET, "/").await;

    assert_eq!(response.status, 200);
    assert_eq!(data_uri_payloads(&response.body).len(), 2);

    let http_response = response.into_http_response();
    assert_eq!(http_response.status(), StatusCode::OK);
    assert_eq!(
        http_response.headers().get(CONTENT_TYPE).unwrap(),
        "text/html; charset=utf-8"
    );
    let length: usize = http_response
        .headers()
        .get(CONTENT_LENGTH)
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(length, http_response.body().len());
}

// Test: Rendering failures stay scoped to the request
#[tokio::test]
async fn test_render_failure_is_500_and_app_keeps_serving() {
    let reader = default_assets();
    let app = GalleryApp::new(default_gallery(&reader));

    reader.remove("image.jpg");
    let failed = app.handle(&Method::GET, "/").await;
    assert_eq!(failed.status, 500);
    assert_eq!(failed.body, "Error rendering images");

    reader.insert("image.jpg", jpeg_bytes(base_photo()));
    let recovered = app.handle(&Method::GET, "/").await;
    assert_eq!(recovered.status, 200);
}

// Test: Other methods on / are 405 with an Allow header
#[test]
fn test_post_root_is_method_not_allowed() {
    let response = tokio_test::block_on(app().handle(&Method::POST, "/"));
    assert_eq!(response.status, 405);

    let http_response = response.into_http_response();
    assert_eq!(http_response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(http_response.headers().get(ALLOW).unwrap(), "GET");
}

// Test: Unknown paths are 404
#[test]
fn test_unknown_path_is_not_found() {
    let response = tokio_test::block_on(app().handle(&Method::GET, "/nope"));
    assert_eq!(response.status, 404);
    assert!(response.allow.is_none());
}

// Test: GalleryApp can be built from the default configuration
#[test]
fn test_app_from_default_config() {
    let config = Config::default();
    let app = GalleryApp::from_config(&config).unwrap();
    assert_eq!(app.gallery().config().output_format, "jpeg");
}

// Test: An invalid text color is rejected when building the app
#[test]
fn test_app_from_config_rejects_bad_color() {
    let mut config = Config::default();
    config.gallery.text.color = "not-a-color".to_string();
    assert!(GalleryApp::from_config(&config).is_err());
}

// Test: The listening service picks up threads from configuration
#[test]
fn test_build_service_uses_configured_threads() {
    let mut config = Config::default();
    config.server.address = "127.0.0.1".to_string();
    config.server.port = 18080;
    config.server.threads = 2;

    let service = build_service(&config, app());
    assert_eq!(service.threads, Some(2));
}
