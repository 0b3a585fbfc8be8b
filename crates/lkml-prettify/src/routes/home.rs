//! Form page and thread lookup.
//!
//! Handles `GET /?q=<url>`. The page is always rendered with 200 unless the
//! archive cannot be reached; invalid URLs and missing threads simply render
//! the form without a result panel.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::PrettifyError;
use crate::fetch::fetch_thread;
use crate::markup::prettify;
use crate::render::{self, components::CSP_HEADER};
use crate::state::{AppState, Email};
use crate::validate::is_valid_url;

/// Render the form page, prettifying the thread named by `q` when possible.
///
/// The query is taken as raw pairs so a repeated `q` picks the first value
/// instead of failing extraction.
pub async fn home_page(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, PrettifyError> {
    let url = first_param(params, "q").unwrap_or_default();
    let resolved = lookup(&state, &url).await?;
    let email = resolved.as_ref().map(|r| &r.email);
    let cacheable = resolved.as_ref().is_some_and(|r| r.cacheable);
    let html = render::render_home(email).into_string();
    Ok(build_response(html, cacheable))
}

/// A thread ready to render.
struct Resolved {
    email: Email,
    /// False when the archive answered with a non-2xx page.
    cacheable: bool,
}

/// First value of `name` among decoded query pairs.
fn first_param(params: Vec<(String, String)>, name: &str) -> Option<String> {
    params
        .into_iter()
        .find_map(|(key, value)| (key == name).then_some(value))
}

/// Resolve `url` to a prettified thread.
///
/// Returns `Ok(None)` for URLs outside the trusted prefix and for threads the
/// archive reports as missing.
async fn lookup(state: &AppState, url: &str) -> Result<Option<Resolved>, PrettifyError> {
    if !is_valid_url(url, &state.config.trusted_prefix) {
        if !url.is_empty() {
            tracing::debug!(url = %url, "rejected url outside trusted prefix");
        }
        return Ok(None);
    }

    if let Some(cached) = state.cache.get(url).await {
        let age = chrono::Utc::now() - cached.fetched_at;
        tracing::debug!(url = %url, age_secs = age.num_seconds(), "cache hit");
        return Ok(Some(Resolved {
            email: cached,
            cacheable: true,
        }));
    }

    tracing::debug!(url = %url, "cache miss, fetching");

    let Some(fetched) = fetch_thread(&state.http, url).await? else {
        return Ok(None);
    };

    let email = Email {
        url: url.to_string(),
        content: prettify(&fetched.body),
        fetched_at: chrono::Utc::now(),
    };

    // Error pages are still rendered, but only 2xx bodies are worth keeping.
    let cacheable = fetched.is_success();
    if cacheable {
        state.cache.insert(url.to_string(), email.clone()).await;
    }

    Ok(Some(Resolved { email, cacheable }))
}

/// Build an HTTP response with HTML content and security/cache headers.
fn build_response(html: String, cacheable: bool) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // Security headers
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CSP_HEADER),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    let cache_control = if cacheable {
        "public, max-age=60"
    } else {
        "no-cache"
    };
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );

    (StatusCode::OK, headers, html).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::first_param;
    use crate::config::Config;
    use crate::routes::router;
    use crate::state::AppState;

    const THREAD: &str = "<html><body><pre>Hi all,\n\
                          diff --git a/mm/slab.c b/mm/slab.c\n\
                          <span class=\"hunk\">@@ -10,2 +10,2 @@</span>\n\
                          -\told();\n\
                          +\tnew();\n\
                          \tunrelated\n\
                          Thanks\n\
                          </pre></body></html>";

    fn app_for(prefix: String) -> axum::Router {
        let config = Config {
            trusted_prefix: prefix,
            ..Config::default()
        };
        router(AppState::new(config).unwrap())
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_no_query_renders_form() {
        let app = app_for("https://lore.kernel.org/lkml/".to_string());
        let (status, headers, body) = get(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        assert!(headers.contains_key(header::ETAG));
        assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
        assert!(body.contains("Prettify!"));
        assert!(!body.contains("class=\"result\""));
    }

    #[tokio::test]
    async fn test_empty_query_renders_form() {
        let app = app_for("https://lore.kernel.org/lkml/".to_string());
        let (status, _, body) = get(app, "/?q=").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("class=\"result\""));
    }

    #[tokio::test]
    async fn test_disallowed_url_is_not_fetched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("+x"))
            .expect(0)
            .mount(&server)
            .await;

        let app = app_for(format!("{}/lkml/", server.uri()));
        let (status, _, body) = get(app, &format!("/?q={}/netdev/x", server.uri())).await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("class=\"result\""));
        assert!(body.contains("value=\"\""));
    }

    #[tokio::test]
    async fn test_upstream_not_found_renders_form() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lkml/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("+ignored"))
            .mount(&server)
            .await;

        let app = app_for(format!("{}/lkml/", server.uri()));
        let (status, _, body) = get(app, &format!("/?q={}/lkml/missing", server.uri())).await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("class=\"result\""));
        assert!(!body.contains("+ignored"));
    }

    #[tokio::test]
    async fn test_thread_is_prettified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lkml/E1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(THREAD))
            .mount(&server)
            .await;

        let url = format!("{}/lkml/E1", server.uri());
        let app = app_for(format!("{}/lkml/", server.uri()));
        let (status, headers, body) = get(app, &format!("/?q={url}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers.get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=60"
        );
        assert!(body.contains(&format!("value=\"{url}\"")));
        assert!(body.contains("class=\"result\""));
        assert!(body.contains(">diff --git a/mm/slab.c b/mm/slab.c</pre>"));
        assert!(body.contains("<pre style='color: #a0b;'>@@ -10,2 +10,2 @@</pre>"));
        assert!(body.contains("<pre style='background-color: #fdd'>-\told();</pre>"));
        assert!(body.contains("<pre style='background-color: #dfd;'>+\tnew();</pre>"));
        assert!(!body.contains("Hi all,"));
        assert!(!body.contains("unrelated"));
        assert!(!body.contains("Thanks"));
    }

    #[tokio::test]
    async fn test_repeat_request_served_from_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lkml/E2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("+cached"))
            .expect(1)
            .mount(&server)
            .await;

        let app = app_for(format!("{}/lkml/", server.uri()));
        let uri = format!("/?q={}/lkml/E2", server.uri());

        let (_, first_headers, first) = get(app.clone(), &uri).await;
        let (_, second_headers, second) = get(app, &uri).await;

        assert!(first.contains("+cached</pre>"));
        assert_eq!(first, second);
        assert_eq!(
            first_headers.get(header::ETAG),
            second_headers.get(header::ETAG)
        );
    }

    #[tokio::test]
    async fn test_upstream_error_status_body_processed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<h1>down</h1>\n-maintenance"))
            .mount(&server)
            .await;

        let app = app_for(format!("{}/lkml/", server.uri()));
        let (status, _, body) = get(app, &format!("/?q={}/lkml/E3", server.uri())).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<pre style='background-color: #fdd'>-maintenance</pre>"));
    }

    #[tokio::test]
    async fn test_upstream_error_status_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lkml/E5"))
            .respond_with(ResponseTemplate::new(503).set_body_string("-maintenance"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/lkml/E5"))
            .respond_with(ResponseTemplate::new(200).set_body_string("+real patch"))
            .mount(&server)
            .await;

        let app = app_for(format!("{}/lkml/", server.uri()));
        let uri = format!("/?q={}/lkml/E5", server.uri());

        let (_, first_headers, first) = get(app.clone(), &uri).await;
        let (_, _, second) = get(app, &uri).await;

        assert!(first.contains("-maintenance</pre>"));
        assert_eq!(first_headers.get(header::CACHE_CONTROL).unwrap(), "no-cache");
        assert!(second.contains("+real patch</pre>"));
        assert!(!second.contains("-maintenance"));
    }

    #[tokio::test]
    async fn test_repeated_query_uses_first_value() {
        let app = app_for("https://lore.kernel.org/lkml/".to_string());
        let (status, headers, body) = get(app, "/?q=&q=https://lore.kernel.org/lkml/x").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        assert!(!body.contains("class=\"result\""));
    }

    #[tokio::test]
    async fn test_repeated_query_fetches_first_value() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lkml/first"))
            .respond_with(ResponseTemplate::new(200).set_body_string("+first"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/lkml/second"))
            .respond_with(ResponseTemplate::new(200).set_body_string("+second"))
            .expect(0)
            .mount(&server)
            .await;

        let app = app_for(format!("{}/lkml/", server.uri()));
        let uri = format!(
            "/?q={base}/lkml/first&q={base}/lkml/second",
            base = server.uri()
        );
        let (status, _, body) = get(app, &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("+first</pre>"));
    }

    #[test]
    fn test_first_param() {
        let pairs = vec![
            ("x".to_string(), "1".to_string()),
            ("q".to_string(), "a".to_string()),
            ("q".to_string(), "b".to_string()),
        ];
        assert_eq!(first_param(pairs, "q").as_deref(), Some("a"));
        assert_eq!(first_param(Vec::new(), "q"), None);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let app = app_for("http://127.0.0.1:1/lkml/".to_string());
        let (status, _, body) = get(app, "/?q=http://127.0.0.1:1/lkml/E4").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("Archive Unavailable"));
    }
}
