//! Pagination extractor for Axum
//!
//! `PageRequest` resolves the effective offset/limit of the current request
//! from the route's [`PaginationContext`] and keeps the absolute request URL
//! around so the handler's page can be turned into a [`PaginatedResponse`]
//! with navigation links. Invalid offset/limit values are rejected with a 400
//! and a structured [`ErrorResponse`] body.

use axum::extract::FromRequestParts;
use axum::http::header::HOST;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use url::Url;

use super::{ErrorResponse, PaginatedResponse};
use crate::application::pagination::{compute_links, PaginationContext};
use crate::domain::{PageWindow, PaginatedPage, PaginationError};

/// Externally visible base URL, installed as a router extension when the
/// service runs behind a proxy. Links are resolved against it instead of the
/// `Host` header.
#[derive(Debug, Clone)]
pub struct PublicBaseUrl(pub Url);

/// Rejection for pagination failures.
#[derive(Debug)]
pub struct PaginationRejection(pub PaginationError);

impl From<PaginationError> for PaginationRejection {
    fn from(err: PaginationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PaginationRejection {
    fn into_response(self) -> Response {
        let body = ErrorResponse::from(&self.0);
        let status = StatusCode::from_u16(body.code).unwrap_or(StatusCode::BAD_REQUEST);
        tracing::debug!(error = %self.0, "rejecting paginated request");
        (status, Json(body)).into_response()
    }
}

/// An extractor carrying the effective page window of the request.
///
/// # Usage
///
/// ```ignore
/// async fn handler(page: PageRequest) -> Result<Json<PaginatedResponse<Item>>, PaginationRejection> {
///     let items = load(page.offset(), page.limit());
///     page.respond(PaginatedPage::counted(items, total))
/// }
/// ```
///
/// The route's context is read from an `Extension<PaginationContext>`; routes
/// without one use the `offset`/`limit` defaults.
#[derive(Debug, Clone)]
pub struct PageRequest {
    url: Url,
    context: PaginationContext,
    window: PageWindow,
}

impl PageRequest {
    pub fn new(url: Url, context: PaginationContext) -> Result<Self, PaginationError> {
        let window = context.window(url.query())?;
        Ok(Self {
            url,
            context,
            window,
        })
    }

    pub fn offset(&self) -> u64 {
        self.window.offset
    }

    pub fn limit(&self) -> u32 {
        self.window.limit
    }

    /// Merges `page` with its navigation links into the response envelope.
    pub fn respond<T>(
        &self,
        page: PaginatedPage<T>,
    ) -> Result<Json<PaginatedResponse<T>>, PaginationRejection> {
        let links = compute_links(
            &self.url,
            &self.context,
            self.window,
            page.total_results(),
            page.has_more(),
        )?;
        Ok(Json(PaginatedResponse::new(page, links)))
    }
}

impl<S> FromRequestParts<S> for PageRequest
where
    S: Send + Sync,
{
    type Rejection = PaginationRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<PaginationContext>()
            .cloned()
            .unwrap_or_default();
        let url = request_url(parts)?;

        Ok(PageRequest::new(url, context)?)
    }
}

/// Absolute URL of the request: the public base URL when configured, else the
/// request authority or `Host` header over plain HTTP.
///
/// The request path is appended to the base URL's path, so a proxy prefix
/// such as `https://gw.example.com/catalog/` is kept in every link.
fn request_url(parts: &Parts) -> Result<Url, PaginationError> {
    if let Some(PublicBaseUrl(base)) = parts.extensions.get::<PublicBaseUrl>() {
        let mut url = base.clone();
        let path = format!("{}{}", base.path().trim_end_matches('/'), parts.uri.path());
        url.set_path(&path);
        url.set_query(parts.uri.query());
        url.set_fragment(None);
        return Ok(url);
    }

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let host = parts
        .uri
        .authority()
        .map(|a| a.as_str().to_string())
        .or_else(|| {
            parts
                .headers
                .get(HOST)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        })
        .unwrap_or_else(|| "localhost".to_string());
    let scheme = parts.uri.scheme_str().unwrap_or("http");

    Ok(Url::parse(&format!("{}://{}{}", scheme, host, path_and_query))?)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::{Extension, Router};

    use crate::application::pagination::ParameterDecl;
    use crate::domain::ParameterKind;

    async fn counted(page: PageRequest) -> Result<Json<PaginatedResponse<u64>>, PaginationRejection> {
        let items = (page.offset()..95).take(page.limit() as usize).collect();
        page.respond(PaginatedPage::counted(items, 95))
    }

    async fn open_ended(
        page: PageRequest,
    ) -> Result<Json<PaginatedResponse<u64>>, PaginationRejection> {
        page.respond(PaginatedPage::open_ended(vec![page.offset()], true))
    }

    fn app() -> Router {
        let renamed = PaginationContext::resolve(&[
            ParameterDecl::query("start")
                .with_default("5")
                .marked_as(ParameterKind::Offset),
            ParameterDecl::query("pagesize")
                .with_default("10")
                .marked_as(ParameterKind::Limit),
        ])
        .unwrap();

        Router::new()
            .route("/counted", get(counted))
            .route("/renamed", get(open_ended).layer(Extension(renamed)))
    }

    async fn send(req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    async fn json(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("host", "api.test")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn default_window_builds_links() {
        let resp = send(get_req("/counted?sort=name")).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = json(resp).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 20);
        assert_eq!(body["totalResults"], 95);
        assert_eq!(body["hasMore"], serde_json::Value::Null);
        assert_eq!(body["firstLink"], "http://api.test/counted?sort=name&offset=0&limit=20");
        assert_eq!(body["lastLink"], "http://api.test/counted?sort=name&offset=80&limit=20");
        assert_eq!(body["prevLink"], serde_json::Value::Null);
        assert_eq!(body["nextLink"], "http://api.test/counted?sort=name&offset=20&limit=20");
    }

    #[tokio::test]
    async fn last_page_has_no_next() {
        let body = json(send(get_req("/counted?offset=80&limit=20")).await).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 15);
        assert_eq!(body["nextLink"], serde_json::Value::Null);
        assert_eq!(body["prevLink"], "http://api.test/counted?offset=60&limit=20");
    }

    #[tokio::test]
    async fn invalid_limit_returns_400() {
        let resp = send(get_req("/counted?limit=101")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = json(resp).await;
        assert_eq!(body["code"], 400);
        assert_eq!(body["errors"][0]["field"], "limit");
        assert_eq!(body["errors"][0]["code"], "value");
    }

    #[tokio::test]
    async fn invalid_offset_returns_400() {
        let resp = send(get_req("/counted?offset=abc")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = json(resp).await;
        assert_eq!(body["errors"][0]["field"], "offset");
        assert_eq!(body["errors"][0]["code"], "type");
    }

    #[tokio::test]
    async fn renamed_parameters_use_declared_defaults() {
        let body = json(send(get_req("/renamed?q=x")).await).await;
        assert_eq!(body["items"], serde_json::json!([5]));
        assert_eq!(body["firstLink"], "http://api.test/renamed?q=x&start=0&pagesize=10");
        assert_eq!(body["prevLink"], "http://api.test/renamed?q=x&start=0&pagesize=10");
        assert_eq!(body["nextLink"], "http://api.test/renamed?q=x&start=15&pagesize=10");
        assert_eq!(body["lastLink"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn renamed_parameter_errors_name_the_query_key() {
        let resp = send(get_req("/renamed?pagesize=0")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json(resp).await;
        assert_eq!(body["errors"][0]["field"], "pagesize");
    }

    #[tokio::test]
    async fn public_base_url_overrides_host() {
        let base = PublicBaseUrl(Url::parse("https://public.example.com").unwrap());
        let app = app().layer(Extension(base));

        use tower::Service;
        let mut svc = app.into_service();
        let resp = svc.call(get_req("/counted?limit=50")).await.unwrap();
        let body = json(resp).await;
        assert_eq!(body["firstLink"], "https://public.example.com/counted?limit=50&offset=0");
    }

    #[test]
    fn public_base_url_keeps_path_prefix() {
        for base in ["https://gw.example.com/catalog/", "https://gw.example.com/catalog"] {
            let (mut parts, _) = Request::builder()
                .uri("/api/v1/items?offset=20")
                .body(())
                .unwrap()
                .into_parts();
            parts
                .extensions
                .insert(PublicBaseUrl(Url::parse(base).unwrap()));

            assert_eq!(
                request_url(&parts).unwrap().as_str(),
                "https://gw.example.com/catalog/api/v1/items?offset=20"
            );
        }
    }

    #[test]
    fn request_url_defaults_to_localhost() {
        let (parts, _) = Request::builder()
            .uri("/x?a=1")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(request_url(&parts).unwrap().as_str(), "http://localhost/x?a=1");
    }
}
