use axum::{
    Router,
    http::header,
    response::{Html, IntoResponse},
};

/// Static page served for every health-check request.
pub const HEALTH_CHECK_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Solify Music Platform</title>
    <meta http-equiv="refresh" content="0;url=/" />
  </head>
  <body>
    <p>Redirecting to homepage...</p>
  </body>
</html>
"#;

// Every path answers with the redirect page
pub fn build_router() -> Router {
    Router::new().fallback(health_check)
}

pub async fn health_check() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-store")],
        Html(HEALTH_CHECK_PAGE),
    )
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode};

    use super::*;

    #[tokio::test]
    async fn serves_static_redirect_page() {
        let response = health_check().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains(r#"<meta http-equiv="refresh" content="0;url=/" />"#));
        assert!(body.contains("Redirecting to homepage..."));
    }
}
