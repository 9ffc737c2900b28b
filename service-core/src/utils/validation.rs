use anyhow::anyhow;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON extractor that runs `validator` rules after deserialization.
///
/// Malformed JSON or missing fields reject with 400, failed validation
/// rules reject with 422. Handlers receive the validated payload.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| AppError::BadRequest(anyhow!("Json parse error: {err}")))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::post, Router};
    use serde::Deserialize;
    use tower::util::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct SignupPayload {
        #[validate(email(message = "Invalid email format"))]
        email: String,
    }

    async fn accept(ValidatedJson(payload): ValidatedJson<SignupPayload>) -> String {
        payload.email
    }

    fn app() -> Router {
        Router::new().route("/signup", post(accept))
    }

    fn json_request(body: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method("POST")
            .uri("/signup")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_payload() {
        let response = app()
            .oneshot(json_request(r#"{"email":"user@example.com"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_malformed_json_with_400() {
        let response = app().oneshot(json_request("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_failed_rules_with_422() {
        let response = app()
            .oneshot(json_request(r#"{"email":"not-an-email"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
