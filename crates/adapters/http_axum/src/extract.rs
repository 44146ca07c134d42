//! Extractors that report decoding failures through [`ApiError`].
//!
//! axum's own `Json` and `Query` reject with 422/415 and a plain-text body.
//! These wrappers turn every rejection into a 400 with the JSON error body.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use subtrack_domain::error::ValidationError;

use crate::error::ApiError;

/// JSON request body.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(malformed(&rejection)),
        }
    }
}

/// URL query string.
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(malformed_query(&rejection)),
        }
    }
}

fn malformed(rejection: &JsonRejection) -> ApiError {
    ValidationError::MalformedRequest(rejection.body_text()).into()
}

fn malformed_query(rejection: &QueryRejection) -> ApiError {
    ValidationError::MalformedRequest(rejection.body_text()).into()
}
