//! JSON REST handlers for subscriptions.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use subtrack_app::ports::SubscriptionRepository;
use subtrack_domain::cost::CostWindow;
use subtrack_domain::error::ValidationError;
use subtrack_domain::filter::{CostQuery, SubscriptionFilter};
use subtrack_domain::id::{SubscriptionId, UserId};
use subtrack_domain::month::YearMonth;
use subtrack_domain::subscription::{Subscription, SubscriptionPatch};

use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};
use crate::state::AppState;

/// Request body for creating a subscription.
#[derive(Deserialize)]
pub struct CreateSubscriptionRequest {
    pub service_name: String,
    pub price: i64,
    pub user_id: String,
    /// `MM-YYYY`
    pub start_date: String,
    /// `MM-YYYY`; omitted for an open-ended subscription.
    pub end_date: Option<String>,
}

/// Request body for a partial update. Every field is optional.
#[derive(Deserialize)]
pub struct UpdateSubscriptionRequest {
    pub service_name: Option<String>,
    pub price: Option<i64>,
    pub user_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Optional single-value filters for the list endpoint.
#[derive(Deserialize)]
pub struct ListQuery {
    pub service_name: Option<String>,
    pub user_id: Option<String>,
}

/// Request body for the cost endpoint.
#[derive(Deserialize)]
pub struct CostRequest {
    #[serde(default)]
    pub service_names: Vec<String>,
    #[serde(default)]
    pub user_ids: Vec<String>,
    pub start_date: String,
    pub end_date: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Subscription>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Subscription>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Subscription>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Possible responses from the cost endpoint.
pub enum CostResponse {
    /// 200 OK with the total as a bare JSON number.
    Ok(Json<i64>),
}

impl IntoResponse for CostResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

fn parse_id<T>(raw: &str) -> Result<T, ValidationError>
where
    T: FromStr<Err = ValidationError>,
{
    T::from_str(raw)
}

fn parse_month(raw: &str) -> Result<YearMonth, ValidationError> {
    YearMonth::from_str(raw)
}

/// `GET /api/subscriptions?service_name=&user_id=`
pub async fn list<SR>(
    State(state): State<AppState<SR>>,
    QueryParams(params): QueryParams<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    SR: SubscriptionRepository + Send + Sync + 'static,
{
    let mut filter = SubscriptionFilter::all();
    if let Some(name) = params.service_name {
        filter = filter.with_service_name(name);
    }
    if let Some(user_id) = params.user_id.as_deref() {
        filter = filter.with_user_id(parse_id(user_id)?);
    }

    let subscriptions = state.subscription_service.list_subscriptions(filter).await?;
    Ok(ListResponse::Ok(Json(subscriptions)))
}

/// `GET /api/subscriptions/:id`
pub async fn get<SR>(
    State(state): State<AppState<SR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    SR: SubscriptionRepository + Send + Sync + 'static,
{
    let id: SubscriptionId = parse_id(&id)?;
    let subscription = state.subscription_service.get_subscription(id).await?;
    Ok(GetResponse::Ok(Json(subscription)))
}

/// `POST /api/subscriptions`
pub async fn create<SR>(
    State(state): State<AppState<SR>>,
    JsonBody(req): JsonBody<CreateSubscriptionRequest>,
) -> Result<CreateResponse, ApiError>
where
    SR: SubscriptionRepository + Send + Sync + 'static,
{
    let user_id: UserId = parse_id(&req.user_id)?;

    let mut builder = Subscription::builder()
        .service_name(req.service_name)
        .price(req.price)
        .user_id(user_id)
        .start(parse_month(&req.start_date)?);
    if let Some(end) = req.end_date.as_deref() {
        builder = builder.end(parse_month(end)?);
    }

    let subscription = builder.build()?;
    let created = state
        .subscription_service
        .create_subscription(subscription)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /api/subscriptions/:id`
pub async fn update<SR>(
    State(state): State<AppState<SR>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateSubscriptionRequest>,
) -> Result<GetResponse, ApiError>
where
    SR: SubscriptionRepository + Send + Sync + 'static,
{
    let id: SubscriptionId = parse_id(&id)?;
    let patch = SubscriptionPatch {
        service_name: req.service_name,
        price: req.price,
        user_id: req.user_id.as_deref().map(parse_id::<UserId>).transpose()?,
        start: req.start_date.as_deref().map(parse_month).transpose()?,
        end: req.end_date.as_deref().map(parse_month).transpose()?,
    };

    let updated = state
        .subscription_service
        .update_subscription(id, patch)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/subscriptions/:id`
pub async fn delete<SR>(
    State(state): State<AppState<SR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    SR: SubscriptionRepository + Send + Sync + 'static,
{
    let id: SubscriptionId = parse_id(&id)?;
    state.subscription_service.delete_subscription(id).await?;
    Ok(DeleteResponse::NoContent)
}

/// `POST /api/subscriptions/cost`
pub async fn cost<SR>(
    State(state): State<AppState<SR>>,
    JsonBody(req): JsonBody<CostRequest>,
) -> Result<CostResponse, ApiError>
where
    SR: SubscriptionRepository + Send + Sync + 'static,
{
    let window = CostWindow::new(parse_month(&req.start_date)?, parse_month(&req.end_date)?);
    let user_ids = req
        .user_ids
        .iter()
        .map(String::as_str)
        .map(parse_id::<UserId>)
        .collect::<Result<Vec<UserId>, _>>()?;
    let filter = SubscriptionFilter {
        service_names: req.service_names,
        user_ids,
    };

    let total = state
        .subscription_service
        .cumulate_cost(CostQuery { window, filter })
        .await?;
    Ok(CostResponse::Ok(Json(total)))
}
