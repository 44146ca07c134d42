//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod subscriptions;

use axum::Router;
use axum::routing::{get, post};

use subtrack_app::ports::SubscriptionRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<SR>() -> Router<AppState<SR>>
where
    SR: SubscriptionRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/subscriptions",
            get(subscriptions::list::<SR>).post(subscriptions::create::<SR>),
        )
        .route("/subscriptions/cost", post(subscriptions::cost::<SR>))
        .route(
            "/subscriptions/{id}",
            get(subscriptions::get::<SR>)
                .patch(subscriptions::update::<SR>)
                .delete(subscriptions::delete::<SR>),
        )
}
