//! Shared application state for axum handlers.

use std::sync::Arc;

use subtrack_app::ports::SubscriptionRepository;
use subtrack_app::services::subscription_service::SubscriptionService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch. `Clone` is
/// implemented manually so the repository itself does not need to be `Clone`;
/// only the `Arc` wrapper is cloned.
pub struct AppState<SR> {
    /// Subscription CRUD and cost service.
    pub subscription_service: Arc<SubscriptionService<SR>>,
}

impl<SR> Clone for AppState<SR> {
    fn clone(&self) -> Self {
        Self {
            subscription_service: Arc::clone(&self.subscription_service),
        }
    }
}

impl<SR> AppState<SR>
where
    SR: SubscriptionRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(subscription_service: SubscriptionService<SR>) -> Self {
        Self {
            subscription_service: Arc::new(subscription_service),
        }
    }
}
