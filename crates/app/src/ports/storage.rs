//! Repository trait for subscription persistence.

use std::future::Future;

use subtrack_domain::error::SubtrackError;
use subtrack_domain::filter::SubscriptionFilter;
use subtrack_domain::id::SubscriptionId;
use subtrack_domain::subscription::Subscription;

/// Repository for persisting and querying [`Subscription`]s.
pub trait SubscriptionRepository {
    /// Create a new subscription in storage.
    fn create(
        &self,
        subscription: Subscription,
    ) -> impl Future<Output = Result<Subscription, SubtrackError>> + Send;

    /// Get a subscription by its unique identifier.
    fn get_by_id(
        &self,
        id: SubscriptionId,
    ) -> impl Future<Output = Result<Option<Subscription>, SubtrackError>> + Send;

    /// Get all subscriptions.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Subscription>, SubtrackError>> + Send;

    /// Replace an existing subscription.
    ///
    /// Fails with [`SubtrackError::NotFound`] when no record has this id.
    fn update(
        &self,
        subscription: Subscription,
    ) -> impl Future<Output = Result<Subscription, SubtrackError>> + Send;

    /// Delete a subscription by its unique identifier.
    ///
    /// Fails with [`SubtrackError::NotFound`] when no record has this id.
    fn delete(&self, id: SubscriptionId)
    -> impl Future<Output = Result<(), SubtrackError>> + Send;

    /// Get the subscriptions accepted by `filter`.
    fn find_matching(
        &self,
        filter: SubscriptionFilter,
    ) -> impl Future<Output = Result<Vec<Subscription>, SubtrackError>> + Send;
}
