//! Use-cases for managing subscriptions and their cost.

use subtrack_domain::cost;
use subtrack_domain::error::{NotFoundError, SubtrackError};
use subtrack_domain::filter::{CostQuery, SubscriptionFilter};
use subtrack_domain::id::SubscriptionId;
use subtrack_domain::subscription::{Subscription, SubscriptionPatch};

use crate::ports::SubscriptionRepository;

/// Application service for subscription CRUD and cost aggregation.
pub struct SubscriptionService<R> {
    repo: R,
}

impl<R: SubscriptionRepository> SubscriptionService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new subscription after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SubtrackError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, subscription), fields(service_name = %subscription.service_name))]
    pub async fn create_subscription(
        &self,
        subscription: Subscription,
    ) -> Result<Subscription, SubtrackError> {
        subscription.validate()?;
        self.repo.create(subscription).await
    }

    /// Look up a subscription by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`SubtrackError::NotFound`] when no subscription with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_subscription(&self, id: SubscriptionId) -> Result<Subscription, SubtrackError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Subscription",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List subscriptions accepted by `filter`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_subscriptions(
        &self,
        filter: SubscriptionFilter,
    ) -> Result<Vec<Subscription>, SubtrackError> {
        if filter.is_unconstrained() {
            self.repo.get_all().await
        } else {
            self.repo.find_matching(filter).await
        }
    }

    /// Apply a partial update to an existing subscription.
    ///
    /// # Errors
    ///
    /// Returns [`SubtrackError::NotFound`] when `id` is unknown,
    /// [`SubtrackError::Validation`] if the patched record breaks an
    /// invariant, or a storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_subscription(
        &self,
        id: SubscriptionId,
        patch: SubscriptionPatch,
    ) -> Result<Subscription, SubtrackError> {
        let mut subscription = self.get_subscription(id).await?;
        subscription.apply(patch)?;
        self.repo.update(subscription).await
    }

    /// Delete a subscription by id.
    ///
    /// # Errors
    ///
    /// Returns [`SubtrackError::NotFound`] when `id` is unknown, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_subscription(&self, id: SubscriptionId) -> Result<(), SubtrackError> {
        self.repo.delete(id).await
    }

    /// Total cost of the subscriptions selected by `query.filter` over
    /// `query.window`.
    ///
    /// # Errors
    ///
    /// Returns the repository error unchanged if the lookup fails; the
    /// computation itself cannot fail.
    #[tracing::instrument(skip(self, query), fields(start = %query.window.start(), end = %query.window.end()))]
    pub async fn cumulate_cost(&self, query: CostQuery) -> Result<i64, SubtrackError> {
        let subscriptions = self.repo.find_matching(query.filter).await?;
        let total = cost::cumulate(&query.window, &subscriptions);
        tracing::debug!(candidates = subscriptions.len(), total, "cumulated subscription cost");
        Ok(total)
    }
}
