//! Identity filters and cost queries.

use crate::cost::CostWindow;
use crate::id::UserId;
use crate::subscription::Subscription;

/// Narrows a subscription set by service name and owner.
///
/// An empty list puts no constraint on that field. Storage adapters translate
/// this into their own query language; [`SubscriptionFilter::matches`] is the
/// reference semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionFilter {
    pub service_names: Vec<String>,
    pub user_ids: Vec<UserId>,
}

impl SubscriptionFilter {
    /// A filter that lets every record through.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_names.push(name.into());
        self
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_ids.push(user_id);
        self
    }

    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.service_names.is_empty() && self.user_ids.is_empty()
    }

    #[must_use]
    pub fn matches(&self, subscription: &Subscription) -> bool {
        let name_ok = self.service_names.is_empty()
            || self
                .service_names
                .iter()
                .any(|name| *name == subscription.service_name);
        let user_ok = self.user_ids.is_empty() || self.user_ids.contains(&subscription.user_id);
        name_ok && user_ok
    }
}

/// A cost question: which records, over which months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostQuery {
    pub window: CostWindow,
    pub filter: SubscriptionFilter,
}
