//! A priced service a user pays for every month over a span.

use serde::{Deserialize, Serialize};

use crate::error::{SubtrackError, ValidationError};
use crate::id::{SubscriptionId, UserId};
use crate::month::YearMonth;

/// A subscription record.
///
/// `end` is exclusive for billing purposes and `None` means the subscription
/// is still running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub service_name: String,
    /// Monthly cost in the smallest currency unit.
    pub price: i64,
    pub user_id: UserId,
    #[serde(rename = "start_date")]
    pub start: YearMonth,
    #[serde(rename = "end_date", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<YearMonth>,
}

impl Subscription {
    /// Create a builder for constructing a [`Subscription`].
    #[must_use]
    pub fn builder() -> SubscriptionBuilder {
        SubscriptionBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SubtrackError::Validation`] when the service name is blank,
    /// the price is negative, or the end month precedes the start month.
    pub fn validate(&self) -> Result<(), SubtrackError> {
        if self.service_name.trim().is_empty() {
            return Err(ValidationError::EmptyServiceName.into());
        }
        if self.price < 0 {
            return Err(ValidationError::NegativePrice(self.price).into());
        }
        if let Some(end) = self.end
            && end < self.start
        {
            return Err(ValidationError::EndBeforeStart {
                start: self.start,
                end,
            }
            .into());
        }
        Ok(())
    }

    /// Whether the subscription has no end month.
    #[must_use]
    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    /// Overwrite the fields present in `patch`, then re-check invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SubtrackError::Validation`] if the patched record breaks an
    /// invariant. `self` is left untouched in that case.
    pub fn apply(&mut self, patch: SubscriptionPatch) -> Result<(), SubtrackError> {
        let mut next = self.clone();
        if let Some(service_name) = patch.service_name {
            next.service_name = service_name;
        }
        if let Some(price) = patch.price {
            next.price = price;
        }
        if let Some(user_id) = patch.user_id {
            next.user_id = user_id;
        }
        if let Some(start) = patch.start {
            next.start = start;
        }
        if let Some(end) = patch.end {
            next.end = Some(end);
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// Partial update of a [`Subscription`]. `None` fields are kept as-is.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionPatch {
    pub service_name: Option<String>,
    pub price: Option<i64>,
    pub user_id: Option<UserId>,
    pub start: Option<YearMonth>,
    pub end: Option<YearMonth>,
}

/// Step-by-step builder for [`Subscription`].
#[derive(Debug, Default)]
pub struct SubscriptionBuilder {
    id: Option<SubscriptionId>,
    service_name: Option<String>,
    price: i64,
    user_id: Option<UserId>,
    start: Option<YearMonth>,
    end: Option<YearMonth>,
}

impl SubscriptionBuilder {
    #[must_use]
    pub fn id(mut self, id: SubscriptionId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    #[must_use]
    pub fn price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    #[must_use]
    pub fn start(mut self, start: YearMonth) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub fn end(mut self, end: YearMonth) -> Self {
        self.end = Some(end);
        self
    }

    /// Consume the builder, validate, and return a [`Subscription`].
    ///
    /// # Errors
    ///
    /// Returns [`SubtrackError::Validation`] if `user_id` or `start` is
    /// missing, or if any invariant checked by [`Subscription::validate`]
    /// fails.
    pub fn build(self) -> Result<Subscription, SubtrackError> {
        let subscription = Subscription {
            id: self.id.unwrap_or_default(),
            service_name: self.service_name.unwrap_or_default(),
            price: self.price,
            user_id: self
                .user_id
                .ok_or(ValidationError::MissingField("user_id"))?,
            start: self.start.ok_or(ValidationError::MissingField("start_date"))?,
            end: self.end,
        };
        subscription.validate()?;
        Ok(subscription)
    }
}
