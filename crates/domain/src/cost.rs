//! Cost engine. Prorates monthly prices over a query window.
//!
//! Two steps per subscription:
//!
//! 1. [`resolve_overlap`] clips the subscription's lifetime to the window.
//! 2. [`contribution`] turns the clipped span into whole months and multiplies
//!    by the monthly price.
//!
//! [`cumulate`] sums the strictly positive contributions. An inverted overlap
//! (the subscription lies outside the window) yields zero or negative months
//! and is dropped, so there is no separate "no overlap" case.
//!
//! Billing is month-bucket: the day of month never matters and the month count
//! between two months is `(y2 - y1) * 12 + (m2 - m1)`.

use crate::month::YearMonth;
use crate::subscription::Subscription;

/// The months a cost query covers.
///
/// Bounds are sorted on construction, so callers may pass them in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostWindow {
    start: YearMonth,
    end: YearMonth,
}

impl CostWindow {
    #[must_use]
    pub fn new(a: YearMonth, b: YearMonth) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[must_use]
    pub fn start(&self) -> YearMonth {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> YearMonth {
        self.end
    }

    /// Billable months in the whole window.
    #[must_use]
    pub fn months(&self) -> i64 {
        self.start.months_until(self.end)
    }
}

/// A subscription lifetime clipped to a window. May be inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub start: YearMonth,
    pub end: YearMonth,
}

impl Overlap {
    /// Whole months covered; zero or negative when nothing overlaps.
    #[must_use]
    pub fn months(&self) -> i64 {
        self.start.months_until(self.end)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Clip `[start, end)` to `window`. An open `end` runs to the window end.
#[must_use]
pub fn resolve_overlap(window: &CostWindow, start: YearMonth, end: Option<YearMonth>) -> Overlap {
    Overlap {
        start: window.start.max(start),
        end: end.map_or(window.end, |end| window.end.min(end)),
    }
}

/// What one subscription costs over `window`, or `0` if it does not overlap.
#[must_use]
pub fn contribution(window: &CostWindow, subscription: &Subscription) -> i64 {
    let overlap = resolve_overlap(window, subscription.start, subscription.end);
    if overlap.is_empty() {
        return 0;
    }
    let amount = overlap.months().saturating_mul(subscription.price);
    amount.max(0)
}

/// Total cost of `subscriptions` over `window`.
///
/// Input order does not matter. The sum saturates at [`i64::MAX`].
#[must_use]
pub fn cumulate<'a, I>(window: &CostWindow, subscriptions: I) -> i64
where
    I: IntoIterator<Item = &'a Subscription>,
{
    subscriptions
        .into_iter()
        .map(|subscription| contribution(window, subscription))
        .filter(|amount| *amount > 0)
        .fold(0_i64, i64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{SubscriptionId, UserId};

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    fn window(start: &str, end: &str) -> CostWindow {
        CostWindow::new(ym(start), ym(end))
    }

    // Built by hand so inverted lifetimes can be exercised.
    fn sub(start: &str, end: Option<&str>, price: i64) -> Subscription {
        Subscription {
            id: SubscriptionId::new(),
            service_name: "Streaming".to_string(),
            price,
            user_id: UserId::new(),
            start: ym(start),
            end: end.map(ym),
        }
    }

    #[test]
    fn should_clip_to_later_start_and_earlier_end() {
        let overlap = resolve_overlap(
            &window("01-2024", "06-2024"),
            ym("03-2024"),
            Some(ym("12-2024")),
        );
        assert_eq!(overlap.start, ym("03-2024"));
        assert_eq!(overlap.end, ym("06-2024"));
        assert_eq!(overlap.months(), 3);
        assert!(!overlap.is_empty());
    }

    #[test]
    fn should_run_open_subscription_to_window_end() {
        let overlap = resolve_overlap(&window("01-2024", "06-2024"), ym("01-2023"), None);
        assert_eq!(overlap.start, ym("01-2024"));
        assert_eq!(overlap.end, ym("06-2024"));
    }

    #[test]
    fn should_report_inverted_overlap_as_empty() {
        let overlap = resolve_overlap(&window("01-2024", "02-2024"), ym("01-2025"), None);
        assert!(overlap.is_empty());
        assert!(overlap.months() < 0);
    }

    #[test]
    fn should_prorate_closed_subscription_inside_window() {
        let total = cumulate(
            &window("01-2024", "06-2024"),
            &[sub("01-2024", Some("03-2024"), 100)],
        );
        assert_eq!(total, 200);
    }

    #[test]
    fn should_prorate_open_subscription_over_whole_window() {
        let total = cumulate(&window("01-2024", "06-2024"), &[sub("01-2023", None, 50)]);
        assert_eq!(total, 250);
    }

    #[test]
    fn should_ignore_subscription_starting_after_window() {
        let total = cumulate(&window("01-2024", "02-2024"), &[sub("01-2025", None, 999)]);
        assert_eq!(total, 0);
    }

    #[test]
    fn should_ignore_subscription_ending_before_window() {
        let total = cumulate(
            &window("01-2024", "06-2024"),
            &[sub("01-2022", Some("06-2023"), 80)],
        );
        assert_eq!(total, 0);
    }

    #[test]
    fn should_sum_qualifying_subscriptions() {
        let total = cumulate(
            &window("01-2024", "06-2024"),
            &[
                sub("01-2024", Some("03-2024"), 100),
                sub("01-2023", None, 50),
                sub("01-2025", None, 10_000),
            ],
        );
        assert_eq!(total, 450);
    }

    #[test]
    fn should_return_zero_for_empty_input() {
        assert_eq!(cumulate(&window("01-2024", "06-2024"), std::iter::empty()), 0);
    }

    #[test]
    fn should_charge_whole_window_when_lifetime_contains_it() {
        let w = window("03-2024", "09-2024");
        let s = sub("01-2020", Some("01-2030"), 7);
        assert_eq!(contribution(&w, &s), w.months() * 7);
    }

    #[test]
    fn should_not_depend_on_input_order() {
        let w = window("02-2024", "11-2024");
        let mut subs = vec![
            sub("01-2024", Some("05-2024"), 30),
            sub("06-2024", None, 70),
            sub("10-2024", Some("12-2024"), 15),
            sub("01-2019", Some("01-2020"), 500),
        ];
        let forward = cumulate(&w, &subs);
        subs.reverse();
        assert_eq!(cumulate(&w, &subs), forward);
        subs.swap(0, 2);
        assert_eq!(cumulate(&w, &subs), forward);
    }

    #[test]
    fn should_treat_inverted_window_as_sorted() {
        let subs = [sub("01-2024", Some("03-2024"), 100), sub("01-2023", None, 50)];
        let sorted = cumulate(&window("01-2024", "06-2024"), &subs);
        let inverted = cumulate(&window("06-2024", "01-2024"), &subs);
        assert_eq!(sorted, inverted);
    }

    #[test]
    fn should_drop_inverted_subscription_lifetime() {
        let total = cumulate(
            &window("01-2024", "12-2024"),
            &[sub("08-2024", Some("02-2024"), 100)],
        );
        assert_eq!(total, 0);
    }

    #[test]
    fn should_drop_subscription_touching_window_start() {
        let w = window("06-2024", "12-2024");
        assert_eq!(contribution(&w, &sub("01-2024", Some("06-2024"), 100)), 0);
    }

    #[test]
    fn should_drop_subscription_starting_at_window_end() {
        let w = window("06-2024", "12-2024");
        assert_eq!(contribution(&w, &sub("12-2024", None, 100)), 0);
    }

    #[test]
    fn should_drop_single_month_window() {
        let w = window("06-2024", "06-2024");
        assert_eq!(w.months(), 0);
        assert_eq!(contribution(&w, &sub("01-2024", None, 100)), 0);
    }

    #[test]
    fn should_count_zero_for_free_subscriptions() {
        let total = cumulate(&window("01-2024", "06-2024"), &[sub("01-2024", None, 0)]);
        assert_eq!(total, 0);
    }

    #[test]
    fn should_saturate_instead_of_wrapping() {
        let w = window("01-2024", "03-2024");
        let total = cumulate(&w, &[sub("01-2024", None, i64::MAX), sub("01-2024", None, 1)]);
        assert_eq!(total, i64::MAX);
    }
}
