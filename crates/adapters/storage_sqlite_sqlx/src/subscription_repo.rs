//! `SQLite` implementation of [`SubscriptionRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use subtrack_app::ports::SubscriptionRepository;
use subtrack_domain::error::{NotFoundError, SubtrackError, ValidationError};
use subtrack_domain::filter::SubscriptionFilter;
use subtrack_domain::id::{SubscriptionId, UserId};
use subtrack_domain::month::YearMonth;
use subtrack_domain::subscription::Subscription;

use crate::error::StorageError;

/// Months are stored as `YYYY-MM` so that text ordering is calendar ordering.
fn encode_month(month: YearMonth) -> String {
    format!("{:04}-{:02}", month.year(), month.month())
}

fn decode_month(raw: &str) -> Result<YearMonth, sqlx::Error> {
    let invalid = || sqlx::Error::Decode(Box::new(ValidationError::InvalidMonth(raw.to_owned())));
    let (year, month) = raw.rsplit_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    YearMonth::new(year, month).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Wrapper for converting database rows into domain [`Subscription`].
struct Wrapper(Subscription);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Subscription> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let service_name: String = row.try_get("service_name")?;
        let price: i64 = row.try_get("price")?;
        let user_id: String = row.try_get("user_id")?;
        let start_month: String = row.try_get("start_month")?;
        let end_month: Option<String> = row.try_get("end_month")?;

        let id =
            SubscriptionId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let user_id = UserId::from_str(&user_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Subscription {
            id,
            service_name,
            price,
            user_id,
            start: decode_month(&start_month)?,
            end: end_month.as_deref().map(decode_month).transpose()?,
        }))
    }
}

fn missing(id: SubscriptionId) -> SubtrackError {
    NotFoundError {
        entity: "Subscription",
        id: id.to_string(),
    }
    .into()
}

const INSERT: &str = r"
    INSERT INTO subscriptions (id, service_name, price, user_id, start_month, end_month)
    VALUES (?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM subscriptions WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM subscriptions ORDER BY start_month, service_name";
const UPDATE: &str = r"
    UPDATE subscriptions
    SET service_name = ?, price = ?, user_id = ?, start_month = ?, end_month = ?
    WHERE id = ?
";
const DELETE_BY_ID: &str = "DELETE FROM subscriptions WHERE id = ?";

/// `SQLite`-backed subscription repository.
pub struct SqliteSubscriptionRepository {
    pool: SqlitePool,
}

impl SqliteSubscriptionRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Build `SELECT` with one `IN (...)` clause per non-empty filter list.
fn matching_query(filter: &SubscriptionFilter) -> QueryBuilder<'static, Sqlite> {
    let mut query = QueryBuilder::new("SELECT * FROM subscriptions WHERE 1 = 1");

    if !filter.service_names.is_empty() {
        query.push(" AND service_name IN (");
        let mut names = query.separated(", ");
        for name in &filter.service_names {
            names.push_bind(name.clone());
        }
        names.push_unseparated(")");
    }

    if !filter.user_ids.is_empty() {
        query.push(" AND user_id IN (");
        let mut users = query.separated(", ");
        for user_id in &filter.user_ids {
            users.push_bind(user_id.to_string());
        }
        users.push_unseparated(")");
    }

    query.push(" ORDER BY start_month, service_name");
    query
}

impl SubscriptionRepository for SqliteSubscriptionRepository {
    fn create(
        &self,
        subscription: Subscription,
    ) -> impl Future<Output = Result<Subscription, SubtrackError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(subscription.id.to_string())
                .bind(&subscription.service_name)
                .bind(subscription.price)
                .bind(subscription.user_id.to_string())
                .bind(encode_month(subscription.start))
                .bind(subscription.end.map(encode_month))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(subscription)
        }
    }

    fn get_by_id(
        &self,
        id: SubscriptionId,
    ) -> impl Future<Output = Result<Option<Subscription>, SubtrackError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Subscription>, SubtrackError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        subscription: Subscription,
    ) -> impl Future<Output = Result<Subscription, SubtrackError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&subscription.service_name)
                .bind(subscription.price)
                .bind(subscription.user_id.to_string())
                .bind(encode_month(subscription.start))
                .bind(subscription.end.map(encode_month))
                .bind(subscription.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(missing(subscription.id));
            }
            Ok(subscription)
        }
    }

    fn delete(
        &self,
        id: SubscriptionId,
    ) -> impl Future<Output = Result<(), SubtrackError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(missing(id));
            }
            Ok(())
        }
    }

    fn find_matching(
        &self,
        filter: SubscriptionFilter,
    ) -> impl Future<Output = Result<Vec<Subscription>, SubtrackError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut query = matching_query(&filter);
            let rows: Vec<Wrapper> = query
                .build_query_as()
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
