//! PostgreSQL store. Email uniqueness is backed by the unique index created in `migration`.

use super::{require_id, CustomerStore};
use crate::customer::{timestamp, Customer, FilterField};
use crate::error::AppError;
use crate::sql::CustomerQueries;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    firstname: String,
    lastname: String,
    email: String,
    phone: String,
    street_line1: String,
    street_line2: String,
    city: String,
    state: String,
    country: String,
    zipcode: String,
    acc_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(r: CustomerRow) -> Self {
        Customer {
            id: Some(r.id),
            firstname: r.firstname,
            lastname: r.lastname,
            email: r.email,
            phone: r.phone,
            street_line1: r.street_line1,
            street_line2: r.street_line2,
            city: r.city,
            state: r.state,
            country: r.country,
            zipcode: r.zipcode,
            acc_active: r.acc_active,
            created_at: Some(r.created_at),
            updated_at: Some(r.updated_at),
        }
    }
}

type RowQuery<'q> = QueryAs<'q, Postgres, CustomerRow, PgArguments>;

/// Bind the writable columns in `WRITE_COLUMNS` order.
fn bind_fields<'q>(q: RowQuery<'q>, c: &'q Customer) -> RowQuery<'q> {
    q.bind(&c.firstname)
        .bind(&c.lastname)
        .bind(&c.email)
        .bind(&c.phone)
        .bind(&c.street_line1)
        .bind(&c.street_line2)
        .bind(&c.city)
        .bind(&c.state)
        .bind(&c.country)
        .bind(&c.zipcode)
        .bind(c.acc_active)
}

#[derive(Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
    queries: CustomerQueries,
}

impl PgCustomerStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgCustomerStore {
            pool,
            queries: CustomerQueries::new(schema),
        }
    }

    async fn fetch_many(&self, sql: &str, value: &str) -> Result<Vec<Customer>, AppError> {
        tracing::debug!(sql = %sql, value = %value, "query");
        let rows = sqlx::query_as::<_, CustomerRow>(sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn create(&self, customer: Customer) -> Result<Customer, AppError> {
        let sql = self.queries.insert();
        tracing::debug!(sql = %sql, "query");
        let now = timestamp::now();
        let row = bind_fields(sqlx::query_as::<_, CustomerRow>(&sql), &customer)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let sql = self.queries.select_by_id();
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Customer::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError> {
        let sql = self.queries.select_by_email();
        tracing::debug!(sql = %sql, email = %email, "query");
        let row = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Customer::from))
    }

    async fn find_by(&self, field: FilterField, value: &str) -> Result<Vec<Customer>, AppError> {
        self.fetch_many(&self.queries.select_by_field(field), value).await
    }

    async fn all(&self) -> Result<Vec<Customer>, AppError> {
        let sql = self.queries.select_all();
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, CustomerRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn update(&self, customer: Customer) -> Result<Customer, AppError> {
        let id = require_id(&customer)?;
        let sql = self.queries.update();
        tracing::debug!(sql = %sql, id, "query");
        let row = bind_fields(sqlx::query_as::<_, CustomerRow>(&sql), &customer)
            .bind(timestamp::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::customer_not_found(id))?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = self.queries.delete();
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
