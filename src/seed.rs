//! Fixture data and the one-shot database seeder.
//!
//! Seeding is not idempotent: running it twice fails on duplicate keys and
//! the transaction rolls back, leaving the first run's rows untouched.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::InvoiceStatus;
use crate::security::hash_password;

pub struct UserFixture {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

pub struct CustomerFixture {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub image_url: &'static str,
}

pub struct InvoiceFixture {
    pub customer: usize,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: &'static str,
}

pub const USERS: &[UserFixture] = &[UserFixture {
    id: "410544b2-4001-4271-9855-fec4b6a6442a",
    name: "User",
    email: "user@nextmail.com",
    password: "123456",
}];

pub const CUSTOMERS: &[CustomerFixture] = &[
    CustomerFixture {
        id: "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa",
        name: "Evil Rabbit",
        email: "evil@rabbit.com",
        image_url: "/customers/evil-rabbit.png",
    },
    CustomerFixture {
        id: "3958dc9e-712f-4377-85e9-fec4b6a6442a",
        name: "Delba de Oliveira",
        email: "delba@oliveira.com",
        image_url: "/customers/delba-de-oliveira.png",
    },
    CustomerFixture {
        id: "3958dc9e-742f-4377-85e9-fec4b6a6442a",
        name: "Lee Robinson",
        email: "lee@robinson.com",
        image_url: "/customers/lee-robinson.png",
    },
    CustomerFixture {
        id: "76d65c26-f784-44a2-ac19-586678f7c2f2",
        name: "Michael Novotny",
        email: "michael@novotny.com",
        image_url: "/customers/michael-novotny.png",
    },
    CustomerFixture {
        id: "cc27c14a-0acf-4f4a-a6c9-d45682c144b9",
        name: "Amy Burns",
        email: "amy@burns.com",
        image_url: "/customers/amy-burns.png",
    },
    CustomerFixture {
        id: "13d07535-c59e-4157-a011-f8d2ef4e0cbb",
        name: "Balazs Orban",
        email: "balazs@orban.com",
        image_url: "/customers/balazs-orban.png",
    },
];

pub const INVOICES: &[InvoiceFixture] = &[
    InvoiceFixture { customer: 0, amount: 15795, status: InvoiceStatus::Pending, date: "2022-12-06" },
    InvoiceFixture { customer: 1, amount: 20348, status: InvoiceStatus::Pending, date: "2022-11-14" },
    InvoiceFixture { customer: 4, amount: 3040, status: InvoiceStatus::Paid, date: "2022-10-29" },
    InvoiceFixture { customer: 3, amount: 44800, status: InvoiceStatus::Paid, date: "2023-09-10" },
    InvoiceFixture { customer: 5, amount: 34577, status: InvoiceStatus::Pending, date: "2023-08-05" },
    InvoiceFixture { customer: 2, amount: 54246, status: InvoiceStatus::Pending, date: "2023-07-16" },
    InvoiceFixture { customer: 0, amount: 666, status: InvoiceStatus::Pending, date: "2023-06-27" },
    InvoiceFixture { customer: 3, amount: 32545, status: InvoiceStatus::Paid, date: "2023-06-09" },
    InvoiceFixture { customer: 4, amount: 1250, status: InvoiceStatus::Paid, date: "2023-06-17" },
    InvoiceFixture { customer: 5, amount: 8546, status: InvoiceStatus::Paid, date: "2023-06-07" },
    InvoiceFixture { customer: 1, amount: 500, status: InvoiceStatus::Paid, date: "2023-08-19" },
    InvoiceFixture { customer: 5, amount: 8945, status: InvoiceStatus::Paid, date: "2023-06-03" },
    InvoiceFixture { customer: 2, amount: 1000, status: InvoiceStatus::Paid, date: "2022-06-05" },
];

pub const REVENUE: &[(&str, i32)] = &[
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

/// Rows inserted per table
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub customers: usize,
    pub invoices: usize,
    pub revenue: usize,
}

/// Populate a fresh database with every fixture, in a single transaction
pub async fn run(pool: &PgPool) -> Result<SeedSummary> {
    let mut tx = pool
        .begin()
        .await
        .map_err(AppError::database("Failed to start seeding."))?;

    let summary = SeedSummary {
        users: seed_users(&mut tx).await?,
        customers: seed_customers(&mut tx).await?,
        invoices: seed_invoices(&mut tx).await?,
        revenue: seed_revenue(&mut tx).await?,
    };

    tx.commit()
        .await
        .map_err(AppError::database("Failed to commit seed data."))?;

    Ok(summary)
}

async fn seed_users(conn: &mut PgConnection) -> Result<usize> {
    for user in USERS {
        let password = hash_password(user.password)?;
        sqlx::query("INSERT INTO users (id, name, email, password) VALUES ($1, $2, $3, $4)")
            .bind(fixture_id(user.id)?)
            .bind(user.name)
            .bind(user.email)
            .bind(password)
            .execute(&mut *conn)
            .await
            .map_err(AppError::database("Failed to seed users."))?;
    }

    tracing::info!("Seeded {} users", USERS.len());
    Ok(USERS.len())
}

async fn seed_customers(conn: &mut PgConnection) -> Result<usize> {
    for customer in CUSTOMERS {
        sqlx::query("INSERT INTO customers (id, name, email, image_url) VALUES ($1, $2, $3, $4)")
            .bind(fixture_id(customer.id)?)
            .bind(customer.name)
            .bind(customer.email)
            .bind(customer.image_url)
            .execute(&mut *conn)
            .await
            .map_err(AppError::database("Failed to seed customers."))?;
    }

    tracing::info!("Seeded {} customers", CUSTOMERS.len());
    Ok(CUSTOMERS.len())
}

async fn seed_invoices(conn: &mut PgConnection) -> Result<usize> {
    for invoice in INVOICES {
        let customer = CUSTOMERS.get(invoice.customer).ok_or_else(|| {
            AppError::InvalidInput(format!("Unknown fixture customer {}", invoice.customer))
        })?;

        sqlx::query("INSERT INTO invoices (customer_id, amount, status, date) VALUES ($1, $2, $3, $4)")
            .bind(fixture_id(customer.id)?)
            .bind(invoice.amount)
            .bind(invoice.status)
            .bind(fixture_date(invoice.date)?)
            .execute(&mut *conn)
            .await
            .map_err(AppError::database("Failed to seed invoices."))?;
    }

    tracing::info!("Seeded {} invoices", INVOICES.len());
    Ok(INVOICES.len())
}

async fn seed_revenue(conn: &mut PgConnection) -> Result<usize> {
    for (month, revenue) in REVENUE {
        sqlx::query("INSERT INTO revenue (month, revenue) VALUES ($1, $2)")
            .bind(*month)
            .bind(*revenue)
            .execute(&mut *conn)
            .await
            .map_err(AppError::database("Failed to seed revenue."))?;
    }

    tracing::info!("Seeded {} revenue", REVENUE.len());
    Ok(REVENUE.len())
}

fn fixture_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidInput(format!("Invalid fixture id {id}")))
}

/// Midnight UTC of a `YYYY-MM-DD` fixture date
fn fixture_date(date: &str) -> Result<DateTime<Utc>> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::InvalidInput(format!("Invalid fixture date {date}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_well_formed() {
        for user in USERS {
            assert!(fixture_id(user.id).is_ok());
        }
        for customer in CUSTOMERS {
            assert!(fixture_id(customer.id).is_ok(), "{}", customer.name);
        }
        for invoice in INVOICES {
            assert!(invoice.customer < CUSTOMERS.len());
            assert!(fixture_date(invoice.date).is_ok(), "{}", invoice.date);
        }
        assert_eq!(REVENUE.len(), 12);
    }

    #[test]
    fn test_fixture_date_is_midnight_utc() {
        let date = fixture_date("2022-12-06").unwrap();
        assert_eq!(date.to_rfc3339(), "2022-12-06T00:00:00+00:00");
        assert!(fixture_date("2022-13-40").is_err());
    }
}
