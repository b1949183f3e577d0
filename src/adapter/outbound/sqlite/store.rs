//! SQLite alert store implementation.
//!
//! Provides persistent storage for alerts using SQLite and Diesel ORM.

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::AlertRow;
use crate::adapter::outbound::sqlite::database::schema::alerts;
use crate::domain::{Alert, AlertId, DestinationId, Direction, NewAlert, Region, SubscriberId};
use crate::error::{Error, Result};
use crate::port::outbound::store::AlertStore;

/// SQLite-backed alert store.
///
/// Implements the [`AlertStore`] trait. The sequence counter is recovered
/// from the persisted ids when the store is opened.
pub struct SqliteAlertStore {
    /// Database connection pool.
    pool: DbPool,
    /// Highest sequence number handed out so far.
    last_sequence: AtomicU64,
}

impl SqliteAlertStore {
    /// Create a store over an already-migrated pool, recovering the id
    /// counter from existing rows.
    ///
    /// # Errors
    /// Returns an error if the existing ids cannot be read.
    pub fn open(pool: DbPool) -> Result<Self> {
        let last = {
            let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
            let ids: Vec<String> = alerts::table
                .select(alerts::id)
                .load(&mut conn)
                .map_err(|e| Error::Database(e.to_string()))?;
            max_sequence(&ids)
        };
        debug!(last_sequence = last, "Recovered alert sequence");

        Ok(Self {
            pool,
            last_sequence: AtomicU64::new(last),
        })
    }

    /// Highest sequence number allocated so far.
    #[must_use]
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence.load(Ordering::SeqCst)
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }

    fn to_row(alert: &Alert) -> Result<AlertRow> {
        let threshold = i64::try_from(alert.threshold)
            .map_err(|_| Error::Parse(format!("threshold {} too large", alert.threshold)))?;
        Ok(AlertRow {
            id: alert.id.to_string(),
            subscriber_id: alert.subscriber_id.to_string(),
            destination_id: alert.destination_id.to_string(),
            region: alert.region.to_string(),
            threshold,
            direction: alert.direction.as_str().to_string(),
            created_at: alert.created_at.timestamp_millis(),
            triggered: i32::from(alert.triggered),
        })
    }

    fn from_row(row: AlertRow) -> Result<Alert> {
        let threshold = u64::try_from(row.threshold)
            .map_err(|_| Error::Parse(format!("negative threshold in row {}", row.id)))?;
        let direction = Direction::from_str(&row.direction)?;
        let created_at: DateTime<Utc> = DateTime::from_timestamp_millis(row.created_at)
            .ok_or_else(|| Error::Parse(format!("invalid created_at in row {}", row.id)))?;

        Ok(Alert {
            id: AlertId::from(row.id),
            subscriber_id: SubscriberId::from(row.subscriber_id),
            destination_id: DestinationId::from(row.destination_id),
            region: Region::from(row.region),
            threshold,
            direction,
            created_at,
            triggered: row.triggered != 0,
        })
    }

    fn from_rows(rows: Vec<AlertRow>) -> Result<Vec<Alert>> {
        let mut alerts = rows
            .into_iter()
            .map(Self::from_row)
            .collect::<Result<Vec<_>>>()?;
        sort_by_creation(&mut alerts);
        Ok(alerts)
    }
}

/// Largest trailing numeric suffix across `ids`, or 0.
fn max_sequence(ids: &[String]) -> u64 {
    ids.iter()
        .filter_map(|id| AlertId::new(id.as_str()).sequence())
        .max()
        .unwrap_or(0)
}

/// Sequences are store-wide and monotonic, so they order alerts by creation.
fn sort_by_creation(alerts: &mut [Alert]) {
    alerts.sort_by_key(|a| (a.id.sequence(), a.created_at));
}

/// Current time truncated to millisecond precision, matching storage.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

#[async_trait]
impl AlertStore for SqliteAlertStore {
    async fn create(&self, new: NewAlert) -> Result<Alert> {
        let sequence = self.last_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let id = AlertId::compose(&new.subscriber_id, sequence);
        let alert = Alert::from_new(id, new, now_millis());
        let row = Self::to_row(&alert)?;

        let mut conn = self.conn()?;
        diesel::insert_into(alerts::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(alert)
    }

    async fn list_active(&self, subscriber: &SubscriberId) -> Result<Vec<Alert>> {
        let mut conn = self.conn()?;
        let rows: Vec<AlertRow> = alerts::table
            .filter(alerts::subscriber_id.eq(subscriber.as_str()))
            .filter(alerts::triggered.eq(0))
            .select(AlertRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Self::from_rows(rows)
    }

    async fn list_all_active(&self) -> Result<Vec<Alert>> {
        let mut conn = self.conn()?;
        let rows: Vec<AlertRow> = alerts::table
            .filter(alerts::triggered.eq(0))
            .select(AlertRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Self::from_rows(rows)
    }

    async fn remove(&self, subscriber: &SubscriberId, id: &AlertId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            alerts::table
                .filter(alerts::id.eq(id.as_str()))
                .filter(alerts::subscriber_id.eq(subscriber.as_str())),
        )
        .execute(&mut conn)
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(deleted > 0)
    }

    async fn mark_triggered(&self, id: &AlertId) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::update(alerts::table.find(id.as_str()))
            .set(alerts::triggered.eq(1))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, id: &AlertId) -> Result<Option<Alert>> {
        let mut conn = self.conn()?;
        let row: Option<AlertRow> = alerts::table
            .find(id.as_str())
            .select(AlertRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }
}
