//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::alerts;

/// Database row for an alert.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = alerts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AlertRow {
    pub id: String,
    pub subscriber_id: String,
    pub destination_id: String,
    pub region: String,
    pub threshold: i64,
    /// `'above'` or `'below'`.
    pub direction: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// `0` or `1`.
    pub triggered: i32,
}
