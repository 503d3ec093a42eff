// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Aggregate queries over incidents.
//!
//! Grouped results are ordered by count descending, then by label ascending,
//! so ties never depend on storage order.

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use diesel::SqliteConnection;
use intel_platform_domain::{AggregateRow, MonthlyCategoryCount, Severity};

use crate::diesel_schema::cyber_incidents;
use crate::error::PersistenceError;
use crate::queries::to_count;

/// `strftime` pattern for month buckets.
const MONTH_BUCKET_FORMAT: &str = "%Y-%m";

/// Helper row struct for the month bucket query.
///
/// Raw SQL is justified here as Diesel has no `strftime` DSL.
#[derive(QueryableByName)]
struct MonthlyCountRow {
    #[diesel(sql_type = Text)]
    month: String,
    #[diesel(sql_type = Text)]
    category: String,
    #[diesel(sql_type = BigInt)]
    count: i64,
}

fn to_aggregate_rows(rows: Vec<(String, i64)>) -> Result<Vec<AggregateRow>, PersistenceError> {
    rows.into_iter()
        .map(|(label, count)| Ok(AggregateRow::new(&label, to_count(count)?)))
        .collect()
}

/// Counts incidents per category.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or if count conversion fails.
pub fn count_by_category(conn: &mut SqliteConnection) -> Result<Vec<AggregateRow>, PersistenceError> {
    let rows: Vec<(String, i64)> = cyber_incidents::table
        .group_by(cyber_incidents::category)
        .select((cyber_incidents::category, count_star()))
        .order_by((count_star().desc(), cyber_incidents::category.asc()))
        .load(conn)?;

    to_aggregate_rows(rows)
}

/// Counts `High` severity incidents per status.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or if count conversion fails.
pub fn count_high_severity_by_status(
    conn: &mut SqliteConnection,
) -> Result<Vec<AggregateRow>, PersistenceError> {
    let rows: Vec<(String, i64)> = cyber_incidents::table
        .filter(cyber_incidents::severity.eq(Severity::High.as_str()))
        .group_by(cyber_incidents::status)
        .select((cyber_incidents::status, count_star()))
        .order_by((count_star().desc(), cyber_incidents::status.asc()))
        .load(conn)?;

    to_aggregate_rows(rows)
}

/// Counts incidents per category, keeping only categories whose count is
/// strictly greater than `min_count`.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or if count conversion fails.
pub fn categories_above_threshold(
    conn: &mut SqliteConnection,
    min_count: i64,
) -> Result<Vec<AggregateRow>, PersistenceError> {
    let rows: Vec<(String, i64)> = cyber_incidents::table
        .group_by(cyber_incidents::category)
        .having(count_star().gt(min_count))
        .select((cyber_incidents::category, count_star()))
        .order_by((count_star().desc(), cyber_incidents::category.asc()))
        .load(conn)?;

    to_aggregate_rows(rows)
}

/// Counts incidents per month and category.
///
/// Incidents whose timestamp `SQLite` cannot bucket are left out.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or if count conversion fails.
pub fn count_by_month_and_category(
    conn: &mut SqliteConnection,
) -> Result<Vec<MonthlyCategoryCount>, PersistenceError> {
    let rows: Vec<MonthlyCountRow> = diesel::sql_query(
        "SELECT month, category, COUNT(*) AS count FROM ( \
             SELECT strftime(?, timestamp) AS month, category FROM cyber_incidents \
         ) \
         WHERE month IS NOT NULL \
         GROUP BY month, category \
         ORDER BY month ASC, category ASC",
    )
    .bind::<Text, _>(MONTH_BUCKET_FORMAT)
    .load(conn)?;

    rows.into_iter()
        .map(|row| {
            Ok(MonthlyCategoryCount {
                month: row.month,
                category: row.category,
                count: to_count(row.count)?,
            })
        })
        .collect()
}
