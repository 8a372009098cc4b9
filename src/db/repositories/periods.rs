use anyhow::{bail, Result};
use chrono::NaiveDate;
use rusqlite::{params, Row};

use crate::db::{
    helpers::{date_to_sql, parse_date, parse_datetime, parse_optional_date},
    Database,
};
use crate::models::CyclePeriod;

fn row_to_period(row: &Row) -> Result<CyclePeriod> {
    let start_date: String = row.get("start_date")?;
    let end_date: Option<String> = row.get("end_date")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(CyclePeriod {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        start_date: parse_date(&start_date, "start_date")?,
        end_date: parse_optional_date(end_date, "end_date")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    /// Start a new period. Refuses while the owner already has an open one;
    /// the open period must be ended first so at most one exists at a time.
    pub async fn start_period(&self, period: &CyclePeriod) -> Result<()> {
        let record = period.clone();
        self.execute(move |conn| {
            let open_count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM cycle_periods
                 WHERE owner_id = ?1 AND end_date IS NULL",
                params![record.owner_id],
                |row| row.get(0),
            )?;
            if open_count > 0 {
                bail!(
                    "owner {} already has an ongoing period",
                    record.owner_id
                );
            }

            conn.execute(
                "INSERT INTO cycle_periods (id, owner_id, start_date, end_date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.id,
                    record.owner_id,
                    date_to_sql(record.start_date),
                    record.end_date.map(date_to_sql),
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn end_period(&self, period_id: &str, end_date: NaiveDate) -> Result<()> {
        let period_id = period_id.to_string();
        self.execute(move |conn| {
            let updated = conn.execute(
                "UPDATE cycle_periods
                 SET end_date = ?1,
                     updated_at = ?2
                 WHERE id = ?3 AND end_date IS NULL",
                params![
                    date_to_sql(end_date),
                    chrono::Utc::now().to_rfc3339(),
                    period_id,
                ],
            )?;
            if updated == 0 {
                bail!("no open period with id {period_id}");
            }
            Ok(())
        })
        .await
    }

    /// All periods for an owner, most recent first — the ordering the
    /// resolver and length estimator require.
    pub async fn list_periods(&self, owner_id: &str) -> Result<Vec<CyclePeriod>> {
        let owner_id = owner_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, start_date, end_date, created_at, updated_at
                 FROM cycle_periods
                 WHERE owner_id = ?1
                 ORDER BY start_date DESC",
            )?;

            let mut rows = stmt.query(params![owner_id])?;
            let mut periods = Vec::new();
            while let Some(row) = rows.next()? {
                periods.push(row_to_period(row)?);
            }
            Ok(periods)
        })
        .await
    }

    pub async fn get_open_period(&self, owner_id: &str) -> Result<Option<CyclePeriod>> {
        let owner_id = owner_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, start_date, end_date, created_at, updated_at
                 FROM cycle_periods
                 WHERE owner_id = ?1 AND end_date IS NULL
                 ORDER BY start_date DESC
                 LIMIT 1",
            )?;

            let mut rows = stmt.query(params![owner_id])?;
            match rows.next()? {
                Some(row) => Ok(Some(row_to_period(row)?)),
                None => Ok(None),
            }
        })
        .await
    }
}
