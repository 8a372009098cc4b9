use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Row};

use crate::db::{
    helpers::{date_to_sql, parse_activity_status, parse_date, parse_datetime, parse_optional_datetime},
    Database,
};
use crate::models::{ActivitySession, ActivityStatus};

fn row_to_activity(row: &Row) -> Result<ActivitySession> {
    let start_time: String = row.get("start_time")?;
    let end_time: Option<String> = row.get("end_time")?;
    let status: String = row.get("status")?;
    let log_date: String = row.get("log_date")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(ActivitySession {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        start_time: parse_datetime(&start_time, "start_time")?,
        end_time: parse_optional_datetime(end_time, "end_time")?,
        status: parse_activity_status(&status)?,
        log_date: parse_date(&log_date, "log_date")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    pub async fn start_activity(&self, session: &ActivitySession) -> Result<()> {
        let record = session.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO activity_sessions (id, owner_id, name, description, start_time, end_time, status, log_date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    record.id,
                    record.owner_id,
                    record.name,
                    record.description,
                    record.start_time.to_rfc3339(),
                    record.end_time.map(|dt| dt.to_rfc3339()),
                    record.status.as_str(),
                    date_to_sql(record.log_date),
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn complete_activity(
        &self,
        session_id: &str,
        end_time: DateTime<Utc>,
    ) -> Result<()> {
        self.set_activity_status(session_id, ActivityStatus::Completed, Some(end_time))
            .await
    }

    pub async fn pause_activity(&self, session_id: &str) -> Result<()> {
        self.set_activity_status(session_id, ActivityStatus::Paused, None)
            .await
    }

    pub async fn resume_activity(&self, session_id: &str) -> Result<()> {
        self.set_activity_status(session_id, ActivityStatus::Active, None)
            .await
    }

    async fn set_activity_status(
        &self,
        session_id: &str,
        status: ActivityStatus,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let updated = conn.execute(
                "UPDATE activity_sessions
                 SET status = ?1,
                     end_time = COALESCE(?2, end_time),
                     updated_at = ?3
                 WHERE id = ?4",
                params![
                    status.as_str(),
                    end_time.map(|dt| dt.to_rfc3339()),
                    Utc::now().to_rfc3339(),
                    session_id,
                ],
            )?;
            if updated == 0 {
                bail!("no activity session with id {session_id}");
            }
            Ok(())
        })
        .await
    }

    /// Sessions logged under one day, in start order. Day views query by
    /// `log_date` so sessions running past midnight stay on the day they
    /// began.
    pub async fn list_activities_for_date(
        &self,
        owner_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ActivitySession>> {
        let owner_id = owner_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, name, description, start_time, end_time, status, log_date, created_at, updated_at
                 FROM activity_sessions
                 WHERE owner_id = ?1 AND log_date = ?2
                 ORDER BY start_time ASC",
            )?;

            let mut rows = stmt.query(params![owner_id, date_to_sql(date)])?;
            let mut sessions = Vec::new();
            while let Some(row) = rows.next()? {
                sessions.push(row_to_activity(row)?);
            }
            Ok(sessions)
        })
        .await
    }

    /// Ids of every currently active session, regardless of date: new
    /// captures link to all of them, including sessions started before
    /// midnight.
    pub async fn active_activity_ids(&self, owner_id: &str) -> Result<Vec<String>> {
        let owner_id = owner_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id FROM activity_sessions
                 WHERE owner_id = ?1 AND status = 'active' AND end_time IS NULL
                 ORDER BY start_time ASC",
            )?;

            let mut rows = stmt.query(params![owner_id])?;
            let mut ids = Vec::new();
            while let Some(row) = rows.next()? {
                ids.push(row.get::<_, String>(0)?);
            }
            Ok(ids)
        })
        .await
    }
}
