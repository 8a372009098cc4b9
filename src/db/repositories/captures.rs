use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Row};

use crate::db::{
    helpers::{date_to_sql, linked_ids_to_sql, parse_date, parse_datetime, parse_linked_ids, parse_note_type},
    Database,
};
use crate::models::Capture;

fn row_to_capture(row: &Row) -> Result<Capture> {
    let note_type: String = row.get("note_type")?;
    let log_date: String = row.get("log_date")?;
    let linked: String = row.get("linked_activity_ids")?;
    let created_at: String = row.get("created_at")?;

    Ok(Capture {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        note_type: parse_note_type(&note_type)?,
        transcription: row.get("transcription")?,
        file_url: row.get("file_url")?,
        log_date: parse_date(&log_date, "log_date")?,
        linked_activity_ids: parse_linked_ids(&linked)?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    pub async fn insert_capture(&self, capture: &Capture) -> Result<()> {
        let record = capture.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO captures (id, owner_id, note_type, transcription, file_url, log_date, linked_activity_ids, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.id,
                    record.owner_id,
                    record.note_type.as_str(),
                    record.transcription,
                    record.file_url,
                    date_to_sql(record.log_date),
                    linked_ids_to_sql(&record.linked_activity_ids)?,
                    record.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Captures filed under one day, oldest first.
    pub async fn list_captures_for_date(
        &self,
        owner_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Capture>> {
        let owner_id = owner_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, note_type, transcription, file_url, log_date, linked_activity_ids, created_at
                 FROM captures
                 WHERE owner_id = ?1 AND log_date = ?2
                 ORDER BY created_at ASC",
            )?;

            let mut rows = stmt.query(params![owner_id, date_to_sql(date)])?;
            let mut captures = Vec::new();
            while let Some(row) = rows.next()? {
                captures.push(row_to_capture(row)?);
            }
            Ok(captures)
        })
        .await
    }

    /// Every capture for an owner, ordered by log date — the all-time view's
    /// snapshot query.
    pub async fn list_all_captures(&self, owner_id: &str) -> Result<Vec<Capture>> {
        let owner_id = owner_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, note_type, transcription, file_url, log_date, linked_activity_ids, created_at
                 FROM captures
                 WHERE owner_id = ?1
                 ORDER BY log_date ASC, created_at ASC",
            )?;

            let mut rows = stmt.query(params![owner_id])?;
            let mut captures = Vec::new();
            while let Some(row) = rows.next()? {
                captures.push(row_to_capture(row)?);
            }
            Ok(captures)
        })
        .await
    }
}
