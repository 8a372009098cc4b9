use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Row};

use crate::db::{
    helpers::{date_to_sql, parse_datetime, parse_file_type, parse_optional_date},
    Database,
};
use crate::models::MediaItem;

fn row_to_media(row: &Row) -> Result<MediaItem> {
    let file_type: String = row.get("file_type")?;
    let original_date: Option<String> = row.get("original_date")?;
    let log_date: Option<String> = row.get("log_date")?;
    let created_at: String = row.get("created_at")?;

    Ok(MediaItem {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        file_url: row.get("file_url")?,
        file_type: parse_file_type(&file_type)?,
        caption: row.get("caption")?,
        original_date: parse_optional_date(original_date, "original_date")?,
        log_date: parse_optional_date(log_date, "log_date")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    pub async fn insert_media_item(&self, item: &MediaItem) -> Result<()> {
        let record = item.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO media_items (id, owner_id, file_url, file_type, caption, original_date, log_date, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.id,
                    record.owner_id,
                    record.file_url,
                    record.file_type.as_str(),
                    record.caption,
                    record.original_date.map(date_to_sql),
                    record.log_date.map(date_to_sql),
                    record.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Media filed under one day: either date field matching counts, so a
    /// photo taken that day and a photo filed under that day both appear.
    pub async fn list_media_for_date(
        &self,
        owner_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<MediaItem>> {
        let owner_id = owner_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, file_url, file_type, caption, original_date, log_date, created_at
                 FROM media_items
                 WHERE owner_id = ?1 AND (original_date = ?2 OR log_date = ?2)
                 ORDER BY created_at ASC",
            )?;

            let mut rows = stmt.query(params![owner_id, date_to_sql(date)])?;
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                items.push(row_to_media(row)?);
            }
            Ok(items)
        })
        .await
    }

    pub async fn list_all_media(&self, owner_id: &str) -> Result<Vec<MediaItem>> {
        let owner_id = owner_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, file_url, file_type, caption, original_date, log_date, created_at
                 FROM media_items
                 WHERE owner_id = ?1
                 ORDER BY created_at ASC",
            )?;

            let mut rows = stmt.query(params![owner_id])?;
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                items.push(row_to_media(row)?);
            }
            Ok(items)
        })
        .await
    }
}
