//! Generated regulations, an append-only history.

use super::{now_timestamp, returned_id, sql, SqliteProvider};
use crate::{errors::EthicsError, types::Regulation};
use tracing::info;
use turso::params;

impl SqliteProvider {
    pub async fn store_regulation(&self, content: &str) -> Result<i64, EthicsError> {
        let conn = self.connect()?;
        let rows = conn
            .query(sql::INSERT_REGULATION, params![content.to_string(), now_timestamp()])
            .await?;
        let id = returned_id(rows).await?;
        info!(regulation_id = id, length = content.len(), "Stored regulation.");
        Ok(id)
    }

    /// Returns up to `limit` regulations, most recent first.
    pub async fn get_recent_regulations(&self, limit: u32) -> Result<Vec<Regulation>, EthicsError> {
        let conn = self.connect()?;
        let mut rows = conn
            .query(&sql::select_recent_regulations(limit), ())
            .await?;
        let mut regulations = Vec::new();
        while let Some(row) = rows.next().await? {
            regulations.push(Regulation {
                id: row.get(0)?,
                content: row.get(1)?,
                created_at: row.get(2)?,
            });
        }
        Ok(regulations)
    }

    pub async fn get_latest_regulation(&self) -> Result<Option<Regulation>, EthicsError> {
        Ok(self.get_recent_regulations(1).await?.into_iter().next())
    }
}
