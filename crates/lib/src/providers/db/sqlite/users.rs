//! User rows, created once per session from the User Details page.

use super::{now_timestamp, parse_column, returned_id, sql, SqliteProvider};
use crate::{
    errors::EthicsError,
    types::{NewUser, User},
};
use tracing::info;
use turso::{params, Row};

impl SqliteProvider {
    /// Validates and inserts a user, returning the newly assigned id.
    ///
    /// Ids are strictly increasing across calls. Nothing is written when the
    /// name is blank or the age falls outside 0–120.
    pub async fn insert_user(&self, new_user: NewUser) -> Result<i64, EthicsError> {
        let user = new_user.validated()?;
        let conn = self.connect()?;
        let rows = conn
            .query(
                sql::INSERT_USER,
                params![
                    user.name.clone(),
                    user.age,
                    user.gender.as_str().to_string(),
                    user.knows_autonomous.as_str().to_string(),
                    now_timestamp()
                ],
            )
            .await?;
        let id = returned_id(rows).await?;
        info!(user_id = id, name = %user.name, "Inserted user.");
        Ok(id)
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, EthicsError> {
        let conn = self.connect()?;
        let mut rows = conn.query(sql::SELECT_USER_BY_ID, params![user_id]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(user_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Returns every user in creation order.
    pub async fn get_users(&self) -> Result<Vec<User>, EthicsError> {
        let conn = self.connect()?;
        let mut rows = conn.query(sql::SELECT_USERS, ()).await?;
        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(user_from_row(&row)?);
        }
        Ok(users)
    }
}

fn user_from_row(row: &Row) -> Result<User, EthicsError> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        gender: parse_column(row.get(3)?, "gender")?,
        knows_autonomous: parse_column(row.get(4)?, "knows_autonomous")?,
        created_at: row.get(5)?,
    })
}
