//! Thin client for the hosted database's REST surface. The database is an
//! opaque collaborator: one insert and one ordered select, nothing else.

use gloo_net::http::Request;
use serde::Serialize;
use shared::{ApiError, PredictionRecord};

use crate::config::Config;

pub struct Database {
    base: String,
    api_key: String,
}

impl Database {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base: config.db_base.clone(),
            api_key: config.db_api_key.clone(),
        }
    }

    /// Inserts one row into `table`. Rows are insert-only; the database
    /// assigns `id` and `created_at`.
    pub async fn insert<T: Serialize>(&self, table: &str, row: &T) -> Result<(), ApiError> {
        let url = format!("{}/rest/v1/{}", self.base, table);
        let response = Request::post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .json(row)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(())
    }

    /// The `limit` most recent rows of `table`, newest first.
    ///
    /// Unlike the primary endpoint this query carries no user filter, so it
    /// returns records across all users. Almost certainly an oversight rather
    /// than a feature; kept pending a product decision (see DESIGN.md).
    pub async fn select_recent(
        &self,
        table: &str,
        limit: u32,
    ) -> Result<Vec<PredictionRecord>, ApiError> {
        let url = format!(
            "{}/rest/v1/{}?select=*&order=created_at.desc&limit={}",
            self.base, table, limit
        );
        let response = Request::get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }

        response
            .json::<Vec<PredictionRecord>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
