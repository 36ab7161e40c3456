//! Statement execution against PostgreSQL, plus the static collection map.

use crate::error::AppError;
use crate::model::{ActionRecord, Listing, ListingRow, SearchFilter, VideoUpdate};
use crate::sql;
use sqlx::PgPool;

/// Static map from logical collection name (city or action type) to its
/// physical table. Every persisted row belongs to exactly one of these.
pub fn table_for_collection(name: &str) -> Option<&'static str> {
    match name {
        "boston-ma" => Some("boston_ma"),
        "book" => Some("books"),
        "heart" => Some("hearts"),
        "mail" => Some("mails"),
        "text" => Some("texts"),
        _ => None,
    }
}

pub struct ListingStore;

impl ListingStore {
    /// Fetch one active listing by listing id. None when no row matches.
    pub async fn find(
        pool: &PgPool,
        table: &str,
        listing_id: &str,
    ) -> Result<Option<Listing>, AppError> {
        let q = sql::find_listing(table, listing_id);
        tracing::debug!(sql = %q.sql, "query");
        let mut query = sqlx::query_as::<_, ListingRow>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let row = query.fetch_optional(pool).await?;
        Ok(row.map(Listing::from))
    }

    /// Fetch one page of active listings matching the filter.
    pub async fn search(
        pool: &PgPool,
        table: &str,
        filter: &SearchFilter,
    ) -> Result<Vec<Listing>, AppError> {
        let q = sql::search_listings(table, filter);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, ListingRow>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let rows = query.fetch_all(pool).await?;
        Ok(rows.into_iter().map(Listing::from).collect())
    }

    /// Persist one action record into its per-action table.
    pub async fn add_action(
        pool: &PgPool,
        table: &str,
        rec: &ActionRecord,
    ) -> Result<(), AppError> {
        let q = sql::insert_action(table, rec);
        tracing::debug!(sql = %q.sql, listing_id = %rec.listing_id, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        query.execute(pool).await?;
        tracing::info!(action = rec.action.as_str(), listing_id = %rec.listing_id, "action stored");
        Ok(())
    }

    /// Append a video to a listing, matching on the listing/agent pair.
    /// Zero affected rows means the pair did not match; nothing was mutated.
    pub async fn add_video(
        pool: &PgPool,
        table: &str,
        update: &VideoUpdate,
    ) -> Result<(), AppError> {
        let q = sql::append_video(table, update);
        tracing::debug!(sql = %q.sql, listing_id = %update.listing_id, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let result = query.execute(pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "no listing {} for agent {}",
                update.listing_id, update.agent_id
            )));
        }
        tracing::info!(listing_id = %update.listing_id, "video appended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_kind_has_a_table() {
        use crate::model::ActionKind;
        for kind in [ActionKind::Book, ActionKind::Heart, ActionKind::Mail, ActionKind::Text] {
            assert!(table_for_collection(kind.as_str()).is_some(), "{:?}", kind);
        }
    }

    #[test]
    fn unknown_collections_resolve_to_none() {
        assert_eq!(table_for_collection("boston-ma"), Some("boston_ma"));
        assert_eq!(table_for_collection("springfield-il"), None);
        assert_eq!(table_for_collection(""), None);
    }
}
