//! Builds parameterized statements for listing search, find, action insert,
//! and video update. Table names come only from the static collection map;
//! every request-supplied value is bound as a positional parameter.

use crate::model::{ActionRecord, SearchFilter, VideoUpdate};
use crate::sql::SqlParam;

/// Client-visible listing columns. `agent_id` is confidential and never
/// selected.
const LISTING_COLUMNS: &str = "baths_full, beds, facts, hashtags, id, \
     idx_open_houses, idx_virtual_tours, listing_id, pictures, price, \
     remarks, sort_id, sqft, status, street_name, street_no, videos, zip";

/// Only active listings are ever returned.
const ACTIVE_STATUS: &str = "ACT";

/// Fixed search page size; further pages go through the `lastId` cursor.
pub const PAGE_SIZE: u32 = 30;

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a parameter and return its 1-based placeholder number.
    fn push_param(&mut self, p: SqlParam) -> usize {
        self.params.push(p);
        self.params.len()
    }
}

/// SELECT one active listing by listing id.
pub fn find_listing(table: &str, listing_id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(SqlParam::Text(listing_id.to_string()));
    q.sql = format!(
        "select {LISTING_COLUMNS} from {table} where listing_id = $1 and status = '{ACTIVE_STATUS}' limit 1"
    );
    q
}

/// SELECT active listings matching the filter. Predicates are appended in a
/// fixed order, one positional parameter per present criterion (the type
/// OR-group appends one per type). Results are featured-first, then sort key
/// descending, capped at one page.
pub fn search_listings(table: &str, filter: &SearchFilter) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut criteria: Vec<String> = Vec::new();

    if filter.baths > 0 {
        let n = q.push_param(SqlParam::Int(i64::from(filter.baths)));
        criteria.push(format!("baths_full >= ${n}"));
    }
    if filter.beds > 0 {
        let n = q.push_param(SqlParam::Int(i64::from(filter.beds)));
        criteria.push(format!("beds >= ${n}"));
    }
    if !filter.hashtags.is_empty() {
        let n = q.push_param(SqlParam::TextArray(filter.hashtags.clone()));
        criteria.push(format!("${n} && hashtags"));
    }
    if let Some(last_id) = &filter.last_id {
        let n = q.push_param(SqlParam::Text(last_id.clone()));
        criteria.push(format!("sort_id < ${n}"));
    }
    if let Some(max_price) = filter.max_price {
        let n = q.push_param(SqlParam::Int(max_price));
        criteria.push(format!("price <= ${n}"));
    }
    if let Some(min_price) = filter.min_price {
        let n = q.push_param(SqlParam::Int(min_price));
        criteria.push(format!("price >= ${n}"));
    }
    if let Some(max_sqft) = filter.max_sqft {
        let n = q.push_param(SqlParam::Int(max_sqft));
        criteria.push(format!("sqft <= ${n}"));
    }
    if let Some(min_sqft) = filter.min_sqft {
        let n = q.push_param(SqlParam::Int(min_sqft));
        criteria.push(format!("sqft >= ${n}"));
    }
    if !filter.types.is_empty() {
        let ors: Vec<String> = filter
            .types
            .iter()
            .map(|t| {
                let n = q.push_param(SqlParam::Text(t.clone()));
                format!("type = ${n}")
            })
            .collect();
        criteria.push(format!("({})", ors.join(" or ")));
    }
    if let Some(zip) = &filter.zip {
        let n = q.push_param(SqlParam::Text(zip.clone()));
        criteria.push(format!("zip = ${n}"));
    }

    let where_clause = if criteria.is_empty() {
        String::new()
    } else {
        format!(" and {}", criteria.join(" and "))
    };
    q.sql = format!(
        "select {LISTING_COLUMNS} from {table} where status = '{ACTIVE_STATUS}'{where_clause} \
         order by open_house_soon desc nulls last, sort_id desc limit {PAGE_SIZE}"
    );
    q
}

/// INSERT one action record into its per-action table.
pub fn insert_action(table: &str, rec: &ActionRecord) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.params = vec![
        SqlParam::Text(rec.email.clone()),
        SqlParam::Text(rec.listing_id.clone()),
        SqlParam::Text(rec.name.clone()),
        SqlParam::from(rec.notes.clone()),
        SqlParam::Text(rec.phone.clone()),
    ];
    q.sql = format!(
        "insert into {table} (email, listing_id, name, notes, phone) values ($1, $2, $3, $4, $5)"
    );
    q
}

/// UPDATE: append a video and recompute the sort key, matching on the
/// listing/agent pair. Zero rows affected means the pair did not match.
pub fn append_video(table: &str, update: &VideoUpdate) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.params = vec![
        SqlParam::Text(update.video.clone()),
        SqlParam::Text(update.listing_id.clone()),
        SqlParam::Text(update.agent_id.clone()),
    ];
    q.sql = format!(
        "update {table} set videos = array_append(videos, $1), sort_id = '60-' || listing_id \
         where listing_id = $2 and agent_id = $3"
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> SearchFilter {
        SearchFilter {
            city_id: "boston-ma".into(),
            ..SearchFilter::default()
        }
    }

    #[test]
    fn search_without_filters_is_active_page_only() {
        let q = search_listings("boston_ma", &filter());
        assert!(q.params.is_empty());
        assert!(q.sql.contains("from boston_ma where status = 'ACT' order by"));
        assert!(q.sql.ends_with("order by open_house_soon desc nulls last, sort_id desc limit 30"));
        assert!(!q.sql.contains("agent_id"));
    }

    #[test]
    fn search_appends_predicates_in_fixed_order() {
        let f = SearchFilter {
            baths: 2,
            beds: 3,
            hashtags: vec!["pool".into()],
            last_id: Some("5".into()),
            max_price: Some(900_000),
            min_price: Some(400_000),
            max_sqft: Some(3000),
            min_sqft: Some(1200),
            types: vec!["CC".into(), "SF".into()],
            zip: Some("02118".into()),
            ..filter()
        };
        let q = search_listings("boston_ma", &f);
        assert!(q.sql.contains(
            "baths_full >= $1 and beds >= $2 and $3 && hashtags and sort_id < $4 \
             and price <= $5 and price >= $6 and sqft <= $7 and sqft >= $8 \
             and (type = $9 or type = $10) and zip = $11"
        ));
        assert_eq!(q.params.len(), 11);
        assert_eq!(q.params[0], SqlParam::Int(2));
        assert_eq!(q.params[2], SqlParam::TextArray(vec!["pool".into()]));
        assert_eq!(q.params[3], SqlParam::Text("5".into()));
        assert_eq!(q.params[8], SqlParam::Text("CC".into()));
        assert_eq!(q.params[10], SqlParam::Text("02118".into()));
    }

    #[test]
    fn search_pagination_cursor_compares_sort_key() {
        let f = SearchFilter {
            last_id: Some("5".into()),
            ..filter()
        };
        let q = search_listings("boston_ma", &f);
        assert!(q.sql.contains("sort_id < $1"));
        assert_eq!(q.params, vec![SqlParam::Text("5".into())]);
    }

    #[test]
    fn search_type_group_numbers_placeholders_past_earlier_params() {
        let f = SearchFilter {
            beds: 2,
            types: vec!["SF".into(), "MF".into(), "CC".into()],
            ..filter()
        };
        let q = search_listings("boston_ma", &f);
        assert!(q.sql.contains("(type = $2 or type = $3 or type = $4)"));
        assert_eq!(q.params.len(), 4);
    }

    #[test]
    fn find_is_fixed_single_row_statement() {
        let q = find_listing("boston_ma", "mls-42");
        assert_eq!(
            q.sql,
            format!(
                "select {LISTING_COLUMNS} from boston_ma where listing_id = $1 and status = 'ACT' limit 1"
            )
        );
        assert_eq!(q.params, vec![SqlParam::Text("mls-42".into())]);
    }

    #[test]
    fn insert_action_binds_five_columns() {
        let rec = ActionRecord {
            action: crate::model::ActionKind::Heart,
            email: "jo@x.com".into(),
            listing_id: "42".into(),
            name: "Jo".into(),
            notes: None,
            phone: "5551234567".into(),
        };
        let q = insert_action("hearts", &rec);
        assert_eq!(
            q.sql,
            "insert into hearts (email, listing_id, name, notes, phone) values ($1, $2, $3, $4, $5)"
        );
        assert_eq!(q.params[3], SqlParam::Null);
        assert_eq!(q.params[4], SqlParam::Text("5551234567".into()));
    }

    #[test]
    fn append_video_matches_listing_and_agent() {
        let update = VideoUpdate {
            agent_id: "a-9".into(),
            city_id: "boston-ma".into(),
            listing_id: "mls-42".into(),
            video: "~v123".into(),
        };
        let q = append_video("boston_ma", &update);
        assert!(q.sql.contains("where listing_id = $2 and agent_id = $3"));
        assert!(q.sql.contains("sort_id = '60-' || listing_id"));
        assert_eq!(q.params[0], SqlParam::Text("~v123".into()));
    }
}
