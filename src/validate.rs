//! Per-endpoint request sanitization. Each function turns a raw JSON body
//! into a typed value or fails with a 400 carrying the offending payload.
//! Validation always runs before any I/O.

use crate::error::AppError;
use crate::model::{ActionKind, ActionRecord, SearchFilter, VideoUpdate};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_.-]+@[A-Za-z0-9_.-]+\.[A-Za-z0-9_.-]+$").unwrap()
    })
}

fn invalid(body: &Value) -> AppError {
    AppError::BadRequest(format!("invalid data: {body}"))
}

fn required_str(body: &Value, field: &str) -> Result<String, AppError> {
    match body.get(field).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => Err(invalid(body)),
    }
}

fn optional_u32(body: &Value, field: &str) -> Result<u32, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(0),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| invalid(body)),
    }
}

fn optional_i64(body: &Value, field: &str) -> Result<Option<i64>, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_i64().map(Some).ok_or_else(|| invalid(body)),
    }
}

fn optional_string(body: &Value, field: &str) -> Result<Option<String>, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(body)),
    }
}

/// Sort keys are text, but clients send the cursor as either string or number.
fn optional_cursor(body: &Value, field: &str) -> Result<Option<String>, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if !s.is_empty() => Ok(Some(s.clone())),
        Some(Value::String(_)) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(invalid(body)),
    }
}

fn string_array(body: &Value, field: &str) -> Result<Vec<String>, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(|| invalid(body)))
            .collect(),
        Some(_) => Err(invalid(body)),
    }
}

/// Normalize a phone number to exactly 10 digits: strip everything that is
/// not a digit, then one leading `1` country code.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.trim().chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.strip_prefix('1').unwrap_or(&digits);
    if digits.len() == 10 {
        Some(digits.to_string())
    } else {
        None
    }
}

/// `/find`: `{id, cityId}`.
pub fn find_request(body: &Value) -> Result<(String, String), AppError> {
    tracing::debug!(%body, "sanitizing for find");
    let id = required_str(body, "id")?;
    let city_id = required_str(body, "cityId")?;
    Ok((id, city_id))
}

/// `/search`: `cityId` plus optional criteria; everything else in the body is
/// ignored.
pub fn search_request(body: &Value) -> Result<SearchFilter, AppError> {
    tracing::debug!(%body, "sanitizing for search");
    let city_id = required_str(body, "cityId")?;
    let mut hashtags = string_array(body, "hashtags")?;
    hashtags.retain(|h| !h.trim().is_empty());
    Ok(SearchFilter {
        baths: optional_u32(body, "baths")?,
        beds: optional_u32(body, "beds")?,
        city_id,
        hashtags,
        last_id: optional_cursor(body, "lastId")?,
        max_price: optional_i64(body, "maxPrice")?,
        min_price: optional_i64(body, "minPrice")?,
        max_sqft: optional_i64(body, "maxSqft")?,
        min_sqft: optional_i64(body, "minSqft")?,
        types: string_array(body, "types")?,
        zip: optional_string(body, "zip")?,
    })
}

/// `/update`: `{listingId, cityId, video, agent: {agentId, user}}`. The agent
/// id is carried onto the update so the store can match the listing/agent
/// pair.
pub fn update_request(body: &Value) -> Result<VideoUpdate, AppError> {
    tracing::debug!(%body, "sanitizing for update");
    let listing_id = required_str(body, "listingId")?;
    let city_id = required_str(body, "cityId")?;
    let video = required_str(body, "video")?;
    let agent = body.get("agent").ok_or_else(|| invalid(body))?;
    let agent_id = required_str(agent, "agentId").map_err(|_| invalid(body))?;
    let user = agent.get("user").ok_or_else(|| invalid(body))?;
    for field in ["name", "email", "phone"] {
        required_str(user, field).map_err(|_| invalid(body))?;
    }
    Ok(VideoUpdate {
        agent_id,
        city_id,
        listing_id,
        video: format!("~{video}"),
    })
}

/// `/action`: `{action, listingId, user: {name, email, phone}, notes?}` with
/// email and phone well-formed.
pub fn action_request(body: &Value) -> Result<ActionRecord, AppError> {
    tracing::debug!(%body, "sanitizing for action");
    let action = body
        .get("action")
        .and_then(Value::as_str)
        .and_then(ActionKind::parse)
        .ok_or_else(|| AppError::BadRequest(format!("invalid action: {body}")))?;
    let listing_id = required_str(body, "listingId")?;
    let user = body.get("user").ok_or_else(|| invalid(body))?;
    let name = required_str(user, "name").map_err(|_| invalid(body))?;
    let email = required_str(user, "email").map_err(|_| invalid(body))?;
    let phone_raw = required_str(user, "phone").map_err(|_| invalid(body))?;

    let email = email.trim().to_string();
    if !email_re().is_match(&email) {
        return Err(invalid(body));
    }
    let phone = normalize_phone(&phone_raw).ok_or_else(|| invalid(body))?;

    Ok(ActionRecord {
        action,
        email,
        listing_id,
        name,
        notes: optional_string(body, "notes")?,
        phone,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn action_body() -> Value {
        json!({
            "action": "heart",
            "listingId": "42",
            "user": {"name": "Jo", "email": "jo@x.com", "phone": "555-123-4567"}
        })
    }

    #[test]
    fn phone_normalizes_to_ten_digits() {
        assert_eq!(normalize_phone("555-123-4567").as_deref(), Some("5551234567"));
        assert_eq!(normalize_phone("(555) 123 4567").as_deref(), Some("5551234567"));
        assert_eq!(normalize_phone("1-555-123-4567").as_deref(), Some("5551234567"));
        assert_eq!(normalize_phone(" +1 555 123 4567 ").as_deref(), Some("5551234567"));
    }

    #[test]
    fn malformed_phones_are_rejected() {
        assert_eq!(normalize_phone("abc"), None);
        assert_eq!(normalize_phone("123"), None);
        assert_eq!(normalize_phone("555-123-456"), None);
        assert_eq!(normalize_phone("25551234567"), None);
    }

    #[test]
    fn action_request_accepts_valid_payload() {
        let rec = action_request(&action_body()).unwrap();
        assert_eq!(rec.action, ActionKind::Heart);
        assert_eq!(rec.phone, "5551234567");
        assert_eq!(rec.email, "jo@x.com");
        assert_eq!(rec.notes, None);
    }

    #[test]
    fn action_request_rejects_unknown_action() {
        let mut body = action_body();
        body["action"] = json!("share");
        assert!(matches!(
            action_request(&body),
            Err(crate::error::AppError::BadRequest(_))
        ));
    }

    #[test]
    fn action_request_rejects_missing_user_fields() {
        for field in ["name", "email", "phone"] {
            let mut body = action_body();
            body["user"].as_object_mut().unwrap().remove(field);
            assert!(action_request(&body).is_err(), "missing {field}");
        }
    }

    #[test]
    fn action_request_rejects_bad_email() {
        let mut body = action_body();
        body["user"]["email"] = json!("not-an-email");
        assert!(action_request(&body).is_err());
    }

    #[test]
    fn search_request_defaults_and_filters_blank_hashtags() {
        let filter = search_request(&json!({
            "cityId": "boston-ma",
            "hashtags": ["pool", " ", ""],
            "lastId": 5
        }))
        .unwrap();
        assert_eq!(filter.baths, 0);
        assert_eq!(filter.beds, 0);
        assert_eq!(filter.hashtags, vec!["pool".to_string()]);
        assert_eq!(filter.last_id.as_deref(), Some("5"));
        assert!(filter.types.is_empty());
    }

    #[test]
    fn search_request_requires_city() {
        assert!(search_request(&json!({"beds": 2})).is_err());
    }

    #[test]
    fn update_request_carries_agent_id_and_video_marker() {
        let update = update_request(&json!({
            "listingId": "mls-42",
            "cityId": "boston-ma",
            "video": "v123",
            "agent": {
                "agentId": "a-9",
                "user": {"name": "Pat", "email": "pat@x.com", "phone": "5551234567"}
            }
        }))
        .unwrap();
        assert_eq!(update.agent_id, "a-9");
        assert_eq!(update.video, "~v123");
    }

    #[test]
    fn update_request_rejects_missing_agent_user() {
        let body = json!({
            "listingId": "mls-42",
            "cityId": "boston-ma",
            "video": "v123",
            "agent": {"agentId": "a-9"}
        });
        assert!(update_request(&body).is_err());
    }

    #[test]
    fn find_request_requires_both_ids() {
        assert!(find_request(&json!({"id": "mls-42"})).is_err());
        assert!(find_request(&json!({"cityId": "boston-ma"})).is_err());
        let (id, city) = find_request(&json!({"id": "mls-42", "cityId": "boston-ma"})).unwrap();
        assert_eq!((id.as_str(), city.as_str()), ("mls-42", "boston-ma"));
    }
}
