//! Translation of the order service's loosely-typed list payload into
//! canonical [`Order`]s.
//!
//! The backend does not commit to a casing for its fields, so every field is
//! looked up through a fixed, ordered list of aliases. This is the only place
//! that knows about those aliases.

use std::collections::HashSet;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::domain::status::normalize;

pub const ANONYMOUS_CUSTOMER: &str = "Ẩn danh";
pub const NO_PRODUCTS: &str = "(không có dữ liệu)";
pub const DEFAULT_RAW_STATUS: &str = "pending";
pub const DATE_FORMAT: &str = "%H:%M:%S %d/%m/%Y";

const ID_KEYS: &[&str] = &["Id", "id"];
const STATUS_KEYS: &[&str] = &["Status", "status"];
const CUSTOMER_KEYS: &[&str] = &["CustomerName", "/user/name"];
const PHONE_KEYS: &[&str] = &["Phone", "/user/phone"];
const PRODUCT_KEYS: &[&str] = &["ProductList", "productList", "productlist"];
const TOTAL_KEYS: &[&str] = &["Total", "total"];
const CREATED_AT_KEYS: &[&str] = &["CreatedAt", "createdAt", "created_at"];

#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Offset used when rendering `Order::date`.
    pub display_offset: FixedOffset,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            display_offset: FixedOffset::east_opt(7 * 3600).expect("UTC+7 is a valid offset"),
        }
    }
}

/// Parse a full `{ "data": [...] }` list response.
///
/// Any entry that cannot become an order fails the whole batch.
pub fn parse_order_list(
    body: &Value,
    opts: &IngestOptions,
    now: DateTime<Utc>,
) -> Result<Vec<Order>, DomainError> {
    let entries = body
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| DomainError::MalformedResponse("missing or non-list `data`".to_string()))?;

    let mut seen = HashSet::with_capacity(entries.len());
    let mut orders = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let record = entry.as_object().ok_or_else(|| {
            DomainError::MalformedResponse(format!("entry {} is not an object", index))
        })?;
        let order = ingest_order(record, opts, now)
            .ok_or_else(|| DomainError::MalformedResponse(format!("entry {} has no id", index)))?;
        if !seen.insert(order.id.clone()) {
            return Err(DomainError::MalformedResponse(format!(
                "duplicate order id '{}'",
                order.id
            )));
        }
        orders.push(order);
    }
    Ok(orders)
}

/// Build one canonical order. Returns `None` when the record carries no id.
pub fn ingest_order(
    record: &Map<String, Value>,
    opts: &IngestOptions,
    now: DateTime<Utc>,
) -> Option<Order> {
    let id = lookup(record, ID_KEYS).and_then(scalar_string)?;

    let raw_status = lookup_str(record, STATUS_KEYS)
        .unwrap_or(DEFAULT_RAW_STATUS)
        .to_lowercase();
    let status = normalize(&raw_status);

    let customer = lookup_str(record, CUSTOMER_KEYS)
        .unwrap_or(ANONYMOUS_CUSTOMER)
        .to_string();
    let phone = lookup_str(record, PHONE_KEYS).unwrap_or_default().to_string();
    let products = lookup_str(record, PRODUCT_KEYS)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(NO_PRODUCTS)
        .to_string();

    let total = lookup(record, TOTAL_KEYS)
        .and_then(decimal)
        .unwrap_or_else(BigDecimal::zero);
    let total = if total < BigDecimal::zero() {
        log::warn!("Order {} has negative total {}, clamping to 0", id, total);
        BigDecimal::zero()
    } else {
        total
    };

    let date = lookup(record, CREATED_AT_KEYS)
        .and_then(|value| format_timestamp(value, opts.display_offset))
        .unwrap_or_else(|| {
            now.with_timezone(&opts.display_offset)
                .format(DATE_FORMAT)
                .to_string()
        });

    Some(Order {
        id,
        customer,
        phone,
        products,
        total,
        raw_status,
        status,
        date,
    })
}

/// First present, non-null, non-empty value among `keys`.
///
/// Keys starting with `/` are JSON pointers into nested objects.
fn lookup<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| {
        let value = match key.strip_prefix('/') {
            Some(path) => {
                let (head, rest) = path.split_once('/').unwrap_or((path, ""));
                let root = record.get(head)?;
                if rest.is_empty() {
                    root
                } else {
                    root.pointer(&format!("/{}", rest))?
                }
            }
            None => record.get(*key)?,
        };
        match value {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            other => Some(other),
        }
    })
}

fn lookup_str<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    lookup(record, keys).and_then(Value::as_str)
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn decimal(value: &Value) -> Option<BigDecimal> {
    match value {
        Value::Number(n) => BigDecimal::from_str(&n.to_string()).ok(),
        Value::String(s) => BigDecimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Render a backend timestamp, or `None` when it is not a timestamp at all.
///
/// Strings that look like neither RFC 3339 nor a naive datetime are kept
/// verbatim.
fn format_timestamp(value: &Value, offset: FixedOffset) -> Option<String> {
    let instant = match value {
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis)?,
        Value::String(s) => match parse_datetime(s) {
            Some(instant) => instant,
            None => return Some(s.clone()),
        },
        _ => return None,
    };
    Some(instant.with_timezone(&offset).format(DATE_FORMAT).to_string())
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::domain::status::AdminStatus;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 1, 30, 0).unwrap()
    }

    fn parse(body: Value) -> Result<Vec<Order>, DomainError> {
        parse_order_list(&body, &IngestOptions::default(), now())
    }

    #[test]
    fn pascal_case_record_is_ingested() {
        let orders = parse(json!({
            "data": [{
                "Id": "DH001",
                "Status": "WAITING",
                "CustomerName": "Nguyễn Văn An",
                "Phone": "0901234567",
                "ProductList": "Cà phê sữa x2",
                "Total": 58000,
                "CreatedAt": "2025-02-28T20:15:00Z"
            }]
        }))
        .unwrap();

        let order = &orders[0];
        assert_eq!(order.id, "DH001");
        assert_eq!(order.raw_status, "waiting");
        assert_eq!(order.status, AdminStatus::Processing);
        assert_eq!(order.customer, "Nguyễn Văn An");
        assert_eq!(order.phone, "0901234567");
        assert_eq!(order.products, "Cà phê sữa x2");
        assert_eq!(order.total, BigDecimal::from(58000));
        assert_eq!(order.date, "03:15:00 01/03/2025");
    }

    #[test]
    fn camel_case_record_with_nested_user_is_ingested() {
        let orders = parse(json!({
            "data": [{
                "id": 42,
                "status": "confirmed",
                "user": { "name": "Trần Bình", "phone": "0911" },
                "total": "12500.50"
            }]
        }))
        .unwrap();

        let order = &orders[0];
        assert_eq!(order.id, "42");
        assert_eq!(order.raw_status, "confirmed");
        assert_eq!(order.status, AdminStatus::Pending);
        assert_eq!(order.customer, "Trần Bình");
        assert_eq!(order.phone, "0911");
        assert_eq!(order.total, BigDecimal::from_str("12500.50").unwrap());
    }

    #[test]
    fn missing_fields_fall_back_to_sentinels() {
        let orders = parse(json!({ "data": [{ "Id": "X1", "ProductList": "   " }] })).unwrap();

        let order = &orders[0];
        assert_eq!(order.customer, ANONYMOUS_CUSTOMER);
        assert_eq!(order.phone, "");
        assert_eq!(order.products, NO_PRODUCTS);
        assert_eq!(order.total, BigDecimal::zero());
        assert_eq!(order.raw_status, "pending");
        assert_eq!(order.status, AdminStatus::Pending);
        assert_eq!(order.date, "08:30:00 01/03/2025");
    }

    #[test]
    fn empty_pascal_status_falls_through_to_camel_case() {
        let orders = parse(json!({ "data": [{ "Id": "X1", "Status": "", "status": "done" }] })).unwrap();
        assert_eq!(orders[0].raw_status, "done");
        assert_eq!(orders[0].status, AdminStatus::Shipping);
    }

    #[test]
    fn status_is_normalized_from_raw_status() {
        let raws = ["waiting", "Preparing", "DONE", "completed", "cancelled", "confirmed", "weird"];
        let data: Vec<Value> = raws
            .iter()
            .enumerate()
            .map(|(i, s)| json!({ "Id": i, "Status": s }))
            .collect();
        for order in parse(json!({ "data": data })).unwrap() {
            assert_eq!(order.status, normalize(&order.raw_status));
            assert_eq!(order.raw_status, order.raw_status.to_lowercase());
        }
    }

    #[test]
    fn negative_total_is_clamped() {
        let orders = parse(json!({ "data": [{ "Id": "X1", "Total": -5 }] })).unwrap();
        assert_eq!(orders[0].total, BigDecimal::zero());
    }

    #[test]
    fn timestamps_in_several_shapes() {
        let orders = parse(json!({
            "data": [
                { "Id": "a", "CreatedAt": "2025-01-02 03:04:05" },
                { "Id": "b", "createdAt": 1735787045000i64 },
                { "Id": "c", "created_at": "yesterday" }
            ]
        }))
        .unwrap();
        assert_eq!(orders[0].date, "10:04:05 02/01/2025");
        assert_eq!(orders[1].date, "10:04:05 02/01/2025");
        assert_eq!(orders[2].date, "yesterday");
    }

    #[test]
    fn null_or_missing_data_is_malformed() {
        assert!(matches!(parse(json!({ "data": null })), Err(DomainError::MalformedResponse(_))));
        assert!(matches!(parse(json!({})), Err(DomainError::MalformedResponse(_))));
        assert!(matches!(parse(json!([])), Err(DomainError::MalformedResponse(_))));
        assert!(matches!(
            parse(json!({ "data": { "Id": "1" } })),
            Err(DomainError::MalformedResponse(_))
        ));
    }

    #[test]
    fn bad_entries_fail_the_whole_batch() {
        assert!(matches!(
            parse(json!({ "data": [{ "Id": "1" }, "oops"] })),
            Err(DomainError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse(json!({ "data": [{ "Id": "1" }, { "Status": "done" }] })),
            Err(DomainError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse(json!({ "data": [{ "Id": "1" }, { "id": "1" }] })),
            Err(DomainError::MalformedResponse(_))
        ));
    }

    #[test]
    fn empty_list_is_valid() {
        assert!(parse(json!({ "data": [] })).unwrap().is_empty());
    }
}
