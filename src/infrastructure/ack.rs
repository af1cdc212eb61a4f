use serde_json::Value;

use crate::domain::ports::StatusAck;

pub const DEFAULT_ACK_MARKER: &str = "Đơn hàng";

/// Interpret a 2xx status-update response body.
///
/// A boolean `success` field wins when present. Otherwise the backend's
/// legacy convention applies: the update went through iff the human-readable
/// `message` contains `marker`.
pub fn interpret_status_ack(body: &Value, marker: &str) -> StatusAck {
    let message = message_of(body);

    if let Some(success) = body.get("success").and_then(Value::as_bool) {
        return if success {
            StatusAck::Accepted
        } else {
            StatusAck::Rejected(message.unwrap_or("update refused").to_string())
        };
    }

    match message {
        Some(msg) if !marker.is_empty() && msg.contains(marker) => StatusAck::Accepted,
        Some(msg) => StatusAck::Rejected(msg.to_string()),
        None => StatusAck::Rejected("unrecognized acknowledgment".to_string()),
    }
}

pub fn message_of(body: &Value) -> Option<&str> {
    ["message", "Message"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn marker_in_message_is_accepted() {
        let body = json!({ "message": "Đơn hàng đã cập nhật" });
        assert_eq!(interpret_status_ack(&body, DEFAULT_ACK_MARKER), StatusAck::Accepted);

        let body = json!({ "Message": "Cập nhật Đơn hàng thành công" });
        assert_eq!(interpret_status_ack(&body, DEFAULT_ACK_MARKER), StatusAck::Accepted);
    }

    #[test]
    fn message_without_marker_is_rejected() {
        let body = json!({ "message": "error" });
        assert_eq!(
            interpret_status_ack(&body, DEFAULT_ACK_MARKER),
            StatusAck::Rejected("error".to_string())
        );
    }

    #[test]
    fn missing_message_is_rejected() {
        assert!(matches!(
            interpret_status_ack(&json!({}), DEFAULT_ACK_MARKER),
            StatusAck::Rejected(_)
        ));
        assert!(matches!(
            interpret_status_ack(&json!("Đơn hàng"), DEFAULT_ACK_MARKER),
            StatusAck::Rejected(_)
        ));
    }

    #[test]
    fn explicit_success_flag_takes_precedence() {
        let body = json!({ "success": false, "message": "Đơn hàng không tồn tại" });
        assert_eq!(
            interpret_status_ack(&body, DEFAULT_ACK_MARKER),
            StatusAck::Rejected("Đơn hàng không tồn tại".to_string())
        );

        let body = json!({ "success": true });
        assert_eq!(interpret_status_ack(&body, DEFAULT_ACK_MARKER), StatusAck::Accepted);
    }

    #[test]
    fn empty_marker_never_matches() {
        let body = json!({ "message": "anything" });
        assert!(matches!(interpret_status_ack(&body, ""), StatusAck::Rejected(_)));
    }
}
