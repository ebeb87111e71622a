//! Canned backend used when the client runs in mock mode.
//!
//! Routing is by literal path: an exact match for `/events`, `/login` and
//! `/purchase`, a prefix match for event details and orders. Unknown paths
//! answer with a `success: false` object rather than an error, the same way
//! the real backend reports failures.

use serde_json::{json, Value};

fn events() -> Value {
    json!([
        {
            "eventId": "evt1",
            "name": "Mock Concert",
            "description": "This is a mocked concert event.",
            "imageUrl": "https://picsum.photos/400?random=1",
            "remainingTickets": 99
        },
        {
            "eventId": "evt2",
            "name": "Mock NBA Game",
            "description": "Mock basketball game.",
            "imageUrl": "https://picsum.photos/400?random=2",
            "remainingTickets": 42
        }
    ])
}

fn event_detail() -> Value {
    json!({
        "eventId": "evt1",
        "name": "Mock Concert",
        "description": "This is a mocked event detail page.",
        "imageUrl": "https://picsum.photos/400?random=3",
        "remainingTickets": 88
    })
}

fn orders() -> Value {
    json!([
        {
            "orderId": "order123",
            "eventId": "evt1",
            "quantity": 2,
            "createdAt": "2025-01-01T10:00:00Z"
        }
    ])
}

pub fn mock_get(path: &str) -> Value {
    log::debug!("[MOCK GET] {}", path);

    if path == "/events" {
        return json!({ "success": true, "data": events() });
    }
    if path.starts_with("/events/") {
        return json!({ "success": true, "data": event_detail() });
    }
    if path.starts_with("/orders") {
        return json!({ "success": true, "data": orders() });
    }

    json!({ "success": false, "error": "Unknown mock GET" })
}

pub fn mock_post(path: &str, body: &Value) -> Value {
    log::debug!("[MOCK POST] {} {}", path, body);

    match path {
        "/login" => json!({
            "success": true,
            "data": {
                "token": "mock-token-user1",
                "userId": body.get("userId").cloned().unwrap_or(Value::Null)
            }
        }),
        "/purchase" => json!({
            "success": true,
            "data": {
                "orderId": "order999",
                "message": "Mock purchase successful"
            }
        }),
        _ => json!({ "success": false, "error": "Unknown mock POST" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_returns_both_canned_events() {
        let resp = mock_get("/events");
        assert_eq!(resp["success"], true);
        let data = resp["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["eventId"], "evt1");
        assert_eq!(data[1]["eventId"], "evt2");
        assert_eq!(data[1]["remainingTickets"], 42);
    }

    #[test]
    fn test_any_event_id_returns_the_same_detail() {
        for path in ["/events/evt1", "/events/evt2", "/events/nope", "/events/"] {
            let resp = mock_get(path);
            assert_eq!(resp["success"], true);
            assert_eq!(resp["data"], event_detail(), "path {}", path);
        }
    }

    #[test]
    fn test_events_match_is_exact_for_listing() {
        let resp = mock_get("/eventsx");
        assert_eq!(resp["success"], false);
        assert_eq!(resp["error"], "Unknown mock GET");
    }

    #[test]
    fn test_orders_prefix() {
        for path in ["/orders", "/orders/order123", "/orders?mine=1"] {
            let resp = mock_get(path);
            assert_eq!(resp["data"][0]["orderId"], "order123");
        }
    }

    #[test]
    fn test_login_echoes_user_id() {
        let resp = mock_post("/login", &json!({"userId": "alice", "password": "x"}));
        assert_eq!(resp["success"], true);
        assert_eq!(resp["data"]["userId"], "alice");
        assert_eq!(resp["data"]["token"], "mock-token-user1");

        let resp = mock_post("/login", &json!({"userId": "bob"}));
        assert_eq!(resp["data"]["userId"], "bob");
    }

    #[test]
    fn test_purchase_and_unknown_post() {
        let resp = mock_post("/purchase", &json!({"eventId": "evt1", "quantity": 1}));
        assert_eq!(resp["data"]["orderId"], "order999");

        let resp = mock_post("/register", &json!({}));
        assert_eq!(resp, json!({"success": false, "error": "Unknown mock POST"}));
    }
}
