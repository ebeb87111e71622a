//! Storefront actions: one function per page-level operation.
//!
//! Each decodes the backend's `{ success, data, error }` reply into a typed
//! value and turns `success: false` into `ApiError::Rejected`. Login and
//! register also write the returned token and user id into the session.

use crate::api::types::{
    ApiResponse, Event, LoginData, LoginRequest, Order, OrderDetail, PurchaseData,
    PurchaseRequest, RegisterData, RegisterRequest,
};
use crate::api::{ApiClient, ApiError};

async fn get_data<T: serde::de::DeserializeOwned>(
    api: &ApiClient,
    path: &str,
) -> Result<T, ApiError> {
    let value = api.get(path).await?;
    let resp: ApiResponse = serde_json::from_value(value)?;
    resp.into_data()
}

async fn post_data<B: serde::Serialize, T: serde::de::DeserializeOwned>(
    api: &ApiClient,
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let value = api.post(path, body).await?;
    let resp: ApiResponse = serde_json::from_value(value)?;
    resp.into_data()
}

/// GET /events
pub async fn list_events(api: &ApiClient) -> Result<Vec<Event>, ApiError> {
    get_data(api, "/events").await
}

/// GET /events/{id}
pub async fn event_detail(api: &ApiClient, event_id: &str) -> Result<Event, ApiError> {
    get_data(api, &format!("/events/{}", urlencoding::encode(event_id))).await
}

/// GET /orders: orders of the user the stored token belongs to, newest first.
pub async fn my_orders(api: &ApiClient) -> Result<Vec<Order>, ApiError> {
    get_data(api, "/orders").await
}

/// GET /orders/{id}
pub async fn order_detail(api: &ApiClient, order_id: &str) -> Result<OrderDetail, ApiError> {
    get_data(api, &format!("/orders/{}", urlencoding::encode(order_id))).await
}

/// POST /login, then persist the session.
pub async fn login(api: &ApiClient, user_id: &str, password: &str) -> Result<LoginData, ApiError> {
    log::info!("Logging in as {}", user_id);

    let req = LoginRequest {
        user_id: user_id.to_string(),
        password: password.to_string(),
    };
    let data: LoginData = post_data(api, "/login", &req).await?;

    api.session().store(&data.token, &data.user_id)?;
    log::info!("Login complete for user {}", data.user_id);
    Ok(data)
}

/// POST /register. The backend answers with a token, so registering also
/// logs the user in.
pub async fn register(
    api: &ApiClient,
    user_id: &str,
    password: &str,
) -> Result<RegisterData, ApiError> {
    log::info!("Registering user {}", user_id);

    let req = RegisterRequest {
        user_id: user_id.to_string(),
        password: password.to_string(),
    };
    let data: RegisterData = post_data(api, "/register", &req).await?;

    api.session().store(&data.token, &data.user_id)?;
    Ok(data)
}

/// POST /purchase on behalf of the logged-in user.
pub async fn purchase(
    api: &ApiClient,
    event_id: &str,
    quantity: u32,
) -> Result<PurchaseData, ApiError> {
    if quantity == 0 {
        return Err(ApiError::InvalidQuantity);
    }
    let user_id = api.session().user_id()?.ok_or(ApiError::NotLoggedIn)?;

    let req = PurchaseRequest {
        user_id,
        event_id: event_id.to_string(),
        quantity,
    };
    let data: PurchaseData = post_data(api, "/purchase", &req).await?;

    log::info!(
        "Purchased {} ticket(s) for {} (order {})",
        quantity,
        event_id,
        data.order_id
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiMode, EnvelopeMode};
    use crate::config::ApiConfig;
    use crate::session::Session;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mock_client() -> ApiClient {
        let config = ApiConfig {
            mode: ApiMode::Mock,
            ..ApiConfig::default()
        };
        ApiClient::new(&config, Arc::new(Session::in_memory()))
    }

    fn live_client(base_url: &str) -> ApiClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            mode: ApiMode::Live,
            envelope: EnvelopeMode::Unwrap,
            ..ApiConfig::default()
        };
        ApiClient::new(&config, Arc::new(Session::in_memory()))
    }

    /// Wrap a payload the way the API gateway proxy does.
    fn proxied(payload: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 200,
            "headers": {"Content-Type": "application/json"},
            "body": payload.to_string()
        }))
    }

    #[tokio::test]
    async fn test_mock_storefront_flow() {
        let api = mock_client();

        let events = list_events(&api).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "Mock Concert");

        let detail = event_detail(&api, "evt2").await.unwrap();
        assert_eq!(detail.event_id, "evt1");
        assert_eq!(detail.remaining_tickets, 88);

        let login_data = login(&api, "alice", "secret").await.unwrap();
        assert_eq!(login_data.user_id, "alice");
        assert_eq!(api.session().token().unwrap(), "mock-token-user1");
        assert_eq!(api.session().user_id().unwrap().as_deref(), Some("alice"));

        let bought = purchase(&api, "evt1", 2).await.unwrap();
        assert_eq!(bought.order_id, "order999");

        let orders = my_orders(&api).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id, "order123");
        assert_eq!(orders[0].event, None);
    }

    #[tokio::test]
    async fn test_mock_register_is_rejected() {
        let api = mock_client();
        let err = register(&api, "alice", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref msg) if msg == "Unknown mock POST"));
        assert_eq!(api.session().user_id().unwrap(), None);
    }

    #[tokio::test]
    async fn test_purchase_requires_login_and_quantity() {
        let api = mock_client();
        assert!(matches!(
            purchase(&api, "evt1", 1).await,
            Err(ApiError::NotLoggedIn)
        ));

        api.session().store("t", "alice").unwrap();
        assert!(matches!(
            purchase(&api, "evt1", 0).await,
            Err(ApiError::InvalidQuantity)
        ));
    }

    #[tokio::test]
    async fn test_live_login_stores_session_and_authorizes_orders() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(json!({"userId": "alice", "password": "pw"})))
            .respond_with(proxied(json!({
                "success": true,
                "data": {"token": "token-alice", "userId": "alice"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .and(header("Authorization", "token-alice"))
            .respond_with(proxied(json!({
                "success": true,
                "data": [{
                    "orderId": "oabc12345",
                    "eventId": "evt1",
                    "quantity": 3,
                    "createdAt": "2025-03-01 12:00:00",
                    "event": {"eventId": "evt1", "name": "Concert"}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = live_client(&server.uri());
        login(&api, "alice", "pw").await.unwrap();

        let orders = my_orders(&api).await.unwrap();
        assert_eq!(orders[0].quantity, 3);
        assert_eq!(orders[0].event.as_ref().unwrap()["name"], "Concert");
    }

    #[tokio::test]
    async fn test_live_failed_login_leaves_session_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(proxied(json!({
                "success": false,
                "error": "Invalid userId or password"
            })))
            .mount(&server)
            .await;

        let api = live_client(&server.uri());
        let err = login(&api, "alice", "wrong").await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref msg) if msg == "Invalid userId or password"));
        assert_eq!(api.session().token().unwrap(), "");
    }

    #[tokio::test]
    async fn test_live_register_logs_in() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(proxied(json!({
                "success": true,
                "data": {"token": "token-bob", "userId": "bob", "message": "User created"}
            })))
            .mount(&server)
            .await;

        let api = live_client(&server.uri());
        let data = register(&api, "bob", "pw").await.unwrap();
        assert_eq!(data.message, "User created");
        assert_eq!(api.session().token().unwrap(), "token-bob");
    }

    #[tokio::test]
    async fn test_live_purchase_sends_session_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/purchase"))
            .and(body_json(json!({"userId": "alice", "eventId": "evt1", "quantity": 2})))
            .respond_with(proxied(json!({
                "success": true,
                "data": {"orderId": "o1234abcd", "message": "Purchase successful"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = live_client(&server.uri());
        api.session().store("token-alice", "alice").unwrap();
        let data = purchase(&api, "evt1", 2).await.unwrap();
        assert_eq!(data.order_id, "o1234abcd");
    }

    #[tokio::test]
    async fn test_live_detail_paths_are_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders/o%2F1"))
            .respond_with(proxied(json!({
                "success": true,
                "data": {
                    "orderId": "o/1", "eventId": "evt1", "quantity": 1,
                    "status": "confirmed", "userId": "alice",
                    "createdAt": "2025-03-01 12:00:00"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = live_client(&server.uri());
        let detail = order_detail(&api, "o/1").await.unwrap();
        assert_eq!(detail.status, "confirmed");
    }

    #[tokio::test]
    async fn test_live_sold_out_purchase_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/purchase"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "statusCode": 400,
                "body": "{\"success\": false, \"error\": \"Not enough tickets available\"}"
            })))
            .mount(&server)
            .await;

        let api = live_client(&server.uri());
        api.session().store("token-alice", "alice").unwrap();
        let err = purchase(&api, "evt1", 500).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref msg) if msg.contains("Not enough tickets")));
    }
}
