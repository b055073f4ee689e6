use super::*;

async fn status(mock: &MockTransport, path: &str) -> u16 {
    mock.send(&ApiRequest::get(path)).await.unwrap().status
}

#[tokio::test]
async fn queued_replies_are_served_in_order_then_repeat() {
    let mock = MockTransport::new();
    mock.on(Method::Get, "/x", Reply::Json(401, json!({})));
    mock.on(Method::Get, "/x", Reply::Json(200, json!({})));

    assert_eq!(status(&mock, "/x").await, 401);
    assert_eq!(status(&mock, "/x").await, 200);
    assert_eq!(status(&mock, "/x").await, 200);
}

#[tokio::test]
async fn reply_queued_after_tail_was_served_replaces_it() {
    let mock = MockTransport::new();
    mock.on(Method::Get, "/x", Reply::Json(200, json!({})));
    assert_eq!(status(&mock, "/x").await, 200);

    mock.on(Method::Get, "/x", Reply::Json(401, json!({})));

    assert_eq!(status(&mock, "/x").await, 401);
}

#[tokio::test]
async fn unscripted_route_is_not_found() {
    let mock = MockTransport::new();
    assert_eq!(status(&mock, "/nowhere").await, 404);
}
