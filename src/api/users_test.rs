use serde_json::json;

use super::*;
use crate::http::Method;
use crate::test_helpers::{MockTransport, Reply, client_with, user_json};
use crate::types::Role;
use crate::views::SortOrder;

#[tokio::test]
async fn list_filters_by_role() {
    let mock = MockTransport::new();
    mock.on(
        Method::Get,
        "/users",
        Reply::Json(200, json!({ "data": [user_json(2, "bob")], "total": 11, "page": 1, "limit": 10 })),
    );
    let (_, client) = client_with(&mock);
    let query = ListQuery::new(10).filter(ROLE_FILTER, Role::Admin.as_str()).sorted_by("username", SortOrder::Asc);

    let page = Users::new(client).list(&query).await.unwrap();

    assert_eq!(page.total_pages(), 2);
    let sent = &mock.requests()[0].query;
    assert!(sent.contains(&("role".to_owned(), "admin".to_owned())));
    assert!(sent.contains(&("order".to_owned(), "ASC".to_owned())));
}

#[tokio::test]
async fn get_includes_loan_history() {
    let mock = MockTransport::new();
    let mut detail = user_json(2, "bob");
    detail["loans"] = json!([
        { "loan_id": 1, "loan_date": "2024-01-01", "due_date": "2024-01-15", "return_date": "2024-01-10" },
        { "loan_id": 2, "loan_date": "2024-02-01", "due_date": "2024-02-15", "return_date": null, "fine_amount": 1.5 },
    ]);
    mock.on(Method::Get, "/users/2", Reply::Json(200, detail));
    let (_, client) = client_with(&mock);

    let user = Users::new(client).get(2).await.unwrap();

    assert_eq!(user.profile.username.as_deref(), Some("bob"));
    let active: Vec<i64> = user.loans.iter().filter(|l| l.is_active()).map(|l| l.loan_id).collect();
    assert_eq!(active, vec![2]);
}

#[tokio::test]
async fn update_without_password_omits_it() {
    let mock = MockTransport::new();
    mock.on(Method::Put, "/users/2", Reply::Json(200, json!({})));
    let (_, client) = client_with(&mock);
    let payload = UserPayload {
        username: "bob".into(),
        email: "bob@example.test".into(),
        password: None,
        full_name: "Bob B".into(),
        role: Role::User,
    };

    Users::new(client).update(2, &payload).await.unwrap();

    let body = mock.requests()[0].body.clone().unwrap();
    assert_eq!(body, json!({ "username": "bob", "email": "bob@example.test", "fullName": "Bob B", "role": "user" }));
}
