use serde_json::json;

use super::*;
use crate::http::Method;
use crate::test_helpers::{MockTransport, Reply, client_with};

fn script(mock: &MockTransport, top_borrowers: Reply) {
    mock.on(
        Method::Get,
        "/dashboard",
        Reply::Json(
            200,
            json!({ "totalBooks": 120, "totalCopies": 300, "totalUsers": 42, "activeLoans": 17, "overdueLoans": 3 }),
        ),
    );
    mock.on(
        Method::Get,
        "/most-borrowed-books",
        Reply::Json(200, json!([{ "title": "Dune", "author": "Herbert", "loanCount": 9 }])),
    );
    mock.on(Method::Get, "/users-most-loans", top_borrowers);
}

#[tokio::test]
async fn load_combines_three_reports() {
    let mock = MockTransport::new();
    script(&mock, Reply::Json(200, json!([{ "fullName": "Alice A", "username": "alice", "loanCount": 6 }])));
    let (_, client) = client_with(&mock);

    let report = Dashboard::new(client).load().await.unwrap();

    assert_eq!(report.stats.overdue_loans, 3);
    assert_eq!(report.most_borrowed[0].loan_count, 9);
    assert_eq!(report.top_borrowers[0].username.as_deref(), Some("alice"));
    assert_eq!(mock.requests().len(), 3);
    let limits = mock.requests().iter().filter(|r| r.query == vec![("limit".to_owned(), "5".to_owned())]).count();
    assert_eq!(limits, 2);
}

#[tokio::test]
async fn any_failure_fails_the_dashboard() {
    let mock = MockTransport::new();
    script(&mock, Reply::Json(500, json!({ "message": "report failed" })));
    let (_, client) = client_with(&mock);

    let err = Dashboard::new(client).load().await.unwrap_err();
    assert_eq!(err.user_message(), "report failed");
}
