//! Integration tests for expense CRUD and ownership checks.
//!
//! Run with: `cargo test -p wealth-ledger-integration-tests -- --ignored`
//! (see crate docs for the required environment).

use reqwest::StatusCode;

use wealth_ledger_integration_tests::{TestContext, extract_id_after};

async fn create_expense(ctx: &TestContext, amount: &str, notes: &str) -> i64 {
    let resp = ctx
        .client
        .post(ctx.url("/form"))
        .form(&[
            ("date", "2026-02-01"),
            ("category", "utilities"),
            ("amount", amount),
            ("currency", "USD"),
            ("notes", notes),
        ])
        .send()
        .await
        .expect("create expense");
    assert!(resp.url().path().ends_with("/dashboard"));

    let body = resp.text().await.expect("body");
    extract_id_after(&body, "/edit/").expect("expense id visible on dashboard")
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_new_user_dashboard_is_empty_not_an_error() {
    let ctx = TestContext::new();
    ctx.signed_in_user("long-enough-pw").await;

    let resp = ctx
        .client
        .get(ctx.url("/dashboard"))
        .send()
        .await
        .expect("dashboard request");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("body");
    assert!(body.contains("No expenses yet"));
    assert!(body.contains("No portfolios yet"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_owner_can_update_and_delete() {
    let ctx = TestContext::new();
    ctx.signed_in_user("long-enough-pw").await;

    let id = create_expense(&ctx, "12.50", "water bill").await;

    // Update
    let resp = ctx
        .client
        .post(ctx.url(&format!("/edit/{id}")))
        .form(&[
            ("date", "2026-02-02"),
            ("category", "utilities"),
            ("amount", "13.75"),
            ("currency", "USD"),
            ("notes", "water bill (corrected)"),
        ])
        .send()
        .await
        .expect("update expense");
    let body = resp.text().await.expect("body");
    assert!(body.contains("13.75"));
    assert!(!body.contains("12.50"));

    // Delete
    let resp = ctx
        .client
        .post(ctx.url(&format!("/delete/{id}")))
        .send()
        .await
        .expect("delete expense");
    let body = resp.text().await.expect("body");
    assert!(body.contains("No expenses yet"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_update_by_non_owner_is_forbidden_and_changes_nothing() {
    let owner = TestContext::new();
    owner.signed_in_user("long-enough-pw").await;
    let id = create_expense(&owner, "42.00", "owned by A").await;

    // A different user with their own session
    let intruder = TestContext::new();
    intruder.signed_in_user("long-enough-pw").await;

    let resp = intruder
        .client
        .post(intruder.url(&format!("/edit/{id}")))
        .form(&[
            ("date", "2026-02-03"),
            ("category", "other"),
            ("amount", "1.00"),
            ("currency", "USD"),
            ("notes", "hijacked"),
        ])
        .send()
        .await
        .expect("cross-user update");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // The record is unchanged for its owner
    let resp = owner
        .client
        .get(owner.url("/dashboard"))
        .send()
        .await
        .expect("dashboard request");
    let body = resp.text().await.expect("body");
    assert!(body.contains("42.00"));
    assert!(body.contains("owned by A"));
    assert!(!body.contains("hijacked"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_delete_by_non_owner_is_forbidden() {
    let owner = TestContext::new();
    owner.signed_in_user("long-enough-pw").await;
    let id = create_expense(&owner, "9.99", "keep me").await;

    let intruder = TestContext::new();
    intruder.signed_in_user("long-enough-pw").await;

    let resp = intruder
        .client
        .post(intruder.url(&format!("/delete/{id}")))
        .send()
        .await
        .expect("cross-user delete");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = owner
        .client
        .get(owner.url("/dashboard"))
        .send()
        .await
        .expect("dashboard request");
    assert!(resp.text().await.expect("body").contains("keep me"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_update_of_missing_record_is_not_found() {
    let ctx = TestContext::new();
    ctx.signed_in_user("long-enough-pw").await;

    let resp = ctx
        .client
        .post(ctx.url("/edit/999999999"))
        .form(&[
            ("date", "2026-02-04"),
            ("category", "food"),
            ("amount", "1.00"),
            ("currency", "AED"),
            ("notes", "nothing here"),
        ])
        .send()
        .await
        .expect("update missing expense");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
