//! Integration tests for portfolio/stock CRUD, transitive ownership, and
//! cascade delete.
//!
//! Run with: `cargo test -p wealth-ledger-integration-tests -- --ignored`
//! (see crate docs for the required environment).

use reqwest::StatusCode;

use wealth_ledger_integration_tests::{TestContext, extract_id_after};

async fn create_portfolio(ctx: &TestContext, name: &str) -> i64 {
    let resp = ctx
        .client
        .post(ctx.url("/add_portfolio"))
        .form(&[("name", name), ("description", "integration test portfolio")])
        .send()
        .await
        .expect("create portfolio");

    extract_id_after(resp.url().path(), "/portfolio/").expect("portfolio id in redirect")
}

async fn add_stock(ctx: &TestContext, portfolio_id: i64, symbol: &str) -> i64 {
    let resp = ctx
        .client
        .post(ctx.url(&format!("/portfolio/{portfolio_id}/add_stock")))
        .form(&[
            ("market", "US"),
            ("symbol", symbol),
            ("name", "Test Holding"),
            ("quantity", "10"),
            ("purchase_price", "25.50"),
            ("purchase_date", "2026-01-02"),
            ("currency", "USD"),
            ("notes", ""),
        ])
        .send()
        .await
        .expect("add stock");

    let body = resp.text().await.expect("body");
    extract_id_after(&body, "/stock/").expect("stock id visible on portfolio page")
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_portfolio_page_totals_position_values() {
    let ctx = TestContext::new();
    ctx.signed_in_user("long-enough-pw").await;

    let portfolio_id = create_portfolio(&ctx, "Totals").await;
    add_stock(&ctx, portfolio_id, "AAA").await;

    let resp = ctx
        .client
        .get(ctx.url(&format!("/portfolio/{portfolio_id}")))
        .send()
        .await
        .expect("portfolio page");
    let body = resp.text().await.expect("body");

    // 10 x 25.50
    assert!(body.contains("255.00"));
    assert!(body.contains("without currency conversion"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_deleting_portfolio_cascades_to_stocks() {
    let ctx = TestContext::new();
    ctx.signed_in_user("long-enough-pw").await;

    let portfolio_id = create_portfolio(&ctx, "Doomed").await;
    let stock_id = add_stock(&ctx, portfolio_id, "GONE").await;

    let resp = ctx
        .client
        .post(ctx.url(&format!("/portfolio/{portfolio_id}/delete")))
        .send()
        .await
        .expect("delete portfolio");
    assert!(resp.url().path().ends_with("/dashboard"));

    // The portfolio no longer appears in the owner's list
    let body = resp.text().await.expect("body");
    assert!(!body.contains("Doomed"));

    // Portfolio and stock are both gone
    let resp = ctx
        .client
        .get(ctx.url(&format!("/portfolio/{portfolio_id}")))
        .send()
        .await
        .expect("portfolio page");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = ctx
        .client
        .get(ctx.url(&format!("/stock/{stock_id}/edit")))
        .send()
        .await
        .expect("stock edit page");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_portfolio_pages_are_owner_only() {
    let owner = TestContext::new();
    owner.signed_in_user("long-enough-pw").await;
    let portfolio_id = create_portfolio(&owner, "Private").await;

    let intruder = TestContext::new();
    intruder.signed_in_user("long-enough-pw").await;

    let resp = intruder
        .client
        .get(intruder.url(&format!("/portfolio/{portfolio_id}")))
        .send()
        .await
        .expect("portfolio page");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = intruder
        .client
        .post(intruder.url(&format!("/portfolio/{portfolio_id}/delete")))
        .send()
        .await
        .expect("delete portfolio");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_stock_mutations_check_transitive_ownership() {
    let owner = TestContext::new();
    owner.signed_in_user("long-enough-pw").await;
    let portfolio_id = create_portfolio(&owner, "Holdings").await;
    let stock_id = add_stock(&owner, portfolio_id, "MINE").await;

    let intruder = TestContext::new();
    intruder.signed_in_user("long-enough-pw").await;

    let resp = intruder
        .client
        .post(intruder.url(&format!("/stock/{stock_id}/edit")))
        .form(&[
            ("market", "US"),
            ("symbol", "THEFT"),
            ("name", "Hijacked"),
            ("quantity", "1"),
            ("purchase_price", "0.01"),
            ("purchase_date", "2026-01-03"),
            ("currency", "USD"),
            ("notes", ""),
        ])
        .send()
        .await
        .expect("cross-user stock update");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = intruder
        .client
        .post(intruder.url(&format!("/stock/{stock_id}/delete")))
        .send()
        .await
        .expect("cross-user stock delete");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Still intact for the owner
    let resp = owner
        .client
        .get(owner.url(&format!("/portfolio/{portfolio_id}")))
        .send()
        .await
        .expect("portfolio page");
    assert!(resp.text().await.expect("body").contains("MINE"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_add_stock_does_not_recheck_portfolio_ownership() {
    // Any logged-in user may add a stock to an existing portfolio;
    // ownership is only enforced on read, update, and delete.
    let owner = TestContext::new();
    owner.signed_in_user("long-enough-pw").await;
    let portfolio_id = create_portfolio(&owner, "Open Door").await;

    let other = TestContext::new();
    other.signed_in_user("long-enough-pw").await;

    let resp = other
        .client
        .post(other.url(&format!("/portfolio/{portfolio_id}/add_stock")))
        .form(&[
            ("market", "US"),
            ("symbol", "DROP"),
            ("name", "Dropped In"),
            ("quantity", "1"),
            ("purchase_price", "1.00"),
            ("purchase_date", "2026-01-04"),
            ("currency", "USD"),
            ("notes", ""),
        ])
        .send()
        .await
        .expect("cross-user add stock");

    // The write is accepted and lands in the owner's portfolio
    assert!(resp.url().path().ends_with(&format!("/portfolio/{portfolio_id}")));

    let resp = owner
        .client
        .get(owner.url(&format!("/portfolio/{portfolio_id}")))
        .send()
        .await
        .expect("portfolio page");
    assert!(resp.text().await.expect("body").contains("DROP"));
}
