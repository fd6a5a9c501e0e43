mod common;

use common::{API_KEY, collector_for, setup_server};
use finstat_traits::{StatementCollector, StatementKind, StatementRequest};
use httpmock::{Method::GET, Mock, MockServer};

fn mock_kind<'a>(server: &'a MockServer, segment: &str, status: u16, body: &str) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/v3/{segment}/MSFT"))
            .query_param("period", "annual")
            .query_param("limit", "3")
            .query_param("apikey", API_KEY);
        then.status(status)
            .header("content-type", "application/json")
            .body(body);
    })
}

#[tokio::test]
async fn all_financials_fetches_each_statement_once() {
    let server = setup_server();
    let income = mock_kind(
        &server,
        "income-statement",
        200,
        r#"[{"date": "2024-06-30", "symbol": "MSFT", "revenue": 245122000000}]"#,
    );
    let balance = mock_kind(
        &server,
        "balance-sheet-statement",
        200,
        r#"[{"date": "2024-06-30", "symbol": "MSFT", "totalAssets": 512163000000}]"#,
    );
    let cashflow = mock_kind(&server, "cash-flow-statement", 200, "[]");
    let ratios = mock_kind(
        &server,
        "ratios",
        200,
        r#"[{"date": "2024-06-30", "symbol": "MSFT", "currentRatio": 1.27}, {"date": "2023-06-30", "symbol": "MSFT", "currentRatio": 1.77}]"#,
    );

    let collector: Box<dyn StatementCollector> = Box::new(collector_for(&server));
    let bundle = collector
        .all_financials(&StatementRequest::new("msft").limit(3))
        .await
        .unwrap();

    income.assert();
    balance.assert();
    cashflow.assert();
    ratios.assert();

    assert_eq!(
        bundle.keys(),
        ["income_statement", "balance_sheet", "cashflow", "ratios"]
    );
    assert_eq!(bundle.get(StatementKind::IncomeStatement).len(), 1);
    assert_eq!(bundle.get(StatementKind::BalanceSheet).len(), 1);
    assert!(bundle.get(StatementKind::CashFlow).is_empty());
    assert_eq!(bundle.get(StatementKind::Ratios).len(), 2);

    let json = serde_json::to_value(&bundle).unwrap();
    assert_eq!(json["ratios"][1]["currentRatio"], 1.77);
}

#[tokio::test]
async fn all_financials_fails_without_partial_bundle() {
    let server = setup_server();
    let income = mock_kind(&server, "income-statement", 200, "[]");
    let balance = mock_kind(&server, "balance-sheet-statement", 200, "[]");
    let cashflow = mock_kind(&server, "cash-flow-statement", 200, "[]");
    let ratios = mock_kind(&server, "ratios", 429, "{}");

    let collector = collector_for(&server);
    let err = collector
        .all_financials(&StatementRequest::new("MSFT").limit(3))
        .await
        .unwrap_err();

    income.assert();
    balance.assert();
    cashflow.assert();
    ratios.assert_hits(1);
    assert!(err.is_provider());
    assert!(err.to_string().contains("Rate limit exceeded"));
}

#[tokio::test]
async fn all_financials_stops_at_first_failure() {
    let server = setup_server();
    let income = mock_kind(&server, "income-statement", 401, "{}");
    let balance = mock_kind(&server, "balance-sheet-statement", 200, "[]");

    let collector = collector_for(&server);
    let err = collector
        .all_financials(&StatementRequest::new("MSFT").limit(3))
        .await
        .unwrap_err();

    income.assert();
    balance.assert_hits(0);
    assert!(err.to_string().contains("Invalid API credential"));
}
