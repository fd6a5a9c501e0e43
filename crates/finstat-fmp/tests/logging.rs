mod common;

use common::{API_KEY, StallingUpstream, collector_for, mock_statement, setup_server};
use finstat_fmp::{Backoff, FmpCollector, RetryPolicy};
use finstat_traits::{StatementCollector, StatementRequest};
use std::{
    io,
    sync::{Arc, Mutex},
    time::Duration,
};
use tracing::Level;

/// Collects everything the fmt subscriber writes.
#[derive(Debug, Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

#[tokio::test]
async fn credential_never_reaches_the_logs() {
    let (logs, _guard) = capture();

    let server = setup_server();
    let error_payload = mock_statement(
        &server,
        "income-statement",
        "AAPL",
        200,
        r#"{"Error Message": "Invalid API KEY. Please retry"}"#,
    );
    let unauthorized = mock_statement(&server, "balance-sheet-statement", "AAPL", 401, "{}");
    let empty = mock_statement(&server, "ratios", "ZZZZ", 200, "[]");

    let collector = collector_for(&server);
    let request = StatementRequest::new("AAPL");
    assert!(collector.income_statement(&request).await.is_err());
    assert!(collector.balance_sheet(&request).await.is_err());
    let ratios = collector
        .financial_ratios(&StatementRequest::new("ZZZZ"))
        .await
        .unwrap();
    assert!(ratios.is_empty());
    error_payload.assert();
    unauthorized.assert();
    empty.assert();

    let upstream = StallingUpstream::start(usize::MAX, "[]").await;
    let stalled = FmpCollector::builder()
        .api_key(API_KEY)
        .base_url(upstream.base_url.clone())
        .timeout(Duration::from_millis(100))
        .retry_policy(RetryPolicy::new(2, Backoff::Fixed(Duration::from_millis(10))))
        .build()
        .unwrap();
    assert!(stalled.cash_flow_statement(&request).await.is_err());
    assert_eq!(upstream.connections(), 2);

    let output = logs.contents();
    assert!(output.contains("FMP collector initialized"), "{output}");
    assert!(output.contains("Transient failure, retrying"), "{output}");
    assert!(output.contains("ites...fXYZ"), "{output}");
    assert!(!output.contains(API_KEY), "{output}");
}
