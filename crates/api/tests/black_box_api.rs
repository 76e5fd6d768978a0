use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = teller_api::app::build_app();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn create_account(&self, client: &reqwest::Client, id: &str, kind: &str) -> reqwest::Response {
        client
            .post(format!("{}/accounts", self.base_url))
            .json(&json!({ "account_id": id, "account_type": kind }))
            .send()
            .await
            .unwrap()
    }

    async fn post_amount(
        &self,
        client: &reqwest::Client,
        id: &str,
        op: &str,
        amount: f64,
    ) -> reqwest::Response {
        client
            .post(format!("{}/accounts/{}/{}", self.base_url, id, op))
            .json(&json!({ "amount": amount }))
            .send()
            .await
            .unwrap()
    }

    async fn balance(&self, client: &reqwest::Client, id: &str) -> reqwest::Response {
        client
            .get(format!("{}/accounts/{}/balance", self.base_url, id))
            .send()
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_endpoint_responds() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_deposit_withdraw_interest_scenario() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = server.create_account(&client, "1234", "savings").await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["account_id"], "1234");
    assert_eq!(body["message"], "Account 1234 created successfully");

    let res = server.balance(&client, "1234").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["balance"], 0.0);

    let res = server.post_amount(&client, "1234", "deposit", 1000.0).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["balance"], 1000.0);
    assert_eq!(body["message"], "Successfully deposited $1000.00");

    let res = server.post_amount(&client, "1234", "withdraw", 500.0).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["balance"], 500.0);

    let res = client
        .post(format!("{}/accounts/1234/interest", server.base_url))
        .json(&json!({ "annual_interest_rate": 2.5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["balance"], 512.5);
    assert_eq!(body["message"], "Successfully applied 2.5% interest");
}

#[tokio::test]
async fn duplicate_create_returns_conflict() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = server.create_account(&client, "dup", "checking").await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = server.create_account(&client, "dup", "savings").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "already_exists");
}

#[tokio::test]
async fn invalid_account_type_is_rejected() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = server.create_account(&client, "acct", "premium").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_account_type");
}

#[tokio::test]
async fn unknown_accounts_return_not_found() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = server.balance(&client, "ghost").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server.post_amount(&client, "ghost", "deposit", 10.0).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Account not found. Please check the account ID.");
}

#[tokio::test]
async fn non_positive_amounts_are_rejected() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    server.create_account(&client, "acct", "checking").await;

    for amount in [0.0, -5.0] {
        let res = server.post_amount(&client, "acct", "deposit", amount).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let res = server.post_amount(&client, "acct", "withdraw", amount).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    let res = server.balance(&client, "acct").await;
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["balance"], 0.0);
}

#[tokio::test]
async fn overdraw_fails_precondition_and_preserves_balance() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    server.create_account(&client, "acct", "savings").await;
    server.post_amount(&client, "acct", "deposit", 100.0).await;

    let res = server.post_amount(&client, "acct", "withdraw", 100.01).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "failed_precondition");

    let res = server.balance(&client, "acct").await;
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["balance"], 100.0);
}

#[tokio::test]
async fn non_positive_interest_rate_is_rejected() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    server.create_account(&client, "acct", "savings").await;

    for rate in [0.0, -2.5] {
        let res = client
            .post(format!("{}/accounts/acct/interest", server.base_url))
            .json(&json!({ "annual_interest_rate": rate }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deposits_over_http_do_not_lose_updates() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    server.create_account(&client, "hot", "checking").await;

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let client = client.clone();
        let base_url = server.base_url.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..5 {
                let res = client
                    .post(format!("{}/accounts/hot/deposit", base_url))
                    .json(&json!({ "amount": 1.0 }))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(res.status(), StatusCode::OK);
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let res = server.balance(&client, "hot").await;
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["balance"], 80.0);
}
