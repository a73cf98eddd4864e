//! End-to-end tests: `HttpGateway` and `Reconciler` against the stand-in
//! grade API served on an ephemeral port.

use std::sync::Arc;
use std::time::Duration;

use roster_client::network::{NetworkConfig, ServerModule, StudentStore, API_PREFIX, DEV_API_KEY};
use roster_client::{ClientConfig, ConsoleView, HttpGateway};
use roster_core::{
    FlowOutcome, Reconciler, RosterView, StudentForm, StudentKey, StudentRecord, SyncError,
    SyncGateway, TransportError,
};
use tokio::sync::oneshot;

struct TestServer {
    port: u16,
    store: Arc<StudentStore>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    async fn spawn() -> Self {
        let mut module = ServerModule::new(NetworkConfig::default());
        let port = module.start().await.expect("bind ephemeral port");
        let store = module.store();
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            module
                .serve(async {
                    let _ = rx.await;
                })
                .await
                .expect("server runs");
        });
        Self {
            port,
            store,
            shutdown: Some(tx),
        }
    }

    fn config(&self, api_key: &str) -> ClientConfig {
        ClientConfig {
            base_url: format!("http://127.0.0.1:{}{API_PREFIX}", self.port),
            api_key: api_key.to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }

    fn gateway(&self) -> HttpGateway {
        HttpGateway::new(self.config(DEV_API_KEY)).expect("valid config")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

#[tokio::test]
async fn create_fetch_and_remove_over_http() {
    let server = TestServer::spawn().await;
    let gateway = server.gateway();

    assert!(gateway.fetch_all().await.unwrap().is_empty());

    let record = StudentRecord::new("Ada Lovelace", "Math", 97);
    let key = gateway.create(&record).await.unwrap();
    assert_eq!(key, StudentKey(1));
    assert_eq!(server.store.len(), 1);

    let rows = gateway.fetch_all().await.unwrap();
    assert_eq!(rows, vec![(key, record)]);

    gateway.remove(key).await.unwrap();
    assert!(server.store.is_empty());

    let err = gateway.remove(key).await.unwrap_err();
    assert_eq!(
        err,
        SyncError::rejected(vec!["student not found".to_string()])
    );
}

#[tokio::test]
async fn wrong_api_key_is_an_application_error() {
    let server = TestServer::spawn().await;
    let gateway = HttpGateway::new(server.config("not-the-key")).unwrap();

    let err = gateway.fetch_all().await.unwrap_err();
    assert!(!err.is_transport());
    assert_eq!(err.to_string(), "invalid api key");
}

#[tokio::test]
async fn unknown_path_is_a_transport_error() {
    let server = TestServer::spawn().await;
    let mut config = server.config(DEV_API_KEY);
    config.base_url = format!("http://127.0.0.1:{}/elsewhere", server.port);
    let gateway = HttpGateway::new(config).unwrap();

    let err = gateway.fetch_all().await.unwrap_err();
    assert_eq!(err, SyncError::Transport(TransportError::Status { status: 404 }));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Bind and immediately drop a listener to find a port nobody serves.
    let port = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };
    let gateway = HttpGateway::new(ClientConfig {
        base_url: format!("http://127.0.0.1:{port}{API_PREFIX}"),
        api_key: DEV_API_KEY.to_string(),
        request_timeout: Duration::from_secs(5),
    })
    .unwrap();

    let err = gateway.fetch_all().await.unwrap_err();
    assert!(matches!(
        err,
        SyncError::Transport(TransportError::Network(_))
    ));
}

#[tokio::test]
async fn reconciler_flows_over_http() {
    let server = TestServer::spawn().await;
    server
        .store
        .insert(StudentRecord::new("Grace Hopper", "Compilers", 80));

    let view = Arc::new(ConsoleView::new(Vec::new()));
    let reconciler = Reconciler::new(
        Arc::new(server.gateway()),
        Arc::clone(&view) as Arc<dyn RosterView>,
    );

    assert_eq!(reconciler.initialize().await, FlowOutcome::Loaded(1));
    assert_eq!(reconciler.average(), Some(80.0));

    let added = reconciler
        .add(&StudentForm::new("Alan Turing", "Logic", "91"))
        .await;
    assert_eq!(added, FlowOutcome::Added(StudentKey(2)));
    assert_eq!(reconciler.average(), Some(85.5));

    let invalid = reconciler.add(&StudentForm::new("A", "Logic", "101")).await;
    assert!(matches!(invalid, FlowOutcome::Invalid(_)));
    assert_eq!(server.store.len(), 2);

    let confirmation = reconciler.request_delete(StudentKey(1));
    assert_eq!(
        reconciler.confirm_delete(confirmation).await,
        FlowOutcome::Deleted(StudentKey(1))
    );
    assert_eq!(reconciler.roster().len(), 1);
    assert_eq!(server.store.len(), 1);

    let out = view.contents();
    assert!(out.contains("Grace Hopper"));
    assert!(out.contains("Alan Turing"));
    assert!(out.contains("Grade average: 86"));
    assert!(out.contains("Delete entry 1? [y/N]"));
    assert!(out.ends_with("Grade average: 91\n"));
}

#[tokio::test]
async fn only_grade_endpoints_are_served() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let health = client
        .get(format!("http://127.0.0.1:{}/health", server.port))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), reqwest::StatusCode::NOT_FOUND);

    let fetch = client
        .post(format!("http://127.0.0.1:{}{API_PREFIX}/get", server.port))
        .form(&[("api_key", DEV_API_KEY)])
        .send()
        .await
        .unwrap();
    assert!(fetch.status().is_success());
}
