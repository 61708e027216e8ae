//! Shared setup for integration tests: a live note service on an ephemeral port.

#![allow(dead_code)]

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use url::Url;

use sealnote_daemon::database::Database;
use sealnote_daemon::http_server;
use sealnote_daemon::nonce::{Nonces, DEFAULT_LIFETIME};
use sealnote_daemon::notes::PasswordHasherConfig;
use sealnote_daemon::ServiceState;

/// Smallest cost argon2 accepts, so tests stay fast.
pub fn cheap_hasher() -> PasswordHasherConfig {
    PasswordHasherConfig {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    }
}

pub struct TestServer {
    pub url: Url,
    pub state: ServiceState,
    shutdown_tx: watch::Sender<()>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let url = Url::parse(&format!("http://{}", addr)).unwrap();

        let state = ServiceState::new(
            Database::in_memory().await.unwrap(),
            cheap_hasher(),
            url.clone(),
            Nonces::generate(DEFAULT_LIFETIME).unwrap(),
        );
        let router = http_server::router(http_server::Config::new(addr), state.clone());

        let (shutdown_tx, mut shutdown_rx) = watch::channel(());
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .unwrap();
        });

        Self {
            url,
            state,
            shutdown_tx,
            handle,
        }
    }

    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        self.handle.await.unwrap();
    }
}
