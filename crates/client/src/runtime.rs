//! Score client runtime.
//!
//! Bridges the synchronous game loop with the async HTTP session. The loop
//! pushes [`ClientCommand`]s and polls notices with a non-blocking
//! `try_recv`; the worker task owns the HTTP client and the access token.

use log::{info, warn};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;

use crate::http::HttpClient;
use crate::protocol::{
    global_best_notice, login_notice, submit_notice, ClientNotice, Credentials, LoginError,
    ScoreSubmit,
};

/// Command delivered to the client worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    /// Submit a finished round's score (requires a held token).
    SubmitScore(u32),
    /// Re-fetch the global best score.
    FetchGlobalBest,
}

/// Client configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Without credentials the client only fetches the global best.
    pub credentials: Option<Credentials>,
}

impl ClientConfig {
    /// Build from environment variables. Returns None when `BLOCKFALL_API`
    /// is unset, which means offline mode.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("BLOCKFALL_API").ok()?;
        let credentials = match (
            std::env::var("BLOCKFALL_EMAIL"),
            std::env::var("BLOCKFALL_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) => Some(Credentials { email, password }),
            _ => None,
        };
        Some(Self {
            base_url,
            credentials,
        })
    }
}

const MAX_PENDING_COMMANDS: usize = 16;

/// Running score client instance.
pub struct ScoreClient {
    _rt: Runtime,
    cmd_tx: mpsc::Sender<ClientCommand>,
    notice_rx: mpsc::UnboundedReceiver<ClientNotice>,
}

impl ScoreClient {
    /// Start the client from environment variables.
    ///
    /// Returns None when the service URL is not configured or the runtime
    /// cannot start; the game then runs offline.
    pub fn start_from_env() -> Option<Self> {
        Self::start(ClientConfig::from_env()?)
    }

    pub fn start(config: ClientConfig) -> Option<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>(MAX_PENDING_COMMANDS);
        let (notice_tx, notice_rx) = mpsc::unbounded_channel::<ClientNotice>();

        let rt = match Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(err) => {
                warn!("score client disabled, runtime failed to start: {err}");
                return None;
            }
        };

        info!("score client connecting to {}", config.base_url);
        rt.spawn(run_session(config, cmd_rx, notice_tx));

        Some(Self {
            _rt: rt,
            cmd_tx,
            notice_rx,
        })
    }

    /// Queue a command without blocking. Dropped when the queue is full.
    pub fn send(&self, cmd: ClientCommand) {
        if self.cmd_tx.try_send(cmd).is_err() {
            warn!("score client queue full, dropping {cmd:?}");
        }
    }

    /// Non-blocking poll for the next notice.
    pub fn try_recv(&mut self) -> Option<ClientNotice> {
        self.notice_rx.try_recv().ok()
    }
}

async fn run_session(
    config: ClientConfig,
    mut cmd_rx: mpsc::Receiver<ClientCommand>,
    notice_tx: mpsc::UnboundedSender<ClientNotice>,
) {
    let http = HttpClient::new(&config.base_url);

    let _ = notice_tx.send(fetch_global_best(&http).await);

    let mut token = None;
    if let Some(creds) = &config.credentials {
        token = establish_session(&http, creds, &notice_tx).await;
    }

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            ClientCommand::FetchGlobalBest => {
                let _ = notice_tx.send(fetch_global_best(&http).await);
            }
            ClientCommand::SubmitScore(score) => {
                let Some(token) = &token else {
                    info!("no session, skipping submission of score {score}");
                    continue;
                };
                let notice = submit_score(&http, token, score).await;
                let submitted = matches!(notice, ClientNotice::AccountBest(_));
                let _ = notice_tx.send(notice);
                // A submitted score may be the new global best.
                if submitted {
                    let _ = notice_tx.send(fetch_global_best(&http).await);
                }
            }
        }
    }
}

/// Log in, registering the account first on a 401. Other login failures
/// (transport, 5xx) surface directly; registering cannot fix those.
async fn establish_session(
    http: &HttpClient,
    creds: &Credentials,
    notice_tx: &mpsc::UnboundedSender<ClientNotice>,
) -> Option<String> {
    match try_login(http, creds).await {
        Ok(token) => {
            info!("logged in as {}", creds.email);
            let _ = notice_tx.send(ClientNotice::LoggedIn);
            return Some(token);
        }
        Err(LoginError::Unauthorized) => {
            info!("login rejected, attempting registration");
        }
        Err(err) => {
            warn!("login failed: {err:?}");
            let _ = notice_tx.send(err.into_notice());
            return None;
        }
    }

    match http.post_json("/auth/register", creds, None).await {
        // 400 means the email already exists, which is fine to retry against.
        Ok((status, _)) if status == 201 || status == 400 => {}
        Ok((status, _)) => {
            warn!("registration rejected with HTTP {status}");
            let _ = notice_tx.send(ClientNotice::Error(format!(
                "registration error (HTTP {status})"
            )));
            return None;
        }
        Err(err) => {
            warn!("registration failed: {err:#}");
            let _ = notice_tx.send(ClientNotice::Error(
                "score service unreachable".to_string(),
            ));
            return None;
        }
    }

    match try_login(http, creds).await {
        Ok(token) => {
            info!("logged in as {} after registration", creds.email);
            let _ = notice_tx.send(ClientNotice::LoggedIn);
            Some(token)
        }
        Err(err) => {
            let _ = notice_tx.send(err.into_notice());
            None
        }
    }
}

async fn try_login(http: &HttpClient, creds: &Credentials) -> Result<String, LoginError> {
    match http.post_json("/auth/login", creds, None).await {
        Ok((status, body)) => login_notice(status, &body),
        Err(err) => {
            warn!("login request failed: {err:#}");
            Err(LoginError::Other(ClientNotice::Error(
                "score service unreachable".to_string(),
            )))
        }
    }
}

async fn submit_score(http: &HttpClient, token: &str, score: u32) -> ClientNotice {
    match http
        .post_json("/scores/submit", &ScoreSubmit { score }, Some(token))
        .await
    {
        Ok((status, body)) => submit_notice(status, &body),
        Err(err) => {
            warn!("score submission failed: {err:#}");
            ClientNotice::Error("score service unreachable".to_string())
        }
    }
}

async fn fetch_global_best(http: &HttpClient) -> ClientNotice {
    match http.get("/scores/global-best").await {
        Ok((status, body)) => global_best_notice(status, &body),
        Err(err) => {
            warn!("global best fetch failed: {err:#}");
            ClientNotice::Error("score service unreachable".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_config_requires_api_url() {
        // Config construction is pure given explicit values.
        let config = ClientConfig {
            base_url: "http://127.0.0.1:8000".to_string(),
            credentials: None,
        };
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_unreachable_service_surfaces_error_notice() {
        // Nothing listens on a reserved port; the startup fetch must fail
        // fast with a notice instead of blocking or panicking.
        let mut client = ScoreClient::start(ClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            credentials: None,
        })
        .expect("runtime starts");

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(notice) = client.try_recv() {
                assert!(matches!(notice, ClientNotice::Error(_)));
                break;
            }
            assert!(Instant::now() < deadline, "no notice within deadline");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_unreachable_login_reports_errors_not_logged_in() {
        // With credentials but no listener, both the startup fetch and the
        // login fail in transport. That must surface as error notices only;
        // no registration retry can produce a LoggedIn here.
        let mut client = ScoreClient::start(ClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            credentials: Some(Credentials {
                email: "player@example.com".to_string(),
                password: "secret".to_string(),
            }),
        })
        .expect("runtime starts");

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut errors = 0;
        while Instant::now() < deadline && errors < 2 {
            match client.try_recv() {
                Some(notice) => {
                    assert!(matches!(notice, ClientNotice::Error(_)), "got {notice:?}");
                    errors += 1;
                }
                None => std::thread::sleep(Duration::from_millis(10)),
            }
        }
        assert_eq!(errors, 2, "expected startup fetch and login failures");
    }

    #[test]
    fn test_send_is_non_blocking() {
        let client = ScoreClient::start(ClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            credentials: None,
        })
        .expect("runtime starts");

        // Flooding past the queue bound drops commands instead of blocking.
        for _ in 0..100 {
            client.send(ClientCommand::FetchGlobalBest);
        }
    }
}
