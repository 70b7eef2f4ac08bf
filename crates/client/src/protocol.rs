//! Wire types for the score service's JSON/REST interface.
//!
//! Field names match the service exactly: register/login take
//! `{"email", "password"}`, login returns `{"access_token", "token_type"}`,
//! score submission takes `{"score"}` and returns the account's best,
//! and the global best endpoint returns `{"best_score": N | null}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreSubmit {
    pub score: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BestScoreResponse {
    pub user_id: u64,
    pub best_score: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GlobalBestResponse {
    pub best_score: Option<u32>,
}

/// Result of a client operation, surfaced to the game loop for display.
/// Never affects gameplay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientNotice {
    LoggedIn,
    /// Global best across all accounts; None when the board is empty.
    GlobalBest(Option<u32>),
    /// This account's best, returned after a score submission.
    AccountBest(u32),
    /// Transient, user-visible error line.
    Error(String),
}

pub fn parse_token(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<TokenResponse>(body)
        .ok()
        .map(|t| t.access_token)
}

pub fn parse_global_best(body: &[u8]) -> Option<Option<u32>> {
    serde_json::from_slice::<GlobalBestResponse>(body)
        .ok()
        .map(|r| r.best_score)
}

pub fn parse_account_best(body: &[u8]) -> Option<u32> {
    serde_json::from_slice::<BestScoreResponse>(body)
        .ok()
        .map(|r| r.best_score)
}

/// Failed login, split by whether registering the account could help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// HTTP 401: credentials rejected, the account may not exist yet.
    Unauthorized,
    /// Anything else (bad body, 5xx, transport), not fixable by registering.
    Other(ClientNotice),
}

impl LoginError {
    pub fn into_notice(self) -> ClientNotice {
        match self {
            LoginError::Unauthorized => ClientNotice::Error("login failed".to_string()),
            LoginError::Other(notice) => notice,
        }
    }
}

/// Map a login response to a token or a classified failure.
pub fn login_notice(status: u16, body: &[u8]) -> Result<String, LoginError> {
    match status {
        200 => match parse_token(body) {
            Some(token) => Ok(token),
            None => Err(LoginError::Other(ClientNotice::Error(
                "malformed login response".to_string(),
            ))),
        },
        401 => Err(LoginError::Unauthorized),
        _ => Err(LoginError::Other(ClientNotice::Error(format!(
            "login error (HTTP {status})"
        )))),
    }
}

/// Map a submission response to a notice.
pub fn submit_notice(status: u16, body: &[u8]) -> ClientNotice {
    match status {
        200 => match parse_account_best(body) {
            Some(best) => ClientNotice::AccountBest(best),
            None => ClientNotice::Error("malformed submit response".to_string()),
        },
        400 | 401 => ClientNotice::Error("score rejected".to_string()),
        _ => ClientNotice::Error(format!("submit error (HTTP {status})")),
    }
}

/// Map a global-best response to a notice.
pub fn global_best_notice(status: u16, body: &[u8]) -> ClientNotice {
    match status {
        200 => match parse_global_best(body) {
            Some(best) => ClientNotice::GlobalBest(best),
            None => ClientNotice::Error("malformed best-score response".to_string()),
        },
        _ => ClientNotice::Error(format!("best-score error (HTTP {status})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_wire_shape() {
        let creds = Credentials {
            email: "player@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"email": "player@example.com", "password": "hunter2"})
        );
    }

    #[test]
    fn test_parse_token() {
        let body = br#"{"access_token": "abc.def", "token_type": "bearer"}"#;
        assert_eq!(parse_token(body).as_deref(), Some("abc.def"));

        // token_type is defaulted when absent.
        let body = br#"{"access_token": "xyz"}"#;
        assert_eq!(parse_token(body).as_deref(), Some("xyz"));

        assert_eq!(parse_token(b"not json"), None);
    }

    #[test]
    fn test_parse_global_best_null_and_value() {
        assert_eq!(
            parse_global_best(br#"{"best_score": 1234}"#),
            Some(Some(1234))
        );
        assert_eq!(parse_global_best(br#"{"best_score": null}"#), Some(None));
        assert_eq!(parse_global_best(br#"{}"#), Some(None));
    }

    #[test]
    fn test_submit_round_trip() {
        let body = serde_json::to_vec(&ScoreSubmit { score: 900 }).unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
            serde_json::json!({"score": 900})
        );

        let response = br#"{"user_id": 7, "best_score": 1500}"#;
        assert_eq!(parse_account_best(response), Some(1500));
    }

    #[test]
    fn test_login_notice_mapping() {
        let ok = login_notice(200, br#"{"access_token": "t"}"#);
        assert_eq!(ok.unwrap(), "t");

        // Only a 401 invites the register fallback.
        assert_eq!(login_notice(401, b"{}").unwrap_err(), LoginError::Unauthorized);
        assert!(matches!(
            login_notice(500, b"{}").unwrap_err(),
            LoginError::Other(ClientNotice::Error(_))
        ));
        assert!(matches!(
            login_notice(200, b"<html>").unwrap_err(),
            LoginError::Other(_)
        ));
    }

    #[test]
    fn test_login_error_surfaces_as_notice() {
        assert_eq!(
            LoginError::Unauthorized.into_notice(),
            ClientNotice::Error("login failed".to_string())
        );
        let notice = ClientNotice::Error("login error (HTTP 503)".to_string());
        assert_eq!(LoginError::Other(notice.clone()).into_notice(), notice);
    }

    #[test]
    fn test_submit_notice_mapping() {
        assert_eq!(
            submit_notice(200, br#"{"user_id": 1, "best_score": 800}"#),
            ClientNotice::AccountBest(800)
        );
        assert_eq!(
            submit_notice(401, b"{}"),
            ClientNotice::Error("score rejected".to_string())
        );
    }

    #[test]
    fn test_global_best_notice_mapping() {
        assert_eq!(
            global_best_notice(200, br#"{"best_score": null}"#),
            ClientNotice::GlobalBest(None)
        );
        assert!(matches!(
            global_best_notice(500, b""),
            ClientNotice::Error(_)
        ));
    }
}
