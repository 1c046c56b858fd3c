//! HTTP client for the remote bot
//!
//! One GET per move. The position and depth travel as the `fen` and `depth`
//! request headers; the body of the answer is the move, usually followed by a
//! newline that is trimmed off here.
//!
//! The blocking client is used on purpose-built worker threads (Bevy's
//! compute pool or the terminal loop), so no async runtime is needed.

use super::{OpponentError, OpponentMoveProvider, OpponentResult};
use crate::game::depth::SearchDepth;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Endpoint of the public bot service
pub const DEFAULT_BOT_ENDPOINT: &str = "https://api.whoisfahd.dev/chessbot";

/// Blocking HTTP implementation of [`OpponentMoveProvider`]
#[derive(Debug, Clone)]
pub struct HttpBotClient {
    endpoint: String,
    client: Client,
}

impl HttpBotClient {
    /// Build a client for `endpoint`; `timeout` bounds each request end to end
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> OpponentResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl OpponentMoveProvider for HttpBotClient {
    fn request_move(&self, fen: &str, depth: SearchDepth) -> OpponentResult<String> {
        debug!("[BOT] GET {} depth={} fen={}", self.endpoint, depth, fen);

        let response = self
            .client
            .get(&self.endpoint)
            .header("fen", fen)
            .header("depth", depth.to_string())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(OpponentError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        let notation = body.trim();
        if notation.is_empty() {
            return Err(OpponentError::Unparseable { response: body });
        }

        info!("[BOT] Answered {}", notation);
        Ok(notation.to_string())
    }
}
