use crate::ClientError;
use reqwest::blocking::Client;
use sp21_core::{Command, Engine, RoundPayload, TransportError, UseSpecialRequest};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub fn route(command: &Command) -> &'static str {
    match command {
        Command::StartRound => "start_game",
        Command::Draw => "hit",
        Command::Stand => "stand",
        Command::AdvanceOpponent => "ai_turn",
        Command::UseSpecial(_) => "use_sp_card",
        Command::ResetSession => "reset_all",
    }
}

/// Talks to one engine over HTTP. The engine keeps the game in a cookie
/// session, so the same instance must be used for the whole session.
pub struct HttpEngine {
    http: Client,
    base: Url,
}

impl HttpEngine {
    pub fn new(engine_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut base = Url::parse(engine_url.trim())?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidScheme(base.scheme().to_string()));
        }
        // Relative joins replace the last segment unless the path ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn endpoint(&self, command: &Command) -> Result<Url, url::ParseError> {
        self.base.join(route(command))
    }
}

impl Engine for HttpEngine {
    fn call(&mut self, command: &Command) -> Result<RoundPayload, TransportError> {
        let url = self
            .endpoint(command)
            .map_err(|err| TransportError::Unreachable(err.to_string()))?;
        debug!(command = %command, url = %url, "engine request");

        let request = match command {
            Command::UseSpecial(id) => self.http.post(url).json(&UseSpecialRequest {
                card_id: id.clone(),
            }),
            _ => self.http.post(url),
        };
        let response = request.send().map_err(|err| {
            warn!(command = %command, error = %err, "engine unreachable");
            TransportError::Unreachable(err.to_string())
        })?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|err| TransportError::Unreachable(err.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<RoundPayload>(&body)
                .ok()
                .and_then(|payload| payload.error.or(payload.message));
            warn!(command = %command, status = status.as_u16(), ?message, "engine refused command");
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }
        serde_json::from_str(&body).map_err(|err| TransportError::Decode(err.to_string()))
    }
}
