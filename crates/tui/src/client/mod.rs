use api_types::{
    entry::{Entry, EntryFilter, EntryStatus, StatusUpdate},
    user::{Credentials, User},
};
use reqwest::{Response, Url};
use thiserror::Error;

use crate::{
    error::{AppError, Result},
    service::{AuthService, LedgerService},
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("não autorizado")]
    Unauthorized,
    #[error("acesso negado")]
    Forbidden,
    #[error("recurso não encontrado")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Server(String),
    #[error("servidor inacessível: {0}")]
    Transport(reqwest::Error),
    #[error("resposta inválida do servidor: {0}")]
    Decode(reqwest::Error),
}

impl ClientError {
    /// Text shown to the user. Validation and server errors carry the body
    /// returned by the service verbatim.
    pub fn payload(&self) -> String {
        match self {
            Self::Validation(message) | Self::Server(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }
}

impl LedgerService for Client {
    async fn search(&self, filter: &EntryFilter) -> std::result::Result<Vec<Entry>, ClientError> {
        let endpoint = self.endpoint("api/lancamentos")?;
        tracing::debug!(%endpoint, ?filter, "searching entries");

        let res = self
            .http
            .get(endpoint)
            .query(filter)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<Vec<Entry>>().await.map_err(ClientError::Decode);
        }
        Err(error_from_response(res).await)
    }

    async fn delete(&self, id: i64) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("api/lancamentos/{id}"))?;
        tracing::debug!(%endpoint, "deleting entry");

        let res = self
            .http
            .delete(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(error_from_response(res).await)
    }

    async fn update_status(
        &self,
        id: i64,
        status: EntryStatus,
    ) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("api/lancamentos/{id}/atualiza-status"))?;
        tracing::debug!(%endpoint, ?status, "updating entry status");

        let res = self
            .http
            .put(endpoint)
            .json(&StatusUpdate { status })
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(error_from_response(res).await)
    }
}

impl AuthService for Client {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> std::result::Result<User, ClientError> {
        let endpoint = self.endpoint("api/usuarios/autenticar")?;
        tracing::debug!(%endpoint, email = %credentials.email, "authenticating");

        let res = self
            .http
            .post(endpoint)
            .json(credentials)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<User>().await.map_err(ClientError::Decode);
        }
        Err(error_from_response(res).await)
    }
}

async fn error_from_response(res: Response) -> ClientError {
    let status = res.status();
    let body = res
        .text()
        .await
        .map(|body| message_from_body(&body))
        .unwrap_or_default();
    let body = if body.is_empty() {
        "erro desconhecido".to_string()
    } else {
        body
    };
    tracing::warn!(%status, %body, "service returned an error");

    match status.as_u16() {
        401 => ClientError::Unauthorized,
        403 => ClientError::Forbidden,
        404 => ClientError::NotFound,
        400 | 422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    }
}

/// Error bodies come as plain text, a JSON string, or a JSON object with a
/// `message`/`error` field depending on where the failure was raised.
fn message_from_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(message)) => message,
        Ok(serde_json::Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| body.trim().to_string()),
        _ => body.trim().to_string(),
    }
}
