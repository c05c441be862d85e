use api_types::user::{Credentials, User};

use crate::{
    client::ClientError,
    service::AuthService,
    storage::{LOGGED_USER_KEY, LocalStorage},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub message: Option<String>,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            focus: LoginField::Email,
            message: None,
        }
    }
}

impl LoginState {
    pub fn advance_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    /// Authenticates and persists the session user. Returns the user on
    /// success; otherwise `message` explains what went wrong.
    pub async fn submit<A: AuthService>(
        &mut self,
        auth: &A,
        storage: &LocalStorage,
    ) -> Option<User> {
        let email = self.email.trim();
        let password = self.password.as_str();

        if email.is_empty() || password.is_empty() {
            self.message = Some("Preencha todos os campos.".to_string());
            return None;
        }

        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let user = match auth.authenticate(&credentials).await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(email = %credentials.email, error = %err, "login failed");
                self.message = Some(login_message_for_error(err));
                return None;
            }
        };

        if let Err(err) = storage.set_item(LOGGED_USER_KEY, &user) {
            tracing::error!(error = %err, "failed to persist session user");
            self.message = Some(format!("Falha ao salvar a sessão: {err}"));
            return None;
        }

        tracing::info!(user_id = user.id, "logged in");
        self.password.clear();
        self.message = None;
        Some(user)
    }
}

fn login_message_for_error(err: ClientError) -> String {
    match err {
        ClientError::Unauthorized | ClientError::Forbidden => {
            "Usuário ou senha inválidos.".to_string()
        }
        ClientError::Validation(message) => message,
        ClientError::NotFound => "Serviço de autenticação não encontrado.".to_string(),
        ClientError::Server(message) => format!("Erro no servidor: {message}"),
        ClientError::Transport(err) => format!("Servidor inacessível: {err}"),
        ClientError::Decode(err) => format!("Resposta inválida do servidor: {err}"),
    }
}
