use std::fmt;

use log::warn;

use crate::group::model::Group;
use crate::user;
use crate::user::model::User;

/// Backend bearer token issued by the external auth collaborator.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Read-only context handed to every data-fetching unit.
#[derive(Clone, Debug, Default)]
pub struct Session {
    token: Option<Token>,
    viewer: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(token: Token) -> Self {
        Self {
            token: Some(token),
            viewer: None,
        }
    }

    pub fn with_viewer(self, viewer: User) -> Self {
        Self {
            viewer: Some(viewer),
            ..self
        }
    }

    /// Builds a session for `token` and looks up who it belongs to.
    pub async fn resolve(token: Option<Token>, user_repo: &user::Repository) -> Self {
        let Some(token) = token else {
            warn!("no backend token configured, discussion requests will not be issued");
            return Self::anonymous();
        };

        let session = Self::new(token);
        match user_repo.find_viewer(&session).await {
            Ok(viewer) => session.with_viewer(viewer),
            Err(e) => {
                warn!("could not resolve signed-in user: {e}");
                session
            }
        }
    }

    pub const fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub const fn viewer(&self) -> Option<&User> {
        self.viewer.as_ref()
    }

    pub fn owns(&self, group: &Group) -> bool {
        self.viewer
            .as_ref()
            .is_some_and(|v| v.id == group.owner.id)
    }
}
