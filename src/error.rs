use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};

use crate::{channel, discussion, group, integration, message, user};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    _User(#[from] user::Error),
    #[error(transparent)]
    _Group(#[from] group::Error),
    #[error(transparent)]
    _Discussion(#[from] discussion::Error),
    #[error(transparent)]
    _Channel(#[from] channel::Error),
    #[error(transparent)]
    _Message(#[from] message::Error),
    #[error(transparent)]
    _Integration(#[from] integration::Error),
}

impl From<&Error> for StatusCode {
    fn from(e: &Error) -> Self {
        match e {
            Error::_User(user::Error::Unauthenticated) => Self::UNAUTHORIZED,
            Error::_User(user::Error::NotFound) => Self::NOT_FOUND,
            Error::_User(user::Error::_Integration(_)) => Self::BAD_GATEWAY,
            Error::_Group(e) => e.into(),
            Error::_Discussion(e) => e.into(),
            Error::_Channel(e) => e.into(),
            Error::_Message(e) => e.into(),
            Error::_Integration(_) => Self::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = StatusCode::from(&self);
        if status.is_server_error() {
            error!("{self}");
        } else {
            warn!("{self}");
        }

        let message = if status == StatusCode::BAD_GATEWAY {
            "The community service is unavailable, try again later".to_owned()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}
