use std::fmt::{self, Display};

use super::call::{Credential, Persist};

/// The SDK-wide settings that generated calls read credentials from,
/// and that post-call effects write them to.
///
/// Generated code receives an equivalent settings object as an explicit
/// argument to every call. Empty strings count as absent.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SdkSettings {
    pub title_id: Option<String>,
    pub developer_secret_key: Option<String>,
    pub session_ticket: Option<String>,
    pub entity_token: Option<String>,
}

impl SdkSettings {
    /// Returns the title ID, if one is set.
    pub fn title_id(&self) -> Option<&str> {
        present(&self.title_id)
    }

    /// Returns the stored value for a credential, if one is set.
    pub fn credential(&self, credential: Credential) -> Option<&str> {
        present(match credential {
            Credential::EntityToken => &self.entity_token,
            Credential::SecretKey => &self.developer_secret_key,
            Credential::SessionTicket => &self.session_ticket,
        })
    }

    /// Returns the strongest credential that's set: an entity token,
    /// then a session ticket, then a developer secret key.
    pub fn best_credential(&self) -> Option<(Credential, &str)> {
        Credential::PREFERENCE
            .into_iter()
            .find_map(|credential| Some((credential, self.credential(credential)?)))
    }

    /// Stores a credential extracted from a response.
    pub fn persist(&mut self, persist: Persist) {
        let slot = match persist.credential {
            Credential::EntityToken => &mut self.entity_token,
            Credential::SecretKey => &mut self.developer_secret_key,
            Credential::SessionTicket => &mut self.session_ticket,
        };
        *slot = Some(persist.value);
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// An error that generated code reports to its caller.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct SdkError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SdkError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The request is missing required data.
    InvalidRequest,
    /// The call needs a credential that isn't set.
    NotAuthenticated,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "InvalidRequest",
            Self::NotAuthenticated => "NotAuthenticated",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
