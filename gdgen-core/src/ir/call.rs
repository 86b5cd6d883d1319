//! Per-call directives: the checks that generated code runs before
//! sending a request, and the credentials it stores from the response.
//!
//! Calls are classified once, by their URL and request and result type
//! names, into closed enums. Everything downstream matches on those.

use serde_json::{Map, Value};

use crate::parse::{ApiCall, AuthMode};

use super::settings::{ErrorKind, SdkError, SdkSettings};

const LOGIN_RESULT: &str = "LoginResult";
const REGISTER_REQUEST: &str = "RegisterPlayFabUserRequest";
const ENTITY_TOKEN_URL: &str = "/Authentication/GetEntityToken";

/// The request field that carries the title ID.
pub const TITLE_ID_KEY: &str = "TitleId";

/// A credential that a call can authenticate with.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Credential {
    EntityToken,
    SecretKey,
    SessionTicket,
}

impl Credential {
    /// Credentials from strongest to weakest, in the order that
    /// [`AuthGuard::SelectCredential`] tries them.
    pub const PREFERENCE: [Self; 3] = [Self::EntityToken, Self::SessionTicket, Self::SecretKey];

    /// Returns the HTTP header that carries this credential.
    pub fn header_name(self) -> &'static str {
        match self {
            Self::EntityToken => "X-EntityToken",
            Self::SecretKey => "X-SecretKey",
            Self::SessionTicket => "X-Authorization",
        }
    }

    /// Returns the message that generated code logs when this
    /// credential is missing.
    pub fn missing_log_message(self) -> &'static str {
        match self {
            Self::EntityToken => "Must call GetEntityToken before calling this method",
            Self::SecretKey => "Must have DeveloperSecretKey set to call this method",
            Self::SessionTicket => "Must be logged in to call this method",
        }
    }

    /// Returns the message of the error reported when this credential
    /// is missing.
    pub fn missing_error_message(self) -> &'static str {
        match self {
            Self::EntityToken => "Must call GetEntityToken first",
            Self::SecretKey => "Must have DeveloperSecretKey set",
            Self::SessionTicket => "Must be logged in",
        }
    }
}

impl AuthMode {
    /// Returns the credential that this mode requires, if any.
    pub fn credential(self) -> Option<Credential> {
        match self {
            Self::None => None,
            Self::EntityToken => Some(Credential::EntityToken),
            Self::SecretKey => Some(Credential::SecretKey),
            Self::SessionTicket => Some(Credential::SessionTicket),
        }
    }
}

/// A call with special pre-call handling.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CallRole {
    Login,
    Registration,
    /// The endpoint that exchanges any credential for an entity token.
    EntityTokenAcquisition,
}

impl CallRole {
    pub fn of(call: &ApiCall) -> Option<Self> {
        if call.result.as_deref() == Some(LOGIN_RESULT) {
            Some(Self::Login)
        } else if call.request.as_deref() == Some(REGISTER_REQUEST) {
            Some(Self::Registration)
        } else if call.url == ENTITY_TOKEN_URL {
            Some(Self::EntityTokenAcquisition)
        } else {
            None
        }
    }
}

/// A precondition that generated code checks before sending a request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthGuard {
    /// Fill in the title ID from the settings, and fail if neither the
    /// settings nor the request have one.
    TitleId,
    /// Authenticate with the strongest credential that's set. Never fails.
    SelectCredential,
    /// Fail unless the given credential is set.
    Require(Credential),
}

impl AuthGuard {
    /// Returns the guard for a call, or `None` if the call is unguarded.
    pub fn of(call: &ApiCall) -> Option<Self> {
        match CallRole::of(call) {
            Some(CallRole::Login | CallRole::Registration) => Some(Self::TitleId),
            Some(CallRole::EntityTokenAcquisition) => Some(Self::SelectCredential),
            None => call.auth.credential().map(Self::Require),
        }
    }

    /// Returns the message that generated code logs when this guard fails.
    pub fn log_message(self) -> Option<&'static str> {
        match self {
            Self::TitleId => Some("Must have TitleId set to call this method"),
            Self::SelectCredential => None,
            Self::Require(credential) => Some(credential.missing_log_message()),
        }
    }

    /// Returns the error that this guard reports when it fails.
    pub fn error(self) -> Option<SdkError> {
        match self {
            Self::TitleId => Some(missing_title_id()),
            Self::SelectCredential => None,
            Self::Require(credential) => Some(not_authenticated(credential)),
        }
    }

    /// Runs this guard against the settings and the outgoing request,
    /// returning the header to authenticate with.
    pub fn check(
        self,
        settings: &SdkSettings,
        request: &mut Map<String, Value>,
    ) -> Result<Option<AuthHeader>, SdkError> {
        self.check_with(settings, request, |_| ())
    }

    /// Like [`check`](Self::check), but also passes a failure to the
    /// completion callback before returning it, as generated code does.
    pub fn check_with(
        self,
        settings: &SdkSettings,
        request: &mut Map<String, Value>,
        callback: impl FnOnce(&SdkError),
    ) -> Result<Option<AuthHeader>, SdkError> {
        let result = match self {
            Self::TitleId => {
                if let Some(title_id) = settings.title_id() {
                    request.insert(TITLE_ID_KEY.to_owned(), title_id.into());
                }
                let title_id = request
                    .entry(TITLE_ID_KEY)
                    .or_insert_with(|| "".into())
                    .as_str();
                match title_id {
                    Some(id) if !id.is_empty() => Ok(None),
                    _ => Err(missing_title_id()),
                }
            }
            Self::SelectCredential => Ok(settings
                .best_credential()
                .map(|(credential, value)| AuthHeader::new(credential, value))),
            Self::Require(credential) => settings
                .credential(credential)
                .map(|value| Some(AuthHeader::new(credential, value)))
                .ok_or_else(|| not_authenticated(credential)),
        };
        result.inspect_err(callback)
    }
}

fn missing_title_id() -> SdkError {
    SdkError::new(ErrorKind::InvalidRequest, "Must have TitleId set")
}

fn not_authenticated(credential: Credential) -> SdkError {
    SdkError::new(
        ErrorKind::NotAuthenticated,
        credential.missing_error_message(),
    )
}

/// An HTTP header that authenticates a request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthHeader {
    pub name: &'static str,
    pub value: String,
}

impl AuthHeader {
    pub fn new(credential: Credential, value: impl Into<String>) -> Self {
        Self {
            name: credential.header_name(),
            value: value.into(),
        }
    }
}

/// A result type whose response carries credentials.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResultRole {
    /// `LoginResult` or `RegisterPlayFabUserResult`.
    Login,
    /// `GetEntityTokenResponse`.
    EntityToken,
    /// `AuthenticateCustomIdResult`.
    CustomIdAuthentication,
}

impl ResultRole {
    pub fn of(call: &ApiCall) -> Option<Self> {
        match call.result.as_deref()? {
            LOGIN_RESULT | "RegisterPlayFabUserResult" => Some(Self::Login),
            "GetEntityTokenResponse" => Some(Self::EntityToken),
            "AuthenticateCustomIdResult" => Some(Self::CustomIdAuthentication),
            _ => None,
        }
    }

    pub fn effects(self) -> &'static [PostCallEffect] {
        match self {
            Self::Login => &[
                PostCallEffect::PersistSessionTicket,
                PostCallEffect::PersistNestedEntityToken,
            ],
            Self::EntityToken => &[PostCallEffect::PersistEntityToken],
            Self::CustomIdAuthentication => &[PostCallEffect::PersistNestedEntityToken],
        }
    }
}

/// A credential that generated code stores from a successful response.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PostCallEffect {
    /// Store `SessionTicket`.
    PersistSessionTicket,
    /// Store `EntityToken`.
    PersistEntityToken,
    /// Store `EntityToken.EntityToken`.
    PersistNestedEntityToken,
}

impl PostCallEffect {
    /// Returns the effects for a call, in the order they run.
    pub fn of(call: &ApiCall) -> &'static [Self] {
        ResultRole::of(call).map(ResultRole::effects).unwrap_or_default()
    }

    pub fn credential(self) -> Credential {
        match self {
            Self::PersistSessionTicket => Credential::SessionTicket,
            Self::PersistEntityToken | Self::PersistNestedEntityToken => Credential::EntityToken,
        }
    }

    /// Returns the chain of keys that leads to the credential
    /// in the response.
    pub fn path(self) -> &'static [&'static str] {
        match self {
            Self::PersistSessionTicket => &["SessionTicket"],
            Self::PersistEntityToken => &["EntityToken"],
            Self::PersistNestedEntityToken => &["EntityToken", "EntityToken"],
        }
    }

    /// Extracts the credential from a response, if it's there.
    pub fn extract(self, response: &Value) -> Option<Persist> {
        let value = self
            .path()
            .iter()
            .try_fold(response, |value, &key| value.get(key))?;
        Some(Persist {
            credential: self.credential(),
            value: value.as_str()?.to_owned(),
        })
    }
}

/// A credential value to store in the [`SdkSettings`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Persist {
    pub credential: Credential,
    pub value: String,
}

/// Runs all post-call effects for a call against its response, storing
/// the extracted credentials in `settings`. Returns what was stored.
pub fn apply_post_call_effects(
    call: &ApiCall,
    response: &Value,
    settings: &mut SdkSettings,
) -> Vec<Persist> {
    PostCallEffect::of(call)
        .iter()
        .filter_map(|effect| effect.extract(response))
        .inspect(|persist| settings.persist(persist.clone()))
        .collect()
}
