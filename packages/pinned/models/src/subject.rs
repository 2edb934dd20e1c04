use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Which kind of account a login refers to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubjectKind {
    /// An individual user account.
    #[strum(to_string = "user")]
    Account,
    Organization,
}

impl SubjectKind {
    /// Name of the path parameter that carries the login for this kind.
    #[must_use]
    pub const fn param_name(self) -> &'static str {
        match self {
            Self::Account => "username",
            Self::Organization => "orgname",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The login path parameter was missing or blank.
    #[error("{param} is required")]
    EmptyLogin { param: &'static str },
}

/// A validated reference to a user or organization.
///
/// The login is guaranteed to be non-blank; construct with [`Subject::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Subject {
    kind: SubjectKind,
    login: String,
}

impl Subject {
    /// # Errors
    ///
    /// * If `login` is empty or only whitespace
    pub fn new(kind: SubjectKind, login: impl Into<String>) -> Result<Self, ValidationError> {
        let login = login.into();

        if login.trim().is_empty() {
            return Err(ValidationError::EmptyLogin {
                param: kind.param_name(),
            });
        }

        Ok(Self { kind, login })
    }

    /// # Errors
    ///
    /// * If `login` is empty or only whitespace
    pub fn account(login: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(SubjectKind::Account, login)
    }

    /// # Errors
    ///
    /// * If `login` is empty or only whitespace
    pub fn organization(login: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(SubjectKind::Organization, login)
    }

    #[must_use]
    pub const fn kind(&self) -> SubjectKind {
        self.kind
    }

    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind, self.login)
    }
}
