use std::fmt;
use std::str::FromStr;

use crate::errors::StorageError;

/// The three backing mechanisms, in selection priority order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Backend {
    /// `localStorage`: survives across sessions.
    Durable,
    /// `sessionStorage`: scoped to one browsing session.
    Session,
    /// `document.cookie`
    Cookie,
}

impl Backend {
    /// All backends, highest priority first.
    pub const PRIORITY: [Backend; 3] = [Backend::Durable, Backend::Session, Backend::Cookie];

    /// Name of the browser mechanism, also the preference token that selects it.
    pub fn storage_name(self) -> &'static str {
        match self {
            Backend::Durable => "localStorage",
            Backend::Session => "sessionStorage",
            Backend::Cookie => "cookies",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_name())
    }
}

impl FromStr for Backend {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Backend::PRIORITY
            .into_iter()
            .find(|b| b.storage_name() == s)
            .ok_or_else(|| StorageError::UnknownPreference(s.to_string()))
    }
}

/// Which backends the factory may pick from.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Preference {
    /// No preference: first supported backend in priority order.
    #[default]
    Any,
    /// Only this backend.
    Only(Backend),
}

impl Preference {
    /// Returns `true` when `backend` may be selected under this preference.
    pub fn admits(self, backend: Backend) -> bool {
        match self {
            Preference::Any => true,
            Preference::Only(b) => b == backend,
        }
    }

    /// Parses an optional preference token. `None` means no preference.
    pub fn from_token(token: Option<&str>) -> Result<Self, StorageError> {
        match token {
            None => Ok(Preference::Any),
            Some(t) => Ok(Preference::Only(t.parse()?)),
        }
    }
}

impl From<Backend> for Preference {
    fn from(b: Backend) -> Self {
        Preference::Only(b)
    }
}
