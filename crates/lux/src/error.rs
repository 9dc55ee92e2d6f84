//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, unresolved names, name collisions in scene registries,
//! IO, and generic errors. Generation itself never fails: a sequence that stops early
//! reports a [`crate::generation::next_element::StopReason`] instead.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("missing {kind} '{name}'")]
    MissingReference { kind: &'static str, name: String },

    #[error("{kind} name collision: '{name}' is already registered")]
    NameCollision { kind: &'static str, name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn missing(kind: &'static str, name: impl Into<String>) -> Self {
        Error::MissingReference {
            kind,
            name: name.into(),
        }
    }

    pub(crate) fn collision(kind: &'static str, name: impl Into<String>) -> Self {
        Error::NameCollision {
            kind,
            name: name.into(),
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        matches!(err, Error::Other(_))
            .then_some(())
            .expect("expected Other variant");
    }

    #[test]
    fn missing_reference_names_kind_and_name() {
        let err = Error::missing("element", "twig");
        assert_eq!(err.to_string(), "missing element 'twig'");
    }

    #[test]
    fn collision_message_mentions_name() {
        let err = Error::collision("cluster", "tree");
        assert!(err.to_string().contains("'tree'"));
        assert!(matches!(err, Error::NameCollision { kind: "cluster", .. }));
    }
}
