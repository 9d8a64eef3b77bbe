//! Principal names within the identity realm

use std::fmt;
use std::str::FromStr;

use crate::error::PrincipalError;

/// A structured name identifying a user or service within the realm.
///
/// Immutable once parsed. The same type names both the operator who is
/// authenticating and the account whose password is being changed; the two
/// may differ. A missing realm is allowed — the realm of the operator's
/// own identity applies downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal {
    primary: String,
    instance: Option<String>,
    realm: Option<String>,
}

impl Principal {
    /// Parse a principal from its textual form `primary[/instance][@REALM]`.
    pub fn new(name: &str) -> Result<Self, PrincipalError> {
        name.parse()
    }

    /// The primary component (the bare account or service name).
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// The instance component, if any.
    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    /// The realm component, if any.
    pub fn realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }
}

impl FromStr for Principal {
    type Err = PrincipalError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name.is_empty() {
            return Err(PrincipalError::Empty);
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(PrincipalError::ForbiddenCharacter {
                name: name.to_string(),
            });
        }

        let (rest, realm) = match name.rsplit_once('@') {
            Some((rest, realm)) => (rest, Some(realm)),
            None => (name, None),
        };
        if realm == Some("") {
            return Err(PrincipalError::EmptyComponent {
                name: name.to_string(),
                component: "realm",
            });
        }

        // The instance may itself contain separators (host-based service
        // principals); only the first slash is structural.
        let (primary, instance) = match rest.split_once('/') {
            Some((primary, instance)) => (primary, Some(instance)),
            None => (rest, None),
        };
        if primary.is_empty() {
            return Err(PrincipalError::EmptyComponent {
                name: name.to_string(),
                component: "primary",
            });
        }
        if instance == Some("") {
            return Err(PrincipalError::EmptyComponent {
                name: name.to_string(),
                component: "instance",
            });
        }

        Ok(Self {
            primary: primary.to_string(),
            instance: instance.map(ToString::to_string),
            realm: realm.map(ToString::to_string),
        })
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;
        if let Some(instance) = &self.instance {
            write!(f, "/{instance}")?;
        }
        if let Some(realm) = &self.realm {
            write!(f, "@{realm}")?;
        }
        Ok(())
    }
}
