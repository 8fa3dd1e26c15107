use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DEFAULT_EMAIL_DOMAIN: &str = "panel.zone";

/// Disambiguation tags are drawn uniformly from this range.
pub const TAG_RANGE: RangeInclusive<u16> = 1000..=9999;

/// Suffix appended to passwords to satisfy the panel's complexity rule.
const PASSWORD_SUFFIX: &str = "!!";

/// Keep ASCII alphanumerics and lower-case them.
pub fn sanitize(display_name: &str) -> String {
    display_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Login details issued for a new panel user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCredential {
    pub login_name: String,
    pub email: String,
    pub password: String,
}

/// Derives panel credentials from an operator-supplied display name.
///
/// Uniqueness is probabilistic only (one tag out of 9000); a collision shows
/// up as an ordinary panel rejection. The tag is not a secret.
#[derive(Debug, Clone)]
pub struct CredentialGenerator {
    email_domain: String,
}

impl Default for CredentialGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_EMAIL_DOMAIN)
    }
}

impl CredentialGenerator {
    pub fn new(email_domain: impl Into<String>) -> Self {
        Self {
            email_domain: email_domain.into(),
        }
    }

    pub fn email_domain(&self) -> &str {
        &self.email_domain
    }

    pub fn generate(&self, display_name: &str) -> Result<GeneratedCredential> {
        let tag = rand::rng().random_range(TAG_RANGE);
        self.generate_with_tag(display_name, tag)
    }

    pub fn generate_with_tag(&self, display_name: &str, tag: u16) -> Result<GeneratedCredential> {
        let base = sanitize(display_name);
        if base.is_empty() {
            return Err(Error::InvalidDisplayName(display_name.to_string()));
        }

        let login_name = format!("{base}{tag}");
        Ok(GeneratedCredential {
            email: format!("{login_name}@{}", self.email_domain),
            password: format!("{login_name}{PASSWORD_SUFFIX}"),
            login_name,
        })
    }
}
