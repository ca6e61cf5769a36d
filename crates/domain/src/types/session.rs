//! Signed-in business identity and auth payloads
//!
//! Tokens and passwords are redacted from `Debug` output so they can never
//! leak through structured logs.

use std::fmt;

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// The business a session belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct BusinessIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A signed-in session as persisted by the session store
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub business: BusinessIdentity,
}

impl Session {
    /// Build a session from a token grant. The API does not echo the email
    /// back, so the caller supplies the one it signed in with.
    pub fn from_grant(grant: TokenGrant, email: impl Into<String>) -> Self {
        Self {
            access_token: grant.access_token,
            business: BusinessIdentity {
                id: grant.business_id,
                name: grant.business_name,
                email: email.into(),
            },
        }
    }

    /// A persisted session is usable only when both halves are present.
    pub fn is_complete(&self) -> bool {
        !self.access_token.trim().is_empty() && !self.business.id.trim().is_empty()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("business", &self.business)
            .finish()
    }
}

/// Response body of `/auth/login` and `/auth/register`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub business_id: String,
    pub business_name: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("business_id", &self.business_id)
            .field("business_name", &self.business_name)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Sign-up form for a new business account
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub industry: String,
    /// small, medium or large
    pub size: String,
    #[serde(default)]
    pub address: serde_json::Map<String, serde_json::Value>,
}

impl fmt::Debug for BusinessRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusinessRegistration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("industry", &self.industry)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant() -> TokenGrant {
        TokenGrant {
            access_token: "secret-token".into(),
            token_type: "bearer".into(),
            business_id: "biz-1".into(),
            business_name: "Acme Ltd".into(),
        }
    }

    #[test]
    fn session_from_grant() {
        let session = Session::from_grant(grant(), "ops@acme.test");
        assert_eq!(session.access_token, "secret-token");
        assert_eq!(session.business.id, "biz-1");
        assert_eq!(session.business.name, "Acme Ltd");
        assert_eq!(session.business.email, "ops@acme.test");
        assert!(session.is_complete());
    }

    #[test]
    fn incomplete_session_detected() {
        let mut session = Session::from_grant(grant(), "ops@acme.test");
        session.access_token = "  ".into();
        assert!(!session.is_complete());
    }

    #[test]
    fn secrets_are_redacted_in_debug() {
        let session = Session::from_grant(grant(), "ops@acme.test");
        let creds = Credentials::new("ops@acme.test", "hunter2");

        assert!(!format!("{session:?}").contains("secret-token"));
        assert!(!format!("{:?}", grant()).contains("secret-token"));
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn token_type_defaults_to_bearer() {
        let grant: TokenGrant = serde_json::from_str(
            r#"{"access_token": "t", "business_id": "b", "business_name": "n"}"#,
        )
        .unwrap();
        assert_eq!(grant.token_type, "bearer");
    }
}
