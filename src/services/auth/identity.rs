/*
 * Responsibility
 * - 検証済みトークンから作られる認証主体 (Identity)
 * - role から導出される authority は最大 1 つ
 */

const AUTHORITY_PREFIX: &str = "ROLE_";

/// The authenticated principal of one request.
///
/// Only [`TokenAuthenticator`](super::TokenAuthenticator) constructs this, after a
/// token passed every check. It is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    subject: String,
    role: Option<String>,
    authority: Option<String>,
}

impl Identity {
    pub(crate) fn new(subject: String, role: Option<String>) -> Self {
        let authority = role
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .map(|r| format!("{AUTHORITY_PREFIX}{}", r.to_uppercase()));

        Self {
            subject,
            role,
            authority,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Authorities granted to this identity (zero or one entry).
    pub fn authorities(&self) -> &[String] {
        self.authority.as_slice()
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authority.as_deref() == Some(authority)
    }
}
