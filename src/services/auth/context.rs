//! Per-request identity slot.
//!
//! The auth middleware writes an [`IdentityContext`] into the request extensions
//! on every request, so each request carries its own slot and nothing is shared
//! between concurrently processed requests.

use super::Identity;

#[derive(Debug, Clone, Default)]
pub struct IdentityContext {
    identity: Option<Identity>,
}

impl IdentityContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Replace the identity for this request.
    pub fn set(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    pub fn clear(&mut self) {
        self.identity = None;
    }

    pub fn current(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}
