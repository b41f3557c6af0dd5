//! Auth-key provider.

/// Issues the opaque credential reference embedded in endpoint cookies and
/// used by the host to authorize inbound directive calls. Key issuance and
/// rotation live with the host.
pub trait AuthKeyProvider: Send + Sync {
    /// Current opaque auth-key reference.
    fn auth_key(&self) -> String;
}
