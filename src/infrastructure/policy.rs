use std::collections::HashMap;

use crate::domain::ports::{AccessPolicy, Action, Caller, Capability};

/// Access tiers a configured API key can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Full access: read, edit, delete, and private counts.
    Admin,
    /// Integration identity: read and edit orders, read private counts.
    Agent,
    /// Read-only access without the private-count capability.
    Viewer,
}

impl Role {
    pub fn from_name(name: &str) -> Result<Self, String> {
        match name {
            "admin" => Ok(Role::Admin),
            "agent" => Ok(Role::Agent),
            "viewer" => Ok(Role::Viewer),
            other => Err(format!("unknown role '{}'", other)),
        }
    }

    fn allows(self, action: Action) -> bool {
        match action {
            Action::Read => true,
            Action::Edit => matches!(self, Role::Admin | Role::Agent),
            Action::Delete => matches!(self, Role::Admin),
        }
    }

    fn grants(self, capability: Capability) -> bool {
        match capability {
            Capability::ReadPrivateOrders => matches!(self, Role::Admin | Role::Agent),
        }
    }
}

/// Resolves the `X-Api-Key` a request presented against the configured key
/// assignments. Unknown or absent keys resolve to no role and hold nothing.
pub struct KeyAccessPolicy {
    keys: HashMap<String, Role>,
}

impl KeyAccessPolicy {
    pub fn new(keys: HashMap<String, Role>) -> Self {
        Self { keys }
    }

    fn role_of(&self, caller: &Caller) -> Option<Role> {
        caller
            .api_key
            .as_deref()
            .and_then(|key| self.keys.get(key))
            .copied()
    }
}

impl AccessPolicy for KeyAccessPolicy {
    fn permits(&self, caller: &Caller, action: Action, _order_id: i64) -> bool {
        self.role_of(caller)
            .map(|role| role.allows(action))
            .unwrap_or(false)
    }

    fn has_capability(&self, caller: &Caller, capability: Capability) -> bool {
        self.role_of(caller)
            .map(|role| role.grants(capability))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> KeyAccessPolicy {
        KeyAccessPolicy::new(HashMap::from([
            ("root".to_string(), Role::Admin),
            ("tracker".to_string(), Role::Agent),
            ("kiosk".to_string(), Role::Viewer),
        ]))
    }

    #[test]
    fn anonymous_caller_is_denied_everything() {
        let policy = policy();
        let caller = Caller::anonymous();
        assert!(!policy.permits(&caller, Action::Read, 1));
        assert!(!policy.has_capability(&caller, Capability::ReadPrivateOrders));
    }

    #[test]
    fn unknown_key_is_denied_everything() {
        let policy = policy();
        let caller = Caller::with_key("stolen");
        assert!(!policy.permits(&caller, Action::Read, 1));
    }

    #[test]
    fn viewer_reads_but_cannot_edit_or_count() {
        let policy = policy();
        let caller = Caller::with_key("kiosk");
        assert!(policy.permits(&caller, Action::Read, 1));
        assert!(!policy.permits(&caller, Action::Edit, 1));
        assert!(!policy.permits(&caller, Action::Delete, 1));
        assert!(!policy.has_capability(&caller, Capability::ReadPrivateOrders));
    }

    #[test]
    fn agent_edits_and_counts_but_cannot_delete() {
        let policy = policy();
        let caller = Caller::with_key("tracker");
        assert!(policy.permits(&caller, Action::Edit, 1));
        assert!(!policy.permits(&caller, Action::Delete, 1));
        assert!(policy.has_capability(&caller, Capability::ReadPrivateOrders));
    }

    #[test]
    fn admin_holds_every_permission() {
        let policy = policy();
        let caller = Caller::with_key("root");
        assert!(policy.permits(&caller, Action::Read, 1));
        assert!(policy.permits(&caller, Action::Edit, 1));
        assert!(policy.permits(&caller, Action::Delete, 1));
        assert!(policy.has_capability(&caller, Capability::ReadPrivateOrders));
    }

    #[test]
    fn role_names_parse() {
        assert_eq!(Role::from_name("admin").unwrap(), Role::Admin);
        assert_eq!(Role::from_name("agent").unwrap(), Role::Agent);
        assert_eq!(Role::from_name("viewer").unwrap(), Role::Viewer);
        assert!(Role::from_name("owner").is_err());
    }
}
