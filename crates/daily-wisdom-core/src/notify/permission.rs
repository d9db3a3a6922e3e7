use std::fmt;

/// Notification permission state, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// The user dismissed the request without answering.
    Default,
    /// The platform has no notification support.
    Unsupported,
}

impl Permission {
    pub fn is_granted(&self) -> bool {
        matches!(self, Permission::Granted)
    }

    /// Message shown when a toggle is reverted because of this state.
    pub fn denial_message(&self) -> Option<&'static str> {
        match self {
            Permission::Granted => None,
            Permission::Unsupported => Some("❌ Notifications are not supported on this system"),
            Permission::Denied | Permission::Default => {
                Some("❌ Please allow notifications in your system settings")
            }
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Permission::Granted => "granted",
            Permission::Denied => "denied",
            Permission::Default => "default",
            Permission::Unsupported => "unsupported",
        };
        f.write_str(s)
    }
}

/// Asks the platform (or the user) for notification permission.
pub trait PermissionSource {
    fn current(&self) -> Permission;

    /// Prompt if needed. Only called when `current` is not already granted.
    fn request(&mut self) -> Permission;
}

/// Permission source with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedPermission {
    answer: Permission,
    pub requests: usize,
}

impl FixedPermission {
    pub fn new(answer: Permission) -> Self {
        Self { answer, requests: 0 }
    }
}

impl PermissionSource for FixedPermission {
    fn current(&self) -> Permission {
        match self.answer {
            Permission::Unsupported => Permission::Unsupported,
            _ if self.requests > 0 => self.answer,
            _ => Permission::Default,
        }
    }

    fn request(&mut self) -> Permission {
        self.requests += 1;
        self.answer
    }
}

/// Result of switching notifications on or off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Enabled,
    Disabled,
    /// Enabling failed; the toggle was reverted to off.
    Reverted { permission: Permission, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denial_messages() {
        assert!(Permission::Granted.denial_message().is_none());
        assert!(Permission::Denied.denial_message().is_some());
        assert_ne!(
            Permission::Unsupported.denial_message(),
            Permission::Denied.denial_message()
        );
    }

    #[test]
    fn test_fixed_permission() {
        let mut source = FixedPermission::new(Permission::Granted);
        assert_eq!(source.current(), Permission::Default);
        assert_eq!(source.request(), Permission::Granted);
        assert_eq!(source.current(), Permission::Granted);
        assert_eq!(source.requests, 1);

        let source = FixedPermission::new(Permission::Unsupported);
        assert_eq!(source.current(), Permission::Unsupported);
    }
}
