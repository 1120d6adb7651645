use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String, // plaintext, compared as-is on sign-in
}

impl UserProfile {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Persisted account: always written in the nested shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub user: UserProfile,
    pub has_completed_payment: bool,
}

/// Session flags plus the signed-up profile.
///
/// The three flags are independent at rest; only `can_enter` decides access.
/// Older records used `isAuthenticated` / `hasCompletedSignUp` /
/// `hasCompletedPayment`, which are still accepted on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default, alias = "isAuthenticated")]
    pub authenticated: bool,
    #[serde(default, alias = "hasCompletedSignUp")]
    pub signed_up: bool,
    #[serde(default, alias = "hasCompletedPayment")]
    pub payment_completed: bool,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Anonymous,
    SignedUpUnpaid,
    SignedUpPaid,
    Authenticated,
}

impl SessionState {
    pub fn can_enter(&self) -> bool {
        self.authenticated && self.signed_up && self.payment_completed
    }

    pub fn phase(&self) -> SessionPhase {
        if self.can_enter() {
            SessionPhase::Authenticated
        } else if self.signed_up && self.payment_completed {
            SessionPhase::SignedUpPaid
        } else if self.signed_up {
            SessionPhase::SignedUpUnpaid
        } else {
            SessionPhase::Anonymous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_accepts_legacy_field_names() {
        let raw = r#"{"isAuthenticated": true, "hasCompletedSignUp": true, "hasCompletedPayment": false, "user": null}"#;
        let state: SessionState = serde_json::from_str(raw).unwrap();
        assert!(state.authenticated);
        assert!(state.signed_up);
        assert!(!state.payment_completed);
        assert_eq!(state.user, None);
        assert_eq!(state.phase(), SessionPhase::SignedUpUnpaid);
    }

    #[test]
    fn test_session_writes_current_field_names() {
        let state = SessionState {
            authenticated: false,
            signed_up: true,
            payment_completed: true,
            user: Some(UserProfile::new("Jane", "jane@example.com", "pw")),
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["signedUp"], true);
        assert_eq!(value["paymentCompleted"], true);
        assert_eq!(value["user"]["fullName"], "Jane");
        assert_eq!(state.phase(), SessionPhase::SignedUpPaid);
    }

    #[test]
    fn test_can_enter_requires_all_flags() {
        let mut state = SessionState {
            authenticated: true,
            signed_up: true,
            payment_completed: false,
            user: None,
        };
        assert!(!state.can_enter());
        state.payment_completed = true;
        assert!(state.can_enter());
        assert_eq!(state.phase(), SessionPhase::Authenticated);
    }
}
