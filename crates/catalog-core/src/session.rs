use crate::records::{self, ACCOUNT_KEY, SESSION_KEY};
use crate::store::KeyValueStore;
use catalog_models::{AccountRecord, SessionPhase, SessionState, UserProfile};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

const FALLBACK_DISPLAY_NAME: &str = "StreamSavvy User";
const FALLBACK_MEMBER_NAME: &str = "StreamSavvy Member";
const FALLBACK_EMAIL: &str = "Not provided";

/// Summary shown on the account page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountOverview {
    pub name: String,
    pub email: String,
    pub status: String,
}

/// Sign-up, payment and sign-in flow over the persisted records.
///
/// The session record is rewritten after every transition; the account
/// record only on sign-up and payment.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    state: SessionState,
}

impl SessionManager {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let state = records::load_session(store.as_ref());
        debug!(phase = ?state.phase(), "Session loaded");
        Self { store, state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.user.as_ref()
    }

    pub fn can_access_home(&self) -> bool {
        self.state.can_enter()
    }

    pub fn sign_up(&mut self, profile: UserProfile) {
        let account = AccountRecord {
            user: profile,
            has_completed_payment: false,
        };
        self.state.user = Some(account.user.clone());
        self.state.signed_up = true;
        self.state.payment_completed = false;

        records::persist(self.store.as_ref(), ACCOUNT_KEY, &account);
        self.persist_session();
        info!("Account created for {}", account.user.email);
    }

    pub fn complete_payment(&mut self) {
        self.state.payment_completed = true;

        if let Some(mut account) = records::load_account(self.store.as_ref()) {
            account.has_completed_payment = true;
            records::persist(self.store.as_ref(), ACCOUNT_KEY, &account);
            self.state.user = Some(account.user);
            self.state.signed_up = true;
        } else {
            warn!("Payment completed without a stored account");
        }

        self.persist_session();
        info!("Payment completed");
    }

    /// Check the credentials against the stored account. Requires a
    /// completed payment.
    pub fn sign_in(&mut self, email: &str, password: &str) -> bool {
        let account = match records::load_account(self.store.as_ref()) {
            Some(account) => account,
            None => {
                debug!("Sign-in attempted without an account");
                return false;
            }
        };

        let email_match = account.user.email.trim().to_lowercase() == email.trim().to_lowercase();
        let password_match = account.user.password == password;
        if !(email_match && password_match && account.has_completed_payment) {
            debug!(email_match, password_match, paid = account.has_completed_payment, "Sign-in rejected");
            return false;
        }

        self.state = SessionState {
            authenticated: true,
            signed_up: true,
            payment_completed: true,
            user: Some(account.user),
        };
        self.persist_session();
        info!("Signed in");
        true
    }

    pub fn sign_out(&mut self) {
        self.state.authenticated = false;
        self.persist_session();
        info!("Signed out");
    }

    /// Full name, else the capitalized email local-part
    pub fn display_name(&self) -> String {
        let user = match &self.state.user {
            Some(user) => user,
            None => return FALLBACK_DISPLAY_NAME.to_string(),
        };

        let full_name = user.full_name.trim();
        if !full_name.is_empty() {
            return full_name.to_string();
        }

        let local = user.email.split('@').next().unwrap_or_default().trim();
        let mut chars = local.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => FALLBACK_DISPLAY_NAME.to_string(),
        }
    }

    pub fn account_overview(&self) -> AccountOverview {
        let user = self.state.user.clone().unwrap_or_default();
        let non_empty = |value: &str, fallback: &str| {
            let value = value.trim();
            if value.is_empty() { fallback.to_string() } else { value.to_string() }
        };

        AccountOverview {
            name: non_empty(&user.full_name, FALLBACK_MEMBER_NAME),
            email: non_empty(&user.email, FALLBACK_EMAIL),
            status: if self.state.payment_completed { "Active" } else { "Incomplete" }.to_string(),
        }
    }

    fn persist_session(&self) {
        records::persist(self.store.as_ref(), SESSION_KEY, &self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn manager() -> (Arc<MemoryStore>, SessionManager) {
        let store = Arc::new(MemoryStore::new());
        let manager = SessionManager::load(store.clone());
        (store, manager)
    }

    fn jane() -> UserProfile {
        UserProfile::new("Jane Doe", "Jane@Example.com", "secret")
    }

    #[test]
    fn test_full_flow_reaches_home() {
        let (_, mut session) = manager();
        assert_eq!(session.phase(), SessionPhase::Anonymous);

        session.sign_up(jane());
        assert_eq!(session.phase(), SessionPhase::SignedUpUnpaid);
        assert!(!session.can_access_home());

        session.complete_payment();
        assert_eq!(session.phase(), SessionPhase::SignedUpPaid);
        assert!(!session.can_access_home());

        assert!(session.sign_in(" jane@example.com ", "secret"));
        assert!(session.can_access_home());

        session.sign_out();
        assert_eq!(session.phase(), SessionPhase::SignedUpPaid);
        assert!(!session.can_access_home());
    }

    #[test]
    fn test_sign_in_before_payment_fails() {
        let (_, mut session) = manager();
        session.sign_up(jane());
        assert!(!session.sign_in("jane@example.com", "secret"));
        assert!(!session.state().authenticated);
    }

    #[test]
    fn test_sign_in_rejects_wrong_credentials() {
        let (_, mut session) = manager();
        assert!(!session.sign_in("jane@example.com", "secret"));

        session.sign_up(jane());
        session.complete_payment();
        assert!(!session.sign_in("jane@example.com", "Secret"));
        assert!(!session.sign_in("john@example.com", "secret"));
        assert!(session.sign_in("JANE@EXAMPLE.COM", "secret"));
    }

    #[test]
    fn test_sign_up_persists_nested_unpaid_account() {
        let (store, mut session) = manager();
        session.sign_up(jane());

        let raw: serde_json::Value =
            serde_json::from_slice(&store.get(ACCOUNT_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw["user"]["fullName"], "Jane Doe");
        assert_eq!(raw["hasCompletedPayment"], false);
        assert!(store.get(SESSION_KEY).unwrap().is_some());
    }

    #[test]
    fn test_session_reloads_equivalent_state() {
        let temp_dir = TempDir::new().unwrap();
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(temp_dir.path()));

        let mut session = SessionManager::load(store.clone());
        session.sign_up(jane());
        session.complete_payment();
        assert!(session.sign_in("jane@example.com", "secret"));
        let before = session.state().clone();

        let reloaded = SessionManager::load(store);
        assert_eq!(reloaded.state(), &before);
        assert!(reloaded.can_access_home());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let (_, mut session) = manager();
        assert_eq!(session.display_name(), "StreamSavvy User");

        session.sign_up(UserProfile::new("", "jane.doe@example.com", "pw"));
        assert_eq!(session.display_name(), "Jane.doe");

        session.sign_up(jane());
        assert_eq!(session.display_name(), "Jane Doe");
    }

    #[test]
    fn test_account_overview() {
        let (_, mut session) = manager();
        let overview = session.account_overview();
        assert_eq!(overview.name, "StreamSavvy Member");
        assert_eq!(overview.email, "Not provided");
        assert_eq!(overview.status, "Incomplete");

        session.sign_up(jane());
        session.complete_payment();
        let overview = session.account_overview();
        assert_eq!(overview.name, "Jane Doe");
        assert_eq!(overview.email, "Jane@Example.com");
        assert_eq!(overview.status, "Active");
    }
}
