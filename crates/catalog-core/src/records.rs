//! Typed access to the persisted records.
//!
//! Reads never fail: a missing, unreadable or malformed record is logged and
//! treated as absent. Writes return `StoreError` so callers can decide whether
//! to log and carry on.

use crate::store::{KeyValueStore, StoreError};
use catalog_models::{AccountRecord, SessionState, UserProfile};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const SESSION_KEY: &str = "streamsavvy_auth";
pub const ACCOUNT_KEY: &str = "streamsavvy_account";
pub const WATCHLIST_KEY: &str = "streamsavvy_watchlist";
pub const SEEN_TRENDING_KEY: &str = "streamsavvy_seen_trending_ids";
pub const NOTIFICATIONS_KEY: &str = "streamsavvy_notifications";

pub fn load_record<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let bytes = match store.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            debug!("No {} record found", key);
            return None;
        }
        Err(e) => {
            warn!("Failed to read {} record: {}. Treating as empty.", key, e);
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to parse {} record: {}. Treating as empty.", key, e);
            None
        }
    }
}

pub fn save_record<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(value)?;
    store.set(key, &bytes)
}

/// Write a record, logging instead of failing
pub(crate) fn persist<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    if let Err(e) = save_record(store, key, value) {
        warn!("Failed to persist {} record: {}", key, e);
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProfile {
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    has_completed_payment: Option<bool>,
}

/// Account as found on disk: either flat or nested under `user`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAccount {
    user: Option<RawProfile>,
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    has_completed_payment: Option<bool>,
}

impl RawAccount {
    fn normalize(self) -> AccountRecord {
        let nested = self.user.unwrap_or_default();
        AccountRecord {
            user: UserProfile {
                full_name: nested.full_name.or(self.full_name).unwrap_or_default(),
                email: nested.email.or(self.email).unwrap_or_default(),
                password: nested.password.or(self.password).unwrap_or_default(),
            },
            has_completed_payment: self
                .has_completed_payment
                .or(nested.has_completed_payment)
                .unwrap_or(false),
        }
    }
}

pub fn load_account(store: &dyn KeyValueStore) -> Option<AccountRecord> {
    load_record::<RawAccount>(store, ACCOUNT_KEY).map(RawAccount::normalize)
}

/// Rebuild the session from the session and account records.
///
/// An explicit session record wins, with its flags widened by the account;
/// an account on its own means signed up but not signed in.
pub fn load_session(store: &dyn KeyValueStore) -> SessionState {
    let session: Option<SessionState> = load_record(store, SESSION_KEY);
    let account = load_account(store);

    match (session, account) {
        (Some(session), account) => {
            let paid = account.as_ref().map(|a| a.has_completed_payment).unwrap_or(false);
            SessionState {
                authenticated: session.authenticated,
                signed_up: session.signed_up || account.is_some(),
                payment_completed: session.payment_completed || paid,
                user: session.user.or(account.map(|a| a.user)),
            }
        }
        (None, Some(account)) => SessionState {
            authenticated: false,
            signed_up: true,
            payment_completed: account.has_completed_payment,
            user: Some(account.user),
        },
        (None, None) => SessionState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_flat_account_is_normalized() {
        let store = MemoryStore::new();
        store
            .set(
                ACCOUNT_KEY,
                br#"{"fullName": "Jane Doe", "email": "jane@example.com", "password": "pw", "hasCompletedPayment": true}"#,
            )
            .unwrap();

        let account = load_account(&store).unwrap();
        assert_eq!(account.user.full_name, "Jane Doe");
        assert_eq!(account.user.email, "jane@example.com");
        assert!(account.has_completed_payment);
    }

    #[test]
    fn test_nested_fields_win_over_flat() {
        let store = MemoryStore::new();
        store
            .set(
                ACCOUNT_KEY,
                br#"{"email": "old@example.com", "user": {"email": "new@example.com", "hasCompletedPayment": true}}"#,
            )
            .unwrap();

        let account = load_account(&store).unwrap();
        assert_eq!(account.user.email, "new@example.com");
        assert_eq!(account.user.full_name, "");
        assert!(account.has_completed_payment);

        // Written back nested
        save_record(&store, ACCOUNT_KEY, &account).unwrap();
        let raw: serde_json::Value = serde_json::from_slice(&store.get(ACCOUNT_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw["user"]["email"], "new@example.com");
        assert_eq!(raw["hasCompletedPayment"], true);
        assert!(raw.get("email").is_none());
    }

    #[test]
    fn test_corrupt_records_degrade_to_no_state() {
        let store = MemoryStore::new();
        store.set(SESSION_KEY, b"{not json").unwrap();
        store.set(ACCOUNT_KEY, b"[1, 2]").unwrap();
        assert_eq!(load_session(&store), SessionState::default());
    }

    #[test]
    fn test_account_only_means_signed_up() {
        let store = MemoryStore::new();
        let account = AccountRecord {
            user: UserProfile::new("Jane", "jane@example.com", "pw"),
            has_completed_payment: true,
        };
        save_record(&store, ACCOUNT_KEY, &account).unwrap();

        let state = load_session(&store);
        assert!(!state.authenticated);
        assert!(state.signed_up);
        assert!(state.payment_completed);
        assert_eq!(state.user, Some(account.user));
    }

    #[test]
    fn test_session_flags_widened_by_account() {
        let store = MemoryStore::new();
        store
            .set(SESSION_KEY, br#"{"isAuthenticated": true, "hasCompletedSignUp": false, "user": null}"#)
            .unwrap();
        let account = AccountRecord {
            user: UserProfile::new("Jane", "jane@example.com", "pw"),
            has_completed_payment: true,
        };
        save_record(&store, ACCOUNT_KEY, &account).unwrap();

        let state = load_session(&store);
        assert!(state.authenticated);
        assert!(state.signed_up);
        assert!(state.payment_completed);
        assert_eq!(state.user.unwrap().full_name, "Jane");
    }
}
