//! Process-wide session state with change subscription.

use std::sync::Arc;

use tokio::sync::watch;

use super::session::Session;

/// Process-wide holder of the current session.
///
/// Reads return immutable snapshots. `subscribe` yields a receiver that
/// observes every replacement; dropping the receiver unsubscribes, so a
/// view that goes away stops receiving session updates.
#[derive(Debug, Clone)]
pub struct SessionStore {
    current: Arc<watch::Sender<Option<Session>>>,
}

impl SessionStore {
    /// Creates an empty store with no active session.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            current: Arc::new(sender),
        }
    }

    /// Returns a snapshot of the current session.
    pub fn snapshot(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    /// Whether a session is currently active.
    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Replaces the current session and notifies subscribers.
    pub fn replace(&self, session: Option<Session>) {
        self.current.send_replace(session);
    }

    /// Activates a session.
    pub fn sign_in(&self, session: Session) {
        self.replace(Some(session));
    }

    /// Clears the active session.
    pub fn sign_out(&self) {
        self.replace(None);
    }

    /// Subscribes to session changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_signed_out() {
        let store = SessionStore::new();
        assert!(store.snapshot().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_sign_in_and_out() {
        let store = SessionStore::new();
        store.sign_in(Session::new("uid-1"));
        assert!(store.is_authenticated());
        assert_eq!(store.snapshot().unwrap().uid, "uid-1");

        store.sign_out();
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let other = store.clone();
        store.sign_in(Session::new("uid-1"));
        assert!(other.is_authenticated());
    }

    #[tokio::test]
    async fn test_subscriber_observes_replacement() {
        let store = SessionStore::new();
        let mut receiver = store.subscribe();

        store.sign_in(Session::new("uid-1"));
        receiver.changed().await.unwrap();
        let seen = receiver.borrow().clone();
        assert_eq!(seen.map(|s| s.uid), Some("uid-1".to_string()));

        store.sign_out();
        receiver.changed().await.unwrap();
        assert!(receiver.borrow().is_none());
    }

    #[test]
    fn test_snapshot_is_detached_from_later_updates() {
        let store = SessionStore::new();
        store.sign_in(Session::new("uid-1"));
        let snapshot = store.snapshot().unwrap();

        store.sign_in(Session::new("uid-2"));
        assert_eq!(snapshot.uid, "uid-1");
        assert_eq!(store.snapshot().unwrap().uid, "uid-2");
    }
}
