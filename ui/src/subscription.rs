//! The visitor's subscription state.
//!
//! A visitor counts as subscribed once an email address has been stored under
//! [`SUBSCRIBER_KEY`]. [`SubscriptionStore`] owns that value and tells every
//! registered observer when it may have changed, whether the change came from
//! this tab or from another tab through the browser `storage` event.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Local storage key holding the subscriber's raw email address.
pub const SUBSCRIBER_KEY: &str = "userEmail";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("failed to read {0} from local storage")]
    Read(String),
    #[error("failed to write {0} to local storage")]
    Write(String),
}

/// Minimal string key-value storage.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StorageError::Read(key.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Throws on quota errors and in some private browsing modes.
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }
}

/// In-memory storage, shareable between stores to stand in for two tabs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: Rc<RefCell<HashMap<String, String>>>,
    reject_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, like a full or disabled storage.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.reject_writes.get() {
            return Err(StorageError::Write(key.to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

type Observer = Rc<dyn Fn(bool)>;

struct StoreInner {
    storage: Box<dyn KeyValueStorage>,
    observers: RefCell<Vec<(u64, Observer)>>,
    next_observer_id: Cell<u64>,
}

/// Observable owner of the subscriber email.
///
/// Cloning is cheap and every clone refers to the same store.
#[derive(Clone)]
pub struct SubscriptionStore {
    inner: Rc<StoreInner>,
}

impl PartialEq for SubscriptionStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for SubscriptionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionStore")
            .field("subscribed", &self.is_subscribed())
            .field("observers", &self.inner.observers.borrow().len())
            .finish()
    }
}

impl SubscriptionStore {
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                storage: Box::new(storage),
                observers: RefCell::new(Vec::new()),
                next_observer_id: Cell::new(0),
            }),
        }
    }

    /// A store backed by `window.localStorage`.
    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }

    /// The stored email, if there is a non-empty one.
    pub fn subscriber(&self) -> Option<String> {
        match self.inner.storage.get(SUBSCRIBER_KEY) {
            Ok(value) => value.filter(|email| !email.trim().is_empty()),
            Err(e) => {
                tracing::debug!("Treating visitor as not subscribed: {e}");
                None
            }
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscriber().is_some()
    }

    /// Persist `email` and notify observers.
    ///
    /// A failed write is logged and otherwise ignored.
    pub fn set_subscriber(&self, email: &str) {
        match self.inner.storage.set(SUBSCRIBER_KEY, email) {
            Ok(()) => {
                tracing::debug!("Stored subscriber email");
                self.notify();
            }
            Err(e) => {
                tracing::warn!("Could not remember subscriber: {e}");
            }
        }
    }

    /// Register an observer. It is called with the current subscription
    /// status every time the store may have changed, until the returned
    /// handle is dropped.
    #[must_use = "the observer is removed when the handle is dropped"]
    pub fn subscribe(&self, observer: impl Fn(bool) + 'static) -> Subscription {
        let id = self.inner.next_observer_id.get();
        self.inner.next_observer_id.set(id + 1);
        self.inner
            .observers
            .borrow_mut()
            .push((id, Rc::new(observer)));

        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Forward a browser `storage` event. `key` is `None` when another
    /// context cleared the whole storage.
    pub fn handle_storage_change(&self, key: Option<&str>) {
        match key {
            Some(SUBSCRIBER_KEY) | None => {
                tracing::debug!("Subscriber changed in another context");
                self.notify();
            }
            Some(_) => {}
        }
    }

    /// Tell every observer to re-read the store.
    pub fn notify(&self) {
        let subscribed = self.is_subscribed();
        // Observers may subscribe or unsubscribe while being notified, so
        // call a snapshot rather than holding the borrow.
        let observers: Vec<Observer> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in observers {
            observer(subscribed);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }
}

/// Keeps an observer registered. Dropping it unsubscribes.
pub struct Subscription {
    store: Weak<StoreInner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner
                .observers
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
