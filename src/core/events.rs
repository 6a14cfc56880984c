use std::sync::{
   Arc, RwLock,
   atomic::{AtomicBool, AtomicU64, Ordering},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactsEvent {
   /// A wallet was opened, its contacts replace whatever was shown
   WalletOpened,

   WalletClosed,

   /// A contact was added, edited or removed and the wallet was written
   ContactsChanged,

   /// Display settings changed, e.g the address format
   SettingsChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&ContactsEvent) + Send + Sync>;

/// Delivers [ContactsEvent]s to the registered listeners
///
/// Events are not queued, a listener only sees events emitted after it subscribed.
#[derive(Clone)]
pub struct EventBus {
   next_id: Arc<AtomicU64>,
   listeners: Arc<RwLock<Vec<(SubscriptionId, Listener)>>>,
}

impl EventBus {
   pub fn new() -> Self {
      Self {
         next_id: Arc::new(AtomicU64::new(0)),
         listeners: Arc::new(RwLock::new(Vec::new())),
      }
   }

   pub fn subscribe(&self, listener: impl Fn(&ContactsEvent) + Send + Sync + 'static) -> SubscriptionId {
      let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
      self.listeners.write().unwrap().push((id, Arc::new(listener)));
      id
   }

   pub fn unsubscribe(&self, id: SubscriptionId) {
      self.listeners.write().unwrap().retain(|(listener_id, _)| *listener_id != id);
   }

   /// Call every listener in subscription order
   ///
   /// Listeners run on a snapshot taken when the event is emitted, one added or removed from
   /// inside a callback takes effect from the next event.
   pub fn emit(&self, event: ContactsEvent) {
      tracing::trace!("Emitting {:?}", event);
      let listeners: Vec<Listener> = self
         .listeners
         .read()
         .unwrap()
         .iter()
         .map(|(_, listener)| listener.clone())
         .collect();

      for listener in listeners {
         listener(&event);
      }
   }

   pub fn listener_count(&self) -> usize {
      self.listeners.read().unwrap().len()
   }
}

/// A listener that only remembers that something happened
///
/// Used by views that rebuild their snapshot on the next frame.
#[derive(Clone)]
pub struct RefreshFlag(Arc<AtomicBool>);

impl RefreshFlag {
   /// A new flag, raised so the first poll triggers a refresh
   pub fn new() -> Self {
      Self(Arc::new(AtomicBool::new(true)))
   }

   pub fn raise(&self) {
      self.0.store(true, Ordering::Release);
   }

   /// Returns true once per raise
   pub fn take(&self) -> bool {
      self.0.swap(false, Ordering::AcqRel)
   }
}
