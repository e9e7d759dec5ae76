// storefront/src/broadcast.rs

//! Replay-latest multicast holder of the last known cart.
//!
//! `CartBroadcaster` is a cache, never a source of truth: the only writer is the
//! `CartStore`, which publishes successful gateway responses. Subscribers get the
//! current value immediately, then every later value, synchronously and in
//! subscription order.
//!
//! Deliveries are serialized. A `publish` issued from inside an observer is
//! queued and delivered after the current round finishes, so every observer
//! still sees values in publication order.

use crate::models::Cart;
use parking_lot::{Mutex, ReentrantMutex};
use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use tracing::{event, Level};

pub type CartObserver = Arc<dyn Fn(Option<&Cart>) + Send + Sync>;

struct Registered {
  id: u64,
  /// Sequence number of the value delivered on subscribe; older queued values are skipped.
  from_seq: u64,
  observer: CartObserver,
}

#[derive(Default)]
struct State {
  current: Option<Cart>,
  seq: u64,
  next_id: u64,
  observers: Vec<Registered>,
  pending: VecDeque<(u64, Option<Cart>)>,
}

#[derive(Default)]
struct Inner {
  state: Mutex<State>,
  /// Held while delivering; the flag marks an in-progress drain on this thread.
  delivery: ReentrantMutex<Cell<bool>>,
}

#[derive(Clone, Default)]
pub struct CartBroadcaster {
  inner: Arc<Inner>,
}

impl std::fmt::Debug for CartBroadcaster {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let state = self.inner.state.lock();
    f.debug_struct("CartBroadcaster")
      .field("has_cart", &state.current.is_some())
      .field("seq", &state.seq)
      .field("subscribers", &state.observers.len())
      .finish()
  }
}

impl CartBroadcaster {
  pub fn new() -> Self {
    Self::default()
  }

  /// Last published value.
  pub fn current(&self) -> Option<Cart> {
    self.inner.state.lock().current.clone()
  }

  /// Units in the cached cart, 0 when there is none.
  pub fn item_count(&self) -> u32 {
    self.inner.state.lock().current.as_ref().map_or(0, |cart| cart.item_count)
  }

  pub fn subscriber_count(&self) -> usize {
    self.inner.state.lock().observers.len()
  }

  /// Registers `observer` and immediately hands it the current value.
  ///
  /// Delivery continues until the returned `Subscription` is cancelled or dropped.
  pub fn subscribe(&self, observer: impl Fn(Option<&Cart>) + Send + Sync + 'static) -> Subscription {
    let observer: CartObserver = Arc::new(observer);
    let _delivery = self.inner.delivery.lock();

    let (id, current) = {
      let mut state = self.inner.state.lock();
      let id = state.next_id;
      state.next_id += 1;
      let from_seq = state.seq;
      state.observers.push(Registered {
        id,
        from_seq,
        observer: Arc::clone(&observer),
      });
      (id, state.current.clone())
    };

    event!(Level::DEBUG, subscription_id = id, has_cart = current.is_some(), "cart observer subscribed");
    observer(current.as_ref());

    Subscription {
      id,
      inner: Arc::downgrade(&self.inner),
    }
  }

  /// Replaces the current value and notifies every active subscriber.
  pub fn publish(&self, cart: Option<Cart>) {
    {
      let mut state = self.inner.state.lock();
      state.seq += 1;
      state.current = cart.clone();
      let seq = state.seq;
      state.pending.push_back((seq, cart));
      event!(Level::DEBUG, seq, subscribers = state.observers.len(), "cart snapshot published");
    }

    let delivery = self.inner.delivery.lock();
    if delivery.get() {
      // Re-entrant publish: the drain below us on this thread picks it up.
      return;
    }
    delivery.set(true);
    loop {
      let next = {
        let mut state = self.inner.state.lock();
        state.pending.pop_front().map(|(seq, cart)| {
          let targets: Vec<CartObserver> = state
            .observers
            .iter()
            .filter(|r| r.from_seq < seq)
            .map(|r| Arc::clone(&r.observer))
            .collect();
          (cart, targets)
        })
      };
      let Some((cart, targets)) = next else { break };
      for observer in targets {
        observer(cart.as_ref());
      }
    }
    delivery.set(false);
  }
}

/// Handle for an active subscription. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
  id: u64,
  inner: Weak<Inner>,
}

impl Subscription {
  pub fn id(&self) -> u64 {
    self.id
  }

  pub fn cancel(self) {}
}

impl Drop for Subscription {
  fn drop(&mut self) {
    if let Some(inner) = self.inner.upgrade() {
      inner.state.lock().observers.retain(|r| r.id != self.id);
      event!(Level::DEBUG, subscription_id = self.id, "cart observer unsubscribed");
    }
  }
}

impl std::fmt::Debug for Subscription {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription").field("id", &self.id).finish()
  }
}
