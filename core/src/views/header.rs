// storefront/src/views/header.rs

use crate::broadcast::Subscription;
use crate::store::CartStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{event, Level};

/// Header cart badge: the number of distinct lines in the cached cart.
pub struct CartBadge {
  count: Arc<AtomicUsize>,
  _subscription: Subscription,
}

impl CartBadge {
  /// Subscribes without triggering a refresh.
  pub fn attach(store: &CartStore) -> Self {
    let count = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&count);
    let subscription = store.subscribe(move |cart| {
      sink.store(cart.map_or(0, |c| c.line_count()), Ordering::Relaxed);
    });
    Self {
      count,
      _subscription: subscription,
    }
  }

  /// Subscribes, then refreshes. A failed refresh leaves the cached count showing.
  pub async fn activate(store: &CartStore) -> Self {
    let badge = Self::attach(store);
    if let Err(e) = store.refresh().await {
      event!(Level::WARN, error = %e, "cart badge refresh failed");
    }
    badge
  }

  pub fn count(&self) -> usize {
    self.count.load(Ordering::Relaxed)
  }

  pub fn label(&self) -> String {
    match self.count() {
      0 => "Cart".to_string(),
      n => format!("Cart ({})", n),
    }
  }
}
