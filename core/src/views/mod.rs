// storefront/src/views/mod.rs

//! Cart-consuming views and the other page models.
//!
//! Each cart view subscribes to the broadcaster on activation, which hands it
//! the cached cart at once, and then asks the store for a refresh. Mutations go
//! through the `CartStore`; views never write the cache themselves.

pub mod cart_page;
pub mod checkout;
pub mod header;
pub mod order_history;
pub mod product_detail;
pub mod ui;

pub use cart_page::CartPage;
pub use checkout::{CheckoutPage, CheckoutServices, SubmissionState, DEFAULT_PAYMENT_METHOD, PAYMENT_METHODS};
pub use header::CartBadge;
pub use order_history::OrderHistoryPage;
pub use product_detail::ProductDetailPage;
pub use ui::{Navigator, Notice, Prompt, Route};

use crate::broadcast::{CartBroadcaster, Subscription};
use crate::flow::ContextData;
use crate::models::Cart;

/// Result of a user action on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
  /// The request reached the backend and succeeded.
  Applied,
  /// Out of range or not applicable; nothing was sent.
  Ignored,
  /// The user answered "no" to the confirmation.
  Declined,
  /// The backend call failed and the user was notified.
  Failed,
}

/// A view's local copy of the cart, kept current by a broadcaster subscription.
pub(crate) struct LiveCart {
  cart: ContextData<Option<Cart>>,
  _subscription: Subscription,
}

impl LiveCart {
  pub(crate) fn attach(broadcaster: &CartBroadcaster) -> Self {
    let cart = ContextData::new(None);
    let sink = cart.clone();
    let subscription = broadcaster.subscribe(move |latest| {
      *sink.write() = latest.cloned();
    });
    Self {
      cart,
      _subscription: subscription,
    }
  }

  pub(crate) fn snapshot(&self) -> Option<Cart> {
    self.cart.snapshot()
  }

  pub(crate) fn with<R>(&self, f: impl FnOnce(Option<&Cart>) -> R) -> R {
    let guard = self.cart.read();
    f(guard.as_ref())
  }
}
