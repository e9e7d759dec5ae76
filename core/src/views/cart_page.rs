// storefront/src/views/cart_page.rs

use super::ui::{Notice, Prompt};
use super::{ActionOutcome, LiveCart};
use crate::models::Cart;
use crate::store::CartStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{event, instrument, Level};

pub struct CartPage {
  store: CartStore,
  prompt: Arc<dyn Prompt>,
  live: LiveCart,
}

impl CartPage {
  /// Subscribes to the cached cart, then refreshes it from the backend.
  pub async fn activate(store: CartStore, prompt: Arc<dyn Prompt>) -> Self {
    let live = LiveCart::attach(store.broadcaster());
    let page = Self { store, prompt, live };
    if let Err(e) = page.store.refresh().await {
      page.prompt.notify(Notice::Error, e.user_message());
    }
    page
  }

  pub fn cart(&self) -> Option<Cart> {
    self.live.snapshot()
  }

  pub fn is_empty(&self) -> bool {
    self.live.with(|cart| cart.map_or(true, Cart::is_empty))
  }

  /// Cart subtotal; shipping is free so this is also the page total.
  pub fn total(&self) -> Decimal {
    self.live.with(|cart| cart.map_or(Decimal::ZERO, |c| c.total))
  }

  /// Requests `requested` units of `product_id`.
  ///
  /// Values outside `[1, stock_available]`, or products not in the cart, are
  /// ignored without a network call.
  #[instrument(name = "CartPage::change_quantity", skip(self))]
  pub async fn change_quantity(&self, product_id: i64, requested: i64) -> ActionOutcome {
    let accepted = self
      .live
      .with(|cart| cart.and_then(|c| c.item(product_id)).and_then(|item| item.accepts_quantity(requested)));
    let Some(quantity) = accepted else {
      event!(Level::DEBUG, "quantity outside stock bounds; ignored");
      return ActionOutcome::Ignored;
    };

    match self.store.set_quantity(product_id, quantity).await {
      Ok(_) => ActionOutcome::Applied,
      Err(e) => {
        self.prompt.notify(Notice::Error, e.user_message());
        ActionOutcome::Failed
      }
    }
  }

  pub async fn increment(&self, product_id: i64) -> ActionOutcome {
    match self.quantity_of(product_id) {
      Some(current) => self.change_quantity(product_id, i64::from(current) + 1).await,
      None => ActionOutcome::Ignored,
    }
  }

  pub async fn decrement(&self, product_id: i64) -> ActionOutcome {
    match self.quantity_of(product_id) {
      Some(current) => self.change_quantity(product_id, i64::from(current) - 1).await,
      None => ActionOutcome::Ignored,
    }
  }

  #[instrument(name = "CartPage::remove_item", skip(self))]
  pub async fn remove_item(&self, product_id: i64) -> ActionOutcome {
    if !self.prompt.confirm("Remove this product from your cart?") {
      return ActionOutcome::Declined;
    }
    match self.store.remove_item(product_id).await {
      Ok(_) => ActionOutcome::Applied,
      Err(e) => {
        self.prompt.notify(Notice::Error, e.user_message());
        ActionOutcome::Failed
      }
    }
  }

  #[instrument(name = "CartPage::clear", skip(self))]
  pub async fn clear(&self) -> ActionOutcome {
    if !self.prompt.confirm("Empty your cart?") {
      return ActionOutcome::Declined;
    }
    match self.store.clear().await {
      Ok(()) => ActionOutcome::Applied,
      Err(e) => {
        self.prompt.notify(Notice::Error, e.user_message());
        ActionOutcome::Failed
      }
    }
  }

  fn quantity_of(&self, product_id: i64) -> Option<u32> {
    self.live.with(|cart| cart.and_then(|c| c.item(product_id)).map(|item| item.quantity))
  }
}
