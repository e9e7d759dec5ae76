// storefront/src/views/product_detail.rs

use super::ui::{Notice, Prompt};
use super::ActionOutcome;
use crate::error::{Result, StorefrontError};
use crate::gateway::CatalogGateway;
use crate::models::Product;
use crate::store::CartStore;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::instrument;

/// Product page with a quantity stepper bounded by `[1, product.stock]`.
pub struct ProductDetailPage {
  product: Product,
  quantity: Mutex<u32>,
  store: CartStore,
  prompt: Arc<dyn Prompt>,
}

impl ProductDetailPage {
  #[instrument(name = "ProductDetailPage::load", skip(catalog, store, prompt))]
  pub async fn load(
    product_id: i64,
    catalog: &dyn CatalogGateway,
    store: CartStore,
    prompt: Arc<dyn Prompt>,
  ) -> Result<Self> {
    match catalog.get_product(product_id).await {
      Ok(product) => Ok(Self::new(product, store, prompt)),
      Err(e) => {
        prompt.notify(Notice::Error, e.user_message());
        Err(StorefrontError::from(e))
      }
    }
  }

  pub fn new(product: Product, store: CartStore, prompt: Arc<dyn Prompt>) -> Self {
    Self {
      product,
      quantity: Mutex::new(1),
      store,
      prompt,
    }
  }

  pub fn product(&self) -> &Product {
    &self.product
  }

  pub fn quantity(&self) -> u32 {
    *self.quantity.lock()
  }

  /// Steps up unless already at the stock limit. Returns the resulting quantity.
  pub fn increase(&self) -> u32 {
    let mut quantity = self.quantity.lock();
    if *quantity < self.product.stock {
      *quantity += 1;
    }
    *quantity
  }

  pub fn decrease(&self) -> u32 {
    let mut quantity = self.quantity.lock();
    if *quantity > 1 {
      *quantity -= 1;
    }
    *quantity
  }

  /// Adds the selected quantity to the cart, then resets the stepper to 1.
  #[instrument(name = "ProductDetailPage::add_to_cart", skip(self), fields(product_id = ?self.product.id))]
  pub async fn add_to_cart(&self) -> ActionOutcome {
    let Some(product_id) = self.product.id else {
      return ActionOutcome::Ignored;
    };
    let quantity = self.quantity();
    if quantity == 0 || quantity > self.product.stock {
      return ActionOutcome::Ignored;
    }

    match self.store.add_item(product_id, quantity).await {
      Ok(_) => {
        self.prompt.notify(Notice::Success, "Product added to your cart.");
        *self.quantity.lock() = 1;
        ActionOutcome::Applied
      }
      Err(e) => {
        self.prompt.notify(Notice::Error, e.user_message());
        ActionOutcome::Failed
      }
    }
  }
}
