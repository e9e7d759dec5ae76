// storefront_cli/src/state.rs

use crate::terminal::{TerminalNavigator, TerminalPrompt};
use rust_decimal::Decimal;
use std::sync::Arc;
use storefront::gateway::{
  AddressGateway, ApiClient, CatalogGateway, HttpAddressGateway, HttpCartGateway, HttpCatalogGateway, HttpOrderGateway,
  OrderGateway,
};
use storefront::views::{CheckoutServices, Navigator, Prompt};
use storefront::{CartBroadcaster, CartStore, ClientConfig};

/// Everything a command needs, wired once per process.
#[derive(Clone)]
pub struct AppState {
  pub store: CartStore,
  pub orders: Arc<dyn OrderGateway>,
  pub addresses: Arc<dyn AddressGateway>,
  pub catalog: Arc<dyn CatalogGateway>,
  pub prompt: Arc<dyn Prompt>,
  pub navigator: Arc<dyn Navigator>,
  pub tax_rate: Decimal,
}

impl AppState {
  pub fn build(config: &ClientConfig, assume_yes: bool) -> storefront::Result<Self> {
    let client = ApiClient::from_config(config)?;
    let store = CartStore::new(
      Arc::new(HttpCartGateway::new(client.clone())),
      CartBroadcaster::new(),
    );

    Ok(Self {
      store,
      orders: Arc::new(HttpOrderGateway::new(client.clone())),
      addresses: Arc::new(HttpAddressGateway::new(client.clone())),
      catalog: Arc::new(HttpCatalogGateway::new(client)),
      prompt: Arc::new(TerminalPrompt::new(assume_yes)),
      navigator: Arc::new(TerminalNavigator),
      tax_rate: config.tax_rate,
    })
  }

  pub fn checkout_services(&self) -> CheckoutServices {
    CheckoutServices::new(
      self.store.clone(),
      self.orders.clone(),
      self.addresses.clone(),
      self.prompt.clone(),
      self.navigator.clone(),
    )
    .with_tax_rate(self.tax_rate)
  }
}
