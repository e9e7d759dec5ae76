// storefront/src/views/checkout.rs

//! Checkout page: shipping address, payment method, notes, totals and the
//! submission state machine.
//!
//! `Idle -> Submitting -> Idle`. Validation happens before the transition and
//! never reaches the network. Once submitting, the order is placed through a
//! three-step flow: `place_order`, then a best-effort `clear_cart`, then
//! `announce_and_redirect`. A failed cart clear is logged and the user still
//! lands on the order history.

use super::ui::{Navigator, Notice, Prompt, Route};
use super::LiveCart;
use crate::error::{Result, StorefrontError};
use crate::flow::{ContextData, Flow, FlowControl, StepMode};
use crate::gateway::{AddressGateway, OrderGateway};
use crate::models::{Address, Cart, CreateOrderRequest, Order, TaxBreakdown, DEFAULT_TAX_RATE};
use crate::store::CartStore;
use anyhow::anyhow;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{event, instrument, Level};

pub const DEFAULT_PAYMENT_METHOD: &str = "efectivo";
pub const PAYMENT_METHODS: [&str; 3] = ["efectivo", "tarjeta", "transferencia"];
const DEFAULT_COUNTRY: &str = "México";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
  Idle,
  /// The confirm control is disabled.
  Submitting,
}

/// Everything the checkout page talks to.
#[derive(Clone)]
pub struct CheckoutServices {
  pub store: CartStore,
  pub orders: Arc<dyn OrderGateway>,
  pub addresses: Arc<dyn AddressGateway>,
  pub prompt: Arc<dyn Prompt>,
  pub navigator: Arc<dyn Navigator>,
  pub tax_rate: Decimal,
}

impl CheckoutServices {
  pub fn new(
    store: CartStore,
    orders: Arc<dyn OrderGateway>,
    addresses: Arc<dyn AddressGateway>,
    prompt: Arc<dyn Prompt>,
    navigator: Arc<dyn Navigator>,
  ) -> Self {
    Self {
      store,
      orders,
      addresses,
      prompt,
      navigator,
      tax_rate: DEFAULT_TAX_RATE,
    }
  }

  pub fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
    self.tax_rate = tax_rate;
    self
  }
}

#[derive(Debug, Clone)]
struct CheckoutForm {
  addresses: Vec<Address>,
  selected_address: Option<i64>,
  payment_method: String,
  notes: String,
}

impl Default for CheckoutForm {
  fn default() -> Self {
    Self {
      addresses: Vec::new(),
      selected_address: None,
      payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
      notes: String::new(),
    }
  }
}

/// Data shared by the submission flow's steps.
#[derive(Clone)]
struct SubmissionCtxData {
  store: CartStore,
  orders: Arc<dyn OrderGateway>,
  prompt: Arc<dyn Prompt>,
  navigator: Arc<dyn Navigator>,
  request: CreateOrderRequest,
  order: Option<Order>,
  cart_cleared: bool,
}

pub struct CheckoutPage {
  services: CheckoutServices,
  live: LiveCart,
  form: Mutex<CheckoutForm>,
  state: Mutex<SubmissionState>,
  flow: Flow<SubmissionCtxData, StorefrontError>,
}

impl CheckoutPage {
  /// Subscribes to the cart, then refreshes it and loads the user's addresses.
  pub async fn activate(services: CheckoutServices) -> Self {
    let live = LiveCart::attach(services.store.broadcaster());
    let page = Self {
      services,
      live,
      form: Mutex::new(CheckoutForm::default()),
      state: Mutex::new(SubmissionState::Idle),
      flow: submission_flow(),
    };
    if let Err(e) = page.services.store.refresh().await {
      page.services.prompt.notify(Notice::Error, e.user_message());
    }
    page.reload_addresses().await;
    page
  }

  /// Reloads the address list and preselects the default address, if any.
  #[instrument(name = "CheckoutPage::reload_addresses", skip(self))]
  pub async fn reload_addresses(&self) {
    match self.services.addresses.list_mine().await {
      Ok(addresses) => {
        let default_id = addresses.iter().find(|a| a.is_default).and_then(|a| a.id);
        let mut form = self.form.lock();
        form.addresses = addresses;
        if default_id.is_some() {
          form.selected_address = default_id;
        }
      }
      Err(e) => {
        event!(Level::WARN, error = %e, "could not load addresses");
        self.services.prompt.notify(Notice::Error, e.user_message());
      }
    }
  }

  pub fn cart(&self) -> Option<Cart> {
    self.live.snapshot()
  }

  /// Subtotal, tax and grand total, recomputed from the current cart on every call.
  pub fn totals(&self) -> TaxBreakdown {
    self.live.with(|cart| match cart {
      Some(cart) => TaxBreakdown::for_subtotal(cart.total, self.services.tax_rate),
      None => TaxBreakdown::zero(),
    })
  }

  pub fn tax(&self) -> Decimal {
    self.totals().tax
  }

  pub fn grand_total(&self) -> Decimal {
    self.totals().total
  }

  pub fn addresses(&self) -> Vec<Address> {
    self.form.lock().addresses.clone()
  }

  pub fn selected_address(&self) -> Option<i64> {
    self.form.lock().selected_address
  }

  pub fn payment_method(&self) -> String {
    self.form.lock().payment_method.clone()
  }

  pub fn notes(&self) -> String {
    self.form.lock().notes.clone()
  }

  pub fn state(&self) -> SubmissionState {
    *self.state.lock()
  }

  pub fn can_submit(&self) -> bool {
    self.state() == SubmissionState::Idle
  }

  /// Selects one of the loaded addresses.
  pub fn select_address(&self, address_id: i64) -> Result<()> {
    let mut form = self.form.lock();
    if !form.addresses.iter().any(|a| a.id == Some(address_id)) {
      return Err(StorefrontError::Validation(format!("Unknown shipping address {}", address_id)));
    }
    form.selected_address = Some(address_id);
    Ok(())
  }

  pub fn set_payment_method(&self, method: &str) -> Result<()> {
    if !PAYMENT_METHODS.contains(&method) {
      return Err(StorefrontError::Validation(format!("Unsupported payment method '{}'", method)));
    }
    self.form.lock().payment_method = method.to_string();
    Ok(())
  }

  pub fn set_notes(&self, notes: impl Into<String>) {
    self.form.lock().notes = notes.into();
  }

  /// A blank address with the default country filled in.
  pub fn new_address_template() -> Address {
    Address {
      country: DEFAULT_COUNTRY.to_string(),
      ..Address::default()
    }
  }

  /// Saves a new address and selects it.
  #[instrument(name = "CheckoutPage::save_address", skip_all)]
  pub async fn save_address(&self, address: Address) -> Result<Address> {
    let missing = address.missing_fields();
    if !missing.is_empty() {
      let err = StorefrontError::Validation(format!("Missing address fields: {}", missing.join(", ")));
      self.services.prompt.notify(Notice::Error, &err.user_message());
      return Err(err);
    }

    match self.services.addresses.create(&address).await {
      Ok(saved) => {
        {
          let mut form = self.form.lock();
          form.selected_address = saved.id;
          form.addresses.push(saved.clone());
        }
        self.services.prompt.notify(Notice::Success, "Address saved.");
        Ok(saved)
      }
      Err(e) => {
        self.services.prompt.notify(Notice::Error, e.user_message());
        Err(e.into())
      }
    }
  }

  /// Places the order.
  ///
  /// Rejected with `SubmissionInProgress` while a previous submission is still
  /// running. Validation failures are reported through the prompt and never
  /// reach the network.
  #[instrument(name = "CheckoutPage::submit", skip(self), err(Display))]
  pub async fn submit(&self) -> Result<Order> {
    // The prompt may read page state, so it is only called with `state` unlocked.
    let validated = {
      let mut state = self.state.lock();
      if *state == SubmissionState::Submitting {
        return Err(StorefrontError::SubmissionInProgress);
      }
      let validated = self.build_request();
      if validated.is_ok() {
        *state = SubmissionState::Submitting;
      }
      validated
    };
    let request = match validated {
      Ok(request) => request,
      Err(e) => {
        self.services.prompt.notify(Notice::Error, &e.user_message());
        return Err(e);
      }
    };

    let ctx_data = ContextData::new(SubmissionCtxData {
      store: self.services.store.clone(),
      orders: Arc::clone(&self.services.orders),
      prompt: Arc::clone(&self.services.prompt),
      navigator: Arc::clone(&self.services.navigator),
      request,
      order: None,
      cart_cleared: false,
    });

    let outcome = self.flow.run(ctx_data.clone()).await;
    *self.state.lock() = SubmissionState::Idle;

    let placed = ctx_data.write().order.take();
    match (outcome, placed) {
      (Ok(_), Some(order)) => {
        let mut form = self.form.lock();
        let addresses = std::mem::take(&mut form.addresses);
        *form = CheckoutForm {
          selected_address: addresses.iter().find(|a| a.is_default).and_then(|a| a.id),
          addresses,
          ..CheckoutForm::default()
        };
        Ok(order)
      }
      (Ok(_), None) => Err(StorefrontError::Internal(anyhow!("checkout finished without an order"))),
      (Err(e), _) => {
        self
          .services
          .prompt
          .notify(Notice::Error, &format!("Could not place your order. {}", e.user_message()));
        Err(e)
      }
    }
  }

  fn build_request(&self) -> Result<CreateOrderRequest> {
    if self.live.with(|cart| cart.map_or(true, Cart::is_empty)) {
      return Err(StorefrontError::Validation("Your cart is empty.".to_string()));
    }
    let form = self.form.lock();
    let shipping_address_id = form
      .selected_address
      .ok_or_else(|| StorefrontError::Validation("Please choose a shipping address.".to_string()))?;
    if form.payment_method.trim().is_empty() {
      return Err(StorefrontError::Validation("Please choose a payment method.".to_string()));
    }
    Ok(CreateOrderRequest {
      shipping_address_id,
      payment_method: form.payment_method.clone(),
      notes: form.notes.clone(),
    })
  }
}

fn submission_flow() -> Flow<SubmissionCtxData, StorefrontError> {
  let mut flow = Flow::<SubmissionCtxData, StorefrontError>::new(&[
    ("place_order", StepMode::Required, None),
    ("clear_cart", StepMode::BestEffort, None),
    ("announce_and_redirect", StepMode::Required, None),
  ]);

  flow.on_step("place_order", |ctx_data: ContextData<SubmissionCtxData>| async move {
    let (orders, request) = {
      let guard = ctx_data.read();
      (Arc::clone(&guard.orders), guard.request.clone())
    };
    let order = orders.create(&request).await?;
    event!(Level::INFO, order_number = %order.display_number(), "order placed");
    ctx_data.write().order = Some(order);
    Ok::<_, StorefrontError>(FlowControl::Continue)
  });

  flow.on_step("clear_cart", |ctx_data: ContextData<SubmissionCtxData>| async move {
    let store = ctx_data.read().store.clone();
    store.clear().await?;
    ctx_data.write().cart_cleared = true;
    Ok::<_, StorefrontError>(FlowControl::Continue)
  });

  flow.on_step("announce_and_redirect", |ctx_data: ContextData<SubmissionCtxData>| async move {
    let (order_number, cart_cleared, prompt, navigator) = {
      let guard = ctx_data.read();
      let order = guard
        .order
        .as_ref()
        .ok_or_else(|| anyhow!("no order recorded before announcement"))?;
      (
        order.display_number(),
        guard.cart_cleared,
        Arc::clone(&guard.prompt),
        Arc::clone(&guard.navigator),
      )
    };
    if !cart_cleared {
      event!(Level::WARN, %order_number, "order placed but the cart could not be cleared");
    }
    prompt.notify(
      Notice::Success,
      &format!("Order placed successfully! Order number: {}", order_number),
    );
    navigator.navigate(Route::OrderHistory);
    Ok::<_, StorefrontError>(FlowControl::Continue)
  });

  flow
}
