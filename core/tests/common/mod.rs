// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset of these helpers

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet, VecDeque};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use storefront::gateway::{AddressGateway, CartGateway, CatalogGateway, OrderGateway, ProductListing};
use storefront::models::{Address, Cart, CartItem, Category, CreateOrderRequest, Order, OrderItem, OrderStatus, Product};
use storefront::views::{Navigator, Notice, Prompt, Route};
use storefront::RemoteError;
use tracing::Level;

// --- Helper for Tracing Setup ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Sample data ---
pub fn d(s: &str) -> Decimal {
  Decimal::from_str(s).unwrap()
}

pub fn sample_item(product_id: i64, quantity: u32, unit_price: &str, stock: u32) -> CartItem {
  CartItem::new(product_id, format!("Product {}", product_id), quantity, d(unit_price), stock)
}

pub fn sample_cart(items: Vec<CartItem>) -> Cart {
  let mut cart = Cart::from_items(1, items);
  cart.id = Some(1);
  cart
}

pub fn sample_address(id: i64, is_default: bool) -> Address {
  Address {
    id: Some(id),
    user_id: Some(1),
    full_name: format!("Customer {}", id),
    phone: "555-0100".to_string(),
    line1: format!("{} Main St", id),
    line2: None,
    city: "Guadalajara".to_string(),
    state: "Jalisco".to_string(),
    postal_code: "44100".to_string(),
    country: "México".to_string(),
    is_default,
    created_at: None,
  }
}

pub fn sample_product(id: i64, price: &str, stock: u32) -> Product {
  Product {
    id: Some(id),
    name: format!("Product {}", id),
    description: None,
    price: d(price),
    offer_price: None,
    stock,
    sku: None,
    weight: None,
    brand: None,
    active: Some(true),
    featured: Some(false),
    created_at: None,
    category_id: Some(1),
    category_name: Some("General".to_string()),
    images: None,
    main_image: None,
  }
}

pub fn sample_order(id: i64, status: OrderStatus, quantities: &[u32]) -> Order {
  let items: Vec<OrderItem> = quantities
    .iter()
    .enumerate()
    .map(|(idx, qty)| OrderItem {
      id: Some(idx as i64 + 1),
      product_id: idx as i64 + 1,
      product_name: format!("Product {}", idx + 1),
      product_image: None,
      quantity: *qty,
      unit_price: d("10.00"),
      subtotal: d("10.00") * Decimal::from(*qty),
    })
    .collect();
  let subtotal: Decimal = items.iter().map(|i| i.subtotal).sum();
  Order {
    id: Some(id),
    order_number: Some(format!("ORD-{:04}", id)),
    user_id: Some(1),
    user_name: Some("Customer".to_string()),
    status,
    subtotal,
    shipping_cost: Decimal::ZERO,
    taxes: Decimal::ZERO,
    total: subtotal,
    payment_method: Some("efectivo".to_string()),
    notes: None,
    created_at: None,
    updated_at: None,
    shipping_address: None,
    items,
  }
}

fn injected_failure(op: &str) -> RemoteError {
  RemoteError::server(500, Some(format!("{} failed", op)))
}

// --- Fake cart backend ---

/// In-memory cart backend that mirrors the server's behaviour closely enough
/// for view and store tests: it derives totals and enforces stock.
#[derive(Default)]
pub struct FakeCartGateway {
  server: Mutex<Option<Cart>>,
  catalog: Mutex<HashMap<i64, (Decimal, u32)>>,
  failing: Mutex<HashSet<&'static str>>,
  calls: Mutex<Vec<String>>,
  fetch_delay: Mutex<Option<Duration>>,
}

impl FakeCartGateway {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  /// A backend knowing `products` as `(id, unit price, stock)`.
  pub fn with_products(products: &[(i64, &str, u32)]) -> Arc<Self> {
    let gateway = Self::default();
    {
      let mut catalog = gateway.catalog.lock();
      for (id, price, stock) in products {
        catalog.insert(*id, (d(price), *stock));
      }
    }
    Arc::new(gateway)
  }

  pub fn seed(&self, cart: Option<Cart>) {
    if let Some(cart) = &cart {
      let mut catalog = self.catalog.lock();
      for item in &cart.items {
        catalog.entry(item.product_id).or_insert((item.unit_price, item.stock_available));
      }
    }
    *self.server.lock() = cart;
  }

  pub fn fail(&self, op: &'static str) {
    self.failing.lock().insert(op);
  }

  pub fn recover(&self, op: &'static str) {
    self.failing.lock().remove(op);
  }

  pub fn delay_fetch(&self, delay: Duration) {
    *self.fetch_delay.lock() = Some(delay);
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().clone()
  }

  pub fn call_count(&self, op: &str) -> usize {
    self.calls.lock().iter().filter(|c| c.starts_with(op)).count()
  }

  pub fn server_cart(&self) -> Option<Cart> {
    self.server.lock().clone()
  }

  fn enter(&self, call: String, op: &'static str) -> Result<(), RemoteError> {
    self.calls.lock().push(call);
    if self.failing.lock().contains(op) {
      return Err(injected_failure(op));
    }
    Ok(())
  }

  fn rebuild(&self, items: Vec<CartItem>) -> Cart {
    let mut cart = Cart::from_items(1, items);
    cart.id = Some(1);
    *self.server.lock() = Some(cart.clone());
    cart
  }

  fn line(&self, product_id: i64, quantity: u32) -> Result<CartItem, RemoteError> {
    let (price, stock) = self
      .catalog
      .lock()
      .get(&product_id)
      .copied()
      .ok_or_else(|| RemoteError::server(404, Some("Producto no encontrado".to_string())))?;
    if quantity > stock {
      return Err(RemoteError::server(400, Some("Stock insuficiente".to_string())));
    }
    Ok(CartItem::new(product_id, format!("Product {}", product_id), quantity, price, stock))
  }
}

#[async_trait]
impl CartGateway for FakeCartGateway {
  async fn fetch(&self) -> Result<Option<Cart>, RemoteError> {
    self.enter("fetch".to_string(), "fetch")?;
    let delay = *self.fetch_delay.lock();
    // Snapshot before sleeping so a delayed fetch returns stale data, like a slow response would.
    let snapshot = self.server.lock().clone();
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    Ok(snapshot)
  }

  async fn add_item(&self, product_id: i64, quantity: u32) -> Result<Cart, RemoteError> {
    self.enter(format!("add_item {} {}", product_id, quantity), "add_item")?;
    let mut items = self.server.lock().as_ref().map(|c| c.items.clone()).unwrap_or_default();
    let existing = items.iter().find(|i| i.product_id == product_id).map_or(0, |i| i.quantity);
    let line = self.line(product_id, existing + quantity)?;
    items.retain(|i| i.product_id != product_id);
    items.push(line);
    Ok(self.rebuild(items))
  }

  async fn set_quantity(&self, product_id: i64, quantity: u32) -> Result<Cart, RemoteError> {
    self.enter(format!("set_quantity {} {}", product_id, quantity), "set_quantity")?;
    let mut items = self.server.lock().as_ref().map(|c| c.items.clone()).unwrap_or_default();
    if !items.iter().any(|i| i.product_id == product_id) {
      return Err(RemoteError::server(404, Some("Item no encontrado en el carrito".to_string())));
    }
    let line = self.line(product_id, quantity)?;
    for item in items.iter_mut() {
      if item.product_id == product_id {
        *item = line.clone();
      }
    }
    Ok(self.rebuild(items))
  }

  async fn remove_item(&self, product_id: i64) -> Result<Cart, RemoteError> {
    self.enter(format!("remove_item {}", product_id), "remove_item")?;
    let mut items = self.server.lock().as_ref().map(|c| c.items.clone()).unwrap_or_default();
    items.retain(|i| i.product_id != product_id);
    Ok(self.rebuild(items))
  }

  async fn clear(&self) -> Result<(), RemoteError> {
    self.enter("clear".to_string(), "clear")?;
    *self.server.lock() = None;
    Ok(())
  }
}

// --- Fake order backend ---

#[derive(Default)]
pub struct FakeOrderGateway {
  orders: Mutex<Vec<Order>>,
  failing: Mutex<HashSet<&'static str>>,
  calls: Mutex<Vec<String>>,
  created: Mutex<Vec<CreateOrderRequest>>,
  create_delay: Mutex<Option<Duration>>,
}

impl FakeOrderGateway {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn with_orders(orders: Vec<Order>) -> Arc<Self> {
    let gateway = Self::default();
    *gateway.orders.lock() = orders;
    Arc::new(gateway)
  }

  pub fn fail(&self, op: &'static str) {
    self.failing.lock().insert(op);
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().clone()
  }

  pub fn call_count(&self, op: &str) -> usize {
    self.calls.lock().iter().filter(|c| c.starts_with(op)).count()
  }

  pub fn delay_create(&self, delay: Duration) {
    *self.create_delay.lock() = Some(delay);
  }

  pub fn created_requests(&self) -> Vec<CreateOrderRequest> {
    self.created.lock().clone()
  }

  pub fn status_of(&self, id: i64) -> Option<OrderStatus> {
    self.orders.lock().iter().find(|o| o.id == Some(id)).map(|o| o.status.clone())
  }

  fn enter(&self, call: String, op: &'static str) -> Result<(), RemoteError> {
    self.calls.lock().push(call);
    if self.failing.lock().contains(op) {
      return Err(injected_failure(op));
    }
    Ok(())
  }

  fn find(&self, pred: impl Fn(&Order) -> bool) -> Result<Order, RemoteError> {
    self
      .orders
      .lock()
      .iter()
      .find(|o| pred(o))
      .cloned()
      .ok_or_else(|| RemoteError::server(404, Some("Orden no encontrada".to_string())))
  }
}

#[async_trait]
impl OrderGateway for FakeOrderGateway {
  async fn list_mine(&self) -> Result<Vec<Order>, RemoteError> {
    self.enter("list_mine".to_string(), "list_mine")?;
    Ok(self.orders.lock().iter().filter(|o| o.user_id == Some(1)).cloned().collect())
  }

  async fn list_all(&self) -> Result<Vec<Order>, RemoteError> {
    self.enter("list_all".to_string(), "list_all")?;
    Ok(self.orders.lock().clone())
  }

  async fn get(&self, id: i64) -> Result<Order, RemoteError> {
    self.enter(format!("get {}", id), "get")?;
    self.find(|o| o.id == Some(id))
  }

  async fn get_by_number(&self, order_number: &str) -> Result<Order, RemoteError> {
    self.enter(format!("get_by_number {}", order_number), "get_by_number")?;
    self.find(|o| o.order_number.as_deref() == Some(order_number))
  }

  async fn list_by_status(&self, status: &OrderStatus) -> Result<Vec<Order>, RemoteError> {
    self.enter(format!("list_by_status {}", status), "list_by_status")?;
    Ok(self.orders.lock().iter().filter(|o| &o.status == status).cloned().collect())
  }

  async fn create(&self, request: &CreateOrderRequest) -> Result<Order, RemoteError> {
    self.enter("create".to_string(), "create")?;
    let delay = *self.create_delay.lock();
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    self.created.lock().push(request.clone());
    let mut orders = self.orders.lock();
    let id = orders.len() as i64 + 100;
    let mut order = sample_order(id, OrderStatus::Pending, &[1]);
    order.payment_method = Some(request.payment_method.clone());
    order.notes = Some(request.notes.clone());
    orders.push(order.clone());
    Ok(order)
  }

  async fn update_status(&self, id: i64, status: &OrderStatus) -> Result<Order, RemoteError> {
    self.enter(format!("update_status {} {}", id, status), "update_status")?;
    let mut orders = self.orders.lock();
    let order = orders
      .iter_mut()
      .find(|o| o.id == Some(id))
      .ok_or_else(|| RemoteError::server(404, Some("Orden no encontrada".to_string())))?;
    order.status = status.clone();
    Ok(order.clone())
  }
}

// --- Fake address backend ---

#[derive(Default)]
pub struct FakeAddressGateway {
  addresses: Mutex<Vec<Address>>,
  failing: Mutex<HashSet<&'static str>>,
  calls: Mutex<Vec<String>>,
}

impl FakeAddressGateway {
  pub fn with_addresses(addresses: Vec<Address>) -> Arc<Self> {
    let gateway = Self::default();
    *gateway.addresses.lock() = addresses;
    Arc::new(gateway)
  }

  pub fn fail(&self, op: &'static str) {
    self.failing.lock().insert(op);
  }

  pub fn call_count(&self, op: &str) -> usize {
    self.calls.lock().iter().filter(|c| c.starts_with(op)).count()
  }

  fn enter(&self, call: String, op: &'static str) -> Result<(), RemoteError> {
    self.calls.lock().push(call);
    if self.failing.lock().contains(op) {
      return Err(injected_failure(op));
    }
    Ok(())
  }

  fn not_found() -> RemoteError {
    RemoteError::server(404, Some("Dirección no encontrada".to_string()))
  }
}

#[async_trait]
impl AddressGateway for FakeAddressGateway {
  async fn list_mine(&self) -> Result<Vec<Address>, RemoteError> {
    self.enter("list_mine".to_string(), "list_mine")?;
    Ok(self.addresses.lock().clone())
  }

  async fn get(&self, id: i64) -> Result<Address, RemoteError> {
    self.enter(format!("get {}", id), "get")?;
    self
      .addresses
      .lock()
      .iter()
      .find(|a| a.id == Some(id))
      .cloned()
      .ok_or_else(Self::not_found)
  }

  async fn get_default(&self) -> Result<Option<Address>, RemoteError> {
    self.enter("get_default".to_string(), "get_default")?;
    Ok(self.addresses.lock().iter().find(|a| a.is_default).cloned())
  }

  async fn create(&self, address: &Address) -> Result<Address, RemoteError> {
    self.enter("create".to_string(), "create")?;
    let mut addresses = self.addresses.lock();
    let mut saved = address.clone();
    saved.id = Some(addresses.iter().filter_map(|a| a.id).max().unwrap_or(0) + 1);
    addresses.push(saved.clone());
    Ok(saved)
  }

  async fn update(&self, id: i64, address: &Address) -> Result<Address, RemoteError> {
    self.enter(format!("update {}", id), "update")?;
    let mut addresses = self.addresses.lock();
    let slot = addresses.iter_mut().find(|a| a.id == Some(id)).ok_or_else(Self::not_found)?;
    *slot = Address {
      id: Some(id),
      ..address.clone()
    };
    Ok(slot.clone())
  }

  async fn set_default(&self, id: i64) -> Result<Address, RemoteError> {
    self.enter(format!("set_default {}", id), "set_default")?;
    let mut addresses = self.addresses.lock();
    if !addresses.iter().any(|a| a.id == Some(id)) {
      return Err(Self::not_found());
    }
    for address in addresses.iter_mut() {
      address.is_default = address.id == Some(id);
    }
    addresses
      .iter()
      .find(|a| a.id == Some(id))
      .cloned()
      .ok_or_else(Self::not_found)
  }

  async fn delete(&self, id: i64) -> Result<(), RemoteError> {
    self.enter(format!("delete {}", id), "delete")?;
    self.addresses.lock().retain(|a| a.id != Some(id));
    Ok(())
  }
}

// --- Fake catalog backend ---

#[derive(Default)]
pub struct FakeCatalogGateway {
  products: Mutex<Vec<Product>>,
  categories: Mutex<Vec<Category>>,
}

impl FakeCatalogGateway {
  pub fn with_products(products: Vec<Product>) -> Arc<Self> {
    let gateway = Self::default();
    *gateway.products.lock() = products;
    Arc::new(gateway)
  }

  fn product_not_found() -> RemoteError {
    RemoteError::server(404, Some("Producto no encontrado".to_string()))
  }

  fn category_not_found() -> RemoteError {
    RemoteError::server(404, Some("Categoría no encontrada".to_string()))
  }
}

#[async_trait]
impl CatalogGateway for FakeCatalogGateway {
  async fn list_products(&self, listing: &ProductListing) -> Result<Vec<Product>, RemoteError> {
    let products = self.products.lock();
    Ok(match listing {
      ProductListing::All => products.clone(),
      ProductListing::Active => products.iter().filter(|p| p.active == Some(true)).cloned().collect(),
      ProductListing::Featured => products.iter().filter(|p| p.featured == Some(true)).cloned().collect(),
      ProductListing::New => products.clone(),
      ProductListing::OnSale => products.iter().filter(|p| p.offer_price.is_some()).cloned().collect(),
      ProductListing::Category(id) => products.iter().filter(|p| p.category_id == Some(*id)).cloned().collect(),
      ProductListing::Search(q) => {
        let q = q.to_lowercase();
        products.iter().filter(|p| p.name.to_lowercase().contains(&q)).cloned().collect()
      }
    })
  }

  async fn get_product(&self, id: i64) -> Result<Product, RemoteError> {
    self
      .products
      .lock()
      .iter()
      .find(|p| p.id == Some(id))
      .cloned()
      .ok_or_else(Self::product_not_found)
  }

  async fn create_product(&self, product: &Product) -> Result<Product, RemoteError> {
    let mut products = self.products.lock();
    let mut saved = product.clone();
    saved.id = Some(products.len() as i64 + 1);
    products.push(saved.clone());
    Ok(saved)
  }

  async fn update_product(&self, id: i64, product: &Product) -> Result<Product, RemoteError> {
    let mut products = self.products.lock();
    let slot = products.iter_mut().find(|p| p.id == Some(id)).ok_or_else(Self::product_not_found)?;
    *slot = Product {
      id: Some(id),
      ..product.clone()
    };
    Ok(slot.clone())
  }

  async fn delete_product(&self, id: i64) -> Result<(), RemoteError> {
    self.products.lock().retain(|p| p.id != Some(id));
    Ok(())
  }

  async fn list_categories(&self, active_only: bool) -> Result<Vec<Category>, RemoteError> {
    let categories = self.categories.lock();
    Ok(
      categories
        .iter()
        .filter(|c| !active_only || c.active != Some(false))
        .cloned()
        .collect(),
    )
  }

  async fn get_category(&self, id: i64) -> Result<Category, RemoteError> {
    self
      .categories
      .lock()
      .iter()
      .find(|c| c.id == Some(id))
      .cloned()
      .ok_or_else(Self::category_not_found)
  }

  async fn create_category(&self, category: &Category) -> Result<Category, RemoteError> {
    let mut categories = self.categories.lock();
    let mut saved = category.clone();
    saved.id = Some(categories.len() as i64 + 1);
    categories.push(saved.clone());
    Ok(saved)
  }

  async fn update_category(&self, id: i64, category: &Category) -> Result<Category, RemoteError> {
    let mut categories = self.categories.lock();
    let slot = categories
      .iter_mut()
      .find(|c| c.id == Some(id))
      .ok_or_else(Self::category_not_found)?;
    *slot = Category {
      id: Some(id),
      ..category.clone()
    };
    Ok(slot.clone())
  }

  async fn delete_category(&self, id: i64) -> Result<(), RemoteError> {
    self.categories.lock().retain(|c| c.id != Some(id));
    Ok(())
  }
}

// --- Recording front end ---

/// Answers confirmations from a script (default "yes") and records everything shown.
#[derive(Default)]
pub struct RecordingPrompt {
  answers: Mutex<VecDeque<bool>>,
  confirmations: Mutex<Vec<String>>,
  notices: Mutex<Vec<(Notice, String)>>,
}

impl RecordingPrompt {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn answering(answers: &[bool]) -> Arc<Self> {
    let prompt = Self::default();
    prompt.answers.lock().extend(answers.iter().copied());
    Arc::new(prompt)
  }

  pub fn confirmations(&self) -> Vec<String> {
    self.confirmations.lock().clone()
  }

  pub fn notices(&self) -> Vec<(Notice, String)> {
    self.notices.lock().clone()
  }

  pub fn errors(&self) -> Vec<String> {
    self.messages_of(Notice::Error)
  }

  pub fn successes(&self) -> Vec<String> {
    self.messages_of(Notice::Success)
  }

  fn messages_of(&self, kind: Notice) -> Vec<String> {
    self
      .notices
      .lock()
      .iter()
      .filter(|(notice, _)| *notice == kind)
      .map(|(_, message)| message.clone())
      .collect()
  }
}

impl Prompt for RecordingPrompt {
  fn confirm(&self, message: &str) -> bool {
    self.confirmations.lock().push(message.to_string());
    self.answers.lock().pop_front().unwrap_or(true)
  }

  fn notify(&self, notice: Notice, message: &str) {
    self.notices.lock().push((notice, message.to_string()));
  }
}

#[derive(Default)]
pub struct RecordingNavigator {
  routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn routes(&self) -> Vec<Route> {
    self.routes.lock().clone()
  }
}

impl Navigator for RecordingNavigator {
  fn navigate(&self, route: Route) {
    self.routes.lock().push(route);
  }
}
