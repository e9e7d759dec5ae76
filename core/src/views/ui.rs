// storefront/src/views/ui.rs

//! Seams to the front end: dismissible notifications, confirmations and navigation.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
  Info,
  Success,
  Error,
}

/// Interactive primitives a front end supplies to the views.
pub trait Prompt: Send + Sync {
  /// Asks a yes/no question. `false` aborts the pending action.
  fn confirm(&self, message: &str) -> bool;

  /// Shows a dismissible notification.
  fn notify(&self, notice: Notice, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
  Shop,
  Cart,
  Checkout,
  OrderHistory,
  Product(i64),
}

impl Route {
  pub fn path(&self) -> String {
    match self {
      Route::Shop => "/tienda".to_string(),
      Route::Cart => "/carrito".to_string(),
      Route::Checkout => "/checkout".to_string(),
      Route::OrderHistory => "/mis-ordenes".to_string(),
      Route::Product(id) => format!("/producto/{}", id),
    }
  }
}

impl fmt::Display for Route {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.path())
  }
}

pub trait Navigator: Send + Sync {
  fn navigate(&self, route: Route);
}
