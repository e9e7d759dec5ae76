// storefront/src/views/order_history.rs

use super::ui::{Notice, Prompt};
use super::ActionOutcome;
use crate::gateway::OrderGateway;
use crate::models::{Order, OrderStatus};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[derive(Default)]
struct Listing {
  orders: Vec<Order>,
  filter: Option<OrderStatus>,
}

/// Order list for the signed-in user, or every order for an admin.
pub struct OrderHistoryPage {
  orders: Arc<dyn OrderGateway>,
  prompt: Arc<dyn Prompt>,
  admin: bool,
  listing: Mutex<Listing>,
}

impl OrderHistoryPage {
  pub async fn activate(orders: Arc<dyn OrderGateway>, prompt: Arc<dyn Prompt>, admin: bool) -> Self {
    let page = Self {
      orders,
      prompt,
      admin,
      listing: Mutex::new(Listing::default()),
    };
    page.reload().await;
    page
  }

  pub fn is_admin(&self) -> bool {
    self.admin
  }

  /// Reloads the list. On failure the previous list stays and the user is notified.
  #[instrument(name = "OrderHistoryPage::reload", skip(self), fields(admin = self.admin))]
  pub async fn reload(&self) -> bool {
    let result = if self.admin {
      self.orders.list_all().await
    } else {
      self.orders.list_mine().await
    };
    match result {
      Ok(orders) => {
        event!(Level::DEBUG, count = orders.len(), "orders loaded");
        self.listing.lock().orders = orders;
        true
      }
      Err(e) => {
        self
          .prompt
          .notify(Notice::Error, &format!("Could not load orders: {}", e.user_message()));
        false
      }
    }
  }

  pub fn all(&self) -> Vec<Order> {
    self.listing.lock().orders.clone()
  }

  /// Orders matching the current status filter.
  pub fn visible(&self) -> Vec<Order> {
    let listing = self.listing.lock();
    match &listing.filter {
      None => listing.orders.clone(),
      Some(status) => listing.orders.iter().filter(|o| &o.status == status).cloned().collect(),
    }
  }

  /// `None` shows every order.
  pub fn filter_by_status(&self, status: Option<OrderStatus>) {
    self.listing.lock().filter = status;
  }

  pub fn filter(&self) -> Option<OrderStatus> {
    self.listing.lock().filter.clone()
  }

  /// Cancels an order after confirmation, then reloads on success.
  #[instrument(name = "OrderHistoryPage::cancel", skip(self))]
  pub async fn cancel(&self, order_id: i64) -> ActionOutcome {
    if !self.prompt.confirm("Cancel this order?") {
      return ActionOutcome::Declined;
    }
    match self.orders.update_status(order_id, &OrderStatus::Cancelled).await {
      Ok(_) => {
        self.prompt.notify(Notice::Success, "Order cancelled.");
        self.reload().await;
        ActionOutcome::Applied
      }
      Err(e) => {
        self
          .prompt
          .notify(Notice::Error, &format!("Could not cancel the order: {}", e.user_message()));
        ActionOutcome::Failed
      }
    }
  }

  /// Sets a new status after confirmation. The list is reloaded either way so a
  /// rejected change does not linger on screen.
  #[instrument(name = "OrderHistoryPage::change_status", skip(self, status), fields(status = %status))]
  pub async fn change_status(&self, order_id: i64, status: OrderStatus) -> ActionOutcome {
    let number = self
      .listing
      .lock()
      .orders
      .iter()
      .find(|o| o.id == Some(order_id))
      .map(Order::display_number)
      .unwrap_or_else(|| format!("#{}", order_id));
    let question = format!("Change the status of order {} to \"{}\"?", number, status.label());
    if !self.prompt.confirm(&question) {
      return ActionOutcome::Declined;
    }

    let outcome = match self.orders.update_status(order_id, &status).await {
      Ok(_) => {
        self.prompt.notify(Notice::Success, "Status updated.");
        ActionOutcome::Applied
      }
      Err(e) => {
        self
          .prompt
          .notify(Notice::Error, &format!("Could not update the status: {}", e.user_message()));
        ActionOutcome::Failed
      }
    };
    self.reload().await;
    outcome
  }
}
