// storefront_cli/src/commands/orders.rs

use super::{money, settle, Output};
use crate::cli::OrdersCommand;
use crate::state::AppState;
use storefront::views::OrderHistoryPage;
use storefront::Order;

pub async fn run(state: &AppState, cmd: OrdersCommand, out: &Output) -> anyhow::Result<()> {
  match cmd {
    OrdersCommand::List { all, status } => {
      let page = OrderHistoryPage::activate(state.orders.clone(), state.prompt.clone(), all).await;
      page.filter_by_status(status);
      let orders = page.visible();
      out.emit(&orders, || print_orders(&orders))
    }
    OrdersCommand::Cancel { order_id } => {
      let page = OrderHistoryPage::activate(state.orders.clone(), state.prompt.clone(), false).await;
      settle(page.cancel(order_id).await, "Cancellation")
    }
    OrdersCommand::SetStatus { order_id, status } => {
      let page = OrderHistoryPage::activate(state.orders.clone(), state.prompt.clone(), true).await;
      settle(page.change_status(order_id, status).await, "Status change")
    }
  }
}

fn print_orders(orders: &[Order]) {
  if orders.is_empty() {
    println!("No orders.");
    return;
  }
  println!("{:>6}  {:<12} {:<12} {:>5} {:>10}", "ID", "NUMBER", "STATUS", "UNITS", "TOTAL");
  for order in orders {
    println!(
      "{:>6}  {:<12} {:<12} {:>5} {:>10}",
      order.id.map(|id| id.to_string()).unwrap_or_default(),
      order.display_number(),
      order.status.label(),
      order.unit_count(),
      money(order.total)
    );
  }
}
