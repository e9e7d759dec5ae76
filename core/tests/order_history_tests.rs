// tests/order_history_tests.rs
mod common;

use common::*;
use serial_test::serial;
use std::sync::Arc;
use storefront::views::OrderHistoryPage;
use storefront::{ActionOutcome, Notice, OrderStatus};

fn mixed_orders() -> Vec<storefront::Order> {
  let mut foreign = sample_order(3, OrderStatus::Shipped, &[1]);
  foreign.user_id = Some(2);
  vec![
    sample_order(1, OrderStatus::Pending, &[2, 1]),
    sample_order(2, OrderStatus::Delivered, &[4]),
    foreign,
  ]
}

async fn page(orders: &Arc<FakeOrderGateway>, prompt: &Arc<RecordingPrompt>, admin: bool) -> OrderHistoryPage {
  OrderHistoryPage::activate(orders.clone(), prompt.clone(), admin).await
}

#[tokio::test]
#[serial]
async fn test_customer_sees_own_orders_only() {
  setup_tracing();
  let orders = FakeOrderGateway::with_orders(mixed_orders());
  let page = page(&orders, &RecordingPrompt::new(), false).await;

  assert!(!page.is_admin());
  assert_eq!(orders.calls(), vec!["list_mine"]);
  let ids: Vec<_> = page.all().iter().filter_map(|o| o.id).collect();
  assert_eq!(ids, vec![1, 2]);
  assert_eq!(page.all()[0].unit_count(), 3);
}

#[tokio::test]
#[serial]
async fn test_admin_sees_every_order() {
  setup_tracing();
  let orders = FakeOrderGateway::with_orders(mixed_orders());
  let page = page(&orders, &RecordingPrompt::new(), true).await;

  assert_eq!(orders.calls(), vec!["list_all"]);
  assert_eq!(page.all().len(), 3);
}

#[tokio::test]
#[serial]
async fn test_status_filter_narrows_visible_orders() {
  setup_tracing();
  let orders = FakeOrderGateway::with_orders(mixed_orders());
  let page = page(&orders, &RecordingPrompt::new(), true).await;

  page.filter_by_status(Some(OrderStatus::Delivered));
  assert_eq!(page.filter(), Some(OrderStatus::Delivered));
  let visible = page.visible();
  assert_eq!(visible.len(), 1);
  assert_eq!(visible[0].id, Some(2));

  page.filter_by_status(None);
  assert_eq!(page.visible().len(), 3);
}

#[tokio::test]
#[serial]
async fn test_failed_load_is_notified() {
  setup_tracing();
  let orders = FakeOrderGateway::with_orders(mixed_orders());
  orders.fail("list_mine");
  let prompt = RecordingPrompt::new();
  let page = page(&orders, &prompt, false).await;

  assert!(page.all().is_empty());
  assert_eq!(prompt.errors(), vec!["Could not load orders: list_mine failed".to_string()]);
}

#[tokio::test]
#[serial]
async fn test_cancel_requires_confirmation() {
  setup_tracing();
  let orders = FakeOrderGateway::with_orders(mixed_orders());
  let prompt = RecordingPrompt::answering(&[false, true]);
  let page = page(&orders, &prompt, false).await;

  assert_eq!(page.cancel(1).await, ActionOutcome::Declined);
  assert_eq!(orders.call_count("update_status"), 0);

  assert_eq!(page.cancel(1).await, ActionOutcome::Applied);
  assert_eq!(orders.status_of(1), Some(OrderStatus::Cancelled));
  assert_eq!(prompt.successes(), vec!["Order cancelled.".to_string()]);
  // Reloaded after the change.
  assert_eq!(orders.call_count("list_mine"), 2);
  assert_eq!(page.all()[0].status, OrderStatus::Cancelled);
}

#[tokio::test]
#[serial]
async fn test_failed_cancel_keeps_list() {
  setup_tracing();
  let orders = FakeOrderGateway::with_orders(mixed_orders());
  let prompt = RecordingPrompt::new();
  let page = page(&orders, &prompt, false).await;
  orders.fail("update_status");

  assert_eq!(page.cancel(1).await, ActionOutcome::Failed);
  assert_eq!(orders.call_count("list_mine"), 1);
  assert_eq!(page.all()[0].status, OrderStatus::Pending);
  assert_eq!(prompt.errors().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_change_status_reloads_on_success_and_failure() {
  setup_tracing();
  let orders = FakeOrderGateway::with_orders(mixed_orders());
  let prompt = RecordingPrompt::new();
  let page = page(&orders, &prompt, true).await;

  assert_eq!(page.change_status(3, OrderStatus::Delivered).await, ActionOutcome::Applied);
  assert_eq!(orders.call_count("list_all"), 2);
  assert_eq!(orders.status_of(3), Some(OrderStatus::Delivered));

  orders.fail("update_status");
  assert_eq!(page.change_status(2, OrderStatus::Returned).await, ActionOutcome::Failed);
  assert_eq!(orders.call_count("list_all"), 3);
  assert_eq!(orders.status_of(2), Some(OrderStatus::Delivered));

  assert_eq!(prompt.confirmations().len(), 2);
  let notices = prompt.notices();
  assert_eq!(notices[0], (Notice::Success, "Status updated.".to_string()));
  assert_eq!(notices[1].0, Notice::Error);
  assert!(notices[1].1.contains("update_status failed"));
}

#[tokio::test]
#[serial]
async fn test_change_status_requires_confirmation() {
  setup_tracing();
  let orders = FakeOrderGateway::with_orders(mixed_orders());
  let prompt = RecordingPrompt::answering(&[false]);
  let page = page(&orders, &prompt, true).await;

  assert_eq!(page.change_status(1, OrderStatus::Shipped).await, ActionOutcome::Declined);

  let confirmations = prompt.confirmations();
  assert_eq!(confirmations.len(), 1);
  assert!(confirmations[0].contains("ORD-0001"));
  assert!(confirmations[0].contains(OrderStatus::Shipped.label()));
  assert_eq!(orders.call_count("update_status"), 0);
  assert_eq!(orders.call_count("list_all"), 1);
  assert_eq!(orders.status_of(1), Some(OrderStatus::Pending));
  assert!(prompt.notices().is_empty());
}
