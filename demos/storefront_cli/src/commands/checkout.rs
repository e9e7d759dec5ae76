// storefront_cli/src/commands/checkout.rs

use super::{money, Output};
use crate::cli::CheckoutArgs;
use crate::state::AppState;
use storefront::views::CheckoutPage;

pub async fn run(state: &AppState, args: CheckoutArgs, out: &Output) -> anyhow::Result<()> {
  let page = CheckoutPage::activate(state.checkout_services()).await;

  if let Some(address_id) = args.address {
    page.select_address(address_id)?;
  }
  if let Some(method) = args.payment.as_deref() {
    page.set_payment_method(method)?;
  }
  if let Some(notes) = args.notes {
    page.set_notes(notes);
  }

  let totals = page.totals();
  let address = page
    .selected_address()
    .and_then(|id| page.addresses().into_iter().find(|a| a.id == Some(id)));
  eprintln!("Subtotal: {}", money(totals.subtotal));
  eprintln!("Tax:      {}", money(totals.tax));
  eprintln!("Total:    {}", money(totals.total));
  eprintln!("Payment:  {}", page.payment_method());
  match &address {
    Some(address) => eprintln!("Ship to:  {} ({})", address.full_name, address.one_line()),
    None => eprintln!("Ship to:  (no address selected)"),
  }

  if !state.prompt.confirm(&format!("Place this order for {}?", money(totals.total))) {
    eprintln!("Checkout cancelled.");
    return Ok(());
  }

  let order = page.submit().await?;
  out.emit(&order, || {
    println!("Order {} is {}.", order.display_number(), order.status.label());
  })
}
