// storefront_cli/src/commands/cart.rs

use super::{money, settle, Output};
use crate::cli::CartCommand;
use crate::state::AppState;
use storefront::views::{CartBadge, CartPage, ProductDetailPage};
use storefront::Cart;

pub async fn run(state: &AppState, cmd: CartCommand, out: &Output) -> anyhow::Result<()> {
  let badge = CartBadge::attach(&state.store);

  match cmd {
    CartCommand::Show => {
      let page = CartPage::activate(state.store.clone(), state.prompt.clone()).await;
      print_cart(out, page.cart().as_ref())?;
    }
    CartCommand::Add { product_id, quantity } => {
      let page = ProductDetailPage::load(product_id, state.catalog.as_ref(), state.store.clone(), state.prompt.clone()).await?;
      while page.quantity() < quantity {
        let before = page.quantity();
        if page.increase() == before {
          anyhow::bail!(
            "only {} unit(s) of '{}' in stock",
            page.product().stock,
            page.product().name
          );
        }
      }
      settle(page.add_to_cart().await, "Add to cart")?;
      print_cart(out, state.store.current().as_ref())?;
    }
    CartCommand::Set { product_id, quantity } => {
      let page = CartPage::activate(state.store.clone(), state.prompt.clone()).await;
      settle(page.change_quantity(product_id, quantity).await, "Quantity change")?;
      print_cart(out, page.cart().as_ref())?;
    }
    CartCommand::Remove { product_id } => {
      let page = CartPage::activate(state.store.clone(), state.prompt.clone()).await;
      settle(page.remove_item(product_id).await, "Remove")?;
      print_cart(out, page.cart().as_ref())?;
    }
    CartCommand::Clear => {
      let page = CartPage::activate(state.store.clone(), state.prompt.clone()).await;
      settle(page.clear().await, "Clear cart")?;
    }
  }

  tracing::debug!(label = %badge.label(), "header badge");
  Ok(())
}

fn print_cart(out: &Output, cart: Option<&Cart>) -> anyhow::Result<()> {
  out.emit(&cart, || match cart {
    None => println!("Your cart is empty."),
    Some(cart) if cart.is_empty() => println!("Your cart is empty."),
    Some(cart) => {
      println!("{:>6}  {:<32} {:>5} {:>10} {:>10}", "ID", "PRODUCT", "QTY", "PRICE", "SUBTOTAL");
      for item in &cart.items {
        println!(
          "{:>6}  {:<32} {:>5} {:>10} {:>10}",
          item.product_id,
          item.product_name,
          item.quantity,
          money(item.unit_price),
          money(item.subtotal)
        );
      }
      println!("{} unit(s), total {}", cart.unit_count(), money(cart.total));
    }
  })
}
