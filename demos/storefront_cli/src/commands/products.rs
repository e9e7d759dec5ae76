// storefront_cli/src/commands/products.rs

use super::{money, Output};
use crate::cli::ProductsCommand;
use crate::state::AppState;
use storefront::gateway::ProductListing;
use storefront::views::ProductDetailPage;
use storefront::Product;

pub async fn run(state: &AppState, cmd: ProductsCommand, out: &Output) -> anyhow::Result<()> {
  match cmd {
    ProductsCommand::List {
      active,
      featured,
      new,
      on_sale,
      category,
    } => {
      let listing = match (category, active, featured, new, on_sale) {
        (Some(id), ..) => ProductListing::Category(id),
        (_, true, ..) => ProductListing::Active,
        (_, _, true, ..) => ProductListing::Featured,
        (_, _, _, true, _) => ProductListing::New,
        (_, _, _, _, true) => ProductListing::OnSale,
        _ => ProductListing::All,
      };
      let products = state.catalog.list_products(&listing).await?;
      out.emit(&products, || print_products(&products))
    }
    ProductsCommand::Search { term } => {
      let products = state.catalog.list_products(&ProductListing::Search(term)).await?;
      out.emit(&products, || print_products(&products))
    }
    ProductsCommand::Show { product_id } => {
      let page = ProductDetailPage::load(product_id, state.catalog.as_ref(), state.store.clone(), state.prompt.clone()).await?;
      let product = page.product();
      out.emit(product, || {
        println!("{} (#{})", product.name, product_id);
        if let Some(description) = &product.description {
          println!("{}", description);
        }
        println!("Price: {}", money(product.effective_price()));
        println!("Stock: {}", product.stock);
      })
    }
    ProductsCommand::Categories { active } => {
      let categories = state.catalog.list_categories(active).await?;
      out.emit(&categories, || {
        for category in &categories {
          println!(
            "{:>6}  {}",
            category.id.map(|id| id.to_string()).unwrap_or_default(),
            category.name
          );
        }
      })
    }
  }
}

fn print_products(products: &[Product]) {
  if products.is_empty() {
    println!("No products found.");
    return;
  }
  println!("{:>6}  {:<32} {:>10} {:>6}", "ID", "NAME", "PRICE", "STOCK");
  for product in products {
    println!(
      "{:>6}  {:<32} {:>10} {:>6}",
      product.id.map(|id| id.to_string()).unwrap_or_default(),
      product.name,
      money(product.effective_price()),
      product.stock
    );
  }
}
