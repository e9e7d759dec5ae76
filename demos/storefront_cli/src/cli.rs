// storefront_cli/src/cli.rs

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use storefront::config::parse_tax_rate;
use storefront::OrderStatus;

#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Command-line front end for the storefront REST backend")]
pub struct Cli {
  /// Backend base URL (overrides STOREFRONT_API_URL).
  #[arg(long, global = true)]
  pub api_url: Option<String>,

  /// Bearer token (overrides STOREFRONT_API_TOKEN).
  #[arg(long, global = true, env = "STOREFRONT_API_TOKEN", hide_env_values = true)]
  pub token: Option<String>,

  /// Tax rate applied at checkout, e.g. 0.16.
  #[arg(long, global = true, value_parser = parse_tax_rate_arg)]
  pub tax_rate: Option<Decimal>,

  /// Answer "yes" to every confirmation.
  #[arg(short, long, global = true)]
  pub yes: bool,

  /// Print JSON instead of tables.
  #[arg(long, global = true)]
  pub json: bool,

  #[arg(short, long, global = true)]
  pub verbose: bool,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Inspect and edit the cart.
  #[command(subcommand)]
  Cart(CartCommand),

  /// Place an order for the current cart.
  Checkout(CheckoutArgs),

  /// Order history.
  #[command(subcommand)]
  Orders(OrdersCommand),

  /// Browse the catalog.
  #[command(subcommand)]
  Products(ProductsCommand),

  /// Shipping addresses.
  #[command(subcommand)]
  Addresses(AddressesCommand),
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
  Show,
  /// Add a product; quantity is bounded by stock.
  Add {
    product_id: i64,
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    quantity: u32,
  },
  /// Set the quantity of a line already in the cart.
  Set { product_id: i64, quantity: i64 },
  Remove { product_id: i64 },
  Clear,
}

#[derive(Debug, Args)]
pub struct CheckoutArgs {
  /// Shipping address id; the default address is used when omitted.
  #[arg(long)]
  pub address: Option<i64>,

  /// One of efectivo, tarjeta, transferencia.
  #[arg(long)]
  pub payment: Option<String>,

  #[arg(long)]
  pub notes: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
  List {
    /// List every order (admin).
    #[arg(long)]
    all: bool,
    #[arg(long, value_parser = parse_status)]
    status: Option<OrderStatus>,
  },
  Cancel { order_id: i64 },
  /// Change an order's status (admin).
  SetStatus {
    order_id: i64,
    #[arg(value_parser = parse_status)]
    status: OrderStatus,
  },
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
  List {
    #[arg(long, conflicts_with_all = ["featured", "new", "on_sale", "category"])]
    active: bool,
    #[arg(long)]
    featured: bool,
    #[arg(long)]
    new: bool,
    #[arg(long)]
    on_sale: bool,
    #[arg(long)]
    category: Option<i64>,
  },
  Search { term: String },
  Show { product_id: i64 },
  Categories {
    #[arg(long)]
    active: bool,
  },
}

#[derive(Debug, Subcommand)]
pub enum AddressesCommand {
  List,
  /// Make an address the default one.
  SetDefault { address_id: i64 },
  Delete { address_id: i64 },
}

fn parse_tax_rate_arg(raw: &str) -> Result<Decimal, String> {
  parse_tax_rate(raw).map_err(|e| e.to_string())
}

/// Accepts the wire form (`CANCELADA`) or the lowercase label (`cancelada`).
fn parse_status(raw: &str) -> Result<OrderStatus, String> {
  let status = OrderStatus::from(raw.trim().to_uppercase());
  match status {
    OrderStatus::Other(other) => Err(format!(
      "unknown status '{}'; expected one of {}",
      other,
      OrderStatus::KNOWN.iter().map(OrderStatus::as_str).collect::<Vec<_>>().join(", ")
    )),
    known => Ok(known),
  }
}
