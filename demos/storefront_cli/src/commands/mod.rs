// storefront_cli/src/commands/mod.rs

mod addresses;
mod cart;
mod checkout;
mod orders;
mod products;

use crate::cli::Command;
use crate::state::AppState;
use rust_decimal::Decimal;
use serde::Serialize;
use storefront::ActionOutcome;

pub async fn dispatch(state: &AppState, command: Command, json: bool) -> anyhow::Result<()> {
  let out = Output { json };
  match command {
    Command::Cart(cmd) => cart::run(state, cmd, &out).await,
    Command::Checkout(args) => checkout::run(state, args, &out).await,
    Command::Orders(cmd) => orders::run(state, cmd, &out).await,
    Command::Products(cmd) => products::run(state, cmd, &out).await,
    Command::Addresses(cmd) => addresses::run(state, cmd, &out).await,
  }
}

/// Chooses between JSON and human-readable output.
pub(crate) struct Output {
  json: bool,
}

impl Output {
  /// Prints `value` as JSON when requested, otherwise runs `human`.
  pub fn emit<T: Serialize + ?Sized>(&self, value: &T, human: impl FnOnce()) -> anyhow::Result<()> {
    if self.json {
      println!("{}", serde_json::to_string_pretty(value)?);
    } else {
      human();
    }
    Ok(())
  }
}

pub(crate) fn money(amount: Decimal) -> String {
  format!("${:.2}", amount)
}

/// Maps a page action's outcome onto the process result. Failures were already
/// shown to the user by the page.
pub(crate) fn settle(outcome: ActionOutcome, action: &str) -> anyhow::Result<()> {
  match outcome {
    ActionOutcome::Applied => Ok(()),
    ActionOutcome::Declined => {
      eprintln!("{} cancelled.", action);
      Ok(())
    }
    ActionOutcome::Ignored => anyhow::bail!("{} not applied: the request is out of range", action),
    ActionOutcome::Failed => anyhow::bail!("{} failed", action),
  }
}
