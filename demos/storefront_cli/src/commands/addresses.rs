// storefront_cli/src/commands/addresses.rs

use super::Output;
use crate::cli::AddressesCommand;
use crate::state::AppState;
use storefront::Notice;

pub async fn run(state: &AppState, cmd: AddressesCommand, out: &Output) -> anyhow::Result<()> {
  match cmd {
    AddressesCommand::List => {
      let addresses = state.addresses.list_mine().await?;
      out.emit(&addresses, || {
        if addresses.is_empty() {
          println!("No saved addresses.");
        }
        for address in &addresses {
          println!(
            "{:>6}{} {} ({})",
            address.id.map(|id| id.to_string()).unwrap_or_default(),
            if address.is_default { "*" } else { " " },
            address.full_name,
            address.one_line()
          );
        }
      })
    }
    AddressesCommand::SetDefault { address_id } => {
      let address = state.addresses.set_default(address_id).await?;
      state.prompt.notify(Notice::Success, "Default address updated.");
      out.emit(&address, || println!("{}", address.one_line()))
    }
    AddressesCommand::Delete { address_id } => {
      if !state.prompt.confirm("Delete this address?") {
        eprintln!("Delete cancelled.");
        return Ok(());
      }
      state.addresses.delete(address_id).await?;
      state.prompt.notify(Notice::Success, "Address deleted.");
      Ok(())
    }
  }
}
