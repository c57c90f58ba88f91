//! Handoff store subcommand handlers for owner-capture.

use capture_handoff::HandoffStore;

use crate::cli::StoreAction;

/// Handle store subcommands.
pub(crate) async fn handle_store_command(
    action: StoreAction,
    store: HandoffStore,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StoreAction::Show => {
            let state = store.snapshot().await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        StoreAction::Clear => {
            store.reset().await?;
            println!("Handoff state cleared.");
        }
    }
    Ok(())
}
