use bloodbank_core::LoadOutcome;

use crate::app::AppContext;
use crate::ui::{badge, Badge};

/// Create the data file with default stock, or report that it exists.
pub fn handle_init(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    if ctx.quiet() {
        return Ok(());
    }
    let path = ctx.data_path().display();
    let line = match store.load_outcome() {
        LoadOutcome::Created => badge(
            ctx.ui(),
            Badge::Ok,
            &format!(
                "Initialized data file at {} ({} ml per blood type)",
                path,
                store.options().starting_volume
            ),
        ),
        LoadOutcome::Loaded => badge(
            ctx.ui(),
            Badge::Info,
            &format!("Data file already exists at {}", path),
        ),
        LoadOutcome::Recovered { .. } => badge(
            ctx.ui(),
            Badge::Ok,
            &format!("Reinitialized data file at {}", path),
        ),
    };
    println!("{}", line);
    Ok(())
}
