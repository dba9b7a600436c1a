use bloodbank_core::records::register_staff;

use crate::app::AppContext;
use crate::cli::StaffArgs;
use crate::helpers::{prompt_identity, Prompter};
use crate::ui::{badge, Badge};

pub fn handle_staff(ctx: &AppContext, args: &StaffArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let prompter = Prompter::new(args.no_input);

    let identity = prompt_identity(&prompter, &args.identity)?;
    let staff = register_staff(&mut store, identity)?;

    if !ctx.quiet() {
        println!(
            "{}",
            badge(
                ctx.ui(),
                Badge::Ok,
                &format!("Registered staff member {} (ID: {})", staff.name, staff.id),
            )
        );
    }
    Ok(())
}
