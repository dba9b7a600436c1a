use bloodbank_core::records::{record_request, RequestForm};

use crate::app::AppContext;
use crate::cli::RequestArgs;
use crate::commands::print_json;
use crate::helpers::{prompt_amount, prompt_blood_type, prompt_identity, Prompter};
use crate::output::{print_request, request_json};

/// Debit stock for a patient and record the request.
pub fn handle_request(ctx: &AppContext, args: &RequestArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let prompter = Prompter::new(args.no_input);

    let identity = prompt_identity(&prompter, &args.identity)?;
    let amount = prompt_amount(&prompter, args.amount, "Required amount (ml)")?;
    let blood_type = prompt_blood_type(&prompter, args.blood_type.clone())?;

    let receipt = record_request(
        &mut store,
        RequestForm {
            identity,
            amount,
            blood_type,
        },
    )?;

    if args.json {
        return print_json(&request_json(&receipt));
    }
    if !ctx.quiet() {
        print_request(ctx.ui(), &receipt);
    }
    Ok(())
}
