use bloodbank_core::records::{record_donation, DonationForm, Eligibility};
use bloodbank_core::{validate, BloodBankError, ValidationError};

use crate::app::AppContext;
use crate::cli::DonateArgs;
use crate::commands::print_json;
use crate::helpers::{parse_date, prompt_amount, prompt_blood_type, prompt_identity, Prompter};
use crate::output::{donation_json, print_donation};

/// Screen the donor, then credit stock and record the donation.
pub fn handle_donate(ctx: &AppContext, args: &DonateArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let prompter = Prompter::new(args.no_input);

    let identity = prompt_identity(&prompter, &args.identity)?;
    let chronic = prompter.chronic_condition(args.chronic_condition)?;
    if chronic {
        // Refuse before asking for anything else; identity errors still win.
        validate::identity(identity).map_err(BloodBankError::from)?;
        return Err(BloodBankError::from(ValidationError::Ineligible).into());
    }
    let amount = prompt_amount(&prompter, args.amount, "Donation amount (ml)")?;
    let donation_date = parse_date(args.date.as_deref(), store.now().date())?;
    let blood_type = prompt_blood_type(&prompter, args.blood_type.clone())?;

    let receipt = record_donation(
        &mut store,
        DonationForm {
            identity,
            eligibility: Eligibility::from_chronic_condition(chronic),
            amount,
            donation_date,
            blood_type,
        },
    )?;

    if args.json {
        return print_json(&donation_json(&receipt));
    }
    if !ctx.quiet() {
        print_donation(ctx.ui(), &receipt);
    }
    Ok(())
}
