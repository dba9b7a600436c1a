use bloodbank_core::{query, validate, BloodBankError};

use crate::app::AppContext;
use crate::cli::{AlertsArgs, CompatibilityArgs, InventoryArgs, StockSubcommand};
use crate::commands::print_json;
use crate::output::{
    adjustment_json, alerts_json, compatibility_json, inventory_json, print_adjustment,
    print_alerts, print_compatibility, print_inventory, Adjustment,
};

pub fn handle_inventory(ctx: &AppContext, args: &InventoryArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let lines = query::inventory_listing(store.document(), ctx.threshold());
    if args.json {
        return print_json(&inventory_json(&lines));
    }
    print_inventory(ctx.ui(), &lines);
    Ok(())
}

pub fn handle_alerts(ctx: &AppContext, args: &AlertsArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let threshold = args.threshold.unwrap_or_else(|| ctx.threshold());
    let alerts = query::low_stock(store.document(), threshold);
    if args.json {
        return print_json(&alerts_json(&alerts));
    }
    print_alerts(ctx.ui(), &alerts);
    Ok(())
}

/// Static table lookup; the data file is not opened.
pub fn handle_compatibility(ctx: &AppContext, args: &CompatibilityArgs) -> anyhow::Result<()> {
    let recipient = validate::blood_type(&args.blood_type).map_err(BloodBankError::from)?;
    if args.json {
        return print_json(&compatibility_json(recipient));
    }
    print_compatibility(ctx.ui(), recipient);
    Ok(())
}

/// Credit or debit stock directly through the ledger.
pub fn handle_stock(ctx: &AppContext, command: &StockSubcommand) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let (args, adjustment) = match command {
        StockSubcommand::Add(args) => {
            let total = store.ledger().credit(&args.blood_type, args.amount)?;
            (args, Adjustment::Added { total })
        }
        StockSubcommand::Remove(args) => {
            let total = store.ledger().debit(&args.blood_type, args.amount)?;
            (args, Adjustment::Removed { total })
        }
    };
    let blood_type = validate::blood_type(&args.blood_type).map_err(BloodBankError::from)?;

    if args.json {
        return print_json(&adjustment_json(blood_type, args.amount, adjustment));
    }
    if !ctx.quiet() {
        print_adjustment(ctx.ui(), blood_type, args.amount, adjustment);
    }
    Ok(())
}
