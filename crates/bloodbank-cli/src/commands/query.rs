use bloodbank_core::query;

use crate::app::AppContext;
use crate::cli::{HistoryArgs, LogsArgs, ReportArgs, SearchArgs};
use crate::commands::print_json;
use crate::constants::DEFAULT_LOG_LIMIT;
use crate::helpers::parse_collection;
use crate::output::{logs_json, print_logs, print_records, print_report, records_json};

pub fn handle_search(ctx: &AppContext, args: &SearchArgs) -> anyhow::Result<()> {
    let collection = parse_collection(&args.collection)?;
    let mut store = ctx.open_store()?;
    let results = query::search(&mut store, collection, &args.term)?;
    if args.json {
        return print_json(&records_json(&results));
    }
    print_records(ctx.ui(), &results);
    Ok(())
}

pub fn handle_history(ctx: &AppContext, args: &HistoryArgs) -> anyhow::Result<()> {
    let collection = parse_collection(&args.collection)?;
    let mut store = ctx.open_store()?;
    let records = query::history(&mut store, collection)?;
    if args.json {
        return print_json(&records_json(&records));
    }
    print_records(ctx.ui(), &records);
    Ok(())
}

pub fn handle_report(ctx: &AppContext, args: &ReportArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let report = query::generate_report(&mut store, ctx.threshold())?;
    if args.json {
        return print_json(&serde_json::to_value(&report)?);
    }
    print_report(ctx.ui(), &report);
    Ok(())
}

/// Show the tail of the audit log. Viewing the log is not itself logged.
pub fn handle_logs(ctx: &AppContext, args: &LogsArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let logs = store.document().logs();
    let limit = args.limit.unwrap_or(DEFAULT_LOG_LIMIT);
    let start = if limit == 0 {
        0
    } else {
        logs.len().saturating_sub(limit)
    };
    let tail = &logs[start..];
    if args.json {
        return print_json(&logs_json(tail));
    }
    print_logs(ctx.ui(), tail);
    Ok(())
}
