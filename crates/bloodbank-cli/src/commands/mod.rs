pub mod donate;
pub mod init;
pub mod misc;
pub mod query;
pub mod request;
pub mod staff;
pub mod stock;

/// Print a JSON value to stdout.
pub(crate) fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
