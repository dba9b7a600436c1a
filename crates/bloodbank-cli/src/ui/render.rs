//! Rendering helpers: badges, headers, tables.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;

use super::context::UiContext;
use super::theme::Badge;

/// Render a status line with a leading badge.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let text = kind.text();
    let styled = if ctx.color {
        match kind {
            Badge::Ok => text.green().to_string(),
            Badge::Warn => text.yellow().to_string(),
            Badge::Err => text.red().to_string(),
            Badge::Info => text.cyan().to_string(),
        }
    } else {
        text.to_string()
    };

    if message.is_empty() {
        styled
    } else {
        format!("{} {}", styled, message)
    }
}

/// Render a section header.
pub fn header(ctx: &UiContext, title: &str) -> String {
    if ctx.color {
        format!("{}", title.bold())
    } else {
        format!("== {} ==", title)
    }
}

/// Render a key-value pair.
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.color {
        format!("{}: {}", key.dimmed(), value)
    } else {
        format!("{}: {}", key, value)
    }
}

/// Render a table. Pretty on a terminal, space-separated rows otherwise.
pub fn table(ctx: &UiContext, headers: &[&str], rows: &[Vec<String>]) -> String {
    if !ctx.is_tty {
        return rows
            .iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| {
            let cell = Cell::new(h);
            if ctx.color {
                cell.add_attribute(Attribute::Bold)
            } else {
                cell
            }
        })
        .collect();
    table.set_header(header_cells);
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Format an error message with optional hint.
///
/// Terminal: "[ERR] message" with optional "Hint: ..." on the next line.
/// Piped: "error=message" with optional "hint=suggestion".
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();

    if ctx.is_tty {
        lines.push(badge(ctx, Badge::Err, message));
        if let Some(h) = error_hint {
            lines.push(format!("Hint: {}", h));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(format!("hint={}", h));
        }
    }

    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_plain() {
        let ctx = UiContext::plain();
        assert_eq!(badge(&ctx, Badge::Warn, "low"), "[WARN] low");
        assert_eq!(badge(&ctx, Badge::Ok, ""), "[OK]");
    }

    #[test]
    fn test_error_message_plain() {
        let ctx = UiContext::plain();
        assert_eq!(
            error_message(&ctx, "bad type", Some("use A+")),
            "error=bad type\nhint=use A+"
        );
    }

    #[test]
    fn test_table_plain_rows() {
        let ctx = UiContext::plain();
        let rows = vec![
            vec!["A+".to_string(), "2000".to_string()],
            vec!["O-".to_string(), "0".to_string()],
        ];
        assert_eq!(table(&ctx, &["Type", "Amount"], &rows), "A+ 2000\nO- 0");
    }
}
