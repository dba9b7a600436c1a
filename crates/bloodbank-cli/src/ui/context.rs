//! UI context for environment detection.

use std::io::IsTerminal;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether stdout is a TTY
    pub is_tty: bool,
    /// Whether color output is enabled
    pub color: bool,
}

impl UiContext {
    /// Detect from the environment. Color is off when stdout is not a
    /// terminal, `NO_COLOR` is set, or `TERM=dumb`.
    pub fn detect() -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();
        Self {
            is_tty,
            color: is_tty && !no_color_env && !term_is_dumb,
        }
    }

    /// Plain context with no styling.
    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            is_tty: false,
            color: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_has_no_color() {
        let ctx = UiContext::plain();
        assert!(!ctx.color);
        assert!(!ctx.is_tty);
    }
}
