use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";

/// ANSI color codes for report output; all empty when colors are off.
#[derive(Clone, Copy)]
pub struct Colors {
    pub header: &'static str,
    pub key: &'static str,
    pub muted: &'static str,
    enabled: bool,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        if enabled {
            Self {
                header: "\x1b[1;36m", // Bold cyan
                key: "\x1b[32m",      // Green
                muted: "\x1b[2m",     // Dim
                enabled: true,
            }
        } else {
            Self {
                header: "",
                key: "",
                muted: "",
                enabled: false,
            }
        }
    }

    pub fn reset(&self) -> &'static str {
        if self.enabled {
            RESET
        } else {
            ""
        }
    }
}

pub fn should_use_colors(force_color: bool, no_color: bool) -> bool {
    // Priority: --no-color > --color > NO_COLOR env > TTY detection
    if no_color {
        return false;
    }
    if force_color {
        return true;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    io::stdout().is_terminal()
}
