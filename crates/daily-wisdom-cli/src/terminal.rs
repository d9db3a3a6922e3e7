//! Terminal implementations of the platform seams: a notifier that prints
//! payloads and a permission source that asks on stdin.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Context;
use daily_wisdom_core::models::NotificationPayload;
use daily_wisdom_core::notify::payload::summary;
use daily_wisdom_core::notify::{Notifier, Permission, PermissionSource};

/// Prints notifications to stdout: a summary line, then the payload as JSON.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn show(&self, payload: &NotificationPayload) -> daily_wisdom_core::Result<()> {
        let json = serde_json::to_string_pretty(payload)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "🔔 {}", summary(payload))?;
        writeln!(stdout, "{}", json)?;
        Ok(())
    }
}

/// Asks the user on the terminal. Without a terminal, notifications are unsupported.
#[derive(Default)]
pub struct PromptPermission {
    answered: Option<Permission>,
}

impl PromptPermission {
    pub fn new() -> Self {
        Self { answered: None }
    }

    fn ask() -> anyhow::Result<bool> {
        eprint!("Allow Daily Wisdom to show notifications? [y/N] ");
        io::stderr().flush()?;
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read answer")?;
        Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

impl PermissionSource for PromptPermission {
    fn current(&self) -> Permission {
        if !io::stdin().is_terminal() {
            return Permission::Unsupported;
        }
        self.answered.unwrap_or(Permission::Default)
    }

    fn request(&mut self) -> Permission {
        let answer = match Self::ask() {
            Ok(true) => Permission::Granted,
            Ok(false) => Permission::Denied,
            Err(e) => {
                tracing::warn!(error = %e, "Permission prompt failed");
                Permission::Default
            }
        };
        self.answered = Some(answer);
        answer
    }
}
