use crossterm::style::Stylize;

/// Minimal helper for consistent CLI output.
pub fn step(message: impl AsRef<str>) {
    eprintln!("{} {}", "==>".bold().cyan(), message.as_ref());
}

/// Print a detail line associated with the latest step.
pub fn detail(message: impl AsRef<str>) {
    eprintln!("    {}", message.as_ref());
}

/// Insert a blank line to visually separate sections.
pub fn blank_line() {
    eprintln!();
}
