use std::io;

use clap::Command;
use clap_complete::{Shell, generate};

/// Write a static completion script for the requested shell to stdout.
pub fn run(shell: Shell, command: &mut Command) {
    let name = command.get_name().to_string();
    generate(shell, command, name, &mut io::stdout());
}
