use crossterm::style::{Attribute, Color, Stylize};

use crate::config::ProvisionConfig;
use crate::error::Result;

/// Print the resolved provisioning configuration.
///
/// # Errors
///
/// Returns an error if JSON rendering fails.
pub fn run(config: &ProvisionConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("{}", "Provisioning configuration".bold().cyan());
    print_kv("project", format_path(&config.project_dir.display().to_string()));
    print_kv("venv dir", format_path(&config.venv_dir.display().to_string()));
    print_kv("python", config.python.as_str().bold().green().to_string());
    print_kv(
        "extra index",
        config
            .index_url
            .as_str()
            .with(Color::Yellow)
            .attribute(Attribute::Italic)
            .to_string(),
    );
    print_kv(
        "requirements",
        format_path(&config.requirements.display().to_string()),
    );
    print_kv(
        "constraints",
        format_path(&config.constraints.display().to_string()),
    );
    print_kv(
        "scratch dir",
        format_path(&config.scratch_dir().display().to_string()),
    );
    print_kv(
        "cache dir",
        format_path(&config.cache_dir().display().to_string()),
    );
    print_kv(
        "build dir",
        format_path(&config.build_dir().display().to_string()),
    );

    println!("  {}", style_label("env"));
    if config.env.is_empty() {
        println!("    {}", "<none>".attribute(Attribute::Dim));
    } else {
        for (key, value) in &config.env {
            println!(
                "    {}={}",
                key.as_str().bold().green(),
                value.as_str().with(Color::Magenta)
            );
        }
    }

    Ok(())
}

fn print_kv(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style_label(label), value);
}

fn style_label(label: &str) -> String {
    format!("{label}:")
        .with(Color::White)
        .attribute(Attribute::Bold)
        .to_string()
}

fn format_path(path: &str) -> String {
    path.with(Color::Magenta).attribute(Attribute::Dim).to_string()
}
