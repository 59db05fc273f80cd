//! Shared CLI helpers — banner, menus, boxes, reply printing.

use colored::Colorize;

use ofca_core::ChatResult;
use ofca_providers::{ProviderSpec, PROVIDERS};

/// Draw a rounded box around plain-text lines.
///
/// Width follows the longest line; color is applied to the whole box so
/// line-width math stays on uncolored text.
pub fn draw_box(lines: &[&str]) -> String {
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    out.push_str(&format!("╭{}╮\n", "─".repeat(width + 2)));
    for line in lines {
        let pad = width - line.chars().count();
        out.push_str(&format!("│ {}{} │\n", line, " ".repeat(pad)));
    }
    out.push_str(&format!("╰{}╯", "─".repeat(width + 2)));
    out
}

/// Print the welcome banner.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!(
        "{}  v{}",
        "🌟 OFCA — One Function to Call them All".cyan().bold(),
        version.dimmed()
    );
    println!();
}

/// Print the demo-mode notice box.
pub fn print_demo_notice() {
    let boxed = draw_box(&[
        "Demo Mode Active",
        "Responses are simulated for demonstration",
    ]);
    println!("{}", boxed.yellow());
    println!();
}

/// Print the in-session command help box.
pub fn print_commands() {
    let boxed = draw_box(&[
        "Available Commands:",
        "",
        "--switch   Switch to a different AI provider",
        "--model    Select a different model for current provider",
        "--exit     End chat session",
    ]);
    println!("{}", boxed.cyan());
    println!();
}

/// Print the numbered provider menu.
pub fn print_provider_menu() {
    println!("{}", "Select your AI provider:".bold());
    println!();
    for (index, spec) in PROVIDERS.iter().enumerate() {
        println!(
            "{} 🤖 {}",
            format!("{}.", index + 1).cyan(),
            spec.display_name
        );
    }
    println!();
    println!("{}", "Enter provider name or number:".dimmed());
}

/// Print the numbered model menu for a provider.
pub fn print_model_menu(spec: &ProviderSpec) {
    println!();
    println!("{}", format!("🤖 {} Models", spec.display_name).bold());
    println!("{}", "Select a model or press Enter for default:".dimmed());
    println!();
    let default_id = spec.default_model().id;
    for (index, model) in spec.models.iter().enumerate() {
        let marker = if model.id == default_id {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("{} {}{}", format!("{}.", index + 1).cyan(), model.id, marker);
        println!(
            "   {}",
            format!("{} - {} tokens", model.description, model.context_window).dimmed()
        );
    }
    println!();
}

/// Header line printed above each prompt: timestamp + current model.
pub fn turn_header(timestamp: &str, model: &str) -> String {
    format!(
        "{} {}",
        format!("[{timestamp}]").dimmed(),
        model.cyan().bold()
    )
}

/// Print an assistant reply, marking simulated ones.
pub fn print_reply(display_name: &str, result: &ChatResult) {
    println!();
    if result.is_demo {
        println!("{} {}", display_name.green().bold(), "(demo)".yellow());
    } else {
        println!("{}", display_name.green().bold());
    }
    println!("{}", result.content);
    println!();
}

/// Print an error box. The transcript is rolled back by the caller.
pub fn print_error_box(message: &str) {
    let line = format!("❌ Error: {message}");
    println!("{}", draw_box(&[line.as_str()]).red());
}

/// Print a dimmed informational notice.
pub fn print_notice(message: &str) {
    println!("{}", format!("ℹ️ {message}").yellow());
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
