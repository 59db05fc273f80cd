//! Interactive chat session — provider/model selection and the turn loop.
//!
//! Uses `rustyline` for readline-style editing with persistent history.
//! A failed turn prints its error and is removed from the transcript, so
//! the next request never carries a question that got no answer.

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use ofca_core::{ChatRequest, Message};
use ofca_providers::{registry, Dispatcher, ProviderSpec, PROVIDERS};

use crate::helpers;

/// In-session commands (case-insensitive match).
const CMD_SWITCH: &str = "--switch";
const CMD_MODEL: &str = "--model";
const CMD_EXIT: &str = "--exit";

/// Session-wide settings taken from the command line.
pub struct SessionOptions {
    pub demo: bool,
    pub system: Option<String>,
    pub max_tokens: Option<u32>,
}

/// Run the interactive chat session.
pub async fn run(options: SessionOptions) -> Result<()> {
    helpers::print_banner();
    if options.demo {
        helpers::print_demo_notice();
    }
    helpers::print_commands();

    let mut editor = create_editor()?;
    let dispatcher = Dispatcher::new();

    let mut provider = select_provider(&mut editor)?;
    let mut model = select_model(&mut editor, provider)?;
    let mut transcript: Vec<Message> = Vec::new();

    loop {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        println!("{}", helpers::turn_header(&timestamp, &model));

        let input = match editor.readline("❯ ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                // Ctrl-C / Ctrl-D — exit cleanly
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed.to_lowercase().as_str() {
            CMD_SWITCH => {
                provider = select_provider(&mut editor)?;
                model = select_model(&mut editor, provider)?;
                continue;
            }
            CMD_MODEL => {
                model = select_model(&mut editor, provider)?;
                continue;
            }
            CMD_EXIT => {
                println!("\n{}", "Thanks for using OFCA! Goodbye! 👋".cyan());
                break;
            }
            _ => {}
        }

        let _ = editor.add_history_entry(&input);

        transcript.push(Message::user(trimmed));
        let request = build_request(provider, &model, &transcript, &options);

        debug!(provider = provider.id, model = %model, "sending turn");
        match dispatcher.dispatch_or_demo(&request, options.demo).await {
            Ok(result) => {
                helpers::print_reply(provider.display_name, &result);
                transcript.push(Message::assistant(result.content));
            }
            Err(e) => {
                helpers::print_error_box(&e.to_string());
                // Failed turns don't stay in the transcript.
                transcript.pop();
            }
        }
    }

    save_history(&mut editor);
    Ok(())
}

/// Assemble the request for the current turn. The running transcript is
/// cloned so the dispatch path never owns session state.
fn build_request(
    provider: &ProviderSpec,
    model: &str,
    transcript: &[Message],
    options: &SessionOptions,
) -> ChatRequest {
    let mut request = ChatRequest::new(provider.id, transcript.to_vec()).with_model(model);
    if let Some(system) = &options.system {
        request = request.with_system(system.clone());
    }
    if let Some(max_tokens) = options.max_tokens {
        request = request.with_max_tokens(max_tokens);
    }
    request
}

// ─────────────────────────────────────────────
// Provider / model selection
// ─────────────────────────────────────────────

fn select_provider(editor: &mut Editor<(), DefaultHistory>) -> Result<&'static ProviderSpec> {
    helpers::print_provider_menu();
    let choice = read_selection(editor)?;
    Ok(match match_provider_choice(&choice) {
        Some(spec) => spec,
        None => {
            helpers::print_notice("Invalid selection. Using default provider.");
            registry::default_provider()
        }
    })
}

fn select_model(
    editor: &mut Editor<(), DefaultHistory>,
    provider: &ProviderSpec,
) -> Result<String> {
    helpers::print_model_menu(provider);
    let choice = read_selection(editor)?;
    Ok(match match_model_choice(provider, &choice) {
        Some(model) => model,
        None => {
            helpers::print_notice("Invalid selection. Using default model.");
            provider.default_model().id.to_string()
        }
    })
}

fn read_selection(editor: &mut Editor<(), DefaultHistory>) -> Result<String> {
    match editor.readline("> ") {
        Ok(line) => Ok(line.trim().to_string()),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

/// Match a provider by 1-based number, id, or display name. Empty input
/// means the default provider; anything unrecognized is `None`.
fn match_provider_choice(choice: &str) -> Option<&'static ProviderSpec> {
    if choice.is_empty() {
        return Some(registry::default_provider());
    }
    if let Ok(n) = choice.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| PROVIDERS.get(i));
    }
    let lower = choice.to_lowercase();
    PROVIDERS
        .iter()
        .find(|s| s.id == lower || s.display_name.to_lowercase() == lower)
}

/// Match a model by 1-based number. Empty input means the provider default.
fn match_model_choice(provider: &ProviderSpec, choice: &str) -> Option<String> {
    if choice.is_empty() {
        return Some(provider.default_model().id.to_string());
    }
    choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| provider.models.get(i))
        .map(|m| m.id.to_string())
}

// ─────────────────────────────────────────────
// Editor / history
// ─────────────────────────────────────────────

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded session history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save history to disk.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// Path to the history file: `~/.ofca/history/cli_history`.
fn history_path() -> std::path::PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".ofca")
        .join("history")
        .join("cli_history")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_choice_by_number() {
        assert_eq!(match_provider_choice("1").unwrap().id, "openai");
        assert_eq!(match_provider_choice("2").unwrap().id, "anthropic");
    }

    #[test]
    fn provider_choice_by_id_or_display_name() {
        assert_eq!(match_provider_choice("mistral").unwrap().id, "mistral");
        assert_eq!(match_provider_choice("OpenRouter").unwrap().id, "openrouter");
    }

    #[test]
    fn provider_choice_empty_means_default() {
        assert_eq!(match_provider_choice("").unwrap().id, "openai");
    }

    #[test]
    fn provider_choice_invalid() {
        assert!(match_provider_choice("99").is_none());
        assert!(match_provider_choice("0").is_none());
        assert!(match_provider_choice("acme").is_none());
    }

    #[test]
    fn model_choice_by_number() {
        let spec = registry::describe("openai").unwrap();
        assert_eq!(match_model_choice(spec, "2").unwrap(), "gpt-4");
    }

    #[test]
    fn model_choice_empty_means_default() {
        let spec = registry::describe("anthropic").unwrap();
        assert_eq!(match_model_choice(spec, "").unwrap(), "claude-2.1");
    }

    #[test]
    fn model_choice_out_of_range() {
        let spec = registry::describe("grok").unwrap();
        assert!(match_model_choice(spec, "5").is_none());
        assert!(match_model_choice(spec, "notanumber").is_none());
    }

    #[test]
    fn history_path_under_home_dir() {
        let path = history_path();
        assert!(path.to_string_lossy().contains(".ofca"));
        assert!(path.to_string_lossy().contains("cli_history"));
    }

    #[test]
    fn build_request_carries_session_options() {
        let spec = registry::describe("openai").unwrap();
        let transcript = vec![Message::user("hi")];
        let options = SessionOptions {
            demo: false,
            system: Some("be brief".to_string()),
            max_tokens: Some(128),
        };
        let request = build_request(spec, "gpt-4", &transcript, &options);
        assert_eq!(request.provider_id, "openai");
        assert_eq!(request.model_id.as_deref(), Some("gpt-4"));
        assert_eq!(request.system_message.as_deref(), Some("be brief"));
        assert_eq!(request.max_tokens, Some(128));
        assert_eq!(request.transcript.len(), 1);
    }
}
