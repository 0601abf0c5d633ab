//! Init command implementation
//!
//! Scaffolds `workorder.toml` and `.env.example` in a directory.

use super::output::Output;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug, PartialEq, Eq)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// workorder.toml already exists
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// LLM provider to configure (ollama or openai)
    pub provider: String,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.header("Initializing work-order crew");

    if !matches!(config.provider.as_str(), "ollama" | "openai") {
        let message = format!(
            "Unknown provider '{}', expected 'ollama' or 'openai'",
            config.provider
        );
        output.error(&message);
        return InitResult::Error(message);
    }

    let base_path = &config.path;
    if let Err(e) = fs::create_dir_all(base_path) {
        output.error(&format!("Failed to create {}: {}", base_path.display(), e));
        return InitResult::Error(e.to_string());
    }

    let config_path = base_path.join("workorder.toml");
    if config_path.exists() && !config.force {
        output.warning("workorder.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    let files = [
        ("config", "workorder.toml", generate_workorder_toml(&config)),
        ("env", ".env.example", generate_env_example()),
    ];
    for (kind, name, content) in &files {
        if let Err(e) = write_file(&base_path.join(name), content, config.force) {
            output.error(&format!("Failed to create {}: {}", name, e));
            return InitResult::Error(e.to_string());
        }
        output.created(kind, name);
    }

    let gitignore_path = base_path.join(".gitignore");
    if gitignore_path.exists() {
        output.skipped(".gitignore", "already exists");
    } else if let Err(e) = write_file(&gitignore_path, GITIGNORE, false) {
        output.warning(&format!("Failed to create .gitignore: {}", e));
    } else {
        output.created("file", ".gitignore");
    }

    output.success("Project initialized");
    output.header("Next Steps");
    output.info("1. Set up environment variables:");
    output.command("cp .env.example .env");
    if config.provider == "ollama" {
        output.info("2. Start Ollama and pull the model:");
        output.command("ollama serve");
        output.command("ollama pull llama3.2");
    } else {
        output.info("2. Set OPENAI_API_KEY in .env");
    }
    output.info("3. Put the inspection report next to workorder.toml and run:");
    output.command("workorder");

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    fs::write(path, content)
}

fn generate_workorder_toml(config: &InitConfig) -> String {
    let provider_section = if config.provider == "openai" {
        r#"# OpenAI-compatible API (key read from the named environment variable)
[provider]
type = "openai"
api_key_env = "OPENAI_API_KEY"
api_base = "https://api.openai.com/v1"
model = "gpt-4o-mini""#
    } else {
        r#"# Local Ollama server
[provider]
type = "ollama"
base_url = "http://localhost:11434"
model = "llama3.2""#
    };

    format!(
        r#"# Work-order crew configuration

{provider_section}

[model]
temperature = 0.2
max_tokens = 1024

[document]
path = "example_home_inspection.pdf"

[retrieval]
chunk_size = 1000
chunk_overlap = 200
top_k = 5
min_score = 0.0

[crew]
stage_timeout_secs = 120

[logging]
level = "info"
format = "pretty"
"#
    )
}

fn generate_env_example() -> String {
    r#"# Copy this file to .env and fill in the values.

# Required for the openai provider
# OPENAI_API_KEY=sk-...

# Optional: overrides [logging] level
# RUST_LOG=workorder=debug
"#
    .to_string()
}

const GITIGNORE: &str = r#"# Environment
.env
.env.local

# Rust
/target/
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::toml_config::{ProviderConfig, WorkorderConfig};
    use tempfile::TempDir;

    fn init_config(temp_dir: &TempDir, provider: &str) -> InitConfig {
        InitConfig {
            path: temp_dir.path().to_path_buf(),
            force: false,
            provider: provider.to_string(),
        }
    }

    #[test]
    fn test_generated_ollama_config_parses() {
        let temp_dir = TempDir::new().unwrap();
        let content = generate_workorder_toml(&init_config(&temp_dir, "ollama"));
        let config: WorkorderConfig = content.parse().unwrap();
        assert!(matches!(config.provider, ProviderConfig::Ollama { .. }));
        assert_eq!(config.crew.stage_timeout_secs, 120);
    }

    #[test]
    fn test_generated_openai_config_names_env_var() {
        let temp_dir = TempDir::new().unwrap();
        let content = generate_workorder_toml(&init_config(&temp_dir, "openai"));
        assert!(content.contains("type = \"openai\""));
        assert!(content.contains("api_key_env = \"OPENAI_API_KEY\""));
    }

    #[test]
    fn test_init_creates_files() {
        let temp_dir = TempDir::new().unwrap();
        let result = run(init_config(&temp_dir, "ollama"), &Output::no_color());

        assert_eq!(result, InitResult::Success);
        assert!(temp_dir.path().join("workorder.toml").exists());
        assert!(temp_dir.path().join(".env.example").exists());
        assert!(temp_dir.path().join(".gitignore").exists());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("workorder.toml"), "# mine").unwrap();

        let result = run(init_config(&temp_dir, "ollama"), &Output::no_color());
        assert_eq!(result, InitResult::AlreadyExists);
        let content = fs::read_to_string(temp_dir.path().join("workorder.toml")).unwrap();
        assert_eq!(content, "# mine");
    }

    #[test]
    fn test_init_force_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("workorder.toml"), "# mine").unwrap();

        let mut config = init_config(&temp_dir, "openai");
        config.force = true;
        assert_eq!(run(config, &Output::no_color()), InitResult::Success);

        let content = fs::read_to_string(temp_dir.path().join("workorder.toml")).unwrap();
        assert!(content.contains("type = \"openai\""));
    }

    #[test]
    fn test_init_rejects_unknown_provider() {
        let temp_dir = TempDir::new().unwrap();
        let result = run(init_config(&temp_dir, "anthropic"), &Output::no_color());
        assert!(matches!(result, InitResult::Error(_)));
        assert!(!temp_dir.path().join("workorder.toml").exists());
    }
}
