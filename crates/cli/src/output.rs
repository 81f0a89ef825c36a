use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Pretty-print `value` to stdout, or to `path` (parent directories are created).
pub fn emit(value: &Value, path: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match path {
        None => {
            println!("{text}");
            Ok(())
        }
        Some(path) => write_json(path, &text),
    }
}

fn write_json(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = text.len(), "wrote result");
    Ok(())
}

/// Build revision baked in at compile time, or from the environment.
pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    match std::env::var("GIT_COMMIT") {
        Ok(rev) if !rev.is_empty() => rev,
        _ => "unknown".to_string(),
    }
}
