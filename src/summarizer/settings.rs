use crate::summarizer::store::{KeyValueStore, Scope};
use anyhow::Result;
use serde_json::Value;

pub const API_KEY_KEY: &str = "geminiApiKey";
pub const LANGUAGE_KEY: &str = "summaryLanguage";
pub const DEFAULT_LANGUAGE: &str = "English";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub language: String,
}

fn non_empty_string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

pub fn load(store: &dyn KeyValueStore) -> Result<Settings> {
    let api_key = non_empty_string(store.get(Scope::Sync, API_KEY_KEY)?);
    let language = non_empty_string(store.get(Scope::Sync, LANGUAGE_KEY)?)
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    Ok(Settings { api_key, language })
}

pub fn save_api_key(store: &dyn KeyValueStore, api_key: &str) -> Result<()> {
    store.set(
        Scope::Sync,
        API_KEY_KEY,
        Value::String(api_key.trim().to_string()),
    )
}

pub fn save_language(store: &dyn KeyValueStore, language: &str) -> Result<()> {
    store.set(
        Scope::Sync,
        LANGUAGE_KEY,
        Value::String(language.trim().to_string()),
    )
}

/// `abcd…wxyz` style preview that never prints the whole credential.
pub fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}
