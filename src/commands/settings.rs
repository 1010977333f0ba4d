use anyhow::Result;

use crate::commands::{AppContext, CommandReport};
use crate::summarizer::message::{Request, Response, dispatch};
use crate::summarizer::settings::{self, mask_api_key};

#[derive(Debug, Clone)]
pub enum SettingsAction {
    Show,
    SetKey { api_key: String, skip_test: bool },
    SetLanguage { language: String },
    TestKey { api_key: Option<String> },
}

fn check_key(ctx: &AppContext, api_key: &str, report: &mut CommandReport) -> Result<bool> {
    let summarizer = ctx.summarizer()?;
    let response = dispatch(
        &ctx.store,
        &summarizer,
        Request::TestApiKey {
            api_key: api_key.to_string(),
        },
    );
    let valid = match response {
        Response::ApiKeyCheck { valid, error } => {
            if let Some(error) = error {
                report.issue(format!("Error testing API key: {error}"));
            }
            valid
        }
        other => {
            report.issue(format!("unexpected response to TEST_API_KEY: {other:?}"));
            false
        }
    };
    Ok(valid)
}

pub fn run(action: &SettingsAction) -> Result<CommandReport> {
    let ctx = AppContext::open()?;

    match action {
        SettingsAction::Show => {
            let mut report = CommandReport::new("config-show");
            let current = settings::load(&ctx.store)?;
            match current.api_key.as_deref() {
                Some(key) => report.detail(format!("api_key={}", mask_api_key(key))),
                None => report.detail("api_key=<not set>"),
            }
            report.detail(format!("language={}", current.language));
            report.detail(format!("api_base_url={}", ctx.config.gemini.api_base_url));
            report.detail(format!("model={}", ctx.config.gemini.model));
            report.detail(format!(
                "request_timeout_secs={}",
                ctx.config.gemini.request_timeout_secs
            ));
            report.detail(format!("settings_file={}", ctx.paths.settings_file.display()));
            report.detail(format!("config_file={}", ctx.paths.config_file.display()));
            Ok(report)
        }
        SettingsAction::SetKey { api_key, skip_test } => {
            let mut report = CommandReport::new("config-set-key");
            let api_key = api_key.trim();
            if api_key.is_empty() {
                report.issue("Please enter an API key");
                return Ok(report);
            }
            if !skip_test {
                if !check_key(&ctx, api_key, &mut report)? {
                    report.issue("API key is invalid. Please check and try again.");
                    return Ok(report);
                }
                report.detail("API key is valid!");
            }
            settings::save_api_key(&ctx.store, api_key)?;
            report.detail(format!("saved api_key={}", mask_api_key(api_key)));
            Ok(report)
        }
        SettingsAction::SetLanguage { language } => {
            let mut report = CommandReport::new("config-set-language");
            if language.trim().is_empty() {
                report.issue("language cannot be empty");
                return Ok(report);
            }
            settings::save_language(&ctx.store, language)?;
            report.detail(format!("saved language={}", language.trim()));
            Ok(report)
        }
        SettingsAction::TestKey { api_key } => {
            let mut report = CommandReport::new("config-test-key");
            let key = match api_key {
                Some(key) => Some(key.trim().to_string()),
                None => settings::load(&ctx.store)?.api_key,
            };
            let Some(key) = key.filter(|k| !k.is_empty()) else {
                report.issue("Please enter an API key");
                return Ok(report);
            };
            if check_key(&ctx, &key, &mut report)? {
                report.detail("API key is valid!");
            } else if report.issues.is_empty() {
                report.issue("API key is invalid. Please check and try again.");
            }
            Ok(report)
        }
    }
}
