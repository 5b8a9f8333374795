//! Optional language-model bridge
//!
//! A remote model may propose tasks in the same shape the extractor produces.
//! [`resolve`] tries it first and falls back to the deterministic pipeline
//! whenever the call fails, times out, or yields nothing usable. Failures are
//! logged and never surfaced to the caller.

use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::extract::{
    Assembler, Category, ExtractOptions, Extraction, Extractor, IdGenerator, Priority, TaskDraft,
    dates, title,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const SYSTEM_PROMPT: &str = "You turn free-form notes into a task list. \
Return ONLY a JSON object of the shape \
{\"tasks\":[{\"title\":\"...\",\"priority\":\"high|medium|low\",\
\"category\":\"Work|Personal|Meeting|Finance|Health\",\"due_date\":\"YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS or null\",\
\"assignee\":\"name or null\"}]}. Skip sarcastic remarks. Titles are short imperative phrases without dates.";

/// Chat-style completion client
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

/// Client for an OpenAI-compatible chat completions endpoint
pub struct HttpLlmClient {
    client: reqwest::Client,
    config: LlmConfig,
    api_key: String,
}

impl HttpLlmClient {
    pub fn new(config: LlmConfig, api_key: String) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Http(e.to_string()))?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: String,
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {}", self.api_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer).map_err(|e| LlmError::Http(e.to_string()))?,
        );

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::Response(format!("HTTP {}: {}", status, text)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::Serialization(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::Response("Missing choices".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct CandidatePayload {
    #[serde(default)]
    tasks: Vec<CandidateTask>,
}

#[derive(Debug, Deserialize)]
struct CandidateTask {
    #[serde(default)]
    title: String,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    assignee: Option<String>,
    #[serde(default)]
    original_text: Option<String>,
}

fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("null"))
}

/// Convert a model reply into an extraction
///
/// Titles go through the same cleaner as local fragments, unknown priorities
/// and categories fall back to medium and Work, and malformed due dates are
/// discarded. A reply with no usable task is an error.
pub fn parse_candidate<G: IdGenerator>(
    reply: &str,
    options: &ExtractOptions,
    ids: &mut G,
) -> Result<Extraction, LlmError> {
    let json = extract_json(reply)
        .ok_or_else(|| LlmError::InvalidPayload("reply did not contain JSON".to_string()))?;
    let payload: CandidatePayload =
        serde_json::from_str(json).map_err(|e| LlmError::Serialization(e.to_string()))?;

    let mut assembler = Assembler::new(ids);
    for candidate in payload.tasks {
        let Some(clean_title) = title::clean(&candidate.title) else {
            debug!(title = %candidate.title, "skipping candidate without usable title");
            continue;
        };
        let priority = candidate
            .priority
            .and_then(|p| p.parse::<Priority>().ok())
            .unwrap_or(Priority::medium);
        let category = candidate
            .category
            .and_then(|c| c.parse::<Category>().ok())
            .filter(|c| options.extended_categories || !c.is_extended())
            .unwrap_or(Category::Work);
        let due_date = non_empty(candidate.due_date).and_then(|raw| {
            let valid = dates::validate_due_date(&raw);
            if valid.is_none() {
                debug!(due_date = %raw, "discarding malformed due date");
            }
            valid
        });

        assembler.push(TaskDraft {
            title: clean_title,
            priority,
            category,
            due_date,
            assignee: non_empty(candidate.assignee),
            original_text: non_empty(candidate.original_text).unwrap_or(candidate.title),
        });
    }

    let extraction = assembler.finish();
    if extraction.is_empty() {
        return Err(LlmError::InvalidPayload("no usable tasks".to_string()));
    }
    Ok(extraction)
}

/// Language-model first pass with a hard timeout
pub struct LlmBridge {
    client: Arc<dyn LlmClient>,
    timeout: Duration,
}

impl LlmBridge {
    pub fn new(client: Arc<dyn LlmClient>, timeout_secs: u64) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Build the HTTP bridge when enabled and an API key is available
    pub fn from_config(config: &LlmConfig) -> Result<Option<Self>, LlmError> {
        if !config.enabled {
            return Ok(None);
        }
        let Some(api_key) = config.api_key() else {
            warn!(
                env = %config.api_key_env,
                "llm enabled but api key is not set, using local extraction only"
            );
            return Ok(None);
        };
        let client = HttpLlmClient::new(config.clone(), api_key)?;
        Ok(Some(Self::new(Arc::new(client), config.timeout_secs)))
    }

    /// Ask the model for tasks
    pub async fn candidate<G: IdGenerator + Send>(
        &self,
        text: &str,
        now: NaiveDateTime,
        options: &ExtractOptions,
        ids: &mut G,
    ) -> Result<Extraction, LlmError> {
        let user = format!(
            "Current time: {}\n\nNotes:\n{}",
            now.format(dates::DATETIME_FORMAT),
            text
        );
        let reply = tokio::time::timeout(self.timeout, self.client.complete(SYSTEM_PROMPT, &user))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout.as_secs()))??;
        parse_candidate(&reply, options, ids)
    }
}

/// Which producer supplied the tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    External(Extraction),
    Local(Extraction),
}

impl Resolution {
    pub fn extraction(&self) -> &Extraction {
        match self {
            Resolution::External(e) | Resolution::Local(e) => e,
        }
    }

    pub fn into_extraction(self) -> Extraction {
        match self {
            Resolution::External(e) | Resolution::Local(e) => e,
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Resolution::External(_) => "llm",
            Resolution::Local(_) => "local",
        }
    }
}

/// Resolve tasks: external bridge first, deterministic pipeline as fallback
pub async fn resolve<G: IdGenerator + Send>(
    bridge: Option<&LlmBridge>,
    extractor: &Extractor,
    text: &str,
    now: NaiveDateTime,
    ids: &mut G,
) -> Resolution {
    if let Some(bridge) = bridge {
        match bridge.candidate(text, now, extractor.options(), ids).await {
            Ok(extraction) => {
                info!(tasks = extraction.tasks.len(), "using llm extraction");
                return Resolution::External(extraction);
            }
            Err(e) => warn!(error = %e, "llm extraction failed, falling back to local pipeline"),
        }
    }
    Resolution::Local(extractor.extract_with(text, now, ids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::SequentialIds;

    #[test]
    fn test_extract_json_strips_fences() {
        let reply = "```json\n{\"tasks\": []}\n```";
        assert_eq!(extract_json(reply), Some("{\"tasks\": []}"));
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json("} backwards {"), None);
    }

    #[test]
    fn test_parse_candidate_normalizes_fields() {
        let reply = r#"{"tasks": [
            {"title": "email boss", "priority": "HIGH", "category": "work", "due_date": "2026-10-17"},
            {"title": "Email Boss", "priority": "low"},
            {"title": "pay rent", "priority": "whenever", "category": "Finance", "due_date": "soon", "assignee": "null"},
            {"title": "", "priority": "high"}
        ]}"#;
        let mut ids = SequentialIds::new();
        let out = parse_candidate(reply, &ExtractOptions::default(), &mut ids).unwrap();
        assert_eq!(out.titles(), vec!["Email boss.", "Pay rent."]);
        assert_eq!(out.tasks[0].priority, Priority::high);
        assert_eq!(out.tasks[0].due_date.as_deref(), Some("2026-10-17"));
        assert_eq!(out.tasks[1].priority, Priority::medium);
        assert_eq!(out.tasks[1].category, Category::Finance);
        assert_eq!(out.tasks[1].due_date, None);
        assert_eq!(out.tasks[1].assignee, None);
        assert_eq!(out.clarifications.len(), 1);
        assert_eq!(out.clarifications[0].task_id, "task-2");
    }

    #[test]
    fn test_parse_candidate_respects_disabled_extended_categories() {
        let reply = r#"{"tasks": [{"title": "pay rent", "category": "Finance"}]}"#;
        let options = ExtractOptions {
            extended_categories: false,
            ..ExtractOptions::default()
        };
        let out = parse_candidate(reply, &options, &mut SequentialIds::new()).unwrap();
        assert_eq!(out.tasks[0].category, Category::Work);
    }

    #[test]
    fn test_parse_candidate_rejects_empty_or_invalid() {
        let mut ids = SequentialIds::new();
        let options = ExtractOptions::default();
        assert!(matches!(
            parse_candidate("{\"tasks\": []}", &options, &mut ids),
            Err(LlmError::InvalidPayload(_))
        ));
        assert!(matches!(
            parse_candidate("{\"tasks\": 5}", &options, &mut ids),
            Err(LlmError::Serialization(_))
        ));
        assert!(matches!(
            parse_candidate("sorry, I can't", &options, &mut ids),
            Err(LlmError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_resolution_source() {
        assert_eq!(Resolution::External(Extraction::new()).source(), "llm");
        assert_eq!(Resolution::Local(Extraction::new()).source(), "local");
    }

    #[test]
    fn test_bridge_disabled_by_default() {
        assert!(LlmBridge::from_config(&LlmConfig::default()).unwrap().is_none());
    }
}
