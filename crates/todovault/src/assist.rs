//! AI-assisted helpers: interview-task generation and resume analysis.
//!
//! Both helpers are thin wrappers over an opaque text-generation
//! service, reached through the [`TextGenerator`] trait so tests can
//! script completions. Parsing of the completion is strict: a response
//! that does not carry the expected shape fails with an explicit
//! [`AssistError::Parse`] instead of silently returning empty sections.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;

/// Errors that can occur at the text-generation boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssistError {
    #[error("Text generation failed: {0}")]
    Upstream(String),
    #[error("Too many requests to the text-generation service")]
    RateLimited,
    #[error("Unparseable completion: {0}")]
    Parse(String),
}

/// An opaque text-generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Requests a completion for the given system and user prompts.
    async fn complete(&self, system: &str, user: &str) -> Result<String, AssistError>;
}

/// OpenAI chat-completions client.
pub struct OpenAiGenerator {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.openai_api_url.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AssistError> {
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [
                    { "role": "system", "content": system },
                    { "role": "user", "content": user },
                ],
            }))
            .send()
            .await
            .map_err(|e| AssistError::Upstream(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AssistError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(AssistError::Upstream(format!(
                "Unexpected status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AssistError::Upstream(e.to_string()))?;

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AssistError::Parse("completion carries no message content".to_string()))
    }
}

/// Resume feedback split into its two fixed sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub positives: String,
    pub improvements: String,
}

const POSITIVES_HEADING: &str = "Positive aspects:";
const IMPROVEMENTS_HEADING: &str = "Suggestions for improvement:";

/// AI-assisted helpers over a text-generation backend.
pub struct AssistService {
    generator: std::sync::Arc<dyn TextGenerator>,
}

impl AssistService {
    pub fn new(generator: std::sync::Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generates an interview preparation task list as a JSON value.
    pub async fn generate_interview_tasks(
        &self,
        interview_date: &str,
        position: &str,
        experience_level: &str,
    ) -> Result<serde_json::Value, AssistError> {
        let prompt = format!(
            "Please generate a JSON object with a list of tasks for a \
             {experience_level} {position} interview scheduled on {interview_date}. \
             Each task should contain the following attributes:\n\
             - \"id\": A unique identifier for the task (e.g., \"1\").\n\
             - \"title\": The title of the task (e.g., \"Technical Preparation\").\n\
             - \"description\": A detailed description of the task.\n\
             - \"priority\": The priority level of the task (e.g., \"High\").\n\
             - \"dueDate\": The due date for the task in the format \"YYYY-MM-DD\".\n\
             - \"completed\": A boolean indicating whether the task is completed or not.\n"
        );

        let completion = self
            .generator
            .complete("Generate an interview preparation plan.", &prompt)
            .await?;

        parse_task_list(&completion)
    }

    /// Analyzes extracted resume text and returns structured feedback.
    pub async fn analyze_resume(&self, resume_text: &str) -> Result<ResumeAnalysis, AssistError> {
        let prompt = format!(
            "Review the following resume and respond with two sections, \
             one starting with the heading \"{POSITIVES_HEADING}\" and one \
             starting with the heading \"{IMPROVEMENTS_HEADING}\".\n\n{resume_text}"
        );

        let completion = self
            .generator
            .complete("You are an experienced technical recruiter.", &prompt)
            .await?;

        split_feedback_sections(&completion)
    }
}

/// Parses the completion as a JSON task list, tolerating a Markdown
/// code fence around the payload.
fn parse_task_list(completion: &str) -> Result<serde_json::Value, AssistError> {
    let trimmed = completion.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim())
        .map_err(|_| AssistError::Parse("completion is not valid JSON".to_string()))
}

/// Splits the completion at the two fixed feedback headings.
///
/// A completion missing either heading is rejected outright.
fn split_feedback_sections(completion: &str) -> Result<ResumeAnalysis, AssistError> {
    let positives_at = completion.find(POSITIVES_HEADING).ok_or_else(|| {
        AssistError::Parse(format!("missing \"{POSITIVES_HEADING}\" heading"))
    })?;
    let improvements_at = completion.find(IMPROVEMENTS_HEADING).ok_or_else(|| {
        AssistError::Parse(format!("missing \"{IMPROVEMENTS_HEADING}\" heading"))
    })?;

    if improvements_at < positives_at {
        return Err(AssistError::Parse(
            "feedback sections are out of order".to_string(),
        ));
    }

    let positives = completion[positives_at + POSITIVES_HEADING.len()..improvements_at]
        .trim()
        .to_string();
    let improvements = completion[improvements_at + IMPROVEMENTS_HEADING.len()..]
        .trim()
        .to_string();

    Ok(ResumeAnalysis {
        positives,
        improvements,
    })
}
