//! Advisory gateway -- schedule recommendations from an external
//! text-generation service.
//!
//! The engine only supplies the service input and consumes a text result.
//! The call is best-effort: a single attempt with a bounded timeout, no
//! retry, and a fixed default advisory whenever the service is missing,
//! slow or failing. Schedule and analysis computation never wait on it.

use std::collections::HashSet;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AdvisoryError;
use crate::schedule::ScheduleItem;
use crate::task::{Task, TaskId, TaskPriority};

/// Advisory returned when no service credential is configured. Absence of
/// the service is not an error.
const DEFAULT_ADVISORY: &str = "Take short breaks between high-priority tasks to stay effective. \
     Start with tasks whose deadlines are closest, and balance work with rest.";

/// Advisory substituted when the service call fails or times out.
const FALLBACK_ADVISORY: &str = "Keep a balance between work and rest, handle high-priority tasks \
     first, and avoid letting tasks pile up.";

/// At most this many schedule entries and pending tasks go into the
/// prompt, to bound token usage.
const PROMPT_ITEM_LIMIT: usize = 10;

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    /// Service credential. Comes from the environment, never from a
    /// config file on disk.
    #[serde(skip)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub timeout_secs: u64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.3,
            timeout_secs: 10,
        }
    }
}

/// Result of an advisory request. Always well-formed: failures are folded
/// into a default advisory rather than surfaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advisory {
    pub success: bool,
    pub recommendations: String,
    pub is_default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Client for the external recommendation service.
pub struct AdvisoryClient {
    config: AdvisoryConfig,
    client: reqwest::Client,
}

impl AdvisoryClient {
    pub fn new(config: AdvisoryConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Build a client whose credential comes from `OPENAI_API_KEY`.
    pub fn from_env(mut config: AdvisoryConfig) -> Self {
        config.api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        Self::new(config)
    }

    /// Request advisory text for a built schedule.
    ///
    /// The schedule is read-only input here; cancelling the request can
    /// never affect an already-computed schedule.
    pub async fn get_advisory(
        &self,
        schedule: &[ScheduleItem],
        tasks: &[Task],
        date: NaiveDate,
    ) -> Advisory {
        let Some(api_key) = self.config.api_key.clone() else {
            tracing::warn!("no advisory credential configured, returning default advisory");
            return Advisory {
                success: true,
                recommendations: DEFAULT_ADVISORY.to_string(),
                is_default: true,
                error: None,
            };
        };

        let prompt = build_prompt(schedule, tasks, date);
        let outcome = tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            self.request(&api_key, &prompt),
        )
        .await;

        match outcome {
            Ok(Ok(recommendations)) => Advisory {
                success: true,
                recommendations,
                is_default: false,
                error: None,
            },
            Ok(Err(err)) => {
                tracing::error!(%err, "advisory request failed");
                fallback(err)
            }
            Err(_) => {
                let err = AdvisoryError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                };
                tracing::error!(%err, "advisory request timed out");
                fallback(err)
            }
        }
    }

    async fn request(&self, api_key: &str, prompt: &str) -> Result<String, AdvisoryError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "system",
                    "content": "You are a scheduling and time management expert. \
                        Give the advice directly, without preamble or closing remarks."
                },
                { "role": "user", "content": prompt }
            ],
            "temperature": self.config.temperature,
            "max_tokens": 800,
        });

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AdvisoryError::Status(response.status()));
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(AdvisoryError::EmptyResponse)
    }
}

fn fallback(err: AdvisoryError) -> Advisory {
    Advisory {
        success: false,
        recommendations: FALLBACK_ADVISORY.to_string(),
        is_default: true,
        error: Some(err.to_string()),
    }
}

/// Condense the schedule and the unscheduled important tasks into a
/// compact prompt.
fn build_prompt(schedule: &[ScheduleItem], tasks: &[Task], date: NaiveDate) -> String {
    let scheduled: Vec<serde_json::Value> = schedule
        .iter()
        .take(PROMPT_ITEM_LIMIT)
        .map(|item| {
            json!({
                "title": item.title,
                "start_time": item.start_time,
                "end_time": item.end_time,
                "priority_score": item.priority_score,
            })
        })
        .collect();

    let scheduled_ids: HashSet<&TaskId> = schedule.iter().map(|item| &item.task_id).collect();
    let pending: Vec<serde_json::Value> = tasks
        .iter()
        .take(PROMPT_ITEM_LIMIT)
        .filter(|task| !task.completed() && !scheduled_ids.contains(task.id()))
        .filter(|task| match task {
            Task::Dynamic(t) => matches!(
                t.priority_label(),
                Some(TaskPriority::High) | Some(TaskPriority::Medium)
            ),
            Task::Regular(_) => false,
        })
        .map(|task| match task {
            Task::Dynamic(t) => json!({
                "title": t.title,
                "priority": t.priority,
                "estimated_minutes": t.estimated_minutes,
                "deadline": t.deadline,
            }),
            Task::Regular(_) => unreachable!("regular tasks are filtered out above"),
        })
        .collect();

    format!(
        "You are an efficient day-planning assistant. Review this schedule and \
         give concise improvement advice.\n\n\
         Date: {date}\n\n\
         Scheduled items ({scheduled_count}):\n{scheduled_json}\n\n\
         Unscheduled important tasks ({pending_count}):\n{pending_json}\n\n\
         Please provide:\n\
         1. A short assessment of the current schedule\n\
         2. Two or three concrete improvements\n\
         3. One productivity tip\n\n\
         Keep the answer brief and actionable.",
        date = date.format("%Y-%m-%d"),
        scheduled_count = schedule.len(),
        scheduled_json = serde_json::to_string(&scheduled).unwrap_or_default(),
        pending_count = pending.len(),
        pending_json = serde_json::to_string(&pending).unwrap_or_default(),
    )
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}
