//! Remote quote generation
//!
//! The provider is an opaque capability: the widget asks for one quote and
//! either gets it or falls back to a local one. There is exactly one attempt
//! per request, bounded by the client timeout; no retry, no queue.

use crate::config::models::Quote;
use crate::error::{Result, StringError, WidgetError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Attribution used when the generator omits one
pub const FALLBACK_SOURCE: &str = "AI Wisdom";

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const QUOTE_PROMPT: &str = "Generate a short, powerful, single-sentence motivational quote \
    for a student preparing for a major exam. Return it in JSON format with 'text' and \
    'source' (optional, put 'Unknown' if not a famous quote) fields.";

/// Anything that can produce a motivational quote on demand
pub trait QuoteProvider: Send + Sync {
    /// Produce one quote (blocking)
    fn fetch(&self) -> Result<Quote>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeneratedQuote {
    text: Option<String>,
    source: Option<String>,
}

/// Quote generator backed by the Gemini `generateContent` REST endpoint
pub struct GeminiQuoteProvider {
    client: reqwest::blocking::Client,
    api_key: String,
    endpoint: String,
}

impl std::fmt::Debug for GeminiQuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiQuoteProvider")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl GeminiQuoteProvider {
    /// Provider using `api_key` against the public endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(
            api_key,
            format!("{GEMINI_ENDPOINT}/{GEMINI_MODEL}:generateContent"),
        )
    }

    /// Provider against a custom `generateContent` URL
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("focus-countdown/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                warn!("Failed to create HTTP client: {}", e);
                WidgetError::QuoteProviderError(Box::new(e))
            })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        })
    }

    /// Provider for an optional key; no key means no remote quotes
    pub fn from_key(api_key: Option<&str>) -> Option<Self> {
        let Some(key) = api_key else {
            info!("No quote provider key configured, using offline quotes");
            return None;
        };
        match Self::new(key) {
            Ok(provider) => Some(provider),
            Err(e) => {
                warn!("Remote quotes disabled: {}", e);
                None
            }
        }
    }
}

impl QuoteProvider for GeminiQuoteProvider {
    fn fetch(&self) -> Result<Quote> {
        debug!("Requesting quote from {}", self.endpoint);

        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: QUOTE_PROMPT }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .map_err(|e| {
                warn!("Quote request failed: {}", e);
                WidgetError::QuoteProviderError(Box::new(e))
            })?;

        if !response.status().is_success() {
            warn!("Quote provider returned error status: {}", response.status());
            return Err(WidgetError::QuoteProviderError(StringError::new(format!(
                "Quote provider returned error status: {}",
                response.status()
            ))));
        }

        let body: GenerateResponse = response.json().map_err(|e| {
            warn!("Failed to parse quote provider response: {}", e);
            WidgetError::QuoteProviderError(Box::new(e))
        })?;

        let text = body
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
            .ok_or_else(|| WidgetError::QuoteUnavailable("empty response".to_string()))?;

        let quote = parse_generated_quote(&text)?;
        info!("Fetched remote quote");
        Ok(quote)
    }
}

/// Interpret the generator's JSON answer
///
/// Tolerates a surrounding Markdown code fence. A missing or blank `text`
/// is a failure; a missing or blank `source` becomes [`FALLBACK_SOURCE`].
pub fn parse_generated_quote(raw: &str) -> Result<Quote> {
    let body = strip_code_fence(raw);
    let generated: GeneratedQuote = serde_json::from_str(body)
        .map_err(|e| WidgetError::QuoteProviderError(Box::new(e)))?;

    let text = generated
        .text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| WidgetError::QuoteUnavailable("generated quote has no text".to_string()))?;
    let source = generated
        .source
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_SOURCE.to_string());

    Ok(Quote {
        text,
        source: Some(source),
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
