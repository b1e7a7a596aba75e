use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::captions::domain::transcript::Word;
use crate::shared::constants::{
    AUDIO_API_VERSION, DEFAULT_TTS_DEPLOYMENT, DEFAULT_WHISPER_DEPLOYMENT, DEPLOYMENTS_API_VERSION,
};
use crate::speech::domain::service_error::ServiceError;
use crate::speech::domain::speech_synthesizer::{SpeechSynthesizer, SynthesisRequest};
use crate::speech::domain::transcriber::Transcriber;

pub const ENDPOINT_VAR: &str = "AZURE_OPENAI_ENDPOINT";
pub const API_KEY_VAR: &str = "AZURE_OPENAI_API_KEY";
pub const TTS_DEPLOYMENT_VAR: &str = "AZURE_TTS_DEPLOYMENT";
pub const WHISPER_DEPLOYMENT_VAR: &str = "AZURE_WHISPER_DEPLOYMENT";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Span given to words the service reports with `start == end`.
pub const MIN_WORD_SECONDS: f64 = 0.01;

const SPEECH: &str = "speech synthesis";
const TRANSCRIPTION: &str = "transcription";
const DEPLOYMENTS: &str = "deployment listing";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureOpenAiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub tts_deployment: String,
    pub whisper_deployment: String,
}

impl AzureOpenAiConfig {
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServiceError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let endpoint = get(ENDPOINT_VAR).ok_or(ServiceError::MissingCredential(ENDPOINT_VAR))?;
        let api_key = get(API_KEY_VAR).ok_or(ServiceError::MissingCredential(API_KEY_VAR))?;
        Ok(Self {
            endpoint: endpoint.trim().trim_end_matches('/').to_string(),
            api_key,
            tts_deployment: get(TTS_DEPLOYMENT_VAR)
                .unwrap_or_else(|| DEFAULT_TTS_DEPLOYMENT.to_string()),
            whisper_deployment: get(WHISPER_DEPLOYMENT_VAR)
                .unwrap_or_else(|| DEFAULT_WHISPER_DEPLOYMENT.to_string()),
        })
    }

    pub fn speech_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/audio/speech?api-version={AUDIO_API_VERSION}",
            self.endpoint, self.tts_deployment
        )
    }

    pub fn transcription_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/audio/transcriptions?api-version={AUDIO_API_VERSION}",
            self.endpoint, self.whisper_deployment
        )
    }

    pub fn deployments_url(&self) -> String {
        format!(
            "{}/openai/deployments?api-version={DEPLOYMENTS_API_VERSION}",
            self.endpoint
        )
    }
}

#[derive(Serialize)]
struct SpeechBody<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    speed: f64,
}

#[derive(Deserialize)]
struct TranscriptionBody {
    #[serde(default)]
    words: Vec<TimedWord>,
}

#[derive(Deserialize)]
struct TimedWord {
    word: String,
    start: f64,
    end: f64,
}

/// A model deployment on the Azure OpenAI resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Deployment {
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Deserialize)]
struct DeploymentList {
    #[serde(default)]
    data: Vec<Deployment>,
}

/// Speech synthesis and word-timed transcription against Azure OpenAI
/// deployments (TTS and Whisper) using one key and endpoint.
#[derive(Clone)]
pub struct AzureOpenAiClient {
    config: AzureOpenAiConfig,
    http: Client,
}

impl AzureOpenAiClient {
    pub fn new(config: AzureOpenAiConfig) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ServiceError::Transport {
                operation: "client setup",
                source: Box::new(e),
            })?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &AzureOpenAiConfig {
        &self.config
    }

    pub fn list_deployments(&self) -> Result<Vec<Deployment>, ServiceError> {
        let response = self
            .http
            .get(self.config.deployments_url())
            .header("api-key", &self.config.api_key)
            .send()
            .map_err(|e| transport(DEPLOYMENTS, e))?;
        let body = read_success_text(DEPLOYMENTS, response)?;
        let list: DeploymentList =
            serde_json::from_str(&body).map_err(|e| ServiceError::MalformedResponse {
                operation: DEPLOYMENTS,
                message: e.to_string(),
            })?;
        Ok(list.data)
    }
}

impl SpeechSynthesizer for AzureOpenAiClient {
    fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ServiceError> {
        let body = SpeechBody {
            model: &self.config.tts_deployment,
            input: &request.text,
            voice: &request.voice,
            speed: request.speed,
        };
        let response = self
            .http
            .post(self.config.speech_url())
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .map_err(|e| transport(SPEECH, e))?;

        let response = ensure_success(SPEECH, response)?;
        let bytes = response.bytes().map_err(|e| transport(SPEECH, e))?;
        if bytes.is_empty() {
            return Err(ServiceError::MalformedResponse {
                operation: SPEECH,
                message: "empty audio body".to_string(),
            });
        }
        Ok(bytes.to_vec())
    }
}

impl Transcriber for AzureOpenAiClient {
    fn transcribe(&self, audio: &[u8], file_name: &str) -> Result<Vec<Word>, ServiceError> {
        let part = Part::bytes(audio.to_vec())
            .file_name(file_name.to_string())
            .mime_str("audio/mpeg")
            .map_err(|e| transport(TRANSCRIPTION, e))?;
        let form = Form::new()
            .part("file", part)
            .text("model", self.config.whisper_deployment.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word");

        let response = self
            .http
            .post(self.config.transcription_url())
            .header("api-key", &self.config.api_key)
            .multipart(form)
            .send()
            .map_err(|e| transport(TRANSCRIPTION, e))?;

        let body = read_success_text(TRANSCRIPTION, response)?;
        parse_transcription(&body)
    }
}

/// Parses a `verbose_json` transcription into words, in service order.
///
/// A missing `words` array means no words. Zero-length words are widened to
/// [`MIN_WORD_SECONDS`] so they still reach the captions; words with negative,
/// non-finite or reversed times are skipped with a warning.
pub fn parse_transcription(body: &str) -> Result<Vec<Word>, ServiceError> {
    let parsed: TranscriptionBody =
        serde_json::from_str(body).map_err(|e| ServiceError::MalformedResponse {
            operation: TRANSCRIPTION,
            message: e.to_string(),
        })?;

    let mut words = Vec::with_capacity(parsed.words.len());
    for timed in parsed.words {
        let text = timed.word.trim();
        if text.is_empty() {
            continue;
        }
        let end = if timed.end == timed.start {
            timed.end + MIN_WORD_SECONDS
        } else {
            timed.end
        };
        match Word::new(text, timed.start, end) {
            Ok(word) => words.push(word),
            Err(e) => log::warn!("Skipping word from transcription: {e}"),
        }
    }
    Ok(words)
}

/// Pulls a readable message out of an error body: `error.message`, then
/// `error.code`, then the raw text.
pub fn upstream_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));
    error
        .and_then(|e| e.get("message").or_else(|| e.get("code")))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}

fn transport(operation: &'static str, e: reqwest::Error) -> ServiceError {
    ServiceError::Transport {
        operation,
        source: Box::new(e),
    }
}

fn ensure_success(operation: &'static str, response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ServiceError::Upstream {
        operation,
        status: status.as_u16(),
        message: upstream_message(&body),
    })
}

fn read_success_text(operation: &'static str, response: Response) -> Result<String, ServiceError> {
    ensure_success(operation, response)?
        .text()
        .map_err(|e| transport(operation, e))
}
