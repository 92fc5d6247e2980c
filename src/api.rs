//! HTTP client for the segmentation / synthesis backend.
//!
//! The backend is a black box: it segments Chinese text into phrases with
//! pinyin and definitions, and synthesizes speech with word-level timing
//! marks. These calls are blocking and are always dispatched from iced tasks,
//! never from the UI thread.

use crate::marks::RawSpeechMark;
use crate::segment::Phrase;
use anyhow::{Context, Result, anyhow};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ProcessResponse {
    #[serde(default)]
    phrases: Vec<Phrase>,
}

#[derive(Debug, Deserialize)]
struct ReadAloudResponse {
    #[serde(default)]
    audio: String,
    #[serde(rename = "contentType")]
    content_type: Option<String>,
    #[serde(rename = "speechMarks", default)]
    speech_marks: Vec<RawSpeechMark>,
}

/// Decoded `/api/read-aloud` payload.
pub struct ReadAloud {
    pub audio: Vec<u8>,
    pub content_type: Option<String>,
    pub speech_marks: Vec<RawSpeechMark>,
}

#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Segment text into annotated phrases.
    ///
    /// The backend promises that the concatenation of all returned phrase
    /// texts (line breaks included) reconstructs the submitted text; callers
    /// verify that invariant before trusting the result for mark alignment.
    pub fn process(&self, text: &str) -> Result<Vec<Phrase>> {
        let response: ProcessResponse = self.post_json("/api/process", text)?;
        info!(
            phrase_count = response.phrases.len(),
            chars = text.chars().count(),
            "Segmented text via backend"
        );
        Ok(response.phrases)
    }

    /// Synthesize speech for the given text, returning audio bytes and marks.
    pub fn read_aloud(&self, text: &str) -> Result<ReadAloud> {
        let response: ReadAloudResponse = self.post_json("/api/read-aloud", text)?;
        if response.audio.is_empty() {
            return Err(anyhow!("Synthesis response contained no audio payload"));
        }
        let audio = BASE64_STANDARD
            .decode(response.audio.as_bytes())
            .context("Decoding base64 audio payload")?;
        info!(
            audio_bytes = audio.len(),
            mark_count = response.speech_marks.len(),
            content_type = response.content_type.as_deref().unwrap_or("unknown"),
            "Received synthesized audio"
        );
        if response.speech_marks.is_empty() {
            warn!("No speech marks in synthesis response; highlighting disabled");
        }
        Ok(ReadAloud {
            audio,
            content_type: response.content_type,
            speech_marks: response.speech_marks,
        })
    }

    /// Startup probe; failure is reported, not fatal.
    pub fn health(&self) -> Result<()> {
        let url = format!("{}/api/health", self.base_url);
        let response = self.client.get(&url).send().context("Backend health check")?;
        if !response.status().is_success() {
            return Err(anyhow!("Backend health check returned {}", response.status()));
        }
        debug!("Backend is reachable");
        Ok(())
    }

    fn post_json<T: for<'de> Deserialize<'de>>(&self, path: &str, text: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let body = serde_json::to_string(&TextRequest { text })
            .context("Serializing request body")?;
        debug!(%url, bytes = body.len(), "Posting to backend");
        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .with_context(|| format!("Requesting {url}"))?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Backend returned {status} for {url}"));
        }
        let bytes = response.bytes().context("Reading backend response")?;
        serde_json::from_slice(&bytes).with_context(|| format!("Parsing response from {url}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_aloud_response_tolerates_missing_optional_fields() {
        let parsed: ReadAloudResponse = serde_json::from_str(r#"{"audio":"AAAA"}"#).unwrap();
        assert!(parsed.speech_marks.is_empty());
        assert!(parsed.content_type.is_none());
        assert_eq!(parsed.audio, "AAAA");
    }

    #[test]
    fn read_aloud_response_parses_camel_case_marks() {
        let parsed: ReadAloudResponse = serde_json::from_str(
            r#"{
                "audio": "AAAA",
                "contentType": "audio/mpeg",
                "speechMarks": [
                    {"time": 125, "start": 0, "end": 2, "value": "你好"},
                    {"time": 500, "start": 2}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.speech_marks.len(), 2);
        assert_eq!(parsed.speech_marks[0].time, Some(125.0));
        assert_eq!(parsed.speech_marks[1].end, None);
        assert_eq!(parsed.content_type.as_deref(), Some("audio/mpeg"));
    }

    #[test]
    fn process_response_defaults_annotation_fields() {
        let parsed: ProcessResponse =
            serde_json::from_str(r#"{"phrases":[{"text":"你好"},{"text":"\n"}]}"#).unwrap();
        assert_eq!(parsed.phrases.len(), 2);
        assert!(parsed.phrases[0].pinyin.is_empty());
        assert!(parsed.phrases[1].is_line_break());
    }
}
