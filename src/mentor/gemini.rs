use super::sse::{parse_data_lines, SseBuffer};
use super::ChatRequest;
use crate::config::MentorConfig;
use crate::state::{AppEvent, EventSink};
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, thiserror::Error)]
pub enum MentorError {
    #[error("no Gemini API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Gemini API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Gemini API error: {0}")]
    Api(String),
    #[error("malformed stream event: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

/// Streaming client for `models/{model}:streamGenerateContent`.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(config: &MentorConfig) -> Result<Self, MentorError> {
        // Limits stalls only; a long stream is never cut off.
        let client = reqwest::Client::builder()
            .connect_timeout(config.request_timeout)
            .read_timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_base: config.api_base.clone(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.api_base, self.model
        )
    }

    pub fn request_body(request: &ChatRequest) -> Value {
        let contents: Vec<Value> = request
            .history
            .iter()
            .map(|turn| {
                json!({
                    "role": turn.role.wire_name(),
                    "parts": [{ "text": turn.text }],
                })
            })
            .collect();
        json!({
            "contents": contents,
            "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
            "generationConfig": { "temperature": request.temperature },
        })
    }

    /// Runs one streaming call, handing each non-empty text fragment to `on_chunk`
    /// in arrival order.
    pub async fn stream<F>(&self, request: &ChatRequest, mut on_chunk: F) -> Result<(), MentorError>
    where
        F: FnMut(String),
    {
        let api_key = self.api_key.as_deref().ok_or(MentorError::MissingApiKey)?;
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(MentorError::Status { status, body });
        }

        let mut body = response.bytes_stream();
        let mut sse = SseBuffer::new();
        while let Some(chunk) = body.next().await {
            sse.push_chunk(&chunk?);
            while let Some(block) = sse.next_event_block() {
                dispatch_block(&block, &mut on_chunk)?;
            }
        }
        if let Some(block) = sse.take_remainder() {
            dispatch_block(&block, &mut on_chunk)?;
        }
        Ok(())
    }
}

fn dispatch_block<F: FnMut(String)>(block: &str, on_chunk: &mut F) -> Result<(), MentorError> {
    for data in parse_data_lines(block) {
        let data = data.trim();
        if data.is_empty() {
            continue;
        }
        let parsed: GenerateContentResponse =
            serde_json::from_str(data).map_err(|e| MentorError::Malformed(e.to_string()))?;
        if let Some(err) = parsed.error {
            return Err(MentorError::Api(err.message));
        }
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if !text.is_empty() {
            on_chunk(text);
        }
    }
    Ok(())
}

/// Streams `request` on the runtime and reports progress as mentor events.
pub fn spawn_stream(
    runtime: &tokio::runtime::Handle,
    client: GeminiClient,
    request: ChatRequest,
    events: EventSink,
) {
    runtime.spawn(async move {
        let generation = request.generation;
        log::info!(
            "[mentor] stream {} -> {} ({} turns)",
            generation,
            client.model(),
            request.history.len()
        );
        let result = client
            .stream(&request, |text| {
                events.send(AppEvent::MentorChunk { generation, text });
            })
            .await;
        match result {
            Ok(()) => events.send(AppEvent::MentorFinished { generation }),
            Err(e) => events.send(AppEvent::MentorFailed {
                generation,
                reason: e.to_string(),
            }),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mentor::{Turn, PERSONA_INSTRUCTION, TEMPERATURE};
    use std::sync::mpsc;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ChatRequest {
        ChatRequest {
            generation: 3,
            history: vec![Turn::assistant("Systems online."), Turn::user("Build me a grid.")],
            system_instruction: PERSONA_INSTRUCTION.into(),
            temperature: TEMPERATURE,
        }
    }

    fn client_for(server: &MockServer, api_key: Option<&str>) -> GeminiClient {
        GeminiClient::new(&MentorConfig {
            api_key: api_key.map(String::from),
            model: "test-model".into(),
            api_base: server.uri(),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn sse_body(fragments: &[&str]) -> String {
        fragments
            .iter()
            .map(|text| {
                let event = json!({
                    "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
                });
                format!("data: {}\r\n\r\n", event)
            })
            .collect()
    }

    async fn mount_stream(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/models/test-model:streamGenerateContent"))
            .and(query_param("alt", "sse"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[test]
    fn request_body_maps_roles_and_config() {
        let body = GeminiClient::request_body(&request());
        assert_eq!(body["contents"][0]["role"], "model");
        assert_eq!(body["contents"][1]["role"], "user");
        assert_eq!(body["contents"][1]["parts"][0]["text"], "Build me a grid.");
        assert_eq!(body["contents"].as_array().unwrap().len(), 2);
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            PERSONA_INSTRUCTION
        );
        let temp = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temp - 0.8).abs() < 1e-6);
    }

    #[tokio::test]
    async fn streams_fragments_in_order() {
        let server = MockServer::start().await;
        mount_stream(
            &server,
            ResponseTemplate::new(200)
                .set_body_raw(sse_body(&["Gr", "id ", "online."]), "text/event-stream"),
        )
        .await;

        let mut chunks = Vec::new();
        client_for(&server, Some("test-key"))
            .stream(&request(), |t| chunks.push(t))
            .await
            .unwrap();
        assert_eq!(chunks, ["Gr", "id ", "online."]);
    }

    #[tokio::test]
    async fn stalled_response_times_out() {
        let server = MockServer::start().await;
        mount_stream(
            &server,
            ResponseTemplate::new(200)
                .set_body_raw(sse_body(&["late"]), "text/event-stream")
                .set_delay(Duration::from_secs(3)),
        )
        .await;

        let client = GeminiClient::new(&MentorConfig {
            api_key: Some("test-key".into()),
            model: "test-model".into(),
            api_base: server.uri(),
            request_timeout: Duration::from_millis(300),
        })
        .unwrap();
        let mut chunks = Vec::new();
        let err = client
            .stream(&request(), |t| chunks.push(t))
            .await
            .unwrap_err();
        assert!(matches!(err, MentorError::Http(_)), "unexpected error: {err}");
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        mount_stream(
            &server,
            ResponseTemplate::new(403).set_body_string("API key not valid"),
        )
        .await;

        let err = client_for(&server, Some("test-key"))
            .stream(&request(), |_| {})
            .await
            .unwrap_err();
        match err {
            MentorError::Status { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("not valid"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn error_event_mid_stream_fails_after_partial_text() {
        let server = MockServer::start().await;
        let mut body = sse_body(&["Syncing"]);
        body.push_str("data: {\"error\":{\"code\":500,\"message\":\"backend overloaded\"}}\n\n");
        mount_stream(
            &server,
            ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"),
        )
        .await;

        let mut chunks = Vec::new();
        let err = client_for(&server, Some("test-key"))
            .stream(&request(), |t| chunks.push(t))
            .await
            .unwrap_err();
        assert_eq!(chunks, ["Syncing"]);
        assert!(matches!(err, MentorError::Api(msg) if msg == "backend overloaded"));
    }

    #[tokio::test]
    async fn garbage_event_is_malformed() {
        let server = MockServer::start().await;
        mount_stream(
            &server,
            ResponseTemplate::new(200).set_body_raw("data: {not json\n\n", "text/event-stream"),
        )
        .await;

        let err = client_for(&server, Some("test-key"))
            .stream(&request(), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, MentorError::Malformed(_)));
    }

    #[tokio::test]
    async fn missing_key_never_hits_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server, None)
            .stream(&request(), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, MentorError::MissingApiKey));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn spawned_stream_reports_chunks_then_finish() {
        let server = MockServer::start().await;
        mount_stream(
            &server,
            ResponseTemplate::new(200)
                .set_body_raw(sse_body(&["Grid ", "online."]), "text/event-stream"),
        )
        .await;

        let (tx, rx) = mpsc::channel();
        spawn_stream(
            &tokio::runtime::Handle::current(),
            client_for(&server, Some("test-key")),
            request(),
            EventSink::detached(tx),
        );

        let events = tokio::task::spawn_blocking(move || {
            let mut out = Vec::new();
            while let Ok(event) = rx.recv_timeout(Duration::from_secs(5)) {
                let done = matches!(
                    event,
                    AppEvent::MentorFinished { .. } | AppEvent::MentorFailed { .. }
                );
                out.push(event);
                if done {
                    break;
                }
            }
            out
        })
        .await
        .unwrap();

        let texts: Vec<String> = events
            .iter()
            .filter_map(|e| match e {
                AppEvent::MentorChunk { generation: 3, text } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["Grid ", "online."]);
        assert!(matches!(
            events.last(),
            Some(AppEvent::MentorFinished { generation: 3 })
        ));
    }
}
