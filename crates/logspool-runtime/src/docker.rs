//! Docker Engine API client over a Unix socket
//!
//! Thin plumbing behind [`ContainerRuntime`]: four endpoints
//! (`/containers/{id}/json`, `/containers/json`, `/events`,
//! `/containers/{id}/logs`), no authentication, no retries.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use logspool_core::{ContainerDetails, ContainerStatus, Error, LifecycleEvent, Result};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::http::{is_chunked, ChunkStream, FrameDecoder, LineSplitter};
use crate::traits::ContainerRuntime;

/// Lifecycle events only carry container events; everything else is noise.
const EVENTS_PATH: &str = "/events?filters=%7B%22type%22%3A%5B%22container%22%5D%7D";

/// Docker Engine API client
#[derive(Debug)]
pub struct DockerRuntime {
    socket_path: PathBuf,
}

impl DockerRuntime {
    /// Connect to the Docker daemon at `endpoint` (a `unix://` URL) and
    /// verify it is reachable. Fails adapter construction otherwise.
    pub async fn connect(endpoint: &str) -> Result<Self> {
        let path = endpoint.strip_prefix("unix://").ok_or_else(|| {
            Error::config(format!(
                "Unsupported endpoint {:?}: only unix:// sockets are supported",
                endpoint
            ))
        })?;

        let runtime = Self {
            socket_path: PathBuf::from(path),
        };
        runtime.get("/_ping").await?;
        debug!("Connected to Docker at {}", runtime.socket_path.display());
        Ok(runtime)
    }

    async fn open_stream(
        &self,
        path: &str,
    ) -> Result<(u16, HashMap<String, String>, BufReader<UnixStream>)> {
        let stream = UnixStream::connect(&self.socket_path).await.map_err(|e| {
            Error::runtime(format!(
                "Cannot reach Docker at {}: {}",
                self.socket_path.display(),
                e
            ))
        })?;
        let mut reader = BufReader::new(stream);

        let request = format!(
            "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            path
        );
        reader.get_mut().write_all(request.as_bytes()).await?;

        let mut status_line = String::new();
        reader.read_line(&mut status_line).await?;
        let status: u16 = status_line
            .split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Error::runtime(format!("Bad status line {:?}", status_line.trim())))?;

        let mut headers = HashMap::new();
        loop {
            let mut line = String::new();
            let n = reader.read_line(&mut line).await?;
            if n == 0 || line.trim().is_empty() {
                break;
            }
            if let Some((key, value)) = line.trim().split_once(':') {
                headers.insert(key.trim().to_lowercase(), value.trim().to_string());
            }
        }

        Ok((status, headers, reader))
    }

    /// One-shot GET returning the full response body
    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        let (status, headers, mut reader) = self.open_stream(path).await?;

        let mut body = Vec::new();
        if is_chunked(&headers) {
            let mut chunks = ChunkStream::new(reader, true);
            while let Some(chunk) = chunks.next().await? {
                body.extend_from_slice(&chunk);
            }
        } else if let Some(len) = headers
            .get("content-length")
            .and_then(|v| v.parse::<usize>().ok())
        {
            body.resize(len, 0);
            reader.read_exact(&mut body).await?;
        } else {
            reader.read_to_end(&mut body).await?;
        }

        if !(200..300).contains(&status) {
            return Err(Error::runtime(format!(
                "Docker API {} returned status {}",
                path, status
            )));
        }
        Ok(body)
    }

    async fn inspect_raw(&self, id: &str) -> Result<InspectPayload> {
        let body = self.get(&format!("/containers/{}/json", id)).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn inspect(&self, id: &str) -> Result<ContainerDetails> {
        Ok(self.inspect_raw(id).await?.into_details())
    }

    async fn list_running(&self) -> Result<Vec<String>> {
        let body = self.get("/containers/json").await?;
        let summaries: Vec<ContainerSummary> = serde_json::from_slice(&body)?;
        Ok(summaries.into_iter().map(|c| c.id).collect())
    }

    async fn events(&self) -> Result<mpsc::Receiver<LifecycleEvent>> {
        let (status, headers, reader) = self.open_stream(EVENTS_PATH).await?;
        if !(200..300).contains(&status) {
            return Err(Error::runtime(format!(
                "Docker events endpoint returned status {}",
                status
            )));
        }

        let (tx, rx) = mpsc::channel(256);
        let mut chunks = ChunkStream::new(reader, is_chunked(&headers));

        tokio::spawn(async move {
            let mut pending: Vec<u8> = Vec::new();
            loop {
                match chunks.next().await {
                    Ok(Some(chunk)) => {
                        pending.extend_from_slice(&chunk);
                        loop {
                            let (payload, consumed) = {
                                let mut values = serde_json::Deserializer::from_slice(&pending)
                                    .into_iter::<EventPayload>();
                                match values.next() {
                                    Some(Ok(payload)) => {
                                        let consumed = values.byte_offset();
                                        (Some(payload), consumed)
                                    }
                                    Some(Err(e)) if e.is_eof() => (None, 0),
                                    Some(Err(e)) => {
                                        warn!("Malformed event payload: {}", e);
                                        return;
                                    }
                                    None => (None, 0),
                                }
                            };
                            if consumed == 0 {
                                break;
                            }
                            pending.drain(..consumed);
                            if let Some(event) = payload.and_then(EventPayload::into_event) {
                                if tx.send(event).await.is_err() {
                                    return;
                                }
                            }
                        }
                    }
                    Ok(None) => {
                        debug!("Docker event stream closed");
                        return;
                    }
                    Err(e) => {
                        warn!("Docker event stream error: {}", e);
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn stream_logs(&self, id: &str) -> Result<mpsc::Receiver<String>> {
        // TTY containers send a raw byte stream; the rest use the
        // 8-byte multiplexing frames.
        let tty = self.inspect_raw(id).await?.config.tty;

        let path = format!(
            "/containers/{}/logs?follow=true&stdout=true&stderr=true&tail=0",
            id
        );
        let (status, headers, reader) = self.open_stream(&path).await?;
        if !(200..300).contains(&status) {
            return Err(Error::runtime(format!(
                "Docker logs endpoint for {} returned status {}",
                id, status
            )));
        }

        let (tx, rx) = mpsc::channel(1024);
        let mut chunks = ChunkStream::new(reader, is_chunked(&headers));
        let id = id.to_string();

        tokio::spawn(async move {
            let mut frames = FrameDecoder::new();
            let mut lines = LineSplitter::new();
            loop {
                match chunks.next().await {
                    Ok(Some(chunk)) => {
                        let payloads = if tty {
                            vec![chunk]
                        } else {
                            frames.push(&chunk);
                            let mut payloads = Vec::new();
                            while let Some(payload) = frames.next_payload() {
                                payloads.push(payload);
                            }
                            payloads
                        };
                        for payload in payloads {
                            for line in lines.push(&payload) {
                                if tx.send(line).await.is_err() {
                                    return;
                                }
                            }
                        }
                    }
                    Ok(None) => {
                        debug!("Log stream for {} closed", id);
                        return;
                    }
                    Err(e) => {
                        debug!("Log stream for {} ended: {}", id, e);
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }
}

#[derive(Debug, Deserialize)]
struct ContainerSummary {
    #[serde(rename = "Id")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct InspectPayload {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Config", default)]
    config: InspectConfig,
}

#[derive(Debug, Default, Deserialize)]
struct InspectConfig {
    #[serde(rename = "Env", default)]
    env: Option<Vec<String>>,
    #[serde(rename = "Labels", default)]
    labels: Option<HashMap<String, String>>,
    #[serde(rename = "Tty", default)]
    tty: bool,
}

impl InspectPayload {
    fn into_details(self) -> ContainerDetails {
        ContainerDetails {
            id: self.id,
            name: self.name,
            env: self.config.env.unwrap_or_default(),
            labels: self.config.labels.unwrap_or_default(),
        }
    }
}

/// One entry of the /events stream; Docker emits both the legacy
/// top-level fields and the Actor form, depending on version.
#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    status: String,
    #[serde(default)]
    id: String,
    #[serde(rename = "Action", default)]
    action: String,
    #[serde(rename = "Actor", default)]
    actor: Option<EventActor>,
}

#[derive(Debug, Default, Deserialize)]
struct EventActor {
    #[serde(rename = "ID", default)]
    id: String,
}

impl EventPayload {
    fn into_event(self) -> Option<LifecycleEvent> {
        let status = if self.status.is_empty() {
            self.action
        } else {
            self.status
        };
        let id = if self.id.is_empty() {
            self.actor.map(|a| a.id).unwrap_or_default()
        } else {
            self.id
        };
        if id.is_empty() {
            return None;
        }
        ContainerStatus::parse(&status).map(|status| LifecycleEvent::new(id, status))
    }
}
