use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::{Level, error, info};

mod metrics;

use mediaconv::{Artifact, Conversion};

#[derive(Parser, Debug)]
#[command(name = "mediaconv-server")]
#[command(about = "HTTP server for subtitle and audio conversion")]
struct Params {
    /// Host interface to bind to.
    #[arg(long = "host", default_value = "127.0.0.1")]
    host: String,

    /// TCP port to listen on.
    #[arg(long = "port", default_value_t = 8080)]
    port: u16,

    /// Maximum request body size (bytes).
    #[arg(long = "max-bytes", default_value_t = 100 * 1024 * 1024)]
    max_bytes: usize,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// Map a failed conversion onto a response status.
    fn from_conversion(err: mediaconv::Error) -> Self {
        let status = match &err {
            mediaconv::Error::UnsupportedCodec(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[tokio::main]
async fn main() {
    mediaconv::init_logging();

    if let Err(err) = run().await {
        error!(error = ?err, "mediaconv-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let params = Params::parse();

    metrics::init();

    let addr: SocketAddr = format!("{}:{}", params.host, params.port)
        .parse()
        .context("invalid host/port bind address")?;

    let listener = TcpListener::bind(addr).await.context("bind failed")?;
    info!(%addr, "listening");
    axum::serve(listener, app(params.max_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn app(max_bytes: usize) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics::prometheus_metrics))
        .route("/convert", post(convert))
        .route_layer(from_fn(metrics::track_http_metrics))
        .layer(DefaultBodyLimit::max(max_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = ?err, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

async fn root() -> &'static str {
    concat!(
        "mediaconv-server: POST /convert ",
        "(multipart fields: file, conversion_type = ",
        "srt_to_vtt | vtt_to_srt | ogg_to_mp3 | text_to_srt)"
    )
}

async fn healthz() -> &'static str {
    "ok"
}

async fn convert(mut multipart: Multipart) -> std::result::Result<Response, AppError> {
    let form = read_form(&mut multipart)
        .await
        .map_err(|err| AppError::bad_request(err.to_string()))?;

    let (Some(file), Some(selector)) = (form.file, form.conversion_type) else {
        return Err(AppError::bad_request("Missing file or conversion type"));
    };

    let conversion: Conversion = selector
        .parse()
        .map_err(|_| AppError::bad_request("Invalid conversion type"))?;

    // Transcoding is CPU-bound; keep it off the async workers.
    let res = tokio::task::spawn_blocking(move || mediaconv::convert(conversion, &file))
        .await
        .map_err(|err| AppError::internal(format!("conversion task failed: {err}")))?;

    metrics::record_conversion(conversion, res.is_ok());

    let artifact = res.map_err(AppError::from_conversion)?;
    artifact_response(artifact)
}

#[derive(Debug, Default)]
struct ConvertForm {
    file: Option<Vec<u8>>,
    conversion_type: Option<String>,
}

async fn read_form(multipart: &mut Multipart) -> Result<ConvertForm> {
    let mut form = ConvertForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "file" => form.file = Some(field.bytes().await?.to_vec()),
            "conversion_type" => form.conversion_type = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(form)
}

fn artifact_response(artifact: Artifact) -> std::result::Result<Response, AppError> {
    let content_type = HeaderValue::from_str(&content_type_for(artifact.media_type))
        .map_err(|err| AppError::internal(err.to_string()))?;
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        artifact.download_name()
    ))
    .map_err(|err| AppError::internal(err.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.into_bytes(),
    )
        .into_response())
}

fn content_type_for(media_type: &str) -> String {
    if media_type.starts_with("text/") {
        format!("{media_type}; charset=utf-8")
    } else {
        media_type.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    const BOUNDARY: &str = "mediaconv-test-boundary";

    fn multipart_request(fields: &[(&str, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(value);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/convert")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("valid request")
    }

    async fn send(req: Request<Body>) -> anyhow::Result<(StatusCode, Response)> {
        let res = app(1024 * 1024).oneshot(req).await?;
        Ok((res.status(), res))
    }

    async fn error_message(res: Response) -> anyhow::Result<String> {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
        let json: serde_json::Value = serde_json::from_slice(&bytes)?;
        Ok(json["error"].as_str().unwrap_or_default().to_owned())
    }

    #[tokio::test]
    async fn convert_srt_to_vtt_returns_attachment() -> anyhow::Result<()> {
        let req = multipart_request(&[
            ("conversion_type", b"srt_to_vtt"),
            ("file", b"1\n00:00:01,000 --> 00:00:02,000\nHi\n"),
        ]);
        let (status, res) = send(req).await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            res.headers()[header::CONTENT_TYPE],
            "text/vtt; charset=utf-8"
        );
        assert_eq!(
            res.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"converted.vtt\""
        );

        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
        assert_eq!(
            std::str::from_utf8(&body)?,
            "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.000\nHi\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn convert_accepts_empty_file() -> anyhow::Result<()> {
        let req = multipart_request(&[("file", b""), ("conversion_type", b"vtt_to_srt")]);
        let (status, res) = send(req).await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            res.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"converted.srt\""
        );
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
        assert!(body.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn convert_requires_both_fields() -> anyhow::Result<()> {
        let (status, res) = send(multipart_request(&[("file", b"hello")])).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(res).await?, "Missing file or conversion type");

        let (status, _) = send(multipart_request(&[("conversion_type", b"text_to_srt")])).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn convert_rejects_unknown_selector() -> anyhow::Result<()> {
        let req = multipart_request(&[("file", b"hello"), ("conversion_type", b"wav_to_flac")]);
        let (status, res) = send(req).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(res).await?, "Invalid conversion type");
        Ok(())
    }

    #[tokio::test]
    async fn convert_never_serves_corrupt_audio() -> anyhow::Result<()> {
        let req = multipart_request(&[
            ("conversion_type", b"ogg_to_mp3"),
            ("file", b"this is not an ogg file"),
        ]);
        let (status, res) = send(req).await?;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_ne!(res.headers()[header::CONTENT_TYPE], "audio/mpeg");
        assert!(error_message(res).await?.contains("failed to decode audio"));
        Ok(())
    }

    #[tokio::test]
    async fn convert_rejects_non_utf8_text() -> anyhow::Result<()> {
        let req = multipart_request(&[
            ("conversion_type", b"text_to_srt"),
            ("file", &[0xff, 0xfe]),
        ]);
        let (status, res) = send(req).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error_message(res).await?.contains("not valid UTF-8"));
        Ok(())
    }

    #[tokio::test]
    async fn healthz_is_ok() -> anyhow::Result<()> {
        let req = Request::builder().uri("/healthz").body(Body::empty())?;
        let (status, _) = send(req).await?;
        assert_eq!(status, StatusCode::OK);
        Ok(())
    }

    #[test]
    fn conversion_errors_map_to_statuses() {
        let status = |err| AppError::from_conversion(err).status;
        assert_eq!(
            status(mediaconv::Error::UnsupportedCodec("opus".into())),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            status(mediaconv::Error::UnknownConversion("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(mediaconv::Error::AudioEncode("rate".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn text_media_types_get_a_charset() {
        assert_eq!(content_type_for("text/plain"), "text/plain; charset=utf-8");
        assert_eq!(content_type_for("audio/mpeg"), "audio/mpeg");
    }
}
