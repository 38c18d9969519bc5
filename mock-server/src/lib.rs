use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};

/// A file served by the mock server.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MockFile {
    pub body: Vec<u8>,
    pub last_modified: Option<String>,
}

impl MockFile {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            last_modified: None,
        }
    }

    pub fn last_modified(mut self, value: impl Into<String>) -> Self {
        self.last_modified = Some(value.into());
        self
    }
}

/// Files keyed by request path (`/dir/name.txt`).
pub type Files = Arc<RwLock<HashMap<String, MockFile>>>;

pub fn files<I, K>(entries: I) -> Files
where
    I: IntoIterator<Item = (K, MockFile)>,
    K: Into<String>,
{
    let map = entries
        .into_iter()
        .map(|(path, file)| (path.into(), file))
        .collect();
    Arc::new(RwLock::new(map))
}

pub fn app(files: Files) -> Router {
    Router::new()
        .route("/status/{code}", get(status))
        .route("/{*path}", get(serve_file))
        .with_state(files)
}

pub async fn run(listener: TcpListener, files: Files) -> Result<(), std::io::Error> {
    axum::serve(listener, app(files)).await
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

async fn serve_file(State(files): State<Files>, uri: Uri) -> Response {
    let files = files.read().await;
    let Some(file) = files.get(uri.path()) else {
        tracing::debug!(path = uri.path(), "not found");
        return StatusCode::NOT_FOUND.into_response();
    };

    let mut headers = HeaderMap::new();
    if let Some(value) = file
        .last_modified
        .as_deref()
        .and_then(|v| HeaderValue::from_str(v).ok())
    {
        headers.insert(header::LAST_MODIFIED, value);
    }
    (StatusCode::OK, headers, file.body.clone()).into_response()
}
