use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub const INDEX_DOCUMENT: &str = "index.html";

/// Serves files from a fixed directory, `/` being the index document.
#[derive(Clone)]
pub struct StaticFiles {
    root: Arc<PathBuf>,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a request path onto the root. Paths that try to climb out of it
    /// resolve to nothing.
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let relative = request_path.trim_start_matches('/');
        let relative = if relative.is_empty() {
            INDEX_DOCUMENT
        } else {
            relative
        };

        let mut path = self.root.to_path_buf();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(path)
    }

    pub async fn serve(&self, request_path: &str) -> Response {
        let Some(path) = self.resolve(request_path) else {
            return not_found();
        };

        match tokio::fs::read(&path).await {
            Ok(body) => ([(header::CONTENT_TYPE, content_type(&path))], body).into_response(),
            Err(e) => {
                debug!("No static file for {}: {}", request_path, e);
                not_found()
            }
        }
    }
}

pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        _ => "text/plain",
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}
