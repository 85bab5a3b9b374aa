//! Network adapter serving a site directory as the origin.

use std::{
    path::{Component, Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::{
    Result,
    error::Error,
    ports::Fetcher,
    worker::{Request, Response},
};

/// Serves files under a site root the way a static origin would.
///
/// `./` maps to `index.html`. Missing files and paths escaping the root answer
/// `404`. While offline, every fetch fails with [`Error::Network`].
#[derive(Debug)]
pub struct DirectoryOrigin {
    root: PathBuf,
    online: AtomicBool,
}

impl DirectoryOrigin {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            online: AtomicBool::new(true),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn resolve(&self, url: &str) -> Option<PathBuf> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let relative = Path::new(path.trim_start_matches("./").trim_start_matches('/'));

        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }

        if path.is_empty() || path.ends_with('/') {
            resolved.push("index.html");
        }
        Some(resolved)
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("css") => "text/css; charset=utf-8",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl Fetcher for DirectoryOrigin {
    async fn fetch(&self, request: &Request) -> Result<Response> {
        if !self.is_online() {
            return Err(Error::Network {
                url: request.url().to_string(),
                message: "origin is offline".to_string(),
            });
        }

        if request.url().contains("://") {
            return Err(Error::Network {
                url: request.url().to_string(),
                message: "cross-origin requests are not served".to_string(),
            });
        }

        let Some(path) = self.resolve(request.url()) else {
            return Ok(Response::new(404, "Not Found"));
        };

        match fs::read(&path).await {
            Ok(body) => {
                debug!(url = request.url(), path = %path.display(), "served from origin");
                Ok(Response::ok(body).with_header("Content-Type", content_type(&path)))
            }
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::IsADirectory
                ) =>
            {
                Ok(Response::new(404, "Not Found"))
            }
            Err(source) => Err(Error::Io {
                operation: format!("read {path:?}"),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn site() -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("index.html"), "<html>").unwrap();
        std::fs::create_dir(dir.path().join("icons")).unwrap();
        std::fs::write(dir.path().join("icons/icon-192.png"), [0x89, b'P']).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let dir = site();
        let origin = DirectoryOrigin::new(dir.path());

        let response = origin.fetch(&Request::get("./")).await.unwrap();
        assert_eq!(response.body, b"<html>".to_vec());
        assert_eq!(response.header("content-type"), Some("text/html; charset=utf-8"));
    }

    #[tokio::test]
    async fn test_nested_asset() {
        let dir = site();
        let origin = DirectoryOrigin::new(dir.path());

        let response = origin
            .fetch(&Request::get("./icons/icon-192.png?v=2"))
            .await
            .unwrap();
        assert!(response.is_ok());
        assert_eq!(response.header("content-type"), Some("image/png"));
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = site();
        let origin = DirectoryOrigin::new(dir.path());

        let response = origin.fetch(&Request::get("./app.js")).await.unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_parent_paths_are_404() {
        let dir = site();
        let origin = DirectoryOrigin::new(dir.path().join("icons"));

        let response = origin.fetch(&Request::get("./../index.html")).await.unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_offline_fails() {
        let dir = site();
        let origin = DirectoryOrigin::new(dir.path());
        origin.set_online(false);

        let err = origin.fetch(&Request::get("./")).await.unwrap_err();
        assert!(matches!(err, Error::Network { .. }));
    }
}
