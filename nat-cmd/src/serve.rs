//! Local HTTP server for the dashboard.
//!
//! Serves the built web bundle from a directory and a small JSON API that
//! runs the same handlers as the in-browser app:
//!
//! - `GET /api/dropdown?dataset=tout`
//! - `GET /api/figures/top?dataset=tout&n=5`
//! - `GET /api/figures/selected?dataset=tout&nationality=A&nationality=B`
//! - `GET /api/summary`
//!
//! The CSV text loaded at startup is also served at
//! `/data/<file name>`; the bundled app reads its datasets from there, so
//! the page always shows the files this server validated.
//!
//! The database is `Rc`-shared, so every connection runs on one thread
//! inside a `LocalSet`.

use anyhow::{anyhow, Context, Result};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode, Uri};
use hyper_util::rt::TokioIo;
use log::{error, info, warn};
use nat_data::views::TOP_N_DEFAULT;
use crate::data::LoadedData;
use nat_data::Dashboard;
use nat_db::DatasetKind;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;
use tokio::net::TcpListener;

type ResponseBody = BoxBody<Bytes, std::io::Error>;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

const ENFILE: i32 = 23;
const EMFILE: i32 = 24;

/// Shared state of all connections.
pub struct Server {
    dashboard: Dashboard,
    csv: Vec<(DatasetKind, String)>,
    dist: PathBuf,
}

impl Server {
    pub fn new(loaded: LoadedData, dist: PathBuf) -> Self {
        Self {
            dashboard: Dashboard::new(loaded.database),
            csv: loaded.csv,
            dist,
        }
    }

    fn dataset_csv(&self, path: &str) -> Option<&str> {
        let kind = DatasetKind::from_served_path(path)?;
        self.csv
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, text)| text.as_str())
    }

    /// Route one request. Errors are turned into a 500 by the caller.
    pub async fn handle(&self, method: &Method, uri: &Uri) -> Result<Response<ResponseBody>> {
        let path = uri.path();
        if method != Method::GET && method != Method::HEAD {
            info!("{} request to {} rejected", method, path);
            return plain(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
        }
        let params = QueryParams::parse(uri.query());

        match path {
            "/api/summary" => {
                let summaries = DatasetKind::ALL
                    .into_iter()
                    .map(|kind| self.dashboard.database().query_summary(kind))
                    .collect::<Result<Vec<_>>>()?;
                json(&summaries)
            }
            "/api/dropdown" => {
                let kind = match params.dataset() {
                    Ok(kind) => kind,
                    Err(msg) => return plain(StatusCode::BAD_REQUEST, &msg),
                };
                json(&self.dashboard.dropdown(kind)?)
            }
            "/api/figures/top" => {
                let (kind, n) = match params.dataset().and_then(|kind| Ok((kind, params.top_n()?))) {
                    Ok(parsed) => parsed,
                    Err(msg) => return plain(StatusCode::BAD_REQUEST, &msg),
                };
                json(&self.dashboard.top_figure(kind, n)?)
            }
            "/api/figures/selected" => {
                let kind = match params.dataset() {
                    Ok(kind) => kind,
                    Err(msg) => return plain(StatusCode::BAD_REQUEST, &msg),
                };
                json(&self.dashboard.selected_figure(kind, &params.nationalities())?)
            }
            _ if path.starts_with("/data/") => match self.dataset_csv(path) {
                Some(text) => Response::builder()
                    .header(CONTENT_TYPE, CSV_CONTENT_TYPE)
                    .body(full(text.to_string()))
                    .map_err(|e| anyhow!("Failed to build response: {}", e)),
                None => plain(StatusCode::NOT_FOUND, "Not Found"),
            },
            _ if path.starts_with("/api/") => {
                info!("Request to unknown endpoint: {}", path);
                plain(StatusCode::NOT_FOUND, "Not Found")
            }
            _ => self.static_file(path).await,
        }
    }

    async fn static_file(&self, path: &str) -> Result<Response<ResponseBody>> {
        let Some(relative) = sanitize_path(path) else {
            warn!("Rejected static path: {}", path);
            return plain(StatusCode::NOT_FOUND, "Not Found");
        };
        let file = self.dist.join(&relative);
        match tokio::fs::read(&file).await {
            Ok(contents) => Response::builder()
                .header(CONTENT_TYPE, content_type(&file))
                .body(full(contents))
                .map_err(|e| anyhow!("Failed to build response: {}", e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Static file not found: {}", file.display());
                plain(StatusCode::NOT_FOUND, "Not Found")
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", file.display())),
        }
    }
}

/// Decoded query string. Repeated keys keep every value.
#[derive(Debug, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let pairs = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        Self { pairs }
    }

    fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `dataset`, defaulting to the combined dataset when absent.
    pub fn dataset(&self) -> std::result::Result<DatasetKind, String> {
        match self.first("dataset") {
            None | Some("") => Ok(DatasetKind::default()),
            Some(token) => token.parse().map_err(|e| format!("{}", e)),
        }
    }

    /// `n`, defaulting to the slider default when absent.
    pub fn top_n(&self) -> std::result::Result<u32, String> {
        match self.first("n") {
            None | Some("") => Ok(TOP_N_DEFAULT),
            Some(raw) => raw
                .parse()
                .map_err(|_| format!("invalid n '{}': expected a non-negative integer", raw)),
        }
    }

    /// Every non-empty `nationality` value, in query order.
    pub fn nationalities(&self) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, v)| k == "nationality" && !v.is_empty())
            .map(|(_, v)| v.clone())
            .collect()
    }
}

/// Map a URL path to a path relative to the bundle directory.
///
/// `/` and directory paths resolve to `index.html`. Returns `None` for
/// anything that would escape the directory.
pub fn sanitize_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim_start_matches('/');
    let mut relative = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if trimmed.is_empty() || trimmed.ends_with('/') {
        relative.push("index.html");
    }
    Some(relative)
}

pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("csv") => CSV_CONTENT_TYPE,
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

fn full(bytes: impl Into<Bytes>) -> ResponseBody {
    Full::new(bytes.into()).map_err(|e| match e {}).boxed()
}

fn json<T: Serialize>(value: &T) -> Result<Response<ResponseBody>> {
    let body = serde_json::to_vec(value).context("Failed to serialize response")?;
    Response::builder()
        .header(CONTENT_TYPE, "application/json")
        .body(full(body))
        .map_err(|e| anyhow!("Failed to build response: {}", e))
}

fn plain(status: StatusCode, message: &str) -> Result<Response<ResponseBody>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(full(message.to_string()))
        .map_err(|e| anyhow!("Failed to build {} response: {}", status, e))
}

fn internal_error() -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .body(full(&b"Internal Server Error"[..]))
        .unwrap_or_else(|_| Response::new(full(&b"Error"[..])))
}

async fn serve_request(server: Rc<Server>, req: Request<hyper::body::Incoming>) -> Response<ResponseBody> {
    server
        .handle(req.method(), req.uri())
        .await
        .unwrap_or_else(|e| {
            error!("Request to {} failed: {:#}", req.uri(), e);
            internal_error()
        })
}

/// Pause before the next `accept` after a failed one. Running out of file
/// descriptors waits longer than other errors.
fn accept_backoff(err: &std::io::Error) -> Duration {
    warn!("Failed to accept connection: {}", err);
    match err.raw_os_error() {
        Some(EMFILE) | Some(ENFILE) => Duration::from_millis(500),
        _ => Duration::from_millis(10),
    }
}

async fn accept_loop(listener: TcpListener, server: Rc<Server>) -> Result<()> {
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        tokio::time::sleep(accept_backoff(&e)).await;
                        continue;
                    }
                };
                let io = TokioIo::new(stream);
                let server = Rc::clone(&server);
                tokio::task::spawn_local(async move {
                    let service = service_fn(move |req| {
                        let server = Rc::clone(&server);
                        async move { Ok::<_, std::convert::Infallible>(serve_request(server, req).await) }
                    });
                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {}", peer, err);
                    }
                });
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl-C, shutting down");
                return Ok(());
            }
        }
    }
}

/// Bind `host:port` and serve until Ctrl-C.
pub async fn run_serve(loaded: LoadedData, host: &str, port: u16, dist: PathBuf) -> Result<()> {
    if !dist.join("index.html").exists() {
        warn!(
            "{} has no index.html; only the JSON API will be useful",
            dist.display()
        );
    }

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!("Démarrage de l'application...");
    println!(
        "Accédez à l'application dans votre navigateur à l'adresse: http://{}/",
        addr
    );
    info!("Serving {} on {}", dist.display(), addr);

    let server = Rc::new(Server::new(loaded, dist));
    let local = tokio::task::LocalSet::new();
    local.run_until(accept_loop(listener, server)).await
}
