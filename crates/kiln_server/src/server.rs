//! The listener, the accept loop, and request routing.

use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::sync::Arc;

use kiln_toolchain::ToolchainConfig;
use log::{info, warn};
use tiny_http::{Header, Method, Request, Response, Server};

use crate::error::ServerError;
use crate::{api, assets, git};

/// Where the server listens and which directories it exposes.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to bind; `0` asks the OS for an ephemeral port.
    pub port: u16,
    /// Directory the editor's static assets are served from.
    pub site_root: PathBuf,
    /// Directory proxied git commands run in.
    pub repo_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            site_root: PathBuf::from("."),
            repo_root: PathBuf::from("."),
        }
    }
}

/// A bound listener ready to serve the editor.
pub struct HttpServer {
    inner: Arc<Server>,
    toolchain: ToolchainConfig,
    config: ServerConfig,
}

/// Cloneable handle that stops a running [`HttpServer`] from another
/// thread by unblocking its accept loop.
#[derive(Clone)]
pub struct ShutdownHandle {
    inner: Arc<Server>,
}

impl ShutdownHandle {
    /// Makes the accept loop return after in-flight requests finish.
    pub fn shutdown(&self) {
        self.inner.unblock();
    }
}

impl HttpServer {
    /// Binds the listen socket. The toolchain is threaded through to every
    /// compile rather than read from shared state, so two servers with
    /// different toolchains can coexist in one process.
    pub fn bind(toolchain: ToolchainConfig, config: ServerConfig) -> Result<Self, ServerError> {
        let addr = format!("0.0.0.0:{}", config.port);
        let inner = Server::http(&addr).map_err(|err| ServerError::Bind {
            addr,
            reason: err.to_string(),
        })?;
        Ok(Self {
            inner: Arc::new(inner),
            toolchain,
            config,
        })
    }

    /// The port actually bound. Differs from the configured port only
    /// when that was `0`.
    pub fn port(&self) -> u16 {
        self.inner
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .unwrap_or(self.config.port)
    }

    /// Handle for stopping [`run`](Self::run) from another thread.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Serves requests one at a time until a [`ShutdownHandle`] fires.
    ///
    /// Single-threaded on purpose: compiles are the dominant cost and the
    /// server targets one developer, so request ordering stays simple and
    /// the toolchain needs no locking.
    pub fn run(&self) {
        info!("listening on port {}", self.port());
        for request in self.inner.incoming_requests() {
            self.handle(request);
        }
        info!("accept loop stopped");
    }

    fn handle(&self, mut request: Request) {
        let method = request.method().clone();
        let url = request.url().to_string();

        let response = match (&method, url.as_str()) {
            // CORS preflight; the headers below are the whole answer.
            (Method::Options, _) => Response::from_data(Vec::new()),
            (Method::Post, "/compile") => {
                let body = read_body(&mut request);
                let (status, reply) = api::handle_compile(&self.toolchain, &body);
                json_response(status, reply)
            }
            (Method::Post, "/git") => {
                let body = read_body(&mut request);
                let (status, reply) = git::handle_git(&self.config.repo_root, &body);
                json_response(status, reply)
            }
            (Method::Get, path) => match assets::load_asset(&self.config.site_root, path) {
                Some((bytes, content_type)) => append_header(
                    Response::from_data(bytes),
                    b"Content-Type",
                    content_type.as_bytes(),
                ),
                None => not_found(),
            },
            _ => not_found(),
        };

        if let Err(err) = request.respond(with_common_headers(response)) {
            warn!("failed to send response for {method} {url}: {err}");
        }
    }
}

/// Reads the request body, substituting an empty string on transport
/// errors so the endpoint's own body validation produces the reply.
fn read_body(request: &mut Request) -> String {
    let mut body = String::new();
    if request.as_reader().read_to_string(&mut body).is_err() {
        warn!("failed to read request body for {}", request.url());
        body.clear();
    }
    body
}

fn json_response(status: u16, body: String) -> Response<Cursor<Vec<u8>>> {
    append_header(
        Response::from_string(body).with_status_code(status),
        b"Content-Type",
        b"application/json",
    )
}

fn not_found() -> Response<Cursor<Vec<u8>>> {
    let (status, body) = api::error_reply(404, "Not found");
    json_response(status, body)
}

/// Attaches `name: value`; a static literal that fails to parse is
/// dropped rather than panicking the accept loop.
fn append_header<R: Read>(response: Response<R>, name: &[u8], value: &[u8]) -> Response<R> {
    match Header::from_bytes(name, value) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

/// Cross-origin isolation plus permissive CORS, attached to every reply.
///
/// COOP and COEP make the editor cross-origin isolated, which browsers
/// require before allowing `SharedArrayBuffer` in the wasm runtime.
fn with_common_headers<R: Read>(response: Response<R>) -> Response<R> {
    let response = append_header(response, b"Cross-Origin-Opener-Policy", b"same-origin");
    let response = append_header(response, b"Cross-Origin-Embedder-Policy", b"require-corp");
    let response = append_header(response, b"Access-Control-Allow-Origin", b"*");
    let response = append_header(response, b"Access-Control-Allow-Methods", b"POST, OPTIONS");
    append_header(response, b"Access-Control-Allow-Headers", b"Content-Type")
}
