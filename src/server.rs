use crate::config::Config;
use crate::form::render_form_page;
use crate::input::{parse_form, validate_required};
use crate::signature::render_signature;
use anyhow::Result;
use std::io::{Cursor, Read};
use tiny_http::{Header, Response, Server};
use tracing::{debug, error, info, warn};

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
pub const DOWNLOAD_DISPOSITION: &str = "attachment; filename=\"signature.html\"";
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: name, title, email, logoUrl";

/// Transport-independent response produced by [`handle_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub disposition: Option<&'static str>,
    pub body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: Some(HTML_CONTENT_TYPE),
            disposition: None,
            body,
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: Some(TEXT_CONTENT_TYPE),
            disposition: None,
            body: body.to_string(),
        }
    }

    fn no_content() -> Self {
        Self {
            status: 204,
            content_type: None,
            disposition: None,
            body: String::new(),
        }
    }

    pub fn internal_error() -> Self {
        Self::text(500, "Internal Server Error")
    }
}

/// Routes one request. `url` may carry a query string, which is ignored.
pub fn handle_request(method: &str, url: &str, body: &str, config: &Config) -> Reply {
    let method = method.to_ascii_uppercase();
    let path = url.split(['?', '#']).next().filter(|p| !p.is_empty()).unwrap_or("/");
    info!(method = %method, path, "request");

    if path == "/favicon.ico" {
        return Reply::no_content();
    }

    match (method.as_str(), path) {
        ("GET", "/") => {
            debug!("serving form page");
            Reply::html(render_form_page(&config.defaults, &config.theme))
        }
        ("POST", "/generate") => {
            debug!(bytes = body.len(), "generate body");
            let data = parse_form(body);
            if let Err(err) = validate_required(&data) {
                warn!(%err, "rejecting signature request");
                return Reply::text(400, MISSING_FIELDS_MESSAGE);
            }
            let html = render_signature(&data, &config.theme);
            info!(bytes = html.len(), "generated signature");
            Reply {
                disposition: Some(DOWNLOAD_DISPOSITION),
                ..Reply::html(html)
            }
        }
        ("POST", "/preview") => {
            debug!(bytes = body.len(), "preview body");
            let html = render_signature(&parse_form(body), &config.theme);
            debug!(bytes = html.len(), "rendered preview");
            Reply::html(html)
        }
        _ => Reply::text(404, "Not Found"),
    }
}

fn to_response(reply: Reply) -> Response<Cursor<Vec<u8>>> {
    let mut response = Response::from_string(reply.body).with_status_code(reply.status);
    let headers = [
        ("Content-Type", reply.content_type),
        ("Content-Disposition", reply.disposition),
    ];
    for (name, value) in headers {
        let Some(value) = value else {
            continue;
        };
        if let Ok(header) = Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            response = response.with_header(header);
        }
    }
    response
}

// Bodies that are not valid UTF-8 are decoded lossily and still routed.
fn read_body(reader: &mut dyn Read) -> std::io::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Binds the configured address and serves until the process exits.
pub fn serve(config: &Config) -> Result<()> {
    let address = config.server.address();
    let server = Server::http(&address)
        .map_err(|err| anyhow::anyhow!("failed to bind {}: {}", address, err))?;
    info!("Server running at http://{}", address);

    for mut request in server.incoming_requests() {
        let reply = match read_body(request.as_reader()) {
            Ok(body) => {
                let method = request.method().to_string();
                handle_request(&method, request.url(), &body, config)
            }
            Err(err) => {
                error!(%err, "failed to read request body");
                Reply::internal_error()
            }
        };
        if let Err(err) = request.respond(to_response(reply)) {
            error!(%err, "failed to send response");
        }
    }

    Ok(())
}
