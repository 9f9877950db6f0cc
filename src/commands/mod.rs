//! Server Command Wrappers
//!
//! Frontend bindings to the board's HTTP endpoints, organized by domain.
//! Create/update calls answer with HTML fragments; the rest answer with an
//! empty OK.

mod card;
mod checklist;

use std::sync::OnceLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::config::UiConfig;
use crate::error::ApiError;

// Re-export all public items
pub use card::*;
pub use checklist::*;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// `application/x-www-form-urlencoded` keeps only `* - . _` and alphanumerics
const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'*').remove(b'-').remove(b'.').remove(b'_');

static CONFIG: OnceLock<UiConfig> = OnceLock::new();

/// Set the endpoint root once at startup
pub fn configure(config: UiConfig) {
    let _ = CONFIG.set(config);
}

fn endpoint(path: &str) -> String {
    match CONFIG.get() {
        Some(cfg) => cfg.url(path),
        None => path.to_string(),
    }
}

/// Request payload
pub(crate) enum Body {
    Empty,
    Form(String),
    Json(String),
}

/// Encode pairs as a form body; spaces become `+`
pub fn form_encode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(value: &str) -> String {
    value
        .split(' ')
        .map(|part| utf8_percent_encode(part, FORM_VALUE).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// Issue a request and return the response text of a 2xx answer
pub(crate) async fn send(method: &str, path: &str, body: Body) -> Result<String, ApiError> {
    let url = endpoint(path);
    let opts = RequestInit::new();
    opts.set_method(method);
    let content_type = match &body {
        Body::Empty => None,
        Body::Form(s) => {
            opts.set_body(&JsValue::from_str(s));
            Some(FORM_CONTENT_TYPE)
        }
        Body::Json(s) => {
            opts.set_body(&JsValue::from_str(s));
            Some(JSON_CONTENT_TYPE)
        }
    };

    let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| ApiError::Network(js_error(e)))?;
    if let Some(ct) = content_type {
        request
            .headers()
            .set("Content-Type", ct)
            .map_err(|e| ApiError::Network(js_error(e)))?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(js_error(e)))?
        .dyn_into()
        .map_err(|_| ApiError::Body("not a fetch response".to_string()))?;

    log::debug!("{} {} -> {}", method, url, response.status());
    if !response.ok() {
        return Err(ApiError::Status {
            status: response.status(),
            path: path.to_string(),
        });
    }

    let text_promise = response.text().map_err(|e| ApiError::Body(js_error(e)))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| ApiError::Body(js_error(e)))?
        .as_string()
        .unwrap_or_default();
    Ok(text)
}
