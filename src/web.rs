//! Browser integration (`web` feature).
//!
//! Fetches curve JSON with `window.fetch()` and reports failures with
//! `window.alert()`. The fetch suspends only at the I/O boundary; the
//! outcome is produced on the page's single thread when the future
//! resolves.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::engine::CurveRenderEngine;
use crate::loader::{CurveLoader, LoadOutcome, Notifier, TransportError};
use crate::scene::SceneContainer;

/// Route `log` output to the browser console and panics to
/// `console.error`.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Notifier backed by a modal `window.alert()` dialog.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn alert(&self, message: &str) {
        log::warn!("{message}");
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

/// Convert a rejected JS promise value into a transport error, keeping the
/// JS error's name and message when it has them.
fn transport_error(value: &JsValue) -> TransportError {
    value.dyn_ref::<js_sys::Error>().map_or_else(
        || {
            TransportError::new(
                "Error",
                value.as_string().unwrap_or_else(|| format!("{value:?}")),
            )
        },
        |err| {
            TransportError::new(
                String::from(err.name()),
                String::from(err.message()),
            )
        },
    )
}

/// GET `url` and return the response body as text.
///
/// # Errors
///
/// Returns [`TransportError`] if there is no window, the request is
/// rejected, or the body cannot be read as text.
pub async fn fetch_text(url: &str) -> Result<String, TransportError> {
    let window = web_sys::window()
        .ok_or_else(|| TransportError::new("ReferenceError", "no window"))?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| transport_error(&e))?;
    let response: web_sys::Response =
        response.dyn_into().map_err(|e| transport_error(&e))?;

    let body = response.text().map_err(|e| transport_error(&e))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|e| transport_error(&e))?;
    text.as_string()
        .ok_or_else(|| TransportError::new("TypeError", "body is not text"))
}

/// Fetch `url` in the browser and build it into `container`.
pub async fn load_from_url<N, C>(
    loader: &CurveLoader<N>,
    url: &str,
    container: &mut C,
) -> LoadOutcome
where
    N: Notifier,
    C: SceneContainer + ?Sized,
{
    log::info!("loading curve from {url}");
    let body = fetch_text(url).await;
    loader.complete(url, body, container)
}

/// Fetch `url` in the browser and attach it to the engine's scene.
pub async fn load_into_engine(
    engine: &mut CurveRenderEngine,
    url: &str,
) -> LoadOutcome {
    log::info!("loading curve from {url}");
    let body = fetch_text(url).await;
    engine.complete_load(url, body)
}

/// Create an engine drawing into `canvas`.
///
/// # Errors
///
/// Returns [`WCurveError::Gpu`](crate::error::WCurveError::Gpu) if no GPU
/// context can be created for the canvas.
#[cfg(target_arch = "wasm32")]
pub async fn create_engine(
    canvas: web_sys::HtmlCanvasElement,
    options: crate::options::Options,
) -> Result<CurveRenderEngine, crate::error::WCurveError> {
    let size = (canvas.width(), canvas.height());
    CurveRenderEngine::new(wgpu::SurfaceTarget::Canvas(canvas), size, options)
        .await
}
