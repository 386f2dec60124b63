//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and the shared
//! request-timeout primitive.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::{AbortController, AbortSignal};

/// Все вызовы backend'а живут не дольше 60 секунд
pub const REQUEST_TIMEOUT_MS: u32 = 60_000;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 8000 for the backend server. A global `API_BASE`
/// set on `window` before the bundle loads takes precedence.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    if let Ok(value) = js_sys::Reflect::get(&window, &JsValue::from_str("API_BASE")) {
        if let Some(base) = value.as_string() {
            return base.trim_end_matches('/').to_string();
        }
    }
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:8000", protocol, hostname)
}

/// Build a full API URL from a path
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Обрыв запроса по таймеру через AbortController.
///
/// Drop отменяет таймер (штатное завершение запроса), поэтому экземпляр
/// должен жить, пока идёт `send()`. `timed_out()` отличает обрыв по
/// таймеру от прочих сетевых ошибок.
pub struct RequestTimeout {
    controller: AbortController,
    fired: Rc<Cell<bool>>,
    _timer: Timeout,
}

impl RequestTimeout {
    pub fn start(ms: u32) -> Option<Self> {
        let controller = AbortController::new().ok()?;
        let fired = Rc::new(Cell::new(false));
        let timer = {
            let controller = controller.clone();
            let fired = Rc::clone(&fired);
            Timeout::new(ms, move || {
                fired.set(true);
                controller.abort();
            })
        };
        Some(Self {
            controller,
            fired,
            _timer: timer,
        })
    }

    pub fn signal(&self) -> AbortSignal {
        self.controller.signal()
    }

    pub fn timed_out(&self) -> bool {
        self.fired.get()
    }
}
