//! Outbound half of the bridge: calls from the client into the backend.
//!
//! The backend is reached through the Eel bridge: `eel.<name>(arg)` returns a
//! caller, and invoking that caller with no callback returns a `Promise`.

use std::fmt;

use futures_util::future::LocalBoxFuture;

/// Every outbound call either yields its value or fails with this.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    CallFailed(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::CallFailed(reason) => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for BridgeError {}

pub type BridgeFuture<'a, T> = LocalBoxFuture<'a, Result<T, BridgeError>>;

/// Request/response calls the client makes. Futures are `!Send`: everything
/// runs on the page's single thread.
pub trait Backend {
    fn submit_player_command(&self, text: &str) -> BridgeFuture<'_, String>;
    fn submit_map_region_click(&self, region_name: &str) -> BridgeFuture<'_, String>;
    fn signal_client_ready(&self, message: &str) -> BridgeFuture<'_, ()>;
}

#[cfg(target_arch = "wasm32")]
pub use eel::EelBridge;

#[cfg(target_arch = "wasm32")]
mod eel {
    use futures_util::FutureExt;
    use js_sys::{Function, Promise, Reflect};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    use super::{Backend, BridgeError, BridgeFuture};
    use crate::config::BridgeNames;

    pub struct EelBridge {
        names: BridgeNames,
    }

    impl EelBridge {
        pub fn new(names: BridgeNames) -> Self {
            Self { names }
        }

        fn call(&self, function: &str, arg: &str) -> BridgeFuture<'static, JsValue> {
            let function = function.to_string();
            let arg = arg.to_string();
            async move {
                let promise = invoke(&function, &arg)?;
                JsFuture::from(promise)
                    .await
                    .map_err(|e| BridgeError::CallFailed(describe(&e)))
            }
            .boxed_local()
        }
    }

    /// The global `eel` object, if the bridge script has loaded.
    fn eel_object() -> Result<JsValue, BridgeError> {
        let window =
            web_sys::window().ok_or_else(|| BridgeError::CallFailed("no window".into()))?;
        let eel = Reflect::get(&window, &JsValue::from_str("eel"))
            .map_err(|e| BridgeError::CallFailed(describe(&e)))?;
        if eel.is_undefined() || eel.is_null() {
            return Err(BridgeError::CallFailed("eel bridge not loaded".into()));
        }
        Ok(eel)
    }

    fn invoke(function: &str, arg: &str) -> Result<Promise, BridgeError> {
        let eel = eel_object()?;
        let f = Reflect::get(&eel, &JsValue::from_str(function))
            .ok()
            .and_then(|v| v.dyn_into::<Function>().ok())
            .ok_or_else(|| BridgeError::CallFailed(format!("eel.{function} is not exposed")))?;
        let caller = f
            .call1(&eel, &JsValue::from_str(arg))
            .map_err(|e| BridgeError::CallFailed(describe(&e)))?
            .dyn_into::<Function>()
            .map_err(|_| BridgeError::CallFailed(format!("eel.{function} returned no caller")))?;
        let result = caller
            .call0(&JsValue::NULL)
            .map_err(|e| BridgeError::CallFailed(describe(&e)))?;
        Ok(match result.dyn_into::<Promise>() {
            Ok(promise) => promise,
            Err(value) => Promise::resolve(&value),
        })
    }

    /// Human-readable text for a rejection value.
    fn describe(value: &JsValue) -> String {
        if let Some(s) = value.as_string() {
            return s;
        }
        if let Some(err) = value.dyn_ref::<js_sys::Error>() {
            return String::from(err.message());
        }
        js_sys::JSON::stringify(value)
            .ok()
            .and_then(|s| s.as_string())
            .unwrap_or_else(|| format!("{value:?}"))
    }

    fn response_text(value: JsValue) -> String {
        if value.is_undefined() || value.is_null() {
            return String::new();
        }
        value.as_string().unwrap_or_else(|| {
            js_sys::JSON::stringify(&value)
                .ok()
                .and_then(|s| s.as_string())
                .unwrap_or_default()
        })
    }

    impl Backend for EelBridge {
        fn submit_player_command(&self, text: &str) -> BridgeFuture<'_, String> {
            self.call(&self.names.submit_command, text)
                .map(|r| r.map(response_text))
                .boxed_local()
        }

        fn submit_map_region_click(&self, region_name: &str) -> BridgeFuture<'_, String> {
            self.call(&self.names.submit_map_click, region_name)
                .map(|r| r.map(response_text))
                .boxed_local()
        }

        fn signal_client_ready(&self, message: &str) -> BridgeFuture<'_, ()> {
            self.call(&self.names.client_ready, message)
                .map(|r| r.map(|_| ()))
                .boxed_local()
        }
    }
}
