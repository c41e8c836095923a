//! Console diagnostics.
//!
//! In the browser these go to `console.log` / `console.warn` / `console.error`.
//! Native builds (unit tests) write to stderr instead, because `web_sys`
//! console bindings panic outside of a JS host.

const PREFIX: &str = "Adventure client";

#[cfg(target_arch = "wasm32")]
pub fn log(msg: &str) {
    web_sys::console::log_1(&format!("{PREFIX}: {msg}").into());
}

#[cfg(target_arch = "wasm32")]
pub fn warn(msg: &str) {
    web_sys::console::warn_1(&format!("{PREFIX}: {msg}").into());
}

#[cfg(target_arch = "wasm32")]
pub fn error(msg: &str) {
    web_sys::console::error_1(&format!("{PREFIX}: {msg}").into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log(msg: &str) {
    eprintln!("[log] {PREFIX}: {msg}");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(msg: &str) {
    eprintln!("[warn] {PREFIX}: {msg}");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn error(msg: &str) {
    eprintln!("[error] {PREFIX}: {msg}");
}
