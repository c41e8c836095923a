// Native builds only exist to run the unit tests; the client itself is wasm.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod bridge;
mod config;
mod console;
mod dispatcher;
mod document;
mod inbound;
mod map;
mod markup;
mod presenter;
mod startup;
mod vitals;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();

    if let Err(e) = web::start() {
        console::error(&format!("startup failed: {e:?}"));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    console::error("this client runs in the browser; build it for wasm32-unknown-unknown");
}
