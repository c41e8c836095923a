//! Browser wiring: exposes the presenter to the backend, attaches input
//! listeners, and reports readiness. Everything here is glue; the behavior
//! lives in `presenter` and `dispatcher`.

use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, KeyboardEvent, MouseEvent};

use crate::bridge::EelBridge;
use crate::config;
use crate::console;
use crate::dispatcher::{is_submit_key, Dispatcher};
use crate::document::{ids, DomDocument};
use crate::inbound::{self, handlers};
use crate::map::{ImageGeometry, RegionMap};
use crate::presenter::Presenter;
use crate::startup::LifecycleSignal;

type Client = Dispatcher<DomDocument, EelBridge>;

pub fn start() -> Result<(), JsValue> {
    let config = config::load_embedded();
    let document = DomDocument::current().ok_or_else(|| JsValue::from_str("no document"))?;
    let presenter = Rc::new(Presenter::new(
        document,
        config.items.clone(),
        config.skills.clone(),
    ));
    let bridge = Rc::new(EelBridge::new(config.bridge.clone()));
    let client = Rc::new(Dispatcher::new(
        presenter.clone(),
        bridge,
        RegionMap::new(config.map_regions.clone()),
    ));

    expose_updaters(&presenter)?;
    wire_lifecycle(&client)
}

/// JSON view of a value passed in from JS. `undefined` and anything that
/// cannot be stringified become `null`.
fn to_json(value: &JsValue) -> Value {
    if value.is_undefined() {
        return Value::Null;
    }
    js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or(Value::Null)
}

/// Install `callback` as `window.adventureClient[name]`, where the
/// forwarders in `web/eel_bridge.js` look for it.
fn expose(name: &str, callback: &Function) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let key = JsValue::from_str(inbound::HANDLER_NAMESPACE);
    let mut namespace = Reflect::get(&window, &key)?;
    if !namespace.is_object() {
        namespace = Object::new().into();
        Reflect::set(&window, &key, &namespace)?;
    }
    Reflect::set(&namespace, &JsValue::from_str(name), callback)?;
    Ok(())
}

fn expose_updaters(presenter: &Rc<Presenter<DomDocument>>) -> Result<(), JsValue> {
    let narrative = Closure::<dyn Fn(JsValue, JsValue)>::new({
        let presenter = presenter.clone();
        move |text: JsValue, category: JsValue| {
            let (text, category) = inbound::decode_narrative(&to_json(&text), &to_json(&category));
            presenter.show_narrative_line(&text, category);
        }
    });
    expose(handlers::NARRATIVE, narrative.as_ref().unchecked_ref())?;
    narrative.forget();

    let status = Closure::<dyn Fn(JsValue, JsValue, JsValue, JsValue, JsValue, JsValue)>::new({
        let presenter = presenter.clone();
        move |a: JsValue, b: JsValue, c: JsValue, d: JsValue, e: JsValue, f: JsValue| {
            let args: Vec<Value> = [a, b, c, d, e, f].iter().map(to_json).collect();
            presenter.show_player_status(&inbound::decode_status(&args));
        }
    });
    expose(handlers::STATUS, status.as_ref().unchecked_ref())?;
    status.forget();

    let inventory = Closure::<dyn Fn(JsValue)>::new({
        let presenter = presenter.clone();
        move |items: JsValue| presenter.show_inventory(&inbound::decode_list(&to_json(&items)))
    });
    expose(handlers::INVENTORY, inventory.as_ref().unchecked_ref())?;
    inventory.forget();

    let skills = Closure::<dyn Fn(JsValue)>::new({
        let presenter = presenter.clone();
        move |items: JsValue| presenter.show_skills(&inbound::decode_list(&to_json(&items)))
    });
    expose(handlers::SKILLS, skills.as_ref().unchecked_ref())?;
    skills.forget();

    Ok(())
}

fn listen<E: FromWasmAbi + 'static>(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn element(id: &str) -> Option<Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

/// Attach command and map listeners. Runs once the DOM is parsed.
fn wire_inputs(client: &Rc<Client>) -> Result<(), JsValue> {
    match element(ids::COMMAND_INPUT) {
        Some(input) => listen(&input, "keydown", {
            let client = client.clone();
            move |event: KeyboardEvent| {
                if !is_submit_key(&event.key(), event.is_composing()) {
                    return;
                }
                event.prevent_default();
                let client = client.clone();
                spawn_local(async move { client.submit_command().await });
            }
        })?,
        None => console::warn(&format!("#{} not found; typed commands disabled", ids::COMMAND_INPUT)),
    }

    if let Some(button) = element(ids::SEND_BUTTON) {
        listen(&button, "click", {
            let client = client.clone();
            move |event: MouseEvent| {
                event.prevent_default();
                let client = client.clone();
                spawn_local(async move { client.submit_command().await });
            }
        })?;
    }

    match element(ids::MAP_IMAGE) {
        Some(map) => {
            let target = map.clone();
            listen(&target, "click", {
                let client = client.clone();
                move |event: MouseEvent| {
                    let geometry = map_geometry(&map);
                    let rect = map.get_bounding_client_rect();
                    let x = event.client_x() as f64 - rect.left();
                    let y = event.client_y() as f64 - rect.top();
                    let client = client.clone();
                    spawn_local(async move {
                        client.handle_map_click(&geometry, x, y).await;
                    });
                }
            })?
        }
        None => console::warn(&format!("#{} not found; map clicks disabled", ids::MAP_IMAGE)),
    }
    Ok(())
}

fn map_geometry(map: &Element) -> ImageGeometry {
    let rect = map.get_bounding_client_rect();
    let (natural_width, natural_height) = match map.dyn_ref::<web_sys::HtmlImageElement>() {
        Some(img) => (img.natural_width() as f64, img.natural_height() as f64),
        None => (rect.width(), rect.height()),
    };
    ImageGeometry {
        displayed_width: rect.width(),
        displayed_height: rect.height(),
        natural_width,
        natural_height,
    }
}

fn signal_ready(client: &Rc<Client>, signal: LifecycleSignal) {
    let client = client.clone();
    spawn_local(async move {
        client.notify_ready(signal).await;
    });
}

/// The module may load before or after either lifecycle event, so check
/// `readyState` for events that already fired and listen for the rest.
fn wire_lifecycle(client: &Rc<Client>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let ready_state = document.ready_state();

    if ready_state == "loading" {
        listen(&document, "DOMContentLoaded", {
            let client = client.clone();
            move |_: web_sys::Event| {
                if let Err(e) = wire_inputs(&client) {
                    console::error(&format!("wiring inputs failed: {e:?}"));
                }
                signal_ready(&client, LifecycleSignal::DomContentLoaded);
            }
        })?;
    } else {
        wire_inputs(client)?;
        signal_ready(client, LifecycleSignal::DomContentLoaded);
    }

    if ready_state == "complete" {
        signal_ready(client, LifecycleSignal::WindowLoad);
    } else {
        listen(&window, "load", {
            let client = client.clone();
            move |_: web_sys::Event| signal_ready(&client, LifecycleSignal::WindowLoad)
        })?;
    }
    Ok(())
}
