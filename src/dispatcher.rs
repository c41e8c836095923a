//! Input dispatcher: turns user actions into backend calls and renders the
//! outcome through the presenter.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bridge::Backend;
use crate::console;
use crate::document::{ids, Document};
use crate::map::{ImageGeometry, RegionMap};
use crate::markup::NarrativeCategory;
use crate::presenter::Presenter;
use crate::startup::{LifecycleSignal, ReadyLatch};

/// Enter submits, unless an IME composition is still open.
pub fn is_submit_key(key: &str, is_composing: bool) -> bool {
    key == "Enter" && !is_composing
}

pub struct Dispatcher<D, B> {
    presenter: Rc<Presenter<D>>,
    backend: Rc<B>,
    regions: RegionMap,
    latch: ReadyLatch,
    /// Command text currently awaiting a response.
    in_flight: RefCell<Option<String>>,
}

impl<D: Document, B: Backend> Dispatcher<D, B> {
    pub fn new(presenter: Rc<Presenter<D>>, backend: Rc<B>, regions: RegionMap) -> Self {
        Self {
            presenter,
            backend,
            regions,
            latch: ReadyLatch::new(),
            in_flight: RefCell::new(None),
        }
    }

    #[cfg(test)]
    pub fn presenter(&self) -> &Presenter<D> {
        &self.presenter
    }

    fn clear_input(&self) {
        if let Err(e) = self
            .presenter
            .document()
            .set_input_value(ids::COMMAND_INPUT, "")
        {
            console::warn(&format!("submit_command: {e}"));
        }
    }

    /// Send the command typed into the input field.
    ///
    /// The echo is rendered before the call is made; the response (or the
    /// error) is rendered once the call settles. The input is cleared in
    /// every case. A trigger that repeats the command still in flight is
    /// dropped.
    pub async fn submit_command(&self) {
        let raw = match self.presenter.document().input_value(ids::COMMAND_INPUT) {
            Ok(v) => v,
            Err(e) => {
                console::warn(&format!("submit_command: {e}"));
                return;
            }
        };
        let command = raw.trim().to_string();
        if command.is_empty() {
            self.clear_input();
            return;
        }
        if self.in_flight.borrow().as_deref() == Some(command.as_str()) {
            console::log(&format!("'{command}' is already being sent; ignoring repeat"));
            return;
        }
        *self.in_flight.borrow_mut() = Some(command.clone());

        self.presenter
            .show_narrative_line(&command, NarrativeCategory::PlayerCommand);

        match self.backend.submit_player_command(&command).await {
            Ok(response) if !response.trim().is_empty() => {
                self.presenter
                    .show_narrative_line(&response, NarrativeCategory::CommandResponse);
            }
            Ok(_) => {}
            Err(e) => {
                console::error(&format!("submit_player_command failed: {e}"));
                self.presenter.show_narrative_line(
                    &format!("Error: Could not send command. {e}"),
                    NarrativeCategory::System,
                );
            }
        }

        *self.in_flight.borrow_mut() = None;
        self.clear_input();
    }

    /// Hit-test a click on the map image and report the region to the
    /// backend. Returns the region that was hit.
    pub async fn handle_map_click(
        &self,
        geometry: &ImageGeometry,
        pointer_x: f64,
        pointer_y: f64,
    ) -> Option<String> {
        let Some(region) = self.regions.region_at(geometry, pointer_x, pointer_y) else {
            console::log(&format!(
                "map click at ({pointer_x:.1}, {pointer_y:.1}) is outside every region"
            ));
            return None;
        };
        let name = region.name.clone();
        console::log(&format!("map region clicked: {name}"));

        match self.backend.submit_map_region_click(&name).await {
            Ok(response) => console::log(&format!("map click response: {response}")),
            Err(e) => {
                console::error(&format!("submit_map_region_click failed: {e}"));
                self.presenter.show_narrative_line(
                    &format!("Error: Could not process map click. {e}"),
                    NarrativeCategory::System,
                );
            }
        }
        Some(name)
    }

    /// Report readiness once, whichever lifecycle signal comes first.
    /// Returns true if this call sent the notification.
    pub async fn notify_ready(&self, signal: LifecycleSignal) -> bool {
        if !self.latch.try_fire() {
            console::log(&format!("{signal:?}: ready already signaled"));
            return false;
        }
        console::log(&format!("{signal:?}: signaling ready"));
        if let Err(e) = self
            .backend
            .signal_client_ready(signal.ready_message())
            .await
        {
            console::error(&format!("signal_client_ready failed: {e}"));
        }
        true
    }
}
