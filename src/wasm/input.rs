//! DOM event listeners that unregister themselves when dropped.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, EventTarget};

use crate::DemoError;

pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, kind: &'static str, f: F) -> Result<Self, DemoError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    /// Listener that receives the event as a more specific type, e.g. `MouseEvent`.
    pub fn typed<E, F>(target: &EventTarget, kind: &'static str, mut f: F) -> Result<Self, DemoError>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        Self::new(target, kind, move |event: Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                f(event);
            }
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
            .ok();
    }
}
