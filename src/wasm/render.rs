use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::gui::DebugPanel;
use super::input::EventListener;
use super::renderer::WebGlBackend;
use crate::demo::Demo;
use crate::panel::PanelSpec;
use crate::{DemoError, Settings, Viewport};

const BUTTON_PRIMARY: i16 = 0;
const BUTTON_SECONDARY: i16 = 2;

type SharedDemo = Rc<RefCell<Demo<WebGlBackend>>>;

/// Everything `stop` has to tear down.
struct Running {
    frame_loop: FrameLoop,
    canvas: HtmlCanvasElement,
    panel: DebugPanel,
    _listeners: Vec<EventListener>,
    _demo: SharedDemo,
}

thread_local! {
    static RUNNING: RefCell<Option<Running>> = const { RefCell::new(None) };
}

/// Self-rescheduling `requestAnimationFrame` loop that can be cancelled.
pub struct FrameLoop {
    cancelled: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    // `f` holds the animation-frame closure so that it can keep calling
    // `request_animation_frame` on itself; `cancel` takes it out to break
    // the cycle.
    callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    window: Window,
}

impl FrameLoop {
    pub fn start<F>(window: &Window, mut step: F) -> Result<Self, DemoError>
    where
        F: FnMut(f64) + 'static,
    {
        let cancelled = Rc::new(Cell::new(false));
        let pending = Rc::new(Cell::new(None));
        let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));

        let g = f.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new({
            let cancelled = cancelled.clone();
            let pending = pending.clone();
            let window = window.clone();
            move |timestamp: f64| {
                pending.set(None);
                if cancelled.get() {
                    return;
                }
                step(timestamp);

                // schedule next
                if let Some(callback) = f.borrow().as_ref() {
                    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                        Ok(id) => pending.set(Some(id)),
                        Err(e) => log::error!("request_animation_frame: {e:?}"),
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(callback) = g.borrow().as_ref() {
            let id = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
            pending.set(Some(id));
        }

        Ok(Self {
            cancelled,
            pending,
            callback: g,
            window: window.clone(),
        })
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
        if let Some(id) = self.pending.take() {
            self.window.cancel_animation_frame(id).ok();
        }
        self.callback.borrow_mut().take();
    }
}

fn viewport_of(window: &Window) -> Result<Viewport, DemoError> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(width.max(1.0) as f32, height.max(1.0) as f32))
}

/// Build the demo inside the configured container and start animating.
pub fn start(settings: Settings) -> Result<(), DemoError> {
    if RUNNING.with(|r| r.borrow().is_some()) {
        log::warn!("demo already running; restarting");
        stop();
    }

    let window = window().ok_or(DemoError::NoWindow)?;
    let document = window.document().ok_or(DemoError::NoDocument)?;
    let container = document
        .query_selector(&settings.container_selector)?
        .ok_or_else(|| DemoError::ContainerNotFound(settings.container_selector.clone()))?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| DemoError::Allocation("canvas"))?;
    canvas.style().set_property("display", "block")?;
    let viewport = viewport_of(&window)?;
    let (width, height) = viewport.drawing_buffer(settings.pixel_ratio);
    canvas.set_width(width);
    canvas.set_height(height);
    container.append_child(&canvas)?;

    let backend = match WebGlBackend::new(canvas.clone(), &settings) {
        Ok(backend) => backend,
        Err(e) => {
            canvas.remove();
            return Err(e);
        }
    };
    let panel_spec = PanelSpec::camera(&settings);
    let demo: SharedDemo = Rc::new(RefCell::new(Demo::new(settings, viewport, backend)));

    let listeners = listen(&window, &canvas, &demo)?;
    let panel = DebugPanel::mount(&document, &panel_spec, demo.clone())?;

    let frame_loop = {
        let demo = demo.clone();
        FrameLoop::start(&window, move |timestamp| demo.borrow_mut().frame(timestamp))?
    };

    log::info!(
        "demo started at {}x{} css px",
        viewport.width,
        viewport.height
    );
    RUNNING.with(|r| {
        *r.borrow_mut() = Some(Running {
            frame_loop,
            canvas,
            panel,
            _listeners: listeners,
            _demo: demo,
        })
    });
    Ok(())
}

/// Cancel the frame loop, drop every listener and remove the demo's DOM.
pub fn stop() {
    let Some(running) = RUNNING.with(|r| r.borrow_mut().take()) else {
        return;
    };
    running.frame_loop.cancel();
    running.panel.remove();
    running.canvas.remove();
    log::info!("demo stopped");
}

fn listen(
    window: &Window,
    canvas: &HtmlCanvasElement,
    demo: &SharedDemo,
) -> Result<Vec<EventListener>, DemoError> {
    let mut listeners = Vec::new();

    listeners.push({
        let demo = demo.clone();
        let win = window.clone();
        EventListener::new(window, "resize", move |_| match viewport_of(&win) {
            Ok(viewport) => demo.borrow_mut().resize(viewport),
            Err(e) => log::error!("resize: {e}"),
        })?
    });

    listeners.push({
        let demo = demo.clone();
        EventListener::typed(window, "mousemove", move |event: MouseEvent| {
            demo.borrow_mut()
                .pointer_moved(event.client_x() as f32, event.client_y() as f32);
        })?
    });

    // orbit controls: primary drag rotates, secondary drag pans
    let drag: Rc<Cell<Option<(i16, i32, i32)>>> = Rc::new(Cell::new(None));

    listeners.push({
        let drag = drag.clone();
        EventListener::typed(canvas, "pointerdown", move |event: MouseEvent| {
            drag.set(Some((event.button(), event.client_x(), event.client_y())));
        })?
    });

    listeners.push({
        let drag = drag.clone();
        let demo = demo.clone();
        EventListener::typed(window, "pointermove", move |event: MouseEvent| {
            let Some((button, x, y)) = drag.get() else {
                return;
            };
            let (dx, dy) = ((event.client_x() - x) as f32, (event.client_y() - y) as f32);
            drag.set(Some((button, event.client_x(), event.client_y())));
            match button {
                BUTTON_PRIMARY => demo.borrow_mut().orbit_rotate(dx, dy),
                BUTTON_SECONDARY => demo.borrow_mut().orbit_pan(dx, dy),
                _ => {}
            }
        })?
    });

    for kind in ["pointerup", "pointercancel"] {
        let drag = drag.clone();
        listeners.push(EventListener::new(window, kind, move |_| drag.set(None))?);
    }

    listeners.push({
        let demo = demo.clone();
        EventListener::typed(canvas, "wheel", move |event: WheelEvent| {
            event.prevent_default();
            demo.borrow_mut().orbit_dolly(event.delta_y() as f32);
        })?
    });

    listeners.push(EventListener::new(canvas, "contextmenu", |event| {
        event.prevent_default();
    })?);

    Ok(listeners)
}
