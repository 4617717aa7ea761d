//! Floating debug panel with one collapsible folder of range sliders.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, HtmlInputElement};

use super::input::EventListener;
use super::renderer::WebGlBackend;
use crate::demo::Demo;
use crate::panel::{Axis, PanelSpec, SliderSpec};
use crate::DemoError;

const PANEL_STYLE: &str = "position:fixed;top:0;right:15px;width:245px;\
    font:11px sans-serif;color:#eee;background:#1f1f1f;z-index:10;";
const TITLE_STYLE: &str = "padding:6px 8px;cursor:pointer;font-weight:600;background:#111;";
const ROW_STYLE: &str = "display:flex;align-items:center;gap:6px;padding:3px 8px;";

fn element(document: &Document, tag: &str, style: &str) -> Result<HtmlElement, DemoError> {
    let el: HtmlElement = document
        .create_element(tag)?
        .dyn_into()
        .map_err(|_| DemoError::Allocation("element"))?;
    el.style().set_css_text(style);
    Ok(el)
}

pub struct DebugPanel {
    root: HtmlElement,
    _listeners: Vec<EventListener>,
}

impl DebugPanel {
    pub fn mount(
        document: &Document,
        spec: &PanelSpec,
        demo: Rc<RefCell<Demo<WebGlBackend>>>,
    ) -> Result<Self, DemoError> {
        let body = document.body().ok_or(DemoError::NoDocument)?;
        let root = element(document, "div", PANEL_STYLE)?;
        let title = element(document, "div", TITLE_STYLE)?;
        title.set_text_content(Some(spec.folder));
        let folder = element(document, "div", "")?;
        root.append_child(&title)?;
        root.append_child(&folder)?;

        let mut listeners = Vec::with_capacity(spec.sliders.len() + 1);

        let position = demo.borrow().camera().position;
        for slider in &spec.sliders {
            let initial = match slider.axis {
                Axis::X => position.x,
                Axis::Y => position.y,
                Axis::Z => position.z,
            };
            listeners.push(Self::add_slider(document, &folder, slider, initial, demo.clone())?);
        }

        set_open(&folder, spec.open);
        let mut open = spec.open;
        listeners.push(EventListener::new(&title, "click", move |_| {
            open = !open;
            set_open(&folder, open);
        })?);

        body.append_child(&root)?;
        Ok(Self {
            root,
            _listeners: listeners,
        })
    }

    fn add_slider(
        document: &Document,
        folder: &HtmlElement,
        spec: &SliderSpec,
        initial: f32,
        demo: Rc<RefCell<Demo<WebGlBackend>>>,
    ) -> Result<EventListener, DemoError> {
        let row = element(document, "div", ROW_STYLE)?;
        let label = element(document, "span", "width:20px;")?;
        label.set_text_content(Some(spec.axis.label()));

        let input: HtmlInputElement = document
            .create_element("input")?
            .dyn_into()
            .map_err(|_| DemoError::Allocation("input"))?;
        input.set_type("range");
        input.set_min(&spec.min.to_string());
        input.set_max(&spec.max.to_string());
        input.set_step(&spec.step.to_string());
        input.set_value(&spec.clamp(initial).to_string());
        input.style().set_css_text("flex:1;");

        let readout = element(document, "span", "width:40px;text-align:right;")?;
        readout.set_text_content(Some(&format!("{initial:.2}")));

        row.append_child(&label)?;
        row.append_child(&input)?;
        row.append_child(&readout)?;
        folder.append_child(&row)?;

        let spec = *spec;
        let target = input.clone();
        EventListener::new(&input, "input", move |_: Event| {
            let Ok(value) = target.value().parse::<f32>() else {
                return;
            };
            let value = spec.clamp(value);
            readout.set_text_content(Some(&format!("{value:.2}")));
            demo.borrow_mut().set_camera_axis(spec.axis, value);
        })
    }

    pub fn remove(&self) {
        self.root.remove();
    }
}

fn set_open(folder: &HtmlElement, open: bool) {
    let display = if open { "block" } else { "none" };
    folder.style().set_property("display", display).ok();
}
