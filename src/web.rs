// Browser bindings: a 2D canvas context, requestAnimationFrame and DOM
// listeners behind the crate's Canvas / FrameScheduler / EventSource seams.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::FieldConfig;
use crate::input::{DeviceEvent, EventHandler, EventSource, PointerEvent};
use crate::lifecycle::{Mount, ParticleBackground};
use crate::scheduler::{FrameCallback, FrameHandle, FrameScheduler};
use crate::surface::DensityTier;
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement,
    MouseEvent, TouchEvent, Window,
};

pub const ARIA_LABEL: &str = "Interactive particle background effect";

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// `Ok(None)` if the element has no 2D context to give.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Option<CanvasSurface>, JsValue> {
        let context = match canvas.get_context("2d")? {
            Some(context) => context.dyn_into::<CanvasRenderingContext2d>()?,
            None => return Ok(None),
        };
        Ok(Some(CanvasSurface { canvas, context }))
    }
}

impl Canvas for CanvasSurface {
    fn is_available(&self) -> bool {
        self.canvas.is_connected()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn fill_horizontal_gradient(&mut self, width: f64, height: f64, left: Color, right: Color) {
        let gradient = self.context.create_linear_gradient(0.0, 0.0, width, 0.0);
        if let Err(err) = gradient
            .add_color_stop(0.0, &left.to_css())
            .and_then(|_| gradient.add_color_stop(1.0, &right.to_css()))
        {
            log::warn!("invalid gradient stop: {:?}", err);
        }
        self.context.set_fill_style_canvas_gradient(&gradient);
        self.context.fill_rect(0.0, 0.0, width, height);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.context.set_global_alpha(alpha);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.context.set_fill_style_str(&color.to_css());
        self.context.begin_path();
        if self.context.arc(x, y, radius, 0.0, TAU).is_ok() {
            self.context.fill();
        }
    }
}

pub struct WindowScheduler {
    window: Window,
}

impl WindowScheduler {
    pub fn new(window: Window) -> Self {
        WindowScheduler { window }
    }
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, JsValue> {
        // The JS side frees a once-closure after it runs. A cancelled one is
        // never freed, but it only holds weak references into the scene.
        let closure = Closure::once_into_js(move || callback());
        let id = self.window.request_animation_frame(closure.unchecked_ref())?;
        Ok(FrameHandle(id))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if let Err(err) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle.0, err);
        }
    }
}

pub fn viewport_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or("innerWidth is not a number")?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or("innerHeight is not a number")?;
    Ok((width as u32, height as u32))
}

pub fn is_touch_capable(window: &Window) -> bool {
    let target: &js_sys::Object = window.as_ref();
    js_sys::Reflect::has(target, &JsValue::from_str("ontouchstart")).unwrap_or(false)
}

/// Window resize plus pointer and touch events on the canvas.
pub struct DomEventSource {
    window: Window,
    canvas: HtmlCanvasElement,
}

impl DomEventSource {
    pub fn new(window: Window, canvas: HtmlCanvasElement) -> Self {
        DomEventSource { window, canvas }
    }
}

struct Listener {
    target: EventTarget,
    name: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Registered DOM listeners. Dropping it removes them all.
pub struct DomSubscription {
    listeners: Vec<Listener>,
}

impl DomSubscription {
    fn listen(
        &mut self,
        target: &EventTarget,
        name: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    ) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            name,
            closure,
        });
        Ok(())
    }

    // touchmove has to be non-passive or preventDefault is ignored.
    fn listen_active(
        &mut self,
        target: &EventTarget,
        name: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    ) -> Result<(), JsValue> {
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        self.listeners.push(Listener {
            target: target.clone(),
            name,
            closure,
        });
        Ok(())
    }
}

impl Drop for DomSubscription {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            if let Err(err) = listener.target.remove_event_listener_with_callback(
                listener.name,
                listener.closure.as_ref().unchecked_ref(),
            ) {
                log::warn!("failed to remove {} listener: {:?}", listener.name, err);
            }
        }
    }
}

fn dispatch(
    handler: &Rc<RefCell<EventHandler>>,
    translate: impl Fn(&Event) -> Option<DeviceEvent> + 'static,
) -> Closure<dyn FnMut(Event)> {
    let handler = handler.clone();
    Closure::wrap(Box::new(move |event: Event| {
        if let Some(device_event) = translate(&event) {
            let mut handler = handler.borrow_mut();
            (*handler)(device_event);
        }
    }) as Box<dyn FnMut(Event)>)
}

fn mouse_move(event: &Event) -> Option<DeviceEvent> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(DeviceEvent::Pointer(PointerEvent::MouseMove {
        x: event.client_x() as f64,
        y: event.client_y() as f64,
    }))
}

fn touch_move(event: &Event) -> Option<DeviceEvent> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    // Keep the page from scrolling while a finger drags over the backdrop.
    event.prevent_default();
    Some(DeviceEvent::Pointer(PointerEvent::TouchMove {
        x: touch.client_x() as f64,
        y: touch.client_y() as f64,
    }))
}

impl EventSource for DomEventSource {
    type Subscription = DomSubscription;

    fn subscribe(&self, handler: EventHandler) -> Result<DomSubscription, JsValue> {
        let handler = Rc::new(RefCell::new(handler));
        let window_target: &EventTarget = self.window.as_ref();
        let canvas_target: &EventTarget = self.canvas.as_ref();
        let mut subscription = DomSubscription {
            listeners: Vec::with_capacity(6),
        };

        let window = self.window.clone();
        subscription.listen(
            window_target,
            "resize",
            dispatch(&handler, move |_| match viewport_size(&window) {
                Ok((width, height)) => Some(DeviceEvent::Resize { width, height }),
                Err(err) => {
                    log::warn!("could not read viewport size: {:?}", err);
                    None
                }
            }),
        )?;
        subscription.listen(canvas_target, "mousemove", dispatch(&handler, mouse_move))?;
        subscription.listen_active(canvas_target, "touchmove", dispatch(&handler, touch_move))?;
        subscription.listen(
            canvas_target,
            "mouseleave",
            dispatch(&handler, |_| Some(DeviceEvent::Pointer(PointerEvent::MouseLeave))),
        )?;
        subscription.listen(
            canvas_target,
            "touchstart",
            dispatch(&handler, |_| Some(DeviceEvent::Pointer(PointerEvent::TouchStart))),
        )?;
        subscription.listen(
            canvas_target,
            "touchend",
            dispatch(&handler, |_| Some(DeviceEvent::Pointer(PointerEvent::TouchEnd))),
        )?;
        Ok(subscription)
    }

    fn unsubscribe(&self, subscription: DomSubscription) {
        drop(subscription);
    }
}

#[wasm_bindgen]
pub struct ParticleCanvas {
    background: Option<ParticleBackground<WindowScheduler, DomEventSource>>,
}

#[wasm_bindgen]
impl ParticleCanvas {
    /// Starts the backdrop on `canvas`. A canvas without a 2D context gives
    /// an inert handle rather than an error.
    pub fn mount(canvas: HtmlCanvasElement) -> Result<ParticleCanvas, JsValue> {
        canvas.set_attribute("aria-label", ARIA_LABEL)?;
        let window = web_sys::window().ok_or("no global window")?;
        let surface = match CanvasSurface::new(canvas.clone())? {
            Some(surface) => surface,
            None => {
                log::warn!("canvas has no 2d context, particle backdrop disabled");
                return Ok(ParticleCanvas { background: None });
            }
        };

        let mount = Mount {
            canvas: Box::new(surface),
            viewport: viewport_size(&window)?,
            touch_capable: is_touch_capable(&window),
            rng: Box::new(rand::thread_rng()),
        };
        let scheduler = Rc::new(WindowScheduler::new(window.clone()));
        let events = DomEventSource::new(window, canvas);
        let background =
            ParticleBackground::mount(FieldConfig::default(), mount, scheduler, events)?;
        Ok(ParticleCanvas {
            background: Some(background),
        })
    }

    pub fn unmount(&mut self) {
        if let Some(mut background) = self.background.take() {
            background.unmount();
        }
    }

    pub fn particle_count(&self) -> u32 {
        self.background
            .as_ref()
            .map_or(0, |background| background.particle_count() as u32)
    }

    pub fn is_mobile(&self) -> bool {
        self.background
            .as_ref()
            .map_or(false, |background| background.tier() == DensityTier::Mobile)
    }

    pub fn is_running(&self) -> bool {
        self.background
            .as_ref()
            .map_or(false, |background| background.is_running())
    }
}
