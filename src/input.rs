// Pointer tracking and the event-source seam the controller listens on.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use vecmath::Vector2;
use wasm_bindgen::JsValue;

/// Pointer and touch events, in surface pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    MouseMove { x: f64, y: f64 },
    MouseLeave,
    TouchStart,
    /// Position of the first active contact. Only sent while at least one
    /// contact is down.
    TouchMove { x: f64, y: f64 },
    TouchEnd,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DeviceEvent {
    Resize { width: u32, height: u32 },
    Pointer(PointerEvent),
}

/// Latest pointer position and whether a touch is in progress.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerState {
    position: Vector2<f64>,
    touching: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vector2<f64> {
        self.position
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }

    pub fn apply(&mut self, event: PointerEvent, touch_capable: bool) {
        match event {
            PointerEvent::MouseMove { x, y } | PointerEvent::TouchMove { x, y } => {
                self.position = [x, y];
            }
            PointerEvent::MouseLeave => {
                // Touch devices fire synthetic mouse leaves; keep the position.
                if !touch_capable {
                    self.position = [0.0, 0.0];
                }
            }
            PointerEvent::TouchStart => self.touching = true,
            PointerEvent::TouchEnd => {
                self.touching = false;
                self.position = [0.0, 0.0];
            }
        }
    }

    /// On touch devices the pointer only repels while a finger is down.
    pub fn repulsion_enabled(&self, touch_capable: bool) -> bool {
        self.touching || !touch_capable
    }
}

pub type EventHandler = Box<dyn FnMut(DeviceEvent)>;

/// Something that can deliver device events to a handler until unsubscribed.
pub trait EventSource {
    type Subscription;

    fn subscribe(&self, handler: EventHandler) -> Result<Self::Subscription, JsValue>;
    fn unsubscribe(&self, subscription: Self::Subscription);
}

/// Event source driven by hand, for tests and headless use.
#[derive(Clone, Default)]
pub struct SyntheticEvents {
    handlers: Rc<RefCell<Vec<(u32, EventHandler)>>>,
    next_id: Rc<Cell<u32>>,
}

pub struct SyntheticSubscription(u32);

impl SyntheticEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: DeviceEvent) {
        for (_, handler) in self.handlers.borrow_mut().iter_mut() {
            handler(event);
        }
    }

    pub fn pointer(&self, event: PointerEvent) {
        self.emit(DeviceEvent::Pointer(event));
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.emit(DeviceEvent::Resize { width, height });
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl EventSource for SyntheticEvents {
    type Subscription = SyntheticSubscription;

    fn subscribe(&self, handler: EventHandler) -> Result<SyntheticSubscription, JsValue> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.handlers.borrow_mut().push((id, handler));
        Ok(SyntheticSubscription(id))
    }

    fn unsubscribe(&self, subscription: SyntheticSubscription) {
        self.handlers
            .borrow_mut()
            .retain(|(id, _)| *id != subscription.0);
    }
}
