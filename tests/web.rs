//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use particle_backdrop::web::{viewport_size, DomEventSource, ARIA_LABEL};
use particle_backdrop::{DeviceEvent, EventSource, ParticleCanvas, PointerEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Event, HtmlCanvasElement, MouseEvent, MouseEventInit, Touch, TouchEvent, TouchEventInit,
    TouchInit,
};

wasm_bindgen_test_configure!(run_in_browser);

fn attached_canvas() -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn recording_source(
    canvas: &HtmlCanvasElement,
) -> (DomEventSource, Rc<RefCell<Vec<DeviceEvent>>>) {
    let source = DomEventSource::new(web_sys::window().unwrap(), canvas.clone());
    (source, Rc::new(RefCell::new(Vec::new())))
}

fn mouse_move(x: i32, y: i32) -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_client_x(x);
    init.set_client_y(y);
    MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap()
}

fn touch_move(canvas: &HtmlCanvasElement, x: f64, y: f64) -> TouchEvent {
    let touch_init = TouchInit::new(1, canvas);
    touch_init.set_client_x(x);
    touch_init.set_client_y(y);
    let touch = Touch::new(&touch_init).unwrap();

    let init = TouchEventInit::new();
    init.set_cancelable(true);
    init.set_touches(&js_sys::Array::of1(&touch));
    TouchEvent::new_with_event_init_dict("touchmove", &init).unwrap()
}

#[wasm_bindgen_test]
fn mount_sizes_canvas_to_viewport() {
    let canvas = attached_canvas();
    let mut backdrop = ParticleCanvas::mount(canvas.clone()).unwrap();
    let (width, height) = viewport_size(&web_sys::window().unwrap()).unwrap();

    assert_eq!((canvas.width(), canvas.height()), (width, height));
    assert_eq!(canvas.get_attribute("aria-label").as_deref(), Some(ARIA_LABEL));
    let expected = if backdrop.is_mobile() { 100 } else { 200 };
    assert_eq!(backdrop.particle_count(), expected);
    assert!(backdrop.is_running());

    backdrop.unmount();
    assert!(!backdrop.is_running());
    assert_eq!(backdrop.particle_count(), 0);
    canvas.remove();
}

#[wasm_bindgen_test]
fn mouse_move_reports_client_coordinates() {
    let canvas = attached_canvas();
    let (source, seen) = recording_source(&canvas);
    let sink = seen.clone();
    let subscription = source
        .subscribe(Box::new(move |event| sink.borrow_mut().push(event)))
        .unwrap();

    canvas.dispatch_event(&mouse_move(37, 91)).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![DeviceEvent::Pointer(PointerEvent::MouseMove {
            x: 37.0,
            y: 91.0
        })]
    );
    source.unsubscribe(subscription);
    canvas.remove();
}

#[wasm_bindgen_test]
fn touch_move_blocks_scrolling_and_reports_first_contact() {
    let canvas = attached_canvas();
    let (source, seen) = recording_source(&canvas);
    let sink = seen.clone();
    let subscription = source
        .subscribe(Box::new(move |event| sink.borrow_mut().push(event)))
        .unwrap();

    let event = touch_move(&canvas, 12.5, 40.0);
    canvas.dispatch_event(&event).unwrap();

    // A passive listener would have had preventDefault ignored.
    assert!(event.default_prevented());
    assert_eq!(
        *seen.borrow(),
        vec![DeviceEvent::Pointer(PointerEvent::TouchMove {
            x: 12.5,
            y: 40.0
        })]
    );
    source.unsubscribe(subscription);
    canvas.remove();
}

#[wasm_bindgen_test]
fn touch_move_without_contacts_is_ignored() {
    let canvas = attached_canvas();
    let (source, seen) = recording_source(&canvas);
    let sink = seen.clone();
    let subscription = source
        .subscribe(Box::new(move |event| sink.borrow_mut().push(event)))
        .unwrap();

    let init = TouchEventInit::new();
    init.set_cancelable(true);
    let event = TouchEvent::new_with_event_init_dict("touchmove", &init).unwrap();
    canvas.dispatch_event(&event).unwrap();

    assert!(!event.default_prevented());
    assert!(seen.borrow().is_empty());
    source.unsubscribe(subscription);
    canvas.remove();
}

#[wasm_bindgen_test]
fn unsubscribe_removes_every_listener() {
    let canvas = attached_canvas();
    let window = web_sys::window().unwrap();
    let (source, seen) = recording_source(&canvas);
    let sink = seen.clone();
    let subscription = source
        .subscribe(Box::new(move |event| sink.borrow_mut().push(event)))
        .unwrap();

    let fire_all = || {
        window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
        canvas.dispatch_event(&mouse_move(1, 2)).unwrap();
        canvas.dispatch_event(&touch_move(&canvas, 3.0, 4.0)).unwrap();
        for name in ["mouseleave", "touchstart", "touchend"] {
            canvas.dispatch_event(&Event::new(name).unwrap()).unwrap();
        }
    };

    fire_all();
    let (width, height) = viewport_size(&window).unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![
            DeviceEvent::Resize { width, height },
            DeviceEvent::Pointer(PointerEvent::MouseMove { x: 1.0, y: 2.0 }),
            DeviceEvent::Pointer(PointerEvent::TouchMove { x: 3.0, y: 4.0 }),
            DeviceEvent::Pointer(PointerEvent::MouseLeave),
            DeviceEvent::Pointer(PointerEvent::TouchStart),
            DeviceEvent::Pointer(PointerEvent::TouchEnd),
        ]
    );

    source.unsubscribe(subscription);
    seen.borrow_mut().clear();
    fire_all();
    assert!(seen.borrow().is_empty());
    canvas.remove();
}

#[wasm_bindgen_test]
fn timer_opens_and_closes_a_console_scope() {
    let timer = particle_backdrop::Timer::start("particle-backdrop timer");
    assert_eq!(timer.label(), "particle-backdrop timer");
    drop(timer);
}

#[cfg(feature = "frame-timing")]
#[wasm_bindgen_test]
fn frame_timing_build_mounts_and_unmounts() {
    let canvas = attached_canvas();
    let mut backdrop = ParticleCanvas::mount(canvas.clone()).unwrap();
    assert!(backdrop.is_running());
    backdrop.unmount();
    canvas.remove();
}
