// Mount/unmount of the particle backdrop: owns the scene, keeps exactly one
// frame request in flight, and routes device events into the scene.

use crate::canvas::Canvas;
use crate::config::FieldConfig;
use crate::input::{DeviceEvent, EventSource, PointerState};
use crate::particle::Particle;
use crate::render::{render_frame, Frame};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::store::ParticleStore;
use crate::surface::{DensityTier, Resize, SurfaceManager};
use rand::RngCore;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsValue;

/// What the host provides at mount time.
pub struct Mount {
    pub canvas: Box<dyn Canvas>,
    pub viewport: (u32, u32),
    pub touch_capable: bool,
    pub rng: Box<dyn RngCore>,
}

struct Scene {
    config: FieldConfig,
    surface: SurfaceManager,
    store: ParticleStore,
    pointer: PointerState,
    touch_capable: bool,
    canvas: Box<dyn Canvas>,
    rng: Box<dyn RngCore>,
    pending: Option<FrameHandle>,
}

impl Scene {
    // Every resize regenerates the particles, same tier or not.
    fn resize(&mut self, width: u32, height: u32) -> Resize {
        let resize = self.surface.resize(width, height, &self.config);
        self.canvas.set_size(width, height);
        let count = resize.tier.particle_count(&self.config);
        self.store
            .rebuild(&mut *self.rng, count, width as f64, height as f64, &self.config);
        log::debug!(
            "surface resized to {}x{}, rebuilt {} particles ({:?})",
            width,
            height,
            count,
            resize.tier
        );
        resize
    }

    fn tick(&mut self) -> bool {
        #[cfg(feature = "frame-timing")]
        let _timer = crate::Timer::start("ParticleBackground::tick");
        let frame = Frame {
            surface: &self.surface,
            pointer: &self.pointer,
            touch_capable: self.touch_capable,
            config: &self.config,
        };
        render_frame(&mut *self.canvas, &mut self.store, &frame)
    }
}

/// Requests the next frame. The callback only holds weak references, so a
/// frame that slips past teardown finds nothing and does nothing.
fn schedule_tick<S: FrameScheduler + 'static>(
    scene: &Rc<RefCell<Scene>>,
    scheduler: &Rc<S>,
) -> Result<(), JsValue> {
    let weak_scene: Weak<RefCell<Scene>> = Rc::downgrade(scene);
    let weak_scheduler: Weak<S> = Rc::downgrade(scheduler);
    let handle = scheduler.request_frame(Box::new(move || {
        let (scene, scheduler) = match (weak_scene.upgrade(), weak_scheduler.upgrade()) {
            (Some(scene), Some(scheduler)) => (scene, scheduler),
            _ => return,
        };
        let keep_going = {
            let mut scene = scene.borrow_mut();
            scene.pending = None;
            scene.tick()
        };
        if !keep_going {
            log::debug!("drawing surface unavailable, frame loop stopped");
            return;
        }
        if let Err(err) = schedule_tick(&scene, &scheduler) {
            log::error!("failed to schedule next frame: {:?}", err);
        }
    }))?;
    scene.borrow_mut().pending = Some(handle);
    Ok(())
}

fn cancel_tick<S: FrameScheduler>(scene: &RefCell<Scene>, scheduler: &S) {
    if let Some(handle) = scene.borrow_mut().pending.take() {
        scheduler.cancel_frame(handle);
    }
}

pub struct ParticleBackground<S: FrameScheduler + 'static, E: EventSource> {
    scene: Rc<RefCell<Scene>>,
    scheduler: Rc<S>,
    events: E,
    subscription: Option<E::Subscription>,
}

impl<S: FrameScheduler + 'static, E: EventSource> ParticleBackground<S, E> {
    /// Sizes the surface, builds the first particle set, starts the frame
    /// loop and starts listening for device events.
    pub fn mount(
        config: FieldConfig,
        mount: Mount,
        scheduler: Rc<S>,
        events: E,
    ) -> Result<Self, JsValue> {
        let (width, height) = mount.viewport;
        let mut scene = Scene {
            config,
            surface: SurfaceManager::new(),
            store: ParticleStore::new(),
            pointer: PointerState::new(),
            touch_capable: mount.touch_capable,
            canvas: mount.canvas,
            rng: mount.rng,
            pending: None,
        };
        let resize = scene.resize(width, height);
        log::info!(
            "particle backdrop mounted: {}x{}, {:?} tier, {} particles, touch={}",
            width,
            height,
            resize.tier,
            scene.store.len(),
            scene.touch_capable
        );

        let scene = Rc::new(RefCell::new(scene));
        schedule_tick(&scene, &scheduler)?;

        let handler_scene = Rc::downgrade(&scene);
        let handler_scheduler = Rc::downgrade(&scheduler);
        let subscription = events.subscribe(Box::new(move |event| {
            let (scene, scheduler) = match (handler_scene.upgrade(), handler_scheduler.upgrade()) {
                (Some(scene), Some(scheduler)) => (scene, scheduler),
                _ => return,
            };
            match event {
                DeviceEvent::Resize { width, height } => {
                    let resize = scene.borrow_mut().resize(width, height);
                    if resize.tier_changed {
                        log::info!(
                            "density tier changed to {:?}, restarting frame loop",
                            resize.tier
                        );
                        cancel_tick(&scene, &*scheduler);
                        if let Err(err) = schedule_tick(&scene, &scheduler) {
                            log::error!("failed to restart frame loop: {:?}", err);
                        }
                    }
                }
                DeviceEvent::Pointer(pointer_event) => {
                    let mut scene = scene.borrow_mut();
                    let touch_capable = scene.touch_capable;
                    scene.pointer.apply(pointer_event, touch_capable);
                }
            }
        }));
        let subscription = match subscription {
            Ok(subscription) => subscription,
            Err(err) => {
                cancel_tick(&scene, &*scheduler);
                return Err(err);
            }
        };

        Ok(ParticleBackground {
            scene,
            scheduler,
            events,
            subscription: Some(subscription),
        })
    }

    /// Removes every listener and cancels the pending frame. Safe to call
    /// more than once.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.events.unsubscribe(subscription);
            cancel_tick(&self.scene, &*self.scheduler);
            log::debug!("particle backdrop unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// True while a frame request is outstanding.
    pub fn is_running(&self) -> bool {
        self.scene.borrow().pending.is_some()
    }

    pub fn particle_count(&self) -> usize {
        self.scene.borrow().store.len()
    }

    pub fn particles(&self) -> Vec<Particle> {
        self.scene.borrow().store.as_slice().to_vec()
    }

    pub fn tier(&self) -> DensityTier {
        self.scene.borrow().surface.tier()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        let scene = self.scene.borrow();
        (scene.surface.width(), scene.surface.height())
    }

    pub fn pointer(&self) -> PointerState {
        self.scene.borrow().pointer
    }
}

impl<S: FrameScheduler + 'static, E: EventSource> Drop for ParticleBackground<S, E> {
    fn drop(&mut self) {
        self.unmount();
    }
}
