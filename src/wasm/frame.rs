use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::window;

type FrameSlot = RefCell<Option<Closure<dyn FnMut(f64)>>>;

/// A `requestAnimationFrame` chain that can be cancelled.
///
/// The callback reschedules itself through a weak handle to its own slot, so
/// stopping (or dropping) the loop releases the closure. `stop` must not be
/// called from inside the frame callback.
pub struct RenderLoop {
    slot: Rc<FrameSlot>,
    pending: Rc<Cell<Option<i32>>>,
}

impl RenderLoop {
    /// Schedules `frame` for the next display refresh and every one after it.
    /// The argument is the host's high-resolution timestamp in milliseconds.
    pub fn start<F>(mut frame: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) + 'static,
    {
        let slot: Rc<FrameSlot> = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let this: Weak<FrameSlot> = Rc::downgrade(&slot);
        let next = pending.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            next.set(None);
            frame(timestamp);

            // schedule next
            let Some(slot) = this.upgrade() else { return };
            if let Some(callback) = slot.borrow().as_ref() {
                match request(callback) {
                    Ok(id) => next.set(Some(id)),
                    Err(err) => log::error!("could not schedule frame: {err:?}"),
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let id = request(slot.borrow().as_ref().ok_or("frame callback missing")?)?;
        pending.set(Some(id));
        Ok(Self { slot, pending })
    }

    pub fn is_running(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.pending.take() {
            if let Some(window) = window() {
                window.cancel_animation_frame(id).ok();
            }
        }
        self.slot.borrow_mut().take();
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    window()
        .ok_or("no window")?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}
