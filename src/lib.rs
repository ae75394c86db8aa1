pub mod config;
pub mod error;
pub mod extrude;
pub mod glyphs;
pub mod motion;
pub mod scene;
pub mod tiles;

pub use error::LogoError;

// Only compile browser-facing code when targeting wasm32; everything above
// builds and tests on the host.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use wasm_bindgen::prelude::*;

    mod controller;
    mod frame;
    mod listener;
    mod portal;
    mod render;

    pub use controller::LogoController;

    /// Id of the element the logo is drawn into.
    const LOGO_CONTAINER: &str = "logo3d";

    thread_local! {
        static MOUNTED: RefCell<Option<LogoController>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("portal loaded");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        init_portal(&document)?;

        if let Some(controller) = LogoController::mount(LOGO_CONTAINER)? {
            MOUNTED.with(|slot| *slot.borrow_mut() = Some(controller));
        }
        Ok(())
    }

    /// Wires tiles, flash messages and the login/logout buttons currently in
    /// `document`.
    pub fn init_portal(document: &web_sys::Document) -> Result<(), JsValue> {
        portal::init(document)
    }

    /// Stops the logo mounted at start-up and releases its listeners.
    #[wasm_bindgen]
    pub fn unmount_logo() {
        if let Some(mut controller) = MOUNTED.with(|slot| slot.borrow_mut().take()) {
            controller.stop();
        }
    }

    #[wasm_bindgen]
    pub fn filter_apps(query: &str) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        portal::filter_apps(&document, query)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{init_portal, LogoController};
