use super::frame::RenderLoop;
use super::listener::Listener;
use super::render::Renderer;
use crate::config::{LogoConfig, MotionConfig, SceneConfig};
use crate::motion::{hint_for, LogoMotion};
use crate::scene::{logo_scene, Camera, NodeId, Scene};
use glam::{Vec2, Vec3};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlCanvasElement, MouseEvent, TouchEvent};

/// Everything the frame callback and the input handlers share.
struct LogoState {
    scene: Scene,
    camera: Camera,
    renderer: Renderer,
    motion: LogoMotion,
    logo: NodeId,
    base_rotation: Vec3,
    container: Element,
    hint: Option<Element>,
}

impl LogoState {
    fn frame(&mut self, timestamp_ms: f64) {
        let current = self.motion.tick(timestamp_ms / 1000.0);
        if let Some(group) = self.scene.group_mut(self.logo) {
            group.rotation = self.base_rotation + Vec3::new(current.x, current.y, 0.0);
        }
        self.renderer.render(&self.scene, &self.camera);
    }

    fn resize(&mut self) {
        let (width, height) = client_size(&self.container);
        self.camera.set_viewport(width, height);
        self.renderer.set_size(width, height);
    }

    fn show_hint(&self) {
        if let Some(hint) = &self.hint {
            hint.set_text_content(Some(hint_for(self.motion.auto_rotate())));
        }
    }
}

/// The rotating, draggable logo inside one container element.
#[wasm_bindgen]
pub struct LogoController {
    state: Rc<RefCell<LogoState>>,
    render_loop: Option<RenderLoop>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl LogoController {
    /// Mounts the logo into the element with id `container_id`. Returns
    /// `undefined` without touching the page when there is no such element.
    pub fn mount(container_id: &str) -> Result<Option<LogoController>, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        Self::mount_with(
            &document,
            container_id,
            &LogoConfig::default(),
            &SceneConfig::default(),
            MotionConfig::default(),
        )
    }

    /// Cancels the render loop, detaches all listeners and removes the canvas.
    /// Calling it twice is harmless.
    pub fn stop(&mut self) {
        let Some(mut render_loop) = self.render_loop.take() else {
            return;
        };
        render_loop.stop();
        self.listeners.clear();
        self.state.borrow().renderer.canvas().remove();
        log::debug!("logo stopped");
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.render_loop
            .as_ref()
            .is_some_and(RenderLoop::is_running)
    }

    #[wasm_bindgen(getter, js_name = autoRotate)]
    pub fn auto_rotate(&self) -> bool {
        self.state.borrow().motion.auto_rotate()
    }

    #[wasm_bindgen(setter, js_name = autoRotate)]
    pub fn set_auto_rotate(&self, on: bool) {
        let mut state = self.state.borrow_mut();
        state.motion.set_auto_rotate(on);
        state.show_hint();
    }
}

impl LogoController {
    pub fn mount_with(
        document: &Document,
        container_id: &str,
        logo_config: &LogoConfig,
        scene_config: &SceneConfig,
        motion_config: MotionConfig,
    ) -> Result<Option<Self>, JsValue> {
        let Some(container) = document.get_element_by_id(container_id) else {
            log::debug!("no #{container_id} element, logo skipped");
            return Ok(None);
        };

        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        container.append_child(&canvas)?;

        let (width, height) = client_size(&container);
        let (scene, camera, logo) = logo_scene(scene_config, logo_config, width, height);
        let mut renderer = Renderer::new(canvas.clone())?;
        renderer.set_size(width, height);
        renderer.upload(&scene)?;

        let state = Rc::new(RefCell::new(LogoState {
            scene,
            camera,
            renderer,
            motion: LogoMotion::new(motion_config),
            logo,
            base_rotation: scene_config.logo_base_rotation,
            container,
            hint: document.get_element_by_id(&format!("{container_id}-hint")),
        }));
        state.borrow().show_hint();

        let listeners = wire_input(&state, &canvas)?;
        let render_loop = {
            let state = state.clone();
            RenderLoop::start(move |timestamp| state.borrow_mut().frame(timestamp))?
        };

        log::info!("logo mounted in #{container_id} ({width}x{height})");
        Ok(Some(Self {
            state,
            render_loop: Some(render_loop),
            listeners,
        }))
    }
}

fn wire_input(
    state: &Rc<RefCell<LogoState>>,
    canvas: &HtmlCanvasElement,
) -> Result<Vec<Listener>, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let on = |f: fn(&mut LogoState, &Event)| {
        let state = state.clone();
        move |event: Event| f(&mut state.borrow_mut(), &event)
    };

    Ok(vec![
        Listener::new(canvas, "mousedown", on(|s, e| {
            let Some(mouse) = e.dyn_ref::<MouseEvent>() else { return };
            e.prevent_default();
            s.motion.press(mouse_point(mouse));
            s.show_hint();
        }))?,
        Listener::new(&window, "mousemove", on(|s, e| {
            if let Some(mouse) = e.dyn_ref::<MouseEvent>() {
                s.motion.drag(mouse_point(mouse));
            }
        }))?,
        Listener::new(&window, "mouseup", on(|s, _| s.motion.release()))?,
        Listener::active(canvas, "touchstart", on(|s, e| {
            let Some(touch) = e.dyn_ref::<TouchEvent>() else { return };
            match touch_point(touch) {
                Some(at) => {
                    e.prevent_default();
                    s.motion.press(at);
                    s.show_hint();
                }
                // a second finger ends the drag
                None => s.motion.release(),
            }
        }))?,
        Listener::active(canvas, "touchmove", on(|s, e| {
            let Some(touch) = e.dyn_ref::<TouchEvent>() else { return };
            if !s.motion.pointer_down() {
                return;
            }
            if let Some(at) = touch_point(touch) {
                e.prevent_default();
                s.motion.drag(at);
            }
        }))?,
        Listener::new(&window, "touchend", on(|s, _| s.motion.release()))?,
        Listener::new(&window, "touchcancel", on(|s, _| s.motion.release()))?,
        Listener::new(canvas, "dblclick", on(|s, _| {
            let auto = s.motion.toggle_auto_rotate();
            s.show_hint();
            log::debug!("auto-rotate {}", if auto { "on" } else { "off" });
        }))?,
        Listener::new(&window, "resize", on(|s, _| s.resize()))?,
    ])
}

fn client_size(element: &Element) -> (u32, u32) {
    (
        element.client_width().max(0) as u32,
        element.client_height().max(0) as u32,
    )
}

fn mouse_point(event: &MouseEvent) -> Vec2 {
    Vec2::new(event.client_x() as f32, event.client_y() as f32)
}

/// Position of the only finger on screen, or `None` for multi-touch.
fn touch_point(event: &TouchEvent) -> Option<Vec2> {
    let touches = event.touches();
    if touches.length() != 1 {
        return None;
    }
    let touch = touches.get(0)?;
    Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
}
