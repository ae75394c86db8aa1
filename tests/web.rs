#![cfg(target_arch = "wasm32")]

use portal_logo::{init_portal, LogoController};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn missing_container_is_a_no_op() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvases = document.get_elements_by_tag_name("canvas").length();

    let mounted = LogoController::mount("no-such-container").expect("no error");
    assert!(mounted.is_none());
    assert_eq!(document.get_elements_by_tag_name("canvas").length(), canvases);
}

#[wasm_bindgen_test]
fn stop_tears_the_logo_down() {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = document
        .create_element("div")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    container.set_id("logo-under-test");
    container.style().set_property("width", "200px").unwrap();
    container.style().set_property("height", "100px").unwrap();
    document.body().unwrap().append_child(&container).unwrap();

    // headless runners may lack WebGL2; nothing to tear down then
    let Ok(Some(mut logo)) = LogoController::mount("logo-under-test") else {
        return;
    };
    assert!(logo.running());
    assert!(logo.auto_rotate());
    assert_eq!(container.get_elements_by_tag_name("canvas").length(), 1);

    logo.stop();
    assert!(!logo.running());
    assert_eq!(container.get_elements_by_tag_name("canvas").length(), 0);
    logo.stop();

    container.remove();
}

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn append(tag: &str, parent: &web_sys::Node) -> web_sys::HtmlElement {
    let element = document()
        .create_element(tag)
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    parent.append_child(&element).unwrap();
    element
}

/// A 200x100 container plus its hint element, with the logo mounted. `None`
/// when the browser has no WebGL2.
fn mounted(id: &str) -> Option<(web_sys::HtmlElement, web_sys::HtmlElement, LogoController)> {
    let body = document().body().unwrap();
    let container = append("div", &body);
    container.set_id(id);
    container.style().set_property("width", "200px").unwrap();
    container.style().set_property("height", "100px").unwrap();
    let hint = append("p", &body);
    hint.set_id(&format!("{id}-hint"));

    match LogoController::mount(id) {
        Ok(Some(logo)) => Some((container, hint, logo)),
        _ => {
            container.remove();
            hint.remove();
            None
        }
    }
}

fn canvas_in(container: &web_sys::HtmlElement) -> web_sys::HtmlCanvasElement {
    container
        .query_selector("canvas")
        .unwrap()
        .expect("canvas mounted")
        .dyn_into()
        .unwrap()
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn double_click_toggles_the_hint() {
    let Some((container, hint, mut logo)) = mounted("logo-dblclick") else {
        return;
    };
    let canvas = canvas_in(&container);
    assert_eq!(hint.text_content().unwrap(), "click and drag to rotate");

    let dblclick = web_sys::MouseEvent::new("dblclick").unwrap();
    canvas.dispatch_event(&dblclick).unwrap();
    assert!(!logo.auto_rotate());
    assert_eq!(hint.text_content().unwrap(), "double-click to resume auto-rotation");

    canvas.dispatch_event(&web_sys::MouseEvent::new("dblclick").unwrap()).unwrap();
    assert!(logo.auto_rotate());
    assert_eq!(hint.text_content().unwrap(), "click and drag to rotate");

    logo.stop();
    container.remove();
    hint.remove();
}

#[wasm_bindgen_test]
fn mouse_down_stops_auto_rotation_and_release_does_not_resume_it() {
    let Some((container, hint, mut logo)) = mounted("logo-press") else {
        return;
    };
    let canvas = canvas_in(&container);
    assert!(logo.auto_rotate());

    canvas.dispatch_event(&web_sys::MouseEvent::new("mousedown").unwrap()).unwrap();
    assert!(!logo.auto_rotate());
    assert_eq!(hint.text_content().unwrap(), "double-click to resume auto-rotation");

    let window = web_sys::window().unwrap();
    window.dispatch_event(&web_sys::MouseEvent::new("mouseup").unwrap()).unwrap();
    assert!(!logo.auto_rotate());

    logo.stop();
    container.remove();
    hint.remove();
}

#[wasm_bindgen_test]
fn window_resize_follows_the_container() {
    let Some((container, hint, mut logo)) = mounted("logo-resize") else {
        return;
    };
    let canvas = canvas_in(&container);
    assert_eq!((canvas.width(), canvas.height()), (200, 100));

    container.style().set_property("width", "300px").unwrap();
    container.style().set_property("height", "150px").unwrap();
    let window = web_sys::window().unwrap();
    window.dispatch_event(&web_sys::Event::new("resize").unwrap()).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (300, 150));

    logo.stop();
    container.remove();
    hint.remove();
}

#[wasm_bindgen_test]
fn app_tiles_toggle_the_hover_class() {
    let body = document().body().unwrap();
    let tile = append("a", &body);
    tile.set_class_name("app-tile");
    append("h3", &tile).set_text_content(Some("CRM"));

    init_portal(&document()).unwrap();

    tile.dispatch_event(&web_sys::Event::new("mouseenter").unwrap()).unwrap();
    assert!(tile.class_list().contains("hover"));
    tile.dispatch_event(&web_sys::Event::new("mouseleave").unwrap()).unwrap();
    assert!(!tile.class_list().contains("hover"));

    tile.remove();
}

#[wasm_bindgen_test]
fn cancelled_logout_prevents_navigation() {
    let window = web_sys::window().unwrap();
    let original = js_sys::Reflect::get(&window, &"confirm".into()).unwrap();
    js_sys::Reflect::set(
        &window,
        &"confirm".into(),
        &js_sys::Function::new_no_args("return false"),
    )
    .unwrap();

    let body = document().body().unwrap();
    let button = append("a", &body);
    button.set_class_name("logout-btn");
    init_portal(&document()).unwrap();

    let init = web_sys::EventInit::new();
    init.set_cancelable(true);
    let click = web_sys::Event::new_with_event_init_dict("click", &init).unwrap();
    let proceeded = button.dispatch_event(&click).unwrap();
    assert!(!proceeded);
    assert!(click.default_prevented());

    js_sys::Reflect::set(&window, &"confirm".into(), &original).unwrap();
    button.remove();
}

#[wasm_bindgen_test]
async fn flash_messages_fade_then_disappear() {
    let body = document().body().unwrap();
    let message = append("div", &body);
    message.set_class_name("flash-message");
    init_portal(&document()).unwrap();

    sleep(5200).await;
    assert!(message.is_connected());
    assert_eq!(message.style().get_property_value("opacity").unwrap(), "0");

    sleep(600).await;
    assert!(!message.is_connected());
}
