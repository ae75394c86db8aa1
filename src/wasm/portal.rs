//! Page glue around the logo: app tiles, flash messages and the login/logout
//! buttons. These listeners live as long as the page.

use super::listener::Listener;
use crate::tiles::{
    fade_style, normalize_query, open_message, tile_matches, FLASH_DISMISS_MS, FLASH_FADE_MS,
    LOGOUT_PROMPT,
};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

pub fn init(document: &Document) -> Result<(), JsValue> {
    init_app_tiles(document)?;
    dismiss_flash_messages(document)?;
    confirm_logout(document)?;
    log_login(document)?;
    Ok(())
}

/// Hides tiles that match neither by name nor by description.
pub fn filter_apps(document: &Document, query: &str) -> Result<(), JsValue> {
    let query = normalize_query(query);
    for tile in elements(document, ".app-tile")? {
        let Some(tile) = tile.dyn_ref::<HtmlElement>() else { continue };
        let visible = tile_matches(&text_of(tile, "h3"), &text_of(tile, "p"), &query);
        if visible {
            tile.style().remove_property("display")?;
        } else {
            tile.style().set_property("display", "none")?;
        }
    }
    Ok(())
}

fn init_app_tiles(document: &Document) -> Result<(), JsValue> {
    let tiles = elements(document, ".app-tile")?;
    if tiles.is_empty() {
        log::warn!("no app tiles found");
        return Ok(());
    }
    log::info!("found {} app tiles", tiles.len());

    for tile in tiles {
        let entered = tile.clone();
        Listener::new(&tile, "mouseenter", move |_| {
            entered.class_list().add_1("hover").ok();
        })?
        .forget();

        let left = tile.clone();
        Listener::new(&tile, "mouseleave", move |_| {
            left.class_list().remove_1("hover").ok();
        })?
        .forget();

        // navigation itself is left to the link
        let clicked = tile.clone();
        Listener::new(&tile, "click", move |_| {
            let id = clicked.get_attribute("data-app-id");
            log::info!("{}", open_message(&text_of(&clicked, "h3"), id.as_deref()));
        })?
        .forget();
    }
    Ok(())
}

fn dismiss_flash_messages(document: &Document) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    for message in elements(document, ".flash-message")? {
        let fade = Closure::once_into_js(move || fade_out(message));
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            fade.unchecked_ref(),
            FLASH_DISMISS_MS,
        )?;
    }
    Ok(())
}

fn fade_out(message: Element) {
    if let Some(html) = message.dyn_ref::<HtmlElement>() {
        let style = html.style();
        for (property, value) in fade_style(FLASH_FADE_MS) {
            style.set_property(property, &value).ok();
        }
    }

    let Some(window) = web_sys::window() else { return };
    let remove = Closure::once_into_js(move || message.remove());
    if let Err(err) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(remove.unchecked_ref(), FLASH_FADE_MS)
    {
        log::warn!("could not schedule flash message removal: {err:?}");
    }
}

fn confirm_logout(document: &Document) -> Result<(), JsValue> {
    let Some(button) = document.query_selector(".logout-btn")? else {
        return Ok(());
    };
    Listener::new(&button, "click", |event| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(LOGOUT_PROMPT).ok())
            .unwrap_or(false);
        if !confirmed {
            event.prevent_default();
        }
    })?
    .forget();
    Ok(())
}

// Placeholder hook for a future sign-in flow.
fn log_login(document: &Document) -> Result<(), JsValue> {
    let Some(button) = document.query_selector(".login-btn")? else {
        return Ok(());
    };
    Listener::new(&button, "click", |_| log::info!("login clicked"))?.forget();
    Ok(())
}

fn elements(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn text_of(element: &Element, selector: &str) -> String {
    element
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|child| child.text_content())
        .unwrap_or_default()
}
