//! Burger button wiring for the mobile nav panel

use crate::dom;
use form16_core::MobileMenu;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

const OPEN_CLASS: &str = "active";

/// Mirrors [`MobileMenu`] onto the nav panel and its toggle button
pub struct MenuToggle {
    nav: Element,
    button: Element,
    state: RefCell<MobileMenu>,
}

impl MenuToggle {
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            nav: dom::required_query(document, ".main-nav")?,
            button: dom::required_query(document, ".menu-toggle")?,
            state: RefCell::new(MobileMenu::new()),
        })
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    pub fn toggle(&self) -> Result<(), JsValue> {
        self.with_state(|menu| {
            menu.toggle();
        })
    }

    /// Close the panel if it is open
    pub fn close(&self) -> Result<(), JsValue> {
        self.with_state(|menu| {
            menu.close();
        })
    }

    /// Run `f` against the menu state, then sync the DOM if the flag changed
    pub fn with_state<R>(&self, f: impl FnOnce(&mut MobileMenu) -> R) -> Result<R, JsValue> {
        let (was_open, result, now_open) = {
            let mut state = self.state.borrow_mut();
            let was_open = state.is_open();
            let result = f(&mut *state);
            (was_open, result, state.is_open())
        };
        if was_open != now_open {
            self.apply(now_open)?;
        }
        Ok(result)
    }

    fn apply(&self, open: bool) -> Result<(), JsValue> {
        dom::set_class(&self.nav, OPEN_CLASS, open)?;
        dom::set_class(&self.button, OPEN_CLASS, open)
    }

    /// Attach the click handler to the toggle button
    pub fn bind(self: &Rc<Self>) -> Result<(), JsValue> {
        let menu = Rc::clone(self);
        let onclick = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = menu.toggle() {
                web_sys::console::error_2(&"Menu toggle failed:".into(), &e);
            }
        });
        self.button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
        Ok(())
    }
}
