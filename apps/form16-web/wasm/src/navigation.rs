//! Smooth-scroll navigation and scroll-driven nav highlighting
//!
//! Layout is measured from the DOM on every call (the header can change
//! height on resize), then handed to [`NavController`] for the decision.

use crate::dom;
use crate::menu::MenuToggle;
use form16_core::nav::section_from_href;
use form16_core::{InitialNav, NavController, PageConfig, SectionLayout};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions, Window};

const ACTIVE_CLASS: &str = "active";
const NAV_LINKS: &str = ".main-nav ul li a";

pub struct Navigation {
    window: Window,
    document: Document,
    header: Option<HtmlElement>,
    nav_links: Vec<Element>,
    sections: Vec<HtmlElement>,
    menu: Rc<MenuToggle>,
    controller: RefCell<NavController>,
}

impl Navigation {
    pub fn new(
        window: &Window,
        document: &Document,
        config: &PageConfig,
        menu: Rc<MenuToggle>,
    ) -> Result<Self, JsValue> {
        let header = document
            .query_selector(".main-header")?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let sections = dom::query_all(document, "section[id]")?
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect();

        Ok(Self {
            window: window.clone(),
            document: document.clone(),
            header,
            nav_links: dom::query_all(document, NAV_LINKS)?,
            sections,
            menu,
            controller: RefCell::new(NavController::new(config)),
        })
    }

    pub fn active_section(&self) -> Option<String> {
        self.controller.borrow().active().map(str::to_string)
    }

    fn header_height(&self) -> f64 {
        self.header
            .as_ref()
            .map(|h| h.offset_height() as f64)
            .unwrap_or(0.0)
    }

    /// Smooth-scroll to a section and make its nav link active
    ///
    /// A missing section is a silent no-op.
    pub fn scroll_to_section(&self, id: &str) -> Result<(), JsValue> {
        let Some(target) = self.document.get_element_by_id(id) else {
            return Ok(());
        };

        let page_top = target.get_bounding_client_rect().top() + self.window.scroll_y()?;
        let header_height = self.header_height();
        let top = self.menu.with_state(|menu| {
            self.controller
                .borrow_mut()
                .jump(id, page_top, header_height, menu)
        })?;

        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);

        self.apply_active()
    }

    /// Re-evaluate the active link for the current scroll position
    pub fn on_scroll(&self) -> Result<(), JsValue> {
        let layouts: Vec<SectionLayout> = self
            .sections
            .iter()
            .map(|s| SectionLayout::new(s.id(), s.offset_top() as f64, s.client_height() as f64))
            .collect();
        let scroll_y = self.window.scroll_y()?;

        let changed = self
            .controller
            .borrow_mut()
            .on_scroll(scroll_y, self.header_height(), &layouts);
        if changed {
            self.apply_active()?;
        }
        Ok(())
    }

    /// Activate from the URL fragment, or the home link without one
    pub fn apply_initial(&self) -> Result<(), JsValue> {
        let hash = self.window.location().hash()?;
        let decision = {
            let links = &self.nav_links;
            self.controller.borrow_mut().initial(&hash, |href| {
                links
                    .iter()
                    .any(|link| link.get_attribute("href").as_deref() == Some(href))
            })
        };

        match decision {
            InitialNav::Jump(section) => {
                self.apply_active()?;
                self.scroll_to_section(&section)
            }
            InitialNav::Home(_) => self.apply_active(),
            InitialNav::Nothing => Ok(()),
        }
    }

    fn apply_active(&self) -> Result<(), JsValue> {
        let controller = self.controller.borrow();
        for link in &self.nav_links {
            let href = link.get_attribute("href").unwrap_or_default();
            dom::set_class(link, ACTIVE_CLASS, controller.is_active_href(&href))?;
        }
        Ok(())
    }

    /// Intercept in-page anchor clicks and listen for scrolling
    pub fn bind(self: &Rc<Self>) -> Result<(), JsValue> {
        for anchor in dom::query_all(&self.document, r##"a[href^="#"]"##)? {
            let nav = Rc::clone(self);
            let href = anchor.get_attribute("href").unwrap_or_default();
            let onclick = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                event.prevent_default();
                let Some(section) = section_from_href(&href) else {
                    return;
                };
                if let Err(e) = nav.scroll_to_section(section) {
                    web_sys::console::error_2(&"Navigation failed:".into(), &e);
                }
            });
            anchor.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
            onclick.forget();
        }

        let nav = Rc::clone(self);
        let onscroll = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = nav.on_scroll() {
                web_sys::console::error_2(&"Scroll tracking failed:".into(), &e);
            }
        });
        self.window
            .add_event_listener_with_callback("scroll", onscroll.as_ref().unchecked_ref())?;
        onscroll.forget();

        Ok(())
    }
}
