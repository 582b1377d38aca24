//! WASM bindings for the Form 16 landing page
//!
//! All page behavior is decided in `form16-core`; this crate binds it to the
//! DOM, `fetch` and `IntersectionObserver`.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { PageController } from './pkg/form16_web_wasm.js';
//!
//! await init();
//!
//! document.addEventListener('DOMContentLoaded', () => {
//!     const page = PageController.mount();
//!     // inline onclick="scrollToSection('analyzer-tool')" handlers
//!     window.scrollToSection = (id) => page.scrollToSection(id);
//! });
//! ```

pub mod dom;
pub mod fade;
pub mod fetch;
pub mod menu;
pub mod navigation;
pub mod results;
pub mod upload;

use fade::FadeIn;
use form16_core::PageConfig;
use menu::MenuToggle;
use navigation::Navigation;
use std::rc::Rc;
use upload::UploadPanel;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"form16-web-wasm loaded".into());
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Owns every controller and event closure for the page lifetime
#[wasm_bindgen]
pub struct PageController {
    navigation: Rc<Navigation>,
    menu: Rc<MenuToggle>,
    _fade: Rc<FadeIn>,
    upload: Rc<UploadPanel>,
}

#[wasm_bindgen]
impl PageController {
    /// Wire the page with the default configuration
    pub fn mount() -> Result<PageController, JsValue> {
        Self::mount_config(PageConfig::default())
    }

    /// Wire the page with a JSON configuration override
    #[wasm_bindgen(js_name = mountWithConfig)]
    pub fn mount_with_config(json: &str) -> Result<PageController, JsValue> {
        let config = PageConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::mount_config(config)
    }

    #[wasm_bindgen(js_name = scrollToSection)]
    pub fn scroll_to_section(&self, id: &str) -> Result<(), JsValue> {
        self.navigation.scroll_to_section(id)
    }

    #[wasm_bindgen(js_name = toggleMenu)]
    pub fn toggle_menu(&self) -> Result<(), JsValue> {
        self.menu.toggle()
    }

    #[wasm_bindgen(getter, js_name = menuOpen)]
    pub fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    #[wasm_bindgen(getter, js_name = activeSection)]
    pub fn active_section(&self) -> Option<String> {
        self.navigation.active_section()
    }

    /// Current upload state: `idle`, `file-selected`, `invalid`,
    /// `submitting`, `complete` or `failed`
    #[wasm_bindgen(getter, js_name = uploadState)]
    pub fn upload_state(&self) -> String {
        self.upload.state().as_str().to_string()
    }
}

impl PageController {
    fn mount_config(config: PageConfig) -> Result<PageController, JsValue> {
        let window = dom::window()?;
        let document = dom::document(&window)?;

        let menu = Rc::new(MenuToggle::new(&document)?);
        menu.bind()?;

        let navigation = Rc::new(Navigation::new(
            &window,
            &document,
            &config,
            Rc::clone(&menu),
        )?);
        navigation.bind()?;

        let fade = Rc::new(FadeIn::new(&window, &document, &config)?);
        fade.animate_hero()?;

        let upload = Rc::new(UploadPanel::new(
            &window,
            &document,
            &config,
            Rc::clone(&navigation),
            Rc::clone(&fade),
        )?);
        upload.bind()?;

        navigation.apply_initial()?;

        web_sys::console::log_1(&"Form 16 page controller mounted".into());
        Ok(PageController {
            navigation,
            menu,
            _fade: fade,
            upload,
        })
    }
}
