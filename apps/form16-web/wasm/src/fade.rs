//! Scroll-triggered fade-ins backed by `IntersectionObserver`

use crate::dom;
use form16_core::{stagger_delay, FadeInAnimator, PageConfig, ViewportObserver};
use js_sys::Array;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Window,
};

const VISIBLE_CLASS: &str = "is-visible";
const FADE_TARGETS: &str = ".fade-in-item";
const HERO_TARGETS: &str = ".hero-content .fade-in-item";
const RESULTS_TARGETS: &str = "#results-dashboard .fade-in-item";

/// [`ViewportObserver`] port over the browser observer
struct BrowserViewport<'a>(&'a IntersectionObserver);

impl ViewportObserver<Element> for BrowserViewport<'_> {
    fn observe(&self, target: &Element) {
        self.0.observe(target);
    }

    fn unobserve(&self, target: &Element) {
        self.0.unobserve(target);
    }
}

type Animator = Rc<RefCell<FadeInAnimator<Element>>>;

pub struct FadeIn {
    window: Window,
    document: Document,
    observer: IntersectionObserver,
    animator: Animator,
    config: PageConfig,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl FadeIn {
    /// Create the observer and start watching every fade-in target
    pub fn new(window: &Window, document: &Document, config: &PageConfig) -> Result<Self, JsValue> {
        let animator: Animator = Rc::new(RefCell::new(FadeInAnimator::new()));

        let callback = {
            let animator = Rc::clone(&animator);
            Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                move |entries: Array, observer: IntersectionObserver| {
                    let viewport = BrowserViewport(&observer);
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        let target = entry.target();
                        let fired = animator.borrow_mut().on_intersection(
                            &viewport,
                            &target,
                            entry.is_intersecting(),
                        );
                        if fired {
                            if let Err(e) = dom::set_class(&target, VISIBLE_CLASS, true) {
                                web_sys::console::error_2(&"Fade-in failed:".into(), &e);
                            }
                        }
                    }
                },
            )
        };

        let options = IntersectionObserverInit::new();
        options.set_root_margin("0px");
        options.set_threshold(&JsValue::from_f64(config.fade_threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        {
            let viewport = BrowserViewport(&observer);
            let mut animator = animator.borrow_mut();
            for element in dom::query_all(document, FADE_TARGETS)? {
                animator.watch(&viewport, element);
            }
        }

        Ok(Self {
            window: window.clone(),
            document: document.clone(),
            observer,
            animator,
            config: config.clone(),
            _callback: callback,
        })
    }

    /// Stagger the hero elements and reveal them shortly after load
    pub fn animate_hero(&self) -> Result<(), JsValue> {
        let hero = dom::query_all(&self.document, HERO_TARGETS)?;
        for (index, element) in hero.iter().enumerate() {
            dom::set_style(
                element,
                "transition-delay",
                &stagger_delay(index, self.config.hero_stagger_secs),
            )?;
        }
        self.reveal_later(hero, self.config.hero_reveal_delay_ms)
    }

    /// Replay the fade-in on freshly rendered results
    pub fn replay_results(&self) -> Result<(), JsValue> {
        let results = dom::query_all(&self.document, RESULTS_TARGETS)?;
        {
            let mut animator = self.animator.borrow_mut();
            for (index, element) in results.iter().enumerate() {
                animator.reset(element);
                dom::set_class(element, VISIBLE_CLASS, false)?;
                dom::set_style(
                    element,
                    "transition-delay",
                    &stagger_delay(index, self.config.results_stagger_secs),
                )?;
            }
        }
        self.reveal_later(results, self.config.results_replay_delay_ms)
    }

    fn reveal_later(&self, elements: Vec<Element>, delay_ms: u32) -> Result<(), JsValue> {
        let animator = Rc::clone(&self.animator);
        let observer = self.observer.clone();
        dom::set_timeout(&self.window, delay_ms, move || {
            let viewport = BrowserViewport(&observer);
            let mut animator = animator.borrow_mut();
            for element in &elements {
                animator.reveal(&viewport, element);
                if let Err(e) = dom::set_class(element, VISIBLE_CLASS, true) {
                    web_sys::console::error_2(&"Fade-in failed:".into(), &e);
                }
            }
        })?;
        Ok(())
    }
}

impl Drop for FadeIn {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
