//! Drop zone, file picker and submit button for the Form 16 analyzer
//!
//! The [`UploadWidget`] owns every decision; this module forwards DOM events
//! into it and mirrors its state back onto the controls.

use crate::dom;
use crate::fade::FadeIn;
use crate::fetch::FetchClient;
use crate::navigation::Navigation;
use crate::results::ResultsPanel;
use form16_core::{
    analyze, describe_error, AnalysisResult, AnalyzeError, PageConfig, ResultsView, SelectedFile,
    UploadState, UploadWidget,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, DragEvent, Element, Event, File, FileList, HtmlButtonElement, HtmlInputElement,
    Window,
};

const HOVER_CLASS: &str = "hover";

pub struct UploadPanel {
    window: Window,
    drop_area: Element,
    input: HtmlInputElement,
    label: Element,
    button: HtmlButtonElement,
    results: ResultsPanel,
    widget: RefCell<UploadWidget<File>>,
    client: FetchClient,
    config: PageConfig,
    navigation: Rc<Navigation>,
    fade: Rc<FadeIn>,
}

impl UploadPanel {
    pub fn new(
        window: &Window,
        document: &Document,
        config: &PageConfig,
        navigation: Rc<Navigation>,
        fade: Rc<FadeIn>,
    ) -> Result<Self, JsValue> {
        Ok(Self {
            window: window.clone(),
            drop_area: dom::required_by_id(document, "drop-area")?,
            input: dom::required_by_id(document, "fileElem")?,
            label: dom::required_by_id(document, "file-name")?,
            button: dom::required_by_id(document, "process-form16-button")?,
            results: ResultsPanel::new(document)?,
            widget: RefCell::new(UploadWidget::new(config)),
            client: FetchClient::new(window),
            config: config.clone(),
            navigation,
            fade,
        })
    }

    pub fn state(&self) -> UploadState {
        self.widget.borrow().state()
    }

    /// Take the first file of a picked or dropped list
    ///
    /// An empty list changes nothing.
    pub fn handle_files(&self, files: Option<FileList>) -> Result<(), JsValue> {
        let Some(file) = files.and_then(|list| list.get(0)) else {
            return Ok(());
        };

        let selected = SelectedFile::new(file.name(), file.type_(), file);
        if let Err(e) = self.widget.borrow_mut().select(selected) {
            web_sys::console::log_1(&format!("Rejected selection: {}", e).into());
        }
        self.sync_controls()
    }

    /// Start the analysis request for the held file
    pub fn submit(self: &Rc<Self>) -> Result<(), JsValue> {
        let attempt = self.widget.borrow_mut().begin_submit();
        let file = match attempt {
            Ok(file) => file,
            Err(AnalyzeError::AlreadySubmitting) => return Ok(()),
            Err(e) => {
                self.window.alert_with_message(&describe_error(&e))?;
                return Ok(());
            }
        };
        self.results.hide()?;
        self.sync_controls()?;

        let panel = Rc::clone(self);
        spawn_local(async move {
            let outcome = analyze(&panel.client, &panel.config, &file.handle).await;
            if let Err(e) = panel.finish(outcome) {
                web_sys::console::error_2(&"Failed to update upload panel:".into(), &e);
            }
        });
        Ok(())
    }

    fn finish(&self, outcome: Result<AnalysisResult, AnalyzeError>) -> Result<(), JsValue> {
        let rendered = outcome.and_then(|result| {
            let view = ResultsView::build(&result, &self.config);
            self.results
                .render(&view)
                .and_then(|()| self.results.show())
                .map_err(|e| AnalyzeError::Response {
                    message: dom::js_error_message(&e),
                })
        });

        match rendered {
            Ok(()) => {
                self.widget.borrow_mut().complete();
                self.sync_controls()?;
                self.fade.replay_results()?;
                self.navigation
                    .scroll_to_section(&self.config.results_section)
            }
            Err(e) => {
                web_sys::console::error_2(
                    &"Error processing Form 16:".into(),
                    &JsValue::from_str(&e.to_string()),
                );
                self.widget.borrow_mut().fail(&e);
                self.results.hide()?;
                self.sync_controls()
            }
        }
    }

    fn sync_controls(&self) -> Result<(), JsValue> {
        let widget = self.widget.borrow();
        self.button.set_disabled(!widget.submit_enabled());
        if let Some(status) = widget.status() {
            self.label.set_text_content(Some(&status.text));
            dom::set_style(&self.label, "color", status.tone.css_color())?;
        }
        Ok(())
    }

    /// Attach drag, drop, change and click handlers
    pub fn bind(self: &Rc<Self>) -> Result<(), JsValue> {
        for (event_name, hover) in [
            ("dragenter", true),
            ("dragover", true),
            ("dragleave", false),
            ("drop", false),
        ] {
            let drop_area = self.drop_area.clone();
            let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.prevent_default();
                event.stop_propagation();
                if let Err(e) = dom::set_class(&drop_area, HOVER_CLASS, hover) {
                    web_sys::console::error_2(&"Drop area highlight failed:".into(), &e);
                }
            });
            self.drop_area
                .add_event_listener_with_callback(event_name, handler.as_ref().unchecked_ref())?;
            handler.forget();
        }

        let panel = Rc::clone(self);
        let ondrop = Closure::<dyn FnMut(DragEvent)>::new(move |event: DragEvent| {
            let files = event.data_transfer().and_then(|dt| dt.files());
            if let Err(e) = panel.handle_files(files) {
                web_sys::console::error_2(&"Drop failed:".into(), &e);
            }
        });
        self.drop_area
            .add_event_listener_with_callback("drop", ondrop.as_ref().unchecked_ref())?;
        ondrop.forget();

        let panel = Rc::clone(self);
        let onchange = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = panel.handle_files(panel.input.files()) {
                web_sys::console::error_2(&"File selection failed:".into(), &e);
            }
        });
        self.input
            .add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();

        let panel = Rc::clone(self);
        let onclick = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = panel.submit() {
                web_sys::console::error_2(&"Submit failed:".into(), &e);
            }
        });
        self.button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();

        self.sync_controls()
    }
}
