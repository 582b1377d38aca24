//! Results dashboard rendering
//!
//! Copies a [`ResultsView`] into the dashboard. All server-provided strings
//! go in through `textContent` or attributes.

use crate::dom;
use form16_core::render::{OpportunityList, LEARN_MORE, NO_OPPORTUNITIES};
use form16_core::ResultsView;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

const HIDDEN_CLASS: &str = "hidden";
const DEDUCTIONS_LIST: &str = "claimed-deductions-list";
const OPPORTUNITIES: &str = "tax-saving-opportunities";

pub struct ResultsPanel {
    document: Document,
    panel: Element,
    deductions: Element,
    opportunities: Element,
}

impl ResultsPanel {
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            document: document.clone(),
            panel: dom::required_by_id(document, "results-dashboard")?,
            deductions: dom::required_by_id(document, DEDUCTIONS_LIST)?,
            opportunities: dom::required_by_id(document, OPPORTUNITIES)?,
        })
    }

    /// Replace the dashboard contents with `view`
    ///
    /// Scalar slots absent from the page are skipped.
    pub fn render(&self, view: &ResultsView) -> Result<(), JsValue> {
        for (id, text) in &view.slots {
            if let Some(slot) = self.document.get_element_by_id(id) {
                slot.set_text_content(Some(text));
            }
        }

        self.deductions.set_text_content(None);
        for line in view.deductions.lines() {
            let item = dom::create(&self.document, "li", None, Some(line))?;
            self.deductions.append_child(&item)?;
        }

        self.opportunities.set_text_content(None);
        match &view.opportunities {
            OpportunityList::Cards(cards) => {
                for card in cards {
                    let node = dom::create(&self.document, "div", Some("opportunity-card"), None)?;
                    let title = dom::create(&self.document, "h5", None, Some(&card.title))?;
                    node.append_child(&title)?;
                    let description =
                        dom::create(&self.document, "p", None, Some(&card.description))?;
                    node.append_child(&description)?;
                    let link =
                        dom::create(&self.document, "a", Some("learn-more"), Some(LEARN_MORE))?;
                    link.set_attribute("href", &card.link)?;
                    node.append_child(&link)?;
                    self.opportunities.append_child(&node)?;
                }
            }
            OpportunityList::Placeholder => {
                let note = dom::create(&self.document, "p", None, Some(NO_OPPORTUNITIES))?;
                self.opportunities.append_child(&note)?;
            }
        }
        Ok(())
    }

    pub fn show(&self) -> Result<(), JsValue> {
        dom::set_class(&self.panel, HIDDEN_CLASS, false)
    }

    pub fn hide(&self) -> Result<(), JsValue> {
        dom::set_class(&self.panel, HIDDEN_CLASS, true)
    }

    pub fn is_hidden(&self) -> bool {
        self.panel.class_list().contains(HIDDEN_CLASS)
    }
}
