//! `fetch`-backed [`AnalysisClient`]

use crate::dom::js_error_message;
use form16_core::{AnalysisClient, AnalyzeError, HttpResponse};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response, Window};

/// Posts the chosen file as multipart form data
///
/// No headers are set by hand; the browser adds the multipart boundary.
pub struct FetchClient {
    window: Window,
}

impl FetchClient {
    pub fn new(window: &Window) -> Self {
        Self {
            window: window.clone(),
        }
    }

    async fn send(&self, endpoint: &str, field: &str, file: &File) -> Result<HttpResponse, JsValue> {
        let form = FormData::new()?;
        form.append_with_blob(field, file)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&form.into());

        let request = Request::new_with_str_and_init(endpoint, &opts)?;
        let response = JsFuture::from(self.window.fetch_with_request(&request)).await?;
        let response: Response = response.dyn_into()?;

        let body = JsFuture::from(response.text()?).await?;
        Ok(HttpResponse::new(
            response.status(),
            body.as_string().unwrap_or_default(),
        ))
    }
}

impl AnalysisClient for FetchClient {
    type File = File;

    async fn post_file(
        &self,
        endpoint: &str,
        field: &str,
        file: &File,
    ) -> Result<HttpResponse, AnalyzeError> {
        self.send(endpoint, field, file)
            .await
            .map_err(|e| AnalyzeError::Transport {
                message: js_error_message(&e),
            })
    }
}
