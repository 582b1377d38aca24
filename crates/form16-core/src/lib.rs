//! Form 16 landing page logic
//!
//! Platform-free state for the landing page's interactive pieces:
//!
//! - `nav`: active nav entry, scroll targets and section bands
//! - `menu`: mobile menu open/closed flag
//! - `fade`: fire-once fade-in bookkeeping over a [`ViewportObserver`]
//! - `upload`: upload widget state machine and the analysis request flow
//! - `render`: status label text and the results panel contents
//!
//! The browser glue lives in the `form16-web-wasm` crate, which implements
//! the [`ports`] traits on top of `fetch` and `IntersectionObserver`.

pub mod analysis;
pub mod config;
pub mod currency;
pub mod error;
pub mod fade;
pub mod menu;
pub mod nav;
pub mod ports;
pub mod render;
pub mod upload;

pub use analysis::{Amount, AnalysisResult, Deduction, Opportunity};
pub use config::PageConfig;
pub use currency::{format_indian, format_rupees, NOT_AVAILABLE};
pub use error::{AnalyzeError, ConfigError};
pub use fade::{stagger_delay, FadeInAnimator};
pub use menu::MobileMenu;
pub use nav::{InitialNav, NavController, SectionLayout};
pub use ports::{AnalysisClient, HttpResponse, ViewportObserver};
pub use render::{describe_error, ResultsView, StatusLine, Tone};
pub use upload::{analyze, SelectedFile, UploadState, UploadWidget};
