//! Presentation of upload state and analysis results
//!
//! Everything here is plain data: the wasm crate copies it into the DOM
//! without making decisions of its own.

use crate::analysis::{Amount, AnalysisResult};
use crate::config::PageConfig;
use crate::currency::format_rupees;
use crate::error::AnalyzeError;

/// Display slot ids for the six scalar amounts, in render order
pub const GROSS_SALARY_SLOT: &str = "gross-salary";
pub const EXEMPTIONS_SLOT: &str = "exemptions";
pub const TAXABLE_INCOME_SLOT: &str = "taxable-income";
pub const TOTAL_TAX_DUE_SLOT: &str = "total-tax-due";
pub const TAX_PAID_TDS_SLOT: &str = "tax-paid-tds";
pub const REFUND_PAYABLE_SLOT: &str = "refund-payable";

pub const NO_DEDUCTIONS: &str = "No specific deductions found in Form 16.";
pub const NO_OPPORTUNITIES: &str = "No new tax-saving opportunities identified for your profile at this time, but always check our Learn section!";
pub const LEARN_MORE: &str = "Learn More \u{2192}";

/// Colour role of the status label under the drop zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Progress,
    Success,
    Error,
}

impl Tone {
    /// CSS colour value used by the landing page stylesheet
    pub fn css_color(self) -> &'static str {
        match self {
            Tone::Primary => "var(--primary-color)",
            Tone::Progress => "var(--secondary-color)",
            Tone::Success => "var(--accent-color)",
            Tone::Error => "red",
        }
    }
}

/// Text and tone of the status label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

impl StatusLine {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn file_selected(name: &str) -> Self {
        Self::new(format!("File selected: {}", name), Tone::Primary)
    }

    pub fn invalid_file() -> Self {
        Self::new("Please upload a PDF file.", Tone::Error)
    }

    pub fn processing() -> Self {
        Self::new("Processing... Please wait.", Tone::Progress)
    }

    pub fn complete() -> Self {
        Self::new("Analysis Complete!", Tone::Success)
    }

    pub fn failed(error: &AnalyzeError) -> Self {
        Self::new(
            format!("Error: {}. Please try again.", describe_error(error)),
            Tone::Error,
        )
    }
}

/// Human-readable text for an error
pub fn describe_error(error: &AnalyzeError) -> String {
    match error {
        AnalyzeError::InvalidFileType { .. } => "Please upload a PDF file.".to_string(),
        AnalyzeError::NoFileSelected => "Please select a Form 16 PDF first.".to_string(),
        AnalyzeError::AlreadySubmitting => "Your Form 16 is still being analyzed.".to_string(),
        AnalyzeError::Transport { message } | AnalyzeError::Response { message } => {
            message.clone()
        }
        AnalyzeError::Server {
            status,
            server_message: Some(message),
            ..
        } => format!("HTTP error! Status: {}. Message: {}", status, message),
        AnalyzeError::Server {
            status,
            server_message: None,
            raw_body,
        } => format!("HTTP error! Status: {}. Raw response: {}", status, raw_body),
    }
}

/// Contents of the claimed-deductions list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeductionList {
    Entries(Vec<String>),
    Placeholder,
}

impl DeductionList {
    /// Text of each `<li>` to render
    pub fn lines(&self) -> Vec<&str> {
        match self {
            DeductionList::Entries(lines) => lines.iter().map(String::as_str).collect(),
            DeductionList::Placeholder => vec![NO_DEDUCTIONS],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpportunityCard {
    pub title: String,
    pub description: String,
    pub link: String,
}

/// Contents of the opportunities container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpportunityList {
    Cards(Vec<OpportunityCard>),
    Placeholder,
}

/// Everything the results panel shows for one analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    /// `(slot id, text)` for each scalar amount
    pub slots: Vec<(&'static str, String)>,
    pub deductions: DeductionList,
    pub opportunities: OpportunityList,
}

impl ResultsView {
    pub fn build(result: &AnalysisResult, config: &PageConfig) -> Self {
        let slot = |id: &'static str, amount: &Option<Amount>| (id, format_rupees(amount.as_ref()));
        let slots = vec![
            slot(GROSS_SALARY_SLOT, &result.gross_salary),
            slot(EXEMPTIONS_SLOT, &result.exemptions),
            slot(TAXABLE_INCOME_SLOT, &result.taxable_income),
            slot(TOTAL_TAX_DUE_SLOT, &result.total_tax_due),
            slot(TAX_PAID_TDS_SLOT, &result.tax_paid_tds),
            slot(REFUND_PAYABLE_SLOT, &result.refund_payable),
        ];

        let deductions = if result.claimed_deductions.is_empty() {
            DeductionList::Placeholder
        } else {
            DeductionList::Entries(
                result
                    .claimed_deductions
                    .iter()
                    .map(|d| format!("Section {}: {}", d.section, format_rupees(d.amount.as_ref())))
                    .collect(),
            )
        };

        let opportunities = if result.tax_saving_opportunities.is_empty() {
            OpportunityList::Placeholder
        } else {
            OpportunityList::Cards(
                result
                    .tax_saving_opportunities
                    .iter()
                    .map(|o| OpportunityCard {
                        title: o.title.clone(),
                        description: o.description.clone(),
                        link: o
                            .link
                            .clone()
                            .filter(|l| !l.is_empty())
                            .unwrap_or_else(|| config.fallback_opportunity_link.clone()),
                    })
                    .collect(),
            )
        };

        Self {
            slots,
            deductions,
            opportunities,
        }
    }

    /// Text rendered into a slot, if the slot exists
    pub fn slot(&self, id: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|(slot, _)| *slot == id)
            .map(|(_, text)| text.as_str())
    }
}
