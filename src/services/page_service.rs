use crate::config::PageConfig;
use crate::domain::notice::Indicator;
use crate::error::Result;
use serde::Serialize;
use std::sync::Arc;
use tera::Tera;

const CONTACT_TEMPLATE_NAME: &str = "contact.html";
const CONTACT_TEMPLATE: &str = include_str!("../../templates/contact.html");

#[derive(Serialize)]
struct NoticeView {
    kind: &'static str,
    message: &'static str,
}

impl From<Indicator> for NoticeView {
    fn from(indicator: Indicator) -> Self {
        Self { kind: if indicator.is_success() { "success" } else { "error" }, message: indicator.message() }
    }
}

/// Renders the contact page. Template variables are HTML-escaped by the engine.
#[derive(Clone, Debug)]
pub struct PageService {
    tera: Arc<Tera>,
    title: String,
    heading: String,
}

impl PageService {
    /// # Errors
    /// Returns `AppError::Template` if the bundled template fails to parse.
    pub fn new(config: &PageConfig) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(CONTACT_TEMPLATE_NAME, CONTACT_TEMPLATE)?;

        Ok(Self { tera: Arc::new(tera), title: config.page_title.clone(), heading: config.page_heading.clone() })
    }

    /// Renders the form, plus the outcome message when an indicator is given.
    ///
    /// # Errors
    /// Returns `AppError::Template` if rendering fails.
    pub fn render_contact_page(&self, indicator: Option<Indicator>) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("title", &self.title);
        context.insert("heading", &self.heading);
        context.insert("notice", &indicator.map(NoticeView::from));

        Ok(self.tera.render(CONTACT_TEMPLATE_NAME, &context)?)
    }
}
