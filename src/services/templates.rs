//! HTML page rendering.
//!
//! Templates are Jinja-style and compiled into the binary from `templates/`.
//! Autoescaping is on for every `.html` template, so seller supplied text
//! is always escaped.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::models::AdDetails;
use crate::Result;

/// Client upload page.
pub const UI_TEMPLATE: &str = "ui.html";

/// Listing page designs rendered for every ad, in order.
pub const PAGE_TEMPLATES: [&str; 10] = [
    "template1.html",
    "template2.html",
    "template3.html",
    "template4.html",
    "template5.html",
    "template6.html",
    "template7.html",
    "template8.html",
    "template9.html",
    "template10.html",
];

const SOURCES: [(&str, &str); 11] = [
    (UI_TEMPLATE, include_str!("../../templates/ui.html")),
    ("template1.html", include_str!("../../templates/template1.html")),
    ("template2.html", include_str!("../../templates/template2.html")),
    ("template3.html", include_str!("../../templates/template3.html")),
    ("template4.html", include_str!("../../templates/template4.html")),
    ("template5.html", include_str!("../../templates/template5.html")),
    ("template6.html", include_str!("../../templates/template6.html")),
    ("template7.html", include_str!("../../templates/template7.html")),
    ("template8.html", include_str!("../../templates/template8.html")),
    ("template9.html", include_str!("../../templates/template9.html")),
    ("template10.html", include_str!("../../templates/template10.html")),
];

/// Variables available to the listing page templates.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub site_name: String,
    pub model: String,
    pub manufacture_year: String,
    pub price: String,
    pub location: String,
    pub price_type: String,
    pub phone: String,
    pub condition: String,
    /// Public photo URLs
    pub images: Vec<String>,
    /// Public collage URL
    pub collage_url: String,
}

impl PageContext {
    pub fn new(
        site_name: &str,
        details: &AdDetails,
        images: Vec<String>,
        collage_url: String,
    ) -> Self {
        Self {
            site_name: site_name.to_string(),
            model: details.model.clone(),
            manufacture_year: details.manufacture_year.clone(),
            price: details.price.clone(),
            location: details.location.clone(),
            price_type: details.price_type.clone(),
            phone: details.phone.clone(),
            condition: details.condition.clone(),
            images,
            collage_url,
        }
    }
}

/// Renders the upload UI and the listing pages.
pub struct TemplateService {
    env: Environment<'static>,
}

impl TemplateService {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in SOURCES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render_ui(&self, site_name: &str) -> Result<String> {
        let template = self.env.get_template(UI_TEMPLATE)?;
        Ok(template.render(context! { site_name => site_name })?)
    }

    pub fn render_page(&self, name: &str, ctx: &PageContext) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }

    pub fn page_names(&self) -> &'static [&'static str] {
        &PAGE_TEMPLATES
    }
}
