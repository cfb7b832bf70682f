//! Page templates for the HTML shell.
//!
//! Templates are compiled into the binary and loaded into one shared
//! minijinja environment on first use.

use axum::response::Html;
use minijinja::{Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

use crate::core::error::AppError;

static PAGE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

const PAGE_TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../../templates/pages/base.html")),
    ("login.html", include_str!("../../../templates/pages/login.html")),
    ("home.html", include_str!("../../../templates/pages/home.html")),
    ("lost.html", include_str!("../../../templates/pages/lost.html")),
    ("found.html", include_str!("../../../templates/pages/found.html")),
    ("confirm.html", include_str!("../../../templates/pages/confirm.html")),
    ("about.html", include_str!("../../../templates/pages/about.html")),
    ("faq.html", include_str!("../../../templates/pages/faq.html")),
    ("signout.html", include_str!("../../../templates/pages/signout.html")),
    ("loading.html", include_str!("../../../templates/pages/loading.html")),
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

impl From<TemplateError> for AppError {
    fn from(e: TemplateError) -> Self {
        AppError::Internal(e.to_string())
    }
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for (name, source) in PAGE_TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load page template {}: {}", name, e);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    PAGE_ENV.get_or_init(init_environment)
}

/// Render a page template with the given context
pub fn render_page(name: &str, ctx: Value) -> Result<Html<String>, TemplateError> {
    let template = get_environment()
        .get_template(name)
        .map_err(|_| TemplateError::NotFound(name.to_string()))?;

    template
        .render(ctx)
        .map(Html)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_every_page_renders_without_user() {
        for (name, _) in PAGE_TEMPLATES {
            if *name == "home.html" {
                continue;
            }
            let page = render_page(name, context! {});
            assert!(page.is_ok(), "{} failed: {:?}", name, page.err());
        }
    }

    #[test]
    fn test_output_is_escaped() {
        let Html(page) = render_page(
            "login.html",
            context! { email => "<script>", error => "bad" },
        )
        .unwrap();

        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn test_unknown_template() {
        assert!(matches!(
            render_page("missing.html", context! {}),
            Err(TemplateError::NotFound(_))
        ));
    }
}
