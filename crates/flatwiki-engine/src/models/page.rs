use crate::models::Title;
use crate::render::{Escaping, render_links};
use serde::Serialize;

/// A wiki page materialized for a single request.
///
/// `rendered` is always derived from `body` and is never written back to
/// storage; only `body` is persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    title: Title,
    body: String,
    rendered: String,
}

impl Page {
    /// A page with no content yet, used to present an empty edit form
    pub fn blank(title: Title) -> Self {
        Self {
            title,
            body: String::new(),
            rendered: String::new(),
        }
    }

    pub fn from_body(title: Title, body: impl Into<String>, escaping: Escaping) -> Self {
        let body = body.into();
        let rendered = render_links(&body, escaping);
        Self {
            title,
            body,
            rendered,
        }
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    /// The raw content as authored, link notation included
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}
