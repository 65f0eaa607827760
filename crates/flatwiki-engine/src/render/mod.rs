pub mod links;
pub mod templates;

pub use links::{Escaping, render_links};
pub use templates::{TemplateError, TemplateName, Templates};
