use crate::context::AppContext;
use crate::error::WikiError;
use axum::extract::{Form, FromRequest, Multipart, Request};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use flatwiki_engine::{Page, TemplateName, Title};
use serde::Deserialize;

/// Form submitted by the edit page
#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub body: String,
}

/// Accepts both urlencoded and multipart submissions. A missing `body`
/// field is an empty body; with repeated fields the first one wins.
impl<S> FromRequest<S> for SaveForm
where
    S: Send + Sync,
{
    type Rejection = WikiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(form) = Form::<SaveForm>::from_request(request, state)
                .await
                .map_err(|rejection| WikiError::BadForm(rejection.body_text()))?;
            return Ok(form);
        }

        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|rejection| WikiError::BadForm(rejection.body_text()))?;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| WikiError::BadForm(err.body_text()))?
        {
            if field.name() == Some("body") {
                let body = field
                    .text()
                    .await
                    .map_err(|err| WikiError::BadForm(err.body_text()))?;
                return Ok(SaveForm { body });
            }
        }
        Ok(SaveForm::default())
    }
}

/// 302 Found to `location`
pub fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

pub fn front_page(ctx: &AppContext) -> Response {
    found(ctx.front_page.view_path())
}

/// Show a page, or send the client to create it if it cannot be loaded
pub fn view(ctx: &AppContext, title: Title) -> Result<Response, WikiError> {
    match ctx.store.load_page(&title, ctx.escaping) {
        Ok(page) => render(ctx, TemplateName::View, &page),
        Err(err) => {
            log::debug!("Cannot view {title}, redirecting to edit: {err}");
            Ok(found(title.edit_path()))
        }
    }
}

/// Show the edit form, blank when the page cannot be loaded
pub fn edit(ctx: &AppContext, title: Title) -> Result<Response, WikiError> {
    let page = ctx
        .store
        .load_page(&title, ctx.escaping)
        .unwrap_or_else(|err| {
            log::debug!("Editing {title} from blank: {err}");
            Page::blank(title)
        });
    render(ctx, TemplateName::Edit, &page)
}

pub fn save(ctx: &AppContext, title: Title, form: SaveForm) -> Result<Response, WikiError> {
    let page = Page::from_body(title, form.body, ctx.escaping);
    if let Err(err) = ctx.store.save_page(&page) {
        log::warn!("Failed to save {}: {err}", page.title());
        return Err(WikiError::Save(err));
    }
    log::debug!("Saved {} ({} bytes)", page.title(), page.body().len());
    Ok(found(page.title().view_path()))
}

fn render(ctx: &AppContext, name: TemplateName, page: &Page) -> Result<Response, WikiError> {
    match ctx.templates.render(name, page) {
        Ok(html) => Ok(Html(html).into_response()),
        Err(err) => {
            log::warn!("Failed to render {} for {}: {err}", name.file_name(), page.title());
            Err(WikiError::Template(err))
        }
    }
}
