use crate::context::AppContext;
use crate::error::WikiError;
use crate::handlers::{self, SaveForm};
use crate::routes::{self, Dispatch};
use axum::Router;
use axum::extract::{FromRequest, Request, State};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

/// Create the wiki router.
///
/// All paths go to one dispatching handler so the route table in
/// [`routes::ROUTES`] stays the single source of truth.
pub fn wiki_router(ctx: Arc<AppContext>) -> Router {
    Router::<Arc<AppContext>>::new()
        .fallback(dispatch)
        .with_state(ctx)
}

async fn dispatch(State(ctx): State<Arc<AppContext>>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let matched = match routes::resolve(&method, &path) {
        Ok(matched) => matched,
        Err(err) => {
            log::debug!("{method} {path}: {err}");
            return WikiError::from(err).into_response();
        }
    };
    log::debug!("{method} {path} -> {:?}", matched.kind());

    let result = match matched {
        Dispatch::FrontPage => Ok(handlers::front_page(&ctx)),
        Dispatch::View(title) => run_blocking(ctx, move |ctx| handlers::view(ctx, title)).await,
        Dispatch::Edit(title) => run_blocking(ctx, move |ctx| handlers::edit(ctx, title)).await,
        Dispatch::Save(title) => match SaveForm::from_request(request, &ctx).await {
            Ok(form) => run_blocking(ctx, move |ctx| handlers::save(ctx, title, form)).await,
            Err(err) => Err(err),
        },
    };
    result.into_response()
}

/// Run a handler on the blocking pool. Page I/O is synchronous file access,
/// so a slow disk holds up only this request and never a runtime worker.
async fn run_blocking<F>(ctx: Arc<AppContext>, handler: F) -> Result<Response, WikiError>
where
    F: FnOnce(&AppContext) -> Result<Response, WikiError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || handler(ctx.as_ref()))
        .await
        .map_err(|err| WikiError::Worker(err.to_string()))?
}

/// Bind `addr` and serve the wiki until the process exits
pub async fn serve(ctx: Arc<AppContext>, addr: &str) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Wiki listening on http://{}", listener.local_addr()?);
    axum::serve(listener, wiki_router(ctx)).await
}
