use crate::models::Page;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use tinytemplate::TinyTemplate;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse template {name}: {source}")]
    Parse {
        name: &'static str,
        source: tinytemplate::error::Error,
    },
    #[error("Failed to render template {name}: {source}")]
    Render {
        name: &'static str,
        source: tinytemplate::error::Error,
    },
    #[error("Failed to start template renderer: {0}")]
    Spawn(std::io::Error),
    #[error("Template renderer stopped")]
    RendererStopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateName {
    View,
    Edit,
}

impl TemplateName {
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateName::View => "view.html",
            TemplateName::Edit => "edit.html",
        }
    }
}

#[derive(Debug)]
struct RenderJob {
    name: TemplateName,
    page: Page,
    reply: mpsc::Sender<Result<String, TemplateError>>,
}

/// The view and edit templates, parsed once at startup.
///
/// The compiled `TinyTemplate` is not shareable between threads, so it lives
/// on a dedicated render thread and requests reach it over a channel. The
/// thread exits once every handle is dropped.
#[derive(Debug, Clone)]
pub struct Templates {
    jobs: mpsc::Sender<RenderJob>,
}

impl Templates {
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let view = read_template(dir, TemplateName::View)?;
        let edit = read_template(dir, TemplateName::Edit)?;
        Self::from_sources(view, edit)
    }

    /// Compile both templates on the render thread; parse errors are
    /// reported here, never from [`Templates::render`].
    pub fn from_sources(
        view: impl Into<String>,
        edit: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let view = view.into();
        let edit = edit.into();
        let (jobs, inbox) = mpsc::channel::<RenderJob>();
        let (ready_tx, ready_rx) = mpsc::channel();

        thread::Builder::new()
            .name("template-render".to_string())
            .spawn(move || {
                let tt = match compile(&view, &edit) {
                    Ok(tt) => {
                        let _ = ready_tx.send(Ok(()));
                        tt
                    }
                    Err(err) => {
                        let _ = ready_tx.send(Err(err));
                        return;
                    }
                };
                for job in inbox {
                    let _ = job.reply.send(render_with(&tt, job.name, &job.page));
                }
            })
            .map_err(TemplateError::Spawn)?;

        ready_rx
            .recv()
            .map_err(|_| TemplateError::RendererStopped)??;
        Ok(Self { jobs })
    }

    pub fn render(&self, name: TemplateName, page: &Page) -> Result<String, TemplateError> {
        let (reply, result) = mpsc::channel();
        self.jobs
            .send(RenderJob {
                name,
                page: page.clone(),
                reply,
            })
            .map_err(|_| TemplateError::RendererStopped)?;
        result.recv().map_err(|_| TemplateError::RendererStopped)?
    }
}

fn read_template(dir: &Path, name: TemplateName) -> Result<String, TemplateError> {
    let path = dir.join(name.file_name());
    fs::read_to_string(&path).map_err(|source| TemplateError::Read { path, source })
}

fn compile<'a>(view: &'a str, edit: &'a str) -> Result<TinyTemplate<'a>, TemplateError> {
    let mut tt = TinyTemplate::new();
    for (name, text) in [(TemplateName::View, view), (TemplateName::Edit, edit)] {
        tt.add_template(name.file_name(), text)
            .map_err(|source| TemplateError::Parse {
                name: name.file_name(),
                source,
            })?;
    }
    Ok(tt)
}

fn render_with(
    tt: &TinyTemplate<'_>,
    name: TemplateName,
    page: &Page,
) -> Result<String, TemplateError> {
    tt.render(name.file_name(), page)
        .map_err(|source| TemplateError::Render {
            name: name.file_name(),
            source,
        })
}
