use flatwiki_config::Config;
use flatwiki_engine::{
    Escaping, InvalidTitle, PageStore, StoreError, TemplateError, Templates, Title,
};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Invalid front page title in config: {0}")]
    FrontPage(#[from] InvalidTitle),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Everything a request needs, fixed at startup and shared read-only.
#[derive(Debug)]
pub struct AppContext {
    pub store: PageStore,
    pub templates: Templates,
    pub escaping: Escaping,
    pub front_page: Title,
}

impl AppContext {
    pub fn new(store: PageStore, templates: Templates, escaping: Escaping, front_page: Title) -> Self {
        Self {
            store,
            templates,
            escaping,
            front_page,
        }
    }

    /// Build the context from a config whose directories are already resolved.
    /// Templates are loaded before the data directory is touched.
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let front_page = Title::parse(&config.front_page)?;
        let templates = Templates::load(&config.templates_dir)?;
        let store = PageStore::open(&config.data_dir)?;
        Ok(Self::new(
            store,
            templates,
            Escaping::from_raw_html(config.raw_html),
            front_page,
        ))
    }
}
