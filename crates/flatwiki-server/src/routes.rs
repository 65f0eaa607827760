use axum::http::Method;
use flatwiki_engine::Title;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    FrontPage,
    View,
    Edit,
    Save,
}

/// One row of the route table
#[derive(Debug)]
pub struct Route {
    pub method: Method,
    pub prefix: &'static str,
    pub kind: RouteKind,
}

pub static ROUTES: [Route; 4] = [
    Route {
        method: Method::GET,
        prefix: "/",
        kind: RouteKind::FrontPage,
    },
    Route {
        method: Method::GET,
        prefix: "/view/",
        kind: RouteKind::View,
    },
    Route {
        method: Method::GET,
        prefix: "/edit/",
        kind: RouteKind::Edit,
    },
    Route {
        method: Method::POST,
        prefix: "/save/",
        kind: RouteKind::Save,
    },
];

/// A matched request, carrying the validated title where the route has one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    FrontPage,
    View(Title),
    Edit(Title),
    Save(Title),
}

impl Dispatch {
    pub fn kind(&self) -> RouteKind {
        match self {
            Dispatch::FrontPage => RouteKind::FrontPage,
            Dispatch::View(_) => RouteKind::View,
            Dispatch::Edit(_) => RouteKind::Edit,
            Dispatch::Save(_) => RouteKind::Save,
        }
    }

    pub fn title(&self) -> Option<&Title> {
        match self {
            Dispatch::FrontPage => None,
            Dispatch::View(title) | Dispatch::Edit(title) | Dispatch::Save(title) => Some(title),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("No route matches the path")]
    NotFound,
    #[error("Method not allowed, expected {0}")]
    MethodNotAllowed(Method),
}

impl Route {
    fn match_path(&self, path: &str) -> Option<Dispatch> {
        let title = || {
            path.strip_prefix(self.prefix)
                .and_then(|rest| Title::parse(rest).ok())
        };
        match self.kind {
            RouteKind::FrontPage => (path == self.prefix).then_some(Dispatch::FrontPage),
            RouteKind::View => title().map(Dispatch::View),
            RouteKind::Edit => title().map(Dispatch::Edit),
            RouteKind::Save => title().map(Dispatch::Save),
        }
    }

    fn accepts(&self, method: &Method) -> bool {
        *method == self.method || (self.method == Method::GET && *method == Method::HEAD)
    }
}

/// Match a request against the route table.
///
/// A path whose shape or title is invalid is `NotFound`; a valid path asked
/// for with the wrong method is `MethodNotAllowed`.
pub fn resolve(method: &Method, path: &str) -> Result<Dispatch, RouteError> {
    let mut allowed = None;
    for route in &ROUTES {
        let Some(dispatch) = route.match_path(path) else {
            continue;
        };
        if route.accepts(method) {
            return Ok(dispatch);
        }
        allowed = Some(route.method.clone());
    }
    Err(allowed.map_or(RouteError::NotFound, RouteError::MethodNotAllowed))
}
