use reqwest::Url;

use crate::state::FetchState;

pub struct Screen;

impl Screen {
    pub const TITLE: &'static str = "Courses";
    pub const REFRESH_LABEL: &'static str = "Refresh";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: i64,
    pub name: String,
    pub image: Option<Url>,
}

/// The one branch a renderer shows for a given state.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Loading,
    Error(String),
    List(Vec<Row>),
}

impl Body {
    /// `error_message` is only consulted once the fetch has settled.
    pub fn from_state(state: &FetchState) -> Self {
        if state.is_fetching {
            return Body::Loading;
        }
        if state.has_error() {
            return Body::Error(state.error_message.clone());
        }
        Body::List(
            state
                .courses
                .iter()
                .map(|c| Row {
                    id: c.id,
                    name: c.name.clone(),
                    image: c.image_locator(),
                })
                .collect(),
        )
    }
}
