use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub number_of_lessons: i64,
    pub name: String,
    pub link: String,
    pub image_url: String,
}

impl Course {
    /// Image location handed to the image loader. `None` when the url does not parse.
    pub fn image_locator(&self) -> Option<Url> {
        Url::parse(&self.image_url).ok()
    }
}

/// Decode a response body as a JSON array of courses.
pub fn decode_courses(body: &[u8]) -> Result<Vec<Course>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}
