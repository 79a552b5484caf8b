use serde::Deserialize;

/// Reply from the Pushover messages endpoint
#[derive(Deserialize, Debug)]
pub struct MessageResponse {
    pub status: i64,
    #[serde(default)]
    pub request: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}
