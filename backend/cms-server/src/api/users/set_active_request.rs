use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}
