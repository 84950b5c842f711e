use cms_auth::ProfileUpdate;

use serde::Deserialize;

/// Omitted fields are left unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            first_name: req.first_name,
            last_name: req.last_name,
        }
    }
}
