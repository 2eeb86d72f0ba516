use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::html::{SanitizeMode, Sanitized, policy::AllowedTag};

/// DTO for sanitizing editor content.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SanitizeRequest {
    /// Untrusted HTML. May be empty.
    #[validate(length(max = 200000, message = "HTML must be at most 200000 chars"))]
    pub html: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SanitizeResponse {
    pub html: String,

    /// `degraded` means only `<script>` spans were removed; the output
    /// did not go through tag and attribute filtering.
    pub mode: SanitizeMode,
}

impl From<Sanitized> for SanitizeResponse {
    fn from(sanitized: Sanitized) -> Self {
        Self {
            html: sanitized.html,
            mode: sanitized.mode,
        }
    }
}

/// One allow-listed tag and the attributes it keeps.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TagRule {
    pub tag: String,
    pub attributes: Vec<String>,
}

/// The sanitizer's allow-list, as data.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PolicyResponse {
    pub tags: Vec<TagRule>,
}

impl PolicyResponse {
    pub fn current() -> Self {
        let tags = AllowedTag::ALL
            .into_iter()
            .map(|tag| TagRule {
                tag: tag.name().to_string(),
                attributes: tag
                    .allowed_attributes()
                    .iter()
                    .map(|attr| attr.to_string())
                    .collect(),
            })
            .collect();
        Self { tags }
    }
}
