use serde::{Deserialize, Serialize};

/// Basic profile fields used by the prompt and fallback synthesizers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub rating: Option<i32>,
    pub rank: Option<String>,
    pub max_rating: Option<i32>,
    pub max_rank: Option<String>,
    pub organization: Option<String>,
}

impl Profile {
    pub fn with_rating(rating: i32) -> Self {
        Profile {
            rating: Some(rating),
            ..Default::default()
        }
    }
}

/// Raw `user.info` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    pub handle: String,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub max_rating: Option<i32>,
    #[serde(default)]
    pub max_rank: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
}

impl From<RawUser> for Profile {
    fn from(user: RawUser) -> Self {
        Profile {
            rating: user.rating,
            rank: user.rank,
            max_rating: user.max_rating,
            max_rank: user.max_rank,
            // Codeforces reports "no organization" as an empty string
            organization: user.organization.filter(|o| !o.trim().is_empty()),
        }
    }
}
