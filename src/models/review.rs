// src/models/review.rs
// DOCUMENTATION: User reviews returned by detail fetches
// PURPOSE: Review record and its one-line summary

use serde::{Deserialize, Serialize};

/// User review attached to a place by a detail fetch
/// None of the fields is guaranteed by the API
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Review {
    pub author_name: Option<String>,
    pub profile_photo_url: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub relative_time_description: Option<String>,
}

impl Review {
    /// One-line header such as "Asha · 5★ · a month ago"
    pub fn headline(&self) -> String {
        let mut parts = vec![self
            .author_name
            .clone()
            .unwrap_or_else(|| "Anonymous".to_string())];

        if let Some(rating) = self.rating {
            parts.push(format!("{}★", rating));
        }
        if let Some(when) = &self.relative_time_description {
            parts.push(when.clone());
        }

        parts.join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline() {
        let review = Review {
            author_name: Some("Asha".to_string()),
            rating: Some(5.0),
            relative_time_description: Some("a month ago".to_string()),
            ..Review::default()
        };
        assert_eq!(review.headline(), "Asha · 5★ · a month ago");
        assert_eq!(Review::default().headline(), "Anonymous");
    }
}
