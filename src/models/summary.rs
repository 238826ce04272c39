use serde::{Deserialize, Serialize};

/// Input for an AI generated title summary
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SummaryRequest {
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}

impl SummaryRequest {
    /// Trims every field and drops optional fields that end up blank
    pub fn normalized(&self) -> Self {
        fn non_blank(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            title: self.title.trim().to_string(),
            genre: non_blank(&self.genre),
            keywords: non_blank(&self.keywords),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_drops_blank_fields() {
        let request = SummaryRequest {
            title: "  Inception ".to_string(),
            genre: Some("   ".to_string()),
            keywords: Some(" dreams, heist ".to_string()),
        };

        let normalized = request.normalized();

        assert_eq!(normalized.title, "Inception");
        assert_eq!(normalized.genre, None);
        assert_eq!(normalized.keywords.as_deref(), Some("dreams, heist"));
    }
}
