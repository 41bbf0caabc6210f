// ============================================================================
// File: src/query.rs
// Search query normalization
// ============================================================================

use crate::config::FinderSettings;

/// Scopes free-text queries to the brand so the search engine returns
/// dealership pages rather than generic results.
#[derive(Debug, Clone)]
pub struct QueryNormalizer {
    keyword: String,
    phrase: String,
}

impl QueryNormalizer {
    pub fn new(keyword: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            phrase: phrase.into(),
        }
    }

    pub fn from_settings(settings: &FinderSettings) -> Self {
        Self::new(&settings.brand_keyword, &settings.scoping_phrase)
    }

    /// Prepend the scoping phrase unless the query already names the brand.
    pub fn normalize(&self, raw: &str) -> String {
        if raw.to_lowercase().contains(&self.keyword) {
            raw.to_string()
        } else {
            format!("{} {}", self.phrase, raw)
        }
    }
}

impl Default for QueryNormalizer {
    fn default() -> Self {
        Self::from_settings(&FinderSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branded_queries_pass_through() {
        let normalizer = QueryNormalizer::default();
        for raw in [
            "Nearest Tata dealer in Wakad Pune",
            "TATA showroom Nagpur",
            "nexon service centre tata",
        ] {
            assert_eq!(normalizer.normalize(raw), raw);
        }
    }

    #[test]
    fn unbranded_queries_get_scoped() {
        let normalizer = QueryNormalizer::default();
        let normalized = normalizer.normalize("showroom near Andheri");
        assert_eq!(normalized, "Tata Motors dealer showroom showroom near Andheri");
        assert!(normalized.starts_with("Tata Motors dealer showroom"));
        assert!(normalized.ends_with("showroom near Andheri"));
    }

    #[test]
    fn empty_query_gets_phrase() {
        let normalizer = QueryNormalizer::default();
        assert_eq!(normalizer.normalize(""), "Tata Motors dealer showroom ");
    }

    #[test]
    fn keyword_match_ignores_configured_case() {
        let normalizer = QueryNormalizer::new("Mahindra", "Mahindra dealer");
        assert_eq!(normalizer.normalize("mahindra in Thane"), "mahindra in Thane");
        assert_eq!(normalizer.normalize("SUV in Thane"), "Mahindra dealer SUV in Thane");
    }
}
