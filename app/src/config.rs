const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Where the backend lives. Read from `API_BASE_URL` at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn from_env() -> Self {
        Self::new(option_env!("API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Absolute url of an API route such as `restaurants/1`.
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route.trim_start_matches('/'))
    }

    /// Absolute url of an uploaded image. `None` when the entity has no image,
    /// in which case the bundled default is shown.
    pub fn asset_url(&self, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty()).map(|p| self.endpoint(p))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_path() {
        let config = ApiConfig::new("http://api.example.com/");

        assert_eq!(
            config.asset_url(Some("public/logo.png")),
            Some("http://api.example.com/public/logo.png".to_string())
        );
        assert_eq!(
            config.endpoint("/restaurants/4"),
            "http://api.example.com/restaurants/4"
        );
    }

    #[test]
    fn missing_assets_fall_back() {
        let config = ApiConfig::new("http://api.example.com");

        assert_eq!(config.asset_url(None), None);
        assert_eq!(config.asset_url(Some("")), None);
    }
}
