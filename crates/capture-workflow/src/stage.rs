//! Page stage classification.

use url::Url;

use capture_config::Config;

/// The role a loaded document plays in a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// A page of the origin application carrying lookup triggers.
    Origin,
    /// The registry search form.
    SearchPage,
    /// The registry results list.
    ResultsPage,
    /// A registry business profile.
    ProfilePage,
}

impl Stage {
    /// Classify a URL. `None` means the workflow has nothing to do there.
    pub fn classify(url: &Url, config: &Config) -> Option<Stage> {
        if Self::is_origin(url, config) {
            return Some(Stage::Origin);
        }

        let href = url.as_str();
        let registry = &config.registry;
        if href.starts_with(&registry.profile_prefix) {
            Some(Stage::ProfilePage)
        } else if href.starts_with(&registry.results_prefix) {
            Some(Stage::ResultsPage)
        } else if href.starts_with(&registry.search_url) {
            Some(Stage::SearchPage)
        } else {
            None
        }
    }

    fn is_origin(url: &Url, config: &Config) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        url.port_or_known_default() == Some(config.origin.port)
            && config.origin.hosts.iter().any(|h| h.eq_ignore_ascii_case(host))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Origin => "origin",
            Stage::SearchPage => "search",
            Stage::ResultsPage => "results",
            Stage::ProfilePage => "profile",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(url: &str) -> Option<Stage> {
        Stage::classify(&Url::parse(url).unwrap(), &Config::default())
    }

    #[test]
    fn test_origin_hosts() {
        assert_eq!(classify("http://localhost:5000/cases/12"), Some(Stage::Origin));
        assert_eq!(classify("http://127.0.0.1:5000/"), Some(Stage::Origin));
        assert_eq!(classify("http://192.168.1.203:5000/employers"), Some(Stage::Origin));
    }

    #[test]
    fn test_origin_requires_port() {
        assert_eq!(classify("http://localhost:8080/"), None);
        assert_eq!(classify("http://localhost/"), None);
        assert_eq!(classify("http://example.com:5000/"), None);
    }

    #[test]
    fn test_registry_stages() {
        assert_eq!(
            classify("https://www.sosnc.gov/online_services/search/by_title/search_Business_Registration"),
            Some(Stage::SearchPage)
        );
        assert_eq!(
            classify(
                "https://www.sosnc.gov/online_services/search/Business_Registration_Results?SearchCriteria=acme"
            ),
            Some(Stage::ResultsPage)
        );
        assert_eq!(
            classify(
                "https://www.sosnc.gov/online_services/search/Business_Registration_profile/1234567"
            ),
            Some(Stage::ProfilePage)
        );
    }

    #[test]
    fn test_unknown_page() {
        assert_eq!(classify("https://www.sosnc.gov/"), None);
        assert_eq!(classify("https://example.com/online_services/search/"), None);
    }

    #[test]
    fn test_custom_origin_port() {
        let mut config = Config::default();
        config.origin.port = 443;
        config.origin.hosts = vec!["cases.example.org".to_string()];
        let url = Url::parse("https://cases.example.org/list").unwrap();
        assert_eq!(Stage::classify(&url, &config), Some(Stage::Origin));
    }

    #[test]
    fn test_display() {
        assert_eq!(Stage::ProfilePage.to_string(), "profile");
    }
}
