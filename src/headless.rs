//! Page host backed by a saved document.
//!
//! Stands in for the browser: actions that would change the page are
//! printed for the operator and logged instead.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};
use url::Url;

use capture_protocols::{HostError, InfoLink, PageHost};

/// A document loaded from disk, or built in memory.
pub(crate) struct HeadlessHost {
    url: Url,
    html: String,
    closed: AtomicBool,
    log: Mutex<Vec<String>>,
}

impl HeadlessHost {
    pub(crate) fn new(url: Url, html: impl Into<String>) -> Self {
        Self {
            url,
            html: html.into(),
            closed: AtomicBool::new(false),
            log: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn from_file(url: Url, path: &Path) -> Result<Self, HostError> {
        let html = std::fs::read_to_string(path)
            .map_err(|e| HostError::NavigationFailed(format!("{}: {}", path.display(), e)))?;
        Ok(Self::new(url, html))
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Every action performed so far, in order.
    #[cfg(test)]
    pub(crate) fn actions(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    fn act(&self, action: String) -> Result<(), HostError> {
        if self.is_closed() {
            return Err(HostError::Closed);
        }
        debug!("{}", action);
        println!("{}", action);
        self.log.lock().push(action);
        Ok(())
    }
}

#[async_trait]
impl PageHost for HeadlessHost {
    fn url(&self) -> &Url {
        &self.url
    }

    async fn snapshot_html(&self) -> Result<String, HostError> {
        if self.is_closed() {
            return Err(HostError::Closed);
        }
        Ok(self.html.clone())
    }

    async fn alert(&self, message: &str) -> Result<(), HostError> {
        warn!("Alert: {}", message);
        self.act(format!("alert: {}", message))
    }

    async fn open_in_new_context(&self, url: &Url) -> Result<(), HostError> {
        self.act(format!("open: {}", url))
    }

    async fn reload(&self) -> Result<(), HostError> {
        self.act(format!("reload: {}", self.url))
    }

    async fn close(&self) -> Result<(), HostError> {
        self.act(format!("close: {}", self.url))?;
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn fill_input(&self, element_id: &str, value: &str) -> Result<(), HostError> {
        self.act(format!("fill #{}: {}", element_id, value))
    }

    async fn click(&self, element_id: &str) -> Result<(), HostError> {
        self.act(format!("click #{}", element_id))
    }

    async fn follow_link(&self, link: &InfoLink) -> Result<(), HostError> {
        let target = match link.href.as_deref() {
            Some(href) => self
                .url
                .join(href)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| href.to_string()),
            None => link.text.clone(),
        };
        self.act(format!("follow: {}", target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> HeadlessHost {
        HeadlessHost::new(
            Url::parse("https://www.sosnc.gov/online_services/search/Business_Registration_Results")
                .unwrap(),
            "<p>results</p>",
        )
    }

    #[tokio::test]
    async fn test_actions_are_recorded() {
        let host = host();
        host.fill_input("SearchCriteria", "Acme").await.unwrap();
        host.click("SubmitButton").await.unwrap();
        assert_eq!(
            host.actions(),
            vec!["fill #SearchCriteria: Acme", "click #SubmitButton"]
        );
    }

    #[tokio::test]
    async fn test_follow_link_resolves_relative_href() {
        let host = host();
        let link = InfoLink {
            text: "More information".to_string(),
            href: Some("/online_services/search/Business_Registration_profile/1".to_string()),
        };
        host.follow_link(&link).await.unwrap();
        assert_eq!(
            host.actions(),
            vec!["follow: https://www.sosnc.gov/online_services/search/Business_Registration_profile/1"]
        );
    }

    #[tokio::test]
    async fn test_closed_host_refuses_actions() {
        let host = host();
        host.close().await.unwrap();
        assert!(host.is_closed());
        assert!(matches!(host.snapshot_html().await, Err(HostError::Closed)));
        assert!(matches!(host.reload().await, Err(HostError::Closed)));
    }

    #[test]
    fn test_from_missing_file() {
        let url = Url::parse("http://localhost:5000/").unwrap();
        let result = HeadlessHost::from_file(url, Path::new("/nonexistent/page.html"));
        assert!(matches!(result, Err(HostError::NavigationFailed(_))));
    }
}
