//! Page host protocol.
//!
//! The host is the browser-side glue: it owns the loaded document and can
//! open, reload, fill, click and close. The workflow controller drives a
//! host but never reaches into the browser itself.

use async_trait::async_trait;
use url::Url;

use crate::error::HostError;
use crate::types::InfoLink;

/// A single loaded document and the operations the workflow needs on it.
#[async_trait]
pub trait PageHost: Send + Sync {
    /// URL of the currently loaded document.
    fn url(&self) -> &Url;

    /// Serialized markup of the document as it is rendered right now.
    async fn snapshot_html(&self) -> Result<String, HostError>;

    /// Show a blocking message to the operator.
    async fn alert(&self, message: &str) -> Result<(), HostError>;

    /// Open a URL in a new, independent context.
    async fn open_in_new_context(&self, url: &Url) -> Result<(), HostError>;

    /// Reload the current document.
    async fn reload(&self) -> Result<(), HostError>;

    /// Close the current context. Hosts may refuse; callers only log that.
    async fn close(&self) -> Result<(), HostError>;

    /// Set an input's value and fire its input/change notifications.
    async fn fill_input(&self, element_id: &str, value: &str) -> Result<(), HostError>;

    /// Click the element with the given id.
    async fn click(&self, element_id: &str) -> Result<(), HostError>;

    /// Activate a link found in the document.
    async fn follow_link(&self, link: &InfoLink) -> Result<(), HostError>;
}
