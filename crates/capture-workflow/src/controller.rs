//! Workflow controller.
//!
//! One controller serves one loaded document. It keeps no memory between
//! documents: whatever the next page needs is written to the handoff store.

use std::sync::Arc;

use tracing::{error, info, warn};
use url::Url;

use capture_config::Config;
use capture_extract::extract_profile;
use capture_extract::probe::{find_more_information_link, trigger_sources, SearchForm};
use capture_handoff::{HandoffStore, TokenWatcher, WatcherHandle};
use capture_protocols::{InfoLink, PageHost, RefreshToken, TriggerSource};

use crate::delivery::DeliveryClient;
use crate::error::WorkflowError;
use crate::stage::Stage;

const MISSING_NAME_MESSAGE: &str = "No business name found for the registry search.";
const DELIVERY_FAILED_MESSAGE: &str = "Error sending officials to the origin application";
const STORE_FAILED_MESSAGE: &str = "Could not save the lookup for the registry search";

/// Result of an origin trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The control carried no name; the operator was alerted.
    MissingName,
    /// The handoff store refused the write; the operator was alerted and no
    /// search page was opened.
    StoreFailed,
    /// State was stored and the search page opened.
    Opened { business_name: String, search_url: Url },
}

/// Result of the search stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    NoStoredName,
    FormMissing,
    Submitted { business_name: String },
}

/// Result of a results-panel expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsOutcome {
    LinkMissing,
    Followed(InfoLink),
}

/// Result of the profile stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileOutcome {
    /// No officials on the page; nothing was sent.
    NothingToSend,
    /// The origin accepted the officials and a refresh token was written.
    Delivered {
        count: Option<u64>,
        token: RefreshToken,
    },
    /// Delivery failed; the operator was alerted and the token left alone.
    DeliveryFailed,
}

/// What [`WorkflowController::run`] did for the current document.
pub enum RunOutcome {
    /// Origin page: the refresh token watcher is running.
    Watching(WatcherHandle),
    Search(SearchOutcome),
    Profile(ProfileOutcome),
    /// Results page: waits for the operator to expand an entry.
    AwaitingSelection,
    /// The document is not part of the workflow.
    Idle,
}

/// Drives the workflow stage of one document.
pub struct WorkflowController {
    host: Arc<dyn PageHost>,
    store: HandoffStore,
    delivery: DeliveryClient,
    config: Config,
}

impl WorkflowController {
    pub fn new(host: Arc<dyn PageHost>, store: HandoffStore, config: Config) -> Self {
        let delivery = DeliveryClient::from_config(&config.origin, &config.timing);
        Self {
            host,
            store,
            delivery,
            config,
        }
    }

    /// Replace the delivery client.
    pub fn with_delivery(mut self, delivery: DeliveryClient) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn store(&self) -> &HandoffStore {
        &self.store
    }

    /// Stage of the host's current document.
    pub fn stage(&self) -> Option<Stage> {
        Stage::classify(self.host.url(), &self.config)
    }

    /// Run the handler the current document calls for on load.
    pub async fn run(&self) -> Result<RunOutcome, WorkflowError> {
        let Some(stage) = self.stage() else {
            info!("{} is not part of the owner capture workflow", self.host.url());
            return Ok(RunOutcome::Idle);
        };
        info!("Running {} stage for {}", stage, self.host.url());

        match stage {
            Stage::Origin => Ok(RunOutcome::Watching(self.watch_origin())),
            Stage::SearchPage => Ok(RunOutcome::Search(self.on_search_page().await?)),
            Stage::ResultsPage => Ok(RunOutcome::AwaitingSelection),
            Stage::ProfilePage => Ok(RunOutcome::Profile(self.on_profile_page().await?)),
        }
    }

    /// Trigger controls on the current origin page.
    pub async fn origin_triggers(&self) -> Result<Vec<TriggerSource>, WorkflowError> {
        let html = self.host.snapshot_html().await?;
        Ok(trigger_sources(&html, &self.config.origin.trigger_selector))
    }

    /// The operator clicked a lookup trigger on the origin page.
    pub async fn on_trigger(&self, source: &TriggerSource) -> Result<TriggerOutcome, WorkflowError> {
        let business_name = source.business_name();
        if business_name.is_empty() {
            warn!("Lookup trigger carries no business name");
            self.host.alert(MISSING_NAME_MESSAGE).await?;
            return Ok(TriggerOutcome::MissingName);
        }

        let search_url = Url::parse(&self.config.registry.search_url)?;
        let origin_base = origin_base_of(self.host.url());

        let stored = match self.store.set_origin_base(&origin_base).await {
            Ok(()) => self.store.set_business_name(&business_name).await,
            Err(e) => Err(e),
        };
        if let Err(e) = stored {
            warn!("Failed to store lookup for '{}': {}", business_name, e);
            self.host
                .alert(&format!("{}: {}", STORE_FAILED_MESSAGE, e))
                .await?;
            return Ok(TriggerOutcome::StoreFailed);
        }

        self.host.open_in_new_context(&search_url).await?;
        info!(
            "Stored '{}' for origin {}, opened registry search",
            business_name, origin_base
        );

        Ok(TriggerOutcome::Opened {
            business_name,
            search_url,
        })
    }

    /// Start polling for refresh tokens; each one reloads the origin page.
    pub fn watch_origin(&self) -> WatcherHandle {
        let watcher = TokenWatcher::new(self.store.clone(), self.config.timing.watch_interval());
        let host = self.host.clone();

        watcher.spawn(RefreshToken::NONE, move |_token| {
            let host = host.clone();
            async move {
                if let Err(e) = host.reload().await {
                    warn!("Failed to reload origin page: {}", e);
                }
            }
        })
    }

    /// Prefill and submit the registry search with the stored name.
    pub async fn on_search_page(&self) -> Result<SearchOutcome, WorkflowError> {
        let business_name = match self.store.business_name().await {
            Ok(name) => name.unwrap_or_default().trim().to_string(),
            Err(e) => {
                warn!("Failed to read stored business name: {}", e);
                return Ok(SearchOutcome::NoStoredName);
            }
        };
        if business_name.is_empty() {
            info!("No stored business name, leaving search page alone");
            return Ok(SearchOutcome::NoStoredName);
        }

        let registry = &self.config.registry;
        let html = self.host.snapshot_html().await?;
        let form = SearchForm::probe(&html, &registry.search_field_id, &registry.submit_button_id);
        if !form.is_complete() {
            warn!(
                "Search input '{}' or button '{}' not found on page",
                registry.search_field_id, registry.submit_button_id
            );
            return Ok(SearchOutcome::FormMissing);
        }

        self.host
            .fill_input(&registry.search_field_id, &business_name)
            .await?;
        self.host.click(&registry.submit_button_id).await?;
        info!("Submitted registry search for '{}'", business_name);

        Ok(SearchOutcome::Submitted { business_name })
    }

    /// A result entry was expanded; follow its "More information" link.
    pub async fn on_result_expanded(&self, panel_id: &str) -> Result<ResultsOutcome, WorkflowError> {
        tokio::time::sleep(self.config.timing.expand_delay()).await;

        let html = self.host.snapshot_html().await?;
        match find_more_information_link(&html, panel_id) {
            Some(link) => {
                info!("Following '{}' in panel {}", link.text, panel_id);
                self.host.follow_link(&link).await?;
                Ok(ResultsOutcome::Followed(link))
            }
            None => {
                info!("No 'More information' link in panel {}", panel_id);
                Ok(ResultsOutcome::LinkMissing)
            }
        }
    }

    /// Extract the profile, deliver it and signal the origin to reload.
    pub async fn on_profile_page(&self) -> Result<ProfileOutcome, WorkflowError> {
        tokio::time::sleep(self.config.timing.settle_delay()).await;

        let html = self.host.snapshot_html().await?;
        let Some(payload) = extract_profile(&html).into_payload() else {
            info!("No officials found on profile page, not sending");
            return Ok(ProfileOutcome::NothingToSend);
        };

        let base = self.delivery_base().await;
        let receipt = match self.delivery.deliver(&base, &payload).await {
            Ok(receipt) => receipt,
            Err(e) => {
                error!("Failed to send officials for {}: {}", payload.display_name(), e);
                self.host
                    .alert(&format!("{}: {}", DELIVERY_FAILED_MESSAGE, e))
                    .await?;
                return Ok(ProfileOutcome::DeliveryFailed);
            }
        };

        let previous = match self.store.refresh_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to read previous refresh token: {}", e);
                RefreshToken::NONE
            }
        };
        let token = RefreshToken::next_after(previous);
        if let Err(e) = self.store.set_refresh_token(token).await {
            warn!("Officials sent but the refresh token could not be written: {}", e);
        }

        if let Err(e) = self.host.close().await {
            warn!("Could not close the profile page: {}", e);
        }

        Ok(ProfileOutcome::Delivered {
            count: receipt.count,
            token,
        })
    }

    async fn delivery_base(&self) -> String {
        match self.store.origin_base().await {
            Ok(Some(base)) if !base.trim().is_empty() => base,
            Ok(_) => self.config.origin.default_base.clone(),
            Err(e) => {
                warn!("Failed to read stored origin base, using default: {}", e);
                self.config.origin.default_base.clone()
            }
        }
    }
}

/// `scheme://host[:port]` of a URL, without trailing slashes.
pub(crate) fn origin_base_of(url: &Url) -> String {
    url.origin()
        .ascii_serialization()
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
