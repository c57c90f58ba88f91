//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub origin: OriginConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

/// The case-management application that starts lookups and receives officials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginConfig {
    /// Hostnames the origin application is served from.
    #[serde(default = "default_origin_hosts")]
    pub hosts: Vec<String>,

    #[serde(default = "default_origin_port")]
    pub port: u16,

    /// Base URL used when no origin was recorded by a trigger.
    #[serde(default = "default_origin_base")]
    pub default_base: String,

    /// Path of the officials endpoint, appended to the origin base.
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,

    /// CSS selector of the lookup trigger controls on origin pages.
    #[serde(default = "default_trigger_selector")]
    pub trigger_selector: String,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            hosts: default_origin_hosts(),
            port: default_origin_port(),
            default_base: default_origin_base(),
            endpoint_path: default_endpoint_path(),
            trigger_selector: default_trigger_selector(),
        }
    }
}

fn default_origin_hosts() -> Vec<String> {
    vec![
        "localhost".to_string(),
        "127.0.0.1".to_string(),
        "192.168.1.203".to_string(),
    ]
}

fn default_origin_port() -> u16 {
    5000
}

fn default_origin_base() -> String {
    "http://localhost:5000".to_string()
}

fn default_endpoint_path() -> String {
    "/api/sos_officials".to_string()
}

fn default_trigger_selector() -> String {
    ".sos-btn".to_string()
}

/// The business registry pages the workflow walks through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_search_url")]
    pub search_url: String,

    #[serde(default = "default_results_prefix")]
    pub results_prefix: String,

    #[serde(default = "default_profile_prefix")]
    pub profile_prefix: String,

    #[serde(default = "default_search_field_id")]
    pub search_field_id: String,

    #[serde(default = "default_submit_button_id")]
    pub submit_button_id: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            results_prefix: default_results_prefix(),
            profile_prefix: default_profile_prefix(),
            search_field_id: default_search_field_id(),
            submit_button_id: default_submit_button_id(),
        }
    }
}

fn default_search_url() -> String {
    "https://www.sosnc.gov/online_services/search/by_title/search_Business_Registration"
        .to_string()
}

fn default_results_prefix() -> String {
    "https://www.sosnc.gov/online_services/search/Business_Registration_Results".to_string()
}

fn default_profile_prefix() -> String {
    "https://www.sosnc.gov/online_services/search/Business_Registration_profile/".to_string()
}

fn default_search_field_id() -> String {
    "SearchCriteria".to_string()
}

fn default_submit_button_id() -> String {
    "SubmitButton".to_string()
}

/// Delays and intervals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// How often the origin polls for a refresh token.
    #[serde(default = "default_watch_interval_ms")]
    pub watch_interval_ms: u64,

    /// Wait before extracting a profile page.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Wait after a result entry is expanded before looking for its link.
    #[serde(default = "default_expand_delay_ms")]
    pub expand_delay_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl TimingConfig {
    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn expand_delay(&self) -> Duration {
        Duration::from_millis(self.expand_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            watch_interval_ms: default_watch_interval_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            expand_delay_ms: default_expand_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_watch_interval_ms() -> u64 {
    3000
}

fn default_settle_delay_ms() -> u64 {
    300
}

fn default_expand_delay_ms() -> u64 {
    150
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Handoff store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl StoreConfig {
    /// Store path with `~` expanded.
    pub fn resolved_path(&self) -> PathBuf {
        PathBuf::from(crate::ConfigLoader::expand_path(&self.path))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> String {
    "~/.owner-capture/handoff.json".to_string()
}
