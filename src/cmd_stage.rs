//! Workflow stage handlers for owner-capture.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use capture_config::Config;
use capture_extract::{extract_profile, OfficialsSource};
use capture_handoff::HandoffStore;
use capture_protocols::TriggerSource;
use capture_workflow::{
    ProfileOutcome, ResultsOutcome, SearchOutcome, Stage, TriggerOutcome, WorkflowController,
};

use crate::headless::HeadlessHost;

fn controller(host: Arc<HeadlessHost>, store: HandoffStore, config: &Config) -> WorkflowController {
    WorkflowController::new(host, store, config.clone())
}

fn expect_stage(url: &Url, config: &Config, expected: Stage) {
    match Stage::classify(url, config) {
        Some(stage) if stage == expected => {}
        other => warn!(
            "{} classifies as {:?}, running the {} stage anyway",
            url, other, expected
        ),
    }
}

/// Store a business name and print the search page to open.
///
/// With `page`, the name comes from the lookup triggers of the saved origin
/// page: the one matching `name`, or the first.
pub(crate) async fn trigger(
    name: Option<&str>,
    page: Option<&Path>,
    origin: &str,
    config: &Config,
    store: HandoffStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = Url::parse(origin)?;
    expect_stage(&url, config, Stage::Origin);

    let host = match page {
        Some(path) => HeadlessHost::from_file(url, path)?,
        None => HeadlessHost::new(url, ""),
    };
    let controller = controller(Arc::new(host), store, config);

    let source = if page.is_some() {
        let triggers = controller.origin_triggers().await?;
        info!("Found {} lookup triggers on the origin page", triggers.len());
        match select_trigger(triggers, name) {
            Some(source) => source,
            None => {
                println!("No matching lookup trigger on the page.");
                return Ok(());
            }
        }
    } else {
        TriggerSource::new(None, name.unwrap_or_default())
    };

    match controller.on_trigger(&source).await? {
        TriggerOutcome::MissingName => {
            println!("No business name given, nothing stored.");
        }
        TriggerOutcome::StoreFailed => {
            return Err("could not write the lookup to the handoff store".into());
        }
        TriggerOutcome::Opened {
            business_name,
            search_url,
        } => {
            println!("Stored '{}'. Open {} to continue.", business_name, search_url);
        }
    }
    Ok(())
}

fn select_trigger(triggers: Vec<TriggerSource>, name: Option<&str>) -> Option<TriggerSource> {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => triggers
            .into_iter()
            .find(|t| t.business_name().eq_ignore_ascii_case(name)),
        None => triggers.into_iter().next(),
    }
}

/// Fill and submit the search form with the stored name.
pub(crate) async fn search(
    page: Option<&Path>,
    config: &Config,
    store: HandoffStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = Url::parse(&config.registry.search_url)?;
    let host = match page {
        Some(path) => HeadlessHost::from_file(url, path)?,
        None => HeadlessHost::new(url, bare_search_form(config)),
    };
    let controller = controller(Arc::new(host), store, config);

    match controller.on_search_page().await? {
        SearchOutcome::NoStoredName => println!("No stored business name, nothing to search."),
        SearchOutcome::FormMissing => println!("Search form not found on the page."),
        SearchOutcome::Submitted { business_name } => {
            println!("Searched the registry for '{}'.", business_name)
        }
    }
    Ok(())
}

fn bare_search_form(config: &Config) -> String {
    format!(
        r#"<form><input id="{}" type="text"><button id="{}" type="submit">Search</button></form>"#,
        config.registry.search_field_id, config.registry.submit_button_id
    )
}

/// Follow the profile link of an expanded results panel.
pub(crate) async fn results(
    page: &Path,
    panel: &str,
    config: &Config,
    store: HandoffStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = Url::parse(&config.registry.results_prefix)?;
    let host = Arc::new(HeadlessHost::from_file(url, page)?);
    let controller = controller(host, store, config);

    if let ResultsOutcome::LinkMissing = controller.on_result_expanded(panel).await? {
        println!("No 'More information' link in panel '{}'.", panel);
    }
    Ok(())
}

/// Print the payload a profile page would produce.
pub(crate) fn extract(page: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let html = std::fs::read_to_string(page)?;
    let extraction = extract_profile(&html);

    match extraction.source {
        OfficialsSource::CompanyOfficials => info!("Officials taken from the company officials list"),
        OfficialsSource::RegisteredAgent => info!("Officials taken from the registered agent"),
        OfficialsSource::None => {}
    }

    match extraction.into_payload() {
        Some(payload) => println!("{}", serde_json::to_string_pretty(&payload)?),
        None => println!("No officials found, nothing to send."),
    }
    Ok(())
}

/// Run the full profile stage on a saved page.
pub(crate) async fn deliver(
    page: &Path,
    url: Option<&str>,
    config: &Config,
    store: HandoffStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = Url::parse(url.unwrap_or(config.registry.profile_prefix.as_str()))?;
    expect_stage(&url, config, Stage::ProfilePage);

    let host = Arc::new(HeadlessHost::from_file(url, page)?);
    let controller = controller(host.clone(), store, config);

    match controller.on_profile_page().await? {
        ProfileOutcome::NothingToSend => println!("No officials found, nothing sent."),
        ProfileOutcome::Delivered { count, token } => {
            match count {
                Some(n) => println!("Origin stored {} officials.", n),
                None => println!("Officials sent."),
            }
            println!("Refresh token {} written.", token);
        }
        ProfileOutcome::DeliveryFailed => {
            return Err("delivery to the origin application failed".into());
        }
    }

    if !host.is_closed() {
        warn!("Profile page was left open");
    }
    Ok(())
}

/// Watch for refresh tokens until Ctrl+C.
pub(crate) async fn watch(
    origin: &str,
    config: &Config,
    store: HandoffStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = Url::parse(origin)?;
    expect_stage(&url, config, Stage::Origin);

    let host = Arc::new(HeadlessHost::new(url, ""));
    let controller = controller(host, store, config);
    let handle = controller.watch_origin();

    println!(
        "Watching for refresh tokens every {:?}, Ctrl+C to stop.",
        config.timing.watch_interval()
    );
    tokio::signal::ctrl_c().await?;
    info!("Received Ctrl+C");

    let reloads = handle.reload_count();
    handle.shutdown().await;
    println!("Stopped after {} reloads.", reloads);
    Ok(())
}

/// Print the stage of a URL.
pub(crate) fn classify(url: &str, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let url = Url::parse(url)?;
    match Stage::classify(&url, config) {
        Some(stage) => println!("{}", stage),
        None => println!("none"),
    }
    Ok(())
}
