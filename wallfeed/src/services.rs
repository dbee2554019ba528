use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use std::time::Duration;

use wallfeed::api::vk::VkClient;
use wallfeed::cancel::cancel_pair;
use wallfeed::render::format_feed;
use wallfeed::Resolver;

use crate::cli::Args;
use crate::settings::merge_settings_with_args;

pub async fn run(args: Args) -> Result<()> {
    let settings = merge_settings_with_args(&args)?;
    if settings.token.is_empty() {
        bail!("An access token is required (--token, WALLFEED_TOKEN or config file)");
    }

    let owner = VkClient::parse_wall_ref(&settings.wall)?;
    let client = VkClient::new(settings.api_url, settings.token, settings.api_version)
        .context("Failed to build HTTP client")?;
    let resolver = Resolver::new(client).with_count(settings.count);

    let (handle, signal) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling");
            handle.cancel();
        }
    });

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    spinner.set_message(format!("Hydrating wall {}...", owner));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = resolver.resolve(owner, &signal).await;

    spinner.finish_and_clear();

    let feed = outcome?;
    if settings.json {
        println!("{}", serde_json::to_string_pretty(&feed)?);
    } else {
        println!("{}", format_feed(&feed));
    }

    Ok(())
}
