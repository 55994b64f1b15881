//! Ls command - browse the remote file listing
//!
//! Establishes a session, fetches the listing, and renders it through the
//! file-list view. Pagination is followed by default; `--one-page` keeps the
//! single-page behavior of a plain `files.list` call.

use anyhow::{Context, Result};
use drivebox_core::config::Config;
use drivebox_core::domain::PageSize;
use drivebox_core::usecases::ListFilesUseCase;
use std::sync::Arc;
use tracing::info;

use crate::output::{get_formatter, OutputFormat};
use crate::view::FileListView;

/// Arguments for the ls subcommand
#[derive(Debug, clap::Args)]
pub struct LsCommand {
    /// Entries per page (defaults to listing.page_size from config)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Fetch only the first page instead of following pagination
    #[arg(long)]
    pub one_page: bool,
}

impl LsCommand {
    pub async fn execute(&self, format: OutputFormat, config: &Config) -> Result<()> {
        let fmt = get_formatter(format.is_json());

        // Step 1: Establish the session
        let ctx = super::establish_session(config).await?;

        let page_size = PageSize::new(self.page_size.unwrap_or(config.listing.page_size))
            .context("Invalid page size")?;

        // Step 2: Fetch the listing
        let usecase = ListFilesUseCase::new(Arc::clone(&ctx.gateway));
        let follow = !self.one_page && config.listing.follow_pagination;

        let entries = if follow {
            usecase.all_pages(&ctx.session, page_size).await?
        } else {
            usecase.single_page(&ctx.session, page_size).await?.entries
        };

        // Step 3: Hand the snapshot to the view and render it
        let mut view = FileListView::new();
        view.reveal();
        view.replace(entries);

        info!(
            rows = view.len(),
            visible = view.is_visible(),
            follow,
            "Rendered remote listing"
        );

        if format.is_json() {
            let json = serde_json::json!({
                "files": view
                    .entries()
                    .iter()
                    .map(|e| serde_json::json!({"id": e.id.as_str(), "name": e.name}))
                    .collect::<Vec<_>>(),
            });
            fmt.print_json(&json);
        } else if view.is_empty() {
            fmt.info("No files found");
        } else {
            for name in view.rows() {
                fmt.row(name);
            }
        }

        Ok(())
    }
}
