use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::client::decode_response;

pub const PER_PAGE: u32 = 100;

/// Every this many pages a warning is logged. The loop itself has no ceiling.
const PAGE_WARN_INTERVAL: u32 = 100;

pub struct Paginator<'a> {
    client: &'a Client,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Requests pages 1, 2, ... until one comes back empty and returns every
    /// item seen. The first failing page aborts the whole fetch.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        base_url: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut page: u32 = 1;

        loop {
            tracing::debug!("Fetching: {} page {}", base_url, page);
            let response = self
                .client
                .get(base_url)
                .query(extra_params)
                .query(&[("per_page", PER_PAGE), ("page", page)])
                .send()
                .await?;

            let items: Vec<T> = decode_response(response, base_url).await?;
            if items.is_empty() {
                break;
            }
            all_items.extend(items);

            if page % PAGE_WARN_INTERVAL == 0 {
                tracing::warn!(
                    "{} has returned {} non-empty pages ({} items) and is still going",
                    base_url,
                    page,
                    all_items.len()
                );
            }

            page += 1;
        }

        tracing::debug!("Fetched {} items from {} in {} requests", all_items.len(), base_url, page);
        Ok(all_items)
    }
}
