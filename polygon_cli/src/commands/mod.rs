//! CLI subcommand implementations.

pub mod aggs;
pub mod corporate;
pub mod indicator;
pub mod market;
pub mod snapshot;
pub mod tickers;
pub mod trades;

use anyhow::Result;
use polygon_api::{Client, Paginated};
use serde::de::DeserializeOwned;

/// Collects the items of `first` and of up to `pages - 1` following pages.
///
/// Pages are fetched one at a time by following each page's `next_url`.
pub async fn collect_pages<P, T>(
    client: &Client,
    first: P,
    pages: u32,
    items_of: impl Fn(P) -> Vec<T>,
) -> Result<Vec<T>>
where
    P: Paginated + DeserializeOwned + Default,
{
    let mut items = Vec::new();
    let mut page = first;
    let mut fetched = 1;
    loop {
        let next = if fetched < pages {
            client.next_page(&page).await?
        } else {
            None
        };
        let more = page.has_next_page();
        items.extend(items_of(page));
        match next {
            Some(next) => {
                page = next;
                fetched += 1;
            }
            None => {
                if more && fetched >= pages {
                    eprintln!("More results available; pass --pages to fetch further pages");
                }
                break;
            }
        }
    }
    eprintln!("{} results from {} page(s)", items.len(), fetched);
    Ok(items)
}
