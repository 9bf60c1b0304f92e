//! Google Scholar author data scraped from the public profile page.
//!
//! Google Scholar has no official API and rejects clients that do not look
//! like a browser, so requests carry a desktop browser user agent. The
//! selectors below track the profile page markup and will need updating
//! whenever Google changes it.

use super::{profile_url, PublicationSource};
use crate::config::AppConfig;
use crate::error::{PortfolioError, Result};
use crate::models::{CitationStats, Publication, PublicationReport};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const ROW_SELECTOR: &str = "tr.gsc_a_tr";
const TITLE_SELECTOR: &str = "a.gsc_a_at";
const GRAY_SELECTOR: &str = "div.gs_gray";
const YEAR_SELECTOR: &str = ".gsc_a_y span";
const CITATIONS_SELECTOR: &str = "a.gsc_a_ac";
const STATS_ROW_SELECTOR: &str = "#gsc_rsb_st tbody tr";
const CELL_SELECTOR: &str = "td";

pub struct ProfilePageSource {
    client: Client,
    scholar_url: Url,
}

impl ProfilePageSource {
    pub fn new(scholar_url: Url) -> Result<Self> {
        let client = Client::builder().user_agent(BROWSER_USER_AGENT).build()?;
        Ok(Self { client, scholar_url })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.scholar_url.clone())
    }

    fn page_url(&self, author_id: &str) -> Url {
        let mut url = self.scholar_url.clone();
        url.set_path("/citations");
        url.set_query(None);
        url.query_pairs_mut().append_pair("user", author_id).append_pair("hl", "en");
        url
    }
}

#[async_trait]
impl PublicationSource for ProfilePageSource {
    fn name(&self) -> &'static str {
        "profile"
    }

    fn failure_note(&self) -> &'static str {
        "Google Scholar may be blocking automated requests. Try again later or configure SERPAPI_KEY."
    }

    async fn fetch_publications(&self, author_id: &str) -> Result<PublicationReport> {
        let url = self.page_url(author_id);
        debug!("Fetching Google Scholar profile {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PortfolioError::UpstreamFailure(format!(
                "Request failed with status code {}",
                status.as_u16()
            )));
        }

        let html = response.text().await?;
        parse_profile(&html, &self.scholar_url, author_id)
    }
}

struct Selectors {
    row: Selector,
    title: Selector,
    gray: Selector,
    year: Selector,
    citations: Selector,
    stats_row: Selector,
    cell: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            row: selector(ROW_SELECTOR)?,
            title: selector(TITLE_SELECTOR)?,
            gray: selector(GRAY_SELECTOR)?,
            year: selector(YEAR_SELECTOR)?,
            citations: selector(CITATIONS_SELECTOR)?,
            stats_row: selector(STATS_ROW_SELECTOR)?,
            cell: selector(CELL_SELECTOR)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| PortfolioError::ParseFailure(format!("Invalid selector {}: {}", css, e)))
}

/// Extract publications and citation metrics from a profile page.
///
/// Markup that does not match yields fewer publications or zeroed stats,
/// never an error.
pub fn parse_profile(html: &str, scholar_url: &Url, author_id: &str) -> Result<PublicationReport> {
    let selectors = Selectors::new()?;
    let document = Html::parse_document(html);
    let fallback_link = profile_url(scholar_url, author_id);

    let mut publications = Vec::new();
    let mut skipped = 0;
    for row in document.select(&selectors.row) {
        match parse_row(row, &selectors, scholar_url, &fallback_link) {
            Some(publication) => publications.push(publication),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!("Skipped {} profile rows without a title", skipped);
    }

    let stats_rows: Vec<ElementRef> = document.select(&selectors.stats_row).collect();
    if stats_rows.is_empty() {
        warn!("No citation statistics table found on profile {}", author_id);
    }
    let stat = |index: usize| {
        stats_rows
            .get(index)
            .and_then(|row| row.select(&selectors.cell).nth(1))
            .map(text_of)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "0".to_string())
    };

    let stats = CitationStats {
        total_citations: stat(0),
        h_index: stat(1),
        i10_index: stat(2),
    };

    Ok(PublicationReport { publications, stats })
}

fn parse_row(row: ElementRef, selectors: &Selectors, scholar_url: &Url, fallback_link: &str) -> Option<Publication> {
    let title_link = row.select(&selectors.title).next();
    let title = title_link.map(text_of).unwrap_or_default();
    if title.is_empty() {
        return None;
    }

    let link = title_link
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| scholar_url.join(href).ok())
        .map(|url| url.to_string())
        .unwrap_or_else(|| fallback_link.to_string());

    let mut gray = row.select(&selectors.gray);
    let authors = gray.next().map(text_of).unwrap_or_default();
    let venue = gray.next().map(text_of).unwrap_or_default();

    let year = row.select(&selectors.year).next().map(text_of).unwrap_or_default();

    let citations = row
        .select(&selectors.citations)
        .next()
        .map(text_of)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "0".to_string());

    Some(Publication {
        title,
        authors,
        venue,
        year,
        citations,
        link,
    })
}

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
