//! Looking songs up on the lyrics site

use std::time::Duration;

use reqwest::{
    blocking::Client,
    header::{CONTENT_TYPE, HeaderMap},
};

use crate::{
    config::{HttpConfig, SearchConfig, SiteConfig},
    domain::{Cover, MetadataRecord},
};

pub mod error;
pub mod page;
pub mod search;

use error::ScrapeError;
use page::ParsedPage;

/// Anything that can turn a title guess into a filled record
pub trait LyricsSource {
    fn lookup(&self, query: &str) -> Result<MetadataRecord, ScrapeError>;
}

/// azlyrics.com, found through a searx instance
pub struct AzLyrics {
    client: Client,
    site: SiteConfig,
    search: SearchConfig,
}

impl AzLyrics {
    pub fn new(
        site: SiteConfig,
        search: SearchConfig,
        http: &HttpConfig,
    ) -> Result<Self, ScrapeError> {
        let mut builder = Client::builder().user_agent(http.user_agent.as_str());
        if let Some(secs) = http.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            site,
            search,
        })
    }

    /// URL of the lyrics page for `title`
    pub fn resolve(&self, title: &str) -> Result<String, ScrapeError> {
        let params = search::search_params(title, &self.site.domain, &self.search.language);
        let html = self
            .client
            .get(&self.search.url)
            .query(&params)
            .send()?
            .error_for_status()?
            .text()?;
        log::debug!("search for {title:?} returned {} bytes", html.len());

        search::find_lyrics_link(&html, &self.site.domain)
    }

    /// Scrapes the lyrics page at `url`, downloading the cover if there is one
    pub fn parse(&self, url: &str) -> Result<MetadataRecord, ScrapeError> {
        let html = self.client.get(url).send()?.error_for_status()?.text()?;
        log::debug!("GET {url} -> {} bytes", html.len());

        let ParsedPage {
            mut record,
            cover_url,
        } = page::parse_page(&html, url, &self.site.base_url, MetadataRecord::default())?;

        if let Some(cover_url) = cover_url {
            record.cover = self.fetch_cover(&cover_url);
        }

        Ok(record)
    }

    fn fetch_cover(&self, url: &str) -> Option<Cover> {
        match self.download_cover(url) {
            Ok(cover) => Some(cover),
            Err(err) => {
                log::error!("failed to download cover {url}: {err}");
                None
            }
        }
    }

    fn download_cover(&self, url: &str) -> Result<Cover, reqwest::Error> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let mime = cover_mime(response.headers());
        let data = response.bytes()?.to_vec();

        log::debug!("cover {url}: {} bytes, {mime:?}", data.len());
        Ok(Cover::new(data, mime.as_deref()))
    }
}

/// `Content-Type` without its parameters, `None` when missing or unreadable
fn cover_mime(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .filter(|mime| !mime.is_empty())
        .map(str::to_string)
}

impl LyricsSource for AzLyrics {
    fn lookup(&self, query: &str) -> Result<MetadataRecord, ScrapeError> {
        let url = self.resolve(query)?;
        println!("{url}");

        println!("Please wait...");
        self.parse(&url)
    }
}
