//! Finding the lyrics page through a searx results page

use scraper::{Html, Selector};

use crate::scrape::error::ScrapeError;

/// Returns the href of the first search result pointing at a lyrics page of `domain`
pub fn find_lyrics_link(html: &str, domain: &str) -> Result<String, ScrapeError> {
    let selector = format!(r#"div#urls>article>h3>a[href*="{domain}/lyrics/"]"#);
    let selector = Selector::parse(&selector).map_err(|e| ScrapeError::Selector(format!("{e:?}")))?;

    let document = Html::parse_document(html);
    document
        .select(&selector)
        .find_map(|link| link.value().attr("href"))
        .map(str::to_string)
        .ok_or(ScrapeError::Resolve)
}

/// Query parameters understood by searx
pub fn search_params(title: &str, domain: &str, language: &str) -> Vec<(&'static str, String)> {
    vec![
        ("q", format!("{title} site:{domain}")),
        ("category_general", "1".to_string()),
        ("language", language.to_string()),
        ("time_range", String::new()),
        ("safesearch", "0".to_string()),
        ("theme", "simple".to_string()),
    ]
}
