//! Field extraction from a lyrics page.
//!
//! Every selector below mirrors the markup of azlyrics.com song pages. When
//! the site changes its layout, this is the only file that needs updating.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::{
    domain::MetadataRecord,
    scrape::error::{Field, ScrapeError},
};

const LYRICS_ROW: &str = ".main-page>.row>.col-xs-12";

static LYRICS: Lazy<Selector> = Lazy::new(|| {
    selector(&format!(
        "{LYRICS_ROW}>div:not(.div-share):not(.lyricsh):not(.ringtone)"
    ))
});
static TITLE: Lazy<Selector> = Lazy::new(|| selector(&format!("{LYRICS_ROW}>b")));
static ARTIST: Lazy<Selector> = Lazy::new(|| selector(&format!("{LYRICS_ROW}>.lyricsh>h2")));
static ALBUM_BLOCK: Lazy<Selector> = Lazy::new(|| selector(".songinalbum_title"));
static ALBUM_IMAGE: Lazy<Selector> = Lazy::new(|| selector("img.album-image"));
static TRACKLIST: Lazy<Selector> = Lazy::new(|| selector(".songlist-panel"));
static TRACKLIST_ITEM: Lazy<Selector> = Lazy::new(|| selector(".listalbum-item"));
static LINK: Lazy<Selector> = Lazy::new(|| selector("a"));

/// `album: "Whenever You Need Somebody" (1987)`
static ALBUM_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"album:\s*"(.+?)"\s*\((\d+)\)"#).expect("album regex is valid"));

/// Site-relative path of a lyrics page, used to find it in the tracklist
static PAGE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(lyrics/.+?\.html)").expect("page path regex is valid"));

const ARTIST_SUFFIX: &str = " Lyrics";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

#[derive(Debug)]
pub struct ParsedPage {
    pub record: MetadataRecord,
    /// Absolute URL of the album cover, if the page shows one
    pub cover_url: Option<String>,
}

/// Extracts the record from a lyrics page.
///
/// Lyrics, title, artist and album are required: the first one missing stops
/// the extraction and the error carries the fields found so far.
pub fn parse_page(
    html: &str,
    page_url: &str,
    base_url: &str,
    mut record: MetadataRecord,
) -> Result<ParsedPage, ScrapeError> {
    let document = Html::parse_document(html);

    let Some(lyrics) = document.select(&LYRICS).next() else {
        return Err(ScrapeError::extract(Field::Lyrics, record));
    };
    record.lyrics = text_of(lyrics).trim().to_string();

    let Some(title) = document.select(&TITLE).next() else {
        return Err(ScrapeError::extract(Field::Title, record));
    };
    record.title = text_of(title)
        .trim_matches(|c: char| c == '"' || c.is_whitespace())
        .to_string();

    let Some(artist) = document.select(&ARTIST).next() else {
        return Err(ScrapeError::extract(Field::Artist, record));
    };
    let artist = text_of(artist);
    let artist = artist.trim();
    record.artist = artist
        .strip_suffix(ARTIST_SUFFIX)
        .unwrap_or(artist)
        .trim()
        .to_string();

    let blocks = document.select(&ALBUM_BLOCK).collect::<Vec<_>>();
    let Some(block) = pick_album_block(&blocks) else {
        return Err(ScrapeError::extract(Field::Album, record));
    };
    let Some((album, year)) = album_and_year(&text_of(block)) else {
        return Err(ScrapeError::extract(Field::Album, record));
    };
    record.album = album;
    record.year = year;

    let cover_url = block
        .select(&ALBUM_IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| resolve_url(base_url, src));

    if let Some(panel) = document.select(&TRACKLIST).next() {
        let tracks = panel.select(&TRACKLIST_ITEM).collect::<Vec<_>>();
        record.track_count = tracks.len() as u32;
        record.track_no = track_position(&tracks, page_url);
    }

    Ok(ParsedPage { record, cover_url })
}

/// Chooses which "in album" annotation describes the song.
///
/// With several annotations the second-to-last one is used. The rule was
/// inferred from example pages, the site does not document any ordering.
pub fn pick_album_block<T: Copy>(blocks: &[T]) -> Option<T> {
    match blocks.len() {
        0 => None,
        1 => Some(blocks[0]),
        n => Some(blocks[n - 2]),
    }
}

/// Album name and year, 0 when the year does not fit
fn album_and_year(text: &str) -> Option<(String, u32)> {
    let caps = ALBUM_YEAR.captures(text)?;
    let year = caps[2].parse().unwrap_or(0);
    Some((caps[1].to_string(), year))
}

/// 1-based position of the tracklist row linking back to `page_url`, 0 if none does
fn track_position(tracks: &[ElementRef], page_url: &str) -> u32 {
    let Some(path) = PAGE_PATH.find(page_url) else {
        return 0;
    };
    let path = path.as_str();

    tracks
        .iter()
        .position(|track| {
            track
                .select(&LINK)
                .next()
                .and_then(|link| link.value().attr("href"))
                .is_some_and(|href| href.contains(path))
        })
        .map(|i| i as u32 + 1)
        .unwrap_or(0)
}

fn resolve_url(base_url: &str, src: &str) -> Option<String> {
    match reqwest::Url::parse(base_url).and_then(|base| base.join(src)) {
        Ok(url) => Some(url.to_string()),
        Err(err) => {
            log::warn!("ignoring cover with unusable src {src:?}: {err}");
            None
        }
    }
}

fn text_of(element: ElementRef) -> String {
    element.text().collect()
}
