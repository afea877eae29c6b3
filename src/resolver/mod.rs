use tracing::{debug, info};

use crate::document::{Document, HtmlDocument, Node, SelectorSpec};
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::media::{Format, Language, MediaKind, Request};
use crate::Result;

/// Resolves the direct download link for a format on a media page
pub struct LinkResolver<F = HttpFetcher> {
    fetcher: F,
}

impl LinkResolver<HttpFetcher> {
    pub fn new() -> Self {
        Self::with_fetcher(HttpFetcher::new())
    }
}

impl Default for LinkResolver<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PageFetcher> LinkResolver<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Resolve a download link from raw caller input.
    ///
    /// `format` and `language` are validated before the page is requested.
    /// Returns `Ok(None)` when the page has no matching link.
    pub async fn resolve(
        &self,
        page_url: &str,
        format: &str,
        language: &str,
    ) -> Result<Option<String>> {
        let request = Request::new(page_url, format, language)?;
        self.resolve_request(&request).await
    }

    /// Resolve a download link for an already validated request
    pub async fn resolve_request(&self, request: &Request) -> Result<Option<String>> {
        info!(
            "Resolving {} link (language: {}) from: {}",
            request.format, request.language, request.page_url
        );

        let body = self.fetcher.fetch(&request.page_url).await?;
        let document = HtmlDocument::parse(&body);

        let link = find_link(&document, request.format, request.language)?;
        match &link {
            Some(href) => info!("Found {} link: {}", request.format, href),
            None => info!("No {} link found", request.format),
        }

        Ok(link)
    }
}

/// Pick the download link for `format` out of a parsed page.
///
/// Video formats take the first linked anchor below the section whose id is
/// the format name. Audio formats take the first anchor whose language label
/// passes `language` and whose title's second word is the format name.
pub fn find_link<D: Document>(
    document: &D,
    format: Format,
    language: Language,
) -> Result<Option<String>> {
    match format.kind() {
        MediaKind::Video => first_video_link(document, format),
        MediaKind::Audio => first_audio_link(document, format, language),
    }
}

fn download_section(kind: MediaKind) -> SelectorSpec {
    SelectorSpec::new().class("downloads").class(kind.section_class())
}

fn first_video_link<D: Document>(document: &D, format: Format) -> Result<Option<String>> {
    let spec = download_section(MediaKind::Video).id(format.as_str()).tag("a");

    Ok(document
        .find_all(&spec)?
        .find_map(|anchor| anchor.attr("href").map(str::to_string)))
}

fn first_audio_link<D: Document>(
    document: &D,
    format: Format,
    language: Language,
) -> Result<Option<String>> {
    let spec = download_section(MediaKind::Audio).tag("a");

    document
        .find_all(&spec)?
        .find_map(|anchor| audio_candidate(&anchor, format, language).transpose())
        .transpose()
}

/// The anchor's href if it is a match, `None` if it should be skipped
fn audio_candidate<N: Node>(
    anchor: &N,
    format: Format,
    language: Language,
) -> Result<Option<String>> {
    let Some(href) = anchor.attr("href") else {
        debug!("Skipping audio anchor without href");
        return Ok(None);
    };

    let label = match anchor.text_of(&SelectorSpec::new().class("language"))? {
        Some(label) if !label.is_empty() => label,
        _ => {
            debug!("Skipping {}: no language label", href);
            return Ok(None);
        }
    };

    if !language.accepts(&label) {
        debug!("Skipping {}: language '{}' does not match {}", href, label, language);
        return Ok(None);
    }

    let title = match anchor.text_of(&SelectorSpec::new().class("title"))? {
        Some(title) if !title.is_empty() => title,
        _ => {
            debug!("Skipping {}: no title", href);
            return Ok(None);
        }
    };

    // Titles look like "Audio mp3": the second word names the version
    let Some(version) = title.split_whitespace().nth(1) else {
        debug!("Skipping {}: title '{}' has no version word", href, title);
        return Ok(None);
    };

    if version.to_lowercase() == format.as_str() {
        Ok(Some(href.to_string()))
    } else {
        debug!("Skipping {}: version '{}' is not {}", href, version, format);
        Ok(None)
    }
}
