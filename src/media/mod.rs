use std::fmt;
use std::str::FromStr;

use crate::ValidationError;

/// Requested media container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Mp4,
    Webm,
    Mp3,
    Opus,
}

/// Which download section a format lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Mp4, Format::Webm, Format::Mp3, Format::Opus];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Mp4 => "mp4",
            Format::Webm => "webm",
            Format::Mp3 => "mp3",
            Format::Opus => "opus",
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Format::Mp4 | Format::Webm => MediaKind::Video,
            Format::Mp3 | Format::Opus => MediaKind::Audio,
        }
    }
}

impl FromStr for Format {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ValidationError::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MediaKind {
    /// Class name of the section holding this kind of download
    pub fn section_class(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

/// Spoken-language filter for audio downloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Accept any language
    #[default]
    Auto,
    Eng,
    Deu,
}

impl Language {
    /// Spellings accepted on input, besides "auto"
    pub const SUPPORTED: [&'static str; 4] = ["en", "de", "deu", "eng"];

    /// Canonical three-letter tag, or `None` for `Auto`
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Language::Auto => None,
            Language::Eng => Some("eng"),
            Language::Deu => Some("deu"),
        }
    }

    /// Whether a candidate's language label passes this filter
    pub fn accepts(&self, label: &str) -> bool {
        match self.tag() {
            None => true,
            Some(tag) => label.to_lowercase() == tag,
        }
    }
}

/// Map short language codes to the tags used on download pages
pub fn canonical_language(lang: &str) -> String {
    match lang.to_lowercase().as_str() {
        "de" => "deu".to_string(),
        "en" => "eng".to_string(),
        other => other.to_string(),
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "auto" {
            return Ok(Language::Auto);
        }
        if !Language::SUPPORTED.contains(&s) {
            return Err(ValidationError::UnsupportedLanguage(s.to_string()));
        }

        match canonical_language(s).as_str() {
            "eng" => Ok(Language::Eng),
            "deu" => Ok(Language::Deu),
            _ => Err(ValidationError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().unwrap_or("auto"))
    }
}

/// A validated resolution request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Page holding the download section
    pub page_url: String,

    pub format: Format,

    /// Ignored for video formats
    pub language: Language,
}

impl Request {
    /// Validate raw caller input into a request
    pub fn new(
        page_url: impl Into<String>,
        format: &str,
        language: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            page_url: page_url.into(),
            format: format.parse()?,
            language: language.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("mp4".parse::<Format>(), Ok(Format::Mp4));
        assert_eq!("opus".parse::<Format>(), Ok(Format::Opus));
        assert_eq!(
            "MP4".parse::<Format>(),
            Err(ValidationError::UnsupportedFormat("MP4".to_string()))
        );
        assert!("avi".parse::<Format>().is_err());
        assert!("".parse::<Format>().is_err());
    }

    #[test]
    fn test_format_kind() {
        assert_eq!(Format::Mp4.kind(), MediaKind::Video);
        assert_eq!(Format::Webm.kind(), MediaKind::Video);
        assert_eq!(Format::Mp3.kind(), MediaKind::Audio);
        assert_eq!(Format::Opus.kind(), MediaKind::Audio);
        assert_eq!(MediaKind::Audio.section_class(), "audio");
    }

    #[test]
    fn test_language_canonicalization() {
        assert_eq!("en".parse::<Language>(), Ok(Language::Eng));
        assert_eq!("eng".parse::<Language>(), Ok(Language::Eng));
        assert_eq!("de".parse::<Language>(), Ok(Language::Deu));
        assert_eq!("deu".parse::<Language>(), Ok(Language::Deu));
        assert_eq!("auto".parse::<Language>(), Ok(Language::Auto));
        assert_eq!(canonical_language("EN"), "eng");
        assert_eq!(canonical_language("FRA"), "fra");
    }

    #[test]
    fn test_language_rejects_unknown() {
        assert_eq!(
            "fr".parse::<Language>(),
            Err(ValidationError::UnsupportedLanguage("fr".to_string()))
        );
        assert!("AUTO".parse::<Language>().is_err());
        assert!("English".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_accepts_labels() {
        assert!(Language::Auto.accepts("anything"));
        assert!(Language::Eng.accepts("ENG"));
        assert!(!Language::Eng.accepts("English"));
        assert!(!Language::Deu.accepts(" deu"));
    }

    #[test]
    fn test_request_validation() {
        let request = Request::new("https://example.com/v/talk", "mp3", "de").unwrap();
        assert_eq!(request.format, Format::Mp3);
        assert_eq!(request.language, Language::Deu);

        assert!(matches!(
            Request::new("https://example.com", "flac", "auto"),
            Err(ValidationError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            Request::new("https://example.com", "mp4", "es"),
            Err(ValidationError::UnsupportedLanguage(_))
        ));
    }
}
