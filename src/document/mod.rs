//! Read-only queries over a parsed HTML page
//!
//! The resolver only needs to find elements by tag, class and id, and to read
//! attributes and text. Those capabilities are expressed by the [`Document`]
//! and [`Node`] traits; [`HtmlDocument`] implements them on top of `scraper`.

use scraper::{ElementRef, Html, Selector};
use std::fmt;

use crate::{ResolveError, Result};

/// One step of a descendant selector chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Tag(String),
    Class(String),
    Id(String),
}

/// Descendant chain such as `.downloads .video #mp4 a`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorSpec {
    steps: Vec<Step>,
}

impl SelectorSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, name: impl Into<String>) -> Self {
        self.steps.push(Step::Tag(name.into()));
        self
    }

    pub fn class(mut self, name: impl Into<String>) -> Self {
        self.steps.push(Step::Class(name.into()));
        self
    }

    pub fn id(mut self, name: impl Into<String>) -> Self {
        self.steps.push(Step::Id(name.into()));
        self
    }

    /// Render as a CSS selector
    pub fn to_css(&self) -> String {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Tag(name) => name.clone(),
                Step::Class(name) => format!(".{}", name),
                Step::Id(name) => format!("#{}", name),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for SelectorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// An element handed out by a [`Document`]
pub trait Node {
    /// Attribute value, if the attribute is present
    fn attr(&self, name: &str) -> Option<&str>;

    /// Concatenated text of all descendants matching `spec`.
    ///
    /// The node itself is never matched. Returns `None` when no descendant
    /// matches.
    fn text_of(&self, spec: &SelectorSpec) -> Result<Option<String>>;
}

/// A parsed, immutable page
pub trait Document {
    type Element<'a>: Node
    where
        Self: 'a;

    /// All elements matching `spec`, lazily, in document order
    fn find_all<'a>(
        &'a self,
        spec: &SelectorSpec,
    ) -> Result<Box<dyn Iterator<Item = Self::Element<'a>> + 'a>>;
}

/// `scraper`-backed [`Document`]
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full HTML document. The tokenizer recovers from malformed
    /// markup, so this never fails.
    pub fn parse(body: &str) -> Self {
        let html = Html::parse_document(body);
        if !html.errors.is_empty() {
            tracing::debug!("HTML parser recovered from {} markup errors", html.errors.len());
        }
        Self { html }
    }
}

fn compile(spec: &SelectorSpec) -> Result<Selector> {
    let css = spec.to_css();
    Selector::parse(&css)
        .map_err(|e| ResolveError::Parse(format!("invalid selector '{}': {}", css, e)))
}

impl Document for HtmlDocument {
    type Element<'a> = HtmlNode<'a>;

    fn find_all<'a>(
        &'a self,
        spec: &SelectorSpec,
    ) -> Result<Box<dyn Iterator<Item = HtmlNode<'a>> + 'a>> {
        let selector = compile(spec)?;

        // Walk the tree rather than the node arena so results follow document order
        let matches = self
            .html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(move |element| selector.matches(element))
            .map(HtmlNode);

        Ok(Box::new(matches))
    }
}

/// Element of an [`HtmlDocument`]
#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a>(ElementRef<'a>);

impl Node for HtmlNode<'_> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.0.value().attr(name)
    }

    fn text_of(&self, spec: &SelectorSpec) -> Result<Option<String>> {
        let selector = compile(spec)?;

        let mut text: Option<String> = None;
        for element in self
            .0
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|element| selector.matches(element))
        {
            text.get_or_insert_with(String::new).extend(element.text());
        }

        Ok(text)
    }
}
