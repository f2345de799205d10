//! Language block extraction
//!
//! This module turns the archive page into language blocks: the block's
//! `id` attribute (its language name) and its child nodes reduced to the
//! three shapes the segmenter cares about.

use crate::config::BlockRule;
use crate::ChefError;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// One child node of a language block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockNode {
    /// Text or comment node
    Text(String),

    /// `<br>`
    LineBreak,

    /// Any other element
    Element {
        /// Trimmed text content of the element and its descendants
        text: String,
        /// `href` of the first descendant `<a>`; empty if the anchor has none
        href: Option<String>,
    },
}

impl BlockNode {
    /// An element without a link
    pub fn heading(text: &str) -> Self {
        BlockNode::Element {
            text: text.to_string(),
            href: None,
        }
    }

    /// An element wrapping a link
    pub fn link(text: &str, href: &str) -> Self {
        BlockNode::Element {
            text: text.to_string(),
            href: Some(href.to_string()),
        }
    }
}

/// A language section of the archive page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageBlock {
    /// Position of the block among the selected slots
    pub slot: usize,

    /// The block's `id` attribute, naming its language
    pub id: Option<String>,

    pub nodes: Vec<BlockNode>,
}

/// Extracts the language blocks selected by `rule`
///
/// The outer error means the page does not have the expected structure at
/// all. Each inner error concerns one slot and leaves the others usable.
pub fn extract_blocks(
    html: &str,
    rule: &BlockRule,
) -> Result<Vec<Result<LanguageBlock, ChefError>>, ChefError> {
    let document = Html::parse_document(html);
    let anchor = parse_selector("a")?;

    match rule {
        BlockRule::Positional {
            container,
            section,
            start,
            stride,
            count,
        } => {
            let container_selector = parse_selector(container)?;
            let container_el = document.select(&container_selector).next().ok_or_else(|| {
                ChefError::PageStructure(format!("No element matches '{}'", container))
            })?;

            let section_node = container_el.children().nth(*section).ok_or_else(|| {
                ChefError::PageStructure(format!(
                    "Container '{}' has no child node {}",
                    container, section
                ))
            })?;
            let section_el = ElementRef::wrap(section_node).ok_or_else(|| {
                ChefError::PageStructure(format!(
                    "Child node {} of '{}' is not an element",
                    section, container
                ))
            })?;

            let slots: Vec<_> = section_el.children().collect();
            let blocks = (0..*count)
                .map(|k| -> Result<LanguageBlock, ChefError> {
                    let index = k
                        .checked_mul(*stride)
                        .and_then(|offset| offset.checked_add(*start))
                        .ok_or_else(|| {
                            ChefError::PageStructure(format!(
                                "Language slot {} is out of range (start {}, stride {})",
                                k, start, stride
                            ))
                        })?;
                    let node = slots.get(index).ok_or_else(|| {
                        ChefError::PageStructure(format!(
                            "Language slot {} (node {}) is past the end of the section ({} nodes)",
                            k,
                            index,
                            slots.len()
                        ))
                    })?;
                    let element = ElementRef::wrap(*node).ok_or_else(|| {
                        ChefError::PageStructure(format!(
                            "Language slot {} (node {}) is not an element",
                            k, index
                        ))
                    })?;
                    Ok(language_block(k, element, &anchor))
                })
                .collect();

            Ok(blocks)
        }

        BlockRule::Selector { selector } => {
            let block_selector = parse_selector(selector)?;
            Ok(document
                .select(&block_selector)
                .enumerate()
                .map(|(k, element)| Ok(language_block(k, element, &anchor)))
                .collect())
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ChefError> {
    Selector::parse(selector)
        .map_err(|e| ChefError::PageStructure(format!("Invalid selector '{}': {:?}", selector, e)))
}

fn language_block(slot: usize, element: ElementRef, anchor: &Selector) -> LanguageBlock {
    LanguageBlock {
        slot,
        id: element.value().attr("id").map(str::to_string),
        nodes: block_nodes(element, anchor),
    }
}

/// Converts the children of a block element into [`BlockNode`]s
fn block_nodes(element: ElementRef, anchor: &Selector) -> Vec<BlockNode> {
    element
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(BlockNode::Text(String::from(&**text))),
            Node::Comment(comment) => Some(BlockNode::Text(String::from(&**comment))),
            Node::Element(el) if el.name() == "br" => Some(BlockNode::LineBreak),
            Node::Element(_) => ElementRef::wrap(child).map(|el| BlockNode::Element {
                text: el.text().collect::<String>().trim().to_string(),
                href: el
                    .select(anchor)
                    .next()
                    .map(|a| a.value().attr("href").unwrap_or("").to_string()),
            }),
            _ => None,
        })
        .collect()
}
