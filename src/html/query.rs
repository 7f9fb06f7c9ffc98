//! Structural HTML queries
//!
//! Selector-free query primitives over a parsed document: find the first or
//! all descendant elements matching a tag name and a set of attribute
//! constraints. Constraints are exact strings or regular-expression patterns
//! (search semantics); `class` constraints match against the element's class
//! list rather than the raw attribute value.

use crate::AuditError;
use regex::Regex;
use scraper::ElementRef;
use std::fmt;

/// One attribute constraint for a structural query
#[derive(Debug, Clone)]
pub enum AttrMatch {
    /// The attribute value must equal this string exactly
    Exact(String),

    /// The attribute value must contain a match for this pattern
    Pattern(Regex),
}

impl AttrMatch {
    /// Creates an exact-match constraint
    pub fn exact(value: impl Into<String>) -> Self {
        AttrMatch::Exact(value.into())
    }

    /// Creates a pattern constraint from a regex source string
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(AttrMatch::Pattern(Regex::new(pattern)?))
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            AttrMatch::Exact(want) => value == want,
            AttrMatch::Pattern(re) => re.is_match(value),
        }
    }
}

impl fmt::Display for AttrMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrMatch::Exact(s) => write!(f, "{s}"),
            AttrMatch::Pattern(re) => write!(f, "{}", re.as_str()),
        }
    }
}

/// Returns the first descendant of `scope` matching the tag and constraints
///
/// Elements are visited in document order; `scope` itself is not a candidate.
pub fn find<'a>(
    scope: ElementRef<'a>,
    tag: &str,
    attrs: &[(&str, AttrMatch)],
) -> Option<ElementRef<'a>> {
    descendant_elements(scope).find(|el| element_matches(el, tag, attrs))
}

/// Returns all descendants of `scope` matching the tag and constraints
pub fn find_all<'a>(
    scope: ElementRef<'a>,
    tag: &str,
    attrs: &[(&str, AttrMatch)],
) -> Vec<ElementRef<'a>> {
    descendant_elements(scope)
        .filter(|el| element_matches(el, tag, attrs))
        .collect()
}

/// Like [`find`], but failing explicitly when no match exists
///
/// A miss means required page structure is absent, typically an unsupported
/// layout or a cached error page, and is reported as
/// [`AuditError::ElementNotFound`].
pub fn locate<'a>(
    scope: ElementRef<'a>,
    tag: &str,
    attrs: &[(&str, AttrMatch)],
) -> crate::Result<ElementRef<'a>> {
    find(scope, tag, attrs).ok_or_else(|| {
        let err = AuditError::ElementNotFound {
            tag: tag.to_string(),
            attrs: format_attrs(attrs),
        };
        tracing::error!("{err}");
        err
    })
}

/// Concatenated descendant text of an element, whitespace-trimmed
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn descendant_elements<'a>(scope: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    // descendants() yields the scope node first; skip it.
    scope.descendants().skip(1).filter_map(ElementRef::wrap)
}

fn element_matches(el: &ElementRef<'_>, tag: &str, attrs: &[(&str, AttrMatch)]) -> bool {
    if el.value().name() != tag {
        return false;
    }

    attrs.iter().all(|(name, want)| match *name {
        "class" => el.value().classes().any(|class| want.matches(class)),
        _ => el.value().attr(name).is_some_and(|value| want.matches(value)),
    })
}

fn format_attrs(attrs: &[(&str, AttrMatch)]) -> String {
    attrs
        .iter()
        .map(|(name, want)| format!("[{name}={want}]"))
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn doc(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_find_first_in_document_order() {
        let html = doc("<html><body><p id='a'>one</p><p id='b'>two</p></body></html>");
        let el = find(html.root_element(), "p", &[]).unwrap();
        assert_eq!(el.value().attr("id"), Some("a"));
    }

    #[test]
    fn test_find_by_exact_attr() {
        let html = doc("<html><body><a href='/x'>x</a><a href='/y'>y</a></body></html>");
        let el = find(
            html.root_element(),
            "a",
            &[("href", AttrMatch::exact("/y"))],
        )
        .unwrap();
        assert_eq!(text_of(el), "y");
    }

    #[test]
    fn test_find_by_pattern_attr() {
        let html = doc(
            "<html><body>\
             <a href='/archive.tar.gz'>tar</a>\
             <a href='/docs-pdf-a4.zip'>pdf</a>\
             </body></html>",
        );
        let want = AttrMatch::pattern(r".+pdf-a4\.zip$").unwrap();
        let el = find(html.root_element(), "a", &[("href", want)]).unwrap();
        assert_eq!(text_of(el), "pdf");
    }

    #[test]
    fn test_class_constraint_matches_class_list() {
        let html = doc("<html><body><div class='wrapper toctree-wrapper'>hi</div></body></html>");
        let el = find(
            html.root_element(),
            "div",
            &[("class", AttrMatch::exact("toctree-wrapper"))],
        );
        assert!(el.is_some());
    }

    #[test]
    fn test_class_constraint_is_not_substring_match() {
        let html = doc("<html><body><div class='toctree-wrapper-outer'>hi</div></body></html>");
        let el = find(
            html.root_element(),
            "div",
            &[("class", AttrMatch::exact("toctree-wrapper"))],
        );
        assert!(el.is_none());
    }

    #[test]
    fn test_all_constraints_must_hold() {
        let html = doc("<html><body><a href='/x' rel='next'>x</a></body></html>");
        let found = find(
            html.root_element(),
            "a",
            &[
                ("href", AttrMatch::exact("/x")),
                ("rel", AttrMatch::exact("prev")),
            ],
        );
        assert!(found.is_none());
    }

    #[test]
    fn test_find_all_document_order() {
        let html = doc("<html><body><ul><li>1</li><li>2</li></ul><li>3</li></body></html>");
        let items = find_all(html.root_element(), "li", &[]);
        let texts: Vec<String> = items.into_iter().map(text_of).collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_find_scoped_to_subtree() {
        let html = doc("<html><body><div id='a'><span>in</span></div><span>out</span></body></html>");
        let scope = find(html.root_element(), "div", &[]).unwrap();
        let spans = find_all(scope, "span", &[]);
        assert_eq!(spans.len(), 1);
        assert_eq!(text_of(spans[0]), "in");
    }

    #[test]
    fn test_locate_miss_is_element_not_found() {
        let html = doc("<html><body></body></html>");
        let result = locate(
            html.root_element(),
            "table",
            &[("class", AttrMatch::exact("docutils"))],
        );
        match result {
            Err(AuditError::ElementNotFound { tag, attrs }) => {
                assert_eq!(tag, "table");
                assert_eq!(attrs, "[class=docutils]");
            }
            other => panic!("expected ElementNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_text_of_trims_and_concatenates() {
        let html = doc("<html><body><p>  Hello <b>world</b>  </p></body></html>");
        let el = find(html.root_element(), "p", &[]).unwrap();
        assert_eq!(text_of(el), "Hello world");
    }
}
