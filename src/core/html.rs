// src/core/html.rs
//! `Page` over a captured HTML snapshot, backed by `scraper`.
//!
//! A snapshot has no layout engine and no media stack, so the capture script
//! serializes the few live properties extraction needs into attributes:
//!
//! | live property              | snapshot attribute                        |
//! |----------------------------|-------------------------------------------|
//! | `getBoundingClientRect()`  | `data-width` / `data-height`              |
//! | `HTMLMediaElement.duration`| `data-duration` (seconds)                 |
//! | `HTMLMediaElement.currentSrc` | `data-current-src`                     |
//!
//! Without size attributes an element counts as rendered unless it (or an
//! ancestor) is hidden via `hidden`, `display:none` or `visibility:hidden`, or
//! has an explicit zero `width`/`height` (attribute or inline style).
//!
//! Clicks cannot re-render a static snapshot; they are counted so callers can
//! see which controls were exercised.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};

use crate::core::dom::{Node, Page, Rect};
use crate::core::sanitize::leading_number;
use crate::error::{Result, ScrapeError};

/// Extent used for a rendered element whose size was not captured.
const AUTO_EXTENT: f64 = 1.0;

pub struct HtmlPage {
    doc: Html,
    selectors: RefCell<HashMap<String, Option<Selector>>>,
    clicks: Cell<usize>,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
            selectors: RefCell::new(HashMap::new()),
            clicks: Cell::new(0),
        }
    }

    pub fn click_count(&self) -> usize {
        self.clicks.get()
    }

    /// Compiled selector, cached per page. `None` if it doesn't parse.
    fn selector(&self, css: &str) -> Option<Selector> {
        if let Some(hit) = self.selectors.borrow().get(css) {
            return hit.clone();
        }
        let compiled = Selector::parse(css).ok();
        if compiled.is_none() {
            logw!("Ignoring invalid selector `{}`", css);
        }
        self.selectors
            .borrow_mut()
            .insert(css.to_string(), compiled.clone());
        compiled
    }

    fn wrap<'a>(&'a self, el: ElementRef<'a>) -> HtmlNode<'a> {
        HtmlNode { page: self, el }
    }
}

impl Page for HtmlPage {
    type Node<'a>
        = HtmlNode<'a>
    where
        Self: 'a;

    fn query_all(&self, selector: &str) -> Result<Vec<HtmlNode<'_>>> {
        let sel = self
            .selector(selector)
            .ok_or_else(|| ScrapeError::InvalidSelector(selector.to_string()))?;
        Ok(self.doc.select(&sel).map(|el| self.wrap(el)).collect())
    }

    fn click(&self, _node: &HtmlNode<'_>) -> Result<()> {
        self.clicks.set(self.clicks.get() + 1);
        Ok(())
    }
}

#[derive(Clone, Copy)]
pub struct HtmlNode<'a> {
    page: &'a HtmlPage,
    el: ElementRef<'a>,
}

impl<'a> HtmlNode<'a> {
    fn is_hidden(&self) -> bool {
        if element_hidden(self.el) {
            return true;
        }
        self.el
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(element_hidden)
    }

    fn extent(&self, axis: &str) -> f64 {
        let v = self.el.value();
        if let Some(n) = v.attr(&join!("data-", axis)).and_then(leading_number) {
            return n;
        }
        if let Some(n) = v.attr("style").and_then(|st| style_prop(st, axis)).and_then(leading_number) {
            return n;
        }
        if let Some(n) = v.attr(axis).and_then(leading_number) {
            return n;
        }
        AUTO_EXTENT
    }
}

impl<'a> Node for HtmlNode<'a> {
    fn select(&self, selector: &str) -> Vec<Self> {
        let Some(sel) = self.page.selector(selector) else {
            return Vec::new();
        };
        self.el.select(&sel).map(|el| self.page.wrap(el)).collect()
    }

    fn text(&self) -> String {
        self.el.text().collect()
    }

    fn own_text(&self) -> String {
        self.el
            .children()
            .filter_map(|child| child.value().as_text().map(|t| &**t))
            .collect()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.el.value().attr(name).map(str::to_owned)
    }

    fn rect(&self) -> Rect {
        if self.is_hidden() {
            return Rect::ZERO;
        }
        Rect::new(self.extent("width"), self.extent("height"))
    }

    fn media_duration(&self) -> Option<f64> {
        self.el
            .value()
            .attr("data-duration")
            .and_then(|d| d.trim().parse::<f64>().ok())
            .filter(|d| d.is_finite())
    }

    fn media_current_src(&self) -> Option<String> {
        self.el
            .value()
            .attr("data-current-src")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    }
}

fn element_hidden(el: ElementRef<'_>) -> bool {
    let v = el.value();
    if v.attr("hidden").is_some() {
        return true;
    }
    let Some(style) = v.attr("style") else {
        return false;
    };
    style_prop(style, "display").is_some_and(|d| d.eq_ignore_ascii_case("none"))
        || style_prop(style, "visibility").is_some_and(|d| d.eq_ignore_ascii_case("hidden"))
}

/// Value of one inline-style declaration, e.g. `style_prop("width: 0px", "width")`.
fn style_prop<'s>(style: &'s str, prop: &str) -> Option<&'s str> {
    style.split(';').find_map(|decl| {
        let (k, v) = decl.split_once(':')?;
        if k.trim().eq_ignore_ascii_case(prop) {
            Some(v.trim().trim_end_matches("!important").trim())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_prop_reads_declarations() {
        let st = "color: red; WIDTH: 0px ;display:none !important";
        assert_eq!(style_prop(st, "width"), Some("0px"));
        assert_eq!(style_prop(st, "display"), Some("none"));
        assert_eq!(style_prop(st, "height"), None);
    }

    #[test]
    fn hidden_ancestor_zeroes_rect() {
        let page = HtmlPage::parse(
            r#"<div style="display:none"><p class="x">a</p></div><p class="y">b</p>"#,
        );
        let x = page.query_all("p.x").unwrap();
        let y = page.query_all("p.y").unwrap();
        assert!(!x[0].rect().is_visible());
        assert!(y[0].rect().is_visible());
    }

    #[test]
    fn explicit_sizes_win() {
        let page = HtmlPage::parse(
            r#"<img class="a" width="0" src="x.png"><img class="b" data-width="120" data-height="80" width="0">"#,
        );
        assert_eq!(page.query_all("img.a").unwrap()[0].rect().width, 0.0);
        assert_eq!(page.query_all("img.b").unwrap()[0].rect(), Rect::new(120.0, 80.0));
    }

    #[test]
    fn own_text_skips_children() {
        let page = HtmlPage::parse(r#"<div id="d">outer <span>inner</span> tail</div>"#);
        let d = &page.query_all("#d").unwrap()[0];
        assert_eq!(d.own_text(), "outer  tail");
        assert_eq!(d.text(), "outer inner tail");
    }

    #[test]
    fn invalid_top_level_selector_errors() {
        let page = HtmlPage::parse("<div></div>");
        assert!(matches!(page.query_all("div[["), Err(ScrapeError::InvalidSelector(_))));
    }
}
