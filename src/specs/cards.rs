// src/specs/cards.rs
//! Card collection: all visible cards on the page, in DOM order.
//!
//! Stateless by construction. Each call reads the current page and returns a
//! brand-new list, so a polling caller can replace its events wholesale.

use std::time::Duration;

use crate::config::selectors::SelectorTable;
use crate::core::dom::{Node, Page};
use crate::core::pause::Pause;
use crate::engine::types::Event;
use crate::error::Result;
use crate::progress::Progress;
use crate::specs::fields::FieldExtractor;
use crate::specs::platform::PlatformDetector;

pub struct EventCollector<'s, W: Pause> {
    sel: &'s SelectorTable,
    pause: W,
    expand_delay: Duration,
}

impl<'s, W: Pause> EventCollector<'s, W> {
    pub fn new(sel: &'s SelectorTable, pause: W, expand_delay: Duration) -> Self {
        Self { sel, pause, expand_delay }
    }

    /// Expand, extract and number every visible card.
    ///
    /// Invisible (virtualized / off-screen) cards are dropped *before*
    /// numbering, so `card_index` runs 1..=n over what the user can see.
    /// Only a page-level failure is an error.
    pub async fn collect<'p, P: Page>(
        &self,
        page: &'p P,
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<Vec<Event>> {
        let cards: Vec<_> = page
            .query_all(&self.sel.card)?
            .into_iter()
            .filter(|c| c.rect().is_visible())
            .collect();

        logd!("Collect: {} visible cards", cards.len());
        if let Some(p) = progress.as_deref_mut() {
            p.begin(cards.len());
        }

        let fields = FieldExtractor::new(self.sel);
        let platforms = PlatformDetector::new(&self.sel.platform_icon);
        let mut events = Vec::with_capacity(cards.len());

        for (pos, card) in cards.iter().enumerate() {
            self.expand(page, card).await;

            let mut event = fields.extract(card);
            event.platforms = platforms.detect_or_infer(card, &event.label);
            event.card_index = pos + 1;

            if let Some(p) = progress.as_deref_mut() {
                p.item_done(event.card_index);
            }
            events.push(event);
        }

        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        Ok(events)
    }

    /// Click "show more" if the card has one, then give it time to render.
    /// Best-effort: a failed click or a slow render only costs description text.
    async fn expand<'p, P: Page>(&self, page: &'p P, card: &P::Node<'p>) {
        let Some(control) = card.select_first(&self.sel.show_more) else {
            return;
        };
        if let Err(e) = page.click(&control) {
            logd!("Collect: show-more click failed: {}", e);
            return;
        }
        self.pause.pause(self.expand_delay).await;
    }
}
