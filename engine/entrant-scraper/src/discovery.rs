//! Tournament discovery.
//!
//! The reads that happen before any entrant is fetched: the tournament's
//! level and age groups, its name, the per-event draw facts, and the ordered
//! entrant profile links for one age group.

use tracing::{info, warn};

use crate::fetcher::FetchTimeouts;
use crate::selectors::{
    resolve_url, AGE_GROUP_HEADING_SELECTOR, DRAW_SIZE_FACT_INDEX, ENTRANT_CELL_SELECTOR,
    EVENT_FACT_SELECTOR, EVENT_LINK_SELECTOR, LEVEL_HEADING_SELECTOR, RECOGNIZED_LEVELS,
    SORT_HINT_FACT_INDEX, TOURNAMENT_TITLE_SELECTOR,
};
use crate::session::{
    elements_within, navigate_within, text_within, texts_within, Result, ScrapeError,
    SessionFactory,
};

/// Age groups and level discovered on a tournament overview page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeGroupListing {
    /// Tournament level heading, e.g. "Level 6"
    pub level: String,
    /// Whether the level carries a known seeding policy
    pub level_recognized: bool,
    /// Selectable age-group labels
    pub age_groups: Vec<String>,
}

/// Raw draw facts for one age group's event, still unparsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawMetadata {
    pub draw_size: String,
    pub sort_hint: String,
}

/// Reads tournament-level pages ahead of the entrant pipeline
pub struct TournamentDiscovery<F: SessionFactory> {
    factory: F,
    timeouts: FetchTimeouts,
}

impl<F: SessionFactory> TournamentDiscovery<F> {
    pub fn new(factory: F) -> Self {
        Self { factory, timeouts: FetchTimeouts::default() }
    }

    pub fn with_timeouts(mut self, timeouts: FetchTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Level and age groups from the overview page.
    ///
    /// The first heading the age-group selector matches is the section
    /// title, not an age group, and is dropped.
    pub async fn age_groups(&self, overview_url: &str) -> Result<AgeGroupListing> {
        let mut session = self.factory.open().await?;
        navigate_within(&mut session, overview_url, self.timeouts.navigation).await?;

        let mut age_groups =
            texts_within(&mut session, AGE_GROUP_HEADING_SELECTOR, self.timeouts.field).await?;
        let level =
            text_within(&mut session, LEVEL_HEADING_SELECTOR, self.timeouts.field).await?;

        if !age_groups.is_empty() {
            age_groups.remove(0);
        }

        let level_recognized = RECOGNIZED_LEVELS.contains(&level.as_str());
        if !level_recognized {
            warn!(level, "tournament level has no dedicated seeding policy");
        }

        Ok(AgeGroupListing { level, level_recognized, age_groups })
    }

    /// Tournament title from the overview page.
    pub async fn tournament_name(&self, overview_url: &str) -> Result<String> {
        let mut session = self.factory.open().await?;
        navigate_within(&mut session, overview_url, self.timeouts.navigation).await?;
        text_within(&mut session, TOURNAMENT_TITLE_SELECTOR, self.timeouts.field).await
    }

    /// Draw facts for the selected age group, reached via the events page.
    ///
    /// Event links sit one position ahead of their age-group headings, the
    /// same off-by-one the entrant table has.
    pub async fn draw_metadata(
        &self,
        events_url: &str,
        age_group: &str,
    ) -> Result<DrawMetadata> {
        let mut session = self.factory.open().await?;
        navigate_within(&mut session, events_url, self.timeouts.navigation).await?;

        let headings =
            texts_within(&mut session, AGE_GROUP_HEADING_SELECTOR, self.timeouts.field).await?;
        let links =
            elements_within(&mut session, EVENT_LINK_SELECTOR, self.timeouts.field).await?;

        let position = headings
            .iter()
            .position(|heading| heading == age_group)
            .ok_or_else(|| ScrapeError::NotFound(format!("age group '{age_group}'")))?;
        let event_link = position
            .checked_sub(1)
            .and_then(|index| links.get(index))
            .and_then(|element| element.link.clone())
            .ok_or_else(|| {
                ScrapeError::NotFound(format!("event link for age group '{age_group}'"))
            })?;

        navigate_within(&mut session, &resolve_url(&event_link), self.timeouts.navigation).await?;
        let facts = texts_within(&mut session, EVENT_FACT_SELECTOR, self.timeouts.field).await?;

        Ok(DrawMetadata {
            draw_size: facts.get(DRAW_SIZE_FACT_INDEX).cloned().unwrap_or_default(),
            sort_hint: facts.get(SORT_HINT_FACT_INDEX).cloned().unwrap_or_default(),
        })
    }

    /// Ordered entrant profile links for one age group.
    ///
    /// The players table alternates link cells and age cells; an age cell
    /// that matches the selection points back at the preceding cell's link.
    /// Zero matches is a legitimate empty result, not an error.
    pub async fn entrant_links(
        &self,
        players_url: &str,
        age_group: &str,
    ) -> Result<Vec<String>> {
        let mut session = self.factory.open().await?;
        navigate_within(&mut session, players_url, self.timeouts.navigation).await?;

        let cells =
            elements_within(&mut session, ENTRANT_CELL_SELECTOR, self.timeouts.field).await?;

        let mut links = Vec::new();
        for (index, cell) in cells.iter().enumerate() {
            if !cell.text.contains(age_group) {
                continue;
            }
            let Some(previous) = index.checked_sub(1).and_then(|i| cells.get(i)) else {
                continue;
            };
            match &previous.link {
                Some(href) => links.push(resolve_url(href)),
                None => warn!(index, "age-group row without a profile link, skipping"),
            }
        }

        info!("Found {} entrants for age group '{}'", links.len(), age_group);
        Ok(links)
    }
}
