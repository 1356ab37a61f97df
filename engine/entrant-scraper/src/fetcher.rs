//! Per-entrant field fetching.
//!
//! One [`EntrantFetcher::fetch`] call is one attempt: open a session, read
//! the primary registry (about + rankings tabs), then the cross-reference
//! registry keyed by the resolved name. Every field lookup runs under its
//! own short timeout and falls back to the field's documented default, so a
//! slow or missing element never takes the rest of the record down with it.

use std::time::Duration;

use tracing::{debug, warn};

use crate::selectors::{
    ABOUT_TAB_SUFFIX, CROSS_REF_BADGE_SELECTOR, CROSS_REF_CELL_SELECTOR,
    CROSS_REF_GRADE_SELECTOR, CROSS_REF_NAME_FIELD, CROSS_REF_SEARCH_URL, PROFILE_DETAILS_SELECTOR,
    PROFILE_NAME_SELECTOR, PROFILE_WTN_SELECTOR, RANKINGS_CELL_SELECTOR, RANKINGS_ROW_WIDTH,
    RANKINGS_TAB_SUFFIX,
};
use crate::session::{
    attribute_within, navigate_within, search_within, text_within, texts_within, Result,
    SessionFactory,
};
use crate::types::{
    RawEntrant, GRADE_LABELS, POINTS_DEFAULT, RANK_DEFAULT, RANK_FALLBACK, UNKNOWN, UNKNOWN_PLAYER,
    UTR_PLACEHOLDER, WTN_FALLBACK,
};

/// Time limits for one fetch attempt
#[derive(Debug, Clone, Copy)]
pub struct FetchTimeouts {
    /// Budget for loading a page
    pub navigation: Duration,
    /// Budget for resolving a single field
    pub field: Duration,
}

impl Default for FetchTimeouts {
    fn default() -> Self {
        Self { navigation: Duration::from_secs(15), field: Duration::from_secs(10) }
    }
}

/// Best-effort fetcher for a single entrant's record
pub struct EntrantFetcher<F: SessionFactory> {
    factory: F,
    age_group: String,
    timeouts: FetchTimeouts,
}

impl<F: SessionFactory> EntrantFetcher<F> {
    /// Create a fetcher scoped to one age group's standings
    pub fn new(factory: F, age_group: impl Into<String>) -> Self {
        Self { factory, age_group: age_group.into(), timeouts: FetchTimeouts::default() }
    }

    /// Override the default time limits
    pub fn with_timeouts(mut self, timeouts: FetchTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Run one fetch attempt for the given profile link.
    ///
    /// An error here means the attempt itself died (session open or initial
    /// navigation); the session is dropped either way. Once the profile page
    /// is up, every field failure is absorbed into that field's fallback and
    /// the call returns a fully-populated record.
    pub async fn fetch(&self, profile: &str) -> Result<RawEntrant> {
        let mut session = self.factory.open().await?;
        self.fetch_with_session(&mut session, profile).await
        // session drops here, releasing the remote resources for this attempt
    }

    async fn fetch_with_session(
        &self,
        session: &mut F::Session,
        profile: &str,
    ) -> Result<RawEntrant> {
        navigate_within(session, &format!("{profile}{ABOUT_TAB_SUFFIX}"), self.timeouts.navigation)
            .await?;

        let name = self.text_or(session, PROFILE_NAME_SELECTOR, UNKNOWN_PLAYER).await;
        let details = self.texts_or(session, PROFILE_DETAILS_SELECTOR).await;
        let (location, district) = location_and_district(&details);
        let wtn = self.text_or(session, PROFILE_WTN_SELECTOR, WTN_FALLBACK).await;

        let (points, national_rank) = self.fetch_standings(session, profile).await;
        let (recruiting_badge, utr, grade) = self.fetch_cross_reference(session, &name).await;

        Ok(RawEntrant {
            name,
            profile: profile.to_string(),
            location,
            district,
            wtn,
            points,
            national_rank,
            recruiting_badge,
            grade,
            utr,
        })
    }

    /// Points and national rank from the rankings tab, scoped to the fetcher's
    /// age group. Any failure along the way degrades to the defaults.
    async fn fetch_standings(&self, session: &mut F::Session, profile: &str) -> (String, String) {
        let url = format!("{profile}{RANKINGS_TAB_SUFFIX}");
        if let Err(e) = navigate_within(session, &url, self.timeouts.navigation).await {
            warn!(error = %e, "standings tab unavailable, using defaults");
            return (POINTS_DEFAULT.to_string(), RANK_FALLBACK.to_string());
        }
        let cells = self.texts_or(session, RANKINGS_CELL_SELECTOR).await;
        standings_for_age_group(&cells, &self.age_group)
    }

    /// Recruiting badge, UTR, and grade class from the cross-reference
    /// registry, searched by entrant name.
    async fn fetch_cross_reference(
        &self,
        session: &mut F::Session,
        name: &str,
    ) -> (String, String, String) {
        if let Err(e) = search_within(
            session,
            CROSS_REF_SEARCH_URL,
            CROSS_REF_NAME_FIELD,
            name,
            self.timeouts.navigation,
        )
        .await
        {
            warn!(error = %e, name, "cross-reference search failed, using defaults");
            return (UNKNOWN.to_string(), UTR_PLACEHOLDER.to_string(), UNKNOWN.to_string());
        }

        let badge = self.attr_or(session, CROSS_REF_BADGE_SELECTOR, "src", UNKNOWN).await;
        let cells = self.texts_or(session, CROSS_REF_CELL_SELECTOR).await;
        let utr = find_utr(&cells);
        let grade_text = self.text_or(session, CROSS_REF_GRADE_SELECTOR, UNKNOWN).await;
        let grade = grade_from_text(&grade_text);

        (badge, utr, grade)
    }

    async fn text_or(&self, session: &mut F::Session, selector: &str, fallback: &str) -> String {
        match text_within(session, selector, self.timeouts.field).await {
            Ok(text) => text,
            Err(e) => {
                debug!(selector, error = %e, "field lookup failed, using fallback");
                fallback.to_string()
            }
        }
    }

    async fn texts_or(&self, session: &mut F::Session, selector: &str) -> Vec<String> {
        match texts_within(session, selector, self.timeouts.field).await {
            Ok(texts) => texts,
            Err(e) => {
                debug!(selector, error = %e, "field lookup failed, using empty set");
                Vec::new()
            }
        }
    }

    async fn attr_or(
        &self,
        session: &mut F::Session,
        selector: &str,
        attr: &str,
        fallback: &str,
    ) -> String {
        match attribute_within(session, selector, attr, self.timeouts.field).await {
            Ok(value) => value,
            Err(e) => {
                debug!(selector, attr, error = %e, "attribute lookup failed, using fallback");
                fallback.to_string()
            }
        }
    }
}

/// Pull location and district out of the second detail block.
///
/// The block reads like "Name | City, ST | District: Eastern"; a shape
/// mismatch leaves the affected field at its fallback.
fn location_and_district(details: &[String]) -> (String, String) {
    let Some(detail) = details.get(1) else {
        return (UNKNOWN.to_string(), UNKNOWN.to_string());
    };

    let mut parts = detail.split('|');
    let location = parts
        .nth(1)
        .map(|part| part.split("Section:").next().unwrap_or(part).trim().to_string())
        .filter(|part| !part.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let district = detail
        .split('|')
        .nth(2)
        .and_then(|part| part.split(": ").nth(1))
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());

    (location, district)
}

/// Standings label for an age group: "Boys 14" matches rows mentioning
/// "14 National Standings List".
fn standings_label(age_group: &str) -> String {
    let token = age_group.split_whitespace().nth(1).unwrap_or(age_group);
    format!("{token} National Standings List")
}

/// Walk the standings grid five cells at a time and keep the last row whose
/// list name matches the age group.
fn standings_for_age_group(cells: &[String], age_group: &str) -> (String, String) {
    let mut points = POINTS_DEFAULT.to_string();
    let mut rank = RANK_DEFAULT.to_string();
    let label = standings_label(age_group);

    for row in cells.chunks(RANKINGS_ROW_WIDTH) {
        if row.len() < 3 {
            continue;
        }
        if row[0].contains(&label) {
            points = row[1].clone();
            rank = row[2].clone();
        }
    }

    (points, rank)
}

/// First cell text carrying the rounded ".xx" UTR form.
fn find_utr(cells: &[String]) -> String {
    cells
        .iter()
        .map(|cell| cell.trim())
        .find(|cell| cell.contains(".xx"))
        .map(str::to_string)
        .unwrap_or_else(|| UTR_PLACEHOLDER.to_string())
}

/// Reduce free-form bio text to a known grade label, tagging provisional
/// listings with a trailing "?".
fn grade_from_text(text: &str) -> String {
    for label in GRADE_LABELS {
        if text.contains(label) {
            if text.contains("Provisional") {
                return format!("{label}?");
            }
            return label.to_string();
        }
    }
    UNKNOWN.to_string()
}
