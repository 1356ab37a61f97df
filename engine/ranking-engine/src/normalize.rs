//! Field normalization.
//!
//! Turns the string-level records the scraper produces into typed
//! [`EntrantRecord`] values. Every coercion is parse-or-sentinel; nothing in
//! here touches I/O or returns an error.

use entrant_scraper::RawEntrant;

use crate::types::{
    EntrantRecord, GradeClass, RecruitingTier, DEFAULT_POINTS, DEFAULT_RANK, DEFAULT_WTN,
};

/// Parse standings points, stripping thousands separators. Unparseable → 0.
pub fn parse_points(text: &str) -> u64 {
    text.trim().replace(',', "").parse().unwrap_or(DEFAULT_POINTS)
}

/// Parse a national rank, stripping thousands separators. Unparseable → 20000.
pub fn parse_national_rank(text: &str) -> u64 {
    text.trim().replace(',', "").parse().unwrap_or(DEFAULT_RANK)
}

/// Parse a World Tennis Number. Unparseable → 40.0, the weakest rating.
pub fn parse_wtn(text: &str) -> f64 {
    text.trim().parse().unwrap_or(DEFAULT_WTN)
}

/// Map a recruiting badge image source to its textual tier.
pub fn tier_from_badge(badge: &str) -> RecruitingTier {
    for stars in 0..=5u8 {
        if badge.contains(&format!("{stars}star")) {
            return RecruitingTier::Star(stars);
        }
    }
    if badge.contains("6star") {
        return RecruitingTier::BlueChip;
    }
    RecruitingTier::Unknown
}

/// Coerce one raw record into its typed form.
pub fn normalize(raw: &RawEntrant) -> EntrantRecord {
    EntrantRecord {
        name: raw.name.clone(),
        profile: raw.profile.clone(),
        location: raw.location.clone(),
        district: raw.district.clone(),
        rating_wtn: parse_wtn(&raw.wtn),
        points: parse_points(&raw.points),
        national_rank: parse_national_rank(&raw.national_rank),
        recruiting_tier: tier_from_badge(&raw.recruiting_badge),
        grade: GradeClass::from_raw(&raw.grade),
        utr: raw.utr.clone(),
    }
}

/// Coerce a whole fetch run, preserving order.
pub fn normalize_all(raws: &[RawEntrant]) -> Vec<EntrantRecord> {
    raws.iter().map(normalize).collect()
}
