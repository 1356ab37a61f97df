//! Fixed source shapes.
//!
//! Selector strings and origins for the two registries. These are constants
//! of the target sites, not configuration: the pipeline is not a general
//! scraping framework.

/// Primary registry origin, used to resolve relative profile links
pub const PRIMARY_ORIGIN: &str = "https://playtennis.usta.com";

/// Query suffix for the profile "about" tab
pub const ABOUT_TAB_SUFFIX: &str = "&tab=about";

/// Query suffix for the profile "rankings" tab
pub const RANKINGS_TAB_SUFFIX: &str = "&tab=rankings";

/// Entrant name heading on the profile page
pub const PROFILE_NAME_SELECTOR: &str = "span.readonly-text__text > h3";

/// Read-only detail blocks; the second one carries location and district
pub const PROFILE_DETAILS_SELECTOR: &str = ".readonly-text__content";

/// World Tennis Number figure on the profile page
pub const PROFILE_WTN_SELECTOR: &str = ".wtn-card__rating p";

/// Standings grid cells on the rankings tab
pub const RANKINGS_CELL_SELECTOR: &str = ".v-grid-cell__content";

/// The standings grid is five cells wide: list, points, rank, and two more
pub const RANKINGS_ROW_WIDTH: usize = 5;

/// Cross-reference registry search page
pub const CROSS_REF_SEARCH_URL: &str = "https://www.tennisrecruiting.net/player.asp";

/// Name field on the cross-reference search form
pub const CROSS_REF_NAME_FIELD: &str = "f_playername";

/// Recruiting badge image on the cross-reference profile
pub const CROSS_REF_BADGE_SELECTOR: &str = "#CenterColumn table img";

/// Profile cells searched for the rounded UTR text
pub const CROSS_REF_CELL_SELECTOR: &str = "#CenterColumn td";

/// Bio block carrying the grade class text
pub const CROSS_REF_GRADE_SELECTOR: &str = "#CenterColumn table td div";

/// Age-group headings on the overview and events pages
pub const AGE_GROUP_HEADING_SELECTOR: &str = "._H6_1iwqn_128";

/// Tournament level heading on the overview page
pub const LEVEL_HEADING_SELECTOR: &str = "._tournamentLevel_1iwqn_96 h6";

/// Per-event links on the events page, one per age group
pub const EVENT_LINK_SELECTOR: &str = "._link_19t7t_285";

/// Small-print facts on an event page (draw size, selection type, ...)
pub const EVENT_FACT_SELECTOR: &str = "._bodyXSmall_1iwqn_137";

/// Index of the draw size within the event facts
pub const DRAW_SIZE_FACT_INDEX: usize = 1;

/// Index of the selection-type text within the event facts
pub const SORT_HINT_FACT_INDEX: usize = 5;

/// Entrant table cells on the players page; link cell precedes age cell
pub const ENTRANT_CELL_SELECTOR: &str = "._alignLeft_1nqit_268";

/// Tournament title heading on the overview page
pub const TOURNAMENT_TITLE_SELECTOR: &str = "#tournaments h1";

/// Tournament levels whose seeding policy is known
pub const RECOGNIZED_LEVELS: [&str; 2] = ["Level 6", "Level 7"];

/// Resolve a possibly-relative registry link to an absolute URL.
pub fn resolve_url(href: &str) -> String {
    if href.starts_with('/') {
        format!("{PRIMARY_ORIGIN}{href}")
    } else if !href.starts_with("http") {
        format!("https://{}", href.trim_start_matches('/'))
    } else {
        href.to_string()
    }
}
