//! End-to-end pipeline tests against a scripted in-memory site.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use entrant_scraper::selectors::{
    AGE_GROUP_HEADING_SELECTOR, CROSS_REF_BADGE_SELECTOR, CROSS_REF_CELL_SELECTOR,
    CROSS_REF_GRADE_SELECTOR, CROSS_REF_NAME_FIELD, CROSS_REF_SEARCH_URL, ENTRANT_CELL_SELECTOR,
    EVENT_FACT_SELECTOR, EVENT_LINK_SELECTOR, LEVEL_HEADING_SELECTOR, PROFILE_DETAILS_SELECTOR,
    PROFILE_NAME_SELECTOR, PROFILE_WTN_SELECTOR, RANKINGS_CELL_SELECTOR,
    TOURNAMENT_TITLE_SELECTOR,
};
use entrant_scraper::{
    ElementHandle, EntrantSet, PageSession, ScrapeError, SessionFactory,
};
use report_builder::HtmlReportRenderer;
use tournament_service::{PipelineOutcome, ServiceConfig, TournamentPipeline};

type Result<T> = std::result::Result<T, ScrapeError>;

const OVERVIEW: &str = "https://playtennis.usta.com/t/1/overview";
const EVENTS: &str = "https://playtennis.usta.com/t/1/events";
const PLAYERS: &str = "https://playtennis.usta.com/t/1/players";

#[derive(Default, Clone)]
struct Page {
    texts: HashMap<String, Vec<String>>,
    attrs: HashMap<(String, String), String>,
    elements: HashMap<String, Vec<ElementHandle>>,
}

impl Page {
    fn with_texts(mut self, selector: &str, values: &[&str]) -> Self {
        self.texts.insert(selector.to_string(), values.iter().map(|v| v.to_string()).collect());
        self
    }

    fn with_attr(mut self, selector: &str, attr: &str, value: &str) -> Self {
        self.attrs.insert((selector.to_string(), attr.to_string()), value.to_string());
        self
    }

    fn with_elements(mut self, selector: &str, values: Vec<ElementHandle>) -> Self {
        self.elements.insert(selector.to_string(), values);
        self
    }
}

#[derive(Default, Clone)]
struct Site {
    pages: HashMap<String, Page>,
}

struct Session {
    site: Arc<Site>,
    current: Option<String>,
}

impl Session {
    fn page(&self) -> Result<&Page> {
        let url = self.current.as_ref().ok_or(ScrapeError::NoPage)?;
        self.site.pages.get(url).ok_or_else(|| ScrapeError::NotFound(url.clone()))
    }
}

#[async_trait]
impl PageSession for Session {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        if !self.site.pages.contains_key(url) {
            return Err(ScrapeError::NotFound(url.to_string()));
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn search(&mut self, url: &str, field: &str, value: &str) -> Result<()> {
        self.navigate(&format!("{url}?{field}={value}")).await
    }

    async fn inner_text(&mut self, selector: &str) -> Result<String> {
        self.inner_texts(selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ScrapeError::NotFound(selector.to_string()))
    }

    async fn inner_texts(&mut self, selector: &str) -> Result<Vec<String>> {
        Ok(self.page()?.texts.get(selector).cloned().unwrap_or_default())
    }

    async fn attribute(&mut self, selector: &str, attr: &str) -> Result<String> {
        self.page()?
            .attrs
            .get(&(selector.to_string(), attr.to_string()))
            .cloned()
            .ok_or_else(|| ScrapeError::NotFound(selector.to_string()))
    }

    async fn elements(&mut self, selector: &str) -> Result<Vec<ElementHandle>> {
        Ok(self.page()?.elements.get(selector).cloned().unwrap_or_default())
    }
}

#[derive(Clone)]
struct Factory {
    site: Arc<Site>,
}

#[async_trait]
impl SessionFactory for Factory {
    type Session = Session;

    async fn open(&self) -> Result<Session> {
        Ok(Session { site: Arc::clone(&self.site), current: None })
    }
}

fn linked(text: &str, href: &str) -> ElementHandle {
    ElementHandle { text: text.to_string(), link: Some(href.to_string()) }
}

fn plain(text: &str) -> ElementHandle {
    ElementHandle { text: text.to_string(), link: None }
}

struct Entrant {
    profile: &'static str,
    name: &'static str,
    wtn: &'static str,
    points: &'static str,
    rank: &'static str,
    badge: &'static str,
    grade: &'static str,
    utr: &'static str,
}

fn add_entrant(site: &mut Site, entrant: &Entrant) {
    let about = format!("{}&tab=about", entrant.profile);
    let rankings = format!("{}&tab=rankings", entrant.profile);
    let search = format!("{CROSS_REF_SEARCH_URL}?{CROSS_REF_NAME_FIELD}={}", entrant.name);

    site.pages.insert(
        about,
        Page::default()
            .with_texts(PROFILE_NAME_SELECTOR, &[entrant.name])
            .with_texts(
                PROFILE_DETAILS_SELECTOR,
                &[
                    "header",
                    &format!(
                        "{} | Austin, TX Section: Texas | District: Capital",
                        entrant.name
                    ),
                ],
            )
            .with_texts(PROFILE_WTN_SELECTOR, &[entrant.wtn]),
    );
    site.pages.insert(
        rankings,
        Page::default().with_texts(
            RANKINGS_CELL_SELECTOR,
            &["14 National Standings List", entrant.points, entrant.rank, "x", "x"],
        ),
    );
    site.pages.insert(
        search,
        Page::default()
            .with_attr(CROSS_REF_BADGE_SELECTOR, "src", entrant.badge)
            .with_texts(CROSS_REF_CELL_SELECTOR, &["Record", entrant.utr])
            .with_texts(CROSS_REF_GRADE_SELECTOR, &[entrant.grade]),
    );
}

fn scripted_site() -> Site {
    let mut site = Site::default();

    site.pages.insert(
        OVERVIEW.to_string(),
        Page::default()
            .with_texts(
                AGE_GROUP_HEADING_SELECTOR,
                &["Events", "Boys 12", "Boys 14", "Girls 18"],
            )
            .with_texts(LEVEL_HEADING_SELECTOR, &["Level 6"])
            .with_texts(TOURNAMENT_TITLE_SELECTOR, &["Spring Open"]),
    );

    site.pages.insert(
        EVENTS.to_string(),
        Page::default()
            .with_texts(
                AGE_GROUP_HEADING_SELECTOR,
                &["Events", "Boys 12", "Boys 14", "Girls 18"],
            )
            .with_elements(
                EVENT_LINK_SELECTOR,
                vec![
                    linked("Boys 12", "/t/1/events/boys-12"),
                    linked("Boys 14", "/t/1/events/boys-14"),
                    linked("Girls 18", "/t/1/events/girls-18"),
                ],
            ),
    );

    site.pages.insert(
        "https://playtennis.usta.com/t/1/events/boys-12".to_string(),
        Page::default().with_texts(
            EVENT_FACT_SELECTOR,
            &["Singles", "TBD", "x", "x", "x", "N/A"],
        ),
    );
    site.pages.insert(
        "https://playtennis.usta.com/t/1/events/boys-14".to_string(),
        Page::default().with_texts(
            EVENT_FACT_SELECTOR,
            &["Singles", "32", "x", "x", "x", "National Ranking"],
        ),
    );
    site.pages.insert(
        "https://playtennis.usta.com/t/1/events/girls-18".to_string(),
        Page::default().with_texts(
            EVENT_FACT_SELECTOR,
            &["Singles", "16", "x", "x", "x", "WTN Singles"],
        ),
    );

    // Players table: link cell, then age cell, repeated. Only Boys 14 rows.
    site.pages.insert(
        PLAYERS.to_string(),
        Page::default().with_elements(
            ENTRANT_CELL_SELECTOR,
            vec![
                linked("Alex Morgan", "/profile/1?id=1"),
                plain("Boys 14 Singles"),
                linked("Sam Reed", "/profile/2?id=2"),
                plain("Boys 14 Singles"),
                linked("Jordan Lee", "/profile/3?id=3"),
                plain("Boys 14 Singles"),
            ],
        ),
    );

    for entrant in [
        Entrant {
            profile: "https://playtennis.usta.com/profile/1?id=1",
            name: "Alex Morgan",
            wtn: "25.00",
            points: "500",
            rank: "87",
            badge: "/img/4star.gif",
            grade: "Class of 2026 - Senior",
            utr: "12.xx",
        },
        Entrant {
            profile: "https://playtennis.usta.com/profile/2?id=2",
            name: "Sam Reed",
            wtn: "22.00",
            points: "900",
            rank: "12",
            badge: "/img/6star.gif",
            grade: "Junior",
            utr: "12.xx",
        },
        Entrant {
            profile: "https://playtennis.usta.com/profile/3?id=3",
            name: "Jordan Lee",
            wtn: "30.00",
            points: "100",
            rank: "150",
            badge: "/img/2star.gif",
            grade: "Sophomore",
            utr: "13.xx",
        },
    ] {
        add_entrant(&mut site, &entrant);
    }

    site
}

fn pipeline_with(
    site: Site,
    output_dir: &std::path::Path,
    raw_snapshot: Option<std::path::PathBuf>,
) -> TournamentPipeline<Factory, HtmlReportRenderer> {
    let mut config = ServiceConfig::default();
    config.report.output_dir = output_dir.to_path_buf();
    config.report.raw_snapshot = raw_snapshot;
    let renderer = HtmlReportRenderer::new(&config.report.output_dir);
    TournamentPipeline::new(config, Factory { site: Arc::new(site) }, renderer)
}

#[tokio::test]
async fn full_run_renders_a_sorted_seeded_report() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("raw.json");
    let pipeline = pipeline_with(scripted_site(), dir.path(), Some(snapshot.clone()));

    let outcome = pipeline.run_report(OVERVIEW, "Boys 14", None).await.unwrap();

    let PipelineOutcome::Report { path, entrant_count } = outcome else {
        panic!("expected a rendered report");
    };
    assert_eq!(entrant_count, 3);

    let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with("Spring Open_"), "unexpected artifact name: {file_name}");
    assert!(file_name.ends_with("_points.html"), "unexpected artifact name: {file_name}");

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("<h1>Spring Open</h1>"));

    // Level 6 by points descending: Sam (900), Alex (500), Jordan (100).
    let sam = html.find("Sam Reed").unwrap();
    let alex = html.find("Alex Morgan").unwrap();
    let jordan = html.find("Jordan Lee").unwrap();
    assert!(sam < alex && alex < jordan);

    // Window of 3 gives a single seed: the lowest rating (Sam, 22.00).
    assert!(html.contains("<td>1</td><td><a href=\"https://playtennis.usta.com/profile/2?id=2\">Sam Reed</a></td><td>Austin, TX</td><td>Capital</td><td>1</td>"));
    assert!(html.contains("Blue Chip"));
    assert!(html.contains("There are 2 UTRs rated 12.xx in this tournament (66.67%)."));
    assert!(html.contains("There is 1 UTR rated 13.xx in this tournament (33.33%)."));
    assert!(!html.contains("class=\"beyond-cutoff\""), "draw of 32 leaves nothing past the cutoff");

    // Raw snapshot captures the unnormalized records in fetch order.
    let raw: EntrantSet =
        serde_json::from_str(&std::fs::read_to_string(&snapshot).unwrap()).unwrap();
    assert_eq!(raw.entrants.len(), 3);
    assert_eq!(raw.entrants[0].name, "Alex Morgan");
    assert_eq!(raw.entrants[0].points, "500");
}

#[tokio::test]
async fn zero_matching_entrants_is_an_explicit_empty_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with(scripted_site(), dir.path(), None);

    let outcome = pipeline.run_report(OVERVIEW, "Girls 18", None).await.unwrap();

    assert_eq!(outcome, PipelineOutcome::NoEntrants);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0, "no artifact for empty runs");
}

#[tokio::test]
async fn ambiguous_sort_metadata_requires_an_operator_choice() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with(scripted_site(), dir.path(), None);

    let error = pipeline.run_report(OVERVIEW, "Boys 12", None).await.unwrap_err();
    assert!(error.to_string().to_lowercase().contains("sort"), "got: {error}");

    // With an explicit choice the run proceeds; Boys 12 has no entrants.
    let outcome = pipeline
        .run_report(OVERVIEW, "Boys 12", Some(ranking_engine::SortCriterion::ByPoints))
        .await
        .unwrap();
    assert_eq!(outcome, PipelineOutcome::NoEntrants);
}

#[tokio::test]
async fn unknown_age_groups_are_rejected_with_the_available_set() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with(scripted_site(), dir.path(), None);

    let error = pipeline.run_report(OVERVIEW, "Boys 16", None).await.unwrap_err();
    let message = error.to_string();
    assert!(message.contains("Boys 16"));
    assert!(message.contains("Boys 14"));
}

#[tokio::test]
async fn age_group_discovery_lists_level_and_groups() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with(scripted_site(), dir.path(), None);

    let listing = pipeline.age_groups(OVERVIEW).await.unwrap();

    assert_eq!(listing.level, "Level 6");
    assert!(listing.level_recognized);
    assert_eq!(listing.age_groups, vec!["Boys 12", "Boys 14", "Girls 18"]);
}
