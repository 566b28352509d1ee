//! Landing page composition.
//!
//! Static marketing sections plus two independent fetches: the resume counter
//! and the job postings. The fetches run concurrently and fill disjoint parts
//! of the page; a failed fetch is logged and shown as "no data".

pub mod content;
pub mod handlers;
pub mod view;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::careers::{live_job_cards, JobCard, JobSource};
use crate::counter::CounterSource;
use content::{FeatureCard, Link};

#[derive(Debug, Clone, Serialize)]
pub struct LandingPage {
    pub hero: Hero,
    pub jobs: JobCarousel,
    pub features: Features,
    pub templates: TemplatePreview,
    pub cta: CallToAction,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hero {
    pub badge: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub links: Vec<Link>,
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stat {
    pub value: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCarousel {
    pub heading: &'static str,
    pub cards: Vec<JobCard>,
    /// Placeholder cards to draw; non-zero only when `cards` is empty.
    pub skeletons: usize,
    pub autoplay_ms: u64,
    pub stop_on_interaction: bool,
    pub view_all: Link,
}

impl JobCarousel {
    fn new(cards: Vec<JobCard>) -> Self {
        Self {
            heading: content::JOBS_HEADING,
            skeletons: if cards.is_empty() {
                content::SKELETON_CARDS
            } else {
                0
            },
            cards,
            autoplay_ms: content::CAROUSEL_AUTOPLAY_MS,
            stop_on_interaction: true,
            view_all: Link {
                label: "View all",
                href: content::CAREERS_PATH,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Features {
    pub heading: &'static str,
    pub intro: &'static str,
    pub cards: Vec<FeatureCard>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreview {
    pub heading: &'static str,
    pub intro: &'static str,
    pub default_tab: &'static str,
    pub tabs: Vec<TemplateTab>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateTab {
    pub name: &'static str,
    pub value: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallToAction {
    pub title: &'static str,
    pub text: &'static str,
    pub link: Link,
}

/// Fetches the counter and the job postings concurrently and builds the page.
pub async fn compose_landing(
    counter: &dyn CounterSource,
    jobs: &dyn JobSource,
    now: DateTime<Utc>,
) -> LandingPage {
    let (count, postings) = tokio::join!(counter.resumes_created(), jobs.fetch_jobs());

    let count = count.unwrap_or_else(|e| {
        warn!("Error fetching resumes count: {e}");
        0
    });
    let cards = match postings {
        Ok(postings) => live_job_cards(postings, now),
        Err(e) => {
            warn!("Error fetching jobs: {e}");
            Vec::new()
        }
    };

    LandingPage {
        hero: hero(count),
        jobs: JobCarousel::new(cards),
        features: Features {
            heading: content::FEATURES_HEADING,
            intro: content::FEATURES_INTRO,
            cards: content::feature_cards(),
        },
        templates: template_preview(),
        cta: CallToAction {
            title: content::CTA_TITLE,
            text: content::CTA_TEXT,
            link: Link {
                label: content::CTA_LABEL,
                href: content::CREATE_RESUME_PATH,
            },
        },
    }
}

fn hero(resumes_created: u64) -> Hero {
    Hero {
        badge: content::HERO_BADGE,
        title: content::HERO_TITLE,
        subtitle: content::HERO_SUBTITLE,
        links: content::hero_links(),
        stats: vec![
            Stat {
                value: format!("{}+", format_count(resumes_created)),
                label: "Resumes Created",
            },
            Stat {
                value: "100%".to_string(),
                label: "Free Forever",
            },
            Stat {
                value: "ATS".to_string(),
                label: "Optimized",
            },
            Stat {
                value: "Fast".to_string(),
                label: "and Secure",
            },
        ],
    }
}

fn template_preview() -> TemplatePreview {
    TemplatePreview {
        heading: content::TEMPLATES_HEADING,
        intro: content::TEMPLATES_INTRO,
        default_tab: content::DEFAULT_TEMPLATE,
        tabs: content::TEMPLATE_NAMES
            .iter()
            .map(|&name| TemplateTab {
                name,
                value: name.to_lowercase(),
                image: format!("/assets/{name}.png"),
            })
            .collect(),
    }
}

/// Groups digits in threes with commas: 1234567 → "1,234,567".
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{job, FakeCounter, FakeJobs};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[tokio::test]
    async fn test_compose_with_data() {
        let counter = FakeCounter(Ok(15230));
        let jobs = FakeJobs(Ok(vec![
            job("live", Some("2026-10-01"), "2026-10-25"),
            job("gone", Some("2026-09-01"), "2026-10-02"),
        ]));

        let page = compose_landing(&counter, &jobs, now()).await;

        assert_eq!(page.hero.stats[0].value, "15,230+");
        assert_eq!(page.hero.stats[0].label, "Resumes Created");
        assert_eq!(page.jobs.cards.len(), 1);
        assert_eq!(page.jobs.cards[0].id, "live");
        assert_eq!(page.jobs.skeletons, 0);
        assert_eq!(page.jobs.autoplay_ms, 3000);
        assert_eq!(page.features.cards.len(), 4);
    }

    #[tokio::test]
    async fn test_fetch_failures_degrade_to_empty_state() {
        let counter = FakeCounter(Err("permission denied".into()));
        let jobs = FakeJobs(Err("500 Internal Server Error".into()));

        let page = compose_landing(&counter, &jobs, now()).await;

        assert_eq!(page.hero.stats[0].value, "0+");
        assert!(page.jobs.cards.is_empty());
        assert_eq!(page.jobs.skeletons, 4);
    }

    #[tokio::test]
    async fn test_no_live_jobs_shows_skeletons() {
        let jobs = FakeJobs(Ok(vec![job("old", None, "2020-01-01")]));
        let page = compose_landing(&FakeCounter(Ok(3)), &jobs, now()).await;
        assert_eq!(page.jobs.skeletons, 4);
    }

    #[test]
    fn test_template_tabs() {
        let preview = template_preview();
        assert_eq!(preview.default_tab, "modern");
        assert_eq!(
            preview.tabs[1],
            TemplateTab {
                name: "Professional",
                value: "professional".to_string(),
                image: "/assets/Professional.png".to_string(),
            }
        );
    }
}
