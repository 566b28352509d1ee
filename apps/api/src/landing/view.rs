//! Server-rendered HTML for the landing page.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::{CallToAction, Features, Hero, JobCarousel, LandingPage, TemplatePreview};
use crate::careers::JobCard;

const STYLE: &str = r#"
body{margin:0;font-family:system-ui,sans-serif;color:#111827}
section{display:flex;flex-direction:column;align-items:center;padding:4rem 1.5rem}
.container{width:100%;max-width:72rem}
.center{text-align:center}
.muted{color:#6b7280}
.badge{display:inline-block;border-radius:9999px;background:#f3f4f6;padding:.25rem .75rem;font-size:.8rem;margin:.25rem}
.hero{background:linear-gradient(#fff,#f4f4f5)}
.actions a,.cta a{display:inline-block;margin:.5rem;padding:.6rem 2rem;border-radius:.4rem;background:#4f46e5;color:#fff;text-decoration:none}
.stats{display:grid;grid-template-columns:repeat(4,1fr);gap:2rem;margin-top:2rem}
.stats strong{display:block;font-size:1.8rem;color:#4f46e5}
.jobs{background:linear-gradient(135deg,#dbeafe,#f3e8ff,#fce7f3)}
.track{display:flex;gap:1rem;overflow-x:auto;scroll-snap-type:x mandatory}
.card{flex:0 0 20rem;min-height:14rem;border:1px solid #e5e7eb;border-radius:.5rem;background:#fff;padding:1.5rem;scroll-snap-align:start;box-sizing:border-box}
.card a{color:inherit;text-decoration:none}
.card .company{display:flex;align-items:center;gap:.75rem}
.card .description{height:60px;overflow:hidden}
.skeleton .bar{background:#e5e7eb;border-radius:.25rem;height:1rem;margin:.5rem 0}
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(14rem,1fr));gap:1.5rem}
.tabs input{display:none}
.tabs label{display:inline-block;padding:.5rem 1rem;cursor:pointer}
.tabs .panel{display:none}
.cta{background:#4f46e5;color:#fff}
.cta a{background:#fff;color:#4f46e5}
"#;

const CAROUSEL_SCRIPT: &str = r#"
document.querySelectorAll('[data-carousel]').forEach(function (el) {
  var track = el.querySelector('.track');
  var delay = Number(el.dataset.autoplayMs);
  var timer = null, stopped = false;
  function step() {
    var max = track.scrollWidth - track.clientWidth;
    var left = track.scrollLeft >= max - 1 ? 0 : track.scrollLeft + track.clientWidth;
    track.scrollTo({ left: left, behavior: 'smooth' });
  }
  function play() { if (!stopped && !timer) timer = setInterval(step, delay); }
  function pause() { clearInterval(timer); timer = null; }
  el.addEventListener('mouseenter', pause);
  el.addEventListener('mouseleave', play);
  if (el.dataset.stopOnInteraction === 'true') {
    el.addEventListener('pointerdown', function () { stopped = true; pause(); });
  }
  play();
});
"#;

pub fn render_landing(page: &LandingPage) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Job-CV-Manager" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                main {
                    (hero(&page.hero))
                    (job_carousel(&page.jobs))
                    (features(&page.features))
                    (templates(&page.templates))
                    (call_to_action(&page.cta))
                }
                script { (PreEscaped(CAROUSEL_SCRIPT)) }
            }
        }
    }
}

fn hero(hero: &Hero) -> Markup {
    html! {
        section.hero.center {
            span.badge { (hero.badge) }
            h1 { (hero.title) }
            p.muted { (hero.subtitle) }
            div.actions {
                @for link in &hero.links {
                    a href=(link.href) { (link.label) " →" }
                }
            }
            div.stats {
                @for stat in &hero.stats {
                    div {
                        strong { (stat.value) }
                        span.muted { (stat.label) }
                    }
                }
            }
        }
    }
}

fn job_carousel(carousel: &JobCarousel) -> Markup {
    html! {
        section.jobs {
            div.container {
                h2.center { (carousel.heading) }
                div data-carousel
                    data-autoplay-ms=(carousel.autoplay_ms)
                    data-stop-on-interaction=(carousel.stop_on_interaction.to_string()) {
                    div.track {
                        @for card in &carousel.cards {
                            (job_card(card))
                        }
                        @for _ in 0..carousel.skeletons {
                            div.card.skeleton aria-hidden="true" {
                                div.bar style="width:2rem;height:2rem" {}
                                div.bar style="width:6rem" {}
                                div.bar style="width:100%" {}
                                div.bar style="width:75%" {}
                            }
                        }
                    }
                }
                p.center.actions {
                    a href=(carousel.view_all.href) { (carousel.view_all.label) " ↗" }
                }
            }
        }
    }
}

fn job_card(card: &JobCard) -> Markup {
    html! {
        article.card {
            a href=(card.job_link) target="_blank" rel="noopener noreferrer" {
                div.company {
                    img src=(card.favicon_url) alt=(card.company) width="35" height="35";
                    span.muted { (card.company) }
                }
                h3 title=(card.position_name) { (card.position_name) }
                p.description.muted title=(card.description) { (card.description) }
                span.badge { (card.location) }
                span.badge { (card.time_left) }
            }
        }
    }
}

fn features(features: &Features) -> Markup {
    html! {
        section {
            div.container {
                div.center {
                    h2 { (features.heading) }
                    p.muted { (features.intro) }
                }
                div.grid {
                    @for card in &features.cards {
                        div.card data-icon=(card.icon) {
                            h3 { (card.title) }
                            ul {
                                @for feature in &card.features {
                                    li.muted { (feature) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

// Radio-driven tabs; the checked input reveals its panel.
fn templates(preview: &TemplatePreview) -> Markup {
    let tab_css: String = preview
        .tabs
        .iter()
        .map(|tab| format!("#tab-{0}:checked~.panel-{0}{{display:block}}", tab.value))
        .collect();

    html! {
        section {
            div.container.center {
                h2 { (preview.heading) }
                p.muted { (preview.intro) }
                style { (PreEscaped(tab_css)) }
                div.tabs {
                    @for tab in &preview.tabs {
                        input type="radio" name="template" id={ "tab-" (tab.value) }
                            checked[tab.value == preview.default_tab];
                    }
                    @for tab in &preview.tabs {
                        label for={ "tab-" (tab.value) } { (tab.name) }
                    }
                    @for tab in &preview.tabs {
                        div class={ "panel panel-" (tab.value) } {
                            img src=(tab.image) alt=(tab.name) width="720" height="368";
                        }
                    }
                }
            }
        }
    }
}

fn call_to_action(cta: &CallToAction) -> Markup {
    html! {
        section.cta.center {
            h2 { (cta.title) }
            p { (cta.text) }
            a href=(cta.link.href) { (cta.link.label) " →" }
        }
    }
}
