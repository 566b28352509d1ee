//! Static copy for the landing page.

use serde::Serialize;

pub const HERO_BADGE: &str = "100% Free & Open Source";
pub const HERO_TITLE: &str = "Build Your Resume & Launch Your Career";
pub const HERO_SUBTITLE: &str = "Create stunning resumes and explore career opportunities, all in \
one place. Free, open-source, and powered by AI with no watermarks or hidden fees.";

pub const CREATE_RESUME_PATH: &str = "/resume/create";
pub const CAREERS_PATH: &str = "/careers";

pub const JOBS_HEADING: &str = "Latest Career Opportunities";
/// Cards shown while there are no postings to display.
pub const SKELETON_CARDS: usize = 4;
pub const CAROUSEL_AUTOPLAY_MS: u64 = 3000;

pub const FEATURES_HEADING: &str = "Why Choose Job-CV-Manager?";
pub const FEATURES_INTRO: &str = "Built with modern tools and designed for everyone. Create \
professional resumes without watermarks or hidden fees, and apply for real job openings with ease.";

pub const TEMPLATES_HEADING: &str = "Professional Templates";
pub const TEMPLATES_INTRO: &str = "Choose from our collection of ATS-optimized templates designed \
to help you stand out while ensuring compatibility with applicant tracking systems.";
pub const TEMPLATE_NAMES: [&str; 3] = ["Modern", "Professional", "Minimal"];
pub const DEFAULT_TEMPLATE: &str = "modern";

pub const CTA_TITLE: &str = "Ready to Create Your Professional Resume?";
pub const CTA_TEXT: &str = "Join thousands of job seekers who have successfully created their \
resumes using our platform. No credit card required, no hidden fees.";
pub const CTA_LABEL: &str = "Create Your Resume Now";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub features: [&'static str; 4],
}

pub fn hero_links() -> Vec<Link> {
    vec![
        Link {
            label: "Get Started",
            href: CREATE_RESUME_PATH,
        },
        Link {
            label: "Find Careers",
            href: CAREERS_PATH,
        },
    ]
}

pub fn feature_cards() -> Vec<FeatureCard> {
    vec![
        FeatureCard {
            icon: "layout",
            title: "Professional Templates",
            features: [
                "ATS-friendly designs",
                "Multiple layout options",
                "Customizable sections",
                "Print-ready formats",
            ],
        },
        FeatureCard {
            icon: "sparkles",
            title: "AI-Powered",
            features: [
                "Smart content suggestions",
                "Auto Generate Content",
                "Keyword optimization",
                "Powered by Llama 3.1",
            ],
        },
        FeatureCard {
            icon: "rocket",
            title: "Built for Everyone",
            features: [
                "No sign-up required",
                "100% free, forever",
                "Export to PDF",
                "Open-source code",
            ],
        },
        FeatureCard {
            icon: "briefcase",
            title: "Career Opportunities",
            features: [
                "Browse job listings",
                "Apply directly with your resume",
                "Updated regularly",
                "Dedicated career page",
            ],
        },
    ]
}
