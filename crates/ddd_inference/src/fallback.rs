//! Bundled records served when generation is not possible.

use ddd_core::{Article, ArticleType, UNAVAILABLE_CATEGORY};

#[allow(clippy::too_many_arguments)]
fn bundled(
    id: &str,
    title: &str,
    author: &str,
    source: &str,
    category: &str,
    url: &str,
    summary: [&str; 3],
    insights: [&str; 3],
    application_tips: [&str; 3],
    tweet_draft: &str,
) -> Article {
    Article {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        source: source.to_string(),
        kind: ArticleType::Article,
        category: category.to_string(),
        url: url.to_string(),
        summary: summary.iter().map(|s| s.to_string()).collect(),
        insights: insights.iter().map(|s| s.to_string()).collect(),
        application_tips: application_tips.iter().map(|s| s.to_string()).collect(),
        tweet_draft: Some(tweet_draft.to_string()),
    }
}

/// Pre-vetted articles with known-good links. Never empty.
pub fn fallback_articles() -> Vec<Article> {
    vec![
        bundled(
            "fb_1",
            "Atomic Design",
            "Brad Frost",
            "Brad Frost Blog",
            "Design Systems",
            "https://bradfrost.com/blog/post/atomic-web-design/",
            [
                "Atomic design is a methodology for creating design systems.",
                "It breaks interfaces down into atoms, molecules, organisms, templates, and pages.",
                "The approach makes UI development more consistent and scalable.",
            ],
            [
                "Systems are built from the ground up, from atoms to pages.",
                "Consistency in small parts leads to coherence in whole pages.",
                "Shared naming conventions align designers and engineers.",
            ],
            [
                "Audit your current UI inventory.",
                "Start by defining your atoms: buttons, inputs, labels.",
                "Combine atoms and check whether they hold up as molecules.",
            ],
            "Most design systems fail because they focus on pages, not patterns.\n\n\
             Atomic Design flips the model: atoms, molecules, organisms.\n\n\
             Stop building screens. Start building systems.",
        ),
        bundled(
            "fb_2",
            "10 Usability Heuristics for User Interface Design",
            "Jakob Nielsen",
            "NNGroup",
            "Research",
            "https://www.nngroup.com/articles/ten-usability-heuristics/",
            [
                "Jakob Nielsen's ten general principles for interaction design.",
                "They are heuristics: broad rules of thumb rather than specific guidelines.",
                "They remain the most used framework for heuristic evaluation.",
            ],
            [
                "Visibility of system status builds trust.",
                "Matching the real world reduces cognitive load.",
                "User control and freedom prevents frustration.",
            ],
            [
                "Run a heuristic evaluation on your current project.",
                "Focus on error prevention before error recovery.",
                "Make your help documentation easy to search.",
            ],
            "You don't need a PhD to audit a UI. You need Nielsen's 10 heuristics.\n\n\
             Human psychology doesn't ship a new version every year, which is why they still work.",
        ),
        bundled(
            "fb_3",
            "The discipline of content strategy",
            "Kristina Halvorson",
            "A List Apart",
            "Strategy",
            "https://alistapart.com/article/thedisciplineofcontentstrategy/",
            [
                "Content strategy plans for the creation, publication, and governance of useful content.",
                "It separates the editorial strategy from the technical one.",
                "Content has to be treated as a business asset.",
            ],
            [
                "Content is not just copy; it is data and images too.",
                "Governance is often the missing link in strategy.",
                "Silos between design and content hurt the experience.",
            ],
            [
                "Create a content audit spreadsheet.",
                "Decide who owns each piece of content after launch.",
                "Use real content in wireframes instead of Lorem Ipsum.",
            ],
            "Lorem Ipsum is the enemy of good design.\n\n\
             Without a content strategy you are decorating rectangles.",
        ),
        bundled(
            "fb_4",
            "Design Systems 101",
            "NNGroup",
            "NNGroup",
            "Design Systems",
            "https://www.nngroup.com/articles/design-systems-101/",
            [
                "A design system is a set of standards to manage design at scale by reducing redundancy.",
                "It includes a pattern library and a style guide.",
                "Its goal is to support digital product design and development.",
            ],
            [
                "A single source of truth is essential.",
                "Documentation matters as much as the components.",
                "Adoption is the hardest part of a design system.",
            ],
            [
                "Start with a UI kit before building a full system.",
                "Interview developers to learn what they actually need.",
                "Don't over-engineer components early on.",
            ],
            "A design system without adoption is just a component library.\n\n\
             The real work is governance, documentation, and the relationship with engineering.",
        ),
    ]
}

/// Placeholder returned when neither analysis tier produced an article for `url`.
pub fn unavailable_article(url: &str) -> Article {
    Article {
        id: format!("error_{}", chrono::Utc::now().timestamp_millis()),
        title: "Analysis Unavailable".to_string(),
        author: "System".to_string(),
        source: "Internal".to_string(),
        kind: ArticleType::Article,
        category: UNAVAILABLE_CATEGORY.to_string(),
        url: url.to_string(),
        summary: vec![
            "We could not analyze this URL at the moment.".to_string(),
            "Please try again later or check the URL.".to_string(),
        ],
        insights: vec!["N/A".to_string()],
        application_tips: vec![
            "Try a different URL".to_string(),
            "Check your internet connection".to_string(),
        ],
        tweet_draft: None,
    }
}
