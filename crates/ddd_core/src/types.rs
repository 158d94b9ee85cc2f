use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source label carried by articles the model wrote without search grounding.
pub const INFERENCE_SOURCE: &str = "AI Inference";

/// Category carried by the placeholder returned when a URL cannot be analyzed.
pub const UNAVAILABLE_CATEGORY: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleType {
    Article,
    Video,
}

impl Default for ArticleType {
    fn default() -> Self {
        Self::Article
    }
}

impl fmt::Display for ArticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Article => f.write_str("Article"),
            Self::Video => f.write_str("Video"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub author: String,
    pub source: String,
    #[serde(rename = "type")]
    pub kind: ArticleType,
    pub category: String,
    pub url: String,
    pub summary: Vec<String>,
    pub insights: Vec<String>,
    pub application_tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweet_draft: Option<String>,
}

impl Article {
    /// Text ready to be posted: the hook (or a title/author line) followed by the link.
    pub fn tweet_text(&self) -> String {
        let body = match self.tweet_draft.as_deref().map(str::trim) {
            Some(draft) if !draft.is_empty() => draft.to_string(),
            _ => format!("{} by {}", self.title, self.author),
        };
        format!("{}\n\n{}", body, self.url)
    }

    pub fn is_inferred(&self) -> bool {
        self.source == INFERENCE_SOURCE
    }

    pub fn is_unavailable(&self) -> bool {
        self.category == UNAVAILABLE_CATEGORY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum ExperienceLevel {
    #[serde(rename = "Junior")]
    #[value(name = "junior")]
    Junior,
    #[serde(rename = "Mid-Level")]
    #[value(name = "mid-level")]
    MidLevel,
    #[serde(rename = "Senior")]
    #[value(name = "senior")]
    Senior,
}

impl ExperienceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Junior => "Junior",
            Self::MidLevel => "Mid-Level",
            Self::Senior => "Senior",
        }
    }

    pub fn focus(&self) -> &'static str {
        match self {
            Self::Junior => "Foundations & Core Concepts",
            Self::MidLevel => "Execution & Detailed Analysis",
            Self::Senior => "Strategy, Systems & Leadership",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum DateRange {
    #[serde(rename = "Last 24 Hours")]
    #[value(name = "last-24-hours")]
    Last24Hours,
    #[serde(rename = "Last Week")]
    #[value(name = "last-week")]
    LastWeek,
    #[serde(rename = "Last Month")]
    #[value(name = "last-month")]
    LastMonth,
    #[serde(rename = "Last 6 Months")]
    #[value(name = "last-6-months")]
    LastSixMonths,
    #[serde(rename = "Any Time")]
    #[value(name = "any-time")]
    AnyTime,
}

impl DateRange {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Last24Hours => "Last 24 Hours",
            Self::LastWeek => "Last Week",
            Self::LastMonth => "Last Month",
            Self::LastSixMonths => "Last 6 Months",
            Self::AnyTime => "Any Time",
        }
    }

    /// `AnyTime` places no constraint on publication date.
    pub fn is_constrained(&self) -> bool {
        !matches!(self, Self::AnyTime)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Topic {
    #[serde(rename = "Product Thinking")]
    #[value(name = "product-thinking")]
    ProductThinking,
    #[serde(rename = "AI in UX")]
    #[value(name = "ai-in-ux")]
    AiInUx,
    #[serde(rename = "Visual Design")]
    #[value(name = "visual-design")]
    VisualDesign,
    #[serde(rename = "Strategy")]
    #[value(name = "strategy")]
    Strategy,
    #[serde(rename = "Design Systems")]
    #[value(name = "design-systems")]
    DesignSystems,
    #[serde(rename = "Research")]
    #[value(name = "research")]
    Research,
    #[serde(rename = "Product Design Case Studies")]
    #[value(name = "product-case-studies")]
    ProductDesignCaseStudies,
    #[serde(rename = "UX Design Case Studies")]
    #[value(name = "ux-case-studies")]
    UxDesignCaseStudies,
    #[serde(rename = "Random/Surprise Me")]
    #[value(name = "surprise-me")]
    SurpriseMe,
}

impl Topic {
    pub const ALL: [Topic; 9] = [
        Topic::ProductThinking,
        Topic::AiInUx,
        Topic::VisualDesign,
        Topic::Strategy,
        Topic::DesignSystems,
        Topic::Research,
        Topic::ProductDesignCaseStudies,
        Topic::UxDesignCaseStudies,
        Topic::SurpriseMe,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ProductThinking => "Product Thinking",
            Self::AiInUx => "AI in UX",
            Self::VisualDesign => "Visual Design",
            Self::Strategy => "Strategy",
            Self::DesignSystems => "Design Systems",
            Self::Research => "Research",
            Self::ProductDesignCaseStudies => "Product Design Case Studies",
            Self::UxDesignCaseStudies => "UX Design Case Studies",
            Self::SurpriseMe => "Random/Surprise Me",
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::SurpriseMe)
    }

    pub fn is_case_study(&self) -> bool {
        matches!(self, Self::ProductDesignCaseStudies | Self::UxDesignCaseStudies)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters of one digest request.
///
/// The topic list is never empty. `Topic::SurpriseMe` is exclusive: it is either
/// the only topic or absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawDigestConfig")]
pub struct DigestConfig {
    pub level: ExperienceLevel,
    topics: Vec<Topic>,
    pub date_range: DateRange,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDigestConfig {
    level: ExperienceLevel,
    #[serde(default)]
    topics: Vec<Topic>,
    date_range: DateRange,
}

impl From<RawDigestConfig> for DigestConfig {
    fn from(raw: RawDigestConfig) -> Self {
        Self::new(raw.level, raw.topics, raw.date_range)
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            level: ExperienceLevel::MidLevel,
            topics: vec![Topic::SurpriseMe],
            date_range: DateRange::LastMonth,
        }
    }
}

impl DigestConfig {
    pub fn new(level: ExperienceLevel, topics: impl IntoIterator<Item = Topic>, date_range: DateRange) -> Self {
        let mut config = Self {
            level,
            topics: vec![Topic::SurpriseMe],
            date_range,
        };
        config.set_topics(topics);
        config
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Replaces the topic selection, collapsing to the sentinel when it is empty
    /// or contains the sentinel.
    pub fn set_topics(&mut self, topics: impl IntoIterator<Item = Topic>) {
        let mut selected: Vec<Topic> = Vec::new();
        for topic in topics {
            if topic.is_sentinel() {
                self.topics = vec![Topic::SurpriseMe];
                return;
            }
            if !selected.contains(&topic) {
                selected.push(topic);
            }
        }
        self.topics = if selected.is_empty() { vec![Topic::SurpriseMe] } else { selected };
    }

    /// Flips one topic in or out of the selection.
    pub fn toggle_topic(&mut self, topic: Topic) {
        if topic.is_sentinel() {
            self.topics = vec![Topic::SurpriseMe];
            return;
        }

        let mut concrete: Vec<Topic> = self.topics.iter().copied().filter(|t| !t.is_sentinel()).collect();
        if concrete.contains(&topic) {
            concrete.retain(|t| *t != topic);
        } else {
            concrete.push(topic);
        }

        self.topics = if concrete.is_empty() { vec![Topic::SurpriseMe] } else { concrete };
    }

    pub fn is_surprise(&self) -> bool {
        self.topics.iter().any(Topic::is_sentinel)
    }

    pub fn wants_case_studies(&self) -> bool {
        self.topics.iter().any(Topic::is_case_study)
    }
}

/// Previously rated articles, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub liked: Vec<Article>,
    pub disliked: Vec<Article>,
}

impl UserPreferences {
    pub fn is_empty(&self) -> bool {
        self.liked.is_empty() && self.disliked.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestOrigin {
    Feed,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestHistoryItem {
    id: String,
    timestamp: DateTime<Utc>,
    config: Option<DigestConfig>,
    articles: Vec<Article>,
    #[serde(rename = "type")]
    origin: DigestOrigin,
}

impl DigestHistoryItem {
    pub fn feed(config: DigestConfig, articles: Vec<Article>) -> Self {
        Self::new(Some(config), articles, DigestOrigin::Feed)
    }

    pub fn url(article: Article) -> Self {
        Self::new(None, vec![article], DigestOrigin::Url)
    }

    fn new(config: Option<DigestConfig>, articles: Vec<Article>, origin: DigestOrigin) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            config,
            articles,
            origin,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn config(&self) -> Option<&DigestConfig> {
        self.config.as_ref()
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn origin(&self) -> DigestOrigin {
        self.origin
    }
}
