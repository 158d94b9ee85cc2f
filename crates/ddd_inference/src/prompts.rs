//! Instructions sent to the content-retrieval capability.

use ddd_core::{DigestConfig, INFERENCE_SOURCE};
use serde_json::{json, Value};

/// Number of articles a digest asks for.
pub const DIGEST_SIZE: usize = 4;

const PREFERRED_SOURCES: &str = "UX Collective, NNGroup, Smashing Magazine, A List Apart, The Futur, \
Growth.design, Reforge, Linear Blog, Figma Blog, or similar high-quality industry voices";

const ARTICLE_SHAPE: &str = r#"{
  "id": "uuid",
  "title": "Title",
  "author": "Author",
  "source": "Source Name",
  "type": "Article" | "Video",
  "category": "Topic Category",
  "url": "URL",
  "summary": ["paragraph 1", "paragraph 2", "paragraph 3"],
  "insights": ["insight 1", "insight 2", "insight 3", "insight 4", "insight 5"],
  "application_tips": ["tip 1", "tip 2", "tip 3", "tip 4", "tip 5"],
  "tweet_draft": "A short hook about the piece, without the link"
}"#;

const DEPTH_RULE: &str = "In `insights` and `application_tips` give comprehensive lists: \
aim for 5 to 7 distinct, valuable points when the content supports it.";

fn strict_topics(config: &DigestConfig) -> String {
    let mut topics = if config.is_surprise() {
        "trending Product Design, UX Strategy, and UI Engineering topics".to_string()
    } else {
        join_topics(config)
    };
    if config.wants_case_studies() {
        topics.push_str(". Include detailed Product/UX redesign case studies if available");
    }
    topics
}

fn broad_topics(config: &DigestConfig) -> String {
    let mut topics = if config.is_surprise() {
        "foundational Product Design concepts".to_string()
    } else {
        join_topics(config)
    };
    if config.wants_case_studies() {
        topics.push_str(" (including well-known redesign case studies)");
    }
    topics
}

fn join_topics(config: &DigestConfig) -> String {
    config.topics().iter().map(|t| t.label()).collect::<Vec<_>>().join(", ")
}

/// First digest tier: fresh content inside the configured date range.
pub fn strict_digest(config: &DigestConfig, preference_context: &str) -> String {
    let date_rule = if config.date_range.is_constrained() {
        format!("DATE CONSTRAINT: every item MUST be published within: {}.", config.date_range)
    } else {
        "DATE CONSTRAINT: none, but prefer recent material.".to_string()
    };

    format!(
        "ACT AS: A Lead Product Designer.\n\
         TASK: Find {count} unique, high-quality articles or videos relevant to the topics.\n\
         {date_rule}\n\
         TARGET AUDIENCE LEVEL: {level} ({focus}).\n\
         TOPICS: {topics}.\n\
         PREFERRED SOURCES: {sources}.\n\n\
         {preferences}\n\
         OUTPUT FORMAT:\n\
         Return a RAW JSON array of {count} objects shaped exactly like this, with no text outside the JSON:\n\
         [{shape}]\n\n\
         RULES FOR URLs:\n\
         1. `url` MUST be the exact URL returned by the search tool.\n\
         2. Never fabricate, guess or shorten URLs, and never use placeholder domains.\n\
         3. If a direct link cannot be found, search for the title to locate it.\n\
         4. Leave out any item whose URL you could not verify.\n\n\
         {depth}",
        count = DIGEST_SIZE,
        date_rule = date_rule,
        level = config.level,
        focus = config.level.focus(),
        topics = strict_topics(config),
        sources = PREFERRED_SOURCES,
        preferences = preference_context,
        shape = ARTICLE_SHAPE,
        depth = DEPTH_RULE,
    )
}

/// Second digest tier: timeless, well-known material with no date constraint.
pub fn broad_digest(config: &DigestConfig, preference_context: &str) -> String {
    format!(
        "ACT AS: A Lead Product Designer and Editor.\n\
         TASK: Find {count} classic, seminal, or highly popular design articles or videos that are timeless.\n\
         TARGET AUDIENCE LEVEL: {level} ({focus}).\n\
         TOPICS: {topics}.\n\n\
         {preferences}\n\
         INSTRUCTIONS:\n\
         1. Use search to find reputable articles from sources like NNGroup, Baymard, Smashing Magazine or A List Apart.\n\
         2. Make sure every URL is valid and points at the piece itself.\n\n\
         OUTPUT FORMAT: Return a JSON array of {count} objects shaped like this:\n\
         [{shape}]\n\n\
         The `url` must be correct. Do not guess links.",
        count = DIGEST_SIZE,
        level = config.level,
        focus = config.level.focus(),
        topics = broad_topics(config),
        preferences = preference_context,
        shape = ARTICLE_SHAPE,
    )
}

fn single_article_format(url: &str) -> String {
    format!(
        "OUTPUT FORMAT:\n\
         Return a SINGLE RAW JSON object, with no conversational text, shaped like this \
         (use \"{url}\" for `url`):\n\
         {shape}\n\n\
         {depth}",
        url = url,
        shape = ARTICLE_SHAPE,
        depth = DEPTH_RULE,
    )
}

/// First analysis tier: read the page through search.
pub fn grounded_analysis(url: &str) -> String {
    format!(
        "ACT AS: A Lead Product Designer.\n\
         TASK: Analyze the content at this URL: {url}\n\n\
         INSTRUCTIONS:\n\
         1. Use the search tool to find the content of this page.\n\
         2. If the URL is not directly accessible, search for its title and author.\n\
         3. Synthesize a detailed summary and analysis.\n\n\
         {format}",
        url = url,
        format = single_article_format(url),
    )
}

/// Second analysis tier: no search, infer from the address or the model's own knowledge.
pub fn inference_analysis(url: &str) -> String {
    format!(
        "ACT AS: A Lead Product Designer.\n\
         TASK: Analyze this URL: {url}\n\n\
         A live search for this URL failed. Infer the likely content from the URL structure, \
         its keywords, or your own knowledge if it is a well-known piece.\n\
         If the specific content cannot be guessed, write a best-practices guide for the topic \
         the URL refers to.\n\
         Set `source` to \"{source}\".\n\n\
         {format}",
        url = url,
        source = INFERENCE_SOURCE,
        format = single_article_format(url),
    )
}

/// Response schema for structured-output mode, in the generative API's schema dialect.
pub fn article_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "STRING" },
            "title": { "type": "STRING" },
            "author": { "type": "STRING" },
            "source": { "type": "STRING" },
            "type": { "type": "STRING", "enum": ["Article", "Video"] },
            "category": { "type": "STRING" },
            "url": { "type": "STRING" },
            "summary": { "type": "ARRAY", "items": { "type": "STRING" } },
            "insights": { "type": "ARRAY", "items": { "type": "STRING" } },
            "application_tips": { "type": "ARRAY", "items": { "type": "STRING" } },
            "tweet_draft": { "type": "STRING" }
        },
        "required": [
            "id", "title", "author", "source", "type", "category", "url",
            "summary", "insights", "application_tips"
        ]
    })
}
