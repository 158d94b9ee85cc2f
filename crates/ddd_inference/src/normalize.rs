//! Turns parsed model output into validated `Article` records.

use ddd_core::{Article, ArticleType, Error, Result};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

/// Validates one article object.
///
/// When `fallback_url` is given it replaces whatever url the model produced; the
/// model is not trusted to echo the exact address it was asked about.
pub fn normalize_article(value: &Value, fallback_url: Option<&str>) -> Result<Article> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::schema(format!("expected an article object, found {}", describe(value))))?;

    let mut problems = Vec::new();

    let title = required_text(object, "title", &mut problems);
    let author = required_text(object, "author", &mut problems);
    let source = required_text(object, "source", &mut problems);
    let category = required_text(object, "category", &mut problems);
    let url = match fallback_url {
        Some(url) => Some(url.to_string()),
        None => required_url(object, &mut problems),
    };
    let kind = article_type(object, &mut problems);
    let summary = text_list(object, "summary", &mut problems);
    if summary.as_ref().is_some_and(Vec::is_empty) {
        problems.push("`summary` must contain at least one paragraph".to_string());
    }
    let insights = text_list(object, "insights", &mut problems);
    let application_tips = text_list(object, "application_tips", &mut problems);

    match (title, author, source, category, url, kind, summary, insights, application_tips) {
        (
            Some(title),
            Some(author),
            Some(source),
            Some(category),
            Some(url),
            Some(kind),
            Some(summary),
            Some(insights),
            Some(application_tips),
        ) if problems.is_empty() => {
            let tweet_draft = Some(tweet_draft(object, &title, &author, &url));
            Ok(Article {
                id: article_id(object),
                title,
                author,
                source,
                kind,
                category,
                url,
                summary,
                insights,
                application_tips,
                tweet_draft,
            })
        }
        _ => Err(Error::Schema { problems }),
    }
}

/// Validates a list of article objects.
///
/// Malformed entries are dropped and later duplicates of a url are skipped. An id
/// already taken by an earlier entry is replaced with a fresh one. The list only
/// fails as a whole when it had entries and none of them survived.
pub fn normalize_articles(value: &Value) -> Result<Vec<Article>> {
    let entries = value
        .as_array()
        .ok_or_else(|| Error::schema(format!("expected an array of articles, found {}", describe(value))))?;

    let mut articles: Vec<Article> = Vec::with_capacity(entries.len());
    let mut problems = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        match normalize_article(entry, None) {
            Ok(mut article) => {
                if articles.iter().any(|a| a.url == article.url) {
                    debug!("Skipping duplicate article {} ({})", index, article.url);
                    continue;
                }
                if articles.iter().any(|a| a.id == article.id) {
                    debug!("Reassigning repeated id {:?} of article {}", article.id, index);
                    article.id = Uuid::new_v4().to_string();
                }
                articles.push(article);
            }
            Err(Error::Schema { problems: entry_problems }) => {
                warn!("Dropping malformed article {}: {}", index, entry_problems.join("; "));
                problems.extend(entry_problems.into_iter().map(|p| format!("entry {}: {}", index, p)));
            }
            Err(e) => return Err(e),
        }
    }

    if articles.is_empty() && !problems.is_empty() {
        return Err(Error::Schema { problems });
    }
    Ok(articles)
}

/// The literal the prompts show in the id slot of the article shape.
const ID_PLACEHOLDER: &str = "uuid";

fn article_id(object: &Map<String, Value>) -> String {
    match object.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() && !id.trim().eq_ignore_ascii_case(ID_PLACEHOLDER) => {
            id.trim().to_string()
        }
        Some(Value::Number(id)) => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

fn required_text(object: &Map<String, Value>, field: &str, problems: &mut Vec<String>) -> Option<String> {
    match object.get(field) {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Some(Value::String(_)) => {
            problems.push(format!("`{}` is empty", field));
            None
        }
        Some(other) => {
            problems.push(format!("`{}` must be a string, found {}", field, describe(other)));
            None
        }
        None => {
            problems.push(format!("missing field `{}`", field));
            None
        }
    }
}

fn required_url(object: &Map<String, Value>, problems: &mut Vec<String>) -> Option<String> {
    let raw = required_text(object, "url", problems)?;
    match Url::parse(&raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(raw),
        Ok(parsed) => {
            problems.push(format!("`url` must use http or https, found {}", parsed.scheme()));
            None
        }
        Err(e) => {
            problems.push(format!("`url` is not an absolute URL ({}): {}", e, raw));
            None
        }
    }
}

fn article_type(object: &Map<String, Value>, problems: &mut Vec<String>) -> Option<ArticleType> {
    match object.get("type") {
        Some(Value::String(kind)) => match kind.trim().to_ascii_lowercase().as_str() {
            "article" => Some(ArticleType::Article),
            "video" => Some(ArticleType::Video),
            _ => {
                problems.push(format!("`type` must be \"Article\" or \"Video\", found {:?}", kind));
                None
            }
        },
        Some(other) => {
            problems.push(format!("`type` must be a string, found {}", describe(other)));
            None
        }
        None => {
            problems.push("missing field `type`".to_string());
            None
        }
    }
}

fn text_list(object: &Map<String, Value>, field: &str, problems: &mut Vec<String>) -> Option<Vec<String>> {
    let items = match object.get(field) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            problems.push(format!("`{}` must be an array of strings, found {}", field, describe(other)));
            return None;
        }
        None => {
            problems.push(format!("missing field `{}`", field));
            return None;
        }
    };

    let mut texts = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(text) => texts.push(text.trim().to_string()),
            None => {
                problems.push(format!("`{}` must only contain strings, found {}", field, describe(item)));
                return None;
            }
        }
    }
    Some(texts)
}

// The draft is cosmetic, so a missing one is padded rather than rejected.
fn tweet_draft(object: &Map<String, Value>, title: &str, author: &str, url: &str) -> String {
    let draft = object
        .get("tweet_draft")
        .and_then(Value::as_str)
        .map(|draft| draft.replace(url, "").trim().to_string())
        .unwrap_or_default();

    if draft.is_empty() {
        format!("{} by {}", title, author)
    } else {
        draft
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_article(url: &str) -> Value {
        json!({
            "title": "10 Usability Heuristics",
            "author": "Jakob Nielsen",
            "source": "NNGroup",
            "type": "Article",
            "category": "Research",
            "url": url,
            "summary": ["Ten broad rules of thumb.", "Still the most used framework."],
            "insights": ["Visibility of system status builds trust."],
            "application_tips": ["Run a heuristic evaluation."]
        })
    }

    fn problems(err: Error) -> Vec<String> {
        match err {
            Error::Schema { problems } => problems,
            other => panic!("expected a schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_id_is_generated_fresh_each_time() {
        let value = raw_article("https://www.nngroup.com/articles/ten-usability-heuristics/");
        let first = normalize_article(&value, None).unwrap();
        let second = normalize_article(&value, None).unwrap();
        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_existing_id_is_kept() {
        let mut value = raw_article("https://example.org/a");
        value["id"] = json!("  nn-1 ");
        assert_eq!(normalize_article(&value, None).unwrap().id, "nn-1");

        value["id"] = json!(42);
        assert_eq!(normalize_article(&value, None).unwrap().id, "42");

        value["id"] = json!("");
        assert_ne!(normalize_article(&value, None).unwrap().id, "");

        value["id"] = json!("uuid");
        assert_ne!(normalize_article(&value, None).unwrap().id, "uuid");
    }

    #[test]
    fn test_list_ids_are_unique() {
        let mut first = raw_article("https://example.org/1");
        let mut second = raw_article("https://example.org/2");
        let mut third = raw_article("https://example.org/3");
        first["id"] = json!("uuid");
        second["id"] = json!("uuid");
        third["id"] = json!("a-1");
        let mut fourth = raw_article("https://example.org/4");
        fourth["id"] = json!("a-1");

        let articles = normalize_articles(&json!([first, second, third, fourth])).unwrap();
        let mut ids: Vec<&str> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), 4);
        assert!(!ids.contains(&"uuid"));
        assert_eq!(ids[2], "a-1");
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_fallback_url_always_wins() {
        let target = "https://medium.com/some/long-read-123";
        let mut value = raw_article("https://example.com/hallucinated");
        assert_eq!(normalize_article(&value, Some(target)).unwrap().url, target);

        value["url"] = json!("not a url");
        assert_eq!(normalize_article(&value, Some(target)).unwrap().url, target);

        value.as_object_mut().unwrap().remove("url");
        assert_eq!(normalize_article(&value, Some(target)).unwrap().url, target);
    }

    #[test]
    fn test_relative_or_missing_url_is_rejected_without_fallback() {
        let value = raw_article("/articles/ten-usability-heuristics/");
        let found = problems(normalize_article(&value, None).unwrap_err());
        assert_eq!(found.len(), 1);
        assert!(found[0].contains("`url`"));

        let value = raw_article("ftp://files.example.org/a.pdf");
        assert!(normalize_article(&value, None).is_err());
    }

    #[test]
    fn test_all_problems_are_reported() {
        let value = json!({
            "title": "",
            "author": "Someone",
            "source": 12,
            "type": "Podcast",
            "category": "Research",
            "url": "https://example.org/a",
            "summary": [],
            "insights": "just one string",
            "application_tips": ["ok", 3]
        });
        let found = problems(normalize_article(&value, None).unwrap_err());
        assert_eq!(found.len(), 6, "{found:?}");
        assert!(found.iter().any(|p| p.contains("`title` is empty")));
        assert!(found.iter().any(|p| p.contains("`source` must be a string")));
        assert!(found.iter().any(|p| p.contains("`type`")));
        assert!(found.iter().any(|p| p.contains("`summary` must contain")));
        assert!(found.iter().any(|p| p.contains("`insights` must be an array")));
        assert!(found.iter().any(|p| p.contains("`application_tips` must only contain strings")));
    }

    #[test]
    fn test_type_is_case_insensitive() {
        let mut value = raw_article("https://example.org/v");
        value["type"] = json!("video");
        assert_eq!(normalize_article(&value, None).unwrap().kind, ArticleType::Video);
    }

    #[test]
    fn test_tweet_draft_is_padded_and_stripped_of_url() {
        let url = "https://example.org/a";
        let article = normalize_article(&raw_article(url), None).unwrap();
        assert_eq!(article.tweet_draft.as_deref(), Some("10 Usability Heuristics by Jakob Nielsen"));

        let mut value = raw_article(url);
        value["tweet_draft"] = json!(format!("Heuristics never age. {}", url));
        let article = normalize_article(&value, None).unwrap();
        assert_eq!(article.tweet_draft.as_deref(), Some("Heuristics never age."));
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(matches!(normalize_article(&json!(["a"]), None), Err(Error::Schema { .. })));
        assert!(matches!(normalize_articles(&json!({"title": "A"})), Err(Error::Schema { .. })));
    }

    #[test]
    fn test_list_drops_malformed_and_duplicate_entries() {
        let value = json!([
            raw_article("https://example.org/a"),
            {"title": "broken"},
            raw_article("https://example.org/b"),
            raw_article("https://example.org/a"),
        ]);
        let articles = normalize_articles(&value).unwrap();
        let urls: Vec<&str> = articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.org/a", "https://example.org/b"]);
    }

    #[test]
    fn test_list_fails_when_nothing_survives() {
        let value = json!([{"title": "broken"}, 7]);
        let found = problems(normalize_articles(&value).unwrap_err());
        assert!(found.iter().any(|p| p.starts_with("entry 0:")));
        assert!(found.iter().any(|p| p.starts_with("entry 1:")));
    }

    #[test]
    fn test_empty_list_is_not_an_error() {
        assert!(normalize_articles(&json!([])).unwrap().is_empty());
    }
}
