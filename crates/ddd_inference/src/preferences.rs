use ddd_core::UserPreferences;

/// How many liked and disliked articles are quoted back to the model.
pub const PREFERENCE_CONTEXT_LIMIT: usize = 5;

/// Renders the user's recent ratings as a prompt hint.
///
/// Only the first `PREFERENCE_CONTEXT_LIMIT` entries of each list are used, so the
/// hint stays bounded however much history accumulates.
pub fn build_context(prefs: Option<&UserPreferences>) -> String {
    let Some(prefs) = prefs else {
        return String::new();
    };

    let mut context = String::new();

    if !prefs.liked.is_empty() {
        let liked = prefs
            .liked
            .iter()
            .take(PREFERENCE_CONTEXT_LIMIT)
            .map(|a| format!("\"{}\" ({})", a.title, a.category))
            .collect::<Vec<_>>()
            .join(", ");
        context.push_str(&format!(
            "USER FEEDBACK - POSITIVE: The user previously found these articles helpful: {}. \
             Prioritize similar topics, sources, or depth.\n",
            liked
        ));
    }

    if !prefs.disliked.is_empty() {
        let disliked = prefs
            .disliked
            .iter()
            .take(PREFERENCE_CONTEXT_LIMIT)
            .map(|a| format!("\"{}\"", a.title))
            .collect::<Vec<_>>()
            .join(", ");
        context.push_str(&format!(
            "USER FEEDBACK - NEGATIVE: The user disliked these articles: {}. Avoid similar content.\n",
            disliked
        ));
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddd_core::{Article, ArticleType};

    fn rated(title: &str) -> Article {
        Article {
            id: title.to_string(),
            title: title.to_string(),
            author: "Author".to_string(),
            source: "Source".to_string(),
            kind: ArticleType::Article,
            category: "Strategy".to_string(),
            url: format!("https://example.org/{}", title.replace(' ', "-")),
            summary: vec!["p".to_string()],
            insights: vec![],
            application_tips: vec![],
            tweet_draft: None,
        }
    }

    #[test]
    fn test_absent_or_empty_preferences_yield_nothing() {
        assert_eq!(build_context(None), "");
        assert_eq!(build_context(Some(&UserPreferences::default())), "");
    }

    #[test]
    fn test_only_most_recent_five_are_referenced() {
        let prefs = UserPreferences {
            liked: (0..50).map(|i| rated(&format!("Liked {}", i))).collect(),
            disliked: vec![],
        };
        let context = build_context(Some(&prefs));

        for i in 0..PREFERENCE_CONTEXT_LIMIT {
            assert!(context.contains(&format!("\"Liked {}\"", i)));
        }
        for i in PREFERENCE_CONTEXT_LIMIT..50 {
            assert!(!context.contains(&format!("\"Liked {}\"", i)));
        }
        assert!(!context.contains("NEGATIVE"));

        let few = UserPreferences {
            liked: (0..5).map(|i| rated(&format!("Liked {}", i))).collect(),
            disliked: vec![],
        };
        assert_eq!(context, build_context(Some(&few)));
    }

    #[test]
    fn test_both_sentences_are_rendered() {
        let prefs = UserPreferences {
            liked: vec![rated("Atomic Design")],
            disliked: vec![rated("Dark Patterns Listicle")],
        };
        let context = build_context(Some(&prefs));
        assert!(context.contains("POSITIVE: The user previously found these articles helpful: \"Atomic Design\" (Strategy)."));
        assert!(context.contains("NEGATIVE: The user disliked these articles: \"Dark Patterns Listicle\"."));
        assert_eq!(context.lines().count(), 2);
    }
}
