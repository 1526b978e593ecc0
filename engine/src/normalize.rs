//! Record normalization for grouping keys
//!
//! Canonicalizes the free-form article/color/size strings records arrive
//! with. Display casing stays as given; the upper-cased forms exist only for
//! comparison.

use shared::Gender;

/// Grouping key for an article within one gender
pub fn article_key(article: &str, gender: Gender) -> String {
    format!("{}-{}", article.trim().to_uppercase(), gender.label())
}

/// Canonical size key; `None` when the size is blank
pub fn size_key(raw: &str) -> Option<String> {
    let size = raw.trim().to_uppercase();
    if size.is_empty() {
        None
    } else {
        Some(size)
    }
}

/// Canonical color key; blank colors group under `DEFAULT`
pub fn color_key(raw: &str) -> String {
    let color = raw.trim();
    if color.is_empty() {
        "DEFAULT".to_string()
    } else {
        color.to_string()
    }
}

/// Strip trailing category tokens from an article key
///
/// Tokens are matched case-insensitively behind a `-` or `_` separator and
/// stripped repeatedly until none matches, so `SHOE-GENTS-GENTS` and
/// `SHOE-LADIES-LADIES` both clean to `SHOE`.
pub fn clean_article(name: &str, suffixes: &[String]) -> String {
    let mut cleaned = name.trim().to_uppercase();
    loop {
        let before = cleaned.len();
        for token in suffixes {
            let token = token.trim().to_uppercase();
            if token.is_empty() {
                continue;
            }
            for sep in ['-', '_'] {
                let tail = format!("{}{}", sep, token);
                if cleaned.ends_with(&tail) {
                    cleaned.truncate(cleaned.len() - tail.len());
                    cleaned = cleaned.trim_end().to_string();
                    break;
                }
            }
        }
        if cleaned.len() == before {
            break;
        }
    }
    cleaned.trim().to_string()
}
