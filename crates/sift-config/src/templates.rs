//! Configuration templates for `sift init`.
//!
//! Templates are stored as valid TOML files and returned as commented-out
//! example configurations.

/// Default local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the local configuration template as a commented-out example.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Returns the global configuration template as a commented-out example.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Converts a valid TOML template into a commented-out example config.
///
/// Lines that are already comments are preserved as-is. Non-comment, non-empty
/// lines get a "# " prefix. Empty lines are preserved.
fn comment_template(template: &str) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    #[test]
    fn templates_parse_as_valid_toml() {
        for template in [LOCAL_TEMPLATE, GLOBAL_TEMPLATE] {
            let result = parse_config(template);
            assert!(result.is_ok(), "template failed to parse: {result:?}");
        }
    }

    #[test]
    fn local_template_names_a_corpus() {
        let parsed = parse_config(LOCAL_TEMPLATE).unwrap();
        assert_eq!(
            parsed.corpus.and_then(|c| c.path).as_deref(),
            Some("articles.json")
        );
    }

    #[test]
    fn commented_template_parses_to_nothing() {
        let parsed = parse_config(&local_template()).unwrap();
        assert!(parsed.corpus.is_none());
        assert!(parsed.search.is_none());
        assert!(parsed.synonyms.is_none());
    }

    #[test]
    fn comment_template_prefixes_only_content_lines() {
        let input = "# note\n[search]\n\npage_size = 5\n";
        assert_eq!(
            comment_template(input),
            "# note\n# [search]\n\n# page_size = 5\n"
        );
    }
}
