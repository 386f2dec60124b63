use std::collections::HashSet;

/// Убирает любую разметку из пользовательского текста: пустой allowlist
/// тегов, `<script>`/`<style>` выбрасываются вместе с содержимым.
/// Текст остаётся entity-encoded (`&` -> `&amp;`).
pub fn strip_markup(raw: &str) -> String {
    ammonia::Builder::new()
        .tags(HashSet::new())
        .clean(raw)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_keeps_text() {
        assert_eq!(strip_markup("<b>Milk</b> 2%"), "Milk 2%");
        assert_eq!(strip_markup("<a href=\"x\">link</a>"), "link");
    }

    #[test]
    fn drops_script_with_content() {
        assert_eq!(strip_markup("<script>alert(1)</script>Milk"), "Milk");
    }

    #[test]
    fn encodes_ampersand_keeps_quotes() {
        assert_eq!(strip_markup("A&B \"C\""), "A&amp;B \"C\"");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_markup("Plain name 123"), "Plain name 123");
    }
}
