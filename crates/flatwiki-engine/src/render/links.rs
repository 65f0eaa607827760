//! Link notation: `[Title]` in a page body becomes a link to that page.

use regex::Regex;
use std::sync::OnceLock;

/// How text outside of link notation is emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Escaping {
    /// HTML-escape `&`, `<` and `>` in surrounding text
    #[default]
    Html,
    /// Pass surrounding text through untouched; the body may inject markup
    Raw,
}

impl Escaping {
    pub fn from_raw_html(raw_html: bool) -> Self {
        if raw_html { Self::Raw } else { Self::Html }
    }
}

fn link_regex() -> &'static Regex {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINK_REGEX.get_or_init(|| Regex::new(r"\[([a-zA-Z0-9]+)\]").expect("Invalid link regex"))
}

/// Replace every `[Title]` with an anchor to `/view/Title`.
///
/// Brackets that do not enclose a valid title (`[]`, `[a b]`, unbalanced)
/// are left as literal text.
pub fn render_links(body: &str, escaping: Escaping) -> String {
    let mut rendered = String::with_capacity(body.len());
    let mut last_end = 0;

    for caps in link_regex().captures_iter(body) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        push_text(&mut rendered, &body[last_end..whole.start()], escaping);
        // The name is alphanumeric, so it is safe in both the attribute and the text
        rendered.push_str("<a href=\"/view/");
        rendered.push_str(name.as_str());
        rendered.push_str("\">");
        rendered.push_str(name.as_str());
        rendered.push_str("</a>");
        last_end = whole.end();
    }

    push_text(&mut rendered, &body[last_end..], escaping);
    rendered
}

fn push_text(out: &mut String, text: &str, escaping: Escaping) {
    match escaping {
        Escaping::Html => out.push_str(&html_escape::encode_text(text)),
        Escaping::Raw => out.push_str(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_single_link() {
        assert_eq!(
            render_links("[Foo]", Escaping::Html),
            "<a href=\"/view/Foo\">Foo</a>"
        );
    }

    #[test]
    fn test_surrounding_text_untouched() {
        assert_eq!(
            render_links("a [B2] c", Escaping::Html),
            "a <a href=\"/view/B2\">B2</a> c"
        );
    }

    #[test]
    fn test_multiple_links() {
        assert_eq!(
            render_links("[One] and [Two]", Escaping::Raw),
            "<a href=\"/view/One\">One</a> and <a href=\"/view/Two\">Two</a>"
        );
    }

    #[rstest]
    #[case("plain text")]
    #[case("")]
    #[case("line one\nline two\r\n")]
    #[case("<b>bold</b> & more")]
    #[case("[]")]
    #[case("[with space]")]
    #[case("[under_score]")]
    #[case("[unclosed")]
    #[case("closed]")]
    fn test_raw_mode_without_links_is_identity(#[case] text: &str) {
        assert_eq!(render_links(text, Escaping::Raw), text);
    }

    #[rstest]
    #[case("plain text")]
    #[case("multi\nline")]
    #[case("[]")]
    #[case("[not a link]")]
    fn test_html_mode_without_links_or_markup_is_identity(#[case] text: &str) {
        assert_eq!(render_links(text, Escaping::Html), text);
    }

    #[test]
    fn test_nested_brackets_link_innermost() {
        assert_eq!(
            render_links("[[Foo]]", Escaping::Html),
            "[<a href=\"/view/Foo\">Foo</a>]"
        );
    }

    #[test]
    fn test_html_mode_escapes_surrounding_text() {
        assert_eq!(
            render_links("<script>x</script> [Safe] & done", Escaping::Html),
            "&lt;script&gt;x&lt;/script&gt; <a href=\"/view/Safe\">Safe</a> &amp; done"
        );
    }

    #[test]
    fn test_raw_mode_keeps_markup() {
        assert_eq!(
            render_links("<em>hi</em> [Foo]", Escaping::Raw),
            "<em>hi</em> <a href=\"/view/Foo\">Foo</a>"
        );
    }

    #[test]
    fn test_non_ascii_text_passes_through() {
        assert_eq!(
            render_links("café [Menu] ☕", Escaping::Html),
            "café <a href=\"/view/Menu\">Menu</a> ☕"
        );
    }

    #[test]
    fn test_escaping_from_raw_html_flag() {
        assert_eq!(Escaping::from_raw_html(false), Escaping::Html);
        assert_eq!(Escaping::from_raw_html(true), Escaping::Raw);
        assert_eq!(Escaping::default(), Escaping::Html);
    }
}
