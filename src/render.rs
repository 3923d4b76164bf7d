use std::collections::HashMap;

use crate::entities::PROFILE_URL_BASE;

pub const PERMALINK_BASE: &str = "https://twitter.com/#!/";

/// CSS class of the outer container; the only class `extra_css` applies to.
pub const BOX_CLASS: &str = "bbpBox";

/// Everything the template needs, already rewritten and formatted.
#[derive(Debug, Clone)]
pub struct EmbedFields<'a> {
    pub id: &'a str,
    pub screen_name: &'a str,
    pub real_name: &'a str,
    pub text_html: &'a str,
    pub timestamp: &'a str,
    pub box_style: Option<&'a str>,
}

impl EmbedFields<'_> {
    pub fn permalink(&self) -> String {
        permalink(self.screen_name, self.id)
    }
}

pub fn permalink(screen_name: &str, id: &str) -> String {
    format!("{}{}/status/{}", PERMALINK_BASE, screen_name, id)
}

/// Picks the style override for the outer container out of a class map.
pub fn box_style(extra_css: Option<&HashMap<String, String>>) -> Option<&str> {
    extra_css
        .and_then(|css| css.get(BOX_CLASS))
        .map(String::as_str)
        .filter(|style| !style.is_empty())
}

/// Turns prepared fields into the final fragment.
pub trait EmbedRenderer {
    fn render(&self, fields: &EmbedFields<'_>) -> String;
}

/// The Blackbird Pie quote markup. Fields are inserted as-is, without HTML
/// escaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackbirdTemplate;

impl EmbedRenderer for BlackbirdTemplate {
    fn render(&self, fields: &EmbedFields<'_>) -> String {
        let style = match fields.box_style {
            Some(style) => format!(r#" style="{}""#, style),
            None => String::new(),
        };

        format!(
            concat!(
                r#"<div class="{box_class}" id="t{id}"{style}><blockquote>"#,
                r#"<span class="twContent">{text}</span>"#,
                r#"<span class="twMeta"><br />"#,
                r#"<span class="twDecoration">&nbsp;&nbsp;&mdash; </span>"#,
                r#"<span class="twRealName">{real_name}</span>"#,
                r#"<span class="twDecoration"> (</span>"#,
                r#"<a href="{profile}{screen_name}"><span class="twScreenName">@{screen_name}</span></a>"#,
                r#"<span class="twDecoration">) </span>"#,
                r#"<a href="{permalink}"><span class="twTimeStamp">{timestamp}</span></a>"#,
                r#"<span class="twDecoration"></span></span></blockquote></div>"#,
                "\n",
            ),
            box_class = BOX_CLASS,
            id = fields.id,
            style = style,
            text = fields.text_html,
            real_name = fields.real_name,
            profile = PROFILE_URL_BASE,
            screen_name = fields.screen_name,
            permalink = fields.permalink(),
            timestamp = fields.timestamp,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields<'a>(box_style: Option<&'a str>) -> EmbedFields<'a> {
        EmbedFields {
            id: "42",
            screen_name: "jack",
            real_name: "Jack",
            text_html: "just setting up my twttr",
            timestamp: "Tue Mar 21 2006",
            box_style,
        }
    }

    #[test]
    fn test_permalink() {
        assert_eq!(
            permalink("jack", "20"),
            "https://twitter.com/#!/jack/status/20"
        );
    }

    #[test]
    fn test_render_fragment() {
        let html = BlackbirdTemplate.render(&fields(None));
        assert_eq!(
            html,
            "<div class=\"bbpBox\" id=\"t42\"><blockquote><span class=\"twContent\">just setting up my twttr</span><span class=\"twMeta\"><br /><span class=\"twDecoration\">&nbsp;&nbsp;&mdash; </span><span class=\"twRealName\">Jack</span><span class=\"twDecoration\"> (</span><a href=\"http://twitter.com/jack\"><span class=\"twScreenName\">@jack</span></a><span class=\"twDecoration\">) </span><a href=\"https://twitter.com/#!/jack/status/42\"><span class=\"twTimeStamp\">Tue Mar 21 2006</span></a><span class=\"twDecoration\"></span></span></blockquote></div>\n"
        );
    }

    #[test]
    fn test_render_box_style() {
        let html = BlackbirdTemplate.render(&fields(Some("width: 400px")));
        assert!(html.starts_with(r#"<div class="bbpBox" id="t42" style="width: 400px"><blockquote>"#));
    }

    #[test]
    fn test_render_does_not_escape() {
        let mut f = fields(None);
        f.real_name = "<b>Jack</b>";
        let html = BlackbirdTemplate.render(&f);
        assert!(html.contains(r#"<span class="twRealName"><b>Jack</b></span>"#));
    }

    #[test]
    fn test_box_style_selection() {
        let mut css = HashMap::new();
        css.insert("twContent".to_string(), "color: red".to_string());
        assert_eq!(box_style(Some(&css)), None);
        css.insert(BOX_CLASS.to_string(), String::new());
        assert_eq!(box_style(Some(&css)), None);
        css.insert(BOX_CLASS.to_string(), "border: 0".to_string());
        assert_eq!(box_style(Some(&css)), Some("border: 0"));
        assert_eq!(box_style(None), None);
    }
}
