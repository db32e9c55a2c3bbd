//! HTML rendering of the board page.
//!
//! All dynamic text is escaped before it is placed in markup. The page has no
//! scripts; only an inline stylesheet, which the CSP allows.

use std::fmt::Write;

use crate::config::BoardSettings;
use crate::store::Post;

const STYLE: &str = r#"
    body {
      background-color: #222;
      color: #ddd;
      font-family: sans-serif;
      max-width: 600px;
      margin: 2em auto;
      padding: 0 1em;
    }
    h1 { margin-bottom: 0.5em; }
    form { margin-bottom: 1em; }
    textarea {
      width: 100%;
      height: 80px;
      background: #333;
      color: #ddd;
      border: 1px solid #555;
      padding: 0.5em;
      font-family: inherit;
      font-size: 1em;
      resize: vertical;
    }
    input[type="submit"] {
      margin-top: 0.5em;
      padding: 0.5em 1em;
      background: #444;
      color: #ddd;
      border: 1px solid #555;
      cursor: pointer;
      font-family: inherit;
      font-size: 1em;
    }
    .post {
      border-bottom: 1px solid #555;
      padding: 0.5em 0;
    }
    .post p {
      margin: 0;
      white-space: pre-wrap;
      overflow-wrap: anywhere;
    }
"#;

pub const EMPTY_BOARD: &str = "No posts yet. Be the first!";

/// Escape `& < > " '` for use in element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape `input` and turn each line break (`\r\n`, `\n` or `\r`) into `<br>`.
pub fn format_post_text(input: &str) -> String {
    escape_html(input)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "<br>")
}

/// Render the full page: heading, submission form, then posts newest first.
pub fn render_page(settings: &BoardSettings, csrf_token: &str, posts: &[Post]) -> String {
    let title = escape_html(&settings.title);
    let mut html = String::with_capacity(4096 + posts.len() * 256);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <style>{STYLE}  </style>
</head>
<body>
  <h1>{title}</h1>

  <form method="post" action="/">
    <textarea
      name="text"
      placeholder="Write your message here…"
      required
      maxlength="{max_len}"
    ></textarea><br>
    <input type="hidden" name="csrf_token" value="{token}">
    <input type="submit" value="Send">
  </form>
"#,
        max_len = settings.max_message_length,
        token = escape_html(csrf_token),
    );

    if posts.is_empty() {
        let _ = writeln!(html, "  <p>{}</p>", EMPTY_BOARD);
    } else {
        for post in posts {
            let _ = writeln!(
                html,
                "  <div class=\"post\">\n    <p>{}</p>\n  </div>",
                format_post_text(&post.text)
            );
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> BoardSettings {
        BoardSettings {
            title: "Tea & <Biscuits>".into(),
            max_message_length: 140,
            ..BoardSettings::default()
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#039;y&#039;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_line_breaks_after_escaping() {
        assert_eq!(format_post_text("a<b\nc\r\nd\re"), "a&lt;b<br>c<br>d<br>e");
    }

    #[test]
    fn test_empty_board_message() {
        let html = render_page(&settings(), "tok", &[]);
        assert!(html.contains(EMPTY_BOARD));
        assert!(!html.contains("class=\"post\""));
    }

    #[test]
    fn test_page_contents() {
        let posts = vec![Post::new("newest"), Post::new("older")];
        let html = render_page(&settings(), "abc123", &posts);

        assert!(html.contains("<title>Tea &amp; &lt;Biscuits&gt;</title>"));
        assert!(html.contains("<h1>Tea &amp; &lt;Biscuits&gt;</h1>"));
        assert!(html.contains(r#"name="csrf_token" value="abc123""#));
        assert!(html.contains(r#"maxlength="140""#));
        assert!(!html.contains(EMPTY_BOARD));

        let newest = html.find("newest").unwrap();
        let older = html.find("older").unwrap();
        assert!(newest < older);
    }

    #[test]
    fn test_post_markup_is_never_live() {
        let posts = vec![Post::new("<script>alert(1)</script> & <b>bold</b>")];
        let html = render_page(&settings(), "t", &posts);

        assert!(!html.contains("<script"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; &lt;b&gt;bold&lt;/b&gt;"));
    }
}
