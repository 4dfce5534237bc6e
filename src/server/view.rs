use crate::models::RenderContext;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Prompt Canvas</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; }
    textarea { width: 100%; min-height: 7rem; font: inherit; }
    button { margin-top: .5rem; padding: .5rem 1.25rem; }
    .error { color: #a40000; background: #fde8e8; padding: .75rem; border-radius: 4px; }
    figure { margin: 1.5rem 0 0; }
    figure img { max-width: 100%; border-radius: 4px; }
  </style>
</head>
<body>
  <h1>Prompt Canvas</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Escapes text for use inside element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_page(context: &RenderContext) -> String {
    let mut html = String::from(PAGE_HEAD);

    html.push_str("  <form method=\"post\" action=\"/\">\n");
    html.push_str("    <label for=\"prompt_text\">Describe the picture you want</label>\n");
    // The HTML parser drops one newline right after <textarea>.
    html.push_str(&format!(
        "    <textarea id=\"prompt_text\" name=\"prompt_text\">\n{}</textarea>\n",
        escape_html(&context.prompt_text)
    ));
    html.push_str("    <button type=\"submit\">Generate</button>\n");
    html.push_str("  </form>\n");

    if let Some(error) = &context.error {
        html.push_str(&format!(
            "  <p class=\"error\" role=\"alert\">{}</p>\n",
            escape_html(error)
        ));
    }

    if let Some(url) = &context.image_url {
        let url = escape_html(url);
        html.push_str(&format!(
            "  <figure>\n    <a href=\"{url}\" target=\"_blank\" rel=\"noopener\"><img src=\"{url}\" alt=\"Generated image\"></a>\n  </figure>\n",
            url = url
        ));
    }

    html.push_str(PAGE_TAIL);
    html
}
