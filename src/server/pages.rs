//! Static HTML pages served on failures

/// Minimal HTML escaping for text interpolated into element content or attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n\
         <body style=\"font-family: system-ui; padding: 40px; background: #1e1e1e; color: #fff;\">\n\
         {body}\n</body>\n</html>\n"
    )
}

/// Page for a failed analysis or render
pub fn error_page(detail: &str) -> String {
    page(
        "Error",
        &format!(
            "<h1>Error Loading Artifact</h1>\n\
             <pre style=\"background: #333; padding: 20px; overflow: auto;\">{}</pre>",
            escape_html(detail)
        ),
    )
}

/// Page for any path that is not this server's artifact
pub fn not_found_page(expected_id: &str, received_path: &str) -> String {
    page(
        "404 - Not Found",
        &format!(
            "<h1>404 - Artifact Not Found</h1>\n\
             <p>The artifact ID in the URL does not match this server.</p>\n\
             <p>Expected: <code>/{}</code></p>\n\
             <p>Got: <code>{}</code></p>",
            escape_html(expected_id),
            escape_html(received_path)
        ),
    )
}
