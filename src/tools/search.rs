//! Web search tool backed by the DuckDuckGo HTML endpoint.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

const MAX_RESULTS: usize = 5;

/// Search the web for current information.
pub struct GoogleSearch;

#[async_trait]
impl Tool for GoogleSearch {
    fn name(&self) -> &str {
        "google_search"
    }

    fn description(&self) -> &str {
        "Search the web for information. Returns search results with titles and snippets. Use for current events or anything you are unsure about."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let query = args["query"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'query' argument"))?;

        // DuckDuckGo HTML search needs no API key
        let encoded_query = urlencoding::encode(query);
        let url = format!("https://html.duckduckgo.com/html/?q={}", encoded_query);

        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; GeminiAgent/1.0)")
            .build()?;

        let response = client.get(&url).send().await?;
        let html = response.text().await?;

        let results = extract_results(&html);

        if results.is_empty() {
            Ok(format!("No results found for: {}", query))
        } else {
            Ok(results.join("\n\n"))
        }
    }
}

/// Extract search results from DuckDuckGo HTML.
fn extract_results(html: &str) -> Vec<String> {
    let mut results = Vec::new();

    for (i, chunk) in html.split("class=\"result__body\"").enumerate().skip(1) {
        if i > MAX_RESULTS {
            break;
        }

        let title = chunk
            .split("class=\"result__a\"")
            .nth(1)
            .and_then(|s| s.split('>').nth(1))
            .and_then(|s| s.split('<').next())
            .unwrap_or("No title");

        let snippet = chunk
            .split("class=\"result__snippet\"")
            .nth(1)
            .and_then(|s| s.split('>').nth(1))
            .and_then(|s| s.split('<').next())
            .unwrap_or("No snippet");

        let url = chunk
            .split("class=\"result__url\"")
            .nth(1)
            .and_then(|s| s.split('>').nth(1))
            .and_then(|s| s.split('<').next())
            .map(|s| s.trim())
            .unwrap_or("");

        if !title.is_empty() && title != "No title" {
            results.push(format!(
                "**{}**\n{}\nURL: {}",
                html_decode(title),
                html_decode(snippet),
                url
            ));
        }
    }

    results
}

/// Basic HTML entity decoding.
fn html_decode(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_html(title: &str, snippet: &str, url: &str) -> String {
        format!(
            "<div class=\"result__body\"><a class=\"result__a\" href=\"#\">{}</a>\
             <a class=\"result__snippet\" href=\"#\">{}</a>\
             <a class=\"result__url\" href=\"#\"> {} </a></div>",
            title, snippet, url
        )
    }

    #[test]
    fn test_extract_results() {
        let html = format!(
            "<html>{}{}</html>",
            result_html("Rust language", "A systems language", "rust-lang.org"),
            result_html("Rust game", "A survival game", "rustgame.com"),
        );

        let results = extract_results(&html);
        assert_eq!(results.len(), 2);
        assert!(results[0].contains("Rust language"));
        assert!(results[0].contains("A systems language"));
        assert!(results[0].contains("rust-lang.org"));
    }

    #[test]
    fn test_extract_results_caps_count() {
        let many: String = (0..10)
            .map(|i| result_html(&format!("Result {}", i), "snippet", "example.com"))
            .collect();

        let results = extract_results(&many);
        assert_eq!(results.len(), MAX_RESULTS);
    }

    #[test]
    fn test_extract_results_empty_page() {
        assert!(extract_results("<html><body>no results</body></html>").is_empty());
    }

    #[test]
    fn test_html_decode() {
        assert_eq!(html_decode("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(html_decode("&quot;hi&#39;s&nbsp;"), "\"hi's ");
    }
}
