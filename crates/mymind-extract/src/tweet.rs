//! Tweet extraction through the public oEmbed endpoint.

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use mymind_core::{Error, Result};

use crate::html::html_to_text;
use crate::web::{require_ok, FetchConfig};

const TWEET_HOSTS: &[&str] = &["twitter.com", "x.com"];

#[derive(Debug, Deserialize)]
struct OEmbed {
    #[serde(default)]
    html: String,
    #[serde(default)]
    author_name: String,
}

/// Title and text of a tweet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    pub title: String,
    pub text: String,
}

/// Whether the URL is a tweet: a `twitter.com` or `x.com` host (or a
/// subdomain of one) with `/status/` in the path.
pub fn is_tweet_url(raw_url: &str) -> bool {
    let Ok(url) = url::Url::parse(raw_url) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_lowercase();
    let known = TWEET_HOSTS
        .iter()
        .any(|h| host == *h || host.ends_with(&format!(".{}", h)));
    known && url.path().contains("/status/")
}

/// oEmbed request URL for a tweet.
pub fn oembed_request_url(endpoint: &str, tweet_url: &str) -> String {
    format!(
        "{}?url={}&omit_script=1&dnt=1",
        endpoint,
        urlencoding::encode(tweet_url)
    )
}

/// Fetch a tweet's author and text.
#[instrument(skip(client, config), fields(subsystem = "extract", component = "tweet", op = "fetch"))]
pub async fn fetch_tweet(client: &Client, config: &FetchConfig, tweet_url: &str) -> Result<Tweet> {
    let endpoint = oembed_request_url(&config.oembed_url, tweet_url);
    let response = require_ok(client.get(&endpoint).send().await?)?;
    let oembed: OEmbed = response
        .json()
        .await
        .map_err(|e| Error::Extraction(format!("twitter oembed decode: {}", e)))?;

    Ok(Tweet {
        title: format!("Tweet by {}", oembed.author_name),
        text: html_to_text(&oembed.html),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_tweet_url() {
        assert!(is_tweet_url("https://twitter.com/rustlang/status/123"));
        assert!(is_tweet_url("https://x.com/rustlang/status/123"));
        assert!(is_tweet_url("https://mobile.twitter.com/a/status/1"));
        assert!(is_tweet_url("https://X.com/a/status/1"));
    }

    #[test]
    fn test_is_tweet_url_rejects_lookalikes() {
        assert!(!is_tweet_url("https://x.com/rustlang"));
        assert!(!is_tweet_url("https://box.com/a/status/1"));
        assert!(!is_tweet_url("https://nottwitter.com/a/status/1"));
        assert!(!is_tweet_url("https://example.com/x.com/status/1"));
        assert!(!is_tweet_url("twitter.com/a/status/1"));
    }

    #[test]
    fn test_oembed_request_url_encodes_tweet() {
        assert_eq!(
            oembed_request_url("https://publish.twitter.com/oembed", "https://x.com/a/status/1"),
            "https://publish.twitter.com/oembed?url=https%3A%2F%2Fx.com%2Fa%2Fstatus%2F1&omit_script=1&dnt=1"
        );
    }
}
