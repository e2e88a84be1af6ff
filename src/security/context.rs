//! Per-request view consumed by the filters.

use std::borrow::Cow;

use axum::http::{header, request::Parts, HeaderMap, HeaderName};

/// Read-only facts about one request, derived once on arrival.
///
/// Absent headers read as `""`. Non-ASCII bytes are decoded lossily, never dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Lowercased `User-Agent`.
    pub user_agent: String,
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    pub referer: String,
    pub origin: String,
    pub client_timezone: String,
}

impl RequestContext {
    /// Build a context from request parts, reading the timezone from `timezone_header`.
    pub fn from_parts(parts: &Parts, timezone_header: &HeaderName) -> Self {
        let headers = &parts.headers;
        Self {
            user_agent: header_str(headers, &header::USER_AGENT).to_lowercase(),
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(str::to_string),
            referer: header_str(headers, &header::REFERER).into_owned(),
            origin: header_str(headers, &header::ORIGIN).into_owned(),
            client_timezone: header_str(headers, timezone_header).into_owned(),
        }
    }

    /// All decoded values of query parameter `name`, in order of appearance.
    pub fn query_values(&self, name: &str) -> Vec<String> {
        let Some(query) = self.query.as_deref() else {
            return Vec::new();
        };
        url::form_urlencoded::parse(query.as_bytes())
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
            .collect()
    }
}

/// Header value as text, `""` when missing.
///
/// Invalid UTF-8 sequences become U+FFFD; the ASCII around them is kept so
/// substring and prefix checks still see it.
pub(crate) fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Cow<'a, str> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    fn context(req: Request<()>) -> RequestContext {
        let (parts, _) = req.into_parts();
        RequestContext::from_parts(&parts, &HeaderName::from_static("x-client-timezone"))
    }

    #[test]
    fn test_reads_headers() {
        let ctx = context(
            Request::builder()
                .uri("/shop/item?loader=true")
                .header("User-Agent", "Mozilla/5.0 (X11; Linux)")
                .header("Referer", "https://joiedamour.shop/shop")
                .header("Origin", "https://joiedamour.shop")
                .header("X-Client-Timezone", "Asia/Kolkata")
                .body(())
                .unwrap(),
        );

        assert_eq!(ctx.user_agent, "mozilla/5.0 (x11; linux)");
        assert_eq!(ctx.path, "/shop/item");
        assert_eq!(ctx.query.as_deref(), Some("loader=true"));
        assert_eq!(ctx.referer, "https://joiedamour.shop/shop");
        assert_eq!(ctx.origin, "https://joiedamour.shop");
        assert_eq!(ctx.client_timezone, "Asia/Kolkata");
    }

    #[test]
    fn test_missing_headers_read_empty() {
        let ctx = context(Request::builder().uri("/").body(()).unwrap());
        assert_eq!(ctx.user_agent, "");
        assert_eq!(ctx.referer, "");
        assert_eq!(ctx.origin, "");
        assert_eq!(ctx.client_timezone, "");
        assert_eq!(ctx.query, None);
    }

    #[test]
    fn test_non_ascii_headers_keep_their_text() {
        let mut req = Request::builder().uri("/").body(()).unwrap();
        req.headers_mut().insert(
            header::USER_AGENT,
            HeaderValue::from_bytes("Curl/8.4.0 (café)".as_bytes()).unwrap(),
        );
        req.headers_mut().insert(
            header::REFERER,
            HeaderValue::from_bytes("https://joiedamour.shop/café".as_bytes()).unwrap(),
        );
        req.headers_mut().insert(
            header::ORIGIN,
            HeaderValue::from_bytes(b"https://joiedamour.shop\xff").unwrap(),
        );

        let ctx = context(req);
        assert_eq!(ctx.user_agent, "curl/8.4.0 (café)");
        assert_eq!(ctx.referer, "https://joiedamour.shop/café");
        assert_eq!(ctx.origin, "https://joiedamour.shop\u{fffd}");
    }

    #[test]
    fn test_query_values_decode() {
        let ctx = RequestContext {
            query: Some("loader=tr%75e&x=1&loader=false".into()),
            ..Default::default()
        };
        assert_eq!(ctx.query_values("loader"), vec!["true", "false"]);
        assert!(ctx.query_values("missing").is_empty());
        assert!(RequestContext::default().query_values("loader").is_empty());
    }
}
