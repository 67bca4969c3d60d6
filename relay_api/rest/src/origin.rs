use std::{convert::Infallible, str::FromStr};

use axum::http::HeaderValue;

/// Origins allowed to submit requests from a browser.
///
/// Parsed from a comma separated list. Entries are trimmed and empty entries
/// are ignored. Matching is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .is_ok_and(|origin| self.0.iter().any(|x| x == origin))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromStr for AllowedOrigins {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(
            s.split(',')
                .map(str::trim)
                .filter(|x| !x.is_empty())
                .map(Into::into)
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origins(s: &str) -> AllowedOrigins {
        s.parse().unwrap()
    }

    #[test]
    fn parse() {
        let allowed = origins(" https://site.example, ,http://localhost:3000 ,");
        assert_eq!(
            allowed.iter().collect::<Vec<_>>(),
            ["https://site.example", "http://localhost:3000"]
        );
    }

    #[test]
    fn contains_exact_match_only() {
        let allowed = origins("https://site.example");
        assert!(allowed.contains(&HeaderValue::from_static("https://site.example")));
        assert!(!allowed.contains(&HeaderValue::from_static("https://evil.example")));
        assert!(!allowed.contains(&HeaderValue::from_static("https://site.example/")));
        assert!(!allowed.contains(&HeaderValue::from_static("http://site.example")));
    }

    #[test]
    fn empty_list_allows_nothing() {
        let allowed = origins("");
        assert!(!allowed.contains(&HeaderValue::from_static("https://site.example")));
        assert!(!allowed.contains(&HeaderValue::from_static("")));
    }
}
