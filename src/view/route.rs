//! Path dispatch for the two client routes

use reqwest::Url;
use std::fmt;
use std::str::FromStr;

/// Targets are resolved against this origin; anything that leaves it is not a route.
const ORIGIN: &str = "http://localhost/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: upload, company, role description, analyze.
    Dashboard,
    /// `/results?session={id}`; the id may be missing.
    Results { session_id: Option<String> },
    NotFound(String),
}

impl Route {
    pub fn parse(target: &str) -> Self {
        let target = target.trim();
        let Some(url) = locate(target) else {
            return Route::NotFound(target.to_string());
        };

        match url.path().trim_end_matches('/') {
            "" => Route::Dashboard,
            "/results" => Route::Results {
                session_id: url
                    .query_pairs()
                    .find(|(key, _)| key == "session")
                    .map(|(_, value)| value.into_owned())
                    .filter(|value| !value.is_empty()),
            },
            _ => Route::NotFound(target.to_string()),
        }
    }

    pub fn results(session_id: &str) -> Self {
        Route::Results {
            session_id: Some(session_id.to_string()),
        }
    }
}

fn locate(target: &str) -> Option<Url> {
    let url = Url::parse(ORIGIN).ok()?.join(target).ok()?;
    (url.host_str() == Some("localhost")).then_some(url)
}

impl FromStr for Route {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Route::parse(s))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Dashboard => f.write_str("/"),
            Route::Results { session_id: Some(id) } => {
                let mut url = Url::parse(ORIGIN).map_err(|_| fmt::Error)?;
                url.set_path("/results");
                url.query_pairs_mut().append_pair("session", id);
                write!(f, "{}?{}", url.path(), url.query().unwrap_or_default())
            }
            Route::Results { session_id: None } => f.write_str("/results"),
            Route::NotFound(path) => f.write_str(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard() {
        assert_eq!(Route::parse("/"), Route::Dashboard);
        assert_eq!(Route::parse(""), Route::Dashboard);
    }

    #[test]
    fn test_results_route_round_trip() {
        let route = Route::parse("/results?session=abc");
        assert_eq!(route, Route::results("abc"));
        assert_eq!(route.to_string(), "/results?session=abc");
    }

    #[test]
    fn test_other_query_keys_are_tolerated() {
        assert_eq!(
            Route::parse("/results?utm=x&session=a%20b&flag"),
            Route::results("a b")
        );
    }

    #[test]
    fn test_results_without_session() {
        assert_eq!(Route::parse("/results"), Route::Results { session_id: None });
        assert_eq!(Route::parse("/results?session="), Route::Results { session_id: None });
    }

    #[test]
    fn test_session_id_with_reserved_characters() {
        let route = Route::results("a b#c&d");
        let target = route.to_string();
        assert_eq!(target, "/results?session=a+b%23c%26d");
        assert_eq!(Route::parse(&target), route);
        assert_eq!(Route::parse("/results?session=a+b"), Route::results("a b"));
    }

    #[test]
    fn test_unknown_path() {
        assert_eq!(Route::parse("/admin"), Route::NotFound("/admin".to_string()));
        assert_eq!(Route::parse("/results/"), Route::Results { session_id: None });
    }

    #[test]
    fn test_other_origin_is_not_a_route() {
        assert_eq!(
            Route::parse("//elsewhere.example/results?session=abc"),
            Route::NotFound("//elsewhere.example/results?session=abc".to_string())
        );
    }
}
