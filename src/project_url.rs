use std::sync::LazyLock;

use regex::Regex;

use crate::error::SyncError;

static PROJECT_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com/([^/]+)/([^/]+)/projects/(\d+)").expect("project url regex is valid")
});

/// Coordinates of a repository-scoped project board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectUrl {
    pub org: String,
    pub repo: String,
    pub number: i32,
}

impl ProjectUrl {
    /// Parse `https://github.com/<org>/<repo>/projects/<number>`.
    ///
    /// The match is unanchored, so trailing path segments or query strings
    /// after the number are ignored.
    pub fn parse(url: &str) -> Result<Self, SyncError> {
        let caps = PROJECT_URL_REGEX
            .captures(url)
            .ok_or_else(SyncError::invalid_project_url)?;

        // GraphQL `Int` is 32-bit signed.
        let number = caps[3]
            .parse::<i32>()
            .map_err(|_| SyncError::invalid_project_url())?;

        Ok(Self {
            org: caps[1].to_string(),
            repo: caps[2].to_string(),
            number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::INVALID_PROJECT_URL;

    fn assert_invalid(url: &str) {
        let err = ProjectUrl::parse(url).unwrap_err();
        assert!(matches!(err, SyncError::InvalidInput(_)));
        assert_eq!(err.to_string(), INVALID_PROJECT_URL);
    }

    #[test]
    fn parse_full_url() {
        let parsed = ProjectUrl::parse("https://github.com/test-org/test-repo/projects/1").unwrap();
        assert_eq!(
            parsed,
            ProjectUrl {
                org: "test-org".into(),
                repo: "test-repo".into(),
                number: 1,
            }
        );
    }

    #[test]
    fn parse_ignores_trailing_segments() {
        let parsed =
            ProjectUrl::parse("https://github.com/acme/widgets/projects/42/views/3?layout=board")
                .unwrap();
        assert_eq!(parsed.org, "acme");
        assert_eq!(parsed.repo, "widgets");
        assert_eq!(parsed.number, 42);
    }

    #[test]
    fn parse_without_scheme() {
        let parsed = ProjectUrl::parse("github.com/acme/widgets/projects/7").unwrap();
        assert_eq!(parsed.number, 7);
    }

    #[test]
    fn rejects_garbage() {
        assert_invalid("invalid-url");
        assert_invalid("");
    }

    #[test]
    fn rejects_missing_segments() {
        assert_invalid("https://github.com/acme/projects/1");
        assert_invalid("https://github.com/acme/widgets/projects/");
    }

    #[test]
    fn rejects_non_numeric_number() {
        assert_invalid("https://github.com/acme/widgets/projects/abc");
    }

    #[test]
    fn rejects_wrong_host_path() {
        assert_invalid("https://gitlab.com/acme/widgets/projects/1");
        assert_invalid("https://github.com/orgs/acme/project/1");
    }

    #[test]
    fn rejects_number_out_of_range() {
        assert_invalid("https://github.com/acme/widgets/projects/99999999999");
    }
}
