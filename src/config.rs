use crate::error::SyncError;
use crate::project_url::ProjectUrl;
use crate::providers::github::DEFAULT_GRAPHQL_URL;

/// Resolves action inputs by name, e.g. `project-url`.
pub trait InputSource {
    fn get_input(&self, name: &str) -> String;
}

/// Inputs as the Actions runner publishes them: `INPUT_<NAME>` variables.
pub struct EnvInputs;

impl InputSource for EnvInputs {
    fn get_input(&self, name: &str) -> String {
        std::env::var(input_var_name(name))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }
}

fn input_var_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

#[derive(Debug, Clone)]
pub struct ActionConfig {
    pub project_url: String,
    pub github_token: String,
    pub field_name: String,
    pub graphql_url: String,
}

/// The GraphQL endpoint of the server the workflow runs against.
pub fn graphql_url() -> String {
    std::env::var("GITHUB_GRAPHQL_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_string())
}

pub fn load_config(
    inputs: &dyn InputSource,
    graphql_url: String,
) -> Result<ActionConfig, SyncError> {
    let project_url = inputs.get_input("project-url");
    // A bad URL is reported ahead of any other input problem.
    ProjectUrl::parse(&project_url)?;

    let github_token = inputs.get_input("github-token");
    if github_token.is_empty() {
        return Err(SyncError::InvalidInput(
            "Input required and not supplied: github-token".into(),
        ));
    }

    Ok(ActionConfig {
        project_url,
        github_token,
        field_name: inputs.get_input("field-name"),
        graphql_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::INVALID_PROJECT_URL;
    use std::collections::HashMap;

    struct MapInputs(HashMap<&'static str, &'static str>);

    impl InputSource for MapInputs {
        fn get_input(&self, name: &str) -> String {
            self.0.get(name).map(|v| v.to_string()).unwrap_or_default()
        }
    }

    fn inputs(pairs: &[(&'static str, &'static str)]) -> MapInputs {
        MapInputs(pairs.iter().copied().collect())
    }

    #[test]
    fn input_names_map_to_runner_variables() {
        assert_eq!(input_var_name("project-url"), "INPUT_PROJECT-URL");
        assert_eq!(input_var_name("field name"), "INPUT_FIELD_NAME");
    }

    #[test]
    fn load_all_inputs() {
        let config = load_config(
            &inputs(&[
                ("project-url", "https://github.com/test-org/test-repo/projects/1"),
                ("github-token", "test-token"),
                ("field-name", "Reactions"),
            ]),
            DEFAULT_GRAPHQL_URL.to_string(),
        )
        .unwrap();

        assert_eq!(config.project_url, "https://github.com/test-org/test-repo/projects/1");
        assert_eq!(config.github_token, "test-token");
        assert_eq!(config.field_name, "Reactions");
        assert_eq!(config.graphql_url, "https://api.github.com/graphql");
    }

    #[test]
    fn missing_token_is_rejected() {
        let err = load_config(
            &inputs(&[("project-url", "https://github.com/a/b/projects/1")]),
            DEFAULT_GRAPHQL_URL.to_string(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Input required and not supplied: github-token");
    }

    #[test]
    fn invalid_url_is_reported_before_missing_token() {
        for url in ["invalid-url", ""] {
            let err = load_config(
                &inputs(&[("project-url", url)]),
                DEFAULT_GRAPHQL_URL.to_string(),
            )
            .unwrap_err();
            assert_eq!(err.to_string(), INVALID_PROJECT_URL);
        }
    }

    #[test]
    fn optional_inputs_default_to_empty() {
        let config = load_config(
            &inputs(&[
                ("github-token", "t"),
                ("project-url", "https://github.com/a/b/projects/1"),
            ]),
            "https://ghe.example.com/api/graphql".to_string(),
        )
        .unwrap();
        assert_eq!(config.field_name, "");
        assert_eq!(config.graphql_url, "https://ghe.example.com/api/graphql");
    }
}
