pub const PROJECT_FIELDS_QUERY: &str = r#"
query getProjectFields($org: String!, $repo: String!, $number: Int!, $cursor: String) {
  repository(owner: $org, name: $repo) {
    projectV2(number: $number) {
      id
      fields(first: 100, after: $cursor) {
        pageInfo { hasNextPage endCursor }
        nodes {
          ... on ProjectV2FieldCommon { id name dataType }
        }
      }
    }
  }
}"#;

pub const PROJECT_ITEMS_QUERY: &str = r#"
query getProjectItems($projectId: ID!, $cursor: String) {
  node(id: $projectId) {
    ... on ProjectV2 {
      items(first: 100, after: $cursor) {
        pageInfo { hasNextPage endCursor }
        nodes {
          id
          content {
            __typename
            ... on Issue {
              id
              number
              reactions(first: 100) {
                pageInfo { hasNextPage endCursor }
                nodes { content }
              }
            }
          }
          fieldValues(first: 100) {
            nodes {
              __typename
              ... on ProjectV2ItemFieldNumberValue {
                field { ... on ProjectV2FieldCommon { id name dataType } }
                number
              }
              ... on ProjectV2ItemFieldTextValue {
                field { ... on ProjectV2FieldCommon { id name dataType } }
                text
              }
              ... on ProjectV2ItemFieldDateValue {
                field { ... on ProjectV2FieldCommon { id name dataType } }
                date
              }
              ... on ProjectV2ItemFieldSingleSelectValue {
                field { ... on ProjectV2FieldCommon { id name dataType } }
                optionId
              }
              ... on ProjectV2ItemFieldIterationValue {
                field { ... on ProjectV2FieldCommon { id name dataType } }
                iterationId
              }
            }
          }
        }
      }
    }
  }
}"#;

pub const ISSUE_REACTIONS_QUERY: &str = r#"
query getIssueReactions($issueId: ID!, $cursor: String) {
  node(id: $issueId) {
    ... on Issue {
      reactions(first: 100, after: $cursor) {
        pageInfo { hasNextPage endCursor }
        nodes { content }
      }
    }
  }
}"#;

pub const UPDATE_FIELD_MUTATION: &str = r#"
mutation updateProjectItemFieldValue($projectId: ID!, $itemId: ID!, $fieldId: ID!, $value: Float!) {
  updateProjectV2ItemFieldValue(
    input: {
      projectId: $projectId
      itemId: $itemId
      fieldId: $fieldId
      value: { number: $value }
    }
  ) {
    projectV2Item { id }
  }
}"#;
