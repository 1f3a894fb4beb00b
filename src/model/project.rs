use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One page of a GraphQL connection. A missing `pageInfo` reads as the last page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
    #[serde(default)]
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    #[cfg(test)]
    pub fn single(nodes: Vec<T>) -> Self {
        Self {
            nodes,
            page_info: PageInfo::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldDataType {
    Number,
    Text,
    Date,
    SingleSelect,
    Iteration,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    pub name: String,
    pub data_type: FieldDataType,
}

/// Field reference embedded in an item's field value.
pub type FieldRef = Field;

#[derive(Debug, Clone, Deserialize)]
pub struct Reaction {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub id: String,
    pub number: u64,
    pub reactions: Connection<Reaction>,
}

/// What a project item points at. Only issues carry reactions we count.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub enum ItemContent {
    Issue(Issue),
    #[serde(other)]
    Other,
}

/// Current value of one field on a project item, keyed by the field's type.
///
/// Payloads are nullable in the API; a null number reads as "no value".
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub enum FieldValue {
    #[serde(rename = "ProjectV2ItemFieldNumberValue")]
    Number { field: FieldRef, number: Option<f64> },
    #[serde(rename = "ProjectV2ItemFieldTextValue")]
    Text {
        field: FieldRef,
        #[allow(dead_code)]
        text: Option<String>,
    },
    #[serde(rename = "ProjectV2ItemFieldDateValue")]
    Date {
        field: FieldRef,
        #[allow(dead_code)]
        date: Option<String>,
    },
    #[serde(rename = "ProjectV2ItemFieldSingleSelectValue", rename_all = "camelCase")]
    SingleSelect {
        field: FieldRef,
        #[allow(dead_code)]
        option_id: Option<String>,
    },
    #[serde(rename = "ProjectV2ItemFieldIterationValue", rename_all = "camelCase")]
    Iteration {
        field: FieldRef,
        #[allow(dead_code)]
        iteration_id: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

impl FieldValue {
    pub fn field(&self) -> Option<&FieldRef> {
        match self {
            FieldValue::Number { field, .. }
            | FieldValue::Text { field, .. }
            | FieldValue::Date { field, .. }
            | FieldValue::SingleSelect { field, .. }
            | FieldValue::Iteration { field, .. } => Some(field),
            FieldValue::Unsupported => None,
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self {
            FieldValue::Number { number, .. } => *number,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub id: String,
    pub content: Option<ItemContent>,
    pub field_values: Connection<FieldValue>,
}

impl ProjectItem {
    pub fn issue(&self) -> Option<&Issue> {
        match &self.content {
            Some(ItemContent::Issue(issue)) => Some(issue),
            _ => None,
        }
    }

    /// The value this item holds for the field called `field_name`, if any.
    pub fn value_for(&self, field_name: &str) -> Option<&FieldValue> {
        self.field_values
            .nodes
            .iter()
            .find(|value| value.field().is_some_and(|f| f.name == field_name))
    }
}

#[derive(Debug, Clone)]
pub struct Project {
    pub id: String,
    pub fields: Vec<Field>,
}

impl Project {
    pub fn field_named(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
