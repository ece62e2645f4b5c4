//! Serde shapes of the transform document
//!
//! Fields are optional wherever older documents may omit them; the mapper
//! decides what is required.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top level of a transform document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(rename = "baseIRI", default, skip_serializing_if = "Option::is_none")]
    pub base_iri: Option<BaseIriDoc>,

    /// prefix → [`NamespaceDoc`], kept as raw values so one bad entry does
    /// not reject the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespaces: Option<Map<String, Value>>,

    /// Root nodes, kept raw for the same reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_mappings: Option<Vec<Value>>,
}

/// `baseIRI`: a string, or the components of one
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BaseIriDoc {
    Text(String),
    Parts(BaseIriParts),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BaseIriParts {
    pub scheme: Option<String>,
    pub user_info: Option<String>,
    pub host: Option<String>,
    /// Negative means "no port"
    pub port: Option<i64>,
    pub path: Option<String>,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

fn non_empty(part: &Option<String>) -> Option<&str> {
    part.as_deref().filter(|s| !s.is_empty())
}

impl BaseIriParts {
    /// `scheme:` `//userinfo@host:port` `path` `?query` `#fragment`
    pub fn assemble(&self) -> String {
        let mut iri = String::new();
        if let Some(scheme) = non_empty(&self.scheme) {
            iri.push_str(scheme);
            iri.push(':');
        }
        if let Some(host) = non_empty(&self.host) {
            iri.push_str("//");
            if let Some(user_info) = non_empty(&self.user_info) {
                iri.push_str(user_info);
                iri.push('@');
            }
            iri.push_str(host);
            if let Some(port) = self.port.filter(|p| *p >= 0) {
                iri.push(':');
                iri.push_str(&port.to_string());
            }
        }
        if let Some(path) = non_empty(&self.path) {
            iri.push_str(path);
        }
        if let Some(query) = non_empty(&self.query) {
            iri.push('?');
            iri.push_str(query);
        }
        if let Some(fragment) = non_empty(&self.fragment) {
            iri.push('#');
            iri.push_str(fragment);
        }
        iri
    }
}

/// A namespace entry: the bare namespace IRI, or a described vocabulary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NamespaceDoc {
    Iri(String),
    Described {
        namespace: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        loctype: Option<String>,
    },
}

/// A mapping tree node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_source: Option<ValueSourceDoc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<ExpressionDoc>,

    /// Absent on root nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueTypeDoc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_mappings: Vec<TypeDoc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_mappings: Vec<PropertyDoc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSourceDoc {
    #[serde(default)]
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<String>,
}

impl ValueSourceDoc {
    pub fn constant(value: impl Into<String>) -> Self {
        Self {
            source: crate::vocab::RDFT::SOURCE_CONSTANT.to_string(),
            column_name: None,
            constant: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpressionDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueTypeDoc {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<DatatypeDoc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatatypeDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_source: Option<ValueSourceDoc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_source: Option<ValueSourceDoc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_source: Option<ValueSourceDoc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub object_mappings: Vec<NodeDoc>,
}
