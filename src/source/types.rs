use crate::breakpoint::SourceRange;
use serde::{Deserialize, Serialize};

/// Everything the traversal produced for one translation unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationUnit {
    pub file_path: String,
    /// Free functions, scanned for the program's `main`.
    #[serde(default)]
    pub functions: Vec<FunctionDescription>,
    #[serde(default)]
    pub methods: Vec<MethodDescription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDescription {
    pub name: String,
    pub range: SourceRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescription {
    /// Display signature, e.g. `-[Foo bar:]`.
    pub display_name: String,
    /// `None` when the method has no body to instrument.
    #[serde(default)]
    pub body: Option<SourceRange>,
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Return statements in traversal order.
    #[serde(default)]
    pub returns: Vec<ReturnStatement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnStatement {
    pub range: SourceRange,
    /// Set when the returned expression is a plain variable reference.
    #[serde(default)]
    pub referenced_name: Option<String>,
}

impl MethodDescription {
    pub fn new(display_name: impl Into<String>, body: SourceRange) -> Self {
        Self {
            display_name: display_name.into(),
            body: Some(body),
            parameters: Vec::new(),
            returns: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(name.into());
        self
    }

    pub fn with_return(mut self, range: SourceRange, referenced_name: Option<&str>) -> Self {
        self.returns.push(ReturnStatement {
            range,
            referenced_name: referenced_name.map(str::to_string),
        });
        self
    }
}
