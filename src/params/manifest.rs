//! Parameter manifests.
//!
//! A manifest is the ordered list of `name=type` declarations an operation
//! exposes to its caller. The textual form is one `##name=type` line per
//! declaration:
//!
//! ```text
//! ##Historik=name
//! ##dummy=vector
//! ##Dag=string
//! ##Historik_Flader=output vector
//! ```

use std::fmt;

/// Error type for manifest parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManifestError {
    #[error("line {line}: expected `##name=type`")]
    MissingSeparator { line: usize },

    #[error("line {line}: empty parameter name")]
    EmptyName { line: usize },

    #[error("line {line}: unknown parameter type `{ty}`")]
    UnknownType { line: usize, ty: String },

    #[error("duplicate parameter `{0}`")]
    Duplicate(String),
}

/// Declared type of a manifest parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Operation identifier.
    Name,
    /// Input dataset reference.
    Vector,
    /// Numeric scalar.
    Number,
    /// Free-form text.
    String,
    /// Named result slot.
    OutputVector,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Name => "name",
            ParamType::Vector => "vector",
            ParamType::Number => "number",
            ParamType::String => "string",
            ParamType::OutputVector => "output vector",
        }
    }

    /// Parse a type as written in a manifest line.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "name" => Some(ParamType::Name),
            "vector" => Some(ParamType::Vector),
            "number" => Some(ParamType::Number),
            "string" => Some(ParamType::String),
            "output vector" => Some(ParamType::OutputVector),
            _ => None,
        }
    }

    /// Whether a value of this type is supplied by the caller.
    pub fn is_input(&self) -> bool {
        matches!(self, ParamType::Vector | ParamType::Number | ParamType::String)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `name=type` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    pub ty: ParamType,
}

/// Ordered parameter declarations of one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "builders have no effect until used"]
pub struct Manifest {
    decls: Vec<ParamDecl>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration.
    pub fn declare(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.decls.push(ParamDecl {
            name: name.into(),
            ty,
        });
        self
    }

    /// All declarations, in order.
    pub fn decls(&self) -> &[ParamDecl] {
        &self.decls
    }

    /// The operation identifier (first `name` declaration).
    pub fn name(&self) -> Option<&str> {
        self.decls
            .iter()
            .find(|d| d.ty == ParamType::Name)
            .map(|d| d.name.as_str())
    }

    /// Look up a declaration by parameter name.
    pub fn get(&self, name: &str) -> Option<&ParamDecl> {
        self.decls.iter().find(|d| d.name == name)
    }

    /// Declarations the caller supplies values for.
    pub fn inputs(&self) -> impl Iterator<Item = &ParamDecl> {
        self.decls.iter().filter(|d| d.ty.is_input())
    }

    /// Named output slots.
    pub fn outputs(&self) -> impl Iterator<Item = &ParamDecl> {
        self.decls
            .iter()
            .filter(|d| d.ty == ParamType::OutputVector)
    }

    /// Render as `##name=type` lines.
    pub fn to_header(&self) -> String {
        self.decls
            .iter()
            .map(|d| format!("##{}={}", d.name, d.ty))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Parse `##name=type` lines. Lines not starting with `##` are ignored.
    pub fn parse(source: &str) -> Result<Self, ManifestError> {
        let mut manifest = Manifest::new();

        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;
            let Some(body) = raw.trim().strip_prefix("##") else {
                continue;
            };

            let (name, ty) = body
                .split_once('=')
                .ok_or(ManifestError::MissingSeparator { line })?;

            let name = name.trim();
            if name.is_empty() {
                return Err(ManifestError::EmptyName { line });
            }

            let ty = ParamType::from_str(ty).ok_or_else(|| ManifestError::UnknownType {
                line,
                ty: ty.trim().to_string(),
            })?;

            if manifest.get(name).is_some() {
                return Err(ManifestError::Duplicate(name.to_string()));
            }

            manifest = manifest.declare(name, ty);
        }

        Ok(manifest)
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header())
    }
}
