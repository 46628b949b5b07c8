//! Field descriptors used to declare model columns.

use std::fmt;

use crate::value::Value;

/// Column kind. Each kind carries a default DDL type and default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
    Integer,
    Float,
    Text,
}

impl FieldKind {
    pub fn default_ddl(self) -> &'static str {
        match self {
            FieldKind::String => "varchar(100)",
            FieldKind::Boolean => "boolean",
            FieldKind::Integer => "bigint",
            FieldKind::Float => "real",
            FieldKind::Text => "text",
        }
    }

    /// Whether a field of this kind may act as primary key.
    pub fn can_be_primary_key(self) -> bool {
        !matches!(self, FieldKind::Boolean | FieldKind::Text)
    }

    fn default_value(self) -> Option<FieldDefault> {
        match self {
            FieldKind::Boolean => Some(FieldDefault::Value(Value::Bool(false))),
            FieldKind::Integer => Some(FieldDefault::Value(Value::Integer(0))),
            FieldKind::Float => Some(FieldDefault::Value(Value::Real(0.0))),
            FieldKind::String | FieldKind::Text => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "StringField",
            FieldKind::Boolean => "BooleanField",
            FieldKind::Integer => "IntegerField",
            FieldKind::Float => "FloatField",
            FieldKind::Text => "TextField",
        };
        f.write_str(name)
    }
}

/// Default applied when a field has no value at save time.
#[derive(Debug, Clone)]
pub enum FieldDefault {
    /// A fixed value.
    Value(Value),
    /// Called each time a default is needed.
    Factory(fn() -> Value),
}

impl FieldDefault {
    pub fn resolve(&self) -> Value {
        match self {
            FieldDefault::Value(value) => value.clone(),
            FieldDefault::Factory(factory) => factory(),
        }
    }
}

/// Describes one model attribute and the column it maps to.
#[derive(Debug, Clone)]
pub struct Field {
    kind: FieldKind,
    name: Option<String>,
    ddl: String,
    primary_key: bool,
    default: Option<FieldDefault>,
}

impl Field {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            name: None,
            ddl: kind.default_ddl().to_string(),
            primary_key: false,
            default: kind.default_value(),
        }
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }

    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    pub fn integer() -> Self {
        Self::new(FieldKind::Integer)
    }

    pub fn float() -> Self {
        Self::new(FieldKind::Float)
    }

    pub fn text() -> Self {
        Self::new(FieldKind::Text)
    }

    /// Override the column name (defaults to the attribute name).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Override the column type used in DDL.
    pub fn ddl(mut self, ddl: impl Into<String>) -> Self {
        self.ddl = ddl.into();
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    pub fn default_with(mut self, factory: fn() -> Value) -> Self {
        self.default = Some(FieldDefault::Factory(factory));
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn column_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn column_type(&self) -> &str {
        &self.ddl
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn default_value(&self) -> Option<&FieldDefault> {
        self.default.as_ref()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}, {}:{}>",
            self.kind,
            self.ddl,
            self.name.as_deref().unwrap_or("")
        )
    }
}
