//! BVC values and their serialized form

use serde_json::Value;

use crate::data::asset::{export_ref, object_path};
use crate::error::{Error, Result};

/// Placeholder the game uses for "no value" in names and paths
pub const NONE_SENTINEL: &str = "None";

/// Whether `value` is the "none" sentinel (or empty)
#[must_use]
pub fn is_none_sentinel(value: &str) -> bool {
    value.is_empty() || value == NONE_SENTINEL
}

/// A `DataTableValue` reference: one cell of a data table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTableValue {
    pub table: String,
    pub row: String,
    pub value: String,
}

impl DataTableValue {
    pub fn new(table: impl Into<String>, row: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            row: row.into(),
            value: value.into(),
        }
    }
}

/// A "base value constant" expression
///
/// Evaluates to `base`, optionally overridden by a data-table cell, then an
/// attribute, then adjusted by an initializer, and finally multiplied by
/// `scale`. See [`WlData::resolve_bvc`](crate::WlData::resolve_bvc).
#[derive(Debug, Clone, PartialEq)]
pub struct Bvc {
    pub base: f64,
    pub data_table: Option<DataTableValue>,
    pub attribute: Option<String>,
    pub initializer: Option<String>,
    pub scale: f64,
}

impl Default for Bvc {
    fn default() -> Self {
        Self {
            base: 0.0,
            data_table: None,
            attribute: None,
            initializer: None,
            scale: 1.0,
        }
    }
}

/// One override step of a [`Bvc`], in evaluation order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BvcOverride<'a> {
    DataTable(&'a DataTableValue),
    Attribute(&'a str),
    Initializer(&'a str),
}

impl Bvc {
    /// A plain constant
    #[must_use]
    pub fn constant(base: f64) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_data_table(mut self, dtv: DataTableValue) -> Self {
        self.data_table = Some(dtv);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    #[must_use]
    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Overrides that apply, in priority order
    ///
    /// Anything set to the "none" sentinel is skipped.
    pub fn overrides(&self) -> Vec<BvcOverride<'_>> {
        let mut overrides = Vec::with_capacity(3);
        if let Some(dtv) = &self.data_table
            && !is_none_sentinel(&dtv.table)
        {
            overrides.push(BvcOverride::DataTable(dtv));
        }
        if let Some(attr) = self.attribute.as_deref()
            && !is_none_sentinel(attr)
        {
            overrides.push(BvcOverride::Attribute(attr));
        }
        if let Some(init) = self.initializer.as_deref()
            && !is_none_sentinel(init)
        {
            overrides.push(BvcOverride::Initializer(init));
        }
        overrides
    }

    /// Read a serialized BVC struct
    ///
    /// `current_table` is the data table the struct lives in, if any. Nested
    /// structs point back at their own table with `{"export": N}`.
    ///
    /// # Errors
    /// Returns [`Error::UnexpectedValue`] if a field has the wrong shape.
    pub fn from_data_struct(data: &Value, current_table: Option<&str>) -> Result<Self> {
        let mut bvc = Self::default();

        if let Some(base) = data.get("BaseValueConstant") {
            bvc.base = number(base, "BaseValueConstant")?;
        }
        if let Some(scale) = data.get("BaseValueScale") {
            bvc.scale = number(scale, "BaseValueScale")?;
        }

        if let Some(dtv) = data.get("DataTableValue") {
            let table = dtv.get("DataTable").and_then(|t| match export_ref(t) {
                Some(0) => None,
                Some(_) => current_table,
                None => object_path(t),
            });
            bvc.data_table = Some(DataTableValue::new(
                table.unwrap_or(NONE_SENTINEL),
                string_field(dtv, "RowName"),
                string_field(dtv, "ValueName"),
            ));
        }

        bvc.attribute = data
            .get("BaseValueAttribute")
            .and_then(object_path)
            .map(str::to_string);
        bvc.initializer = data
            .get("AttributeInitializer")
            .and_then(object_path)
            .map(str::to_string);

        Ok(bvc)
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(NONE_SENTINEL)
        .to_string()
}

/// A JSON number as `f64`
pub(crate) fn number(value: &Value, context: &str) -> Result<f64> {
    value.as_f64().ok_or_else(|| Error::UnexpectedValue {
        context: context.to_string(),
        value: value.to_string(),
    })
}
