//! BVC evaluation against the data tree

use serde_json::Value;

use super::assumptions::{assumed_attribute_value, InitializerAssumption};
use super::types::{number, Bvc, BvcOverride, DataTableValue};
use super::round6;
use crate::data::asset::object_path;
use crate::data::WlData;
use crate::error::{Error, Result};

impl WlData {
    /// Compute the value of a BVC
    ///
    /// Starts from the base constant, lets each override in
    /// [`Bvc::overrides`] replace or adjust it, then applies the scale.
    ///
    /// # Errors
    /// Unknown attribute resolvers and initializers are fatal, as are
    /// attributes that can't be resolved at all.
    pub fn resolve_bvc(&mut self, bvc: &Bvc) -> Result<f64> {
        let mut value = bvc.base;

        for step in bvc.overrides() {
            match step {
                BvcOverride::DataTable(dtv) => {
                    if let Some(v) = self.resolve_data_table_value(dtv)? {
                        value = v;
                    }
                }
                BvcOverride::Attribute(attribute) => {
                    if let Some(v) = self.resolve_attribute(attribute)? {
                        value = v;
                    }
                }
                BvcOverride::Initializer(initializer) => {
                    let assumption = InitializerAssumption::for_initializer(initializer)
                        .ok_or_else(|| Error::UnknownInitializer(initializer.to_string()))?;
                    value = assumption.apply(value);
                }
            }
        }

        Ok(value * bvc.scale)
    }

    /// Compute the value of a serialized BVC struct
    ///
    /// `current_table` is the data table containing `data`, when there is one.
    pub fn resolve_bvc_struct(&mut self, data: &Value, current_table: Option<&str>) -> Result<f64> {
        let bvc = Bvc::from_data_struct(data, current_table)?;
        self.resolve_bvc(&bvc)
    }

    fn resolve_data_table_value(&mut self, dtv: &DataTableValue) -> Result<Option<f64>> {
        match self.datatable_lookup(&dtv.table, &dtv.row, &dtv.value)? {
            Some(cell) => self.cell_value(&cell, &dtv.table).map(Some),
            None => Ok(None),
        }
    }

    /// A data-table cell is either a plain number or a nested BVC struct
    fn cell_value(&mut self, cell: &Value, table: &str) -> Result<f64> {
        if cell.is_object() {
            Ok(round6(self.resolve_bvc_struct(cell, Some(table))?))
        } else {
            number(cell, table)
        }
    }

    fn resolve_attribute(&mut self, attribute: &str) -> Result<Option<f64>> {
        if let Some(value) = assumed_attribute_value(attribute) {
            return Ok(Some(value));
        }

        let unresolved = || Error::AttributeResolution {
            attribute: attribute.to_string(),
        };

        let exports = self.exports_of_type(attribute, "GbxAttributeData")?;
        let [attr_data] = exports.as_slice() else {
            return Err(unresolved());
        };
        let resolver_idx = attr_data.export_ref("ValueResolver").ok_or_else(unresolved)?;
        let resolver = self
            .export_by_index(attribute, resolver_idx)?
            .ok_or_else(unresolved)?;

        match resolver.export_type() {
            "ConstantAttributeValueResolver" => {
                let constant = resolver
                    .dig(&["Value", "BaseValueConstant"])
                    .ok_or_else(unresolved)?;
                number(constant, attribute).map(Some)
            }
            "DataTableAttributeValueResolver" => {
                let table = resolver.dig(&["DataTableRow", "DataTable"]).and_then(object_path);
                let row = resolver.dig(&["DataTableRow", "RowName"]).and_then(Value::as_str);
                let column = resolver
                    .dig(&["Property", "ParsedPath", "PropertyName"])
                    .and_then(Value::as_str);
                let (Some(table), Some(row), Some(column)) = (table, row, column) else {
                    return Err(unresolved());
                };

                match self.datatable_lookup(table, row, column)? {
                    Some(cell) => self.cell_value(&cell, table).map(Some),
                    None => Ok(None),
                }
            }
            other => Err(Error::UnknownResolver {
                kind: other.to_string(),
                attribute: attribute.to_string(),
            }),
        }
    }
}
