//! Saved variables. Unlike every other kind they never form a hierarchy.

use crate::error::Result;
use crate::loader::Definition;
use crate::module::{Fields, Flag};
use crate::xml::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub key_type: i64,
    pub value: String,
    pub value_type: i64,
    pub is_active: Flag,
    pub is_folder: Flag,
}

impl Variable {
    pub fn from_definition(definition: &Definition) -> Result<Self> {
        let fields = Fields::new("variable", definition);
        Ok(Self {
            name: fields.name()?,
            key_type: fields.integer("keyType", 0)?,
            value: fields.string("value", "")?,
            value_type: fields.integer("valueType", 0)?,
            is_active: fields.flag("isActive", Flag::Yes)?,
            is_folder: fields.flag("isFolder", Flag::No)?,
        })
    }

    pub fn to_element(&self) -> Element {
        let tag = if self.is_folder.is_yes() { "VariableGroup" } else { "Variable" };
        Element::new(tag)
            .attr("isActive", self.is_active)
            .attr("isFolder", self.is_folder)
            .child(Element::text("name", &self.name))
            .child(Element::text("keyType", self.key_type))
            .child(Element::text("value", &self.value))
            .child(Element::text("valueType", self.value_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variable_element() {
        let definition = json!({"name": "hp", "value": "100", "valueType": 3});
        let variable = Variable::from_definition(definition.as_object().unwrap()).unwrap();

        assert_eq!(
            variable.to_element().render(),
            "<Variable isActive=\"yes\" isFolder=\"no\">\n  <name>hp</name>\n  <keyType>0</keyType>\n  <value>100</value>\n  <valueType>3</valueType>\n</Variable>\n"
        );
    }

    #[test]
    fn test_variable_requires_name() {
        let definition = json!({"value": "x"});
        assert!(Variable::from_definition(definition.as_object().unwrap()).is_err());
    }
}
