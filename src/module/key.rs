use crate::error::Result;
use crate::module::Fields;
use crate::xml::{Element, XmlFields};

/// A keyboard binding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Key {
    pub command: String,
    pub key_code: i64,
    pub key_modifier: i64,
}

impl Key {
    pub(crate) fn from_fields(fields: &Fields) -> Result<Self> {
        Ok(Self {
            command: fields.string("command", "")?,
            key_code: fields.integer("keyCode", 0)?,
            key_modifier: fields.integer("keyModifier", 0)?,
        })
    }
}

impl XmlFields for Key {
    fn elements(&self) -> Vec<Element> {
        vec![
            Element::text("command", &self.command),
            Element::text("keyCode", self.key_code),
            Element::text("keyModifier", self.key_modifier),
        ]
    }
}
