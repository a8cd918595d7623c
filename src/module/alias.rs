use crate::error::Result;
use crate::module::Fields;
use crate::xml::{Element, XmlFields};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Alias {
    pub regex: String,
    pub command: String,
}

impl Alias {
    pub(crate) fn from_fields(fields: &Fields) -> Result<Self> {
        Ok(Self { regex: fields.string("regex", "")?, command: fields.string("command", "")? })
    }
}

impl XmlFields for Alias {
    fn elements(&self) -> Vec<Element> {
        vec![Element::text("command", &self.command), Element::text("regex", &self.regex)]
    }
}
