use crate::error::Result;
use crate::module::Fields;
use crate::xml::{Element, XmlFields};

/// A script with the host events it subscribes to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub event_handler_list: Vec<String>,
}

impl Script {
    pub(crate) fn from_fields(fields: &Fields) -> Result<Self> {
        Ok(Self { event_handler_list: fields.strings("eventHandlerList")? })
    }
}

impl XmlFields for Script {
    fn elements(&self) -> Vec<Element> {
        vec![Element::list("eventHandlerList", "string", &self.event_handler_list)]
    }
}
