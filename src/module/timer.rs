use regex::Regex;
use std::sync::LazyLock;

use crate::error::Result;
use crate::module::{Fields, Flag};
use crate::xml::{Element, XmlFields};

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}$").expect("time pattern is valid")
});

#[derive(Debug, Clone, PartialEq)]
pub struct Timer {
    pub command: String,
    /// `hh:mm:ss.zzz`
    pub time: String,
    pub is_temp_timer: Flag,
    pub is_offset_timer: Flag,
}

impl Timer {
    pub(crate) fn from_fields(fields: &Fields) -> Result<Self> {
        let time = fields.string("time", "00:00:00.000")?;
        fields.ensure(TIME_PATTERN.is_match(&time), "time must match format hh:mm:ss.zzz")?;

        Ok(Self {
            command: fields.string("command", "")?,
            time,
            is_temp_timer: fields.flag("isTempTimer", Flag::No)?,
            is_offset_timer: fields.flag("isOffsetTimer", Flag::No)?,
        })
    }
}

impl XmlFields for Timer {
    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("isTempTimer", self.is_temp_timer.to_string()),
            ("isOffsetTimer", self.is_offset_timer.to_string()),
        ]
    }

    fn elements(&self) -> Vec<Element> {
        vec![Element::text("command", &self.command), Element::text("time", &self.time)]
    }
}
