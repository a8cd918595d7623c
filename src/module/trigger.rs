use regex::Regex;
use std::sync::LazyLock;

use crate::error::Result;
use crate::module::{Fields, Flag};
use crate::xml::{Element, XmlFields};

static COLOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#[0-9A-Fa-f]{6}|transparent)$").expect("color pattern is valid")
});

/// Attribute flags in document order.
pub const TRIGGER_FLAGS: [&str; 9] = [
    "isTempTrigger",
    "isMultiline",
    "isPerlSlashGOption",
    "isColorizerTrigger",
    "isFilterTrigger",
    "isSoundTrigger",
    "isColorTrigger",
    "isColorTriggerFg",
    "isColorTriggerBg",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    /// 0 through 7
    pub trigger_type: i64,
    pub condition_line_delta: i64,
    pub stay_open: i64,
    pub command: String,
    pub fg_color: String,
    pub bg_color: String,
    pub sound_file: String,
    pub color_trigger_fg_color: String,
    pub color_trigger_bg_color: String,
    pub regex_code_list: Vec<String>,
    /// One pattern type (0 through 7) per entry of `regex_code_list`
    pub regex_code_property_list: Vec<i64>,
    /// Values for [`TRIGGER_FLAGS`], same order
    pub flags: [Flag; 9],
}

impl Trigger {
    pub(crate) fn from_fields(fields: &Fields) -> Result<Self> {
        let trigger_type = fields.integer("triggerType", 0)?;
        fields.ensure((0..=7).contains(&trigger_type), "triggerType must be between 0 and 7")?;

        let color = |key: &str| -> Result<String> {
            let value = fields.string(key, "#000000")?;
            fields.ensure(
                COLOR_PATTERN.is_match(&value),
                format!("{key} must be hex color or 'transparent'"),
            )?;
            Ok(value)
        };

        let regex_code_property_list = fields.integers("regexCodePropertyList")?;
        fields.ensure(
            regex_code_property_list.iter().all(|value| (0..=7).contains(value)),
            "regexCodePropertyList values must be between 0 and 7",
        )?;

        let mut flags = [Flag::No; 9];
        for (flag, key) in flags.iter_mut().zip(TRIGGER_FLAGS) {
            *flag = fields.flag(key, Flag::No)?;
        }

        Ok(Self {
            trigger_type,
            condition_line_delta: fields.integer("conditonLineDelta", 0)?,
            stay_open: fields.non_negative("mStayOpen", 0)?,
            command: fields.string("mCommand", "")?,
            fg_color: color("mFgColor")?,
            bg_color: color("mBgColor")?,
            sound_file: fields.string("mSoundFile", "")?,
            color_trigger_fg_color: color("colorTriggerFgColor")?,
            color_trigger_bg_color: color("colorTriggerBgColor")?,
            regex_code_list: fields.strings("regexCodeList")?,
            regex_code_property_list,
            flags,
        })
    }

    pub fn flag(&self, key: &str) -> Option<Flag> {
        TRIGGER_FLAGS.iter().position(|name| *name == key).map(|index| self.flags[index])
    }
}

impl XmlFields for Trigger {
    fn attributes(&self) -> Vec<(&'static str, String)> {
        TRIGGER_FLAGS.into_iter().zip(self.flags).map(|(key, flag)| (key, flag.to_string())).collect()
    }

    fn elements(&self) -> Vec<Element> {
        vec![
            Element::text("triggerType", self.trigger_type),
            Element::text("conditonLineDelta", self.condition_line_delta),
            Element::text("mStayOpen", self.stay_open),
            Element::text("mCommand", &self.command),
            Element::text("mFgColor", &self.fg_color),
            Element::text("mBgColor", &self.bg_color),
            Element::text("mSoundFile", &self.sound_file),
            Element::text("colorTriggerFgColor", &self.color_trigger_fg_color),
            Element::text("colorTriggerBgColor", &self.color_trigger_bg_color),
            Element::list("regexCodeList", "string", &self.regex_code_list),
            Element::list("regexCodePropertyList", "integer", &self.regex_code_property_list),
        ]
    }
}
