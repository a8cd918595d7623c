use crate::error::Result;
use crate::module::Fields;
use crate::xml::{Element, XmlFields};

/// A toolbar button.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub css: String,
    pub command_button_up: String,
    pub command_button_down: String,
    pub icon: String,
    /// 0 horizontal, 1 vertical
    pub orientation: i64,
    /// 0 top, 2 left, 3 right, 4 floating
    pub location: i64,
    pub pos_x: i64,
    pub pos_y: i64,
    /// 1 up, 2 down
    pub button_state: i64,
    pub size_x: i64,
    pub size_y: i64,
    pub button_column: i64,
    pub button_rotation: i64,
}

impl Action {
    pub(crate) fn from_fields(fields: &Fields) -> Result<Self> {
        Ok(Self {
            css: fields.string("css", "")?,
            command_button_up: fields.string("commandButtonUp", "")?,
            command_button_down: fields.string("commandButtonDown", "")?,
            icon: fields.string("icon", "")?,
            orientation: fields.one_of("orientation", 0, &[0, 1])?,
            location: fields.one_of("location", 0, &[0, 2, 3, 4])?,
            pos_x: fields.non_negative("posX", 0)?,
            pos_y: fields.non_negative("posY", 0)?,
            button_state: fields.one_of("mButtonState", 1, &[1, 2])?,
            size_x: fields.non_negative("sizeX", 0)?,
            size_y: fields.non_negative("sizeY", 0)?,
            button_column: fields.non_negative("buttonColumn", 0)?,
            button_rotation: fields.one_of("buttonRotation", 0, &[0, 90, 180, 270])?,
        })
    }
}

impl XmlFields for Action {
    fn elements(&self) -> Vec<Element> {
        vec![
            Element::text("css", &self.css),
            Element::text("commandButtonUp", &self.command_button_up),
            Element::text("commandButtonDown", &self.command_button_down),
            Element::text("icon", &self.icon),
            Element::text("orientation", self.orientation),
            Element::text("location", self.location),
            Element::text("posX", self.pos_x),
            Element::text("posY", self.pos_y),
            Element::text("mButtonState", self.button_state),
            Element::text("sizeX", self.size_x),
            Element::text("sizeY", self.size_y),
            Element::text("buttonColumn", self.button_column),
            Element::text("buttonRotation", self.button_rotation),
        ]
    }
}
