//! Typed module model.
//!
//! A [`Module`] is a validated automation object of one [`ModuleKind`]. Modules
//! live in a [`ModuleArena`] and refer to each other by [`ModuleId`]; a module's
//! parent can be set exactly once, so the graph stays a forest.

mod action;
mod alias;
mod fields;
mod key;
mod script;
mod timer;
mod trigger;
mod variable;

pub use action::Action;
pub use alias::Alias;
pub use fields::Fields;
pub use key::Key;
pub use script::Script;
pub use timer::Timer;
pub use trigger::Trigger;
pub use variable::Variable;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::loader::Definition;

/// The host's two-state boolean encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flag {
    Yes,
    #[default]
    No,
}

impl Flag {
    pub fn as_str(self) -> &'static str {
        match self {
            Flag::Yes => "yes",
            Flag::No => "no",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "yes" => Some(Flag::Yes),
            "no" => Some(Flag::No),
            _ => None,
        }
    }

    pub fn is_yes(self) -> bool {
        self == Flag::Yes
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value {
            Flag::Yes
        } else {
            Flag::No
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every kind that can take part in a module hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Alias,
    Key,
    Script,
    Timer,
    Trigger,
    Action,
}

impl ModuleKind {
    pub fn name(self) -> &'static str {
        match self {
            ModuleKind::Alias => "alias",
            ModuleKind::Key => "key",
            ModuleKind::Script => "script",
            ModuleKind::Timer => "timer",
            ModuleKind::Trigger => "trigger",
            ModuleKind::Action => "action",
        }
    }

    /// Capitalized element name, e.g. `Trigger`.
    pub fn tag(self) -> &'static str {
        match self {
            ModuleKind::Alias => "Alias",
            ModuleKind::Key => "Key",
            ModuleKind::Script => "Script",
            ModuleKind::Timer => "Timer",
            ModuleKind::Trigger => "Trigger",
            ModuleKind::Action => "Action",
        }
    }

    /// Validates the kind-specific fields of `fields`.
    fn build(self, fields: &Fields) -> Result<ModuleData> {
        Ok(match self {
            ModuleKind::Alias => ModuleData::Alias(Alias::from_fields(fields)?),
            ModuleKind::Key => ModuleData::Key(Key::from_fields(fields)?),
            ModuleKind::Script => ModuleData::Script(Script::from_fields(fields)?),
            ModuleKind::Timer => ModuleData::Timer(Timer::from_fields(fields)?),
            ModuleKind::Trigger => ModuleData::Trigger(Trigger::from_fields(fields)?),
            ModuleKind::Action => ModuleData::Action(Action::from_fields(fields)?),
        })
    }
}

impl std::fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind-specific payload of a module.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleData {
    Alias(Alias),
    Key(Key),
    Script(Script),
    Timer(Timer),
    Trigger(Trigger),
    Action(Action),
}

impl ModuleData {
    pub fn kind(&self) -> ModuleKind {
        match self {
            ModuleData::Alias(_) => ModuleKind::Alias,
            ModuleData::Key(_) => ModuleKind::Key,
            ModuleData::Script(_) => ModuleKind::Script,
            ModuleData::Timer(_) => ModuleKind::Timer,
            ModuleData::Trigger(_) => ModuleKind::Trigger,
            ModuleData::Action(_) => ModuleKind::Action,
        }
    }
}

/// Identity token of a module inside its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(usize);

impl ModuleId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Module {
    id: ModuleId,
    name: String,
    is_folder: Flag,
    is_active: Flag,
    script: String,
    package_name: String,
    parent: Option<ModuleId>,
    children: Vec<ModuleId>,
    data: ModuleData,
}

impl Module {
    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_folder(&self) -> Flag {
        self.is_folder
    }

    pub fn is_active(&self) -> Flag {
        self.is_active
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn parent(&self) -> Option<ModuleId> {
        self.parent
    }

    pub fn children(&self) -> &[ModuleId] {
        &self.children
    }

    pub fn kind(&self) -> ModuleKind {
        self.data.kind()
    }

    pub fn data(&self) -> &ModuleData {
        &self.data
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}: {}]", self.kind().tag(), self.name)
    }
}

/// Owns every module of one forest.
#[derive(Debug, Default)]
pub struct ModuleArena {
    modules: Vec<Module>,
}

impl ModuleArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `definition` against the schema of `kind` and stores the result.
    ///
    /// # Errors
    /// * `Error::ValidationError` if any field violates its constraint
    pub fn create(&mut self, kind: ModuleKind, definition: &Definition) -> Result<ModuleId> {
        let fields = Fields::new(kind.name(), definition);
        let name = fields.name()?;
        let is_folder = fields.flag("isFolder", Flag::No)?;
        let is_active = fields.flag("isActive", Flag::Yes)?;
        let script = fields.string("script", "")?;
        let package_name = fields.string("packageName", "")?;
        let data = kind.build(&fields)?;

        let id = ModuleId(self.modules.len());
        self.modules.push(Module {
            id,
            name,
            is_folder,
            is_active,
            script,
            package_name,
            parent: None,
            children: Vec::new(),
            data,
        });
        Ok(id)
    }

    /// Creates an active, empty folder module named `name`.
    pub fn create_folder(&mut self, kind: ModuleKind, name: &str) -> Result<ModuleId> {
        let mut definition = Definition::new();
        definition.insert("name".to_string(), Value::from(name));
        definition.insert("isFolder".to_string(), Value::from(Flag::Yes.as_str()));
        definition.insert("isActive".to_string(), Value::from(Flag::Yes.as_str()));
        self.create(kind, &definition)
    }

    /// Appends `child` to `parent` and links it back.
    ///
    /// # Errors
    /// * `Error::DuplicateChildError` if `child` is already among the children
    /// * `Error::ParentAlreadySetError` if `child` already has a parent
    /// * `Error::CyclicChildError` if `child` is `parent` or one of its ancestors
    pub fn add_child(&mut self, parent: ModuleId, child: ModuleId) -> Result<()> {
        if self[parent].children.contains(&child) {
            return Err(Error::DuplicateChildError {
                parent: self[parent].to_string(),
                child: self[child].to_string(),
            });
        }
        if self[child].parent.is_some() {
            return Err(Error::ParentAlreadySetError { child: self[child].to_string() });
        }
        if child == parent || self.parents(parent).any(|ancestor| ancestor == child) {
            return Err(Error::CyclicChildError { child: self[child].to_string() });
        }

        self.modules[child.0].parent = Some(parent);
        let parent = &mut self.modules[parent.0];
        parent.children.push(child);
        parent.is_folder = Flag::Yes;
        Ok(())
    }

    /// Walks the ancestors of `id`, nearest first.
    pub fn parents(&self, id: ModuleId) -> impl Iterator<Item = ModuleId> + '_ {
        std::iter::successors(self[id].parent, move |current| self[*current].parent)
    }

    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }
}

impl std::ops::Index<ModuleId> for ModuleArena {
    type Output = Module;

    fn index(&self, id: ModuleId) -> &Module {
        &self.modules[id.0]
    }
}
