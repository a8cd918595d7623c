//! The five kinds of automation object a package is built from.

use crate::module::ModuleKind;

/// One category of automation object, each processed by its own sub-pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Aliases,
    Keys,
    Scripts,
    Timers,
    Triggers,
}

impl Kind {
    /// Every kind, in document order.
    pub const ALL: [Kind; 5] =
        [Kind::Aliases, Kind::Keys, Kind::Scripts, Kind::Timers, Kind::Triggers];

    pub fn plural(self) -> &'static str {
        match self {
            Kind::Aliases => "aliases",
            Kind::Keys => "keys",
            Kind::Scripts => "scripts",
            Kind::Timers => "timers",
            Kind::Triggers => "triggers",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            Kind::Aliases => "alias",
            Kind::Keys => "key",
            Kind::Scripts => "script",
            Kind::Timers => "timer",
            Kind::Triggers => "trigger",
        }
    }

    /// Name of the definition files for this kind, e.g. `aliases.json`.
    pub fn file_name(self) -> String {
        format!("{}.json", self.plural())
    }

    /// Glob matching definition files at any depth below `src/`.
    pub fn pattern(self) -> String {
        format!("**/{}", self.file_name())
    }

    /// Root element wrapping this kind's modules in the package document.
    pub fn package_tag(self) -> String {
        format!("{}Package", self.module_kind().tag())
    }

    pub fn module_kind(self) -> ModuleKind {
        match self {
            Kind::Aliases => ModuleKind::Alias,
            Kind::Keys => ModuleKind::Key,
            Kind::Scripts => ModuleKind::Script,
            Kind::Timers => ModuleKind::Timer,
            Kind::Triggers => ModuleKind::Trigger,
        }
    }

    pub fn from_plural(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.plural() == s)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.plural())
    }
}
