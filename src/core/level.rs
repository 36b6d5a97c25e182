//! Level definitions and styles
//!
//! A [`Style`] is an ordered list of [`LevelDefinition`]s. Order is verbosity:
//! index 0 is the most suppressible level, the last one is always shown.

use super::error::{LoggerError, Result};
use super::paint::Paint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Colors a level symbol can be drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LevelColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    BgBlack,
    BgRed,
    BgGreen,
    BgYellow,
    BgBlue,
    BgMagenta,
    BgCyan,
    BgWhite,
}

impl LevelColor {
    /// Recognized color names
    pub const NAMES: &'static [&'static str] = &[
        "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white", "gray", "grey",
        "bgBlack", "bgRed", "bgGreen", "bgYellow", "bgBlue", "bgMagenta", "bgCyan", "bgWhite",
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LevelColor::Black => "black",
            LevelColor::Red => "red",
            LevelColor::Green => "green",
            LevelColor::Yellow => "yellow",
            LevelColor::Blue => "blue",
            LevelColor::Magenta => "magenta",
            LevelColor::Cyan => "cyan",
            LevelColor::White => "white",
            LevelColor::Gray => "gray",
            LevelColor::BgBlack => "bgBlack",
            LevelColor::BgRed => "bgRed",
            LevelColor::BgGreen => "bgGreen",
            LevelColor::BgYellow => "bgYellow",
            LevelColor::BgBlue => "bgBlue",
            LevelColor::BgMagenta => "bgMagenta",
            LevelColor::BgCyan => "bgCyan",
            LevelColor::BgWhite => "bgWhite",
        }
    }

    /// Style that draws text in this color
    pub fn paint(&self) -> Paint {
        use colored::Color;
        match self {
            LevelColor::Black => Paint::new().fg(Color::Black),
            LevelColor::Red => Paint::new().fg(Color::Red),
            LevelColor::Green => Paint::new().fg(Color::Green),
            LevelColor::Yellow => Paint::new().fg(Color::Yellow),
            LevelColor::Blue => Paint::new().fg(Color::Blue),
            LevelColor::Magenta => Paint::new().fg(Color::Magenta),
            LevelColor::Cyan => Paint::new().fg(Color::Cyan),
            LevelColor::White => Paint::new().fg(Color::White),
            LevelColor::Gray => Paint::new().fg(Color::BrightBlack),
            LevelColor::BgBlack => Paint::new().bg(Color::Black),
            LevelColor::BgRed => Paint::new().bg(Color::Red),
            LevelColor::BgGreen => Paint::new().bg(Color::Green),
            LevelColor::BgYellow => Paint::new().bg(Color::Yellow),
            LevelColor::BgBlue => Paint::new().bg(Color::Blue),
            LevelColor::BgMagenta => Paint::new().bg(Color::Magenta),
            LevelColor::BgCyan => Paint::new().bg(Color::Cyan),
            LevelColor::BgWhite => Paint::new().bg(Color::White),
        }
    }
}

impl fmt::Display for LevelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LevelColor {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "black" => Ok(LevelColor::Black),
            "red" => Ok(LevelColor::Red),
            "green" => Ok(LevelColor::Green),
            "yellow" => Ok(LevelColor::Yellow),
            "blue" => Ok(LevelColor::Blue),
            "magenta" => Ok(LevelColor::Magenta),
            "cyan" => Ok(LevelColor::Cyan),
            "white" => Ok(LevelColor::White),
            "gray" | "grey" => Ok(LevelColor::Gray),
            "bgBlack" => Ok(LevelColor::BgBlack),
            "bgRed" => Ok(LevelColor::BgRed),
            "bgGreen" => Ok(LevelColor::BgGreen),
            "bgYellow" => Ok(LevelColor::BgYellow),
            "bgBlue" => Ok(LevelColor::BgBlue),
            "bgMagenta" => Ok(LevelColor::BgMagenta),
            "bgCyan" => Ok(LevelColor::BgCyan),
            "bgWhite" => Ok(LevelColor::BgWhite),
            _ => Err(LoggerError::unknown_color(s)),
        }
    }
}

impl TryFrom<String> for LevelColor {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LevelColor> for String {
    fn from(color: LevelColor) -> Self {
        color.to_str().to_string()
    }
}

/// One severity level of a style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub symbol: String,
    pub color: LevelColor,
    #[serde(default)]
    pub bold: bool,
    /// Console output for this level goes to stderr
    #[serde(default, rename = "error")]
    pub is_error: bool,
    /// Level used by handles without a fixed level
    #[serde(default, rename = "default")]
    pub is_default: bool,
}

impl LevelDefinition {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, color: LevelColor) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            color,
            bold: false,
            is_error: false,
            is_default: false,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn error(mut self) -> Self {
        self.is_error = true;
        self
    }

    #[must_use]
    pub fn default_level(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Style used for this level's symbol
    pub fn paint(&self) -> Paint {
        self.color.paint().bold_if(self.bold)
    }
}

/// An ordered, validated set of levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StyleRepr", into = "Vec<LevelDefinition>")]
pub struct Style {
    levels: Vec<LevelDefinition>,
    #[serde(skip)]
    by_name: HashMap<String, usize>,
    #[serde(skip)]
    default_index: usize,
}

/// Styles are configured either by preset name or as a level list
#[derive(Deserialize)]
#[serde(untagged)]
enum StyleRepr {
    Preset(String),
    Levels(Vec<LevelDefinition>),
}

impl TryFrom<StyleRepr> for Style {
    type Error = LoggerError;

    fn try_from(repr: StyleRepr) -> Result<Self> {
        match repr {
            StyleRepr::Preset(name) => Style::preset(&name)
                .ok_or_else(|| LoggerError::config("levels", format!("unknown style '{}'", name))),
            StyleRepr::Levels(levels) => Style::new(levels),
        }
    }
}

impl From<Style> for Vec<LevelDefinition> {
    fn from(style: Style) -> Self {
        style.levels
    }
}

impl Style {
    /// Build a style, validating names and the default flag
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self> {
        if levels.is_empty() {
            return Err(LoggerError::config("levels", "a style needs at least one level"));
        }

        let mut by_name = HashMap::with_capacity(levels.len());
        for (index, level) in levels.iter().enumerate() {
            if by_name.insert(level.name.clone(), index).is_some() {
                return Err(LoggerError::config(
                    "levels",
                    format!("duplicate level '{}'", level.name),
                ));
            }
        }

        let defaults: Vec<usize> = levels
            .iter()
            .enumerate()
            .filter(|(_, level)| level.is_default)
            .map(|(index, _)| index)
            .collect();
        if defaults.len() > 1 {
            return Err(LoggerError::config(
                "levels",
                "more than one level is flagged as default",
            ));
        }

        Ok(Self {
            default_index: defaults.first().copied().unwrap_or(0),
            levels,
            by_name,
        })
    }

    /// Look up a preset by name (case-insensitive)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_style()),
            "classic" => Some(Self::classic()),
            "simple" => Some(Self::simple()),
            "trafficlights" | "traffic_lights" => Some(Self::traffic_lights()),
            _ => None,
        }
    }

    pub fn resolve(&self, name: &str) -> Result<&LevelDefinition> {
        self.index_of(name)
            .map(|index| &self.levels[index])
            .ok_or_else(|| LoggerError::unknown_level(name))
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Distance from the level to the verbose end, counting the level itself.
    ///
    /// The most suppressible level has rank `len()`, the last level rank 1, so
    /// a sink with threshold `t` shows exactly the levels with rank `<= t`.
    pub fn rank_of(&self, name: &str) -> Result<usize> {
        self.index_of(name)
            .map(|index| self.rank_at(index))
            .ok_or_else(|| LoggerError::unknown_level(name))
    }

    pub fn rank_at(&self, index: usize) -> usize {
        self.levels.len().saturating_sub(index)
    }

    /// The level flagged default, else the first one
    pub fn default_level(&self) -> &LevelDefinition {
        &self.levels[self.default_index]
    }

    pub fn default_index(&self) -> usize {
        self.default_index
    }

    /// The most suppressible level (index 0)
    pub fn most_verbose(&self) -> &LevelDefinition {
        &self.levels[0]
    }

    pub fn get(&self, index: usize) -> Option<&LevelDefinition> {
        self.levels.get(index)
    }

    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Built-in style with bracketed symbols
    pub fn default_style() -> Self {
        use LevelColor::*;
        Self::from_table(&[
            ("debug", "[🐛]", Magenta, true, false, false),
            ("verbose", "[…]", Gray, false, false, false),
            ("log", "[»]", White, false, false, true),
            ("info", "[i]", Blue, true, false, false),
            ("success", "[✓]", Green, true, false, false),
            ("warn", "[!]", Yellow, true, true, false),
            ("error", "[❌]", Red, true, true, false),
        ])
    }

    /// Three-character ASCII symbols
    pub fn classic() -> Self {
        use LevelColor::*;
        Self::from_table(&[
            ("debug", "[d]", Magenta, true, false, false),
            ("verbose", "[…]", Gray, false, false, false),
            ("log", "   ", White, false, false, true),
            ("info", "[i]", Blue, true, false, false),
            ("success", "[s]", Green, true, false, false),
            ("warn", "[?]", Yellow, true, true, false),
            ("error", "[!]", Red, true, true, false),
        ])
    }

    /// Right-aligned level labels
    pub fn simple() -> Self {
        use LevelColor::*;
        Self::from_table(&[
            ("debug", "   debug:", Magenta, true, false, false),
            ("verbose", " verbose:", Gray, false, false, false),
            ("log", "     log:", White, true, false, true),
            ("info", "    info:", Blue, true, false, false),
            ("success", " success:", Green, true, false, false),
            ("warn", " warning:", Yellow, true, true, false),
            ("error", "   error:", Red, true, true, false),
        ])
    }

    /// Colored blocks instead of symbols
    pub fn traffic_lights() -> Self {
        use LevelColor::*;
        Self::from_table(&[
            ("debug", "  ", BgMagenta, true, false, false),
            ("verbose", "……", Gray, false, false, false),
            ("log", "  ", White, false, false, true),
            ("info", "  ", BgBlue, true, false, false),
            ("success", "  ", BgGreen, true, false, false),
            ("warn", "  ", BgYellow, true, true, false),
            ("error", "  ", BgRed, true, true, false),
        ])
    }

    // Presets are known-valid, so building them skips `new`'s checks.
    fn from_table(table: &[(&str, &str, LevelColor, bool, bool, bool)]) -> Self {
        let levels: Vec<LevelDefinition> = table
            .iter()
            .map(|&(name, symbol, color, bold, is_error, is_default)| LevelDefinition {
                name: name.to_string(),
                symbol: symbol.to_string(),
                color,
                bold,
                is_error,
                is_default,
            })
            .collect();
        let by_name = levels
            .iter()
            .enumerate()
            .map(|(index, level)| (level.name.clone(), index))
            .collect();
        let default_index = levels.iter().position(|level| level.is_default).unwrap_or(0);

        Self {
            levels,
            by_name,
            default_index,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::default_style()
    }
}
