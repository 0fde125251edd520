use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Horizontal alignment of text inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
    Center,
    Justify,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Center => "center",
            Alignment::Justify => "justify",
        }
    }
}

/// Placement of a whole block (image, table) within the page width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockAlignment {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Solid,
}

impl BorderStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderCollapse {
    Collapse,
    Separate,
}

impl BorderCollapse {
    pub fn as_str(self) -> &'static str {
        match self {
            BorderCollapse::Collapse => "collapse",
            BorderCollapse::Separate => "separate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Inline,
    Block,
    #[serde(rename = "none")]
    Hidden,
}

impl DisplayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Inline => "inline",
            DisplayMode::Block => "block",
            DisplayMode::Hidden => "none",
        }
    }
}

/// Line spacing multiple. Accepted from YAML either as a string (`"1.5"`)
/// or as a bare number (`1.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSpacing {
    Single,
    OneAndHalf,
    Double,
}

impl LineSpacing {
    pub fn as_str(self) -> &'static str {
        match self {
            LineSpacing::Single => "1",
            LineSpacing::OneAndHalf => "1.5",
            LineSpacing::Double => "2",
        }
    }

    fn from_text(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(LineSpacing::Single),
            "1.5" => Some(LineSpacing::OneAndHalf),
            "2" => Some(LineSpacing::Double),
            _ => None,
        }
    }
}

impl Serialize for LineSpacing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LineSpacing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LineSpacingVisitor;

        impl Visitor<'_> for LineSpacingVisitor {
            type Value = LineSpacing;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("one of 1, 1.5 or 2")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<LineSpacing, E> {
                LineSpacing::from_text(v).ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<LineSpacing, E> {
                match v {
                    1 => Ok(LineSpacing::Single),
                    2 => Ok(LineSpacing::Double),
                    _ => Err(E::invalid_value(Unexpected::Unsigned(v), &self)),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<LineSpacing, E> {
                match v {
                    1 => Ok(LineSpacing::Single),
                    2 => Ok(LineSpacing::Double),
                    _ => Err(E::invalid_value(Unexpected::Signed(v), &self)),
                }
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<LineSpacing, E> {
                if v == 1.0 {
                    Ok(LineSpacing::Single)
                } else if v == 1.5 {
                    Ok(LineSpacing::OneAndHalf)
                } else if v == 2.0 {
                    Ok(LineSpacing::Double)
                } else {
                    Err(E::invalid_value(Unexpected::Float(v), &self))
                }
            }
        }

        deserializer.deserialize_any(LineSpacingVisitor)
    }
}

/// Visual and layout attributes of one node kind.
///
/// Every field is optional: an unset field means "not specified here".
/// [`StyleRecord::merge_from`] fills unset fields from another record,
/// which is how overrides fall back to a kind's built-in default.
///
/// Fields that only extension kinds understand (for example the heading
/// text of a generated references section) are kept in [`StyleRecord::extra`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// Font for Latin script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en_font: Option<String>,
    /// Font for CJK script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cn_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    /// Caption or label template, e.g. `"{s1}.{s2} {text}"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_line_indent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing_type: Option<LineSpacing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_alignment: Option<BlockAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_collapse: Option<BorderCollapse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_wrap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_line_numbers: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

macro_rules! fill_unset {
    ($target:expr, $source:expr, $($field:ident),+ $(,)?) => {
        $(
            if $target.$field.is_none() {
                $target.$field = $source.$field.clone();
            }
        )+
    };
}

impl StyleRecord {
    /// Copies every field that is unset here from `default`.
    ///
    /// Fields already set are left alone, so merging is idempotent.
    pub fn merge_from(&mut self, default: &StyleRecord) {
        fill_unset!(
            self,
            default,
            color,
            font_size,
            en_font,
            cn_font,
            bold,
            italic,
            format,
            background,
            width,
            height,
            first_line_indent,
            line_spacing,
            line_spacing_type,
            alignment,
            block_alignment,
            border_width,
            border_style,
            border_color,
            border_collapse,
            word_wrap,
            display,
            margin,
            padding,
            show_line_numbers,
        );
        for (key, value) in &default.extra {
            self.extra
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }

    pub fn merged(mut self, default: &StyleRecord) -> Self {
        self.merge_from(default);
        self
    }

    /// Reads a string-valued extension field.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(serde_yaml::Value::as_str)
    }

    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers.unwrap_or(false)
    }
}
