//! Colors and the classification → color table.

use crate::classification::HighlightType;
use crate::error::ColoringError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGBA color.
///
/// Serialized as a hex string: `"#RRGGBB"` or `"#RRGGBBAA"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba {
    /// Loud fallback for classifications the scheme has no color for.
    ///
    /// Unmapped classifications show up bright red instead of silently keeping the default text
    /// color, so gaps in a scheme are visible during development.
    pub const FALLBACK: Self = Self::rgb(0xFF, 0x00, 0x00);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Color from RGBA channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl FromStr for Rgba {
    type Err = ColoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColoringError::InvalidColor(s.to_string());

        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 0xFF };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColoringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 0xFF {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

/// Table from classification to foreground color.
///
/// Read at ingestion time only: a decoration keeps the color resolved when it was created, so
/// replacing the scheme affects the next highlighting pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    /// [`HighlightType::Comment`].
    pub comment: Rgba,
    /// [`HighlightType::Identifier`].
    pub identifier: Rgba,
    /// [`HighlightType::Keyword`].
    pub keyword: Rgba,
    /// [`HighlightType::Literal`].
    pub literal: Rgba,
    /// [`HighlightType::NumericLiteral`].
    pub numeric_literal: Rgba,
    /// [`HighlightType::Punctuation`].
    pub punctuation: Rgba,
    /// [`HighlightType::InterfaceName`].
    pub interface_type: Rgba,
    /// [`HighlightType::ClassName`].
    #[serde(rename = "type")]
    pub type_name: Rgba,
    /// [`HighlightType::CallExpression`].
    pub call_expression: Rgba,
    /// [`HighlightType::EnumTypeName`].
    pub enum_type: Rgba,
    /// [`HighlightType::Operator`].
    pub operator: Rgba,
    /// [`HighlightType::StructName`].
    pub struct_name: Rgba,
    /// [`HighlightType::DelegateName`].
    pub delegate_name: Rgba,
}

impl ColorScheme {
    /// Parse a scheme from JSON. Missing entries keep their default color.
    pub fn from_json(json: &str) -> Result<Self, ColoringError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve the foreground color for a classification.
    ///
    /// - [`HighlightType::Unnecessary`] → `None` (keep the current color; only fade).
    /// - classifications without an entry in the scheme → [`Rgba::FALLBACK`].
    pub fn foreground(&self, classification: HighlightType) -> Option<Rgba> {
        let color = match classification {
            HighlightType::Unnecessary => return None,
            HighlightType::DelegateName => self.delegate_name,
            HighlightType::Comment => self.comment,
            HighlightType::Identifier => self.identifier,
            HighlightType::Keyword => self.keyword,
            HighlightType::Literal => self.literal,
            HighlightType::NumericLiteral => self.numeric_literal,
            HighlightType::Punctuation => self.punctuation,
            HighlightType::InterfaceName => self.interface_type,
            HighlightType::ClassName => self.type_name,
            HighlightType::CallExpression => self.call_expression,
            HighlightType::EnumTypeName => self.enum_type,
            HighlightType::Operator => self.operator,
            HighlightType::StructName => self.struct_name,
            HighlightType::None | HighlightType::Custom(_) => Rgba::FALLBACK,
        };
        Some(color)
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            comment: Rgba::rgb(0x57, 0xA6, 0x4A),
            identifier: Rgba::rgb(0xDC, 0xDC, 0xDC),
            keyword: Rgba::rgb(0x56, 0x9C, 0xD6),
            literal: Rgba::rgb(0xD6, 0x9D, 0x85),
            numeric_literal: Rgba::rgb(0xB5, 0xCE, 0xA8),
            punctuation: Rgba::rgb(0x80, 0x80, 0x80),
            interface_type: Rgba::rgb(0xB8, 0xD7, 0xA3),
            type_name: Rgba::rgb(0x4E, 0xC9, 0xB0),
            call_expression: Rgba::rgb(0xDC, 0xDC, 0xAA),
            enum_type: Rgba::rgb(0xB8, 0xD7, 0xA3),
            operator: Rgba::rgb(0xB4, 0xB4, 0xB4),
            struct_name: Rgba::rgb(0x86, 0xC6, 0x91),
            delegate_name: Rgba::rgb(0x4E, 0xC9, 0xB0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(
            "#569CD6".parse::<Rgba>().unwrap(),
            Rgba::rgb(0x56, 0x9C, 0xD6)
        );
        assert_eq!(
            "#ff000080".parse::<Rgba>().unwrap(),
            Rgba::new(0xFF, 0x00, 0x00, 0x80)
        );
        assert!("569CD6".parse::<Rgba>().is_err());
        assert!("#12345".parse::<Rgba>().is_err());
        assert!("#GG0000".parse::<Rgba>().is_err());
        assert!("#ü0000".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_display_round_trips_alpha() {
        assert_eq!(Rgba::rgb(1, 2, 3).to_string(), "#010203");
        assert_eq!(Rgba::new(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test]
    fn test_unnecessary_has_no_foreground() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.foreground(HighlightType::Unnecessary), None);
    }

    #[test]
    fn test_mapped_classifications() {
        let scheme = ColorScheme::default();
        assert_eq!(
            scheme.foreground(HighlightType::Keyword),
            Some(scheme.keyword)
        );
        assert_eq!(
            scheme.foreground(HighlightType::ClassName),
            Some(scheme.type_name)
        );
        assert_eq!(
            scheme.foreground(HighlightType::InterfaceName),
            Some(scheme.interface_type)
        );
        assert_eq!(
            scheme.foreground(HighlightType::DelegateName),
            Some(scheme.delegate_name)
        );
    }

    #[test]
    fn test_unmapped_classification_is_loud() {
        let scheme = ColorScheme::default();
        assert_eq!(
            scheme.foreground(HighlightType::Custom(77)),
            Some(Rgba::FALLBACK)
        );
    }

    #[test]
    fn test_scheme_from_partial_json() {
        let scheme =
            ColorScheme::from_json(r##"{ "keyword": "#FF00FF", "type": "#010203" }"##).unwrap();
        assert_eq!(scheme.keyword, Rgba::rgb(0xFF, 0x00, 0xFF));
        assert_eq!(scheme.type_name, Rgba::rgb(1, 2, 3));
        assert_eq!(scheme.comment, ColorScheme::default().comment);
    }

    #[test]
    fn test_scheme_rejects_bad_color() {
        let err = ColorScheme::from_json(r#"{ "keyword": "blue" }"#).unwrap_err();
        assert!(matches!(err, ColoringError::Config(_)));
    }
}
