// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Metrics, colors, and font settings for the tree view.

use alloc::string::String;

use kurbo::Size;

/// A straight (non-premultiplied) RGBA color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Create a color from its components.
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Slant of a font face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
}

/// Font request handed to a [`TextShaper`](crate::TextShaper).
#[derive(Clone, Debug, PartialEq)]
pub struct FontDesc {
    /// Family name.
    pub family: String,
    /// Size in the same units as layout coordinates.
    pub size: f64,
    /// CSS-style weight, `400` is regular.
    pub weight: u16,
    /// Slant.
    pub style: FontStyle,
    /// BCP 47 locale used for shaping.
    pub locale: String,
}

impl Default for FontDesc {
    fn default() -> Self {
        Self {
            family: String::from("Arial"),
            size: 12.0,
            weight: 400,
            style: FontStyle::Normal,
            locale: String::from("en-us"),
        }
    }
}

/// Layout metrics and colors for a tree view.
///
/// The defaults describe a compact list: 20 unit rows, a 15 unit expander
/// column, and children indented by 10 units.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeStyle {
    /// Height of every node's header row.
    pub header_height: f64,
    /// Height of the text strip centered within the header row.
    pub label_height: f64,
    /// Width of the column holding the expander, left of the label.
    pub expander_column: f64,
    /// Width of the expander's hit box, measured from the column's left edge.
    pub expander_hit_width: f64,
    /// Size of the triangular expander glyph.
    pub glyph_size: Size,
    /// Horizontal offset of a node's children relative to the node.
    pub indent: f64,
    /// Margin between the client area and the tree content.
    pub margin: f64,
    /// Height of the status strip along the bottom of the client area.
    pub status_height: f64,
    /// Height of the text strip centered within the status strip.
    pub status_text_height: f64,
    /// Fill behind the whole client area.
    pub background: Color,
    /// Label and status text.
    pub text_color: Color,
    /// Expander glyph outline.
    pub glyph_color: Color,
    /// Fill of the header row under the pointer.
    pub hover_fill: Color,
    /// Outline around the block of an expanded node's children.
    ///
    /// The block's extent is only known after its children are drawn, so it
    /// is stroked last, around the labels rather than over them.
    pub group_outline: Color,
    /// Separator line above the status strip.
    pub status_line: Color,
    /// Font for labels and status text.
    pub font: FontDesc,
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self {
            header_height: 20.0,
            label_height: 15.0,
            expander_column: 15.0,
            expander_hit_width: 10.0,
            glyph_size: Size::new(8.0, 8.0),
            indent: 10.0,
            margin: 5.0,
            status_height: 20.0,
            status_text_height: 12.0,
            background: Color::WHITE,
            text_color: Color::BLACK,
            glyph_color: Color::BLACK,
            hover_fill: Color::rgba(0.8, 1.0, 0.8, 1.0),
            group_outline: Color::rgba(0.8, 0.8, 1.0, 1.0),
            status_line: Color::BLACK,
            font: FontDesc::default(),
        }
    }
}
