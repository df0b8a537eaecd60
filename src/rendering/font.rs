use super::texture::Texture;
use crate::error::RenderError;
use crate::glm;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;

/// rendering metrics and atlas location of one character
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub id: u32,
    pub character: char,
    /// pixel rectangle in the atlas
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub x_advance: f32,
}

/// horizontal spacing adjustment between two glyphs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kerning {
    pub first: u32,
    pub second: u32,
    pub amount: f32,
}

/// font-wide metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// native size the glyph metrics were generated for
    pub size: f32,
    /// declared atlas width in pixels
    pub atlas_width: f32,
    /// declared atlas height in pixels
    pub atlas_height: f32,
}

/// glyph and kerning tables of a bitmap font atlas
#[derive(Debug, Clone)]
pub struct FontData {
    metrics: FontMetrics,
    glyphs: Vec<Glyph>,
    kernings: Vec<Kerning>,
    glyph_lookup: HashMap<char, usize>,
    kerning_lookup: HashMap<(u32, u32), f32>,
}

impl FontData {
    /// creates the font tables (for duplicate entries the first one in table order is used)
    pub fn new(metrics: FontMetrics, glyphs: Vec<Glyph>, kernings: Vec<Kerning>) -> Self {
        let mut glyph_lookup = HashMap::with_capacity(glyphs.len());
        for (i, glyph) in glyphs.iter().enumerate() {
            glyph_lookup.entry(glyph.character).or_insert(i);
        }
        let mut kerning_lookup = HashMap::with_capacity(kernings.len());
        for kerning in kernings.iter() {
            kerning_lookup
                .entry((kerning.first, kerning.second))
                .or_insert(kerning.amount);
        }

        Self {
            metrics,
            glyphs,
            kernings,
            glyph_lookup,
            kerning_lookup,
        }
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn kernings(&self) -> &[Kerning] {
        &self.kernings
    }

    /// finds the glyph for a character
    pub fn glyph(&self, character: char) -> Option<&Glyph> {
        self.glyph_lookup.get(&character).map(|&i| &self.glyphs[i])
    }

    /// finds the kerning amount between two glyph ids
    pub fn kerning(&self, first: u32, second: u32) -> Option<f32> {
        self.kerning_lookup.get(&(first, second)).copied()
    }

    /// shapes a string into positioned glyphs
    ///
    /// Kerning counts into the total width once per kerned pair. On placement the adjustment is
    /// keyed by glyph id: once a glyph was kerned anywhere in the string (the last pair wins),
    /// every occurrence of it shifts the cursor.
    pub fn layout(&self, text: &str, size: f32, align: TextAlign) -> TextLayout<'_> {
        let scale = size / self.metrics.size;
        let height = self.metrics.size * scale;

        let mut resolved: Vec<&Glyph> = Vec::with_capacity(text.len());
        let mut kerned: HashMap<u32, f32> = HashMap::new();
        let mut width = 0.0;
        let mut prev_id: Option<u32> = None;
        for character in text.chars() {
            let Some(glyph) = self.glyph(character) else {
                log::debug!("no glyph for {character:?}, skipping it");
                continue;
            };
            if let Some(amount) = prev_id.and_then(|prev| self.kerning(prev, glyph.id)) {
                width += amount * scale;
                kerned.insert(glyph.id, amount);
            }
            width += glyph.x_advance * scale;
            prev_id = Some(glyph.id);
            resolved.push(glyph);
        }

        let mut cursor = glm::vec2(
            align.horizontal.offset(width),
            align.vertical.offset(height),
        );
        let glyphs = resolved
            .into_iter()
            .map(|glyph| {
                if let Some(amount) = kerned.get(&glyph.id) {
                    cursor.x += amount * scale;
                }
                let placed = PlacedGlyph {
                    glyph,
                    offset: cursor,
                };
                cursor.x += glyph.x_advance * scale;
                placed
            })
            .collect();

        TextLayout {
            glyphs,
            width,
            height,
            scale,
            metrics: self.metrics,
        }
    }

    /// width and height of the text block at the given size
    pub fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        let layout = self.layout(text, size, TextAlign::default());
        (layout.width, layout.height)
    }
}

/// a glyph with its cursor position relative to the text anchor
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph<'a> {
    pub glyph: &'a Glyph,
    /// pen position including kerning and alignment offsets
    pub offset: glm::Vec2,
}

/// result of shaping a string
#[derive(Debug, Clone)]
pub struct TextLayout<'a> {
    pub glyphs: Vec<PlacedGlyph<'a>>,
    /// total advance including kerning
    pub width: f32,
    pub height: f32,
    /// requested size divided by the native font size
    pub scale: f32,
    metrics: FontMetrics,
}

impl TextLayout<'_> {
    /// quad corners of a placed glyph anchored at ``pos``
    /// (order: top-left, top-right, bottom-right, bottom-left)
    pub fn corners(&self, placed: &PlacedGlyph, pos: &glm::Vec2) -> [glm::Vec2; 4] {
        let glyph = placed.glyph;
        let origin = pos + placed.offset;
        let left = origin.x + glyph.x_offset * self.scale;
        let right = origin.x + (glyph.width + glyph.x_offset) * self.scale;
        let top = origin.y + glyph.y_offset * self.scale;
        let bottom = origin.y + (glyph.height + glyph.y_offset) * self.scale;
        [
            glm::vec2(left, top),
            glm::vec2(right, top),
            glm::vec2(right, bottom),
            glm::vec2(left, bottom),
        ]
    }

    /// atlas uv coordinates of a placed glyph in corner order
    pub fn uvs(&self, placed: &PlacedGlyph) -> [glm::Vec2; 4] {
        let glyph = placed.glyph;
        let (w, h) = (self.metrics.atlas_width, self.metrics.atlas_height);
        let left = glyph.x / w;
        let right = (glyph.x + glyph.width) / w;
        let top = glyph.y / h;
        let bottom = (glyph.y + glyph.height) / h;
        [
            glm::vec2(left, top),
            glm::vec2(right, top),
            glm::vec2(right, bottom),
            glm::vec2(left, bottom),
        ]
    }
}

/// a font atlas texture together with its metrics
pub struct Font {
    texture: Box<dyn Texture>,
    pub data: FontData,
}

impl Font {
    pub fn new(texture: Box<dyn Texture>, data: FontData) -> Self {
        Self { texture, data }
    }
}

impl Texture for Font {
    fn name(&self) -> &str {
        self.texture.name()
    }

    fn bind(&self, slot: u32) -> Result<(), RenderError> {
        self.texture.bind(slot)
    }
}

/// alignment of a text block relative to its anchor along one axis
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    /// offset of the block start for a block of the given extent
    pub fn offset(self, extent: f32) -> f32 {
        match self {
            Align::Start => 0.0,
            Align::Center => -extent / 2.0,
            Align::End => -extent,
        }
    }
}

impl FromStr for Align {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Align::Start),
            "center" => Ok(Align::Center),
            "end" => Ok(Align::End),
            _ => Err(RenderError::InvalidAlignment(s.to_string())),
        }
    }
}

impl Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Align::Start => "start",
            Align::Center => "center",
            Align::End => "end",
        })
    }
}

/// horizontal and vertical text alignment, written as ``"<horizontal>-<vertical>"``
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TextAlign {
    pub horizontal: Align,
    pub vertical: Align,
}

impl TextAlign {
    pub const fn new(horizontal: Align, vertical: Align) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl FromStr for TextAlign {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (horizontal, vertical) = s
            .split_once('-')
            .ok_or_else(|| RenderError::InvalidAlignment(s.to_string()))?;
        let parse = |token: &str| {
            token
                .parse::<Align>()
                .map_err(|_| RenderError::InvalidAlignment(s.to_string()))
        };
        Ok(Self::new(parse(horizontal)?, parse(vertical)?))
    }
}

impl Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.horizontal, self.vertical)
    }
}
