//! Where fonts come from: faces, style matching and fallback for wfsprite
//!
//! A glyph batch asks for a family plus bold/italic flags. The resolver finds
//! the closest installed face, reports what still has to be synthesized, and
//! degrades to a system face with a warning when the family is unavailable.
//! Remote stylesheet URLs are understood too (see [`remote`]).

pub mod remote;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use read_fonts::{FontRef as ReadFontRef, TableProvider};

use wfsprite_core::{
    error::{FontLoadError, Result},
    traits::FontRef as SpriteFontRef,
    types::FaceSynthesis,
};

/// Weight requested for bold text
pub const BOLD_WEIGHT: u16 = 700;

/// Faces at or above this weight count as real bold faces
const BOLD_THRESHOLD: u16 = 600;

/// A font that's been brought into memory, ready to shape text
///
/// Stores the raw font data and creates `FontRef` on-demand for parsing.
/// For TTC collections, the `face_index` specifies which face to use.
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    family: Option<String>,
    axis_tags: Vec<String>,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("family", &self.family)
            .field("face_index", &self.face_index)
            .field("units_per_em", &self.units_per_em)
            .field("axis_tags", &self.axis_tags)
            .finish()
    }
}

impl Font {
    /// Opens a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read(path.as_ref())
            .map_err(|_| FontLoadError::FileNotFound(path.as_ref().display().to_string()))?;
        Self::from_data_index(data, 0)
    }

    /// Turns raw font bytes into something we can work with
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        let axis_tags = font_ref
            .fvar()
            .ok()
            .and_then(|fvar| fvar.axes().ok())
            .map(|axes| axes.iter().map(|a| a.axis_tag().to_string()).collect())
            .unwrap_or_default();

        Ok(Font {
            data,
            face_index,
            units_per_em,
            family: None,
            axis_tags,
        })
    }

    fn with_family(mut self, family: Option<String>) -> Self {
        self.family = family;
        self
    }

    /// Returns the face index for TTC collections (0 for single fonts)
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }

    /// Finds which glyph draws this character
    pub fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
    }

    /// Advance of this glyph in font units
    pub fn advance_width(&self, glyph_id: u32) -> f32 {
        self.font_ref()
            .and_then(|font| {
                let hmtx = font.hmtx().ok()?;
                use read_fonts::types::GlyphId;
                let advance = hmtx.advance(GlyphId::new(glyph_id))?;
                Some(advance as f32)
            })
            .unwrap_or(self.units_per_em as f32 / 2.0)
    }

    /// Whether the face has a variation axis with this tag
    pub fn has_axis(&self, tag: &str) -> bool {
        self.axis_tags.iter().any(|t| t == tag)
    }
}

impl SpriteFontRef for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        self.glyph_id(ch)
    }

    fn advance_width(&self, glyph_id: u32) -> f32 {
        self.advance_width(glyph_id)
    }

    fn axis_tags(&self) -> Vec<String> {
        self.axis_tags.clone()
    }

    fn family_name(&self) -> Option<String> {
        self.family.clone()
    }
}

/// Family and style flags a glyph batch asks for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleRequest {
    /// Family name, or an `http(s)://` stylesheet URL
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl StyleRequest {
    pub fn new(family: impl Into<String>, bold: bool, italic: bool) -> Self {
        Self {
            family: family.into(),
            bold,
            italic,
        }
    }
}

/// The face a request resolved to
#[derive(Debug, Clone)]
pub struct ResolvedFont {
    pub font: Arc<Font>,
    /// Family name actually used
    pub family: String,
    /// True when the requested family was unavailable
    pub is_fallback: bool,
    /// Bold was requested, the face is lighter but has a `wght` axis
    pub bold_via_axis: bool,
    /// What the rasterizer still has to fake
    pub synthesis: FaceSynthesis,
}

impl ResolvedFont {
    /// Variations for the shaper and outline loader
    ///
    /// Bold on a variable face sets `wght=700` unless the user pinned `wght`.
    pub fn variations(
        &self,
        requested: &[(String, f32)],
        weight_pinned: bool,
    ) -> Vec<(String, f32)> {
        let mut variations = requested.to_vec();
        if self.bold_via_axis && !weight_pinned {
            variations.retain(|(tag, _)| tag != "wght");
            variations.push(("wght".to_string(), BOLD_WEIGHT as f32));
        }
        variations
    }
}

/// Looks up faces in a `fontdb` database, with caching and fallback
pub struct FontResolver {
    db: Database,
    cache: HashMap<StyleRequest, ResolvedFont>,
    fetch_remote: bool,
}

impl FontResolver {
    /// Resolver over every font installed on the system
    pub fn system() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} system font faces", db.len());
        Self::with_database(db)
    }

    /// Resolver over a prepared database
    pub fn with_database(db: Database) -> Self {
        Self {
            db,
            cache: HashMap::new(),
            fetch_remote: cfg!(feature = "remote"),
        }
    }

    /// Allow or forbid network access for stylesheet URLs
    pub fn set_fetch_remote(&mut self, enabled: bool) {
        self.fetch_remote = enabled;
    }

    /// Adds a font file to the database
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.db
            .load_font_file(path)
            .map_err(|_| FontLoadError::FileNotFound(path.display().to_string()))?;
        self.cache.clear();
        Ok(())
    }

    /// Adds font bytes to the database
    pub fn load_font_data(&mut self, data: Vec<u8>) -> Result<()> {
        Font::from_data(data.clone())?;
        self.db.load_font_data(data);
        self.cache.clear();
        Ok(())
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Find the face for a request, falling back to a system face
    ///
    /// Only an empty database is an error.
    pub fn resolve(&mut self, request: &StyleRequest) -> Result<ResolvedFont> {
        if let Some(hit) = self.cache.get(request) {
            return Ok(hit.clone());
        }

        let family = if remote::is_remote(&request.family) {
            self.load_remote(&request.family)
        } else {
            request.family.trim().to_string()
        };

        let weight = if request.bold { BOLD_WEIGHT } else { 400 };
        let (id, is_fallback) = match self.find_face(Family::Name(&family), weight, request.italic)
        {
            Some(id) => (id, false),
            None => {
                log::warn!("Font family '{family}' unavailable, falling back to a system font");
                let id = self
                    .find_face(Family::SansSerif, weight, request.italic)
                    .or_else(|| self.db.faces().next().map(|face| face.id))
                    .ok_or_else(|| FontLoadError::SystemFontNotFound(family.clone()))?;
                (id, true)
            },
        };

        let resolved = self.build(id, request, is_fallback)?;
        log::debug!(
            "Resolved '{}' (bold={}, italic={}) to '{}'",
            request.family,
            request.bold,
            request.italic,
            resolved.family
        );
        self.cache.insert(request.clone(), resolved.clone());
        Ok(resolved)
    }

    fn load_remote(&mut self, url: &str) -> String {
        let family = remote::family_from_url(url).unwrap_or_else(|| url.to_string());
        if !self.fetch_remote {
            log::warn!("Remote fonts disabled, using '{family}' from installed fonts");
            return family;
        }
        match remote::fetch_font(url) {
            Ok(data) => match Font::from_data(data.clone()) {
                Ok(_) => {
                    self.db.load_font_data(data);
                    log::debug!("Loaded remote font for '{family}'");
                },
                Err(e) => log::warn!("Remote font for '{family}' unusable ({e}), falling back"),
            },
            Err(e) => log::warn!("Remote font load failed ({e}), falling back to '{family}'"),
        }
        family
    }

    fn find_face(&self, family: Family<'_>, weight: u16, italic: bool) -> Option<fontdb::ID> {
        let query = Query {
            families: &[family],
            weight: Weight(weight),
            style: if italic { Style::Italic } else { Style::Normal },
            stretch: Stretch::Normal,
        };
        if let Some(id) = self.db.query(&query) {
            return Some(id);
        }

        if italic {
            let oblique_query = Query {
                families: &[family],
                weight: Weight(weight),
                style: Style::Oblique,
                stretch: Stretch::Normal,
            };
            return self.db.query(&oblique_query);
        }
        None
    }

    fn build(
        &self,
        id: fontdb::ID,
        request: &StyleRequest,
        is_fallback: bool,
    ) -> Result<ResolvedFont> {
        let info = self
            .db
            .face(id)
            .ok_or_else(|| FontLoadError::SystemFontNotFound(request.family.clone()))?;
        let family = info
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| request.family.clone());
        let face_weight = info.weight.0;
        let face_italic = info.style != Style::Normal;

        let font = self
            .db
            .with_face_data(id, |data, index| Font::from_data_index(data.to_vec(), index))
            .ok_or(FontLoadError::InvalidData)??
            .with_family(Some(family.clone()));

        let lighter_than_bold = request.bold && face_weight < BOLD_THRESHOLD;
        let bold_via_axis = lighter_than_bold && font.has_axis("wght");

        Ok(ResolvedFont {
            font: Arc::new(font),
            family,
            is_fallback,
            bold_via_axis,
            synthesis: FaceSynthesis {
                bold: lighter_than_bold && !bold_via_axis,
                italic: request.italic && !face_italic,
            },
        })
    }
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::with_database(Database::new())
    }
}
