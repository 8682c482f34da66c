//! Materials, textures and the references components hold to them

use std::fmt;

/// Reserved id meaning "use the nearest ancestor's value"
pub const INHERIT_ID: &str = "inherit";

/// Reserved id meaning "no material / no texture"
pub const NONE_ID: &str = "none";

/// Whether `id` is one of the reserved sentinel ids
pub fn is_reserved_id(id: &str) -> bool {
    id == INHERIT_ID || id == NONE_ID
}

/// RGBA colour with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Rgba {
    /// Opaque black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create a colour
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Phong material properties
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material id (`none` for the neutral default)
    pub id: String,
    /// Specular exponent
    pub shininess: f32,
    /// Emission colour
    pub emission: Rgba,
    /// Ambient reflectance
    pub ambient: Rgba,
    /// Diffuse reflectance
    pub diffuse: Rgba,
    /// Specular reflectance
    pub specular: Rgba,
}

impl Material {
    /// Neutral default used for `none` and unresolvable references
    pub fn neutral() -> Self {
        Self {
            id: NONE_ID.to_string(),
            shininess: 10.0,
            emission: Rgba::BLACK,
            ambient: Rgba::new(0.1, 0.1, 0.1, 1.0),
            diffuse: Rgba::new(0.5, 0.5, 0.5, 1.0),
            specular: Rgba::new(0.5, 0.5, 0.5, 1.0),
        }
    }

    /// Whether this is the neutral default
    pub fn is_neutral(&self) -> bool {
        self.id == NONE_ID
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Texture declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    /// Texture id
    pub id: String,
    /// Image file reference, relative to the scene document
    pub file: String,
    /// Default wrap length along S
    pub length_s: f32,
    /// Default wrap length along T
    pub length_t: f32,
}

/// Reference from a component to a material or texture
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AppearanceRef {
    /// Take the nearest ancestor's resolved value
    #[default]
    Inherit,
    /// Explicitly nothing
    None,
    /// A concrete record id
    Explicit(String),
}

impl AppearanceRef {
    /// Decode a raw id, mapping the reserved sentinels
    pub fn from_id(id: &str) -> Self {
        match id {
            INHERIT_ID => Self::Inherit,
            NONE_ID => Self::None,
            other => Self::Explicit(other.to_string()),
        }
    }
}

impl fmt::Display for AppearanceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inherit => f.write_str(INHERIT_ID),
            Self::None => f.write_str(NONE_ID),
            Self::Explicit(id) => f.write_str(id),
        }
    }
}

/// Texture reference plus optional wrap lengths
///
/// Missing lengths mean: the texture's own defaults for an explicit
/// reference, the ancestor's lengths for `inherit`, and 1.0 for `none`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextureRef {
    /// Which texture
    pub reference: AppearanceRef,
    /// Wrap length along S, if declared
    pub length_s: Option<f32>,
    /// Wrap length along T, if declared
    pub length_t: Option<f32>,
}

impl TextureRef {
    /// Reference without explicit lengths
    pub const fn new(reference: AppearanceRef) -> Self {
        Self {
            reference,
            length_s: None,
            length_t: None,
        }
    }

    /// Reference with explicit lengths
    pub const fn with_lengths(reference: AppearanceRef, length_s: f32, length_t: f32) -> Self {
        Self {
            reference,
            length_s: Some(length_s),
            length_t: Some(length_t),
        }
    }
}

/// Concrete appearance after inheritance resolution
///
/// This is what a component draws with: a material value (never a
/// reference), an optional texture and the wrap lengths in effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    /// Resolved material
    pub material: Material,
    /// Resolved texture, `None` when untextured
    pub texture: Option<Texture>,
    /// Wrap length along S
    pub length_s: f32,
    /// Wrap length along T
    pub length_t: f32,
}

impl Appearance {
    /// Neutral material, no texture, unit wrap lengths
    pub fn neutral() -> Self {
        Self {
            material: Material::neutral(),
            texture: None,
            length_s: 1.0,
            length_t: 1.0,
        }
    }

    /// Id of the resolved texture, if any
    pub fn texture_id(&self) -> Option<&str> {
        self.texture.as_ref().map(|texture| texture.id.as_str())
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self::neutral()
    }
}
