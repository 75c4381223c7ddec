//! Fixed palette of safety-themed variants shared by the indicator, particles
//! and floating ornaments.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// Relative glyph size used by painters.
    pub fn factor(self) -> f32 {
        match self {
            SizeClass::Small => 0.8,
            SizeClass::Medium => 1.0,
            SizeClass::Large => 1.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Variant {
    pub name: &'static str,
    pub rgb: [u8; 3],
    pub glyph: char,
    pub size: SizeClass,
}

pub static VARIANTS: [Variant; 7] = [
    Variant { name: "hardhat", rgb: [0xf5, 0x9e, 0x0b], glyph: '⛑', size: SizeClass::Large },
    Variant { name: "shield", rgb: [0x10, 0xb9, 0x81], glyph: '⛨', size: SizeClass::Medium },
    Variant { name: "eye", rgb: [0x3b, 0x82, 0xf6], glyph: '◉', size: SizeClass::Small },
    Variant { name: "zap", rgb: [0x8b, 0x5c, 0xf6], glyph: '⚡', size: SizeClass::Large },
    Variant { name: "alert", rgb: [0xef, 0x44, 0x44], glyph: '⚠', size: SizeClass::Medium },
    Variant { name: "activity", rgb: [0x06, 0xb6, 0xd4], glyph: '∿', size: SizeClass::Small },
    Variant { name: "trending", rgb: [0x84, 0xcc, 0x16], glyph: '↗', size: SizeClass::Large },
];

// Sparkle colours: yellow, cyan, pink
pub const SPARKLE_RGB: [[u8; 3]; 3] = [[0xfa, 0xcc, 0x15], [0x06, 0xb6, 0xd4], [0xf4, 0x72, 0xb6]];

// Safety zone rings, outermost first: orange, green, blue
pub const SAFETY_ZONE_RGB: [[u8; 3]; 3] = [[0xfb, 0x92, 0x3c], [0x4a, 0xde, 0x80], [0x60, 0xa5, 0xfa]];

#[derive(Clone, Copy, Debug)]
pub struct Palette {
    variants: &'static [Variant],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            variants: &VARIANTS,
        }
    }
}

impl Palette {
    /// Build a palette over a custom variant table. An empty table falls back
    /// to the default one so variant indices always resolve.
    pub fn new(variants: &'static [Variant]) -> Self {
        if variants.is_empty() {
            Self::default()
        } else {
            Self { variants }
        }
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Look up a variant, wrapping out-of-range indices.
    pub fn get(&self, index: usize) -> &Variant {
        &self.variants[index % self.variants.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter()
    }
}
