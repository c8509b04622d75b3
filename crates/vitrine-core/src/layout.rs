//! Size-dependent scene parameters.

/// Terminals narrower than this use the compact profile.
const COMPACT_BREAKPOINT: u16 = 100;

/// Scene layout chosen from the terminal width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutProfile {
    #[default]
    Desktop,
    Compact,
}

impl LayoutProfile {
    pub fn from_width(columns: u16) -> Self {
        if columns < COMPACT_BREAKPOINT {
            LayoutProfile::Compact
        } else {
            LayoutProfile::Desktop
        }
    }

    /// Number of floating code labels.
    pub fn particle_count(self) -> usize {
        match self {
            LayoutProfile::Desktop => 150,
            LayoutProfile::Compact => 80,
        }
    }

    pub fn avatar_scale(self) -> f32 {
        match self {
            LayoutProfile::Desktop => 2.5,
            LayoutProfile::Compact => 2.0,
        }
    }

    /// Vertical offset of the avatar group in world units.
    pub fn avatar_base_y(self) -> f32 {
        match self {
            LayoutProfile::Desktop => -1.5,
            LayoutProfile::Compact => -2.0,
        }
    }

    pub fn section_model_scale(self) -> f32 {
        match self {
            LayoutProfile::Desktop => 1.2,
            LayoutProfile::Compact => 0.8,
        }
    }

    /// Vertical field of view in degrees for section model cameras.
    pub fn section_fov(self) -> f32 {
        match self {
            LayoutProfile::Desktop => 50.0,
            LayoutProfile::Compact => 60.0,
        }
    }
}
