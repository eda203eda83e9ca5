//! Page geometry and fit transforms
//!
//! Pages are rendered in a fixed logical coordinate system and mapped onto
//! the physical page rect of the output device. Document export stretches
//! each axis independently so content exactly fills the page; printing uses
//! one scale factor on both axes and centers the result.

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// Logical page size in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// A4 portrait in points
    pub const A4: PageSize = PageSize {
        width: 595.276,
        height: 841.89,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Affine mapping from logical page coordinates onto a physical page rect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTransform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl RenderTransform {
    pub const IDENTITY: RenderTransform = RenderTransform {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Map a logical point to physical coordinates
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.scale_x + self.translate_x,
            y * self.scale_y + self.translate_y,
        )
    }

    /// Scale each axis independently so the logical page exactly fills `target`.
    pub fn stretch_fit(logical: PageSize, target: Rect) -> Self {
        Self {
            scale_x: target.width / logical.width,
            scale_y: target.height / logical.height,
            translate_x: target.x,
            translate_y: target.y,
        }
    }

    /// One scale factor on both axes, times `user_scale`, centered in `target`.
    pub fn uniform_fit_centered(logical: PageSize, target: Rect, user_scale: f32) -> Self {
        let scale =
            (target.width / logical.width).min(target.height / logical.height) * user_scale;
        Self {
            scale_x: scale,
            scale_y: scale,
            translate_x: target.x + (target.width - logical.width * scale) / 2.0,
            translate_y: target.y + (target.height - logical.height * scale) / 2.0,
        }
    }
}

impl Default for RenderTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Print scale tiers offered by the print dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalePreset {
    Reduced75,
    #[default]
    Full100,
    Enlarged125,
}

impl ScalePreset {
    pub fn factor(self) -> f32 {
        match self {
            ScalePreset::Reduced75 => 0.75,
            ScalePreset::Full100 => 1.0,
            ScalePreset::Enlarged125 => 1.25,
        }
    }
}

/// How a logical page is mapped onto the output surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitStrategy {
    /// Independent axes; content exactly fills the page (document export)
    Stretch,
    /// Aspect-preserving scale, centered (printing)
    UniformCentered(ScalePreset),
}

impl FitStrategy {
    pub fn transform(self, logical: PageSize, target: Rect) -> RenderTransform {
        match self {
            FitStrategy::Stretch => RenderTransform::stretch_fit(logical, target),
            FitStrategy::UniformCentered(preset) => {
                RenderTransform::uniform_fit_centered(logical, target, preset.factor())
            }
        }
    }
}
