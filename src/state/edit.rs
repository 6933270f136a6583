/// Edit parameters for the loaded image
///
/// This struct stores all adjustments made to an image. Adjustments are
/// purely view-level: they only affect how the image is displayed, never
/// the decoded pixels themselves.

use std::ops::RangeInclusive;

use thiserror::Error;

use super::data::LoadedImage;
use super::preset::Preset;

/// A single slider-backed adjustment.
///
/// Each variant carries its own domain, step, default, and display unit so
/// that both validation and slider construction are driven from one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Brightness,
    Contrast,
    Saturation,
    Rotation,
    Scale,
}

impl Adjustment {
    /// All adjustments, in the order their sliders appear
    pub const ALL: [Adjustment; 5] = [
        Adjustment::Brightness,
        Adjustment::Contrast,
        Adjustment::Saturation,
        Adjustment::Rotation,
        Adjustment::Scale,
    ];

    /// Valid value domain for this adjustment
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            Adjustment::Brightness | Adjustment::Contrast | Adjustment::Saturation => {
                0.0..=200.0
            }
            Adjustment::Rotation => -180.0..=180.0,
            Adjustment::Scale => 0.1..=3.0,
        }
    }

    /// Slider step size
    pub fn step(self) -> f32 {
        match self {
            Adjustment::Scale => 0.1,
            _ => 1.0,
        }
    }

    /// Value when nothing has been adjusted
    pub fn default_value(self) -> f32 {
        match self {
            Adjustment::Brightness | Adjustment::Contrast | Adjustment::Saturation => 100.0,
            Adjustment::Rotation => 0.0,
            Adjustment::Scale => 1.0,
        }
    }

    /// Human-readable name for the slider label
    pub fn label(self) -> &'static str {
        match self {
            Adjustment::Brightness => "Brightness",
            Adjustment::Contrast => "Contrast",
            Adjustment::Saturation => "Saturation",
            Adjustment::Rotation => "Rotation",
            Adjustment::Scale => "Scale",
        }
    }

    /// Unit suffix shown next to the current value
    pub fn unit(self) -> &'static str {
        match self {
            Adjustment::Brightness | Adjustment::Contrast | Adjustment::Saturation => "%",
            Adjustment::Rotation => "\u{b0}",
            Adjustment::Scale => "x",
        }
    }
}

/// Mirror axis for the flip toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Errors from programmatic edits
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EditError {
    /// The value lies outside the adjustment's declared domain.
    /// Sliders clamp at the widget level, so this only fires for
    /// programmatic callers.
    #[error("{value} is outside the {adjustment:?} range {range:?}", range = .adjustment.range())]
    OutOfRange { adjustment: Adjustment, value: f32 },
}

/// All edit state for the current session
///
/// The image is set once per successful upload; the seven adjustment fields
/// are independently mutable through the controls. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct EditState {
    /// The uploaded image, if any. `None` until the first load succeeds.
    pub image: Option<LoadedImage>,
    /// Brightness in percent, 100 = unchanged
    pub brightness: f32,
    /// Contrast in percent, 100 = unchanged
    pub contrast: f32,
    /// Saturation in percent, 100 = unchanged
    pub saturation: f32,
    /// Rotation in degrees, positive = clockwise
    pub rotation: f32,
    /// Uniform scale multiplier
    pub scale: f32,
    /// Mirror across the vertical axis
    pub flip_x: bool,
    /// Mirror across the horizontal axis
    pub flip_y: bool,
}

impl Default for EditState {
    /// Create a fresh session with default adjustments and no image
    fn default() -> Self {
        Self {
            image: None,
            brightness: Adjustment::Brightness.default_value(),
            contrast: Adjustment::Contrast.default_value(),
            saturation: Adjustment::Saturation.default_value(),
            rotation: Adjustment::Rotation.default_value(),
            scale: Adjustment::Scale.default_value(),
            flip_x: false,
            flip_y: false,
        }
    }
}

impl EditState {
    /// Create a fresh session with default adjustments and no image
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an image has been uploaded yet
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Store a freshly loaded image, replacing any previous one.
    /// Adjustments are deliberately left alone.
    pub fn set_image(&mut self, image: LoadedImage) {
        self.image = Some(image);
    }

    /// Read the current value of one adjustment
    pub fn adjustment(&self, adjustment: Adjustment) -> f32 {
        match adjustment {
            Adjustment::Brightness => self.brightness,
            Adjustment::Contrast => self.contrast,
            Adjustment::Saturation => self.saturation,
            Adjustment::Rotation => self.rotation,
            Adjustment::Scale => self.scale,
        }
    }

    /// Set one adjustment, rejecting values outside its domain.
    /// On error the state is left exactly as it was.
    pub fn set_adjustment(&mut self, adjustment: Adjustment, value: f32) -> Result<(), EditError> {
        if !adjustment.range().contains(&value) {
            return Err(EditError::OutOfRange { adjustment, value });
        }

        match adjustment {
            Adjustment::Brightness => self.brightness = value,
            Adjustment::Contrast => self.contrast = value,
            Adjustment::Saturation => self.saturation = value,
            Adjustment::Rotation => self.rotation = value,
            Adjustment::Scale => self.scale = value,
        }

        Ok(())
    }

    /// Toggle mirroring for one axis. The two axes never affect each other.
    pub fn set_flip(&mut self, axis: Axis, enabled: bool) {
        match axis {
            Axis::X => self.flip_x = enabled,
            Axis::Y => self.flip_y = enabled,
        }
    }

    /// Restore all seven adjustment fields to their defaults.
    /// The uploaded image stays loaded. Idempotent.
    pub fn reset_filters(&mut self) {
        self.brightness = Adjustment::Brightness.default_value();
        self.contrast = Adjustment::Contrast.default_value();
        self.saturation = Adjustment::Saturation.default_value();
        self.rotation = Adjustment::Rotation.default_value();
        self.scale = Adjustment::Scale.default_value();
        self.flip_x = false;
        self.flip_y = false;
    }

    /// Overwrite the brightness/contrast/saturation triple with a preset.
    /// Rotation, scale, and flips are left untouched.
    pub fn apply_preset(&mut self, preset: Preset) {
        let values = preset.values();
        self.brightness = values.brightness;
        self.contrast = values.contrast;
        self.saturation = values.saturation;
    }

    /// Check whether all adjustments are at their defaults
    pub fn is_unedited(&self) -> bool {
        Adjustment::ALL
            .iter()
            .all(|&a| self.adjustment(a) == a.default_value())
            && !self.flip_x
            && !self.flip_y
    }
}
