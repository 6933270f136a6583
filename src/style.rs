/// Style derivation for the image preview
///
/// This module projects the current edit state into a style descriptor: a
/// filter expression (brightness/contrast/saturation) and a transform
/// expression (rotation, uniform scale, per-axis mirroring). The descriptor
/// is what gets handed to the rendering side; deriving it is pure, so equal
/// edit states always produce equal descriptors.

use std::fmt;

use cgmath::{Deg, Matrix2, SquareMatrix};

use crate::state::edit::EditState;

/// Ordered composition of the three color filters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterExpr {
    /// Brightness in percent, 100 = unchanged
    pub brightness: f32,
    /// Contrast in percent, 100 = unchanged
    pub contrast: f32,
    /// Saturation in percent, 100 = unchanged
    pub saturation: f32,
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "brightness({}%) contrast({}%) saturate({}%)",
            format_value(self.brightness),
            format_value(self.contrast),
            format_value(self.saturation),
        )
    }
}

/// Ordered composition of the geometric transforms.
///
/// The fixed order is rotate, then scale, then the X mirror, then the Y
/// mirror, matching the order the components are printed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformExpr {
    /// Rotation in degrees, positive = clockwise on screen
    pub rotation: f32,
    /// Uniform scale multiplier
    pub scale: f32,
    /// Mirror across the vertical axis
    pub flip_x: bool,
    /// Mirror across the horizontal axis
    pub flip_y: bool,
}

impl TransformExpr {
    /// Sign applied to the x coordinate by the X mirror
    pub fn flip_x_sign(&self) -> f32 {
        if self.flip_x {
            -1.0
        } else {
            1.0
        }
    }

    /// Sign applied to the y coordinate by the Y mirror
    pub fn flip_y_sign(&self) -> f32 {
        if self.flip_y {
            -1.0
        } else {
            1.0
        }
    }

    /// The 2x2 matrix of the full composition: rotate x scale x flipX x flipY.
    ///
    /// Coordinates are y-down pixel space, where the standard rotation matrix
    /// turns positive angles clockwise on screen.
    pub fn matrix(&self) -> Matrix2<f32> {
        let rotate = Matrix2::from_angle(Deg(self.rotation));
        let scale = Matrix2::from_value(self.scale);
        let flip = Matrix2::new(self.flip_x_sign(), 0.0, 0.0, self.flip_y_sign());

        rotate * scale * flip
    }

    /// Inverse of [`Self::matrix`], used to map destination pixels back to
    /// source pixels. Scale is bounded away from zero, so the matrix is
    /// always invertible; identity is a pure fallback.
    pub fn inverse_matrix(&self) -> Matrix2<f32> {
        self.matrix().invert().unwrap_or_else(Matrix2::identity)
    }

    /// Axis-aligned bounding box of the transformed image, in source pixel
    /// units. This is the canvas the preview renders into, so rotated
    /// corners and scales above 1 stay visible instead of being clipped at
    /// the original frame.
    pub fn bounding_box(&self, width: f32, height: f32) -> (f32, f32) {
        let m = self.matrix();
        // The transform is centered, so two adjacent corners cover all
        // four by symmetry
        let corners = [
            cgmath::Vector2::new(width / 2.0, height / 2.0),
            cgmath::Vector2::new(width / 2.0, -height / 2.0),
        ];

        let mut half_width: f32 = 0.0;
        let mut half_height: f32 = 0.0;
        for corner in corners {
            let mapped = m * corner;
            half_width = half_width.max(mapped.x.abs());
            half_height = half_height.max(mapped.y.abs());
        }

        ((2.0 * half_width).max(1.0), (2.0 * half_height).max(1.0))
    }
}

impl fmt::Display for TransformExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rotate({}deg) scale({}) scaleX({}) scaleY({})",
            format_value(self.rotation),
            format_value(self.scale),
            format_value(self.flip_x_sign()),
            format_value(self.flip_y_sign()),
        )
    }
}

/// The full style descriptor for one render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageStyle {
    pub filter: FilterExpr,
    pub transform: TransformExpr,
}

/// Derive the style descriptor from the current edit state.
///
/// Pure and deterministic: no caching, no side effects. Call it on every
/// render.
pub fn derive_style(state: &EditState) -> ImageStyle {
    ImageStyle {
        filter: FilterExpr {
            brightness: state.brightness,
            contrast: state.contrast,
            saturation: state.saturation,
        },
        transform: TransformExpr {
            rotation: state.rotation,
            scale: state.scale,
            flip_x: state.flip_x,
            flip_y: state.flip_y,
        },
    }
}

/// Print a slider value the way the expressions expect: integers without a
/// decimal point, fractional values with one decimal (slider steps are 1 or
/// 0.1, so one decimal always suffices).
pub fn format_value(value: f32) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::edit::{Adjustment, Axis};

    #[test]
    fn test_default_state_descriptor() {
        let style = derive_style(&EditState::new());

        assert_eq!(
            style.filter.to_string(),
            "brightness(100%) contrast(100%) saturate(100%)"
        );
        assert_eq!(
            style.transform.to_string(),
            "rotate(0deg) scale(1) scaleX(1) scaleY(1)"
        );
    }

    #[test]
    fn test_adjusted_state_descriptor() {
        let mut state = EditState::new();
        state.set_adjustment(Adjustment::Brightness, 150.0).unwrap();
        state.set_adjustment(Adjustment::Rotation, 45.0).unwrap();
        state.set_flip(Axis::Y, true);

        let style = derive_style(&state);

        assert_eq!(
            style.filter.to_string(),
            "brightness(150%) contrast(100%) saturate(100%)"
        );
        assert_eq!(
            style.transform.to_string(),
            "rotate(45deg) scale(1) scaleX(1) scaleY(-1)"
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let mut state = EditState::new();
        state.set_adjustment(Adjustment::Contrast, 80.0).unwrap();
        state.set_adjustment(Adjustment::Scale, 2.5).unwrap();
        state.set_flip(Axis::X, true);

        let first = derive_style(&state);
        let second = derive_style(&state);

        assert_eq!(first, second);
        assert_eq!(first.filter.to_string(), second.filter.to_string());
        assert_eq!(first.transform.to_string(), second.transform.to_string());
    }

    #[test]
    fn test_scale_formatting() {
        let mut state = EditState::new();

        state.set_adjustment(Adjustment::Scale, 0.1).unwrap();
        assert!(derive_style(&state)
            .transform
            .to_string()
            .contains("scale(0.1)"));

        state.set_adjustment(Adjustment::Scale, 1.5).unwrap();
        assert!(derive_style(&state)
            .transform
            .to_string()
            .contains("scale(1.5)"));

        state.set_adjustment(Adjustment::Scale, 3.0).unwrap();
        assert!(derive_style(&state)
            .transform
            .to_string()
            .contains("scale(3)"));
    }

    #[test]
    fn test_negative_rotation_formatting() {
        let mut state = EditState::new();
        state.set_adjustment(Adjustment::Rotation, -135.0).unwrap();

        assert!(derive_style(&state)
            .transform
            .to_string()
            .starts_with("rotate(-135deg)"));
    }

    #[test]
    fn test_rotation_matrix_turns_clockwise() {
        let transform = TransformExpr {
            rotation: 90.0,
            scale: 1.0,
            flip_x: false,
            flip_y: false,
        };
        let m = transform.matrix();

        // In y-down pixel space a 90 degree clockwise turn sends (1, 0)
        // to (0, 1)
        let x = m * cgmath::Vector2::new(1.0, 0.0);
        assert!((x.x - 0.0).abs() < 1e-5);
        assert!((x.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_inverse_matrix_round_trips() {
        let transform = TransformExpr {
            rotation: 30.0,
            scale: 2.0,
            flip_x: true,
            flip_y: false,
        };

        let round_trip = transform.matrix() * transform.inverse_matrix();
        let identity = Matrix2::<f32>::identity();

        assert!((round_trip.x.x - identity.x.x).abs() < 1e-5);
        assert!((round_trip.x.y - identity.x.y).abs() < 1e-5);
        assert!((round_trip.y.x - identity.y.x).abs() < 1e-5);
        assert!((round_trip.y.y - identity.y.y).abs() < 1e-5);
    }

    #[test]
    fn test_bounding_box_follows_the_transform() {
        let identity = TransformExpr {
            rotation: 0.0,
            scale: 1.0,
            flip_x: false,
            flip_y: false,
        };
        assert_eq!(identity.bounding_box(200.0, 100.0), (200.0, 100.0));

        // A quarter turn swaps the extents
        let quarter = TransformExpr { rotation: 90.0, ..identity };
        let (w, h) = quarter.bounding_box(200.0, 100.0);
        assert!((w - 100.0).abs() < 1e-3);
        assert!((h - 200.0).abs() < 1e-3);

        // Scaling grows the box, so scale > 1 is not clipped
        let doubled = TransformExpr { scale: 2.0, ..identity };
        let (w, h) = doubled.bounding_box(200.0, 100.0);
        assert!((w - 400.0).abs() < 1e-3);
        assert!((h - 200.0).abs() < 1e-3);

        // A 45 degree turn of a square needs sqrt(2) times the side
        let diagonal = TransformExpr { rotation: 45.0, ..identity };
        let (w, h) = diagonal.bounding_box(100.0, 100.0);
        let expected = 100.0 * std::f32::consts::SQRT_2;
        assert!((w - expected).abs() < 1e-2);
        assert!((h - expected).abs() < 1e-2);

        // Mirroring never changes the extents
        let mirrored = TransformExpr {
            flip_x: true,
            flip_y: true,
            ..identity
        };
        assert_eq!(mirrored.bounding_box(200.0, 100.0), (200.0, 100.0));
    }

    #[test]
    fn test_flip_negates_one_axis_only() {
        let transform = TransformExpr {
            rotation: 0.0,
            scale: 1.0,
            flip_x: true,
            flip_y: false,
        };
        let m = transform.matrix();

        let v = m * cgmath::Vector2::new(1.0, 1.0);
        assert!((v.x + 1.0).abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }
}
