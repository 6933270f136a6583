/// Quick presets for the brightness/contrast/saturation triple
///
/// Presets are fixed constants, not user-configurable. Applying one
/// overwrites the three color adjustments atomically and leaves rotation,
/// scale, and the flips alone.

/// The brightness/contrast/saturation triple a preset applies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetValues {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
}

/// A named quick preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Enhance,
    Vintage,
    Grayscale,
    Vibrant,
}

impl Preset {
    /// All presets, in button-row order
    pub const ALL: [Preset; 4] = [
        Preset::Enhance,
        Preset::Vintage,
        Preset::Grayscale,
        Preset::Vibrant,
    ];

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            Preset::Enhance => "Enhance",
            Preset::Vintage => "Vintage",
            Preset::Grayscale => "Grayscale",
            Preset::Vibrant => "Vibrant",
        }
    }

    /// The fixed triple this preset applies
    pub fn values(self) -> PresetValues {
        match self {
            Preset::Enhance => PresetValues {
                brightness: 120.0,
                contrast: 110.0,
                saturation: 90.0,
            },
            Preset::Vintage => PresetValues {
                brightness: 80.0,
                contrast: 120.0,
                saturation: 70.0,
            },
            Preset::Grayscale => PresetValues {
                brightness: 100.0,
                contrast: 100.0,
                saturation: 0.0,
            },
            Preset::Vibrant => PresetValues {
                brightness: 110.0,
                contrast: 90.0,
                saturation: 120.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::edit::EditState;

    #[test]
    fn test_grayscale_zeroes_saturation_only() {
        let mut state = EditState::new();
        state.apply_preset(Preset::Grayscale);

        assert_eq!(state.brightness, 100.0);
        assert_eq!(state.contrast, 100.0);
        assert_eq!(state.saturation, 0.0);
    }

    #[test]
    fn test_presets_overwrite_prior_triple() {
        let mut state = EditState::new();
        state.apply_preset(Preset::Vintage);
        state.apply_preset(Preset::Enhance);

        assert_eq!(state.brightness, 120.0);
        assert_eq!(state.contrast, 110.0);
        assert_eq!(state.saturation, 90.0);
    }

    #[test]
    fn test_presets_leave_geometry_alone() {
        let mut state = EditState::new();
        state.rotation = 45.0;
        state.scale = 2.0;
        state.flip_x = true;

        state.apply_preset(Preset::Vibrant);

        assert_eq!(state.rotation, 45.0);
        assert_eq!(state.scale, 2.0);
        assert!(state.flip_x);
    }

    #[test]
    fn test_preset_values_stay_in_slider_domain() {
        for preset in Preset::ALL {
            let values = preset.values();
            assert!((0.0..=200.0).contains(&values.brightness));
            assert!((0.0..=200.0).contains(&values.contrast));
            assert!((0.0..=200.0).contains(&values.saturation));
        }
    }
}
