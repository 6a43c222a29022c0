//! Scene/rendering parameters captured per keyframe.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::lerp::{snap, Lerp};

/// What the renderer draws behind the model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    #[default]
    Color,
    Hdri,
}

/// Full set of lighting, environment, shadow and grading parameters.
///
/// Every keyframe owns one of these; the renderer receives the blended value
/// each frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentSnapshot {
    pub exposure: f32,
    pub bloom: f32,
    pub ao_intensity: f32,
    pub light_intensity: f32,
    pub light_color: Color,
    pub light_position: Vec3,
    pub background_color: Color,

    // -- Environment map ---------------------------------------------------
    pub background_type: BackgroundType,
    /// Name of a built-in HDRI, see [`super::HDRI_PRESETS`].
    pub environment_preset: String,
    /// User-supplied HDRI; overrides the preset when set.
    pub environment_url: Option<String>,
    pub environment_intensity: f32,
    /// Radians around the vertical axis.
    pub environment_rotation: f32,

    // -- Shadows -----------------------------------------------------------
    pub shadows_enabled: bool,
    pub shadow_softness: f32,
    pub shadow_resolution: u32,
    pub voxels_cast_shadows: bool,
    pub voxels_receive_shadows: bool,
    pub contact_shadow_opacity: f32,

    // -- Color grading -----------------------------------------------------
    pub saturation: f32,
    pub contrast: f32,
    pub hue: f32,
    pub brightness: f32,
}

impl Default for EnvironmentSnapshot {
    fn default() -> Self {
        Self {
            exposure: 1.2,
            bloom: 0.5,
            ao_intensity: 1.0,
            light_intensity: 1.5,
            light_color: Color::WHITE,
            light_position: Vec3::new(10.0, 20.0, 10.0),
            background_color: Color::from_rgb8(0x0a, 0x0a, 0x0a),

            background_type: BackgroundType::Color,
            environment_preset: "city".to_string(),
            environment_url: None,
            environment_intensity: 1.0,
            environment_rotation: 0.0,

            shadows_enabled: true,
            shadow_softness: 0.5,
            shadow_resolution: 2048,
            voxels_cast_shadows: true,
            voxels_receive_shadows: true,
            contact_shadow_opacity: 0.4,

            saturation: 1.0,
            contrast: 1.0,
            hue: 0.0,
            brightness: 1.0,
        }
    }
}

impl EnvironmentSnapshot {
    /// Blend towards `other` by an already-shaped factor `t`.
    ///
    /// Numeric fields lerp, colors lerp per RGB channel, and categorical
    /// fields (background type, HDRI choice, shadow toggles and resolution)
    /// snap to `other` once `t >= 0.5`.
    pub fn blend(&self, other: &Self, t: f32) -> Self {
        Self {
            exposure: self.exposure.lerp(&other.exposure, t),
            bloom: self.bloom.lerp(&other.bloom, t),
            ao_intensity: self.ao_intensity.lerp(&other.ao_intensity, t),
            light_intensity: self.light_intensity.lerp(&other.light_intensity, t),
            light_color: self.light_color.lerp(&other.light_color, t),
            light_position: Lerp::lerp(&self.light_position, &other.light_position, t),
            background_color: self.background_color.lerp(&other.background_color, t),

            background_type: snap(&self.background_type, &other.background_type, t),
            environment_preset: snap(&self.environment_preset, &other.environment_preset, t),
            environment_url: snap(&self.environment_url, &other.environment_url, t),
            environment_intensity: self.environment_intensity.lerp(&other.environment_intensity, t),
            environment_rotation: self.environment_rotation.lerp(&other.environment_rotation, t),

            shadows_enabled: snap(&self.shadows_enabled, &other.shadows_enabled, t),
            shadow_softness: self.shadow_softness.lerp(&other.shadow_softness, t),
            shadow_resolution: snap(&self.shadow_resolution, &other.shadow_resolution, t),
            voxels_cast_shadows: snap(&self.voxels_cast_shadows, &other.voxels_cast_shadows, t),
            voxels_receive_shadows: snap(&self.voxels_receive_shadows, &other.voxels_receive_shadows, t),
            contact_shadow_opacity: self.contact_shadow_opacity.lerp(&other.contact_shadow_opacity, t),

            saturation: self.saturation.lerp(&other.saturation, t),
            contrast: self.contrast.lerp(&other.contrast, t),
            hue: self.hue.lerp(&other.hue, t),
            brightness: self.brightness.lerp(&other.brightness, t),
        }
    }

    /// The HDRI source the renderer should load, if the background uses one.
    pub fn active_hdri(&self) -> Option<&str> {
        match self.background_type {
            BackgroundType::Color => None,
            BackgroundType::Hdri => Some(
                self.environment_url
                    .as_deref()
                    .unwrap_or(&self.environment_preset),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn night() -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            exposure: 2.0,
            bloom: 1.0,
            light_color: Color::BLACK,
            light_position: Vec3::new(0.0, 40.0, 0.0),
            background_type: BackgroundType::Hdri,
            environment_preset: "night".to_string(),
            shadows_enabled: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let env = EnvironmentSnapshot::default();
        assert_eq!(env.exposure, 1.2);
        assert_eq!(env.bloom, 0.5);
        assert_eq!(env.light_intensity, 1.5);
        assert_eq!(env.light_color, Color::WHITE);
        assert_eq!(env.background_color.to_hex(), "#0a0a0a");
        assert_eq!(env.environment_preset, "city");
    }

    #[test]
    fn test_blend_endpoints() {
        let day = EnvironmentSnapshot::default();
        assert_eq!(day.blend(&night(), 0.0), day);
        assert_eq!(day.blend(&night(), 1.0), night());
    }

    #[test]
    fn test_blend_numeric_and_color_fields() {
        let mid = EnvironmentSnapshot::default().blend(&night(), 0.25);
        assert!(approx_eq(mid.exposure, 1.2 + (2.0 - 1.2) * 0.25));
        assert!(approx_eq(mid.bloom, 0.625));
        assert!(approx_eq(mid.light_color.r, 0.75));
        assert!(approx_eq(mid.light_position.y, 25.0));
    }

    #[test]
    fn test_blend_snaps_categorical_fields() {
        let day = EnvironmentSnapshot::default();

        let early = day.blend(&night(), 0.49);
        assert_eq!(early.background_type, BackgroundType::Color);
        assert_eq!(early.environment_preset, "city");
        assert!(early.shadows_enabled);

        let late = day.blend(&night(), 0.5);
        assert_eq!(late.background_type, BackgroundType::Hdri);
        assert_eq!(late.environment_preset, "night");
        assert!(!late.shadows_enabled);
    }

    #[test]
    fn test_active_hdri_prefers_custom_url() {
        let mut env = night();
        assert_eq!(env.active_hdri(), Some("night"));
        env.environment_url = Some("file:///sky.hdr".to_string());
        assert_eq!(env.active_hdri(), Some("file:///sky.hdr"));
        env.background_type = BackgroundType::Color;
        assert_eq!(env.active_hdri(), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let env: EnvironmentSnapshot =
            serde_json::from_str(r##"{"exposure": 0.8, "light_color": "#4444ff"}"##).unwrap();
        assert_eq!(env.exposure, 0.8);
        assert_eq!(env.light_color.to_hex(), "#4444ff");
        assert_eq!(env.bloom, 0.5);
    }
}
