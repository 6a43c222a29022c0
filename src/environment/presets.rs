//! Built-in look presets and HDRI environment names.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::config::EnvironmentSnapshot;
use crate::core::types::Vec3;
use crate::scene::camera::CameraConfig;

/// Environment maps the renderer ships with.
pub const HDRI_PRESETS: [&str; 10] = [
    "apartment",
    "city",
    "dawn",
    "forest",
    "lobby",
    "night",
    "park",
    "studio",
    "sunset",
    "warehouse",
];

/// A named environment + camera combination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LookPreset {
    pub id: String,
    pub name: String,
    pub environment: EnvironmentSnapshot,
    pub camera: CameraConfig,
}

impl LookPreset {
    fn builtin(
        id: &str,
        name: &str,
        environment: EnvironmentSnapshot,
        camera: CameraConfig,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            environment,
            camera,
        }
    }
}

/// Presets available in every new project.
pub fn default_presets() -> Vec<LookPreset> {
    let base = EnvironmentSnapshot::default();
    vec![
        LookPreset::builtin(
            "studio-clean",
            "Studio Clean",
            EnvironmentSnapshot {
                background_color: Color::from_rgb8(0x1a, 0x1a, 0x1a),
                light_color: Color::WHITE,
                light_intensity: 1.8,
                ..base.clone()
            },
            CameraConfig::new(Vec3::splat(50.0), Vec3::ZERO, 35.0),
        ),
        LookPreset::builtin(
            "cyber-night",
            "Cyber Night",
            EnvironmentSnapshot {
                exposure: 1.5,
                bloom: 0.8,
                light_intensity: 2.5,
                light_color: Color::from_rgb8(0xff, 0x00, 0xff),
                background_color: Color::from_rgb8(0x05, 0x00, 0x05),
                ..base.clone()
            },
            CameraConfig::new(Vec3::new(40.0, 20.0, 40.0), Vec3::new(0.0, 5.0, 0.0), 40.0),
        ),
        LookPreset::builtin(
            "desert-sun",
            "Desert Sun",
            EnvironmentSnapshot {
                exposure: 1.1,
                bloom: 0.3,
                light_intensity: 2.0,
                light_color: Color::from_rgb8(0xff, 0xcc, 0x99),
                background_color: Color::from_rgb8(0x2a, 0x1a, 0x0a),
                ..base.clone()
            },
            CameraConfig::new(Vec3::new(60.0, 30.0, 10.0), Vec3::ZERO, 30.0),
        ),
        LookPreset::builtin(
            "void-minimal",
            "Void Minimal",
            EnvironmentSnapshot {
                exposure: 0.8,
                bloom: 0.2,
                light_intensity: 1.0,
                light_color: Color::from_rgb8(0x44, 0x44, 0xff),
                background_color: Color::BLACK,
                ..base
            },
            CameraConfig::new(Vec3::new(0.0, 100.0, 0.0), Vec3::ZERO, 25.0),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_presets() {
        let presets = default_presets();
        let ids: Vec<_> = presets.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["studio-clean", "cyber-night", "desert-sun", "void-minimal"]);

        let cyber = &presets[1];
        assert_eq!(cyber.environment.exposure, 1.5);
        assert_eq!(cyber.environment.light_color.to_hex(), "#ff00ff");
        assert_eq!(cyber.camera.target, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(cyber.camera.fov, 40.0);
    }

    #[test]
    fn test_default_hdri_is_known() {
        let env = EnvironmentSnapshot::default();
        assert!(HDRI_PRESETS.contains(&env.environment_preset.as_str()));
    }
}
