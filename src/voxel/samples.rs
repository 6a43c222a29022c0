//! Small built-in models for trying the studio without an import.

use crate::environment::Color;
use crate::rig::{Part, RigTemplate};

use super::voxel::VoxelData;

/// `(x, y, z, rgb, part)` in `.vox` axes (z up, y front).
type Row = (u8, u8, u8, u32, Part);

const ROBOT: &[Row] = &[
    // Body
    (3, 1, 3, 0x444444, Part::Body),
    (4, 1, 3, 0x444444, Part::Body),
    (2, 1, 3, 0x444444, Part::Body),
    (3, 1, 4, 0x444444, Part::Body),
    (4, 1, 4, 0x444444, Part::Body),
    (2, 1, 4, 0x444444, Part::Body),
    (3, 1, 5, 0x444444, Part::Body),
    (4, 1, 5, 0x444444, Part::Body),
    (2, 1, 5, 0x444444, Part::Body),
    // Head
    (3, 1, 6, 0x666666, Part::Head),
    (3, 1, 7, 0x666666, Part::Head),
    (4, 1, 7, 0x666666, Part::Head),
    (2, 1, 7, 0x666666, Part::Head),
    (3, 1, 8, 0x666666, Part::Head),
    // Arms
    (5, 1, 5, 0x333333, Part::ArmR),
    (6, 1, 5, 0x333333, Part::ArmR),
    (6, 1, 4, 0x333333, Part::ArmR),
    (1, 1, 5, 0x333333, Part::ArmL),
    (0, 1, 5, 0x333333, Part::ArmL),
    (0, 1, 4, 0x333333, Part::ArmL),
    // Legs
    (4, 1, 2, 0x222222, Part::LegR),
    (4, 1, 1, 0x222222, Part::LegR),
    (4, 1, 0, 0x222222, Part::LegR),
    (2, 1, 2, 0x222222, Part::LegL),
    (2, 1, 1, 0x222222, Part::LegL),
    (2, 1, 0, 0x222222, Part::LegL),
];

const DOG: &[Row] = &[
    // Body
    (1, 2, 2, 0x8b4513, Part::Body),
    (1, 3, 2, 0x8b4513, Part::Body),
    (1, 4, 2, 0x8b4513, Part::Body),
    (1, 1, 2, 0x8b4513, Part::Body),
    (1, 0, 2, 0x8b4513, Part::Body),
    // Neck & head
    (1, 4, 3, 0xa0522d, Part::Neck),
    (1, 4, 4, 0xa0522d, Part::Head),
    (1, 5, 4, 0xa0522d, Part::Head),
    // Tail
    (1, 0, 3, 0x8b4513, Part::Tail),
    // Legs
    (2, 4, 1, 0x5d2e0c, Part::LegFR),
    (2, 4, 0, 0x5d2e0c, Part::LegFR),
    (0, 4, 1, 0x5d2e0c, Part::LegFL),
    (0, 4, 0, 0x5d2e0c, Part::LegFL),
    (2, 0, 1, 0x5d2e0c, Part::LegBR),
    (2, 0, 0, 0x5d2e0c, Part::LegBR),
    (0, 0, 1, 0x5d2e0c, Part::LegBL),
    (0, 0, 0, 0x5d2e0c, Part::LegBL),
];

const CAR: &[Row] = &[
    // Body
    (2, 1, 1, 0xcc0000, Part::Body),
    (3, 1, 1, 0xcc0000, Part::Body),
    (1, 1, 1, 0xcc0000, Part::Body),
    (2, 2, 1, 0xcc0000, Part::Body),
    (3, 2, 1, 0xcc0000, Part::Body),
    (1, 2, 1, 0xcc0000, Part::Body),
    (2, 0, 1, 0xcc0000, Part::Body),
    (3, 0, 1, 0xcc0000, Part::Body),
    (1, 0, 1, 0xcc0000, Part::Body),
    // Wheels
    (4, 2, 0, 0x111111, Part::WheelFR),
    (0, 2, 0, 0x111111, Part::WheelFL),
    (4, 0, 0, 0x111111, Part::WheelBR),
    (0, 0, 0, 0x111111, Part::WheelBL),
];

/// A pre-tagged model and the template it is rigged for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleModel {
    pub id: &'static str,
    pub name: &'static str,
    pub template: RigTemplate,
    rows: &'static [Row],
}

impl SampleModel {
    pub fn voxels(&self) -> Vec<VoxelData> {
        self.rows
            .iter()
            .map(|&(x, y, z, rgb, part)| {
                let color = Color::from_rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8);
                VoxelData::new(x, y, z, color).with_part(part)
            })
            .collect()
    }
}

pub const SAMPLE_MODELS: [SampleModel; 3] = [
    SampleModel {
        id: "robot",
        name: "Robot",
        template: RigTemplate::Humanoid,
        rows: ROBOT,
    },
    SampleModel {
        id: "dog",
        name: "Dog",
        template: RigTemplate::Quadruped,
        rows: DOG,
    },
    SampleModel {
        id: "car",
        name: "Car",
        template: RigTemplate::Vehicle,
        rows: CAR,
    },
];

pub fn find_sample(id: &str) -> Option<&'static SampleModel> {
    SAMPLE_MODELS.iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parts_belong_to_template() {
        for sample in &SAMPLE_MODELS {
            for v in sample.voxels() {
                assert!(
                    sample.template.parts().contains(&v.effective_part()),
                    "{} uses {}",
                    sample.id,
                    v.effective_part()
                );
            }
        }
    }

    #[test]
    fn test_colors_decode() {
        let robot = find_sample("robot").unwrap().voxels();
        assert_eq!(robot.len(), 26);
        assert_eq!(robot[0].color.to_hex(), "#444444");
        assert!(find_sample("dragon").is_none());
    }
}
