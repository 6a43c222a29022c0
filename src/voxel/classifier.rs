//! Template-driven voxel segmentation.
//!
//! Every voxel is assigned a part from its position normalized into the model
//! bounds (`.vox` axes: x across, y front/back, z up).

use crate::core::types::Vec3;
use crate::math::Aabb;
use crate::rig::{Part, RigTemplate};

use super::voxel::VoxelData;

/// Reassign every voxel's part for `template`. Colors and positions are kept.
pub fn classify_voxels(voxels: &[VoxelData], template: RigTemplate) -> Vec<VoxelData> {
    let Some(bounds) = Aabb::from_points(voxels.iter().map(VoxelData::grid_position)) else {
        return Vec::new();
    };

    let classified: Vec<VoxelData> = voxels
        .iter()
        .map(|v| v.with_part(classify_point(&bounds, v.grid_position(), template)))
        .collect();

    log::debug!("Classified {} voxels for {}", classified.len(), template);
    classified
}

/// Part for a single grid position inside `bounds`.
pub fn classify_point(bounds: &Aabb, p: Vec3, template: RigTemplate) -> Part {
    let n = bounds.normalize(p);
    let left = p.x < bounds.center().x;
    // Distance from the vertical center plane, as a fraction of the width
    let side = (n.x - 0.5).abs();

    match template {
        RigTemplate::Humanoid => {
            if n.z > 0.8 {
                Part::Head
            } else if n.z < 0.3 {
                if left { Part::LegL } else { Part::LegR }
            } else if n.z > 0.4 && n.z < 0.75 && side > 0.3 {
                if left { Part::ArmL } else { Part::ArmR }
            } else {
                Part::Body
            }
        }
        RigTemplate::Quadruped => {
            if n.z > 0.6 && n.y > 0.7 {
                Part::Head
            } else if n.z > 0.5 && n.y > 0.5 && n.y <= 0.7 {
                Part::Neck
            } else if n.y < 0.2 {
                Part::Tail
            } else if n.z < 0.4 {
                match (n.y > 0.5, left) {
                    (true, true) => Part::LegFL,
                    (true, false) => Part::LegFR,
                    (false, true) => Part::LegBL,
                    (false, false) => Part::LegBR,
                }
            } else {
                Part::Body
            }
        }
        RigTemplate::Generic => Part::OCTANTS[bounds.octant_index(p)],
        RigTemplate::Custom => Part::Body,
        RigTemplate::Spider => {
            if side > 0.25 {
                // Four leg pairs front to back
                let pair = ((1.0 - n.y) * 4.0).floor().clamp(0.0, 3.0) as usize;
                const LEFT: [Part; 4] = [Part::Leg1L, Part::Leg2L, Part::Leg3L, Part::Leg4L];
                const RIGHT: [Part; 4] = [Part::Leg1R, Part::Leg2R, Part::Leg3R, Part::Leg4R];
                if left { LEFT[pair] } else { RIGHT[pair] }
            } else if n.y > 0.8 {
                Part::Head
            } else {
                Part::Body
            }
        }
        RigTemplate::Bird => {
            if n.z > 0.8 {
                Part::Head
            } else if n.z > 0.65 && side <= 0.2 {
                Part::Neck
            } else if n.z < 0.25 {
                if left { Part::LegL } else { Part::LegR }
            } else if side > 0.3 {
                if left { Part::WingL } else { Part::WingR }
            } else if n.y < 0.15 {
                Part::Tail
            } else {
                Part::Body
            }
        }
        RigTemplate::Vehicle => {
            let at_axle = n.y > 0.75 || n.y < 0.25;
            if n.z < 0.35 && at_axle && side > 0.3 {
                match (n.y > 0.5, left) {
                    (true, true) => Part::WheelFL,
                    (true, false) => Part::WheelFR,
                    (false, true) => Part::WheelBL,
                    (false, false) => Part::WheelBR,
                }
            } else {
                Part::Body
            }
        }
    }
}
