//! Built-in rig templates: default active parts and parent links.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::part::Part;
use super::part_map::PartMap;

/// Rig layout chosen at import time or switched by the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RigTemplate {
    #[default]
    Humanoid,
    Quadruped,
    Generic,
    Custom,
    Spider,
    Bird,
    Vehicle,
}

const HUMANOID_PARTS: &[Part] = &[
    Part::Root,
    Part::Head,
    Part::Body,
    Part::ArmL,
    Part::ArmR,
    Part::LegL,
    Part::LegR,
];

const QUADRUPED_PARTS: &[Part] = &[
    Part::Root,
    Part::Head,
    Part::Neck,
    Part::Body,
    Part::Tail,
    Part::LegFL,
    Part::LegFR,
    Part::LegBL,
    Part::LegBR,
];

const GENERIC_PARTS: &[Part] = &[
    Part::Root,
    Part::P1,
    Part::P2,
    Part::P3,
    Part::P4,
    Part::P5,
    Part::P6,
    Part::P7,
    Part::P8,
];

const CUSTOM_PARTS: &[Part] = &[Part::Root, Part::Body];

const SPIDER_PARTS: &[Part] = &[
    Part::Root,
    Part::Body,
    Part::Head,
    Part::Leg1L,
    Part::Leg1R,
    Part::Leg2L,
    Part::Leg2R,
    Part::Leg3L,
    Part::Leg3R,
    Part::Leg4L,
    Part::Leg4R,
];

const BIRD_PARTS: &[Part] = &[
    Part::Root,
    Part::Body,
    Part::Neck,
    Part::Head,
    Part::WingL,
    Part::WingR,
    Part::Tail,
    Part::LegL,
    Part::LegR,
];

const VEHICLE_PARTS: &[Part] = &[
    Part::Root,
    Part::Body,
    Part::WheelFL,
    Part::WheelFR,
    Part::WheelBL,
    Part::WheelBR,
];

impl RigTemplate {
    pub const ALL: [RigTemplate; 7] = [
        RigTemplate::Humanoid,
        RigTemplate::Quadruped,
        RigTemplate::Generic,
        RigTemplate::Custom,
        RigTemplate::Spider,
        RigTemplate::Bird,
        RigTemplate::Vehicle,
    ];

    /// Parts activated by this template.
    pub fn parts(self) -> &'static [Part] {
        match self {
            RigTemplate::Humanoid => HUMANOID_PARTS,
            RigTemplate::Quadruped => QUADRUPED_PARTS,
            RigTemplate::Generic => GENERIC_PARTS,
            RigTemplate::Custom => CUSTOM_PARTS,
            RigTemplate::Spider => SPIDER_PARTS,
            RigTemplate::Bird => BIRD_PARTS,
            RigTemplate::Vehicle => VEHICLE_PARTS,
        }
    }

    /// Default parent of `part` in this template. `None` for ROOT and for parts
    /// the template does not use.
    pub fn default_parent(self, part: Part) -> Option<Part> {
        if part == Part::Root || !self.parts().contains(&part) {
            return None;
        }

        match (self, part) {
            // Everything hangs off ROOT in the octant split
            (RigTemplate::Generic, _) => Some(Part::Root),
            (_, Part::Body) => Some(Part::Root),
            (RigTemplate::Quadruped | RigTemplate::Bird, Part::Head) => Some(Part::Neck),
            _ => Some(Part::Body),
        }
    }

    /// Full parent table for this template.
    pub fn default_parents(self) -> PartMap<Option<Part>> {
        PartMap::from_fn(|part| self.default_parent(part))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RigTemplate::Humanoid => "HUMANOID",
            RigTemplate::Quadruped => "QUADRUPED",
            RigTemplate::Generic => "GENERIC",
            RigTemplate::Custom => "CUSTOM",
            RigTemplate::Spider => "SPIDER",
            RigTemplate::Bird => "BIRD",
            RigTemplate::Vehicle => "VEHICLE",
        }
    }
}

impl fmt::Display for RigTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
