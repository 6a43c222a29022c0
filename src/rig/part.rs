//! Rig part identifiers
//!
//! Parts form a closed set. A rig instance only ever activates a subset of them;
//! nothing is created at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named bone / body region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Part {
    Root,
    // Humanoid
    Head,
    Body,
    ArmL,
    ArmR,
    LegL,
    LegR,
    // Quadruped / animal
    Neck,
    Tail,
    LegFL,
    LegFR,
    LegBL,
    LegBR,
    // Bird
    WingL,
    WingR,
    // Spider / multi-leg
    Leg1L,
    Leg1R,
    Leg2L,
    Leg2R,
    Leg3L,
    Leg3R,
    Leg4L,
    Leg4R,
    // Vehicle
    WheelFL,
    WheelFR,
    WheelBL,
    WheelBR,
    // Generic octant splits
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
    P8,
}

impl Part {
    /// Number of parts in the enumeration.
    pub const COUNT: usize = 35;

    /// Every part, in index order.
    pub const ALL: [Part; Part::COUNT] = [
        Part::Root,
        Part::Head,
        Part::Body,
        Part::ArmL,
        Part::ArmR,
        Part::LegL,
        Part::LegR,
        Part::Neck,
        Part::Tail,
        Part::LegFL,
        Part::LegFR,
        Part::LegBL,
        Part::LegBR,
        Part::WingL,
        Part::WingR,
        Part::Leg1L,
        Part::Leg1R,
        Part::Leg2L,
        Part::Leg2R,
        Part::Leg3L,
        Part::Leg3R,
        Part::Leg4L,
        Part::Leg4R,
        Part::WheelFL,
        Part::WheelFR,
        Part::WheelBL,
        Part::WheelBR,
        Part::P1,
        Part::P2,
        Part::P3,
        Part::P4,
        Part::P5,
        Part::P6,
        Part::P7,
        Part::P8,
    ];

    /// The eight octant parts used by the generic template, indexed by octant.
    pub const OCTANTS: [Part; 8] = [
        Part::P1,
        Part::P2,
        Part::P3,
        Part::P4,
        Part::P5,
        Part::P6,
        Part::P7,
        Part::P8,
    ];

    /// Dense index in `0..Part::COUNT`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Part::index`].
    pub fn from_index(index: usize) -> Option<Part> {
        Self::ALL.get(index).copied()
    }

    /// Canonical upper-case name, e.g. `"ARM_L"` or `"LEG_1L"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Part::Root => "ROOT",
            Part::Head => "HEAD",
            Part::Body => "BODY",
            Part::ArmL => "ARM_L",
            Part::ArmR => "ARM_R",
            Part::LegL => "LEG_L",
            Part::LegR => "LEG_R",
            Part::Neck => "NECK",
            Part::Tail => "TAIL",
            Part::LegFL => "LEG_FL",
            Part::LegFR => "LEG_FR",
            Part::LegBL => "LEG_BL",
            Part::LegBR => "LEG_BR",
            Part::WingL => "WING_L",
            Part::WingR => "WING_R",
            Part::Leg1L => "LEG_1L",
            Part::Leg1R => "LEG_1R",
            Part::Leg2L => "LEG_2L",
            Part::Leg2R => "LEG_2R",
            Part::Leg3L => "LEG_3L",
            Part::Leg3R => "LEG_3R",
            Part::Leg4L => "LEG_4L",
            Part::Leg4R => "LEG_4R",
            Part::WheelFL => "WHEEL_FL",
            Part::WheelFR => "WHEEL_FR",
            Part::WheelBL => "WHEEL_BL",
            Part::WheelBR => "WHEEL_BR",
            Part::P1 => "P1",
            Part::P2 => "P2",
            Part::P3 => "P3",
            Part::P4 => "P4",
            Part::P5 => "P5",
            Part::P6 => "P6",
            Part::P7 => "P7",
            Part::P8 => "P8",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Part {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Part::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown rig part '{s}'"))
    }
}

impl TryFrom<String> for Part {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Part> for &'static str {
    fn from(part: Part) -> Self {
        part.as_str()
    }
}
