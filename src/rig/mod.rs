//! Rig definition: part identifiers, templates, topology and rest pose

pub mod error;
pub mod part;
pub mod part_map;
pub mod rest_pose;
pub mod template;
pub mod topology;

pub use error::RigError;
pub use part::Part;
pub use part_map::PartMap;
pub use rest_pose::{Axis, RestPoseStore, TransformComponent};
pub use template::RigTemplate;
pub use topology::RigTopology;
