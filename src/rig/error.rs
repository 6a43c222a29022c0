//! Rig validation errors

use thiserror::Error;

use super::part::Part;

/// Rejected rig edits. State is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RigError {
    #[error("part {0} cannot be its own parent")]
    SelfParent(Part),

    #[error("parenting {part} under {parent} would create a cycle")]
    Cycle { part: Part, parent: Part },

    #[error("part {0} is not active in this rig")]
    InactivePart(Part),

    #[error("the ROOT part cannot be removed")]
    RootRemoval,

    #[error("part {0} is locked")]
    PartLocked(Part),

    #[error("part {0} is hidden")]
    PartHidden(Part),
}
