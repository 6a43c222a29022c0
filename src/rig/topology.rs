//! Rig topology: the active part set and the parent-pointer forest over it.

use serde::{Deserialize, Serialize};

use super::error::RigError;
use super::part::Part;
use super::part_map::PartMap;
use super::template::RigTemplate;

/// Parent-pointer forest over the active parts.
///
/// Invariants:
/// - no part is its own ancestor
/// - ROOT is always active
/// - a parent pointer to an inactive part reads as "no parent"
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TopologyRecord", into = "TopologyRecord")]
pub struct RigTopology {
    active: PartMap<bool>,
    parents: PartMap<Option<Part>>,
}

impl RigTopology {
    /// Topology with only ROOT active.
    pub fn new() -> Self {
        let mut active = PartMap::splat(false);
        active[Part::Root] = true;
        Self {
            active,
            parents: PartMap::splat(None),
        }
    }

    /// Default topology of a template.
    pub fn from_template(template: RigTemplate) -> Self {
        let mut active = PartMap::splat(false);
        for &part in template.parts() {
            active[part] = true;
        }
        Self {
            active,
            parents: template.default_parents(),
        }
    }

    pub fn is_active(&self, part: Part) -> bool {
        self.active[part]
    }

    /// Active parts in part index order.
    pub fn active_parts(&self) -> impl Iterator<Item = Part> + '_ {
        self.active.iter().filter(|(_, on)| **on).map(|(p, _)| p)
    }

    pub fn active_count(&self) -> usize {
        self.active_parts().count()
    }

    /// Stored parent pointer, regardless of whether the parent is active.
    pub fn parent(&self, part: Part) -> Option<Part> {
        self.parents[part]
    }

    /// Parent as seen by the composer: `None` unless both ends are active.
    pub fn effective_parent(&self, part: Part) -> Option<Part> {
        if !self.is_active(part) {
            return None;
        }
        self.parents[part].filter(|p| self.is_active(*p))
    }

    /// Would making `parent` the parent of `part` close a loop?
    pub fn would_create_cycle(&self, part: Part, parent: Part) -> bool {
        let mut current = Some(parent);
        // A valid forest has no chain longer than the part count
        for _ in 0..=Part::COUNT {
            match current {
                Some(p) if p == part => return true,
                Some(p) => current = self.parents[p],
                None => return false,
            }
        }
        true
    }

    /// Re-parent a single part. `None` makes it a root.
    pub fn set_parent(&mut self, part: Part, parent: Option<Part>) -> Result<(), RigError> {
        if let Some(parent) = parent {
            if parent == part {
                log::warn!("Rejected reparent: {} onto itself", part);
                return Err(RigError::SelfParent(part));
            }
            if self.would_create_cycle(part, parent) {
                log::warn!("Rejected reparent: {} under {} forms a cycle", part, parent);
                return Err(RigError::Cycle { part, parent });
            }
        }

        self.parents[part] = parent;
        log::debug!("Reparented {} -> {:?}", part, parent);
        Ok(())
    }

    /// Activate a part as a parentless root. Returns false if it was already active.
    pub fn add_active_part(&mut self, part: Part) -> bool {
        if self.active[part] {
            return false;
        }
        self.active[part] = true;
        self.parents[part] = None;
        log::debug!("Added bone {}", part);
        true
    }

    /// Deactivate a part. Its children are promoted to roots (not to the
    /// grandparent). Returns the promoted children.
    pub fn remove_active_part(&mut self, part: Part) -> Result<Vec<Part>, RigError> {
        if part == Part::Root {
            return Err(RigError::RootRemoval);
        }
        if !self.active[part] {
            return Err(RigError::InactivePart(part));
        }

        self.active[part] = false;
        self.parents[part] = None;

        let mut orphans = Vec::new();
        for (child, parent) in self.parents.iter_mut() {
            if *parent == Some(part) {
                *parent = None;
                if self.active[child] {
                    orphans.push(child);
                }
            }
        }

        log::debug!("Removed bone {}, promoted {:?} to root", part, orphans);
        Ok(orphans)
    }

    /// Entry points of the forest walk: active parts without an active parent.
    pub fn roots(&self) -> Vec<Part> {
        self.active_parts()
            .filter(|p| self.effective_parent(*p).is_none())
            .collect()
    }

    /// Active children of `part`.
    pub fn children(&self, part: Part) -> Vec<Part> {
        self.active_parts()
            .filter(|c| self.effective_parent(*c) == Some(part))
            .collect()
    }
}

impl Default for RigTopology {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Serde support
// ---------------------------------------------------------------------------

/// Plain serialized form. Loading validates it edge by edge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TopologyRecord {
    pub active_parts: Vec<Part>,
    pub part_parents: PartMap<Option<Part>>,
}

impl From<RigTopology> for TopologyRecord {
    fn from(topology: RigTopology) -> Self {
        Self {
            active_parts: topology.active_parts().collect(),
            part_parents: topology.parents,
        }
    }
}

impl TryFrom<TopologyRecord> for RigTopology {
    type Error = RigError;

    fn try_from(record: TopologyRecord) -> Result<Self, Self::Error> {
        let mut topology = RigTopology::new();
        for part in record.active_parts {
            topology.active[part] = true;
        }
        for (part, parent) in record.part_parents.iter() {
            topology.set_parent(part, *parent)?;
        }
        Ok(topology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_only_root() {
        let topo = RigTopology::new();
        assert_eq!(topo.active_parts().collect::<Vec<_>>(), vec![Part::Root]);
        assert_eq!(topo.roots(), vec![Part::Root]);
    }

    #[test]
    fn test_from_template_humanoid() {
        let topo = RigTopology::from_template(RigTemplate::Humanoid);
        assert_eq!(topo.active_count(), 7);
        assert_eq!(topo.parent(Part::Body), Some(Part::Root));
        assert_eq!(topo.parent(Part::ArmR), Some(Part::Body));
        assert_eq!(topo.roots(), vec![Part::Root]);

        let mut children = topo.children(Part::Body);
        children.sort();
        assert_eq!(
            children,
            vec![Part::Head, Part::ArmL, Part::ArmR, Part::LegL, Part::LegR]
        );
    }

    #[test]
    fn test_self_parent_rejected() {
        let mut topo = RigTopology::from_template(RigTemplate::Humanoid);
        let before = topo.clone();
        assert_eq!(
            topo.set_parent(Part::Head, Some(Part::Head)),
            Err(RigError::SelfParent(Part::Head))
        );
        assert_eq!(topo, before);
    }

    #[test]
    fn test_cycle_rejected_and_topology_unchanged() {
        let mut topo = RigTopology::new();
        topo.add_active_part(Part::P1);
        topo.add_active_part(Part::P2);

        topo.set_parent(Part::P2, Some(Part::P1)).unwrap();
        let before = topo.clone();

        let result = topo.set_parent(Part::P1, Some(Part::P2));
        assert_eq!(result, Err(RigError::Cycle { part: Part::P1, parent: Part::P2 }));
        assert_eq!(topo, before);
    }

    #[test]
    fn test_long_cycle_rejected() {
        let mut topo = RigTopology::from_template(RigTemplate::Quadruped);
        // HEAD -> NECK -> BODY -> ROOT; ROOT under HEAD closes the loop
        assert!(topo.set_parent(Part::Root, Some(Part::Head)).is_err());
        assert_eq!(topo.parent(Part::Root), None);
    }

    #[test]
    fn test_unparent_to_root() {
        let mut topo = RigTopology::from_template(RigTemplate::Humanoid);
        topo.set_parent(Part::ArmL, None).unwrap();
        assert!(topo.roots().contains(&Part::ArmL));
    }

    #[test]
    fn test_add_active_part_is_idempotent() {
        let mut topo = RigTopology::from_template(RigTemplate::Humanoid);
        assert!(topo.add_active_part(Part::Tail));
        assert_eq!(topo.parent(Part::Tail), None);
        assert!(!topo.add_active_part(Part::Tail));
        assert!(!topo.add_active_part(Part::Head));
        // Existing parent is untouched by a repeated add
        assert_eq!(topo.parent(Part::Head), Some(Part::Body));
    }

    #[test]
    fn test_remove_promotes_orphans_to_root() {
        let mut topo = RigTopology::from_template(RigTemplate::Quadruped);
        let orphans = topo.remove_active_part(Part::Neck).unwrap();
        assert_eq!(orphans, vec![Part::Head]);
        // Flat promotion: HEAD becomes a root, not a child of BODY
        assert_eq!(topo.parent(Part::Head), None);
        assert!(!topo.is_active(Part::Neck));
        assert!(topo.roots().contains(&Part::Head));
    }

    #[test]
    fn test_cannot_remove_root() {
        let mut topo = RigTopology::from_template(RigTemplate::Humanoid);
        assert_eq!(topo.remove_active_part(Part::Root), Err(RigError::RootRemoval));
        assert!(topo.is_active(Part::Root));
    }

    #[test]
    fn test_remove_inactive_part() {
        let mut topo = RigTopology::from_template(RigTemplate::Humanoid);
        assert_eq!(
            topo.remove_active_part(Part::WingL),
            Err(RigError::InactivePart(Part::WingL))
        );
    }

    #[test]
    fn test_inactive_parent_reads_as_root() {
        let mut topo = RigTopology::from_template(RigTemplate::Humanoid);
        topo.set_parent(Part::Head, Some(Part::Neck)).unwrap();
        assert_eq!(topo.parent(Part::Head), Some(Part::Neck));
        assert_eq!(topo.effective_parent(Part::Head), None);
        assert!(topo.roots().contains(&Part::Head));
    }

    #[test]
    fn test_serde_round_trip() {
        let topo = RigTopology::from_template(RigTemplate::Bird);
        let json = serde_json::to_string(&topo).unwrap();
        let back: RigTopology = serde_json::from_str(&json).unwrap();
        assert_eq!(back, topo);
    }

    #[test]
    fn test_deserialize_rejects_cycle() {
        let json = r#"{
            "active_parts": ["ROOT", "P1", "P2"],
            "part_parents": {"P1": "P2", "P2": "P1"}
        }"#;
        assert!(serde_json::from_str::<RigTopology>(json).is_err());
    }
}
