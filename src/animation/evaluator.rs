//! Per-frame evaluation: bracketing keyframes, shaped blend factor, and
//! rest + delta composition.

use super::timeline::KeyframeTimeline;
use super::transform::PartTransform;
use crate::environment::{EnvironmentSnapshot, Lerp};
use crate::rig::{Part, PartMap, RestPoseStore, RigTopology};

/// Output of [`evaluate`]: local transforms and blended environment.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatedFrame {
    pub time: f32,
    /// Mode-shaped blend factor between the bracketing keyframes
    pub blend: f32,
    /// `rest + lerp(delta)` for every active part; zero for inactive parts
    pub transforms: PartMap<PartTransform>,
    pub environment: EnvironmentSnapshot,
}

/// Unshaped progress from `prev_time` to `next_time`, guarded against equal
/// times.
#[inline]
pub fn raw_blend_factor(prev_time: f32, next_time: f32, time: f32) -> f32 {
    let span = next_time - prev_time;
    if span == 0.0 {
        0.0
    } else {
        (time - prev_time) / span
    }
}

/// Evaluate the rig at normalized `time`.
///
/// The earlier keyframe's interpolation mode shapes the factor, and the same
/// shaped factor drives both the pose and the environment blend.
pub fn evaluate(
    timeline: &KeyframeTimeline,
    rest: &RestPoseStore,
    topology: &RigTopology,
    time: f32,
) -> EvaluatedFrame {
    let (prev, next) = timeline.bracket(time);
    let raw_t = raw_blend_factor(prev.time, next.time, time);
    let t = prev.interpolation.shape(raw_t);

    let mut transforms = PartMap::default();
    for part in topology.active_parts() {
        let delta = prev.transform(part).lerp(next.transform(part), t);
        transforms[part] = rest.get(part).add(&delta);
    }

    EvaluatedFrame {
        time,
        blend: t,
        transforms,
        environment: prev.environment.blend(&next.environment, t),
    }
}

/// Interpolated delta of one part at `time`, without the rest transform.
pub fn animated_delta(timeline: &KeyframeTimeline, part: Part, time: f32) -> PartTransform {
    let (prev, next) = timeline.bracket(time);
    let t = prev
        .interpolation
        .shape(raw_blend_factor(prev.time, next.time, time));
    prev.transform(part).lerp(next.transform(part), t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::InterpolationMode;
    use crate::rig::{Axis, Part, RigTemplate, TransformComponent};
    use glam::Vec3;

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    struct Fixture {
        timeline: KeyframeTimeline,
        rest: RestPoseStore,
        topology: RigTopology,
    }

    impl Fixture {
        fn humanoid() -> Self {
            Self {
                timeline: KeyframeTimeline::default(),
                rest: RestPoseStore::new(),
                topology: RigTopology::from_template(RigTemplate::Humanoid),
            }
        }

        /// Keyframe A at 0 and B at 1 with pure position deltas on HEAD.
        fn two_keys(mode: InterpolationMode, pa: Vec3, pb: Vec3) -> Self {
            let mut f = Self::humanoid();
            let env = EnvironmentSnapshot::default();
            f.timeline.update_part_at_time(Part::Head, 0.0, PartTransform::from_position(pa), &env);
            f.timeline.update_part_at_time(Part::Head, 1.0, PartTransform::from_position(pb), &env);
            f.timeline.set_interpolation_mode_at_time(0.0, mode);
            f
        }

        fn eval(&self, time: f32) -> EvaluatedFrame {
            evaluate(&self.timeline, &self.rest, &self.topology, time)
        }
    }

    #[test]
    fn test_raw_blend_factor_guard() {
        assert_eq!(raw_blend_factor(0.5, 0.5, 0.5), 0.0);
        assert_eq!(raw_blend_factor(0.0, 1.0, 0.25), 0.25);
    }

    #[test]
    fn test_single_keyframe_is_stable() {
        let mut f = Fixture::humanoid();
        let env = EnvironmentSnapshot::default();
        let pose = PartTransform::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3));
        f.timeline.update_part_at_time(Part::ArmL, 0.0, pose, &env);

        for time in [0.0, 0.1, 0.5, 0.99, 1.0] {
            assert_eq!(f.eval(time).transforms[Part::ArmL], pose);
        }
    }

    #[test]
    fn test_boundary_clamp_all_modes() {
        let pa = Vec3::new(1.0, 0.0, 0.0);
        let pb = Vec3::new(0.0, 4.0, 0.0);
        for mode in [InterpolationMode::Linear, InterpolationMode::Step, InterpolationMode::Bezier] {
            let f = Fixture::two_keys(mode, pa, pb);
            assert_eq!(f.eval(0.0).transforms[Part::Head].position, pa, "{mode:?}");
            assert_eq!(f.eval(1.0).transforms[Part::Head].position, pb, "{mode:?}");
        }
    }

    #[test]
    fn test_step_holds_previous_pose() {
        let pa = Vec3::new(1.0, 2.0, 3.0);
        let f = Fixture::two_keys(InterpolationMode::Step, pa, Vec3::splat(9.0));
        assert_eq!(f.eval(0.5).transforms[Part::Head].position, pa);
        assert_eq!(f.eval(0.999).transforms[Part::Head].position, pa);
    }

    #[test]
    fn test_linear_midpoint() {
        let pa = Vec3::new(2.0, -2.0, 0.0);
        let pb = Vec3::new(4.0, 6.0, 1.0);
        let f = Fixture::two_keys(InterpolationMode::Linear, pa, pb);
        assert!(approx_vec(f.eval(0.5).transforms[Part::Head].position, (pa + pb) / 2.0));
    }

    #[test]
    fn test_bezier_eases() {
        let f = Fixture::two_keys(InterpolationMode::Bezier, Vec3::ZERO, Vec3::X);
        let quarter = f.eval(0.25).transforms[Part::Head].position.x;
        assert!((quarter - 0.0625).abs() < 1e-5);
        assert!((f.eval(0.5).transforms[Part::Head].position.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_mode_of_previous_keyframe_applies() {
        let mut f = Fixture::two_keys(InterpolationMode::Linear, Vec3::ZERO, Vec3::X);
        // STEP on the later keyframe has no effect on the segment before it
        f.timeline.set_interpolation_mode_at_time(1.0, InterpolationMode::Step);
        assert!((f.eval(0.5).transforms[Part::Head].position.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rest_plus_delta() {
        let mut f = Fixture::two_keys(InterpolationMode::Linear, Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0));
        f.rest.set(Part::Head, TransformComponent::Position, Axis::Y, 10.0);
        f.rest.set(Part::Head, TransformComponent::Rotation, Axis::X, 0.5);

        let head = f.eval(0.5).transforms[Part::Head];
        assert!(approx_vec(head.position, Vec3::new(0.0, 11.0, 0.0)));
        assert!(approx_vec(head.rotation, Vec3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn test_inactive_parts_are_zero() {
        let mut f = Fixture::humanoid();
        f.rest.set(Part::Tail, TransformComponent::Position, Axis::X, 3.0);
        assert!(f.eval(0.3).transforms[Part::Tail].is_zero());
    }

    #[test]
    fn test_environment_follows_shaped_factor() {
        let mut f = Fixture::humanoid();
        f.timeline.add_keyframe(1.0);
        let last = f.timeline.len() - 1;
        let live = EnvironmentSnapshot {
            exposure: 2.2,
            ..Default::default()
        };
        // Refresh the t=1 keyframe with a brighter environment
        f.timeline.update_part_at_time(Part::Root, 1.0, PartTransform::ZERO, &live);
        assert_eq!(f.timeline.keyframes()[last].environment.exposure, 2.2);

        assert!((f.eval(0.5).environment.exposure - 1.7).abs() < 1e-5);

        f.timeline.set_interpolation_mode_at_time(0.0, InterpolationMode::Step);
        assert_eq!(f.eval(0.5).environment.exposure, 1.2);
        assert_eq!(f.eval(0.5).blend, 0.0);
    }

    #[test]
    fn test_animated_delta_excludes_rest() {
        let mut f = Fixture::two_keys(InterpolationMode::Linear, Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0));
        f.rest.set(Part::Head, TransformComponent::Position, Axis::Y, 5.0);

        let delta = animated_delta(&f.timeline, Part::Head, 0.5);
        assert!(approx_vec(delta.position, Vec3::new(0.0, 1.0, 0.0)));
        assert!(approx_vec(f.eval(0.5).transforms[Part::Head].position, Vec3::new(0.0, 6.0, 0.0)));
    }
}
