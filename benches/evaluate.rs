use criterion::{criterion_group, criterion_main, Criterion, black_box};

use voxrig::animation::{evaluate, InterpolationMode, KeyframeTimeline, PartTransform};
use voxrig::environment::EnvironmentSnapshot;
use voxrig::rig::{Part, RestPoseStore, RigTemplate, RigTopology};
use voxrig::scene::{ModelTransform, RigHierarchy};
use voxrig::studio::StudioState;

use glam::Vec3;

/// Spider rig with a keyframe every 0.1 and every leg posed.
fn spider_fixture() -> (KeyframeTimeline, RestPoseStore, RigTopology) {
    let env = EnvironmentSnapshot::default();
    let topology = RigTopology::from_template(RigTemplate::Spider);
    let mut timeline = KeyframeTimeline::new(env.clone());

    for step in 1..=10 {
        let time = step as f32 / 10.0;
        for (i, part) in topology.active_parts().enumerate() {
            let angle = (step + i) as f32 * 0.3;
            let pose = PartTransform::new(Vec3::new(0.0, angle.sin(), 0.0), Vec3::new(angle, 0.0, 0.0));
            timeline.update_part_at_time(part, time, pose, &env);
        }
        timeline.set_interpolation_mode_at_time(time, InterpolationMode::Bezier);
    }

    (timeline, RestPoseStore::new(), topology)
}

fn bench_evaluate(c: &mut Criterion) {
    let (timeline, rest, topology) = spider_fixture();

    c.bench_function("evaluate_spider_11_keyframes", |b| {
        let mut time = 0.0f32;
        b.iter(|| {
            time = (time + 0.013) % 1.0;
            evaluate(black_box(&timeline), &rest, &topology, black_box(time))
        });
    });
}

fn bench_compose(c: &mut Criterion) {
    let (timeline, rest, topology) = spider_fixture();
    let hierarchy = RigHierarchy::build(&topology);
    let root = ModelTransform::default().root_matrix();
    let frame = evaluate(&timeline, &rest, &topology, 0.37);

    c.bench_function("compose_spider", |b| {
        b.iter(|| hierarchy.compose(black_box(&frame.transforms), root));
    });
}

fn bench_studio_tick(c: &mut Criterion) {
    let mut studio = StudioState::default();
    studio.load_sample("robot");
    studio.set_auto_keyframe(true);
    studio.seek(0.5);
    let _ = studio.pose_part(Part::ArmR, PartTransform::from_rotation(Vec3::Y));
    studio.set_show_skeleton(true);
    studio.play();

    c.bench_function("studio_tick_robot", |b| {
        b.iter(|| studio.tick(black_box(1.0 / 60.0)));
    });
}

criterion_group!(benches, bench_evaluate, bench_compose, bench_studio_tick);
criterion_main!(benches);
