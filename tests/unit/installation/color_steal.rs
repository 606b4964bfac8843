use super::*;
use crate::installation::support::*;
use crate::palette::HistogramSampler;
use crate::pose::BodyPart;
use crate::render::DrawOp;

fn fast_config() -> InstallationConfig {
    InstallationConfig {
        outline_ms: 100.0,
        reveal_ms: 100.0,
        highlight_ms: 100.0,
        rect_scale_ms: 100.0,
        rect_translate_ms: 100.0,
        ..InstallationConfig::default()
    }
}

fn captured() -> CycleContext {
    CycleContext {
        frame: Some(banded_frame(canvas())),
        pose: Some(Pose::new(complete_pose())),
        hold_ms: 0.0,
    }
}

fn run(
    steal: &mut ColorSteal,
    rig: &mut TestRig,
    ctx: &mut CycleContext,
    dt_ms: f64,
) -> BoothResult<Phase> {
    let mut s = surface();
    pollster::block_on(steal.tick(rig, ctx, dt_ms, &mut s))
}

#[test]
fn result_slots_stack_down_the_right_edge() {
    assert_eq!(result_slot(canvas(), 32.0, 0), Point::new(196.0, 20.0));
    assert_eq!(result_slot(canvas(), 32.0, 2), Point::new(196.0, 164.0));
}

#[test]
fn animation_is_outlines_then_palettes() {
    let pose = Pose::new(complete_pose());
    let boxes = region_boxes(&pose).unwrap();
    let samples =
        sample_regions(&HistogramSampler::default(), &banded_frame(canvas()), &boxes).unwrap();
    let anim = steal_animation(&InstallationConfig::default(), canvas(), &boxes, &samples);

    let stages: Vec<&str> = anim.children().iter().map(|c| c.name()).collect();
    assert_eq!(stages, ["outlines", "palettes"]);
    assert!(!anim.is_finished());
}

#[test]
fn first_tick_builds_without_advancing() {
    let mut rig = rig(fast_config(), ScriptedEstimator::always(complete_pose()));
    let mut steal = ColorSteal::default();
    let mut ctx = captured();

    assert!(steal.is_building());
    assert_eq!(run(&mut steal, &mut rig, &mut ctx, 10_000.0).unwrap(), Phase::ColorSteal);
    assert!(!steal.is_building());
    assert_eq!(rig.estimator.calls.get(), 0);
    assert!(ctx.pose.is_some());
}

#[test]
fn regions_above_the_frame_build_without_retrying() {
    let raised: Vec<_> = complete_pose()
        .into_iter()
        .map(|mut k| {
            k.position.y -= 45.0;
            k
        })
        .collect();
    let mut rig = rig(fast_config(), ScriptedEstimator::always(raised.clone()));
    let mut steal = ColorSteal::default();
    let mut ctx = CycleContext {
        pose: Some(Pose::new(raised)),
        ..captured()
    };

    assert_eq!(run(&mut steal, &mut rig, &mut ctx, 16.0).unwrap(), Phase::ColorSteal);
    assert!(!steal.is_building());
    assert_eq!(rig.estimator.calls.get(), 0);
}

#[test]
fn finishing_emits_one_swatch_and_rests() {
    let mut rig = rig(fast_config(), ScriptedEstimator::always(complete_pose()));
    let rec = Recorder::default();
    rec.attach(&mut rig);
    let mut steal = ColorSteal::default();
    let mut ctx = captured();

    let mut phase = Phase::ColorSteal;
    let mut ticks = 0;
    while phase == Phase::ColorSteal && ticks < 200 {
        phase = run(&mut steal, &mut rig, &mut ctx, 20.0).unwrap();
        ticks += 1;
    }
    assert_eq!(phase, Phase::Idle);
    assert_eq!(rec.results.borrow().len(), 1);
    assert!(steal.is_at_rest());
    assert!(ctx.is_empty());

    let pose = Pose::new(complete_pose());
    let boxes = region_boxes(&pose).unwrap();
    let samples =
        sample_regions(&HistogramSampler::default(), &banded_frame(canvas()), &boxes).unwrap();
    assert_eq!(rec.results.borrow()[0], Swatch::from_samples(&samples));
}

#[test]
fn swatches_land_in_the_result_column() {
    let mut rig = rig(fast_config(), ScriptedEstimator::always(complete_pose()));
    let mut steal = ColorSteal::default();
    let mut ctx = captured();

    let mut s = surface();
    let mut phase = Phase::ColorSteal;
    let mut ticks = 0;
    while phase == Phase::ColorSteal && ticks < 200 {
        s.take();
        phase = pollster::block_on(steal.tick(&mut rig, &mut ctx, 20.0, &mut s)).unwrap();
        ticks += 1;
    }
    assert_eq!(phase, Phase::Idle);

    // the last frame still shows every rectangle at rest in its slot
    let box_size = rig.config.box_size;
    let mut rows: Vec<f64> = s
        .commands()
        .iter()
        .filter_map(|c| match c.op {
            DrawOp::FillRect { rect, .. }
                if (rect.width() - box_size * 2.0).abs() < 1e-9
                    && (rect.x0 - result_slot(canvas(), box_size, 0).x).abs() < 1e-9 =>
            {
                Some(rect.y0)
            }
            _ => None,
        })
        .collect();
    rows.sort_by(f64::total_cmp);
    rows.dedup();
    let expected: Vec<f64> = (0..6).map(|i| result_slot(canvas(), box_size, i).y).collect();
    assert_eq!(rows, expected);
}

#[test]
fn missing_frame_abandons_the_cycle() {
    let mut rig = rig(fast_config(), ScriptedEstimator::always(complete_pose()));
    let mut steal = ColorSteal::default();
    let mut ctx = CycleContext {
        pose: Some(Pose::new(complete_pose())),
        ..CycleContext::default()
    };
    assert_eq!(run(&mut steal, &mut rig, &mut ctx, 16.0).unwrap(), Phase::Idle);
    assert!(ctx.is_empty());
}

#[test]
fn unusable_pose_is_retried_then_abandoned() {
    let cfg = InstallationConfig {
        max_pose_retries: 2,
        ..fast_config()
    };
    let mut rig = rig(cfg, ScriptedEstimator::always(pose_without(BodyPart::LeftEar)));
    let rec = Recorder::default();
    rec.attach(&mut rig);
    let mut steal = ColorSteal::default();
    let mut ctx = captured();
    ctx.pose = Some(Pose::new(pose_without(BodyPart::LeftEar)).confident(0.6));

    let err = run(&mut steal, &mut rig, &mut ctx, 16.0).unwrap_err();
    assert!(err.is_transient());
    assert_eq!(steal.retries(), 1);
    assert!(ctx.pose.is_none());
    assert_eq!(rig.estimator.calls.get(), 0);

    assert!(run(&mut steal, &mut rig, &mut ctx, 16.0).is_err());
    assert_eq!(steal.retries(), 2);
    assert_eq!(rig.estimator.calls.get(), 1);

    assert_eq!(run(&mut steal, &mut rig, &mut ctx, 16.0).unwrap(), Phase::Idle);
    assert!(steal.is_at_rest());
    assert!(ctx.is_empty());
    assert!(rec.results.borrow().is_empty());
}

#[test]
fn a_fresh_pose_recovers_after_a_retry() {
    let estimator = ScriptedEstimator::always(complete_pose());
    let mut rig = rig(fast_config(), estimator);
    let mut steal = ColorSteal::default();
    let mut ctx = captured();
    ctx.pose = Some(Pose::new(pose_without(BodyPart::LeftEar)).confident(0.6));

    assert!(run(&mut steal, &mut rig, &mut ctx, 16.0).is_err());
    assert_eq!(run(&mut steal, &mut rig, &mut ctx, 16.0).unwrap(), Phase::ColorSteal);
    assert!(!steal.is_building());
    assert_eq!(steal.retries(), 1);
}
