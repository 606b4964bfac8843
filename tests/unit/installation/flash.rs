use super::*;
use crate::installation::support::*;
use crate::pose::Pose;
use crate::render::DrawOp;

fn run(flash: &mut Flash, rig: &mut TestRig, ctx: &mut CycleContext, dt_ms: f64) -> Phase {
    let mut s = surface();
    pollster::block_on(flash.tick(rig, ctx, dt_ms, &mut s)).unwrap()
}

#[test]
fn captures_once_then_fades() {
    let mut rig = rig(
        InstallationConfig::default(),
        ScriptedEstimator::always(complete_pose()),
    );
    let mut flash = Flash::new(&rig.config);
    let mut ctx = CycleContext::default();

    assert_eq!(run(&mut flash, &mut rig, &mut ctx, 100.0), Phase::Flash);
    assert_eq!(run(&mut flash, &mut rig, &mut ctx, 100.0), Phase::Flash);
    assert_eq!(rig.capture.calls.get(), 1);
    assert_eq!(rig.estimator.calls.get(), 1);
    assert!(ctx.frame.is_some());
    assert!(flash.brightness() < 1.0);
}

#[test]
fn brightness_reaches_zero_then_hands_over() {
    let cfg = InstallationConfig {
        flash_ms: 400.0,
        ..InstallationConfig::default()
    };
    let mut rig = rig(cfg, ScriptedEstimator::always(complete_pose()));
    let mut flash = Flash::new(&rig.config);
    let mut ctx = CycleContext::default();

    assert_eq!(run(&mut flash, &mut rig, &mut ctx, 200.0), Phase::Flash);
    assert_eq!(flash.brightness(), 0.5);
    assert_eq!(run(&mut flash, &mut rig, &mut ctx, 200.0), Phase::ColorSteal);
    assert!(flash.is_at_rest());
    assert!(ctx.frame.is_some());
}

#[test]
fn incomplete_refresh_keeps_the_earlier_pose() {
    let mut rig = rig(
        InstallationConfig::default(),
        ScriptedEstimator::always(pose_without(BodyPart::LeftHip)),
    );
    let mut flash = Flash::new(&rig.config);
    let mut ctx = CycleContext {
        pose: Some(Pose::new(complete_pose())),
        ..CycleContext::default()
    };

    run(&mut flash, &mut rig, &mut ctx, 10.0);
    assert_eq!(ctx.pose.as_ref().map(Pose::len), Some(17));
}

#[test]
fn incomplete_refresh_is_kept_when_nothing_else_exists() {
    let mut rig = rig(
        InstallationConfig::default(),
        ScriptedEstimator::always(pose_without(BodyPart::LeftHip)),
    );
    let mut flash = Flash::new(&rig.config);
    let mut ctx = CycleContext::default();

    run(&mut flash, &mut rig, &mut ctx, 10.0);
    assert_eq!(ctx.pose.as_ref().map(Pose::len), Some(16));
}

#[test]
fn refresh_can_be_disabled() {
    let cfg = InstallationConfig {
        refresh_pose_on_flash: false,
        ..InstallationConfig::default()
    };
    let mut rig = rig(cfg, ScriptedEstimator::always(complete_pose()));
    let mut flash = Flash::new(&rig.config);
    let mut ctx = CycleContext::default();

    run(&mut flash, &mut rig, &mut ctx, 10.0);
    assert_eq!(rig.estimator.calls.get(), 0);
    assert!(ctx.pose.is_none());
    assert!(ctx.frame.is_some());
}

#[test]
fn overlay_is_white_faded_by_brightness() {
    let mut rig = rig(
        InstallationConfig::default(),
        ScriptedEstimator::always(complete_pose()),
    );
    let mut flash = Flash::new(&rig.config);
    let mut ctx = CycleContext::default();
    let mut s = surface();
    pollster::block_on(flash.tick(&mut rig, &mut ctx, 0.0, &mut s)).unwrap();

    let cmds = s.commands();
    assert_eq!(cmds[0].op, DrawOp::Clear(Color::BLACK));
    assert!(matches!(cmds[1].op, DrawOp::Frame { .. }));
    assert_eq!(
        cmds[2].op,
        DrawOp::FillRect {
            rect: canvas().rect(),
            color: Color::WHITE,
        }
    );
}

#[test]
fn failed_capture_leaves_flash_unstarted() {
    let mut rig = rig(
        InstallationConfig::default(),
        ScriptedEstimator::always(complete_pose()),
    );
    rig.capture.failures.set(1);
    let mut flash = Flash::new(&rig.config);
    let mut ctx = CycleContext::default();
    let mut s = surface();

    assert!(pollster::block_on(flash.tick(&mut rig, &mut ctx, 100.0, &mut s)).is_err());
    assert!(flash.is_at_rest());
    assert!(ctx.frame.is_none());

    assert_eq!(run(&mut flash, &mut rig, &mut ctx, 100.0), Phase::Flash);
    assert_eq!(rig.capture.calls.get(), 2);
}
