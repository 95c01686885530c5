// Host-side tests for the stroke renderer, recorded through `CommandRecorder`.

use glam::{Vec2, Vec3};
use strands_core::{
    ClearPolicy, CommandRecorder, DrawCommand, LightingConfig, PathPiece, Point, RenderConfig, Renderer, Rgba, Thread,
    ThreadStyle,
};

fn thread(points: &[Vec2], opacity: f32) -> Thread {
    Thread {
        points: points.iter().map(|&p| Point::at(p)).collect(),
        style: ThreadStyle {
            width: 2.0,
            hue: 210.0,
            rgb: Vec3::new(0.2, 0.5, 0.9),
            depth: 1,
            opacity,
            specular_exponent: 12.0,
        },
        target_offset: Vec2::ZERO,
        drift: Vec2::X,
        length_factor: 1.0,
    }
}

fn straight(n: usize) -> Vec<Vec2> {
    (0..n).map(|i| Vec2::new(10.0 * i as f32, 50.0)).collect()
}

fn flat_config() -> RenderConfig {
    RenderConfig {
        clear: ClearPolicy::Opaque(Rgba::new(0.0, 0.0, 0.0, 1.0)),
        lighting: None,
        smooth_curves: false,
        tip_fade_segments: 0,
        base_alpha: 1.0,
        ..Default::default()
    }
}

#[test]
fn opaque_policy_clears_before_strokes() {
    let mut renderer = Renderer::new(flat_config());
    let mut rec = CommandRecorder::default();
    let strokes = renderer.draw(&[thread(&straight(4), 1.0)], &mut rec);

    assert_eq!(strokes, 1);
    assert_eq!(rec.commands[0], DrawCommand::Clear(Rgba::new(0.0, 0.0, 0.0, 1.0)));
    assert_eq!(rec.commands.len(), 2);
}

#[test]
fn fade_policy_emits_fade_pass() {
    let cfg = RenderConfig {
        clear: ClearPolicy::Fade(0.25),
        ..flat_config()
    };
    let mut renderer = Renderer::new(cfg);
    let mut rec = CommandRecorder::default();
    renderer.draw(&[], &mut rec);
    assert_eq!(rec.commands, vec![DrawCommand::Fade(0.25)]);
}

#[test]
fn flat_thread_is_one_batched_path() {
    let pts = straight(6);
    let mut renderer = Renderer::new(flat_config());
    let mut rec = CommandRecorder::default();
    renderer.draw(&[thread(&pts, 1.0)], &mut rec);

    let strokes: Vec<_> = rec.strokes().collect();
    assert_eq!(strokes.len(), 1);
    let (start, pieces, style) = strokes[0];
    assert_eq!(*start, pts[0]);
    assert_eq!(pieces.len(), 5);
    assert_eq!(pieces[4], PathPiece::Line(pts[5]));
    assert_eq!(style.width, 2.0);
    assert_eq!(style.color.a, 1.0);
}

#[test]
fn tip_fade_splits_and_drops_transparent_ends() {
    let cfg = RenderConfig {
        tip_fade_segments: 2,
        ..flat_config()
    };
    let pts = straight(10);
    let mut renderer = Renderer::new(cfg);
    let mut rec = CommandRecorder::default();
    let count = renderer.draw(&[thread(&pts, 1.0)], &mut rec);

    let strokes: Vec<_> = rec.strokes().collect();
    assert_eq!(count, 3);
    assert_eq!(strokes.len(), 3);

    let alphas: Vec<f32> = strokes.iter().map(|(_, _, s)| s.color.a).collect();
    assert!((alphas[0] - 0.5).abs() < 1e-6);
    assert_eq!(alphas[1], 1.0);
    assert!((alphas[2] - 0.5).abs() < 1e-6);

    // Runs stay connected: each stroke starts where the previous piece ended.
    assert_eq!(*strokes[0].0, pts[1]);
    assert_eq!(*strokes[1].0, pts[2]);
    assert_eq!(strokes[1].1.len(), 5);
    assert_eq!(*strokes[2].0, pts[7]);
}

#[test]
fn smooth_curves_pass_through_midpoints() {
    let cfg = RenderConfig {
        smooth_curves: true,
        ..flat_config()
    };
    let pts = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(20.0, 10.0),
        Vec2::new(30.0, 10.0),
        Vec2::new(40.0, 0.0),
    ];
    let mut renderer = Renderer::new(cfg);
    let mut rec = CommandRecorder::default();
    renderer.draw(&[thread(&pts, 1.0)], &mut rec);

    let (_, pieces, _) = rec.strokes().next().unwrap();
    assert_eq!(pieces.len(), 4);
    assert_eq!(
        pieces[0],
        PathPiece::Quad {
            ctrl: pts[1],
            to: Vec2::new(15.0, 5.0)
        }
    );
    assert_eq!(pieces[3], PathPiece::Line(pts[4]));
}

#[test]
fn lighting_varies_with_orientation_and_stays_in_range() {
    let cfg = RenderConfig {
        lighting: Some(LightingConfig::default()),
        ..flat_config()
    };
    let pts = vec![Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), Vec2::new(20.0, 20.0), Vec2::new(35.0, 35.0)];
    let mut renderer = Renderer::new(cfg);
    let mut rec = CommandRecorder::default();
    renderer.draw(&[thread(&pts, 1.0)], &mut rec);

    let colors: Vec<Rgba> = rec.strokes().map(|(_, _, s)| s.color).collect();
    assert!(colors.len() >= 2, "lit segments should not all share a colour");
    for c in &colors {
        assert!(c.rgb.min_element() >= 0.0 && c.rgb.max_element() <= 1.0);
    }
}

#[test]
fn depth_opacity_scales_alpha() {
    let cfg = RenderConfig {
        base_alpha: 0.8,
        ..flat_config()
    };
    let mut renderer = Renderer::new(cfg);
    let mut rec = CommandRecorder::default();
    renderer.draw(&[thread(&straight(3), 0.5)], &mut rec);
    let (_, _, style) = rec.strokes().next().unwrap();
    assert!((style.color.a - 0.4).abs() < 1e-6);
}

#[test]
fn single_point_threads_draw_nothing() {
    let mut renderer = Renderer::new(flat_config());
    let mut rec = CommandRecorder::default();
    assert_eq!(renderer.draw(&[thread(&[Vec2::ONE], 1.0)], &mut rec), 0);
    assert_eq!(rec.strokes().count(), 0);
}
