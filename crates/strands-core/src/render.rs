//! Turning thread state into stroke commands.
//!
//! The renderer never touches simulation state. It resolves a colour and
//! width per segment (lighting, depth opacity, tip fade), merges runs of
//! identically styled segments into one path and hands them to a [`Surface`].

use glam::Vec2;
use smallvec::SmallVec;

use crate::color::Rgba;
use crate::config::{ClearPolicy, LightingConfig, RenderConfig};
use crate::math::{direction, normal_of, reflect};
use crate::thread::Thread;

/// One piece of a stroked path, continuing from the previous end point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathPiece {
    Line(Vec2),
    Quad { ctrl: Vec2, to: Vec2 },
}

impl PathPiece {
    pub fn end(&self) -> Vec2 {
        match *self {
            PathPiece::Line(to) | PathPiece::Quad { to, .. } => to,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
}

/// A recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    Fade(f32),
    Stroke {
        start: Vec2,
        pieces: SmallVec<[PathPiece; 8]>,
        style: StrokeStyle,
    },
}

/// Something strokes can be drawn onto, in css pixels.
pub trait Surface {
    /// Paint the whole surface with `color`.
    fn clear(&mut self, color: Rgba);
    /// Multiply the alpha of everything already drawn by `1 - amount`.
    fn fade(&mut self, amount: f32);
    fn stroke(&mut self, start: Vec2, pieces: &[PathPiece], style: &StrokeStyle);
}

/// Surface that just records what it was asked to draw.
#[derive(Clone, Debug, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn strokes(&self) -> impl Iterator<Item = (&Vec2, &[PathPiece], &StrokeStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke {
                start,
                pieces,
                style,
            } => Some((start, pieces.as_slice(), style)),
            _ => None,
        })
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl Surface for CommandRecorder {
    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fade(&mut self, amount: f32) {
        self.commands.push(DrawCommand::Fade(amount));
    }

    fn stroke(&mut self, start: Vec2, pieces: &[PathPiece], style: &StrokeStyle) {
        self.commands.push(DrawCommand::Stroke {
            start,
            pieces: SmallVec::from_slice(pieces),
            style: *style,
        });
    }
}

/// Linear alpha ramp over the first and last `tip` segments of `count`.
#[inline]
pub fn tip_fade(index: usize, count: usize, tip: usize) -> f32 {
    if tip == 0 || count == 0 {
        return 1.0;
    }
    let from_start = index as f32 / tip as f32;
    let from_end = (count - 1 - index.min(count - 1)) as f32 / tip as f32;
    from_start.min(from_end).min(1.0)
}

/// Brightness multiplier for a segment running along `tangent`.
///
/// Diffuse is two-sided so a strand looks the same whichever way it was laid out.
pub fn lighting_intensity(tangent: Vec2, light: &LightingConfig, specular_exponent: f32) -> f32 {
    let Some(t) = direction(tangent) else {
        return light.ambient;
    };
    let n = normal_of(t);
    let diffuse = n.dot(-light.light_dir).abs();
    let r = reflect(light.light_dir, n);
    let specular = r.dot(light.view_dir).max(0.0).powf(specular_exponent);
    light.ambient + light.diffuse * diffuse + light.specular * specular
}

pub struct Renderer {
    config: RenderConfig,
    pieces: Vec<PathPiece>,
    styles: Vec<StrokeStyle>,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            pieces: Vec::new(),
            styles: Vec::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Clear or fade the previous frame, then stroke every thread.
    /// Returns the number of stroke calls issued.
    pub fn draw<S: Surface + ?Sized>(&mut self, threads: &[Thread], surface: &mut S) -> usize {
        match self.config.clear {
            ClearPolicy::Opaque(color) => surface.clear(color),
            ClearPolicy::Fade(amount) => surface.fade(amount),
        }
        threads.iter().map(|t| self.draw_thread(t, surface)).sum()
    }

    fn draw_thread<S: Surface + ?Sized>(&mut self, thread: &Thread, surface: &mut S) -> usize {
        let points = &thread.points;
        if points.len() < 2 {
            return 0;
        }
        self.build_pieces(thread);
        self.resolve_styles(thread);

        let mut strokes = 0;
        let mut start = points[0].pos;
        let mut run_start = 0;
        for i in 1..=self.pieces.len() {
            let run_ends = i == self.pieces.len() || self.styles[i] != self.styles[run_start];
            if !run_ends {
                continue;
            }
            let style = self.styles[run_start];
            let run = &self.pieces[run_start..i];
            if style.color.a > 0.0 && style.width > 0.0 {
                surface.stroke(start, run, &style);
                strokes += 1;
            }
            start = run[run.len() - 1].end();
            run_start = i;
        }
        strokes
    }

    /// One piece per segment. Smoothed paths curve through segment midpoints
    /// using the shared point as control.
    fn build_pieces(&mut self, thread: &Thread) {
        let pts = &thread.points;
        let last = pts.len() - 1;
        self.pieces.clear();
        if self.config.smooth_curves {
            for i in 1..last {
                let ctrl = pts[i].pos;
                let to = (pts[i].pos + pts[i + 1].pos) * 0.5;
                self.pieces.push(PathPiece::Quad { ctrl, to });
            }
            self.pieces.push(PathPiece::Line(pts[last].pos));
        } else {
            self.pieces
                .extend(pts[1..].iter().map(|p| PathPiece::Line(p.pos)));
        }
    }

    fn resolve_styles(&mut self, thread: &Thread) {
        let cfg = &self.config;
        let style = &thread.style;
        let base = Rgba {
            rgb: style.rgb,
            a: cfg.base_alpha * style.opacity,
        };
        let count = thread.points.len() - 1;
        self.styles.clear();
        self.styles.extend(thread.points.windows(2).enumerate().map(|(k, w)| {
            let mut color = match &cfg.lighting {
                Some(light) => {
                    let tangent = w[1].pos - w[0].pos;
                    base.lit(lighting_intensity(tangent, light, style.specular_exponent))
                }
                None => base,
            };
            color.a = (base.a * tip_fade(k, count, cfg.tip_fade_segments)).clamp(0.0, 1.0);
            StrokeStyle {
                color,
                width: style.width,
            }
        }));
    }
}
