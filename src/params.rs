//! Tweakable render parameters.
//!
//! A single [`RenderParams`] value is owned by the demo. The GUI edits it
//! through `&mut`, keyboard shortcuts go through [`RenderParams::apply`], and
//! the uniform update reads it through `&`.

use std::ops::RangeInclusive;

use cgmath::{Deg, Quaternion, Rotation3};

use crate::config::SceneConfig;

/// Bounds and step of a numeric parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Move `value` by `steps` increments, snapped to the step grid and clamped.
    pub fn step(&self, value: f32, steps: i32) -> f32 {
        let snapped = ((value / self.step).round() + steps as f32) * self.step;
        self.clamp(snapped)
    }

    pub fn range(&self) -> RangeInclusive<f32> {
        self.min..=self.max
    }
}

pub const FORCE_RANGE: ParamRange = ParamRange::new(0.01, 1.0, 0.01);
pub const AMP_RANGE: ParamRange = ParamRange::new(0.01, 10.0, 0.01);
pub const SIZE_RANGE: ParamRange = ParamRange::new(0.1, 5.0, 0.1);
pub const MIX_RANGE: ParamRange = ParamRange::new(0.0, 1.0, 0.01);

/// Single-key parameter edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    ToggleWireframe,
    ForceUp,
    ForceDown,
    AmpUp,
    AmpDown,
}

impl Shortcut {
    /// Map the text produced by a key press. Case matters: `f` increases, `F` decreases.
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "w" | "W" => Some(Shortcut::ToggleWireframe),
            "f" => Some(Shortcut::ForceUp),
            "F" => Some(Shortcut::ForceDown),
            "a" => Some(Shortcut::AmpUp),
            "A" => Some(Shortcut::AmpDown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub wireframe: bool,
    pub background: [f32; 3],
    pub force: f32,
    pub amp: f32,
    pub size: f32,
    pub mix: f32,
    /// Euler angles in degrees, applied x, then y, then z.
    pub rotation: [f32; 3],
    pub camera_position: [f32; 3],
    /// Degrees per second about +Z.
    pub spin_rate: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self::from(&SceneConfig::default())
    }
}

impl From<&SceneConfig> for RenderParams {
    fn from(scene: &SceneConfig) -> Self {
        Self {
            wireframe: scene.wireframe,
            background: scene.background,
            force: FORCE_RANGE.clamp(scene.force),
            amp: AMP_RANGE.clamp(scene.amp),
            size: SIZE_RANGE.clamp(scene.size),
            mix: MIX_RANGE.clamp(scene.mix),
            rotation: scene.rotation,
            camera_position: scene.camera_position,
            spin_rate: scene.spin_rate,
        }
    }
}

impl RenderParams {
    pub fn apply(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::ToggleWireframe => self.wireframe = !self.wireframe,
            Shortcut::ForceUp => self.force = FORCE_RANGE.step(self.force, 1),
            Shortcut::ForceDown => self.force = FORCE_RANGE.step(self.force, -1),
            Shortcut::AmpUp => self.amp = AMP_RANGE.step(self.amp, 1),
            Shortcut::AmpDown => self.amp = AMP_RANGE.step(self.amp, -1),
        }
    }

    /// User rotation as a quaternion.
    pub fn orientation(&self) -> Quaternion<f32> {
        let [x, y, z] = self.rotation;
        Quaternion::from_angle_z(Deg(z))
            * Quaternion::from_angle_y(Deg(y))
            * Quaternion::from_angle_x(Deg(x))
    }

    pub fn clear_colour(&self) -> wgpu::Color {
        let [r, g, b] = self.background;
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        }
    }
}
