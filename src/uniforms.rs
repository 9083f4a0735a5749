//! Per-frame uniform values.
//!
//! Every value here is a pure function of the elapsed time `t` (seconds since
//! the context was created) and the current [`RenderParams`]. Nothing is
//! accumulated between frames.

use cgmath::{Deg, EuclideanSpace, Matrix4, Point3, Quaternion, Rotation3, Vector3};

use crate::params::RenderParams;

/// cgmath builds projections for a [-1, 1] depth range; wgpu clips to [0, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Angular frequency of the triangle wobble, in radians per second.
pub const WOBBLE_RATE: f32 = 4.0;
pub const WOBBLE_AMPLITUDE: f32 = 0.5;

pub const FOV_Y: Deg<f32> = Deg(45.0);
pub const Z_NEAR: f32 = 1.0;
pub const Z_FAR: f32 = 10.0;

/// Offset of the triangle drawn from the raw vertex array.
pub fn array_offset(t: f32) -> [f32; 2] {
    [-0.5, (t * WOBBLE_RATE).sin() * WOBBLE_AMPLITUDE]
}

/// Offset of the triangle drawn through the element buffer.
pub fn element_offset(t: f32) -> [f32; 2] {
    let phase = t * WOBBLE_RATE;
    [
        phase.cos() * WOBBLE_AMPLITUDE + 0.5,
        phase.sin() * WOBBLE_AMPLITUDE,
    ]
}

/// Uniform block of the triangles program; one per draw slot.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OffsetUniform {
    pub offset: [f32; 2],
    pub _padding: [f32; 2],
}

impl OffsetUniform {
    pub fn new(offset: [f32; 2]) -> Self {
        Self {
            offset,
            _padding: [0.0; 2],
        }
    }
}

/// Time value fed to the distortion wave.
pub fn shader_time(t: f32) -> f32 {
    t * 2.0
}

/// Rotation about +Z after `t` seconds at `rate` degrees per second.
pub fn spin(t: f32, rate: f32) -> Quaternion<f32> {
    Quaternion::from_angle_z(Deg(rate * t))
}

pub fn model_matrix(params: &RenderParams, t: f32) -> Matrix4<f32> {
    let rotation = params.orientation() * spin(t, params.spin_rate);
    Matrix4::from(rotation) * Matrix4::from_scale(params.size)
}

/// Look at the origin from the camera position with +Z up.
pub fn view_matrix(camera_position: [f32; 3]) -> Matrix4<f32> {
    Matrix4::look_at_rh(
        Point3::from(camera_position),
        Point3::origin(),
        Vector3::unit_z(),
    )
}

pub fn projection_matrix(aspect: f32) -> Matrix4<f32> {
    OPENGL_TO_WGPU_MATRIX * cgmath::perspective(FOV_Y, aspect, Z_NEAR, Z_FAR)
}

/// Uniform block shared by both stages of the textured program.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TexturedUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub time: f32,
    pub force: f32,
    pub amp: f32,
    pub mix: f32,
}

impl TexturedUniforms {
    pub fn compute(params: &RenderParams, t: f32, aspect: f32) -> Self {
        Self {
            model: model_matrix(params, t).into(),
            view: view_matrix(params.camera_position).into(),
            proj: projection_matrix(aspect).into(),
            time: shader_time(t),
            force: params.force,
            amp: params.amp,
            mix: params.mix,
        }
    }
}
