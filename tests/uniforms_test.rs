mod common;

use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};
use common::test_utils::assert_close;
use spin_demos::{
    demos::Triangles,
    params::RenderParams,
    uniforms::{
        TexturedUniforms, array_offset, element_offset, model_matrix, projection_matrix,
        shader_time, view_matrix,
    },
};

#[test]
fn offsets_at_time_zero() {
    // sin(0) vanishes, cos(0) is 1
    assert_eq!(array_offset(0.0), [-0.5, 0.0]);
    assert_eq!(element_offset(0.0), [1.0, 0.0]);
}

#[test]
fn offsets_follow_closed_form() {
    for t in [0.25_f32, 1.0, 3.7, 120.5] {
        let [ax, ay] = array_offset(t);
        assert_close(ax, -0.5);
        assert_close(ay, (t * 4.0).sin() * 0.5);

        let [ex, ey] = element_offset(t);
        assert_close(ex, (t * 4.0).cos() * 0.5 + 0.5);
        assert_close(ey, (t * 4.0).sin() * 0.5);
    }
}

#[test]
fn offsets_have_no_hidden_state() {
    let t1 = 0.8;
    let t2 = 2.3;
    let first = (Triangles::offsets(t1), Triangles::offsets(t2));
    let second = (Triangles::offsets(t1), Triangles::offsets(t2));
    assert_eq!(first, second);
    assert_eq!(Triangles::offsets(t1)[0].offset, array_offset(t1));
    assert_eq!(Triangles::offsets(t1)[1].offset, element_offset(t1));
}

#[test]
fn shader_time_runs_twice_as_fast() {
    assert_eq!(shader_time(0.0), 0.0);
    assert_close(shader_time(1.25), 2.5);
}

#[test]
fn model_starts_unrotated() {
    let params = RenderParams::default();
    assert_eq!(model_matrix(&params, 0.0), Matrix4::identity());
}

#[test]
fn model_spins_about_z_at_spin_rate() {
    let params = RenderParams {
        spin_rate: 60.0,
        ..RenderParams::default()
    };
    // 1.5 s at 60 deg/s is a quarter turn
    let rotated = model_matrix(&params, 1.5) * Vector4::new(1.0, 0.0, 0.0, 1.0);
    assert_close(rotated.x, 0.0);
    assert_close(rotated.y, 1.0);
    assert_close(rotated.z, 0.0);
}

#[test]
fn model_applies_size() {
    let params = RenderParams {
        size: 2.0,
        ..RenderParams::default()
    };
    let scaled = model_matrix(&params, 0.0) * Vector4::new(0.5, 0.0, 0.0, 1.0);
    assert_close(scaled.x, 1.0);
}

#[test]
fn view_looks_at_origin() {
    let view = view_matrix([1.0, 1.0, 1.0]);
    let origin = view * Vector4::new(0.0, 0.0, 0.0, 1.0);
    // The origin lies straight ahead on the negative view axis.
    assert_close(origin.x, 0.0);
    assert_close(origin.y, 0.0);
    assert_close(origin.z, -Vector3::new(1.0_f32, 1.0, 1.0).magnitude());
}

#[test]
fn projection_maps_near_and_far_to_unit_depth() {
    let proj = projection_matrix(800.0 / 600.0);
    let near = proj * Vector4::new(0.0, 0.0, -1.0, 1.0);
    let far = proj * Vector4::new(0.0, 0.0, -10.0, 1.0);
    assert_close(near.z / near.w, 0.0);
    assert_close(far.z / far.w, 1.0);
}

#[test]
fn textured_uniforms_carry_params() {
    let params = RenderParams {
        force: 0.3,
        amp: 2.0,
        mix: 0.5,
        ..RenderParams::default()
    };
    let uniforms = TexturedUniforms::compute(&params, 2.0, 1.0);
    assert_eq!(std::mem::size_of::<TexturedUniforms>(), 208);
    assert_close(uniforms.time, 4.0);
    assert_close(uniforms.force, 0.3);
    assert_close(uniforms.amp, 2.0);
    assert_close(uniforms.mix, 0.5);

    let again = TexturedUniforms::compute(&params, 2.0, 1.0);
    assert_eq!(uniforms, again);
}
