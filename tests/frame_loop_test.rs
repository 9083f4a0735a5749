use spin_demos::{
    context::resize_config,
    flow::{FrameLoop, KeyAction, LoopControl, LoopState, route_key},
    params::Shortcut,
};
use winit::keyboard::{Key, NamedKey};

#[test]
fn starts_running() {
    let frame_loop = FrameLoop::new();
    assert_eq!(frame_loop.state(), LoopState::Running);
    assert!(frame_loop.can_draw());
    assert_eq!(frame_loop.frames(), 0);
}

#[test]
fn keeps_running_without_close_request() {
    let mut frame_loop = FrameLoop::new();
    for _ in 0..5 {
        assert!(frame_loop.can_draw());
        assert_eq!(frame_loop.finish_iteration(), LoopControl::Continue);
    }
    assert_eq!(frame_loop.frames(), 5);
    assert_eq!(frame_loop.state(), LoopState::Running);
}

#[test]
fn close_mid_iteration_finishes_that_iteration() {
    let mut frame_loop = FrameLoop::new();
    frame_loop.finish_iteration();

    // Escape arrives while the second iteration is in progress.
    frame_loop.request_close();
    assert_eq!(frame_loop.state(), LoopState::Closing);
    assert!(frame_loop.can_draw(), "current iteration still draws and presents");

    assert_eq!(frame_loop.finish_iteration(), LoopControl::Exit);
    assert_eq!(frame_loop.frames(), 2);
    assert_eq!(frame_loop.state(), LoopState::Exited);
    assert!(!frame_loop.can_draw());
}

#[test]
fn no_draws_after_exit() {
    let mut frame_loop = FrameLoop::new();
    frame_loop.request_close();
    assert_eq!(frame_loop.finish_iteration(), LoopControl::Exit);

    let mut issued = 0;
    for _ in 0..3 {
        if frame_loop.can_draw() {
            issued += 1;
        }
        assert_eq!(frame_loop.finish_iteration(), LoopControl::Exit);
    }
    assert_eq!(issued, 0);
    assert_eq!(frame_loop.frames(), 1);
}

#[test]
fn repeated_close_requests_are_idempotent() {
    let mut frame_loop = FrameLoop::new();
    frame_loop.request_close();
    frame_loop.request_close();
    assert_eq!(frame_loop.state(), LoopState::Closing);
    assert_eq!(frame_loop.finish_iteration(), LoopControl::Exit);

    frame_loop.request_close();
    assert_eq!(frame_loop.state(), LoopState::Exited);
}

#[test]
fn escape_closes_even_when_the_gui_has_the_key() {
    let escape = Key::Named(NamedKey::Escape);
    assert_eq!(route_key(&escape, false), KeyAction::Close);
    assert_eq!(route_key(&escape, true), KeyAction::Close);
}

#[test]
fn consumed_keys_do_not_fire_shortcuts() {
    let w = Key::Character("w".into());
    assert_eq!(route_key(&w, false), KeyAction::Shortcut(Shortcut::ToggleWireframe));
    assert_eq!(route_key(&w, true), KeyAction::Ignore);
    assert_eq!(route_key(&Key::Character("F".into()), false), KeyAction::Shortcut(Shortcut::ForceDown));
    assert_eq!(route_key(&Key::Character("x".into()), false), KeyAction::Ignore);
    assert_eq!(route_key(&Key::Named(NamedKey::Enter), false), KeyAction::Ignore);
}

fn surface_config(width: u32, height: u32) -> wgpu::SurfaceConfiguration {
    wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: wgpu::TextureFormat::Bgra8Unorm,
        width,
        height,
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode: wgpu::CompositeAlphaMode::Auto,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    }
}

#[test]
fn minimized_window_keeps_surface_size() {
    let mut config = surface_config(800, 600);
    assert!(!resize_config(&mut config, 0, 0));
    assert!(!resize_config(&mut config, 0, 600));
    assert_eq!((config.width, config.height), (800, 600));
}

#[test]
fn resize_updates_surface_size() {
    let mut config = surface_config(800, 600);
    assert!(resize_config(&mut config, 1024, 768));
    assert_eq!((config.width, config.height), (1024, 768));
    assert!(!resize_config(&mut config, 1024, 768), "same size needs no reconfigure");
}
