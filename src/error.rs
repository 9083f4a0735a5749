//! Initialization failures and their process exit codes.
//!
//! Only start-up is allowed to fail hard. Everything after the first frame
//! (shader diagnostics, missing images, surface hiccups) is logged and the
//! demo keeps running.

use std::fmt;

use crate::config::ConfigError;

/// A failure while bringing up the window, the GPU or the demo resources.
#[derive(Debug)]
pub enum InitError {
    /// The layered configuration could not be extracted.
    Config(ConfigError),
    /// The platform event loop could not be created.
    EventLoop(winit::error::EventLoopError),
    /// The OS refused to create the window.
    Window(winit::error::OsError),
    /// No presentable surface could be created for the window.
    Surface(wgpu::CreateSurfaceError),
    /// No GPU adapter matches the surface.
    NoAdapter,
    /// The surface reports no texture format the adapter can present.
    NoSurfaceFormat,
    /// The adapter refused to hand out a device.
    Device(wgpu::RequestDeviceError),
    /// Demo resource setup failed (static data validation).
    Setup(anyhow::Error),
}

impl InitError {
    /// Process exit code for this failure site.
    ///
    /// Window creation has its own code; windowing and GPU loader failures
    /// share `1`.
    pub fn exit_code(&self) -> u8 {
        match self {
            InitError::Window(_) => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::Config(e) => write!(f, "Error loading configuration: {}", e),
            InitError::EventLoop(e) => write!(f, "Error initializing the event loop: {}", e),
            InitError::Window(e) => write!(f, "Error creating window: {}", e),
            InitError::Surface(e) => write!(f, "Error creating surface: {}", e),
            InitError::NoAdapter => write!(f, "Error initializing GPU: no compatible adapter"),
            InitError::NoSurfaceFormat => write!(f, "Error configuring surface: no supported texture format"),
            InitError::Device(e) => write!(f, "Error initializing GPU device: {}", e),
            InitError::Setup(e) => write!(f, "Error setting up demo resources: {:#}", e),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitError::Config(e) => Some(e),
            InitError::EventLoop(e) => Some(e),
            InitError::Window(e) => Some(e),
            InitError::Surface(e) => Some(e),
            InitError::Device(e) => Some(e),
            InitError::NoAdapter | InitError::NoSurfaceFormat | InitError::Setup(_) => None,
        }
    }
}

impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        InitError::Config(e)
    }
}

impl From<winit::error::EventLoopError> for InitError {
    fn from(e: winit::error::EventLoopError) -> Self {
        InitError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for InitError {
    fn from(e: winit::error::OsError) -> Self {
        InitError::Window(e)
    }
}

impl From<wgpu::CreateSurfaceError> for InitError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        InitError::Surface(e)
    }
}

impl From<wgpu::RequestDeviceError> for InitError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        InitError::Device(e)
    }
}
