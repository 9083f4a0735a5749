use std::sync::Arc;

use instant::Instant;
use winit::window::Window;

use crate::{
    data_structures::texture::Texture,
    error::InitError,
    resources::{
        ledger::{Audit, Ledger},
        shader::bounded,
    },
};

/// Device, queue and the ledger every GPU object of the demo registers with.
#[derive(Debug)]
pub struct Gpu {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub ledger: Ledger,
    pub features: wgpu::Features,
}

impl Gpu {
    async fn request(
        instance: &wgpu::Instance,
        compatible_surface: Option<&wgpu::Surface<'_>>,
    ) -> Result<(wgpu::Adapter, Self), InitError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(InitError::NoAdapter)?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        // Wireframe is optional; only ask for it where the adapter has it.
        let features = adapter.features() & wgpu::Features::POLYGON_MODE_LINE;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("demo device"),
                    required_features: features,
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        // Validation errors outside an explicit error scope must not abort the demo.
        device.on_uncaptured_error(Box::new(|error| {
            log::error!("GPU error: {}", bounded(&error.to_string()));
        }));

        Ok((
            adapter,
            Self {
                device,
                queue,
                ledger: Ledger::new(),
                features,
            },
        ))
    }

    /// A device without any surface, for offscreen use.
    pub fn headless() -> Result<Self, InitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        pollster::block_on(Self::request(&instance, None)).map(|(_, gpu)| gpu)
    }

    pub fn supports_wireframe(&self) -> bool {
        self.features.contains(wgpu::Features::POLYGON_MODE_LINE)
    }

    /// Byte alignment required between dynamic uniform offsets.
    pub fn uniform_alignment(&self) -> wgpu::BufferAddress {
        self.device.limits().min_uniform_buffer_offset_alignment as wgpu::BufferAddress
    }
}

/// Formats and size of what a demo renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTarget {
    pub format: wgpu::TextureFormat,
    pub depth_format: Option<wgpu::TextureFormat>,
    pub width: u32,
    pub height: u32,
}

impl RenderTarget {
    pub fn aspect_ratio(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextOptions {
    pub depth: bool,
    pub vsync: bool,
}

/// The window, its surface and the GPU. Owned by the event-loop thread.
#[derive(Debug)]
pub struct Context {
    pub window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub gpu: Gpu,
    pub config: wgpu::SurfaceConfiguration,
    pub depth_texture: Option<Texture>,
    started: Instant,
}

impl Context {
    pub fn new(window: Arc<Window>, options: ContextOptions) -> Result<Self, InitError> {
        let size = window.inner_size();

        log::debug!("wgpu setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;
        let (adapter, gpu) = pollster::block_on(Gpu::request(&instance, Some(&surface)))?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Shader outputs are written as-is, so prefer a linear surface format.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(InitError::NoSurfaceFormat)?;
        let present_mode = if options.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu.device, &config);

        let depth_texture = options.depth.then(|| {
            Texture::create_depth_texture(&gpu, [config.width, config.height], "depth_texture")
        });

        Ok(Self {
            window,
            surface,
            gpu,
            config,
            depth_texture,
            started: Instant::now(),
        })
    }

    /// Seconds since the context was created.
    pub fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    pub fn target(&self) -> RenderTarget {
        RenderTarget {
            format: self.config.format,
            depth_format: self.depth_texture.as_ref().map(|_| Texture::DEPTH_FORMAT),
            width: self.config.width,
            height: self.config.height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if resize_config(&mut self.config, width, height) {
            self.reconfigure();
        }
    }

    /// Apply the current surface configuration again, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.gpu.device, &self.config);
        if self.depth_texture.is_some() {
            self.depth_texture = Some(Texture::create_depth_texture(
                &self.gpu,
                [self.config.width, self.config.height],
                "depth_texture",
            ));
        }
    }

    /// Release the depth buffer and report what is still alive. The surface
    /// and window are dropped on return.
    pub fn teardown(mut self) -> Audit {
        self.depth_texture = None;
        let audit = self.gpu.ledger.audit();
        log::debug!("Closing window");
        audit
    }
}

/// Store a new surface size; returns whether it changed. A minimized window
/// reports 0x0, which leaves the configuration untouched.
pub fn resize_config(config: &mut wgpu::SurfaceConfiguration, width: u32, height: u32) -> bool {
    if width == 0 || height == 0 || (config.width, config.height) == (width, height) {
        return false;
    }
    config.width = width;
    config.height = height;
    true
}
