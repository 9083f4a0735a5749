//! Shader stage compilation and program linking with captured diagnostics.
//!
//! Neither step is fatal. A failing stage or program is reported through the
//! log with a diagnostic of at most [`MAX_DIAGNOSTIC_LEN`] bytes and the demo
//! keeps running.

use crate::{
    context::Gpu,
    resources::ledger::{ResourceKind, Tracked},
};

/// Upper bound for a logged diagnostic, in bytes.
pub const MAX_DIAGNOSTIC_LEN: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    pub fn entry_point(&self) -> &'static str {
        match self {
            Stage::Vertex => "vs_main",
            Stage::Fragment => "fs_main",
        }
    }
}

/// Truncate `message` to at most [`MAX_DIAGNOSTIC_LEN`] bytes on a char boundary.
pub fn bounded(message: &str) -> String {
    if message.len() <= MAX_DIAGNOSTIC_LEN {
        return message.to_string();
    }
    let mut end = MAX_DIAGNOSTIC_LEN;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    message[..end].to_string()
}

/// Join compiler messages into one bounded diagnostic.
///
/// `scope_error` is the validation error popped from the error scope; it is
/// only used when the compiler itself produced no message.
pub fn collect_diagnostic<I, S>(messages: I, scope_error: Option<String>) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = messages
        .into_iter()
        .map(|m| m.as_ref().trim().to_string())
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    if !joined.is_empty() {
        return Some(bounded(&joined));
    }
    scope_error.map(|e| bounded(e.trim()))
}

/// One compiled stage and what the compiler had to say about it.
#[derive(Debug)]
pub struct CompiledStage {
    pub stage: Stage,
    pub module: Tracked<wgpu::ShaderModule>,
    pub diagnostic: Option<String>,
}

impl CompiledStage {
    pub fn is_ok(&self) -> bool {
        self.diagnostic.is_none()
    }
}

pub fn compile_stage(gpu: &Gpu, stage: Stage, label: &str, source: &str) -> CompiledStage {
    gpu.device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = gpu
        .device
        .create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
    let info = pollster::block_on(module.get_compilation_info());
    let scope_error = pollster::block_on(gpu.device.pop_error_scope());

    let errors = info
        .messages
        .iter()
        .filter(|m| matches!(m.message_type, wgpu::CompilationMessageType::Error))
        .map(|m| match &m.location {
            Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, m.message),
            None => m.message.clone(),
        });
    let diagnostic = collect_diagnostic(errors, scope_error.map(|e| e.to_string()));
    if let Some(d) = &diagnostic {
        log::error!("Error in shader: {}", d);
    }

    CompiledStage {
        stage,
        module: gpu.ledger.track(ResourceKind::ShaderStage, label, module),
        diagnostic,
    }
}

/// A pipeline built from compiled stages.
///
/// An unlinked program still owns its (invalid) pipeline handle so teardown
/// stays uniform, but callers must not draw with it.
#[derive(Debug)]
pub struct LinkedPipeline {
    pub pipeline: Tracked<wgpu::RenderPipeline>,
    pub diagnostic: Option<String>,
}

impl LinkedPipeline {
    pub fn is_linked(&self) -> bool {
        self.diagnostic.is_none()
    }
}

pub fn link_program<F>(gpu: &Gpu, label: &str, create: F) -> LinkedPipeline
where
    F: FnOnce(&wgpu::Device) -> wgpu::RenderPipeline,
{
    gpu.device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = create(&gpu.device);
    let diagnostic = pollster::block_on(gpu.device.pop_error_scope()).map(|e| bounded(&e.to_string()));
    if let Some(d) = &diagnostic {
        log::error!("Error linking program '{}': {}", label, d);
    }
    LinkedPipeline {
        pipeline: gpu.ledger.track(ResourceKind::Program, label, pipeline),
        diagnostic,
    }
}
