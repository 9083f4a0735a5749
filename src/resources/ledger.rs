//! Scoped ownership of GPU objects.
//!
//! Every object the demos create on the GPU is wrapped in a [`Tracked`]
//! handle. Creating one registers it with the shared [`Ledger`]; dropping it
//! issues the release call and records the release. Because a `Tracked` value
//! can only be dropped once, every object is released exactly once on every
//! exit path, early returns included. [`Ledger::audit`] reports what is still
//! alive so teardown can be verified.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    fmt,
    ops::Deref,
    rc::Rc,
};

/// What a tracked handle stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// A linked render pipeline.
    Program,
    /// A single compiled shader module.
    ShaderStage,
    Buffer,
    /// Attribute layout plus the binding state captured for draws.
    VertexArray,
    /// Resources captured by a vertex array for its draws.
    BindGroup,
    Texture,
    Sampler,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Program => "program",
            ResourceKind::ShaderStage => "shader stage",
            ResourceKind::Buffer => "buffer",
            ResourceKind::VertexArray => "vertex array",
            ResourceKind::BindGroup => "bind group",
            ResourceKind::Texture => "texture",
            ResourceKind::Sampler => "sampler",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResourceId(u64);

/// A kind + label pair as reported by an [`Audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub kind: ResourceKind,
    pub label: String,
}

#[derive(Debug, Default)]
struct LedgerState {
    next_id: u64,
    live: BTreeMap<ResourceId, ResourceEntry>,
    created: usize,
    released: usize,
    double_releases: usize,
    release_order: Vec<ResourceEntry>,
}

/// Snapshot of the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audit {
    pub created: usize,
    pub released: usize,
    pub double_releases: usize,
    /// Still-alive resources in creation order.
    pub live: Vec<ResourceEntry>,
    pub release_order: Vec<ResourceEntry>,
}

impl Audit {
    /// Every registered resource was released exactly once.
    pub fn is_balanced(&self) -> bool {
        self.live.is_empty() && self.double_releases == 0 && self.created == self.released
    }

    pub fn live_of(&self, kind: ResourceKind) -> usize {
        self.live.iter().filter(|e| e.kind == kind).count()
    }
}

/// Shared bookkeeping for all GPU objects of one context.
///
/// All handles live on the thread that owns the window, so the ledger is a
/// plain `Rc<RefCell<..>>`.
#[derive(Debug, Clone, Default)]
pub struct Ledger(Rc<RefCell<LedgerState>>);

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, kind: ResourceKind, label: &str) -> ResourceId {
        let mut state = self.0.borrow_mut();
        let id = ResourceId(state.next_id);
        state.next_id += 1;
        state.created += 1;
        state.live.insert(
            id,
            ResourceEntry {
                kind,
                label: label.to_string(),
            },
        );
        log::debug!("Created {} '{}' ({:?})", kind, label, id);
        id
    }

    pub fn release(&self, id: ResourceId) {
        let mut state = self.0.borrow_mut();
        match state.live.remove(&id) {
            Some(entry) => {
                log::debug!("Released {} '{}' ({:?})", entry.kind, entry.label, id);
                state.released += 1;
                state.release_order.push(entry);
            }
            None => {
                log::warn!("Resource {:?} released twice or never registered", id);
                state.double_releases += 1;
            }
        }
    }

    /// Wrap `inner` so that dropping it releases it and updates the ledger.
    pub fn track<T: Release>(&self, kind: ResourceKind, label: &str, inner: T) -> Tracked<T> {
        let id = self.register(kind, label);
        Tracked {
            inner,
            id,
            ledger: self.clone(),
        }
    }

    pub fn audit(&self) -> Audit {
        let state = self.0.borrow();
        Audit {
            created: state.created,
            released: state.released,
            double_releases: state.double_releases,
            live: state.live.values().cloned().collect(),
            release_order: state.release_order.clone(),
        }
    }
}

/// The deletion call for a GPU object.
///
/// wgpu frees most objects once the last handle is dropped; buffers and
/// textures additionally free their memory eagerly on `destroy`.
pub trait Release {
    fn release(&self) {}
}

impl Release for wgpu::Buffer {
    fn release(&self) {
        self.destroy();
    }
}

impl Release for wgpu::Texture {
    fn release(&self) {
        self.destroy();
    }
}

impl Release for wgpu::ShaderModule {}
impl Release for wgpu::RenderPipeline {}
impl Release for wgpu::BindGroup {}
impl Release for wgpu::PipelineLayout {}
impl Release for wgpu::Sampler {}

/// Owning handle whose drop releases the wrapped GPU object.
#[derive(Debug)]
pub struct Tracked<T: Release> {
    inner: T,
    id: ResourceId,
    ledger: Ledger,
}

impl<T: Release> Tracked<T> {
    pub fn id(&self) -> ResourceId {
        self.id
    }
}

impl<T: Release> Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T: Release> Drop for Tracked<T> {
    fn drop(&mut self) {
        self.inner.release();
        self.ledger.release(self.id);
    }
}
