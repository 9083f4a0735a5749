use std::{cell::Cell, rc::Rc};

use spin_demos::resources::ledger::{Ledger, Release, ResourceEntry, ResourceKind};

/// Counts release calls instead of talking to a GPU.
#[derive(Debug)]
struct Probe(Rc<Cell<u32>>);

impl Release for Probe {
    fn release(&self) {
        self.0.set(self.0.get() + 1);
    }
}

fn entry(kind: ResourceKind, label: &str) -> ResourceEntry {
    ResourceEntry {
        kind,
        label: label.to_string(),
    }
}

#[test]
fn setup_and_teardown_balance() {
    let ledger = Ledger::new();
    let releases = Rc::new(Cell::new(0));

    let vao = ledger.track(ResourceKind::VertexArray, "vao", Probe(releases.clone()));
    let vbo = ledger.track(ResourceKind::Buffer, "vbo", Probe(releases.clone()));
    let ebo = ledger.track(ResourceKind::Buffer, "ebo", Probe(releases.clone()));
    let vs = ledger.track(ResourceKind::ShaderStage, "vs", Probe(releases.clone()));
    let fs = ledger.track(ResourceKind::ShaderStage, "fs", Probe(releases.clone()));
    let program = ledger.track(ResourceKind::Program, "program", Probe(releases.clone()));

    let before = ledger.audit();
    assert_eq!(before.created, 6);
    assert_eq!(before.live.len(), 6);
    assert_eq!(before.live_of(ResourceKind::Buffer), 2);
    assert!(!before.is_balanced());

    drop(program);
    drop(fs);
    drop(vs);
    drop(ebo);
    drop(vbo);
    drop(vao);

    let after = ledger.audit();
    assert!(after.is_balanced());
    assert_eq!(after.released, 6);
    assert_eq!(releases.get(), 6);
    assert_eq!(
        after.release_order,
        vec![
            entry(ResourceKind::Program, "program"),
            entry(ResourceKind::ShaderStage, "fs"),
            entry(ResourceKind::ShaderStage, "vs"),
            entry(ResourceKind::Buffer, "ebo"),
            entry(ResourceKind::Buffer, "vbo"),
            entry(ResourceKind::VertexArray, "vao"),
        ]
    );
}

#[test]
fn early_return_still_releases() {
    fn setup(ledger: &Ledger, releases: &Rc<Cell<u32>>) -> Result<(), &'static str> {
        let _vbo = ledger.track(ResourceKind::Buffer, "vbo", Probe(releases.clone()));
        let _tex = ledger.track(ResourceKind::Texture, "tex", Probe(releases.clone()));
        if releases.get() == 0 {
            return Err("image failed");
        }
        Ok(())
    }

    let ledger = Ledger::new();
    let releases = Rc::new(Cell::new(0));
    assert!(setup(&ledger, &releases).is_err());
    assert!(ledger.audit().is_balanced());
    assert_eq!(releases.get(), 2);
}

#[test]
fn leaked_resource_shows_up_in_audit() {
    let ledger = Ledger::new();
    let releases = Rc::new(Cell::new(0));
    let kept = ledger.track(ResourceKind::Texture, "kept", Probe(releases.clone()));

    let audit = ledger.audit();
    assert!(!audit.is_balanced());
    assert_eq!(audit.live, vec![entry(ResourceKind::Texture, "kept")]);
    drop(kept);
}

#[test]
fn double_release_is_counted() {
    let ledger = Ledger::new();
    let id = ledger.register(ResourceKind::Buffer, "manual");
    ledger.release(id);
    ledger.release(id);

    let audit = ledger.audit();
    assert_eq!(audit.released, 1);
    assert_eq!(audit.double_releases, 1);
    assert!(!audit.is_balanced());
}

#[test]
fn kinds_display_readably() {
    assert_eq!(ResourceKind::VertexArray.to_string(), "vertex array");
    assert_eq!(ResourceKind::ShaderStage.to_string(), "shader stage");
    assert_eq!(ResourceKind::BindGroup.to_string(), "bind group");
    assert_eq!(ResourceKind::Sampler.to_string(), "sampler");
}
