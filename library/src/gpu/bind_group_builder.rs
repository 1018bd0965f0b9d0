use std::collections::BTreeMap;
use std::rc::Rc;
use wgpu::{BindGroup, BindGroupLayout, Buffer};

/// Collects uniform buffers by binding slot and turns them into a layout and
/// a bind group for one group index.
pub(crate) struct BindGroupBuilder<'a> {
    index: u32,
    label: Option<&'a str>,
    visibility: wgpu::ShaderStages,

    accumulated_uniform_entries: BTreeMap<u32, Rc<Buffer>>,
}

impl<'a> BindGroupBuilder<'a> {
    #[must_use]
    pub(crate) fn new(index: u32, label: Option<&'a str>, visibility: wgpu::ShaderStages) -> Self {
        Self {
            index,
            label,
            visibility,
            accumulated_uniform_entries: BTreeMap::new(),
        }
    }

    pub(crate) fn set_uniform_entry(&mut self, slot: u32, buffer: Rc<Buffer>) -> &mut Self {
        let previous = self.accumulated_uniform_entries.insert(slot, buffer);
        assert!(previous.is_none(), "slot {slot} already set");
        self
    }

    #[must_use]
    pub(crate) fn slots(&self) -> Vec<u32> {
        self.accumulated_uniform_entries.keys().copied().collect()
    }

    #[must_use]
    pub(crate) fn make_layout(&self, device: &wgpu::Device) -> BindGroupLayout {
        let entries: Vec<wgpu::BindGroupLayoutEntry> = self.accumulated_uniform_entries.keys()
            .map(|slot_number| wgpu::BindGroupLayoutEntry {
                binding: *slot_number,
                visibility: self.visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            })
            .collect();

        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: self.label,
            entries: entries.as_slice(),
        })
    }

    #[must_use]
    pub(crate) fn make_bind_group(&self, device: &wgpu::Device, layout: &BindGroupLayout) -> BindGroup {
        let entries: Vec<wgpu::BindGroupEntry> = self.accumulated_uniform_entries.iter()
            .map(|(slot_number, buffer)| wgpu::BindGroupEntry {
                binding: *slot_number,
                resource: buffer.as_entire_binding(),
            })
            .collect();

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: self.label,
            layout,
            entries: entries.as_slice(),
        })
    }

    #[must_use]
    pub(crate) fn index(&self) -> u32 {
        self.index
    }
}
