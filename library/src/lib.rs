#![allow(clippy::bool_assert_comparison)]

pub mod config;
pub mod geometry;
pub mod gpu;
pub mod objects;
pub mod scene;
pub mod serialization;
mod utils;

use crate::config::STATIC_BUFFERS_BIND_GROUP;
use crate::gpu::bind_group_builder::BindGroupBuilder;
use crate::gpu::binding_slot_allocator::{BindingSlot, BindingSlotAllocator};
use crate::gpu::context::Context;
use crate::gpu::headless_device::{create_headless_context, create_instance, HeadlessDeviceError};
use crate::gpu::resources::Resources;
use crate::gpu::shader_program::ShaderProgram;
use crate::scene::scene_assembler::{SceneAssembler, TickStatus};
use crate::scene::scene_description::SceneDescription;
use crate::scene::simulation::Simulation;
use log::{info, warn};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use wgpu::wgt::PollType;
use wgpu::Adapter;

/// Declares every static block the scene assembler fills, sized to the capacities in `config`.
pub const SCENE_SHADER: &str = include_str!("../assets/shaders/scene.wgsl");

const SCENE_SHADER_LABEL: &str = "scene";
const STATIC_BUFFERS_LABEL: &str = "static scene buffers";
const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

pub struct Engine {
    context: Rc<Context>,
    resources: Resources,
    assembler: SceneAssembler<Resources>,

    static_buffers_bind_group: wgpu::BindGroup,
    pipeline: wgpu::RenderPipeline,
}

#[derive(Error, Debug)]
pub enum EngineInstantiationError {
    #[error("failed to request adapter: {what:?}")]
    AdapterRequisitionError {
        what: String,
    },
    #[error("failed to select device: {what:?}")]
    DeviceSelectionError {
        what: String,
    },
    #[error("shader program rejected: {what:?}")]
    ShaderProgramError {
        what: String,
    },
    #[error("failed to assemble scene buffers: {what:?}")]
    SceneAssemblyError {
        what: String,
    },
    #[error("device validation failed: {what:?}")]
    ValidationError {
        what: String,
    },
}

impl From<HeadlessDeviceError> for EngineInstantiationError {
    fn from(error: HeadlessDeviceError) -> Self {
        match error {
            HeadlessDeviceError::Adapter(_) => EngineInstantiationError::AdapterRequisitionError { what: error.to_string() },
            HeadlessDeviceError::Device(_) => EngineInstantiationError::DeviceSelectionError { what: error.to_string() },
        }
    }
}

impl Engine {
    #[must_use]
    pub fn get_reasonable_log_filter() -> &'static str {
        "info,wgpu=warn,naga=warn"
    }

    /// Builds the device, fills every static block of `shader_source` from `scene`
    /// and compiles the rebound program against the resulting bind group.
    pub async fn new_headless(shader_source: &str, scene: &SceneDescription) -> Result<Engine, EngineInstantiationError> {
        let instance = create_instance();
        let (context, adapter) = create_headless_context(&instance).await?;
        log_adapter_info(&adapter);

        let context = Rc::new(context);
        let resources = Resources::new(context.clone());

        let mut program = ShaderProgram::from_wgsl(SCENE_SHADER_LABEL, shader_source)
            .map_err(|e| EngineInstantiationError::ShaderProgramError { what: e.to_string() })?;
        let mut allocator = BindingSlotAllocator::new();
        let assembler = SceneAssembler::new(&mut program, &mut allocator, &resources, scene)
            .map_err(|e| EngineInstantiationError::SceneAssemblyError { what: e.to_string() })?;

        let device = context.device();
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = resources.create_program_module(&program);

        let mut bind_group_builder = BindGroupBuilder::new(STATIC_BUFFERS_BIND_GROUP, Some(STATIC_BUFFERS_LABEL), wgpu::ShaderStages::VERTEX_FRAGMENT);
        for (slot, buffer) in assembler.bindings() {
            bind_group_builder.set_uniform_entry(slot.0, buffer.clone());
        }
        let bind_group_layout = bind_group_builder.make_layout(device);
        let static_buffers_bind_group = bind_group_builder.make_bind_group(device, &bind_group_layout);
        let pipeline = create_pipeline(device, &module, &bind_group_layout);

        if let Some(error) = device.pop_error_scope().await {
            return Err(EngineInstantiationError::ValidationError { what: error.to_string() });
        }

        info!(
            "engine ready: group {} bound at slots {:?}, {} allocated",
            bind_group_builder.index(), bind_group_builder.slots(), allocator.allocated_count(),
        );

        Ok(Engine { context, resources, assembler, static_buffers_bind_group, pipeline })
    }

    /// Advances the simulation one step and waits until its uploads reach the device.
    pub fn tick(&mut self, simulation: &mut dyn Simulation, delta: Duration) -> TickStatus {
        let status = self.assembler.tick(&self.resources, simulation, delta);

        if let TickStatus::Flushed(_) = status {
            self.context.queue().submit([]);
            if let Err(error) = self.context.device().poll(PollType::Wait) {
                warn!("device poll failed: {}", error);
            }
        }

        status
    }

    #[must_use]
    pub fn bound_slots(&self) -> Vec<BindingSlot> {
        self.assembler.bindings().into_iter().map(|(slot, _)| slot).collect()
    }

    #[must_use]
    pub fn spheres_count(&self) -> usize {
        self.assembler.spheres().len()
    }

    #[must_use]
    pub fn static_buffers_bind_group(&self) -> &wgpu::BindGroup {
        &self.static_buffers_bind_group
    }

    #[must_use]
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

#[must_use]
fn create_pipeline(device: &wgpu::Device, module: &wgpu::ShaderModule, static_buffers_layout: &wgpu::BindGroupLayout) -> wgpu::RenderPipeline {
    // layouts are indexed by group, and the static buffers own group zero
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(STATIC_BUFFERS_LABEL),
        bind_group_layouts: &[static_buffers_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(SCENE_SHADER_LABEL),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module,
            entry_point: None,
            compilation_options: Default::default(),
            buffers: &[], // full screen triangle is generated from the vertex index
        },
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: None,
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: OFFSCREEN_FORMAT,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn log_adapter_info(adapter: &Adapter) {
    let adapter_info = adapter.get_info();
    info!(
        "Adapter Info:\n\
         Name: {}\n\
         Backend: {:?}\n\
         Device Type: {:?}\n\
         Driver: {:?}",
        adapter_info.name,
        adapter_info.backend,
        adapter_info.device_type,
        adapter_info.driver,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_quiets_gpu_stack() {
        let filter = Engine::get_reasonable_log_filter();
        assert!(filter.contains("wgpu=warn"));
        assert!(filter.contains("naga=warn"));
    }

    #[test]
    fn test_scene_shader_parses() {
        let program = ShaderProgram::from_wgsl(SCENE_SHADER_LABEL, SCENE_SHADER).unwrap();
        assert_eq!(program.label(), SCENE_SHADER_LABEL);
    }
}
