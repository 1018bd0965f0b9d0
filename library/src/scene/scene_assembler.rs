use crate::gpu::binding_slot_allocator::{BindingSlot, BindingSlotAllocator};
use crate::gpu::gpu_memory::GpuMemory;
use crate::gpu::shader_program::ShaderProgram;
use crate::gpu::typed_static_buffer::{FlushStatus, StaticBufferError, TypedStaticBuffer};
use crate::objects::material::Material;
use crate::objects::primitive_kind::{PrimitiveKind, MATERIALS_CATEGORY};
use crate::objects::sphere::Sphere;
use crate::objects::triangle::Triangle;
use crate::scene::scene_description::SceneDescription;
use crate::scene::simulation::Simulation;
use crate::serialization::uniform_block_element::UniformBlockElement;
use crate::utils::throttled_logger::ThrottledInfoLogger;
use log::{error, info, warn};
use std::time::Duration;

const TICK_REPORT_INTERVAL: usize = 120;

#[derive(Debug, PartialEq)]
pub enum TickStatus {
    Unchanged,
    Flushed(FlushStatus),
    Rejected(StaticBufferError),
}

/// Owns one static buffer per scene category and keeps them in sync with the host scene.
pub struct SceneAssembler<M: GpuMemory> {
    materials: TypedStaticBuffer<Material, M>,
    spheres: TypedStaticBuffer<Sphere, M>,
    triangles: TypedStaticBuffer<Triangle, M>,
    tick_reporter: ThrottledInfoLogger,
}

impl<M: GpuMemory> SceneAssembler<M> {
    pub fn new(
        program: &mut ShaderProgram,
        allocator: &mut BindingSlotAllocator,
        memory: &M,
        scene: &SceneDescription,
    ) -> Result<Self, StaticBufferError> {
        let mut materials = TypedStaticBuffer::new(program, allocator, memory, MATERIALS_CATEGORY, true)?;
        let mut spheres = TypedStaticBuffer::new(program, allocator, memory, PrimitiveKind::Sphere.category(), true)?;
        let mut triangles = TypedStaticBuffer::new(program, allocator, memory, PrimitiveKind::Triangle.category(), true)?;

        fill_and_flush(&mut materials, memory, scene.materials())?;
        fill_and_flush(&mut spheres, memory, scene.spheres())?;
        fill_and_flush(&mut triangles, memory, scene.triangles())?;

        info!(
            "scene assembled: {} materials, {} spheres, {} triangles",
            materials.len(), spheres.len(), triangles.len(),
        );

        Ok(Self { materials, spheres, triangles, tick_reporter: ThrottledInfoLogger::new(TICK_REPORT_INTERVAL) })
    }

    /// Appends a sphere to staging; it reaches the device with the next tick.
    pub fn spawn_sphere(&mut self, sphere: Sphere) -> usize {
        self.spheres.append(sphere);
        self.spheres.len() - 1
    }

    /// Applies the simulation step to the spheres and re-flushes only that buffer.
    /// A rejected flush leaves the previous device contents in place.
    pub fn tick(&mut self, memory: &M, simulation: &mut dyn Simulation, delta: Duration) -> TickStatus {
        for update in simulation.advance(delta) {
            if !self.spheres.update(update.index, |sphere| sphere.set_center(update.origin)) {
                warn!("origin update for missing sphere {} ignored", update.index);
            }
        }

        match self.spheres.flush(memory) {
            Ok(status) if status.updated() => {
                self.tick_reporter.do_write(|| format!("tick: {} spheres rewritten", status.elements_written()));
                TickStatus::Flushed(status)
            }
            Ok(_) => TickStatus::Unchanged,
            Err(failure) => {
                error!("tick flush rejected: {}", failure);
                TickStatus::Rejected(failure)
            }
        }
    }

    #[must_use]
    pub fn materials(&self) -> &TypedStaticBuffer<Material, M> {
        &self.materials
    }

    #[must_use]
    pub fn spheres(&self) -> &TypedStaticBuffer<Sphere, M> {
        &self.spheres
    }

    #[must_use]
    pub fn triangles(&self) -> &TypedStaticBuffer<Triangle, M> {
        &self.triangles
    }

    #[must_use]
    pub fn bindings(&self) -> Vec<(BindingSlot, &M::Buffer)> {
        let mut bindings = self.materials.bindings();
        bindings.extend(self.spheres.bindings());
        bindings.extend(self.triangles.bindings());
        bindings
    }

    #[must_use]
    pub fn layout_mismatches_count(&self) -> usize {
        self.materials.layout_mismatches().len()
            + self.spheres.layout_mismatches().len()
            + self.triangles.layout_mismatches().len()
    }
}

fn fill_and_flush<T: UniformBlockElement, M: GpuMemory>(
    buffer: &mut TypedStaticBuffer<T, M>,
    memory: &M,
    elements: &[T],
) -> Result<FlushStatus, StaticBufferError> {
    elements.iter().for_each(|element| buffer.append(*element));
    buffer.flush(memory)
}
