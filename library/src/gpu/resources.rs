use crate::gpu::context::Context;
use crate::gpu::gpu_memory::GpuMemory;
use crate::gpu::shader_program::ShaderProgram;
use std::borrow::Cow;
use std::rc::Rc;
use wgpu::BufferUsages;

pub(crate) struct Resources {
    context: Rc<Context>,
}

impl Resources {
    #[must_use]
    pub(crate) fn new(context: Rc<Context>) -> Self {
        Self { context }
    }

    /// Compiles the program as it is now, with every block at its rebound slot.
    #[must_use]
    pub(crate) fn create_program_module(&self, program: &ShaderProgram) -> wgpu::ShaderModule {
        self.context.device().create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(program.label()),
            source: wgpu::ShaderSource::Naga(Cow::Owned(program.module().clone())),
        })
    }
}

impl GpuMemory for Resources {
    type Buffer = Rc<wgpu::Buffer>;

    fn allocate_uniform_buffer(&self, label: &str, size_bytes: u64) -> Rc<wgpu::Buffer> {
        Rc::new(self.context.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: size_bytes,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }))
    }

    fn write_buffer(&self, buffer: &Rc<wgpu::Buffer>, offset_bytes: u64, data: &[u8]) {
        self.context.queue().write_buffer(buffer, offset_bytes, data);
    }
}
