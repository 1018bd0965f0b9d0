use crate::gpu::context::Context;
use thiserror::Error;
use wgpu::{Adapter, Instance, Trace};

const HEADLESS_DEVICE_LABEL: &str = "Scene Buffers Headless Device";

#[derive(Error, Debug)]
pub enum HeadlessDeviceError {
    #[error("failed to request adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to select device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

#[must_use]
pub(crate) fn create_instance() -> Instance {
    Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        flags: wgpu::InstanceFlags::empty(),
        ..Default::default()
    })
}

/// Device and queue without any presentation surface: the static buffers
/// only ever need `Queue::write_buffer` and shader module validation.
pub(crate) async fn create_headless_context(instance: &Instance) -> Result<(Context, Adapter), HeadlessDeviceError> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            ..Default::default()
        })
        .await?;

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some(HEADLESS_DEVICE_LABEL),
            required_features: wgpu::Features::default(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::default(),
            trace: Trace::Off,
        })
        .await?;

    Ok((Context::new(device, queue), adapter))
}
