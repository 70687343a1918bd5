use crate::core::ModelOptions;
use candle_core::Device;

pub mod loaders;

/// Device a pipeline builder should load the model on.
#[derive(Clone, Debug, Default)]
pub enum DeviceRequest {
    /// CUDA device 0 if available, otherwise CPU.
    #[default]
    Default,
    /// Force CPU even if CUDA is available.
    Cpu,
    /// A specific CUDA device by index.
    Cuda(usize),
    /// An already constructed device.
    Explicit(Device),
}

impl DeviceRequest {
    /// Resolve the request into an actual [`Device`].
    pub fn resolve(self) -> anyhow::Result<Device> {
        let device = match self {
            DeviceRequest::Default => Device::cuda_if_available(0)?,
            DeviceRequest::Cpu => Device::Cpu,
            DeviceRequest::Cuda(i) => Device::new_cuda(i)?,
            DeviceRequest::Explicit(d) => d,
        };
        tracing::debug!(location = ?device.location(), "resolved device");
        Ok(device)
    }
}

/// Cache key combining model options and device location.
pub fn build_cache_key<O: ModelOptions>(options: &O, device: &Device) -> String {
    format!("{}-{:?}", options.cache_key(), device.location())
}
