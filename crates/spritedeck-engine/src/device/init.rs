/// Initialization parameters for the GPU layer.
///
/// Passed explicitly to [`Gpu::new`](super::Gpu::new); nothing here is read
/// from global state.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends wgpu may pick from. Restrict to `GL` to force the legacy GL path.
    pub backends: wgpu::Backends,

    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// FIFO is broadly supported and fine for a mostly idle canvas.
    pub present_mode: wgpu::PresentMode,

    /// Alpha mode preference; replaced by a supported one when unavailable.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,

    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::LowPower,
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    /// Restricts adapter selection to OpenGL / GLES.
    pub fn gl_only(mut self) -> Self {
        self.backends = wgpu::Backends::GL;
        self
    }
}
