/// The slice of a graphics backend the ray marching manager drives. Implemented by the host on
/// top of its device, and by [`super::headless_device::HeadlessDevice`] for tests and tooling.
pub trait RenderDevice {
    type ProgramHandle;
    type BufferHandle: Copy;

    /// Compiles a complete glsl fragment program. The vertex stage (full screen quad) is owned
    /// by the host and never changes.
    fn compile_fragment_program(&mut self, source: &str) -> anyhow::Result<Self::ProgramHandle>;

    fn set_fragment_program(&mut self, program: &Self::ProgramHandle);

    fn create_constant_buffer(&mut self, label: &str, size: usize)
        -> anyhow::Result<Self::BufferHandle>;

    /// Replaces the whole contents of `buffer` with `bytes`
    fn upload_buffer(&mut self, buffer: Self::BufferHandle, bytes: &[u8]) -> anyhow::Result<()>;

    fn bind_constant_buffer(&mut self, slot: u32, buffer: Self::BufferHandle);

    /// Width and height in pixels
    fn viewport_size(&self) -> [u32; 2];
}
