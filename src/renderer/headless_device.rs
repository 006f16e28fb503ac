use super::render_device::RenderDevice;
use anyhow::bail;
#[cfg(feature = "shader-compile")]
use anyhow::Context;
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use std::collections::BTreeMap;

/// Fragment program accepted by a [`HeadlessDevice`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessProgram {
    pub id: u32,
    pub source: String,
    /// Compiled spirv words
    #[cfg(feature = "shader-compile")]
    pub spirv: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HeadlessBuffer(usize);

#[derive(Debug)]
struct BufferAllocation {
    label: String,
    contents: Vec<u8>,
}

/// [`RenderDevice`] without a gpu. Records every call so frames can be inspected.
pub struct HeadlessDevice {
    viewport_size: [u32; 2],
    fail_compilation: bool,
    compile_count: usize,
    next_program_id: u32,
    bound_program: Option<HeadlessProgram>,
    buffers: Vec<BufferAllocation>,
    bindings: BTreeMap<u32, HeadlessBuffer>,
    #[cfg(feature = "shader-compile")]
    compiler: shaderc::Compiler,
}

impl HeadlessDevice {
    pub fn new(viewport_size: [u32; 2]) -> anyhow::Result<Self> {
        Ok(Self {
            viewport_size,
            fail_compilation: false,
            compile_count: 0,
            next_program_id: 1,
            bound_program: None,
            buffers: Vec::new(),
            bindings: BTreeMap::new(),
            #[cfg(feature = "shader-compile")]
            compiler: shaderc::Compiler::new().context("failed to initialize shaderc compiler")?,
        })
    }

    pub fn set_viewport_size(&mut self, viewport_size: [u32; 2]) {
        self.viewport_size = viewport_size;
    }

    /// When set, every following compilation attempt fails
    pub fn set_fail_compilation(&mut self, fail_compilation: bool) {
        self.fail_compilation = fail_compilation;
    }

    /// Number of compilation attempts, successful or not
    pub fn compile_count(&self) -> usize {
        self.compile_count
    }

    pub fn bound_program(&self) -> Option<&HeadlessProgram> {
        self.bound_program.as_ref()
    }

    pub fn buffer_label(&self, buffer: HeadlessBuffer) -> Option<&str> {
        self.buffers.get(buffer.0).map(|b| b.label.as_str())
    }

    pub fn buffer_contents(&self, buffer: HeadlessBuffer) -> Option<&[u8]> {
        self.buffers.get(buffer.0).map(|b| b.contents.as_slice())
    }

    /// Contents of the buffer bound at `slot`
    pub fn bound_buffer_contents(&self, slot: u32) -> Option<&[u8]> {
        self.bindings
            .get(&slot)
            .and_then(|buffer| self.buffer_contents(*buffer))
    }

    #[cfg(feature = "shader-compile")]
    fn compile_spirv(&mut self, source: &str) -> anyhow::Result<Vec<u32>> {
        let artifact = self
            .compiler
            .compile_into_spirv(
                source,
                shaderc::ShaderKind::Fragment,
                "ray_march.frag",
                "main",
                None,
            )
            .context("shaderc rejected the fragment program")?;
        if artifact.get_num_warnings() > 0 {
            warn!("fragment program warnings: {}", artifact.get_warning_messages());
        }
        Ok(artifact.as_binary().to_vec())
    }
}

impl RenderDevice for HeadlessDevice {
    type ProgramHandle = HeadlessProgram;
    type BufferHandle = HeadlessBuffer;

    fn compile_fragment_program(&mut self, source: &str) -> anyhow::Result<HeadlessProgram> {
        self.compile_count += 1;
        if self.fail_compilation {
            bail!("compilation disabled on this headless device");
        }

        #[cfg(feature = "shader-compile")]
        let spirv = self.compile_spirv(source)?;

        let id = self.next_program_id;
        self.next_program_id += 1;
        Ok(HeadlessProgram {
            id,
            source: source.to_string(),
            #[cfg(feature = "shader-compile")]
            spirv,
        })
    }

    fn set_fragment_program(&mut self, program: &HeadlessProgram) {
        trace!("binding fragment program {}", program.id);
        self.bound_program = Some(program.clone());
    }

    fn create_constant_buffer(&mut self, label: &str, size: usize) -> anyhow::Result<HeadlessBuffer> {
        self.buffers.push(BufferAllocation {
            label: label.to_string(),
            contents: vec![0; size],
        });
        Ok(HeadlessBuffer(self.buffers.len() - 1))
    }

    fn upload_buffer(&mut self, buffer: HeadlessBuffer, bytes: &[u8]) -> anyhow::Result<()> {
        let allocation = match self.buffers.get_mut(buffer.0) {
            Some(allocation) => allocation,
            None => bail!("invalid buffer handle {}", buffer.0),
        };
        if allocation.contents.len() != bytes.len() {
            bail!(
                "upload of {} bytes to buffer '{}' of size {}",
                bytes.len(),
                allocation.label,
                allocation.contents.len()
            );
        }
        allocation.contents.copy_from_slice(bytes);
        Ok(())
    }

    fn bind_constant_buffer(&mut self, slot: u32, buffer: HeadlessBuffer) {
        self.bindings.insert(slot, buffer);
    }

    fn viewport_size(&self) -> [u32; 2] {
        self.viewport_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_checks_size() {
        let mut device = HeadlessDevice::new([4, 4]).unwrap();
        let buffer = device.create_constant_buffer("test", 8).unwrap();
        device.upload_buffer(buffer, &[1; 8]).unwrap();
        assert!(device.upload_buffer(buffer, &[1; 4]).is_err());
        device.bind_constant_buffer(3, buffer);
        assert_eq!(device.bound_buffer_contents(3), Some(&[1_u8; 8][..]));
        assert_eq!(device.buffer_label(buffer), Some("test"));
    }

    #[test]
    fn compilation_failure_injection() {
        let mut device = HeadlessDevice::new([4, 4]).unwrap();
        device.set_fail_compilation(true);
        assert!(device.compile_fragment_program("void main() {}").is_err());
        assert_eq!(device.compile_count(), 1);
    }
}
