/// Device memory as seen by the static buffers: allocate once, write ranges.
pub trait GpuMemory {
    type Buffer;

    /// Storage is left uninitialized; nothing may assume its contents.
    #[must_use]
    fn allocate_uniform_buffer(&self, label: &str, size_bytes: u64) -> Self::Buffer;

    fn write_buffer(&self, buffer: &Self::Buffer, offset_bytes: u64, data: &[u8]);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::GpuMemory;
    use std::cell::RefCell;

    pub(crate) const UNINITIALIZED_BYTE: u8 = 0xCD;

    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub(crate) struct HostBufferId(usize);

    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub(crate) struct HostWrite {
        pub(crate) buffer: HostBufferId,
        pub(crate) offset_bytes: u64,
        pub(crate) size_bytes: usize,
    }

    struct HostBuffer {
        label: String,
        bytes: Vec<u8>,
    }

    /// Host-side stand-in for device memory, recording every write.
    pub(crate) struct HostMemory {
        buffers: RefCell<Vec<HostBuffer>>,
        writes: RefCell<Vec<HostWrite>>,
    }

    impl HostMemory {
        #[must_use]
        pub(crate) fn new() -> Self {
            Self { buffers: RefCell::new(Vec::new()), writes: RefCell::new(Vec::new()) }
        }

        #[must_use]
        pub(crate) fn contents(&self, buffer: &HostBufferId) -> Vec<u8> {
            self.buffers.borrow()[buffer.0].bytes.clone()
        }

        #[must_use]
        pub(crate) fn label(&self, buffer: &HostBufferId) -> String {
            self.buffers.borrow()[buffer.0].label.clone()
        }

        #[must_use]
        pub(crate) fn read_u32(&self, buffer: &HostBufferId) -> u32 {
            let bytes = self.contents(buffer);
            u32::from_ne_bytes(bytes[0..4].try_into().unwrap())
        }

        #[must_use]
        pub(crate) fn writes_count(&self) -> usize {
            self.writes.borrow().len()
        }

        #[must_use]
        pub(crate) fn writes(&self) -> Vec<HostWrite> {
            self.writes.borrow().clone()
        }
    }

    impl GpuMemory for HostMemory {
        type Buffer = HostBufferId;

        fn allocate_uniform_buffer(&self, label: &str, size_bytes: u64) -> HostBufferId {
            let mut buffers = self.buffers.borrow_mut();
            buffers.push(HostBuffer {
                label: label.to_string(),
                bytes: vec![UNINITIALIZED_BYTE; size_bytes as usize],
            });
            HostBufferId(buffers.len() - 1)
        }

        fn write_buffer(&self, buffer: &HostBufferId, offset_bytes: u64, data: &[u8]) {
            let mut buffers = self.buffers.borrow_mut();
            let target = &mut buffers[buffer.0].bytes;
            let start = offset_bytes as usize;
            assert!(start + data.len() <= target.len(), "write past the end of buffer");
            target[start..start + data.len()].copy_from_slice(data);
            self.writes.borrow_mut().push(HostWrite { buffer: *buffer, offset_bytes, size_bytes: data.len() });
        }
    }

    #[test]
    fn test_allocation_is_uninitialized() {
        let system_under_test = HostMemory::new();

        let buffer = system_under_test.allocate_uniform_buffer("test", 8);

        assert_eq!(system_under_test.contents(&buffer), vec![UNINITIALIZED_BYTE; 8]);
        assert_eq!(system_under_test.label(&buffer), "test");
        assert_eq!(system_under_test.writes_count(), 0);
    }

    #[test]
    fn test_write_at_offset() {
        let system_under_test = HostMemory::new();
        let buffer = system_under_test.allocate_uniform_buffer("test", 6);

        system_under_test.write_buffer(&buffer, 2, &[1, 2, 3]);

        let u = UNINITIALIZED_BYTE;
        assert_eq!(system_under_test.contents(&buffer), vec![u, u, 1, 2, 3, u]);
        assert_eq!(system_under_test.writes(), vec![HostWrite { buffer, offset_bytes: 2, size_bytes: 3 }]);
    }

    #[test]
    #[should_panic(expected = "write past the end of buffer")]
    fn test_write_out_of_bounds() {
        let system_under_test = HostMemory::new();
        let buffer = system_under_test.allocate_uniform_buffer("test", 2);
        system_under_test.write_buffer(&buffer, 1, &[1, 2]);
    }
}
