// Fixed memory footprint reserved at startup

use std::time::Instant;
use tracing::info;

/// A buffer that exists only to occupy memory.
///
/// Every byte is written once (`i mod 256`) so the pages are actually
/// resident and count against the container's memory limit. Nothing reads
/// the contents afterwards; hold the value for as long as the footprint
/// should last.
pub struct MemoryReservation {
    buffer: Vec<u8>,
}

impl MemoryReservation {
    pub fn allocate(size_bytes: usize) -> Self {
        let started: Instant = Instant::now();

        let buffer: Vec<u8> = (0..size_bytes).map(|i| (i % 256) as u8).collect();

        info!(
            "Reserved {} bytes of memory in {} ms",
            buffer.len(),
            started.elapsed().as_millis()
        );

        Self { buffer }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl std::fmt::Debug for MemoryReservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryReservation")
            .field("len", &self.buffer.len())
            .finish()
    }
}
