//! Mock bus for testing

use super::SensorBus;
use crate::error::Result;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock sensor bus for unit testing
///
/// Clones share the same buffers, so a test can keep one handle for
/// injecting responses while the driver owns another. A drained read
/// queue reads zero bytes, which the driver reports as a short transfer;
/// tests use that to simulate a failing sensor.
#[derive(Clone)]
pub struct MockBus {
    inner: Arc<Mutex<MockBusInner>>,
}

struct MockBusInner {
    read_buffer: VecDeque<u8>,
    write_buffer: Vec<u8>,
}

impl MockBus {
    /// Create a new mock bus
    pub fn new() -> Self {
        MockBus {
            inner: Arc::new(Mutex::new(MockBusInner {
                read_buffer: VecDeque::new(),
                write_buffer: Vec::new(),
            })),
        }
    }

    /// Inject data to be read
    pub fn inject_read(&self, data: &[u8]) {
        let mut inner = self.inner.lock().unwrap();
        inner.read_buffer.extend(data);
    }

    /// Get all written data
    pub fn get_written(&self) -> Vec<u8> {
        let inner = self.inner.lock().unwrap();
        inner.write_buffer.clone()
    }

    /// Clear written data
    pub fn clear_written(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.write_buffer.clear();
    }

    /// Clear read buffer
    pub fn clear_read(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.read_buffer.clear();
    }
}

impl SensorBus for MockBus {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        let available = inner.read_buffer.len().min(buffer.len());

        for item in buffer.iter_mut().take(available) {
            *item = inner.read_buffer.pop_front().unwrap();
        }

        Ok(available)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        inner.write_buffer.extend_from_slice(data);
        Ok(data.len())
    }
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}
