use atomic_float::AtomicF32;
use nalgebra::Vector3;
use std::cell::UnsafeCell;
use std::sync::Mutex;
use std::sync::atomic::Ordering;

/// Represents a 2D buffer containing color and depth information.
/// Thread-safe for parallel rendering using atomic depth and striped locking for color.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub sample_count: usize,
    pub buffer_width: usize,
    pub buffer_height: usize,

    /// Color buffer wrapped in UnsafeCell to allow interior mutability.
    /// Safety is guaranteed by `locks` and depth testing.
    pub color_buffer: UnsafeCell<Vec<Vector3<f32>>>,

    /// Depth buffer with atomic per-sample values.
    pub depth_buffer: Vec<AtomicF32>,

    /// Striped locks to protect color writes.
    /// Pixel coordinates map onto a small pool of locks to reduce contention.
    locks: Vec<Mutex<()>>,
}

// Thread safety is managed manually via the atomics and the lock stripes.
unsafe impl Sync for FrameBuffer {}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        let buffer_width = width * sample_count;
        let buffer_height = height * sample_count;
        let size = buffer_width * buffer_height;

        let mut depth_buffer = Vec::with_capacity(size);
        for _ in 0..size {
            depth_buffer.push(AtomicF32::new(f32::INFINITY));
        }

        let lock_count = 1024;
        let mut locks = Vec::with_capacity(lock_count);
        for _ in 0..lock_count {
            locks.push(Mutex::new(()));
        }

        Self {
            width,
            height,
            sample_count,
            buffer_width,
            buffer_height,
            color_buffer: UnsafeCell::new(vec![Vector3::zeros(); size]),
            depth_buffer,
            locks,
        }
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.buffer_width && y < self.buffer_height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.buffer_width + x
    }

    /// Fills the whole buffer with a single color and resets depth.
    pub fn clear(&mut self, color: Vector3<f32>, depth: f32) {
        let buffer = self.color_buffer.get_mut();
        buffer.fill(color);
        for d in &mut self.depth_buffer {
            *d.get_mut() = depth;
        }
    }

    /// Fills the buffer with a vertical gradient (top row -> bottom row) and resets depth.
    pub fn clear_gradient(&mut self, top: Vector3<f32>, bottom: Vector3<f32>, depth: f32) {
        let rows = self.buffer_height;
        let cols = self.buffer_width;
        let buffer = self.color_buffer.get_mut();
        for y in 0..rows {
            let t = if rows > 1 {
                y as f32 / (rows - 1) as f32
            } else {
                0.0
            };
            let color = top * (1.0 - t) + bottom * t;
            buffer[y * cols..(y + 1) * cols].fill(color);
        }
        for d in &mut self.depth_buffer {
            *d.get_mut() = depth;
        }
    }

    /// Thread-safe depth test and update.
    /// Returns true if the new depth is closer than the existing value.
    /// If true, it updates the depth buffer atomically.
    #[inline]
    pub fn depth_test_and_update(&self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let depth_atomic = &self.depth_buffer[self.index(x, y)];

        // CAS loop: only the strictly closest fragment wins.
        let mut current = depth_atomic.load(Ordering::Relaxed);
        loop {
            if new_depth >= current {
                return false;
            }
            match depth_atomic.compare_exchange_weak(
                current,
                new_depth,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(updated) => current = updated,
            }
        }
    }

    /// Thread-safe pixel write.
    /// Should only be called AFTER depth_test_and_update returns true.
    #[inline]
    pub fn set_pixel_safe(&self, x: usize, y: usize, color: Vector3<f32>) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);

            let lock_idx = idx % self.locks.len();
            let _guard = self.locks[lock_idx].lock().unwrap();

            // Safe because the lock covers this stripe of pixels.
            unsafe {
                let buffer = &mut *self.color_buffer.get();
                buffer[idx] = color;
            }
        }
    }

    /// Resolves the (possibly supersampled) buffer at output resolution.
    /// Safe to call once rendering has finished.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let buffer = unsafe { &*self.color_buffer.get() };

        if self.sample_count == 1 {
            return Some(buffer[self.index(x, y)]);
        }

        let mut sum_color = Vector3::zeros();
        let start_x = x * self.sample_count;
        let start_y = y * self.sample_count;

        for dy in 0..self.sample_count {
            for dx in 0..self.sample_count {
                sum_color += buffer[self.index(start_x + dx, start_y + dy)];
            }
        }

        let samples = (self.sample_count * self.sample_count) as f32;
        Some(sum_color / samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_test_keeps_closest() {
        let fb = FrameBuffer::new(4, 4, 1);
        assert!(fb.depth_test_and_update(1, 1, 0.8));
        assert!(fb.depth_test_and_update(1, 1, 0.3));
        // Farther fragment loses.
        assert!(!fb.depth_test_and_update(1, 1, 0.5));
        // Equal depth loses too (strict less-than).
        assert!(!fb.depth_test_and_update(1, 1, 0.3));
    }

    #[test]
    fn out_of_bounds_rejected() {
        let fb = FrameBuffer::new(2, 2, 1);
        assert!(!fb.depth_test_and_update(2, 0, 0.1));
        assert!(fb.get_pixel(2, 0).is_none());
    }

    #[test]
    fn supersampled_pixels_average() {
        let mut fb = FrameBuffer::new(1, 1, 2);
        fb.clear(Vector3::zeros(), f32::INFINITY);
        fb.set_pixel_safe(0, 0, Vector3::new(1.0, 0.0, 0.0));
        fb.set_pixel_safe(1, 0, Vector3::new(1.0, 0.0, 0.0));
        fb.set_pixel_safe(0, 1, Vector3::zeros());
        fb.set_pixel_safe(1, 1, Vector3::zeros());

        let resolved = fb.get_pixel(0, 0).unwrap();
        assert!((resolved.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn gradient_clear_interpolates_rows() {
        let mut fb = FrameBuffer::new(2, 3, 1);
        fb.clear_gradient(
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::zeros(),
            f32::INFINITY,
        );
        let top = fb.get_pixel(0, 0).unwrap();
        let bottom = fb.get_pixel(0, 2).unwrap();
        assert!(top.x > 0.99);
        assert!(bottom.x < 0.01);
    }
}
