//! Full-frame RGB565 buffer in panel byte order

use core::convert::Infallible;
use core::ptr::NonNull;
use std::alloc::{self, Layout};

use anyhow::{anyhow, Result};

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Start address alignment of every frame buffer, the GDMA block size for
/// PSRAM on the ESP32-S3
pub const BUFFER_ALIGN: usize = 64;

/// Zeroed heap bytes starting on a [`BUFFER_ALIGN`] boundary
struct AlignedBytes {
    ptr: NonNull<u8>,
    len: usize,
    layout: Layout,
}

impl AlignedBytes {
    fn zeroed(len: usize) -> Result<Self> {
        // Zero sized allocations are not allowed
        let layout = Layout::from_size_align(len.max(1), BUFFER_ALIGN)
            .map_err(|e| anyhow!("Frame buffer of {len} bytes: {e}"))?;
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(raw) else {
            alloc::handle_alloc_error(layout);
        };
        Ok(AlignedBytes { ptr, len, layout })
    }

    fn as_slice(&self) -> &[u8] {
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for AlignedBytes {
    fn drop(&mut self) {
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) }
    }
}

/// One frame of RGB565 pixels stored exactly as they go over the bus.
///
/// With `swap_bytes` set every pixel is stored high byte first, which is the
/// order the ST7789 expects on an 8-bit bus. The storage starts on a
/// [`BUFFER_ALIGN`] boundary because the panel DMA reads it in place.
pub struct FrameBuffer {
    width: u32,
    height: u32,
    swap_bytes: bool,
    bytes: AlignedBytes,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, swap_bytes: bool) -> Result<Self> {
        let len = width as usize * height as usize * 2;
        Ok(FrameBuffer {
            width,
            height,
            swap_bytes,
            bytes: AlignedBytes::zeroed(len)?,
        })
    }

    /// Raw bytes ready for the panel
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Read a pixel back, `None` outside the frame
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb565> {
        let offset = self.offset(x, y)?;
        let bytes = self.bytes.as_slice();
        let pair = [bytes[offset], bytes[offset + 1]];
        let raw = if self.swap_bytes {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        };
        Some(Rgb565::from(RawU16::new(raw)))
    }

    fn encode(&self, color: Rgb565) -> [u8; 2] {
        let raw = RawU16::from(color).into_inner();
        if self.swap_bytes {
            raw.to_be_bytes()
        } else {
            raw.to_le_bytes()
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 2)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if let Some(offset) = self.offset(x, y) {
                let encoded = self.encode(color);
                self.bytes.as_mut_slice()[offset..offset + 2].copy_from_slice(&encoded);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let encoded = self.encode(color);
        for chunk in self.bytes.as_mut_slice().chunks_exact_mut(2) {
            chunk.copy_from_slice(&encoded);
        }
        Ok(())
    }
}
