//! Linux framebuffer output
//!
//! Queries the screen geometry once through the `FBIOGET_*` ioctls and pushes
//! whole frames with a single positioned write. Only 32 bits per pixel is
//! supported.

use super::surface::Surface;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::FileExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const FBIOGET_VSCREENINFO: libc::c_ulong = 0x4600;
const FBIOGET_FSCREENINFO: libc::c_ulong = 0x4602;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("Failed to open framebuffer {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Framebuffer query {request} failed: {source}")]
    Query {
        request: &'static str,
        source: io::Error,
    },

    #[error("Unsupported framebuffer depth: {0} bpp (need 32)")]
    UnsupportedDepth(u32),

    #[error("Frame does not match the screen: got {got}, expected {expected}")]
    SizeMismatch {
        got: FrameGeometry,
        expected: FrameGeometry,
    },

    #[error("Failed to write frame: {0}")]
    Write(#[from] io::Error),
}

/// Visible size and row pitch in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    pub width: usize,
    pub height: usize,
    pub stride: usize,
}

impl std::fmt::Display for FrameGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} (stride {})", self.width, self.height, self.stride)
    }
}

impl FrameGeometry {
    pub fn surface(&self) -> Surface {
        Surface::new(self.width, self.height, self.stride)
    }

    pub fn of(surface: &Surface) -> Self {
        Self {
            width: surface.width(),
            height: surface.height(),
            stride: surface.stride(),
        }
    }
}

/// Anything a finished frame can be shown on.
pub trait FrameSink {
    fn geometry(&self) -> FrameGeometry;
    fn present(&mut self, surface: &Surface) -> Result<(), DisplayError>;
}

#[repr(C)]
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
struct FbBitfield {
    offset: u32,
    length: u32,
    msb_right: u32,
}

// Kernel ABI layouts from <linux/fb.h>. Most fields are only there for the size.
#[repr(C)]
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
struct FbVarScreenInfo {
    xres: u32,
    yres: u32,
    xres_virtual: u32,
    yres_virtual: u32,
    xoffset: u32,
    yoffset: u32,
    bits_per_pixel: u32,
    grayscale: u32,
    red: FbBitfield,
    green: FbBitfield,
    blue: FbBitfield,
    transp: FbBitfield,
    nonstd: u32,
    activate: u32,
    height: u32,
    width: u32,
    accel_flags: u32,
    pixclock: u32,
    left_margin: u32,
    right_margin: u32,
    upper_margin: u32,
    lower_margin: u32,
    hsync_len: u32,
    vsync_len: u32,
    sync: u32,
    vmode: u32,
    rotate: u32,
    colorspace: u32,
    reserved: [u32; 4],
}

#[repr(C)]
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
struct FbFixScreenInfo {
    id: [u8; 16],
    smem_start: libc::c_ulong,
    smem_len: u32,
    kind: u32,
    type_aux: u32,
    visual: u32,
    xpanstep: u16,
    ypanstep: u16,
    ywrapstep: u16,
    line_length: u32,
    mmio_start: libc::c_ulong,
    mmio_len: u32,
    accel: u32,
    capabilities: u16,
    reserved: [u16; 2],
}

pub struct LinuxFramebuffer {
    file: File,
    geometry: FrameGeometry,
}

impl LinuxFramebuffer {
    pub fn open(path: &Path) -> Result<Self, DisplayError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| DisplayError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        let mut var = FbVarScreenInfo::default();
        query(&file, FBIOGET_VSCREENINFO, "FBIOGET_VSCREENINFO", &mut var)?;
        let mut fix = FbFixScreenInfo::default();
        query(&file, FBIOGET_FSCREENINFO, "FBIOGET_FSCREENINFO", &mut fix)?;

        if var.bits_per_pixel != 32 {
            return Err(DisplayError::UnsupportedDepth(var.bits_per_pixel));
        }

        let geometry = FrameGeometry {
            width: var.xres as usize,
            height: var.yres as usize,
            stride: fix.line_length as usize / 4,
        };
        info!("Framebuffer {}: {}", path.display(), geometry);

        Ok(Self { file, geometry })
    }
}

fn query<T>(
    file: &File,
    request: libc::c_ulong,
    name: &'static str,
    out: &mut T,
) -> Result<(), DisplayError> {
    let rc = unsafe { libc::ioctl(file.as_raw_fd(), request as _, out as *mut T) };
    if rc < 0 {
        return Err(DisplayError::Query {
            request: name,
            source: io::Error::last_os_error(),
        });
    }
    Ok(())
}

impl FrameSink for LinuxFramebuffer {
    fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    fn present(&mut self, surface: &Surface) -> Result<(), DisplayError> {
        let got = FrameGeometry::of(surface);
        if got != self.geometry {
            return Err(DisplayError::SizeMismatch {
                got,
                expected: self.geometry,
            });
        }
        self.file.write_all_at(surface.as_bytes(), 0)?;
        Ok(())
    }
}
