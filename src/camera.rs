// Opens the camera and streams frames to the gesture side of the main loop.
// Capture runs on its own thread; frames cross over a channel with room for
// exactly one frame, so a slow consumer makes the camera drop frames instead
// of queueing them.

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread;

use tracing::{info, warn};

use crate::config::CameraConfig;
use crate::error::Error;
use crate::types::FrameBuffer;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

// We also use `image` crate types to help decode frames cleanly when needed.
use image::{ImageBuffer, Rgb};

// A small wrapper around nokhwa::Camera so the capture loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `cfg.index` near the requested resolution/fps.
    pub fn new(cfg: &CameraConfig) -> Result<Self, Error> {
        let idx = CameraIndex::Index(cfg.index);

        let fmt = CameraFormat::new(
            Resolution::new(cfg.width, cfg.height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            cfg.fps,
        );

        // Ask for RGB frames, closest to what we requested.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The stream might choose a slightly different resolution.
        let actual = cam.resolution();

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Grab one frame (blocks until the camera has one) as 0x00RRGGBB pixels.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        Ok(rgb_to_frame(&rgb_img))
    }

    /// Report the actual resolution the camera is delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Pack an RGB image into a window-ready frame.
pub fn rgb_to_frame(img: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> FrameBuffer {
    let (w, h) = img.dimensions();
    let pixels = img
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect();
    FrameBuffer { width: w as usize, height: h as usize, pixels }
}

/// Start capturing on a background thread.
///
/// The receiver disconnects when the camera can't be opened or stops
/// delivering frames; the caller treats that as "no camera".
pub fn spawn_camera(cfg: CameraConfig) -> Receiver<FrameBuffer> {
    let (tx, rx) = mpsc::sync_channel(1);
    thread::spawn(move || {
        if let Err(e) = capture_loop(&cfg, &tx) {
            warn!("camera stopped: {e}");
        }
    });
    rx
}

fn capture_loop(cfg: &CameraConfig, tx: &SyncSender<FrameBuffer>) -> Result<(), Error> {
    let mut cam = CameraCapture::new(cfg)?;
    let (w, h) = cam.resolution();
    info!(width = w, height = h, "camera streaming");

    loop {
        let frame = cam.next_frame()?;
        match tx.try_send(frame) {
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_pixels_pack_row_major() {
        let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(2, 2);
        img.put_pixel(0, 0, Rgb([0xFF, 0x00, 0x00]));
        img.put_pixel(1, 0, Rgb([0x00, 0xFF, 0x00]));
        img.put_pixel(0, 1, Rgb([0x00, 0x00, 0xFF]));
        img.put_pixel(1, 1, Rgb([0x12, 0x34, 0x56]));

        let fb = rgb_to_frame(&img);
        assert_eq!((fb.width, fb.height), (2, 2));
        assert_eq!(fb.pixels, vec![0x00FF0000, 0x0000FF00, 0x000000FF, 0x00123456]);
    }
}
