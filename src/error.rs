// Crate-wide error type. Every variant states *where* things went wrong.
// The particle core never fails; only the host side (window, camera, config,
// tracker) produces these.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String),   // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Camera init error: {0}")]
    CameraInit(String),   // Opening/starting the camera failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String),  // Grabbing/decoding a frame failed
    #[error("Config error: {0}")]
    Config(String),       // Reading or validating the config file failed
    #[error("Hand tracker error: {0}")]
    Tracker(String),      // The landmark source rejected options or a frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_stage() {
        let e = Error::CameraInit("Open stream: busy".into());
        assert_eq!(e.to_string(), "Camera init error: Open stream: busy");
        let e = Error::Config("particles.count must be > 0".into());
        assert!(e.to_string().starts_with("Config error:"));
    }
}
