//! `rodio` audio backend (feature `audio`).

use std::fs::File;
use std::io::BufReader;

use rodio::cpal::traits::{DeviceTrait, HostTrait};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use super::cue::Cue;
use super::player::CuePlayer;
use crate::core::{AudioConfig, CueError};

/// Names of the host's output devices, in enumeration order.
///
/// The index of a name here is what `AudioConfig::output_device` accepts as a
/// numeric selector.
pub fn list_output_devices() -> Result<Vec<String>, CueError> {
    let host = rodio::cpal::default_host();
    let devices = host
        .output_devices()
        .map_err(|err| CueError::DeviceUnavailable(err.to_string()))?;
    Ok(devices
        .map(|device| device.name().unwrap_or_else(|_| "<unnamed>".to_string()))
        .collect())
}

fn open_stream(selector: Option<&str>) -> Result<(OutputStream, OutputStreamHandle), CueError> {
    let Some(selector) = selector else {
        return OutputStream::try_default()
            .map_err(|err| CueError::DeviceUnavailable(err.to_string()));
    };

    let host = rodio::cpal::default_host();
    let devices = host
        .output_devices()
        .map_err(|err| CueError::DeviceUnavailable(err.to_string()))?;

    let index = selector.parse::<usize>().ok();
    let device = devices
        .enumerate()
        .find(|(i, device)| match index {
            Some(index) => *i == index,
            None => device
                .name()
                .map(|name| name.contains(selector))
                .unwrap_or(false),
        })
        .map(|(_, device)| device)
        .ok_or_else(|| CueError::DeviceUnavailable(format!("no output device matches '{selector}'")))?;

    log::info!(
        "using output device {}",
        device.name().unwrap_or_else(|_| selector.to_string())
    );
    OutputStream::try_from_device(&device).map_err(|err| CueError::DeviceUnavailable(err.to_string()))
}

/// Plays cue files from the configured asset directory.
pub struct RodioPlayer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    config: AudioConfig,
}

impl RodioPlayer {
    /// Open the configured output device.
    pub fn open(config: AudioConfig) -> Result<Self, CueError> {
        let (stream, handle) = open_stream(config.output_device.as_deref())?;
        Ok(Self {
            _stream: stream,
            handle,
            config,
        })
    }
}

impl CuePlayer for RodioPlayer {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        let path = self.config.resolve(cue);
        let unavailable = |reason: String| CueError::AssetUnavailable {
            cue,
            path: path.clone(),
            reason,
        };

        let file = File::open(&path).map_err(|err| unavailable(err.to_string()))?;
        let source = Decoder::new(BufReader::new(file)).map_err(|err| unavailable(err.to_string()))?;

        let sink = Sink::try_new(&self.handle).map_err(|err| CueError::PlaybackFailure {
            cue,
            reason: err.to_string(),
        })?;
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}
