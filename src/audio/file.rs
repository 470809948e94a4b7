//! File-backed playback resource
//!
//! Decodes an audio file with symphonia on a background thread and plays it
//! through a cpal output stream. The decoder and the output callback share a
//! lock-free ring of interleaved stereo samples.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicU8, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{
    traits::{Consumer, Observer, Producer, Split},
    HeapRb,
};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, SeekMode, SeekTo};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::{Time, TimeBase};

use super::resource::{AudioError, MediaEvent, PlaybackResource};

/// Sentinel stored in the seek slot when no seek is pending
const NO_SEEK: u64 = u64::MAX;

/// Output ring length in frames per second of audio (~200 ms)
const RING_DIVISOR: u32 = 5;

/// Time updates per second of decoded audio
const TIME_UPDATES_PER_SEC: u32 = 4;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(u8)]
enum PlaybackState {
    #[default]
    Stopped = 0,
    Playing = 1,
    Paused = 2,
}

impl PlaybackState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Playing,
            2 => Self::Paused,
            _ => Self::Stopped,
        }
    }
}

/// Metadata resolved when the file is probed
#[derive(Debug, Clone)]
struct TrackInfo {
    path: PathBuf,
    duration: Option<Duration>,
    total_frames: u64,
    sample_rate: u32,
}

/// State shared with the decoder thread and the output callback
struct Shared {
    state: AtomicU8,
    /// Decoder position in frames
    position: AtomicU64,
    /// Pending seek target in frames, or `NO_SEEK`
    seek_request: AtomicU64,
    /// Ask the output callback to drop queued samples
    flush: AtomicBool,
    is_running: AtomicBool,
    /// The last run decoded to the end of the stream
    ended: AtomicBool,
    /// f32 bits
    volume: AtomicU32,
}

impl Shared {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(PlaybackState::Stopped as u8),
            position: AtomicU64::new(0),
            seek_request: AtomicU64::new(NO_SEEK),
            flush: AtomicBool::new(false),
            is_running: AtomicBool::new(false),
            ended: AtomicBool::new(false),
            volume: AtomicU32::new(1.0_f32.to_bits()),
        }
    }

    fn state(&self) -> PlaybackState {
        PlaybackState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: PlaybackState) {
        self.state.store(state as u8, Ordering::Release);
    }

    fn take_seek(&self) -> Option<u64> {
        match self.seek_request.swap(NO_SEEK, Ordering::AcqRel) {
            NO_SEEK => None,
            frames => Some(frames),
        }
    }
}

/// Playback resource backed by an audio file on disk.
///
/// A file that cannot be opened produces an inert resource: every control
/// call is accepted but `play` reports [`AudioError::Unavailable`].
pub struct FileResource {
    info: Option<TrackInfo>,
    shared: Arc<Shared>,
    thread_handle: Option<thread::JoinHandle<()>>,
    output_stream: Option<cpal::Stream>,
    events_tx: Sender<MediaEvent>,
    events_rx: Receiver<MediaEvent>,
}

impl FileResource {
    /// Open a track, degrading to an inert resource on failure
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::try_open(path).unwrap_or_else(|e| {
            log::warn!("Track unavailable ({}): {}", path.display(), e);
            Self::inert()
        })
    }

    /// Probe a track and queue its metadata event
    pub fn try_open(path: impl AsRef<Path>) -> Result<Self, AudioError> {
        let info = probe_track(path.as_ref())?;
        let mut resource = Self::inert();
        resource.info = Some(info);

        if let Some(duration) = resource.info.as_ref().and_then(|i| i.duration) {
            let _ = resource
                .events_tx
                .send(MediaEvent::LoadedMetadata(duration.as_secs_f64()));
        }
        log::info!("Loaded track: {:?}", path.as_ref());

        Ok(resource)
    }

    /// A resource with nothing to play
    pub fn inert() -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            info: None,
            shared: Arc::new(Shared::new()),
            thread_handle: None,
            output_stream: None,
            events_tx,
            events_rx,
        }
    }

    /// Stop the decoder thread and release the output stream
    fn shutdown(&mut self) {
        self.shared.is_running.store(false, Ordering::Release);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
        self.output_stream = None;
    }

    /// Set up the cpal output stream, returning the ring producer that feeds it
    fn start_output(&mut self, sample_rate: u32) -> Result<ringbuf::HeapProd<f32>, AudioError> {
        let capacity = (sample_rate / RING_DIVISOR).max(1024) as usize * 2;
        let (prod, mut cons) = HeapRb::<f32>::new(capacity).split();

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::OutputError("no output device".to_string()))?;

        let config = output_config(&device, sample_rate)?;
        if config.sample_rate.0 != sample_rate {
            log::warn!(
                "Device runs at {} Hz, track is {} Hz",
                config.sample_rate.0,
                sample_rate
            );
        }
        let channels = config.channels as usize;
        let shared = Arc::clone(&self.shared);

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if shared.flush.swap(false, Ordering::AcqRel) {
                        cons.clear();
                    }

                    // Hold queued samples while paused so resume is seamless
                    if shared.state() != PlaybackState::Playing {
                        data.fill(0.0);
                        return;
                    }

                    let volume = f32::from_bits(shared.volume.load(Ordering::Relaxed));
                    for frame in data.chunks_mut(channels) {
                        let left = cons.try_pop().unwrap_or(0.0) * volume;
                        let right = cons.try_pop().unwrap_or(0.0) * volume;
                        if channels >= 2 {
                            frame[0] = left;
                            frame[1] = right;
                            for ch in frame.iter_mut().skip(2) {
                                *ch = 0.0;
                            }
                        } else {
                            frame[0] = (left + right) / 2.0;
                        }
                    }
                },
                |err| log::error!("Audio output error: {}", err),
                None,
            )
            .map_err(|e| AudioError::OutputError(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::OutputError(e.to_string()))?;
        self.output_stream = Some(stream);

        Ok(prod)
    }

    /// Join the previous run and prepare a fresh one. A run that reached the
    /// end of the stream starts over from the top, whatever the container
    /// claimed its length to be. Events the old run left queued are dropped
    /// so a stale `Ended` cannot stop the new run.
    fn begin_run(&mut self, sample_rate: u32) {
        self.shutdown();
        if self.shared.ended.swap(false, Ordering::AcqRel) {
            self.shared.position.store(0, Ordering::Release);
        }
        self.shared.seek_request.store(NO_SEEK, Ordering::Release);

        let carried: Vec<MediaEvent> = self
            .events_rx
            .try_iter()
            .filter(|e| matches!(e, MediaEvent::LoadedMetadata(_)))
            .collect();
        for event in carried {
            let _ = self.events_tx.send(event);
        }
        let position = self.shared.position.load(Ordering::Acquire);
        let _ = self
            .events_tx
            .send(MediaEvent::TimeUpdate(frames_to_secs(position, sample_rate)));
    }

    fn frames_for(&self, seconds: f64) -> u64 {
        let rate = self.info.as_ref().map(|i| i.sample_rate).unwrap_or(44100);
        (seconds.max(0.0) * f64::from(rate)) as u64
    }
}

impl PlaybackResource for FileResource {
    fn play(&mut self) -> Result<(), AudioError> {
        let Some(info) = self.info.clone() else {
            return Err(AudioError::Unavailable);
        };

        match self.shared.state() {
            PlaybackState::Playing => return Ok(()),
            PlaybackState::Paused => {
                self.shared.set_state(PlaybackState::Playing);
                return Ok(());
            }
            PlaybackState::Stopped => {}
        }

        self.begin_run(info.sample_rate);
        let producer = self.start_output(info.sample_rate)?;

        self.shared.is_running.store(true, Ordering::Release);
        self.shared.set_state(PlaybackState::Playing);

        let path = info.path.clone();
        let shared = Arc::clone(&self.shared);
        let events = self.events_tx.clone();
        let sample_rate = info.sample_rate;

        self.thread_handle = Some(thread::spawn(move || {
            if let Err(e) = decode_thread(&path, &shared, producer, &events, sample_rate) {
                log::error!("Playback error: {}", e);
                shared.set_state(PlaybackState::Stopped);
            }
        }));

        Ok(())
    }

    fn pause(&mut self) {
        if self.shared.state() == PlaybackState::Playing {
            self.shared.set_state(PlaybackState::Paused);
        }
    }

    fn is_playing(&self) -> bool {
        self.shared.state() == PlaybackState::Playing
    }

    fn set_position(&mut self, seconds: f64) {
        let mut frames = self.frames_for(seconds);
        if let Some(info) = &self.info {
            if info.total_frames > 0 {
                frames = frames.min(info.total_frames);
            }
        }
        self.shared.position.store(frames, Ordering::Release);
        self.shared.ended.store(false, Ordering::Release);
        if self.shared.is_running.load(Ordering::Acquire) {
            self.shared.seek_request.store(frames, Ordering::Release);
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.shared
            .volume
            .store(volume.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }

    fn drain_events(&mut self) -> Vec<MediaEvent> {
        self.events_rx.try_iter().collect()
    }
}

impl Drop for FileResource {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Pick an f32 output config, preferring the track's sample rate
fn output_config(device: &cpal::Device, sample_rate: u32) -> Result<cpal::StreamConfig, AudioError> {
    let rate = cpal::SampleRate(sample_rate);
    let preferred = device.supported_output_configs().ok().and_then(|configs| {
        configs
            .filter(|c| c.sample_format() == cpal::SampleFormat::F32)
            .filter(|c| c.min_sample_rate() <= rate && rate <= c.max_sample_rate())
            .max_by_key(|c| c.channels() == 2)
            .map(|c| c.with_sample_rate(rate))
    });

    let config = match preferred {
        Some(c) => c,
        None => device
            .default_output_config()
            .map_err(|e| AudioError::OutputError(e.to_string()))?,
    };

    Ok(config.config())
}

/// Open the container and find the first decodable track
fn open_format(path: &Path) -> Result<(Box<dyn FormatReader>, u32), AudioError> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AudioError::ProbeError(e.to_string()))?;

    let format = probed.format;
    let track_id = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .map(|t| t.id)
        .ok_or(AudioError::NoTracks)?;

    Ok((format, track_id))
}

fn probe_track(path: &Path) -> Result<TrackInfo, AudioError> {
    let (format, track_id) = open_format(path)?;
    let params = format
        .tracks()
        .iter()
        .find(|t| t.id == track_id)
        .map(|t| &t.codec_params)
        .ok_or(AudioError::NoTracks)?;

    let sample_rate = params.sample_rate.unwrap_or(44100);
    let total_frames = params.n_frames.unwrap_or(0);
    let duration = params.n_frames.map(|n_frames| {
        let time_base = params.time_base.unwrap_or(TimeBase::new(1, sample_rate));
        let time = time_base.calc_time(n_frames);
        Duration::from_secs_f64(time.seconds as f64 + time.frac)
    });

    Ok(TrackInfo {
        path: path.to_path_buf(),
        duration,
        total_frames,
        sample_rate,
    })
}

fn seek_format(format: &mut dyn FormatReader, track_id: u32, frame: u64, sample_rate: u32) {
    let seconds = frame as f64 / f64::from(sample_rate);
    if let Err(e) = format.seek(
        SeekMode::Accurate,
        SeekTo::Time {
            time: Time::from(seconds),
            track_id: Some(track_id),
        },
    ) {
        log::warn!("Seek to {:.1}s failed: {}", seconds, e);
    }
}

/// Fold any channel layout into interleaved stereo
fn to_stereo(interleaved: &[f32], channels: usize) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => interleaved.iter().flat_map(|&s| [s, s]).collect(),
        2 => interleaved.to_vec(),
        n => interleaved
            .chunks_exact(n)
            .flat_map(|frame| [frame[0], frame[1]])
            .collect(),
    }
}

fn frames_to_secs(frames: u64, sample_rate: u32) -> f64 {
    frames as f64 / f64::from(sample_rate)
}

/// Decoder thread: reads packets, honours seeks and pause, feeds the output ring
fn decode_thread(
    path: &Path,
    shared: &Shared,
    mut producer: ringbuf::HeapProd<f32>,
    events: &Sender<MediaEvent>,
    sample_rate: u32,
) -> Result<(), AudioError> {
    let (mut format, track_id) = open_format(path)?;
    let params = format
        .tracks()
        .iter()
        .find(|t| t.id == track_id)
        .map(|t| t.codec_params.clone())
        .ok_or(AudioError::NoTracks)?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&params, &DecoderOptions::default())
        .map_err(|e| AudioError::DecoderError(e.to_string()))?;

    let mut current = shared.position.load(Ordering::Acquire);
    if current > 0 {
        seek_format(format.as_mut(), track_id, current, sample_rate);
    }

    let update_every = u64::from(sample_rate / TIME_UPDATES_PER_SEC).max(1);
    let mut last_update = current;
    let idle = Duration::from_millis(5);

    'packets: loop {
        if !shared.is_running.load(Ordering::Acquire) {
            break;
        }

        if let Some(target) = shared.take_seek() {
            seek_format(format.as_mut(), track_id, target, sample_rate);
            decoder.reset();
            current = target;
            last_update = target;
            shared.flush.store(true, Ordering::Release);
            let _ = events.send(MediaEvent::TimeUpdate(frames_to_secs(target, sample_rate)));
        }

        match shared.state() {
            PlaybackState::Paused => {
                thread::sleep(Duration::from_millis(10));
                continue;
            }
            PlaybackState::Stopped => break,
            PlaybackState::Playing => {}
        }

        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                // Let the tail play out before reporting the end
                while !producer.is_empty()
                    && shared.is_running.load(Ordering::Acquire)
                    && shared.state() != PlaybackState::Stopped
                    && shared.seek_request.load(Ordering::Acquire) == NO_SEEK
                {
                    thread::sleep(idle);
                }
                if shared.seek_request.load(Ordering::Acquire) != NO_SEEK {
                    continue;
                }
                shared.ended.store(true, Ordering::Release);
                shared.set_state(PlaybackState::Stopped);
                let _ = events.send(MediaEvent::TimeUpdate(frames_to_secs(current, sample_rate)));
                let _ = events.send(MediaEvent::Ended);
                break;
            }
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(AudioError::DecoderError(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(e)) => {
                log::debug!("Skipping corrupt packet: {}", e);
                continue;
            }
            Err(e) => return Err(AudioError::DecoderError(e.to_string())),
        };

        let spec = *decoded.spec();
        let mut samples = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        samples.copy_interleaved_ref(decoded);
        let stereo = to_stereo(samples.samples(), spec.channels.count());

        // Back-pressure: wait for the output callback to drain the ring
        let mut pending = stereo.as_slice();
        while !pending.is_empty() {
            if !shared.is_running.load(Ordering::Acquire)
                || shared.state() == PlaybackState::Stopped
                || shared.seek_request.load(Ordering::Acquire) != NO_SEEK
            {
                continue 'packets;
            }
            let pushed = producer.push_slice(pending);
            pending = &pending[pushed..];
            if !pending.is_empty() {
                thread::sleep(idle);
            }
        }

        current += (stereo.len() / 2) as u64;
        shared.position.store(current, Ordering::Release);

        if current - last_update >= update_every {
            last_update = current;
            let queued = (producer.occupied_len() / 2) as u64;
            let audible = current.saturating_sub(queued);
            let _ = events.send(MediaEvent::TimeUpdate(frames_to_secs(audible, sample_rate)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    const RATE: u32 = 8000;

    /// Write a 16-bit mono PCM WAV whose header claims `claimed` frames but
    /// which holds only `written` of them.
    fn write_wav(name: &str, claimed: u32, written: u32) -> PathBuf {
        let data_len = claimed * 2;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&RATE.to_le_bytes());
        bytes.extend_from_slice(&(RATE * 2).to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        for i in 0..written {
            let sample = ((i % 64) as i16 - 32) * 256;
            bytes.extend_from_slice(&sample.to_le_bytes());
        }

        let path = std::env::temp_dir().join(format!("folio-{}-{}.wav", name, std::process::id()));
        std::fs::write(&path, bytes).unwrap();
        path
    }

    /// Run the decoder against a ring that a helper thread keeps draining,
    /// as the output callback would.
    fn spawn_decoder(resource: &FileResource) -> (thread::JoinHandle<()>, Arc<AtomicBool>) {
        let info = resource.info.clone().unwrap();
        let (producer, mut consumer) = HeapRb::<f32>::new(4096).split();
        let draining = Arc::new(AtomicBool::new(true));

        let keep_draining = Arc::clone(&draining);
        thread::spawn(move || {
            while keep_draining.load(Ordering::Acquire) {
                while consumer.try_pop().is_some() {}
                thread::sleep(Duration::from_millis(1));
            }
        });

        resource.shared.is_running.store(true, Ordering::Release);
        let shared = Arc::clone(&resource.shared);
        let events = resource.events_tx.clone();
        let handle = thread::spawn(move || {
            decode_thread(&info.path, &shared, producer, &events, info.sample_rate).unwrap();
        });
        (handle, draining)
    }

    /// Collect events until `Ended` arrives
    fn wait_for_end(resource: &FileResource) -> Vec<MediaEvent> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut seen = Vec::new();
        while Instant::now() < deadline {
            if let Ok(event) = resource.events_rx.recv_timeout(Duration::from_millis(50)) {
                let ended = event == MediaEvent::Ended;
                seen.push(event);
                if ended {
                    return seen;
                }
            }
        }
        panic!("no end of stream, saw {:?}", seen);
    }

    #[test]
    fn test_mono_is_duplicated() {
        assert_eq!(to_stereo(&[0.1, 0.2], 1), vec![0.1, 0.1, 0.2, 0.2]);
    }

    #[test]
    fn test_surround_keeps_front_pair() {
        let frames = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(to_stereo(&frames, 3), vec![1.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn test_missing_file_is_inert() {
        let mut resource = FileResource::open("does/not/exist.mp3");
        assert!(resource.info.is_none());
        assert!(matches!(resource.play(), Err(AudioError::Unavailable)));
        assert!(!resource.is_playing());
        assert!(resource.drain_events().is_empty());

        // Controls stay usable
        resource.set_position(12.0);
        resource.set_volume(0.3);
        resource.pause();
        assert_eq!(resource.shared.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_try_open_reports_io_error() {
        assert!(matches!(
            FileResource::try_open("does/not/exist.mp3"),
            Err(AudioError::IoError(_))
        ));
    }

    #[test]
    fn test_probe_reports_duration() {
        let path = write_wav("metadata", 12000, 12000);
        let mut resource = FileResource::try_open(&path).unwrap();
        assert_eq!(resource.drain_events(), vec![MediaEvent::LoadedMetadata(1.5)]);
        assert!(!resource.is_playing());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_decoder_holds_position_while_paused_then_ends() {
        let path = write_wav("paused", 8000, 8000);
        let mut resource = FileResource::try_open(&path).unwrap();
        resource.drain_events();

        resource.shared.set_state(PlaybackState::Paused);
        let (handle, draining) = spawn_decoder(&resource);
        thread::sleep(Duration::from_millis(100));
        assert_eq!(resource.shared.position.load(Ordering::Acquire), 0);
        assert!(resource.drain_events().is_empty());

        resource.shared.set_state(PlaybackState::Playing);
        let events = wait_for_end(&resource);
        handle.join().unwrap();
        draining.store(false, Ordering::Release);

        assert!(!resource.is_playing());
        assert!(resource.shared.ended.load(Ordering::Acquire));
        assert_eq!(resource.shared.position.load(Ordering::Acquire), 8000);
        assert_eq!(events[events.len() - 2], MediaEvent::TimeUpdate(1.0));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_pause_and_resume_keep_position() {
        let path = write_wav("resume", 8000, 8000);
        let mut resource = FileResource::try_open(&path).unwrap();
        resource.shared.position.store(3000, Ordering::Release);
        resource.shared.set_state(PlaybackState::Playing);

        resource.pause();
        assert!(!resource.is_playing());
        resource.play().unwrap();
        assert!(resource.is_playing());
        assert_eq!(resource.shared.position.load(Ordering::Acquire), 3000);

        resource.shared.set_state(PlaybackState::Stopped);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_truncated_file_restarts_from_top_after_end() {
        // Header claims two seconds, the file holds one
        let path = write_wav("truncated", 16000, 8000);
        let mut resource = FileResource::try_open(&path).unwrap();
        assert_eq!(resource.drain_events(), vec![MediaEvent::LoadedMetadata(2.0)]);

        resource.shared.set_state(PlaybackState::Playing);
        let (handle, draining) = spawn_decoder(&resource);
        let _ = wait_for_end(&resource);
        handle.join().unwrap();
        draining.store(false, Ordering::Release);

        let stopped_at = resource.shared.position.load(Ordering::Acquire);
        assert!(stopped_at > 0 && stopped_at < 16000);

        // An Ended left in the queue by the finished run
        let _ = resource.events_tx.send(MediaEvent::Ended);
        resource.begin_run(RATE);
        assert_eq!(resource.shared.position.load(Ordering::Acquire), 0);
        assert!(!resource.shared.ended.load(Ordering::Acquire));
        assert_eq!(resource.drain_events(), vec![MediaEvent::TimeUpdate(0.0)]);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_seek_after_end_cancels_rewind() {
        let path = write_wav("seek-after-end", 8000, 8000);
        let mut resource = FileResource::try_open(&path).unwrap();
        resource.shared.position.store(8000, Ordering::Release);
        resource.shared.ended.store(true, Ordering::Release);

        resource.set_position(0.5);
        resource.begin_run(RATE);
        assert_eq!(resource.shared.position.load(Ordering::Acquire), 4000);
        let _ = std::fs::remove_file(path);
    }
}
