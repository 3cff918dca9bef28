use super::metadata::{MetadataError, RawTags, TagReader};
use super::{PlaybackState, Player};
use crate::audio::{AudioError, AudioOutput};
use crate::config::Settings;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(PathBuf),
    Play,
    Pause,
    Resume,
    Stop,
    Volume(f32),
}

#[derive(Default)]
struct RecordingOutput {
    calls: Vec<Call>,
    unloadable: Vec<PathBuf>,
    fail_play: bool,
}

impl AudioOutput for RecordingOutput {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        self.calls.push(Call::Load(path.to_path_buf()));
        if self.unloadable.iter().any(|p| p == path) {
            return Err(AudioError::Load {
                path: path.to_path_buf(),
                message: "unsupported format".into(),
            });
        }
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        self.calls.push(Call::Play);
        if self.fail_play {
            return Err(AudioError::Play("device lost".into()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn resume(&mut self) {
        self.calls.push(Call::Resume);
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
    }

    fn set_volume(&mut self, level: f32) {
        self.calls.push(Call::Volume(level));
    }
}

#[derive(Clone, Default)]
struct CountingReader {
    calls: Rc<Cell<usize>>,
}

impl TagReader for CountingReader {
    fn read_tags(&self, path: &Path) -> Result<RawTags, MetadataError> {
        self.calls.set(self.calls.get() + 1);
        Ok(RawTags {
            title: path.file_stem().and_then(|s| s.to_str()).map(str::to_uppercase),
            ..RawTags::default()
        })
    }
}

fn player_with(output: RecordingOutput) -> (Player<RecordingOutput, CountingReader>, Rc<Cell<usize>>) {
    let reader = CountingReader::default();
    let calls = reader.calls.clone();
    (Player::new(output, reader, &Settings::default()), calls)
}

fn player() -> (Player<RecordingOutput, CountingReader>, Rc<Cell<usize>>) {
    player_with(RecordingOutput::default())
}

/// Calls made after construction (which sets the initial volume).
fn transport_calls(p: &Player<RecordingOutput, CountingReader>) -> Vec<Call> {
    p.audio().calls.iter().skip(1).cloned().collect()
}

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|n| PathBuf::from(format!("/music/{n}"))).collect()
}

#[test]
fn construction_applies_initial_volume() {
    let (p, _) = player();
    assert_eq!(p.audio().calls, vec![Call::Volume(0.5)]);
    assert_eq!(p.volume(), 0.5);
    assert_eq!(p.state(), PlaybackState::Stopped);
}

#[test]
fn add_tracks_appends_in_order() {
    let (mut p, _) = player();
    p.add_tracks(paths(&["A.mp3", "B.mp3"]));
    p.add_tracks(paths(&["C.mp3"]));

    assert_eq!(p.playlist().display_names(), vec!["A.mp3", "B.mp3", "C.mp3"]);
}

#[test]
fn first_addition_selects_and_displays_first_track() {
    let (mut p, reads) = player();
    assert!(p.displayed().is_none());

    p.add_tracks(paths(&["a.mp3", "b.mp3"]));
    assert_eq!(p.playlist().selected(), Some(0));
    let (path, metadata) = p.displayed().unwrap();
    assert_eq!(path, Path::new("/music/a.mp3"));
    assert_eq!(metadata.title, "A");
    assert_eq!(reads.get(), 1);

    p.select_track(1);
    p.add_tracks(paths(&["c.mp3"]));
    assert_eq!(p.playlist().selected(), Some(1));
    assert_eq!(p.displayed().unwrap().0, Path::new("/music/b.mp3"));
}

#[test]
fn adding_nothing_to_empty_playlist_selects_nothing() {
    let (mut p, reads) = player();
    p.add_tracks(Vec::new());

    assert_eq!(p.playlist().selected(), None);
    assert!(p.displayed().is_none());
    assert_eq!(reads.get(), 0);
}

#[test]
fn duplicate_paths_are_kept() {
    let (mut p, reads) = player();
    p.add_tracks(paths(&["a.mp3", "a.mp3"]));
    p.select_track(1);

    assert_eq!(p.playlist().len(), 2);
    assert_eq!(reads.get(), 1);
}

#[test]
fn select_track_does_not_touch_playback() {
    let (mut p, _) = player();
    p.add_tracks(paths(&["a.mp3", "b.mp3"]));
    p.toggle_playback();
    let before = transport_calls(&p);

    p.select_track(1);

    assert_eq!(p.state(), PlaybackState::Playing);
    assert_eq!(p.current(), Some(0));
    assert_eq!(transport_calls(&p), before);
    assert_eq!(p.displayed().unwrap().1.title, "B");
}

#[test]
fn select_out_of_range_is_ignored() {
    let (mut p, _) = player();
    p.add_tracks(paths(&["a.mp3"]));
    p.select_track(5);

    assert_eq!(p.playlist().selected(), Some(0));
    assert_eq!(p.displayed().unwrap().0, Path::new("/music/a.mp3"));
}

#[test]
fn toggle_walks_the_transport_state_machine() {
    for names in [&["a.mp3"][..], &["a.mp3", "b.mp3", "c.mp3"][..]] {
        let (mut p, _) = player();
        p.add_tracks(paths(names));

        p.toggle_playback();
        assert_eq!(p.state(), PlaybackState::Playing);
        assert_eq!(p.state().transport_glyph(), "⏸");
        p.toggle_playback();
        assert_eq!(p.state(), PlaybackState::Paused);
        assert_eq!(p.state().transport_glyph(), "▶");
        p.toggle_playback();
        assert_eq!(p.state(), PlaybackState::Playing);
        p.stop();
        assert_eq!(p.state(), PlaybackState::Stopped);
        assert_eq!(p.current(), None);

        assert_eq!(
            transport_calls(&p),
            vec![
                Call::Load(PathBuf::from("/music/a.mp3")),
                Call::Play,
                Call::Pause,
                Call::Resume,
                Call::Stop,
            ]
        );
    }
}

#[test]
fn toggle_plays_the_selected_track() {
    let (mut p, _) = player();
    p.add_tracks(paths(&["a.mp3", "b.mp3"]));
    p.select_track(1);
    p.toggle_playback();

    assert_eq!(p.current(), Some(1));
    assert_eq!(
        transport_calls(&p),
        vec![Call::Load(PathBuf::from("/music/b.mp3")), Call::Play]
    );
}

#[test]
fn toggle_while_paused_resumes_current_track_even_after_reselect() {
    let (mut p, _) = player();
    p.add_tracks(paths(&["a.mp3", "b.mp3"]));
    p.toggle_playback();
    p.toggle_playback();
    p.select_track(1);
    p.toggle_playback();

    assert_eq!(p.state(), PlaybackState::Playing);
    assert_eq!(p.current(), Some(0));
    assert_eq!(transport_calls(&p).last(), Some(&Call::Resume));
}

#[test]
fn toggle_after_stop_reloads_from_start() {
    let (mut p, _) = player();
    p.add_tracks(paths(&["a.mp3"]));
    p.toggle_playback();
    p.stop();
    p.toggle_playback();

    assert_eq!(p.state(), PlaybackState::Playing);
    let loads = transport_calls(&p)
        .into_iter()
        .filter(|c| matches!(c, Call::Load(_)))
        .count();
    assert_eq!(loads, 2);
}

#[test]
fn toggle_on_empty_playlist_is_a_no_op() {
    let (mut p, _) = player();
    p.toggle_playback();

    assert_eq!(p.state(), PlaybackState::Stopped);
    assert!(transport_calls(&p).is_empty());
}

#[test]
fn failed_load_leaves_player_stopped() {
    let output = RecordingOutput {
        unloadable: vec![PathBuf::from("/music/bad.wav")],
        ..RecordingOutput::default()
    };
    let (mut p, _) = player_with(output);
    p.add_tracks(paths(&["bad.wav", "good.wav"]));

    p.toggle_playback();
    assert_eq!(p.state(), PlaybackState::Stopped);
    assert_eq!(p.current(), None);
    assert_eq!(
        transport_calls(&p),
        vec![Call::Load(PathBuf::from("/music/bad.wav"))]
    );

    p.select_track(1);
    p.toggle_playback();
    assert_eq!(p.state(), PlaybackState::Playing);
    assert_eq!(p.current(), Some(1));
}

#[test]
fn failed_play_leaves_player_stopped() {
    let output = RecordingOutput {
        fail_play: true,
        ..RecordingOutput::default()
    };
    let (mut p, _) = player_with(output);
    p.add_tracks(paths(&["a.mp3"]));
    p.toggle_playback();

    assert_eq!(p.state(), PlaybackState::Stopped);
    assert_eq!(p.state().transport_glyph(), "▶");
}

#[test]
fn stop_from_any_state_ends_stopped() {
    let (mut p, _) = player();
    p.stop();
    p.stop();
    assert_eq!(p.state(), PlaybackState::Stopped);

    p.add_tracks(paths(&["a.mp3"]));
    p.toggle_playback();
    p.stop();
    assert_eq!(p.state(), PlaybackState::Stopped);

    p.toggle_playback();
    p.toggle_playback();
    assert_eq!(p.state(), PlaybackState::Paused);
    p.stop();
    assert_eq!(p.state(), PlaybackState::Stopped);

    let stops = transport_calls(&p)
        .into_iter()
        .filter(|c| *c == Call::Stop)
        .count();
    assert_eq!(stops, 4);
}

#[test]
fn set_volume_is_forwarded() {
    let (mut p, _) = player();
    p.set_volume(0.2);
    p.set_volume(1.0);

    assert_eq!(transport_calls(&p), vec![Call::Volume(0.2), Call::Volume(1.0)]);
    assert_eq!(p.volume(), 1.0);
}

#[test]
fn extract_metadata_reads_tags_once_per_path() {
    let (mut p, reads) = player();
    let path = Path::new("/music/song.ogg");

    let first = p.extract_metadata(path).clone();
    let second = p.extract_metadata(path).clone();

    assert_eq!(first, second);
    assert_eq!(first.title, "SONG");
    assert_eq!(first.artist, "Unknown Artist");
    assert_eq!(reads.get(), 1);
}

#[test]
fn playing_reuses_cached_metadata() {
    let (mut p, reads) = player();
    p.add_tracks(paths(&["a.mp3"]));
    p.toggle_playback();
    p.stop();
    p.toggle_playback();

    assert_eq!(reads.get(), 1);
}
