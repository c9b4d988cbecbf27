use clap::Parser;
use moodwave::analysis::TrackAnalysis;
use moodwave::audio::player::VOLUME_STEP;
use moodwave::audio::wav::clock_label;
use moodwave::audio::{AudioPlayer, Playlist, Track};
use moodwave::config::Config;
use moodwave::logging;
use moodwave::visual::{FrameScheduler, NannouCanvas, Size, Visualizer, VisualizerProps};
use nannou::prelude::*;
use std::path::Path;
use tracing::{error, info, warn};

const SEEK_STEP_SECS: f32 = 10.0;

struct Model {
    config: Config,
    playlist: Playlist,
    track: Option<Track>,
    player: AudioPlayer,
    analysis: TrackAnalysis,
    scheduler: FrameScheduler,
    canvas: NannouCanvas,
    visualizer: Visualizer,
    title: String,
}

fn main() {
    if let Err(e) = logging::init() {
        eprintln!("logging disabled: {e}");
    }
    nannou::app(model).update(update).exit(exit).run();
}

fn read_track(path: &Path) -> Option<Track> {
    match Track::from_wav(path) {
        Ok(track) => {
            info!(
                title = %track.title,
                duration = %track.duration_label(),
                sample_rate = track.sample_rate,
                "track loaded"
            );
            Some(track)
        }
        Err(e) => {
            warn!("could not read track header: {e:#}");
            None
        }
    }
}

fn open_player(config: &Config, path: &Path, volume: f32, track: Option<&Track>) -> AudioPlayer {
    let silent = || AudioPlayer::silent(track.map(Track::duration));
    if config.mute {
        return silent();
    }
    AudioPlayer::start(path, volume).unwrap_or_else(|e| {
        warn!("playing without audio: {e:#}");
        silent()
    })
}

fn load_analysis(config: &Config, path: &Path) -> TrackAnalysis {
    let analysis = TrackAnalysis::load(config.analysis_path_for(path));
    info!(
        mood = ?analysis.mood_tags(),
        prompt = %analysis.visual_prompt,
        "{}",
        analysis.description
    );
    analysis
}

fn model(app: &App) -> Model {
    let config = Config::parse();
    let playlist = match config.playlist() {
        Ok(p) => p,
        Err(e) => {
            error!("{e:#}");
            std::process::exit(2);
        }
    };

    let built = app
        .new_window()
        .title("moodwave")
        .size(config.width, config.height)
        .view(view)
        .key_pressed(key_pressed)
        .resized(resized)
        .build();
    if let Err(e) = built {
        error!("failed to open window: {e:?}");
        std::process::exit(1);
    }

    let path = playlist.current().to_path_buf();
    let track = read_track(&path);
    let analysis = load_analysis(&config, &path);
    let mut player = open_player(&config, &path, config.volume(), track.as_ref());
    if config.autoplay {
        player.play();
    }

    let win = app.window_rect();
    let mut canvas = NannouCanvas::new(Size::new(win.w(), win.h()));
    let scheduler = FrameScheduler::new();
    let props = VisualizerProps {
        is_playing: player.is_playing(),
        palette: analysis.palette(),
    };
    let mut visualizer = Visualizer::new(scheduler.clone(), props);
    if let Some(seed) = config.seed {
        visualizer = visualizer.with_seed(seed);
    }
    visualizer.mount(&mut canvas);

    Model {
        config,
        playlist,
        track,
        player,
        analysis,
        scheduler,
        canvas,
        visualizer,
        title: String::new(),
    }
}

/// Swaps in the playlist's current track: new player, new analysis, and a
/// visualizer rebuild if the palette differs. Play state carries over.
fn switch_track(model: &mut Model) {
    let path = model.playlist.current().to_path_buf();
    let was_playing = model.player.is_playing();
    let volume = model.player.volume();
    model.player.pause();

    model.track = read_track(&path);
    model.player = open_player(&model.config, &path, volume, model.track.as_ref());
    if was_playing {
        model.player.play();
    }
    model.analysis = load_analysis(&model.config, &path);
    apply_props(model);
}

fn apply_props(model: &mut Model) {
    let props = VisualizerProps {
        is_playing: model.player.is_playing(),
        palette: model.analysis.palette(),
    };
    model.visualizer.update(props, &mut model.canvas);
}

fn title_of(model: &Model) -> String {
    let name = model.track.as_ref().map_or("moodwave", |t| t.title.as_str());
    let elapsed = clock_label(model.player.position().as_secs_f32());
    let total = model
        .track
        .as_ref()
        .map_or_else(|| "-:--".to_string(), Track::duration_label);
    let state = if model.player.is_playing() { "playing" } else { "paused" };
    format!(
        "{name}  {elapsed} / {total}  [{state}, vol {:.0}%]  {}",
        model.player.volume() * 100.0,
        model.analysis.mood
    )
}

fn update(app: &App, model: &mut Model, _update: Update) {
    if model.player.is_playing() && model.player.finished() {
        model.playlist.next();
        switch_track(model);
    }

    let title = title_of(model);
    if title != model.title {
        app.main_window().set_title(&title);
        model.title = title;
    }

    model.visualizer.set_playing(model.player.is_playing());
    model.canvas.begin_frame();
    model.visualizer.run_due_frames(&mut model.canvas);
}

fn view(app: &App, model: &Model, frame: Frame) {
    if let Err(e) = model.canvas.draw().to_frame(app, &frame) {
        error!("failed to render frame: {e:?}");
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Space => {
            let playing = model.player.toggle();
            model.visualizer.set_playing(playing);
        }
        Key::N => {
            model.playlist.next();
            switch_track(model);
        }
        Key::P => {
            model.playlist.prev();
            switch_track(model);
        }
        Key::Up => {
            let v = model.player.set_volume(model.player.volume() + VOLUME_STEP);
            info!(volume = v, "volume");
        }
        Key::Down => {
            let v = model.player.set_volume(model.player.volume() - VOLUME_STEP);
            info!(volume = v, "volume");
        }
        Key::Right | Key::Left => {
            let delta = if key == Key::Right { SEEK_STEP_SECS } else { -SEEK_STEP_SECS };
            if let Err(e) = model.player.seek_by(delta) {
                warn!("seek failed: {e:#}");
            }
        }
        Key::R => {
            let path = model.playlist.current().to_path_buf();
            model.analysis = load_analysis(&model.config, &path);
            apply_props(model);
        }
        _ => {}
    }
}

fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.canvas.set_display(Some(Size::new(size.x, size.y)));
    for id in model.scheduler.resize_listeners() {
        model.visualizer.dispatch_resize(id, &mut model.canvas);
    }
}

fn exit(_app: &App, mut model: Model) {
    model.player.pause();
    model.visualizer.unmount();
    info!("bye");
}
