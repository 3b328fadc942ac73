//! Main application module.
//!
//! Wires the navigation core to the egui surface: translates raw input
//! into intents, runs list fetches and media resolutions on the async
//! runtime, and renders whatever the display state currently holds.
//! The surface has no video decoder; the video screen is a placeholder
//! panel with its own playback clock.

use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use tracing::info;

use crate::config::Config;
use crate::gesture::{key_intent, NavIntent, SwipeTracker};
use crate::loader::{MediaLoader, ResolvedMedia};
use crate::media::MediaItem;
use crate::navigation::{Direction, LoadOutcome, LoadRequest, NavigationState};
use crate::presenter::{PlaybackCommand, Presenter};
use crate::source::MediaSource;

/// Duration of the cosmetic swipe transition.
const TRANSITION_SECS: f32 = 0.3;

/// Nominal clip length for the placeholder video panel.
const PLACEHOLDER_CLIP_SECS: f32 = 5.0;

/// Messages from the async workers back to the UI thread.
enum WorkerEvent {
    ListFetched(Vec<MediaItem>),
    LoadFinished(LoadOutcome),
}

/// Button clicks collected while drawing a frame.
enum UiAction {
    Intent(NavIntent),
    Retry,
}

/// What the surface is currently showing.
#[derive(Default)]
enum Screen {
    #[default]
    Loading,
    Error,
    Image {
        size: [usize; 2],
        pixels: Vec<u8>,
        /// Uploaded lazily on the first frame that draws this image.
        texture: Option<egui::TextureHandle>,
    },
    Video {
        container: &'static str,
        len_bytes: usize,
        elapsed: f32,
    },
}

/// Display-side state, mutated only through the `Presenter` trait.
#[derive(Default)]
struct DisplayState {
    screen: Screen,
    counter: String,
    kind_label: String,
    video_playing: bool,
    transition: Option<(Direction, Instant)>,
}

impl Presenter for DisplayState {
    fn show_loading(&mut self) {
        self.screen = Screen::Loading;
    }

    fn show_error(&mut self) {
        self.screen = Screen::Error;
        self.video_playing = false;
    }

    fn show_media(&mut self, _item: &MediaItem, media: ResolvedMedia) {
        match media {
            ResolvedMedia::Image(image) => {
                self.screen = Screen::Image {
                    size: [image.width as usize, image.height as usize],
                    pixels: image.pixels,
                    texture: None,
                };
                self.video_playing = false;
            }
            ResolvedMedia::Video { container, bytes } => {
                self.screen = Screen::Video {
                    container,
                    len_bytes: bytes.len(),
                    elapsed: 0.0,
                };
                self.video_playing = true;
            }
        }
    }

    fn update_counter(&mut self, text: &str) {
        self.counter = text.to_string();
    }

    fn update_kind_label(&mut self, text: &str) {
        self.kind_label = text.to_string();
    }

    fn playback_control(&mut self, command: PlaybackCommand) {
        self.video_playing = command == PlaybackCommand::Play;
    }

    fn animate_transition(&mut self, direction: Direction) {
        self.transition = Some((direction, Instant::now()));
    }
}

/// Application state.
pub struct ViewerApp {
    config: Config,
    nav: NavigationState,
    display: DisplayState,
    swipe: SwipeTracker,
    /// True once the initial list fetch has come back, even if it was empty.
    list_ready: bool,
    loader: Arc<MediaLoader>,
    rt: tokio::runtime::Handle,
    ctx: egui::Context,
    events_tx: Sender<WorkerEvent>,
    events_rx: Receiver<WorkerEvent>,
}

impl ViewerApp {
    /// Create the application and kick off the initial list fetch.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, rt: tokio::runtime::Handle) -> Self {
        let (events_tx, events_rx) = crossbeam_channel::bounded(16);

        let source = MediaSource::new(config.api_endpoint.clone(), config.environment);
        let limit = config.fetch_limit;
        let tx = events_tx.clone();
        let ctx = cc.egui_ctx.clone();
        rt.spawn(async move {
            let items = source.fetch_items(limit).await;
            if tx.send(WorkerEvent::ListFetched(items)).is_ok() {
                ctx.request_repaint();
            }
        });

        Self {
            config,
            nav: NavigationState::new(),
            display: DisplayState::default(),
            swipe: SwipeTracker::default(),
            list_ready: false,
            loader: Arc::new(MediaLoader::new()),
            rt,
            ctx: cc.egui_ctx.clone(),
            events_tx,
            events_rx,
        }
    }

    /// Hand a load request to the media loader on the async runtime.
    fn dispatch_load(&self, request: LoadRequest) {
        let loader = Arc::clone(&self.loader);
        let tx = self.events_tx.clone();
        let ctx = self.ctx.clone();
        self.rt.spawn(async move {
            let result = loader.resolve(&request.item).await;
            let outcome = LoadOutcome {
                token: request.token,
                item: request.item,
                result,
            };
            if tx.send(WorkerEvent::LoadFinished(outcome)).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    /// Apply worker results that arrived since the last frame.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                WorkerEvent::ListFetched(items) => {
                    info!("Media list ready: {} items", items.len());
                    self.list_ready = true;
                    if let Some(request) = self.nav.start(items, &mut self.display) {
                        self.dispatch_load(request);
                    }
                }
                WorkerEvent::LoadFinished(outcome) => {
                    self.nav.finish_load(outcome, &mut self.display);
                }
            }
        }
    }

    /// Translate raw keyboard/pointer/touch events into navigation intents.
    fn collect_input(&mut self, ctx: &egui::Context) -> Vec<NavIntent> {
        let mut intents = Vec::new();
        let current_kind = self.nav.current_item().map(|item| item.kind);
        let min_distance = self.config.min_swipe_distance;

        ctx.input(|input| {
            for event in &input.events {
                match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        ..
                    } => {
                        if let Some(intent) = key_intent(*key, current_kind) {
                            intents.push(intent);
                        }
                    }
                    egui::Event::PointerButton {
                        pos,
                        button: egui::PointerButton::Primary,
                        pressed,
                        ..
                    } => {
                        if *pressed {
                            self.swipe.press(pos.y);
                        } else if let Some(intent) = self.swipe.release(pos.y, min_distance) {
                            intents.push(intent);
                        }
                    }
                    egui::Event::Touch { phase, pos, .. } => match phase {
                        egui::TouchPhase::Start => self.swipe.press(pos.y),
                        egui::TouchPhase::End => {
                            if let Some(intent) = self.swipe.release(pos.y, min_distance) {
                                intents.push(intent);
                            }
                        }
                        egui::TouchPhase::Cancel => self.swipe.cancel(),
                        egui::TouchPhase::Move => {}
                    },
                    _ => {}
                }
            }
        });

        intents
    }

    fn apply_intent(&mut self, intent: NavIntent) {
        match intent {
            NavIntent::Next => {
                if let Some(request) = self.nav.advance(Direction::Forward, &mut self.display) {
                    self.dispatch_load(request);
                }
            }
            NavIntent::Previous => {
                if let Some(request) = self.nav.advance(Direction::Backward, &mut self.display) {
                    self.dispatch_load(request);
                }
            }
            NavIntent::TogglePlayback => {
                let command = if self.display.video_playing {
                    PlaybackCommand::Pause
                } else {
                    PlaybackCommand::Play
                };
                self.display.playback_control(command);
            }
        }
    }

    /// The playback surface reports the current video finished; auto-advance.
    fn video_ended(&mut self) {
        self.display.video_playing = false;
        if let Some(request) = self.nav.advance(Direction::Forward, &mut self.display) {
            self.dispatch_load(request);
        }
    }

    /// Advance the placeholder playback clock while a video is "playing".
    fn advance_video_clock(&mut self, ctx: &egui::Context) {
        if !self.display.video_playing {
            return;
        }
        let dt = ctx.input(|input| input.stable_dt).min(0.1);
        let mut ended = false;
        if let Screen::Video { elapsed, .. } = &mut self.display.screen {
            *elapsed += dt;
            if *elapsed >= PLACEHOLDER_CLIP_SECS {
                ended = true;
            }
            ctx.request_repaint();
        }
        if ended {
            self.video_ended();
        }
    }

    /// Vertical pixel offset of the content during a swipe transition.
    fn transition_offset(&self) -> f32 {
        let Some((direction, started)) = self.display.transition else {
            return 0.0;
        };
        let t = started.elapsed().as_secs_f32() / TRANSITION_SECS;
        if t >= 1.0 {
            return 0.0;
        }
        let magnitude = 40.0 * (1.0 - t);
        match direction {
            Direction::Forward => -magnitude,
            Direction::Backward => magnitude,
        }
    }

    fn draw(&mut self, ctx: &egui::Context) -> Vec<UiAction> {
        let mut actions = Vec::new();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                self.draw_screen(ui, &mut actions);
                self.draw_overlay(ui, &mut actions);
            });
        actions
    }

    fn draw_screen(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let rect = ui.max_rect();
        let offset = egui::vec2(0.0, self.transition_offset());
        let center = rect.center() + offset;

        if self.list_ready && self.nav.is_empty() {
            ui.painter().text(
                center,
                egui::Align2::CENTER_CENTER,
                "No media available",
                egui::FontId::proportional(16.0),
                egui::Color32::GRAY,
            );
            return;
        }

        match &mut self.display.screen {
            Screen::Loading => {
                ui.put(
                    egui::Rect::from_center_size(center, egui::vec2(48.0, 48.0)),
                    egui::Spinner::new().size(32.0),
                );
                ui.painter().text(
                    center + egui::vec2(0.0, 44.0),
                    egui::Align2::CENTER_CENTER,
                    "Loading...",
                    egui::FontId::proportional(14.0),
                    egui::Color32::GRAY,
                );
                ui.ctx().request_repaint();
            }

            Screen::Error => {
                ui.painter().text(
                    center - egui::vec2(0.0, 28.0),
                    egui::Align2::CENTER_CENTER,
                    "Failed to load media",
                    egui::FontId::proportional(18.0),
                    egui::Color32::LIGHT_RED,
                );
                let retry_rect =
                    egui::Rect::from_center_size(center + egui::vec2(0.0, 16.0), egui::vec2(96.0, 32.0));
                if ui.put(retry_rect, egui::Button::new("Retry")).clicked() {
                    actions.push(UiAction::Retry);
                }
            }

            Screen::Image {
                size,
                pixels,
                texture,
            } => {
                let texture = texture.get_or_insert_with(|| {
                    let image = egui::ColorImage::from_rgba_unmultiplied(*size, pixels);
                    ui.ctx()
                        .load_texture("current-media", image, egui::TextureOptions::LINEAR)
                });
                let tex_size = texture.size_vec2();
                let scale = (rect.width() / tex_size.x).min(rect.height() / tex_size.y);
                let draw_rect = egui::Rect::from_center_size(center, tex_size * scale);
                ui.painter().image(
                    texture.id(),
                    draw_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }

            Screen::Video {
                container,
                len_bytes,
                elapsed,
            } => {
                let panel =
                    egui::Rect::from_center_size(center, egui::vec2(rect.width() * 0.8, 180.0));
                ui.painter()
                    .rect_filled(panel, egui::Rounding::same(8.0), egui::Color32::from_gray(24));
                ui.painter().text(
                    panel.center() - egui::vec2(0.0, 48.0),
                    egui::Align2::CENTER_CENTER,
                    format!("{} clip - {} bytes buffered", container, len_bytes),
                    egui::FontId::proportional(13.0),
                    egui::Color32::GRAY,
                );

                let icon = if self.display.video_playing { "⏸" } else { "▶" };
                let button_rect =
                    egui::Rect::from_center_size(panel.center(), egui::vec2(48.0, 48.0));
                if ui
                    .put(button_rect, egui::Button::new(egui::RichText::new(icon).size(22.0)))
                    .clicked()
                {
                    actions.push(UiAction::Intent(NavIntent::TogglePlayback));
                }

                let progress = (*elapsed / PLACEHOLDER_CLIP_SECS).clamp(0.0, 1.0);
                let bar_rect = egui::Rect::from_center_size(
                    panel.center() + egui::vec2(0.0, 60.0),
                    egui::vec2(panel.width() - 32.0, 8.0),
                );
                ui.put(bar_rect, egui::ProgressBar::new(progress).desired_height(8.0));
            }
        }
    }

    fn draw_overlay(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let rect = ui.max_rect();

        // Counter (top center) and kind badge (top right)
        ui.painter().text(
            egui::pos2(rect.center().x, rect.top() + 20.0),
            egui::Align2::CENTER_CENTER,
            &self.display.counter,
            egui::FontId::proportional(15.0),
            egui::Color32::WHITE,
        );
        if !self.display.kind_label.is_empty() {
            ui.painter().text(
                egui::pos2(rect.right() - 16.0, rect.top() + 20.0),
                egui::Align2::RIGHT_CENTER,
                &self.display.kind_label,
                egui::FontId::monospace(12.0),
                egui::Color32::LIGHT_BLUE,
            );
        }

        // Explicit prev/next buttons, pointless without a list
        if self.nav.is_empty() {
            return;
        }
        let prev_rect = egui::Rect::from_center_size(
            egui::pos2(rect.center().x - 64.0, rect.bottom() - 28.0),
            egui::vec2(96.0, 32.0),
        );
        let next_rect = egui::Rect::from_center_size(
            egui::pos2(rect.center().x + 64.0, rect.bottom() - 28.0),
            egui::vec2(96.0, 32.0),
        );
        if ui.put(prev_rect, egui::Button::new("▲ Prev")).clicked() {
            actions.push(UiAction::Intent(NavIntent::Previous));
        }
        if ui.put(next_rect, egui::Button::new("▼ Next")).clicked() {
            actions.push(UiAction::Intent(NavIntent::Next));
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        let intents = self.collect_input(ctx);
        for intent in intents {
            self.apply_intent(intent);
        }

        let actions = self.draw(ctx);
        for action in actions {
            match action {
                UiAction::Intent(intent) => self.apply_intent(intent),
                UiAction::Retry => {
                    if let Some(request) = self.nav.retry(&mut self.display) {
                        self.dispatch_load(request);
                    }
                }
            }
        }

        // Expire the transition hint; keep repainting while it runs.
        if let Some((_, started)) = self.display.transition {
            if started.elapsed().as_secs_f32() >= TRANSITION_SECS {
                self.display.transition = None;
            } else {
                ctx.request_repaint();
            }
        }

        self.advance_video_clock(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::ResolvedImage;
    use crate::media::MediaKind;

    fn image_media() -> ResolvedMedia {
        ResolvedMedia::Image(ResolvedImage {
            pixels: vec![0; 16],
            width: 2,
            height: 2,
        })
    }

    #[test]
    fn show_media_switches_screens() {
        let mut display = DisplayState::default();
        let image = MediaItem::new("a", "a.png", MediaKind::Image);
        display.show_media(&image, image_media());
        assert!(matches!(display.screen, Screen::Image { .. }));
        assert!(!display.video_playing);

        let video = MediaItem::new("b", "b.mp4", MediaKind::Video);
        display.show_media(
            &video,
            ResolvedMedia::Video {
                container: "mp4",
                bytes: vec![0; 32],
            },
        );
        assert!(matches!(display.screen, Screen::Video { .. }));
        assert!(display.video_playing);
    }

    #[test]
    fn playback_control_drives_the_playing_flag() {
        let mut display = DisplayState::default();
        display.playback_control(PlaybackCommand::Play);
        assert!(display.video_playing);
        display.playback_control(PlaybackCommand::Pause);
        assert!(!display.video_playing);
    }

    #[test]
    fn error_screen_stops_playback() {
        let mut display = DisplayState::default();
        display.playback_control(PlaybackCommand::Play);
        display.show_error();
        assert!(matches!(display.screen, Screen::Error));
        assert!(!display.video_playing);
    }
}
