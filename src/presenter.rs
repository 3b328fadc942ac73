//! Presentation interface consumed by the navigation core.
//! The core only issues commands through this trait; it never reads
//! layout or styling state back.

use crate::loader::ResolvedMedia;
use crate::media::MediaItem;
use crate::navigation::Direction;

/// Play/pause command routed to the surface's playback control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Play,
    Pause,
}

/// The external rendering surface driven by the core's display commands.
pub trait Presenter {
    /// Show the in-progress indicator, hiding any current media.
    fn show_loading(&mut self);
    /// Show the failure state with its retry affordance.
    fn show_error(&mut self);
    /// Display a successfully resolved item.
    fn show_media(&mut self, item: &MediaItem, media: ResolvedMedia);
    /// Update the "current / total" counter text.
    fn update_counter(&mut self, text: &str);
    /// Update the media-kind badge.
    fn update_kind_label(&mut self, text: &str);
    /// Forward a play/pause command to the current video, if any.
    fn playback_control(&mut self, command: PlaybackCommand);
    /// Cosmetic transition hint for the direction just navigated.
    fn animate_transition(&mut self, direction: Direction);
}
