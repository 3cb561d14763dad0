#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-multiring/")]

//! # bubbletea-multiring
//!
//! A concentric multi-ring progress indicator for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications.
//!
//! ## Overview
//!
//! The overall progress (0 to 100) is split across `N` rings drawn inside
//! each other. Rings fill one after another: the outermost first, or the
//! innermost first when reversed. A readout in the middle counts towards the
//! value, with an optional caption above and below it.
//!
//! Every progress change is animated. The running animation is cancelled at
//! once and a new chain of animations starts from what the rings currently
//! show, so the indicator never jumps. Each ring gets an equal share of the
//! animation duration and rings animate strictly one at a time.
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`model`] | The component: options, setters, `update` and `view` |
//! | [`config`] | `Config` and the `with_*` construction options |
//! | [`plan`] | Splitting a progress change into per-ring segments |
//! | [`sequencer`] | Cancellable, chained playback of plans |
//! | [`controller`] | The ring and label state plans are computed from |
//! | [`layout`] | Ring bounds and text zones |
//! | [`canvas`] | Braille rendering |
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_multiring::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     rings: MultiRing,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut rings = multiring_new(&[with_ring_count(3), with_progress(60)]);
//!         let cmd = rings.attach();
//!         (Self { rings }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.rings.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.rings.view()
//!     }
//! }
//! ```
//!
//! Logging goes through [`tracing`](https://docs.rs/tracing); install a
//! subscriber in the application to see plans, cancellations and lifecycle
//! changes.

pub mod canvas;
pub mod config;
pub mod controller;
pub mod error;
pub mod layout;
pub mod model;
pub mod plan;
pub mod ring;
pub mod sequencer;
pub mod text;

use bubbletea_rs::Cmd;

/// Host lifecycle of an animated component.
///
/// A component is shown when it is both attached and visible. Animations
/// only play while shown: losing either state cancels the running animation
/// synchronously, and gaining the last of them replays towards the most
/// recent target from wherever the animation was stopped.
///
/// ```rust
/// use bubbletea_multiring::prelude::*;
///
/// let mut rings = multiring_new(&[with_progress(50)]);
/// assert!(!rings.is_shown());
///
/// // Attaching starts the animation to the initial progress.
/// assert!(rings.attach().is_some());
///
/// // Hiding freezes it.
/// rings.set_visible(false);
/// assert!(!rings.is_animating());
/// ```
pub trait Lifecycle {
    /// Marks the component visible or hidden.
    ///
    /// Returns the first frame of the resumed animation when the component
    /// becomes shown.
    fn set_visible(&mut self, visible: bool) -> Option<Cmd>;

    /// Attaches the component to its host.
    ///
    /// Returns the first frame of the resumed animation when the component
    /// becomes shown.
    fn attach(&mut self) -> Option<Cmd>;

    /// Detaches the component, cancelling any running animation.
    fn detach(&mut self);

    /// True when the component is attached and visible.
    fn is_shown(&self) -> bool;
}

pub use config::{Config, RingsOption};
pub use error::{Error, Result};
pub use model::Model as MultiRing;
pub use text::{TextPosition, Typeface};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_multiring::prelude::*;
///
/// let rings = multiring_new(&[with_ring_count(2), reversed()]);
/// assert_eq!(rings.rings().len(), 2);
/// ```
pub mod prelude {
    pub use crate::config::{
        reversed, with_animation_duration, with_guide_color, with_progress, with_progress_color,
        with_ring_count, with_ring_padding, with_ring_thickness, with_size, with_start_angle,
        with_text_indicator, without_value_indicator, Config, RingsOption,
    };
    pub use crate::error::{Error, Result};
    pub use crate::layout::Insets;
    pub use crate::model::{new as multiring_new, Model as MultiRing};
    pub use crate::sequencer::FrameMsg;
    pub use crate::text::{TextPosition, Typeface};
    pub use crate::Lifecycle;
}
