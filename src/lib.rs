//! Scrollfx is a headless engine for scroll-driven visual effects on a single-page portfolio.
//!
//! Everything a browser would do through scroll listeners, animation frames, intersection
//! observers and timers is modelled as explicit inputs on a [`PageSession`]:
//!
//! - Load and validate a [`PageDef`]
//! - Mount a [`PageSession`] at a virtual [`Millis`] timestamp
//! - Feed scroll metrics, frame geometry, visibility and timer ticks
//! - Apply the [`DomWrite`]s collected by a [`DomSink`]
//!
//! The pure pieces (the geometry-to-style mapper, [`active_section`], the reveal observer, the
//! typing effect) are exported on their own for hosts that drive effects differently.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod dom;
pub(crate) mod effects;
pub(crate) mod page;
pub(crate) mod reveal;
pub(crate) mod schedule;
pub(crate) mod scroll;
pub(crate) mod session;

pub use crate::foundation::core::{
    ElementId, Millis, Rect, ScrollMetrics, rect_center_y, rect_from_top,
};
pub use crate::foundation::error::{ScrollFxError, ScrollFxResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::tween::Tween;
pub use crate::dom::sink::{DomSink, DomWrite, InMemoryDomSink, JsonLinesSink};
pub use crate::effects::mapper::{
    FadeScaleConfig, HeroPin, ListItemConfig, MapperConfig, ViewportDistance, fade_opacity,
    map_distance, map_element, map_fade_scale, map_hero, map_list_item, map_parallax,
    shrink_scale,
};
pub use crate::effects::style::{StyleFrame, TransformOp};
pub use crate::page::layout::{BlockDef, Geometry, StaticLayout};
pub use crate::page::model::{
    EffectDef, HeadshotDef, LinkDef, NavDef, PageDef, RevealDef, SectionDef, StaggerDef,
    TrackedDef,
};
pub use crate::reveal::observer::{
    Intersection, Notification, ObserverOptions, RevealObserver, RevealState, RootMargin,
    intersect, ratio_style,
};
pub use crate::reveal::stagger::{Jitter, StaggerConfig, StaggerStep, plan_stagger};
pub use crate::reveal::typing::{
    StepResult, TypeWriter, TypedOnce, TypingConfig, TypingOutput, TypingStep,
};
pub use crate::schedule::frame::FrameGate;
pub use crate::schedule::timers::{TimerId, TimerQueue};
pub use crate::scroll::section::{ActiveSection, active_section};
pub use crate::scroll::tracker::{ScrollState, ScrollTracker, scroll_progress};
pub use crate::session::page_session::{FrameReport, PageSession};
