use crate::animation::ease::Ease;
use crate::effects::mapper::{FadeScaleConfig, HeroPin, ListItemConfig, MapperConfig};
use crate::foundation::core::ElementId;
use crate::foundation::error::{ScrollFxError, ScrollFxResult};
use crate::reveal::observer::ObserverOptions;
use crate::reveal::stagger::StaggerConfig;
use crate::reveal::typing::TypingConfig;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// How a tracked element reacts to scrolling.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectDef {
    /// Generic mapping, pinned to identity while the anchor's top is near the viewport top.
    Hero {
        /// Element whose top drives the pin (the hero section); the styled element itself when
        /// absent.
        #[serde(default)]
        anchor: Option<ElementId>,
        /// Pin window.
        #[serde(default)]
        pin: HeroPin,
        /// Knobs used once the pin releases.
        #[serde(default)]
        mapper: MapperConfig,
    },
    /// Generic distance-based mapping.
    Element {
        /// Knobs.
        #[serde(default)]
        mapper: MapperConfig,
    },
    /// Children of a list, sliding sideways by index parity. The tracked id itself is unstyled.
    ListItems {
        /// Child ids in display order.
        items: Vec<ElementId>,
        /// Knobs shared by every child.
        #[serde(default)]
        item: ListItemConfig,
    },
    /// Opacity and scale only.
    FadeScale {
        /// Knobs.
        #[serde(default)]
        config: FadeScaleConfig,
    },
    /// Background parallax proportional to the raw scroll offset.
    Parallax {
        /// Pixels of translation per pixel scrolled.
        #[serde(default = "default_parallax_rate")]
        rate: f64,
    },
}

fn default_parallax_rate() -> f64 {
    0.3
}

/// One element updated every scroll frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackedDef {
    /// Element id.
    pub id: ElementId,
    /// Effect applied to it.
    pub effect: EffectDef,
}

/// Navigable page section.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionDef {
    /// Section element id.
    pub id: ElementId,
    /// Label shown in the navigation.
    pub label: String,
}

/// Staggered reveal of a container's children.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaggerDef {
    /// Observed container whose reveal triggers the cascade.
    pub container: ElementId,
    /// Child ids, in cascade order.
    pub items: Vec<ElementId>,
    /// Timing and jitter.
    #[serde(default)]
    pub timing: StaggerConfig,
}

/// Intersection-driven reveal settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealDef {
    /// Elements that get the `animate-in` class on first visibility.
    pub observe: Vec<ElementId>,
    /// Observer thresholds and margin.
    #[serde(default)]
    pub options: ObserverOptions,
    /// Restyle observed elements from their intersection ratio on every notification.
    #[serde(default)]
    pub ratio_styling: bool,
    /// Optional child cascade.
    #[serde(default)]
    pub stagger: Option<StaggerDef>,
}

/// Smooth "scroll to section" settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NavDef {
    /// Duration of the smooth scroll.
    pub duration_ms: u64,
    /// Easing curve.
    pub ease: Ease,
}

impl Default for NavDef {
    fn default() -> Self {
        Self {
            duration_ms: 600,
            ease: Ease::InOutCubic,
        }
    }
}

/// Headshot image with a placeholder shown when it fails to load.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeadshotDef {
    /// `<img>` element id.
    pub image: ElementId,
    /// Placeholder element id.
    pub placeholder: ElementId,
}

/// External destination. Opaque to the engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinkDef {
    /// Display label.
    pub label: String,
    /// Destination URL.
    pub url: String,
}

/// Static description of one page: what is tracked, observed, typed and navigable.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageDef {
    /// Element receiving the typing effect.
    pub title_id: ElementId,
    /// Typing effect settings.
    #[serde(default)]
    pub typing: TypingConfig,
    /// Sections in page order.
    pub sections: Vec<SectionDef>,
    /// Elements restyled each frame, in update order.
    pub tracked: Vec<TrackedDef>,
    /// Reveal settings.
    pub reveal: RevealDef,
    /// Navigation settings.
    #[serde(default)]
    pub nav: NavDef,
    /// Headshot fallback wiring.
    #[serde(default)]
    pub headshot: Option<HeadshotDef>,
    /// External links.
    #[serde(default)]
    pub links: Vec<LinkDef>,
}

impl PageDef {
    /// Parse a page description from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollFxResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScrollFxError::serde(format!("parse page JSON: {e}")))
    }

    /// Parse a page description from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollFxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollFxError::validation(format!("open page JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// The portfolio page with its hand-tuned constants.
    ///
    /// Observed sections are also restyled from their intersection ratio on every crossing, so
    /// they ease in from below until the next scroll frame overwrites them.
    pub fn portfolio() -> Self {
        let id = |s: &str| ElementId::from(s);
        let projects: Vec<ElementId> = ["lease-ai", "studi", "gp", "summarizer", "jadn"]
            .into_iter()
            .map(|p| ElementId::new(format!("project-{p}")))
            .collect();
        Self {
            title_id: id("title"),
            typing: TypingConfig::default(),
            sections: vec![
                SectionDef {
                    id: id("hero"),
                    label: "home".to_owned(),
                },
                SectionDef {
                    id: id("about"),
                    label: "about".to_owned(),
                },
                SectionDef {
                    id: id("projects"),
                    label: "projects".to_owned(),
                },
                SectionDef {
                    id: id("connect"),
                    label: "connect".to_owned(),
                },
            ],
            tracked: vec![
                TrackedDef {
                    id: id("headshot"),
                    effect: EffectDef::Hero {
                        anchor: Some(id("hero")),
                        pin: HeroPin::default(),
                        mapper: MapperConfig::headshot(),
                    },
                },
                TrackedDef {
                    id: id("title"),
                    effect: EffectDef::Element {
                        mapper: MapperConfig::title(),
                    },
                },
                TrackedDef {
                    id: id("subtitle"),
                    effect: EffectDef::Element {
                        mapper: MapperConfig::subtitle(),
                    },
                },
                TrackedDef {
                    id: id("about"),
                    effect: EffectDef::Element {
                        mapper: MapperConfig::section(),
                    },
                },
                TrackedDef {
                    id: id("projects"),
                    effect: EffectDef::Element {
                        mapper: MapperConfig::section(),
                    },
                },
                TrackedDef {
                    id: id("project-list"),
                    effect: EffectDef::ListItems {
                        items: projects.clone(),
                        item: ListItemConfig::default(),
                    },
                },
                TrackedDef {
                    id: id("connect"),
                    effect: EffectDef::Element {
                        mapper: MapperConfig::section(),
                    },
                },
                TrackedDef {
                    id: id("socials"),
                    effect: EffectDef::FadeScale {
                        config: FadeScaleConfig::default(),
                    },
                },
                TrackedDef {
                    id: id("background"),
                    effect: EffectDef::Parallax { rate: 0.3 },
                },
            ],
            reveal: RevealDef {
                observe: vec![id("hero"), id("about"), id("projects"), id("connect")],
                options: ObserverOptions::default(),
                ratio_styling: true,
                stagger: Some(StaggerDef {
                    container: id("projects"),
                    items: projects,
                    timing: StaggerConfig::default(),
                }),
            },
            nav: NavDef::default(),
            headshot: Some(HeadshotDef {
                image: id("headshot-image"),
                placeholder: id("headshot-placeholder"),
            }),
            links: vec![
                LinkDef {
                    label: "linkedin".to_owned(),
                    url: "https://www.linkedin.com/in/jadon-leung/".to_owned(),
                },
                LinkDef {
                    label: "github".to_owned(),
                    url: "https://github.com/jadon-leung/".to_owned(),
                },
            ],
        }
    }

    /// Validate ids and knobs.
    pub fn validate(&self) -> ScrollFxResult<()> {
        check_id(&self.title_id, "title_id")?;
        self.typing.validate()?;

        unique_ids(self.sections.iter().map(|s| &s.id), "sections")?;
        unique_ids(self.tracked.iter().map(|t| &t.id), "tracked")?;
        for t in &self.tracked {
            validate_effect(t)?;
        }

        self.reveal.options.validate()?;
        unique_ids(self.reveal.observe.iter(), "reveal.observe")?;
        if let Some(stagger) = &self.reveal.stagger {
            check_id(&stagger.container, "reveal.stagger.container")?;
            unique_ids(stagger.items.iter(), "reveal.stagger.items")?;
            stagger.timing.validate()?;
        }

        if let Some(h) = &self.headshot {
            check_id(&h.image, "headshot.image")?;
            check_id(&h.placeholder, "headshot.placeholder")?;
        }
        Ok(())
    }

    /// Position of `id` in the section list.
    pub fn section_index(&self, id: &ElementId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }
}

fn check_id(id: &ElementId, what: &str) -> ScrollFxResult<()> {
    if id.as_str().trim().is_empty() {
        return Err(ScrollFxError::validation(format!("{what}: empty element id")));
    }
    Ok(())
}

fn unique_ids<'a>(ids: impl Iterator<Item = &'a ElementId>, what: &str) -> ScrollFxResult<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        check_id(id, what)?;
        if !seen.insert(id) {
            return Err(ScrollFxError::validation(format!(
                "{what}: duplicate element id '{id}'"
            )));
        }
    }
    Ok(())
}

fn validate_effect(t: &TrackedDef) -> ScrollFxResult<()> {
    let ctx = |e: ScrollFxError| ScrollFxError::validation(format!("tracked '{}': {e}", t.id));
    match &t.effect {
        EffectDef::Hero {
            anchor,
            pin,
            mapper,
        } => {
            if let Some(anchor) = anchor {
                check_id(anchor, "anchor").map_err(ctx)?;
            }
            mapper.validate().map_err(ctx)?;
            if !(pin.window_fraction.is_finite() && pin.window_fraction >= 0.0) {
                return Err(ctx(ScrollFxError::validation(
                    "pin window_fraction must be >= 0",
                )));
            }
        }
        EffectDef::Element { mapper } => mapper.validate().map_err(ctx)?,
        EffectDef::ListItems { items, item } => {
            unique_ids(items.iter(), "items").map_err(ctx)?;
            let knobs_ok = [item.fade_end, item.scale_min, item.shift]
                .iter()
                .all(|v| v.is_finite())
                && item.fade_end >= 0.0
                && (0.0..=1.0).contains(&item.scale_min);
            if !knobs_ok {
                return Err(ctx(ScrollFxError::validation("invalid list item knobs")));
            }
        }
        EffectDef::FadeScale { config } => {
            let ok = config.fade_end.is_finite()
                && config.fade_end >= 0.0
                && (0.0..=1.0).contains(&config.scale_min);
            if !ok {
                return Err(ctx(ScrollFxError::validation("invalid fade/scale knobs")));
            }
        }
        EffectDef::Parallax { rate } => {
            if !rate.is_finite() {
                return Err(ctx(ScrollFxError::validation(
                    "parallax rate must be finite",
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/page/model.rs"]
mod tests;
