use crate::animation::tween::Tween;
use crate::dom::sink::{DomSink, DomWrite};
use crate::effects::mapper::{map_element, map_fade_scale, map_hero, map_list_item, map_parallax};
use crate::effects::style::{StyleFrame, fmt_num};
use crate::foundation::core::{ElementId, Millis, Rect, ScrollMetrics};
use crate::foundation::error::{ScrollFxError, ScrollFxResult};
use crate::page::layout::Geometry;
use crate::page::model::{EffectDef, PageDef};
use crate::reveal::observer::{RevealObserver, RevealState, ratio_style};
use crate::reveal::stagger::{Jitter, plan_stagger};
use crate::reveal::typing::{TypeWriter, TypedOnce, TypingOutput, TypingStep};
use crate::schedule::frame::FrameGate;
use crate::schedule::timers::TimerQueue;
use crate::scroll::section::{ActiveSection, active_section};
use crate::scroll::tracker::{ScrollState, ScrollTracker};

const CLASS_ANIMATE_IN: &str = "animate-in";
const CLASS_ITEM_VISIBLE: &str = "project-item-visible";
const CLASS_ACTIVE: &str = "active";

#[derive(Clone, Debug, PartialEq)]
enum Task {
    Typing(TypingStep),
    RevealChild {
        index: usize,
        jitter: Option<Jitter>,
    },
}

/// What one animation frame did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Elements that received a style write.
    pub styled: usize,
    /// Tracked elements skipped because they are not mounted.
    pub skipped: usize,
    /// Active section after this frame.
    pub active: ActiveSection,
}

/// Scroll effects for one mounted page.
///
/// A session owns every piece of mutable state (scroll samples, the pending-frame flag, reveal
/// states, timers, the typed-once guard) from mount to unmount. The host forwards its events
/// and applies the [`DomWrite`]s pushed into the sink; after [`PageSession::unmount`] every
/// entry point is a no-op.
pub struct PageSession {
    page: PageDef,
    observed: Vec<ElementId>,
    tracker: ScrollTracker,
    gate: FrameGate,
    observer: RevealObserver,
    timers: TimerQueue<Task>,
    typer: TypeWriter,
    typed: TypedOnce,
    active: ActiveSection,
    nav: Option<Tween>,
    image_failed: bool,
    mounted: bool,
}

impl PageSession {
    /// Mount a page: validate it, start observing, and schedule the title typing.
    #[tracing::instrument(skip(page))]
    pub fn mount(page: PageDef, now: Millis) -> ScrollFxResult<Self> {
        page.validate()?;

        let mut observed = page.reveal.observe.clone();
        if let Some(stagger) = &page.reveal.stagger {
            if !observed.contains(&stagger.container) {
                observed.push(stagger.container.clone());
            }
        }
        let mut observer = RevealObserver::new(page.reveal.options.clone());
        for id in &observed {
            observer.observe(id.clone());
        }

        let typer = TypeWriter::new(page.typing.clone());
        let mut session = Self {
            page,
            observed,
            tracker: ScrollTracker::new(),
            gate: FrameGate::new(),
            observer,
            timers: TimerQueue::new(),
            typer,
            typed: TypedOnce::default(),
            active: ActiveSection::NONE,
            nav: None,
            image_failed: false,
            mounted: true,
        };
        session.start_typing(now);
        tracing::debug!(
            tracked = session.page.tracked.len(),
            observed = session.observed.len(),
            "page mounted"
        );
        Ok(session)
    }

    /// Page description in use.
    pub fn page(&self) -> &PageDef {
        &self.page
    }

    /// `false` once unmounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Latest scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        self.tracker.state()
    }

    /// Section currently highlighted.
    pub fn active_section(&self) -> ActiveSection {
        self.active
    }

    /// `true` once the title has been fully typed.
    pub fn is_typed(&self) -> bool {
        self.typed.is_typed()
    }

    /// Title text currently shown by the typing effect.
    pub fn typed_text(&self) -> &str {
        self.typer.visible_text()
    }

    /// Reveal state of an observed element.
    pub fn reveal_state(&self, id: &ElementId) -> Option<RevealState> {
        self.observer.state(id)
    }

    /// Number of timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Earliest pending timer deadline; hosts can sleep until then.
    pub fn next_deadline(&mut self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// Pending-frame bookkeeping.
    pub fn frame_gate(&self) -> &FrameGate {
        &self.gate
    }

    /// Re-run the mount-time effects after a re-render. Typing never restarts.
    ///
    /// Returns `true` if typing was (re)scheduled, which only happens if it never started.
    pub fn rerender(&mut self, now: Millis) -> bool {
        if !self.mounted {
            return false;
        }
        self.start_typing(now)
    }

    fn start_typing(&mut self, now: Millis) -> bool {
        if !self.typed.claim() {
            return false;
        }
        let (delay, step) = self.typer.first_step();
        self.timers.schedule_at(now.after(delay), Task::Typing(step));
        true
    }

    /// Handle a scroll event: update scroll state and the progress bar.
    ///
    /// Returns `true` when the host must schedule an animation frame (no frame is pending yet).
    pub fn on_scroll(
        &mut self,
        metrics: ScrollMetrics,
        sink: &mut dyn DomSink,
    ) -> ScrollFxResult<bool> {
        if !self.mounted {
            return Ok(false);
        }
        let state = self.tracker.sample(metrics);
        sink.write(DomWrite::ProgressBar {
            percent: state.progress_percent(),
        })?;
        Ok(self.gate.request())
    }

    /// Animation-frame callback: restyle every tracked element in declaration order.
    ///
    /// Returns `None` when no frame was requested since the last one.
    #[tracing::instrument(skip(self, geometry, sink))]
    pub fn on_frame(
        &mut self,
        geometry: &Geometry,
        sink: &mut dyn DomSink,
    ) -> ScrollFxResult<Option<FrameReport>> {
        if !self.mounted || !self.gate.begin_frame() {
            return Ok(None);
        }
        let vh = geometry.viewport_height;
        let offset = self.tracker.state().offset;
        let mut report = FrameReport::default();

        for tracked in &self.page.tracked {
            match &tracked.effect {
                EffectDef::Parallax { rate } => {
                    write_style(sink, &mut report, &tracked.id, map_parallax(offset, *rate))?;
                }
                EffectDef::ListItems { items, item } => {
                    for (index, item_id) in items.iter().enumerate() {
                        match geometry.rect(item_id) {
                            Some(rect) => write_style(
                                sink,
                                &mut report,
                                item_id,
                                map_list_item(rect, vh, index, item),
                            )?,
                            None => report.skipped += 1,
                        }
                    }
                }
                effect => {
                    let Some(rect) = geometry.rect(&tracked.id) else {
                        report.skipped += 1;
                        continue;
                    };
                    let style = match effect {
                        EffectDef::Hero {
                            anchor,
                            pin,
                            mapper,
                        } => {
                            let anchor_rect = match anchor {
                                Some(a) => geometry.rect(a),
                                None => Some(rect),
                            };
                            let Some(anchor_rect) = anchor_rect else {
                                report.skipped += 1;
                                continue;
                            };
                            map_hero(rect, anchor_rect, vh, pin, mapper)
                        }
                        EffectDef::Element { mapper } => map_element(rect, vh, mapper),
                        EffectDef::FadeScale { config } => map_fade_scale(rect, vh, config),
                        EffectDef::Parallax { .. } | EffectDef::ListItems { .. } => continue,
                    };
                    write_style(sink, &mut report, &tracked.id, style)?;
                }
            }
        }

        let section_rects: Vec<Option<Rect>> = self
            .page
            .sections
            .iter()
            .map(|s| geometry.rect(&s.id))
            .collect();
        let next = active_section(&section_rects, vh);
        if next != self.active {
            if let Some(i) = self.active.0 {
                sink.write(DomWrite::RemoveClass {
                    target: self.page.sections[i].id.clone(),
                    class: CLASS_ACTIVE.to_owned(),
                })?;
            }
            if let Some(i) = next.0 {
                sink.write(DomWrite::AddClass {
                    target: self.page.sections[i].id.clone(),
                    class: CLASS_ACTIVE.to_owned(),
                })?;
            }
            sink.write(DomWrite::NavIndicator {
                index: next.as_signed(),
            })?;
            tracing::debug!(
                from = self.active.as_signed(),
                to = next.as_signed(),
                "active section"
            );
            self.active = next;
        }
        report.active = self.active;
        Ok(Some(report))
    }

    /// Visibility notification for one observed element.
    ///
    /// Returns `true` when this call revealed the element.
    pub fn on_intersection(
        &mut self,
        id: &ElementId,
        rect: Rect,
        viewport_height: f64,
        now: Millis,
        sink: &mut dyn DomSink,
    ) -> ScrollFxResult<bool> {
        if !self.mounted {
            return Ok(false);
        }
        let Some(note) = self.observer.measure(id, rect, viewport_height) else {
            return Ok(false);
        };
        if self.page.reveal.ratio_styling && note.intersection.is_intersecting {
            sink.write(DomWrite::Style {
                target: id.clone(),
                style: ratio_style(note.intersection.ratio),
            })?;
        }
        if !note.revealed_now {
            return Ok(false);
        }
        sink.write(DomWrite::AddClass {
            target: id.clone(),
            class: CLASS_ANIMATE_IN.to_owned(),
        })?;

        let stagger = self
            .page
            .reveal
            .stagger
            .as_ref()
            .filter(|s| &s.container == id);
        if let Some(stagger) = stagger {
            let steps = plan_stagger(
                &stagger.timing,
                stagger.container.as_str(),
                stagger.items.len(),
                now,
            );
            tracing::debug!(container = %id, children = steps.len(), "stagger scheduled");
            for step in steps {
                self.timers.schedule_at(
                    step.at,
                    Task::RevealChild {
                        index: step.index,
                        jitter: step.jitter,
                    },
                );
            }
        }
        Ok(true)
    }

    /// Measure every observed element present in `geometry`. Returns the number of reveals.
    pub fn observe_all(
        &mut self,
        geometry: &Geometry,
        now: Millis,
        sink: &mut dyn DomSink,
    ) -> ScrollFxResult<usize> {
        let mut revealed = 0;
        for id in self.observed.clone() {
            let Some(rect) = geometry.rect(&id) else {
                continue;
            };
            if self.on_intersection(&id, rect, geometry.viewport_height, now, sink)? {
                revealed += 1;
            }
        }
        Ok(revealed)
    }

    /// Run timers due at `now` and advance any smooth navigation.
    ///
    /// Returns the scroll offset the host should apply, while a navigation is in flight.
    #[tracing::instrument(skip(self, sink))]
    pub fn tick(&mut self, now: Millis, sink: &mut dyn DomSink) -> ScrollFxResult<Option<f64>> {
        if !self.mounted {
            return Ok(None);
        }
        while let Some((at, _, task)) = self.timers.pop_due(now) {
            match task {
                Task::Typing(step) => {
                    let res = self.typer.step(step, &mut self.typed);
                    for out in res.outputs {
                        sink.write(self.typing_write(out))?;
                    }
                    if let Some((delay, next)) = res.next {
                        // Follow-ups are anchored to the deadline, not to `now`, to keep cadence.
                        self.timers.schedule_at(at.after(delay), Task::Typing(next));
                    }
                }
                Task::RevealChild { index, jitter } => self.reveal_child(index, jitter, sink)?,
            }
        }

        let Some(tween) = self.nav else {
            return Ok(None);
        };
        let y = tween.sample(now);
        if tween.is_done(now) {
            self.nav = None;
        }
        Ok(Some(y))
    }

    fn typing_write(&self, out: TypingOutput) -> DomWrite {
        let target = self.page.title_id.clone();
        match out {
            TypingOutput::Text(text) => DomWrite::Text { target, text },
            TypingOutput::Cursor(value) => DomWrite::Property {
                target,
                name: "border-right".to_owned(),
                value,
            },
        }
    }

    fn reveal_child(
        &mut self,
        index: usize,
        jitter: Option<Jitter>,
        sink: &mut dyn DomSink,
    ) -> ScrollFxResult<()> {
        let Some(target) = self
            .page
            .reveal
            .stagger
            .as_ref()
            .and_then(|s| s.items.get(index))
            .cloned()
        else {
            return Ok(());
        };
        sink.write(DomWrite::AddClass {
            target: target.clone(),
            class: CLASS_ITEM_VISIBLE.to_owned(),
        })?;
        if let Some(j) = jitter {
            sink.write(DomWrite::Property {
                target: target.clone(),
                name: "--random-rotation".to_owned(),
                value: format!("{}deg", fmt_num(j.rotation_deg)),
            })?;
            sink.write(DomWrite::Property {
                target,
                name: "--random-scale".to_owned(),
                value: fmt_num(j.scale),
            })?;
        }
        Ok(())
    }

    /// Start a smooth scroll to a section's top.
    ///
    /// Returns the target offset, or `None` when the section is not mounted. Unknown section ids
    /// are a validation error. A request while another navigation runs retargets it from the
    /// current animated position.
    pub fn scroll_to_section(
        &mut self,
        id: &ElementId,
        geometry: &Geometry,
        metrics: ScrollMetrics,
        now: Millis,
    ) -> ScrollFxResult<Option<f64>> {
        if !self.mounted {
            return Ok(None);
        }
        if self.page.section_index(id).is_none() {
            return Err(ScrollFxError::validation(format!("unknown section '{id}'")));
        }
        let Some(rect) = geometry.rect(id) else {
            return Ok(None);
        };
        let target = (metrics.offset + rect.y0).clamp(0.0, metrics.max_scroll());
        let duration = self.page.nav.duration_ms;
        match &mut self.nav {
            Some(tween) => tween.retarget(now, target, duration),
            None => {
                self.nav = Some(Tween::new(
                    metrics.offset,
                    target,
                    now,
                    duration,
                    self.page.nav.ease,
                ));
            }
        }
        tracing::debug!(section = %id, offset = target, "smooth scroll");
        Ok(Some(target))
    }

    /// Image load failure: hide the headshot and show its placeholder. Happens at most once.
    pub fn on_image_error(&mut self, sink: &mut dyn DomSink) -> ScrollFxResult<bool> {
        if !self.mounted || self.image_failed {
            return Ok(false);
        }
        let Some(headshot) = &self.page.headshot else {
            return Ok(false);
        };
        sink.write(DomWrite::Property {
            target: headshot.image.clone(),
            name: "display".to_owned(),
            value: "none".to_owned(),
        })?;
        sink.write(DomWrite::Property {
            target: headshot.placeholder.clone(),
            name: "display".to_owned(),
            value: "flex".to_owned(),
        })?;
        self.image_failed = true;
        Ok(true)
    }

    /// Tear down: cancel every timer, disconnect the observer and stop navigation.
    ///
    /// Returns the number of timers cancelled.
    pub fn unmount(&mut self) -> usize {
        if !self.mounted {
            return 0;
        }
        self.mounted = false;
        let cancelled = self.timers.cancel_all();
        self.observer.disconnect();
        self.nav = None;
        tracing::debug!(cancelled, "page unmounted");
        cancelled
    }
}

fn write_style(
    sink: &mut dyn DomSink,
    report: &mut FrameReport,
    id: &ElementId,
    style: StyleFrame,
) -> ScrollFxResult<()> {
    report.styled += 1;
    sink.write(DomWrite::Style {
        target: id.clone(),
        style,
    })
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/page_session.rs"]
mod tests;
