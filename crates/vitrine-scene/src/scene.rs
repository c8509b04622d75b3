//! The whole scene: every rig plus the inputs they read.

use vitrine_core::{FrameTime, LayoutProfile, PointerTarget, Theme, Viewport};

use crate::Rig;
use crate::avatar::AvatarRig;
use crate::backdrop::Backdrop;
use crate::lighting::LightingRig;
use crate::particles::ParticleField;
use crate::scroll::{ScrollTracker, SectionId};
use crate::section::SectionModelRig;
use crate::signal::{ListenerId, ThemeSignal};

/// Construction parameters for a [`Scene`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneOptions {
    pub layout: LayoutProfile,
    pub theme: Theme,
    pub seed: u64,
    /// Overrides the layout's particle count when set.
    pub particle_count: Option<usize>,
    /// Section heights, top to bottom.
    pub sections: Vec<(SectionId, f32)>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            layout: LayoutProfile::default(),
            theme: Theme::default(),
            seed: 0,
            particle_count: None,
            sections: SectionId::ALL.iter().map(|&id| (id, 24.0)).collect(),
        }
    }
}

/// Owns the theme signal and every rig, and steps them once per frame.
#[derive(Debug)]
pub struct Scene {
    layout: LayoutProfile,
    seed: u64,
    particle_count: Option<usize>,
    signal: ThemeSignal,
    lighting: LightingRig,
    backdrop: Backdrop,
    particles: ParticleField,
    avatar: AvatarRig,
    models: Vec<(SectionId, SectionModelRig)>,
    scroll: ScrollTracker,
    viewport: Viewport,
    pointer: Option<PointerTarget>,
    frame: FrameTime,
}

impl Scene {
    pub fn new(options: SceneOptions, viewport: Viewport) -> Self {
        let SceneOptions {
            layout,
            theme,
            seed,
            particle_count,
            sections,
        } = options;
        let count = particle_count.unwrap_or(layout.particle_count());
        tracing::info!(?layout, theme = theme.name(), seed, "building scene");

        Self {
            layout,
            seed,
            particle_count,
            signal: ThemeSignal::new(theme),
            lighting: LightingRig::scene_default(theme),
            backdrop: Backdrop::new(theme),
            particles: ParticleField::new(count, seed, theme),
            avatar: AvatarRig::new(layout, theme, seed),
            models: build_models(&sections, layout, theme, seed),
            scroll: ScrollTracker::new(&sections, viewport.height),
            viewport,
            pointer: None,
            frame: FrameTime::default(),
        }
    }

    /// Step every rig once. `elapsed` is seconds since start, `delta` since
    /// the previous frame.
    pub fn update(&mut self, elapsed: f32, delta: f32) {
        let frame = FrameTime::new(elapsed, delta.max(0.0));
        let theme = self.signal.get();
        self.frame = frame;
        self.for_each_rig(|rig| rig.update(frame, theme));
    }

    /// Pointer moved to client coordinates `(x, y)`.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        let target = PointerTarget::from_client(x, y, self.viewport);
        self.pointer = Some(target);
        self.avatar.on_pointer(target);
    }

    /// Scroll to `offset`. Returns the offset after clamping to the page.
    pub fn scrolled(&mut self, offset: f32) -> f32 {
        let applied = self.scroll.scroll_to(offset);
        self.avatar.on_scroll(applied, self.viewport.height);
        applied
    }

    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        self.scrolled(self.scroll.offset() + delta)
    }

    pub fn resized(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scroll.set_viewport_height(viewport.height);
    }

    /// Restack the page sections, e.g. after text reflows.
    pub fn relayout_sections(&mut self, sections: &[(SectionId, f32)]) {
        self.scroll.relayout(sections);
        let theme = self.signal.get();
        for &(id, _) in sections {
            if let Some(kind) = id.model()
                && !self.models.iter().any(|(existing, _)| *existing == id)
            {
                self.models
                    .push((id, SectionModelRig::new(kind, self.layout, theme, self.seed)));
            }
        }
    }

    /// Switch layout profile. Rigs whose geometry depends on it are rebuilt;
    /// in-flight theme transitions carry over to the new rigs.
    pub fn set_layout(&mut self, layout: LayoutProfile) {
        if layout == self.layout {
            return;
        }
        tracing::info!(from = ?self.layout, to = ?layout, "layout changed");
        let theme = self.signal.get();
        self.layout = layout;
        let count = self.particle_count.unwrap_or(layout.particle_count());
        self.particles = ParticleField::new(count, self.seed, theme);
        let mut avatar = AvatarRig::new(layout, theme, self.seed);
        avatar.carry_theme_from(&self.avatar);
        self.avatar = avatar;
        for (id, model) in &mut self.models {
            if let Some(kind) = id.model() {
                let mut rebuilt = SectionModelRig::new(kind, layout, theme, self.seed);
                rebuilt.carry_theme_from(model);
                *model = rebuilt;
            }
        }
    }

    pub fn theme(&self) -> Theme {
        self.signal.get()
    }

    /// Set the theme. Every rig is notified before this returns.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        if !self.signal.set(theme) {
            return false;
        }
        self.for_each_rig(|rig| rig.theme_changed(theme));
        true
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.signal.get().toggle();
        self.set_theme(next);
        next
    }

    pub fn subscribe_theme(&mut self, listener: impl FnMut(Theme) + 'static) -> ListenerId {
        self.signal.subscribe(listener)
    }

    pub fn signal(&self) -> &ThemeSignal {
        &self.signal
    }

    pub fn layout(&self) -> LayoutProfile {
        self.layout
    }

    pub fn lighting(&self) -> &LightingRig {
        &self.lighting
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn avatar(&self) -> &AvatarRig {
        &self.avatar
    }

    pub fn models(&self) -> &[(SectionId, SectionModelRig)] {
        &self.models
    }

    pub fn model(&self, id: SectionId) -> Option<&SectionModelRig> {
        self.models
            .iter()
            .find(|(section, _)| *section == id)
            .map(|(_, model)| model)
    }

    pub fn scroll(&self) -> &ScrollTracker {
        &self.scroll
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> Option<PointerTarget> {
        self.pointer
    }

    /// Clock of the last completed update.
    pub fn frame(&self) -> FrameTime {
        self.frame
    }

    fn for_each_rig(&mut self, mut f: impl FnMut(&mut dyn Rig)) {
        f(&mut self.lighting);
        f(&mut self.backdrop);
        f(&mut self.particles);
        f(&mut self.avatar);
        for (_, model) in &mut self.models {
            f(model);
        }
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.avatar.cancel_timers();
    }
}

fn build_models(
    sections: &[(SectionId, f32)],
    layout: LayoutProfile,
    theme: Theme,
    seed: u64,
) -> Vec<(SectionId, SectionModelRig)> {
    sections
        .iter()
        .filter_map(|&(id, _)| {
            id.model()
                .map(|kind| (id, SectionModelRig::new(kind, layout, theme, seed)))
        })
        .collect()
}
