//! Frame-driven orchestrator for the whole explorer.
//!
//! Input handlers only record intent (pointer position, click, zoom-out).
//! [`Explorer::tick`] applies it in a fixed order every frame:
//!
//! 1. camera smoothing and pending zoom-out
//! 2. pointer ray recast
//! 3. click resolution and level transition
//! 4. hover highlight and label
//! 5. transcription animation
//! 6. idle spin of visible levels

use glam::Vec2;

use crate::animation::TranscriptionAnimator;
use crate::config::ExplorerConfig;
use crate::interaction::engine::{self, DetailRequest, InteractionEngine};
use crate::interaction::picking::ShapePicker;
use crate::models::ProceduralFactory;
use crate::navigation::{ClickAction, NavigationController};
use crate::scene::levels::ScaleLevel;
use crate::scene::registry::LevelRegistry;
use crate::scene::traits::{ModelError, ModelFactory};
use crate::ui::camera::OrbitCamera;

/// What the overlay needs to draw after a tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    pub hover_label: Option<String>,
    /// Detail views requested by clicks this frame, oldest first.
    pub details: Vec<DetailRequest>,
    pub zoom_out_label: Option<String>,
}

pub struct Explorer {
    config: ExplorerConfig,
    registry: LevelRegistry,
    controller: NavigationController,
    engine: InteractionEngine,
    animator: TranscriptionAnimator,
    camera: OrbitCamera,
    exit_requested: bool,
}

impl Explorer {
    /// Explorer backed by the procedural models.
    pub fn new(config: ExplorerConfig) -> Self {
        let factory = ProceduralFactory::new(config.model_seed);
        Self::with_factory(config, Box::new(factory))
    }

    pub fn with_factory(config: ExplorerConfig, factory: Box<dyn ModelFactory>) -> Self {
        Self {
            registry: LevelRegistry::new(factory),
            controller: NavigationController::new(&config),
            engine: InteractionEngine::new(Box::new(ShapePicker), config.highlight),
            animator: TranscriptionAnimator::new(config.transcription),
            camera: OrbitCamera::new(&config.camera),
            exit_requested: false,
            config,
        }
    }

    /// Enter the root level. Must be called once before the first tick.
    pub fn start(&mut self) -> Result<(), ModelError> {
        self.controller
            .enter(&mut self.registry, &mut self.camera, ScaleLevel::Cell, None)
    }

    pub fn pointer_moved(&mut self, ndc: Vec2) {
        self.engine.pointer_moved(ndc);
    }

    pub fn pointer_left(&mut self) {
        self.engine.pointer_left();
    }

    pub fn click(&mut self) {
        self.engine.click();
    }

    /// Zoom out to the parent level on the next tick.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn zoom_out_label(&self) -> Option<String> {
        self.controller.zoom_out_label()
    }

    pub fn current_level(&self) -> ScaleLevel {
        self.controller.current_level()
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn registry(&self) -> &LevelRegistry {
        &self.registry
    }

    pub fn animator(&self) -> &TranscriptionAnimator {
        &self.animator
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Advance one frame. A factory fault is fatal and returned as is.
    pub fn tick(&mut self, dt: f32) -> Result<FrameOutput, ModelError> {
        let mut output = FrameOutput::default();
        self.camera.update(dt);

        if std::mem::take(&mut self.exit_requested) {
            engine::clear_highlight(self.controller.state_mut(), &mut self.registry);
            self.controller.exit(&mut self.registry, &mut self.camera)?;
        }

        self.engine
            .update_ray(self.controller.state_mut(), &self.camera);

        if let Some(click) = self.engine.take_click(self.controller.state(), &self.registry) {
            output.details.push(click.detail);
            match click.action {
                Some(ClickAction::Drill(level)) => {
                    engine::clear_highlight(self.controller.state_mut(), &mut self.registry);
                    self.controller.enter(
                        &mut self.registry,
                        &mut self.camera,
                        level,
                        Some(click.anchor),
                    )?;
                    if level == ScaleLevel::Transcription {
                        self.animator.reset();
                    }
                    // The camera moved; hover against the new framing.
                    self.engine
                        .update_ray(self.controller.state_mut(), &self.camera);
                }
                Some(ClickAction::Replay) => self.animator.reset(),
                None => {}
            }
        }

        output.hover_label = self
            .engine
            .hover(self.controller.state_mut(), &mut self.registry);

        if self.controller.current_level() == ScaleLevel::Transcription {
            if let Some(entry) = self
                .registry
                .get_mut(ScaleLevel::Transcription)
                .filter(|entry| entry.visible)
            {
                self.animator.tick(entry);
            }
        }

        for entry in self.registry.entries_mut().filter(|entry| entry.visible) {
            let rate = self.config.idle_spin(entry.level);
            if rate != 0.0 {
                entry.subtree.spin(rate * dt);
            }
        }

        output.zoom_out_label = self.controller.zoom_out_label();
        Ok(output)
    }
}
