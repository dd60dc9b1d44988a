//! # Bio-Scales: Interactive Multi-Scale Cell Explorer
//!
//! Bio-Scales lets a user drill from a whole eukaryotic cell down to an active
//! transcription bubble, one scale level at a time:
//!
//! ```text
//! Cell → Nucleus → Chromosome → Chromatin Fiber → Chromatin → DNA → Transcription
//! ```
//!
//! Clicking a component shows its details and, where the level allows it,
//! enters the next level at the clicked position. A zoom-out control walks
//! back up the chain.
//!
//! ## Architecture Overview
//!
//! ### 1. Scene data ([`scene`], [`models`])
//!
//! - [`scene::ScaleLevel`] and [`scene::SemanticType`] - the closed sets of levels and component kinds
//! - [`scene::SceneSubtree`] - flat node arena with one root transform per level
//! - [`scene::LevelRegistry`] - builds each level lazily, exactly once, and tracks visibility
//! - [`models::ProceduralFactory`] - procedural geometry for every level
//!
//! ### 2. Navigation ([`navigation`])
//!
//! - [`navigation::NavigationController`] - owns the explicit navigation state
//!   and performs enter/exit transitions
//! - [`navigation::tables`] - declarative per-level hover and click rules
//!
//! ### 3. Interaction ([`interaction`])
//!
//! - [`interaction::InteractionEngine`] - ray picking against the effective
//!   pick-set, hover highlight and label, click resolution
//!
//! ### 4. Animation ([`animation`])
//!
//! - [`animation::TranscriptionAnimator`] - moves the polymerase along its path
//!   and grows the nascent RNA strand
//!
//! ### 5. Frontend ([`app`], [`rendering`], [`ui`])
//!
//! - [`explorer::Explorer`] - per-frame orchestration of all of the above
//! - [`rendering::SphereRenderer`] - instanced sphere impostors
//! - [`ui::UiSystem`] - egui overlay: level caption, zoom-out button, hover label, detail window
//!
//! ## Data Flow
//!
//! ```text
//! Input Events → Explorer::tick (camera, ray, click, hover, animation, spin) → Instances → Render
//! ```
//!
//! ## Dependencies
//!
//! - **Graphics**: `wgpu` (GPU abstraction), `winit` (windowing)
//! - **Math**: `glam` (SIMD math types), `bytemuck` (safe transmutation)
//! - **UI**: `egui` (immediate mode GUI)
//! - **Serialization**: `serde` + `ron` (human-readable config files)
//! - **Procedural placement**: `rand`

pub mod animation;
pub mod app;
pub mod config;
pub mod explorer;
pub mod interaction;
pub mod models;
pub mod navigation;
pub mod rendering;
pub mod scene;
pub mod ui;
