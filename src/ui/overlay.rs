//! Screen-space overlay drawn over the 3D view: hover label, zoom-out
//! button, level caption and the component detail window.

use crate::explorer::FrameOutput;
use crate::scene::levels::ScaleLevel;
use crate::ui::details::{DetailCatalog, DetailView};

/// Offset of the hover label from the cursor, in points.
const LABEL_OFFSET: egui::Vec2 = egui::vec2(15.0, 0.0);

/// User actions captured by the overlay this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayResponse {
    pub zoom_out_clicked: bool,
}

pub struct Overlay {
    catalog: DetailCatalog,
    open_detail: Option<DetailView>,
}

impl Overlay {
    pub fn new(catalog: DetailCatalog) -> Self {
        Self {
            catalog,
            open_detail: None,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, frame: &FrameOutput, level: ScaleLevel) -> OverlayResponse {
        let mut response = OverlayResponse::default();

        // Latest click wins.
        if let Some(request) = frame.details.last() {
            self.open_detail = Some(self.catalog.resolve(request));
        }

        egui::Area::new(egui::Id::new("level_caption"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(level.display_name()).heading().strong());
            });

        if let Some(label) = &frame.zoom_out_label {
            let clicked = egui::Area::new(egui::Id::new("zoom_out"))
                .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
                .show(ctx, |ui| ui.button(label).clicked())
                .inner;
            response.zoom_out_clicked = clicked;
        }

        if let (Some(text), Some(pointer)) = (&frame.hover_label, ctx.pointer_hover_pos()) {
            egui::Area::new(egui::Id::new("hover_label"))
                .fixed_pos(pointer + LABEL_OFFSET)
                .order(egui::Order::Tooltip)
                .interactable(false)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(text);
                    });
                });
        }

        self.show_detail_window(ctx);
        response
    }

    fn show_detail_window(&mut self, ctx: &egui::Context) {
        let Some(view) = &self.open_detail else {
            return;
        };

        let mut open = true;
        egui::Window::new(view.title.as_str())
            .id(egui::Id::new("component_detail"))
            .open(&mut open)
            .collapsible(false)
            .default_width(380.0)
            .show(ctx, |ui| {
                ui.weak(&view.subject);
                for section in &view.sections {
                    ui.add_space(6.0);
                    ui.strong(&section.heading);
                    for (term, text) in &section.items {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(egui::RichText::new(format!("{}:", term)).strong());
                            ui.label(text);
                        });
                    }
                }
            });

        if !open {
            self.open_detail = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::DetailRequest;
    use crate::scene::levels::SemanticType;

    fn run(overlay: &mut Overlay, frame: &FrameOutput) -> OverlayResponse {
        let ctx = egui::Context::default();
        let mut response = OverlayResponse::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            response = overlay.show(ctx, frame, ScaleLevel::Nucleus);
        });
        response
    }

    #[test]
    fn test_latest_click_opens_detail() {
        let mut overlay = Overlay::new(DetailCatalog::embedded());
        let frame = FrameOutput {
            details: vec![
                DetailRequest {
                    semantic_type: SemanticType::Nucleolus,
                    display_name: "Nucleolus".to_string(),
                },
                DetailRequest {
                    semantic_type: SemanticType::NuclearPore,
                    display_name: "Nuclear Pore 4".to_string(),
                },
            ],
            zoom_out_label: Some("Zoom Out to Cell".to_string()),
            ..FrameOutput::default()
        };
        let response = run(&mut overlay, &frame);
        assert!(!response.zoom_out_clicked);
        let view = overlay.open_detail.as_ref().unwrap();
        assert_eq!(view.title, "Nuclear Pore");
        assert_eq!(view.subject, "Nuclear Pore 4");
    }

    #[test]
    fn test_detail_stays_open_without_new_clicks() {
        let mut overlay = Overlay::new(DetailCatalog::embedded());
        let click = FrameOutput {
            details: vec![DetailRequest {
                semantic_type: SemanticType::Histone,
                display_name: "Histone Protein Complex".to_string(),
            }],
            ..FrameOutput::default()
        };
        run(&mut overlay, &click);
        run(&mut overlay, &FrameOutput::default());
        assert_eq!(overlay.open_detail.as_ref().unwrap().title, "Histone Protein Complex");
    }
}
