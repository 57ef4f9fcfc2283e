use eframe::egui;
use flipbook_core::{
    Bitmap, FlipbookView, Intent, PagePlacement, Tier, Transition, resting_placement,
};
use flipbook_runtime::FlipbookCommand;
use std::collections::HashMap;
use tokio::sync::mpsc;

/// GUI-side mirror of an open flipbook: the latest view, the textures the
/// worker has rendered, and the page turn being animated
pub struct ViewerState {
    pub total_pages: usize,
    pub view: Option<FlipbookView>,
    /// Last idle view; the start pose of the next page turn
    settled_view: Option<FlipbookView>,
    turn: Option<Transition>,
    pages: HashMap<(usize, Tier), egui::TextureHandle>,
    pub thumbnails: Vec<(usize, egui::TextureHandle)>,
    /// Canvas size in physical pixels last reported to the worker
    viewport: egui::Vec2,
}

impl ViewerState {
    pub fn new(total_pages: usize) -> Self {
        Self {
            total_pages,
            view: None,
            settled_view: None,
            turn: None,
            pages: HashMap::new(),
            thumbnails: Vec::new(),
            viewport: egui::Vec2::ZERO,
        }
    }

    pub fn set_view(&mut self, view: FlipbookView) {
        if !view.busy {
            self.settled_view = Some(view.clone());
            self.turn = None;
        }
        self.view = Some(view);
    }

    pub fn start_turn(&mut self, transition: Transition) {
        self.turn = Some(transition);
    }

    pub fn is_animating(&self) -> bool {
        self.turn.is_some()
    }

    pub fn page_rendered(&mut self, ctx: &egui::Context, page: usize, tier: Tier, bitmap: &Bitmap) {
        // A new base rendering means the scale changed; the old high tier is stale
        if tier == Tier::Base {
            self.pages.remove(&(page, Tier::High));
        }
        let texture = ctx.load_texture(
            format!("page_{}_{}", page, tier),
            color_image(bitmap),
            egui::TextureOptions::LINEAR,
        );
        self.pages.insert((page, tier), texture);
    }

    /// Placements to draw at `now`, interpolated while a page turn runs
    pub fn placements(&self, now: tokio::time::Instant) -> Vec<PagePlacement> {
        let Some(view) = &self.view else {
            return Vec::new();
        };
        if !view.busy {
            return view.pages.clone();
        }

        // Busy but not yet animating: the target page is still rendering
        let (from, t) = match &self.turn {
            Some(turn) => (turn.from, turn.progress(now)),
            None => (view.current_page, 0.0),
        };

        view.pages
            .iter()
            .map(|target| {
                let start = self
                    .settled_view
                    .as_ref()
                    .and_then(|settled| settled.placement(target.page))
                    .copied()
                    .unwrap_or_else(|| resting_placement(target.page, from));
                PagePlacement {
                    transform: start.transform.lerp(&target.transform, t),
                    ..*target
                }
            })
            .collect()
    }
}

pub fn color_image(bitmap: &Bitmap) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [bitmap.width as usize, bitmap.height as usize],
        &bitmap.rgba_data,
    )
}

pub fn show_viewer(
    ui: &mut egui::Ui,
    state: &mut ViewerState,
    command_tx: &mpsc::UnboundedSender<FlipbookCommand>,
) {
    let Some(view) = state.view.clone() else {
        ui.centered_and_justified(|ui| {
            ui.spinner();
        });
        return;
    };

    let send = |intent: Intent| {
        let _ = command_tx.send(FlipbookCommand::Input(intent));
    };

    ui.horizontal(|ui| {
        if ui
            .add_enabled(view.can_go_previous, egui::Button::new("◀ Previous"))
            .clicked()
        {
            send(Intent::PreviousPage);
        }

        ui.label(format!("Page {} of {}", view.current_page, view.total_pages));

        if ui
            .add_enabled(view.can_go_next, egui::Button::new("Next ▶"))
            .clicked()
        {
            send(Intent::NextPage);
        }

        ui.separator();

        if ui.button("−").clicked() {
            send(Intent::AdjustZoom(-1));
        }
        ui.label(format!("{}%", view.zoom_percent));
        if ui.button("+").clicked() {
            send(Intent::AdjustZoom(1));
        }
        if ui.button("Reset").clicked() {
            send(Intent::ResetZoom);
        }

        ui.separator();

        if ui.button("Close").clicked() {
            let _ = command_tx.send(FlipbookCommand::Close);
        }
    });

    ui.separator();

    let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
    let pixels_per_point = ui.ctx().pixels_per_point();

    let viewport = rect.size() * pixels_per_point;
    if (viewport - state.viewport).length() > 1.0 {
        state.viewport = viewport;
        send(Intent::Resize {
            width: viewport.x,
            height: viewport.y,
        });
    }

    if response.double_clicked() {
        send(Intent::ToggleZoom);
    } else if response.dragged() && view.zoom_level > 1.0 {
        let delta = response.drag_delta();
        send(Intent::Pan {
            dx: delta.x,
            dy: delta.y,
        });
    }

    paint_pages(ui, rect, state, pixels_per_point);
}

fn paint_pages(ui: &egui::Ui, rect: egui::Rect, state: &ViewerState, pixels_per_point: f32) {
    let painter = ui.painter_at(rect);
    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

    let mut placements = state.placements(tokio::time::Instant::now());
    placements.sort_by_key(|p| p.transform.z_index);

    for placement in placements {
        let transform = placement.transform;
        if transform.is_facing_away() {
            continue;
        }
        let Some(base) = state.pages.get(&(placement.page, Tier::Base)) else {
            continue;
        };
        let texture = state.pages.get(&(placement.page, Tier::High)).unwrap_or(base);

        // Base renders are sized to fit the canvas, so they set the on-screen size
        let size = base.size_vec2() / pixels_per_point * transform.scale;
        let center = rect.center() + egui::vec2(transform.translate_x, transform.translate_y);
        // Pages hinge on their left edge
        let min = center - size / 2.0;
        let page_rect = egui::Rect::from_min_size(
            min,
            egui::vec2(size.x * transform.visible_width_factor(), size.y),
        );

        painter.image(texture.id(), page_rect, uv, egui::Color32::WHITE);
    }
}

/// Shown while no document is open
pub fn show_open_prompt(ui: &mut egui::Ui) -> Option<std::path::PathBuf> {
    let mut picked = None;
    ui.vertical_centered(|ui| {
        ui.add_space(50.0);
        ui.heading("Flipbook");
        ui.add_space(20.0);
        ui.label("Drop a PDF file here or click to open");
        ui.add_space(10.0);

        if ui.button("Open PDF...").clicked() {
            picked = rfd::FileDialog::new()
                .add_filter("PDF", &["pdf"])
                .pick_file();
        }
    });
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipbook_core::{NavigationState, Slot, ZoomLimits};
    use std::time::Duration;
    use tokio::time::Instant;

    #[test]
    fn test_idle_view_is_drawn_as_is() {
        let state_machine = NavigationState::new(5, ZoomLimits::default());
        let mut viewer = ViewerState::new(5);
        viewer.set_view(FlipbookView::from_state(&state_machine));

        let placements = viewer.placements(Instant::now());
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].slot, Slot::Center);
    }

    #[test]
    fn test_page_turn_interpolates_from_settled_pose() {
        let mut machine = NavigationState::new(5, ZoomLimits::default());
        let mut viewer = ViewerState::new(5);
        viewer.set_view(FlipbookView::from_state(&machine));

        let now = Instant::now();
        let duration = Duration::from_millis(1000);
        machine.begin_transition(2, duration, now).unwrap();
        viewer.set_view(FlipbookView::from_state(&machine));

        // Not started: still the settled pose
        let before = viewer.placements(now);
        assert_eq!(before[0].page, 1);
        assert_eq!(before[0].transform.rotate_y_deg, 0.0);

        let transition = machine.start_animation(now).unwrap();
        viewer.start_turn(transition);
        assert!(viewer.is_animating());

        let halfway = viewer.placements(now + duration / 2);
        assert!((halfway[0].transform.rotate_y_deg - 90.0).abs() < 0.01);

        let done = viewer.placements(now + duration);
        assert_eq!(done[0].transform.rotate_y_deg, 180.0);
        assert!(done[0].transform.is_facing_away());

        machine.complete_transition();
        viewer.set_view(FlipbookView::from_state(&machine));
        assert!(!viewer.is_animating());
        assert_eq!(viewer.placements(now + duration)[0].page, 2);
    }
}
