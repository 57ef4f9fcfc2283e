use eframe::egui;
use flipbook_core::Intent;
use flipbook_runtime::FlipbookCommand;
use tokio::sync::mpsc;

use super::ViewerState;

const THUMBNAIL_WIDTH: f32 = 110.0;

/// Sidebar of page thumbnails; clicking one jumps to that page
pub fn show_thumbnails(
    ui: &mut egui::Ui,
    state: &ViewerState,
    command_tx: &mpsc::UnboundedSender<FlipbookCommand>,
) {
    let active_page = state.view.as_ref().map(|view| view.active_page);

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (page, texture) in &state.thumbnails {
            let size = texture.size_vec2();
            let size = size * (THUMBNAIL_WIDTH / size.x.max(1.0));
            let active = active_page == Some(*page);

            ui.vertical_centered(|ui| {
                let button = egui::Button::image(egui::Image::new((texture.id(), size)))
                    .selected(active);
                if ui.add(button).clicked() {
                    let _ = command_tx.send(FlipbookCommand::Input(Intent::GoToPage(*page)));
                }
                ui.label(page.to_string());
            });
            ui.add_space(4.0);
        }
    });
}
