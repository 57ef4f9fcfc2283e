use eframe::egui;
use flipbook_core::{DocumentInput, FlipbookOptions};
use flipbook_pdfium::PdfiumLoader;
use flipbook_runtime::logger::AppLogger;
use flipbook_runtime::{FlipbookCommand, FlipbookUpdate, worker_task};
use tokio::sync::mpsc;

use crate::keys::keyboard_intents;
use crate::views::{ViewerState, show_open_prompt, show_thumbnails, show_viewer};

pub struct FlipbookApp {
    status: String,
    options: FlipbookOptions,
    logger: AppLogger,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<FlipbookCommand>,
    update_rx: mpsc::UnboundedReceiver<FlipbookUpdate>,

    viewer_state: Option<ViewerState>,

    _tokio_handle: tokio::runtime::Handle,
}

impl FlipbookApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
        options: FlipbookOptions,
        initial: Option<DocumentInput>,
    ) -> Self {
        // Ctrl +/-/0 zoom the page, not the UI
        cc.egui_ctx.options_mut(|o| o.zoom_with_keyboard = false);

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        // Spawn worker task
        tokio_handle.spawn(worker_task(PdfiumLoader::new(), command_rx, update_tx));

        let mut app = Self {
            status: String::new(),
            options,
            logger,
            command_tx,
            update_rx,
            viewer_state: None,
            _tokio_handle: tokio_handle,
        };
        if let Some(input) = initial {
            app.open(input);
        }
        app
    }

    fn open(&mut self, input: DocumentInput) {
        self.status = format!("Loading {}...", input.describe());
        let _ = self.command_tx.send(FlipbookCommand::Open {
            input,
            options: self.options.clone(),
        });
    }

    fn process_updates(&mut self, ctx: &egui::Context) {
        while let Ok(update) = self.update_rx.try_recv() {
            match update {
                FlipbookUpdate::Opened {
                    total_pages,
                    thumbnails,
                } => {
                    // Pages rendered while opening arrived before this
                    let mut state = self
                        .viewer_state
                        .take()
                        .unwrap_or_else(|| ViewerState::new(total_pages));
                    state.total_pages = total_pages;
                    state.thumbnails = thumbnails
                        .iter()
                        .map(|thumbnail| {
                            let texture = ctx.load_texture(
                                format!("thumbnail_{}", thumbnail.page),
                                crate::views::viewer::color_image(&thumbnail.bitmap),
                                egui::TextureOptions::LINEAR,
                            );
                            (thumbnail.page, texture)
                        })
                        .collect();
                    self.viewer_state = Some(state);
                    self.status = format!("Loaded PDF with {} pages", total_pages);
                }
                FlipbookUpdate::StateChanged(view) => {
                    if let Some(state) = &mut self.viewer_state {
                        state.set_view(view);
                    }
                }
                FlipbookUpdate::TransitionStarted(transition) => {
                    if let Some(state) = &mut self.viewer_state {
                        state.start_turn(transition);
                    }
                }
                FlipbookUpdate::PageRendered { page, tier, bitmap } => {
                    let state = self.viewer_state.get_or_insert_with(|| ViewerState::new(0));
                    state.page_rendered(ctx, page, tier, &bitmap);
                }
                FlipbookUpdate::Closed => {
                    self.viewer_state = None;
                    self.status = "Closed PDF".to_string();
                }
                FlipbookUpdate::Error { message } => {
                    self.status = format!("Error: {message}");
                    // Half-loaded documents are discarded by the worker
                    if self
                        .viewer_state
                        .as_ref()
                        .is_some_and(|state| state.view.is_none())
                    {
                        self.viewer_state = None;
                    }
                }
            }
            ctx.request_repaint();
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<_> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("pdf"))
                .collect()
        });
        if let Some(path) = dropped.into_iter().next() {
            self.open(DocumentInput::Path(path));
        }
    }
}

impl eframe::App for FlipbookApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.process_updates(ctx);

        if self.viewer_state.is_some() {
            for intent in keyboard_intents(ctx) {
                let _ = self.command_tx.send(FlipbookCommand::Input(intent));
            }
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                if let Some(message) = self.logger.latest_message() {
                    ui.separator();
                    ui.weak(message);
                }
            });
        });

        if let Some(state) = &self.viewer_state {
            egui::SidePanel::left("thumbnails")
                .resizable(false)
                .default_width(140.0)
                .show(ctx, |ui| show_thumbnails(ui, state, &self.command_tx));
        }

        let mut picked = None;
        egui::CentralPanel::default().show(ctx, |ui| match &mut self.viewer_state {
            Some(state) => {
                show_viewer(ui, state, &self.command_tx);
                if state.is_animating() || state.view.as_ref().is_some_and(|v| v.busy) {
                    ctx.request_repaint();
                }
            }
            None => picked = show_open_prompt(ui),
        });

        if let Some(path) = picked {
            self.open(DocumentInput::Path(path));
        }
    }
}
