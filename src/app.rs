//! egui front end
//!
//! Thin adapter: widgets feed the [`RenderController`], the preview texture
//! mirrors its [`DisplayState`](crate::controller::DisplayState), and save
//! results pop up as native message boxes.

use crate::config::{AppConfig, WindowOptions};
use crate::controller::RenderController;
use crate::error::{Error, Result};
use crate::export::SymbolExporter;
use crate::notify::{InlineNotifier, Notice, NoticeLevel, Notifier};
use crate::qr::QrEncoder;
use eframe::egui::{self, Color32, RichText};
use std::path::PathBuf;

const BACKGROUND: Color32 = Color32::from_rgb(0x2c, 0x3e, 0x50);
const PANEL: Color32 = Color32::from_rgb(0x34, 0x49, 0x5e);
const TITLE: Color32 = Color32::from_rgb(0xec, 0xf0, 0xf1);
const LABEL: Color32 = Color32::from_rgb(0xbd, 0xc3, 0xc7);
const MUTED: Color32 = Color32::from_rgb(0x7f, 0x8c, 0x8d);
const ACCENT: Color32 = Color32::from_rgb(0x34, 0x98, 0xdb);
const WARNING: Color32 = Color32::from_rgb(0xf3, 0x9c, 0x12);
const DANGER: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);

/// Blocking notifier backed by native message boxes
#[derive(Debug, Default)]
pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn notify(&mut self, notice: Notice) {
        let level = match notice.level {
            NoticeLevel::Info => rfd::MessageLevel::Info,
            NoticeLevel::Warning => rfd::MessageLevel::Warning,
            NoticeLevel::Error => rfd::MessageLevel::Error,
        };
        rfd::MessageDialog::new()
            .set_level(level)
            .set_title(notice.title)
            .set_description(notice.message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

fn choose_save_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save QR Code")
        .set_file_name("qrcode.png")
        .add_filter("PNG files", &["png"])
        .add_filter("All files", &["*"])
        .save_file()
}

/// Main window state
pub struct QrGenApp {
    controller: RenderController<InlineNotifier>,
    exporter: SymbolExporter,
    input: String,
    preview: Option<(u64, egui::TextureHandle)>,
    window: WindowOptions,
}

impl QrGenApp {
    /// Build the application from a loaded configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let params = config.encoding_params()?;

        Ok(Self {
            controller: RenderController::new(QrEncoder::with_params(params), InlineNotifier::new()),
            exporter: SymbolExporter::new(params, config.encoding.verify_on_save),
            input: String::new(),
            preview: None,
            window: config.window.clone(),
        })
    }

    /// Texture for the symbol on display, uploaded again only when the
    /// controller's revision moves.
    fn preview_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureHandle> {
        let Some(symbol) = self.controller.display().symbol() else {
            self.preview = None;
            return None;
        };

        let revision = self.controller.revision();
        if let Some((cached, texture)) = &self.preview {
            if *cached == revision {
                return Some(texture.clone());
            }
        }

        let image = symbol.image();
        let color = egui::ColorImage::from_rgb(
            [image.width() as usize, image.height() as usize],
            image.as_raw(),
        );
        let texture = ctx.load_texture("qr-preview", color, egui::TextureOptions::NEAREST);
        self.preview = Some((revision, texture.clone()));
        Some(texture)
    }

    fn show_preview(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let side = self.window.preview_size;
        match self.preview_texture(ctx) {
            Some(texture) => {
                ui.add(egui::Image::new(&texture).fit_to_exact_size(egui::vec2(side, side)));
            }
            None => {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
                ui.painter().rect_filled(rect, 4.0, BACKGROUND);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Your QR Code will appear here",
                    egui::FontId::proportional(14.0),
                    MUTED,
                );
            }
        }
    }

    fn show_banner(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = self.controller.notifier().current() else {
            return;
        };
        let color = match notice.level {
            NoticeLevel::Error => DANGER,
            NoticeLevel::Warning => WARNING,
            NoticeLevel::Info => LABEL,
        };
        let message = notice.message.clone();

        let mut dismissed = false;
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new(message).color(color));
            dismissed = ui.small_button("Dismiss").clicked();
        });
        if dismissed {
            self.controller.notifier_mut().dismiss();
        }
    }
}

impl eframe::App for QrGenApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let panel = egui::Frame::none().fill(PANEL).inner_margin(20.0);

        egui::CentralPanel::default().frame(panel).show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("QR Code Generator")
                        .size(24.0)
                        .strong()
                        .color(TITLE),
                );
            });
            ui.add_space(20.0);

            ui.label(RichText::new("Enter URL:").size(16.0).color(LABEL));
            let edit = egui::TextEdit::singleline(&mut self.input)
                .hint_text("https://")
                .desired_width(f32::INFINITY);
            if ui.add(edit).changed() {
                self.controller.on_text_changed(&self.input);
            }
            ui.add_space(4.0);
            self.show_banner(ui);
            ui.add_space(10.0);

            ui.vertical_centered(|ui| {
                self.show_preview(ui, ctx);
                ui.add_space(20.0);

                let save = egui::Button::new(
                    RichText::new("Save QR Code")
                        .size(16.0)
                        .strong()
                        .color(Color32::WHITE),
                )
                .fill(ACCENT)
                .min_size(egui::vec2(160.0, 40.0));

                if ui.add(save).clicked() {
                    let mut prompt = choose_save_path;
                    match self.controller.on_save_clicked(
                        &self.exporter,
                        &mut prompt,
                        &mut DialogNotifier,
                    ) {
                        Ok(outcome) => tracing::debug!(?outcome, "Save request finished"),
                        Err(e) => tracing::debug!("Save request failed: {e}"),
                    }
                }
            });
        });
    }
}

/// Open the main window and block until it is closed.
pub fn run(config: &AppConfig) -> Result<()> {
    let app = QrGenApp::new(config)?;
    let window = &config.window;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(window.title.clone())
            .with_inner_size([window.width, window.height])
            .with_resizable(window.resizable),
        ..Default::default()
    };

    tracing::info!(
        width = window.width,
        height = window.height,
        "Opening QR generator window"
    );

    eframe::run_native(
        &window.title,
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| Error::Ui(e.to_string()))
}
