//! egui front end for the generation-and-scoring session.
//!
//! The generate button offloads one batch to a worker thread and the UI
//! polls a shared reveal slot, so results appear one by one while the
//! window stays responsive.

use eframe::{egui, App, Frame};
use generate::ModelId;
use session::export::{batch_to_csv, csv_data_uri};
use session::{GenerationRequest, GenerationResult, Sentiment, Session, SessionError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Fixed pacing pauses, presentation only.
const PRE_GENERATION_PAUSE: Duration = Duration::from_secs(1);
const REVEAL_PAUSE: Duration = Duration::from_millis(700);

#[derive(Default)]
struct RevealSlot {
    results: Vec<GenerationResult>,
    error: Option<String>,
    done: bool,
}

fn describe_error(err: &SessionError) -> String {
    match err {
        SessionError::Artifact(e) => {
            format!("Classifier artifact problem: {e}. Run the `train` binary first.")
        }
        SessionError::Generate(e) => format!("Generation failed: {e}"),
    }
}

struct StudioApp {
    session: Arc<Mutex<Session>>,
    // UI state
    prompt: String,
    model: ModelId,
    max_length: usize,
    num_outputs: usize,
    show_probabilities: bool,
    // last batch + derived export link
    batch: Vec<GenerationResult>,
    csv_uri: Option<String>,
    status: String,
    generating: bool,
    pending: Option<Arc<Mutex<RevealSlot>>>,
}

impl StudioApp {
    fn new(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            prompt: String::new(),
            model: ModelId::Gpt2,
            max_length: 100,
            num_outputs: 1,
            show_probabilities: false,
            batch: Vec::new(),
            csv_uri: None,
            status: "Ready.".to_string(),
            generating: false,
            pending: None,
        }
    }

    fn send_request(&mut self, ctx: &egui::Context) {
        let req = GenerationRequest {
            prompt: self.prompt.trim().to_owned(),
            model: self.model,
            max_length: self.max_length,
            num_outputs: self.num_outputs,
            show_probabilities: self.show_probabilities,
        };

        self.generating = true;
        self.batch.clear();
        self.csv_uri = None;
        self.status = "Generating amazing content...".to_string();

        let slot: Arc<Mutex<RevealSlot>> = Arc::new(Mutex::new(RevealSlot::default()));
        self.pending = Some(slot.clone());

        let session = self.session.clone();
        let thread_ctx = ctx.clone();
        thread::spawn(move || {
            // dramatic pause before the batch starts
            thread::sleep(PRE_GENERATION_PAUSE);
            let outcome = {
                let mut session = session.lock().unwrap();
                session.run(&req)
            };
            match outcome {
                Ok(batch) => {
                    for result in batch {
                        if let Ok(mut g) = slot.lock() {
                            g.results.push(result);
                        }
                        thread_ctx.request_repaint();
                        thread::sleep(REVEAL_PAUSE);
                    }
                }
                Err(e) => {
                    if let Ok(mut g) = slot.lock() {
                        g.error = Some(describe_error(&e));
                    }
                }
            }
            if let Ok(mut g) = slot.lock() {
                g.done = true;
            }
            thread_ctx.request_repaint();
        });
    }

    fn poll_pending(&mut self) {
        let Some(slot) = self.pending.as_ref().map(|s| s.clone()) else {
            return;
        };
        if let Ok(g) = slot.lock() {
            if g.results.len() > self.batch.len() {
                self.batch = g.results.clone();
            }
            if let Some(err) = &g.error {
                self.status = err.clone();
            }
            if g.done {
                self.generating = false;
                self.pending = None;
                if g.error.is_none() {
                    self.csv_uri = Some(csv_data_uri(&batch_to_csv(&self.batch)));
                    self.status = format!("Done: {} result(s).", self.batch.len());
                }
            }
        };
    }

    fn settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("⚙️ Settings");
        ui.separator();

        egui::ComboBox::from_label("🤖 Model")
            .selected_text(self.model.as_str())
            .show_ui(ui, |ui| {
                for id in ModelId::ALL {
                    ui.selectable_value(&mut self.model, id, id.as_str());
                }
            });
        ui.add(egui::Slider::new(&mut self.max_length, 50..=300).text("📏 Max length"));
        egui::ComboBox::from_label("📦 Outputs")
            .selected_text(self.num_outputs.to_string())
            .show_ui(ui, |ui| {
                for n in [1usize, 2, 3] {
                    ui.selectable_value(&mut self.num_outputs, n, n.to_string());
                }
            });
        ui.checkbox(&mut self.show_probabilities, "🔍 Show sentiment probabilities");
    }

    fn batch_view(&self, ui: &mut egui::Ui) {
        for (i, result) in self.batch.iter().enumerate() {
            egui::CollapsingHeader::new(format!("🔹 Result {} — {}", i + 1, result.sentiment))
                .id_salt(i)
                .default_open(true)
                .show(ui, |ui| {
                    ui.label(&result.generated_text);
                    if let (Some(pos), Some(neg)) = (result.positive_pct, result.negative_pct) {
                        ui.label(format!("✅ Positive: {pos:.2}%"));
                        ui.label(format!("❌ Negative: {neg:.2}%"));
                    }
                });
        }

        if self.batch.is_empty() {
            return;
        }

        ui.separator();
        ui.label("📊 Sentiment overview");
        egui::Grid::new("batch_grid").striped(true).show(ui, |ui| {
            ui.label("Time");
            ui.label("Sentiment");
            ui.label("Generated text");
            ui.end_row();
            for result in &self.batch {
                ui.label(&result.time);
                ui.label(result.sentiment.as_str());
                ui.label(&result.generated_text);
                ui.end_row();
            }
        });

        // bar chart of sentiment counts
        let total = self.batch.len() as f32;
        let positives = self
            .batch
            .iter()
            .filter(|r| r.sentiment == Sentiment::Positive)
            .count();
        let negatives = self.batch.len() - positives;
        ui.add(
            egui::ProgressBar::new(positives as f32 / total)
                .text(format!("Positive — {positives}")),
        );
        ui.add(
            egui::ProgressBar::new(negatives as f32 / total)
                .text(format!("Negative — {negatives}")),
        );

        if let Some(uri) = &self.csv_uri {
            ui.separator();
            ui.hyperlink_to("📥 Download results as CSV", uri);
        }
    }

    fn history_view(&self, ui: &mut egui::Ui) {
        ui.collapsing("🕓 Full session history", |ui| {
            // the worker holds the lock while a batch runs; don't block the frame
            let Ok(session) = self.session.try_lock() else {
                ui.weak("History updates once the current batch finishes.");
                return;
            };
            let history = session.history();
            if history.is_empty() {
                ui.weak("No past prompts yet. Try generating something!");
                return;
            }
            egui::ScrollArea::vertical().max_height(250.0).show(ui, |ui| {
                egui::Grid::new("history_grid").striped(true).show(ui, |ui| {
                    ui.label("Time");
                    ui.label("Prompt");
                    ui.label("Sentiment");
                    ui.label("Generated text");
                    ui.end_row();
                    for result in history {
                        ui.label(&result.time);
                        ui.label(&result.prompt);
                        ui.label(result.sentiment.as_str());
                        ui.label(&result.generated_text);
                        ui.end_row();
                    }
                });
            });
        });
    }
}

impl App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_pending();

        egui::SidePanel::left("settings_panel").show(ctx, |ui| {
            self.settings_panel(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("🧠 AI Content Generator + Sentiment Analyzer");
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("✍️ Prompt:");
                ui.text_edit_singleline(&mut self.prompt);
                let button = egui::Button::new("🚀 Generate & Analyze");
                if ui.add_enabled(!self.generating, button).clicked() {
                    self.send_request(ctx);
                }
            });

            if self.generating {
                ui.colored_label(egui::Color32::LIGHT_BLUE, "🧠 Generating...");
                ctx.request_repaint_after(Duration::from_millis(150));
            } else {
                ui.weak(&self.status);
            }
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                self.batch_view(ui);
                ui.separator();
                self.history_view(ui);
            });
        });
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().init();

    let session = match Session::open(session::ARTIFACT_PATH) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", describe_error(&e));
            std::process::exit(1);
        }
    };

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "AI Content Studio",
        native_options,
        Box::new(move |_| Ok(Box::new(StudioApp::new(session)))),
    )
}
