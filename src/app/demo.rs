//! Demo application for the staged progress widget
//!
//! Shows an order moving through Created → Processed → Sent → Completed with
//! buttons to step the stage. The selected theme and the current stage are
//! restored between runs through eframe's storage.

use std::sync::mpsc::Receiver;

use eframe::egui;
use tracing::{error, info};

use super::config::StagedProgressConfig;
use super::staged_progress::{Palette, StagedProgress, TransitionState};

/// Stages of the demo order lifecycle
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStage {
    #[default]
    Created,
    Processed,
    Sent,
    Completed,
}

impl OrderStage {
    pub const ALL: [OrderStage; 4] = [
        OrderStage::Created,
        OrderStage::Processed,
        OrderStage::Sent,
        OrderStage::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderStage::Created => "Created",
            OrderStage::Processed => "Processed",
            OrderStage::Sent => "Sent",
            OrderStage::Completed => "Completed",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self as usize + 1).copied()
    }

    pub fn previous(self) -> Option<Self> {
        (self as usize).checked_sub(1).map(|i| Self::ALL[i])
    }
}

#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ThemeChoice {
    #[default]
    Latte,
    Frappe,
    Macchiato,
    Mocha,
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 4] = [
        ThemeChoice::Latte,
        ThemeChoice::Frappe,
        ThemeChoice::Macchiato,
        ThemeChoice::Mocha,
    ];

    pub fn catppuccin(self) -> catppuccin_egui::Theme {
        match self {
            ThemeChoice::Latte => catppuccin_egui::LATTE,
            ThemeChoice::Frappe => catppuccin_egui::FRAPPE,
            ThemeChoice::Macchiato => catppuccin_egui::MACCHIATO,
            ThemeChoice::Mocha => catppuccin_egui::MOCHA,
        }
    }
}

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DemoApp {
    pub theme: ThemeChoice,
    pub stage: OrderStage,

    #[serde(skip)]
    pub config: StagedProgressConfig,
    #[serde(skip)]
    progress: Option<StagedProgress<OrderStage>>,
    #[serde(skip)]
    transitions: Option<Receiver<TransitionState>>,
    #[serde(skip)]
    last_transition: Option<TransitionState>,
}

impl Default for DemoApp {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::default(),
            stage: OrderStage::default(),
            config: StagedProgressConfig::default(),
            progress: None,
            transitions: None,
            last_transition: None,
        }
    }
}

impl DemoApp {
    /// Create the app, restoring theme and stage from storage
    pub fn new(cc: &eframe::CreationContext<'_>, config: StagedProgressConfig) -> Self {
        let mut app: Self = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Self::default()
        };

        app.config = config;
        app.apply_theme(&cc.egui_ctx);
        app
    }

    /// Build the widget for the current theme, settled at the current stage
    ///
    /// Stage colors come from the theme, so a theme change rebuilds the widget.
    fn rebuild_progress(&mut self) {
        let theme = self.theme.catppuccin();
        let labels = OrderStage::ALL.map(|stage| (stage, stage.label()));

        match StagedProgress::new(self.stage, labels) {
            Ok(progress) => {
                let mut progress = progress
                    .with_config(&self.config)
                    .with_palette(Palette {
                        inactive: theme.overlay0,
                        active: theme.blue,
                    })
                    .with_colors([
                        (OrderStage::Created, theme.mauve),
                        (OrderStage::Processed, theme.peach),
                        (OrderStage::Sent, theme.sapphire),
                        (OrderStage::Completed, theme.green),
                    ]);
                self.transitions = Some(progress.subscribe());
                self.progress = Some(progress);
            }
            Err(e) => {
                error!("Failed to build staged progress: {}", e);
                self.progress = None;
                self.transitions = None;
            }
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        catppuccin_egui::set_theme(ctx, self.theme.catppuccin());
        self.rebuild_progress();
    }

    /// Move the demo order to `stage`
    pub fn go_to(&mut self, stage: OrderStage) {
        let Some(progress) = self.progress.as_mut() else {
            return;
        };
        match progress.set_stage(stage) {
            Ok(true) => {
                info!("Order moved to {:?}", stage);
                self.stage = stage;
            }
            Ok(false) => {}
            Err(e) => error!("Cannot move order to {:?}: {}", stage, e),
        }
    }

    fn drain_transitions(&mut self) {
        if let Some(receiver) = &self.transitions {
            while let Ok(state) = receiver.try_recv() {
                self.last_transition = Some(state);
            }
        }
    }

    fn show_theme_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("Theme", |ui| {
            for choice in ThemeChoice::ALL {
                if ui
                    .selectable_label(self.theme == choice, format!("{:?}", choice))
                    .clicked()
                {
                    self.theme = choice;
                    self.apply_theme(ui.ctx());
                }
            }
        });
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let previous = self.stage.previous();
            let next = self.stage.next();

            if ui
                .add_enabled(previous.is_some(), egui::Button::new("◀ Back"))
                .clicked()
            {
                if let Some(stage) = previous {
                    self.go_to(stage);
                }
            }
            if ui
                .add_enabled(next.is_some(), egui::Button::new("Advance ▶"))
                .clicked()
            {
                if let Some(stage) = next {
                    self.go_to(stage);
                }
            }
            if ui.button("Reset").clicked() {
                self.go_to(OrderStage::Created);
            }
        });
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_transitions();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                self.show_theme_menu(ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!("Order status: {}", self.stage.label()));
            ui.add_space(12.0);

            match self.progress.as_mut() {
                Some(progress) => {
                    ui.add(progress);
                }
                None => {
                    ui.colored_label(ui.visuals().error_fg_color, "Progress unavailable");
                }
            }

            ui.add_space(12.0);
            self.show_controls(ui);

            if let Some(state) = self.last_transition {
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(format!(
                        "previous: {:?}  current: {}  progress: {:.2}",
                        state.previous, state.current, state.progress
                    ))
                    .weak()
                    .small(),
                );
            }
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}
