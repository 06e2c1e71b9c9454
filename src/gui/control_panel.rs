//! Control Panel Widget
//! Left side panel with currency selectors, amount entry and action buttons.

use crate::currency::{Currency, CurrencySet};
use egui::{Color32, ComboBox, RichText};

/// Left side control panel. Holds the user's selections and the result label.
pub struct ControlPanel {
    pub currencies: CurrencySet,
    pub from: Currency,
    pub to: Currency,
    pub amount_text: String,
    pub result_text: String,
    pub status: String,
    pub busy: bool,
    pub export_enabled: bool,
}

impl ControlPanel {
    /// Preferred defaults fall back to the first member of `currencies`.
    pub fn new(currencies: CurrencySet, default_from: Currency, default_to: Currency) -> Self {
        let from = currencies.resolve(default_from).unwrap_or(default_from);
        let to = currencies.resolve(default_to).unwrap_or(default_to);
        Self {
            currencies,
            from,
            to,
            amount_text: String::new(),
            result_text: String::new(),
            status: "Ready".to_string(),
            busy: false,
            export_enabled: false,
        }
    }

    pub fn set_result(&mut self, text: impl Into<String>) {
        self.result_text = text.into();
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = text.into();
    }

    fn currency_selector(
        ui: &mut egui::Ui,
        id: &str,
        label: &str,
        currencies: &CurrencySet,
        selected: &mut Currency,
    ) {
        ui.horizontal(|ui| {
            ui.add_sized([70.0, 20.0], egui::Label::new(label));
            ComboBox::from_id_salt(id)
                .width(120.0)
                .selected_text(selected.code())
                .show_ui(ui, |ui| {
                    for currency in currencies.iter() {
                        ui.selectable_value(selected, currency, currency.code());
                    }
                });
        });
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("💱 Currency Converter")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Currency Section =====
        ui.label(RichText::new("Currencies").size(14.0).strong());
        ui.add_space(5.0);

        Self::currency_selector(
            ui,
            "from_currency",
            "From:",
            &self.currencies,
            &mut self.from,
        );
        ui.add_space(5.0);
        Self::currency_selector(ui, "to_currency", "To:", &self.currencies, &mut self.to);

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Amount Section =====
        ui.label(RichText::new("Amount:").size(14.0).strong());
        ui.add_space(5.0);
        let entry = ui.add(
            egui::TextEdit::singleline(&mut self.amount_text)
                .hint_text("e.g. 100")
                .desired_width(200.0),
        );
        let submitted = entry.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!self.busy, |ui| {
                let button = egui::Button::new(RichText::new("Convert").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() || (submitted && !self.busy) {
                    action = ControlPanelAction::Convert;
                }
            });
        });

        ui.add_space(8.0);
        ui.label(RichText::new(&self.result_text).size(15.0));

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Chart Section =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!self.busy, |ui| {
                let button = egui::Button::new(RichText::new("📈 Update Graph").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Plot;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(self.export_enabled && !self.busy, |ui| {
                let button = egui::Button::new(RichText::new("💾 Save Chart").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportChart;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            if self.busy {
                ui.spinner();
            }
            ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));
        });

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Convert,
    Plot,
    ExportChart,
}
