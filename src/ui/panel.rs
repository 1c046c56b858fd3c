//! Side panel
//!
//! Move entry, game controls, bot depth, trainer controls, appearance
//! settings and the move history. The panel never touches the board directly:
//! every action is written as a [`BoardCommand`].

use super::colors::UiColors;
use crate::app::{ActiveBoard, BoardCommand};
use crate::core::window_config::PANEL_WIDTH;
use crate::core::BoardSettings;
use crate::game::{BoardController, TrainerPhase, TrainingSession, MAX_SEARCH_DEPTH};
use crate::rendering::BoardTheme;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

/// Text typed into the move box
#[derive(Resource, Debug, Default)]
pub struct MoveInput {
    pub text: String,
}

pub fn board_panel_system(
    mut contexts: EguiContexts,
    board: ActiveBoard,
    mut input: ResMut<MoveInput>,
    mut settings: ResMut<BoardSettings>,
    mut commands: MessageWriter<BoardCommand>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let Some(controller) = board.get() else {
        return;
    };

    egui::SidePanel::right("board_panel")
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .frame(
            egui::Frame::default()
                .fill(UiColors::BG_DARK)
                .inner_margin(12.0),
        )
        .show(ctx, |ui| {
            move_entry(ui, controller, &mut input, &mut commands);
            ui.separator();

            match board.session.as_deref() {
                Some(session) => trainer_controls(ui, session, &mut commands),
                None => game_controls(ui, controller, &mut commands),
            }
            ui.separator();

            appearance(ui, &mut settings);
            ui.separator();

            history(ui, controller);
        });
}

fn move_entry(
    ui: &mut egui::Ui,
    controller: &BoardController,
    input: &mut MoveInput,
    commands: &mut MessageWriter<BoardCommand>,
) {
    let prompt = controller.prompt();
    let color = if prompt.is_error() {
        UiColors::DANGER
    } else {
        UiColors::TEXT_SECONDARY
    };
    ui.label(egui::RichText::new(prompt.to_string()).color(color));

    let response = ui.add(
        egui::TextEdit::singleline(&mut input.text)
            .hint_text(prompt.to_string())
            .desired_width(f32::INFINITY),
    );
    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        let notation = input.text.trim().to_string();
        if !notation.is_empty() {
            commands.write(BoardCommand::Submit(notation));
        }
        input.text.clear();
        response.request_focus();
    }
}

fn game_controls(
    ui: &mut egui::Ui,
    controller: &BoardController,
    commands: &mut MessageWriter<BoardCommand>,
) {
    ui.horizontal(|ui| {
        if ui.button("Restart").clicked() {
            commands.write(BoardCommand::Restart);
        }
        if ui.button("Flip").clicked() {
            commands.write(BoardCommand::Flip);
        }
        if ui
            .add_enabled(
                controller.is_idle() && controller.history().len() >= 2,
                egui::Button::new("Take back"),
            )
            .clicked()
        {
            commands.write(BoardCommand::TakeBack);
        }
    });

    let Some(depth) = controller.depth() else {
        return;
    };
    ui.horizontal(|ui| {
        if ui
            .add_enabled(controller.is_idle(), egui::Button::new("Best move"))
            .clicked()
        {
            commands.write(BoardCommand::RequestHint);
        }
        if controller.awaits_opponent() && ui.button("Retry bot").clicked()
        {
            commands.write(BoardCommand::RetryOpponent);
        }
    });

    let mut value = i64::from(depth.get());
    ui.horizontal(|ui| {
        ui.label("Depth");
        ui.add(egui::DragValue::new(&mut value).range(0..=i64::from(MAX_SEARCH_DEPTH)));
    });
    if value != i64::from(depth.get()) {
        commands.write(BoardCommand::SetDepth(value));
    }
}

fn trainer_controls(
    ui: &mut egui::Ui,
    session: &TrainingSession,
    commands: &mut MessageWriter<BoardCommand>,
) {
    let mut selected = session.opening().to_string();
    egui::ComboBox::from_label("Opening")
        .selected_text(selected.as_str())
        .show_ui(ui, |ui| {
            for name in session.catalog().names() {
                ui.selectable_value(&mut selected, name.to_string(), name);
            }
        });
    if selected != session.opening() {
        commands.write(BoardCommand::SelectOpening(selected));
    }

    let (current, total) = session.progress();
    let status = match session.phase() {
        TrainerPhase::Prompting => format!("Position {current} of {total}"),
        TrainerPhase::Feedback { verdict, .. } => format!("{verdict:?}"),
        TrainerPhase::Completed => "Opening complete".to_string(),
    };
    ui.label(
        egui::RichText::new(format!("Score: {}", session.score()))
            .color(UiColors::TEXT_PRIMARY)
            .strong(),
    );
    ui.label(egui::RichText::new(status).color(UiColors::TEXT_TERTIARY));

    ui.horizontal(|ui| {
        if ui
            .add_enabled(
                session.phase() == TrainerPhase::Prompting,
                egui::Button::new("Skip"),
            )
            .clicked()
        {
            commands.write(BoardCommand::Skip);
        }
        if ui.button("Restart").clicked() {
            commands.write(BoardCommand::Restart);
        }
        if ui.button("Flip").clicked() {
            commands.write(BoardCommand::Flip);
        }
    });
}

/// Only assigns on change so the settings are not saved every frame
fn appearance(ui: &mut egui::Ui, settings: &mut ResMut<BoardSettings>) {
    let mut theme = settings.board_theme;
    egui::ComboBox::from_label("Board")
        .selected_text(theme.name())
        .show_ui(ui, |ui| {
            for option in BoardTheme::ALL {
                ui.selectable_value(&mut theme, option, option.name());
            }
        });
    if theme != settings.board_theme {
        settings.board_theme = theme;
    }

    let mut highlight = settings.highlight_last_move;
    ui.checkbox(&mut highlight, "Highlight last move");
    if highlight != settings.highlight_last_move {
        settings.highlight_last_move = highlight;
    }

    let mut volume = settings.master_volume;
    ui.add(egui::Slider::new(&mut volume, 0.0..=1.0).text("Volume"));
    if (volume - settings.master_volume).abs() > f32::EPSILON {
        settings.master_volume = volume;
    }
}

fn history(ui: &mut egui::Ui, controller: &BoardController) {
    ui.label(egui::RichText::new("Moves").color(UiColors::TEXT_PRIMARY));
    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for line in controller.history().lines() {
                ui.label(egui::RichText::new(line).color(UiColors::TEXT_SECONDARY).monospace());
            }
        });
}
