//! Board sprites
//!
//! The board is redrawn from a fresh [`Frame`] whenever the board, the
//! settings or the display scale change: every old tile and piece entity is
//! despawned and the frame's commands are spawned in painting order.
//!
//! Frame coordinates run from the board's top-left corner with y down; world
//! coordinates are centered with y up, and the board sits left of the panel.

use super::systems::ActiveBoard;
use crate::core::window_config::PANEL_WIDTH;
use crate::core::BoardSettings;
use crate::rendering::{render, BoardView, CanvasLayout, DrawCommand, Frame, PieceSprite, Rect, Rgba};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::collections::HashMap;

/// Marker for every entity spawned from a frame
#[derive(Component, Debug, Clone, Copy)]
pub struct BoardEntity;

/// Image handles for the twelve piece kinds
#[derive(Resource, Debug, Clone, Default)]
pub struct PieceImages(pub HashMap<PieceSprite, Handle<Image>>);

pub fn load_piece_images(mut commands: Commands, asset_server: Res<AssetServer>) {
    let images = PieceSprite::all()
        .map(|sprite| (sprite, asset_server.load(sprite.asset_path())))
        .collect();
    commands.insert_resource(PieceImages(images));
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn to_color(rgba: Rgba) -> Color {
    Color::srgba_u8(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// World-space center of a frame rect
fn to_world(rect: &Rect, layout: &CanvasLayout, z: f32) -> Vec3 {
    let (cx, cy) = rect.center();
    let half = layout.size / 2.0;
    Vec3::new(cx - half - PANEL_WIDTH / 2.0, half - cy, z)
}

/// Spawn `frame` as sprites
pub fn spawn_frame(commands: &mut Commands, frame: &Frame, images: &PieceImages) {
    for (index, command) in frame.commands.iter().enumerate() {
        let z = index as f32 * 0.01;
        match command {
            DrawCommand::Fill { rect, color } => {
                commands.spawn((
                    BoardEntity,
                    Sprite::from_color(to_color(*color), Vec2::new(rect.width, rect.height)),
                    Transform::from_translation(to_world(rect, &frame.layout, z)),
                ));
            }
            DrawCommand::Sprite { rect, sprite } => {
                let Some(image) = images.0.get(sprite) else {
                    warn!("[BOARD] No image for {}", sprite.key());
                    continue;
                };
                commands.spawn((
                    BoardEntity,
                    Sprite {
                        image: image.clone(),
                        custom_size: Some(Vec2::new(rect.width, rect.height)),
                        ..default()
                    },
                    Transform::from_translation(to_world(rect, &frame.layout, z)),
                ));
            }
        }
    }
}

/// Rebuild the board sprites after any visible change
pub fn redraw_board(
    mut commands: Commands,
    board: ActiveBoard,
    settings: Res<BoardSettings>,
    images: Option<Res<PieceImages>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    existing: Query<Entity, With<BoardEntity>>,
    mut last_scale: Local<Option<f32>>,
) {
    let Some(images) = images else {
        return;
    };
    let Some(controller) = board.get() else {
        return;
    };
    let scale = windows
        .single()
        .map(|window| window.scale_factor())
        .unwrap_or(1.0);

    let scale_changed = *last_scale != Some(scale);
    if !(scale_changed || board.is_changed() || settings.is_changed() || images.is_added()) {
        return;
    }
    *last_scale = Some(scale);

    let mut view = BoardView::of(controller);
    if !settings.highlight_last_move {
        view = view.without_last_move();
    }
    let layout = CanvasLayout::new(settings.board_size, scale);
    let frame = render(&view, settings.board_theme, layout);

    for entity in &existing {
        commands.entity(entity).despawn();
    }
    spawn_frame(&mut commands, &frame, &images);
    debug!(
        "[BOARD] Redrew {} commands at {}px",
        frame.commands.len(),
        layout.physical_size()
    );
}
