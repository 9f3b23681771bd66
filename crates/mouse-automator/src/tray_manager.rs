//! System tray icon with state-based updates.
//!
//! The tray is the whole user interface: a colored status icon, a tooltip
//! carrying the status text, and a menu to record, play, stop, open the
//! settings file and exit.

use crate::{AppCommand, AppError, AppResult, StatusBoard, TrayIconState};

use std::panic::Location;

use error_location::ErrorLocation;
use image::{Rgba, RgbaImage};
use tracing::{info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const ICON_SIZE: u32 = 32;

/// Menu item ids, used off the UI thread to map clicks to commands.
#[derive(Debug, Clone)]
pub struct MenuIds {
    pub(crate) record: MenuId,
    pub(crate) play: MenuId,
    pub(crate) stop: MenuId,
    pub(crate) settings: MenuId,
    pub(crate) exit: MenuId,
}

impl MenuIds {
    /// Command for a clicked menu item, if it is one of ours.
    pub fn command_for(&self, id: &MenuId) -> Option<AppCommand> {
        if *id == self.record {
            Some(AppCommand::StartRecording)
        } else if *id == self.play {
            Some(AppCommand::StartPlayback)
        } else if *id == self.stop {
            Some(AppCommand::StopCurrent)
        } else if *id == self.settings {
            Some(AppCommand::OpenSettings)
        } else if *id == self.exit {
            Some(AppCommand::Shutdown)
        } else {
            None
        }
    }
}

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    record_item: MenuItem,
    play_item: MenuItem,
    menu_ids: MenuIds,
    stop_key: String,
}

impl TrayManager {
    /// Create a new tray manager in the idle state.
    #[track_caller]
    #[instrument]
    pub fn new(stop_key: &str) -> AppResult<Self> {
        let menu = Menu::new();
        let board = StatusBoard::default();

        let record_item = MenuItem::new(board.record_label(stop_key), true, None);
        let play_item = MenuItem::new(board.play_label(stop_key), true, None);
        let stop_item = MenuItem::new("Stop", true, None);
        let settings_item = MenuItem::new("Settings", true, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let menu_ids = MenuIds {
            record: record_item.id().clone(),
            play: play_item.id().clone(),
            stop: stop_item.id().clone(),
            settings: settings_item.id().clone(),
            exit: exit_item.id().clone(),
        };

        menu.append_items(&[
            &record_item,
            &play_item,
            &stop_item,
            &PredefinedMenuItem::separator(),
            &settings_item,
            &exit_item,
        ])
        .map_err(|e| AppError::TrayError {
            reason: format!("Failed to build tray menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(board.tooltip())
            .with_menu(Box::new(menu))
            .with_icon(Self::render_icon(TrayIconState::Idle)?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            record_item,
            play_item,
            menu_ids,
            stop_key: stop_key.to_string(),
        })
    }

    /// Redraw icon, tooltip and menu labels from the status board.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update_state(&mut self, board: StatusBoard) -> AppResult<()> {
        self.tray_icon
            .set_icon(Some(Self::render_icon(board.tray_state())?))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(board.tooltip()))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.record_item.set_text(board.record_label(&self.stop_key));
        self.play_item.set_text(board.play_label(&self.stop_key));

        Ok(())
    }

    /// Draw a filled status dot. Nothing is loaded from disk.
    #[track_caller]
    fn render_icon(state: TrayIconState) -> AppResult<Icon> {
        let rgba = Rgba(icon_color(state));
        let center = (ICON_SIZE as f32 - 1.0) / 2.0;
        let radius = ICON_SIZE as f32 / 2.0 - 1.0;

        let img = RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
            let (dx, dy) = (x as f32 - center, y as f32 - center);
            if dx * dx + dy * dy <= radius * radius {
                rgba
            } else {
                Rgba([0, 0, 0, 0])
            }
        });

        let (width, height) = (img.width(), img.height());

        Icon::from_rgba(img.into_raw(), width, height).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Ids of the menu items, for mapping menu events to commands.
    pub fn menu_ids(&self) -> &MenuIds {
        &self.menu_ids
    }
}

/// Icon fill for each state.
pub(crate) fn icon_color(state: TrayIconState) -> [u8; 4] {
    match state {
        TrayIconState::Idle => [0x34, 0x98, 0xdb, 0xff],
        TrayIconState::Countdown => [0xf3, 0x9c, 0x12, 0xff],
        TrayIconState::Recording => [0xe7, 0x4c, 0x3c, 0xff],
        TrayIconState::Playback => [0x2e, 0xcc, 0x71, 0xff],
    }
}
