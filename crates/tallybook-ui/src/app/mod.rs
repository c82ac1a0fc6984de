//! Top-level application tying together the ledger table, menus,
//! dialogs, and status bar.

mod file_ops;
mod menu_bar;
mod settings_dialog;
mod shortcuts;
mod status_bar;
mod table;

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use eframe::egui;

use tallybook_config::AppConfig;
use tallybook_core::{month, LedgerFile};

/// Arguments passed from the command line to the application.
#[derive(Debug, Clone, Default)]
pub struct StartupArgs {
    /// Workbook file to open on startup.
    pub file: Option<PathBuf>,
}

/// Which color theme to use.
///
/// Wraps a string name. Values: `"System"`, `"Dark"`, `"Light"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeMode(pub String);

impl Default for ThemeMode {
    fn default() -> Self {
        Self::system()
    }
}

impl ThemeMode {
    pub fn system() -> Self {
        Self("System".to_string())
    }

    pub fn dark() -> Self {
        Self("Dark".to_string())
    }

    pub fn light() -> Self {
        Self("Light".to_string())
    }

    /// Returns true if this is the "System" mode.
    pub fn is_system(&self) -> bool {
        self.0 == "System"
    }

    /// Resolves "System" to a concrete mode using the OS preference.
    /// Non-system modes return their own name.
    pub fn resolve(&self) -> &str {
        if self.is_system() {
            match dark_light::detect() {
                Ok(dark_light::Mode::Light) => "Light",
                _ => "Dark",
            }
        } else {
            &self.0
        }
    }
}

/// A deferred action waiting on the unsaved-changes prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    NewFile,
    OpenFile,
    Exit,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) enum DialogState {
    #[default]
    None,
    ConfirmDiscard(PendingAction),
}

/// The main application state.
pub struct App {
    pub doc: LedgerFile,
    /// The month page currently shown in the table.
    pub current_month: u32,
    pub theme_mode: ThemeMode,
    pub zoom_level: f32,
    pub max_zoom_level: f32,
    pub show_full_path_in_title: bool,
    pub restore_last_file: bool,
    pub remember_last_folder: bool,
    pub last_used_folder: Option<PathBuf>,
    config_path: PathBuf,
    pub(crate) dialog_state: DialogState,
    pub(crate) settings_open: bool,
    pub(crate) settings_tab: settings_dialog::SettingsTab,
    pub(crate) cell_editor: Option<table::CellEditor>,
    // Set by the before-replay hook: an in-progress cell edit must not
    // survive an undo or redo that may remove the cell under it.
    editor_cancelled: Rc<Cell<bool>>,
    // Set by the after-replay hook: the shown month may no longer exist.
    month_stale: Rc<Cell<bool>>,
    pub(crate) new_kind_buffer: String,
    pub(crate) kind_rename: Option<(tallybook_core::settings_ops::KindList, usize, String)>,
    pub(crate) new_card_name: String,
    pub(crate) new_card_closing: u32,
    pub(crate) card_edit: Option<(usize, String, u32)>,
    last_window_title: String,
    exit_confirmed: bool,
}

impl App {
    /// Creates a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>, args: StartupArgs) -> Self {
        // Zoom is handled through the config-backed zoom level, not egui's
        // built-in keyboard zoom.
        cc.egui_ctx.options_mut(|o| o.zoom_with_keyboard = false);

        let config_path = AppConfig::config_path();
        let app_config = AppConfig::load_or_create(&config_path);

        let theme_mode = ThemeMode(app_config.theme.clone());

        let mut startup_file = args.file;
        if startup_file.is_none() && app_config.restore_last_file && !app_config.last_file.is_empty()
        {
            let p = PathBuf::from(&app_config.last_file);
            if p.is_file() {
                startup_file = Some(p);
            }
        }

        let doc = match startup_file {
            Some(path) => {
                let abs_path = if path.is_absolute() {
                    path
                } else {
                    std::env::current_dir().unwrap_or_default().join(path)
                };
                match LedgerFile::open(&abs_path) {
                    Ok(doc) => doc,
                    Err(e) => {
                        tracing::warn!("Failed to open '{}': {e:#}", abs_path.display());
                        LedgerFile::new()
                    }
                }
            }
            None => LedgerFile::new(),
        };

        let mut app = Self {
            current_month: doc.book.last_month().unwrap_or_else(month::current_month),
            doc,
            theme_mode,
            zoom_level: app_config.zoom_level,
            max_zoom_level: app_config.max_zoom_level,
            show_full_path_in_title: app_config.show_full_path_in_title,
            restore_last_file: app_config.restore_last_file,
            remember_last_folder: app_config.remember_last_folder,
            last_used_folder: if app_config.last_used_folder.is_empty() {
                None
            } else {
                Some(PathBuf::from(app_config.last_used_folder))
            },
            config_path,
            dialog_state: DialogState::None,
            settings_open: false,
            settings_tab: settings_dialog::SettingsTab::default(),
            cell_editor: None,
            editor_cancelled: Rc::new(Cell::new(false)),
            month_stale: Rc::new(Cell::new(false)),
            new_kind_buffer: String::new(),
            kind_rename: None,
            new_card_name: String::new(),
            new_card_closing: 27,
            card_edit: None,
            last_window_title: String::new(),
            exit_confirmed: false,
        };
        app.install_history_hooks();
        app.apply_theme(&cc.egui_ctx);
        app
    }

    /// Wires the undo history's replay hooks to the UI flags.
    ///
    /// Must be called again whenever `doc` is replaced, since the hooks
    /// live on the document's own history.
    pub(crate) fn install_history_hooks(&mut self) {
        let cancel = Rc::clone(&self.editor_cancelled);
        self.doc
            .history
            .set_before_replay(move |_is_undoing| cancel.set(true));
        let stale = Rc::clone(&self.month_stale);
        self.doc
            .history
            .set_after_replay(move |_is_undoing| stale.set(true));
    }

    /// Swaps in a different document (New / Open), resetting per-document
    /// UI state.
    pub(crate) fn replace_doc(&mut self, doc: LedgerFile) {
        self.doc = doc;
        self.current_month = self
            .doc
            .book
            .last_month()
            .unwrap_or_else(month::current_month);
        self.cell_editor = None;
        self.editor_cancelled.set(false);
        self.month_stale.set(false);
        self.install_history_hooks();
    }

    /// Applies the hook flags raised during the last replay.
    pub(crate) fn drain_hook_flags(&mut self) {
        if self.editor_cancelled.get() {
            self.cell_editor = None;
            self.editor_cancelled.set(false);
        }
        if self.month_stale.get() {
            self.ensure_current_month();
            self.month_stale.set(false);
        }
    }

    /// Undoes one step, honoring the replay hooks.
    pub(crate) fn undo(&mut self) {
        self.doc.undo();
        self.drain_hook_flags();
    }

    /// Redoes one step, honoring the replay hooks.
    pub(crate) fn redo(&mut self) {
        self.doc.redo();
        self.drain_hook_flags();
    }

    /// Snaps `current_month` back onto an existing page after an undo or
    /// redo removed the page that was being shown.
    pub(crate) fn ensure_current_month(&mut self) {
        if self.doc.book.pages.contains_key(&self.current_month) {
            return;
        }
        let fallback = self
            .doc
            .book
            .pages
            .range(..self.current_month)
            .next_back()
            .map(|(&m, _)| m)
            .or_else(|| self.doc.book.first_month());
        if let Some(m) = fallback {
            self.current_month = m;
        }
    }

    /// Applies egui visuals for the current theme mode.
    pub(crate) fn apply_theme(&self, ctx: &egui::Context) {
        let visuals = match self.theme_mode.resolve() {
            "Light" => egui::Visuals::light(),
            _ => egui::Visuals::dark(),
        };
        ctx.set_visuals(visuals);

        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::Vec2::new(8.0, 6.0);
            style.spacing.button_padding = egui::Vec2::new(8.0, 4.0);
            style.spacing.window_margin = egui::Margin::same(12);
        });
    }

    /// Switches the theme mode and re-applies visuals.
    pub fn set_theme_mode(&mut self, mode: ThemeMode, ctx: &egui::Context) {
        self.theme_mode = mode;
        self.apply_theme(ctx);
    }

    /// Text shown in the OS window title for the current document.
    fn window_title(&self) -> String {
        let file_label = match (&self.doc.file_path, self.show_full_path_in_title) {
            (Some(path), true) => path.to_string_lossy().into_owned(),
            _ => self.doc.title(),
        };
        let modified_marker = if self.doc.modified { " *" } else { "" };
        format!("{file_label}{modified_marker} - tallybook")
    }

    /// Updates the OS window title to show the open workbook.
    ///
    /// Only sends the viewport command when the title actually changes,
    /// to avoid triggering unnecessary repaints.
    fn update_window_title(&mut self, ctx: &egui::Context) {
        let title = self.window_title();
        if title != self.last_window_title {
            self.last_window_title.clone_from(&title);
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }
    }

    /// Shows the unsaved-changes confirmation and the settings dialog.
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let DialogState::ConfirmDiscard(ref action) = self.dialog_state {
            let action = action.clone();
            let mut open = true;
            let mut decided = false;

            egui::Window::new("Unsaved Changes")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.spacing_mut().item_spacing.y = 8.0;

                    ui.label(format!(
                        "'{}' has unsaved changes. Discard them?",
                        self.doc.title()
                    ));

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 8.0;
                        if ui.button("  Save  ").clicked() {
                            decided = true;
                            self.save_active();
                            if !self.doc.modified {
                                self.perform_pending(&action, ctx);
                            }
                        }
                        if ui.button("  Discard  ").clicked() {
                            decided = true;
                            self.perform_pending(&action, ctx);
                        }
                        if ui.button("  Cancel  ").clicked() {
                            decided = true;
                        }
                    });
                });

            if decided || !open {
                self.dialog_state = DialogState::None;
            }
        }

        self.show_settings_dialog(ctx);
    }

    /// Runs the action that was waiting on the unsaved-changes prompt.
    pub(crate) fn perform_pending(&mut self, action: &PendingAction, ctx: &egui::Context) {
        match action {
            PendingAction::NewFile => self.replace_doc(LedgerFile::new()),
            PendingAction::OpenFile => self.open_file_dialog(),
            PendingAction::Exit => {
                self.exit_confirmed = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }
}

impl eframe::App for App {
    fn ui(&mut self, ui: &mut egui::Ui, frame: &mut eframe::Frame) {
        #[allow(deprecated)]
        self.update(&ui.ctx().clone(), frame);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_zoom_factor(self.zoom_level);

        self.drain_hook_flags();
        self.handle_global_shortcuts(ctx);

        // Closing the window with unsaved changes goes through the
        // confirmation dialog first.
        if ctx.input(|i| i.viewport().close_requested()) && self.doc.modified && !self.exit_confirmed
        {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.dialog_state = DialogState::ConfirmDiscard(PendingAction::Exit);
        }

        self.update_window_title(ctx);

        let panel_fill = ctx.style().visuals.panel_fill;
        let extreme_bg = ctx.style().visuals.extreme_bg_color;

        egui::TopBottomPanel::top("menu_bar")
            .frame(
                egui::Frame::new()
                    .fill(panel_fill)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                self.show_menu_bar(ui, ctx);
            });

        egui::TopBottomPanel::bottom("status_bar")
            .max_height(24.0)
            .frame(
                egui::Frame::new()
                    .fill(extreme_bg)
                    .inner_margin(egui::Margin::symmetric(8, 3)),
            )
            .show(ctx, |ui| {
                self.show_status_bar(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_ledger_table(ui);
        });

        self.show_dialogs(ctx);

        // All inverses registered this frame collapse into one undo step.
        self.doc.commit_history();
        self.drain_hook_flags();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let config = AppConfig {
            theme: self.theme_mode.0.clone(),
            zoom_level: self.zoom_level,
            max_zoom_level: self.max_zoom_level,
            show_full_path_in_title: self.show_full_path_in_title,
            restore_last_file: self.restore_last_file,
            last_file: self
                .doc
                .file_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            remember_last_folder: self.remember_last_folder,
            last_used_folder: self
                .last_used_folder
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        if let Err(e) = config.save(&self.config_path) {
            tracing::warn!("Failed to save config on exit: {e}");
        }
    }
}
