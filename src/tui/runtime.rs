//! Event loop for the interactive showcase.
//!
//! Terminal events, autoplay ticks and notification deadlines become
//! [`ShowcaseMsg`] values for `update`; the commands it returns are executed
//! here. This is the only module in `tui` that touches the terminal, the
//! filesystem or child processes.

#![allow(missing_docs)]

use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, MouseEventKind};
use signal_hook::consts::{SIGINT, SIGTERM};

use crate::core::config::{Config, ContactConfig};
use crate::logger::jsonl::{EventType, JsonlConfig, JsonlWriter, LogEntry};
use crate::showcase::autoplay::AutoplayTimer;
use crate::showcase::content::ShowcaseContent;

use super::layout::build_layout;
use super::model::{NOTIFICATION_TTL, NotificationLevel, ShowcaseCmd, ShowcaseModel, ShowcaseMsg};
use super::preferences::{self, UserPreferences};
use super::render::{paint, render_frame};
use super::terminal_guard::TerminalGuard;
use super::theme::{AccessibilityProfile, Theme};
use super::update::update;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const LOG_SOURCE: &str = "browse";

/// Everything the runtime needs besides the content itself.
#[derive(Debug, Clone)]
pub struct ShowcaseRuntimeConfig {
    pub contact: ContactConfig,
    pub autoplay: bool,
    pub autoplay_interval: Duration,
    pub preferences_file: PathBuf,
    pub activity_log: PathBuf,
    pub accessibility: AccessibilityProfile,
    /// Hand composed `mailto:` links to the desktop opener.
    pub open_mail_client: bool,
}

impl ShowcaseRuntimeConfig {
    #[must_use]
    pub fn from_config(config: &Config, accessibility: AccessibilityProfile) -> Self {
        Self {
            contact: config.contact.clone(),
            autoplay: config.carousel.autoplay,
            autoplay_interval: config.autoplay_interval(),
            preferences_file: config.paths.preferences_file.clone(),
            activity_log: config.paths.activity_log.clone(),
            accessibility,
            open_mail_client: true,
        }
    }
}

/// Run the showcase until the user quits or SIGINT/SIGTERM arrives.
///
/// # Errors
/// Returns I/O errors from terminal setup, event polling or drawing.
/// Failures of side-effects (saving preferences, opening the mail client)
/// are shown as notifications instead.
pub fn run_showcase(config: &ShowcaseRuntimeConfig, content: ShowcaseContent) -> io::Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    register_shutdown_signals(&shutdown);

    let outcome = preferences::load(&config.preferences_file);
    let prefs_warning = outcome.warning();
    let prefs = outcome.into_prefs();

    let model = ShowcaseModel::new(
        content,
        config.contact.clone(),
        prefs.theme,
        config.autoplay,
        TerminalGuard::terminal_size(),
    );
    let mut runtime = Runtime::new(config, model, open_activity_log(&config.activity_log));

    let mut start = LogEntry::info(EventType::SessionStart).with_source(LOG_SOURCE);
    start.theme = Some(prefs.theme.label().to_string());
    start.count = Some(runtime.model.filter.items().len());
    runtime.log(&start);

    if let Some(warning) = prefs_warning {
        runtime.warn(warning);
    }
    if config.autoplay {
        runtime.set_autoplay(true);
    }

    let guard = TerminalGuard::new()?;
    let result = runtime.event_loop(&shutdown);

    if let Some(timer) = runtime.timer.take() {
        timer.stop();
    }
    drop(guard);

    let stop = LogEntry::info(EventType::SessionStop).with_source(LOG_SOURCE);
    runtime.writer.write_entry(&stop);
    result
}

/// Activity log for the interactive session. The terminal belongs to the
/// painter, so a broken log file is discarded instead of echoed to stderr.
fn open_activity_log(path: &Path) -> JsonlWriter {
    let mut config = JsonlConfig::new(path);
    config.stderr_fallback = false;
    JsonlWriter::open(config)
}

struct Runtime<'a> {
    config: &'a ShowcaseRuntimeConfig,
    model: ShowcaseModel,
    writer: JsonlWriter,
    /// Set once the user has been told the activity log is unavailable.
    log_warned: bool,
    timer: Option<AutoplayTimer>,
    /// Pending `(notification id, deadline)` pairs.
    expiries: Vec<(u64, Instant)>,
    /// Messages produced by failed side-effects, fed back into `update`.
    inbox: VecDeque<ShowcaseMsg>,
}

impl<'a> Runtime<'a> {
    fn new(config: &'a ShowcaseRuntimeConfig, model: ShowcaseModel, writer: JsonlWriter) -> Self {
        Self {
            config,
            model,
            writer,
            log_warned: false,
            timer: None,
            expiries: Vec::new(),
            inbox: VecDeque::new(),
        }
    }

    fn event_loop(&mut self, shutdown: &AtomicBool) -> io::Result<()> {
        let mut stdout = io::stdout();
        let mut dirty = true;

        loop {
            if shutdown.load(Ordering::Relaxed) || self.model.quit {
                return Ok(());
            }

            if dirty {
                self.draw(&mut stdout)?;
                dirty = false;
            }

            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => self.inbox.push_back(ShowcaseMsg::Key(key)),
                    Event::Mouse(mouse) if mouse.kind != MouseEventKind::Moved => {
                        self.inbox.push_back(ShowcaseMsg::Mouse(mouse));
                    }
                    Event::Resize(cols, rows) => {
                        self.inbox.push_back(ShowcaseMsg::Resize { cols, rows });
                    }
                    _ => {}
                }
            }

            if self.timer.as_ref().is_some_and(AutoplayTimer::drain) {
                self.inbox.push_back(ShowcaseMsg::AutoplayTick);
            }

            let now = Instant::now();
            let (due, pending): (Vec<_>, Vec<_>) =
                self.expiries.drain(..).partition(|(_, at)| *at <= now);
            self.expiries = pending;
            for (id, _) in due {
                self.inbox.push_back(ShowcaseMsg::NotificationExpired(id));
            }

            while let Some(msg) = self.inbox.pop_front() {
                let cmd = update(&mut self.model, msg);
                self.execute(cmd);
                dirty = true;
            }
        }
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let layout = build_layout(&self.model);
        let frame = render_frame(&self.model, &layout);
        let theme = Theme::new(self.model.theme, self.config.accessibility);
        paint(&frame, theme, out)
    }

    fn execute(&mut self, cmd: ShowcaseCmd) {
        match cmd {
            ShowcaseCmd::None | ShowcaseCmd::Quit => {}
            ShowcaseCmd::Batch(cmds) => {
                for cmd in cmds {
                    self.execute(cmd);
                }
            }
            ShowcaseCmd::Log(entry) => self.log(&entry),
            ShowcaseCmd::SavePreferences(theme) => {
                let prefs = UserPreferences {
                    theme,
                    ..UserPreferences::default()
                };
                if let Err(error) = preferences::save(&prefs, &self.config.preferences_file) {
                    self.inbox.push_back(ShowcaseMsg::Error(format!(
                        "could not save preferences: {error}"
                    )));
                }
            }
            ShowcaseCmd::SetAutoplay(on) => self.set_autoplay(on),
            ShowcaseCmd::ComposeMail(link) => {
                if self.config.open_mail_client
                    && let Err(error) = open_uri(&link.uri())
                {
                    self.inbox.push_back(ShowcaseMsg::Error(format!(
                        "could not open mail client: {error}"
                    )));
                }
            }
            ShowcaseCmd::ScheduleNotificationExpiry { id, after } => self.schedule_expiry(id, after),
        }
    }

    fn set_autoplay(&mut self, on: bool) {
        if !on {
            if let Some(timer) = self.timer.take() {
                timer.stop();
            }
            return;
        }
        if self.timer.is_some() {
            return;
        }
        match AutoplayTimer::start(self.config.autoplay_interval) {
            Ok(timer) => self.timer = Some(timer),
            Err(error) => {
                self.log(&LogEntry::from_error(&error));
                self.inbox.push_back(ShowcaseMsg::Error(error.to_string()));
            }
        }
    }

    fn log(&mut self, entry: &LogEntry) {
        self.writer.write_entry(entry);
        if self.writer.is_degraded() && !self.log_warned {
            self.log_warned = true;
            self.warn(format!(
                "activity log unavailable at {}; events are not recorded",
                self.writer.path().display()
            ));
        }
    }

    fn warn(&mut self, message: String) {
        let id = self
            .model
            .push_notification(NotificationLevel::Warning, message);
        self.schedule_expiry(id, NOTIFICATION_TTL);
    }

    fn schedule_expiry(&mut self, id: u64, after: Duration) {
        self.expiries.push((id, Instant::now() + after));
    }
}

fn register_shutdown_signals(flag: &Arc<AtomicBool>) {
    if let Err(e) = signal_hook::flag::register(SIGTERM, Arc::clone(flag)) {
        eprintln!("[FOLIO-SIGNAL] failed to register SIGTERM: {e}");
    }
    if let Err(e) = signal_hook::flag::register(SIGINT, Arc::clone(flag)) {
        eprintln!("[FOLIO-SIGNAL] failed to register SIGINT: {e}");
    }
}

/// Program that opens URIs with the desktop's default handler.
#[must_use]
pub const fn uri_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(windows) {
        "explorer"
    } else {
        "xdg-open"
    }
}

/// Hand `uri` to the desktop opener without waiting for it.
///
/// # Errors
/// Returns the spawn error if the opener is missing.
pub fn open_uri(uri: &str) -> io::Result<()> {
    let mut command = Command::new(uri_opener());
    command
        .arg(uri)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    spawn_reaped(command).map(drop)
}

/// Spawn `command` and wait for it on a detached thread so the child is
/// reaped as soon as it exits.
fn spawn_reaped(mut command: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = command.spawn()?;
    thread::Builder::new()
        .name("folio-opener".to_string())
        .spawn(move || child.wait())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::tui::theme::ThemeMode;

    fn model(autoplay: bool) -> ShowcaseModel {
        ShowcaseModel::new(
            ShowcaseContent::builtin(),
            ContactConfig::default(),
            ThemeMode::Dark,
            autoplay,
            (80, 24),
        )
    }

    fn runtime_config(dir: &Path, activity_log: PathBuf) -> ShowcaseRuntimeConfig {
        ShowcaseRuntimeConfig {
            contact: ContactConfig::default(),
            autoplay: false,
            autoplay_interval: Duration::from_millis(500),
            preferences_file: dir.join("prefs.json"),
            activity_log,
            accessibility: AccessibilityProfile::from_no_color_flag(true),
            open_mail_client: false,
        }
    }

    #[test]
    fn runtime_config_follows_loaded_config() {
        let mut config = Config::default();
        config.carousel.autoplay = false;
        config.carousel.interval_ms = 2_500;
        let runtime = ShowcaseRuntimeConfig::from_config(
            &config,
            AccessibilityProfile::from_no_color_flag(true),
        );
        assert!(!runtime.autoplay);
        assert_eq!(runtime.autoplay_interval, Duration::from_millis(2_500));
        assert_eq!(runtime.preferences_file, config.paths.preferences_file);
        assert!(runtime.accessibility.no_color());
        assert!(runtime.open_mail_client);
    }

    #[test]
    fn opener_is_known_program() {
        assert!(["open", "explorer", "xdg-open"].contains(&uri_opener()));
    }

    #[test]
    fn side_effect_failures_come_back_as_messages() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let config = ShowcaseRuntimeConfig {
            contact: ContactConfig::default(),
            autoplay: false,
            autoplay_interval: Duration::from_millis(500),
            preferences_file: blocker.join("prefs.json"),
            activity_log: dir.path().join("activity.jsonl"),
            accessibility: AccessibilityProfile::from_no_color_flag(true),
            open_mail_client: false,
        };
        let mut runtime = Runtime::new(&config, model(false), JsonlWriter::discard());

        runtime.execute(ShowcaseCmd::SavePreferences(ThemeMode::Light));
        assert!(matches!(runtime.inbox.front(), Some(ShowcaseMsg::Error(_))));

        runtime.execute(ShowcaseCmd::ScheduleNotificationExpiry {
            id: 7,
            after: Duration::ZERO,
        });
        assert_eq!(runtime.expiries.len(), 1);
    }

    #[test]
    fn autoplay_timer_follows_set_autoplay() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShowcaseRuntimeConfig {
            contact: ContactConfig::default(),
            autoplay: true,
            autoplay_interval: Duration::from_millis(500),
            preferences_file: dir.path().join("prefs.json"),
            activity_log: dir.path().join("activity.jsonl"),
            accessibility: AccessibilityProfile::from_no_color_flag(true),
            open_mail_client: false,
        };
        let mut runtime = Runtime::new(&config, model(true), JsonlWriter::discard());
        runtime.execute(ShowcaseCmd::SetAutoplay(true));
        assert!(runtime.timer.is_some());
        runtime.execute(ShowcaseCmd::SetAutoplay(true));
        runtime.execute(ShowcaseCmd::SetAutoplay(false));
        assert!(runtime.timer.is_none());
    }

    #[test]
    fn broken_activity_log_stays_off_the_terminal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let config = runtime_config(dir.path(), blocker.join("activity.jsonl"));
        let writer = open_activity_log(&config.activity_log);
        assert_eq!(writer.state(), "discard");

        let mut runtime = Runtime::new(&config, model(false), writer);
        let cmd = update(
            &mut runtime.model,
            ShowcaseMsg::Key(crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Right,
                crossterm::event::KeyModifiers::NONE,
            )),
        );
        runtime.execute(cmd);
        runtime.execute(ShowcaseCmd::Log(LogEntry::info(EventType::SlideChanged)));

        assert_eq!(runtime.writer.state(), "discard");
        let warnings: Vec<_> = runtime
            .model
            .notifications
            .iter()
            .filter(|n| n.level == NotificationLevel::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("activity log unavailable"));
        assert_eq!(runtime.expiries.len(), 1);
    }

    #[test]
    fn working_activity_log_raises_no_warning() {
        let dir = tempfile::tempdir().unwrap();
        let config = runtime_config(dir.path(), dir.path().join("activity.jsonl"));
        let writer = open_activity_log(&config.activity_log);
        let mut runtime = Runtime::new(&config, model(false), writer);
        runtime.execute(ShowcaseCmd::Log(LogEntry::info(EventType::SessionStart)));
        assert_eq!(runtime.writer.state(), "normal");
        assert!(runtime.model.notifications.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn spawned_opener_is_reaped() {
        let handle = spawn_reaped(Command::new("true")).unwrap();
        let status = handle.join().unwrap().unwrap();
        assert!(status.success());
    }
}
