use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Context;
use chrono::Local;
use feedback_logging::{feedback_info, feedback_warn};
use magnet_core::{update, Msg, PageState, PageViewModel};
use magnet_engine::EngineHandle;

use super::config::{AppConfig, DEFAULT_CONFIG_PATH};
use super::console;
use super::effects::EffectRunner;
use super::logging;
use super::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Msg(Msg),
    Show,
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = AppConfig::load(&config_path)?;

    logging::initialize(config.log_destination, config.log_level());
    config.log_summary();

    let engine = EngineHandle::new(config.dispatch_settings()).context("starting engine")?;
    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let effects = EffectRunner::new(engine, app_tx.clone());
    console::spawn_stdin_reader(app_tx, config.load_trackers());

    let mut page = PageRuntime::new(
        PageState::new(config.feedback_settings()),
        effects,
        io::stdout(),
    );
    page.run(&app_rx)?;
    feedback_info!("Page closed");
    Ok(())
}

/// Single-threaded page loop: one event at a time, state updated in place.
pub struct PageRuntime<W: Write> {
    state: PageState,
    last_view: PageViewModel,
    effects: EffectRunner,
    out: W,
}

impl<W: Write> PageRuntime<W> {
    pub fn new(state: PageState, effects: EffectRunner, out: W) -> Self {
        Self {
            last_view: state.view(),
            state,
            effects,
            out,
        }
    }

    pub fn run(&mut self, rx: &mpsc::Receiver<AppEvent>) -> io::Result<()> {
        while let Ok(event) = rx.recv() {
            if !self.handle(event)? {
                break;
            }
        }
        Ok(())
    }

    /// Returns `false` once the page should close.
    pub fn handle(&mut self, event: AppEvent) -> io::Result<bool> {
        match event {
            AppEvent::Msg(msg) => self.dispatch_msg(msg)?,
            AppEvent::Show => {
                let lines = render::all_lines(&self.state.view());
                self.print(&lines)?;
            }
            AppEvent::Quit => return Ok(false),
        }
        Ok(true)
    }

    #[cfg(test)]
    pub fn state(&self) -> &PageState {
        &self.state
    }

    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;
        self.effects.run(effects);

        if dirty {
            let lines = render::changed_lines(&self.last_view, &view);
            self.last_view = view;
            self.print(&lines)?;
        }
        Ok(())
    }

    fn print(&mut self, lines: &[String]) -> io::Result<()> {
        let stamp = Local::now().format("%H:%M:%S");
        for line in lines {
            writeln!(self.out, "{stamp} {line}")?;
        }
        self.out.flush().inspect_err(|err| {
            feedback_warn!("Failed to flush output: {}", err);
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use magnet_core::{
        DispatchRequest, DispatchResult, FeedbackSettings, PendingPolicy, LABEL_COPIED,
        LABEL_SEND_FAILED,
    };
    use magnet_engine::{
        ClipboardError, ClipboardWriter, DispatchError, DispatchSettings, QueueDispatcher,
        ReqwestDispatcher,
    };

    use super::super::test_support::{diagnostics, init_logging};
    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    struct OkClipboard;

    impl ClipboardWriter for OkClipboard {
        fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Ok(())
        }
    }

    struct RejectingDispatcher;

    #[async_trait::async_trait]
    impl QueueDispatcher for RejectingDispatcher {
        async fn dispatch(
            &self,
            _request: &DispatchRequest,
        ) -> Result<DispatchResult, DispatchError> {
            Ok(DispatchResult::Failure {
                reason: "queue full".to_string(),
            })
        }
    }

    fn test_engine() -> EngineHandle {
        let dispatcher = ReqwestDispatcher::new(DispatchSettings::default()).unwrap();
        EngineHandle::with_backends(Arc::new(dispatcher), Arc::new(OkClipboard)).unwrap()
    }

    #[test]
    fn copy_cycle_renders_feedback_then_baseline() {
        init_logging();
        let engine = test_engine();
        let (tx, rx) = mpsc::channel();
        let effects = EffectRunner::new(engine, tx);
        let settings = FeedbackSettings {
            duration: Duration::from_millis(30),
            pending_policy: PendingPolicy::DisableOnClick,
        };
        let mut page = PageRuntime::new(PageState::new(settings), effects, Vec::new());

        page.handle(AppEvent::Msg(Msg::ControlRegistered {
            control_id: 1,
            label: "Copy".to_string(),
        }))
        .unwrap();
        page.handle(AppEvent::Msg(Msg::CopyClicked {
            control_id: 1,
            text: "magnet:?xt=urn:btih:abc".to_string(),
        }))
        .unwrap();

        // Clipboard result, then the revert timer.
        for _ in 0..2 {
            let event = rx.recv_timeout(WAIT).expect("engine event");
            page.handle(event).unwrap();
        }

        assert!(page.state().control(1).unwrap().is_idle());
        let output = String::from_utf8(page.out.clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("#1 [Copy] enabled"));
        assert!(lines[1].ends_with("#1 [Copy] disabled"));
        assert!(lines[2].contains(&format!("[{LABEL_COPIED}] disabled")));
        assert!(lines[3].ends_with("#1 [Copy] enabled"));
    }

    #[test]
    fn quit_stops_the_loop() {
        let engine = test_engine();
        let (tx, rx) = mpsc::channel();
        let effects = EffectRunner::new(engine, tx.clone());
        let mut page = PageRuntime::new(PageState::default(), effects, Vec::new());

        tx.send(AppEvent::Show).unwrap();
        tx.send(AppEvent::Quit).unwrap();
        page.run(&rx).unwrap();
        assert!(page.out.is_empty());
    }

    #[test]
    fn rejected_send_shows_failure_and_logs_reason() {
        init_logging();
        let engine =
            EngineHandle::with_backends(Arc::new(RejectingDispatcher), Arc::new(OkClipboard))
                .unwrap();
        let (tx, rx) = mpsc::channel();
        let effects = EffectRunner::new(engine, tx);
        let settings = FeedbackSettings {
            duration: Duration::from_secs(60),
            pending_policy: PendingPolicy::DisableOnResult,
        };
        let mut page = PageRuntime::new(PageState::new(settings), effects, Vec::new());

        page.handle(AppEvent::Msg(Msg::ControlRegistered {
            control_id: 7,
            label: "Send".to_string(),
        }))
        .unwrap();
        page.handle(AppEvent::Msg(Msg::SendClicked {
            control_id: 7,
            request: DispatchRequest::new("magnet:?xt=urn:btih:abc", false, None, None, None),
        }))
        .unwrap();

        let event = rx.recv_timeout(WAIT).expect("dispatch result");
        page.handle(event).unwrap();

        assert_eq!(page.state().control(7).unwrap().label(), LABEL_SEND_FAILED);
        assert!(diagnostics()
            .iter()
            .any(|message| message.contains("queue full")));
    }
}
