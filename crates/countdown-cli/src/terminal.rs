//! Terminal presentation: live remaining time, celebration banner, history table.

use std::io::Write;

use countdown_core::storage::NotificationsConfig;
use countdown_core::{Event, History, NotificationSink};
use unicode_width::UnicodeWidthStr;

const BELL: &str = "\x07";

/// Renders countdown events on stdout.
///
/// The sound cue is the terminal bell; `sound_url` is for front-ends that
/// can play audio.
pub struct TerminalSink {
    notifications: NotificationsConfig,
    quiet: bool,
}

impl TerminalSink {
    pub fn new(notifications: NotificationsConfig, quiet: bool) -> Self {
        Self {
            notifications,
            quiet,
        }
    }

    /// What `event` puts on the terminal, if anything.
    ///
    /// `quiet` hides the running clock; disabled notifications hide the
    /// banner; disabled sound drops the bell.
    pub fn render_event(&self, event: &Event) -> Option<String> {
        match event {
            Event::Tick { remaining, .. } if !self.quiet => Some(format!("\r{remaining} ")),
            Event::Completed { .. } if self.notifications.enabled => {
                let bell = if self.notifications.sound { BELL } else { "" };
                Some(format!(
                    "\r{}\n{bell}",
                    render_banner(&self.notifications.message)
                ))
            }
            Event::CompletionCleared { .. } if self.notifications.enabled && !self.quiet => {
                Some("\n".to_string())
            }
            Event::TargetChanged { from, to } => Some(format!("\rtarget {from} -> {to}\n")),
            _ => None,
        }
    }

    fn write_event(&self, out: &mut impl Write, event: &Event) -> std::io::Result<()> {
        if let Some(text) = self.render_event(event) {
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }
}

impl NotificationSink for TerminalSink {
    fn notify(&self, event: &Event) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = self.write_event(&mut out, event) {
            tracing::warn!(error = %e, "failed to write to terminal");
        }
    }
}

/// The celebration overlay as a boxed banner, sized by display width.
pub fn render_banner(message: &str) -> String {
    let line = format!("🎉  {message}  🎉");
    let border = "═".repeat(line.width() + 2);
    format!("╔{border}╗\n║ {line} ║\n╚{border}╝")
}

/// The session's completions, oldest first.
pub fn render_history(history: &History) -> String {
    if history.is_empty() {
        return "No completions yet".to_string();
    }
    let mut table = format!("{:<12}{}\n", "Date", "Time");
    for record in history {
        table.push_str(&format!("{:<12}{}\n", record.date, record.time));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use countdown_core::{CompletionRecord, CountdownEngine, RemainingDuration, TargetTime};

    fn six_pm() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    fn sink(enabled: bool, sound: bool, quiet: bool) -> TerminalSink {
        let notifications = NotificationsConfig {
            enabled,
            sound,
            ..NotificationsConfig::default()
        };
        TerminalSink::new(notifications, quiet)
    }

    fn tick() -> Event {
        Event::Tick {
            remaining: RemainingDuration {
                hours: 0,
                minutes: 0,
                seconds: 5,
            },
            at: six_pm(),
        }
    }

    fn completed() -> Event {
        Event::Completed {
            record: CompletionRecord::at(six_pm()),
            at: six_pm(),
        }
    }

    #[test]
    fn completion_rings_bell_when_sound_enabled() {
        let text = sink(true, true, false).render_event(&completed()).unwrap();
        assert!(text.contains("Time to go home!"));
        assert!(text.ends_with(BELL));
    }

    #[test]
    fn completion_skips_bell_when_sound_disabled() {
        let text = sink(true, false, false).render_event(&completed()).unwrap();
        assert!(text.contains("Time to go home!"));
        assert!(!text.contains(BELL));
    }

    #[test]
    fn disabled_notifications_hide_banner_and_bell() {
        for sound in [true, false] {
            for quiet in [true, false] {
                let sink = sink(false, sound, quiet);
                assert!(sink.render_event(&completed()).is_none());
                assert!(sink
                    .render_event(&Event::CompletionCleared { at: six_pm() })
                    .is_none());
            }
        }
    }

    #[test]
    fn quiet_hides_ticks_but_not_completions() {
        let quiet = sink(true, true, true);
        assert!(quiet.render_event(&tick()).is_none());
        assert!(quiet.render_event(&completed()).is_some());

        let loud = sink(true, true, false);
        assert_eq!(loud.render_event(&tick()).as_deref(), Some("\r00:00:05 "));
    }

    #[test]
    fn target_changes_are_always_shown() {
        let event = Event::TargetChanged {
            from: "18:00".parse().unwrap(),
            to: "19:30".parse().unwrap(),
        };
        let text = sink(false, false, true).render_event(&event).unwrap();
        assert_eq!(text, "\rtarget 18:00 -> 19:30\n");
    }

    #[test]
    fn write_event_writes_rendered_text_only() {
        let mut buf = Vec::new();
        let quiet = sink(true, false, true);
        quiet.write_event(&mut buf, &tick()).unwrap();
        assert!(buf.is_empty());
        quiet.write_event(&mut buf, &completed()).unwrap();
        let written = String::from_utf8(buf).unwrap();
        assert!(written.contains("Time to go home!"));
        assert!(!written.contains(BELL));
    }

    #[test]
    fn banner_borders_line_up_on_screen() {
        let banner = render_banner("Time to go home!");
        let lines: Vec<_> = banner.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Time to go home!"));
        assert_eq!(lines[0].width(), lines[1].width());
        assert_eq!(lines[2].width(), lines[1].width());
    }

    #[test]
    fn empty_history_has_placeholder() {
        assert_eq!(render_history(&History::new()), "No completions yet");
    }

    #[test]
    fn history_table_lists_records() {
        let target: TargetTime = "18:00".parse().unwrap();
        let mut engine = CountdownEngine::new(target, six_pm());
        engine.tick(six_pm());

        let table = render_history(engine.history());
        let rows: Vec<_> = table.lines().collect();
        assert_eq!(rows[0], "Date        Time");
        assert_eq!(rows[1], "2026-10-18  18:00:00");
    }
}
