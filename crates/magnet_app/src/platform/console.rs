//! Line commands standing in for clicks on the page.
//!
//! ```text
//! add <id> <label>
//! copy <id> <text>
//! copy-stream <id> <info_hash> <title>
//! send <id> <magnet> <is_series> [imdb_id|-] [season] [item_title]
//! show
//! quit
//! ```

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use feedback_logging::{feedback_debug, feedback_error};
use magnet_core::{
    build_magnet_link, encode_display_name, extract_display_name, ControlId, DispatchRequest,
    Msg, SeriesFlag,
};
use thiserror::Error;

use super::app::AppEvent;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("invalid control id `{0}`")]
    InvalidId(String),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// `trackers` are appended to magnet links built by `copy-stream`.
pub fn parse_line(line: &str, trackers: &[String]) -> Result<Option<AppEvent>, CommandError> {
    let line = line.trim();
    let Some((verb, rest)) = split_word(line) else {
        return Ok(None);
    };

    let event = match verb {
        "add" => {
            let (control_id, label) = id_and_rest(rest)?;
            let label = label.ok_or(CommandError::Missing("label"))?;
            AppEvent::Msg(Msg::ControlRegistered {
                control_id,
                label: label.to_string(),
            })
        }
        "copy" => {
            let (control_id, text) = id_and_rest(rest)?;
            let text = text.ok_or(CommandError::Missing("text"))?;
            AppEvent::Msg(Msg::CopyClicked {
                control_id,
                text: text.to_string(),
            })
        }
        "copy-stream" => {
            let (control_id, rest) = id_and_rest(rest)?;
            let (info_hash, title) =
                split_word(rest.unwrap_or_default()).ok_or(CommandError::Missing("info hash"))?;
            let display_name = encode_display_name(extract_display_name(title));
            AppEvent::Msg(Msg::CopyClicked {
                control_id,
                text: build_magnet_link(info_hash, &display_name, trackers),
            })
        }
        "send" => {
            let (control_id, rest) = id_and_rest(rest)?;
            let request = parse_request(rest.unwrap_or_default())?;
            AppEvent::Msg(Msg::SendClicked {
                control_id,
                request,
            })
        }
        "show" => AppEvent::Show,
        "quit" | "exit" => AppEvent::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(event))
}

fn parse_request(args: &str) -> Result<DispatchRequest, CommandError> {
    let (magnet, rest) = split_word(args).ok_or(CommandError::Missing("magnet"))?;
    let (is_series, rest) = split_word(rest).ok_or(CommandError::Missing("is_series"))?;
    let (imdb_id, rest) = split_word(rest).unzip();
    let (season, item_title) = rest.and_then(split_word).unzip();

    let imdb_id = imdb_id.filter(|id| *id != "-").map(str::to_string);
    let item_title = item_title
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string);

    Ok(DispatchRequest::new(
        magnet,
        SeriesFlag::parse(is_series),
        season.map(str::to_string),
        item_title,
        imdb_id,
    ))
}

fn id_and_rest(args: &str) -> Result<(ControlId, Option<&str>), CommandError> {
    let (raw_id, rest) = split_word(args).ok_or(CommandError::Missing("control id"))?;
    let control_id = raw_id
        .parse()
        .map_err(|_| CommandError::InvalidId(raw_id.to_string()))?;
    let rest = Some(rest.trim()).filter(|rest| !rest.is_empty());
    Ok((control_id, rest))
}

fn split_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    Some(match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (input, ""),
    })
}

/// Reads stdin on a background thread; end of input sends `Quit`.
pub fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>, trackers: Vec<String>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    feedback_error!("Failed to read input: {}", err);
                    break;
                }
            };
            match parse_line(&line, &trackers) {
                Ok(Some(event)) => {
                    if tx.send(event).is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(err) => eprintln!("{err}"),
            }
        }
        feedback_debug!("Input closed");
        let _ = tx.send(AppEvent::Quit);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(line: &str) -> Msg {
        match parse_line(line, &[]) {
            Ok(Some(AppEvent::Msg(msg))) => msg,
            other => panic!("unexpected parse result {other:?}"),
        }
    }

    #[test]
    fn add_keeps_whole_label() {
        assert_eq!(
            msg("add 3 Send to qBittorrent"),
            Msg::ControlRegistered {
                control_id: 3,
                label: "Send to qBittorrent".to_string(),
            }
        );
    }

    #[test]
    fn send_series_with_all_fields() {
        let expected = DispatchRequest::new(
            "magnet:?xt=urn:btih:abc",
            true,
            Some("1".to_string()),
            Some("Show Title".to_string()),
            Some("tt123".to_string()),
        );
        assert_eq!(
            msg("send 2 magnet:?xt=urn:btih:abc True tt123 1 Show Title"),
            Msg::SendClicked {
                control_id: 2,
                request: expected,
            }
        );
    }

    #[test]
    fn send_movie_drops_series_fields() {
        let Msg::SendClicked { request, .. } =
            msg("send 2 magnet:?xt=urn:btih:abc False - 4 Ignored")
        else {
            panic!("expected send");
        };
        assert!(!request.is_series());
        assert_eq!(request.imdb_id(), None);
        assert_eq!(request.season(), None);
        assert_eq!(request.item_title(), None);
    }

    #[test]
    fn errors_and_blank_lines() {
        assert_eq!(parse_line("   ", &[]), Ok(None));
        assert_eq!(parse_line("show", &[]), Ok(Some(AppEvent::Show)));
        assert_eq!(
            parse_line("paste 1", &[]),
            Err(CommandError::Unknown("paste".to_string()))
        );
        assert_eq!(
            parse_line("copy x text", &[]),
            Err(CommandError::InvalidId("x".to_string()))
        );
        assert_eq!(parse_line("copy 1", &[]), Err(CommandError::Missing("text")));
        assert_eq!(parse_line("send 1", &[]), Err(CommandError::Missing("magnet")));
    }

    #[test]
    fn copy_stream_builds_magnet_from_title_and_trackers() {
        let trackers = vec!["udp://tracker.example.org:1337/announce".to_string()];
        let parsed = parse_line(
            "copy-stream 5 abc123 My Movie (2020) \u{1F464} uploader 1.2 GB",
            &trackers,
        );
        assert_eq!(
            parsed,
            Ok(Some(AppEvent::Msg(Msg::CopyClicked {
                control_id: 5,
                text: "magnet:?xt=urn:btih:abc123&dn=My%20Movie%20%282020%29\
                       &tr=udp%3A%2F%2Ftracker.example.org%3A1337%2Fannounce"
                    .to_string(),
            })))
        );
    }

    #[test]
    fn copy_stream_without_title_omits_display_name() {
        assert_eq!(
            msg("copy-stream 1 abc123"),
            Msg::CopyClicked {
                control_id: 1,
                text: "magnet:?xt=urn:btih:abc123".to_string(),
            }
        );
        assert_eq!(
            parse_line("copy-stream 1", &[]),
            Err(CommandError::Missing("info hash"))
        );
    }
}
