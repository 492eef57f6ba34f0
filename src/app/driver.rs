// SPDX-License-Identifier: MPL-2.0
//! Real-time driver for the demo binary.
//!
//! Reads one command per line and prints a snapshot after each. Between
//! commands the driver sleeps until the next timer deadline, advances the
//! application clock by the real elapsed time, and prints again so closes
//! and toasts show up as they happen.

use super::{App, Message, Route};
use crate::error::Result;
use crate::runtime::Key;
use crate::ui::contact_form::Field;
use crate::ui::lightbox;
use crate::ui::overlay;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::Instant;

pub const HELP: &str = "\
commands:
  about | contact | book        open a panel or the booking sheet
  close                         close the topmost overlay or the lightbox
  open <i> | next | prev        lightbox (category page only)
  key <Name>                    press a key (Escape, ArrowLeft, ArrowRight, ...)
  home | category <slug>        navigate
  field <name|email|message> <value...>
  submit                        submit the open form
  wait <ms>                     let time pass
  show | help | quit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(Message),
    Key(Key),
    Close,
    Field(Field, String),
    Submit,
    Wait(Duration),
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let command = match verb {
        "about" => Command::Send(Message::About(overlay::Message::Open)),
        "contact" => Command::Send(Message::Contact(overlay::Message::Open)),
        "book" => Command::Send(Message::Booking(overlay::Message::Open)),
        "close" => Command::Close,
        "open" => {
            let index = rest
                .parse::<usize>()
                .map_err(|_| format!("open expects an index, got '{rest}'"))?;
            Command::Send(Message::Lightbox(lightbox::Message::OpenAt(index)))
        }
        "next" => Command::Send(Message::Lightbox(lightbox::Message::Next)),
        "prev" => Command::Send(Message::Lightbox(lightbox::Message::Prev)),
        "key" if !rest.is_empty() => Command::Key(Key::from_name(rest)),
        "key" => return Err("key expects a key name".to_string()),
        "home" => Command::Send(Message::Navigate(Route::Home)),
        "category" if !rest.is_empty() => {
            Command::Send(Message::Navigate(Route::Category(rest.to_string())))
        }
        "category" => return Err("category expects a slug".to_string()),
        "field" => {
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = Field::from_name(name)
                .ok_or_else(|| format!("unknown field '{name}' (name, email, message)"))?;
            Command::Field(field, value.trim().to_string())
        }
        "submit" => Command::Submit,
        "wait" => {
            let millis = rest
                .parse::<u64>()
                .map_err(|_| format!("wait expects milliseconds, got '{rest}'"))?;
            Command::Wait(Duration::from_millis(millis))
        }
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(command))
}

async fn wait_for_timer(delay: Option<Duration>) {
    match delay {
        Some(delay) => tokio::time::sleep(delay).await,
        None => std::future::pending().await,
    }
}

/// Catches the app clock up with wall time. Returns the number of timers fired.
fn catch_up(app: &mut App, last: &mut Instant) -> usize {
    let now = Instant::now();
    let fired = app.advance(now.duration_since(*last));
    *last = now;
    fired
}

/// Runs commands from `input` until `quit` or end of input.
pub async fn run<R, W>(app: &mut App, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut last = Instant::now();
    writeln!(output, "{}", app.snapshot())?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                catch_up(app, &mut last);
                let Some(line) = line? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(None) => continue,
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Help)) => writeln!(output, "{HELP}")?,
                    Ok(Some(command)) => {
                        execute(app, command, &mut last).await;
                        writeln!(output, "{}", app.snapshot())?;
                    }
                    Err(err) => writeln!(output, "error: {err}")?,
                }
            }
            () = wait_for_timer(app.time_until_next_timer()) => {
                if catch_up(app, &mut last) > 0 {
                    writeln!(output, "{}", app.snapshot())?;
                }
            }
        }
        output.flush()?;
    }

    tracing::debug!("driver finished");
    Ok(())
}

async fn execute(app: &mut App, command: Command, last: &mut Instant) {
    match command {
        Command::Send(message) => app.update(message),
        Command::Key(key) => app.key(&key),
        Command::Close => app.close_topmost(),
        Command::Field(field, value) => app.fill_field(field, value),
        Command::Submit => app.submit_active_form(),
        Command::Wait(duration) => {
            tokio::time::sleep(duration).await;
            catch_up(app, last);
        }
        Command::Show | Command::Help | Command::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::portfolio::Catalog;

    #[test]
    fn parses_overlay_and_gallery_commands() {
        assert_eq!(
            parse_command("about"),
            Ok(Some(Command::Send(Message::About(overlay::Message::Open))))
        );
        assert_eq!(
            parse_command("  open 3 "),
            Ok(Some(Command::Send(Message::Lightbox(
                lightbox::Message::OpenAt(3)
            ))))
        );
        assert_eq!(parse_command("key Esc"), Ok(Some(Command::Key(Key::Escape))));
        assert_eq!(parse_command("close"), Ok(Some(Command::Close)));
    }

    #[test]
    fn parses_field_values_with_spaces() {
        assert_eq!(
            parse_command("field message Sleeve, black and grey"),
            Ok(Some(Command::Field(
                Field::Message,
                "Sleeve, black and grey".to_string()
            )))
        );
        assert_eq!(
            parse_command("field name"),
            Ok(Some(Command::Field(Field::Name, String::new())))
        );
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   # open the about panel"), Ok(None));
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(parse_command("open last").is_err());
        assert!(parse_command("wait soon").is_err());
        assert!(parse_command("field phone 555").is_err());
        assert!(parse_command("category").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[tokio::test]
    async fn run_executes_script_until_quit() {
        let mut app = App::new(
            Config::default(),
            Catalog::embedded().expect("embedded catalog"),
        );
        let script: &[u8] = b"category traditional\nopen 2\nnext\nbogus\nquit\nabout\n";
        let mut output = Vec::new();

        run(&mut app, script, &mut output)
            .await
            .expect("driver should finish");

        let text = String::from_utf8(output).expect("utf-8 output");
        assert!(text.contains("lightbox 4/12"), "{text}");
        assert!(text.contains("error: unknown command 'bogus'"), "{text}");
        // Commands after quit are not executed.
        assert!(!app.about().is_mounted());
    }
}
