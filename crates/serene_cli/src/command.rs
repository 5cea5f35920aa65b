use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  <text>          talk to the companion
  /mood N         record today's mood (1 = very sad .. 5 = excellent)
  /history        last 10 moods
  /stats          weekly mood average and totals
  /activities     suggested activities
  /done ID        mark an activity as done
  /sleep [HOURS]  show sleep hours, or log last night's
  /photo PATH     add a photo to your therapy album
  /album          show the album
  /restart        start a new check-in
  /help           this list
  /quit           leave";

/// One line of input from the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Chat(String),
    Mood(i64),
    History,
    Stats,
    Activities,
    Done(i64),
    Sleep(Option<f32>),
    Photo(PathBuf),
    Album,
    Restart,
    Help,
    Quit,
}

impl Command {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Some(Command::Chat(line.to_string())));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let command = match name.to_ascii_lowercase().as_str() {
            "mood" => Command::Mood(
                arg.parse()
                    .map_err(|_| anyhow!("usage: /mood N, with N from 1 to 5"))?,
            ),
            "history" => Command::History,
            "stats" => Command::Stats,
            "activities" => Command::Activities,
            "done" => Command::Done(
                arg.parse()
                    .map_err(|_| anyhow!("usage: /done ID (see /activities)"))?,
            ),
            "sleep" if arg.is_empty() => Command::Sleep(None),
            "sleep" => {
                let hours: f32 = arg
                    .parse()
                    .map_err(|_| anyhow!("usage: /sleep HOURS, e.g. /sleep 7.5"))?;
                if !(0.0..=24.0).contains(&hours) {
                    bail!("sleep hours must be between 0 and 24");
                }
                Command::Sleep(Some(hours))
            }
            "photo" if arg.is_empty() => bail!("usage: /photo PATH"),
            "photo" => Command::Photo(PathBuf::from(arg)),
            "album" => Command::Album,
            "restart" => Command::Restart,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command '/{}', try /help", other),
        };
        Ok(Some(command))
    }
}
