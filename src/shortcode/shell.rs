//! Interactive menu.
//!
//! Reads choices line by line and answers in plain text. Mappings are saved when the
//! user picks exit, or when input runs out.

use shortcode::api::{CmdMessage, ShortenerApi};
use shortcode::error::{Result, ShortenError};
use shortcode::store::SnapshotStore;
use std::io::{BufRead, Write};
use tracing::warn;

const MENU: &str = "1: Add a URL. 2: Retrieve a URL. 3: Exit. 4: Show all mappings.";

pub fn run<S, R, W>(api: &mut ShortenerApi<S>, mut input: R, out: &mut W) -> Result<()>
where
    S: SnapshotStore,
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(out, "{}", MENU)?;
        let Some(choice) = read_line(&mut input)? else {
            api.save()?;
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                writeln!(out, "Enter your URL:")?;
                let Some(url) = read_line(&mut input)? else {
                    continue;
                };
                match api.shorten(&url) {
                    Ok(result) => write_messages(out, &result.messages)?,
                    Err(ShortenError::InvalidUrl(reason)) => {
                        warn!(%reason, "rejected URL");
                        writeln!(out, "Invalid URL")?;
                    }
                    Err(e @ ShortenError::CodeSpaceExhausted { .. }) => {
                        writeln!(out, "Error: {}", e)?;
                    }
                    Err(e) => return Err(e),
                }
            }
            "2" => {
                writeln!(out, "Enter your shortened URL:")?;
                let Some(code) = read_line(&mut input)? else {
                    continue;
                };
                let result = api.resolve(&code)?;
                for m in &result.mappings {
                    writeln!(out, "{}", m.url)?;
                }
                write_messages(out, &result.messages)?;
            }
            "3" => match api.save() {
                Ok(_) => return Ok(()),
                // Mappings are still in memory, so the user can try again.
                Err(e @ ShortenError::Persistence { .. }) => writeln!(out, "Error: {}", e)?,
                Err(e) => return Err(e),
            },
            "4" => {
                let result = api.list()?;
                for m in &result.mappings {
                    writeln!(out, "{}: {}", m.code, m.url)?;
                }
                write_messages(out, &result.messages)?;
            }
            _ => writeln!(out, "Unexpected input.")?,
        }
    }
}

/// Reads one line without its line ending. `None` at end of input.
///
/// Bytes that are not UTF-8 are replaced rather than rejected, so a garbled line
/// is answered like any other unexpected input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

fn write_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> Result<()> {
    for message in messages {
        writeln!(out, "{}", message.content)?;
    }
    Ok(())
}
