//! Notes on a lead: add one or list them.

use anyhow::Result;
use inquire::Text;

use super::display::format_timestamp;
use super::ui::{minimal_render_config, status};
use super::{connect, NoteArgs};
use crate::session::Requirement;

pub fn run_note(api_url: &str, args: NoteArgs) -> Result<()> {
    let (client, _) = connect(api_url, Requirement::SignedIn)?;

    if args.list {
        let notes = client.notes(args.lead)?;
        if notes.is_empty() {
            println!("No notes yet.");
            return Ok(());
        }
        for note in &notes {
            println!("  {}", format_timestamp(note.created_at));
            for line in note.content.lines() {
                println!("    {}", line);
            }
        }
        println!("\n{} note(s)", notes.len());
        return Ok(());
    }

    let content = match args.text {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            let input = Text::new("note: ")
                .with_render_config(minimal_render_config())
                .prompt_skippable()?;
            match input {
                Some(text) if !text.trim().is_empty() => text,
                _ => return Ok(()),
            }
        }
    };

    client.add_note(args.lead, content.trim())?;
    status("Saved.");
    Ok(())
}
